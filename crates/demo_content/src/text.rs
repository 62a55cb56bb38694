//! Pseudo-Latin filler text.

use rand::Rng;
use rand::seq::SliceRandom;

/// Sampling vocabulary. `ut` appears twice, which doubles its weight.
pub const WORDS: [&str; 35] = [
    "lorem",
    "ipsum",
    "dolor",
    "sit",
    "amet",
    "consectetur",
    "adipiscing",
    "elit",
    "sed",
    "do",
    "eiusmod",
    "tempor",
    "incididunt",
    "ut",
    "labore",
    "et",
    "dolore",
    "magna",
    "aliqua",
    "enim",
    "ad",
    "minim",
    "veniam",
    "quis",
    "nostrud",
    "exercitation",
    "ullamco",
    "laboris",
    "nisi",
    "ut",
    "aliquip",
    "ex",
    "ea",
    "commodo",
    "consequat",
];

/// Number of tokens produced by [`lorem_ipsum`].
pub const LOREM_WORD_COUNT: usize = 100;

/// 100 words drawn uniformly from [`WORDS`], each followed by one space.
pub fn lorem_ipsum<R: Rng + ?Sized>(rng: &mut R) -> String {
    lorem_ipsum_words(rng, LOREM_WORD_COUNT)
}

/// `count` words drawn uniformly from [`WORDS`], each followed by one space
/// (the result keeps its trailing separator).
pub fn lorem_ipsum_words<R: Rng + ?Sized>(rng: &mut R, count: usize) -> String {
    let mut out = String::with_capacity(count * 8);
    for _ in 0..count {
        if let Some(word) = WORDS.choose(rng) {
            out.push_str(word);
            out.push(' ');
        }
    }
    out
}
