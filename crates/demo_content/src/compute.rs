//! Pure computations: Fibonacci, random integer sequences and bubble sort.

use rand::Rng;

use crate::error::{DemoError, Result};

/// Largest index whose Fibonacci number fits in a `u64`.
pub const MAX_FIBONACCI_INDEX: u32 = 93;

/// Exclusive upper bound of values produced by [`random_sequence`].
pub const RANDOM_VALUE_BOUND: u32 = 1000;

/// The `n`-th Fibonacci number, F(0) = 0, F(1) = 1.
///
/// Uses the naive doubly-recursive definition with no memoization, so the
/// running time is exponential in `n`.
pub fn fibonacci(n: u32) -> Result<u64> {
    if n > MAX_FIBONACCI_INDEX {
        return Err(DemoError::InvalidArgument(format!(
            "fibonacci index {n} exceeds {MAX_FIBONACCI_INDEX}"
        )));
    }
    Ok(naive_fibonacci(n))
}

fn naive_fibonacci(n: u32) -> u64 {
    if n <= 1 {
        return n as u64;
    }
    naive_fibonacci(n - 1) + naive_fibonacci(n - 2)
}

/// `count` independent draws from `[0, 1000)`.
pub fn random_sequence<R: Rng + ?Sized>(rng: &mut R, count: usize) -> Vec<u32> {
    (0..count)
        .map(|_| rng.gen_range(0..RANDOM_VALUE_BOUND))
        .collect()
}

/// Sort `values` in place into non-decreasing order and hand the same slice
/// back.
///
/// Runs `len` full passes of adjacent compare-and-swap, O(n²) regardless of
/// input order.
pub fn bubble_sort<T: PartialOrd>(values: &mut [T]) -> &mut [T] {
    let len = values.len();
    for _ in 0..len {
        for j in 0..len.saturating_sub(1) {
            if values[j] > values[j + 1] {
                values.swap(j, j + 1);
            }
        }
    }
    values
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use rstest::rstest;

    #[test]
    fn first_fibonacci_numbers() {
        let got: Vec<u64> = (0..=10).map(|n| fibonacci(n).unwrap()).collect();
        assert_eq!(got, vec![0, 1, 1, 2, 3, 5, 8, 13, 21, 34, 55]);
    }

    #[test]
    fn fibonacci_recurrence() {
        for n in 2..=25 {
            assert_eq!(
                fibonacci(n).unwrap(),
                fibonacci(n - 1).unwrap() + fibonacci(n - 2).unwrap()
            );
        }
    }

    #[test]
    fn fibonacci_rejects_overflowing_index() {
        assert!(matches!(
            fibonacci(MAX_FIBONACCI_INDEX + 1),
            Err(DemoError::InvalidArgument(_))
        ));
    }

    #[rstest]
    #[case(0)]
    #[case(1)]
    #[case(100)]
    #[case(2_500)]
    fn random_sequence_length_and_range(#[case] count: usize) {
        let mut rng = StdRng::seed_from_u64(7);
        let values = random_sequence(&mut rng, count);
        assert_eq!(values.len(), count);
        assert!(values.iter().all(|&v| v < RANDOM_VALUE_BOUND));
    }

    #[test]
    fn random_sequence_is_reproducible_with_seed() {
        let a = random_sequence(&mut StdRng::seed_from_u64(42), 50);
        let b = random_sequence(&mut StdRng::seed_from_u64(42), 50);
        assert_eq!(a, b);
    }

    #[test]
    fn bubble_sort_example() {
        let mut values = [5, 3, 1, 4, 2];
        assert_eq!(bubble_sort(&mut values), &[1, 2, 3, 4, 5]);
        // Sorted in place as well as returned.
        assert_eq!(values, [1, 2, 3, 4, 5]);
    }

    #[rstest]
    #[case(vec![])]
    #[case(vec![1])]
    #[case(vec![2, 2, 1, 1, 3, 2])]
    #[case(vec![9, 8, 7, 6, 5, 4, 3, 2, 1, 0])]
    #[case(vec![0, 1, 2, 3])]
    fn bubble_sort_matches_std_sort(#[case] input: Vec<u32>) {
        let mut expected = input.clone();
        expected.sort();
        let mut actual = input;
        bubble_sort(&mut actual);
        assert_eq!(actual, expected);
    }

    #[test]
    fn bubble_sort_is_idempotent() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut values = random_sequence(&mut rng, 200);
        bubble_sort(&mut values);
        let once = values.clone();
        bubble_sort(&mut values);
        assert_eq!(values, once);
        assert!(values.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn bubble_sort_preserves_multiset() {
        let mut rng = StdRng::seed_from_u64(11);
        let original = random_sequence(&mut rng, 300);
        let mut sorted = original.clone();
        bubble_sort(&mut sorted);
        assert_eq!(sorted.len(), original.len());
        for v in &original {
            let before = original.iter().filter(|x| *x == v).count();
            let after = sorted.iter().filter(|x| *x == v).count();
            assert_eq!(before, after);
        }
    }
}
