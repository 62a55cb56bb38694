//! The sequence run once when the host signals it is ready.

use dom::NodeId;
use rand::Rng;
use tracing::info;

use crate::builders::{
    build_animate_button, build_data_table, build_dynamic_elements, build_text_block,
};
use crate::compute::{bubble_sort, fibonacci, random_sequence};
use crate::config::DemoConfig;
use crate::error::Result;
use crate::host::DisplayHost;

pub const INIT_MESSAGE: &str = "Demo library initialized";

/// Nodes inserted by [`on_ready`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReadyReport {
    pub container: NodeId,
    pub table: NodeId,
    pub text_block: NodeId,
    pub button: NodeId,
}

/// Log the Fibonacci numbers and a sorted random sequence, then append the
/// colored boxes, the table and the text block to the root and put the
/// animate control in front of everything.
pub fn on_ready<H, R>(host: &mut H, rng: &mut R, config: &DemoConfig) -> Result<ReadyReport>
where
    H: DisplayHost + ?Sized,
    R: Rng + ?Sized,
{
    config.validate()?;
    let root = host.root()?;
    host.log(INIT_MESSAGE);

    for i in 0..config.fibonacci_count {
        let value = fibonacci(i)?;
        host.log(&format!("Fibonacci({i}) = {value}"));
    }

    let mut values = random_sequence(rng, config.array_size);
    let sorted = bubble_sort(&mut values);
    host.log(&format!("Sorted array: {sorted:?}"));

    let container = build_dynamic_elements(host, rng, config)?;
    host.append_child(root, container)?;

    let table = build_data_table(host, rng, config)?;
    host.append_child(root, table)?;

    let text_block = build_text_block(host, rng, config)?;
    host.append_child(root, text_block)?;

    let button = build_animate_button(host, config)?;
    let first = host.first_child(root);
    host.insert_before(root, button, first)?;

    info!(?container, ?table, ?text_block, ?button, "demo content inserted");
    Ok(ReadyReport {
        container,
        table,
        text_block,
        button,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builders::{ANIMATE_BUTTON_LABEL, DYNAMIC_ELEMENT_CLASS};
    use crate::error::DemoError;
    use crate::mock::MockHost;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn ready_sequence_against_mock_host() {
        let mut host = MockHost::ready();
        let mut rng = StdRng::seed_from_u64(99);
        let report = on_ready(&mut host, &mut rng, &DemoConfig::default()).unwrap();
        let root = host.root.unwrap();

        let fib_lines: Vec<&String> = host
            .log
            .iter()
            .filter(|l| l.starts_with("Fibonacci("))
            .collect();
        assert_eq!(fib_lines.len(), 20);
        assert_eq!(fib_lines[0], "Fibonacci(0) = 0");
        assert_eq!(fib_lines[19], "Fibonacci(19) = 4181");
        assert_eq!(host.log[0], INIT_MESSAGE);

        assert_eq!(
            host.dom.children(root),
            vec![report.button, report.container, report.table, report.text_block]
        );
        assert_eq!(host.dom.children(report.container).len(), 10);
        assert_eq!(host.dom.get_elements_by_tag(report.table, "tr").len(), 21);
        assert_eq!(host.dom.text_content(report.button), ANIMATE_BUTTON_LABEL);
        assert_eq!(host.query_class(DYNAMIC_ELEMENT_CLASS).len(), 10);
    }

    #[test]
    fn sorted_line_is_non_decreasing() {
        let mut host = MockHost::ready();
        let mut rng = StdRng::seed_from_u64(1);
        on_ready(&mut host, &mut rng, &DemoConfig::default()).unwrap();
        let line = host
            .log
            .iter()
            .find(|l| l.starts_with("Sorted array: "))
            .unwrap();
        let body = line
            .trim_start_matches("Sorted array: [")
            .trim_end_matches(']');
        let values: Vec<u32> = body.split(", ").map(|v| v.parse().unwrap()).collect();
        assert_eq!(values.len(), 100);
        assert!(values.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn unavailable_host_fails_before_logging() {
        let mut host = MockHost::unavailable();
        let mut rng = StdRng::seed_from_u64(1);
        let err = on_ready(&mut host, &mut rng, &DemoConfig::default()).unwrap_err();
        assert!(matches!(err, DemoError::HostUnavailable));
        assert!(host.log.is_empty());
    }

    #[test]
    fn button_goes_first_even_with_existing_content() {
        let mut host = MockHost::ready();
        let root = host.root.unwrap();
        let existing = host.dom.create_element("header");
        host.dom.append_child(root, existing).unwrap();

        let mut rng = StdRng::seed_from_u64(1);
        let report = on_ready(&mut host, &mut rng, &DemoConfig::default()).unwrap();
        let children = host.dom.children(root);
        assert_eq!(children[0], report.button);
        assert_eq!(children[1], existing);
    }

    #[test]
    fn runs_are_independent() {
        let config = DemoConfig::default();
        let mut first = MockHost::ready();
        let mut second = MockHost::ready();
        on_ready(&mut first, &mut StdRng::seed_from_u64(5), &config).unwrap();
        on_ready(&mut second, &mut StdRng::seed_from_u64(5), &config).unwrap();
        let first_root = first.root.unwrap();
        let second_root = second.root.unwrap();
        assert_eq!(first.log, second.log);
        assert_eq!(first.dom.to_html(first_root), second.dom.to_html(second_root));
    }
}
