//! Staggered spin of the colored boxes, and the interpreter for deferred
//! [`Action`]s.

use dom::NodeId;
use scheduler::TimerId;
use tracing::{debug, trace};

use crate::error::{DemoError, Result};
use crate::host::{Action, DisplayHost};

pub const SPIN_TRANSFORM: &str = "rotate(360deg)";
pub const REST_TRANSFORM: &str = "rotate(0deg)";

/// Schedule a spin for every node currently carrying `marker`.
///
/// The node at position `i` starts spinning after `i * stagger_ms` and is
/// reset `spin_ms` later. Delays saturate at `u64::MAX`. Nodes are looked up once, when this runs; timers
/// are independent of each other. Returns the handles of the start timers.
pub fn animate_elements<H: DisplayHost + ?Sized>(
    host: &mut H,
    marker: &str,
    stagger_ms: u64,
    spin_ms: u64,
) -> Vec<TimerId> {
    let nodes = host.query_class(marker);
    debug!(marker, count = nodes.len(), "scheduling spins");
    nodes
        .into_iter()
        .enumerate()
        .map(|(i, node)| {
            host.set_timeout(
                (i as u64).saturating_mul(stagger_ms),
                Action::Rotate {
                    node,
                    reset_after_ms: spin_ms,
                },
            )
        })
        .collect()
}

/// Carry out `action`. `current_target` is the node whose listener produced
/// it; timer actions carry their own node and ignore it.
pub fn perform<H: DisplayHost + ?Sized>(
    host: &mut H,
    action: &Action,
    current_target: Option<NodeId>,
) -> Result<()> {
    trace!(?action, ?current_target, "perform");
    match action {
        Action::SetStyles(styles) => {
            let node = current_target.ok_or_else(|| {
                DemoError::InvalidArgument("style action needs a target node".to_string())
            })?;
            for (property, value) in styles {
                host.set_style(node, property, value)?;
            }
        }
        Action::AnimateElements {
            marker,
            stagger_ms,
            spin_ms,
        } => {
            animate_elements(host, marker, *stagger_ms, *spin_ms);
        }
        Action::Rotate {
            node,
            reset_after_ms,
        } => {
            host.set_style(*node, "transform", SPIN_TRANSFORM)?;
            host.set_timeout(*reset_after_ms, Action::ResetRotation { node: *node });
        }
        Action::ResetRotation { node } => {
            host.set_style(*node, "transform", REST_TRANSFORM)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builders::{DYNAMIC_ELEMENT_CLASS, build_dynamic_elements};
    use crate::config::DemoConfig;
    use crate::mock::MockHost;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn host_with_boxes(count: usize) -> (MockHost, Vec<NodeId>) {
        let mut host = MockHost::ready();
        let mut rng = StdRng::seed_from_u64(4);
        let config = DemoConfig {
            element_count: count,
            ..DemoConfig::default()
        };
        let container = build_dynamic_elements(&mut host, &mut rng, &config).unwrap();
        let root = host.root().unwrap();
        host.append_child(root, container).unwrap();
        let boxes = host.dom.children(container);
        (host, boxes)
    }

    #[test]
    fn spins_are_staggered_by_position() {
        let (mut host, boxes) = host_with_boxes(10);
        let ids = animate_elements(&mut host, DYNAMIC_ELEMENT_CLASS, 200, 1000);
        assert_eq!(ids.len(), 10);
        for (i, timer) in host.timers.iter().enumerate() {
            assert_eq!(timer.delay_ms, i as u64 * 200);
            assert_eq!(
                timer.action,
                Action::Rotate {
                    node: boxes[i],
                    reset_after_ms: 1000,
                }
            );
        }
    }

    #[test]
    fn huge_stagger_saturates_delays() {
        let (mut host, _boxes) = host_with_boxes(4);
        animate_elements(&mut host, DYNAMIC_ELEMENT_CLASS, i64::MAX as u64, 1000);
        let delays: Vec<u64> = host.timers.iter().map(|t| t.delay_ms).collect();
        assert_eq!(delays, vec![0, i64::MAX as u64, u64::MAX - 1, u64::MAX]);
    }

    #[test]
    fn no_matches_schedules_nothing() {
        let mut host = MockHost::ready();
        assert!(animate_elements(&mut host, "absent", 200, 1000).is_empty());
        assert!(host.timers.is_empty());
    }

    #[test]
    fn detached_boxes_are_not_animated() {
        let mut host = MockHost::ready();
        let mut rng = StdRng::seed_from_u64(4);
        build_dynamic_elements(&mut host, &mut rng, &DemoConfig::default()).unwrap();
        assert!(animate_elements(&mut host, DYNAMIC_ELEMENT_CLASS, 200, 1000).is_empty());
    }

    #[test]
    fn rotate_spins_and_schedules_reset() {
        let (mut host, boxes) = host_with_boxes(1);
        let node = boxes[0];
        perform(
            &mut host,
            &Action::Rotate {
                node,
                reset_after_ms: 1000,
            },
            None,
        )
        .unwrap();
        assert_eq!(host.dom.style(node, "transform"), Some(SPIN_TRANSFORM));
        assert_eq!(host.timers.len(), 1);
        assert_eq!(host.timers[0].delay_ms, 1000);
        assert_eq!(host.timers[0].action, Action::ResetRotation { node });

        perform(&mut host, &Action::ResetRotation { node }, None).unwrap();
        assert_eq!(host.dom.style(node, "transform"), Some(REST_TRANSFORM));
    }

    #[test]
    fn style_action_applies_to_current_target() {
        let (mut host, boxes) = host_with_boxes(2);
        let action = host.listener(boxes[1], "mouseover").unwrap();
        perform(&mut host, &action, Some(boxes[1])).unwrap();
        assert_eq!(host.dom.style(boxes[1], "transform"), Some("scale(1.1)"));
        assert_eq!(host.dom.style(boxes[0], "transform"), None);

        let action = host.listener(boxes[1], "mouseout").unwrap();
        perform(&mut host, &action, Some(boxes[1])).unwrap();
        assert_eq!(host.dom.style(boxes[1], "transform"), Some("scale(1)"));
        assert_eq!(host.dom.style(boxes[1], "box-shadow"), Some("none"));
    }

    #[test]
    fn style_action_without_target_is_rejected() {
        let mut host = MockHost::ready();
        let err = perform(&mut host, &Action::set_styles([("a", "b")]), None).unwrap_err();
        assert!(matches!(err, DemoError::InvalidArgument(_)));
    }

    #[test]
    fn rotating_a_removed_node_fails() {
        let (mut host, boxes) = host_with_boxes(1);
        host.dom.remove_subtree(boxes[0]);
        let err = perform(
            &mut host,
            &Action::Rotate {
                node: boxes[0],
                reset_after_ms: 1000,
            },
            None,
        )
        .unwrap_err();
        assert!(matches!(err, DemoError::UnknownNode(_)));
        assert!(host.timers.is_empty());
    }

    #[test]
    fn click_action_starts_animation() {
        let (mut host, _boxes) = host_with_boxes(3);
        let action = Action::AnimateElements {
            marker: DYNAMIC_ELEMENT_CLASS.to_string(),
            stagger_ms: 50,
            spin_ms: 500,
        };
        perform(&mut host, &action, None).unwrap();
        let delays: Vec<u64> = host.timers.iter().map(|t| t.delay_ms).collect();
        assert_eq!(delays, vec![0, 50, 100]);
    }

    #[test]
    fn timers_can_be_cancelled() {
        let (mut host, _boxes) = host_with_boxes(3);
        let ids = animate_elements(&mut host, DYNAMIC_ELEMENT_CLASS, 200, 1000);
        assert!(host.clear_timeout(ids[1]));
        assert!(!host.clear_timeout(ids[1]));
        assert_eq!(host.timers.len(), 2);
    }
}
