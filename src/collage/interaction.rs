use crate::util::{ease_cubic_in_out, lerp};

use super::config::HoverConfig;
use super::node::{CollageNode, NodeKind};

#[derive(Clone, Copy, Debug, PartialEq)]
struct RadiusTween {
    from_radius: f32,
    to_radius: f32,
    from_saturation: f32,
    to_saturation: f32,
    started_at: f64,
    duration_secs: f32,
}

impl RadiusTween {
    fn progress(&self, now: f64) -> f32 {
        if self.duration_secs <= 0.0 {
            return 1.0;
        }
        (((now - self.started_at) as f32) / self.duration_secs).clamp(0.0, 1.0)
    }
}

/// Hover-driven radius tweens, one slot per node of the current generation.
pub(super) struct Interactions {
    config: HoverConfig,
    tweens: Vec<Option<RadiusTween>>,
}

impl Interactions {
    pub(super) fn new(config: HoverConfig, node_count: usize) -> Self {
        Self {
            config,
            tweens: vec![None; node_count],
        }
    }

    pub(super) fn hover(&mut self, index: usize, node: &mut CollageNode, now: f64) -> bool {
        if node.kind == NodeKind::Title {
            return false;
        }
        // Captured once, before any tween touches the radius.
        node.resting_radius.get_or_insert(node.radius);
        self.begin(index, node, self.config.radius, 1.0, now)
    }

    pub(super) fn leave(&mut self, index: usize, node: &mut CollageNode, now: f64) -> bool {
        if node.kind == NodeKind::Title {
            return false;
        }
        let resting = *node.resting_radius.get_or_insert(node.radius);
        let saturation = if node.kind == NodeKind::Album { 0.0 } else { 1.0 };
        self.begin(index, node, resting, saturation, now)
    }

    /// Starts from the live radius so a re-hover mid-tween never jumps.
    fn begin(
        &mut self,
        index: usize,
        node: &CollageNode,
        to_radius: f32,
        to_saturation: f32,
        now: f64,
    ) -> bool {
        let Some(slot) = self.tweens.get_mut(index) else {
            return false;
        };

        *slot = Some(RadiusTween {
            from_radius: node.radius,
            to_radius,
            from_saturation: node.saturation,
            to_saturation,
            started_at: now,
            duration_secs: self.config.duration_secs,
        });
        true
    }

    /// Writes the interpolated radius of every active tween into its node.
    /// Returns whether any radius was written this frame.
    pub(super) fn advance(&mut self, nodes: &mut [CollageNode], now: f64) -> bool {
        let mut changed = false;
        for (slot, node) in self.tweens.iter_mut().zip(nodes.iter_mut()) {
            let Some(tween) = slot else {
                continue;
            };

            let progress = tween.progress(now);
            let eased = ease_cubic_in_out(progress);
            node.radius = lerp(tween.from_radius, tween.to_radius, eased);
            node.saturation = lerp(tween.from_saturation, tween.to_saturation, eased);
            changed = true;

            if progress >= 1.0 {
                *slot = None;
            }
        }
        changed
    }

    pub(super) fn is_animating(&self) -> bool {
        self.tweens.iter().any(Option::is_some)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;
    use crate::collage::config::CollageConfig;
    use crate::collage::node::tests::two_group_catalog;
    use crate::collage::node::{CollageFilter, build_nodes};

    fn setup() -> (Interactions, Vec<CollageNode>, HoverConfig) {
        let config = CollageConfig::default();
        let nodes = build_nodes(
            &two_group_catalog(),
            CollageFilter::All,
            &config.radii,
            config.canvas.size * 0.5,
            &mut StdRng::seed_from_u64(4),
        );
        (
            Interactions::new(config.hover, nodes.len()),
            nodes,
            config.hover,
        )
    }

    const ALBUM: usize = 3;

    #[test]
    fn hover_grows_to_target_and_leave_returns_to_rest() {
        let (mut interactions, mut nodes, hover) = setup();
        let original = nodes[ALBUM].radius;

        assert!(interactions.hover(ALBUM, &mut nodes[ALBUM], 0.0));
        interactions.advance(&mut nodes, 0.1);
        let mid = nodes[ALBUM].radius;
        assert!(mid > original && mid < hover.radius);

        interactions.advance(&mut nodes, 1.0);
        assert_eq!(nodes[ALBUM].radius, hover.radius);
        assert_eq!(nodes[ALBUM].saturation, 1.0);
        assert!(!interactions.is_animating());

        assert!(interactions.leave(ALBUM, &mut nodes[ALBUM], 2.0));
        interactions.advance(&mut nodes, 3.0);
        assert_eq!(nodes[ALBUM].radius, original);
        assert_eq!(nodes[ALBUM].saturation, 0.0);
        assert_eq!(nodes[ALBUM].resting_radius, Some(original));
    }

    #[test]
    fn immediate_leave_keeps_resting_radius() {
        let (mut interactions, mut nodes, _) = setup();
        let original = nodes[ALBUM].radius;

        interactions.hover(ALBUM, &mut nodes[ALBUM], 0.0);
        interactions.leave(ALBUM, &mut nodes[ALBUM], 0.0);
        assert_eq!(nodes[ALBUM].resting_radius, Some(original));

        for frame in 1..=30 {
            interactions.advance(&mut nodes, frame as f64 / 60.0);
            assert_eq!(nodes[ALBUM].radius, original);
        }
    }

    #[test]
    fn rehover_mid_tween_starts_from_live_radius() {
        let (mut interactions, mut nodes, hover) = setup();
        let original = nodes[ALBUM].radius;

        interactions.hover(ALBUM, &mut nodes[ALBUM], 0.0);
        interactions.advance(&mut nodes, 0.2);
        interactions.leave(ALBUM, &mut nodes[ALBUM], 0.2);
        interactions.advance(&mut nodes, 0.25);
        let live = nodes[ALBUM].radius;

        interactions.hover(ALBUM, &mut nodes[ALBUM], 0.25);
        interactions.advance(&mut nodes, 0.25);
        assert_eq!(nodes[ALBUM].radius, live);

        for cycle in 0..20 {
            let start = 1.0 + cycle as f64;
            interactions.hover(ALBUM, &mut nodes[ALBUM], start);
            interactions.advance(&mut nodes, start + 0.1);
            interactions.leave(ALBUM, &mut nodes[ALBUM], start + 0.1);
            interactions.advance(&mut nodes, start + 0.15);
            assert!(nodes[ALBUM].radius <= hover.radius.max(original));
            assert!(nodes[ALBUM].radius >= hover.radius.min(original));
        }

        interactions.advance(&mut nodes, 100.0);
        assert_eq!(nodes[ALBUM].radius, original);
        assert_eq!(nodes[ALBUM].resting_radius, Some(original));
    }

    #[test]
    fn title_ignores_hover() {
        let (mut interactions, mut nodes, _) = setup();
        assert!(!interactions.hover(0, &mut nodes[0], 0.0));
        assert!(!interactions.advance(&mut nodes, 1.0));
        assert_eq!(nodes[0].resting_radius, None);
    }
}
