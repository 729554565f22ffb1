use std::collections::HashMap;

use eframe::egui::{Pos2, pos2};

use super::NodeHandle;
use super::config::RenderConfig;
use super::node::{CollageNode, NodeKind};

/// Visual geometry of one node for the current tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Placement {
    pub handle: NodeHandle,
    pub kind: NodeKind,
    pub center: Pos2,
    pub outer_radius: f32,
    /// Circular mask applied to the rectangular artwork.
    pub clip_radius: f32,
    /// Spindle hole drawn over album covers.
    pub hole_radius: Option<f32>,
    pub saturation: f32,
}

/// Projects node state into placements. Owns the id <-> index mapping so the
/// drawing layer only ever holds handles and ids.
pub(super) struct RenderSync {
    generation: u64,
    config: RenderConfig,
    index_by_id: HashMap<String, usize>,
    ids: Vec<String>,
    placements: Vec<Placement>,
}

impl RenderSync {
    pub(super) fn new(generation: u64, config: RenderConfig, nodes: &[CollageNode]) -> Self {
        let ids = nodes.iter().map(|node| node.id.clone()).collect::<Vec<_>>();
        let index_by_id = ids
            .iter()
            .enumerate()
            .map(|(index, id)| (id.clone(), index))
            .collect::<HashMap<_, _>>();
        debug_assert_eq!(index_by_id.len(), ids.len(), "node ids must be unique");

        let mut sync = Self {
            generation,
            config,
            index_by_id,
            ids,
            placements: Vec::with_capacity(nodes.len()),
        };
        sync.sync(nodes);
        sync
    }

    pub(super) fn sync(&mut self, nodes: &[CollageNode]) {
        self.placements.clear();
        for (index, node) in nodes.iter().enumerate() {
            self.placements.push(Placement {
                handle: NodeHandle {
                    generation: self.generation,
                    index,
                },
                kind: node.kind,
                center: pos2(node.position.x, node.position.y),
                outer_radius: node.radius,
                clip_radius: (node.radius - self.config.clip_padding).max(0.0),
                hole_radius: (node.kind == NodeKind::Album).then_some(self.config.hole_radius),
                saturation: node.saturation,
            });
        }
    }

    pub(super) fn placements(&self) -> &[Placement] {
        &self.placements
    }

    pub(super) fn index_of(&self, id: &str) -> Option<usize> {
        self.index_by_id.get(id).copied()
    }

    pub(super) fn id_of(&self, index: usize) -> Option<&str> {
        self.ids.get(index).map(String::as_str)
    }

    /// Closest placement accepted by `visible` whose outer circle contains `point`.
    pub(super) fn hit_test(
        &self,
        point: Pos2,
        visible: impl Fn(NodeHandle) -> bool,
    ) -> Option<NodeHandle> {
        self.placements
            .iter()
            .filter(|placement| visible(placement.handle))
            .filter_map(|placement| {
                let distance = placement.center.distance(point);
                (distance <= placement.outer_radius).then_some((placement.handle, distance))
            })
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(handle, _distance)| handle)
    }
}

#[cfg(test)]
mod tests {
    use eframe::egui::vec2;
    use pretty_assertions::assert_eq;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;
    use crate::collage::config::CollageConfig;
    use crate::collage::node::tests::two_group_catalog;
    use crate::collage::node::{CollageFilter, build_nodes};

    fn nodes() -> (Vec<CollageNode>, RenderConfig) {
        let config = CollageConfig::default();
        let mut nodes = build_nodes(
            &two_group_catalog(),
            CollageFilter::All,
            &config.radii,
            vec2(600.0, 400.0),
            &mut StdRng::seed_from_u64(8),
        );
        for (index, node) in nodes.iter_mut().enumerate().skip(1) {
            node.position = vec2(100.0 * index as f32, 50.0);
        }
        (nodes, config.render)
    }

    #[test]
    fn projection_is_idempotent() {
        let (nodes, config) = nodes();
        let mut sync = RenderSync::new(3, config, &nodes);
        let first = sync.placements().to_vec();
        sync.sync(&nodes);
        assert_eq!(sync.placements(), first.as_slice());
    }

    #[test]
    fn geometry_follows_current_radius() {
        let (mut nodes, config) = nodes();
        let mut sync = RenderSync::new(0, config, &nodes);

        nodes[3].radius = 77.0;
        sync.sync(&nodes);
        let album = sync.placements()[3];
        assert_eq!(album.outer_radius, 77.0);
        assert_eq!(album.clip_radius, 77.0 - config.clip_padding);
        assert_eq!(album.hole_radius, Some(config.hole_radius));
        assert_eq!(album.center, pos2(300.0, 50.0));

        assert_eq!(sync.placements()[1].hole_radius, None);
        assert_eq!(sync.placements()[0].hole_radius, None);
    }

    #[test]
    fn ids_and_indices_map_both_ways() {
        let (nodes, config) = nodes();
        let sync = RenderSync::new(0, config, &nodes);

        for (index, node) in nodes.iter().enumerate() {
            assert_eq!(sync.index_of(&node.id), Some(index));
            assert_eq!(sync.id_of(index), Some(node.id.as_str()));
        }
        assert_eq!(sync.index_of("album-Z-9"), None);
        assert_eq!(sync.id_of(nodes.len()), None);
    }

    #[test]
    fn hit_test_picks_containing_circle() {
        let (nodes, config) = nodes();
        let sync = RenderSync::new(5, config, &nodes);

        let hit = sync.hit_test(pos2(302.0, 51.0), |_| true).unwrap();
        assert_eq!(hit, NodeHandle { generation: 5, index: 3 });
        assert_eq!(sync.hit_test(pos2(-500.0, -500.0), |_| true), None);
    }

    #[test]
    fn hit_test_skips_rejected_placements() {
        let (nodes, config) = nodes();
        let sync = RenderSync::new(5, config, &nodes);

        assert_eq!(sync.hit_test(pos2(302.0, 51.0), |handle| handle.index != 3), None);
    }
}
