mod cluster;
mod config;
mod entrance;
mod interaction;
mod node;
mod render_sync;
mod simulation;

use eframe::egui::{Pos2, Vec2};
use rand::Rng;
use tracing::{debug, info};

use crate::catalog::{AlbumId, Catalog};

pub use cluster::ClusterTargets;
pub use config::CollageConfig;
pub use entrance::{Reveal, TitleReveal};
pub use node::{CollageFilter, CollageNode, NodeKind, album_node_id, artist_node_id};
pub use render_sync::Placement;

use entrance::Entrance;
use interaction::Interactions;
use node::build_nodes;
use render_sync::RenderSync;
use simulation::{ForceField, Simulation};

/// Identifies a node within one generation of the collage. Handles from a
/// discarded generation never resolve.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NodeHandle {
    pub generation: u64,
    pub index: usize,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NavigationTarget {
    Artist { group_id: String },
    Album { group_id: String, album_id: AlbumId },
}

/// One generation of the collage: node arena, simulation, hover tweens,
/// render projection and entrance reveal. Rebuilding means constructing a new
/// `Collage`; dropping the old one drops its stepper and in-flight animations.
pub struct Collage {
    generation: u64,
    config: CollageConfig,
    filter: CollageFilter,
    canvas: Vec2,
    nodes: Vec<CollageNode>,
    targets: ClusterTargets,
    group_ids: Vec<String>,
    simulation: Simulation,
    interactions: Interactions,
    render: RenderSync,
    entrance: Entrance,
}

fn canvas_is_valid(canvas: Vec2) -> bool {
    canvas.x.is_finite() && canvas.y.is_finite() && canvas.x > 0.0 && canvas.y > 0.0
}

impl Collage {
    pub fn new(
        catalog: &Catalog,
        filter: CollageFilter,
        config: CollageConfig,
        generation: u64,
        rng: &mut impl Rng,
        now: f64,
    ) -> Self {
        let canvas = config.canvas.size;
        let center = canvas * 0.5;
        let mut nodes = build_nodes(catalog, filter, &config.radii, center, rng);
        Simulation::scatter(&mut nodes, center);

        let group_ids = catalog
            .groups
            .iter()
            .map(|group| group.id.clone())
            .collect::<Vec<_>>();
        let targets = ClusterTargets::for_catalog(catalog, canvas, config.canvas.cluster_ring);

        let mut simulation = Simulation::new(config.forces);
        if canvas_is_valid(canvas) && !nodes.is_empty() {
            simulation.restart();
        }

        info!(
            generation,
            filter = %filter,
            nodes = nodes.len(),
            clusters = targets.len(),
            "collage rebuilt"
        );

        Self {
            generation,
            filter,
            canvas,
            targets,
            group_ids,
            simulation,
            interactions: Interactions::new(config.hover, nodes.len()),
            render: RenderSync::new(generation, config.render, &nodes),
            entrance: Entrance::new(config.entrance, now, nodes.len()),
            nodes,
            config,
        }
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn filter(&self) -> CollageFilter {
        self.filter
    }

    pub fn canvas(&self) -> Vec2 {
        self.canvas
    }

    pub fn nodes(&self) -> &[CollageNode] {
        &self.nodes
    }

    pub fn targets(&self) -> &ClusterTargets {
        &self.targets
    }

    pub fn is_running(&self) -> bool {
        self.simulation.is_running()
    }

    pub fn alpha(&self) -> f32 {
        self.simulation.alpha()
    }

    pub fn alpha_target(&self) -> f32 {
        self.simulation.alpha_target()
    }

    pub fn ticks(&self) -> u64 {
        self.simulation.ticks()
    }

    /// Follows the drawing surface. An unusable canvas stops the stepper until
    /// a valid one arrives; cluster targets and the title pin follow the center.
    pub fn set_canvas(&mut self, canvas: Vec2) {
        if canvas == self.canvas {
            return;
        }

        self.canvas = canvas;
        if !canvas_is_valid(canvas) {
            self.simulation.stop();
            return;
        }

        let center = canvas * 0.5;
        self.targets = ClusterTargets::from_group_ids(
            self.group_ids.iter().map(String::as_str),
            canvas,
            self.config.canvas.cluster_ring,
        );
        for node in &mut self.nodes {
            if node.pin.is_some() {
                node.pin = Some(center);
                node.position = center;
            }
        }

        if !self.nodes.is_empty() {
            self.simulation.restart();
        }
        debug!(generation = self.generation, ?canvas, "canvas resized");
    }

    fn field(&self) -> (Vec2, f32) {
        let radial = self.canvas.x.min(self.canvas.y) * self.config.canvas.radial_ring;
        (self.canvas * 0.5, radial)
    }

    /// One animation frame: hover tweens, one simulation tick, then render sync.
    /// Returns whether another frame is wanted.
    pub fn frame(&mut self, now: f64) -> bool {
        if self.interactions.advance(&mut self.nodes, now) {
            self.reheat();
        }

        let (center, radial_radius) = self.field();
        let field = ForceField {
            center,
            targets: &self.targets,
            radial_radius,
        };
        let ticked = self.simulation.tick(&mut self.nodes, field);
        self.render.sync(&self.nodes);

        ticked || self.interactions.is_animating() || !self.entrance.is_complete(now)
    }

    fn reheat(&mut self) {
        if !canvas_is_valid(self.canvas) || self.nodes.is_empty() {
            return;
        }

        let hover = self.config.hover;
        if self
            .simulation
            .reheat_if_cold(hover.restart_threshold, hover.restart_alpha)
        {
            debug!(
                generation = self.generation,
                alpha = self.simulation.alpha(),
                "simulation reheated"
            );
        }
    }

    fn resolve(&self, handle: NodeHandle) -> Option<usize> {
        (handle.generation == self.generation && handle.index < self.nodes.len())
            .then_some(handle.index)
    }

    pub fn hover(&mut self, handle: NodeHandle, now: f64) -> bool {
        let Some(index) = self.resolve(handle) else {
            return false;
        };
        let started = self.interactions.hover(index, &mut self.nodes[index], now);
        if started {
            self.reheat();
        }
        started
    }

    pub fn leave(&mut self, handle: NodeHandle, now: f64) -> bool {
        let Some(index) = self.resolve(handle) else {
            return false;
        };
        let started = self.interactions.leave(index, &mut self.nodes[index], now);
        if started {
            self.reheat();
        }
        started
    }

    /// Resolves a click into a navigation target and hands it to `navigate`.
    pub fn click(&self, handle: NodeHandle, navigate: impl FnOnce(NavigationTarget)) -> bool {
        let Some(node) = self.resolve(handle).and_then(|index| self.nodes.get(index)) else {
            return false;
        };
        let Some(group_id) = node.group_id.clone() else {
            return false;
        };

        let target = match (node.kind, node.album_id.clone()) {
            (NodeKind::Artist, _) => NavigationTarget::Artist { group_id },
            (NodeKind::Album, Some(album_id)) => NavigationTarget::Album { group_id, album_id },
            _ => return false,
        };

        info!(node = %node.id, ?target, "navigation requested");
        navigate(target);
        true
    }

    pub fn node(&self, handle: NodeHandle) -> Option<&CollageNode> {
        self.resolve(handle).and_then(|index| self.nodes.get(index))
    }

    pub fn placements(&self) -> &[Placement] {
        self.render.placements()
    }

    pub fn handle_for(&self, id: &str) -> Option<NodeHandle> {
        self.render.index_of(id).map(|index| NodeHandle {
            generation: self.generation,
            index,
        })
    }

    pub fn id_for(&self, handle: NodeHandle) -> Option<&str> {
        self.resolve(handle)
            .and_then(|index| self.render.id_of(index))
    }

    /// `point` is in canvas coordinates. Nodes the entrance has not revealed yet
    /// cannot be hit.
    pub fn hit_test(&self, point: Pos2, now: f64) -> Option<NodeHandle> {
        self.render.hit_test(point, |handle| {
            self.entrance.reveal(handle.index, now).opacity > 0.0
        })
    }

    pub fn reveal(&self, handle: NodeHandle, now: f64) -> Reveal {
        self.resolve(handle)
            .map(|index| self.entrance.reveal(index, now))
            .unwrap_or(Reveal::HIDDEN)
    }

    pub fn title_reveal(&self, now: f64) -> Option<TitleReveal> {
        self.nodes
            .iter()
            .position(|node| node.kind == NodeKind::Title)
            .map(|index| self.entrance.title_reveal(index, now))
    }
}

#[cfg(test)]
mod tests {
    use eframe::egui::{pos2, vec2};
    use pretty_assertions::assert_eq;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;
    use crate::collage::node::tests::two_group_catalog;

    fn collage(filter: CollageFilter, generation: u64) -> Collage {
        Collage::new(
            &two_group_catalog(),
            filter,
            CollageConfig::default(),
            generation,
            &mut StdRng::seed_from_u64(generation),
            0.0,
        )
    }

    fn run(collage: &mut Collage, frames: usize) {
        for frame in 0..frames {
            collage.frame(frame as f64 / 60.0);
        }
    }

    #[test]
    fn two_group_scenario() {
        let collage = collage(CollageFilter::All, 1);
        assert_eq!(collage.nodes().len(), 6);
        assert_eq!(collage.targets().len(), 2);
        assert_eq!(
            collage.targets().iter().map(|(id, _)| id).collect::<Vec<_>>(),
            vec!["A", "B"]
        );
        assert_eq!(collage.targets().anchor(), vec2(600.0, 400.0));
        assert!(collage.is_running());
    }

    #[test]
    fn cluster_targets_survive_filter_toggles() {
        let all = collage(CollageFilter::All, 1);
        let albums = collage(CollageFilter::Album, 2);
        let artists = collage(CollageFilter::Artist, 3);

        assert_eq!(all.targets(), albums.targets());
        assert_eq!(all.targets(), artists.targets());
    }

    #[test]
    fn rebuild_starts_from_fresh_state() {
        let mut albums = collage(CollageFilter::Album, 1);
        run(&mut albums, 200);
        let moved = albums.handle_for("album-A-1").unwrap();
        assert_ne!(albums.node(moved).unwrap().velocity(), Vec2::ZERO);

        let mut artists = collage(CollageFilter::Artist, 2);
        run(&mut artists, 200);

        let fresh = collage(CollageFilter::All, 3);
        let reference = collage(CollageFilter::All, 4);
        for (node, expected) in fresh.nodes().iter().zip(reference.nodes()) {
            assert_eq!(node.id, expected.id);
            assert_eq!(node.position, expected.position);
            assert_eq!(node.velocity(), Vec2::ZERO);
            assert_eq!(node.resting_radius, None);
        }
    }

    #[test]
    fn stale_handles_are_ignored() {
        let old = collage(CollageFilter::All, 1);
        let stale = old.handle_for("album-A-1").unwrap();
        drop(old);

        let mut current = collage(CollageFilter::All, 2);
        let before = current.nodes()[stale.index].radius;
        assert!(!current.hover(stale, 0.0));
        assert!(!current.leave(stale, 0.0));
        assert!(!current.click(stale, |_| panic!("stale click navigated")));
        assert_eq!(current.node(stale).map(|node| node.radius), None);
        assert_eq!(current.reveal(stale, 10.0), Reveal::HIDDEN);

        run(&mut current, 5);
        assert_eq!(current.nodes()[stale.index].radius, before);
    }

    #[test]
    fn hover_reheats_a_cooled_simulation() {
        let mut collage = collage(CollageFilter::All, 1);
        run(&mut collage, 600);
        assert!(collage.alpha() < 0.1);

        let handle = collage.handle_for("album-B-3").unwrap();
        assert!(collage.hover(handle, 10.0));
        assert!(collage.alpha() >= 0.3 - 1e-6);

        collage.frame(10.1);
        let node = collage.node(handle).unwrap();
        assert!(node.radius > node.resting_radius.unwrap());
        assert_eq!(collage.placements()[handle.index].outer_radius, node.radius);
    }

    #[test]
    fn click_resolves_navigation_targets() {
        let collage = collage(CollageFilter::All, 1);
        let mut visited = Vec::new();

        for id in ["artist-A", "album-A-2", "title"] {
            let handle = collage.handle_for(id).unwrap();
            collage.click(handle, |target| visited.push(target));
        }

        assert_eq!(
            visited,
            vec![
                NavigationTarget::Artist {
                    group_id: "A".into()
                },
                NavigationTarget::Album {
                    group_id: "A".into(),
                    album_id: AlbumId::Number(2)
                },
            ]
        );
    }

    #[test]
    fn invalid_canvas_keeps_the_stepper_idle() {
        let mut config = CollageConfig::default();
        config.canvas.size = Vec2::ZERO;
        let mut collage = Collage::new(
            &two_group_catalog(),
            CollageFilter::All,
            config,
            1,
            &mut StdRng::seed_from_u64(1),
            0.0,
        );
        assert!(!collage.is_running());
        let before = collage.nodes()[1].position;
        collage.frame(0.5);
        assert_eq!(collage.nodes()[1].position, before);

        let handle = collage.handle_for("album-A-1").unwrap();
        collage.hover(handle, 0.5);
        assert!(!collage.is_running());

        collage.set_canvas(vec2(800.0, 600.0));
        assert!(collage.is_running());
        assert_eq!(collage.nodes()[0].position, vec2(400.0, 300.0));
        assert_eq!(collage.targets().anchor(), vec2(400.0, 300.0));
    }

    #[test]
    fn entrance_does_not_shrink_collision_radius() {
        let mut collage = collage(CollageFilter::All, 1);
        let handle = collage.handle_for("album-A-1").unwrap();
        let radius = collage.node(handle).unwrap().radius;

        collage.frame(0.0);
        assert_eq!(collage.reveal(handle, 0.0), Reveal::HIDDEN);
        assert_eq!(collage.placements()[handle.index].outer_radius, radius);

        let labels = collage.title_reveal(0.0).unwrap();
        assert_eq!(labels.title_font_size, 0.0);
        assert!(collage.title_reveal(10.0).unwrap().title_font_size > 0.0);
    }

    #[test]
    fn hit_test_uses_canvas_coordinates() {
        let collage = collage(CollageFilter::All, 1);
        let title = collage.hit_test(pos2(600.0, 400.0), 10.0).unwrap();
        assert_eq!(collage.id_for(title), Some("title"));
    }

    #[test]
    fn hidden_nodes_cannot_be_hit() {
        let collage = collage(CollageFilter::All, 1);
        let handle = collage.handle_for("album-B-3").unwrap();
        let center = collage.placements()[handle.index].center;

        assert_eq!(collage.hit_test(center, 0.0), None);
        assert_eq!(collage.hit_test(center, 10.0), Some(handle));
    }

    #[test]
    fn colliding_ids_resolve_to_their_own_nodes() {
        let catalog = crate::catalog::parse_catalog(
            r#"[
                {"id": "a", "albums": [{"id": "b-c"}]},
                {"id": "a-b", "albums": [{"id": "c"}]}
            ]"#,
        )
        .unwrap();
        let collage = Collage::new(
            &catalog,
            CollageFilter::Album,
            CollageConfig::default(),
            1,
            &mut StdRng::seed_from_u64(1),
            0.0,
        );

        for group in &catalog.groups {
            let album = &group.albums[0];
            let handle = collage
                .handle_for(&album_node_id(&group.id, &album.id))
                .unwrap();
            let node = collage.node(handle).unwrap();
            assert_eq!(node.group_id.as_deref(), Some(group.id.as_str()));
            assert_eq!(node.album_id.as_ref(), Some(&album.id));
        }
    }

    #[test]
    fn collision_follows_a_hover_grown_radius() {
        let config = CollageConfig::default();
        let padding = config.forces.collision_padding;
        let mut collage = collage(CollageFilter::All, 1);
        run(&mut collage, 600);

        let handle = collage.handle_for("album-B-3").unwrap();
        assert!(collage.hover(handle, 10.0));
        for frame in 0..600 {
            collage.frame(10.0 + frame as f64 / 60.0);
        }

        let hovered = collage.node(handle).unwrap();
        assert_eq!(hovered.radius, config.hover.radius);
        for (index, other) in collage.nodes().iter().enumerate() {
            if index == handle.index {
                continue;
            }
            let distance = (other.position - hovered.position).length();
            let required = hovered.radius + other.radius + padding;
            assert!(
                distance >= required - 2.0,
                "{} overlaps the hovered node: {distance} < {required}",
                other.id
            );
        }
    }
}
