mod forces;
mod quadtree;

use std::f32::consts::PI;

use eframe::egui::{Vec2, vec2};

use super::cluster::ClusterTargets;
use super::config::ForceConfig;
use super::node::CollageNode;
use forces::{
    CollisionParams, ForceScratch, apply_center, apply_cluster, apply_collision, apply_many_body,
    apply_radial,
};

const INITIAL_SCATTER_RADIUS: f32 = 10.0;

/// Where the forces pull for one tick.
#[derive(Clone, Copy)]
pub struct ForceField<'a> {
    pub center: Vec2,
    pub targets: &'a ClusterTargets,
    pub radial_radius: f32,
}

/// Continuous force stepper. Alpha decays toward `alpha_target`, which is kept
/// above `alpha_min` so the layout stays warm and keeps absorbing radius changes.
pub struct Simulation {
    forces: ForceConfig,
    alpha: f32,
    running: bool,
    ticks: u64,
    scratch: ForceScratch,
}

impl Simulation {
    pub fn new(forces: ForceConfig) -> Self {
        Self {
            forces,
            alpha: 1.0,
            running: false,
            ticks: 0,
            scratch: ForceScratch::default(),
        }
    }

    /// Phyllotaxis spiral around `center`; pinned nodes go to their pin.
    pub fn scatter(nodes: &mut [CollageNode], center: Vec2) {
        let angle_step = PI * (3.0 - 5.0_f32.sqrt());
        for (index, node) in nodes.iter_mut().enumerate() {
            node.velocity = Vec2::ZERO;
            if let Some(pin) = node.pin {
                node.position = pin;
                continue;
            }

            let radius = INITIAL_SCATTER_RADIUS * (0.5 + index as f32).sqrt();
            let angle = index as f32 * angle_step;
            node.position = center + vec2(angle.cos(), angle.sin()) * radius;
        }
    }

    pub fn alpha(&self) -> f32 {
        self.alpha
    }

    pub fn set_alpha(&mut self, alpha: f32) {
        self.alpha = alpha.clamp(0.0, 1.0);
    }

    pub fn alpha_target(&self) -> f32 {
        self.forces.alpha_target
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn restart(&mut self) {
        self.running = true;
    }

    pub fn stop(&mut self) {
        self.running = false;
    }

    /// Lifts alpha back to `working_alpha` and restarts when it has cooled below `threshold`.
    pub fn reheat_if_cold(&mut self, threshold: f32, working_alpha: f32) -> bool {
        if self.alpha >= threshold && self.running {
            return false;
        }

        self.set_alpha(self.alpha.max(working_alpha));
        self.restart();
        true
    }

    /// Advances one tick. Does nothing while stopped or with no nodes.
    pub fn tick(&mut self, nodes: &mut [CollageNode], field: ForceField<'_>) -> bool {
        if !self.running || nodes.is_empty() {
            return false;
        }

        let config = self.forces;
        self.alpha += (config.alpha_target - self.alpha) * config.alpha_decay;
        let alpha = self.alpha;

        apply_many_body(nodes, config.charge_strength, alpha, &mut self.scratch);
        apply_center(nodes, field.center, config.center_strength);
        apply_cluster(
            nodes,
            field.targets,
            vec2(config.cluster_x_strength, config.cluster_y_strength),
            alpha,
        );
        apply_collision(
            nodes,
            CollisionParams {
                strength: config.collision_strength,
                padding: config.collision_padding,
            },
            config.collision_iterations,
            &mut self.scratch,
        );
        apply_radial(
            nodes,
            field.center,
            field.radial_radius,
            config.radial_strength,
            alpha,
        );

        for node in nodes.iter_mut() {
            if let Some(pin) = node.pin {
                node.position = pin;
                node.velocity = Vec2::ZERO;
            } else {
                node.velocity *= config.velocity_decay;
                node.position += node.velocity;
            }
        }

        self.ticks += 1;
        if self.alpha < config.alpha_min {
            self.running = false;
        }
        true
    }
}
