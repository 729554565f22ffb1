use std::f32::consts::TAU;

use eframe::egui::{Vec2, vec2};

use super::super::cluster::ClusterTargets;
use super::super::node::CollageNode;
use super::quadtree::QuadNode;

const BARNES_HUT_THETA: f32 = 0.9;
const MIN_CHARGE_DISTANCE_SQ: f32 = 1.0;

/// Deterministic unit direction for coincident points.
fn jiggle(from: usize, to: usize) -> Vec2 {
    let angle = ((from as f32) * 0.618_034 + (to as f32) * 0.414_214) * TAU;
    vec2(angle.cos(), angle.sin()) * 1e-3
}

/// Shifts every node so the mean position moves toward `center`.
pub(super) fn apply_center(nodes: &mut [CollageNode], center: Vec2, strength: f32) {
    if nodes.is_empty() || strength <= 0.0 {
        return;
    }

    let mean = nodes
        .iter()
        .fold(Vec2::ZERO, |sum, node| sum + node.position)
        / nodes.len() as f32;
    let shift = (mean - center) * strength;
    for node in nodes.iter_mut() {
        node.position -= shift;
    }
}

pub(super) fn apply_cluster(
    nodes: &mut [CollageNode],
    targets: &ClusterTargets,
    strength: Vec2,
    alpha: f32,
) {
    for node in nodes.iter_mut() {
        let target = targets.target(&node.cluster);
        node.velocity.x += (target.x - node.position.x) * strength.x * alpha;
        node.velocity.y += (target.y - node.position.y) * strength.y * alpha;
    }
}

pub(super) fn apply_radial(
    nodes: &mut [CollageNode],
    center: Vec2,
    radius: f32,
    strength: f32,
    alpha: f32,
) {
    if strength == 0.0 {
        return;
    }

    for (index, node) in nodes.iter_mut().enumerate() {
        let mut offset = node.position - center;
        if offset.length_sq() <= f32::EPSILON {
            offset = jiggle(index, index);
        }
        let distance = offset.length();
        let k = (radius - distance) * strength * alpha / distance;
        node.velocity += offset * k;
    }
}

#[derive(Default)]
pub(super) struct ForceScratch {
    predicted: Vec<Vec2>,
    radii: Vec<f32>,
    corrections: Vec<Vec2>,
}

#[derive(Clone, Copy)]
pub(super) struct CollisionParams {
    pub(super) strength: f32,
    pub(super) padding: f32,
}

/// Live radius read at application time; hover tweens write straight into `node.radius`.
fn collision_radius(node: &CollageNode) -> f32 {
    node.radius
}

/// Damped pairwise separation over predicted positions (`position + velocity`),
/// repeated `iterations` times per tick. Smaller circles take the larger share.
pub(super) fn apply_collision(
    nodes: &mut [CollageNode],
    params: CollisionParams,
    iterations: usize,
    scratch: &mut ForceScratch,
) {
    if nodes.len() < 2 || params.strength <= 0.0 {
        return;
    }

    for _ in 0..iterations {
        scratch.predicted.clear();
        scratch.radii.clear();
        for node in nodes.iter() {
            scratch.predicted.push(node.position + node.velocity);
            scratch.radii.push(collision_radius(node));
        }
        scratch.corrections.clear();
        scratch.corrections.resize(nodes.len(), Vec2::ZERO);

        let Some(tree) = QuadNode::build(&scratch.predicted, &scratch.radii) else {
            return;
        };
        accumulate_collision_pairs(
            &tree,
            &tree,
            true,
            &scratch.predicted,
            &scratch.radii,
            params,
            &mut scratch.corrections,
        );

        for (node, correction) in nodes.iter_mut().zip(&scratch.corrections) {
            node.velocity += *correction;
        }
    }
}

fn resolve_pair(
    from: usize,
    to: usize,
    positions: &[Vec2],
    radii: &[f32],
    params: CollisionParams,
    corrections: &mut [Vec2],
) {
    let reach = radii[from] + radii[to] + params.padding;
    let mut delta = positions[from] - positions[to];
    let mut distance_sq = delta.length_sq();
    if distance_sq >= reach * reach {
        return;
    }
    if distance_sq <= f32::EPSILON {
        delta = jiggle(from, to);
        distance_sq = delta.length_sq();
    }

    let distance = distance_sq.sqrt();
    let push = delta * ((reach - distance) / distance * params.strength);
    let from_sq = radii[from] * radii[from];
    let to_sq = radii[to] * radii[to];
    let share = if from_sq + to_sq > 0.0 {
        to_sq / (from_sq + to_sq)
    } else {
        0.5
    };

    corrections[from] += push * share;
    corrections[to] -= push * (1.0 - share);
}

fn accumulate_collision_pairs(
    node_a: &QuadNode,
    node_b: &QuadNode,
    same_node: bool,
    positions: &[Vec2],
    radii: &[f32],
    params: CollisionParams,
    corrections: &mut [Vec2],
) {
    let reach = node_a.max_radius + node_b.max_radius + params.padding;
    if node_a.bounds.distance_sq_to(node_b.bounds) > reach * reach {
        return;
    }

    if node_a.is_leaf() && node_b.is_leaf() {
        if same_node {
            for (offset, &from) in node_a.indices.iter().enumerate() {
                for &to in &node_a.indices[offset + 1..] {
                    resolve_pair(from, to, positions, radii, params, corrections);
                }
            }
        } else {
            for &from in &node_a.indices {
                for &to in &node_b.indices {
                    resolve_pair(from, to, positions, radii, params, corrections);
                }
            }
        }
        return;
    }

    if same_node {
        for first in 0..4 {
            let Some(child_a) = node_a.children[first].as_deref() else {
                continue;
            };

            accumulate_collision_pairs(
                child_a,
                child_a,
                true,
                positions,
                radii,
                params,
                corrections,
            );

            for second in (first + 1)..4 {
                let Some(child_b) = node_a.children[second].as_deref() else {
                    continue;
                };
                accumulate_collision_pairs(
                    child_a,
                    child_b,
                    false,
                    positions,
                    radii,
                    params,
                    corrections,
                );
            }
        }
        return;
    }

    let split_a = if node_a.is_leaf() {
        false
    } else if node_b.is_leaf() {
        true
    } else {
        node_a.bounds.half_extent >= node_b.bounds.half_extent
    };

    if split_a {
        for child in node_a.children.iter().flatten() {
            accumulate_collision_pairs(
                child,
                node_b,
                false,
                positions,
                radii,
                params,
                corrections,
            );
        }
    } else {
        for child in node_b.children.iter().flatten() {
            accumulate_collision_pairs(
                node_a,
                child,
                false,
                positions,
                radii,
                params,
                corrections,
            );
        }
    }
}

/// Barnes-Hut charge; negative strength repels. Inert at zero strength.
pub(super) fn apply_many_body(
    nodes: &mut [CollageNode],
    strength: f32,
    alpha: f32,
    scratch: &mut ForceScratch,
) {
    if nodes.len() < 2 || strength == 0.0 {
        return;
    }

    scratch.predicted.clear();
    scratch.radii.clear();
    for node in nodes.iter() {
        scratch.predicted.push(node.position);
        scratch.radii.push(0.0);
    }

    let Some(tree) = QuadNode::build(&scratch.predicted, &scratch.radii) else {
        return;
    };

    for (index, node) in nodes.iter_mut().enumerate() {
        let mut impulse = Vec2::ZERO;
        accumulate_charge_for_node(&tree, index, &scratch.predicted, strength, &mut impulse);
        node.velocity += impulse * alpha;
    }
}

fn charge_between(point: Vec2, source: Vec2, weight: f32) -> Vec2 {
    let delta = source - point;
    let distance_sq = delta.length_sq().max(MIN_CHARGE_DISTANCE_SQ);
    delta * (weight / distance_sq)
}

fn accumulate_charge_for_node(
    node: &QuadNode,
    index: usize,
    positions: &[Vec2],
    strength: f32,
    impulse: &mut Vec2,
) {
    if node.mass <= 0.0 {
        return;
    }

    let point = positions[index];

    if node.is_leaf() {
        for &other_index in &node.indices {
            if other_index == index {
                continue;
            }
            let mut source = positions[other_index];
            if (source - point).length_sq() <= f32::EPSILON {
                source += jiggle(index, other_index);
            }
            *impulse += charge_between(point, source, strength);
        }
        return;
    }

    let distance = (node.center_of_mass - point).length().max(1e-4);
    let can_approximate = !node.bounds.contains(point)
        && (node.bounds.side_length() / distance) < BARNES_HUT_THETA
        && node.mass > 1.0;

    if can_approximate {
        *impulse += charge_between(point, node.center_of_mass, strength * node.mass);
        return;
    }

    for child in node.children.iter().flatten() {
        accumulate_charge_for_node(child, index, positions, strength, impulse);
    }
}
