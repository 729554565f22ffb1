use std::collections::BTreeMap;
use std::f32::consts::{FRAC_PI_2, TAU};

use eframe::egui::{Vec2, vec2};

use crate::catalog::Catalog;

use super::node::ClusterKey;

/// Fixed attraction points, one per group, evenly spaced on a ring around the canvas center.
#[derive(Clone, Debug, PartialEq)]
pub struct ClusterTargets {
    center: Vec2,
    targets: BTreeMap<String, Vec2>,
}

impl ClusterTargets {
    /// Targets cover every group of the catalog, whatever the active filter,
    /// so a cluster keeps its anchor when the filter changes.
    pub fn for_catalog(catalog: &Catalog, canvas: Vec2, ring: f32) -> Self {
        Self::from_group_ids(
            catalog.groups.iter().map(|group| group.id.as_str()),
            canvas,
            ring,
        )
    }

    pub fn from_group_ids<'a>(
        group_ids: impl IntoIterator<Item = &'a str>,
        canvas: Vec2,
        ring: f32,
    ) -> Self {
        let mut ids = group_ids.into_iter().collect::<Vec<_>>();
        ids.sort_unstable();
        ids.dedup();

        let center = canvas * 0.5;
        let radius = canvas.x.min(canvas.y).max(0.0) * ring;
        let count = ids.len().max(1) as f32;

        let targets = ids
            .into_iter()
            .enumerate()
            .map(|(index, id)| {
                let angle = (index as f32 / count) * TAU - FRAC_PI_2;
                (
                    id.to_string(),
                    center + vec2(angle.cos(), angle.sin()) * radius,
                )
            })
            .collect();

        Self { center, targets }
    }

    pub fn anchor(&self) -> Vec2 {
        self.center
    }

    /// Unknown groups fall back to the canvas center.
    pub fn target(&self, key: &ClusterKey) -> Vec2 {
        match key {
            ClusterKey::Canvas => self.center,
            ClusterKey::Group(id) => self.targets.get(id).copied().unwrap_or(self.center),
        }
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Vec2)> {
        self.targets.iter().map(|(id, point)| (id.as_str(), *point))
    }
}
