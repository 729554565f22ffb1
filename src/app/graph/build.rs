use crate::collage::{Collage, CollageConfig};

use super::super::ViewModel;

impl ViewModel {
    /// Replaces the whole node set. The previous collage, its stepper and any
    /// running hover or entrance animation are dropped with it.
    pub(in crate::app) fn rebuild_collage(&mut self, now: f64) {
        let mut config = CollageConfig::default();
        if let Some(previous) = self.collage.take() {
            config.canvas.size = previous.canvas();
        }

        self.generation = self.generation.wrapping_add(1);
        self.hovered = None;
        self.collage = Some(Collage::new(
            &self.catalog,
            self.filter,
            config,
            self.generation,
            &mut self.rng,
            now,
        ));
        self.collage_dirty = false;
    }
}
