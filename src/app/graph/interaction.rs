use eframe::egui::{self, Rect, Ui};

use crate::collage::{Collage, NavigationTarget, NodeHandle};

use super::super::ViewModel;
use super::super::render_utils::screen_to_canvas;

impl ViewModel {
    /// Sends leave/enter to the collage when the node under the pointer changes.
    pub(in crate::app) fn track_hover(
        collage: &mut Collage,
        hovered: &mut Option<NodeHandle>,
        ui: &Ui,
        rect: Rect,
        now: f64,
    ) -> Option<NodeHandle> {
        let pointer = ui.input(|input| input.pointer.hover_pos());
        let under_pointer = pointer
            .filter(|pointer| rect.contains(*pointer))
            .and_then(|pointer| collage.hit_test(screen_to_canvas(rect, pointer), now));

        if *hovered != under_pointer {
            if let Some(previous) = hovered.take() {
                collage.leave(previous, now);
            }
            if let Some(next) = under_pointer {
                collage.hover(next, now);
            }
            *hovered = under_pointer;
        }

        under_pointer
    }

    pub(in crate::app) fn handle_collage_click(
        collage: &Collage,
        response: &egui::Response,
        hovered: Option<NodeHandle>,
    ) -> Option<NavigationTarget> {
        if !response.clicked_by(egui::PointerButton::Primary) {
            return None;
        }

        let mut target = None;
        if let Some(handle) = hovered {
            collage.click(handle, |resolved| target = Some(resolved));
        }
        target
    }
}
