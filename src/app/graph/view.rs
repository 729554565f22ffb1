use std::collections::HashSet;

use eframe::egui::{self, Align2, Color32, FontId, Rect, Sense, Stroke, Ui, vec2};

use crate::collage::{Collage, NodeHandle, NodeKind, Placement};

use super::super::ViewModel;
use super::super::render_utils::{
    artwork_color, blend_color, canvas_to_screen, circle_visible, draw_background, fade_color,
    saturate_color, vec_to_screen,
};

const RING_COLOR: Color32 = Color32::from_rgb(236, 232, 224);
const HOLE_COLOR: Color32 = Color32::from_rgb(14, 14, 16);
const SEARCH_COLOR: Color32 = Color32::from_rgb(103, 196, 255);
const HOVER_COLOR: Color32 = Color32::from_rgb(255, 164, 101);

struct DrawFlags {
    show_labels: bool,
    hovered: Option<NodeHandle>,
}

impl ViewModel {
    pub(in crate::app) fn draw_collage(&mut self, ui: &mut Ui) {
        let now = ui.input(|input| input.time);
        let highlighted_ids = self
            .search_results()
            .map(|cache| cache.node_ids.clone())
            .unwrap_or_default();

        let (rect, response) = ui.allocate_exact_size(ui.available_size(), Sense::click());
        let painter = ui.painter_at(rect);
        draw_background(&painter, rect);

        let show_labels = self.show_labels;
        let show_anchors = self.show_cluster_anchors;
        let Some(collage) = self.collage.as_mut() else {
            ui.label("Aucun nœud à afficher.");
            return;
        };

        collage.set_canvas(rect.size());
        let hovered = Self::track_hover(collage, &mut self.hovered, ui, rect, now);
        if collage.frame(now) {
            ui.ctx().request_repaint();
        }

        if hovered.is_some() {
            ui.output_mut(|output| {
                output.cursor_icon = egui::CursorIcon::PointingHand;
            });
        }

        if show_anchors {
            Self::draw_cluster_anchors(&painter, rect, collage);
        }

        let highlighted = highlighted_ids
            .iter()
            .filter_map(|id| collage.handle_for(id))
            .collect::<HashSet<_>>();
        let flags = DrawFlags {
            show_labels,
            hovered,
        };

        for placement in collage.placements() {
            match placement.kind {
                NodeKind::Title => Self::draw_title(&painter, rect, collage, placement, now),
                NodeKind::Artist | NodeKind::Album => Self::draw_disc(
                    &painter,
                    rect,
                    collage,
                    placement,
                    highlighted.contains(&placement.handle),
                    &flags,
                    now,
                ),
            }
        }

        if let Some(handle) = hovered
            && let Some(node) = collage.node(handle)
        {
            let panel_text = match collage.id_for(handle) {
                Some(id) => format!("{}  |  {}", node.label, id),
                None => node.label.clone(),
            };
            painter.text(
                rect.left_top() + vec2(10.0, 10.0),
                Align2::LEFT_TOP,
                panel_text,
                FontId::proportional(13.0),
                Color32::from_gray(240),
            );
        }

        let pending_navigation = Self::handle_collage_click(collage, &response, hovered);
        if pending_navigation.is_some() {
            self.navigate(pending_navigation);
        }
    }

    fn draw_disc(
        painter: &egui::Painter,
        rect: Rect,
        collage: &Collage,
        placement: &Placement,
        highlighted: bool,
        flags: &DrawFlags,
        now: f64,
    ) {
        let reveal = collage.reveal(placement.handle, now);
        if reveal.opacity <= 0.0 {
            return;
        }
        let Some(node) = collage.node(placement.handle) else {
            return;
        };

        let center = canvas_to_screen(rect, placement.center);
        let outer = placement.outer_radius * reveal.radius_scale;
        if outer <= 0.0 || !circle_visible(rect, center, outer) {
            return;
        }

        let is_hovered = flags.hovered == Some(placement.handle);
        let ring = if is_hovered {
            blend_color(RING_COLOR, HOVER_COLOR, 0.6)
        } else {
            RING_COLOR
        };
        painter.circle_filled(center, outer, fade_color(ring, reveal.opacity));

        let art_key = if node.image.is_empty() {
            node.id.as_str()
        } else {
            node.image.as_str()
        };
        let art = saturate_color(artwork_color(art_key), placement.saturation);
        let clip = placement.clip_radius * reveal.radius_scale * reveal.clip_scale;
        painter.circle_filled(center, clip, fade_color(art, reveal.opacity));

        let inner = clip * 0.38 * reveal.image_scale;
        if inner > 1.0 {
            let inner_color = blend_color(art, Color32::WHITE, 0.25);
            painter.circle_filled(center, inner, fade_color(inner_color, reveal.opacity));
        }

        if let Some(hole) = placement.hole_radius {
            painter.circle_filled(
                center,
                hole * reveal.radius_scale,
                fade_color(HOLE_COLOR, reveal.opacity),
            );
        }

        if highlighted {
            painter.circle_stroke(
                center,
                outer + 3.0,
                Stroke::new(2.0, fade_color(SEARCH_COLOR, reveal.opacity)),
            );
        }

        let should_draw_label =
            is_hovered || (flags.show_labels && placement.kind == NodeKind::Artist);
        if should_draw_label && !node.label.is_empty() {
            painter.text(
                center + vec2(0.0, outer + 6.0),
                Align2::CENTER_TOP,
                &node.label,
                FontId::proportional(12.0),
                fade_color(Color32::from_gray(238), reveal.opacity),
            );
        }
    }

    fn draw_title(
        painter: &egui::Painter,
        rect: Rect,
        collage: &Collage,
        placement: &Placement,
        now: f64,
    ) {
        let Some(sizes) = collage.title_reveal(now) else {
            return;
        };
        let opacity = collage.reveal(placement.handle, now).opacity;
        let center = canvas_to_screen(rect, placement.center);

        if sizes.title_font_size > 0.0 {
            painter.text(
                center,
                Align2::CENTER_CENTER,
                "ECHOS",
                FontId::proportional(sizes.title_font_size),
                fade_color(Color32::from_gray(245), opacity),
            );
        }
        if sizes.subtitle_font_size > 0.0 {
            painter.text(
                center + vec2(0.0, sizes.title_font_size * 0.5 + 8.0),
                Align2::CENTER_TOP,
                "Nos Rookies",
                FontId::proportional(sizes.subtitle_font_size),
                fade_color(Color32::from_gray(190), opacity),
            );
        }
    }

    fn draw_cluster_anchors(painter: &egui::Painter, rect: Rect, collage: &Collage) {
        if collage.targets().is_empty() {
            return;
        }

        let stroke = Stroke::new(1.0, Color32::from_rgba_unmultiplied(106, 198, 255, 140));
        let anchor = vec_to_screen(rect, collage.targets().anchor());
        painter.circle_stroke(anchor, 6.0, stroke);

        for (group_id, target) in collage.targets().iter() {
            let point = vec_to_screen(rect, target);
            painter.line_segment([point - vec2(5.0, 0.0), point + vec2(5.0, 0.0)], stroke);
            painter.line_segment([point - vec2(0.0, 5.0), point + vec2(0.0, 5.0)], stroke);
            painter.text(
                point + vec2(7.0, -7.0),
                Align2::LEFT_BOTTOM,
                group_id,
                FontId::monospace(10.0),
                Color32::from_rgba_unmultiplied(106, 198, 255, 180),
            );
        }
    }
}
