use eframe::egui::{Color32, Painter, Pos2, Rect, Stroke, Vec2};

use crate::util::stable_pair;

pub(super) fn blend_color(base: Color32, overlay: Color32, amount: f32) -> Color32 {
    let amount = amount.clamp(0.0, 1.0);
    let inverse = 1.0 - amount;

    Color32::from_rgba_unmultiplied(
        ((base.r() as f32 * inverse) + (overlay.r() as f32 * amount)) as u8,
        ((base.g() as f32 * inverse) + (overlay.g() as f32 * amount)) as u8,
        ((base.b() as f32 * inverse) + (overlay.b() as f32 * amount)) as u8,
        ((base.a() as f32 * inverse) + (overlay.a() as f32 * amount)) as u8,
    )
}

/// Scales alpha only; egui expects unmultiplied input here.
pub(super) fn fade_color(color: Color32, opacity: f32) -> Color32 {
    let opacity = opacity.clamp(0.0, 1.0);
    Color32::from_rgba_unmultiplied(
        color.r(),
        color.g(),
        color.b(),
        (color.a() as f32 * opacity) as u8,
    )
}

/// Luma-weighted gray at `saturation == 0`, the original color at `1`.
pub(super) fn saturate_color(color: Color32, saturation: f32) -> Color32 {
    let luma = (0.299 * color.r() as f32) + (0.587 * color.g() as f32) + (0.114 * color.b() as f32);
    let gray = Color32::from_rgba_unmultiplied(luma as u8, luma as u8, luma as u8, color.a());
    blend_color(gray, color, saturation)
}

/// Placeholder artwork color, stable for a given image path or node id.
pub(super) fn artwork_color(key: &str) -> Color32 {
    let (a, b) = stable_pair(key);
    let hue = (a + 1.0) * 0.5;
    let warmth = (b + 1.0) * 0.5;

    let r = (70.0 + 170.0 * hue) as u8;
    let g = (60.0 + 120.0 * (1.0 - (hue - 0.5).abs() * 2.0)) as u8;
    let b = (80.0 + 150.0 * (1.0 - warmth)) as u8;
    Color32::from_rgb(r, g, b)
}

pub(super) fn draw_background(painter: &Painter, rect: Rect) {
    painter.rect_filled(rect, 0.0, Color32::from_rgb(14, 14, 16));

    let step = 64.0;
    let stroke = Stroke::new(1.0, Color32::from_rgba_unmultiplied(60, 60, 66, 40));

    let mut x = rect.left() + step;
    while x < rect.right() {
        painter.line_segment([Pos2::new(x, rect.top()), Pos2::new(x, rect.bottom())], stroke);
        x += step;
    }

    let mut y = rect.top() + step;
    while y < rect.bottom() {
        painter.line_segment([Pos2::new(rect.left(), y), Pos2::new(rect.right(), y)], stroke);
        y += step;
    }
}

pub(super) fn circle_visible(rect: Rect, position: Pos2, radius: f32) -> bool {
    !(position.x + radius < rect.left()
        || position.x - radius > rect.right()
        || position.y + radius < rect.top()
        || position.y - radius > rect.bottom())
}

/// Canvas space has its origin at the top-left of the collage rect.
pub(super) fn canvas_to_screen(rect: Rect, canvas: Pos2) -> Pos2 {
    rect.min + canvas.to_vec2()
}

pub(super) fn screen_to_canvas(rect: Rect, screen: Pos2) -> Pos2 {
    (screen - rect.min).to_pos2()
}

pub(super) fn vec_to_screen(rect: Rect, canvas: Vec2) -> Pos2 {
    rect.min + canvas
}

#[cfg(test)]
mod tests {
    use eframe::egui::{pos2, vec2};
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn zero_saturation_is_gray() {
        let gray = saturate_color(Color32::from_rgb(200, 40, 90), 0.0);
        assert_eq!(gray.r(), gray.g());
        assert_eq!(gray.g(), gray.b());
    }

    #[test]
    fn full_saturation_keeps_color() {
        let color = Color32::from_rgb(200, 40, 90);
        assert_eq!(saturate_color(color, 1.0), color);
    }

    #[test]
    fn canvas_and_screen_round_trip() {
        let rect = Rect::from_min_size(pos2(300.0, 40.0), vec2(800.0, 600.0));
        let screen = canvas_to_screen(rect, pos2(10.0, 20.0));
        assert_eq!(screen, pos2(310.0, 60.0));
        assert_eq!(screen_to_canvas(rect, screen), pos2(10.0, 20.0));
        assert_eq!(vec_to_screen(rect, vec2(10.0, 20.0)), screen);
    }

    #[test]
    fn artwork_color_is_stable() {
        assert_eq!(artwork_color("covers/a.jpg"), artwork_color("covers/a.jpg"));
    }

    #[test]
    fn offscreen_circle_is_culled() {
        let rect = Rect::from_min_size(pos2(0.0, 0.0), vec2(100.0, 100.0));
        assert!(circle_visible(rect, pos2(110.0, 50.0), 20.0));
        assert!(!circle_visible(rect, pos2(130.0, 50.0), 20.0));
    }
}
