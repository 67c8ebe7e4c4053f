use eframe::egui::{Color32, Painter, Pos2, Rect, Stroke};

const BACKGROUND: Color32 = Color32::from_rgb(19, 23, 29);
const GRID_SPACING: f32 = 48.0;

/// Nodes under the pointer are lifted toward white.
pub(super) fn highlight(color: Color32) -> Color32 {
    color.lerp_to_gamma(Color32::WHITE, 0.35)
}

/// Fades towers outside the current search or selection.
pub(super) fn muted(color: Color32, strength: f32) -> Color32 {
    color.gamma_multiply(strength.clamp(0.0, 1.0))
}

pub(super) fn draw_background(painter: &Painter, rect: Rect) {
    painter.rect_filled(rect, 0.0, BACKGROUND);

    let stroke = Stroke::new(1.0, Color32::from_rgba_unmultiplied(60, 70, 80, 60));
    let columns = (rect.width() / GRID_SPACING).floor() as usize;
    let rows = (rect.height() / GRID_SPACING).floor() as usize;
    for column in 1..=columns {
        let x = rect.left() + column as f32 * GRID_SPACING;
        painter.line_segment([Pos2::new(x, rect.top()), Pos2::new(x, rect.bottom())], stroke);
    }
    for row in 1..=rows {
        let y = rect.top() + row as f32 * GRID_SPACING;
        painter.line_segment([Pos2::new(rect.left(), y), Pos2::new(rect.right(), y)], stroke);
    }
}

/// Cool blue for the lowest tier through warm orange for the highest.
pub(super) fn tier_color(tier: u32, max_tier: u32) -> Color32 {
    let t = if max_tier == 0 {
        0.0
    } else {
        (tier as f32 / max_tier as f32).clamp(0.0, 1.0)
    };
    Color32::from_rgb(55, 150, 215).lerp_to_gamma(Color32::from_rgb(245, 110, 60), t)
}
