use eframe::egui::{Color32, Painter, Pos2, Rect, Vec2};

const AREA_PALETTE: [Color32; 8] = [
    Color32::from_rgb(99, 145, 202),
    Color32::from_rgb(229, 146, 75),
    Color32::from_rgb(107, 174, 121),
    Color32::from_rgb(196, 104, 120),
    Color32::from_rgb(150, 120, 190),
    Color32::from_rgb(178, 152, 98),
    Color32::from_rgb(88, 168, 170),
    Color32::from_rgb(201, 121, 178),
];

pub(super) const CHART_BACKGROUND: Color32 = Color32::from_rgb(250, 250, 248);
pub(super) const SELECTED_COLOR: Color32 = Color32::from_rgb(232, 105, 40);
pub(super) const TEXT_COLOR: Color32 = Color32::from_rgb(40, 44, 52);

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

/// Fades `color` toward transparency; `factor` 1.0 keeps it unchanged.
pub(super) fn fade_color(color: Color32, factor: f32) -> Color32 {
    color.gamma_multiply(factor.clamp(0.0, 1.0))
}

/// `color` must be opaque.
pub(super) fn with_alpha(color: Color32, alpha: u8) -> Color32 {
    Color32::from_rgba_unmultiplied(color.r(), color.g(), color.b(), alpha)
}

pub(super) fn area_color(index: usize) -> Color32 {
    AREA_PALETTE[index % AREA_PALETTE.len()]
}

pub(super) fn draw_background(painter: &Painter, rect: Rect) {
    painter.rect_filled(rect, 0.0, CHART_BACKGROUND);
}

pub(super) fn circle_visible(rect: Rect, position: Pos2, radius: f32) -> bool {
    !(position.x + radius < rect.left()
        || position.x - radius > rect.right()
        || position.y + radius < rect.top()
        || position.y - radius > rect.bottom())
}

pub(super) fn world_to_screen(rect: Rect, pan: Vec2, zoom: f32, world: Vec2) -> Pos2 {
    rect.center() + pan + world * zoom
}

/// Paper fill: darker for more readers.
pub(super) fn readers_color(readers: u64, max: u64) -> Color32 {
    let t = normalize_log(readers, max);
    blend_color(
        Color32::from_rgb(236, 236, 232),
        Color32::from_rgb(150, 150, 146),
        t,
    )
}

fn normalize_log(value: u64, max: u64) -> f32 {
    if max <= 1 {
        return 0.0;
    }

    let max = (max as f64).ln_1p();
    ((value as f64).ln_1p() / max).clamp(0.0, 1.0) as f32
}

#[cfg(test)]
mod tests {
    use eframe::egui::pos2;

    use super::*;

    #[test]
    fn palette_wraps() {
        assert_eq!(area_color(0), area_color(AREA_PALETTE.len()));
    }

    #[test]
    fn readers_color_grows_darker() {
        let none = readers_color(0, 100);
        let most = readers_color(100, 100);
        assert!(most.r() < none.r());
        assert_eq!(readers_color(5, 0), readers_color(0, 0));
    }

    #[test]
    fn circle_visibility() {
        let rect = Rect::from_min_max(pos2(0.0, 0.0), pos2(100.0, 100.0));
        assert!(circle_visible(rect, pos2(-5.0, 50.0), 10.0));
        assert!(!circle_visible(rect, pos2(-20.0, 50.0), 10.0));
    }

    #[test]
    fn fade_lowers_alpha() {
        let color = Color32::from_rgb(10, 20, 30);
        assert_eq!(fade_color(color, 1.0), color);
        assert!(fade_color(color, 0.5).a() < color.a());
    }
}
