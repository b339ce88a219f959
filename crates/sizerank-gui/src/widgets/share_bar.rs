/// Proportional bar showing an entry's size relative to the largest result.
use egui::{Color32, Rect, Ui, Vec2};

/// Draw a horizontal bar filled to `fraction` (0.0–1.0) of its width.
pub fn share_bar(ui: &mut Ui, fraction: f32, width: f32, height: f32) {
    let (rect, _response) = ui.allocate_exact_size(Vec2::new(width, height), egui::Sense::hover());
    let painter = ui.painter_at(rect);

    painter.rect_filled(rect, 2.0, ui.visuals().extreme_bg_color);

    let fraction = fraction.clamp(0.0, 1.0);
    let fill_w = width * fraction;
    if fill_w > 0.5 {
        let fill_rect = Rect::from_min_size(rect.min, Vec2::new(fill_w, height));
        painter.rect_filled(fill_rect, 2.0, bar_color(fraction));
    }
}

/// Fraction of `largest` that `size` represents; 0 when nothing is measured.
pub fn fraction_of(size: u64, largest: u64) -> f32 {
    if largest == 0 {
        0.0
    } else {
        (size as f64 / largest as f64) as f32
    }
}

/// Interpolate between green (small) and pink (large).
fn bar_color(t: f32) -> Color32 {
    let a = Color32::from_rgb(0xa6, 0xe3, 0xa1); // green
    let b = Color32::from_rgb(0xf3, 0x8b, 0xa8); // pink
    Color32::from_rgb(
        (a.r() as f32 * (1.0 - t) + b.r() as f32 * t) as u8,
        (a.g() as f32 * (1.0 - t) + b.g() as f32 * t) as u8,
        (a.b() as f32 * (1.0 - t) + b.b() as f32 * t) as u8,
    )
}
