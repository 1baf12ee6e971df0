use eframe::egui::{
    self,
    RichText,
    Sense,
    Stroke,
};

use super::{
    detail_view::capitalize,
    palette::palette_for,
};
use crate::catalog::{
    assets::{
        asset_url,
        dex_number,
    },
    SummaryItem,
};

pub const CARD_WIDTH: f32 = 150.0;
const ART_SIZE: f32 = 110.0;

/// Draws one catalog card. Returns true when clicked.
pub fn summary_card(ui: &mut egui::Ui, item: &SummaryItem) -> bool {
    let palette = palette_for(&item.category);

    let inner = egui::Frame::new()
        .fill(palette.bg)
        .stroke(Stroke::new(2.0, palette.border))
        .corner_radius(12.0)
        .inner_margin(10.0)
        .show(ui, |ui| {
            ui.set_width(CARD_WIDTH);
            ui.vertical_centered(|ui| {
                ui.add(
                    egui::Image::new(asset_url(item.id))
                        .fit_to_exact_size(egui::vec2(ART_SIZE, ART_SIZE)),
                );
                ui.label(RichText::new(dex_number(item.id)).color(palette.text).small());
                ui.label(RichText::new(capitalize(&item.name)).color(palette.text).strong());
                ui.label(RichText::new(&item.category).color(palette.text).italics());
            });
        });

    inner.response.interact(Sense::click()).on_hover_cursor(egui::CursorIcon::PointingHand).clicked()
}
