use eframe::egui::{
    self,
    Color32,
    RichText,
    Stroke,
};

use super::palette::{
    palette_for,
    CategoryPalette,
};
use crate::catalog::{
    assets::{
        dex_number,
        humanize,
        kilograms,
        metres,
        stat_fraction,
    },
    DetailBase,
    DetailEvent,
    DetailRecord,
};

#[derive(Debug, Clone, PartialEq)]
pub enum DetailPhase {
    Loading,
    Base(DetailBase),
    Complete(DetailRecord),
    NotFound,
}

/// What the user asked for from a detail view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DetailAction {
    None,
    Close,
    OpenFullPage(String),
    Back,
}

/// The detail currently on screen, tied to the key it was requested for.
#[derive(Debug, Clone)]
pub struct DetailState {
    key: String,
    phase: DetailPhase,
}

impl DetailState {
    pub fn loading(key: impl Into<String>) -> Self {
        Self { key: key.into(), phase: DetailPhase::Loading }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn phase(&self) -> &DetailPhase {
        &self.phase
    }

    /// Applies an event for `key`. Events for any other key are stale and
    /// dropped; returns whether the state changed.
    pub fn apply(&mut self, key: &str, event: DetailEvent) -> bool {
        if key != self.key {
            return false;
        }

        match (event, &self.phase) {
            (DetailEvent::Base(_), DetailPhase::Complete(_)) => return false,
            (DetailEvent::Base(base), _) => self.phase = DetailPhase::Base(base),
            (DetailEvent::Complete(record), _) => self.phase = DetailPhase::Complete(record),
            (DetailEvent::NotFound(_), _) => self.phase = DetailPhase::NotFound,
        }
        true
    }

    pub fn base(&self) -> Option<&DetailBase> {
        match &self.phase {
            DetailPhase::Base(base) => Some(base),
            DetailPhase::Complete(record) => Some(&record.base),
            _ => None,
        }
    }

    pub fn description(&self) -> Option<&str> {
        match &self.phase {
            DetailPhase::Complete(record) => Some(&record.description),
            _ => None,
        }
    }

    pub fn relation_chain(&self) -> &[String] {
        match &self.phase {
            DetailPhase::Complete(record) => &record.relation_chain,
            _ => &[],
        }
    }

    pub fn is_settled(&self) -> bool {
        matches!(self.phase, DetailPhase::Complete(_) | DetailPhase::NotFound)
    }
}

pub fn show_modal(ctx: &egui::Context, state: &DetailState) -> DetailAction {
    let mut action = DetailAction::None;

    let modal = egui::Modal::new(egui::Id::new("detail_modal")).show(ctx, |ui| {
        ui.set_width(420.0);

        let Some(base) = state.base() else {
            status_message(ui, state);
            return;
        };
        let palette = palette_for(base.categories.primary());

        card_frame(&palette).show(ui, |ui| {
            ui.horizontal(|ui| {
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.button("×").clicked() {
                        action = DetailAction::Close;
                    }
                });
            });

            header(ui, base, &palette);
            artwork(ui, base, 180.0);
            description(ui, state, &palette);

            ui.add_space(8.0);
            egui::Grid::new("modal_attributes").num_columns(3).spacing([24.0, 4.0]).show(
                ui,
                |ui| {
                    attribute(ui, &palette, "Height", metres(base.height));
                    attribute(ui, &palette, "Weight", kilograms(base.weight));
                    attribute(ui, &palette, "Base XP", base.base_experience.to_string());
                    ui.end_row();
                },
            );

            ui.add_space(12.0);
            ui.vertical_centered(|ui| {
                if ui.button("View full page").clicked() {
                    action = DetailAction::OpenFullPage(state.key().to_string());
                }
            });
        });
    });

    if modal.should_close() && action == DetailAction::None {
        action = DetailAction::Close;
    }
    action
}

pub fn show_page(ui: &mut egui::Ui, state: &DetailState) -> DetailAction {
    let mut action = DetailAction::None;

    if ui.button("← Back to List").clicked() {
        action = DetailAction::Back;
    }
    ui.add_space(8.0);

    let Some(base) = state.base() else {
        status_message(ui, state);
        return action;
    };
    let palette = palette_for(base.categories.primary());

    egui::ScrollArea::vertical().auto_shrink([false; 2]).show(ui, |ui| {
        card_frame(&palette).show(ui, |ui| {
            ui.set_max_width(640.0);

            header(ui, base, &palette);
            artwork(ui, base, 250.0);
            description(ui, state, &palette);

            section(ui, &palette, "Physical Attributes", |ui| {
                egui::Grid::new("page_attributes").num_columns(2).spacing([48.0, 8.0]).show(
                    ui,
                    |ui| {
                        attribute(ui, &palette, "Height", metres(base.height));
                        attribute(ui, &palette, "Weight", kilograms(base.weight));
                        ui.end_row();
                        attribute(ui, &palette, "Base XP", base.base_experience.to_string());
                        attribute(ui, &palette, "Pokédex ID", dex_number(base.id));
                        ui.end_row();
                    },
                );
            });

            if !base.abilities.is_empty() {
                section(ui, &palette, "Abilities", |ui| {
                    ui.horizontal_wrapped(|ui| {
                        for ability in &base.abilities {
                            chip(ui, &palette, &humanize(ability));
                        }
                    });
                });
            }

            if !base.stats.is_empty() {
                section(ui, &palette, "Base Stats", |ui| {
                    for stat in &base.stats {
                        ui.horizontal(|ui| {
                            ui.label(RichText::new(&stat.label).color(palette.text));
                            ui.with_layout(
                                egui::Layout::right_to_left(egui::Align::Center),
                                |ui| {
                                    ui.label(
                                        RichText::new(stat.value.to_string())
                                            .color(palette.text)
                                            .strong(),
                                    );
                                },
                            );
                        });
                        ui.add(
                            egui::ProgressBar::new(stat_fraction(stat.value))
                                .desired_height(8.0)
                                .fill(palette.chip()),
                        );
                    }
                });
            }

            let chain = state.relation_chain();
            if chain.len() > 1 {
                section(ui, &palette, "Evolution Chain", |ui| {
                    ui.horizontal_wrapped(|ui| {
                        for (idx, name) in chain.iter().enumerate() {
                            chip(ui, &palette, name);
                            if idx + 1 < chain.len() {
                                ui.label(RichText::new("→").color(palette.text).strong());
                            }
                        }
                    });
                });
            }
        });
    });

    action
}

fn status_message(ui: &mut egui::Ui, state: &DetailState) {
    ui.vertical_centered(|ui| match state.phase() {
        DetailPhase::NotFound => {
            ui.label(RichText::new("Pokémon not found").color(Color32::LIGHT_RED).size(18.0));
        }
        _ => {
            ui.spinner();
            ui.label("Loading...");
        }
    });
}

fn card_frame(palette: &CategoryPalette) -> egui::Frame {
    egui::Frame::new()
        .fill(palette.bg)
        .stroke(Stroke::new(3.0, palette.border))
        .corner_radius(16.0)
        .inner_margin(20.0)
}

fn header(ui: &mut egui::Ui, base: &DetailBase, palette: &CategoryPalette) {
    ui.vertical_centered(|ui| {
        ui.label(RichText::new(capitalize(&base.name)).size(28.0).strong().color(palette.text));
        ui.horizontal_wrapped(|ui| {
            for category in base.categories.as_slice() {
                chip(ui, palette, category);
            }
        });
    });
}

fn artwork(ui: &mut egui::Ui, base: &DetailBase, size: f32) {
    if let Some(url) = &base.image_url {
        ui.vertical_centered(|ui| {
            ui.add(egui::Image::new(url.as_str()).fit_to_exact_size(egui::vec2(size, size)));
        });
    }
}

fn description(ui: &mut egui::Ui, state: &DetailState, palette: &CategoryPalette) {
    ui.add_space(8.0);
    match state.description() {
        Some(text) => {
            ui.label(RichText::new(text).color(palette.text));
        }
        None => {
            ui.horizontal(|ui| {
                ui.spinner();
                ui.label(RichText::new("Loading description...").color(palette.text).italics());
            });
        }
    }
}

fn attribute(ui: &mut egui::Ui, palette: &CategoryPalette, label: &str, value: String) {
    ui.vertical(|ui| {
        ui.label(RichText::new(label).color(palette.text).strong());
        ui.label(RichText::new(value).color(palette.text).size(16.0));
    });
}

fn section(
    ui: &mut egui::Ui,
    palette: &CategoryPalette,
    title: &str,
    add_contents: impl FnOnce(&mut egui::Ui),
) {
    ui.add_space(12.0);
    egui::Frame::new().fill(palette.overlay()).corner_radius(12.0).inner_margin(16.0).show(
        ui,
        |ui| {
            ui.set_width(ui.available_width());
            ui.label(RichText::new(title).color(palette.text).size(18.0).strong());
            ui.add_space(6.0);
            add_contents(ui);
        },
    );
}

fn chip(ui: &mut egui::Ui, palette: &CategoryPalette, text: &str) {
    egui::Frame::new()
        .fill(palette.chip())
        .stroke(Stroke::new(1.0, palette.text.gamma_multiply(0.4)))
        .corner_radius(20.0)
        .inner_margin(egui::Margin::symmetric(10, 4))
        .show(ui, |ui| {
            ui.label(RichText::new(capitalize(text)).color(palette.text));
        });
}

pub fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
