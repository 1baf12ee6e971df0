use std::{
    sync::Arc,
    time::Duration,
};

use eframe::egui::{
    self,
    Color32,
    RichText,
};
use tracing::{
    info,
    warn,
};

use super::{
    card::summary_card,
    detail_view::{
        show_modal,
        show_page,
        DetailAction,
        DetailState,
    },
};
use crate::{
    catalog::{
        CatalogLoader,
        CatalogSource,
        LoadOutcome,
        PokeApiClient,
        SummaryItem,
    },
    config::AppSettings,
    core::{
        tasks::{
            TaskManager,
            TaskResult,
        },
        DexError,
    },
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Home,
    Detail(String),
}

pub struct DexApp {
    // Catalog
    source: Arc<dyn CatalogSource>,
    loader: Arc<CatalogLoader>,
    items: Vec<SummaryItem>,

    // UI State
    route: Route,
    detail: Option<DetailState>,
    page_requested: bool,
    auto_load_paused: bool,

    task_manager: TaskManager,
}

impl DexApp {
    pub fn new(cc: &eframe::CreationContext<'_>, settings: AppSettings) -> Result<Self, DexError> {
        egui_extras::install_image_loaders(&cc.egui_ctx);

        cc.egui_ctx.set_theme(if settings.dark_mode {
            egui::Theme::Dark
        } else {
            egui::Theme::Light
        });

        let source: Arc<dyn CatalogSource> = Arc::new(PokeApiClient::new(&settings)?);
        let app = Self::with_source(source, settings.page_size, TaskManager::new()?);
        Ok(app)
    }

    pub fn with_source(
        source: Arc<dyn CatalogSource>,
        page_size: usize,
        task_manager: TaskManager,
    ) -> Self {
        let loader = Arc::new(CatalogLoader::new(source.clone(), page_size));

        let mut app = Self {
            source,
            loader,
            items: Vec::new(),

            route: Route::Home,
            detail: None,
            page_requested: false,
            auto_load_paused: false,

            task_manager,
        };

        app.request_page();
        app
    }

    pub fn route(&self) -> &Route {
        &self.route
    }

    pub fn items(&self) -> &[SummaryItem] {
        &self.items
    }

    fn request_page(&mut self) {
        if self.page_requested || !self.loader.has_more() || self.loader.is_loading() {
            return;
        }
        self.page_requested = true;
        self.task_manager.load_next(self.loader.clone());
    }

    fn retry_page(&mut self) {
        self.auto_load_paused = false;
        self.request_page();
    }

    fn open_detail(&mut self, key: String) {
        info!(%key, "opening detail");
        self.detail = Some(DetailState::loading(key.clone()));
        self.task_manager.fetch_detail(self.source.clone(), key);
    }

    fn navigate(&mut self, route: Route) {
        if let Route::Detail(key) = &route {
            let current = self.detail.as_ref().map(|d| d.key() == key.as_str()).unwrap_or(false);
            if !current {
                self.open_detail(key.clone());
            }
        } else {
            self.detail = None;
        }
        self.route = route;
    }

    pub fn handle_task_results(&mut self) {
        for result in self.task_manager.poll_results() {
            match result {
                TaskResult::PageLoaded(result) => {
                    self.page_requested = false;
                    match result {
                        Ok(LoadOutcome::Committed(commit)) => {
                            if commit.start == self.items.len() {
                                self.items.extend(commit.items);
                            } else {
                                self.items = self.loader.items();
                            }
                        }
                        Ok(LoadOutcome::Skipped) => {}
                        Err(e) => {
                            let cursor = self.loader.cursor();
                            warn!(cursor, "Page load failed: {}", e);
                            self.auto_load_paused = true;
                        }
                    }
                }
                TaskResult::Detail { key, event } => {
                    if let Some(detail) = self.detail.as_mut() {
                        detail.apply(&key, event);
                    }
                }
            }
        }
    }

    fn show_top_bar(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            ui.horizontal(|ui| {
                egui::widgets::global_theme_preference_switch(ui);
                if ui.link(RichText::new("PokéDex").size(22.0).strong()).clicked() {
                    self.navigate(Route::Home);
                }
            });
        });
    }

    fn show_home(&mut self, ctx: &egui::Context) {
        let mut selected = None;
        let mut sentinel_visible = false;
        let mut retry = false;

        egui::CentralPanel::default().show(ctx, |ui| {
            if let Some(error) = self.loader.last_error().filter(|_| self.auto_load_paused) {
                ui.horizontal(|ui| {
                    ui.label(RichText::new(format!("Error: {error}")).color(Color32::LIGHT_RED));
                    if ui.button("Retry").clicked() {
                        retry = true;
                    }
                });
                ui.separator();
            }

            if self.items.is_empty() {
                if self.loader.is_loading() || self.page_requested {
                    ui.vertical_centered(|ui| {
                        ui.spinner();
                        ui.label("Loading Pokémon...");
                    });
                }
                return;
            }

            egui::ScrollArea::vertical().auto_shrink([false; 2]).show(ui, |ui| {
                ui.horizontal_wrapped(|ui| {
                    ui.spacing_mut().item_spacing = egui::vec2(12.0, 12.0);
                    for item in &self.items {
                        if summary_card(ui, item) {
                            selected = Some(item.name.clone());
                        }
                    }
                });

                ui.add_space(16.0);
                ui.vertical_centered(|ui| {
                    if self.loader.has_more() {
                        let sentinel = if self.loader.is_loading() || self.page_requested {
                            ui.horizontal(|ui| {
                                ui.spinner();
                                ui.label("Loading more Pokémon...");
                            })
                            .response
                        } else {
                            ui.label(RichText::new("Scroll to load more").weak())
                        };
                        sentinel_visible = ui.is_rect_visible(sentinel.rect);
                    } else {
                        ui.label(format!(
                            "You've reached the end! Displaying {} Pokémon.",
                            self.items.len()
                        ));
                    }
                });
                ui.add_space(16.0);
            });
        });

        if retry {
            self.retry_page();
        } else if sentinel_visible && !self.auto_load_paused {
            self.request_page();
        }

        if let Some(key) = selected {
            self.open_detail(key);
        }

        if let Some(detail) = &self.detail {
            match show_modal(ctx, detail) {
                DetailAction::Close | DetailAction::Back => self.detail = None,
                DetailAction::OpenFullPage(key) => self.navigate(Route::Detail(key)),
                DetailAction::None => {}
            }
        }
    }

    fn show_detail_page(&mut self, ctx: &egui::Context) {
        let mut action = DetailAction::None;

        egui::CentralPanel::default().show(ctx, |ui| {
            if let Some(detail) = &self.detail {
                action = show_page(ui, detail);
            }
        });

        if matches!(action, DetailAction::Back | DetailAction::Close) {
            self.navigate(Route::Home);
        }
    }

    fn is_busy(&self) -> bool {
        self.page_requested || self.detail.as_ref().map(|d| !d.is_settled()).unwrap_or(false)
    }
}

impl eframe::App for DexApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.handle_task_results();

        self.show_top_bar(ctx);

        match self.route.clone() {
            Route::Home => self.show_home(ctx),
            Route::Detail(_) => self.show_detail_page(ctx),
        }

        if self.is_busy() {
            ctx.request_repaint_after(Duration::from_millis(100));
        }
    }
}
