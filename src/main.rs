use dexview::{
    gui::DexApp,
    AppSettings,
};
use eframe::egui;
use tracing::info;
use tracing_subscriber::{
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

fn main() -> eframe::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "dexview=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let settings = AppSettings::load();
    info!(api = %settings.api_base_url, page_size = settings.page_size, "starting dexview");

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("PokéDex")
            .with_inner_size([1100.0, 800.0])
            .with_min_inner_size([480.0, 360.0]),
        ..Default::default()
    };

    eframe::run_native(
        "dexview",
        options,
        Box::new(move |cc| {
            let app = DexApp::new(cc, settings)?;
            Ok(Box::new(app))
        }),
    )
}
