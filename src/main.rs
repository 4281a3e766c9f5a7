use eframe::egui;

use orbitr::config::Config;

mod app;

use app::OrbitrApp;

fn main() -> eframe::Result<()> {
    env_logger::init();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            log::error!("{}", e);
            std::process::exit(2);
        }
    };
    log::info!(
        "Starting with API {} (timeout {:?}, offline: {})",
        config.api_base,
        config.timeout,
        config.offline
    );

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 800.0])
            .with_title("Orbitr — RSO Catalog"),
        ..Default::default()
    };

    eframe::run_native(
        "Orbitr",
        options,
        Box::new(move |cc| Ok(Box::new(OrbitrApp::new(cc, config)))),
    )
}
