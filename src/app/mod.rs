//! `OrbitrApp` — the top-level egui application state.
//!
//! This module declares the `OrbitrApp` struct and its constructor.
//! Methods are split across the sibling sub-modules:
//!
//! - `loading` — data source selection, reload, view-event handling
//! - `toolbar` — projection toggle, reload, offline and theme controls
//! - `sidebar` — search box, counts, result list, selection details
//! - `content` — the map/globe viewport

pub mod content;
pub mod loading;
pub mod sidebar;
pub mod toolbar;

use std::sync::mpsc;

use eframe::egui;

use orbitr::config::Config;
use orbitr::engine::{ViewController, ViewEvent};
use orbitr::render::globe::GlobeScene;

// ─── Application state ───────────────────────────────────────────────────────

pub struct OrbitrApp {
    pub view: ViewController<GlobeScene>,
    pub events: mpsc::Receiver<ViewEvent>,
    pub config: Config,
    /// Text currently in the search box.
    pub query: String,
    /// Scroll the result list to the selection on the next frame.
    pub scroll_to_selected: bool,
    pub dark_mode: bool,
}

impl OrbitrApp {
    pub fn new(cc: &eframe::CreationContext<'_>, config: Config) -> Self {
        let source = loading::make_source(&config);
        let mut view = ViewController::new(source).with_renderer(GlobeScene::default());

        let ctx = cc.egui_ctx.clone();
        view.set_repaint_notifier(move || ctx.request_repaint());
        let events = view.subscribe();

        if !config.offline {
            loading::log_health(&config);
        }

        let mut app = Self {
            view,
            events,
            config,
            query: String::new(),
            scroll_to_selected: false,
            dark_mode: true,
        };
        app.view.load();
        app
    }
}

impl eframe::App for OrbitrApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.view.poll();
        self.drain_events();

        if self.dark_mode {
            ctx.set_visuals(egui::Visuals::dark());
        } else {
            ctx.set_visuals(egui::Visuals::light());
        }

        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            self.draw_toolbar(ui);
        });

        egui::SidePanel::left("catalog")
            .resizable(true)
            .default_width(320.0)
            .show(ctx, |ui| {
                self.draw_sidebar(ui);
            });

        egui::CentralPanel::default()
            .frame(egui::Frame::none())
            .show(ctx, |ui| {
                self.draw_content(ui);
            });
    }
}
