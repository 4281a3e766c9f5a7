//! Data source and load lifecycle for `OrbitrApp`.
//!
//! Picks the HTTP or bundled source from the config, restarts loads, and
//! reacts to the view controller's change events.

use std::sync::Arc;

use orbitr::config::Config;
use orbitr::engine::ViewEvent;
use orbitr::net::almanac::StaticCatalog;
use orbitr::net::{HttpSource, RsoSource};

use super::OrbitrApp;

/// HTTP source for the configured API, or the bundled almanac when offline.
pub fn make_source(config: &Config) -> Arc<dyn RsoSource> {
    if config.offline {
        log::info!("Offline mode: serving the bundled almanac");
        return Arc::new(StaticCatalog);
    }
    match HttpSource::new(config) {
        Ok(source) => Arc::new(source),
        Err(e) => {
            log::warn!("Cannot build HTTP client ({}); falling back to bundled almanac", e);
            Arc::new(StaticCatalog)
        }
    }
}

/// Probe `api/health` in the background and log the answer.
pub fn log_health(config: &Config) {
    let config = config.clone();
    std::thread::spawn(move || {
        let result = HttpSource::new(&config).and_then(|source| source.health());
        match result {
            Ok(health) => log::info!(
                "API {} is {} ({} records)",
                config.api_base,
                health.status,
                health.rso_count
            ),
            Err(e) => log::warn!("API {} health check failed: {}", config.api_base, e),
        }
    });
}

impl OrbitrApp {
    /// Re-fetch from the current source.
    pub fn reload(&mut self) {
        self.view.load();
    }

    /// Switch between the API and the bundled almanac, then reload.
    pub fn set_offline(&mut self, offline: bool) {
        if self.config.offline == offline {
            return;
        }
        self.config.offline = offline;
        self.view.set_source(make_source(&self.config));
        self.view.load();
    }

    /// Consume pending view events.
    pub fn drain_events(&mut self) {
        while let Ok(event) = self.events.try_recv() {
            match event {
                ViewEvent::SelectionChanged(Some(_)) => self.scroll_to_selected = true,
                ViewEvent::LoadFailed(err) => log::debug!("View reported load failure: {}", err),
                other => log::trace!("View event: {:?}", other),
            }
        }
    }
}
