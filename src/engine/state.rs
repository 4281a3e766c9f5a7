//! Observable view state.

use std::fmt;

use crate::catalog::filter::filter;
use crate::catalog::{RsoRecord, SatcatNumber};
use crate::render::ProjectionMode;

/// Which of the two load fetches failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadPhase {
    Records,
    CatalogSize,
}

impl fmt::Display for LoadPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Records => "records",
            Self::CatalogSize => "catalog",
        })
    }
}

/// Error during catalog loading
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("[{phase}] {message}")]
pub struct LoadError {
    pub phase: LoadPhase,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadStatus {
    Idle,
    Loading,
    Loaded,
    Failed(LoadError),
}

/// Caller-side misuse of the view controller.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ViewError {
    #[error("SatCat {0} is not in the loaded collection")]
    NotInCollection(SatcatNumber),
}

/// Change notifications pushed to subscribers.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewEvent {
    RecordsReplaced { count: usize },
    SelectionChanged(Option<SatcatNumber>),
    ModeChanged(ProjectionMode),
    CatalogSizeChanged(usize),
    FilterChanged(String),
    LoadFailed(LoadError),
}

/// Authoritative view data. Only the view controller mutates it.
#[derive(Debug, Clone, Default)]
pub struct ViewState {
    pub(crate) mode: ProjectionMode,
    pub(crate) records: Vec<RsoRecord>,
    pub(crate) catalog_size: usize,
    pub(crate) filter_text: String,
    /// Position in `records`; reset whenever `records` is replaced.
    pub(crate) selected: Option<usize>,
}

impl ViewState {
    pub fn mode(&self) -> ProjectionMode {
        self.mode
    }

    pub fn records(&self) -> &[RsoRecord] {
        &self.records
    }

    /// Size of the reference catalog. Unrelated to `records().len()`.
    pub fn catalog_size(&self) -> usize {
        self.catalog_size
    }

    pub fn filter_text(&self) -> &str {
        &self.filter_text
    }

    pub fn selected(&self) -> Option<&RsoRecord> {
        self.selected.and_then(|i| self.records.get(i))
    }

    /// Records matching the current filter text. Recomputed on every call.
    pub fn visible_records(&self) -> Vec<&RsoRecord> {
        filter(&self.records, &self.filter_text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initial_state() {
        let state = ViewState::default();
        assert_eq!(state.mode(), ProjectionMode::ThreeD);
        assert!(state.records().is_empty());
        assert_eq!(state.catalog_size(), 0);
        assert_eq!(state.filter_text(), "");
        assert!(state.selected().is_none());
    }

    #[test]
    fn load_error_names_its_phase() {
        let err = LoadError {
            phase: LoadPhase::CatalogSize,
            message: "HTTP 503".into(),
        };
        assert_eq!(err.to_string(), "[catalog] HTTP 503");
    }
}
