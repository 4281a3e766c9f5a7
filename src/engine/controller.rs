//! The view controller: catalog loading, selection and projection.
//!
//! Fetches run on background threads and report over a channel; `poll()`
//! applies their results on the caller's thread, so every mutation of the
//! state, the index and the render target happens on one thread. A record
//! replacement always runs replace → rebuild → highlight to completion
//! before `poll()` returns, so nothing observes a half-built index.

use std::sync::{mpsc, Arc};

use crate::catalog::index::CatalogIndex;
use crate::catalog::{RsoRecord, SatcatNumber};
use crate::net::{FetchError, RsoSource};
use crate::render::{ProjectionMode, RenderTarget, FLY_TO_DURATION_SECS, MORPH_DURATION_SECS};

use super::state::{LoadError, LoadPhase, LoadStatus, ViewError, ViewEvent, ViewState};

enum Fetched {
    Records(Result<Vec<RsoRecord>, FetchError>),
    CatalogSize(Result<usize, FetchError>),
}

struct Delivery {
    generation: u64,
    fetched: Fetched,
}

type Notifier = Arc<dyn Fn() + Send + Sync>;

pub struct ViewController<R: RenderTarget> {
    state: ViewState,
    index: CatalogIndex<R::Handle>,
    renderer: Option<R>,
    source: Arc<dyn RsoSource>,
    tx: mpsc::Sender<Delivery>,
    rx: mpsc::Receiver<Delivery>,
    /// Bumped by every `load()`; deliveries from older loads are dropped.
    generation: u64,
    records_pending: bool,
    catalog_pending: bool,
    load_error: Option<LoadError>,
    has_records: bool,
    notify: Option<Notifier>,
    subscribers: Vec<mpsc::Sender<ViewEvent>>,
}

impl<R: RenderTarget> ViewController<R> {
    pub fn new(source: Arc<dyn RsoSource>) -> Self {
        let (tx, rx) = mpsc::channel();
        Self {
            state: ViewState::default(),
            index: CatalogIndex::new(),
            renderer: None,
            source,
            tx,
            rx,
            generation: 0,
            records_pending: false,
            catalog_pending: false,
            load_error: None,
            has_records: false,
            notify: None,
            subscribers: Vec::new(),
        }
    }

    pub fn with_renderer(mut self, renderer: R) -> Self {
        self.attach_renderer(renderer);
        self
    }

    /// Attach a render target and bring it in sync with the current records.
    pub fn attach_renderer(&mut self, renderer: R) {
        self.renderer = Some(renderer);
        self.rebuild();
        self.highlight_selected();
    }

    /// Detach the render target. Its entities go with it, so the index is
    /// emptied too.
    pub fn detach_renderer(&mut self) -> Option<R> {
        self.index.clear();
        self.renderer.take()
    }

    /// Called from fetch threads once a result has been queued.
    pub fn set_repaint_notifier(&mut self, notify: impl Fn() + Send + Sync + 'static) {
        self.notify = Some(Arc::new(notify));
    }

    /// Swap the data source. Takes effect on the next `load()`.
    pub fn set_source(&mut self, source: Arc<dyn RsoSource>) {
        self.source = source;
    }

    /// Register for change notifications.
    pub fn subscribe(&mut self) -> mpsc::Receiver<ViewEvent> {
        let (tx, rx) = mpsc::channel();
        self.subscribers.push(tx);
        rx
    }

    // ─── Loading ─────────────────────────────────────────────────────────────

    /// Start fetching the record collection and the catalog size.
    ///
    /// Both requests run concurrently and complete in any order. Results
    /// are applied by [`poll`](Self::poll); anything still in flight from an
    /// earlier `load()` is discarded when it lands.
    pub fn load(&mut self) {
        self.generation += 1;
        self.records_pending = true;
        self.catalog_pending = true;
        self.load_error = None;
        log::info!("Loading catalog (generation {})", self.generation);

        self.spawn_fetch(|source| Fetched::Records(source.fetch_all_records()));
        self.spawn_fetch(|source| Fetched::CatalogSize(source.fetch_catalog_size()));
    }

    fn spawn_fetch(&self, job: impl FnOnce(&dyn RsoSource) -> Fetched + Send + 'static) {
        let source = Arc::clone(&self.source);
        let tx = self.tx.clone();
        let notify = self.notify.clone();
        let generation = self.generation;

        std::thread::spawn(move || {
            let fetched = job(source.as_ref());
            let _ = tx.send(Delivery {
                generation,
                fetched,
            });
            if let Some(notify) = notify {
                notify();
            }
        });
    }

    /// Apply completed fetches. Call every frame. Returns how many results
    /// from the current load were applied.
    pub fn poll(&mut self) -> usize {
        let mut applied = 0;
        while let Ok(delivery) = self.rx.try_recv() {
            if delivery.generation != self.generation {
                log::debug!(
                    "Dropping result of superseded load (generation {} < {})",
                    delivery.generation,
                    self.generation
                );
                continue;
            }
            self.apply(delivery.fetched);
            applied += 1;
        }
        applied
    }

    fn apply(&mut self, fetched: Fetched) {
        match fetched {
            Fetched::Records(Ok(records)) => {
                self.records_pending = false;
                log::info!("Loaded {} records", records.len());
                self.replace_records(records);
            }
            Fetched::Records(Err(e)) => {
                self.records_pending = false;
                self.fail(LoadPhase::Records, e);
            }
            Fetched::CatalogSize(Ok(size)) => {
                self.catalog_pending = false;
                self.state.catalog_size = size;
                self.emit(ViewEvent::CatalogSizeChanged(size));
            }
            Fetched::CatalogSize(Err(e)) => {
                self.catalog_pending = false;
                self.fail(LoadPhase::CatalogSize, e);
            }
        }
    }

    fn fail(&mut self, phase: LoadPhase, e: FetchError) {
        let err = LoadError {
            phase,
            message: e.to_string(),
        };
        log::warn!("Catalog load failed: {}", err);
        self.load_error = Some(err.clone());
        self.emit(ViewEvent::LoadFailed(err));
    }

    pub fn is_loading(&self) -> bool {
        self.records_pending || self.catalog_pending
    }

    /// Status of the record collection.
    ///
    /// A failure of either fetch reports `Failed` until the next `load()`.
    pub fn load_status(&self) -> LoadStatus {
        if self.records_pending {
            LoadStatus::Loading
        } else if let Some(err) = &self.load_error {
            LoadStatus::Failed(err.clone())
        } else if self.has_records {
            LoadStatus::Loaded
        } else {
            LoadStatus::Idle
        }
    }

    // ─── Record set ──────────────────────────────────────────────────────────

    /// Replace the record collection wholesale.
    ///
    /// Selects the first record (if any), rebuilds the render target's
    /// entities and the index, then focuses the selection.
    pub fn replace_records(&mut self, records: Vec<RsoRecord>) {
        self.state.records = records;
        self.state.selected = if self.state.records.is_empty() {
            None
        } else {
            Some(0)
        };
        self.has_records = true;

        self.emit(ViewEvent::RecordsReplaced {
            count: self.state.records.len(),
        });
        self.emit(ViewEvent::SelectionChanged(self.selected_id()));

        self.rebuild();
        self.highlight_selected();
    }

    fn rebuild(&mut self) {
        match self.renderer.as_mut() {
            Some(renderer) => self.index.rebuild(&self.state.records, renderer),
            None => {
                log::debug!("No render target attached; index left empty");
                self.index.clear();
            }
        }
    }

    // ─── Selection ───────────────────────────────────────────────────────────

    /// Select a record of the current collection and focus it.
    pub fn select(&mut self, id: &SatcatNumber) -> Result<(), ViewError> {
        let pos = self
            .state
            .records
            .iter()
            .position(|r| &r.satcat_number == id)
            .ok_or_else(|| ViewError::NotInCollection(id.clone()))?;

        self.state.selected = Some(pos);
        self.emit(ViewEvent::SelectionChanged(Some(id.clone())));
        self.highlight(id);
        Ok(())
    }

    /// Mark the record's entity selected and fly the camera to it.
    ///
    /// Silently does nothing when there is no render target or no entity
    /// for `id`.
    pub fn highlight(&mut self, id: &SatcatNumber) {
        let Some(renderer) = self.renderer.as_mut() else {
            return;
        };
        match self.index.lookup(id) {
            Some(handle) => {
                renderer.set_selected_entity(handle);
                renderer.fly_to_entity(handle, FLY_TO_DURATION_SECS);
            }
            None => log::debug!("No entity for SatCat {}; highlight skipped", id),
        }
    }

    fn highlight_selected(&mut self) {
        if let Some(id) = self.selected_id() {
            self.highlight(&id);
        }
    }

    fn selected_id(&self) -> Option<SatcatNumber> {
        self.state.selected().map(|r| r.satcat_number.clone())
    }

    pub fn selected(&self) -> Option<&RsoRecord> {
        self.state.selected()
    }

    /// The record rendered as `handle`, if it is still indexed.
    pub fn record_for_handle(&self, handle: R::Handle) -> Option<&RsoRecord> {
        let id = self.index.identifier_of(handle)?;
        self.state.records.iter().find(|r| &r.satcat_number == id)
    }

    // ─── Projection / filter ─────────────────────────────────────────────────

    /// Switch projection. Render-only: records, selection and index are
    /// left alone.
    pub fn change_mode(&mut self, mode: ProjectionMode) {
        self.state.mode = mode;
        log::info!("Projection -> {}", mode);
        if let Some(renderer) = self.renderer.as_mut() {
            renderer.morph_projection(mode, MORPH_DURATION_SECS);
        }
        self.emit(ViewEvent::ModeChanged(mode));
    }

    pub fn set_filter_text(&mut self, text: impl Into<String>) {
        let text = text.into();
        if text == self.state.filter_text {
            return;
        }
        self.state.filter_text = text;
        self.emit(ViewEvent::FilterChanged(self.state.filter_text.clone()));
    }

    pub fn visible_records(&self) -> Vec<&RsoRecord> {
        self.state.visible_records()
    }

    // ─── Accessors ───────────────────────────────────────────────────────────

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn index(&self) -> &CatalogIndex<R::Handle> {
        &self.index
    }

    pub fn renderer(&self) -> Option<&R> {
        self.renderer.as_ref()
    }

    pub fn renderer_mut(&mut self) -> Option<&mut R> {
        self.renderer.as_mut()
    }

    fn emit(&mut self, event: ViewEvent) {
        self.subscribers.retain(|s| s.send(event.clone()).is_ok());
    }
}
