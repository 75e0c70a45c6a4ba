//! Application orchestration layer
//!
//! Wires the selection manager, the pack catalog and the picker list to the
//! terminal. Input arrives from the input thread, catalog scans and list
//! notifications arrive on channels, and everything is applied to one
//! `ViewState` owned by the loop.

pub mod runtime;

use crate::catalog::PackCatalog;
use crate::error::Result;
use crate::input::{spawn_input_thread, InputAction};
use crate::list::{build_entry_list, ChannelRenderer, IconHandle, ListEvent, SelectableList};
use crate::selection::{SelectionManager, SYSTEM_ICONS_LABEL};
use crate::ui::{Screen, UIRenderer, ViewState};
use log::{debug, warn};
use parking_lot::Mutex;
use runtime::{spawn_catalog_scan, ScanOutcome};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::task::JoinHandle;

const INPUT_POLL_INTERVAL: Duration = Duration::from_millis(50);
/// Picks up a background fetch that lands after the first draw
const SUMMARY_REFRESH_INTERVAL: Duration = Duration::from_millis(250);
const SYSTEM_ICON: &str = "system";

enum LoopEvent {
    Input(Option<InputAction>),
    Scan(ScanOutcome),
    Tick,
}

pub struct Application {
    manager: SelectionManager,
    catalog: Arc<PackCatalog>,
    ui_renderer: Box<dyn UIRenderer>,
    view_state: ViewState,
    /// Present while the picker screen is open
    picker: Option<SelectableList>,
    list_tx: UnboundedSender<ListEvent>,
    list_rx: UnboundedReceiver<ListEvent>,
    scan_tx: UnboundedSender<ScanOutcome>,
    scan_rx: UnboundedReceiver<ScanOutcome>,
    /// Persistence tasks started by picker taps
    pending_writes: Arc<Mutex<Vec<JoinHandle<()>>>>,
}

impl Application {
    pub fn new(
        manager: SelectionManager,
        catalog: Arc<PackCatalog>,
        ui_renderer: Box<dyn UIRenderer>,
    ) -> Self {
        let (list_tx, list_rx) = mpsc::unbounded_channel();
        let (scan_tx, scan_rx) = mpsc::unbounded_channel();

        let mut view_state = ViewState::new(80, 24);
        view_state.available = manager.is_available();

        let mut app = Self {
            manager,
            catalog,
            ui_renderer,
            view_state,
            picker: None,
            list_tx,
            list_rx,
            scan_tx,
            scan_rx,
            pending_writes: Arc::new(Mutex::new(Vec::new())),
        };
        app.refresh_summary();
        app
    }

    pub fn view_state(&self) -> &ViewState {
        &self.view_state
    }

    /// Take over the terminal until the user quits
    pub async fn run(&mut self) -> Result<()> {
        self.ui_renderer.initialize()?;

        let (width, height) = self.ui_renderer.get_terminal_size()?;
        self.view_state.update_terminal_size(width, height);

        let (input_tx, mut input_rx) = mpsc::unbounded_channel();
        let shutdown = Arc::new(AtomicBool::new(false));
        let input_thread = spawn_input_thread(input_tx, Arc::clone(&shutdown), INPUT_POLL_INTERVAL);

        let result = self.event_loop(&mut input_rx).await;

        shutdown.store(true, Ordering::SeqCst);
        drop(input_rx);
        let joined = tokio::task::spawn_blocking(move || input_thread.join()).await;
        if !matches!(joined, Ok(Ok(()))) {
            warn!("input thread did not shut down cleanly");
        }

        self.ui_renderer.cleanup()?;
        self.flush_pending_writes().await;
        result
    }

    async fn event_loop(&mut self, input_rx: &mut UnboundedReceiver<InputAction>) -> Result<()> {
        // Warm the label cache so the summary can show a pack name
        spawn_catalog_scan(Arc::clone(&self.catalog), self.scan_tx.clone());
        self.ui_renderer.render(&self.view_state)?;

        let mut ticker = tokio::time::interval(SUMMARY_REFRESH_INTERVAL);
        loop {
            let event = tokio::select! {
                action = input_rx.recv() => LoopEvent::Input(action),
                Some(outcome) = self.scan_rx.recv() => LoopEvent::Scan(outcome),
                _ = ticker.tick() => LoopEvent::Tick,
            };

            match event {
                LoopEvent::Input(Some(action)) => {
                    if !self.handle_action(action) {
                        break;
                    }
                }
                LoopEvent::Input(None) => break,
                LoopEvent::Scan(outcome) => self.handle_scan_result(outcome),
                LoopEvent::Tick => self.refresh_summary(),
            }

            self.ui_renderer.render(&self.view_state)?;
        }
        Ok(())
    }

    /// Apply one input action; returns false when the application should exit
    pub fn handle_action(&mut self, action: InputAction) -> bool {
        match action {
            InputAction::Quit => return false,
            InputAction::Resize { width, height } => {
                self.view_state.update_terminal_size(width, height);
            }
            InputAction::CursorUp => self.view_state.cursor_up(),
            InputAction::CursorDown => self.view_state.cursor_down(),
            InputAction::CursorFirst => self.view_state.cursor_first(),
            InputAction::CursorLast => self.view_state.cursor_last(),
            InputAction::Activate => match self.view_state.screen {
                Screen::Summary => self.open_picker(),
                Screen::Picker => self.activate_row(),
            },
            InputAction::Back => {
                if self.view_state.screen == Screen::Picker {
                    self.close_picker();
                }
            }
            InputAction::NoAction => {}
        }
        true
    }

    /// Feed a finished catalog scan to the picker.
    ///
    /// A failed scan still yields a list holding only the sentinel row.
    pub fn handle_scan_result(&mut self, outcome: ScanOutcome) {
        let candidates = match outcome {
            Ok(entries) => entries,
            Err(err) => {
                warn!("Failed to enumerate icon packs: {err}");
                if self.picker.is_some() {
                    self.view_state
                        .status_line
                        .set_message("Icon packs unavailable".to_string());
                }
                Vec::new()
            }
        };

        self.refresh_summary();

        if let Some(picker) = self.picker.as_mut() {
            let entries =
                build_entry_list(SYSTEM_ICONS_LABEL, IconHandle::new(SYSTEM_ICON), candidates);
            picker.submit_list(entries);
            self.drain_list_events();
        }
    }

    fn open_picker(&mut self) {
        if !self.manager.is_available() {
            self.view_state
                .status_line
                .set_message("Themed icons are not supported".to_string());
            return;
        }

        let mut picker = SelectableList::new(Box::new(ChannelRenderer::new(self.list_tx.clone())));
        picker.set_initial_selection(self.manager.current());

        let manager = self.manager.clone();
        let pending = Arc::clone(&self.pending_writes);
        picker.set_on_select(move |id| {
            let handle = manager.select(id);
            let mut pending = pending.lock();
            pending.retain(|write| !write.is_finished());
            pending.push(handle);
        });

        debug!("opening picker");
        self.picker = Some(picker);
        self.view_state.open_picker();
        spawn_catalog_scan(Arc::clone(&self.catalog), self.scan_tx.clone());
    }

    fn close_picker(&mut self) {
        debug!("closing picker");
        self.picker = None;
        self.drain_list_events();
        self.view_state.close_picker();
        self.view_state.status_line.clear_message();
        self.refresh_summary();
    }

    fn activate_row(&mut self) {
        let cursor = self.view_state.cursor;
        let Some(picker) = self.picker.as_mut() else {
            return;
        };

        if picker.select_by_user_tap(cursor) {
            if let Some(entry) = picker.entries().get(cursor) {
                let message = format!("Selected {}", entry.label);
                self.view_state.status_line.set_message(message);
            }
        }
        self.drain_list_events();
        self.refresh_summary();
    }

    fn drain_list_events(&mut self) {
        match self.picker.as_ref() {
            Some(picker) => {
                while let Ok(event) = self.list_rx.try_recv() {
                    self.view_state.apply_list_event(&event, picker);
                }
            }
            None => while self.list_rx.try_recv().is_ok() {},
        }
    }

    fn refresh_summary(&mut self) {
        self.view_state.summary = self.manager.summary(self.catalog.as_ref());
    }

    /// Wait for every persistence task started by the picker
    pub async fn flush_pending_writes(&self) {
        let writes = std::mem::take(&mut *self.pending_writes.lock());
        for write in writes {
            if let Err(err) = write.await {
                warn!("persistence task failed: {err}");
            }
        }
    }
}
