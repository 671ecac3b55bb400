use std::sync::mpsc::{self, RecvTimeoutError};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

use rollcall_logging::{rollcall_error, rollcall_info, rollcall_warn};
use tokio_util::sync::CancellationToken;

use crate::poll::{run_ticker, DEFAULT_POLL_INTERVAL};
use crate::{EngineEvent, PageRequest, Platform, RosterStore, WireParticipant};

#[derive(Debug, Clone)]
pub struct EngineSettings {
    pub poll_interval: Duration,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }
}

enum EngineCommand {
    LoadRoster,
    SaveRoster(Vec<String>),
    RequestScrape,
    StartPolling,
    Stop,
}

/// Runs storage, messaging and the poll ticker on a background tokio runtime.
///
/// Storage commands run in arrival order so saves never overtake each other.
/// Scrapes run as independent tasks; a slow page never delays the ticker.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: Mutex<mpsc::Receiver<EngineEvent>>,
    cancel: CancellationToken,
}

impl EngineHandle {
    pub fn new(platform: Arc<dyn Platform>, settings: EngineSettings) -> Self {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();
        let cancel = CancellationToken::new();
        let worker_cancel = cancel.clone();

        thread::spawn(move || {
            let runtime = match tokio::runtime::Runtime::new() {
                Ok(runtime) => runtime,
                Err(err) => {
                    rollcall_error!("Failed to start engine runtime: {}", err);
                    return;
                }
            };
            let mut polling = false;
            while let Ok(command) = cmd_rx.recv() {
                if worker_cancel.is_cancelled() {
                    break;
                }
                match command {
                    EngineCommand::Stop => break,
                    EngineCommand::LoadRoster => {
                        let names = runtime.block_on(load_roster(platform.as_ref()));
                        let _ = event_tx.send(EngineEvent::RosterLoaded(names));
                    }
                    EngineCommand::SaveRoster(names) => {
                        runtime.block_on(save_roster(platform.as_ref(), &names));
                    }
                    EngineCommand::RequestScrape => {
                        let platform = platform.clone();
                        let event_tx = event_tx.clone();
                        runtime.spawn(async move {
                            let result = check_participants(platform.as_ref()).await;
                            let _ = event_tx.send(EngineEvent::ScrapeCompleted(result));
                        });
                    }
                    EngineCommand::StartPolling => {
                        if polling {
                            continue;
                        }
                        polling = true;
                        let event_tx = event_tx.clone();
                        let cancel = worker_cancel.clone();
                        let period = settings.poll_interval;
                        rollcall_info!("Polling participants every {:?}", period);
                        runtime.spawn(async move {
                            let ticks = run_ticker(period, cancel, || {
                                event_tx.send(EngineEvent::PollTick).is_ok()
                            })
                            .await;
                            rollcall_info!("Polling stopped after {} ticks", ticks);
                        });
                    }
                }
            }
            worker_cancel.cancel();
            runtime.shutdown_timeout(Duration::from_millis(200));
        });

        Self {
            cmd_tx,
            event_rx: Mutex::new(event_rx),
            cancel,
        }
    }

    pub fn load_roster(&self) {
        let _ = self.cmd_tx.send(EngineCommand::LoadRoster);
    }

    pub fn save_roster(&self, names: Vec<String>) {
        let _ = self.cmd_tx.send(EngineCommand::SaveRoster(names));
    }

    pub fn request_scrape(&self) {
        let _ = self.cmd_tx.send(EngineCommand::RequestScrape);
    }

    pub fn start_polling(&self) {
        let _ = self.cmd_tx.send(EngineCommand::StartPolling);
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx.lock().ok()?.try_recv().ok()
    }

    /// Wait for the next event. `Disconnected` means the engine thread has
    /// exited and no further events will arrive.
    pub fn recv_timeout(&self, timeout: Duration) -> Result<EngineEvent, RecvTimeoutError> {
        let event_rx = self
            .event_rx
            .lock()
            .map_err(|_| RecvTimeoutError::Disconnected)?;
        event_rx.recv_timeout(timeout)
    }

    /// Stop the ticker and any further command processing. The event channel
    /// closes once the engine thread has wound down.
    pub fn shutdown(&self) {
        self.cancel.cancel();
        let _ = self.cmd_tx.send(EngineCommand::Stop);
    }
}

impl Drop for EngineHandle {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

async fn load_roster(platform: &dyn Platform) -> Vec<String> {
    match platform.storage() {
        Ok(storage) => RosterStore::new(storage).load().await,
        Err(err) => {
            rollcall_error!("Cannot load roster: {}", err);
            Vec::new()
        }
    }
}

async fn save_roster(platform: &dyn Platform, names: &[String]) {
    match platform.storage() {
        Ok(storage) => RosterStore::new(storage).save(names).await,
        Err(err) => rollcall_error!("Cannot save roster: {}", err),
    }
}

async fn check_participants(platform: &dyn Platform) -> Result<Vec<WireParticipant>, String> {
    let messenger = platform.active_tab_messenger().map_err(|err| {
        rollcall_warn!("Skipping participant check: {}", err);
        err.to_string()
    })?;
    match messenger.send(PageRequest::CheckParticipants).await {
        Ok(response) => response.into_result(),
        Err(err) => {
            rollcall_warn!("Error checking participants: {}", err);
            Err(err.to_string())
        }
    }
}
