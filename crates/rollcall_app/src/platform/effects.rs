use std::sync::mpsc::{self, RecvTimeoutError};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use chrono::Local;
use rollcall_core::{Effect, Msg, Participant};
use rollcall_engine::{EngineEvent, EngineHandle, EngineSettings, Platform, WireParticipant};
use rollcall_logging::{rollcall_debug, rollcall_info};

use super::app::Input;

pub struct EffectRunner {
    engine: Arc<EngineHandle>,
}

impl EffectRunner {
    pub fn new(
        platform: Arc<dyn Platform>,
        settings: EngineSettings,
        input_tx: mpsc::Sender<Input>,
    ) -> Self {
        let engine = Arc::new(EngineHandle::new(platform, settings));
        let runner = Self { engine };
        runner.spawn_event_loop(input_tx);
        runner
    }

    pub fn run(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::LoadRoster => {
                    rollcall_info!("Loading roster");
                    self.engine.load_roster();
                }
                Effect::SaveRoster(names) => {
                    rollcall_debug!("Saving roster with {} entries", names.len());
                    self.engine.save_roster(names);
                }
                Effect::StartPolling => self.engine.start_polling(),
                Effect::RequestScrape => self.engine.request_scrape(),
            }
        }
    }

    pub fn shutdown(&self) {
        self.engine.shutdown();
    }

    fn spawn_event_loop(&self, input_tx: mpsc::Sender<Input>) {
        let engine = self.engine.clone();
        thread::spawn(move || loop {
            let event = match engine.recv_timeout(Duration::from_millis(50)) {
                Ok(event) => event,
                Err(RecvTimeoutError::Timeout) => continue,
                Err(RecvTimeoutError::Disconnected) => {
                    rollcall_info!("Engine stopped; no further updates");
                    break;
                }
            };
            if input_tx.send(Input::Msg(map_event(event))).is_err() {
                break;
            }
        });
    }
}

fn map_event(event: EngineEvent) -> Msg {
    match event {
        EngineEvent::RosterLoaded(names) => Msg::RosterLoaded(names),
        EngineEvent::PollTick => Msg::PollTick,
        EngineEvent::ScrapeCompleted(Ok(data)) => Msg::ScrapeCompleted {
            participants: data.into_iter().map(map_participant).collect(),
            checked_at: Some(Local::now().format("%H:%M:%S").to_string()),
        },
        EngineEvent::ScrapeCompleted(Err(error)) => Msg::ScrapeFailed(error),
    }
}

fn map_participant(wire: WireParticipant) -> Participant {
    Participant {
        avatar_url: wire.img_src,
        name: wire.text,
    }
}
