use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use rollcall_core::{init, update, AppState, Msg};
use rollcall_engine::{
    DomScraper, EngineSettings, FileSnapshotSource, JsonFileStorage, KeyValueStorage,
    LocalPlatform, MemoryStorage, PageAgent, PageAgentMessenger, ScrapeSettings,
};
use rollcall_logging::{rollcall_error, rollcall_info, rollcall_warn, set_poll_tick};
use url::Url;

use super::commands::{parse_command, to_msgs, UserCommand, HELP};
use super::config::{load_config, AppConfig, DEFAULT_CONFIG_PATH};
use super::effects::EffectRunner;
use super::logging;
use super::render::render;

/// Everything the popup loop reacts to.
pub enum Input {
    Msg(Msg),
    Help,
    Quit,
}

pub fn run_app() -> anyhow::Result<()> {
    let config_path = std::env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH));
    let (config, config_error) = match load_config(&config_path) {
        Ok(config) => (config, None),
        Err(err) => (AppConfig::default(), Some(err)),
    };

    logging::initialize(config.log_destination, config.log_level.into());
    if let Some(err) = config_error {
        rollcall_warn!("{}; using defaults", err);
    }
    rollcall_info!("Starting roll call with config {:?}", config_path);

    let platform = build_platform(&config);
    let (input_tx, input_rx) = mpsc::channel::<Input>();
    let settings = EngineSettings {
        poll_interval: Duration::from_millis(config.poll_interval_ms.max(1)),
    };
    let runner = EffectRunner::new(Arc::new(platform), settings, input_tx.clone());
    spawn_stdin_reader(input_tx);

    let (mut state, effects) = init(AppState::with_overlap_policy(
        config.overlap_policy.into(),
    ));
    runner.run(effects);
    print_view(&state)?;
    println!("{HELP}");

    let mut ticks: u64 = 0;
    while let Ok(input) = input_rx.recv() {
        let msg = match input {
            Input::Msg(msg) => msg,
            Input::Help => {
                println!("{HELP}");
                continue;
            }
            Input::Quit => break,
        };
        if msg == Msg::PollTick {
            ticks += 1;
            set_poll_tick(ticks);
        }
        let (next, effects) = update(state, msg);
        state = next;
        runner.run(effects);
        if state.consume_dirty() {
            print_view(&state)?;
        }
    }

    runner.shutdown();
    rollcall_info!("Roll call closed after {} poll ticks", ticks);
    Ok(())
}

fn build_platform(config: &AppConfig) -> LocalPlatform {
    let storage: Arc<dyn KeyValueStorage> = match &config.storage_path {
        Some(path) => Arc::new(JsonFileStorage::new(path.clone())),
        None => {
            rollcall_warn!("No storage path configured; roster lasts for this session only");
            Arc::new(MemoryStorage::new())
        }
    };
    let platform = LocalPlatform::new().with_storage(storage);

    let Some(page_path) = &config.page_path else {
        rollcall_warn!("No page configured; every check will report no active tab");
        return platform;
    };
    let scraper = match DomScraper::new(&ScrapeSettings::from(config.scrape.clone())) {
        Ok(scraper) => scraper,
        Err(err) => {
            rollcall_error!("Scraper disabled: {}", err);
            return platform;
        }
    };
    let base_url = config
        .page_base_url
        .as_deref()
        .and_then(|raw| match Url::parse(raw) {
            Ok(url) => Some(url),
            Err(err) => {
                rollcall_warn!("Ignoring page_base_url {:?}: {}", raw, err);
                None
            }
        });
    let source = FileSnapshotSource::new(page_path.clone())
        .with_base_url(base_url)
        .with_declared_charset(config.page_charset.clone());
    let agent = PageAgent::new(Arc::new(scraper), Arc::new(source));
    platform.with_active_tab(Arc::new(PageAgentMessenger::new(agent)))
}

fn spawn_stdin_reader(input_tx: mpsc::Sender<Input>) {
    thread::spawn(move || {
        let stdin = io::stdin();
        for line in stdin.lock().lines() {
            let Ok(line) = line else { break };
            let inputs: Vec<Input> = match parse_command(&line) {
                None => continue,
                Some(UserCommand::Quit) => vec![Input::Quit],
                Some(UserCommand::Help) => vec![Input::Help],
                Some(command) => to_msgs(command).into_iter().map(Input::Msg).collect(),
            };
            for input in inputs {
                if input_tx.send(input).is_err() {
                    return;
                }
            }
        }
        // End of input closes the popup.
        let _ = input_tx.send(Input::Quit);
    });
}

fn print_view(state: &AppState) -> io::Result<()> {
    let mut out = io::stdout().lock();
    writeln!(out, "---")?;
    for line in render(&state.view()) {
        writeln!(out, "{line}")?;
    }
    out.flush()
}
