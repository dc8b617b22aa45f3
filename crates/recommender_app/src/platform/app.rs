use std::io::{self, BufRead, Write};
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use recommender_core::{update, AppState, Msg, RequestState};
use recommender_engine::{EngineHandle, RecommendError};
use recommender_logging::{rec_info, rec_warn};

use super::config::AppConfig;
use super::effects::EffectRunner;
use super::ui;

/// Everything the main loop reacts to.
#[derive(Debug)]
pub enum AppEvent {
    Msg(Msg),
    /// Stdin hit EOF; quit once nothing is in flight.
    InputClosed,
    /// User typed the quit command.
    Quit,
}

/// Interactive mode: one query per input line until `:quit` or EOF.
pub fn run_app(config: &AppConfig) -> Result<(), RecommendError> {
    let (event_tx, event_rx) = mpsc::channel::<AppEvent>();
    let mut session = Session::start(config, event_tx.clone())?;

    spawn_input_reader(event_tx.clone());

    // Background tick to throttle rendering.
    thread::spawn(move || {
        let interval = Duration::from_millis(75);
        while event_tx.send(AppEvent::Msg(Msg::Tick)).is_ok() {
            thread::sleep(interval);
        }
    });

    let mut out = io::stdout().lock();
    session.render(&mut out);

    let mut input_closed = false;
    while let Ok(first) = event_rx.recv() {
        let inbox = std::iter::once(first).chain(event_rx.try_iter()).collect::<Vec<_>>();
        for event in inbox {
            match event {
                AppEvent::Msg(msg) => session.dispatch(msg),
                AppEvent::InputClosed => input_closed = true,
                AppEvent::Quit => {
                    rec_info!("Quit requested");
                    return Ok(());
                }
            }
        }
        if session.consume_dirty() {
            session.render(&mut out);
        }
        if input_closed && session.request_state() != RequestState::Loading {
            rec_info!("Input closed; exiting");
            return Ok(());
        }
    }
    Ok(())
}

/// One-shot mode: submit `query`, print the settled view, return its state.
pub fn run_once(config: &AppConfig, query: String) -> Result<RequestState, RecommendError> {
    let (event_tx, event_rx) = mpsc::channel::<AppEvent>();
    let mut session = Session::start(config, event_tx)?;

    session.dispatch(Msg::QueryChanged(query));
    session.dispatch(Msg::Submitted);

    while session.request_state() == RequestState::Loading {
        match event_rx.recv() {
            Ok(AppEvent::Msg(msg)) => session.dispatch(msg),
            Ok(AppEvent::InputClosed | AppEvent::Quit) => {}
            Err(_) => break,
        }
    }

    if let Err(err) = session.render_lines(&mut io::stdout().lock()) {
        rec_warn!("Failed to write view: {}", err);
    }
    Ok(session.request_state())
}

struct Session {
    state: AppState,
    effects: EffectRunner,
    columns: usize,
}

impl Session {
    fn start(config: &AppConfig, event_tx: mpsc::Sender<AppEvent>) -> Result<Self, RecommendError> {
        rec_info!(
            "Starting with endpoint={} contract={} request_timeout_secs={:?}",
            config.endpoint,
            config.contract.name(),
            config.request_timeout_secs
        );
        let engine = EngineHandle::with_settings(config.client_settings())?;
        Ok(Self {
            state: AppState::new(),
            effects: EffectRunner::new(engine, event_tx),
            columns: config.columns(),
        })
    }

    fn dispatch(&mut self, msg: Msg) {
        let state = std::mem::take(&mut self.state);
        let (state, effects) = update(state, msg);
        self.state = state;
        self.effects.enqueue(effects);
    }

    fn request_state(&self) -> RequestState {
        self.state.request_state()
    }

    fn consume_dirty(&mut self) -> bool {
        self.state.consume_dirty()
    }

    fn render_lines(&self, out: &mut impl Write) -> io::Result<()> {
        for line in ui::render::render(&self.state.view(), self.columns) {
            writeln!(out, "{line}")?;
        }
        Ok(())
    }

    /// Prints the view followed by the input prompt. Write failures are logged only.
    fn render(&self, out: &mut impl Write) {
        let result = self
            .render_lines(out)
            .and_then(|()| write!(out, "{}", ui::constants::PROMPT))
            .and_then(|()| out.flush());
        if let Err(err) = result {
            rec_warn!("Failed to write view: {}", err);
        }
    }
}

fn spawn_input_reader(event_tx: mpsc::Sender<AppEvent>) {
    thread::spawn(move || {
        let stdin = io::stdin();
        for line in stdin.lock().lines() {
            let line = match line {
                Ok(line) => line,
                Err(err) => {
                    rec_warn!("Failed to read input: {}", err);
                    break;
                }
            };
            if line.trim() == ui::constants::QUIT_COMMAND {
                let _ = event_tx.send(AppEvent::Quit);
                return;
            }
            let sent = event_tx
                .send(AppEvent::Msg(Msg::QueryChanged(line)))
                .and_then(|()| event_tx.send(AppEvent::Msg(Msg::Submitted)));
            if sent.is_err() {
                return;
            }
        }
        let _ = event_tx.send(AppEvent::InputClosed);
    });
}
