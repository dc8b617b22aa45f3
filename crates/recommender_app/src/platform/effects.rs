use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use recommender_core::{Effect, FailureReason, Msg, RequestOutcome};
use recommender_engine::{EngineEvent, EngineEvents, EngineHandle, FailureKind, RecommendError};
use recommender_logging::{rec_debug, rec_info};

use super::app::AppEvent;

pub struct EffectRunner {
    engine: EngineHandle,
}

impl EffectRunner {
    pub fn new(engine: EngineHandle, event_tx: mpsc::Sender<AppEvent>) -> Self {
        let runner = Self { engine };
        runner.spawn_event_loop(event_tx);
        runner
    }

    pub fn enqueue(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::SendRequest { request_id, query } => {
                    rec_info!(
                        "SendRequest request_id={} query_len={}",
                        request_id,
                        query.len()
                    );
                    self.engine.send(request_id, query);
                }
                Effect::CancelRequest { request_id } => {
                    rec_info!("CancelRequest request_id={}", request_id);
                    self.engine.cancel(request_id);
                }
            }
        }
    }

    /// Forwards engine events as messages until the engine or the app goes away.
    fn spawn_event_loop(&self, event_tx: mpsc::Sender<AppEvent>) {
        let events: EngineEvents = self.engine.events();
        thread::spawn(move || loop {
            let event = match events.recv_timeout(Duration::from_millis(50)) {
                Ok(event) => event,
                Err(mpsc::RecvTimeoutError::Timeout) => continue,
                Err(mpsc::RecvTimeoutError::Disconnected) => {
                    rec_debug!("Request engine stopped; event forwarding ends");
                    break;
                }
            };
            let msg = match event {
                EngineEvent::Completed { request_id, result } => Msg::ResponseReceived {
                    request_id,
                    outcome: map_result(result),
                },
                EngineEvent::Cancelled { request_id } => {
                    rec_debug!("Request {} cancelled; nothing to apply", request_id);
                    continue;
                }
            };
            if event_tx.send(AppEvent::Msg(msg)).is_err() {
                break;
            }
        });
    }
}

fn map_result(result: Result<Vec<String>, RecommendError>) -> RequestOutcome {
    match result {
        Ok(titles) => RequestOutcome::Recommended(titles),
        Err(err) if err.kind.is_network() => RequestOutcome::Failed(FailureReason::Network),
        Err(err) => RequestOutcome::Failed(match err.kind {
            FailureKind::Server { message, .. } => FailureReason::Server { message },
            _ => FailureReason::Parse,
        }),
    }
}
