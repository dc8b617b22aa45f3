use std::collections::HashMap;
use std::sync::{mpsc, Arc, Mutex};
use std::thread;
use std::time::Duration;

use recommender_logging::{rec_debug, rec_error, rec_info, rec_warn};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::client::{ClientSettings, Recommender, ReqwestRecommender};
use crate::{EngineEvent, RecommendError, RequestId};

enum EngineCommand {
    Send { request_id: RequestId, query: String },
    Cancel { request_id: RequestId },
}

struct InFlight {
    token: CancellationToken,
    task: JoinHandle<()>,
}

/// Runs recommendation requests on a background tokio runtime.
///
/// Every request runs independently; completions arrive in settle order,
/// not submission order. Dropping the handle stops the runtime, cancels
/// whatever is still in flight and disconnects every [`EngineEvents`].
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    events: EngineEvents,
}

/// Receiving side of an [`EngineHandle`]. Holding it does not keep the
/// engine alive.
#[derive(Clone)]
pub struct EngineEvents {
    event_rx: Arc<Mutex<mpsc::Receiver<EngineEvent>>>,
}

impl EngineEvents {
    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx.lock().ok()?.try_recv().ok()
    }

    /// Waits up to `timeout` for the next event. `Disconnected` means the
    /// request runtime is gone and no further events will arrive.
    pub fn recv_timeout(&self, timeout: Duration) -> Result<EngineEvent, mpsc::RecvTimeoutError> {
        let rx = self
            .event_rx
            .lock()
            .map_err(|_| mpsc::RecvTimeoutError::Disconnected)?;
        rx.recv_timeout(timeout)
    }
}

impl EngineHandle {
    pub fn new(recommender: Arc<dyn Recommender>) -> Self {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();

        thread::spawn(move || {
            let runtime = match tokio::runtime::Runtime::new() {
                Ok(runtime) => runtime,
                Err(err) => {
                    rec_error!("Failed to start request runtime: {}", err);
                    return;
                }
            };
            let mut in_flight: HashMap<RequestId, InFlight> = HashMap::new();
            while let Ok(command) = cmd_rx.recv() {
                in_flight.retain(|_, request| !request.task.is_finished());
                match command {
                    EngineCommand::Send { request_id, query } => {
                        let token = CancellationToken::new();
                        let task = runtime.spawn(run_request(
                            recommender.clone(),
                            request_id,
                            query,
                            token.clone(),
                            event_tx.clone(),
                        ));
                        in_flight.insert(request_id, InFlight { token, task });
                    }
                    EngineCommand::Cancel { request_id } => match in_flight.remove(&request_id) {
                        Some(request) => request.token.cancel(),
                        None => rec_debug!("Cancel for settled request {}", request_id),
                    },
                }
            }
            for request in in_flight.values() {
                request.token.cancel();
            }
        });

        Self {
            cmd_tx,
            events: EngineEvents {
                event_rx: Arc::new(Mutex::new(event_rx)),
            },
        }
    }

    pub fn with_settings(settings: ClientSettings) -> Result<Self, RecommendError> {
        let recommender = ReqwestRecommender::new(settings)?;
        Ok(Self::new(Arc::new(recommender)))
    }

    pub fn send(&self, request_id: RequestId, query: impl Into<String>) {
        let _ = self.cmd_tx.send(EngineCommand::Send {
            request_id,
            query: query.into(),
        });
    }

    pub fn cancel(&self, request_id: RequestId) {
        let _ = self.cmd_tx.send(EngineCommand::Cancel { request_id });
    }

    pub fn events(&self) -> EngineEvents {
        self.events.clone()
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.events.try_recv()
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Result<EngineEvent, mpsc::RecvTimeoutError> {
        self.events.recv_timeout(timeout)
    }
}

async fn run_request(
    recommender: Arc<dyn Recommender>,
    request_id: RequestId,
    query: String,
    token: CancellationToken,
    event_tx: mpsc::Sender<EngineEvent>,
) {
    rec_info!("Request {} started", request_id);
    let event = tokio::select! {
        _ = token.cancelled() => {
            rec_info!("Request {} cancelled", request_id);
            EngineEvent::Cancelled { request_id }
        }
        result = recommender.recommend(&query) => {
            match &result {
                Ok(titles) => rec_info!("Request {} returned {} titles", request_id, titles.len()),
                Err(err) => rec_warn!("Request {} failed: {}", request_id, err),
            }
            EngineEvent::Completed { request_id, result }
        }
    };
    let _ = event_tx.send(event);
}
