use crate::view_model::{
    AppViewModel, MovieCardView, GENERIC_FAILURE_MESSAGE, SERVER_ERROR_MESSAGE, SUBMIT_LABEL_BUSY,
    SUBMIT_LABEL_IDLE,
};

/// Generation token handed out per submission. Starts at 1.
pub type RequestId = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RequestState {
    #[default]
    Idle,
    Loading,
    Success,
    Failed,
}

/// Why a request failed, as far as the form cares.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureReason {
    /// The request never reached the endpoint or never came back.
    Network,
    /// The endpoint answered with a failure status.
    Server { message: Option<String> },
    /// The body was not JSON or did not match the response contract.
    Parse,
}

impl FailureReason {
    /// Text shown to the user for this failure.
    pub fn user_message(&self) -> String {
        match self {
            FailureReason::Server {
                message: Some(message),
            } if !message.is_empty() => message.clone(),
            FailureReason::Server { .. } => SERVER_ERROR_MESSAGE.to_string(),
            FailureReason::Network | FailureReason::Parse => GENERIC_FAILURE_MESSAGE.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestOutcome {
    Recommended(Vec<String>),
    Failed(FailureReason),
}

/// Result of the last request that was allowed to settle.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
enum LastOutcome {
    #[default]
    Nothing,
    Titles(Vec<String>),
    Error(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    query: String,
    last_issued: RequestId,
    in_flight: Option<RequestId>,
    outcome: LastOutcome,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn in_flight(&self) -> Option<RequestId> {
        self.in_flight
    }

    pub fn request_state(&self) -> RequestState {
        if self.in_flight.is_some() {
            return RequestState::Loading;
        }
        match self.outcome {
            LastOutcome::Nothing => RequestState::Idle,
            LastOutcome::Titles(_) => RequestState::Success,
            LastOutcome::Error(_) => RequestState::Failed,
        }
    }

    pub fn view(&self) -> AppViewModel {
        let request_state = self.request_state();
        let busy = request_state == RequestState::Loading;
        let (error, cards) = match &self.outcome {
            LastOutcome::Error(message) if !busy => (Some(message.clone()), Vec::new()),
            LastOutcome::Titles(titles) if !busy => (
                None,
                titles
                    .iter()
                    .enumerate()
                    .map(|(index, title)| MovieCardView {
                        index,
                        title: title.clone(),
                    })
                    .collect(),
            ),
            _ => (None, Vec::new()),
        };

        AppViewModel {
            query: self.query.clone(),
            request_state,
            busy,
            submit_label: if busy {
                SUBMIT_LABEL_BUSY
            } else {
                SUBMIT_LABEL_IDLE
            },
            submit_enabled: !busy,
            error,
            cards,
            dirty: self.dirty,
        }
    }

    /// Returns whether anything changed since the last call, and resets the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub(crate) fn set_query(&mut self, query: String) {
        self.query = query;
    }

    /// Enters Loading for a fresh request and clears the previous outcome.
    ///
    /// Returns the new id and the id it supersedes, if one was in flight.
    pub(crate) fn begin_request(&mut self) -> (RequestId, Option<RequestId>) {
        self.last_issued += 1;
        let superseded = self.in_flight.replace(self.last_issued);
        self.outcome = LastOutcome::Nothing;
        (self.last_issued, superseded)
    }

    /// Applies a settled request. Returns false when the id is stale.
    pub(crate) fn settle_request(&mut self, request_id: RequestId, outcome: RequestOutcome) -> bool {
        if self.in_flight != Some(request_id) {
            return false;
        }
        self.in_flight = None;
        self.outcome = match outcome {
            RequestOutcome::Recommended(titles) => LastOutcome::Titles(titles),
            RequestOutcome::Failed(reason) => LastOutcome::Error(reason.user_message()),
        };
        true
    }
}
