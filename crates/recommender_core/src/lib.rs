//! Recommender core: pure state machine and view-model helpers for the
//! recommendation form.
mod effect;
mod msg;
mod state;
mod update;
mod view_model;

pub use effect::Effect;
pub use msg::Msg;
pub use state::{AppState, FailureReason, RequestId, RequestOutcome, RequestState};
pub use update::update;
pub use view_model::{
    AppViewModel, MovieCardView, GENERIC_FAILURE_MESSAGE, HEADING, INPUT_PLACEHOLDER,
    RESULTS_HEADING, SERVER_ERROR_MESSAGE, SUBMIT_LABEL_BUSY, SUBMIT_LABEL_IDLE,
};
