use crate::RequestState;

pub const HEADING: &str = "Movie Recommender";
pub const RESULTS_HEADING: &str = "Recommended Movies";
pub const INPUT_PLACEHOLDER: &str = "e.g. action, sci-fi, romantic thrillers";
pub const SUBMIT_LABEL_IDLE: &str = "Get Recommendations";
pub const SUBMIT_LABEL_BUSY: &str = "Finding...";
pub const SERVER_ERROR_MESSAGE: &str = "Server error";
pub const GENERIC_FAILURE_MESSAGE: &str = "Something went wrong";

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub query: String,
    pub request_state: RequestState,
    pub busy: bool,
    pub submit_label: &'static str,
    pub submit_enabled: bool,
    pub error: Option<String>,
    /// Result cards in response order. Empty unless the last request succeeded.
    pub cards: Vec<MovieCardView>,
    pub dirty: bool,
}

impl AppViewModel {
    /// The result grid is only shown when there is at least one title.
    pub fn shows_results(&self) -> bool {
        !self.cards.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MovieCardView {
    /// Position in the response; cards are keyed by it.
    pub index: usize,
    pub title: String,
}
