use std::sync::Once;

use pretty_assertions::assert_eq;
use recommender_core::{
    update, AppState, Effect, FailureReason, Msg, RequestOutcome, RequestState,
    GENERIC_FAILURE_MESSAGE, SERVER_ERROR_MESSAGE, SUBMIT_LABEL_BUSY, SUBMIT_LABEL_IDLE,
};

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(recommender_logging::initialize_for_tests);
}

fn submit_query(state: AppState, input: &str) -> (AppState, Vec<Effect>) {
    let (state, _) = update(state, Msg::QueryChanged(input.to_string()));
    update(state, Msg::Submitted)
}

fn respond(state: AppState, request_id: u64, outcome: RequestOutcome) -> AppState {
    let (state, effects) = update(
        state,
        Msg::ResponseReceived {
            request_id,
            outcome,
        },
    );
    assert!(effects.is_empty());
    state
}

fn titles(view: &recommender_core::AppViewModel) -> Vec<String> {
    view.cards.iter().map(|card| card.title.clone()).collect()
}

#[test]
fn new_state_is_idle() {
    let view = AppState::new().view();

    assert_eq!(view.request_state, RequestState::Idle);
    assert!(!view.busy);
    assert!(view.submit_enabled);
    assert_eq!(view.submit_label, SUBMIT_LABEL_IDLE);
    assert_eq!(view.error, None);
    assert!(!view.shows_results());
}

#[test]
fn submit_enters_loading_and_emits_request() {
    init_logging();
    let (mut state, effects) = submit_query(AppState::new(), "sci-fi");
    let view = state.view();

    assert_eq!(view.request_state, RequestState::Loading);
    assert!(view.busy);
    assert!(!view.submit_enabled);
    assert_eq!(view.submit_label, SUBMIT_LABEL_BUSY);
    assert!(state.consume_dirty());
    assert_eq!(
        effects,
        vec![Effect::SendRequest {
            request_id: 1,
            query: "sci-fi".to_string(),
        }]
    );
}

#[test]
fn empty_query_is_not_submitted() {
    init_logging();
    let (mut state, effects) = update(AppState::new(), Msg::Submitted);

    assert!(effects.is_empty());
    assert_eq!(state.view().request_state, RequestState::Idle);
    assert!(!state.consume_dirty());
}

#[test]
fn loading_ends_after_every_outcome() {
    init_logging();
    let outcomes = vec![
        RequestOutcome::Recommended(vec!["A".to_string()]),
        RequestOutcome::Recommended(Vec::new()),
        RequestOutcome::Failed(FailureReason::Network),
        RequestOutcome::Failed(FailureReason::Parse),
        RequestOutcome::Failed(FailureReason::Server { message: None }),
    ];

    for outcome in outcomes {
        let (state, _) = submit_query(AppState::new(), "drama");
        assert!(state.view().busy);
        let state = respond(state, 1, outcome);
        assert!(!state.view().busy);
        assert!(state.view().submit_enabled);
    }
}

#[test]
fn successful_response_keeps_title_order() {
    init_logging();
    let (state, _) = submit_query(AppState::new(), "comedy");
    let state = respond(
        state,
        1,
        RequestOutcome::Recommended(vec!["A".to_string(), "B".to_string()]),
    );
    let view = state.view();

    assert_eq!(view.request_state, RequestState::Success);
    assert_eq!(titles(&view), vec!["A".to_string(), "B".to_string()]);
    assert_eq!(
        view.cards.iter().map(|card| card.index).collect::<Vec<_>>(),
        vec![0, 1]
    );
    assert_eq!(view.error, None);
}

#[test]
fn server_message_is_shown_verbatim() {
    init_logging();
    let (state, _) = submit_query(AppState::new(), "horror");
    let state = respond(
        state,
        1,
        RequestOutcome::Failed(FailureReason::Server {
            message: Some("overloaded".to_string()),
        }),
    );
    let view = state.view();

    assert_eq!(view.request_state, RequestState::Failed);
    assert_eq!(view.error.as_deref(), Some("overloaded"));
    assert!(!view.shows_results());
}

#[test]
fn server_failure_without_message_uses_fallback() {
    init_logging();
    for message in [None, Some(String::new())] {
        let (state, _) = submit_query(AppState::new(), "horror");
        let state = respond(
            state,
            1,
            RequestOutcome::Failed(FailureReason::Server { message }),
        );
        assert_eq!(state.view().error.as_deref(), Some(SERVER_ERROR_MESSAGE));
    }
}

#[test]
fn network_and_parse_failures_use_generic_message() {
    init_logging();
    for reason in [FailureReason::Network, FailureReason::Parse] {
        let (state, _) = submit_query(AppState::new(), "western");
        let state = respond(state, 1, RequestOutcome::Failed(reason));
        let view = state.view();
        assert_eq!(view.error.as_deref(), Some(GENERIC_FAILURE_MESSAGE));
        assert!(!GENERIC_FAILURE_MESSAGE.is_empty());
        assert!(!view.shows_results());
    }
}

#[test]
fn new_submission_clears_previous_error() {
    init_logging();
    let (state, _) = submit_query(AppState::new(), "noir");
    let state = respond(state, 1, RequestOutcome::Failed(FailureReason::Network));
    assert!(state.view().error.is_some());

    let (state, effects) = update(state, Msg::Submitted);
    let view = state.view();
    assert_eq!(view.error, None);
    assert!(!view.shows_results());
    assert_eq!(
        effects,
        vec![Effect::SendRequest {
            request_id: 2,
            query: "noir".to_string(),
        }]
    );
}

#[test]
fn results_are_replaced_not_merged() {
    init_logging();
    let (state, _) = submit_query(AppState::new(), "anime");
    let state = respond(
        state,
        1,
        RequestOutcome::Recommended(vec!["A".to_string(), "B".to_string()]),
    );
    let (state, _) = submit_query(state, "documentary");
    assert!(!state.view().shows_results());

    let state = respond(state, 2, RequestOutcome::Recommended(vec!["C".to_string()]));
    assert_eq!(titles(&state.view()), vec!["C".to_string()]);
}

#[test]
fn resubmitting_while_loading_cancels_previous_request() {
    init_logging();
    let (state, _) = submit_query(AppState::new(), "action");
    let (state, effects) = submit_query(state, "thriller");

    assert_eq!(
        effects,
        vec![
            Effect::CancelRequest { request_id: 1 },
            Effect::SendRequest {
                request_id: 2,
                query: "thriller".to_string(),
            },
        ]
    );
    assert_eq!(state.in_flight(), Some(2));
}

#[test]
fn stale_response_is_discarded() {
    init_logging();
    let (state, _) = submit_query(AppState::new(), "action");
    let (mut state, _) = submit_query(state, "thriller");
    assert!(state.consume_dirty());

    // The superseded request settles after the newer one was issued.
    let mut state = respond(
        state,
        1,
        RequestOutcome::Recommended(vec!["Old".to_string()]),
    );
    assert!(state.view().busy);
    assert!(!state.consume_dirty());

    let state = respond(state, 2, RequestOutcome::Recommended(vec!["New".to_string()]));
    assert_eq!(titles(&state.view()), vec!["New".to_string()]);

    // A late duplicate for a settled id changes nothing either.
    let before = state.clone();
    let state = respond(state, 1, RequestOutcome::Failed(FailureReason::Network));
    assert_eq!(state, before);
}

#[test]
fn editing_during_flight_does_not_touch_request() {
    init_logging();
    let (state, _) = submit_query(AppState::new(), "mystery");
    let (state, effects) = update(state, Msg::QueryChanged("mystery comedies".to_string()));

    assert!(effects.is_empty());
    assert_eq!(state.in_flight(), Some(1));
    assert_eq!(state.view().query, "mystery comedies");
    assert!(state.view().busy);
}

#[test]
fn identical_submissions_render_identically() {
    init_logging();
    let reply = || RequestOutcome::Recommended(vec!["Heat".to_string(), "Ronin".to_string()]);

    let (state, _) = submit_query(AppState::new(), "heist");
    let state = respond(state, 1, reply());
    let first = titles(&state.view());

    let (state, _) = update(state, Msg::Submitted);
    let state = respond(state, 2, reply());
    let second = titles(&state.view());

    assert_eq!(first, second);
}
