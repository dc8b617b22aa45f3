use crate::{AppState, Effect, Msg};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::QueryChanged(text) => {
            // Edits never touch the in-flight request; it already owns its query.
            if text != state.query() {
                state.set_query(text);
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::Submitted => {
            // Required field: an empty query never leaves the form.
            if state.query().is_empty() {
                return (state, Vec::new());
            }
            let query = state.query().to_string();
            let (request_id, superseded) = state.begin_request();
            state.mark_dirty();

            let mut effects = Vec::with_capacity(1 + usize::from(superseded.is_some()));
            if let Some(old) = superseded {
                effects.push(Effect::CancelRequest { request_id: old });
            }
            effects.push(Effect::SendRequest { request_id, query });
            effects
        }
        Msg::ResponseReceived {
            request_id,
            outcome,
        } => {
            if state.settle_request(request_id, outcome) {
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::Tick | Msg::NoOp => Vec::new(),
    };

    (state, effects)
}
