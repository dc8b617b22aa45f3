#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// User edited the genre/preference input.
    QueryChanged(String),
    /// User submitted the current input.
    Submitted,
    /// The engine settled a request, successfully or not.
    ResponseReceived {
        request_id: crate::RequestId,
        outcome: crate::RequestOutcome,
    },
    /// UI/render tick to coalesce rendering.
    Tick,
    /// Fallback for placeholder wiring.
    NoOp,
}
