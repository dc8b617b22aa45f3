use crate::RequestId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// POST the query to the recommendation endpoint.
    SendRequest { request_id: RequestId, query: String },
    /// Abandon a superseded in-flight request.
    CancelRequest { request_id: RequestId },
}
