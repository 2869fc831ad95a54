use tower_http::request_id::{MakeRequestId, RequestId, SetRequestIdLayer};
use uuid::Uuid;

/// Request-id source: a fresh UUIDv7 per request, sortable in log storage.
#[derive(Clone, Default)]
pub struct MakeUuidRequestId;

impl MakeRequestId for MakeUuidRequestId {
    fn make_request_id<B>(&mut self, _request: &axum::http::Request<B>) -> Option<RequestId> {
        let id = Uuid::now_v7().to_string();
        id.parse().ok().map(RequestId::new)
    }
}

/// Build the request-id layer. Apply with `.layer(request_id_layer())` in router.
pub fn request_id_layer() -> SetRequestIdLayer<MakeUuidRequestId> {
    SetRequestIdLayer::new(
        axum::http::HeaderName::from_static("x-request-id"),
        MakeUuidRequestId,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_mint_a_parseable_request_id() {
        let request = axum::http::Request::builder().body(()).unwrap();
        let id = MakeUuidRequestId.make_request_id(&request);
        assert!(id.is_some());
    }
}
