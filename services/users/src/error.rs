use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use uuid::Uuid;

/// Users service domain error variants.
#[derive(Debug, thiserror::Error)]
pub enum UsersServiceError {
    #[error("user {id} not found")]
    UserNotFound { id: Uuid },
    #[error("an user with this email was already registered")]
    EmailAlreadyRegistered,
    #[error("forbidden")]
    Forbidden,
    #[error("query does not target a single user")]
    MissingTargetId,
    #[error("invalid query")]
    InvalidQuery,
    #[error("internal error")]
    Internal(#[from] anyhow::Error),
}

impl UsersServiceError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::UserNotFound { .. } => "USER_NOT_FOUND",
            Self::EmailAlreadyRegistered => "EMAIL_ALREADY_REGISTERED",
            Self::Forbidden => "FORBIDDEN",
            Self::MissingTargetId => "MISSING_TARGET_ID",
            Self::InvalidQuery => "INVALID_QUERY",
            Self::Internal(_) => "INTERNAL",
        }
    }
}

impl IntoResponse for UsersServiceError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::UserNotFound { .. } => StatusCode::NOT_FOUND,
            Self::EmailAlreadyRegistered | Self::MissingTargetId | Self::InvalidQuery => {
                StatusCode::BAD_REQUEST
            }
            Self::Forbidden => StatusCode::FORBIDDEN,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        // Log 500s only — tower-http TraceLayer already records method/uri/status
        // for all requests, and 4xx are expected client errors.
        if let Self::Internal(ref e) = self {
            tracing::error!(error = %e, kind = "INTERNAL", "internal error");
        }
        let body = serde_json::json!({
            "kind": self.kind(),
            "message": self.to_string(),
        });
        (status, axum::Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;
    use axum::response::IntoResponse;

    async fn assert_error(
        error: UsersServiceError,
        expected_status: StatusCode,
        expected_kind: &str,
        expected_message: &str,
    ) {
        let resp = error.into_response();
        assert_eq!(resp.status(), expected_status);
        let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(json["kind"], expected_kind);
        assert_eq!(json["message"], expected_message);
    }

    #[tokio::test]
    async fn should_return_user_not_found_with_id() {
        let id = Uuid::nil();
        assert_error(
            UsersServiceError::UserNotFound { id },
            StatusCode::NOT_FOUND,
            "USER_NOT_FOUND",
            &format!("user {id} not found"),
        )
        .await;
    }

    #[tokio::test]
    async fn should_return_email_already_registered() {
        assert_error(
            UsersServiceError::EmailAlreadyRegistered,
            StatusCode::BAD_REQUEST,
            "EMAIL_ALREADY_REGISTERED",
            "an user with this email was already registered",
        )
        .await;
    }

    #[tokio::test]
    async fn should_return_forbidden_without_entity_details() {
        assert_error(
            UsersServiceError::Forbidden,
            StatusCode::FORBIDDEN,
            "FORBIDDEN",
            "forbidden",
        )
        .await;
    }

    #[tokio::test]
    async fn should_return_missing_target_id() {
        assert_error(
            UsersServiceError::MissingTargetId,
            StatusCode::BAD_REQUEST,
            "MISSING_TARGET_ID",
            "query does not target a single user",
        )
        .await;
    }

    #[tokio::test]
    async fn should_return_invalid_query() {
        assert_error(
            UsersServiceError::InvalidQuery,
            StatusCode::BAD_REQUEST,
            "INVALID_QUERY",
            "invalid query",
        )
        .await;
    }

    #[tokio::test]
    async fn should_return_internal() {
        assert_error(
            UsersServiceError::Internal(anyhow::anyhow!("db error")),
            StatusCode::INTERNAL_SERVER_ERROR,
            "INTERNAL",
            "internal error",
        )
        .await;
    }
}
