use axum::{
    Json,
    extract::{Path, RawQuery, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use nimbus_auth_types::identity::IdentityHeaders;
use nimbus_domain::pagination::PageRequest;
use nimbus_domain::user::UserRole;

use crate::domain::query::{UserFilter, UserQuery};
use crate::domain::types::{Requester, User, UserListing};
use crate::error::UsersServiceError;
use crate::state::AppState;
use crate::usecase::user::{
    CreateUserInput, CreateUserUseCase, GetMeUseCase, GetUserUseCase, ListUsersUseCase,
};

// ── Shared pieces ────────────────────────────────────────────────────────────

/// Turn gateway identity headers into a requester. Role bytes outside the
/// known set are refused rather than rounded to a valid role.
fn requester_from(identity: &IdentityHeaders) -> Result<Requester, UsersServiceError> {
    let role = UserRole::from_u8(identity.user_role).ok_or(UsersServiceError::Forbidden)?;
    Ok(Requester {
        id: identity.user_id,
        role,
    })
}

#[derive(Serialize)]
pub struct UserResponse {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: u8,
    #[serde(serialize_with = "nimbus_core::serde::to_rfc3339_ms")]
    pub created_at: chrono::DateTime<chrono::Utc>,
    #[serde(serialize_with = "nimbus_core::serde::to_rfc3339_ms")]
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl From<User> for UserResponse {
    // `password` stays out of every response on purpose.
    fn from(user: User) -> Self {
        Self {
            id: user.id.to_string(),
            name: user.name,
            email: user.email,
            role: user.role.as_u8(),
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

/// Filter/pagination query string for user reads.
#[derive(Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub struct UserListQuery {
    pub email: Option<String>,
    pub role: Option<u8>,
    pub per_page: Option<u32>,
    pub page: Option<u32>,
}

impl UserListQuery {
    fn parse(raw_query: Option<&str>) -> Result<Self, UsersServiceError> {
        raw_query
            .map(serde_qs::from_str)
            .transpose()
            .map_err(|_| UsersServiceError::InvalidQuery)
            .map(Option::unwrap_or_default)
    }

    /// Build the query descriptor. Pagination params present in any form
    /// request the paged response shape.
    fn into_query(self) -> Result<UserQuery, UsersServiceError> {
        let mut filters = Vec::new();
        if let Some(email) = self.email {
            filters.push(UserFilter::Email(email));
        }
        if let Some(byte) = self.role {
            let role = UserRole::from_u8(byte).ok_or(UsersServiceError::InvalidQuery)?;
            filters.push(UserFilter::Role(role));
        }
        let page = match (self.per_page, self.page) {
            (None, None) => None,
            (per_page, page) => Some(
                PageRequest {
                    per_page: per_page.unwrap_or(25),
                    page: page.unwrap_or(1),
                }
                .clamped(),
            ),
        };
        Ok(UserQuery { filters, page })
    }
}

// ── POST /users ──────────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct CreateUserRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    /// Accepted for wire compatibility, never honored.
    pub role: Option<u8>,
}

pub async fn create_user(
    State(state): State<AppState>,
    Json(body): Json<CreateUserRequest>,
) -> Result<(StatusCode, Json<UserResponse>), UsersServiceError> {
    let usecase = CreateUserUseCase {
        repo: state.user_repo(),
        encryptor: state.password_encryptor(),
    };
    let user = usecase
        .execute(CreateUserInput {
            name: body.name,
            email: body.email,
            password: body.password,
            role: body.role.and_then(UserRole::from_u8),
        })
        .await?;
    Ok((StatusCode::CREATED, Json(user.into())))
}

// ── GET /users ───────────────────────────────────────────────────────────────

#[derive(Serialize)]
#[serde(untagged)]
pub enum UserListResponse {
    Items(Vec<UserResponse>),
    Paged {
        items: Vec<UserResponse>,
        total: u64,
        page: u32,
        per_page: u32,
    },
}

impl From<UserListing> for UserListResponse {
    fn from(listing: UserListing) -> Self {
        match listing {
            UserListing::Items(items) => {
                Self::Items(items.into_iter().map(UserResponse::from).collect())
            }
            UserListing::Paged(page) => Self::Paged {
                items: page.items.into_iter().map(UserResponse::from).collect(),
                total: page.total,
                page: page.page,
                per_page: page.per_page,
            },
        }
    }
}

pub async fn get_users(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    RawQuery(raw_query): RawQuery,
) -> Result<Json<UserListResponse>, UsersServiceError> {
    let requester = requester_from(&identity)?;
    let query = UserListQuery::parse(raw_query.as_deref())?.into_query()?;

    let usecase = ListUsersUseCase {
        repo: state.user_repo(),
        permissions: state.permissions(),
    };
    let listing = usecase.execute(&query, Some(&requester)).await?;
    Ok(Json(listing.into()))
}

// ── GET /users/@me ───────────────────────────────────────────────────────────

pub async fn get_me(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    RawQuery(raw_query): RawQuery,
) -> Result<Json<UserResponse>, UsersServiceError> {
    let requester = requester_from(&identity)?;
    let query = UserListQuery::parse(raw_query.as_deref())?.into_query()?;

    let usecase = GetMeUseCase {
        repo: state.user_repo(),
    };
    let user = usecase.execute(query, &requester).await?;
    Ok(Json(user.into()))
}

// ── GET /users/{id} ──────────────────────────────────────────────────────────

pub async fn get_user(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<UserResponse>, UsersServiceError> {
    let requester = requester_from(&identity)?;
    let query = UserQuery::for_id(id);

    let usecase = GetUserUseCase {
        repo: state.user_repo(),
        permissions: state.permissions(),
    };
    let user = usecase.execute(&query, Some(&requester)).await?;
    Ok(Json(user.into()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_parse_filters_from_query_string() {
        let parsed = UserListQuery::parse(Some("email=a%40example.com&role=1")).unwrap();
        let query = parsed.into_query().unwrap();
        assert_eq!(query.filters.len(), 2);
        assert!(query.page.is_none());
    }

    #[test]
    fn should_request_paged_shape_when_any_pagination_param_present() {
        let query = UserListQuery {
            page: Some(2),
            ..Default::default()
        }
        .into_query()
        .unwrap();
        let page = query.page.unwrap();
        assert_eq!(page.page, 2);
        assert_eq!(page.per_page, 25);

        let query = UserListQuery {
            per_page: Some(200),
            ..Default::default()
        }
        .into_query()
        .unwrap();
        assert_eq!(query.page.unwrap().per_page, 100);
    }

    #[test]
    fn should_keep_bare_shape_without_pagination_params() {
        let query = UserListQuery::default().into_query().unwrap();
        assert!(query.page.is_none());
    }

    #[test]
    fn should_reject_unknown_role_filter() {
        let result = UserListQuery {
            role: Some(9),
            ..Default::default()
        }
        .into_query();
        assert!(matches!(result, Err(UsersServiceError::InvalidQuery)));
    }

    #[test]
    fn should_refuse_unknown_identity_role_byte() {
        let identity = IdentityHeaders {
            user_id: Uuid::now_v7(),
            user_role: 9,
        };
        assert!(matches!(
            requester_from(&identity),
            Err(UsersServiceError::Forbidden)
        ));
    }

    #[test]
    fn should_build_requester_from_identity() {
        let identity = IdentityHeaders {
            user_id: Uuid::now_v7(),
            user_role: 1,
        };
        let requester = requester_from(&identity).unwrap();
        assert_eq!(requester.id, identity.user_id);
        assert_eq!(requester.role, UserRole::Admin);
    }
}
