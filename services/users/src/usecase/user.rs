use chrono::Utc;
use uuid::Uuid;

use nimbus_domain::user::UserRole;

use crate::domain::permission::PermissionPort;
use crate::domain::query::{UserFilter, UserQuery};
use crate::domain::repository::{PasswordEncryptor, UserRepository};
use crate::domain::types::{Requester, User, UserListing};
use crate::error::UsersServiceError;

// ── CreateUser ───────────────────────────────────────────────────────────────

pub struct CreateUserInput {
    pub name: String,
    pub email: String,
    pub password: String,
    /// Ignored on purpose: self-registration can never pick a role.
    pub role: Option<UserRole>,
}

pub struct CreateUserUseCase<R: UserRepository, E: PasswordEncryptor> {
    pub repo: R,
    pub encryptor: E,
}

impl<R: UserRepository, E: PasswordEncryptor> CreateUserUseCase<R, E> {
    /// Register a new account. The email pre-check is best effort; the unique
    /// index on `users.email` rejects the loser of a concurrent duplicate.
    pub async fn execute(&self, input: CreateUserInput) -> Result<User, UsersServiceError> {
        if self.has_user_with_email(&input.email).await? {
            return Err(UsersServiceError::EmailAlreadyRegistered);
        }

        let password = self.encryptor.encrypt(&input.password)?;
        let now = Utc::now();
        let user = User {
            id: Uuid::now_v7(),
            name: input.name,
            email: input.email,
            password,
            role: UserRole::Common,
            created_at: now,
            updated_at: now,
        };
        self.repo.create(&user).await
    }

    /// Existence probe by exact email match. No side effects.
    pub async fn has_user_with_email(&self, email: &str) -> Result<bool, UsersServiceError> {
        Ok(self.repo.find_by_email(email).await?.is_some())
    }
}

// ── GetUser ──────────────────────────────────────────────────────────────────

pub struct GetUserUseCase<R: UserRepository, P: PermissionPort> {
    pub repo: R,
    pub permissions: P,
}

impl<R: UserRepository, P: PermissionPort> GetUserUseCase<R, P> {
    /// Fetch the user the query targets. The permission decision happens
    /// before the repository is touched; a denied requester learns nothing
    /// about whether the target exists.
    pub async fn execute(
        &self,
        query: &UserQuery,
        requester: Option<&Requester>,
    ) -> Result<User, UsersServiceError> {
        let id = query.target_id().ok_or(UsersServiceError::MissingTargetId)?;
        if !self.permissions.has_permission(requester, id) {
            return Err(UsersServiceError::Forbidden);
        }

        self.repo
            .find_one(query)
            .await?
            .ok_or(UsersServiceError::UserNotFound { id })
    }
}

// ── GetMe ────────────────────────────────────────────────────────────────────

pub struct GetMeUseCase<R: UserRepository> {
    pub repo: R,
}

impl<R: UserRepository> GetMeUseCase<R> {
    /// Fetch the requester's own account. The query is pinned to the
    /// requester's id on top of whatever clauses it already carries, so no
    /// permission lookup is needed.
    pub async fn execute(
        &self,
        mut query: UserQuery,
        requester: &Requester,
    ) -> Result<User, UsersServiceError> {
        query.push_filter(UserFilter::Id(requester.id));

        self.repo
            .find_one(&query)
            .await?
            .ok_or(UsersServiceError::UserNotFound { id: requester.id })
    }
}

// ── ListUsers ────────────────────────────────────────────────────────────────

pub struct ListUsersUseCase<R: UserRepository, P: PermissionPort> {
    pub repo: R,
    pub permissions: P,
}

impl<R: UserRepository, P: PermissionPort> ListUsersUseCase<R, P> {
    /// Fetch every user the query matches. All-or-nothing authorization: one
    /// denied entity fails the whole call, never a silently filtered page.
    pub async fn execute(
        &self,
        query: &UserQuery,
        requester: Option<&Requester>,
    ) -> Result<UserListing, UsersServiceError> {
        let listing = self.repo.find_many(query).await?;

        let permitted = listing
            .users()
            .all(|user| self.permissions.has_permission(requester, user.id));
        if !permitted {
            return Err(UsersServiceError::Forbidden);
        }

        Ok(listing)
    }
}
