use sea_orm::DatabaseConnection;

use crate::domain::permission::RolePermissions;
use crate::infra::db::DbUserRepository;
use crate::infra::password::Argon2Encryptor;

/// Shared application state passed to every handler via axum `State`.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
}

impl AppState {
    pub fn user_repo(&self) -> DbUserRepository {
        DbUserRepository {
            db: self.db.clone(),
        }
    }

    pub fn password_encryptor(&self) -> Argon2Encryptor {
        Argon2Encryptor
    }

    pub fn permissions(&self) -> RolePermissions {
        RolePermissions
    }
}
