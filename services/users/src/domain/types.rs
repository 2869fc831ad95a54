use chrono::{DateTime, Utc};
use uuid::Uuid;

use nimbus_domain::pagination::Page;
use nimbus_domain::user::UserRole;

/// User account owned by the users service. `password` is always the argon2
/// PHC hash; the plaintext never leaves the create path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: UserRole,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// The authenticated caller of an operation, passed explicitly into every
/// usecase. Operations that tolerate anonymous callers take
/// `Option<&Requester>`; `None` always fails permission checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Requester {
    pub id: Uuid,
    pub role: UserRole,
}

/// Result of a multi-entity query: callers that ask for pagination get a
/// `Page` with totals, everyone else gets the bare sequence. The shape is
/// preserved end to end.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserListing {
    Items(Vec<User>),
    Paged(Page<User>),
}

impl UserListing {
    /// Iterate the contained users regardless of shape.
    pub fn users(&self) -> impl Iterator<Item = &User> {
        match self {
            Self::Items(items) => items.iter(),
            Self::Paged(page) => page.items.iter(),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Self::Items(items) => items.len(),
            Self::Paged(page) => page.items.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(id: Uuid) -> User {
        User {
            id,
            name: "alice".into(),
            email: "alice@example.com".into(),
            password: "$argon2id$stub".into(),
            role: UserRole::Common,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn should_iterate_users_across_both_listing_shapes() {
        let a = user(Uuid::now_v7());
        let b = user(Uuid::now_v7());

        let bare = UserListing::Items(vec![a.clone(), b.clone()]);
        let ids: Vec<_> = bare.users().map(|u| u.id).collect();
        assert_eq!(ids, vec![a.id, b.id]);

        let paged = UserListing::Paged(Page {
            items: vec![a.clone(), b.clone()],
            total: 2,
            page: 1,
            per_page: 25,
        });
        let ids: Vec<_> = paged.users().map(|u| u.id).collect();
        assert_eq!(ids, vec![a.id, b.id]);
        assert_eq!(paged.len(), 2);
        assert!(!paged.is_empty());
    }
}
