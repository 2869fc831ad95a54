//! Query descriptor consumed by the user repository.
//!
//! Handlers parse the request into a `UserQuery`; usecases only read the
//! derived single-resource id and append conjunctive clauses, never the full
//! grammar.

use uuid::Uuid;

use nimbus_domain::pagination::PageRequest;
use nimbus_domain::user::UserRole;

/// One conjunctive filter clause.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserFilter {
    Id(Uuid),
    Email(String),
    Role(UserRole),
}

/// Filtering and pagination intent for a read operation. All filters are
/// ANDed together. A present `page` requests the paged response shape.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserQuery {
    pub filters: Vec<UserFilter>,
    pub page: Option<PageRequest>,
}

impl UserQuery {
    /// Descriptor targeting exactly one user by id.
    pub fn for_id(id: Uuid) -> Self {
        Self {
            filters: vec![UserFilter::Id(id)],
            page: None,
        }
    }

    /// The single-resource id this query targets, when it has one.
    pub fn target_id(&self) -> Option<Uuid> {
        self.filters.iter().find_map(|filter| match filter {
            UserFilter::Id(id) => Some(*id),
            _ => None,
        })
    }

    /// Append a clause, conjunctive with whatever is already present.
    pub fn push_filter(&mut self, filter: UserFilter) {
        self.filters.push(filter);
    }
}
