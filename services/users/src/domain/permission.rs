//! Requester-permission decisions.

use uuid::Uuid;

use nimbus_domain::user::UserRole;

use crate::domain::types::Requester;

/// Pure decision: may `requester` act on the user identified by `target_id`?
///
/// Implementations must be side-effect free. An absent requester is always
/// denied (fail closed).
pub trait PermissionPort: Send + Sync {
    fn has_permission(&self, requester: Option<&Requester>, target_id: Uuid) -> bool;
}

/// Role-based rule: admins may act on any user, everyone else only on
/// themselves.
#[derive(Debug, Clone, Copy, Default)]
pub struct RolePermissions;

impl PermissionPort for RolePermissions {
    fn has_permission(&self, requester: Option<&Requester>, target_id: Uuid) -> bool {
        match requester {
            Some(requester) => requester.role >= UserRole::Admin || requester.id == target_id,
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_allow_admin_on_any_target() {
        let admin = Requester {
            id: Uuid::now_v7(),
            role: UserRole::Admin,
        };
        assert!(RolePermissions.has_permission(Some(&admin), Uuid::now_v7()));
        assert!(RolePermissions.has_permission(Some(&admin), admin.id));
    }

    #[test]
    fn should_allow_common_user_only_on_itself() {
        let requester = Requester {
            id: Uuid::now_v7(),
            role: UserRole::Common,
        };
        assert!(RolePermissions.has_permission(Some(&requester), requester.id));
        assert!(!RolePermissions.has_permission(Some(&requester), Uuid::now_v7()));
    }

    #[test]
    fn should_deny_absent_requester() {
        assert!(!RolePermissions.has_permission(None, Uuid::now_v7()));
    }
}
