//! Role and permission model
//!
//! A closed tagged-variant over the four platform roles. Capability checks
//! are a pure function from (role, permission) so they can be unit-tested
//! without any request plumbing.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The four platform roles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Global operator, exempt from tenant filtering
    SuperAdmin,
    /// Tenant-scoped, full CRUD over menu/tables/staff/orders within tenant
    Admin,
    /// Tenant-scoped, read orders and transition status only
    Staff,
    /// Phone-identified, no administrative capability
    Customer,
}

impl Role {
    /// Whether this role carries no restaurant binding
    pub fn is_global(&self) -> bool {
        matches!(self, Role::SuperAdmin)
    }

    /// Whether this role authenticates with a password
    ///
    /// Customers authenticate purely by phone-match lookup and never
    /// carry a password hash.
    pub fn uses_password(&self) -> bool {
        !matches!(self, Role::Customer)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::SuperAdmin => "superadmin",
            Role::Admin => "admin",
            Role::Staff => "staff",
            Role::Customer => "customer",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "superadmin" => Ok(Role::SuperAdmin),
            "admin" => Ok(Role::Admin),
            "staff" => Ok(Role::Staff),
            "customer" => Ok(Role::Customer),
            other => Err(format!("unknown role: {}", other)),
        }
    }
}

/// Capabilities gated by role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Permission {
    /// Provision, update, disable restaurants
    ManageRestaurants,
    /// Menu item CRUD within tenant
    ManageMenu,
    /// Table CRUD and manual status override within tenant
    ManageTables,
    /// Staff account CRUD within tenant
    ManageStaff,
    /// Read orders within tenant
    ViewOrders,
    /// Drive the order status workflow
    UpdateOrderStatus,
    /// Tenant dashboard statistics
    ViewDashboard,
}

impl Role {
    /// Pure capability check
    ///
    /// Superadmin holds every permission; the tenant-scoped roles hold a
    /// fixed set each. Customers hold none — their capabilities flow through
    /// the session API, not through permissions.
    pub fn has_permission(&self, permission: Permission) -> bool {
        use Permission::*;
        match self {
            Role::SuperAdmin => true,
            Role::Admin => matches!(
                permission,
                ManageMenu | ManageTables | ManageStaff | ViewOrders | UpdateOrderStatus
                    | ViewDashboard
            ),
            Role::Staff => matches!(permission, ViewOrders | UpdateOrderStatus),
            Role::Customer => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use Permission::*;

    #[test]
    fn test_superadmin_has_everything() {
        for p in [
            ManageRestaurants,
            ManageMenu,
            ManageTables,
            ManageStaff,
            ViewOrders,
            UpdateOrderStatus,
            ViewDashboard,
        ] {
            assert!(Role::SuperAdmin.has_permission(p));
        }
    }

    #[test]
    fn test_admin_is_tenant_scoped() {
        assert!(Role::Admin.has_permission(ManageMenu));
        assert!(Role::Admin.has_permission(ManageTables));
        assert!(Role::Admin.has_permission(ManageStaff));
        assert!(Role::Admin.has_permission(ViewOrders));
        assert!(Role::Admin.has_permission(UpdateOrderStatus));
        assert!(!Role::Admin.has_permission(ManageRestaurants));
    }

    #[test]
    fn test_staff_orders_only() {
        assert!(Role::Staff.has_permission(ViewOrders));
        assert!(Role::Staff.has_permission(UpdateOrderStatus));
        assert!(!Role::Staff.has_permission(ManageMenu));
        assert!(!Role::Staff.has_permission(ManageTables));
        assert!(!Role::Staff.has_permission(ManageStaff));
        assert!(!Role::Staff.has_permission(ViewDashboard));
    }

    #[test]
    fn test_customer_has_nothing() {
        for p in [
            ManageRestaurants,
            ManageMenu,
            ManageTables,
            ManageStaff,
            ViewOrders,
            UpdateOrderStatus,
            ViewDashboard,
        ] {
            assert!(!Role::Customer.has_permission(p));
        }
    }

    #[test]
    fn test_role_round_trip() {
        for role in [Role::SuperAdmin, Role::Admin, Role::Staff, Role::Customer] {
            assert_eq!(role.as_str().parse::<Role>().unwrap(), role);
        }
        assert!("manager".parse::<Role>().is_err());
    }

    #[test]
    fn test_password_rules() {
        assert!(Role::Admin.uses_password());
        assert!(Role::Staff.uses_password());
        assert!(Role::SuperAdmin.uses_password());
        assert!(!Role::Customer.uses_password());
    }

    #[test]
    fn test_serde_lowercase() {
        assert_eq!(
            serde_json::to_string(&Role::SuperAdmin).unwrap(),
            "\"superadmin\""
        );
        let role: Role = serde_json::from_str("\"staff\"").unwrap();
        assert_eq!(role, Role::Staff);
    }
}
