//! # Role Permissions
//!
//! Which role may perform which operation.
//!
//! ```text
//! ┌──────────────────────┬───────┬────────────┬──────────┐
//! │ Permission           │ Admin │ SalesAgent │ Customer │
//! ├──────────────────────┼───────┼────────────┼──────────┤
//! │ ManageAccounts       │   ✓   │            │          │
//! │ ViewReports          │   ✓   │            │          │
//! │ RemoveVehicle        │   ✓   │            │          │
//! │ AddVehicle           │       │     ✓      │          │
//! │ EditVehicle          │       │     ✓      │          │
//! │ BrowseInventory      │   ✓   │     ✓      │    ✓     │
//! │ Purchase             │       │            │    ✓     │
//! │ ViewOwnInvoices      │       │            │    ✓     │
//! └──────────────────────┴───────┴────────────┴──────────┘
//! ```
//!
//! Services do not check permissions; the caller that knows who is logged in
//! does, before invoking them.

use crate::types::Role;

/// An operation gated by role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Permission {
    /// Register any role, toggle `active`, remove accounts, list accounts.
    ManageAccounts,
    ViewReports,
    RemoveVehicle,
    AddVehicle,
    EditVehicle,
    /// List and search vehicles.
    BrowseInventory,
    Purchase,
    ViewOwnInvoices,
}

impl Role {
    /// Whether this role grants `permission`.
    pub fn allows(&self, permission: Permission) -> bool {
        use Permission::*;

        match self {
            Role::Admin => matches!(
                permission,
                ManageAccounts | ViewReports | RemoveVehicle | BrowseInventory
            ),
            Role::SalesAgent => matches!(permission, AddVehicle | EditVehicle | BrowseInventory),
            Role::Customer => matches!(permission, BrowseInventory | Purchase | ViewOwnInvoices),
        }
    }

    /// Whether an actor with this role may create an account with `target`.
    ///
    /// `None` is self-registration, which only ever creates customers.
    pub fn can_register(actor: Option<Role>, target: Role) -> bool {
        match actor {
            None => target == Role::Customer,
            Some(role) => role.allows(Permission::ManageAccounts),
        }
    }
}
