//! User roles and their wire-format mapping.

use serde::{Deserialize, Serialize};

/// Coarse permission tier gating access to route groups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    /// Full access including management of other admins.
    SuperAdmin,
    /// Full access to store management features.
    Admin,
    /// Order and product management only.
    Manager,
    /// Delivery assignment screens only.
    DeliveryAgent,
    /// Public storefront account.
    Customer,
}

impl Role {
    /// Map a wire-format role tag (e.g. `"ROLE_ADMIN"`) to a [`Role`].
    ///
    /// The backend reports roles as namespaced Spring Security authority
    /// strings. The mapping is evaluated once at the session boundary so the
    /// internal model never carries string-shaped roles. Unknown tags map to
    /// `None` rather than failing - a malformed auth payload must never
    /// crash the client.
    #[must_use]
    pub fn from_wire(tag: &str) -> Option<Self> {
        match tag {
            "ROLE_SUPER_ADMIN" => Some(Self::SuperAdmin),
            "ROLE_ADMIN" => Some(Self::Admin),
            "ROLE_MANAGER" => Some(Self::Manager),
            "ROLE_DELIVERY_AGENT" => Some(Self::DeliveryAgent),
            "ROLE_CUSTOMER" => Some(Self::Customer),
            _ => None,
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::SuperAdmin => write!(f, "SUPER_ADMIN"),
            Self::Admin => write!(f, "ADMIN"),
            Self::Manager => write!(f, "MANAGER"),
            Self::DeliveryAgent => write!(f, "DELIVERY_AGENT"),
            Self::Customer => write!(f, "CUSTOMER"),
        }
    }
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "SUPER_ADMIN" => Ok(Self::SuperAdmin),
            "ADMIN" => Ok(Self::Admin),
            "MANAGER" => Ok(Self::Manager),
            "DELIVERY_AGENT" => Ok(Self::DeliveryAgent),
            "CUSTOMER" => Ok(Self::Customer),
            _ => Err(format!("invalid role: {s}")),
        }
    }
}
