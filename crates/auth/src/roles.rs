use core::str::FromStr;

use serde::{Deserialize, Serialize};

/// Role attached to a user account.
///
/// Roles are a closed set here (unlike a permission catalog): route-level
/// capability checks are expressed as "role must be one of ...".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    Customer,
    Sales,
    Storekeeper,
    Owner,
    SuperAdmin,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Customer => "customer",
            UserRole::Sales => "sales",
            UserRole::Storekeeper => "storekeeper",
            UserRole::Owner => "owner",
            UserRole::SuperAdmin => "super_admin",
        }
    }
}

impl core::fmt::Display for UserRole {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UserRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "customer" => Ok(UserRole::Customer),
            "sales" => Ok(UserRole::Sales),
            "storekeeper" => Ok(UserRole::Storekeeper),
            "owner" => Ok(UserRole::Owner),
            "super_admin" => Ok(UserRole::SuperAdmin),
            other => Err(format!("unknown role: {other}")),
        }
    }
}
