//! The authenticated caller, as resolved by the transport layer.
//!
//! The ledger never sees credentials. Whatever authenticates the request
//! (HTTP Basic auth today) resolves a [`Principal`] and passes it into every
//! write operation, which stamps the creator identity from it.

use serde::{Deserialize, Serialize};

use crate::LedgerError;

/// Role of an authenticated user.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    User,
    Admin,
}

impl Role {
    /// Returns the canonical role string stored in the database.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Admin => "admin",
        }
    }
}

impl TryFrom<&str> for Role {
    type Error = LedgerError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "user" => Ok(Self::User),
            "admin" => Ok(Self::Admin),
            other => Err(LedgerError::Validation(format!("invalid role: {other}"))),
        }
    }
}

/// An authenticated caller.
///
/// Purchases stamp `full_name` as the creator while work payments stamp
/// `email`; both fields are therefore required.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Principal {
    pub email: String,
    pub full_name: String,
    pub role: Role,
}

impl Principal {
    /// Fails with [`LedgerError::Forbidden`] unless the caller is an admin.
    pub fn require_admin(&self) -> Result<(), LedgerError> {
        match self.role {
            Role::Admin => Ok(()),
            Role::User => Err(LedgerError::Forbidden(
                "admin role required".to_string(),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_round_trips() {
        assert_eq!(Role::try_from("admin").unwrap(), Role::Admin);
        assert_eq!(Role::try_from(Role::User.as_str()).unwrap(), Role::User);
        assert!(Role::try_from("root").is_err());
    }

    #[test]
    fn admin_gate() {
        let admin = Principal {
            email: "a@site.test".to_string(),
            full_name: "A".to_string(),
            role: Role::Admin,
        };
        assert!(admin.require_admin().is_ok());

        let user = Principal {
            role: Role::User,
            ..admin
        };
        assert!(user.require_admin().is_err());
    }
}
