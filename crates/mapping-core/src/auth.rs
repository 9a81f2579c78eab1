//! Sign-in checks.
//!
//! There is no user directory: any non-empty username and password are accepted, and an
//! ABHA sign-in only needs a well-formed id and a token. The resulting [`User`] is what the
//! caller shows as the signed-in identity.

use crate::error::ParseEnumError;
use coding_types::NonEmptyText;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Prefix every ABHA id must carry.
pub const ABHA_ID_PREFIX: &str = "ABHA-";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    Doctor,
    Admin,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Doctor => "doctor",
            Role::Admin => "admin",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "doctor" => Ok(Role::Doctor),
            "admin" => Ok(Role::Admin),
            _ => Err(ParseEnumError {
                kind: "role",
                value: s.to_string(),
                expected: "doctor, admin",
            }),
        }
    }
}

/// A signed-in user.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub username: NonEmptyText,
    pub role: Role,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub abha_id: Option<NonEmptyText>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub abha_token: Option<NonEmptyText>,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    #[error("Please enter username and password")]
    MissingCredentials,
    #[error("ABHA ID must start with 'ABHA-'")]
    InvalidAbhaId,
    #[error("Please enter your ABHA token")]
    MissingAbhaToken,
}

/// Sign in with a username and password.
///
/// # Errors
///
/// Returns [`AuthError::MissingCredentials`] if either value is blank.
pub fn login(username: &str, password: &str, role: Role) -> Result<User, AuthError> {
    let username = NonEmptyText::new(username).map_err(|_| AuthError::MissingCredentials)?;
    NonEmptyText::new(password).map_err(|_| AuthError::MissingCredentials)?;

    tracing::info!("user {} signed in as {}", username, role);
    Ok(User {
        username,
        role,
        abha_id: None,
        abha_token: None,
    })
}

/// Sign in with an ABHA id and token. ABHA users are always doctors.
///
/// # Errors
///
/// Returns [`AuthError::InvalidAbhaId`] if the id does not start with `ABHA-`, or
/// [`AuthError::MissingAbhaToken`] if the token is blank.
pub fn login_with_abha(abha_id: &str, token: &str) -> Result<User, AuthError> {
    let abha_id = NonEmptyText::new(abha_id)
        .ok()
        .filter(|id| id.as_str().starts_with(ABHA_ID_PREFIX))
        .ok_or(AuthError::InvalidAbhaId)?;
    let token = NonEmptyText::new(token).map_err(|_| AuthError::MissingAbhaToken)?;

    tracing::info!("ABHA user {} signed in", abha_id);
    Ok(User {
        username: abha_id.clone(),
        role: Role::Doctor,
        abha_id: Some(abha_id),
        abha_token: Some(token),
    })
}
