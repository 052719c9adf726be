//! Typed outcome of a policy evaluation

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// What the caller wants to do with a resource
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    View,
    Edit,
}

/// Which rule produced a decision
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Reason {
    PublicMatch,
    OwnerMatch,
    ExplicitGrant,
    RoleMatch,
    PermissionMatch,
    ScopeDelegation,
    SuperuserBypass,
    DelegationEdge,
    SelfAssignment,
    Denied,
}

impl Reason {
    pub fn as_str(&self) -> &'static str {
        match self {
            Reason::PublicMatch => "public_match",
            Reason::OwnerMatch => "owner_match",
            Reason::ExplicitGrant => "explicit_grant",
            Reason::RoleMatch => "role_match",
            Reason::PermissionMatch => "permission_match",
            Reason::ScopeDelegation => "scope_delegation",
            Reason::SuperuserBypass => "superuser_bypass",
            Reason::DelegationEdge => "delegation_edge",
            Reason::SelfAssignment => "self_assignment",
            Reason::Denied => "denied",
        }
    }
}

impl fmt::Display for Reason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Decision {
    pub allowed: bool,
    pub reason: Reason,
}

impl Decision {
    #[inline]
    pub const fn allow(reason: Reason) -> Self {
        Decision { allowed: true, reason }
    }

    #[inline]
    pub const fn deny() -> Self {
        Decision { allowed: false, reason: Reason::Denied }
    }

    #[inline]
    pub fn is_allowed(&self) -> bool {
        self.allowed
    }

    /// Convert to a boundary result. A denial becomes the generic
    /// [`Error::Forbidden`]; the reason stays server-side.
    pub fn into_result(self) -> Result<Reason> {
        if self.allowed {
            Ok(self.reason)
        } else {
            Err(Error::Forbidden)
        }
    }
}
