//! The authenticated actor a decision is made for.
//!
//! A `Principal` is built once per request from identity data that upstream
//! has already verified, and is only ever borrowed by the engine.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::constants::{
    HEADER_ASSIGNMENTS, HEADER_DELEGATED_SCOPES, HEADER_PERMISSIONS, HEADER_ROLES, HEADER_USER_ID,
};
use crate::error::{Error, Result};
use crate::graph::RoleGraph;
use crate::ident::{collect_ids, PermissionId, PrincipalId, ResourceId, RoleId, ScopeTag};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    pub id: PrincipalId,
    /// Roles held directly.
    #[serde(default)]
    pub roles: BTreeSet<RoleId>,
    /// Permissions held directly, independent of roles.
    #[serde(default)]
    pub permissions: BTreeSet<PermissionId>,
    /// Resources explicitly granted to this principal.
    #[serde(default)]
    pub direct_assignments: BTreeSet<ResourceId>,
    /// Scopes this principal administers as a delegated administrator.
    #[serde(default)]
    pub delegated_scopes: BTreeSet<ScopeTag>,
    #[serde(default)]
    pub is_superuser: bool,
}

impl Principal {
    pub fn new(id: impl AsRef<str>) -> Result<Self> {
        Ok(Principal {
            id: PrincipalId::new(id)?,
            roles: BTreeSet::new(),
            permissions: BTreeSet::new(),
            direct_assignments: BTreeSet::new(),
            delegated_scopes: BTreeSet::new(),
            is_superuser: false,
        })
    }

    pub fn with_roles<I, S>(mut self, roles: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.roles.extend(collect_ids::<RoleId, _, _>(roles)?);
        Ok(self)
    }

    pub fn with_permissions<I, S>(mut self, permissions: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.permissions
            .extend(collect_ids::<PermissionId, _, _>(permissions)?);
        Ok(self)
    }

    pub fn with_assignments<I, S>(mut self, resources: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.direct_assignments
            .extend(collect_ids::<ResourceId, _, _>(resources)?);
        Ok(self)
    }

    pub fn with_delegated_scopes<I, S>(mut self, scopes: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.delegated_scopes
            .extend(collect_ids::<ScopeTag, _, _>(scopes)?);
        Ok(self)
    }

    pub fn superuser(mut self) -> Self {
        self.is_superuser = true;
        self
    }

    #[inline]
    pub fn has_role(&self, role: &str) -> bool {
        self.roles.contains(role)
    }

    /// True when at least one of `roles` is held.
    pub fn has_any_role<'a, I>(&self, roles: I) -> bool
    where
        I: IntoIterator<Item = &'a RoleId>,
    {
        roles.into_iter().any(|r| self.roles.contains(r))
    }

    /// True when every one of `permissions` is held.
    pub fn has_all_permissions<'a, I>(&self, permissions: I) -> bool
    where
        I: IntoIterator<Item = &'a PermissionId>,
    {
        permissions.into_iter().all(|p| self.permissions.contains(p))
    }

    /// Replace the permission set with direct permissions plus everything the
    /// held roles grant according to `graph`.
    pub fn with_role_permissions(mut self, graph: &RoleGraph) -> Self {
        self.permissions = graph.effective_permissions(&self);
        self
    }

    /// Build a principal from identity headers set by an authenticating proxy.
    ///
    /// Header names match case-insensitively. List headers are comma separated;
    /// blank tokens are dropped and repeated headers accumulate. A missing,
    /// blank or repeated `x-user-id` fails with [`Error::InvalidInput`].
    pub fn from_headers<I, K, V>(headers: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut id: Option<String> = None;
        let mut roles: Vec<String> = Vec::new();
        let mut permissions = Vec::new();
        let mut assignments = Vec::new();
        let mut scopes = Vec::new();

        for (name, value) in headers {
            let name = name.as_ref().trim().to_ascii_lowercase();
            let value = value.as_ref();
            match name.as_str() {
                HEADER_USER_ID => {
                    if id.is_some() {
                        return Err(Error::invalid("ambiguous user credentials"));
                    }
                    id = Some(value.trim().to_owned());
                }
                HEADER_ROLES => roles.extend(split_csv(value).map(str::to_owned)),
                HEADER_PERMISSIONS => permissions.extend(split_csv(value).map(str::to_owned)),
                HEADER_ASSIGNMENTS => assignments.extend(split_csv(value).map(str::to_owned)),
                HEADER_DELEGATED_SCOPES => scopes.extend(split_csv(value).map(str::to_owned)),
                _ => {}
            }
        }

        let id = id
            .filter(|s| !s.is_empty())
            .ok_or_else(|| Error::invalid("missing user credentials"))?;

        Principal::new(id)?
            .with_roles(roles)?
            .with_permissions(permissions)?
            .with_assignments(assignments)?
            .with_delegated_scopes(scopes)
    }
}

fn split_csv(raw: &str) -> impl Iterator<Item = &str> {
    raw.split(',').map(str::trim).filter(|t| !t.is_empty())
}
