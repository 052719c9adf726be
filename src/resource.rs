//! Normalized view of a document or folder.
//!
//! Only the attributes the policy reads live here; titles, versions, storage
//! paths and the rest stay with the caller's own models.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::ident::{collect_ids, PermissionId, PrincipalId, ResourceId, RoleId, ScopeTag};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Visibility {
    /// Visible to every principal.
    Public,
    /// Visible through grants, roles, permissions or scope delegation.
    Restricted,
    /// Visible to the owner only.
    OwnerOnly,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
    #[default]
    Document,
    Folder,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceDescriptor {
    pub id: ResourceId,
    #[serde(default)]
    pub kind: ResourceKind,
    pub owner_id: PrincipalId,
    pub visibility: Visibility,
    /// Explicit allow-list, consulted for `Restricted` resources.
    #[serde(default)]
    pub allowed_principal_ids: BTreeSet<PrincipalId>,
    /// Holding any one of these roles is enough.
    #[serde(default)]
    pub required_roles: BTreeSet<RoleId>,
    /// All of these permissions must be held.
    #[serde(default)]
    pub required_permissions: BTreeSet<PermissionId>,
    #[serde(default)]
    pub scope_tag: Option<ScopeTag>,
}

impl ResourceDescriptor {
    pub fn new(id: impl AsRef<str>, owner_id: impl AsRef<str>, visibility: Visibility) -> Result<Self> {
        Ok(ResourceDescriptor {
            id: ResourceId::new(id)?,
            kind: ResourceKind::Document,
            owner_id: PrincipalId::new(owner_id)?,
            visibility,
            allowed_principal_ids: BTreeSet::new(),
            required_roles: BTreeSet::new(),
            required_permissions: BTreeSet::new(),
            scope_tag: None,
        })
    }

    /// Shorthand for a `Restricted` document.
    pub fn restricted(id: impl AsRef<str>, owner_id: impl AsRef<str>) -> Result<Self> {
        Self::new(id, owner_id, Visibility::Restricted)
    }

    pub fn folder(mut self) -> Self {
        self.kind = ResourceKind::Folder;
        self
    }

    pub fn allow<I, S>(mut self, principals: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.allowed_principal_ids
            .extend(collect_ids::<PrincipalId, _, _>(principals)?);
        Ok(self)
    }

    pub fn require_roles<I, S>(mut self, roles: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.required_roles.extend(collect_ids::<RoleId, _, _>(roles)?);
        Ok(self)
    }

    pub fn require_permissions<I, S>(mut self, permissions: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.required_permissions
            .extend(collect_ids::<PermissionId, _, _>(permissions)?);
        Ok(self)
    }

    pub fn scoped(mut self, tag: impl AsRef<str>) -> Result<Self> {
        self.scope_tag = Some(ScopeTag::new(tag)?);
        Ok(self)
    }

    #[inline]
    pub fn is_owned_by(&self, principal: &PrincipalId) -> bool {
        self.owner_id == *principal
    }
}
