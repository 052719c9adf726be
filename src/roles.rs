//! Role definitions and the catalog they are loaded from.
//!
//! A role carries two independent relations:
//! - `permissions`: what holders are allowed to do
//! - `assignable_roles`: which roles holders may grant to others
//!
//! Holding one never implies the other.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::constants::{SEED_CLIENT, SEED_SUBADMIN, SEED_SUPERADMIN};
use crate::error::Result;
use crate::ident::{collect_ids, PermissionId, RoleId};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
    pub id: RoleId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub permissions: BTreeSet<PermissionId>,
    #[serde(default)]
    pub assignable_roles: BTreeSet<RoleId>,
}

impl Role {
    /// New role with no permissions and no delegation rights. The name
    /// defaults to the id.
    pub fn new(id: impl AsRef<str>) -> Result<Self> {
        let id = RoleId::new(id)?;
        Ok(Role {
            name: id.to_string(),
            id,
            permissions: BTreeSet::new(),
            assignable_roles: BTreeSet::new(),
        })
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn grants_permissions<I, S>(mut self, permissions: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.permissions
            .extend(collect_ids::<PermissionId, _, _>(permissions)?);
        Ok(self)
    }

    pub fn can_assign<I, S>(mut self, roles: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.assignable_roles
            .extend(collect_ids::<RoleId, _, _>(roles)?);
        Ok(self)
    }
}

/// Ordered list of role definitions, as read from configuration
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoleCatalog {
    pub roles: Vec<Role>,
}

impl RoleCatalog {
    pub fn new(roles: Vec<Role>) -> Self {
        RoleCatalog { roles }
    }

    /// The three-tier seed set: superadmins manage sub-admins and clients,
    /// sub-admins manage clients, clients manage nobody.
    pub fn seed() -> Self {
        let role = |id: &str, name: &str, assigns: &[&str]| Role {
            id: RoleId::from_trusted(id),
            name: name.to_owned(),
            permissions: BTreeSet::new(),
            assignable_roles: assigns.iter().map(|r| RoleId::from_trusted(r)).collect(),
        };
        RoleCatalog::new(vec![
            role(SEED_SUPERADMIN, "Superadmin", &[SEED_SUBADMIN, SEED_CLIENT]),
            role(SEED_SUBADMIN, "Sub-admin", &[SEED_CLIENT]),
            role(SEED_CLIENT, "Client", &[]),
        ])
    }

    pub fn iter(&self) -> impl Iterator<Item = &Role> {
        self.roles.iter()
    }

    pub fn len(&self) -> usize {
        self.roles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.roles.is_empty()
    }
}

impl FromIterator<Role> for RoleCatalog {
    fn from_iter<T: IntoIterator<Item = Role>>(iter: T) -> Self {
        RoleCatalog::new(iter.into_iter().collect())
    }
}
