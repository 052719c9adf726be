//! Policy configuration.
//!
//! JSON document, every field optional:
//!
//! ```json
//! {
//!   "admin_roles": ["admin", "superadmin"],
//!   "delegated_admin_roles": ["sub_admin", "subadmin"],
//!   "self_assignment": "allow",
//!   "roles": [
//!     { "id": "subadmin", "name": "Sub-admin", "permissions": [], "assignable_roles": ["client"] },
//!     { "id": "client" }
//!   ]
//! }
//! ```
//!
//! Missing fields fall back to the defaults in [`crate::constants`] and the
//! seed catalog.

use std::collections::BTreeSet;
use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::delegation::{DelegationAuthorizer, SelfAssignment};
use crate::error::{Error, Result};
use crate::graph::RoleGraph;
use crate::ident::RoleId;
use crate::policy::AccessPolicy;
use crate::roles::RoleCatalog;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PolicyConfig {
    pub admin_roles: BTreeSet<RoleId>,
    pub delegated_admin_roles: BTreeSet<RoleId>,
    pub self_assignment: SelfAssignment,
    pub roles: RoleCatalog,
}

impl Default for PolicyConfig {
    fn default() -> Self {
        let policy = AccessPolicy::default();
        PolicyConfig {
            admin_roles: policy.admin_roles().clone(),
            delegated_admin_roles: policy.delegated_admin_roles().clone(),
            self_assignment: SelfAssignment::default(),
            roles: RoleCatalog::seed(),
        }
    }
}

impl PolicyConfig {
    pub fn from_json(text: &str) -> Result<Self> {
        serde_json::from_str(text).map_err(|e| {
            warn!(error = %e, "invalid policy configuration");
            Error::config(e.to_string())
        })
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| {
            warn!(path = %path.display(), error = %e, "cannot read policy configuration");
            Error::config(format!("{}: {}", path.display(), e))
        })?;
        Self::from_json(&text)
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| Error::config(e.to_string()))
    }

    /// Validate the role catalog and produce the engine and authorizer.
    /// Any configuration error here must stop startup.
    pub fn build(self) -> Result<(AccessPolicy, DelegationAuthorizer)> {
        let graph = Arc::new(RoleGraph::from_catalog(self.roles)?);
        let policy = AccessPolicy::new(self.admin_roles, self.delegated_admin_roles);
        let authorizer = DelegationAuthorizer::new(graph).with_self_assignment(self.self_assignment);
        Ok((policy, authorizer))
    }
}
