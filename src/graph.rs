//! Role delegation graph.
//!
//! Adjacency map from a role to the roles its holders may grant. Edges are
//! checked one hop at a time: A -> B and B -> C does not let a holder of A
//! grant C.
//!
//! The graph is validated once when built and never mutated afterwards.
//! Share it behind an `Arc`; see [`crate::snapshot::GraphHandle`] for
//! replacing it at runtime.

use std::collections::{BTreeSet, HashMap, HashSet};

use tracing::{info, warn};

use crate::error::{Error, Result};
use crate::ident::{PermissionId, RoleId};
use crate::principal::Principal;
use crate::roles::{Role, RoleCatalog};

#[derive(Debug, Clone, Default)]
pub struct RoleGraph {
    /// Role definitions indexed by id
    roles: HashMap<RoleId, Role>,
    /// role -> roles it may grant
    edges: HashMap<RoleId, HashSet<RoleId>>,
    edge_count: usize,
}

impl RoleGraph {
    /// Build from a full set of role definitions.
    ///
    /// Fails on duplicate ids and on any assignable role that is not itself
    /// defined. A role may list itself. Unnamed roles are named after their id.
    pub fn build<I>(roles: I) -> Result<Self>
    where
        I: IntoIterator<Item = Role>,
    {
        let mut index: HashMap<RoleId, Role> = HashMap::new();
        let mut order: Vec<RoleId> = Vec::new();
        for mut role in roles {
            if index.contains_key(&role.id) {
                warn!(role = %role.id, "duplicate role definition");
                return Err(Error::DuplicateRole { role: role.id.to_string() });
            }
            if role.name.is_empty() {
                role.name = role.id.to_string();
            }
            order.push(role.id.clone());
            index.insert(role.id.clone(), role);
        }

        let mut edges = HashMap::with_capacity(index.len());
        let mut edge_count = 0;
        // checked in catalog order
        for role in order.iter().filter_map(|id| index.get(id)) {
            for target in &role.assignable_roles {
                if !index.contains_key(target) {
                    warn!(role = %role.id, target = %target, "delegation edge to unknown role");
                    return Err(Error::UnknownRole {
                        role: target.to_string(),
                        referenced_by: role.id.to_string(),
                    });
                }
            }
            edge_count += role.assignable_roles.len();
            edges.insert(
                role.id.clone(),
                role.assignable_roles.iter().cloned().collect::<HashSet<_>>(),
            );
        }

        info!(roles = index.len(), edges = edge_count, "role graph built");
        Ok(RoleGraph { roles: index, edges, edge_count })
    }

    pub fn from_catalog(catalog: RoleCatalog) -> Result<Self> {
        Self::build(catalog.roles)
    }

    /// Direct edge lookup. No transitive closure.
    #[inline]
    pub fn can_delegate(&self, from: &str, to: &str) -> bool {
        self.edges.get(from).is_some_and(|targets| targets.contains(to))
    }

    pub fn role(&self, id: &str) -> Option<&Role> {
        self.roles.get(id)
    }

    #[inline]
    pub fn contains(&self, id: &str) -> bool {
        self.roles.contains_key(id)
    }

    /// Roles that holders of `id` may grant, or `None` for an unknown role.
    pub fn assignable_from(&self, id: &str) -> Option<&HashSet<RoleId>> {
        self.edges.get(id)
    }

    /// Every role `principal` could grant to someone else through its own roles.
    pub fn grantable_by(&self, principal: &Principal) -> BTreeSet<RoleId> {
        principal
            .roles
            .iter()
            .filter_map(|r| self.edges.get(r))
            .flatten()
            .cloned()
            .collect()
    }

    /// Direct permissions plus the permissions of every held role the graph
    /// knows. Unknown held roles contribute nothing.
    pub fn effective_permissions(&self, principal: &Principal) -> BTreeSet<PermissionId> {
        let mut perms = principal.permissions.clone();
        for role in principal.roles.iter().filter_map(|r| self.roles.get(r)) {
            perms.extend(role.permissions.iter().cloned());
        }
        perms
    }

    pub fn roles(&self) -> impl Iterator<Item = &Role> {
        self.roles.values()
    }

    pub fn len(&self) -> usize {
        self.roles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.roles.is_empty()
    }

    pub fn edge_count(&self) -> usize {
        self.edge_count
    }
}
