//! Access policy engine.
//!
//! Pure evaluator: `(Principal, ResourceDescriptor, Action) -> Decision`.
//! Holds only the role classification (which roles mark full and delegated
//! administrators) and is safe to share across threads.
//!
//! Visibility rules, first match wins:
//! 1. public resource                                   -> PublicMatch
//! 2. principal owns the resource                       -> OwnerMatch
//! 3. owner-only resource, not the owner                -> Denied
//! 4. direct assignment or on the allow-list            -> ExplicitGrant
//! 5. holds any required role                           -> RoleMatch
//! 6. holds every required permission                   -> PermissionMatch
//! 7. delegated admin and resource scope is delegated   -> ScopeDelegation
//! 8. otherwise                                         -> Denied
//!
//! Edit is narrower: owner, or full administrator bypass. Nothing else.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::constants::{DEFAULT_ADMIN_ROLES, DEFAULT_DELEGATED_ADMIN_ROLES};
use crate::decision::{Action, Decision, Reason};
use crate::error::{Error, Result};
use crate::ident::{collect_ids, PermissionId, RoleId};
use crate::principal::Principal;
use crate::resource::{ResourceDescriptor, Visibility};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessPolicy {
    /// Holders of any of these are full administrators.
    admin_roles: BTreeSet<RoleId>,
    /// Holders of any of these (and no admin role) are delegated administrators.
    delegated_admin_roles: BTreeSet<RoleId>,
}

impl Default for AccessPolicy {
    fn default() -> Self {
        AccessPolicy {
            admin_roles: DEFAULT_ADMIN_ROLES.iter().map(|r| RoleId::from_trusted(r)).collect(),
            delegated_admin_roles: DEFAULT_DELEGATED_ADMIN_ROLES
                .iter()
                .map(|r| RoleId::from_trusted(r))
                .collect(),
        }
    }
}

impl AccessPolicy {
    pub fn new(admin_roles: BTreeSet<RoleId>, delegated_admin_roles: BTreeSet<RoleId>) -> Self {
        AccessPolicy { admin_roles, delegated_admin_roles }
    }

    pub fn admin_roles(&self) -> &BTreeSet<RoleId> {
        &self.admin_roles
    }

    pub fn delegated_admin_roles(&self) -> &BTreeSet<RoleId> {
        &self.delegated_admin_roles
    }

    // ========================================================================
    // Principal classification
    // ========================================================================

    /// Superusers and holders of an admin role.
    pub fn is_full_admin(&self, principal: &Principal) -> bool {
        principal.is_superuser || principal.has_any_role(&self.admin_roles)
    }

    /// Holds a delegated-admin role and is not a full administrator.
    pub fn is_delegated_admin(&self, principal: &Principal) -> bool {
        principal.has_any_role(&self.delegated_admin_roles) && !self.is_full_admin(principal)
    }

    // ========================================================================
    // Resource decisions
    // ========================================================================

    pub fn evaluate_visibility(&self, principal: &Principal, resource: &ResourceDescriptor) -> Decision {
        let decision = self.visibility(principal, resource);
        debug!(
            principal = %principal.id,
            resource = %resource.id,
            action = "view",
            allowed = decision.allowed,
            reason = %decision.reason,
            "visibility decision"
        );
        decision
    }

    pub fn evaluate_edit(&self, principal: &Principal, resource: &ResourceDescriptor) -> Decision {
        let decision = self.edit(principal, resource);
        debug!(
            principal = %principal.id,
            resource = %resource.id,
            action = "edit",
            allowed = decision.allowed,
            reason = %decision.reason,
            "edit decision"
        );
        decision
    }

    pub fn evaluate(&self, principal: &Principal, resource: &ResourceDescriptor, action: Action) -> Decision {
        match action {
            Action::View => self.evaluate_visibility(principal, resource),
            Action::Edit => self.evaluate_edit(principal, resource),
        }
    }

    /// Resources visible to `principal`, in input order.
    pub fn filter_visible<'a, I>(&self, principal: &Principal, resources: I) -> Vec<&'a ResourceDescriptor>
    where
        I: IntoIterator<Item = &'a ResourceDescriptor>,
    {
        resources
            .into_iter()
            .filter(|r| self.evaluate_visibility(principal, r).allowed)
            .collect()
    }

    fn visibility(&self, principal: &Principal, resource: &ResourceDescriptor) -> Decision {
        if resource.visibility == Visibility::Public {
            return Decision::allow(Reason::PublicMatch);
        }
        if resource.is_owned_by(&principal.id) {
            return Decision::allow(Reason::OwnerMatch);
        }
        if resource.visibility == Visibility::OwnerOnly {
            return Decision::deny();
        }
        if principal.direct_assignments.contains(&resource.id)
            || resource.allowed_principal_ids.contains(&principal.id)
        {
            return Decision::allow(Reason::ExplicitGrant);
        }
        if !resource.required_roles.is_empty() && principal.has_any_role(&resource.required_roles) {
            return Decision::allow(Reason::RoleMatch);
        }
        if !resource.required_permissions.is_empty()
            && principal.has_all_permissions(&resource.required_permissions)
        {
            return Decision::allow(Reason::PermissionMatch);
        }
        if let Some(scope) = &resource.scope_tag {
            if self.is_delegated_admin(principal) && principal.delegated_scopes.contains(scope) {
                return Decision::allow(Reason::ScopeDelegation);
            }
        }
        Decision::deny()
    }

    fn edit(&self, principal: &Principal, resource: &ResourceDescriptor) -> Decision {
        if resource.is_owned_by(&principal.id) {
            return Decision::allow(Reason::OwnerMatch);
        }
        if self.is_full_admin(principal) {
            return Decision::allow(Reason::SuperuserBypass);
        }
        Decision::deny()
    }

    // ========================================================================
    // Endpoint guards
    // ========================================================================

    /// Allowed when `principal` holds at least one of `roles`.
    /// An empty requirement is a caller bug and fails with `InvalidInput`.
    pub fn require_any_role<I, S>(&self, principal: &Principal, roles: I) -> Result<Decision>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let required: BTreeSet<RoleId> = collect_ids(roles)?;
        if required.is_empty() {
            return Err(Error::invalid("at least one role must be specified"));
        }
        Ok(if principal.has_any_role(&required) {
            Decision::allow(Reason::RoleMatch)
        } else {
            Decision::deny()
        })
    }

    /// Allowed when `principal` holds every one of `permissions`.
    /// An empty requirement is a caller bug and fails with `InvalidInput`.
    pub fn require_all_permissions<I, S>(&self, principal: &Principal, permissions: I) -> Result<Decision>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let required: BTreeSet<PermissionId> = collect_ids(permissions)?;
        if required.is_empty() {
            return Err(Error::invalid("at least one permission must be specified"));
        }
        Ok(if principal.has_all_permissions(&required) {
            Decision::allow(Reason::PermissionMatch)
        } else {
            Decision::deny()
        })
    }
}
