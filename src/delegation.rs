//! Delegation authorizer: may `actor` grant `role` to `target`?
//!
//! Consulted before a principal's role set is changed. It never changes
//! anything itself; the caller mutates only after an allowed decision.
//!
//! Order:
//! 1. actor == target and self-assignment is allowed    -> SelfAssignment
//! 2. actor is a superuser                              -> SuperuserBypass
//! 3. some role held by actor has a direct edge to role -> DelegationEdge
//! 4. otherwise                                         -> Denied

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::decision::{Decision, Reason};
use crate::error::{Error, Result};
use crate::graph::RoleGraph;
use crate::principal::Principal;

/// How to treat a principal granting a role to itself
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelfAssignment {
    /// Skip the delegation graph when actor and target are the same principal.
    /// Only enable where every caller of the grant path is already trusted.
    #[default]
    Allow,
    /// Treat self-grants like any other grant.
    RequireDelegation,
}

#[derive(Debug, Clone)]
pub struct DelegationAuthorizer {
    graph: Arc<RoleGraph>,
    self_assignment: SelfAssignment,
}

impl DelegationAuthorizer {
    pub fn new(graph: Arc<RoleGraph>) -> Self {
        DelegationAuthorizer { graph, self_assignment: SelfAssignment::default() }
    }

    pub fn with_self_assignment(mut self, mode: SelfAssignment) -> Self {
        self.self_assignment = mode;
        self
    }

    pub fn graph(&self) -> &Arc<RoleGraph> {
        &self.graph
    }

    pub fn self_assignment(&self) -> SelfAssignment {
        self.self_assignment
    }

    /// Decide whether `actor` may add `role` to `target`.
    ///
    /// Fails with `InvalidInput` when `role` is not defined in the graph;
    /// that is a bad request, not a denial.
    pub fn can_grant_role(&self, actor: &Principal, target: &Principal, role: &str) -> Result<Decision> {
        let role = role.trim();
        if !self.graph.contains(role) {
            return Err(Error::invalid(format!("unknown role '{}'", role)));
        }
        let decision = self.decide(actor, target, role);
        debug!(
            actor = %actor.id,
            target = %target.id,
            role,
            allowed = decision.allowed,
            reason = %decision.reason,
            "role grant decision"
        );
        Ok(decision)
    }

    fn decide(&self, actor: &Principal, target: &Principal, role: &str) -> Decision {
        if actor.id == target.id && self.self_assignment == SelfAssignment::Allow {
            warn!(principal = %actor.id, role, "self-assignment bypasses delegation check");
            return Decision::allow(Reason::SelfAssignment);
        }
        if actor.is_superuser {
            return Decision::allow(Reason::SuperuserBypass);
        }
        if actor.roles.iter().any(|held| self.graph.can_delegate(held.as_str(), role)) {
            return Decision::allow(Reason::DelegationEdge);
        }
        Decision::deny()
    }
}
