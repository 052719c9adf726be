//! Delegation authorizer tests
//!
//! Who may grant which role to whom.

use std::sync::Arc;

use docgate::{
    DelegationAuthorizer, ErrorKind, Principal, Reason, RoleCatalog, RoleGraph, SelfAssignment,
};

fn authorizer() -> DelegationAuthorizer {
    DelegationAuthorizer::new(Arc::new(RoleGraph::from_catalog(RoleCatalog::seed()).unwrap()))
}

fn holder(id: &str, roles: &[&str]) -> Principal {
    Principal::new(id).unwrap().with_roles(roles.iter().copied()).unwrap()
}

// ============================================================================
// Delegation edges
// ============================================================================

/// A sub-admin may grant client but not superadmin
#[test]
fn subadmin_grants_client_only() {
    let auth = authorizer();
    let sam = holder("sam", &["subadmin"]);
    let target = holder("tina", &[]);

    let d = auth.can_grant_role(&sam, &target, "superadmin").unwrap();
    assert!(!d.allowed);
    assert_eq!(d.reason, Reason::Denied);

    let d = auth.can_grant_role(&sam, &target, "client").unwrap();
    assert!(d.allowed);
    assert_eq!(d.reason, Reason::DelegationEdge);

    assert!(!auth.can_grant_role(&sam, &target, "subadmin").unwrap().allowed);
}

/// Any held role with an edge is enough
#[test]
fn any_held_role_may_supply_the_edge() {
    let auth = authorizer();
    let multi = holder("m", &["client", "superadmin"]);
    let d = auth.can_grant_role(&multi, &holder("t", &[]), "subadmin").unwrap();
    assert_eq!(d.reason, Reason::DelegationEdge);
}

/// A principal with no roles can grant nothing to others
#[test]
fn no_roles_no_grants() {
    let auth = authorizer();
    let d = auth.can_grant_role(&holder("n", &[]), &holder("t", &[]), "client").unwrap();
    assert!(!d.allowed);
}

/// Holding a role does not let you grant that same role unless listed
#[test]
fn holding_is_not_granting() {
    let auth = authorizer();
    let client = holder("c", &["client"]);
    assert!(!auth.can_grant_role(&client, &holder("t", &[]), "client").unwrap().allowed);
}

/// a -> b -> c: a holder of a cannot grant c
#[test]
fn grants_do_not_chain() {
    let graph = RoleGraph::build(vec![
        docgate::Role::new("a").unwrap().can_assign(["b"]).unwrap(),
        docgate::Role::new("b").unwrap().can_assign(["c"]).unwrap(),
        docgate::Role::new("c").unwrap(),
    ])
    .unwrap();
    let auth = DelegationAuthorizer::new(Arc::new(graph));
    let a = holder("a-holder", &["a"]);
    let t = holder("t", &[]);

    assert!(auth.can_grant_role(&a, &t, "b").unwrap().allowed);
    assert!(!auth.can_grant_role(&a, &t, "c").unwrap().allowed);
}

// ============================================================================
// Superuser
// ============================================================================

/// A superuser grants any defined role to anyone
#[test]
fn superuser_grants_anything() {
    let auth = authorizer();
    let root = Principal::new("root").unwrap().superuser();
    for role in ["superadmin", "subadmin", "client"] {
        let d = auth.can_grant_role(&root, &holder("t", &["client"]), role).unwrap();
        assert!(d.allowed);
        assert_eq!(d.reason, Reason::SuperuserBypass);
    }
}

// ============================================================================
// Self-assignment
// ============================================================================

/// Default: granting to yourself skips the graph
#[test]
fn self_assignment_allowed_by_default() {
    let auth = authorizer();
    assert_eq!(auth.self_assignment(), SelfAssignment::Allow);

    let client = holder("c", &["client"]);
    let same = holder("c", &["client"]);
    let d = auth.can_grant_role(&client, &same, "superadmin").unwrap();
    assert!(d.allowed);
    assert_eq!(d.reason, Reason::SelfAssignment);
}

/// With RequireDelegation a self-grant goes through the normal checks
#[test]
fn self_assignment_can_require_delegation() {
    let auth = authorizer().with_self_assignment(SelfAssignment::RequireDelegation);
    let client = holder("c", &["client"]);

    let d = auth.can_grant_role(&client, &client, "superadmin").unwrap();
    assert!(!d.allowed);

    let sam = holder("sam", &["subadmin"]);
    let d = auth.can_grant_role(&sam, &sam, "client").unwrap();
    assert_eq!(d.reason, Reason::DelegationEdge);

    let root = Principal::new("root").unwrap().superuser();
    let d = auth.can_grant_role(&root, &root, "superadmin").unwrap();
    assert_eq!(d.reason, Reason::SuperuserBypass);
}

// ============================================================================
// Input validation
// ============================================================================

/// Unknown roles are malformed requests, never a plain denial
#[test]
fn unknown_role_is_invalid_input() {
    let auth = authorizer();
    let root = Principal::new("root").unwrap().superuser();

    let err = auth.can_grant_role(&root, &holder("t", &[]), "ghost").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidInput);
    assert!(err.to_string().contains("ghost"));

    // also checked before the self-assignment bypass
    let err = auth.can_grant_role(&root, &root, "ghost").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidInput);
}

#[test]
fn role_argument_is_trimmed() {
    let auth = authorizer();
    let sam = holder("sam", &["subadmin"]);
    assert!(auth.can_grant_role(&sam, &holder("t", &[]), " client ").unwrap().allowed);
}
