//! Property tests for the decision rules

use std::sync::Arc;

use docgate::{
    AccessPolicy, DelegationAuthorizer, Principal, Reason, ResourceDescriptor, Role, RoleGraph,
    Visibility,
};
use proptest::prelude::*;

const NAMES: &[&str] = &["alice", "bob", "carol", "dave"];
const ROLES: &[&str] = &["admin", "sub_admin", "employee", "finance", "operations"];
const PERMS: &[&str] = &["read", "write", "export"];
const SCOPES: &[&str] = &["north", "south"];
const VISIBILITIES: &[Visibility] = &[Visibility::Public, Visibility::Restricted, Visibility::OwnerOnly];
const SEED_ROLES: &[&str] = &["superadmin", "subadmin", "client"];

fn subset(pool: &'static [&'static str]) -> impl Strategy<Value = Vec<&'static str>> {
    proptest::sample::subsequence(pool, 0..=pool.len())
}

prop_compose! {
    fn principal()(
        id in proptest::sample::select(NAMES),
        roles in subset(ROLES),
        perms in subset(PERMS),
        assigned in any::<bool>(),
        scopes in subset(SCOPES),
        su in any::<bool>(),
    ) -> Principal {
        let mut p = Principal::new(id).unwrap()
            .with_roles(roles).unwrap()
            .with_permissions(perms).unwrap()
            .with_delegated_scopes(scopes).unwrap();
        if assigned {
            p = p.with_assignments(["doc"]).unwrap();
        }
        if su {
            p = p.superuser();
        }
        p
    }
}

prop_compose! {
    fn resource(visibility: Visibility)(
        owner in proptest::sample::select(NAMES),
        allowed in subset(NAMES),
        roles in subset(ROLES),
        perms in subset(PERMS),
        scope in proptest::option::of(proptest::sample::select(SCOPES)),
    ) -> ResourceDescriptor {
        let mut r = ResourceDescriptor::new("doc", owner, visibility).unwrap()
            .allow(allowed).unwrap()
            .require_roles(roles).unwrap()
            .require_permissions(perms).unwrap();
        if let Some(s) = scope {
            r = r.scoped(s).unwrap();
        }
        r
    }
}

proptest! {
    /// Owner-only: visible iff owner, whatever else is configured
    #[test]
    fn owner_only_iff_owner(p in principal(), r in resource(Visibility::OwnerOnly)) {
        let d = AccessPolicy::default().evaluate_visibility(&p, &r);
        prop_assert_eq!(d.allowed, p.id == r.owner_id);
    }

    /// Public: always visible
    #[test]
    fn public_always_visible(p in principal(), r in resource(Visibility::Public)) {
        let d = AccessPolicy::default().evaluate_visibility(&p, &r);
        prop_assert!(d.allowed);
        prop_assert_eq!(d.reason, Reason::PublicMatch);
    }

    /// PermissionMatch is only ever reported with full coverage
    #[test]
    fn permission_match_needs_subset(p in principal(), r in resource(Visibility::Restricted)) {
        let d = AccessPolicy::default().evaluate_visibility(&p, &r);
        if d.reason == Reason::PermissionMatch {
            prop_assert!(!r.required_permissions.is_empty());
            prop_assert!(r.required_permissions.is_subset(&p.permissions));
        }
        if d.reason == Reason::RoleMatch {
            prop_assert!(r.required_roles.iter().any(|x| p.roles.contains(x)));
        }
    }

    /// Denied decisions always carry the Denied reason and vice versa
    #[test]
    fn allowed_matches_reason(p in principal(), r in resource(Visibility::Restricted)) {
        let policy = AccessPolicy::default();
        for d in [policy.evaluate_visibility(&p, &r), policy.evaluate_edit(&p, &r)] {
            prop_assert_eq!(d.allowed, d.reason != Reason::Denied);
        }
    }

    /// Edit is granted only to owners and full administrators
    #[test]
    fn edit_only_owner_or_admin(
        p in principal(),
        r in proptest::sample::select(VISIBILITIES).prop_flat_map(resource),
    ) {
        let policy = AccessPolicy::default();
        let d = policy.evaluate_edit(&p, &r);
        prop_assert_eq!(d.allowed, p.id == r.owner_id || policy.is_full_admin(&p));
    }

    /// On a chain of n roles, holder of role i can grant exactly role i+1
    #[test]
    fn chain_grants_one_hop((n, i, j) in (2usize..8).prop_flat_map(|n| (Just(n), 0..n, 0..n))) {
        let names: Vec<String> = (0..n).map(|k| format!("r{}", k)).collect();
        let roles = names.iter().enumerate().map(|(k, name)| {
            let role = Role::new(name).unwrap();
            match names.get(k + 1) {
                Some(next) => role.can_assign([next]).unwrap(),
                None => role,
            }
        });
        let auth = DelegationAuthorizer::new(Arc::new(RoleGraph::build(roles).unwrap()));
        let actor = Principal::new("actor").unwrap().with_roles([&names[i]]).unwrap();
        let target = Principal::new("target").unwrap();

        let d = auth.can_grant_role(&actor, &target, &names[j]).unwrap();
        prop_assert_eq!(d.allowed, j == i + 1);
    }

    /// Superusers grant any defined role to any other principal
    #[test]
    fn superuser_grants_any(role in proptest::sample::select(SEED_ROLES)) {
        let graph = RoleGraph::from_catalog(docgate::RoleCatalog::seed()).unwrap();
        let auth = DelegationAuthorizer::new(Arc::new(graph));
        let root = Principal::new("root").unwrap().superuser();
        let other = Principal::new("other").unwrap();
        prop_assert_eq!(auth.can_grant_role(&root, &other, role).unwrap().reason, Reason::SuperuserBypass);
    }
}
