//! docgate - access decisions for document and folder management
//!
//! Pure decision logic, no storage and no transport:
//! - [`AccessPolicy`]: may a principal view or edit a document/folder?
//! - [`RoleGraph`]: which roles may holders of a role grant?
//! - [`DelegationAuthorizer`]: may an actor grant a role to a target?
//!
//! Every evaluation returns a [`Decision`] carrying both the outcome and the
//! rule that produced it. Denials are values, not errors; [`Error`] is reserved
//! for malformed input and configuration problems.
//!
//! ```
//! use docgate::{AccessPolicy, Principal, Reason, ResourceDescriptor};
//!
//! let policy = AccessPolicy::default();
//! let doc = ResourceDescriptor::restricted("doc-1", "alice")?.allow(["bob"])?;
//!
//! let bob = Principal::new("bob")?;
//! let decision = policy.evaluate_visibility(&bob, &doc);
//! assert!(decision.allowed);
//! assert_eq!(decision.reason, Reason::ExplicitGrant);
//!
//! // read access does not imply edit access
//! assert!(!policy.evaluate_edit(&bob, &doc).allowed);
//! # Ok::<(), docgate::Error>(())
//! ```

pub mod config;
pub mod constants;
pub mod decision;
pub mod delegation;
pub mod error;
pub mod graph;
pub mod ident;
pub mod policy;
pub mod principal;
pub mod resource;
pub mod roles;
pub mod snapshot;

pub use config::PolicyConfig;
pub use decision::{Action, Decision, Reason};
pub use delegation::{DelegationAuthorizer, SelfAssignment};
pub use error::{Error, ErrorKind, Result};
pub use graph::RoleGraph;
pub use ident::{PermissionId, PrincipalId, ResourceId, RoleId, ScopeTag};
pub use policy::AccessPolicy;
pub use principal::Principal;
pub use resource::{ResourceDescriptor, ResourceKind, Visibility};
pub use roles::{Role, RoleCatalog};
pub use snapshot::GraphHandle;
