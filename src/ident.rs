//! Validated identifiers.
//!
//! Every id the policy touches goes through the same check:
//! - surrounding whitespace is trimmed
//! - the result must be non-empty
//! - at most [`MAX_IDENT_LEN`] bytes
//! - no control characters
//!
//! Each kind gets its own newtype so a role id can't be passed where a
//! principal id is expected. All of them borrow as `str`, so sets can be
//! probed with plain string slices.

use std::borrow::Borrow;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::constants::MAX_IDENT_LEN;
use crate::error::{Error, Result};

fn validate(kind: &str, raw: &str) -> Result<String> {
    let s = raw.trim();
    if s.is_empty() {
        return Err(Error::invalid(format!("{} cannot be empty", kind)));
    }
    if s.len() > MAX_IDENT_LEN {
        return Err(Error::invalid(format!(
            "{} too long: {} bytes (max {})",
            kind,
            s.len(),
            MAX_IDENT_LEN
        )));
    }
    if s.chars().any(char::is_control) {
        return Err(Error::invalid(format!(
            "{} '{}' contains control characters",
            kind,
            s.escape_debug()
        )));
    }
    Ok(s.to_owned())
}

macro_rules! ident {
    ($(#[$meta:meta])* $name:ident, $kind:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            pub fn new(raw: impl AsRef<str>) -> Result<Self> {
                validate($kind, raw.as_ref()).map(Self)
            }

            #[inline]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl Borrow<str> for $name {
            fn borrow(&self) -> &str {
                &self.0
            }
        }

        impl FromStr for $name {
            type Err = Error;
            fn from_str(s: &str) -> Result<Self> {
                Self::new(s)
            }
        }

        impl TryFrom<String> for $name {
            type Error = Error;
            fn try_from(s: String) -> Result<Self> {
                Self::new(s)
            }
        }

        impl TryFrom<&str> for $name {
            type Error = Error;
            fn try_from(s: &str) -> Result<Self> {
                Self::new(s)
            }
        }

        impl From<$name> for String {
            fn from(id: $name) -> String {
                id.0
            }
        }

        impl PartialEq<str> for $name {
            fn eq(&self, other: &str) -> bool {
                self.0 == other
            }
        }

        impl PartialEq<&str> for $name {
            fn eq(&self, other: &&str) -> bool {
                self.0 == *other
            }
        }
    };
}

ident!(
    /// Id of an authenticated actor.
    PrincipalId,
    "principal id"
);
ident!(
    /// Id of a document or folder.
    ResourceId,
    "resource id"
);
ident!(
    /// Id (slug) of a role definition.
    RoleId,
    "role id"
);
ident!(
    /// Fine-grained permission code, e.g. `documents.edit`.
    PermissionId,
    "permission id"
);
ident!(
    /// Team/scope label partitioning resources for delegated administrators.
    ScopeTag,
    "scope tag"
);

impl RoleId {
    /// For compile-time constants that are known to be valid.
    pub(crate) fn from_trusted(s: &str) -> Self {
        RoleId(s.to_owned())
    }
}

/// Parse every item, failing on the first invalid one.
pub(crate) fn collect_ids<T, I, S>(items: I) -> Result<std::collections::BTreeSet<T>>
where
    T: FromStr<Err = Error> + Ord,
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    items.into_iter().map(|s| s.as_ref().parse()).collect()
}
