//! Default role ids, header names and identifier limits

// Role classification defaults
pub const ADMIN_ROLE: &str = "admin";
pub const DELEGATED_ADMIN_ROLE: &str = "sub_admin";

// Seed catalog (superadmin > subadmin > client)
pub const SEED_SUPERADMIN: &str = "superadmin";
pub const SEED_SUBADMIN: &str = "subadmin";
pub const SEED_CLIENT: &str = "client";

// Default classification covers both the plain and the seed vocabulary
pub const DEFAULT_ADMIN_ROLES: &[&str] = &[ADMIN_ROLE, SEED_SUPERADMIN];
pub const DEFAULT_DELEGATED_ADMIN_ROLES: &[&str] = &[DELEGATED_ADMIN_ROLE, SEED_SUBADMIN];

// Request headers carrying an already-authenticated identity
pub const HEADER_USER_ID: &str = "x-user-id";
pub const HEADER_ROLES: &str = "x-user-roles";
pub const HEADER_PERMISSIONS: &str = "x-user-permissions";
pub const HEADER_ASSIGNMENTS: &str = "x-user-assignments";
pub const HEADER_DELEGATED_SCOPES: &str = "x-delegated-teams";

/// Maximum identifier length in bytes
pub const MAX_IDENT_LEN: usize = 255;
