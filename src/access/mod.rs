//! Ownership and visibility guards, plus the cookbook entry reconciliation
//! rules. Everything here is pure so the authorization model stays testable
//! without a database.

use serde::Deserialize;
use uuid::Uuid;

use crate::auth::Role;
use crate::error::ApiError;
use crate::middleware::auth::AuthUser;

/// A submitted (recipe, display order) pair for a cookbook
#[derive(Debug, Clone, Deserialize)]
pub struct EntryInput {
    pub recipe_id: Uuid,
    #[serde(default)]
    pub display_order: i32,
}

/// Entry list reconciliation: rows to remove from storage and rows to insert.
/// No row is updated in place; an order change is a delete plus an insert.
#[derive(Debug, Default)]
pub struct EntryDiff {
    pub to_delete: Vec<Uuid>,
    pub to_insert: Vec<EntryInput>,
}

pub fn is_admin(user: &AuthUser) -> bool {
    user.role == Role::Admin
}

pub fn is_owner(owner_username: &str, user: &AuthUser) -> bool {
    user.username == owner_username
}

/// Write access: the owner, or an admin.
pub fn require_owner(owner_username: &str, user: &AuthUser) -> Result<(), ApiError> {
    if is_admin(user) || is_owner(owner_username, user) {
        Ok(())
    } else {
        Err(ApiError::forbidden("You do not own this resource"))
    }
}

pub fn require_admin(user: &AuthUser) -> Result<(), ApiError> {
    if is_admin(user) {
        Ok(())
    } else {
        Err(ApiError::forbidden("Admin role required"))
    }
}

/// Read access: public resources are visible to anyone; private ones only to
/// the owner or an admin.
pub fn can_view(is_private: bool, owner_username: &str, viewer: Option<&AuthUser>) -> bool {
    if !is_private {
        return true;
    }
    match viewer {
        Some(user) => is_admin(user) || is_owner(owner_username, user),
        None => false,
    }
}

/// First recipe id that appears more than once in a submitted entry list
pub fn duplicate_recipe_id(entries: &[EntryInput]) -> Option<Uuid> {
    let mut seen = std::collections::HashSet::new();
    for entry in entries {
        if !seen.insert(entry.recipe_id) {
            return Some(entry.recipe_id);
        }
    }
    None
}

/// Diff the stored entry set against the requested list: stored rows absent
/// from the request are deleted, requested rows absent from storage are
/// inserted. Rows present in both are left alone (the original kept their
/// stored order rather than rewriting it).
pub fn diff_entries(existing: &[Uuid], requested: &[EntryInput]) -> EntryDiff {
    let requested_ids: std::collections::HashSet<Uuid> =
        requested.iter().map(|e| e.recipe_id).collect();
    let existing_ids: std::collections::HashSet<Uuid> = existing.iter().copied().collect();

    EntryDiff {
        to_delete: existing
            .iter()
            .filter(|id| !requested_ids.contains(id))
            .copied()
            .collect(),
        to_insert: requested
            .iter()
            .filter(|e| !existing_ids.contains(&e.recipe_id))
            .cloned()
            .collect(),
    }
}
