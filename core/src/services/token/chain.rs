//! Revocation chain walking for token reuse detection

use std::collections::HashMap;

use crate::domain::entities::user::User;

/// Revokes the first active descendant in the rotation chain starting at
/// `start_token`.
///
/// The walk follows `replaced_by_token` forward through the user's
/// collection. It stops at the chain end, at a link whose successor is no
/// longer in the collection (treated as chain end), or at the first active
/// descendant, which is revoked with the supplied reason and ip and keeps
/// an empty `replaced_by_token`. A lineage with no active member revokes
/// nothing.
///
/// Returns the token string that was revoked, if any.
pub fn revoke_first_active_descendant(
    user: &mut User,
    start_token: &str,
    ip: Option<&str>,
    reason: &str,
) -> Option<String> {
    // Index built once per walk; each step is then a single lookup.
    let index_by_token: HashMap<String, usize> = user
        .refresh_tokens
        .iter()
        .enumerate()
        .map(|(index, t)| (t.token.clone(), index))
        .collect();

    let mut current = *index_by_token.get(start_token)?;

    // A chain holds at most as many links as the collection has tokens, so
    // a corrupted cycle cannot keep the walk alive past this bound.
    for _ in 0..user.refresh_tokens.len() {
        let successor = user.refresh_tokens[current].replaced_by_token.clone()?;
        let next = *index_by_token.get(&successor)?;

        if user.refresh_tokens[next].is_active() {
            user.refresh_tokens[next].revoke(ip, reason);
            return Some(successor);
        }
        current = next;
    }

    None
}
