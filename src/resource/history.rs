//! Last-change lookup by walking history newest first.

use git2::Oid;

use crate::error::Result;
use crate::git::Commit;
use crate::resource::Context;

/// Finds the commit that introduced the content `id` at `path`.
///
/// Commits are scanned newest first. Commits whose entry at `path` differs
/// from `id` are skipped until the content is first seen; from then on each
/// matching commit becomes the candidate, and the first commit where the
/// entry differs or is absent ends the walk. A deletion therefore separates
/// lineages: content re-added after a gap is attributed to the re-add.
///
/// If the walk runs out, the content has been there since the oldest commit
/// visited. With a history limit configured the walk stops after that many
/// commits and the oldest matching commit seen so far is returned.
pub fn last_change(ctx: &Context<'_>, path: &str, id: Oid) -> Result<Commit> {
    let mut candidate: Option<Commit> = None;
    let mut scanned = 0usize;

    for commit in ctx.store.walk_commits()? {
        if ctx.history_limit.is_some_and(|limit| scanned >= limit) {
            tracing::warn!(path, scanned, "history walk truncated");
            break;
        }
        scanned += 1;

        let commit = commit?;
        let present = ctx.store.entry_at(commit.tree_id, path)?.map(|entry| entry.id);

        if present == Some(id) {
            candidate = Some(commit);
        } else if let Some(found) = candidate {
            tracing::debug!(path, commit = %found.id, scanned, "found last change");
            return Ok(found);
        }
    }

    match candidate {
        Some(found) => {
            tracing::debug!(path, commit = %found.id, scanned, "content unchanged since oldest commit visited");
            Ok(found)
        }
        None => {
            tracing::warn!(path, %id, "content not found in history, using head");
            ctx.store.head_commit()
        }
    }
}
