//! Single-selection commit protocol + client lookup
//!
//! The one real correctness contract in this service: a client token moves
//! from "unselected" to "selected" exactly once, even under concurrent
//! submissions, and every losing submission observes the winning choice.
//!
//! The commit is a single conditional UPDATE guarded on
//! `selected_gift_id IS NULL` and on the target gift being active. SQLite
//! serializes writers, so two requests for the same token can never both
//! pass the guard; there is no read-then-write window to race through.
//! When the guard refuses, one follow-up read classifies the refusal; the
//! classification is stable because selection state only moves forward.

use shared::models::{Client, Gift};
use sqlx::SqlitePool;

use crate::db::repository::{RepoResult, client, gift};

/// Outcome of a selection commit attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionOutcome {
    /// This call won the commit; the choice is now permanent.
    Selected {
        selected_gift_id: String,
        selected_at: i64,
    },
    /// The client had already committed (possibly in a concurrent request).
    /// Carries the existing, authoritative choice, not the one submitted.
    AlreadySelected { selected_gift_id: String },
    /// The gift does not exist or is no longer active. Nothing was written.
    InvalidGift,
    /// The token resolves to no client.
    NotFound,
}

/// Commit a client's one-time gift choice.
///
/// Exactly one durable row mutation on `Selected`; no side effects on any
/// other outcome. Inputs are expected non-empty (the handler rejects blank
/// values before any store access).
pub async fn select_gift(
    pool: &SqlitePool,
    token: &str,
    gift_id: &str,
) -> RepoResult<SelectionOutcome> {
    let now = shared::util::now_millis();

    let result = sqlx::query(
        "UPDATE client SET selected_gift_id = ?1, selected_at = ?2, updated_at = ?2 \
         WHERE token = ?3 AND selected_gift_id IS NULL \
           AND EXISTS (SELECT 1 FROM gift WHERE id = ?1 AND is_active = 1)",
    )
    .bind(gift_id)
    .bind(now)
    .bind(token)
    .execute(pool)
    .await?;

    if result.rows_affected() == 1 {
        return Ok(SelectionOutcome::Selected {
            selected_gift_id: gift_id.to_string(),
            selected_at: now,
        });
    }

    // Guard refused. Classify from the client row: a selection never
    // reverts, so whatever we read now is terminal for this decision.
    let row: Option<(Option<String>,)> =
        sqlx::query_as("SELECT selected_gift_id FROM client WHERE token = ?")
            .bind(token)
            .fetch_optional(pool)
            .await?;

    Ok(match row {
        None => SelectionOutcome::NotFound,
        Some((Some(existing),)) => SelectionOutcome::AlreadySelected {
            selected_gift_id: existing,
        },
        // Client exists and is unselected, so the gift was missing or retired.
        Some((None,)) => SelectionOutcome::InvalidGift,
    })
}

/// Resolve a token to the client and the catalog offered to it.
///
/// Pure read, safe to call repeatedly; this is the resync path after an
/// `ALREADY_SELECTED` conflict. Active gifts come back in display order;
/// when the client already committed to a gift that has since been retired,
/// that gift is included anyway so the confirmation can still render it.
pub async fn client_and_catalog(
    pool: &SqlitePool,
    token: &str,
) -> RepoResult<Option<(Client, Vec<Gift>)>> {
    let Some(client) = client::find_by_token(pool, token).await? else {
        return Ok(None);
    };

    let mut gifts = gift::find_active(pool).await?;

    if let Some(selected_id) = client.selected_gift_id.as_deref()
        && !gifts.iter().any(|g| g.id == selected_id)
        && let Some(retired) = gift::find_by_id(pool, selected_id).await?
    {
        let at = gifts
            .iter()
            .position(|g| (g.sort_order, g.created_at) > (retired.sort_order, retired.created_at))
            .unwrap_or(gifts.len());
        gifts.insert(at, retired);
    }

    Ok(Some((client, gifts)))
}
