//! Gift Repository

use super::{RepoError, RepoResult};
use shared::models::{Gift, GiftCreate, GiftUpdate};
use sqlx::SqlitePool;

const GIFT_SELECT: &str = "SELECT id, slug, title, strapline, description, led_by_name, \
     led_by_role, duration, format, sort_order, is_active, created_at, updated_at FROM gift";

/// Display order: sort_order ascending, ties broken by creation order.
const GIFT_ORDER: &str = "ORDER BY sort_order ASC, created_at ASC, rowid ASC";

/// All gifts, active and retired (admin view)
pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<Gift>> {
    let sql = format!("{GIFT_SELECT} {GIFT_ORDER}");
    let gifts = sqlx::query_as::<_, Gift>(&sql).fetch_all(pool).await?;
    Ok(gifts)
}

/// Active gifts only: the catalog offered to clients
pub async fn find_active(pool: &SqlitePool) -> RepoResult<Vec<Gift>> {
    let sql = format!("{GIFT_SELECT} WHERE is_active = 1 {GIFT_ORDER}");
    let gifts = sqlx::query_as::<_, Gift>(&sql).fetch_all(pool).await?;
    Ok(gifts)
}

pub async fn find_by_id(pool: &SqlitePool, id: &str) -> RepoResult<Option<Gift>> {
    let sql = format!("{GIFT_SELECT} WHERE id = ?");
    let gift = sqlx::query_as::<_, Gift>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(gift)
}

pub async fn find_by_slug(pool: &SqlitePool, slug: &str) -> RepoResult<Option<Gift>> {
    let sql = format!("{GIFT_SELECT} WHERE slug = ?");
    let gift = sqlx::query_as::<_, Gift>(&sql)
        .bind(slug)
        .fetch_optional(pool)
        .await?;
    Ok(gift)
}

/// Create a new gift
pub async fn create(pool: &SqlitePool, data: GiftCreate) -> RepoResult<Gift> {
    // Check duplicate slug
    if find_by_slug(pool, &data.slug).await?.is_some() {
        return Err(RepoError::Duplicate(format!(
            "Gift '{}' already exists",
            data.slug
        )));
    }

    let now = shared::util::now_millis();
    let id = shared::util::new_id();
    sqlx::query(
        "INSERT INTO gift (id, slug, title, strapline, description, led_by_name, led_by_role, \
             duration, format, sort_order, is_active, created_at, updated_at) \
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?12)",
    )
    .bind(&id)
    .bind(&data.slug)
    .bind(&data.title)
    .bind(&data.strapline)
    .bind(&data.description)
    .bind(&data.led_by_name)
    .bind(&data.led_by_role)
    .bind(&data.duration)
    .bind(&data.format)
    .bind(data.sort_order.unwrap_or(0))
    .bind(data.is_active.unwrap_or(true))
    .bind(now)
    .execute(pool)
    .await?;

    find_by_id(pool, &id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create gift".into()))
}

/// Partial update; absent fields keep their stored value.
/// Setting `is_active = false` is the retirement (soft-delete) path.
pub async fn update(pool: &SqlitePool, id: &str, data: GiftUpdate) -> RepoResult<Gift> {
    let now = shared::util::now_millis();
    let rows = sqlx::query(
        "UPDATE gift SET \
             title = COALESCE(?1, title), \
             strapline = COALESCE(?2, strapline), \
             description = COALESCE(?3, description), \
             led_by_name = COALESCE(?4, led_by_name), \
             led_by_role = COALESCE(?5, led_by_role), \
             duration = COALESCE(?6, duration), \
             format = COALESCE(?7, format), \
             sort_order = COALESCE(?8, sort_order), \
             is_active = COALESCE(?9, is_active), \
             updated_at = ?10 \
         WHERE id = ?11",
    )
    .bind(&data.title)
    .bind(&data.strapline)
    .bind(&data.description)
    .bind(&data.led_by_name)
    .bind(&data.led_by_role)
    .bind(&data.duration)
    .bind(&data.format)
    .bind(data.sort_order)
    .bind(data.is_active)
    .bind(now)
    .bind(id)
    .execute(pool)
    .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Gift {id} not found")));
    }
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Gift {id} not found")))
}
