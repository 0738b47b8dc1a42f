//! Client Repository

use super::{RepoError, RepoResult};
use shared::models::{Client, ClientCreate, ClientUpdate, ClientWithGift};
use sqlx::SqlitePool;

const CLIENT_SELECT: &str = "SELECT id, token, first_name, last_name, company_name, email, \
     selected_gift_id, selected_at, created_at, updated_at FROM client";

const CLIENT_WITH_GIFT_SELECT: &str = "SELECT c.id, c.token, c.first_name, c.last_name, \
     c.company_name, c.email, c.selected_gift_id, g.title AS selected_gift_title, \
     c.selected_at, c.created_at, c.updated_at \
     FROM client c LEFT JOIN gift g ON c.selected_gift_id = g.id";

pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<ClientWithGift>> {
    let sql = format!("{CLIENT_WITH_GIFT_SELECT} ORDER BY c.created_at DESC, c.rowid DESC");
    let rows = sqlx::query_as::<_, ClientWithGift>(&sql)
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

pub async fn find_by_id(pool: &SqlitePool, id: &str) -> RepoResult<Option<ClientWithGift>> {
    let sql = format!("{CLIENT_WITH_GIFT_SELECT} WHERE c.id = ?");
    let row = sqlx::query_as::<_, ClientWithGift>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

/// Resolve an invite token to its client. The token is the client's only
/// credential, so this is the single lookup path for the public surface.
pub async fn find_by_token(pool: &SqlitePool, token: &str) -> RepoResult<Option<Client>> {
    let sql = format!("{CLIENT_SELECT} WHERE token = ?");
    let row = sqlx::query_as::<_, Client>(&sql)
        .bind(token)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

/// Create a client and issue its invite token.
///
/// Values are stored as given; trimming and shape checks happen at the
/// handler boundary. Creation is not deduplicated by content: two imports
/// of the same person are two independent invites.
pub async fn create(pool: &SqlitePool, data: ClientCreate) -> RepoResult<Client> {
    let now = shared::util::now_millis();
    let id = shared::util::new_id();
    let token = shared::util::invite_token();
    sqlx::query(
        "INSERT INTO client (id, token, first_name, last_name, company_name, email, created_at, updated_at) \
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?7)",
    )
    .bind(&id)
    .bind(&token)
    .bind(&data.first_name)
    .bind(&data.last_name)
    .bind(&data.company_name)
    .bind(&data.email)
    .bind(now)
    .execute(pool)
    .await?;

    let sql = format!("{CLIENT_SELECT} WHERE id = ?");
    sqlx::query_as::<_, Client>(&sql)
        .bind(&id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create client".into()))
}

pub async fn update(
    pool: &SqlitePool,
    id: &str,
    data: ClientUpdate,
) -> RepoResult<ClientWithGift> {
    let now = shared::util::now_millis();
    let rows = sqlx::query(
        "UPDATE client SET \
             first_name = COALESCE(?1, first_name), \
             last_name = COALESCE(?2, last_name), \
             company_name = COALESCE(?3, company_name), \
             email = COALESCE(?4, email), \
             updated_at = ?5 \
         WHERE id = ?6",
    )
    .bind(&data.first_name)
    .bind(&data.last_name)
    .bind(&data.company_name)
    .bind(&data.email)
    .bind(now)
    .bind(id)
    .execute(pool)
    .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Client {id} not found")));
    }
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Client {id} not found")))
}

/// Hard delete. A client row owns its selection columns, so removing the
/// row cannot orphan a selection reference.
pub async fn delete(pool: &SqlitePool, id: &str) -> RepoResult<bool> {
    let rows = sqlx::query("DELETE FROM client WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(rows.rows_affected() > 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::testing::memory_pool;
    use shared::models::ClientCreate;

    fn sample(email: &str) -> ClientCreate {
        ClientCreate {
            first_name: "Ada".into(),
            last_name: "Lovelace".into(),
            company_name: "Analytical Engines Ltd".into(),
            email: email.into(),
        }
    }

    #[tokio::test]
    async fn test_create_issues_token() {
        let pool = memory_pool().await;
        let c = create(&pool, sample("ada@example.com")).await.unwrap();
        assert_eq!(c.token.len(), 48);
        assert!(c.token.chars().all(|ch| ch.is_ascii_hexdigit()));
        assert!(c.selected_gift_id.is_none());
        assert!(c.selected_at.is_none());
    }

    #[tokio::test]
    async fn test_create_not_deduplicated() {
        let pool = memory_pool().await;
        let a = create(&pool, sample("ada@example.com")).await.unwrap();
        let b = create(&pool, sample("ada@example.com")).await.unwrap();
        assert_ne!(a.id, b.id);
        assert_ne!(a.token, b.token);
        assert_eq!(find_all(&pool).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_find_by_token() {
        let pool = memory_pool().await;
        let c = create(&pool, sample("ada@example.com")).await.unwrap();
        let found = find_by_token(&pool, &c.token).await.unwrap().unwrap();
        assert_eq!(found.id, c.id);
        assert!(find_by_token(&pool, "no-such-token").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_update_partial() {
        let pool = memory_pool().await;
        let c = create(&pool, sample("ada@example.com")).await.unwrap();
        let updated = update(
            &pool,
            &c.id,
            ClientUpdate {
                company_name: Some("Babbage & Co".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
        assert_eq!(updated.company_name, "Babbage & Co");
        // untouched fields keep their values
        assert_eq!(updated.first_name, "Ada");
        assert_eq!(updated.email, "ada@example.com");
    }

    #[tokio::test]
    async fn test_update_missing_is_not_found() {
        let pool = memory_pool().await;
        let err = update(&pool, "nope", ClientUpdate::default()).await;
        assert!(matches!(err, Err(RepoError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_delete() {
        let pool = memory_pool().await;
        let c = create(&pool, sample("ada@example.com")).await.unwrap();
        assert!(delete(&pool, &c.id).await.unwrap());
        assert!(!delete(&pool, &c.id).await.unwrap());
        assert!(find_by_token(&pool, &c.token).await.unwrap().is_none());
    }
}
