//! Gift API Handlers (admin)

use axum::{
    Json,
    extract::{Path, State},
};

use crate::core::ServerState;
use crate::db::repository::gift;
use crate::utils::validation::{
    MAX_LABEL_LEN, MAX_NAME_LEN, MAX_TEXT_LEN, validate_optional_text, validate_required_text,
};
use crate::utils::{AppError, AppResult};
use shared::models::{Gift, GiftCreate, GiftUpdate};

/// GET /api/admin/gifts - 全部礼品 (含已下架)
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<Gift>>> {
    let gifts = gift::find_all(&state.pool).await?;
    Ok(Json(gifts))
}

/// POST /api/admin/gifts - 创建礼品
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<GiftCreate>,
) -> AppResult<Json<Gift>> {
    validate_required_text(&payload.slug, "slug", MAX_LABEL_LEN)?;
    validate_required_text(&payload.title, "title", MAX_NAME_LEN)?;
    validate_required_text(&payload.strapline, "strapline", MAX_LABEL_LEN)?;
    validate_required_text(&payload.description, "description", MAX_TEXT_LEN)?;
    validate_required_text(&payload.led_by_name, "ledByName", MAX_NAME_LEN)?;
    validate_required_text(&payload.led_by_role, "ledByRole", MAX_NAME_LEN)?;
    validate_optional_text(&payload.duration, "duration", MAX_LABEL_LEN)?;
    validate_optional_text(&payload.format, "format", MAX_LABEL_LEN)?;

    let data = GiftCreate {
        slug: payload.slug.trim().to_string(),
        title: payload.title.trim().to_string(),
        strapline: payload.strapline.trim().to_string(),
        description: payload.description.trim().to_string(),
        led_by_name: payload.led_by_name.trim().to_string(),
        led_by_role: payload.led_by_role.trim().to_string(),
        duration: trim_optional(payload.duration),
        format: trim_optional(payload.format),
        sort_order: payload.sort_order,
        is_active: payload.is_active,
    };

    let created = gift::create(&state.pool, data).await?;
    tracing::info!(gift_id = %created.id, slug = %created.slug, "Gift created");
    Ok(Json(created))
}

/// PUT /api/admin/gifts/{id} - 更新礼品 (部分字段；isActive=false 即下架)
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<GiftUpdate>,
) -> AppResult<Json<Gift>> {
    if payload.is_empty() {
        return Err(AppError::validation("no fields to update"));
    }

    let mut data = GiftUpdate {
        sort_order: payload.sort_order,
        is_active: payload.is_active,
        ..Default::default()
    };
    if let Some(v) = &payload.title {
        validate_required_text(v, "title", MAX_NAME_LEN)?;
        data.title = Some(v.trim().to_string());
    }
    if let Some(v) = &payload.strapline {
        validate_required_text(v, "strapline", MAX_LABEL_LEN)?;
        data.strapline = Some(v.trim().to_string());
    }
    if let Some(v) = &payload.description {
        validate_required_text(v, "description", MAX_TEXT_LEN)?;
        data.description = Some(v.trim().to_string());
    }
    if let Some(v) = &payload.led_by_name {
        validate_required_text(v, "ledByName", MAX_NAME_LEN)?;
        data.led_by_name = Some(v.trim().to_string());
    }
    if let Some(v) = &payload.led_by_role {
        validate_required_text(v, "ledByRole", MAX_NAME_LEN)?;
        data.led_by_role = Some(v.trim().to_string());
    }
    if payload.duration.is_some() {
        validate_optional_text(&payload.duration, "duration", MAX_LABEL_LEN)?;
        data.duration = trim_optional(payload.duration);
    }
    if payload.format.is_some() {
        validate_optional_text(&payload.format, "format", MAX_LABEL_LEN)?;
        data.format = trim_optional(payload.format);
    }

    let updated = gift::update(&state.pool, &id, data).await?;
    if payload.is_active == Some(false) {
        tracing::info!(gift_id = %updated.id, slug = %updated.slug, "Gift deactivated");
    }
    Ok(Json(updated))
}

fn trim_optional(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
