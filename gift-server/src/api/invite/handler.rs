//! Public invite handlers
//!
//! The only surface a client ever touches. Authentication is the invite
//! token itself; failures use the fixed wire codes the invite page keys on.

use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Deserialize;

use crate::core::ServerState;
use crate::selection::{self, SelectionOutcome};
use crate::utils::{AppError, AppResult};
use shared::models::{ClientAndGifts, SelectionConfirmed};

#[derive(Deserialize)]
pub struct TokenQuery {
    pub t: Option<String>,
}

/// GET /api/client-and-gifts?t=<token> - 客户资料 + 当前目录
pub async fn client_and_gifts(
    State(state): State<ServerState>,
    Query(query): Query<TokenQuery>,
) -> AppResult<Json<ClientAndGifts>> {
    let token = query.t.as_deref().map(str::trim).unwrap_or_default();
    if token.is_empty() {
        // local short-circuit, no store access
        return Err(AppError::MissingToken);
    }

    let (client, gifts) = selection::client_and_catalog(&state.pool, token)
        .await?
        .ok_or_else(|| AppError::not_found("Client for token"))?;

    Ok(Json(ClientAndGifts {
        client: client.into(),
        gifts,
    }))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectGiftRequest {
    pub token: Option<String>,
    pub gift_id: Option<String>,
}

/// POST /api/select-gift - 提交一次性选择
///
/// `ALREADY_SELECTED` 携带既有选择，调用方应重新拉取 client-and-gifts
/// 并以返回的 selectedGiftId 渲染确认页。
pub async fn select_gift(
    State(state): State<ServerState>,
    Json(req): Json<SelectGiftRequest>,
) -> AppResult<Response> {
    let token = req.token.as_deref().map(str::trim).unwrap_or_default();
    let gift_id = req.gift_id.as_deref().map(str::trim).unwrap_or_default();
    if token.is_empty() || gift_id.is_empty() {
        return Err(AppError::validation("token and giftId are required"));
    }

    match selection::select_gift(&state.pool, token, gift_id).await? {
        SelectionOutcome::Selected {
            selected_gift_id,
            selected_at,
        } => {
            tracing::info!(gift_id = %selected_gift_id, "Gift selection committed");
            Ok(Json(SelectionConfirmed {
                success: true,
                selected_gift_id,
                selected_at,
            })
            .into_response())
        }
        SelectionOutcome::AlreadySelected { selected_gift_id } => Ok((
            StatusCode::CONFLICT,
            Json(serde_json::json!({
                "error": "ALREADY_SELECTED",
                "selectedGiftId": selected_gift_id,
            })),
        )
            .into_response()),
        SelectionOutcome::InvalidGift => {
            Err(AppError::InvalidGift("gift missing or inactive".into()))
        }
        SelectionOutcome::NotFound => Err(AppError::not_found("Client for token")),
    }
}
