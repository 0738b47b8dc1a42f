//! Client API Handlers (admin)

use axum::{
    Json,
    extract::{Extension, Path, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};

use super::transfer::{self, ImportRejection};
use crate::auth::AdminContext;
use crate::core::ServerState;
use crate::db::repository::client;
use crate::utils::validation::{
    MAX_NAME_LEN, validate_email, validate_required_text,
};
use crate::utils::{AppError, AppResult};
use shared::models::{AdminClient, ClientCreate, ClientCreated, ClientUpdate};

/// GET /api/admin/clients - 客户列表 (含所选礼品标题)
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<AdminClient>>> {
    let clients = client::find_all(&state.pool).await?;
    Ok(Json(clients.into_iter().map(AdminClient::from).collect()))
}

/// POST /api/admin/clients - 创建客户并签发邀请令牌
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<ClientCreate>,
) -> AppResult<Response> {
    validate_required_text(&payload.first_name, "firstName", MAX_NAME_LEN)?;
    validate_required_text(&payload.last_name, "lastName", MAX_NAME_LEN)?;
    validate_required_text(&payload.company_name, "companyName", MAX_NAME_LEN)?;
    validate_email(&payload.email, "email")?;

    let data = ClientCreate {
        first_name: payload.first_name.trim().to_string(),
        last_name: payload.last_name.trim().to_string(),
        company_name: payload.company_name.trim().to_string(),
        email: payload.email.trim().to_string(),
    };

    let created = client::create(&state.pool, data).await?;
    let invite_url = state.config.invite_url(&created.token);

    tracing::info!(client_id = %created.id, "Client created");

    let body = ClientCreated {
        client: AdminClient {
            id: created.id,
            first_name: created.first_name,
            last_name: created.last_name,
            company_name: created.company_name,
            email: created.email,
            token: created.token,
            has_selected_gift: false,
            selected_gift_id: None,
            selected_gift_title: None,
            selected_at: None,
            created_at: created.created_at,
        },
        invite_url,
    };
    Ok((StatusCode::CREATED, Json(body)).into_response())
}

/// PUT /api/admin/clients/{id} - 更新客户资料 (部分字段)
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<ClientUpdate>,
) -> AppResult<Json<AdminClient>> {
    if payload.is_empty() {
        return Err(AppError::validation("no fields to update"));
    }

    let mut data = ClientUpdate::default();
    if let Some(v) = &payload.first_name {
        validate_required_text(v, "firstName", MAX_NAME_LEN)?;
        data.first_name = Some(v.trim().to_string());
    }
    if let Some(v) = &payload.last_name {
        validate_required_text(v, "lastName", MAX_NAME_LEN)?;
        data.last_name = Some(v.trim().to_string());
    }
    if let Some(v) = &payload.company_name {
        validate_required_text(v, "companyName", MAX_NAME_LEN)?;
        data.company_name = Some(v.trim().to_string());
    }
    if let Some(v) = &payload.email {
        validate_email(v, "email")?;
        data.email = Some(v.trim().to_string());
    }

    let updated = client::update(&state.pool, &id, data).await?;
    Ok(Json(AdminClient::from(updated)))
}

/// DELETE /api/admin/clients/{id} - 删除客户 (硬删除)
pub async fn delete_client(
    State(state): State<ServerState>,
    Extension(ctx): Extension<AdminContext>,
    Path(id): Path<String>,
) -> AppResult<Json<serde_json::Value>> {
    let removed = client::delete(&state.pool, &id).await?;
    if !removed {
        return Err(AppError::not_found(format!("Client {id}")));
    }

    tracing::info!(client_id = %id, operator = %ctx.subject, via = ?ctx.via, "Client deleted");

    Ok(Json(serde_json::json!({ "success": true })))
}

/// POST /api/admin/clients/import - CSV 批量导入
pub async fn import(
    State(state): State<ServerState>,
    Extension(ctx): Extension<AdminContext>,
    body: String,
) -> AppResult<Response> {
    match transfer::import_clients(&state.pool, &body).await {
        Ok(report) => {
            tracing::info!(
                created = report.created_count,
                failed = report.errors.len(),
                operator = %ctx.subject,
                "Client import finished"
            );
            Ok(Json(report).into_response())
        }
        Err(ImportRejection::Empty) => Err(AppError::validation("import body is empty")),
        Err(ImportRejection::MissingColumns(missing)) => Ok((
            StatusCode::BAD_REQUEST,
            Json(serde_json::json!({
                "error": "INVALID_INPUT",
                "missing": missing,
            })),
        )
            .into_response()),
    }
}

/// GET /api/admin/clients/export - CSV 导出 (附件下载)
pub async fn export(State(state): State<ServerState>) -> AppResult<Response> {
    let clients = client::find_all(&state.pool).await?;
    let csv = transfer::export_csv(&clients, &state.config.base_url);

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"clients.csv\"",
            ),
        ],
        csv,
    )
        .into_response())
}
