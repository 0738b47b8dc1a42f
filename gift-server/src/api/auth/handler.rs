//! Admin authentication handlers
//!
//! Exchanges the shared admin secret for a signed session token carried in
//! an HttpOnly cookie. The session-check endpoint lets the dashboard probe
//! whether its cookie is still valid.

use std::time::Duration;

use axum::{
    Json,
    extract::{Extension, State},
    http::header,
    response::{IntoResponse, Response},
};
use ring::constant_time::verify_slices_are_equal;
use serde::Deserialize;

use crate::auth::AdminContext;
use crate::core::ServerState;
use crate::security_log;
use crate::utils::{AppError, AppResult};

/// Fixed delay for authentication to prevent timing attacks
const AUTH_FIXED_DELAY_MS: u64 = 500;

#[derive(Deserialize)]
pub struct LoginRequest {
    pub password: Option<String>,
}

/// POST /api/admin/login - 共享密钥换会话令牌
pub async fn login(
    State(state): State<ServerState>,
    Json(req): Json<LoginRequest>,
) -> AppResult<Response> {
    let Some(secret) = state.config.admin_secret.as_deref() else {
        return Err(AppError::internal("ADMIN_SECRET is not configured"));
    };

    // Fixed delay before checking the result
    tokio::time::sleep(Duration::from_millis(AUTH_FIXED_DELAY_MS)).await;

    let supplied = req.password.unwrap_or_default();
    if supplied.is_empty()
        || verify_slices_are_equal(supplied.as_bytes(), secret.as_bytes()).is_err()
    {
        security_log!("WARN", "admin_login_failed", reason = "invalid_password");
        return Err(AppError::Unauthorised);
    }

    let token = state
        .session_service
        .issue()
        .map_err(|e| AppError::internal(format!("Failed to issue session token: {e}")))?;
    let cookie = state
        .session_service
        .cookie_for(&token, state.config.is_production());

    tracing::info!("Admin login successful");

    Ok((
        [(header::SET_COOKIE, cookie)],
        Json(serde_json::json!({ "success": true })),
    )
        .into_response())
}

/// GET /api/admin/session - 会话有效性探测
///
/// 能到达这里说明守卫已放行；把认证来源回显给仪表盘。
pub async fn session(Extension(ctx): Extension<AdminContext>) -> Json<serde_json::Value> {
    Json(serde_json::json!({ "ok": true, "subject": ctx.subject }))
}
