//! 管理端守卫中间件
//!
//! 对所有 `/api/admin/*` 请求验证身份（登录端点除外），验证成功后把
//! [`AdminContext`] 注入请求扩展，供各 handler 记录操作者来源。
//!
//! # 跳过认证的路径
//!
//! - `OPTIONS *` (CORS 预检)
//! - 非 `/api/admin/` 路径 (公共邀请接口、健康检查)
//! - `/api/admin/login` (登录接口)
//!
//! # 认证方式
//!
//! 1. `x-admin-key` 头携带共享密钥（脚本/自动化用）
//! 2. `admin_session` cookie 或 `Authorization: Bearer` 会话令牌

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use ring::constant_time::verify_slices_are_equal;

use crate::auth::SessionService;
use crate::core::ServerState;
use crate::security_log;
use crate::utils::AppError;

/// 已验证的管理请求上下文 (由守卫注入请求扩展)
#[derive(Debug, Clone)]
pub struct AdminContext {
    /// 会话主体
    pub subject: String,
    /// 认证方式
    pub via: AdminVia,
}

/// 管理请求的认证方式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdminVia {
    /// `x-admin-key` 共享密钥
    ApiKey,
    /// 登录签发的会话令牌
    Session,
}

/// 管理端认证中间件
pub async fn require_admin(
    State(state): State<ServerState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let path = req.uri().path();

    // 允许 CORS 预检的 OPTIONS 请求 (跳过认证)
    if req.method() == http::Method::OPTIONS {
        return Ok(next.run(req).await);
    }

    // 只有管理接口需要守卫；登录接口本身是公共的
    if !path.starts_with("/api/admin/") || path == "/api/admin/login" {
        return Ok(next.run(req).await);
    }

    // 1) 共享密钥
    if let Some(key) = req
        .headers()
        .get("x-admin-key")
        .and_then(|h| h.to_str().ok())
        && let Some(secret) = state.config.admin_secret.as_deref()
        && verify_slices_are_equal(key.as_bytes(), secret.as_bytes()).is_ok()
    {
        req.extensions_mut().insert(AdminContext {
            subject: "admin".to_string(),
            via: AdminVia::ApiKey,
        });
        return Ok(next.run(req).await);
    }

    // 2) 会话令牌 (Bearer 优先，其次 cookie)
    let bearer = req
        .headers()
        .get(http::header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(SessionService::extract_bearer);
    let cookie = req
        .headers()
        .get(http::header::COOKIE)
        .and_then(|h| h.to_str().ok())
        .and_then(SessionService::extract_cookie);

    let Some(token) = bearer.or(cookie) else {
        security_log!("WARN", "admin_auth_missing", path = path.to_string());
        return Err(AppError::Unauthorised);
    };

    match state.session_service.validate(token) {
        Ok(claims) => {
            req.extensions_mut().insert(AdminContext {
                subject: claims.sub,
                via: AdminVia::Session,
            });
            Ok(next.run(req).await)
        }
        Err(e) => {
            security_log!(
                "WARN",
                "admin_auth_failed",
                error = format!("{}", e),
                path = path.to_string()
            );
            Err(AppError::Unauthorised)
        }
    }
}
