//! 统一错误处理
//!
//! 提供应用级错误类型 [`AppError`] 及其 HTTP 映射。
//!
//! # 错误码规范
//!
//! | 错误码 | HTTP | 说明 |
//! |--------|------|------|
//! | MISSING_TOKEN | 400 | 请求缺少邀请令牌 |
//! | INVALID_INPUT | 400 | 请求字段缺失或不合法 |
//! | INVALID_GIFT | 400 | 礼品不存在或已下架 |
//! | NOT_FOUND | 404 | 资源不存在 |
//! | UNAUTHORISED | 401 | 管理端认证失败 |
//! | CONFLICT | 409 | 唯一约束冲突 (slug 重复等) |
//! | SERVER_ERROR | 500 | 数据库或内部错误，细节只进日志 |
//!
//! `ALREADY_SELECTED` (409) 不在此枚举中：它携带既有选择，由
//! selection handler 直接构造响应。

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use tracing::error;

use crate::db::repository::RepoError;

/// Error body for every failure response: `{"error": "<CODE>"}`
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: &'static str,
}

/// 应用错误枚举
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    // ========== 客户端输入错误 (4xx) ==========
    #[error("Missing invite token")]
    /// 请求缺少令牌 (400)
    MissingToken,

    #[error("Invalid input: {0}")]
    /// 字段缺失或不合法 (400)
    InvalidInput(String),

    #[error("Gift not selectable: {0}")]
    /// 礼品不可选 (400)
    InvalidGift(String),

    #[error("Resource not found: {0}")]
    /// 资源不存在 (404)
    NotFound(String),

    #[error("Authentication required")]
    /// 管理端未认证 (401)
    Unauthorised,

    #[error("Resource conflict: {0}")]
    /// 唯一约束冲突 (409)
    Conflict(String),

    // ========== 系统错误 (5xx) ==========
    #[error("Database error: {0}")]
    /// 数据库错误 (500)
    Database(String),

    #[error("Internal server error: {0}")]
    /// 内部错误 (500)
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = match &self {
            AppError::MissingToken => (StatusCode::BAD_REQUEST, "MISSING_TOKEN"),
            AppError::InvalidInput(_) => (StatusCode::BAD_REQUEST, "INVALID_INPUT"),
            AppError::InvalidGift(_) => (StatusCode::BAD_REQUEST, "INVALID_GIFT"),
            AppError::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            AppError::Unauthorised => (StatusCode::UNAUTHORIZED, "UNAUTHORISED"),
            AppError::Conflict(_) => (StatusCode::CONFLICT, "CONFLICT"),

            // Store/internal faults: uniform SERVER_ERROR, detail only logged
            AppError::Database(msg) => {
                error!(target: "database", error = %msg, "Database error occurred");
                (StatusCode::INTERNAL_SERVER_ERROR, "SERVER_ERROR")
            }
            AppError::Internal(msg) => {
                error!(target: "internal", error = %msg, "Internal error occurred");
                (StatusCode::INTERNAL_SERVER_ERROR, "SERVER_ERROR")
            }
        };

        (status, Json(ErrorBody { error: code })).into_response()
    }
}

// ========== Helper Constructors ==========

impl AppError {
    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Create a not found error
    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::NotFound(resource.into())
    }

    /// Create a conflict error
    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::Conflict(msg.into())
    }

    /// Create a database error
    pub fn database(msg: impl Into<String>) -> Self {
        Self::Database(msg.into())
    }

    /// Create an internal error
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }
}

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound(msg) => AppError::NotFound(msg),
            RepoError::Duplicate(msg) => AppError::Conflict(msg),
            RepoError::Database(msg) => AppError::Database(msg),
        }
    }
}
