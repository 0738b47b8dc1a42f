//! 管理端认证
//!
//! 共享密钥 + 会话令牌两种方式：
//! - `x-admin-key` 头直接携带共享密钥
//! - 登录后签发的 HS256 会话令牌 (cookie 或 Bearer)
//!
//! 所有 `/api/admin/*` 操作入口统一由 [`require_admin`] 守卫。

pub mod middleware;
pub mod session;

pub use middleware::{AdminContext, AdminVia, require_admin};
pub use session::{SESSION_COOKIE, SessionClaims, SessionConfig, SessionError, SessionService};
