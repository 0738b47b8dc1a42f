//! Public invite API 模块
//!
//! 令牌即身份：两条路由都不经过管理守卫。

mod handler;

use axum::{
    Router,
    routing::{get, post},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/api/client-and-gifts", get(handler::client_and_gifts))
        .route("/api/select-gift", post(handler::select_gift))
}
