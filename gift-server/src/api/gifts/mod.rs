//! 礼品目录管理 API 模块 (admin)

mod handler;

use axum::{
    Router,
    routing::{get, put},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/admin/gifts", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list).post(handler::create))
        // 没有 DELETE：下架 (isActive=false) 是唯一的退役路径
        .route("/{id}", put(handler::update))
}
