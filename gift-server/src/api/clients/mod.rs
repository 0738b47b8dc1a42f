//! 客户管理 API 模块 (admin)

mod handler;
mod transfer;

use axum::{
    Router,
    routing::{get, post, put},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/admin/clients", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list).post(handler::create))
        .route("/import", post(handler::import))
        .route("/export", get(handler::export))
        .route(
            "/{id}",
            put(handler::update).delete(handler::delete_client),
        )
}
