use std::sync::Arc;

use sqlx::SqlitePool;

use crate::auth::SessionService;
use crate::core::Config;
use crate::db::{DbService, seed};
use crate::utils::AppError;

/// 服务器状态 - 持有所有服务的共享引用
///
/// 使用 Arc / 连接池实现浅拷贝，所有权成本极低。
///
/// | 字段 | 说明 |
/// |------|------|
/// | config | 配置项 (不可变) |
/// | pool | SQLite 连接池 |
/// | session_service | 管理会话令牌服务 |
#[derive(Clone, Debug)]
pub struct ServerState {
    /// 服务器配置
    pub config: Config,
    /// SQLite 连接池
    pub pool: SqlitePool,
    /// 会话令牌服务 (Arc 共享所有权)
    pub session_service: Arc<SessionService>,
}

impl ServerState {
    /// 创建服务器状态 (手动构造，测试常用)
    pub fn new(config: Config, pool: SqlitePool, session_service: Arc<SessionService>) -> Self {
        Self {
            config,
            pool,
            session_service,
        }
    }

    /// 初始化服务器状态
    ///
    /// 按顺序：
    /// 1. 工作目录结构
    /// 2. 数据库 (WAL + 迁移)
    /// 3. 可选的目录种子
    /// 4. 会话服务
    pub async fn initialize(config: &Config) -> Result<Self, AppError> {
        config
            .ensure_work_dir_structure()
            .map_err(|e| AppError::internal(format!("Failed to create work directory: {e}")))?;

        let db_path = config.database_path();
        let db_service = DbService::new(&db_path.to_string_lossy()).await?;

        if config.seed_catalog {
            seed::seed_default_catalog(&db_service.pool).await?;
        }

        if config.admin_secret.is_none() {
            tracing::warn!("ADMIN_SECRET not set, the admin surface will reject every request");
        }

        let session_service = Arc::new(SessionService::new(config.session.clone()));

        Ok(Self::new(config.clone(), db_service.pool, session_service))
    }
}
