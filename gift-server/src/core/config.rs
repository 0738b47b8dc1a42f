use std::path::PathBuf;

use crate::auth::SessionConfig;

/// 服务器配置
///
/// # 环境变量
///
/// | 环境变量 | 默认值 | 说明 |
/// |----------|--------|------|
/// | WORK_DIR | ./data | 工作目录 (数据库所在) |
/// | DATABASE_PATH | WORK_DIR/database/gifts.db | SQLite 文件路径覆盖 |
/// | HTTP_PORT | 3000 | HTTP 服务端口 |
/// | BASE_URL | (空) | 邀请链接基础地址 |
/// | ADMIN_SECRET | (未设置) | 管理端共享密钥 |
/// | SESSION_SECRET | 进程内生成 | 会话令牌签名密钥 |
/// | SESSION_TTL_MINUTES | 720 | 会话时效 |
/// | ENVIRONMENT | development | 运行环境 |
/// | LOG_DIR | (未设置) | 日志文件目录 (按日滚动) |
/// | SEED_CATALOG | (未设置) | 为 1/true 时启动种子目录 |
///
/// # 示例
///
/// ```ignore
/// WORK_DIR=/data/gifts HTTP_PORT=8080 ADMIN_SECRET=... cargo run
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// 工作目录，存储数据库、日志等文件
    pub work_dir: String,
    /// HTTP API 服务端口
    pub http_port: u16,
    /// 邀请链接基础地址 (invite URL = base_url?t=<token>)
    pub base_url: String,
    /// 管理端共享密钥；未设置时登录与 x-admin-key 均被拒绝
    pub admin_secret: Option<String>,
    /// 会话令牌配置
    pub session: SessionConfig,
    /// 运行环境: development | staging | production
    pub environment: String,
    /// SQLite 文件路径覆盖
    pub database_path: Option<String>,
    /// 日志目录 (可选)
    pub log_dir: Option<String>,
    /// 启动时是否种子默认目录
    pub seed_catalog: bool,
}

impl Config {
    /// 从环境变量加载配置
    ///
    /// 如果环境变量未设置，使用默认值
    pub fn from_env() -> Self {
        Self {
            work_dir: std::env::var("WORK_DIR").unwrap_or_else(|_| "./data".into()),
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            base_url: std::env::var("BASE_URL").unwrap_or_default(),
            admin_secret: std::env::var("ADMIN_SECRET").ok().filter(|s| !s.is_empty()),
            session: SessionConfig::default(),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
            database_path: std::env::var("DATABASE_PATH").ok(),
            log_dir: std::env::var("LOG_DIR").ok(),
            seed_catalog: std::env::var("SEED_CATALOG")
                .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
                .unwrap_or(false),
        }
    }

    /// 数据库目录 (WORK_DIR/database)
    pub fn database_dir(&self) -> PathBuf {
        PathBuf::from(&self.work_dir).join("database")
    }

    /// SQLite 文件路径
    pub fn database_path(&self) -> PathBuf {
        match &self.database_path {
            Some(path) => PathBuf::from(path),
            None => self.database_dir().join("gifts.db"),
        }
    }

    /// 确保工作目录结构存在
    pub fn ensure_work_dir_structure(&self) -> std::io::Result<()> {
        std::fs::create_dir_all(self.database_dir())?;
        if let Some(parent) = self.database_path().parent() {
            std::fs::create_dir_all(parent)?;
        }
        Ok(())
    }

    /// 构造邀请链接 (token 为 hex，无需转义)
    pub fn invite_url(&self, token: &str) -> String {
        format!("{}?t={}", self.base_url, token)
    }

    /// 是否生产环境
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// 是否开发环境
    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
