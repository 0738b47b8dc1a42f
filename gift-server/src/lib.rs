//! Gift Server - 客户邀请与一次性礼品选择服务
//!
//! # 架构概述
//!
//! 机构向客户发送带令牌的邀请链接；客户浏览礼品目录并且只能提交
//! 一次选择。核心正确性契约是单次选择提交协议：并发提交下至多一个
//! 成功，其余观察到既有选择。
//!
//! # 模块结构
//!
//! ```text
//! gift-server/src/
//! ├── core/          # 配置、状态、路由组装与启动
//! ├── auth/          # 管理端会话令牌 + 守卫
//! ├── api/           # HTTP 路由和处理器
//! ├── db/            # 连接池、迁移、仓储、种子
//! ├── selection/     # 单次选择提交协议 (核心)
//! └── utils/         # 错误、日志、输入校验
//! ```

pub mod api;
pub mod auth;
pub mod core;
pub mod db;
pub mod selection;
pub mod utils;

// Re-export 公共类型
pub use auth::{AdminContext, SessionConfig, SessionService};
pub use selection::SelectionOutcome;
pub use self::core::{Config, Server, ServerState, build_app};
pub use utils::{AppError, AppResult};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};

// Security logging macro - 支持 tracing 格式说明符
#[macro_export]
macro_rules! security_log {
    ($level:expr, $event:expr, $($key:ident = $value:expr),*) => {
        tracing::info!(
            target: "security",
            level = $level,
            event = $event,
            $($key = $value),*
        );
    };
}

/// 设置进程环境：.env + 日志
pub fn setup_environment() {
    dotenv::dotenv().ok();

    let log_level = std::env::var("LOG_LEVEL").ok();
    let log_dir = std::env::var("LOG_DIR").ok();
    utils::logger::init_logger_with_file(log_level.as_deref(), log_dir.as_deref());
}

pub fn print_banner() {
    println!(
        r#"
   ______ _  ______
  / ____/(_)/ __/ /_
 / / __ / // /_/ __/
/ /_/ // // __/ /_
\____//_//_/  \__/
   _____
  / ___/___  ______   _____  _____
  \__ \/ _ \/ ___/ | / / _ \/ ___/
 ___/ /  __/ /   | |/ /  __/ /
/____/\___/_/    |___/\___/_/
    "#
    );
}
