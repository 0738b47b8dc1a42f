//! API 路由模块
//!
//! # 结构
//!
//! - [`health`] - 健康检查
//! - [`invite`] - 公共邀请接口 (令牌认证)
//! - [`auth`] - 管理端登录/会话
//! - [`clients`] - 客户管理接口 (含 CSV 导入/导出)
//! - [`gifts`] - 礼品目录管理接口

pub mod auth;
pub mod clients;
pub mod gifts;
pub mod health;
pub mod invite;
