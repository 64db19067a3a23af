//! Routes 模块
//!
//! 定义 API 路由。

pub mod home_routes;
pub mod question_routes;
