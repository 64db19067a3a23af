//! Handlers 模块
//!
//! HTTP 请求处理程序。

pub mod home_handler;
pub mod question_handler;

pub use home_handler::*;
pub use question_handler::*;
