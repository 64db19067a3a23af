//! Eightball - 确定性的魔力 8 号球问答服务
//!
//! 用户提交问题，服务根据问题文本稳定地选出 20 条固定答案之一，
//! 并在内存中按时间倒序保存问答历史。

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod observability;
pub mod security;
pub mod services;
