//! DTO 模块
//!
//! 数据传输对象定义。

pub mod question_dto;

pub use question_dto::*;
