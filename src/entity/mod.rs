//! Entity module - SeaORM 实体定义
//!
//! 包含所有数据库表对应的实体模型

pub mod academy;
pub mod major;
pub mod op_log;
pub mod student;
pub mod sub_class;
pub mod subject;
pub mod teacher;
pub mod total_class;
