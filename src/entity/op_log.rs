//! OpLog entity - 操作日志表
//!
//! 表名: edu_op_log
//!
//! 认证在本核心范围之外, 日志不记录操作者身份。

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "edu_op_log")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,

    /// 操作时间 (Unix 时间戳)
    pub op_time: i64,

    /// 操作类型
    #[sea_orm(column_type = "String(Some(32))")]
    pub op_type: String,

    /// 操作描述
    #[sea_orm(column_type = "Text")]
    pub op_desc: String,

    /// 操作结果
    #[sea_orm(column_type = "String(Some(16))")]
    pub result: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
