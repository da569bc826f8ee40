//! Major entity - 专业表
//!
//! 表名: edu_major
//!
//! (名称, 年级) 组合全局唯一。

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "edu_major")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,

    /// 专业名称
    #[sea_orm(column_type = "String(Some(64))")]
    pub name: String,

    /// 年级 (入学年份)
    pub grade: i32,

    /// 所属学院ID
    pub academy_id: i64,

    /// 辅导员ID (教师, 可空)
    #[sea_orm(nullable)]
    pub counselor_id: Option<i64>,

    /// 简介
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
