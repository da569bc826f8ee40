//! Subject entity - 课程表
//!
//! 表名: edu_subject
//!
//! 课程通过 academy_name 字符串关联学院, 不是外键。
//! 学院删除/迁移时由 hierarchy::subject 按名称做对账处理。

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "edu_subject")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,

    /// 课程名称
    #[sea_orm(column_type = "String(Some(64))")]
    pub name: String,

    /// 所属学院名称 (冗余字段, 非外键)
    #[sea_orm(column_type = "String(Some(64))")]
    pub academy_name: String,

    /// 学分
    pub credit: f64,

    /// 简介
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
