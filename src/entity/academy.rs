//! Academy entity - 学院表
//!
//! 表名: edu_academy

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "edu_academy")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,

    /// 学院名称 (全局唯一)
    #[sea_orm(column_type = "String(Some(64))", unique)]
    pub name: String,

    /// 学院编码 (唯一, 可空)
    #[sea_orm(column_type = "String(Some(32))", nullable, unique)]
    pub code: Option<String>,

    /// 院长
    #[sea_orm(column_type = "String(Some(32))", nullable)]
    pub dean: Option<String>,

    /// 联系电话
    #[sea_orm(column_type = "String(Some(32))", nullable)]
    pub phone: Option<String>,

    /// 地址
    #[sea_orm(column_type = "String(Some(128))", nullable)]
    pub address: Option<String>,

    /// 简介
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

// 学院与专业的层级关系通过 major.academy_id 手动查询处理

impl ActiveModelBehavior for ActiveModel {}
