//! SubClass entity - 小班表
//!
//! 表名: edu_sub_class
//!
//! 名称在所属大班内唯一, 学生的直接父节点。

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "edu_sub_class")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,

    /// 小班名称
    #[sea_orm(column_type = "String(Some(64))")]
    pub name: String,

    /// 所属大班ID
    pub total_class_id: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
