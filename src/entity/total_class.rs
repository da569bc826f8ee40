//! TotalClass entity - 大班表
//!
//! 表名: edu_total_class
//!
//! 名称在所属专业内唯一。

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "edu_total_class")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,

    /// 大班名称
    #[sea_orm(column_type = "String(Some(64))")]
    pub name: String,

    /// 所属专业ID
    pub major_id: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
