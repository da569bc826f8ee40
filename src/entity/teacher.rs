//! Teacher entity - 教师表
//!
//! 表名: edu_teacher
//!
//! 级联子系统只按 id 查询教师 (辅导员校验), 其余教师管理在本核心范围之外。

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "edu_teacher")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,

    /// 教师姓名
    #[sea_orm(column_type = "String(Some(32))")]
    pub name: String,

    /// 职称
    #[sea_orm(column_type = "String(Some(32))", nullable)]
    pub title: Option<String>,

    /// 联系电话
    #[sea_orm(column_type = "String(Some(32))", nullable)]
    pub phone: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
