//! Student entity - 学生表
//!
//! 表名: edu_student
//!
//! sub_class_id 在迁移过渡期间可为空。

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "edu_student")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,

    /// 学生姓名
    #[sea_orm(column_type = "String(Some(32))")]
    pub name: String,

    /// 学号
    #[sea_orm(column_type = "String(Some(32))", nullable)]
    pub student_no: Option<String>,

    /// 所属小班ID (可空)
    #[sea_orm(nullable)]
    pub sub_class_id: Option<i64>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
