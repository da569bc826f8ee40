//! Hierarchy module - 层级一致性管理
//!
//! 维护 学院 → 专业 → 大班 → 小班 → 学生 四级树的引用与层级完整性:
//! 级联删除 (强制删除或迁移), 批量建树, 学生迁移, 删除预览,
//! 一致性检查, 批量更新, 以及学院-课程名称对账。
//!
//! 核心逻辑只依赖 [`store::HierarchyStore`] 端口; handler 层负责
//! 把每次公开调用包在一个数据库事务里。

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::AppError;

pub mod audit;
pub mod batch;
pub mod cascade;
pub mod db_store;
pub mod preview;
pub mod store;
pub mod subject;
pub mod tree;

#[cfg(test)]
pub(crate) mod testing;

/// 可被级联删除的树层级 (学生只作为小班的叶子记录处理)
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HierarchyLevel {
    Academy,
    Major,
    TotalClass,
    SubClass,
}

impl HierarchyLevel {
    /// 下一级层级, 小班之下是学生记录, 不再是层级节点
    pub fn child(self) -> Option<HierarchyLevel> {
        match self {
            HierarchyLevel::Academy => Some(HierarchyLevel::Major),
            HierarchyLevel::Major => Some(HierarchyLevel::TotalClass),
            HierarchyLevel::TotalClass => Some(HierarchyLevel::SubClass),
            HierarchyLevel::SubClass => None,
        }
    }

    /// 中文名称, 用于面向用户的消息
    pub fn label(self) -> &'static str {
        match self {
            HierarchyLevel::Academy => "学院",
            HierarchyLevel::Major => "专业",
            HierarchyLevel::TotalClass => "大班",
            HierarchyLevel::SubClass => "小班",
        }
    }
}

impl fmt::Display for HierarchyLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for HierarchyLevel {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ACADEMY" => Ok(HierarchyLevel::Academy),
            "MAJOR" => Ok(HierarchyLevel::Major),
            "TOTAL_CLASS" => Ok(HierarchyLevel::TotalClass),
            "SUB_CLASS" => Ok(HierarchyLevel::SubClass),
            other => Err(AppError::BadRequest(format!("不支持的层级类型: {}", other))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_chain() {
        assert_eq!(
            HierarchyLevel::Academy.child(),
            Some(HierarchyLevel::Major)
        );
        assert_eq!(HierarchyLevel::SubClass.child(), None);
    }

    #[test]
    fn test_level_parse() {
        assert_eq!(
            "TOTAL_CLASS".parse::<HierarchyLevel>().unwrap(),
            HierarchyLevel::TotalClass
        );
        assert!("CLASSROOM".parse::<HierarchyLevel>().is_err());
    }
}
