//! Delete preview - 删除影响预览
//!
//! 只读地走一遍与强制删除完全相同的子树遍历, 产出缩进嵌套的
//! 节点清单与受影响记录总数 (含学生), 不做任何修改。

use serde::Serialize;

use crate::error::AppResult;
use crate::hierarchy::cascade::{child_ids, node_exists};
use crate::hierarchy::store::HierarchyStore;
use crate::hierarchy::HierarchyLevel;

/// 删除预览结果
#[derive(Debug, Clone, Serialize)]
pub struct DeletePreview {
    #[serde(rename = "canDelete")]
    pub can_delete: bool,
    pub message: String,
    /// 缩进嵌套的待删除节点清单
    pub items: Vec<String>,
    /// 强制删除将移除的记录总数 (含学生)
    #[serde(rename = "affectedRecords")]
    pub affected_records: u64,
}

/// 计算强制删除 `source_id` 的影响范围。
///
/// 节点不存在时返回 `can_delete = false` 与提示消息, 不报错。
pub async fn delete_preview(
    store: &dyn HierarchyStore,
    level: HierarchyLevel,
    source_id: i64,
) -> AppResult<DeletePreview> {
    if !node_exists(store, level, source_id).await? {
        return Ok(DeletePreview {
            can_delete: false,
            message: format!("待删除的{}不存在", level.label()),
            items: Vec::new(),
            affected_records: 0,
        });
    }

    let mut items = Vec::new();
    let mut count = 0u64;
    collect(store, level, source_id, 0, &mut items, &mut count).await?;

    Ok(DeletePreview {
        can_delete: true,
        message: format!("此操作将级联删除 {} 条记录, 且不可恢复", count),
        items,
        affected_records: count,
    })
}

fn indent(depth: usize) -> String {
    "  ".repeat(depth)
}

/// 与 cascade_delete 的强制路径同构的遍历, 只收集不删除
async fn collect(
    store: &dyn HierarchyStore,
    level: HierarchyLevel,
    id: i64,
    depth: usize,
    items: &mut Vec<String>,
    count: &mut u64,
) -> AppResult<()> {
    let name = node_name(store, level, id).await?;
    items.push(format!("{}{}: {} (id={})", indent(depth), level.label(), name, id));
    *count += 1;

    if let Some(child_level) = level.child() {
        for child_id in child_ids(store, level, id).await? {
            Box::pin(collect(store, child_level, child_id, depth + 1, items, count)).await?;
        }
    } else {
        for stu in store.students_of_sub_class(id).await? {
            items.push(format!("{}学生: {} (id={})", indent(depth + 1), stu.name, stu.id));
            *count += 1;
        }
    }

    Ok(())
}

async fn node_name(
    store: &dyn HierarchyStore,
    level: HierarchyLevel,
    id: i64,
) -> AppResult<String> {
    let name = match level {
        HierarchyLevel::Academy => store.find_academy(id).await?.map(|a| a.name),
        HierarchyLevel::Major => store.find_major(id).await?.map(|m| m.name),
        HierarchyLevel::TotalClass => store.find_total_class(id).await?.map(|t| t.name),
        HierarchyLevel::SubClass => store.find_sub_class(id).await?.map(|s| s.name),
    };
    Ok(name.unwrap_or_default())
}
