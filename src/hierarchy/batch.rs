//! Batch mutation applicator - 批量更新
//!
//! 对任一层级的一组节点应用重命名 / 改挂父节点 / 附加字段更新。
//! 任一条目的 NotFound 中止整批 (调用方的事务保证整体回滚),
//! 与批量建树的"存在即跳过"策略不同, 这是源系统的既定差异。

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::error::{AppError, AppResult};
use crate::hierarchy::store::HierarchyStore;
use crate::hierarchy::HierarchyLevel;

/// 单条批量更新条目。除固定字段外, 层级相关的附加字段
/// (学院: code/dean/phone/address, 专业: grade/counselorId)
/// 通过打平的键值包传入。
#[derive(Debug, Clone, Deserialize)]
pub struct BatchUpdateItem {
    pub id: i64,
    pub name: Option<String>,
    #[serde(rename = "parentId")]
    pub parent_id: Option<i64>,
    pub description: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// 对 `update_type` 层级应用整批更新。
///
/// 空列表与不支持的类型报 BadRequest; 条目或新父节点不存在报 NotFound
/// 并中止整批。
pub async fn batch_update(
    store: &dyn HierarchyStore,
    update_type: &str,
    updates: &[BatchUpdateItem],
) -> AppResult<()> {
    if updates.is_empty() {
        return Err(AppError::BadRequest("更新列表不能为空".to_string()));
    }
    let level: HierarchyLevel = update_type.parse()?;

    for item in updates {
        match level {
            HierarchyLevel::Academy => update_academy(store, item).await?,
            HierarchyLevel::Major => update_major(store, item).await?,
            HierarchyLevel::TotalClass => update_total_class(store, item).await?,
            HierarchyLevel::SubClass => update_sub_class(store, item).await?,
        }
    }

    Ok(())
}

fn extra_str(extra: &Map<String, Value>, key: &str) -> Option<String> {
    extra.get(key).and_then(Value::as_str).map(str::to_string)
}

async fn update_academy(store: &dyn HierarchyStore, item: &BatchUpdateItem) -> AppResult<()> {
    let mut found = store
        .find_academy(item.id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("学院不存在: id={}", item.id)))?;

    // 学院是顶级节点, parentId 无意义, 忽略
    if let Some(name) = &item.name {
        found.name = name.clone();
    }
    if let Some(description) = &item.description {
        found.description = Some(description.clone());
    }
    if let Some(code) = extra_str(&item.extra, "code") {
        found.code = Some(code);
    }
    if let Some(dean) = extra_str(&item.extra, "dean") {
        found.dean = Some(dean);
    }
    if let Some(phone) = extra_str(&item.extra, "phone") {
        found.phone = Some(phone);
    }
    if let Some(address) = extra_str(&item.extra, "address") {
        found.address = Some(address);
    }

    store.save_academy(found).await
}

async fn update_major(store: &dyn HierarchyStore, item: &BatchUpdateItem) -> AppResult<()> {
    let mut found = store
        .find_major(item.id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("专业不存在: id={}", item.id)))?;

    if let Some(name) = &item.name {
        found.name = name.clone();
    }
    if let Some(parent_id) = item.parent_id {
        if store.find_academy(parent_id).await?.is_none() {
            return Err(AppError::NotFound(format!("目标学院不存在: id={}", parent_id)));
        }
        found.academy_id = parent_id;
    }
    if let Some(description) = &item.description {
        found.description = Some(description.clone());
    }
    if let Some(grade) = item.extra.get("grade").and_then(Value::as_i64) {
        found.grade = grade as i32;
    }
    if let Some(counselor_id) = item.extra.get("counselorId").and_then(Value::as_i64) {
        if store.find_teacher(counselor_id).await?.is_none() {
            return Err(AppError::NotFound(format!("辅导员不存在: id={}", counselor_id)));
        }
        found.counselor_id = Some(counselor_id);
    }

    store.save_major(found).await
}

async fn update_total_class(store: &dyn HierarchyStore, item: &BatchUpdateItem) -> AppResult<()> {
    let mut found = store
        .find_total_class(item.id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("大班不存在: id={}", item.id)))?;

    if let Some(name) = &item.name {
        found.name = name.clone();
    }
    if let Some(parent_id) = item.parent_id {
        if store.find_major(parent_id).await?.is_none() {
            return Err(AppError::NotFound(format!("目标专业不存在: id={}", parent_id)));
        }
        found.major_id = parent_id;
    }

    store.save_total_class(found).await
}

async fn update_sub_class(store: &dyn HierarchyStore, item: &BatchUpdateItem) -> AppResult<()> {
    let mut found = store
        .find_sub_class(item.id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("小班不存在: id={}", item.id)))?;

    if let Some(name) = &item.name {
        found.name = name.clone();
    }
    if let Some(parent_id) = item.parent_id {
        if store.find_total_class(parent_id).await?.is_none() {
            return Err(AppError::NotFound(format!("目标大班不存在: id={}", parent_id)));
        }
        found.total_class_id = parent_id;
    }

    store.save_sub_class(found).await
}
