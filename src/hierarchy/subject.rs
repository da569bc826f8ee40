//! Academy-subject reconciliation - 学院课程对账
//!
//! 课程按冗余的学院名称字符串关联学院 (非外键, 源系统的既定设计)。
//! 删除学院时必须按名称做对账: 有目标学院则迁移, 名称冲突的课程
//! 直接删除而不迁移; 无目标学院则整体删除。

use std::collections::{HashMap, HashSet};

use tracing::debug;

use crate::entity::subject;
use crate::error::{AppResult, OptionExt};
use crate::hierarchy::store::HierarchyStore;

/// 学院删除时的课程对账。
///
/// 必须在删除学院行**之前**调用 (需要按 id 解析学院名称),
/// 与树删除同处一个事务。
pub async fn cascade_delete_academy_subjects(
    store: &dyn HierarchyStore,
    academy_id: i64,
    target_academy_id: Option<i64>,
) -> AppResult<()> {
    let source = store
        .find_academy(academy_id)
        .await?
        .ok_or_not_found("学院不存在")?;

    let Some(target_id) = target_academy_id else {
        for s in store.subjects_of_academy(&source.name).await? {
            store.delete_subject(s.id).await?;
        }
        return Ok(());
    };

    let target = store
        .find_academy(target_id)
        .await?
        .ok_or_not_found("目标学院不存在")?;

    let taken: HashSet<String> = store
        .subjects_of_academy(&target.name)
        .await?
        .into_iter()
        .map(|s| s.name)
        .collect();

    for s in store.subjects_of_academy(&source.name).await? {
        if taken.contains(&s.name) {
            // 目标学院已有同名课程, 冲突课程直接删除而不迁移
            debug!("课程名称冲突, 删除: {} (id={})", s.name, s.id);
            store.delete_subject(s.id).await?;
        } else {
            store
                .save_subject(subject::Model {
                    academy_name: target.name.clone(),
                    ..s
                })
                .await?;
        }
    }

    Ok(())
}

/// 全量校验课程数据: 缺失的学院/课程名称, 非正学分,
/// 重复的 (学院, 名称) 组合。返回人类可读的错误清单。
pub async fn validate_subject_data_integrity(store: &dyn HierarchyStore) -> AppResult<Vec<String>> {
    let mut errors = Vec::new();
    let mut seen: HashMap<(String, String), u32> = HashMap::new();

    for s in store.find_all_subjects().await? {
        if s.academy_name.trim().is_empty() {
            errors.push(format!("课程 id={} 缺少学院名称", s.id));
        }
        if s.name.trim().is_empty() {
            errors.push(format!("课程 id={} 缺少课程名称", s.id));
        }
        if s.credit <= 0.0 {
            errors.push(format!(
                "课程 {} (id={}) 学分非正: {}",
                s.name, s.id, s.credit
            ));
        }
        *seen
            .entry((s.academy_name.clone(), s.name.clone()))
            .or_insert(0) += 1;
    }

    for ((academy_name, name), count) in seen {
        if count > 1 {
            errors.push(format!(
                "重复课程: 学院 {} 下存在 {} 门名为 {} 的课程",
                academy_name, count, name
            ));
        }
    }

    Ok(errors)
}
