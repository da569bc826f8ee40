//! Cascade engine - 级联删除 / 批量建树 / 学生迁移
//!
//! 每个公开函数是树上的一次原子状态迁移; 调用方 (handler) 负责
//! 把整次调用包在一个事务里, 任何错误使整体回滚。

use tracing::debug;

use crate::entity::{major, student, sub_class, total_class};
use crate::error::{AppError, AppResult};
use crate::hierarchy::store::HierarchyStore;
use crate::hierarchy::HierarchyLevel;

/// 级联删除 `level` 层级上的节点 `source_id`。
///
/// - `force` 为真: 自深向浅递归删除全部后代 (小班层级连带批量删除学生),
///   最后删除节点本身。
/// - `force` 为假: 必须给出同层级的 `target_id`, 把 `source_id` 的**直接子节点**
///   浅层改挂到目标节点后删除源节点; 孙代保持原挂接不动。
pub async fn cascade_delete(
    store: &dyn HierarchyStore,
    level: HierarchyLevel,
    source_id: i64,
    target_id: Option<i64>,
    force: bool,
) -> AppResult<()> {
    if !node_exists(store, level, source_id).await? {
        return Err(AppError::NotFound(format!("待删除的{}不存在", level.label())));
    }

    if force {
        if let Some(child_level) = level.child() {
            for child_id in child_ids(store, level, source_id).await? {
                Box::pin(cascade_delete(store, child_level, child_id, None, true)).await?;
            }
        } else {
            let removed = store.delete_students_of_sub_class(source_id).await?;
            debug!("删除小班 {} 下学生 {} 名", source_id, removed);
        }
        delete_node(store, level, source_id).await?;
        debug!("强制删除{}: id={}", level.label(), source_id);
        return Ok(());
    }

    let target_id = target_id
        .ok_or_else(|| AppError::BadRequest("必须指定迁移目标或选择强制删除".to_string()))?;
    if target_id == source_id {
        return Err(AppError::BadRequest("迁移目标不能是待删除节点本身".to_string()));
    }
    if !node_exists(store, level, target_id).await? {
        return Err(AppError::BadRequest("迁移目标不存在".to_string()));
    }

    reparent_children(store, level, source_id, target_id).await?;
    delete_node(store, level, source_id).await?;
    debug!(
        "迁移删除{}: id={} -> 目标 id={}",
        level.label(),
        source_id,
        target_id
    );
    Ok(())
}

/// 批量建树: 在 `academy_id` 学院下为每个专业名称建出
/// 专业 → 大班 → 小班 的子树。
///
/// 已存在的 (名称, 年级) 专业静默跳过 (幂等跳过, 不做更新)。
/// 大班命名 `"{专业}{年级}级{i}班"`, 小班命名 `"{大班}-{j}"`, 序号从 1 起。
pub async fn batch_create_subtree(
    store: &dyn HierarchyStore,
    academy_id: i64,
    grade: i32,
    major_names: &[String],
    total_class_count: u32,
    sub_class_count: u32,
) -> AppResult<()> {
    if store.find_academy(academy_id).await?.is_none() {
        return Err(AppError::NotFound("学院不存在".to_string()));
    }

    for major_name in major_names {
        if store
            .find_major_by_name_and_grade(major_name, grade)
            .await?
            .is_some()
        {
            debug!("专业已存在, 跳过: {} {}级", major_name, grade);
            continue;
        }

        let created_major = store
            .insert_major(major::Model {
                id: 0,
                name: major_name.clone(),
                grade,
                academy_id,
                counselor_id: None,
                description: None,
            })
            .await?;

        for i in 1..=total_class_count {
            let total_class_name = format!("{}{}级{}班", major_name, grade, i);
            let created_total = store
                .insert_total_class(total_class::Model {
                    id: 0,
                    name: total_class_name.clone(),
                    major_id: created_major.id,
                })
                .await?;

            for j in 1..=sub_class_count {
                store
                    .insert_sub_class(sub_class::Model {
                        id: 0,
                        name: format!("{}-{}", total_class_name, j),
                        total_class_id: created_total.id,
                    })
                    .await?;
            }
        }
    }

    Ok(())
}

/// 把列出的学生改挂到目标小班。
///
/// 目标小班不存在报 NotFound; 列表中不存在的学生 id 静默跳过,
/// 与其余 NotFound 路径的不对称是源系统的既定行为。
pub async fn migrate_students(
    store: &dyn HierarchyStore,
    student_ids: &[i64],
    target_sub_class_id: i64,
) -> AppResult<()> {
    if store.find_sub_class(target_sub_class_id).await?.is_none() {
        return Err(AppError::NotFound("目标小班不存在".to_string()));
    }

    for &student_id in student_ids {
        let Some(found) = store.find_student(student_id).await? else {
            debug!("学生不存在, 跳过迁移: id={}", student_id);
            continue;
        };
        store
            .save_student(student::Model {
                sub_class_id: Some(target_sub_class_id),
                ..found
            })
            .await?;
    }

    Ok(())
}

/// 节点在指定层级是否存在
pub(crate) async fn node_exists(
    store: &dyn HierarchyStore,
    level: HierarchyLevel,
    id: i64,
) -> AppResult<bool> {
    let found = match level {
        HierarchyLevel::Academy => store.find_academy(id).await?.is_some(),
        HierarchyLevel::Major => store.find_major(id).await?.is_some(),
        HierarchyLevel::TotalClass => store.find_total_class(id).await?.is_some(),
        HierarchyLevel::SubClass => store.find_sub_class(id).await?.is_some(),
    };
    Ok(found)
}

/// `level` 层级节点的直接下级节点 id (小班层级返回空, 学生单独处理)
pub(crate) async fn child_ids(
    store: &dyn HierarchyStore,
    level: HierarchyLevel,
    id: i64,
) -> AppResult<Vec<i64>> {
    let ids = match level {
        HierarchyLevel::Academy => store
            .majors_of_academy(id)
            .await?
            .into_iter()
            .map(|m| m.id)
            .collect(),
        HierarchyLevel::Major => store
            .total_classes_of_major(id)
            .await?
            .into_iter()
            .map(|t| t.id)
            .collect(),
        HierarchyLevel::TotalClass => store
            .sub_classes_of_total_class(id)
            .await?
            .into_iter()
            .map(|s| s.id)
            .collect(),
        HierarchyLevel::SubClass => Vec::new(),
    };
    Ok(ids)
}

/// 把 `source_id` 的直接子节点逐个改挂到 `target_id` (浅层迁移)
async fn reparent_children(
    store: &dyn HierarchyStore,
    level: HierarchyLevel,
    source_id: i64,
    target_id: i64,
) -> AppResult<()> {
    match level {
        HierarchyLevel::Academy => {
            for m in store.majors_of_academy(source_id).await? {
                store
                    .save_major(major::Model {
                        academy_id: target_id,
                        ..m
                    })
                    .await?;
            }
        }
        HierarchyLevel::Major => {
            for t in store.total_classes_of_major(source_id).await? {
                store
                    .save_total_class(total_class::Model {
                        major_id: target_id,
                        ..t
                    })
                    .await?;
            }
        }
        HierarchyLevel::TotalClass => {
            for s in store.sub_classes_of_total_class(source_id).await? {
                store
                    .save_sub_class(sub_class::Model {
                        total_class_id: target_id,
                        ..s
                    })
                    .await?;
            }
        }
        HierarchyLevel::SubClass => {
            for st in store.students_of_sub_class(source_id).await? {
                store
                    .save_student(student::Model {
                        sub_class_id: Some(target_id),
                        ..st
                    })
                    .await?;
            }
        }
    }
    Ok(())
}

async fn delete_node(
    store: &dyn HierarchyStore,
    level: HierarchyLevel,
    id: i64,
) -> AppResult<()> {
    match level {
        HierarchyLevel::Academy => store.delete_academy(id).await,
        HierarchyLevel::Major => store.delete_major(id).await,
        HierarchyLevel::TotalClass => store.delete_total_class(id).await,
        HierarchyLevel::SubClass => store.delete_sub_class(id).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hierarchy::testing::MemoryStore;

    fn seed_full_tree(store: &MemoryStore) -> (i64, i64, i64, i64, i64) {
        let a = store.seed_academy("工程学院");
        let m = store.seed_major(a, "计算机科学", 2025);
        let t = store.seed_total_class(m, "计算机科学2025级1班");
        let s = store.seed_sub_class(t, "计算机科学2025级1班-1");
        let st = store.seed_student(s, "Alice");
        (a, m, t, s, st)
    }

    #[tokio::test]
    async fn test_force_delete_removes_whole_subtree() {
        let store = MemoryStore::new();
        let (a, m, t, s, st) = seed_full_tree(&store);

        cascade_delete(&store, HierarchyLevel::Academy, a, None, true)
            .await
            .unwrap();

        assert!(store.find_academy(a).await.unwrap().is_none());
        assert!(store.find_major(m).await.unwrap().is_none());
        assert!(store.find_total_class(t).await.unwrap().is_none());
        assert!(store.find_sub_class(s).await.unwrap().is_none());
        assert!(store.find_student(st).await.unwrap().is_none());
        assert_eq!(store.record_count(), 0);
    }

    #[tokio::test]
    async fn test_force_delete_total_class_keeps_ancestors() {
        let store = MemoryStore::new();
        let (a, m, t, s, st) = seed_full_tree(&store);

        cascade_delete(&store, HierarchyLevel::TotalClass, t, None, true)
            .await
            .unwrap();

        assert!(store.find_total_class(t).await.unwrap().is_none());
        assert!(store.find_sub_class(s).await.unwrap().is_none());
        assert!(store.find_student(st).await.unwrap().is_none());
        assert!(store.find_academy(a).await.unwrap().is_some());
        assert!(store.find_major(m).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_migrate_delete_reparents_direct_children_only() {
        let store = MemoryStore::new();
        let a = store.seed_academy("工程学院");
        let b = store.seed_academy("理学院");
        let m1 = store.seed_major(a, "计算机科学", 2025);
        let m2 = store.seed_major(a, "软件工程", 2025);
        let t1 = store.seed_total_class(m1, "计算机科学2025级1班");

        cascade_delete(&store, HierarchyLevel::Academy, a, Some(b), false)
            .await
            .unwrap();

        assert!(store.find_academy(a).await.unwrap().is_none());
        assert_eq!(store.find_major(m1).await.unwrap().unwrap().academy_id, b);
        assert_eq!(store.find_major(m2).await.unwrap().unwrap().academy_id, b);
        // 孙代不动: 大班仍挂在原专业下
        assert_eq!(
            store.find_total_class(t1).await.unwrap().unwrap().major_id,
            m1
        );
    }

    #[tokio::test]
    async fn test_delete_missing_source_is_not_found() {
        let store = MemoryStore::new();
        let err = cascade_delete(&store, HierarchyLevel::Major, 42, None, true)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_migrate_delete_requires_valid_target() {
        let store = MemoryStore::new();
        let a = store.seed_academy("工程学院");

        let err = cascade_delete(&store, HierarchyLevel::Academy, a, None, false)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));

        let err = cascade_delete(&store, HierarchyLevel::Academy, a, Some(999), false)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));

        let err = cascade_delete(&store, HierarchyLevel::Academy, a, Some(a), false)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));

        // 源节点未被删除
        assert!(store.find_academy(a).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_batch_create_fans_out_with_deterministic_names() {
        let store = MemoryStore::new();
        let a = store.seed_academy("工程学院");

        batch_create_subtree(&store, a, 2025, &["计算机科学".to_string()], 2, 3)
            .await
            .unwrap();

        let majors = store.find_all_majors().await.unwrap();
        assert_eq!(majors.len(), 1);
        let totals = store.total_classes_of_major(majors[0].id).await.unwrap();
        assert_eq!(totals.len(), 2);
        assert_eq!(totals[0].name, "计算机科学2025级1班");
        assert_eq!(totals[1].name, "计算机科学2025级2班");
        let subs = store
            .sub_classes_of_total_class(totals[0].id)
            .await
            .unwrap();
        assert_eq!(subs.len(), 3);
        assert_eq!(subs[0].name, "计算机科学2025级1班-1");
        assert_eq!(subs[2].name, "计算机科学2025级1班-3");
    }

    #[tokio::test]
    async fn test_batch_create_skips_existing_majors() {
        let store = MemoryStore::new();
        let a = store.seed_academy("工程学院");
        let names = vec!["计算机科学".to_string()];

        batch_create_subtree(&store, a, 2025, &names, 2, 3)
            .await
            .unwrap();
        batch_create_subtree(&store, a, 2025, &names, 2, 3)
            .await
            .unwrap();

        assert_eq!(store.find_all_majors().await.unwrap().len(), 1);

        let more = vec!["计算机科学".to_string(), "电子工程".to_string()];
        batch_create_subtree(&store, a, 2025, &more, 1, 1)
            .await
            .unwrap();

        let majors = store.find_all_majors().await.unwrap();
        assert_eq!(majors.len(), 2);
        let ee = majors.iter().find(|m| m.name == "电子工程").unwrap();
        // 第二次调用只为新专业建班
        assert_eq!(store.total_classes_of_major(ee.id).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_batch_create_missing_academy() {
        let store = MemoryStore::new();
        let err = batch_create_subtree(&store, 7, 2025, &["数学".to_string()], 1, 1)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_migrate_students_skips_unknown_ids() {
        let store = MemoryStore::new();
        let (_, _, t, s, st) = seed_full_tree(&store);
        let s2 = store.seed_sub_class(t, "计算机科学2025级1班-2");

        migrate_students(&store, &[st, 99999], s2).await.unwrap();

        assert_eq!(
            store.find_student(st).await.unwrap().unwrap().sub_class_id,
            Some(s2)
        );
        assert!(store.students_of_sub_class(s).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_migrate_students_missing_target() {
        let store = MemoryStore::new();
        let (_, _, _, _, st) = seed_full_tree(&store);
        let err = migrate_students(&store, &[st], 424242).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }
}
