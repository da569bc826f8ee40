//! Consistency auditor - 层级一致性检查
//!
//! 全量只读扫描四级树, 找出悬空的父引用 (例如中断操作留下的孤儿记录)。
//! 违规只进报告, 不作为错误抛出; 只有存储层 I/O 失败才返回 Err。

use std::collections::HashSet;

use serde::Serialize;

use crate::error::AppResult;
use crate::hierarchy::store::HierarchyStore;

/// 一致性检查报告
#[derive(Debug, Clone, Default, Serialize)]
pub struct ConsistencyReport {
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl ConsistencyReport {
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }
}

/// 逐层核对每个子节点存储的父引用是否指向仍然存在的父节点。
///
/// 错误: 专业/大班/小班/学生的父 id 解析不到任何记录。
/// 警告: 学生未分配小班 (迁移过渡态), 专业辅导员查无此人。
pub async fn check_consistency(store: &dyn HierarchyStore) -> AppResult<ConsistencyReport> {
    let mut report = ConsistencyReport::default();

    let academy_ids: HashSet<i64> = store
        .find_all_academies()
        .await?
        .into_iter()
        .map(|a| a.id)
        .collect();

    let majors = store.find_all_majors().await?;
    let mut major_ids = HashSet::new();
    for m in &majors {
        major_ids.insert(m.id);
        if !academy_ids.contains(&m.academy_id) {
            report.errors.push(format!(
                "专业 {} (id={}) 引用了不存在的学院 id={}",
                m.name, m.id, m.academy_id
            ));
        }
        if let Some(counselor_id) = m.counselor_id {
            if store.find_teacher(counselor_id).await?.is_none() {
                report.warnings.push(format!(
                    "专业 {} (id={}) 的辅导员 id={} 查无此人",
                    m.name, m.id, counselor_id
                ));
            }
        }
    }

    let total_classes = store.find_all_total_classes().await?;
    let mut total_class_ids = HashSet::new();
    for t in &total_classes {
        total_class_ids.insert(t.id);
        if !major_ids.contains(&t.major_id) {
            report.errors.push(format!(
                "大班 {} (id={}) 引用了不存在的专业 id={}",
                t.name, t.id, t.major_id
            ));
        }
    }

    let sub_classes = store.find_all_sub_classes().await?;
    let mut sub_class_ids = HashSet::new();
    for s in &sub_classes {
        sub_class_ids.insert(s.id);
        if !total_class_ids.contains(&s.total_class_id) {
            report.errors.push(format!(
                "小班 {} (id={}) 引用了不存在的大班 id={}",
                s.name, s.id, s.total_class_id
            ));
        }
    }

    for st in store.find_all_students().await? {
        match st.sub_class_id {
            Some(sub_class_id) if !sub_class_ids.contains(&sub_class_id) => {
                report.errors.push(format!(
                    "学生 {} (id={}) 引用了不存在的小班 id={}",
                    st.name, st.id, sub_class_id
                ));
            }
            None => {
                report
                    .warnings
                    .push(format!("学生 {} (id={}) 未分配小班", st.name, st.id));
            }
            _ => {}
        }
    }

    Ok(report)
}
