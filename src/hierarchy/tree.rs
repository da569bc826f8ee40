//! Hierarchy snapshot - 层级树快照
//!
//! 供查询接口返回的嵌套树结构 (学院 → 专业 → 大班 → 小班 + 学生人数)。
//! 只读, 不加锁; 相对并发写入的轻微陈旧是可接受的。

use serde::Serialize;

use crate::error::AppResult;
use crate::hierarchy::store::HierarchyStore;

#[derive(Debug, Clone, Serialize)]
pub struct SubClassNode {
    pub id: i64,
    pub name: String,
    #[serde(rename = "studentCount")]
    pub student_count: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct TotalClassNode {
    pub id: i64,
    pub name: String,
    #[serde(rename = "subClasses", skip_serializing_if = "Vec::is_empty")]
    pub sub_classes: Vec<SubClassNode>,
}

#[derive(Debug, Clone, Serialize)]
pub struct MajorNode {
    pub id: i64,
    pub name: String,
    pub grade: i32,
    #[serde(rename = "totalClasses", skip_serializing_if = "Vec::is_empty")]
    pub total_classes: Vec<TotalClassNode>,
}

#[derive(Debug, Clone, Serialize)]
pub struct AcademyNode {
    pub id: i64,
    pub name: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub majors: Vec<MajorNode>,
}

/// 构建整棵层级树的快照
pub async fn build_tree(store: &dyn HierarchyStore) -> AppResult<Vec<AcademyNode>> {
    let mut academies = Vec::new();

    for a in store.find_all_academies().await? {
        let mut majors = Vec::new();
        for m in store.majors_of_academy(a.id).await? {
            let mut total_classes = Vec::new();
            for t in store.total_classes_of_major(m.id).await? {
                let mut sub_classes = Vec::new();
                for s in store.sub_classes_of_total_class(t.id).await? {
                    let student_count = store.count_students_of_sub_class(s.id).await?;
                    sub_classes.push(SubClassNode {
                        id: s.id,
                        name: s.name,
                        student_count,
                    });
                }
                total_classes.push(TotalClassNode {
                    id: t.id,
                    name: t.name,
                    sub_classes,
                });
            }
            majors.push(MajorNode {
                id: m.id,
                name: m.name,
                grade: m.grade,
                total_classes,
            });
        }
        academies.push(AcademyNode {
            id: a.id,
            name: a.name,
            majors,
        });
    }

    Ok(academies)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hierarchy::testing::MemoryStore;

    #[tokio::test]
    async fn test_snapshot_shape() {
        let store = MemoryStore::new();
        let a = store.seed_academy("工程学院");
        store.seed_academy("理学院");
        let m = store.seed_major(a, "计算机科学", 2025);
        let t = store.seed_total_class(m, "计算机科学2025级1班");
        let s = store.seed_sub_class(t, "计算机科学2025级1班-1");
        store.seed_student(s, "Alice");
        store.seed_student(s, "Bob");

        let tree = build_tree(&store).await.unwrap();
        assert_eq!(tree.len(), 2);
        assert_eq!(tree[0].majors.len(), 1);
        assert_eq!(tree[0].majors[0].grade, 2025);
        assert_eq!(tree[0].majors[0].total_classes[0].sub_classes[0].student_count, 2);
        assert!(tree[1].majors.is_empty());
    }
}
