//! Hierarchy store port - 层级存储契约
//!
//! 级联子系统消费的最小持久化接口: 按 id 查询, 全表查询, 按父节点查询,
//! 插入/整行保存/删除。实现方为 [`super::db_store::SeaOrmStore`];
//! 测试用内存实现见 `testing` 模块。

use async_trait::async_trait;

use crate::entity::{academy, major, student, sub_class, subject, teacher, total_class};
use crate::error::AppResult;

/// 层级存储契约。所有核心操作只依赖此 trait, 不持有任何框架句柄。
#[async_trait]
pub trait HierarchyStore: Send + Sync {
    // ---- 按 id 查询 ----
    async fn find_academy(&self, id: i64) -> AppResult<Option<academy::Model>>;
    async fn find_major(&self, id: i64) -> AppResult<Option<major::Model>>;
    async fn find_total_class(&self, id: i64) -> AppResult<Option<total_class::Model>>;
    async fn find_sub_class(&self, id: i64) -> AppResult<Option<sub_class::Model>>;
    async fn find_student(&self, id: i64) -> AppResult<Option<student::Model>>;
    async fn find_teacher(&self, id: i64) -> AppResult<Option<teacher::Model>>;

    // ---- 全表查询 (一致性检查 / 课程校验 / 快照) ----
    async fn find_all_academies(&self) -> AppResult<Vec<academy::Model>>;
    async fn find_all_majors(&self) -> AppResult<Vec<major::Model>>;
    async fn find_all_total_classes(&self) -> AppResult<Vec<total_class::Model>>;
    async fn find_all_sub_classes(&self) -> AppResult<Vec<sub_class::Model>>;
    async fn find_all_students(&self) -> AppResult<Vec<student::Model>>;
    async fn find_all_subjects(&self) -> AppResult<Vec<subject::Model>>;

    // ---- 按父节点查询 ----
    async fn majors_of_academy(&self, academy_id: i64) -> AppResult<Vec<major::Model>>;
    async fn total_classes_of_major(&self, major_id: i64) -> AppResult<Vec<total_class::Model>>;
    async fn sub_classes_of_total_class(
        &self,
        total_class_id: i64,
    ) -> AppResult<Vec<sub_class::Model>>;
    async fn students_of_sub_class(&self, sub_class_id: i64) -> AppResult<Vec<student::Model>>;
    async fn count_students_of_sub_class(&self, sub_class_id: i64) -> AppResult<u64>;

    /// (名称, 年级) 组合查询, 批量建树的幂等跳过依赖此查询
    async fn find_major_by_name_and_grade(
        &self,
        name: &str,
        grade: i32,
    ) -> AppResult<Option<major::Model>>;

    /// 按冗余学院名称查询课程
    async fn subjects_of_academy(&self, academy_name: &str) -> AppResult<Vec<subject::Model>>;

    // ---- 插入 (id 由存储分配) ----
    async fn insert_major(&self, model: major::Model) -> AppResult<major::Model>;
    async fn insert_total_class(&self, model: total_class::Model)
        -> AppResult<total_class::Model>;
    async fn insert_sub_class(&self, model: sub_class::Model) -> AppResult<sub_class::Model>;

    // ---- 整行保存 (重命名 / 改挂父节点) ----
    async fn save_academy(&self, model: academy::Model) -> AppResult<()>;
    async fn save_major(&self, model: major::Model) -> AppResult<()>;
    async fn save_total_class(&self, model: total_class::Model) -> AppResult<()>;
    async fn save_sub_class(&self, model: sub_class::Model) -> AppResult<()>;
    async fn save_student(&self, model: student::Model) -> AppResult<()>;
    async fn save_subject(&self, model: subject::Model) -> AppResult<()>;

    // ---- 删除 ----
    async fn delete_academy(&self, id: i64) -> AppResult<()>;
    async fn delete_major(&self, id: i64) -> AppResult<()>;
    async fn delete_total_class(&self, id: i64) -> AppResult<()>;
    async fn delete_sub_class(&self, id: i64) -> AppResult<()>;
    async fn delete_subject(&self, id: i64) -> AppResult<()>;

    /// 批量删除某小班下全部学生, 返回删除条数
    async fn delete_students_of_sub_class(&self, sub_class_id: i64) -> AppResult<u64>;
}
