//! 测试用内存层级存储
//!
//! 用 BTreeMap 模拟各表, 保证按 id 的确定性顺序,
//! 让级联属性在没有数据库的情况下可测。

use std::collections::BTreeMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::entity::{academy, major, student, sub_class, subject, teacher, total_class};
use crate::error::AppResult;
use crate::hierarchy::store::HierarchyStore;

#[derive(Default)]
struct Inner {
    academies: BTreeMap<i64, academy::Model>,
    majors: BTreeMap<i64, major::Model>,
    total_classes: BTreeMap<i64, total_class::Model>,
    sub_classes: BTreeMap<i64, sub_class::Model>,
    students: BTreeMap<i64, student::Model>,
    teachers: BTreeMap<i64, teacher::Model>,
    subjects: BTreeMap<i64, subject::Model>,
    next_id: i64,
}

impl Inner {
    fn alloc_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }
}

pub struct MemoryStore {
    inner: Mutex<Inner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Inner::default()),
        }
    }

    // ---- 播种辅助 (同步, 直接写表, 不做父节点校验) ----

    pub fn seed_academy(&self, name: &str) -> i64 {
        let mut inner = self.inner.lock().unwrap();
        let id = inner.alloc_id();
        inner.academies.insert(
            id,
            academy::Model {
                id,
                name: name.to_string(),
                code: None,
                dean: None,
                phone: None,
                address: None,
                description: None,
            },
        );
        id
    }

    pub fn seed_major(&self, academy_id: i64, name: &str, grade: i32) -> i64 {
        let mut inner = self.inner.lock().unwrap();
        let id = inner.alloc_id();
        inner.majors.insert(
            id,
            major::Model {
                id,
                name: name.to_string(),
                grade,
                academy_id,
                counselor_id: None,
                description: None,
            },
        );
        id
    }

    pub fn seed_total_class(&self, major_id: i64, name: &str) -> i64 {
        let mut inner = self.inner.lock().unwrap();
        let id = inner.alloc_id();
        inner.total_classes.insert(
            id,
            total_class::Model {
                id,
                name: name.to_string(),
                major_id,
            },
        );
        id
    }

    pub fn seed_sub_class(&self, total_class_id: i64, name: &str) -> i64 {
        let mut inner = self.inner.lock().unwrap();
        let id = inner.alloc_id();
        inner.sub_classes.insert(
            id,
            sub_class::Model {
                id,
                name: name.to_string(),
                total_class_id,
            },
        );
        id
    }

    pub fn seed_student(&self, sub_class_id: i64, name: &str) -> i64 {
        let mut inner = self.inner.lock().unwrap();
        let id = inner.alloc_id();
        inner.students.insert(
            id,
            student::Model {
                id,
                name: name.to_string(),
                student_no: None,
                sub_class_id: Some(sub_class_id),
            },
        );
        id
    }

    pub fn seed_unassigned_student(&self, name: &str) -> i64 {
        let mut inner = self.inner.lock().unwrap();
        let id = inner.alloc_id();
        inner.students.insert(
            id,
            student::Model {
                id,
                name: name.to_string(),
                student_no: None,
                sub_class_id: None,
            },
        );
        id
    }

    pub fn seed_teacher(&self, name: &str) -> i64 {
        let mut inner = self.inner.lock().unwrap();
        let id = inner.alloc_id();
        inner.teachers.insert(
            id,
            teacher::Model {
                id,
                name: name.to_string(),
                title: None,
                phone: None,
            },
        );
        id
    }

    pub fn seed_subject(&self, academy_name: &str, name: &str, credit: f64) -> i64 {
        let mut inner = self.inner.lock().unwrap();
        let id = inner.alloc_id();
        inner.subjects.insert(
            id,
            subject::Model {
                id,
                name: name.to_string(),
                academy_name: academy_name.to_string(),
                credit,
                description: None,
            },
        );
        id
    }

    pub fn set_major_counselor(&self, major_id: i64, counselor_id: i64) {
        let mut inner = self.inner.lock().unwrap();
        if let Some(m) = inner.majors.get_mut(&major_id) {
            m.counselor_id = Some(counselor_id);
        }
    }

    /// 树上记录总数 (学院 + 专业 + 大班 + 小班 + 学生)
    pub fn record_count(&self) -> u64 {
        let inner = self.inner.lock().unwrap();
        (inner.academies.len()
            + inner.majors.len()
            + inner.total_classes.len()
            + inner.sub_classes.len()
            + inner.students.len()) as u64
    }
}

#[async_trait]
impl HierarchyStore for MemoryStore {
    async fn find_academy(&self, id: i64) -> AppResult<Option<academy::Model>> {
        Ok(self.inner.lock().unwrap().academies.get(&id).cloned())
    }

    async fn find_major(&self, id: i64) -> AppResult<Option<major::Model>> {
        Ok(self.inner.lock().unwrap().majors.get(&id).cloned())
    }

    async fn find_total_class(&self, id: i64) -> AppResult<Option<total_class::Model>> {
        Ok(self.inner.lock().unwrap().total_classes.get(&id).cloned())
    }

    async fn find_sub_class(&self, id: i64) -> AppResult<Option<sub_class::Model>> {
        Ok(self.inner.lock().unwrap().sub_classes.get(&id).cloned())
    }

    async fn find_student(&self, id: i64) -> AppResult<Option<student::Model>> {
        Ok(self.inner.lock().unwrap().students.get(&id).cloned())
    }

    async fn find_teacher(&self, id: i64) -> AppResult<Option<teacher::Model>> {
        Ok(self.inner.lock().unwrap().teachers.get(&id).cloned())
    }

    async fn find_all_academies(&self) -> AppResult<Vec<academy::Model>> {
        Ok(self.inner.lock().unwrap().academies.values().cloned().collect())
    }

    async fn find_all_majors(&self) -> AppResult<Vec<major::Model>> {
        Ok(self.inner.lock().unwrap().majors.values().cloned().collect())
    }

    async fn find_all_total_classes(&self) -> AppResult<Vec<total_class::Model>> {
        Ok(self
            .inner
            .lock()
            .unwrap()
            .total_classes
            .values()
            .cloned()
            .collect())
    }

    async fn find_all_sub_classes(&self) -> AppResult<Vec<sub_class::Model>> {
        Ok(self
            .inner
            .lock()
            .unwrap()
            .sub_classes
            .values()
            .cloned()
            .collect())
    }

    async fn find_all_students(&self) -> AppResult<Vec<student::Model>> {
        Ok(self.inner.lock().unwrap().students.values().cloned().collect())
    }

    async fn find_all_subjects(&self) -> AppResult<Vec<subject::Model>> {
        Ok(self.inner.lock().unwrap().subjects.values().cloned().collect())
    }

    async fn majors_of_academy(&self, academy_id: i64) -> AppResult<Vec<major::Model>> {
        Ok(self
            .inner
            .lock()
            .unwrap()
            .majors
            .values()
            .filter(|m| m.academy_id == academy_id)
            .cloned()
            .collect())
    }

    async fn total_classes_of_major(&self, major_id: i64) -> AppResult<Vec<total_class::Model>> {
        Ok(self
            .inner
            .lock()
            .unwrap()
            .total_classes
            .values()
            .filter(|t| t.major_id == major_id)
            .cloned()
            .collect())
    }

    async fn sub_classes_of_total_class(
        &self,
        total_class_id: i64,
    ) -> AppResult<Vec<sub_class::Model>> {
        Ok(self
            .inner
            .lock()
            .unwrap()
            .sub_classes
            .values()
            .filter(|s| s.total_class_id == total_class_id)
            .cloned()
            .collect())
    }

    async fn students_of_sub_class(&self, sub_class_id: i64) -> AppResult<Vec<student::Model>> {
        Ok(self
            .inner
            .lock()
            .unwrap()
            .students
            .values()
            .filter(|st| st.sub_class_id == Some(sub_class_id))
            .cloned()
            .collect())
    }

    async fn count_students_of_sub_class(&self, sub_class_id: i64) -> AppResult<u64> {
        Ok(self
            .inner
            .lock()
            .unwrap()
            .students
            .values()
            .filter(|st| st.sub_class_id == Some(sub_class_id))
            .count() as u64)
    }

    async fn find_major_by_name_and_grade(
        &self,
        name: &str,
        grade: i32,
    ) -> AppResult<Option<major::Model>> {
        Ok(self
            .inner
            .lock()
            .unwrap()
            .majors
            .values()
            .find(|m| m.name == name && m.grade == grade)
            .cloned())
    }

    async fn subjects_of_academy(&self, academy_name: &str) -> AppResult<Vec<subject::Model>> {
        Ok(self
            .inner
            .lock()
            .unwrap()
            .subjects
            .values()
            .filter(|s| s.academy_name == academy_name)
            .cloned()
            .collect())
    }

    async fn insert_major(&self, mut model: major::Model) -> AppResult<major::Model> {
        let mut inner = self.inner.lock().unwrap();
        model.id = inner.alloc_id();
        inner.majors.insert(model.id, model.clone());
        Ok(model)
    }

    async fn insert_total_class(
        &self,
        mut model: total_class::Model,
    ) -> AppResult<total_class::Model> {
        let mut inner = self.inner.lock().unwrap();
        model.id = inner.alloc_id();
        inner.total_classes.insert(model.id, model.clone());
        Ok(model)
    }

    async fn insert_sub_class(&self, mut model: sub_class::Model) -> AppResult<sub_class::Model> {
        let mut inner = self.inner.lock().unwrap();
        model.id = inner.alloc_id();
        inner.sub_classes.insert(model.id, model.clone());
        Ok(model)
    }

    async fn save_academy(&self, model: academy::Model) -> AppResult<()> {
        self.inner.lock().unwrap().academies.insert(model.id, model);
        Ok(())
    }

    async fn save_major(&self, model: major::Model) -> AppResult<()> {
        self.inner.lock().unwrap().majors.insert(model.id, model);
        Ok(())
    }

    async fn save_total_class(&self, model: total_class::Model) -> AppResult<()> {
        self.inner
            .lock()
            .unwrap()
            .total_classes
            .insert(model.id, model);
        Ok(())
    }

    async fn save_sub_class(&self, model: sub_class::Model) -> AppResult<()> {
        self.inner
            .lock()
            .unwrap()
            .sub_classes
            .insert(model.id, model);
        Ok(())
    }

    async fn save_student(&self, model: student::Model) -> AppResult<()> {
        self.inner.lock().unwrap().students.insert(model.id, model);
        Ok(())
    }

    async fn save_subject(&self, model: subject::Model) -> AppResult<()> {
        self.inner.lock().unwrap().subjects.insert(model.id, model);
        Ok(())
    }

    async fn delete_academy(&self, id: i64) -> AppResult<()> {
        self.inner.lock().unwrap().academies.remove(&id);
        Ok(())
    }

    async fn delete_major(&self, id: i64) -> AppResult<()> {
        self.inner.lock().unwrap().majors.remove(&id);
        Ok(())
    }

    async fn delete_total_class(&self, id: i64) -> AppResult<()> {
        self.inner.lock().unwrap().total_classes.remove(&id);
        Ok(())
    }

    async fn delete_sub_class(&self, id: i64) -> AppResult<()> {
        self.inner.lock().unwrap().sub_classes.remove(&id);
        Ok(())
    }

    async fn delete_subject(&self, id: i64) -> AppResult<()> {
        self.inner.lock().unwrap().subjects.remove(&id);
        Ok(())
    }

    async fn delete_students_of_sub_class(&self, sub_class_id: i64) -> AppResult<u64> {
        let mut inner = self.inner.lock().unwrap();
        let doomed: Vec<i64> = inner
            .students
            .values()
            .filter(|st| st.sub_class_id == Some(sub_class_id))
            .map(|st| st.id)
            .collect();
        for id in &doomed {
            inner.students.remove(id);
        }
        Ok(doomed.len() as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seeding_allocates_distinct_ids() {
        let store = MemoryStore::new();
        let a = store.seed_academy("工程学院");
        let b = store.seed_academy("理学院");
        assert_ne!(a, b);
        assert_eq!(store.record_count(), 2);

        let found = tokio_test::block_on(store.find_academy(a)).unwrap().unwrap();
        assert_eq!(found.name, "工程学院");
    }
}
