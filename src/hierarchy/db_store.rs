//! SeaORM-backed hierarchy store
//!
//! 既可以绑定连接池直接读, 也可以绑定 `DatabaseTransaction`,
//! 使整个级联操作落在一个事务里。

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set,
};

use crate::entity::{academy, major, student, sub_class, subject, teacher, total_class};
use crate::error::AppResult;
use crate::hierarchy::store::HierarchyStore;

/// 基于 SeaORM 连接 (或事务) 的层级存储实现
pub struct SeaOrmStore<'a, C: ConnectionTrait> {
    conn: &'a C,
}

impl<'a, C: ConnectionTrait> SeaOrmStore<'a, C> {
    pub fn new(conn: &'a C) -> Self {
        Self { conn }
    }
}

#[async_trait]
impl<'a, C: ConnectionTrait + Send + Sync> HierarchyStore for SeaOrmStore<'a, C> {
    async fn find_academy(&self, id: i64) -> AppResult<Option<academy::Model>> {
        Ok(academy::Entity::find_by_id(id).one(self.conn).await?)
    }

    async fn find_major(&self, id: i64) -> AppResult<Option<major::Model>> {
        Ok(major::Entity::find_by_id(id).one(self.conn).await?)
    }

    async fn find_total_class(&self, id: i64) -> AppResult<Option<total_class::Model>> {
        Ok(total_class::Entity::find_by_id(id).one(self.conn).await?)
    }

    async fn find_sub_class(&self, id: i64) -> AppResult<Option<sub_class::Model>> {
        Ok(sub_class::Entity::find_by_id(id).one(self.conn).await?)
    }

    async fn find_student(&self, id: i64) -> AppResult<Option<student::Model>> {
        Ok(student::Entity::find_by_id(id).one(self.conn).await?)
    }

    async fn find_teacher(&self, id: i64) -> AppResult<Option<teacher::Model>> {
        Ok(teacher::Entity::find_by_id(id).one(self.conn).await?)
    }

    async fn find_all_academies(&self) -> AppResult<Vec<academy::Model>> {
        Ok(academy::Entity::find()
            .order_by_asc(academy::Column::Id)
            .all(self.conn)
            .await?)
    }

    async fn find_all_majors(&self) -> AppResult<Vec<major::Model>> {
        Ok(major::Entity::find()
            .order_by_asc(major::Column::Id)
            .all(self.conn)
            .await?)
    }

    async fn find_all_total_classes(&self) -> AppResult<Vec<total_class::Model>> {
        Ok(total_class::Entity::find()
            .order_by_asc(total_class::Column::Id)
            .all(self.conn)
            .await?)
    }

    async fn find_all_sub_classes(&self) -> AppResult<Vec<sub_class::Model>> {
        Ok(sub_class::Entity::find()
            .order_by_asc(sub_class::Column::Id)
            .all(self.conn)
            .await?)
    }

    async fn find_all_students(&self) -> AppResult<Vec<student::Model>> {
        Ok(student::Entity::find()
            .order_by_asc(student::Column::Id)
            .all(self.conn)
            .await?)
    }

    async fn find_all_subjects(&self) -> AppResult<Vec<subject::Model>> {
        Ok(subject::Entity::find()
            .order_by_asc(subject::Column::Id)
            .all(self.conn)
            .await?)
    }

    async fn majors_of_academy(&self, academy_id: i64) -> AppResult<Vec<major::Model>> {
        Ok(major::Entity::find()
            .filter(major::Column::AcademyId.eq(academy_id))
            .order_by_asc(major::Column::Id)
            .all(self.conn)
            .await?)
    }

    async fn total_classes_of_major(&self, major_id: i64) -> AppResult<Vec<total_class::Model>> {
        Ok(total_class::Entity::find()
            .filter(total_class::Column::MajorId.eq(major_id))
            .order_by_asc(total_class::Column::Id)
            .all(self.conn)
            .await?)
    }

    async fn sub_classes_of_total_class(
        &self,
        total_class_id: i64,
    ) -> AppResult<Vec<sub_class::Model>> {
        Ok(sub_class::Entity::find()
            .filter(sub_class::Column::TotalClassId.eq(total_class_id))
            .order_by_asc(sub_class::Column::Id)
            .all(self.conn)
            .await?)
    }

    async fn students_of_sub_class(&self, sub_class_id: i64) -> AppResult<Vec<student::Model>> {
        Ok(student::Entity::find()
            .filter(student::Column::SubClassId.eq(sub_class_id))
            .order_by_asc(student::Column::Id)
            .all(self.conn)
            .await?)
    }

    async fn count_students_of_sub_class(&self, sub_class_id: i64) -> AppResult<u64> {
        Ok(student::Entity::find()
            .filter(student::Column::SubClassId.eq(sub_class_id))
            .count(self.conn)
            .await?)
    }

    async fn find_major_by_name_and_grade(
        &self,
        name: &str,
        grade: i32,
    ) -> AppResult<Option<major::Model>> {
        Ok(major::Entity::find()
            .filter(major::Column::Name.eq(name))
            .filter(major::Column::Grade.eq(grade))
            .one(self.conn)
            .await?)
    }

    async fn subjects_of_academy(&self, academy_name: &str) -> AppResult<Vec<subject::Model>> {
        Ok(subject::Entity::find()
            .filter(subject::Column::AcademyName.eq(academy_name))
            .order_by_asc(subject::Column::Id)
            .all(self.conn)
            .await?)
    }

    async fn insert_major(&self, model: major::Model) -> AppResult<major::Model> {
        let new = major::ActiveModel {
            name: Set(model.name),
            grade: Set(model.grade),
            academy_id: Set(model.academy_id),
            counselor_id: Set(model.counselor_id),
            description: Set(model.description),
            ..Default::default()
        };
        Ok(new.insert(self.conn).await?)
    }

    async fn insert_total_class(
        &self,
        model: total_class::Model,
    ) -> AppResult<total_class::Model> {
        let new = total_class::ActiveModel {
            name: Set(model.name),
            major_id: Set(model.major_id),
            ..Default::default()
        };
        Ok(new.insert(self.conn).await?)
    }

    async fn insert_sub_class(&self, model: sub_class::Model) -> AppResult<sub_class::Model> {
        let new = sub_class::ActiveModel {
            name: Set(model.name),
            total_class_id: Set(model.total_class_id),
            ..Default::default()
        };
        Ok(new.insert(self.conn).await?)
    }

    async fn save_academy(&self, model: academy::Model) -> AppResult<()> {
        let update = academy::ActiveModel {
            id: Set(model.id),
            name: Set(model.name),
            code: Set(model.code),
            dean: Set(model.dean),
            phone: Set(model.phone),
            address: Set(model.address),
            description: Set(model.description),
        };
        update.update(self.conn).await?;
        Ok(())
    }

    async fn save_major(&self, model: major::Model) -> AppResult<()> {
        let update = major::ActiveModel {
            id: Set(model.id),
            name: Set(model.name),
            grade: Set(model.grade),
            academy_id: Set(model.academy_id),
            counselor_id: Set(model.counselor_id),
            description: Set(model.description),
        };
        update.update(self.conn).await?;
        Ok(())
    }

    async fn save_total_class(&self, model: total_class::Model) -> AppResult<()> {
        let update = total_class::ActiveModel {
            id: Set(model.id),
            name: Set(model.name),
            major_id: Set(model.major_id),
        };
        update.update(self.conn).await?;
        Ok(())
    }

    async fn save_sub_class(&self, model: sub_class::Model) -> AppResult<()> {
        let update = sub_class::ActiveModel {
            id: Set(model.id),
            name: Set(model.name),
            total_class_id: Set(model.total_class_id),
        };
        update.update(self.conn).await?;
        Ok(())
    }

    async fn save_student(&self, model: student::Model) -> AppResult<()> {
        let update = student::ActiveModel {
            id: Set(model.id),
            name: Set(model.name),
            student_no: Set(model.student_no),
            sub_class_id: Set(model.sub_class_id),
        };
        update.update(self.conn).await?;
        Ok(())
    }

    async fn save_subject(&self, model: subject::Model) -> AppResult<()> {
        let update = subject::ActiveModel {
            id: Set(model.id),
            name: Set(model.name),
            academy_name: Set(model.academy_name),
            credit: Set(model.credit),
            description: Set(model.description),
        };
        update.update(self.conn).await?;
        Ok(())
    }

    async fn delete_academy(&self, id: i64) -> AppResult<()> {
        academy::Entity::delete_by_id(id).exec(self.conn).await?;
        Ok(())
    }

    async fn delete_major(&self, id: i64) -> AppResult<()> {
        major::Entity::delete_by_id(id).exec(self.conn).await?;
        Ok(())
    }

    async fn delete_total_class(&self, id: i64) -> AppResult<()> {
        total_class::Entity::delete_by_id(id).exec(self.conn).await?;
        Ok(())
    }

    async fn delete_sub_class(&self, id: i64) -> AppResult<()> {
        sub_class::Entity::delete_by_id(id).exec(self.conn).await?;
        Ok(())
    }

    async fn delete_subject(&self, id: i64) -> AppResult<()> {
        subject::Entity::delete_by_id(id).exec(self.conn).await?;
        Ok(())
    }

    async fn delete_students_of_sub_class(&self, sub_class_id: i64) -> AppResult<u64> {
        let res = student::Entity::delete_many()
            .filter(student::Column::SubClassId.eq(sub_class_id))
            .exec(self.conn)
            .await?;
        Ok(res.rows_affected)
    }
}
