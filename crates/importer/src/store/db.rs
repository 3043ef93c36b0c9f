use super::{CourseHome, CourseStore, RuleStore};
use async_trait::async_trait;
use database::{
    entities::courses,
    services::{course::CourseService, rule::RuleService},
};
use models::{
    course::{CatalogKey, ComponentList},
    rule::{RuleGroupKey, TransferRule},
};
use sea_orm::{ConnectionTrait, DbErr};

/// A store backed by a database connection or an open transaction
pub struct DbStore<'a, C> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> DbStore<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }
}

#[async_trait]
impl<C: ConnectionTrait> CourseStore for DbStore<'_, C> {
    async fn find_courses(&self, key: &CatalogKey) -> Result<Vec<courses::Model>, DbErr> {
        CourseService::find_by_catalog_key(self.db, key).await
    }

    async fn insert_course(&self, course: courses::Model) -> Result<(), DbErr> {
        CourseService::insert(self.db, course).await
    }

    async fn update_components(
        &self,
        key: &CatalogKey,
        components: ComponentList,
    ) -> Result<(), DbErr> {
        let updated = CourseService::update_components(self.db, key, components).await?;
        if updated == 0 {
            return Err(DbErr::RecordNotUpdated);
        }

        Ok(())
    }
}

#[async_trait]
impl<C: ConnectionTrait> RuleStore for DbStore<'_, C> {
    async fn course_exists(&self, course_id: i32) -> Result<bool, DbErr> {
        CourseService::exists(self.db, course_id).await
    }

    async fn course_home(&self, course_id: i32) -> Result<Option<CourseHome>, DbErr> {
        let course = CourseService::find_any_offering(self.db, course_id).await?;

        Ok(course.map(|c| CourseHome {
            institution: c.institution,
            discipline: c.discipline,
        }))
    }

    async fn clear_rule_groups(&self) -> Result<(), DbErr> {
        RuleService::clear_rule_groups(self.db).await
    }

    async fn insert_rule_group(&self, key: &RuleGroupKey) -> Result<u64, DbErr> {
        RuleService::insert_rule_group(self.db, key).await
    }

    async fn insert_source_course(
        &self,
        key: &RuleGroupKey,
        course_id: i32,
        min_gpa: f64,
        max_gpa: f64,
    ) -> Result<u64, DbErr> {
        RuleService::insert_source_course(self.db, key, course_id, min_gpa, max_gpa).await
    }

    async fn insert_destination_course(
        &self,
        key: &RuleGroupKey,
        course_id: i32,
        transfer_credits: f64,
    ) -> Result<u64, DbErr> {
        RuleService::insert_destination_course(self.db, key, course_id, transfer_credits).await
    }

    async fn clear_transfer_rules(&self) -> Result<(), DbErr> {
        RuleService::clear_transfer_rules(self.db).await
    }

    async fn insert_transfer_rule(&self, rule: &TransferRule) -> Result<bool, DbErr> {
        RuleService::insert_transfer_rule(self.db, rule).await
    }

    async fn conflicting_rules(&self, rule: &TransferRule) -> Result<Vec<TransferRule>, DbErr> {
        RuleService::find_conflicting(self.db, rule).await
    }

    async fn count_transfer_rules(&self) -> Result<u64, DbErr> {
        RuleService::count_transfer_rules(self.db).await
    }
}
