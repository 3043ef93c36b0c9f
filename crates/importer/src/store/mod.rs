mod db;
#[cfg(test)]
pub mod memory;

pub use db::DbStore;

use async_trait::async_trait;
use database::entities::courses;
use models::{
    course::{CatalogKey, ComponentList},
    rule::{RuleGroupKey, TransferRule},
};
use sea_orm::DbErr;

/// Where the catalog records a course's home
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CourseHome {
    pub institution: String,
    pub discipline: String,
}

/// Course records the catalog pass reads and writes, through Postgres ([`DbStore`]) or an
/// in-memory store in tests
#[async_trait]
pub trait CourseStore {
    /// Every stored course matching `key`
    async fn find_courses(&self, key: &CatalogKey) -> Result<Vec<courses::Model>, DbErr>;

    async fn insert_course(&self, course: courses::Model) -> Result<(), DbErr>;

    /// Overwrites the component list of the course under `key`
    async fn update_components(
        &self,
        key: &CatalogKey,
        components: ComponentList,
    ) -> Result<(), DbErr>;
}

/// Catalog lookups and rule tables the transfer-rule passes use
#[async_trait]
pub trait RuleStore {
    /// Whether any offering of `course_id` is in the catalog
    async fn course_exists(&self, course_id: i32) -> Result<bool, DbErr>;

    async fn course_home(&self, course_id: i32) -> Result<Option<CourseHome>, DbErr>;

    async fn clear_rule_groups(&self) -> Result<(), DbErr>;

    /// # Returns
    /// The number of new rows, 0 when the group already exists
    async fn insert_rule_group(&self, key: &RuleGroupKey) -> Result<u64, DbErr>;

    async fn insert_source_course(
        &self,
        key: &RuleGroupKey,
        course_id: i32,
        min_gpa: f64,
        max_gpa: f64,
    ) -> Result<u64, DbErr>;

    async fn insert_destination_course(
        &self,
        key: &RuleGroupKey,
        course_id: i32,
        transfer_credits: f64,
    ) -> Result<u64, DbErr>;

    async fn clear_transfer_rules(&self) -> Result<(), DbErr>;

    /// # Returns
    /// `false` when a stored rule already has the same key
    async fn insert_transfer_rule(&self, rule: &TransferRule) -> Result<bool, DbErr>;

    async fn conflicting_rules(&self, rule: &TransferRule) -> Result<Vec<TransferRule>, DbErr>;

    async fn count_transfer_rules(&self) -> Result<u64, DbErr>;
}
