use models::rule::TransferRule;
use sea_orm::{ActiveValue::Set, entity::prelude::*};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "transfer_rules")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub source_course_id: i32,
    pub source_institution: String,
    pub source_discipline: String,
    pub source_catalog_number: String,
    #[sea_orm(primary_key, auto_increment = false)]
    pub rule_priority: i32,
    #[sea_orm(primary_key, auto_increment = false)]
    pub rule_group: i32,
    pub rule_group_sequence: i32,
    pub min_source_units: f64,
    pub max_source_units: f64,
    pub min_gpa: f64,
    pub max_gpa: f64,
    #[sea_orm(primary_key, auto_increment = false)]
    pub destination_course_id: i32,
    pub destination_institution: String,
    pub destination_discipline: String,
    pub destination_catalog_number: String,
    pub taken_destination_units: f64,
    pub min_destination_units: f64,
    pub max_destination_units: f64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for TransferRule {
    fn from(m: Model) -> Self {
        Self {
            source_course_id: m.source_course_id,
            source_institution: m.source_institution,
            source_discipline: m.source_discipline,
            source_catalog_number: m.source_catalog_number,
            rule_priority: m.rule_priority,
            rule_group: m.rule_group,
            rule_group_sequence: m.rule_group_sequence,
            min_source_units: m.min_source_units,
            max_source_units: m.max_source_units,
            min_gpa: m.min_gpa,
            max_gpa: m.max_gpa,
            destination_course_id: m.destination_course_id,
            destination_institution: m.destination_institution,
            destination_discipline: m.destination_discipline,
            destination_catalog_number: m.destination_catalog_number,
            taken_destination_units: m.taken_destination_units,
            min_destination_units: m.min_destination_units,
            max_destination_units: m.max_destination_units,
        }
    }
}

impl From<&TransferRule> for ActiveModel {
    fn from(rule: &TransferRule) -> Self {
        Self {
            source_course_id: Set(rule.source_course_id),
            source_institution: Set(rule.source_institution.clone()),
            source_discipline: Set(rule.source_discipline.clone()),
            source_catalog_number: Set(rule.source_catalog_number.clone()),
            rule_priority: Set(rule.rule_priority),
            rule_group: Set(rule.rule_group),
            rule_group_sequence: Set(rule.rule_group_sequence),
            min_source_units: Set(rule.min_source_units),
            max_source_units: Set(rule.max_source_units),
            min_gpa: Set(rule.min_gpa),
            max_gpa: Set(rule.max_gpa),
            destination_course_id: Set(rule.destination_course_id),
            destination_institution: Set(rule.destination_institution.clone()),
            destination_discipline: Set(rule.destination_discipline.clone()),
            destination_catalog_number: Set(rule.destination_catalog_number.clone()),
            taken_destination_units: Set(rule.taken_destination_units),
            min_destination_units: Set(rule.min_destination_units),
            max_destination_units: Set(rule.max_destination_units),
        }
    }
}
