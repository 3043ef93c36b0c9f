use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "rule_groups")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub source_institution: String,
    #[sea_orm(primary_key, auto_increment = false)]
    pub discipline: String,
    #[sea_orm(primary_key, auto_increment = false)]
    pub group_number: i32,
    #[sea_orm(primary_key, auto_increment = false)]
    pub destination_institution: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::source_courses::Entity")]
    SourceCourses,
    #[sea_orm(has_many = "super::destination_courses::Entity")]
    DestinationCourses,
}

impl Related<super::source_courses::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SourceCourses.def()
    }
}

impl Related<super::destination_courses::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::DestinationCourses.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
