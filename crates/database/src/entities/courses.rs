use models::course::ComponentList;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "courses")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub course_id: i32,
    #[sea_orm(primary_key, auto_increment = false)]
    pub offer_nbr: i32,
    pub equivalence_group: Option<i32>,
    pub institution: String,
    pub cuny_subject: String,
    pub department: String,
    pub discipline: String,
    pub catalog_number: String,
    pub title: String,
    pub components: ComponentList,
    pub contact_hours: f64,
    pub min_credits: f64,
    pub max_credits: f64,
    pub primary_component: String,
    pub requisites: String,
    pub designation: String,
    pub description: String,
    pub career: String,
    pub course_status: String,
    pub discipline_status: String,
    pub can_schedule: String,
    pub attributes: String,
    pub attribute_descriptions: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::institutions::Entity",
        from = "Column::Institution",
        to = "super::institutions::Column::Code"
    )]
    Institution,
    #[sea_orm(has_many = "super::course_attributes::Entity")]
    CourseAttributes,
}

impl Related<super::institutions::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Institution.def()
    }
}

impl Related<super::course_attributes::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CourseAttributes.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
