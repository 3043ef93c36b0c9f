use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// A course granted on the destination side of a rule group
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "destination_courses")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub source_institution: String,
    pub discipline: String,
    pub group_number: i32,
    pub destination_institution: String,
    pub course_id: i32,
    pub transfer_credits: f64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::rule_groups::Entity",
        from = "(Column::SourceInstitution, Column::Discipline, Column::GroupNumber, Column::DestinationInstitution)",
        to = "(super::rule_groups::Column::SourceInstitution, super::rule_groups::Column::Discipline, super::rule_groups::Column::GroupNumber, super::rule_groups::Column::DestinationInstitution)"
    )]
    RuleGroup,
}

impl Related<super::rule_groups::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::RuleGroup.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
