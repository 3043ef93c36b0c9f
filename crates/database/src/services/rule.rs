use crate::entities::{destination_courses, rule_groups, source_courses, transfer_rules};
use models::rule::{RuleGroupKey, TransferRule};
use sea_orm::{
    ActiveValue::{NotSet, Set},
    ColumnTrait, ConnectionTrait, DbErr, EntityTrait, PaginatorTrait, QueryFilter,
    sea_query::OnConflict,
};

pub struct RuleService;

impl RuleService {
    /// Empties the three rule group tables, children first
    pub async fn clear_rule_groups<C: ConnectionTrait>(db: &C) -> Result<(), DbErr> {
        source_courses::Entity::delete_many().exec(db).await?;
        destination_courses::Entity::delete_many().exec(db).await?;
        rule_groups::Entity::delete_many().exec(db).await?;

        Ok(())
    }

    /// Inserts a rule group unless it already exists
    ///
    /// # Returns
    /// The number of rows inserted (0 or 1)
    pub async fn insert_rule_group<C: ConnectionTrait>(
        db: &C,
        key: &RuleGroupKey,
    ) -> Result<u64, DbErr> {
        let group = rule_groups::ActiveModel {
            source_institution: Set(key.source_institution.clone()),
            discipline: Set(key.discipline.clone()),
            group_number: Set(key.group_number),
            destination_institution: Set(key.destination_institution.clone()),
        };

        rule_groups::Entity::insert(group)
            .on_conflict(
                OnConflict::columns([
                    rule_groups::Column::SourceInstitution,
                    rule_groups::Column::Discipline,
                    rule_groups::Column::GroupNumber,
                    rule_groups::Column::DestinationInstitution,
                ])
                .do_nothing()
                .to_owned(),
            )
            .exec_without_returning(db)
            .await
    }

    pub async fn insert_source_course<C: ConnectionTrait>(
        db: &C,
        key: &RuleGroupKey,
        course_id: i32,
        min_gpa: f64,
        max_gpa: f64,
    ) -> Result<u64, DbErr> {
        let source = source_courses::ActiveModel {
            id: NotSet,
            source_institution: Set(key.source_institution.clone()),
            discipline: Set(key.discipline.clone()),
            group_number: Set(key.group_number),
            destination_institution: Set(key.destination_institution.clone()),
            course_id: Set(course_id),
            min_gpa: Set(min_gpa),
            max_gpa: Set(max_gpa),
        };

        source_courses::Entity::insert(source)
            .on_conflict(
                OnConflict::columns([
                    source_courses::Column::SourceInstitution,
                    source_courses::Column::Discipline,
                    source_courses::Column::GroupNumber,
                    source_courses::Column::DestinationInstitution,
                    source_courses::Column::CourseId,
                ])
                .do_nothing()
                .to_owned(),
            )
            .exec_without_returning(db)
            .await
    }

    pub async fn insert_destination_course<C: ConnectionTrait>(
        db: &C,
        key: &RuleGroupKey,
        course_id: i32,
        transfer_credits: f64,
    ) -> Result<u64, DbErr> {
        let destination = destination_courses::ActiveModel {
            id: NotSet,
            source_institution: Set(key.source_institution.clone()),
            discipline: Set(key.discipline.clone()),
            group_number: Set(key.group_number),
            destination_institution: Set(key.destination_institution.clone()),
            course_id: Set(course_id),
            transfer_credits: Set(transfer_credits),
        };

        destination_courses::Entity::insert(destination)
            .on_conflict(
                OnConflict::columns([
                    destination_courses::Column::SourceInstitution,
                    destination_courses::Column::Discipline,
                    destination_courses::Column::GroupNumber,
                    destination_courses::Column::DestinationInstitution,
                    destination_courses::Column::CourseId,
                ])
                .do_nothing()
                .to_owned(),
            )
            .exec_without_returning(db)
            .await
    }

    pub async fn clear_transfer_rules<C: ConnectionTrait>(db: &C) -> Result<(), DbErr> {
        transfer_rules::Entity::delete_many().exec(db).await?;
        Ok(())
    }

    /// Inserts a transfer rule unless its key is already taken
    ///
    /// # Returns
    /// `false` when the key conflicts with a stored rule
    pub async fn insert_transfer_rule<C: ConnectionTrait>(
        db: &C,
        rule: &TransferRule,
    ) -> Result<bool, DbErr> {
        let inserted = transfer_rules::Entity::insert(transfer_rules::ActiveModel::from(rule))
            .on_conflict(
                OnConflict::columns([
                    transfer_rules::Column::SourceCourseId,
                    transfer_rules::Column::RulePriority,
                    transfer_rules::Column::RuleGroup,
                    transfer_rules::Column::DestinationCourseId,
                ])
                .do_nothing()
                .to_owned(),
            )
            .exec_without_returning(db)
            .await?;

        Ok(inserted > 0)
    }

    /// Stored rules sharing the key of `rule`
    pub async fn find_conflicting<C: ConnectionTrait>(
        db: &C,
        rule: &TransferRule,
    ) -> Result<Vec<TransferRule>, DbErr> {
        let stored = transfer_rules::Entity::find()
            .filter(transfer_rules::Column::SourceCourseId.eq(rule.source_course_id))
            .filter(transfer_rules::Column::RulePriority.eq(rule.rule_priority))
            .filter(transfer_rules::Column::RuleGroup.eq(rule.rule_group))
            .filter(transfer_rules::Column::DestinationCourseId.eq(rule.destination_course_id))
            .all(db)
            .await?;

        Ok(stored.into_iter().map(TransferRule::from).collect())
    }

    pub async fn count_transfer_rules<C: ConnectionTrait>(db: &C) -> Result<u64, DbErr> {
        transfer_rules::Entity::find().count(db).await
    }
}
