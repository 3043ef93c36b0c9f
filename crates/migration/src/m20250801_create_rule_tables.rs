use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Create rule_groups table
        manager
            .create_table(
                Table::create()
                    .table(RuleGroups::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(RuleGroups::SourceInstitution)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(RuleGroups::Discipline).string().not_null())
                    .col(ColumnDef::new(RuleGroups::GroupNumber).integer().not_null())
                    .col(
                        ColumnDef::new(RuleGroups::DestinationInstitution)
                            .string()
                            .not_null(),
                    )
                    .primary_key(
                        Index::create()
                            .col(RuleGroups::SourceInstitution)
                            .col(RuleGroups::Discipline)
                            .col(RuleGroups::GroupNumber)
                            .col(RuleGroups::DestinationInstitution),
                    )
                    .to_owned(),
            )
            .await?;

        // Create source_courses table
        manager
            .create_table(
                Table::create()
                    .table(SourceCourses::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(SourceCourses::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(SourceCourses::SourceInstitution)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(SourceCourses::Discipline).string().not_null())
                    .col(
                        ColumnDef::new(SourceCourses::GroupNumber)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(SourceCourses::DestinationInstitution)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(SourceCourses::CourseId).integer().not_null())
                    .col(ColumnDef::new(SourceCourses::MinGpa).double().not_null())
                    .col(ColumnDef::new(SourceCourses::MaxGpa).double().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-source_courses-rule_group")
                            .from_tbl(SourceCourses::Table)
                            .from_col(SourceCourses::SourceInstitution)
                            .from_col(SourceCourses::Discipline)
                            .from_col(SourceCourses::GroupNumber)
                            .from_col(SourceCourses::DestinationInstitution)
                            .to_tbl(RuleGroups::Table)
                            .to_col(RuleGroups::SourceInstitution)
                            .to_col(RuleGroups::Discipline)
                            .to_col(RuleGroups::GroupNumber)
                            .to_col(RuleGroups::DestinationInstitution)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Create destination_courses table
        manager
            .create_table(
                Table::create()
                    .table(DestinationCourses::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(DestinationCourses::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(DestinationCourses::SourceInstitution)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(DestinationCourses::Discipline)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(DestinationCourses::GroupNumber)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(DestinationCourses::DestinationInstitution)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(DestinationCourses::CourseId)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(DestinationCourses::TransferCredits)
                            .double()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-destination_courses-rule_group")
                            .from_tbl(DestinationCourses::Table)
                            .from_col(DestinationCourses::SourceInstitution)
                            .from_col(DestinationCourses::Discipline)
                            .from_col(DestinationCourses::GroupNumber)
                            .from_col(DestinationCourses::DestinationInstitution)
                            .to_tbl(RuleGroups::Table)
                            .to_col(RuleGroups::SourceInstitution)
                            .to_col(RuleGroups::Discipline)
                            .to_col(RuleGroups::GroupNumber)
                            .to_col(RuleGroups::DestinationInstitution)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Create transfer_rules table
        manager
            .create_table(
                Table::create()
                    .table(TransferRules::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(TransferRules::SourceCourseId)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(TransferRules::SourceInstitution)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(TransferRules::SourceDiscipline)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(TransferRules::SourceCatalogNumber)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(TransferRules::RulePriority).integer().not_null())
                    .col(ColumnDef::new(TransferRules::RuleGroup).integer().not_null())
                    .col(
                        ColumnDef::new(TransferRules::RuleGroupSequence)
                            .integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(TransferRules::MinSourceUnits).double().not_null())
                    .col(ColumnDef::new(TransferRules::MaxSourceUnits).double().not_null())
                    .col(ColumnDef::new(TransferRules::MinGpa).double().not_null())
                    .col(ColumnDef::new(TransferRules::MaxGpa).double().not_null())
                    .col(
                        ColumnDef::new(TransferRules::DestinationCourseId)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(TransferRules::DestinationInstitution)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(TransferRules::DestinationDiscipline)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(TransferRules::DestinationCatalogNumber)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(TransferRules::TakenDestinationUnits)
                            .double()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(TransferRules::MinDestinationUnits)
                            .double()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(TransferRules::MaxDestinationUnits)
                            .double()
                            .not_null(),
                    )
                    .primary_key(
                        Index::create()
                            .col(TransferRules::SourceCourseId)
                            .col(TransferRules::RulePriority)
                            .col(TransferRules::RuleGroup)
                            .col(TransferRules::DestinationCourseId),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Drop tables in reverse order due to foreign key constraints
        manager
            .drop_table(Table::drop().table(TransferRules::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(DestinationCourses::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(SourceCourses::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(RuleGroups::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(Iden)]
enum RuleGroups {
    Table,
    SourceInstitution,
    Discipline,
    GroupNumber,
    DestinationInstitution,
}

#[derive(Iden)]
enum SourceCourses {
    Table,
    Id,
    SourceInstitution,
    Discipline,
    GroupNumber,
    DestinationInstitution,
    CourseId,
    MinGpa,
    MaxGpa,
}

#[derive(Iden)]
enum DestinationCourses {
    Table,
    Id,
    SourceInstitution,
    Discipline,
    GroupNumber,
    DestinationInstitution,
    CourseId,
    TransferCredits,
}

#[derive(Iden)]
enum TransferRules {
    Table,
    SourceCourseId,
    SourceInstitution,
    SourceDiscipline,
    SourceCatalogNumber,
    RulePriority,
    RuleGroup,
    RuleGroupSequence,
    MinSourceUnits,
    MaxSourceUnits,
    MinGpa,
    MaxGpa,
    DestinationCourseId,
    DestinationInstitution,
    DestinationDiscipline,
    DestinationCatalogNumber,
    TakenDestinationUnits,
    MinDestinationUnits,
    MaxDestinationUnits,
}
