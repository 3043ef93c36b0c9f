use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Exclusion checks and rule population look courses up by id alone
        manager
            .create_index(
                Index::create()
                    .name("idx_courses_course_id")
                    .table(Courses::Table)
                    .col(Courses::CourseId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_courses_institution_discipline_catalog_number")
                    .table(Courses::Table)
                    .col(Courses::Institution)
                    .col(Courses::Discipline)
                    .col(Courses::CatalogNumber)
                    .to_owned(),
            )
            .await?;

        // Targets for ON CONFLICT DO NOTHING when populating rule groups
        manager
            .create_index(
                Index::create()
                    .name("idx_source_courses_unique")
                    .table(SourceCourses::Table)
                    .col(SourceCourses::SourceInstitution)
                    .col(SourceCourses::Discipline)
                    .col(SourceCourses::GroupNumber)
                    .col(SourceCourses::DestinationInstitution)
                    .col(SourceCourses::CourseId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_destination_courses_unique")
                    .table(DestinationCourses::Table)
                    .col(DestinationCourses::SourceInstitution)
                    .col(DestinationCourses::Discipline)
                    .col(DestinationCourses::GroupNumber)
                    .col(DestinationCourses::DestinationInstitution)
                    .col(DestinationCourses::CourseId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx_destination_courses_unique")
                    .table(DestinationCourses::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name("idx_source_courses_unique")
                    .table(SourceCourses::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name("idx_courses_institution_discipline_catalog_number")
                    .table(Courses::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name("idx_courses_course_id")
                    .table(Courses::Table)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }
}

#[derive(Iden)]
enum Courses {
    Table,
    CourseId,
    Institution,
    Discipline,
    CatalogNumber,
}

#[derive(Iden)]
enum SourceCourses {
    Table,
    SourceInstitution,
    Discipline,
    GroupNumber,
    DestinationInstitution,
    CourseId,
}

#[derive(Iden)]
enum DestinationCourses {
    Table,
    SourceInstitution,
    Discipline,
    GroupNumber,
    DestinationInstitution,
    CourseId,
}
