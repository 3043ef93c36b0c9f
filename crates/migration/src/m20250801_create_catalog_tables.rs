use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Create institutions table
        manager
            .create_table(
                Table::create()
                    .table(Institutions::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Institutions::Code)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Institutions::Name).string().not_null())
                    .col(ColumnDef::new(Institutions::DateUpdated).date())
                    .to_owned(),
            )
            .await?;

        // Create updates table
        manager
            .create_table(
                Table::create()
                    .table(Updates::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Updates::TableName)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Updates::UpdateDate).date())
                    .col(ColumnDef::new(Updates::FileName).text())
                    .to_owned(),
            )
            .await?;

        // Create courses table; components is a JSON array of [code, hours] pairs
        manager
            .create_table(
                Table::create()
                    .table(Courses::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Courses::CourseId).integer().not_null())
                    .col(ColumnDef::new(Courses::OfferNbr).integer().not_null())
                    .col(ColumnDef::new(Courses::EquivalenceGroup).integer())
                    .col(ColumnDef::new(Courses::Institution).string().not_null())
                    .col(ColumnDef::new(Courses::CunySubject).string().not_null())
                    .col(ColumnDef::new(Courses::Department).string().not_null())
                    .col(ColumnDef::new(Courses::Discipline).string().not_null())
                    .col(ColumnDef::new(Courses::CatalogNumber).string().not_null())
                    .col(ColumnDef::new(Courses::Title).text().not_null())
                    .col(ColumnDef::new(Courses::Components).text().not_null())
                    .col(ColumnDef::new(Courses::ContactHours).double().not_null())
                    .col(ColumnDef::new(Courses::MinCredits).double().not_null())
                    .col(ColumnDef::new(Courses::MaxCredits).double().not_null())
                    .col(ColumnDef::new(Courses::PrimaryComponent).string().not_null())
                    .col(ColumnDef::new(Courses::Requisites).text().not_null())
                    .col(ColumnDef::new(Courses::Designation).string().not_null())
                    .col(ColumnDef::new(Courses::Description).text().not_null())
                    .col(ColumnDef::new(Courses::Career).string().not_null())
                    .col(ColumnDef::new(Courses::CourseStatus).string().not_null())
                    .col(ColumnDef::new(Courses::DisciplineStatus).string().not_null())
                    .col(ColumnDef::new(Courses::CanSchedule).string().not_null())
                    .col(ColumnDef::new(Courses::Attributes).text().not_null())
                    .col(
                        ColumnDef::new(Courses::AttributeDescriptions)
                            .text()
                            .not_null(),
                    )
                    .primary_key(
                        Index::create()
                            .col(Courses::CourseId)
                            .col(Courses::OfferNbr),
                    )
                    .to_owned(),
            )
            .await?;

        // Create course_attributes table
        manager
            .create_table(
                Table::create()
                    .table(CourseAttributes::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(CourseAttributes::CourseId).integer().not_null())
                    .col(ColumnDef::new(CourseAttributes::OfferNbr).integer().not_null())
                    .col(ColumnDef::new(CourseAttributes::Name).string().not_null())
                    .col(ColumnDef::new(CourseAttributes::Value).string().not_null())
                    .col(
                        ColumnDef::new(CourseAttributes::Institution)
                            .string()
                            .not_null(),
                    )
                    .primary_key(
                        Index::create()
                            .col(CourseAttributes::CourseId)
                            .col(CourseAttributes::OfferNbr)
                            .col(CourseAttributes::Name)
                            .col(CourseAttributes::Value),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(CourseAttributes::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Courses::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Updates::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Institutions::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(Iden)]
enum Institutions {
    Table,
    Code,
    Name,
    DateUpdated,
}

#[derive(Iden)]
enum Updates {
    Table,
    TableName,
    UpdateDate,
    FileName,
}

#[derive(Iden)]
enum Courses {
    Table,
    CourseId,
    OfferNbr,
    EquivalenceGroup,
    Institution,
    CunySubject,
    Department,
    Discipline,
    CatalogNumber,
    Title,
    Components,
    ContactHours,
    MinCredits,
    MaxCredits,
    PrimaryComponent,
    Requisites,
    Designation,
    Description,
    Career,
    CourseStatus,
    DisciplineStatus,
    CanSchedule,
    Attributes,
    AttributeDescriptions,
}

#[derive(Iden)]
enum CourseAttributes {
    Table,
    CourseId,
    OfferNbr,
    Name,
    Value,
    Institution,
}
