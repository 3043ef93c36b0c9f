use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

/// CUNY institutions that appear in the catalog and transfer-rule extracts
const INSTITUTIONS: [(&str, &str); 23] = [
    ("BAR01", "Baruch College"),
    ("BCC01", "Bronx Community College"),
    ("BKL01", "Brooklyn College"),
    ("BMC01", "Borough of Manhattan Community College"),
    ("CSI01", "College of Staten Island"),
    ("CTY01", "City College"),
    ("GRD01", "The Graduate Center"),
    ("HOS01", "Hostos Community College"),
    ("HTR01", "Hunter College"),
    ("JJC01", "John Jay College"),
    ("KCC01", "Kingsborough Community College"),
    ("LAG01", "LaGuardia Community College"),
    ("LAW01", "CUNY School of Law"),
    ("LEH01", "Lehman College"),
    ("MEC01", "Medgar Evers College"),
    ("MED01", "CUNY School of Medicine"),
    ("NCC01", "Guttman Community College"),
    ("NYT01", "New York City College of Technology"),
    ("QCC01", "Queensborough Community College"),
    ("QNS01", "Queens College"),
    ("SPH01", "CUNY School of Public Health"),
    ("SPS01", "CUNY School of Professional Studies"),
    ("YRK01", "York College"),
];

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let mut insert = Query::insert();
        insert
            .into_table(Institutions::Table)
            .columns([Institutions::Code, Institutions::Name])
            .on_conflict(OnConflict::column(Institutions::Code).do_nothing().to_owned());

        for (code, name) in INSTITUTIONS {
            insert.values_panic([code.into(), name.into()]);
        }

        manager.exec_stmt(insert).await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let codes = INSTITUTIONS.iter().map(|(code, _)| *code);
        let delete = Query::delete()
            .from_table(Institutions::Table)
            .and_where(Expr::col(Institutions::Code).is_in(codes))
            .to_owned();

        manager.exec_stmt(delete).await
    }
}

#[derive(Iden)]
enum Institutions {
    Table,
    Code,
    Name,
}
