use crate::entities::{institutions, updates};
use chrono::NaiveDate;
use sea_orm::{
    ActiveValue::Set, ConnectionTrait, DbErr, EntityTrait, QueryOrder, prelude::Expr,
    sea_query::OnConflict,
};

pub struct InstitutionService;

impl InstitutionService {
    /// Codes of every known institution, in order
    pub async fn known_codes<C: ConnectionTrait>(db: &C) -> Result<Vec<String>, DbErr> {
        let institutions = institutions::Entity::find()
            .order_by_asc(institutions::Column::Code)
            .all(db)
            .await?;

        Ok(institutions.into_iter().map(|i| i.code).collect())
    }

    /// Marks every institution's catalog information as updated on `date`
    pub async fn stamp_date_updated<C: ConnectionTrait>(
        db: &C,
        date: NaiveDate,
    ) -> Result<u64, DbErr> {
        let result = institutions::Entity::update_many()
            .col_expr(institutions::Column::DateUpdated, Expr::value(date))
            .exec(db)
            .await?;

        Ok(result.rows_affected)
    }

    /// Records which extract populated `table_name`
    pub async fn record_update<C: ConnectionTrait>(
        db: &C,
        table_name: &str,
        date: NaiveDate,
        file_name: &str,
    ) -> Result<(), DbErr> {
        let stamp = updates::ActiveModel {
            table_name: Set(table_name.to_owned()),
            update_date: Set(Some(date)),
            file_name: Set(Some(file_name.to_owned())),
        };

        updates::Entity::insert(stamp)
            .on_conflict(
                OnConflict::column(updates::Column::TableName)
                    .update_columns([updates::Column::UpdateDate, updates::Column::FileName])
                    .to_owned(),
            )
            .exec_without_returning(db)
            .await?;

        Ok(())
    }
}
