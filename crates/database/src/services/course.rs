use crate::entities::{course_attributes, courses};
use models::course::{CatalogKey, ComponentList};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, IntoActiveModel,
    PaginatorTrait, QueryFilter, QueryOrder, prelude::Expr,
};

pub struct CourseService;

impl CourseService {
    /// The number of attribute rows to insert in a single statement
    const BATCH_SIZE: usize = 1000;

    /// Finds every stored course matching the full catalog key
    ///
    /// # Returns
    /// All matches; callers treat more than one as an inconsistent store
    pub async fn find_by_catalog_key<C: ConnectionTrait>(
        db: &C,
        key: &CatalogKey,
    ) -> Result<Vec<courses::Model>, DbErr> {
        courses::Entity::find()
            .filter(courses::Column::CourseId.eq(key.course.course_id))
            .filter(courses::Column::OfferNbr.eq(key.course.offer_nbr))
            .filter(courses::Column::Discipline.eq(key.discipline.as_str()))
            .filter(courses::Column::CatalogNumber.eq(key.catalog_number.as_str()))
            .all(db)
            .await
    }

    pub async fn insert<C: ConnectionTrait>(db: &C, course: courses::Model) -> Result<(), DbErr> {
        courses::Entity::insert(course.into_active_model().reset_all())
            .exec_without_returning(db)
            .await?;

        Ok(())
    }

    /// Overwrites the component list of the course under `key`
    pub async fn update_components<C: ConnectionTrait>(
        db: &C,
        key: &CatalogKey,
        components: ComponentList,
    ) -> Result<u64, DbErr> {
        let result = courses::Entity::update_many()
            .col_expr(courses::Column::Components, Expr::value(components))
            .filter(courses::Column::CourseId.eq(key.course.course_id))
            .filter(courses::Column::OfferNbr.eq(key.course.offer_nbr))
            .filter(courses::Column::Discipline.eq(key.discipline.as_str()))
            .filter(courses::Column::CatalogNumber.eq(key.catalog_number.as_str()))
            .exec(db)
            .await?;

        Ok(result.rows_affected)
    }

    /// Replaces the whole `course_attributes` table
    pub async fn replace_attributes<C: ConnectionTrait>(
        db: &C,
        rows: Vec<course_attributes::ActiveModel>,
    ) -> Result<u64, DbErr> {
        course_attributes::Entity::delete_many().exec(db).await?;

        let mut inserted = 0;
        for batch in rows.chunks(Self::BATCH_SIZE) {
            inserted += course_attributes::Entity::insert_many(batch.to_vec())
                .exec_without_returning(db)
                .await?;
        }

        Ok(inserted)
    }

    /// Whether any offering of `course_id` is in the catalog
    pub async fn exists<C: ConnectionTrait>(db: &C, course_id: i32) -> Result<bool, DbErr> {
        let count = courses::Entity::find()
            .filter(courses::Column::CourseId.eq(course_id))
            .count(db)
            .await?;

        Ok(count > 0)
    }

    /// Any one offering of `course_id`, used to find the course's institution and discipline
    pub async fn find_any_offering<C: ConnectionTrait>(
        db: &C,
        course_id: i32,
    ) -> Result<Option<courses::Model>, DbErr> {
        courses::Entity::find()
            .filter(courses::Column::CourseId.eq(course_id))
            .order_by_asc(courses::Column::OfferNbr)
            .one(db)
            .await
    }

    /// Every course, ordered for the contact-hours report
    pub async fn all_by_status<C: ConnectionTrait>(db: &C) -> Result<Vec<courses::Model>, DbErr> {
        courses::Entity::find()
            .order_by_asc(courses::Column::CourseStatus)
            .order_by_asc(courses::Column::Institution)
            .order_by_asc(courses::Column::Discipline)
            .order_by_asc(courses::Column::CatalogNumber)
            .all(db)
            .await
    }
}
