use super::rows::{AttributeRow, AttributeValueRow};
use crate::{
    anomaly::{Anomaly, RunLog},
    error::ImportError,
    extract::Extract,
};
use database::entities::course_attributes;
use models::{
    attribute::{AttributeDescriptions, AttributePair},
    course::CourseKey,
};
use sea_orm::ActiveValue::Set;
use std::{
    collections::HashMap,
    io::{Read, Write},
};

/// Reads the reference vocabulary of attribute pairs and their formal descriptions
pub fn load_attribute_descriptions<R: Read>(
    extract: &mut Extract<R>,
) -> Result<AttributeDescriptions, ImportError> {
    let mut descriptions = AttributeDescriptions::new();
    for row in extract.rows::<AttributeValueRow>() {
        let row = row?;
        descriptions.insert(
            AttributePair::new(row.crse_attr, row.crsatr_val),
            row.formal_description,
        );
    }

    Ok(descriptions)
}

#[derive(Debug, Clone, Default, PartialEq)]
struct CourseAttributes {
    institution: String,
    pairs: Vec<AttributePair>,
}

/// Valid attribute pairs of each course offering, in extract order
#[derive(Debug, Default)]
pub struct AttributeIndex {
    courses: HashMap<CourseKey, CourseAttributes>,
}

impl AttributeIndex {
    /// Indexes the attributes extract, logging every pair that is rejected
    pub fn build<R: Read, W: Write>(
        extract: &mut Extract<R>,
        descriptions: &AttributeDescriptions,
        log: &mut RunLog<W>,
    ) -> Result<Self, ImportError> {
        let mut index = Self::default();
        for row in extract.rows::<AttributeRow>() {
            let row = row?;
            if let Err(anomaly) = index.add(row.key(), &row.institution, row.pair(), descriptions) {
                log.anomaly(&anomaly)?;
            }
        }

        Ok(index)
    }

    /// Records `pair` for `key`.
    ///
    /// A pair outside the vocabulary, or one the course already has, is rejected and the
    /// index is left unchanged.
    pub fn add(
        &mut self,
        key: CourseKey,
        institution: &str,
        pair: AttributePair,
        descriptions: &AttributeDescriptions,
    ) -> Result<(), Anomaly> {
        if !descriptions.contains_key(&pair) {
            return Err(Anomaly::UnknownAttribute {
                course_id: key.course_id,
                pair,
            });
        }

        let course = self.courses.entry(key).or_insert_with(|| CourseAttributes {
            institution: institution.to_string(),
            pairs: Vec::new(),
        });
        if course.pairs.contains(&pair) {
            return Err(Anomaly::DuplicateAttribute { key, pair });
        }
        course.pairs.push(pair);

        Ok(())
    }

    pub fn get(&self, key: &CourseKey) -> Option<&[AttributePair]> {
        self.courses.get(key).map(|course| course.pairs.as_slice())
    }

    /// Number of course offerings with at least one attribute
    pub fn len(&self) -> usize {
        self.courses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.courses.is_empty()
    }

    /// Rows for the `course_attributes` table
    pub fn to_active_models(&self) -> Vec<course_attributes::ActiveModel> {
        self.courses
            .iter()
            .flat_map(|(key, course)| {
                course.pairs.iter().map(|pair| course_attributes::ActiveModel {
                    course_id: Set(key.course_id),
                    offer_nbr: Set(key.offer_nbr),
                    name: Set(pair.name.clone()),
                    value: Set(pair.value.clone()),
                    institution: Set(course.institution.clone()),
                })
            })
            .collect()
    }
}
