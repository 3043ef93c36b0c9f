use super::rows::RequisiteRow;
use crate::{error::ImportError, extract::Extract};
use models::text::typographic;
use std::{collections::HashMap, io::Read};

/// (institution, discipline, catalog number)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RequisiteKey {
    pub institution: String,
    pub discipline: String,
    pub catalog_number: String,
}

impl RequisiteKey {
    pub fn new(institution: &str, discipline: &str, catalog_number: &str) -> Self {
        Self {
            institution: institution.to_string(),
            discipline: discipline.to_string(),
            catalog_number: catalog_number.trim().to_string(),
        }
    }
}

/// Requisite text by course; a later row for the same course replaces an earlier one
#[derive(Debug, Default)]
pub struct RequisiteIndex {
    entries: HashMap<RequisiteKey, String>,
}

impl RequisiteIndex {
    pub fn build<R: Read>(extract: &mut Extract<R>) -> Result<Self, ImportError> {
        let mut index = Self::default();
        for row in extract.rows::<RequisiteRow>() {
            index.insert(&row?);
        }

        Ok(index)
    }

    /// Indexes a row unless its description is blank
    pub fn insert(&mut self, row: &RequisiteRow) {
        let description = row.description.trim();
        if description.is_empty() {
            return;
        }

        self.entries.insert(
            RequisiteKey::new(&row.institution, &row.subject, &row.catalog),
            typographic(description),
        );
    }

    pub fn get(&self, key: &RequisiteKey) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
