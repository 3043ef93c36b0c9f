use models::{
    attribute::AttributePair,
    course::{CatalogKey, Component, CourseKey},
};
use serde::Deserialize;

/// One row of the catalog extract: a single component of a course offering
#[derive(Debug, Clone, Deserialize)]
pub struct CatalogRow {
    pub institution: String,
    /// Department
    pub acad_org: String,
    /// Discipline
    pub subject: String,
    pub course_id: i32,
    pub offer_nbr: i32,
    pub equiv_course_group: String,
    pub catalog_number: String,
    pub component_course_component: String,
    pub instructor_contact_hours: f64,
    pub primary_component: String,
    pub course_contact_hours: f64,
    pub min_units: f64,
    pub max_units: f64,
    /// CUNY-wide subject
    pub subject_external_area: String,
    pub long_course_title: String,
    pub designation: String,
    pub descr: String,
    pub career: String,
    pub crse_catalog_status: String,
    pub subject_eff_status: String,
    pub schedule_course: String,
}

impl CatalogRow {
    pub fn key(&self) -> CatalogKey {
        CatalogKey {
            course: CourseKey::new(self.course_id, self.offer_nbr),
            discipline: self.subject.clone(),
            catalog_number: self.catalog_number.trim().to_string(),
        }
    }

    pub fn component(&self) -> Component {
        Component::new(
            self.component_course_component.clone(),
            self.instructor_contact_hours,
        )
    }

    /// The equivalence group, absent when the cell is not an integer
    pub fn equivalence_group(&self) -> Option<i32> {
        self.equiv_course_group.trim().parse().ok()
    }

    /// Approved in the catalog and schedulable
    pub fn is_active(&self) -> bool {
        self.crse_catalog_status == "A" && self.schedule_course == "Y"
    }
}

/// One row of the attributes extract
#[derive(Debug, Clone, Deserialize)]
pub struct AttributeRow {
    pub institution: String,
    pub course_id: i32,
    pub course_offering_nbr: i32,
    pub course_attribute: String,
    pub course_attribute_value: String,
}

impl AttributeRow {
    pub fn key(&self) -> CourseKey {
        CourseKey::new(self.course_id, self.course_offering_nbr)
    }

    pub fn pair(&self) -> AttributePair {
        AttributePair::new(&self.course_attribute, &self.course_attribute_value)
    }
}

/// One row of the attribute-value reference extract
#[derive(Debug, Clone, Deserialize)]
pub struct AttributeValueRow {
    pub crse_attr: String,
    pub crsatr_val: String,
    pub formal_description: String,
}

/// One row of the requisites extract
#[derive(Debug, Clone, Deserialize)]
pub struct RequisiteRow {
    pub institution: String,
    pub subject: String,
    pub catalog: String,
    #[serde(rename = "descr_of_pre_co-requisites")]
    pub description: String,
}
