use models::rule::TransferRule;
use serde::Deserialize;

/// One row of the transfer-rules extract
#[derive(Debug, Clone, Deserialize)]
pub struct TransferRuleRow {
    pub source_institution: String,
    pub source_course_id: i32,
    pub source_discipline: String,
    pub source_catalog_num: String,
    pub transfer_priority: i32,
    /// Rule group number
    pub src_equivalency_component: i32,
    pub equivalency_sequence_num: i32,
    pub src_min_units: f64,
    pub src_max_units: f64,
    pub min_grade_pts: f64,
    pub max_grade_pts: f64,
    pub destination_institution: String,
    pub destination_course_id: i32,
    pub destination_discipline: String,
    pub destination_catalog_num: String,
    pub units_taken: f64,
    pub dest_min_units: f64,
    pub dest_max_units: f64,
}

impl TransferRuleRow {
    pub fn to_rule(&self) -> TransferRule {
        TransferRule {
            source_course_id: self.source_course_id,
            source_institution: self.source_institution.clone(),
            source_discipline: self.source_discipline.clone(),
            source_catalog_number: self.source_catalog_num.clone(),
            rule_priority: self.transfer_priority,
            rule_group: self.src_equivalency_component,
            rule_group_sequence: self.equivalency_sequence_num,
            min_source_units: self.src_min_units,
            max_source_units: self.src_max_units,
            min_gpa: self.min_grade_pts,
            max_gpa: self.max_grade_pts,
            destination_course_id: self.destination_course_id,
            destination_institution: self.destination_institution.clone(),
            destination_discipline: self.destination_discipline.clone(),
            destination_catalog_number: self.destination_catalog_num.clone(),
            taken_destination_units: self.units_taken,
            min_destination_units: self.dest_min_units,
            max_destination_units: self.dest_max_units,
        }
    }
}
