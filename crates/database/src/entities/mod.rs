pub mod course_attributes;
pub mod courses;
pub mod destination_courses;
pub mod institutions;
pub mod rule_groups;
pub mod source_courses;
pub mod transfer_rules;
pub mod updates;
