pub mod course;
pub mod institution;
pub mod rule;
