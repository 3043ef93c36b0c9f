pub mod attribute;
pub mod course;
pub mod rule;
pub mod text;
