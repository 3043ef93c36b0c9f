pub mod attributes;
pub mod merge;
pub mod pass;
pub mod requisites;
pub mod rows;
