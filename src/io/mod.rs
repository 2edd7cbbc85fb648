pub mod demand;
pub mod records;
pub mod reporting;
