pub mod analysis;
pub mod chart;
pub mod error;
pub mod fetch;
pub mod grading;
pub mod histogram;
pub mod output;
pub mod parser;
pub mod summary;
