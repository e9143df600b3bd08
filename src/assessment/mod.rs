//! Assessment domain: question bank, scoring engines, behavioral task
//! aggregation, cross-validation, state owners, and the report boundary.

pub mod behavioral;
pub mod catalog;
pub mod crossval;
pub mod norms;
pub mod report;
pub mod scoring;
pub mod store;
