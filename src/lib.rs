//! Child-development assessment core.
//!
//! The crate scores Likert questionnaires with classical psychometric
//! transforms, screens answer sequences for degenerate response patterns,
//! cross-validates self-report against behavioral task performance, and
//! composes the material a narrative generator turns into a parent-facing
//! report. Everything derived is a pure function of the answer and task
//! logs; the only external collaborator is the [`assessment::report`]
//! generator boundary.

pub mod assessment;
pub mod config;
pub mod error;
pub mod telemetry;
