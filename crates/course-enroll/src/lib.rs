//! Course enrollment: catalog access, the application submission pipeline, and the
//! confirmation document produced for every accepted application.

pub mod config;
pub mod error;
pub mod telemetry;
pub mod workflows;
