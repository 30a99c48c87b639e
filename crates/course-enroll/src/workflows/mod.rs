pub mod catalog;
pub mod collaborator;
pub mod enrollment;
