pub mod build;
pub mod pools;
pub mod project_loader;
