mod compiler;
mod config;


pub use compiler::{generate_project, generate_project_with, CompileError, GeneratedProject};
pub use config::GenerateConfig;
