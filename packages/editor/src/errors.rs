//! Error types for the editor

use pagesmith_compiler_html::CompileError;
use pagesmith_document::DocumentError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EditorError {
    #[error("Document error: {0}")]
    Document(#[from] DocumentError),

    #[error("Export error: {0}")]
    Export(#[from] CompileError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
