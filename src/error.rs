//! Error types for symbol extraction.
//!
//! A single structured error enum covers every failure the extraction
//! pipeline can surface: unsupported inputs, container-library failures, and
//! the bounds violations the PE export decoder guards against. Nothing is
//! retried internally; every error is returned to the immediate caller.

use thiserror::Error;

/// Main error type for symseed operations.
#[derive(Debug, Error)]
pub enum SymseedError {
    /// The path heuristic could not classify the input.
    #[error("unsupported file type: {0}")]
    UnsupportedFormat(String),

    /// The image is not a well-formed ELF/PE container.
    #[error("failed to open binary: {0}")]
    ContainerOpen(#[source] goblin::error::Error),

    /// The container library failed while enumerating symbols or sections.
    #[error("failed to read {phase}: {source}")]
    SymbolRead {
        phase: &'static str,
        #[source]
        source: goblin::error::Error,
    },

    /// The optional header is missing or has an unknown shape.
    #[error("invalid optional header format")]
    InvalidOptionalHeader,

    /// The export directory header extends past the available section bytes.
    #[error("truncated export table")]
    TruncatedExportTable,

    /// A section's raw data range extends past the end of the file.
    #[error("section {name} extends past end of file")]
    TruncatedSection { name: String },

    /// A name pointer, ordinal, or name scan addressed bytes outside the
    /// loaded section.
    #[error("export {what} is out of range at entry {index}")]
    ExportOutOfRange { what: &'static str, index: u32 },

    /// An RVA does not fall within any known section.
    #[error("failed to find section for address {rva:#010x}")]
    SectionNotFound { rva: u32 },

    /// File I/O errors.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for symseed operations.
pub type Result<T> = std::result::Result<T, SymseedError>;
