//! Symbol extraction facade.
//!
//! Four entry points cover the format/direction matrix — ELF exports, ELF
//! imports, PE exports, PE imports — each reading the input file exactly once
//! and returning sorted, deduplicated results. [`extract`] dispatches on the
//! detected format and applies the caller's library filter to imports. Every
//! call is a pure function of its inputs; no state survives a call.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

pub mod elf;
pub mod pe;

use crate::detect::{detect, BinaryFormat};
use crate::error::{Result, SymseedError};
use crate::formats;

/// One external function a binary expects to be resolved at load time.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ImportedSymbol {
    pub name: String,
    /// Library expected to supply the function. Empty only for unversioned
    /// ELF imports; PE entries without a library are dropped during
    /// extraction.
    pub library: String,
}

/// Result of one extraction: everything the stub generator needs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymbolSet {
    pub format: BinaryFormat,
    pub exports: Vec<String>,
    pub imports: Vec<ImportedSymbol>,
}

/// Exported function names of an ELF shared object.
pub fn elf_exports<P: AsRef<Path>>(path: P) -> Result<Vec<String>> {
    let data = fs::read(path)?;
    elf::exports(&data)
}

/// Imported functions of an ELF binary.
pub fn elf_imports<P: AsRef<Path>>(path: P) -> Result<Vec<ImportedSymbol>> {
    let data = fs::read(path)?;
    elf::imports(&data)
}

/// Exported function names of a PE image.
pub fn pe_exports<P: AsRef<Path>>(path: P) -> Result<Vec<String>> {
    let data = fs::read(path)?;
    Ok(formats::pe::decode(&data)?.names())
}

/// Imported functions of a PE image.
pub fn pe_imports<P: AsRef<Path>>(path: P) -> Result<Vec<ImportedSymbol>> {
    let data = fs::read(path)?;
    pe::imports(&data)
}

/// Retain imports whose library matches the filter set, case-insensitively.
///
/// An empty filter retains everything. Filtering is applied after extraction
/// and never short-circuits the decode.
pub fn filter_imports(imports: Vec<ImportedSymbol>, libraries: &[String]) -> Vec<ImportedSymbol> {
    if libraries.is_empty() {
        return imports;
    }
    let wanted: HashSet<String> = libraries.iter().map(|l| l.to_lowercase()).collect();
    imports
        .into_iter()
        .filter(|imp| wanted.contains(&imp.library.to_lowercase()))
        .collect()
}

/// Detect the format of `path`, extract its exports and imports, and apply
/// the library filter to the imports.
///
/// An unclassifiable path yields [`SymseedError::UnsupportedFormat`] without
/// touching the file.
pub fn extract<P: AsRef<Path>>(path: P, libraries: &[String]) -> Result<SymbolSet> {
    let path = path.as_ref();
    let format = detect(path);
    debug!(path = %path.display(), %format, "extracting symbols");

    let (exports, imports) = match format {
        BinaryFormat::Elf => {
            let data = fs::read(path)?;
            (elf::exports(&data)?, elf::imports(&data)?)
        }
        BinaryFormat::Pe => {
            let data = fs::read(path)?;
            (formats::pe::decode(&data)?.names(), pe::imports(&data)?)
        }
        BinaryFormat::Unknown => {
            return Err(SymseedError::UnsupportedFormat(path.display().to_string()))
        }
    };

    Ok(SymbolSet {
        format,
        exports,
        imports: filter_imports(imports, libraries),
    })
}
