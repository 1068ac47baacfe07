//! PE import extraction.
//!
//! Import enumeration is delegated to the container library, which yields one
//! (function name, library) pair per import thunk. Entries that lack either
//! side are dropped rather than stored with an empty field.

use goblin::pe::{header::Header, PE};
use tracing::debug;

use crate::error::{Result, SymseedError};
use crate::symbols::ImportedSymbol;
use crate::util;

/// Imported functions of a PE image, sorted case-insensitively by name.
pub fn imports(data: &[u8]) -> Result<Vec<ImportedSymbol>> {
    // Validate the container shape first so a non-PE input surfaces as an
    // open failure rather than an import-read failure.
    Header::parse(data).map_err(SymseedError::ContainerOpen)?;

    let pe = PE::parse(data).map_err(|source| SymseedError::SymbolRead {
        phase: "imports",
        source,
    })?;

    Ok(collect_imports(
        pe.imports.iter().map(|imp| (imp.name.as_ref(), imp.dll)),
    ))
}

/// Normalize raw (name, library) import pairs: drop incomplete entries and
/// sort the survivors case-insensitively by name.
fn collect_imports<'a, I>(entries: I) -> Vec<ImportedSymbol>
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    let mut out = Vec::new();
    for (name, library) in entries {
        if name.is_empty() || library.is_empty() {
            debug!(name, library, "dropping import entry without name:library");
            continue;
        }
        out.push(ImportedSymbol {
            name: name.to_string(),
            library: library.to_string(),
        });
    }

    out.sort_by(|a, b| util::cmp_case_insensitive(&a.name, &b.name));
    out
}
