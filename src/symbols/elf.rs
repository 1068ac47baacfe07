//! ELF dynamic-symbol extraction.
//!
//! Exports are the dynamic symbols a shared object defines itself: resident
//! in `.text`, carrying a non-zero version index, not supplied by a needed
//! library, and not synthetic cgo bridge symbols. Imports are the undefined
//! dynamic symbols, with the owning library recovered from the
//! version-requirement (`.gnu.version_r`) tables.

use std::collections::HashMap;

use goblin::elf::Elf;
use tracing::debug;

use crate::error::{Result, SymseedError};
use crate::symbols::ImportedSymbol;
use crate::util;

// High bit of a versym entry flags a hidden version; the low 15 bits are the
// version index proper.
const VERSYM_VERSION: u16 = 0x7fff;

/// Names of the functions an ELF image exports, sorted case-insensitively.
pub fn exports(data: &[u8]) -> Result<Vec<String>> {
    let elf = Elf::parse(data).map_err(SymseedError::ContainerOpen)?;

    let text_index = elf
        .section_headers
        .iter()
        .enumerate()
        .filter(|(_, sh)| elf.shdr_strtab.get_at(sh.sh_name) == Some(".text"))
        .map(|(i, _)| i)
        .last();

    let needed = needed_versions(&elf);
    let mut names = Vec::new();

    for (idx, sym) in elf.dynsyms.iter().enumerate() {
        let Some(name) = elf.dynstrtab.get_at(sym.st_name) else {
            continue;
        };
        let version = version_of(&elf, idx);
        let external = needed.contains_key(&version);

        if is_exported(name, sym.st_shndx, text_index, version, external) {
            names.push(name.to_string());
        }
    }

    util::sort_case_insensitive(&mut names);
    debug!(count = names.len(), "collected ELF exports");
    Ok(names)
}

/// Imported functions of an ELF image, sorted case-insensitively by name.
///
/// The library field is empty for unversioned imports; ELF entries are never
/// dropped for it.
pub fn imports(data: &[u8]) -> Result<Vec<ImportedSymbol>> {
    let elf = Elf::parse(data).map_err(SymseedError::ContainerOpen)?;

    let needed = needed_versions(&elf);
    let mut entries = Vec::new();

    for (idx, sym) in elf.dynsyms.iter().enumerate() {
        if !sym.is_import() {
            continue;
        }
        let Some(name) = elf.dynstrtab.get_at(sym.st_name) else {
            continue;
        };
        if name.is_empty() {
            continue;
        }

        let version = version_of(&elf, idx);
        let library = needed.get(&version).cloned().unwrap_or_default();
        entries.push(ImportedSymbol {
            name: name.to_string(),
            library,
        });
    }

    entries.sort_by(|a, b| util::cmp_case_insensitive(&a.name, &b.name));
    debug!(count = entries.len(), "collected ELF imports");
    Ok(entries)
}

/// Version index of the dynamic symbol at `idx`, 0 when no versym section is
/// present.
fn version_of(elf: &Elf, idx: usize) -> u16 {
    elf.versym
        .as_ref()
        .and_then(|v| v.get_at(idx))
        .map(|v| v.vs_val & VERSYM_VERSION)
        .unwrap_or(0)
}

/// Map of version index to the library file that supplies it, built from the
/// version-requirement section.
fn needed_versions(elf: &Elf) -> HashMap<u16, String> {
    let mut map = HashMap::new();
    if let Some(verneed) = &elf.verneed {
        for need in verneed.iter() {
            let file = elf
                .dynstrtab
                .get_at(need.vn_file)
                .unwrap_or_default()
                .to_string();
            for aux in need.iter() {
                map.insert(aux.vna_other & VERSYM_VERSION, file.clone());
            }
        }
    }
    map
}

/// Export eligibility for one dynamic symbol.
///
/// `external` is true when the symbol's version is supplied by a needed
/// library, i.e. the symbol is defined elsewhere.
fn is_exported(
    name: &str,
    shndx: usize,
    text_index: Option<usize>,
    version: u16,
    external: bool,
) -> bool {
    if external {
        return false;
    }
    if text_index != Some(shndx) {
        return false;
    }
    if version == 0 {
        // Unversioned or hidden default entry.
        return false;
    }
    if name.is_empty() || name.starts_with("_cgo") || name.starts_with("x_cgo") {
        return false;
    }
    true
}
