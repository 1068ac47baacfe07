//! RVA-to-section geometry.

use goblin::pe::section_table::SectionTable;

use crate::error::{Result, SymseedError};

/// Find the section containing `rva` and the offset of `rva` within it.
///
/// Sections are scanned linearly in file order and the first match wins. The
/// upper bound is inclusive: an address exactly at `virtual_address +
/// virtual_size` matches, so an address on the boundary between two adjacent
/// sections resolves to whichever comes first in the table.
pub fn section_for_rva(sections: &[SectionTable], rva: u32) -> Result<(&SectionTable, u32)> {
    for section in sections {
        let start = section.virtual_address;
        let stop = start.saturating_add(section.virtual_size);

        if rva >= start && rva <= stop {
            return Ok((section, rva - start));
        }
    }

    Err(SymseedError::SectionNotFound { rva })
}

/// Borrow a section's raw file bytes.
pub fn section_data<'a>(data: &'a [u8], section: &SectionTable) -> Result<&'a [u8]> {
    let start = section.pointer_to_raw_data as usize;
    let end = start.saturating_add(section.size_of_raw_data as usize);

    data.get(start..end)
        .ok_or_else(|| SymseedError::TruncatedSection {
            name: section.name().unwrap_or("<invalid>").to_string(),
        })
}
