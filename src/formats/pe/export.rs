//! PE Export Directory Table decoding.
//!
//! The export directory is decoded from raw section bytes rather than
//! delegated to the container library: the directory RVA from the optional
//! header's data-directory array is resolved to its containing section, the
//! fixed 40-byte header is read through a cursor, and the parallel name
//! pointer / name ordinal tables are walked to build a name-to-ordinal map.
//!
//! Known limitation: export name pointers are assumed to land in the same
//! loaded section as the directory itself. Cross-section name pointers are
//! legal PE but unsupported here; handling them would change observable
//! output for edge-case binaries.

use std::collections::HashMap;

use goblin::pe::header::{Header, SIZEOF_COFF_HEADER, SIZEOF_PE_MAGIC};
use goblin::pe::section_table::SectionTable;
use tracing::debug;

use crate::error::{Result, SymseedError};
use crate::formats::pe::sections::{section_data, section_for_rva};
use crate::formats::pe::utils::{Cursor, ReadExt};
use crate::util;

/// Size of the fixed export directory header.
pub const EXPORT_DIRECTORY_SIZE: usize = 40;

/// Decoded PE export directory: the fixed header fields plus the
/// name-to-ordinal mapping recovered from the name and ordinal tables.
///
/// An empty directory (no export data directory, or `number_of_names == 0`)
/// is a valid terminal state, not an error.
#[derive(Debug, Clone, Default)]
pub struct ExportDirectory {
    pub characteristics: u32,
    pub time_date_stamp: u32,
    pub major_version: u16,
    pub minor_version: u16,
    pub name_rva: u32,
    pub ordinal_base: u32,
    pub number_of_functions: u32,
    pub number_of_names: u32,
    pub address_of_functions: u32,
    pub address_of_names: u32,
    pub address_of_name_ordinals: u32,
    functions: HashMap<String, u32>,
}

impl ExportDirectory {
    /// Exported names sorted case-insensitively.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.functions.keys().cloned().collect();
        util::sort_case_insensitive(&mut names);
        names
    }

    /// Name to public ordinal (table index + ordinal base) mapping.
    pub fn functions(&self) -> &HashMap<String, u32> {
        &self.functions
    }

    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }
}

/// Decode the export directory of a full PE image.
///
/// A missing or zero export data directory yields an empty
/// [`ExportDirectory`]; a missing optional header is a format error.
pub fn decode(data: &[u8]) -> Result<ExportDirectory> {
    let header = Header::parse(data).map_err(SymseedError::ContainerOpen)?;
    let optional = header
        .optional_header
        .ok_or(SymseedError::InvalidOptionalHeader)?;

    let dir_rva = match optional.data_directories.get_export_table() {
        Some(dir) if dir.virtual_address != 0 => dir.virtual_address,
        _ => {
            debug!("no export data directory; returning empty export set");
            return Ok(ExportDirectory::default());
        }
    };

    let mut offset = header.dos_header.pe_pointer as usize
        + SIZEOF_PE_MAGIC
        + SIZEOF_COFF_HEADER
        + header.coff_header.size_of_optional_header as usize;
    let sections = header
        .coff_header
        .sections(data, &mut offset)
        .map_err(|source| SymseedError::SymbolRead {
            phase: "sections",
            source,
        })?;

    parse_directory(data, &sections, dir_rva)
}

/// Decode an export directory at `dir_rva` given the image's section table.
///
/// All-or-nothing: any bounds violation aborts the decode and partial results
/// are discarded.
pub fn parse_directory(
    data: &[u8],
    sections: &[SectionTable],
    dir_rva: u32,
) -> Result<ExportDirectory> {
    let (section, dir_off) = section_for_rva(sections, dir_rva)?;
    let buf = section_data(data, section)?;
    let dir_off = dir_off as usize;

    if buf.len() < dir_off + EXPORT_DIRECTORY_SIZE {
        return Err(SymseedError::TruncatedExportTable);
    }

    let mut cur = Cursor::new(buf, dir_off);
    let mut dir = ExportDirectory {
        characteristics: cur.read_u32()?,
        time_date_stamp: cur.read_u32()?,
        major_version: cur.read_u16()?,
        minor_version: cur.read_u16()?,
        name_rva: cur.read_u32()?,
        ordinal_base: cur.read_u32()?,
        number_of_functions: cur.read_u32()?,
        number_of_names: cur.read_u32()?,
        address_of_functions: cur.read_u32()?,
        address_of_names: cur.read_u32()?,
        address_of_name_ordinals: cur.read_u32()?,
        functions: HashMap::new(),
    };

    if dir.number_of_names == 0 {
        return Ok(dir);
    }

    let (_, names_off) = section_for_rva(sections, dir.address_of_names)?;
    let (_, ordinals_off) = section_for_rva(sections, dir.address_of_name_ordinals)?;

    for i in 0..dir.number_of_names {
        let entry = names_off as usize + 4 * i as usize;
        let name_rva = buf
            .read_u32_le_at(entry)
            .ok_or(SymseedError::ExportOutOfRange {
                what: "name pointer",
                index: i,
            })?;

        // The pointer is resolved against the full section table but read
        // from the directory's own section buffer (see module docs).
        let (_, name_start) = section_for_rva(sections, name_rva)?;
        let name_start = name_start as usize;
        let tail = buf
            .get(name_start..)
            .ok_or(SymseedError::ExportOutOfRange {
                what: "name",
                index: i,
            })?;
        let len = memchr::memchr(0, tail).ok_or(SymseedError::ExportOutOfRange {
            what: "name",
            index: i,
        })?;
        let name = String::from_utf8_lossy(&tail[..len]).into_owned();

        let ordinal_entry = ordinals_off as usize + 2 * i as usize;
        let ordinal =
            buf.read_u16_le_at(ordinal_entry)
                .ok_or(SymseedError::ExportOutOfRange {
                    what: "ordinal",
                    index: i,
                })?;

        // The biased ordinal wraps on overflow rather than erroring out; a
        // corrupted ordinal base still yields a decoded directory.
        dir.functions
            .insert(name, u32::from(ordinal).wrapping_add(dir.ordinal_base));
    }

    debug!(names = dir.functions.len(), "decoded export directory");
    Ok(dir)
}
