//! Synthetic PE32+ image builder for integration tests.
//!
//! Produces a minimal but well-formed image: DOS header, COFF header, PE32+
//! optional header with 16 data directories, section headers, and raw section
//! data at file-aligned offsets.

#![allow(dead_code)]

pub const DOS_STUB_SIZE: u32 = 0x80;
pub const FILE_ALIGNMENT: u32 = 0x200;
pub const SECTION_ALIGNMENT: u32 = 0x1000;

const SIZEOF_OPTIONAL_HEADER: u16 = 240; // PE32+ with 16 data directories

pub struct SectionSpec {
    pub name: &'static str,
    pub virtual_address: u32,
    pub virtual_size: u32,
    pub raw_offset: u32,
    pub data: Vec<u8>,
}

struct Writer(Vec<u8>);

impl Writer {
    fn u16(&mut self, v: u16) {
        self.0.extend_from_slice(&v.to_le_bytes());
    }
    fn u32(&mut self, v: u32) {
        self.0.extend_from_slice(&v.to_le_bytes());
    }
    fn u64(&mut self, v: u64) {
        self.0.extend_from_slice(&v.to_le_bytes());
    }
    fn pad_to(&mut self, len: usize) {
        assert!(self.0.len() <= len, "layout overflow: {} > {len}", self.0.len());
        self.0.resize(len, 0);
    }
}

/// Build a PE32+ image from section specs and optional export/import data
/// directory entries. `with_optional_header: false` emits a COFF-only image
/// (size_of_optional_header == 0).
pub fn build_pe64(
    sections: &[SectionSpec],
    export_dir: Option<(u32, u32)>,
    import_dir: Option<(u32, u32)>,
    with_optional_header: bool,
) -> Vec<u8> {
    let mut w = Writer(Vec::new());

    // DOS header: MZ signature and e_lfanew, the rest zeroed.
    w.u16(0x5a4d);
    w.pad_to(0x3c);
    w.u32(DOS_STUB_SIZE);
    w.pad_to(DOS_STUB_SIZE as usize);

    // PE signature + COFF header.
    w.0.extend_from_slice(b"PE\0\0");
    w.u16(0x8664); // machine: x86-64
    w.u16(sections.len() as u16);
    w.u32(0); // time date stamp
    w.u32(0); // pointer to symbol table
    w.u32(0); // number of symbols
    w.u16(if with_optional_header {
        SIZEOF_OPTIONAL_HEADER
    } else {
        0
    });
    w.u16(0x2002); // EXECUTABLE_IMAGE | DLL

    if with_optional_header {
        let size_of_image = sections
            .iter()
            .map(|s| (s.virtual_address + s.virtual_size).next_multiple_of(SECTION_ALIGNMENT))
            .max()
            .unwrap_or(SECTION_ALIGNMENT);

        // Standard fields (PE32+).
        w.u16(0x20b); // magic
        w.0.push(14); // linker major
        w.0.push(0); // linker minor
        w.u32(0); // size of code
        w.u32(0); // size of initialized data
        w.u32(0); // size of uninitialized data
        w.u32(0); // address of entry point
        w.u32(0x1000); // base of code

        // Windows-specific fields.
        w.u64(0x1_8000_0000); // image base
        w.u32(SECTION_ALIGNMENT);
        w.u32(FILE_ALIGNMENT);
        w.u16(6); // os major
        w.u16(0); // os minor
        w.u16(0); // image major
        w.u16(0); // image minor
        w.u16(6); // subsystem major
        w.u16(0); // subsystem minor
        w.u32(0); // win32 version
        w.u32(size_of_image);
        w.u32(FILE_ALIGNMENT); // size of headers
        w.u32(0); // checksum
        w.u16(3); // subsystem: console
        w.u16(0); // dll characteristics
        w.u64(0x10_0000); // stack reserve
        w.u64(0x1000); // stack commit
        w.u64(0x10_0000); // heap reserve
        w.u64(0x1000); // heap commit
        w.u32(0); // loader flags
        w.u32(16); // number of rva and sizes

        // Data directories: export, import, then 14 empty.
        let (erva, esize) = export_dir.unwrap_or((0, 0));
        w.u32(erva);
        w.u32(esize);
        let (irva, isize) = import_dir.unwrap_or((0, 0));
        w.u32(irva);
        w.u32(isize);
        for _ in 2..16 {
            w.u64(0);
        }
    }

    // Section headers.
    for s in sections {
        let mut name = [0u8; 8];
        name[..s.name.len()].copy_from_slice(s.name.as_bytes());
        w.0.extend_from_slice(&name);
        w.u32(s.virtual_size);
        w.u32(s.virtual_address);
        w.u32(s.data.len() as u32);
        w.u32(s.raw_offset);
        w.u32(0); // pointer to relocations
        w.u32(0); // pointer to line numbers
        w.u16(0); // relocation count
        w.u16(0); // line number count
        w.u32(0x4000_0040); // READ | INITIALIZED_DATA
    }

    // Raw section data.
    for s in sections {
        w.pad_to(s.raw_offset as usize);
        w.0.extend_from_slice(&s.data);
    }

    w.0
}

fn put_u16(buf: &mut [u8], off: usize, v: u16) {
    buf[off..off + 2].copy_from_slice(&v.to_le_bytes());
}

fn put_u32(buf: &mut [u8], off: usize, v: u32) {
    buf[off..off + 4].copy_from_slice(&v.to_le_bytes());
}

fn put_u64(buf: &mut [u8], off: usize, v: u64) {
    buf[off..off + 8].copy_from_slice(&v.to_le_bytes());
}

/// Export section payload with one named export per entry, directory header
/// at the section start. Returns the raw bytes for a section at `va`.
pub fn export_section_data(va: u32, ordinal_base: u32, entries: &[(&str, u16)]) -> Vec<u8> {
    let n = entries.len() as u32;
    let names_table = 0x40;
    let ordinals_table = names_table + 4 * entries.len();
    let functions_table = ordinals_table + 2 * entries.len();
    let mut name_bytes = functions_table + 4 * entries.len();

    let mut buf = vec![0u8; 0x200];
    put_u32(&mut buf, 16, ordinal_base);
    put_u32(&mut buf, 20, n); // number of functions
    put_u32(&mut buf, 24, n); // number of names
    put_u32(&mut buf, 28, va + functions_table as u32);
    put_u32(&mut buf, 32, va + names_table as u32);
    put_u32(&mut buf, 36, va + ordinals_table as u32);

    for (i, (name, ordinal)) in entries.iter().enumerate() {
        put_u32(&mut buf, names_table + 4 * i, va + name_bytes as u32);
        put_u16(&mut buf, ordinals_table + 2 * i, *ordinal);
        put_u32(&mut buf, functions_table + 4 * i, 0x1111);
        buf[name_bytes..name_bytes + name.len()].copy_from_slice(name.as_bytes());
        name_bytes += name.len() + 1; // NUL terminator
    }

    buf
}

/// Import section payload: one DLL with the given functions, directory at the
/// section start. Returns the raw bytes for a section at `va`.
pub fn import_section_data(va: u32, dll: &str, functions: &[&str]) -> Vec<u8> {
    let ilt = 0x28usize;
    let iat = ilt + 8 * (functions.len() + 1);
    let dll_name = iat + 8 * (functions.len() + 1);
    let mut hint_name = dll_name + dll.len() + 1;

    let mut buf = vec![0u8; 0x200];

    // Import directory table: one entry plus the all-zero terminator.
    put_u32(&mut buf, 0, va + ilt as u32); // import lookup table
    put_u32(&mut buf, 12, va + dll_name as u32); // dll name
    put_u32(&mut buf, 16, va + iat as u32); // import address table

    buf[dll_name..dll_name + dll.len()].copy_from_slice(dll.as_bytes());

    for (i, function) in functions.iter().enumerate() {
        put_u64(&mut buf, ilt + 8 * i, u64::from(va) + hint_name as u64);
        put_u64(&mut buf, iat + 8 * i, u64::from(va) + hint_name as u64);
        // u16 hint of zero, then the function name.
        buf[hint_name + 2..hint_name + 2 + function.len()].copy_from_slice(function.as_bytes());
        hint_name += 2 + function.len() + 1;
    }

    buf
}
