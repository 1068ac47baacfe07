//! Byte-window utilities for PE parsing.

use crate::error::{Result, SymseedError};

/// Extension trait for reading little-endian primitives from byte slices.
pub trait ReadExt {
    fn read_u16_le_at(&self, offset: usize) -> Option<u16>;
    fn read_u32_le_at(&self, offset: usize) -> Option<u32>;
}

impl ReadExt for [u8] {
    #[inline(always)]
    fn read_u16_le_at(&self, offset: usize) -> Option<u16> {
        self.get(offset..offset.checked_add(2)?)
            .and_then(|b| b.try_into().ok())
            .map(u16::from_le_bytes)
    }

    #[inline(always)]
    fn read_u32_le_at(&self, offset: usize) -> Option<u32> {
        self.get(offset..offset.checked_add(4)?)
            .and_then(|b| b.try_into().ok())
            .map(u32::from_le_bytes)
    }
}

/// Advancing reader over a byte buffer, used for fixed-layout records.
///
/// Keeps the byte-layout knowledge in one place: each read is bounds-checked
/// against the buffer and failures map to a truncated-record error rather
/// than a panic.
pub struct Cursor<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(buf: &'a [u8], pos: usize) -> Self {
        Cursor { buf, pos }
    }

    pub fn read_u16(&mut self) -> Result<u16> {
        let v = self
            .buf
            .read_u16_le_at(self.pos)
            .ok_or(SymseedError::TruncatedExportTable)?;
        self.pos += 2;
        Ok(v)
    }

    pub fn read_u32(&mut self) -> Result<u32> {
        let v = self
            .buf
            .read_u32_le_at(self.pos)
            .ok_or(SymseedError::TruncatedExportTable)?;
        self.pos += 4;
        Ok(v)
    }
}
