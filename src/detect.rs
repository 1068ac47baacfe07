//! Path-based binary format detection.
//!
//! Classifies an input path as ELF or PE from its extension, with a fallback
//! pattern for versioned shared-object names like `libz.so.1`. This is a
//! naive heuristic over the path string, not a content sniff; callers must
//! treat [`BinaryFormat::Unknown`] as an unsupported filetype and abort
//! rather than guess further.

use std::fmt;
use std::path::Path;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

static SHARED_OBJECT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r".+\.so\.\d+").expect("valid shared object regex"));

/// Binary container format of an input path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BinaryFormat {
    /// Unknown or unsupported format
    Unknown,
    /// Executable and Linkable Format (Linux, Unix)
    Elf,
    /// Portable Executable (Windows)
    Pe,
}

impl fmt::Display for BinaryFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BinaryFormat::Unknown => write!(f, "Unknown"),
            BinaryFormat::Elf => write!(f, "ELF"),
            BinaryFormat::Pe => write!(f, "PE"),
        }
    }
}

/// Classify a path by extension, falling back to the versioned `.so.N`
/// pattern for shared objects.
pub fn detect<P: AsRef<Path>>(path: P) -> BinaryFormat {
    let name = path
        .as_ref()
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("");

    // Suffix from the final dot of the basename, dot included.
    let ext = name
        .rfind('.')
        .map(|i| name[i..].to_ascii_lowercase())
        .unwrap_or_default();

    match ext.as_str() {
        "" | ".bin" | ".so" => BinaryFormat::Elf,
        ".dll" | ".exe" => BinaryFormat::Pe,
        _ if SHARED_OBJECT.is_match(name) => BinaryFormat::Elf,
        _ => BinaryFormat::Unknown,
    }
}
