//! # symseed
//!
//! Extracts the symbol surface of compiled native binaries — the functions an
//! ELF or PE library exports and the functions a binary imports — to seed
//! code generation of stub declarations for re-implementing or proxying a
//! library.
//!
//! Format detection is a path heuristic; ELF symbols and PE imports are read
//! through the container library, while the PE Export Directory Table is
//! decoded from raw section bytes by this crate. All results are sorted
//! case-insensitively and every extraction call is independent, with no
//! shared state.
//!
//! ```no_run
//! fn main() -> symseed::Result<()> {
//!     let set = symseed::extract("samples/libdemo.so.1", &[])?;
//!     for name in &set.exports {
//!         println!("{name}");
//!     }
//!     Ok(())
//! }
//! ```

pub mod detect;
pub mod error;
pub mod formats;
pub mod logging;
pub mod symbols;

pub(crate) mod util;

pub use detect::{detect, BinaryFormat};
pub use error::{Result, SymseedError};
pub use symbols::{
    elf_exports, elf_imports, extract, filter_imports, pe_exports, pe_imports, ImportedSymbol,
    SymbolSet,
};
