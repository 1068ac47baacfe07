//! Raw PE structure decoding.

pub mod export;
pub mod sections;
pub mod utils;

pub use export::{decode, ExportDirectory};
