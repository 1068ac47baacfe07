//! Binary format support modules.

pub mod pe;
