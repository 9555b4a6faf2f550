//! Library surface of the cellmap CLI: row-dump loading and logging setup.

#![deny(unsafe_code)]

pub mod dump;
pub mod logging;
