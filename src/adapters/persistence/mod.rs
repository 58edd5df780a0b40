//! Persistence adapters. Session token file.

pub mod token_file;

pub use token_file::TokenFile;
