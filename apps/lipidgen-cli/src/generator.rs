//! Table processing and source generation.
//!
//! The modules in here form a small pipeline: `tokenizer` splits one
//! delimited line into fields, `identifiers` turns raw names into unique
//! symbolic identifiers, `pipeline` drives both over a whole table, and
//! `rust_source` renders the processed tables as generated Rust artifacts.

pub mod formula;
pub mod identifiers;
pub mod pipeline;
pub mod rust_source;
pub mod tables;
pub mod tokenizer;
