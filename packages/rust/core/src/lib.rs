//! Core orchestration for combining a documentation directory.
//!
//! This crate ties together discovery, decoding, title extraction, and
//! document assembly into a single run (see [`pipeline::combine_docs`]).

pub mod assembler;
pub mod pipeline;
pub mod toc;
