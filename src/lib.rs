#![allow(clippy::doc_markdown)]
#![doc = include_str!("../README.md")]

pub mod cache;
pub mod core;
pub mod dataset;
pub mod fmt;
pub mod prelude;
pub mod quantity;
pub mod statistics;
