//! Benchmark instance readers.

mod chao;

pub use chao::parse_chao;
