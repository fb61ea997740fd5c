//! Settings sources, each adding one layer to the builder.

pub mod environment;
pub mod explicit_file;
pub mod global_file;
