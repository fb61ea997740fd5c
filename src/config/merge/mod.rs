//! Settings composition: defaults, source precedence, deserialization.

pub mod policy;
pub mod service;
