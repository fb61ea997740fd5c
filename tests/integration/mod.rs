//! Loader behavior exercised through the public API

mod fetch_fanout;
mod inline_source;
mod readiness;
mod support;
