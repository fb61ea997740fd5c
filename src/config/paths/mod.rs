//! Filesystem locations for settings and logs.

pub mod xdg_root;
