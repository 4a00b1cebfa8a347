//! Administrative services.

pub mod code;
