// crates/pitchreel-core/src/helpers/mod.rs

pub mod time;
pub mod url;
