pub mod config;
pub mod error;
pub mod hierarchy;
pub mod load;
pub mod select;
pub mod validate;
pub mod wasm;
