pub mod kv;
pub mod usage;

pub use kv::{any_path_handler, kv_handler};
pub use usage::usage_handler;
