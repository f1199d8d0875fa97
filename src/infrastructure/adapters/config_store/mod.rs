//! Config Store Adapter

mod env_file;

pub use env_file::{normalize_stock_list, EnvFileConfigStore};
