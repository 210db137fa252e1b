//! ConnectionRegistry の実装
//!
//! - `inmemory`: in-process `HashMap` behind an async `RwLock`

pub mod inmemory;

pub use inmemory::InMemoryConnectionRegistry;
