//! Appender implementations

pub mod console;
pub mod memory;

pub use console::ConsoleAppender;
pub use memory::{MemoryAppender, MemoryHandle};

pub use crate::core::Appender;
