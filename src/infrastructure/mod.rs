//! Adapters for the backend and authentication ports.

pub mod http;
pub mod in_memory;
