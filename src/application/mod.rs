//! Application layer orchestrating the domain rules and the backend port.
//!
//! `LedgerClient` is the entry point used by the command-line front end.

pub mod client;
