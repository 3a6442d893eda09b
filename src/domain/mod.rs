//! Domain types and the pure rules of the ledger client.

pub mod account;
pub mod history;
pub mod ports;
pub mod session;
pub mod transaction;
pub mod transfer;
