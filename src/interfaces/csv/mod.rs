//! CSV renderings of accounts and transaction histories.

pub mod account_writer;
pub mod history_writer;
