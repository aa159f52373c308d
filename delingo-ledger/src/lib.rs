//! # Delingo Ledger
//! This crate owns the voting rules of the forum: every user holds at most one
//! vote per thread or post, and casting a vote creates, flips or retracts it.
pub mod errors;
pub mod ledger;

pub use errors::LedgerError;
pub use ledger::VoteLedger;
