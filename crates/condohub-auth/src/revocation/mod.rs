//! Revocation ledger and its housekeeping task.

pub mod ledger;
pub mod purger;

pub use ledger::RevocationLedger;
pub use purger::LedgerPurger;
