/// Account entity and the balance movements the ledger applies to it.
pub mod account;

/// Immutable transaction records with before/after balance snapshots.
pub mod transaction;

/// Ledger interface, failure taxonomy, plus "in memory" implementation.
/// The ledger is the only place where balances change, and every change
/// appends exactly one transaction.
pub mod ledger;

/// Turns raw requests into ledger commands, checking only that the
/// required fields are present.
pub mod command;

/// Bootstraps a ledger from a CSV command script. Kept in the library so
/// the integration tests can drive it.
pub mod bin_utils;
