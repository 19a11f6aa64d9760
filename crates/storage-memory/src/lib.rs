//! In-memory storage implementation for dalia.
//!
//! Implements the repository traits defined in `dalia-core` with
//! process-lifetime state. Persistence technology is out of scope for
//! the core; this crate honors the same contract a durable store must:
//!
//! - appends assign a per-portfolio monotonic sequence number shared
//!   by transactions and cash flows, and are all-or-nothing;
//! - appends to one portfolio are serialized, appends to different
//!   portfolios proceed in parallel (sharded map locking);
//! - once an append returns, every subsequent read from any caller
//!   observes the record (read-your-writes and monotonic reads);
//! - reads return point-in-time snapshots in `(timestamp, sequence)`
//!   order, never renumbered.

mod ledger;
mod portfolios;
mod securities;


pub use ledger::MemoryLedgerRepository;
pub use portfolios::MemoryPortfolioRepository;
pub use securities::{MemorySecurityDirectory, SecurityListing};
