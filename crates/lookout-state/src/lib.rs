//! In-memory client state: the content catalog, the account roster, and the
//! pure filter between catalog and list rendering. Nothing here performs I/O.

pub mod catalog;
pub mod filter;
pub mod roster;

pub use catalog::ContentCatalog;
pub use roster::AccountRoster;
