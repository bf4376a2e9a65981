//! Remote ocean current snapshots.
//!
//! The live current field is not archived locally; it is read from a
//! remote subsetting service, reduced to a speed field and cached under
//! a TTL so repeated map refreshes stay off the wire. The remote
//! connection itself is opened at most once per process.

pub mod config;
pub mod feed;
pub mod source;

pub use config::CurrentFeedConfig;
pub use feed::{CurrentFeed, CurrentSnapshot};
pub use source::{CurrentSource, HttpCurrentSource, RemoteAxis, RemoteDescription};
