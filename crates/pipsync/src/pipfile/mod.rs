//! Pipfile and Pipfile.lock parsing for pipsync.
//!
//! [`manifest::Manifest`] models the declared package sets from the Pipfile;
//! [`lock::LockFile`] models the resolved pins from Pipfile.lock. Both parse
//! lazily on first access and cache the result for the rest of the run.

pub mod lock;
pub mod manifest;

pub use lock::LockFile;
pub use manifest::Manifest;
