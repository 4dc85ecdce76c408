//! Obtain pairwise travel costs between job nodes.
//!
//! The `DistanceProvider` trait abstracts where a [`DistanceMatrix`] comes
//! from: a mapping service, a cache file, or a fixture. The assignment engine
//! only ever sees the finished matrix.
//!
//! [`DistanceMatrix`]: crate::DistanceMatrix

mod error;
mod provider;

pub use error::DistanceError;
pub use provider::DistanceProvider;
