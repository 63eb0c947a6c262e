//! Testing helpers: plain-text renderings of parsed stylesheets.
//!
//! Use [`stylesheet_to_string`] to capture a [`StyleSheet`](crate::StyleSheet)
//! as a stable outline for snapshot-style assertions.

pub mod snapshot;

pub use snapshot::stylesheet_to_string;
