//! Merging of self-describing document values.
//!
//! Document trees decide their shape per node: objects and tables are
//! mappings, arrays are sequences and everything else is a leaf. When the two
//! sides disagree on the shape of a node the leaf rule applies to the node as
//! a whole.

#[cfg(feature = "serde_json")]
mod json;
#[cfg(feature = "toml")]
mod toml;
