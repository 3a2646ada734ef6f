//! Configuration and dependency wiring for the index porter.

mod dependencies;

pub use dependencies::Dependencies;
