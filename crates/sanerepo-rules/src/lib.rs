//! Rule-set compilation (no IO beyond template reads through the injected generator).
//!
//! Input: workspace root, root package name, and the esm/cjs partitions.
//! Output: the ordered rule list handed to the enforcement engine.

#![forbid(unsafe_code)]

pub mod kinds;
pub mod policy;
pub mod presets;

mod compile;

pub use compile::{CompileInput, compile};
pub use policy::{PackageShape, Partition, PartitionConfig};

#[cfg(test)]
mod test_support;

#[cfg(test)]
mod properties;
