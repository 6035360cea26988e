//! Read buildpack metadata out of OCI-layout buildpackage archives.
//!
//! A buildpackage is a tar holding `index.json`, a manifest blob and one
//! gzip-compressed layer per buildpack. [`BuildpackInspector`] follows that
//! chain and decodes the `buildpack.toml` of every layer.

pub mod archive;
pub mod config;
pub mod error;
pub mod inspector;
pub mod manifest;

pub use config::BuildpackConfig;
pub use error::{InspectError, Result};
pub use inspector::{BuildpackInspector, BuildpackMetadata};
