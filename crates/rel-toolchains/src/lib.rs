//! rel toolchains
//!
//! Concrete build toolchains and the ordered registry the release workflow
//! probes.

pub mod cargo;
pub mod command;
pub mod go;
pub mod registry;

pub use cargo::CargoToolchain;
pub use go::GoToolchain;
pub use registry::ToolchainRegistry;
