//! Provider registry, settings, and HTTP client

pub mod client;
pub mod payload;
pub mod settings;
pub mod spec;

pub use client::*;
pub use payload::*;
pub use settings::*;
pub use spec::*;
