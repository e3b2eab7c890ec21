//! Result packaging and the download trigger boundary

pub mod package;
pub mod trigger;

pub use package::*;
pub use trigger::*;
