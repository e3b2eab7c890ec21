//! Core functionality for ytdown: identifier extraction, the stream model,
//! and the provider-fallback resolution engine

pub mod resolver;
pub mod stream;
pub mod video_id;

pub use resolver::*;
pub use stream::*;
pub use video_id::*;
