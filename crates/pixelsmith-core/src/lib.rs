//! Pixelsmith Core - Image editing session
//!
//! This crate provides the editing core behind the Pixelsmith desktop
//! editor: loading an image, binarizing, cropping, resizing, flipping,
//! combining with a second image, and encoding the result for saving.
//!
//! The interactive controller (windows, dialogs, preview scaling) lives
//! outside this crate and drives an [`EditSession`].

pub mod config;
pub mod decode;
pub mod encode;
pub mod session;
pub mod transform;

pub use config::{ConfigError, EditorConfig};
pub use decode::{DecodeError, FilterType, ImageInfo, Orientation};
pub use encode::{EncodeError, SaveFormat};
pub use session::{EditSession, SessionError};
pub use transform::{CombineMode, FlipAxis, TransformError};
