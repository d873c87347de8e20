//! Core types, path helpers and run options for turning a folder of
//! images into PowerPoint slides.

pub mod error;
pub mod options;
pub mod paths;
pub mod types;

pub use error::{Error, Result};
pub use options::{DeckOptions, DEFAULT_SLIDE_HEIGHT_IN, DEFAULT_SLIDE_WIDTH_IN};
pub use paths::{find_images, modify_path, sort_paths, DEFAULT_EXTENSIONS, DEFAULT_SUFFIX};
pub use types::{Emu, ImageFormat, EMU_PER_INCH};
