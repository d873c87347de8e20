//! PPTX (Office Open XML) backend that turns images into slides.
//!
//! `.pptx` files are ZIP archives of XML parts. This crate reads and writes
//! that package, keeps the presentation's slide list in sync, and places
//! pictures on new slides. Parts it does not touch are written back as-is.

pub mod constants;
pub mod content_types;
pub mod deck;
pub mod media;
pub mod package;
pub mod packuri;
pub mod presentation;
pub mod rels;
pub mod slide;
pub mod template;
pub mod xml;

pub use deck::{
    add_image_slide, create_blank_prs, create_slides, DeckMode, DeckReport, BLANK_LAYOUT_INDEX,
};
pub use media::ImageInfo;
pub use package::Package;
pub use presentation::{LoadOutcome, Presentation};
pub use slide::{PlacedPicture, SlideMut};
