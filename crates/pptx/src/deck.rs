//! Deck-level operations: blank decks, image slides and the folder-to-deck run.

use crate::presentation::{LoadOutcome, Presentation};
use imgdeck_core::{find_images, modify_path, sort_paths, DeckOptions, Emu, Error, Result};
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Index of the "Blank" layout in the conventional layout order.
pub const BLANK_LAYOUT_INDEX: usize = 6;

/// Whether a run started from an existing deck.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DeckMode {
    /// No deck existed; a new one was written to the requested path.
    Created,
    /// An existing deck was extended and written under a suffixed name.
    Appended,
}

/// Summary of a completed [`create_slides`] run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeckReport {
    pub output: PathBuf,
    pub mode: DeckMode,
    pub slides_added: usize,
    pub slide_count: usize,
}

/// A new deck from the built-in template with the given slide size in inches.
pub fn create_blank_prs(slide_height_inch: f64, slide_width_inch: f64) -> Result<Presentation> {
    let mut prs = Presentation::new()?;
    prs.set_slide_height(Emu::from_inches(slide_height_inch));
    prs.set_slide_width(Emu::from_inches(slide_width_inch));
    Ok(prs)
}

/// Append a blank slide showing the image at `image_path`.
///
/// The picture sits at the top-left corner and spans the slide width; its
/// height follows the image's aspect ratio.
pub fn add_image_slide(prs: &mut Presentation, image_path: &Path) -> Result<()> {
    let width = prs.slide_width();
    let mut slide = prs.add_slide(BLANK_LAYOUT_INDEX)?;
    slide.add_picture(image_path, Emu(0), Emu(0), Some(width), None)?;
    Ok(())
}

/// Turn every image in `img_folder_path` into a slide.
///
/// When `pptx_path` holds a deck, slides are appended to a copy saved under
/// the suffixed name and the original file is left alone. Otherwise a new
/// deck is created at `pptx_path`. Returns `Ok(None)` without writing
/// anything when the image folder does not exist.
pub fn create_slides(
    img_folder_path: &Path,
    pptx_path: &Path,
    options: &DeckOptions,
) -> Result<Option<DeckReport>> {
    options.validate()?;

    if !img_folder_path.is_dir() {
        log::warn!("Cannot proceed because the image folder path is invalid");
        return Ok(None);
    }

    let (mut prs, mode) = match Presentation::load(pptx_path)? {
        LoadOutcome::Existing(prs) => {
            log::info!("Found existing file, will copy and append with new slides");
            (prs, DeckMode::Appended)
        }
        LoadOutcome::Missing => {
            log::info!("No existing file found, will create one with new slides");
            let prs = create_blank_prs(options.slide_height_inch, options.slide_width_inch)?;
            (prs, DeckMode::Created)
        }
    };

    let mut images = find_images(img_folder_path, &options.extensions)?;
    if options.sort {
        sort_paths(&mut images);
    }

    for img_path in &images {
        add_image_slide(&mut prs, img_path)?;
        log::info!("Added image slide containing image: '{}'", img_path.display());
    }

    let output = match mode {
        DeckMode::Appended => PathBuf::from(modify_path(
            &pptx_path.to_string_lossy(),
            &options.suffix,
        )),
        DeckMode::Created => pptx_path.to_path_buf(),
    };
    if mode == DeckMode::Appended && output == pptx_path {
        return Err(Error::ConfigError(format!(
            "refusing to overwrite the original deck '{}'",
            pptx_path.display()
        )));
    }

    prs.save(&output)?;
    log::info!("Saved file to: '{}'", output.display());

    Ok(Some(DeckReport {
        output,
        mode,
        slides_added: images.len(),
        slide_count: prs.slide_count(),
    }))
}
