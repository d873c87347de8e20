//! Path helpers: output-name suffixing and image discovery.

use crate::Result;
use std::fs;
use std::path::{Path, PathBuf};

/// Suffix inserted before the extension when an existing deck is extended.
pub const DEFAULT_SUFFIX: &str = "_edit";

/// Image extensions picked up when none are configured.
pub const DEFAULT_EXTENSIONS: &[&str] = &[".png", ".jpg", ".tif"];

/// Insert `suffix` between the base name and the extension of `input_path`.
///
/// `C:\dog\cat.txt` becomes `C:\dog\cat_edit.txt` for the suffix `_edit`.
/// Both `/` and `\` separate directories. Nothing is checked on disk.
pub fn modify_path(input_path: &str, suffix: &str) -> String {
    let tail_start = input_path
        .rfind(&['/', '\\'][..])
        .map(|pos| pos + 1)
        .unwrap_or(0);
    let (head, tail) = input_path.split_at(tail_start);
    let (basename, extension) = split_extension(tail);

    format!("{}{}{}{}", head, basename, suffix, extension)
}

/// Split a file name into base name and extension (including its dot).
///
/// Leading dots belong to the base name, so `.bashrc` has no extension.
pub fn split_extension(file_name: &str) -> (&str, &str) {
    let leading_dots = file_name.len() - file_name.trim_start_matches('.').len();
    match file_name[leading_dots..].rfind('.') {
        Some(pos) => file_name.split_at(leading_dots + pos),
        None => (file_name, ""),
    }
}

/// List the entries of `folder_path` whose extension is in `extensions`.
///
/// Matching is case-insensitive. Paths come back in directory-listing order,
/// which depends on the platform. The folder is not validated here: a missing
/// or unreadable folder surfaces as an I/O error.
pub fn find_images<S: AsRef<str>>(folder_path: &Path, extensions: &[S]) -> Result<Vec<PathBuf>> {
    let allowed: Vec<String> = extensions
        .iter()
        .map(|ext| normalize_extension(ext.as_ref()))
        .collect();

    let mut image_full_paths = Vec::new();
    for entry in fs::read_dir(folder_path)? {
        let entry = entry?;
        let file_name = entry.file_name();
        let file_name = file_name.to_string_lossy();
        let (_, extension) = split_extension(&file_name);

        if allowed.iter().any(|ext| *ext == extension.to_lowercase()) {
            image_full_paths.push(folder_path.join(entry.file_name()));
        } else {
            log::debug!("Skipping non-image entry: {}", file_name);
        }
    }

    Ok(image_full_paths)
}

/// Sort paths lexicographically by file name.
pub fn sort_paths(paths: &mut [PathBuf]) {
    paths.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
}

/// Lower-case an extension and make sure it starts with a dot.
pub fn normalize_extension(ext: &str) -> String {
    let ext = ext.trim().to_lowercase();
    if ext.starts_with('.') {
        ext
    } else {
        format!(".{}", ext)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;

    #[test]
    fn test_modify_path_windows_style() {
        let modified = modify_path("C:\\folder1\\folder2\\myFile.txt", DEFAULT_SUFFIX);
        assert_eq!(modified, "C:\\folder1\\folder2\\myFile_edit.txt");
    }

    #[test]
    fn test_modify_path_posix_style() {
        assert_eq!(modify_path("/dog/cat.txt", "_edit"), "/dog/cat_edit.txt");
        assert_eq!(modify_path("decks/out.pptx", "_v2"), "decks/out_v2.pptx");
    }

    #[test]
    fn test_modify_path_without_directory_or_extension() {
        assert_eq!(modify_path("out.pptx", "_edit"), "out_edit.pptx");
        assert_eq!(modify_path("README", "_edit"), "README_edit");
        assert_eq!(modify_path("dir/.hidden", "_edit"), "dir/.hidden_edit");
    }

    #[test]
    fn test_modify_path_only_last_extension() {
        assert_eq!(modify_path("a/b.tar.gz", "_x"), "a/b.tar_x.gz");
    }

    #[test]
    fn test_modify_path_twice_doubles_suffix() {
        let once = modify_path("out.pptx", "_edit");
        assert_eq!(modify_path(&once, "_edit"), "out_edit_edit.pptx");
    }

    #[test]
    fn test_split_extension() {
        assert_eq!(split_extension("Image1.PNG"), ("Image1", ".PNG"));
        assert_eq!(split_extension(".png"), (".png", ""));
        assert_eq!(split_extension("noext"), ("noext", ""));
        assert_eq!(split_extension("trailing."), ("trailing", "."));
    }

    #[test]
    fn test_normalize_extension() {
        assert_eq!(normalize_extension("PNG"), ".png");
        assert_eq!(normalize_extension(".Jpg"), ".jpg");
    }

    #[test]
    fn test_find_images_filters_by_extension() {
        let dir = tempfile::tempdir().expect("create temp dir");
        for name in ["Image1.png", "Image2.png", "Image3.png", "notes.txt", "deck.pptx", ".png"] {
            File::create(dir.path().join(name)).expect("create file");
        }

        let mut found = find_images(dir.path(), DEFAULT_EXTENSIONS).expect("list folder");
        sort_paths(&mut found);

        let expected: Vec<PathBuf> = ["Image1.png", "Image2.png", "Image3.png"]
            .iter()
            .map(|name| dir.path().join(name))
            .collect();
        assert_eq!(found, expected);
    }

    #[test]
    fn test_find_images_case_insensitive() {
        let dir = tempfile::tempdir().expect("create temp dir");
        for name in ["A.JPG", "b.Tif", "c.jpeg"] {
            File::create(dir.path().join(name)).expect("create file");
        }

        let mut found = find_images(dir.path(), &["jpg", ".TIF"]).expect("list folder");
        sort_paths(&mut found);

        assert_eq!(found, vec![dir.path().join("A.JPG"), dir.path().join("b.Tif")]);
    }

    #[test]
    fn test_find_images_missing_folder() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let result = find_images(&dir.path().join("missing"), DEFAULT_EXTENSIONS);
        assert!(matches!(result, Err(crate::Error::IoError(_))));
    }

    #[test]
    fn test_sort_paths() {
        let mut paths = vec![
            PathBuf::from("x/b.png"),
            PathBuf::from("x/a.png"),
            PathBuf::from("x/c.png"),
        ];
        sort_paths(&mut paths);
        assert_eq!(
            paths,
            vec![
                PathBuf::from("x/a.png"),
                PathBuf::from("x/b.png"),
                PathBuf::from("x/c.png")
            ]
        );
    }
}
