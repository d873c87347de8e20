//! In-memory OPC package backed by a ZIP archive.
//!
//! Every part is held as raw bytes keyed by part name. Only the parts a
//! caller asks about are ever parsed, so content this crate does not
//! understand (charts, notes, embedded media) survives a load/save cycle
//! untouched.

use crate::constants::{content_type as ct, relationship_type as rt};
use crate::content_types::ContentTypes;
use crate::packuri::{self, CONTENT_TYPES_URI};
use crate::rels::Relationships;
use crate::xml::part_text;
use imgdeck_core::{Error, Result};
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufReader, BufWriter, Cursor, Read, Seek, Write};
use std::path::Path;
use zip::result::ZipError;
use zip::write::FileOptions;
use zip::{CompressionMethod, ZipArchive, ZipWriter};

/// An OPC package: parts plus their content types.
#[derive(Debug, Clone, Default)]
pub struct Package {
    parts: BTreeMap<String, Vec<u8>>,
    content_types: ContentTypes,
}

impl Package {
    /// Empty package with the defaults every package needs.
    pub fn new() -> Self {
        let mut content_types = ContentTypes::new();
        content_types.ensure_default("rels", ct::OPC_RELATIONSHIPS);
        content_types.ensure_default("xml", ct::XML);
        Self {
            parts: BTreeMap::new(),
            content_types,
        }
    }

    /// Open a package from a file.
    ///
    /// Returns [`Error::PackageNotFound`] when nothing usable exists at the
    /// path: either no file at all or a file that is not a ZIP archive.
    /// Every other problem is reported as its own error.
    pub fn open(path: &Path) -> Result<Self> {
        if path.is_dir() {
            return Err(Error::CorruptedPackage(format!(
                "'{}' is a directory, not a package",
                path.display()
            )));
        }
        if !path.is_file() {
            return Err(Error::PackageNotFound(path.to_path_buf()));
        }

        let file = File::open(path)?;
        let archive = match ZipArchive::new(BufReader::new(file)) {
            Ok(archive) => archive,
            Err(ZipError::Io(e)) => return Err(e.into()),
            Err(e) => {
                log::debug!("'{}' is not a ZIP archive: {}", path.display(), e);
                return Err(Error::PackageNotFound(path.to_path_buf()));
            }
        };

        Self::from_archive(archive)
    }

    /// Read a package from any seekable reader.
    pub fn from_reader<R: Read + Seek>(reader: R) -> Result<Self> {
        let archive = ZipArchive::new(reader)
            .map_err(|e| Error::ZipError(format!("Failed to open ZIP: {}", e)))?;
        Self::from_archive(archive)
    }

    fn from_archive<R: Read + Seek>(mut archive: ZipArchive<R>) -> Result<Self> {
        let mut parts = BTreeMap::new();

        for i in 0..archive.len() {
            let mut file = archive
                .by_index(i)
                .map_err(|e| Error::ZipError(format!("Failed to read entry {}: {}", i, e)))?;
            if file.is_dir() {
                continue;
            }

            let partname = format!("/{}", file.name().trim_start_matches('/'));
            let mut data = Vec::with_capacity(file.size() as usize);
            file.read_to_end(&mut data)
                .map_err(|e| Error::ZipError(format!("Failed to read '{}': {}", partname, e)))?;
            parts.insert(partname, data);
        }

        let types_xml = parts.remove(CONTENT_TYPES_URI).ok_or_else(|| {
            Error::CorruptedPackage("missing [Content_Types].xml".to_string())
        })?;
        let content_types = ContentTypes::from_xml(part_text(CONTENT_TYPES_URI, &types_xml)?)?;

        log::debug!("Loaded package with {} parts", parts.len());

        Ok(Self {
            parts,
            content_types,
        })
    }

    /// Write the package to a file, replacing any existing file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        self.write_to(&mut writer)?;
        writer.flush()?;
        Ok(())
    }

    /// Serialize the package into an in-memory ZIP.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut cursor = Cursor::new(Vec::new());
        self.write_to(&mut cursor)?;
        Ok(cursor.into_inner())
    }

    /// Write the package as a ZIP archive: content types first, then every
    /// part in part-name order.
    pub fn write_to<W: Write + Seek>(&self, writer: W) -> Result<()> {
        let mut zip = ZipWriter::new(writer);
        let options = FileOptions::default().compression_method(CompressionMethod::Deflated);

        let types_xml = self.content_types.to_xml();
        write_entry(&mut zip, CONTENT_TYPES_URI, types_xml.as_bytes(), options)?;

        for (partname, data) in &self.parts {
            write_entry(&mut zip, partname, data, options)?;
        }

        zip.finish()
            .map_err(|e| Error::ZipError(format!("Failed to finish ZIP: {}", e)))?;
        Ok(())
    }

    /// Raw bytes of a part.
    pub fn part(&self, partname: &str) -> Option<&[u8]> {
        self.parts.get(partname).map(Vec::as_slice)
    }

    /// Raw bytes of a part that must exist.
    pub fn require_part(&self, partname: &str) -> Result<&[u8]> {
        self.part(partname)
            .ok_or_else(|| Error::PartNotFound(partname.to_string()))
    }

    /// Text of an XML part that must exist.
    pub fn part_xml(&self, partname: &str) -> Result<&str> {
        part_text(partname, self.require_part(partname)?)
    }

    /// True if the package holds the part.
    pub fn contains_part(&self, partname: &str) -> bool {
        self.parts.contains_key(partname)
    }

    /// Part names in sorted order.
    pub fn partnames(&self) -> impl Iterator<Item = &str> {
        self.parts.keys().map(String::as_str)
    }

    /// Replace the bytes of a part, keeping its content type.
    pub fn set_part(&mut self, partname: &str, data: Vec<u8>) {
        self.parts.insert(partname.to_string(), data);
    }

    /// Add a part registered under an explicit content-type override.
    pub fn add_part(&mut self, partname: &str, content_type: &str, data: Vec<u8>) {
        self.content_types.add_override(partname, content_type);
        self.parts.insert(partname.to_string(), data);
    }

    /// Add a part whose content type comes from a default for its extension.
    pub fn add_default_part(&mut self, partname: &str, content_type: &str, data: Vec<u8>) {
        self.content_types
            .ensure_default(&packuri::extension(partname), content_type);
        self.parts.insert(partname.to_string(), data);
    }

    /// Content type of a part.
    pub fn content_type(&self, partname: &str) -> Option<&str> {
        self.content_types.content_type(partname)
    }

    /// Relationships of a source part (`/` for the package itself).
    ///
    /// A part without a `.rels` part simply has no relationships.
    pub fn rels(&self, partname: &str) -> Result<Relationships> {
        let rels_uri = packuri::rels_uri_for(partname);
        let base = packuri::base_uri(partname).to_string();

        match self.part(&rels_uri) {
            Some(data) => Relationships::from_xml(base, part_text(&rels_uri, data)?),
            None => Ok(Relationships::new(base)),
        }
    }

    /// Store the relationships of a source part.
    pub fn set_rels(&mut self, partname: &str, rels: &Relationships) {
        let rels_uri = packuri::rels_uri_for(partname);
        self.parts.insert(rels_uri, rels.to_xml().into_bytes());
    }

    /// Part name of the main document, found through the package relationships.
    pub fn main_document_partname(&self) -> Result<String> {
        let rels = self.rels("/")?;
        let rel = rels.first_of_type(rt::OFFICE_DOCUMENT).ok_or_else(|| {
            Error::CorruptedPackage("package has no officeDocument relationship".to_string())
        })?;
        rels.target_partname(&rel.r_id)
    }

    /// First unused part name for a template such as `/ppt/slides/slide{}.xml`.
    ///
    /// Indices count from 1.
    pub fn next_partname(&self, template: &str) -> String {
        (1..)
            .map(|n: u32| template.replace("{}", &n.to_string()))
            .find(|candidate| !self.parts.contains_key(candidate))
            .unwrap_or_else(|| template.replace("{}", "0"))
    }
}

fn write_entry<W: Write + Seek>(
    zip: &mut ZipWriter<W>,
    partname: &str,
    data: &[u8],
    options: FileOptions,
) -> Result<()> {
    zip.start_file(packuri::member_name(partname), options)
        .map_err(|e| Error::ZipError(format!("Failed to start '{}': {}", partname, e)))?;
    zip.write_all(data)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::relationship_type as rt;

    fn sample_package() -> Package {
        let mut pkg = Package::new();
        pkg.add_part("/ppt/presentation.xml", ct::PML_PRESENTATION_MAIN, b"<p:presentation/>".to_vec());
        let mut rels = Relationships::new("/");
        rels.add(rt::OFFICE_DOCUMENT, "/ppt/presentation.xml");
        pkg.set_rels("/", &rels);
        pkg
    }

    #[test]
    fn test_round_trip_through_bytes() {
        let pkg = sample_package();
        let bytes = pkg.to_bytes().expect("serialize");

        let reloaded = Package::from_reader(Cursor::new(bytes)).expect("reload");
        assert_eq!(reloaded.part("/ppt/presentation.xml"), Some(&b"<p:presentation/>"[..]));
        assert_eq!(
            reloaded.content_type("/ppt/presentation.xml"),
            Some(ct::PML_PRESENTATION_MAIN)
        );
        assert_eq!(
            reloaded.main_document_partname().expect("main part"),
            "/ppt/presentation.xml"
        );
    }

    #[test]
    fn test_open_missing_file_is_not_found() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let result = Package::open(&dir.path().join("absent.pptx"));
        assert!(matches!(result, Err(Error::PackageNotFound(_))));
    }

    #[test]
    fn test_open_non_zip_file_is_not_found() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join("notes.pptx");
        std::fs::write(&path, b"just some text, not a zip archive").expect("write");

        let result = Package::open(&path);
        assert!(matches!(result, Err(Error::PackageNotFound(_))));
    }

    #[test]
    fn test_open_directory_is_an_error() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let result = Package::open(dir.path());
        assert!(matches!(result, Err(Error::CorruptedPackage(_))));
    }

    #[test]
    fn test_zip_without_content_types_is_corrupt() {
        let mut cursor = Cursor::new(Vec::new());
        {
            let mut zip = ZipWriter::new(&mut cursor);
            zip.start_file("hello.txt", FileOptions::default()).expect("start");
            zip.write_all(b"hi").expect("write");
            zip.finish().expect("finish");
        }

        let result = Package::from_reader(Cursor::new(cursor.into_inner()));
        assert!(matches!(result, Err(Error::CorruptedPackage(_))));
    }

    #[test]
    fn test_next_partname() {
        let mut pkg = Package::new();
        assert_eq!(pkg.next_partname("/ppt/slides/slide{}.xml"), "/ppt/slides/slide1.xml");
        pkg.add_part("/ppt/slides/slide1.xml", ct::PML_SLIDE, Vec::new());
        pkg.add_part("/ppt/slides/slide3.xml", ct::PML_SLIDE, Vec::new());
        assert_eq!(pkg.next_partname("/ppt/slides/slide{}.xml"), "/ppt/slides/slide2.xml");
    }

    #[test]
    fn test_rels_of_part_without_rels() {
        let pkg = sample_package();
        let rels = pkg.rels("/ppt/presentation.xml").expect("rels");
        assert!(rels.is_empty());
    }
}
