//! The `[Content_Types].xml` stream.

use crate::constants::namespace;
use crate::packuri;
use crate::xml::{attr, escape, local_name, xml_error, XML_DECLARATION};
use imgdeck_core::Result;
use quick_xml::events::Event;
use quick_xml::Reader;
use std::collections::BTreeMap;

/// Content-type mapping of a package: defaults by extension, overrides by part name.
#[derive(Debug, Clone, Default)]
pub struct ContentTypes {
    defaults: BTreeMap<String, String>,
    /// Keyed by lower-cased part name; the value keeps the original spelling.
    overrides: BTreeMap<String, (String, String)>,
}

impl ContentTypes {
    /// Empty mapping.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse `[Content_Types].xml`.
    pub fn from_xml(xml: &str) -> Result<Self> {
        let mut types = Self::new();
        let mut reader = Reader::from_str(xml);
        reader.trim_text(true);

        loop {
            match reader.read_event() {
                Ok(Event::Empty(ref e)) | Ok(Event::Start(ref e)) => {
                    match local_name(e.name().as_ref()) {
                        b"Default" => {
                            if let (Some(ext), Some(ct)) = (attr(e, b"Extension"), attr(e, b"ContentType")) {
                                types.defaults.insert(ext.to_lowercase(), ct);
                            }
                        }
                        b"Override" => {
                            if let (Some(name), Some(ct)) = (attr(e, b"PartName"), attr(e, b"ContentType")) {
                                types.overrides.insert(name.to_lowercase(), (name, ct));
                            }
                        }
                        _ => {}
                    }
                }
                Ok(Event::Eof) => break,
                Err(e) => return Err(xml_error("Error parsing content types", e)),
                _ => {}
            }
        }

        Ok(types)
    }

    /// Serialize to `[Content_Types].xml`.
    pub fn to_xml(&self) -> String {
        let mut xml = String::with_capacity(512 + self.overrides.len() * 160);
        xml.push_str(XML_DECLARATION);
        xml.push_str(&format!(r#"<Types xmlns="{}">"#, namespace::OPC_CONTENT_TYPES));

        for (ext, ct) in &self.defaults {
            xml.push_str(&format!(
                r#"<Default Extension="{}" ContentType="{}"/>"#,
                escape(ext),
                escape(ct)
            ));
        }
        for (partname, ct) in self.overrides.values() {
            xml.push_str(&format!(
                r#"<Override PartName="{}" ContentType="{}"/>"#,
                escape(partname),
                escape(ct)
            ));
        }

        xml.push_str("</Types>");
        xml
    }

    /// Content type of a part: override first, then the default for its extension.
    ///
    /// Part names compare case-insensitively, as OPC requires.
    pub fn content_type(&self, partname: &str) -> Option<&str> {
        self.overrides
            .get(&partname.to_lowercase())
            .map(|(_, ct)| ct)
            .or_else(|| self.defaults.get(&packuri::extension(partname)))
            .map(String::as_str)
    }

    /// Register a default content type for an extension unless one exists.
    pub fn ensure_default(&mut self, ext: &str, content_type: &str) {
        self.defaults
            .entry(ext.to_lowercase())
            .or_insert_with(|| content_type.to_string());
    }

    /// Register an override for a part name.
    pub fn add_override(&mut self, partname: &str, content_type: &str) {
        self.overrides.insert(
            partname.to_lowercase(),
            (partname.to_string(), content_type.to_string()),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::content_type as ct;

    const TYPES: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">
  <Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>
  <Default Extension="xml" ContentType="application/xml"/>
  <Default Extension="PNG" ContentType="image/png"/>
  <Override PartName="/ppt/presentation.xml" ContentType="application/vnd.openxmlformats-officedocument.presentationml.presentation.main+xml"/>
</Types>"#;

    #[test]
    fn test_lookup_override_then_default() {
        let types = ContentTypes::from_xml(TYPES).expect("parse content types");
        assert_eq!(
            types.content_type("/ppt/presentation.xml"),
            Some(ct::PML_PRESENTATION_MAIN)
        );
        assert_eq!(types.content_type("/ppt/media/image1.png"), Some("image/png"));
        assert_eq!(types.content_type("/docProps/custom.xml"), Some(ct::XML));
        assert_eq!(types.content_type("/ppt/media/image1.emf"), None);
    }

    #[test]
    fn test_ensure_default_keeps_existing() {
        let mut types = ContentTypes::from_xml(TYPES).expect("parse content types");
        types.ensure_default("png", "image/x-other");
        types.ensure_default("tiff", "image/tiff");
        assert_eq!(types.content_type("/ppt/media/a.png"), Some("image/png"));
        assert_eq!(types.content_type("/ppt/media/a.tiff"), Some("image/tiff"));
    }

    #[test]
    fn test_serialize_round_trip() {
        let mut types = ContentTypes::from_xml(TYPES).expect("parse content types");
        types.add_override("/ppt/slides/slide1.xml", ct::PML_SLIDE);

        let xml = types.to_xml();
        assert!(xml.contains(r#"PartName="/ppt/slides/slide1.xml""#));

        let reparsed = ContentTypes::from_xml(&xml).expect("reparse");
        assert_eq!(reparsed.content_type("/ppt/slides/slide1.xml"), Some(ct::PML_SLIDE));
        assert_eq!(reparsed.content_type("/ppt/media/x.png"), Some("image/png"));
    }
}
