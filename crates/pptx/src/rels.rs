//! Relationship (`.rels`) parts.

use crate::constants::namespace;
use crate::packuri;
use crate::xml::{attr, escape, local_name, xml_error, XML_DECLARATION};
use imgdeck_core::{Error, Result};
use quick_xml::events::Event;
use quick_xml::Reader;

/// A single relationship from a source part.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Relationship {
    /// Relationship id, e.g. `rId3`.
    pub r_id: String,
    /// Relationship type URI.
    pub reltype: String,
    /// Target as written in the `.rels` part (relative or external).
    pub target: String,
    /// `TargetMode="External"`.
    pub external: bool,
}

/// The relationships of one source part, in document order.
#[derive(Debug, Clone, Default)]
pub struct Relationships {
    base_uri: String,
    rels: Vec<Relationship>,
}

impl Relationships {
    /// Empty relationship set for a source part with the given base URI.
    pub fn new(base_uri: impl Into<String>) -> Self {
        Self {
            base_uri: base_uri.into(),
            rels: Vec::new(),
        }
    }

    /// Parse a `.rels` part.
    pub fn from_xml(base_uri: impl Into<String>, xml: &str) -> Result<Self> {
        let mut rels = Self::new(base_uri);
        let mut reader = Reader::from_str(xml);
        reader.trim_text(true);

        loop {
            match reader.read_event() {
                Ok(Event::Empty(ref e)) | Ok(Event::Start(ref e))
                    if local_name(e.name().as_ref()) == b"Relationship" =>
                {
                    let r_id = attr(e, b"Id").unwrap_or_default();
                    let reltype = attr(e, b"Type").unwrap_or_default();
                    let target = attr(e, b"Target").unwrap_or_default();
                    let external = attr(e, b"TargetMode").as_deref() == Some("External");

                    if r_id.is_empty() || target.is_empty() {
                        return Err(Error::CorruptedPackage(format!(
                            "relationship without Id or Target under '{}'",
                            rels.base_uri
                        )));
                    }

                    rels.rels.push(Relationship {
                        r_id,
                        reltype,
                        target,
                        external,
                    });
                }
                Ok(Event::Eof) => break,
                Err(e) => return Err(xml_error("Error parsing relationships", e)),
                _ => {}
            }
        }

        Ok(rels)
    }

    /// Serialize to `.rels` XML.
    pub fn to_xml(&self) -> String {
        let mut xml = String::with_capacity(256 + self.rels.len() * 160);
        xml.push_str(XML_DECLARATION);
        xml.push_str(&format!(
            r#"<Relationships xmlns="{}">"#,
            namespace::OPC_RELATIONSHIPS
        ));

        for rel in &self.rels {
            let target_mode = if rel.external {
                r#" TargetMode="External""#
            } else {
                ""
            };
            xml.push_str(&format!(
                r#"<Relationship Id="{}" Type="{}" Target="{}"{}/>"#,
                escape(&rel.r_id),
                escape(&rel.reltype),
                escape(&rel.target),
                target_mode
            ));
        }

        xml.push_str("</Relationships>");
        xml
    }

    /// Add an internal relationship to `partname` and return its id.
    ///
    /// An existing relationship of the same type to the same part is reused.
    pub fn add(&mut self, reltype: &str, partname: &str) -> String {
        if let Some(r_id) = self.find(reltype, partname) {
            return r_id.to_string();
        }

        let r_id = self.next_r_id();
        self.rels.push(Relationship {
            r_id: r_id.clone(),
            reltype: reltype.to_string(),
            target: packuri::relative_ref(&self.base_uri, partname),
            external: false,
        });
        r_id
    }

    /// Id of an internal relationship of `reltype` pointing at `partname`.
    pub fn find(&self, reltype: &str, partname: &str) -> Option<&str> {
        self.rels
            .iter()
            .filter(|rel| !rel.external && rel.reltype == reltype)
            .find(|rel| packuri::resolve(&self.base_uri, &rel.target) == partname)
            .map(|rel| rel.r_id.as_str())
    }

    /// Relationship by id.
    pub fn get(&self, r_id: &str) -> Option<&Relationship> {
        self.rels.iter().find(|rel| rel.r_id == r_id)
    }

    /// First relationship of the given type.
    pub fn first_of_type(&self, reltype: &str) -> Option<&Relationship> {
        self.rels.iter().find(|rel| rel.reltype == reltype)
    }

    /// Absolute part name targeted by relationship `r_id`.
    pub fn target_partname(&self, r_id: &str) -> Result<String> {
        let rel = self
            .get(r_id)
            .ok_or_else(|| Error::PartNotFound(format!("relationship '{}' under '{}'", r_id, self.base_uri)))?;
        if rel.external {
            return Err(Error::CorruptedPackage(format!(
                "relationship '{}' points outside the package",
                r_id
            )));
        }
        Ok(packuri::resolve(&self.base_uri, &rel.target))
    }

    /// Number of relationships.
    pub fn len(&self) -> usize {
        self.rels.len()
    }

    /// True when there are no relationships.
    pub fn is_empty(&self) -> bool {
        self.rels.is_empty()
    }

    /// First unused `rIdN`, counting from 1.
    fn next_r_id(&self) -> String {
        (1..)
            .map(|n| format!("rId{}", n))
            .find(|candidate| self.get(candidate).is_none())
            .unwrap_or_else(|| format!("rId{}", self.rels.len() + 1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::relationship_type as rt;

    const PRES_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
  <Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/slideMaster" Target="slideMasters/slideMaster1.xml"/>
  <Relationship Id="rId3" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/slide" Target="slides/slide1.xml"/>
  <Relationship Id="rId9" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/hyperlink" Target="https://example.com/?a=1&amp;b=2" TargetMode="External"/>
</Relationships>"#;

    #[test]
    fn test_parse_relationships() {
        let rels = Relationships::from_xml("/ppt", PRES_RELS).expect("parse rels");
        assert_eq!(rels.len(), 3);
        assert_eq!(
            rels.target_partname("rId3").expect("slide target"),
            "/ppt/slides/slide1.xml"
        );
        let link = rels.get("rId9").expect("hyperlink");
        assert!(link.external);
        assert_eq!(link.target, "https://example.com/?a=1&b=2");
        assert!(rels.target_partname("rId9").is_err());
    }

    #[test]
    fn test_next_r_id_fills_gaps() {
        let mut rels = Relationships::from_xml("/ppt", PRES_RELS).expect("parse rels");
        let r_id = rels.add(rt::SLIDE, "/ppt/slides/slide2.xml");
        assert_eq!(r_id, "rId2");
        let r_id = rels.add(rt::SLIDE, "/ppt/slides/slide3.xml");
        assert_eq!(r_id, "rId4");
    }

    #[test]
    fn test_add_reuses_existing() {
        let mut rels = Relationships::new("/ppt/slides");
        let first = rels.add(rt::IMAGE, "/ppt/media/image1.png");
        let again = rels.add(rt::IMAGE, "/ppt/media/image1.png");
        assert_eq!(first, again);
        assert_eq!(rels.len(), 1);
        assert_eq!(rels.get(&first).map(|r| r.target.as_str()), Some("../media/image1.png"));
    }

    #[test]
    fn test_round_trip_keeps_external_and_escaping() {
        let rels = Relationships::from_xml("/ppt", PRES_RELS).expect("parse rels");
        let xml = rels.to_xml();
        assert!(xml.contains(r#"TargetMode="External""#));
        assert!(xml.contains("a=1&amp;b=2"));

        let reparsed = Relationships::from_xml("/ppt", &xml).expect("reparse");
        assert_eq!(reparsed.len(), 3);
        assert_eq!(reparsed.first_of_type(rt::SLIDE_MASTER).map(|r| r.r_id.as_str()), Some("rId1"));
    }
}
