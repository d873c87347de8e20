//! Presentation document: slide list, layouts and slide size on top of a package.

use crate::constants::{content_type as ct, namespace as ns, relationship_type as rt};
use crate::package::Package;
use crate::packuri;
use crate::rels::Relationships;
use crate::slide::{self, PlacedPicture, SlideMut};
use crate::template;
use crate::xml::{attr, element_prefix, local_name, namespace_prefix, r_id, xml_error};
use imgdeck_core::{Emu, Error, Result};
use quick_xml::events::{BytesEnd, BytesStart, Event};
use quick_xml::{Reader, Writer};
use std::io::{Read, Seek};
use std::path::Path;

/// Smallest slide id PowerPoint accepts.
const MIN_SLIDE_ID: u32 = 256;

/// Result of trying to load a deck from a path.
#[derive(Debug)]
pub enum LoadOutcome {
    /// A presentation package was found and parsed.
    Existing(Presentation),
    /// No presentation package exists at the path.
    Missing,
}

#[derive(Debug, Clone)]
struct SlideEntry {
    id: u32,
    r_id: String,
    partname: String,
}

/// A presentation held in memory.
#[derive(Debug)]
pub struct Presentation {
    package: Package,
    /// Part name of `presentation.xml`.
    partname: String,
    rels: Relationships,
    slides: Vec<SlideEntry>,
    /// Layout part names of the first slide master, in gallery order.
    layouts: Vec<String>,
    slide_width: Emu,
    slide_height: Emu,
    /// Size as read from the package, to tell whether it was changed.
    loaded_size: (Emu, Emu),
}

impl Presentation {
    /// A new, empty presentation from the built-in template.
    pub fn new() -> Result<Self> {
        Self::from_package(template::default_package())
    }

    /// Open an existing presentation.
    pub fn open(path: &Path) -> Result<Self> {
        let package = Package::open(path)?;
        Self::from_package(package)
    }

    /// Open a presentation, telling "nothing there" apart from real failures.
    ///
    /// Only [`Error::PackageNotFound`] becomes [`LoadOutcome::Missing`];
    /// corrupt packages and I/O errors are returned as errors.
    pub fn load(path: &Path) -> Result<LoadOutcome> {
        match Self::open(path) {
            Ok(prs) => Ok(LoadOutcome::Existing(prs)),
            Err(e) if e.is_package_not_found() => Ok(LoadOutcome::Missing),
            Err(e) => Err(e),
        }
    }

    /// Read a presentation from any seekable reader.
    pub fn from_reader<R: Read + Seek>(reader: R) -> Result<Self> {
        Self::from_package(Package::from_reader(reader)?)
    }

    /// Interpret a package as a presentation.
    pub fn from_package(package: Package) -> Result<Self> {
        let partname = package.main_document_partname()?;
        let content_type = package.content_type(&partname).unwrap_or_default();
        if !ct::PRESENTATION_MAIN_TYPES.contains(&content_type) {
            return Err(Error::CorruptedPackage(format!(
                "main part '{}' has content type '{}', expected a presentation",
                partname, content_type
            )));
        }

        let rels = package.rels(&partname)?;
        let info = parse_presentation_xml(package.part_xml(&partname)?)?;

        let slides = info
            .slide_ids
            .into_iter()
            .map(|(id, r_id)| {
                let partname = rels.target_partname(&r_id)?;
                Ok(SlideEntry { id, r_id, partname })
            })
            .collect::<Result<Vec<_>>>()?;

        let layouts = match info.master_r_ids.first() {
            Some(master_r_id) => {
                let master = rels.target_partname(master_r_id)?;
                master_layouts(&package, &master)?
            }
            None => Vec::new(),
        };

        let (slide_width, slide_height) = info
            .size
            .unwrap_or((template::DEFAULT_SLIDE_WIDTH, template::DEFAULT_SLIDE_HEIGHT));

        log::debug!(
            "Presentation '{}': {} slides, {} layouts, {}x{} EMU",
            partname,
            slides.len(),
            layouts.len(),
            slide_width,
            slide_height
        );

        Ok(Self {
            package,
            partname,
            rels,
            slides,
            layouts,
            slide_width,
            slide_height,
            loaded_size: (slide_width, slide_height),
        })
    }

    /// Slide width.
    pub fn slide_width(&self) -> Emu {
        self.slide_width
    }

    /// Slide height.
    pub fn slide_height(&self) -> Emu {
        self.slide_height
    }

    /// Set the slide width for the whole deck.
    pub fn set_slide_width(&mut self, width: Emu) {
        self.slide_width = width;
    }

    /// Set the slide height for the whole deck.
    pub fn set_slide_height(&mut self, height: Emu) {
        self.slide_height = height;
    }

    /// Number of slides.
    pub fn slide_count(&self) -> usize {
        self.slides.len()
    }

    /// Number of slide layouts offered by the first slide master.
    pub fn slide_layout_count(&self) -> usize {
        self.layouts.len()
    }

    /// Display name of a slide layout (`p:cSld/@name`).
    pub fn slide_layout_name(&self, index: usize) -> Result<Option<String>> {
        let partname = self.layout_partname(index)?;
        let mut reader = Reader::from_str(self.package.part_xml(partname)?);
        loop {
            match reader.read_event() {
                Ok(Event::Start(ref e)) | Ok(Event::Empty(ref e))
                    if local_name(e.name().as_ref()) == b"cSld" =>
                {
                    return Ok(attr(e, b"name"));
                }
                Ok(Event::Eof) => return Ok(None),
                Err(e) => return Err(xml_error("Error parsing slide layout", e)),
                _ => {}
            }
        }
    }

    /// Append a slide based on the layout at `layout_index`.
    pub fn add_slide(&mut self, layout_index: usize) -> Result<SlideMut<'_>> {
        let layout = self.layout_partname(layout_index)?.to_string();

        let partname = self.package.next_partname("/ppt/slides/slide{}.xml");
        let mut slide_rels = Relationships::new(packuri::base_uri(&partname));
        slide_rels.add(rt::SLIDE_LAYOUT, &layout);
        self.package.set_rels(&partname, &slide_rels);
        self.package
            .add_part(&partname, ct::PML_SLIDE, slide::new_slide_xml().into_bytes());

        let r_id = self.rels.add(rt::SLIDE, &partname);
        let id = self.next_slide_id();
        log::debug!("Added slide {} ({}, id {}, {})", partname, r_id, id, layout);

        self.slides.push(SlideEntry { id, r_id, partname });
        let index = self.slides.len() - 1;
        Ok(SlideMut::new(self, index))
    }

    /// Mutable handle to an existing slide.
    pub fn slide_mut(&mut self, index: usize) -> Option<SlideMut<'_>> {
        if index < self.slides.len() {
            Some(SlideMut::new(self, index))
        } else {
            None
        }
    }

    /// Pictures placed on a slide, in drawing order.
    pub fn pictures(&self, slide_index: usize) -> Result<Vec<PlacedPicture>> {
        let entry = self.slides.get(slide_index).ok_or_else(|| {
            Error::PartNotFound(format!("slide index {}", slide_index))
        })?;
        slide::read_pictures(self.package.part_xml(&entry.partname)?)
    }

    /// Part names of the slides, in presentation order.
    pub fn slide_partnames(&self) -> impl Iterator<Item = &str> {
        self.slides.iter().map(|s| s.partname.as_str())
    }

    /// The underlying package.
    pub fn package(&self) -> &Package {
        &self.package
    }

    /// Write the presentation to a file.
    pub fn save(&mut self, path: &Path) -> Result<()> {
        self.sync_presentation_part()?;
        self.package.save(path)?;
        log::debug!("Wrote {} slides to {}", self.slides.len(), path.display());
        Ok(())
    }

    /// Serialize the presentation into in-memory `.pptx` bytes.
    pub fn to_bytes(&mut self) -> Result<Vec<u8>> {
        self.sync_presentation_part()?;
        self.package.to_bytes()
    }

    pub(crate) fn package_mut(&mut self) -> &mut Package {
        &mut self.package
    }

    pub(crate) fn slide_partname(&self, index: usize) -> &str {
        &self.slides[index].partname
    }

    fn layout_partname(&self, index: usize) -> Result<&str> {
        self.layouts
            .get(index)
            .map(String::as_str)
            .ok_or(Error::LayoutNotFound {
                index,
                available: self.layouts.len(),
            })
    }

    fn next_slide_id(&self) -> u32 {
        self.slides
            .iter()
            .map(|s| s.id + 1)
            .max()
            .unwrap_or(MIN_SLIDE_ID)
            .max(MIN_SLIDE_ID)
    }

    /// Write the slide list, slide size and relationships back into the package.
    fn sync_presentation_part(&mut self) -> Result<()> {
        let size_changed = (self.slide_width, self.slide_height) != self.loaded_size;
        let slide_ids: Vec<(u32, &str)> = self
            .slides
            .iter()
            .map(|s| (s.id, s.r_id.as_str()))
            .collect();

        let xml = rewrite_presentation_xml(
            self.package.part_xml(&self.partname)?,
            &slide_ids,
            (self.slide_width, self.slide_height),
            size_changed,
        )?;

        let partname = self.partname.clone();
        self.package.set_part(&partname, xml.into_bytes());
        self.package.set_rels(&partname, &self.rels);
        Ok(())
    }
}

/// What we need from `presentation.xml`.
#[derive(Debug, Default)]
struct PresentationInfo {
    slide_ids: Vec<(u32, String)>,
    master_r_ids: Vec<String>,
    size: Option<(Emu, Emu)>,
}

fn parse_presentation_xml(xml: &str) -> Result<PresentationInfo> {
    let mut info = PresentationInfo::default();
    let mut reader = Reader::from_str(xml);
    reader.trim_text(true);

    // Local names of the open elements, root first.
    let mut path: Vec<Vec<u8>> = Vec::new();

    loop {
        match reader.read_event() {
            Ok(Event::Start(ref e)) => {
                info.visit(e, &path)?;
                path.push(local_name(e.name().as_ref()).to_vec());
            }
            Ok(Event::Empty(ref e)) => info.visit(e, &path)?,
            Ok(Event::End(_)) => {
                path.pop();
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(xml_error("Error parsing presentation.xml", e)),
            _ => {}
        }
    }

    Ok(info)
}

impl PresentationInfo {
    /// Record an element of `presentation.xml` found under `path`.
    ///
    /// Only the lists directly under the root count: `p14:sldIdLst` inside
    /// a section list in `p:extLst` holds ids without relationships.
    fn visit(&mut self, e: &BytesStart<'_>, path: &[Vec<u8>]) -> Result<()> {
        let parent = match path {
            [_root] => Some(&b""[..]),
            [_root, list] => Some(list.as_slice()),
            _ => None,
        };

        match (parent, local_name(e.name().as_ref())) {
            (Some(b"sldIdLst"), b"sldId") => {
                let id = attr(e, b"id").and_then(|v| v.parse::<u32>().ok());
                match (id, r_id(e)) {
                    (Some(id), Some(r_id)) => self.slide_ids.push((id, r_id)),
                    _ => {
                        return Err(Error::CorruptedPackage(
                            "slide id entry without id or r:id".to_string(),
                        ))
                    }
                }
            }
            (Some(b"sldMasterIdLst"), b"sldMasterId") => {
                if let Some(r_id) = r_id(e) {
                    self.master_r_ids.push(r_id);
                }
            }
            (Some(b""), b"sldSz") => {
                let cx = attr(e, b"cx").and_then(|v| v.parse::<i64>().ok());
                let cy = attr(e, b"cy").and_then(|v| v.parse::<i64>().ok());
                if let (Some(cx), Some(cy)) = (cx, cy) {
                    self.size = Some((Emu(cx), Emu(cy)));
                }
            }
            _ => {}
        }
        Ok(())
    }
}

/// Layout part names of a slide master in `p:sldLayoutIdLst` order.
fn master_layouts(package: &Package, master: &str) -> Result<Vec<String>> {
    let rels = package.rels(master)?;
    let mut reader = Reader::from_str(package.part_xml(master)?);
    reader.trim_text(true);

    let mut layouts = Vec::new();
    loop {
        match reader.read_event() {
            Ok(Event::Start(ref e)) | Ok(Event::Empty(ref e))
                if local_name(e.name().as_ref()) == b"sldLayoutId" =>
            {
                if let Some(r_id) = r_id(e) {
                    layouts.push(rels.target_partname(&r_id)?);
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(xml_error("Error parsing slide master", e)),
            _ => {}
        }
    }

    Ok(layouts)
}

/// Rewrite `presentation.xml` with a new slide list and slide size.
///
/// Everything else in the part is copied through unchanged. A missing
/// `sldIdLst` is inserted where the schema expects it: before `sldSz`, or
/// before `notesSz` when the deck has no explicit size.
fn rewrite_presentation_xml(
    xml: &str,
    slide_ids: &[(u32, &str)],
    (cx, cy): (Emu, Emu),
    size_changed: bool,
) -> Result<String> {
    let mut reader = Reader::from_str(xml);
    let mut writer = Writer::new(Vec::with_capacity(xml.len() + slide_ids.len() * 48));

    let mut p = String::from("p:");
    let mut r = String::from("r");
    let mut skip_depth = 0usize;
    // Depth of the next element: 0 for the root, 1 for its children.
    let mut depth = 0usize;
    let mut list_written = false;
    let mut size_written = false;

    let write_err = |e: quick_xml::Error| xml_error("Error writing presentation.xml", e);

    loop {
        let event = reader
            .read_event()
            .map_err(|e| xml_error("Error parsing presentation.xml", e))?;

        if skip_depth > 0 {
            match event {
                Event::Start(_) => skip_depth += 1,
                Event::End(_) => skip_depth -= 1,
                Event::Eof => {
                    return Err(Error::CorruptedPackage(
                        "unterminated sldIdLst in presentation.xml".to_string(),
                    ))
                }
                _ => {}
            }
            continue;
        }

        let opens = matches!(event, Event::Start(_));
        let closes = matches!(event, Event::End(_));
        let top_level = depth == 1;

        match event {
            Event::Start(ref e) if depth == 0 => {
                p = element_prefix(e.name().as_ref());
                let mut root = e.to_owned();
                match namespace_prefix(e, ns::OFC_RELATIONSHIPS) {
                    Some(prefix) => r = prefix,
                    None => root.push_attribute(("xmlns:r", ns::OFC_RELATIONSHIPS)),
                }
                writer.write_event(Event::Start(root)).map_err(write_err)?;
            }
            Event::Start(ref e) if top_level && local_name(e.name().as_ref()) == b"sldIdLst" => {
                write_slide_id_list(&mut writer, &p, &r, slide_ids).map_err(write_err)?;
                list_written = true;
                skip_depth = 1;
            }
            Event::Empty(ref e) if top_level && local_name(e.name().as_ref()) == b"sldIdLst" => {
                write_slide_id_list(&mut writer, &p, &r, slide_ids).map_err(write_err)?;
                list_written = true;
            }
            Event::Start(ref e) | Event::Empty(ref e)
                if top_level && local_name(e.name().as_ref()) == b"sldSz" =>
            {
                if !list_written {
                    write_slide_id_list(&mut writer, &p, &r, slide_ids).map_err(write_err)?;
                    list_written = true;
                }
                let mut size = BytesStart::new(format!("{}sldSz", p));
                size.push_attribute(("cx", cx.to_string().as_str()));
                size.push_attribute(("cy", cy.to_string().as_str()));
                for a in e.attributes().flatten() {
                    match a.key.as_ref() {
                        b"cx" | b"cy" => {}
                        b"type" if size_changed => {}
                        _ => size.push_attribute(a),
                    }
                }
                if opens {
                    writer.write_event(Event::Start(size)).map_err(write_err)?;
                } else {
                    writer.write_event(Event::Empty(size)).map_err(write_err)?;
                }
                size_written = true;
            }
            Event::Start(ref e) | Event::Empty(ref e)
                if top_level && local_name(e.name().as_ref()) == b"notesSz" =>
            {
                if !list_written {
                    write_slide_id_list(&mut writer, &p, &r, slide_ids).map_err(write_err)?;
                    list_written = true;
                }
                if !size_written {
                    let mut size = BytesStart::new(format!("{}sldSz", p));
                    size.push_attribute(("cx", cx.to_string().as_str()));
                    size.push_attribute(("cy", cy.to_string().as_str()));
                    writer.write_event(Event::Empty(size)).map_err(write_err)?;
                    size_written = true;
                }
                writer.write_event(event.clone()).map_err(write_err)?;
            }
            Event::Eof => break,
            other => writer.write_event(other).map_err(write_err)?,
        }

        if opens && skip_depth == 0 {
            depth += 1;
        }
        if closes {
            depth = depth.saturating_sub(1);
        }
    }

    if !slide_ids.is_empty() && !list_written {
        return Err(Error::CorruptedPackage(
            "presentation.xml has no place for a slide list".to_string(),
        ));
    }

    String::from_utf8(writer.into_inner())
        .map_err(|e| Error::XmlError(format!("presentation.xml is not UTF-8: {}", e)))
}

fn write_slide_id_list(
    writer: &mut Writer<Vec<u8>>,
    p: &str,
    r: &str,
    slide_ids: &[(u32, &str)],
) -> std::result::Result<(), quick_xml::Error> {
    if slide_ids.is_empty() {
        return Ok(());
    }

    let list_name = format!("{}sldIdLst", p);
    writer.write_event(Event::Start(BytesStart::new(list_name.as_str())))?;
    let r_id_key = format!("{}:id", r);
    for (id, r_id) in slide_ids {
        let mut entry = BytesStart::new(format!("{}sldId", p));
        entry.push_attribute(("id", id.to_string().as_str()));
        entry.push_attribute((r_id_key.as_str(), *r_id));
        writer.write_event(Event::Empty(entry))?;
    }
    writer.write_event(Event::End(BytesEnd::new(list_name.as_str())))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const PRES_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<p:presentation xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships" xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main"><p:sldMasterIdLst><p:sldMasterId id="2147483648" r:id="rId1"/></p:sldMasterIdLst><p:sldIdLst><p:sldId id="256" r:id="rId2"/><p:sldId id="258" r:id="rId3"/></p:sldIdLst><p:sldSz cx="12192000" cy="6858000" type="screen16x9"/><p:notesSz cx="6858000" cy="9144000"/><p:defaultTextStyle><a:lvl1pPr marL="0">&#8220;</a:lvl1pPr></p:defaultTextStyle></p:presentation>"#;

    const SECTION_EXT: &str = concat!(
        r#"<p:extLst><p:ext uri="{521415D9-36F7-43E2-AB2F-B90AF26B5E84}">"#,
        r#"<p14:sectionLst xmlns:p14="http://schemas.microsoft.com/office/powerpoint/2010/main">"#,
        r#"<p14:section name="Intro" id="{3F1B7E2A-5C4D-4E8F-9A0B-1C2D3E4F5A6B}">"#,
        r#"<p14:sldIdLst><p14:sldId id="256"/><p14:sldId id="258"/></p14:sldIdLst>"#,
        r#"</p14:section></p14:sectionLst></p:ext></p:extLst>"#
    );

    fn with_sections(xml: &str) -> String {
        xml.replace("</p:presentation>", &format!("{}</p:presentation>", SECTION_EXT))
    }

    #[test]
    fn test_parse_presentation_xml() {
        let info = parse_presentation_xml(PRES_XML).expect("parse");
        assert_eq!(
            info.slide_ids,
            vec![(256, "rId2".to_string()), (258, "rId3".to_string())]
        );
        assert_eq!(info.master_r_ids, vec!["rId1".to_string()]);
        assert_eq!(info.size, Some((Emu(12_192_000), Emu(6_858_000))));
    }

    #[test]
    fn test_parse_ignores_section_slide_lists() {
        let info = parse_presentation_xml(&with_sections(PRES_XML)).expect("parse");
        assert_eq!(
            info.slide_ids,
            vec![(256, "rId2".to_string()), (258, "rId3".to_string())]
        );
    }

    #[test]
    fn test_rewrite_leaves_section_slide_lists_alone() {
        let xml = rewrite_presentation_xml(
            &with_sections(PRES_XML),
            &[(256, "rId2"), (258, "rId3"), (259, "rId7")],
            (Emu(12_192_000), Emu(6_858_000)),
            false,
        )
        .expect("rewrite");

        assert_eq!(xml.matches("<p:sldIdLst>").count(), 1);
        assert!(xml.contains(
            r#"<p14:sldIdLst><p14:sldId id="256"/><p14:sldId id="258"/></p14:sldIdLst>"#
        ));
        let info = parse_presentation_xml(&xml).expect("reparse");
        assert_eq!(info.slide_ids.len(), 3);
        assert!(xml.find("<p:sldIdLst>") < xml.find("<p:sldSz"));
    }

    #[test]
    fn test_rewrite_replaces_list_and_keeps_rest() {
        let xml = rewrite_presentation_xml(
            PRES_XML,
            &[(256, "rId2"), (258, "rId3"), (259, "rId7")],
            (Emu(12_192_000), Emu(6_858_000)),
            false,
        )
        .expect("rewrite");

        let info = parse_presentation_xml(&xml).expect("reparse");
        assert_eq!(info.slide_ids.len(), 3);
        assert_eq!(info.slide_ids[2], (259, "rId7".to_string()));
        assert!(xml.contains(r#"type="screen16x9""#));
        assert!(xml.contains("<p:defaultTextStyle>"));
        assert!(xml.contains("&#8220;"));
    }

    #[test]
    fn test_rewrite_inserts_missing_list_before_size() {
        let xml = PRES_XML.replace(
            r#"<p:sldIdLst><p:sldId id="256" r:id="rId2"/><p:sldId id="258" r:id="rId3"/></p:sldIdLst>"#,
            "",
        );
        let out = rewrite_presentation_xml(&xml, &[(256, "rId9")], (Emu(100), Emu(50)), true)
            .expect("rewrite");

        let list_pos = out.find("<p:sldIdLst>").expect("list inserted");
        let size_pos = out.find("<p:sldSz").expect("size kept");
        assert!(list_pos < size_pos);
        assert!(out.contains(r#"<p:sldSz cx="100" cy="50"/>"#));
    }

    #[test]
    fn test_new_presentation_defaults() {
        let prs = Presentation::new().expect("new presentation");
        assert_eq!(prs.slide_count(), 0);
        assert_eq!(prs.slide_layout_count(), 11);
        assert_eq!(prs.slide_width(), template::DEFAULT_SLIDE_WIDTH);
        assert_eq!(prs.slide_height(), template::DEFAULT_SLIDE_HEIGHT);
        assert_eq!(
            prs.slide_layout_name(6).expect("layout name").as_deref(),
            Some("Blank")
        );
    }

    #[test]
    fn test_add_slide_registers_part_and_id() {
        let mut prs = Presentation::new().expect("new presentation");
        prs.add_slide(6).expect("add slide");
        prs.add_slide(0).expect("add slide");

        assert_eq!(prs.slide_count(), 2);
        let names: Vec<&str> = prs.slide_partnames().collect();
        assert_eq!(names, vec!["/ppt/slides/slide1.xml", "/ppt/slides/slide2.xml"]);
        assert_eq!(prs.slides[0].id, 256);
        assert_eq!(prs.slides[1].id, 257);
        assert_eq!(
            prs.package().content_type("/ppt/slides/slide1.xml"),
            Some(ct::PML_SLIDE)
        );

        let rels = prs.package().rels("/ppt/slides/slide1.xml").expect("slide rels");
        let layout = rels.first_of_type(rt::SLIDE_LAYOUT).expect("layout rel");
        assert_eq!(layout.target, "../slideLayouts/slideLayout7.xml");
    }

    #[test]
    fn test_missing_layout_index() {
        let mut prs = Presentation::new().expect("new presentation");
        let result = prs.add_slide(42);
        assert!(matches!(
            result,
            Err(Error::LayoutNotFound { index: 42, available: 11 })
        ));
    }

    #[test]
    fn test_round_trip_keeps_slides_and_size() {
        let mut prs = Presentation::new().expect("new presentation");
        prs.set_slide_width(Emu::from_inches(8.0));
        prs.set_slide_height(Emu::from_inches(7.0));
        prs.add_slide(6).expect("add slide");
        let bytes = prs.to_bytes().expect("serialize");

        let reloaded = Presentation::from_reader(std::io::Cursor::new(bytes)).expect("reload");
        assert_eq!(reloaded.slide_count(), 1);
        assert_eq!(reloaded.slide_width().inches(), 8.0);
        assert_eq!(reloaded.slide_height().inches(), 7.0);
    }

    #[test]
    fn test_load_missing_path() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let outcome = Presentation::load(&dir.path().join("out.pptx")).expect("load");
        assert!(matches!(outcome, LoadOutcome::Missing));
    }

    #[test]
    fn test_load_non_presentation_package_is_error() {
        let mut pkg = Package::new();
        pkg.add_part(
            "/word/document.xml",
            "application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml",
            b"<w:document/>".to_vec(),
        );
        let mut rels = Relationships::new("/");
        rels.add(rt::OFFICE_DOCUMENT, "/word/document.xml");
        pkg.set_rels("/", &rels);

        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join("letter.pptx");
        pkg.save(&path).expect("save");

        let result = Presentation::load(&path);
        assert!(matches!(result, Err(Error::CorruptedPackage(_))));
    }
}
