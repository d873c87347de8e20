//! Slide parts: creating empty slides and placing pictures on them.

use crate::constants::{namespace as ns, relationship_type as rt};
use crate::media::ImageInfo;
use crate::package::Package;
use crate::packuri;
use crate::presentation::Presentation;
use crate::template::{pml_namespaces, SP_TREE_HEADER};
use crate::xml::{
    attr, attr_local, element_prefix, escape, local_name, namespace_prefix, xml_error,
    XML_DECLARATION,
};
use imgdeck_core::{Emu, Error, Result};
use quick_xml::events::Event;
use quick_xml::{Reader, Writer};
use std::path::Path;

/// Where embedded media parts live.
const MEDIA_DIR: &str = "/ppt/media/";

/// A picture shape as found on (or added to) a slide.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlacedPicture {
    pub shape_id: u32,
    pub name: String,
    pub description: String,
    /// Relationship id of the embedded image.
    pub r_id: String,
    pub left: Emu,
    pub top: Emu,
    pub width: Emu,
    pub height: Emu,
}

/// Mutable view of one slide of a [`Presentation`].
#[derive(Debug)]
pub struct SlideMut<'a> {
    prs: &'a mut Presentation,
    index: usize,
}

impl<'a> SlideMut<'a> {
    pub(crate) fn new(prs: &'a mut Presentation, index: usize) -> Self {
        Self { prs, index }
    }

    /// Position of the slide in the deck.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Part name of the slide.
    pub fn partname(&self) -> &str {
        self.prs.slide_partname(self.index)
    }

    /// Place the image file at `path` on the slide.
    ///
    /// `width` and `height` are optional: with one given the other keeps the
    /// image's aspect ratio, with neither the picture gets its native size.
    pub fn add_picture(
        &mut self,
        path: &Path,
        left: Emu,
        top: Emu,
        width: Option<Emu>,
        height: Option<Emu>,
    ) -> Result<PlacedPicture> {
        let image = ImageInfo::from_path(path)?;
        self.add_image(&image, left, top, width, height)
    }

    /// Place an already decoded image on the slide.
    pub fn add_image(
        &mut self,
        image: &ImageInfo,
        left: Emu,
        top: Emu,
        width: Option<Emu>,
        height: Option<Emu>,
    ) -> Result<PlacedPicture> {
        let (cx, cy) = image.scaled_size(width, height);
        let partname = self.partname().to_string();
        let package = self.prs.package_mut();

        let (media, is_new_media) = media_partname(package, image);
        let mut rels = package.rels(&partname)?;
        let r_id = rels.add(rt::IMAGE, &media);

        let xml = package.part_xml(&partname)?;
        let scan = scan_slide(xml)?;
        let shape_id = scan.max_shape_id + 1;
        let picture = PlacedPicture {
            shape_id,
            name: format!("Picture {}", shape_id - 1),
            description: image.filename.clone(),
            r_id,
            left,
            top,
            width: cx,
            height: cy,
        };

        let xml = insert_into_sp_tree(xml, |p| picture_xml(p, &scan.extra_namespaces, &picture))?;
        if is_new_media {
            package.add_default_part(&media, image.format.content_type(), image.data.clone());
        }
        package.set_part(&partname, xml.into_bytes());
        package.set_rels(&partname, &rels);

        log::debug!(
            "Placed '{}' on {} as shape {} ({}x{} EMU)",
            picture.description,
            partname,
            shape_id,
            cx,
            cy
        );
        Ok(picture)
    }
}

/// XML of a new slide with an empty shape tree.
pub(crate) fn new_slide_xml() -> String {
    format!(
        concat!(
            "{decl}<p:sld {ns}><p:cSld><p:spTree>{header}</p:spTree></p:cSld>",
            "<p:clrMapOvr><a:masterClrMapping/></p:clrMapOvr></p:sld>"
        ),
        decl = XML_DECLARATION,
        ns = pml_namespaces(),
        header = SP_TREE_HEADER,
    )
}

/// Part name for the image bytes: an identical existing media part, or the
/// first free `imageN` name. The flag is set when the part still has to be added.
fn media_partname(package: &Package, image: &ImageInfo) -> (String, bool) {
    let existing = package
        .partnames()
        .filter(|p| p.starts_with(MEDIA_DIR))
        .find(|p| package.part(p) == Some(image.data.as_slice()));
    if let Some(partname) = existing {
        return (partname.to_string(), false);
    }

    let used: Vec<u32> = package
        .partnames()
        .filter(|p| p.starts_with(MEDIA_DIR))
        .filter_map(packuri::partname_index)
        .collect();
    let n = (1..).find(|n| !used.contains(n)).unwrap_or(1);
    let partname = format!("{}image{}.{}", MEDIA_DIR, n, image.format.part_extension());
    (partname, true)
}

/// What we need to know about a slide before inserting a shape.
#[derive(Debug, Default)]
struct SlideScan {
    max_shape_id: u32,
    /// Declarations to put on the new shape when the slide root does not
    /// bind `a:` and `r:` the usual way.
    extra_namespaces: String,
}

fn scan_slide(xml: &str) -> Result<SlideScan> {
    let mut scan = SlideScan::default();
    let mut reader = Reader::from_str(xml);
    reader.trim_text(true);
    let mut seen_root = false;

    loop {
        match reader.read_event() {
            Ok(Event::Start(ref e)) | Ok(Event::Empty(ref e)) => {
                if !seen_root {
                    seen_root = true;
                    if namespace_prefix(e, ns::DML).as_deref() != Some("a") {
                        scan.extra_namespaces
                            .push_str(&format!(r#" xmlns:a="{}""#, ns::DML));
                    }
                    if namespace_prefix(e, ns::OFC_RELATIONSHIPS).as_deref() != Some("r") {
                        scan.extra_namespaces
                            .push_str(&format!(r#" xmlns:r="{}""#, ns::OFC_RELATIONSHIPS));
                    }
                }
                if local_name(e.name().as_ref()) == b"cNvPr" {
                    if let Some(id) = attr(e, b"id").and_then(|v| v.parse::<u32>().ok()) {
                        scan.max_shape_id = scan.max_shape_id.max(id);
                    }
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(xml_error("Error parsing slide", e)),
            _ => {}
        }
    }

    Ok(scan)
}

/// Copy slide XML, inserting a shape as the last child of the shape tree.
///
/// `shape` receives the prefix the slide uses for presentationML (`"p:"`).
fn insert_into_sp_tree<F>(xml: &str, shape: F) -> Result<String>
where
    F: FnOnce(&str) -> String,
{
    let mut reader = Reader::from_str(xml);
    let mut writer = Writer::new(Vec::with_capacity(xml.len() + 1024));
    let mut shape = Some(shape);

    loop {
        let event = reader
            .read_event()
            .map_err(|e| xml_error("Error parsing slide", e))?;
        match event {
            Event::End(ref e) if local_name(e.name().as_ref()) == b"spTree" => {
                if let Some(build) = shape.take() {
                    let fragment = build(&element_prefix(e.name().as_ref()));
                    writer.get_mut().extend_from_slice(fragment.as_bytes());
                }
                writer
                    .write_event(event.clone())
                    .map_err(|e| xml_error("Error writing slide", e))?;
            }
            Event::Eof => break,
            other => writer
                .write_event(other)
                .map_err(|e| xml_error("Error writing slide", e))?,
        }
    }

    if shape.is_some() {
        return Err(Error::CorruptedPackage(
            "slide has no shape tree".to_string(),
        ));
    }

    String::from_utf8(writer.into_inner())
        .map_err(|e| Error::XmlError(format!("slide is not UTF-8: {}", e)))
}

fn picture_xml(p: &str, extra_namespaces: &str, picture: &PlacedPicture) -> String {
    format!(
        concat!(
            "<{p}pic{ns}>",
            "<{p}nvPicPr><{p}cNvPr id=\"{id}\" name=\"{name}\" descr=\"{descr}\"/>",
            "<{p}cNvPicPr><a:picLocks noChangeAspect=\"1\"/></{p}cNvPicPr><{p}nvPr/></{p}nvPicPr>",
            "<{p}blipFill><a:blip r:embed=\"{r_id}\"/><a:stretch><a:fillRect/></a:stretch></{p}blipFill>",
            "<{p}spPr><a:xfrm><a:off x=\"{x}\" y=\"{y}\"/><a:ext cx=\"{cx}\" cy=\"{cy}\"/></a:xfrm>",
            "<a:prstGeom prst=\"rect\"><a:avLst/></a:prstGeom></{p}spPr>",
            "</{p}pic>"
        ),
        p = p,
        ns = extra_namespaces,
        id = picture.shape_id,
        name = escape(&picture.name),
        descr = escape(&picture.description),
        r_id = escape(&picture.r_id),
        x = picture.left,
        y = picture.top,
        cx = picture.width,
        cy = picture.height,
    )
}

/// Pictures on a slide, in drawing order.
pub(crate) fn read_pictures(xml: &str) -> Result<Vec<PlacedPicture>> {
    let mut pictures = Vec::new();
    let mut current: Option<PlacedPicture> = None;
    let mut reader = Reader::from_str(xml);
    reader.trim_text(true);

    let emu = |v: Option<String>| Emu(v.and_then(|s| s.parse::<i64>().ok()).unwrap_or(0));

    loop {
        match reader.read_event() {
            Ok(Event::Start(ref e)) | Ok(Event::Empty(ref e)) => {
                let name = e.name();
                let local = local_name(name.as_ref());
                if local == b"pic" {
                    current = Some(PlacedPicture {
                        shape_id: 0,
                        name: String::new(),
                        description: String::new(),
                        r_id: String::new(),
                        left: Emu(0),
                        top: Emu(0),
                        width: Emu(0),
                        height: Emu(0),
                    });
                    continue;
                }
                let Some(pic) = current.as_mut() else {
                    continue;
                };
                match local {
                    b"cNvPr" => {
                        pic.shape_id = attr(e, b"id").and_then(|v| v.parse().ok()).unwrap_or(0);
                        pic.name = attr(e, b"name").unwrap_or_default();
                        pic.description = attr(e, b"descr").unwrap_or_default();
                    }
                    b"blip" => pic.r_id = attr_local(e, b"embed").unwrap_or_default(),
                    b"off" => {
                        pic.left = emu(attr(e, b"x"));
                        pic.top = emu(attr(e, b"y"));
                    }
                    b"ext" if attr(e, b"cx").is_some() => {
                        pic.width = emu(attr(e, b"cx"));
                        pic.height = emu(attr(e, b"cy"));
                    }
                    _ => {}
                }
            }
            Ok(Event::End(ref e)) if local_name(e.name().as_ref()) == b"pic" => {
                if let Some(pic) = current.take() {
                    pictures.push(pic);
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(xml_error("Error parsing slide", e)),
            _ => {}
        }
    }

    Ok(pictures)
}
