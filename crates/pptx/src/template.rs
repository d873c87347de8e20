//! Built-in template for new presentations.
//!
//! Produces the smallest package PowerPoint accepts as a normal deck: one
//! slide master with its theme, the eleven conventional slide layouts, and
//! the presentation-level property parts. Layout order follows the usual
//! default template, so index 6 is "Blank".

use crate::constants::{content_type as ct, namespace as ns, relationship_type as rt};
use crate::package::Package;
use crate::rels::Relationships;
use crate::xml::XML_DECLARATION;
use imgdeck_core::Emu;

/// Slide width of the built-in template (10 in).
pub const DEFAULT_SLIDE_WIDTH: Emu = Emu(9_144_000);

/// Slide height of the built-in template (7.5 in).
pub const DEFAULT_SLIDE_HEIGHT: Emu = Emu(6_858_000);

/// Id of the first slide master; layout ids continue from here.
const FIRST_MASTER_ID: u32 = 2_147_483_648;

pub const PRESENTATION_URI: &str = "/ppt/presentation.xml";
const MASTER_URI: &str = "/ppt/slideMasters/slideMaster1.xml";
const THEME_URI: &str = "/ppt/theme/theme1.xml";
const PRES_PROPS_URI: &str = "/ppt/presProps.xml";
const VIEW_PROPS_URI: &str = "/ppt/viewProps.xml";
const TABLE_STYLES_URI: &str = "/ppt/tableStyles.xml";
const CORE_PROPS_URI: &str = "/docProps/core.xml";

const THEME_XML: &str = include_str!("../resources/theme1.xml");

/// A placeholder on a template layout: display name and `p:ph` attributes.
type PlaceholderSpec = (&'static str, &'static str);

/// A slide layout of the built-in template.
#[derive(Debug, Clone, Copy)]
pub struct LayoutSpec {
    /// Name shown in the layout gallery.
    pub name: &'static str,
    /// `type` attribute of `p:sldLayout`.
    pub kind: &'static str,
    placeholders: &'static [PlaceholderSpec],
}

const TITLE: PlaceholderSpec = ("Title", r#"type="title""#);

/// Layouts in gallery order.
pub const LAYOUTS: &[LayoutSpec] = &[
    LayoutSpec {
        name: "Title Slide",
        kind: "title",
        placeholders: &[
            ("Title", r#"type="ctrTitle""#),
            ("Subtitle", r#"type="subTitle" idx="1""#),
        ],
    },
    LayoutSpec {
        name: "Title and Content",
        kind: "obj",
        placeholders: &[TITLE, ("Content Placeholder", r#"idx="1""#)],
    },
    LayoutSpec {
        name: "Section Header",
        kind: "secHead",
        placeholders: &[TITLE, ("Text Placeholder", r#"type="body" idx="1""#)],
    },
    LayoutSpec {
        name: "Two Content",
        kind: "twoObj",
        placeholders: &[
            TITLE,
            ("Content Placeholder", r#"sz="half" idx="1""#),
            ("Content Placeholder", r#"sz="half" idx="2""#),
        ],
    },
    LayoutSpec {
        name: "Comparison",
        kind: "twoTxTwoObj",
        placeholders: &[
            TITLE,
            ("Text Placeholder", r#"type="body" sz="quarter" idx="1""#),
            ("Content Placeholder", r#"sz="quarter" idx="2""#),
            ("Text Placeholder", r#"type="body" sz="quarter" idx="3""#),
            ("Content Placeholder", r#"sz="quarter" idx="4""#),
        ],
    },
    LayoutSpec {
        name: "Title Only",
        kind: "titleOnly",
        placeholders: &[TITLE],
    },
    LayoutSpec {
        name: "Blank",
        kind: "blank",
        placeholders: &[],
    },
    LayoutSpec {
        name: "Content with Caption",
        kind: "objTx",
        placeholders: &[
            TITLE,
            ("Content Placeholder", r#"idx="1""#),
            ("Text Placeholder", r#"type="body" sz="half" idx="2""#),
        ],
    },
    LayoutSpec {
        name: "Picture with Caption",
        kind: "picTx",
        placeholders: &[
            TITLE,
            ("Picture Placeholder", r#"type="pic" idx="1""#),
            ("Text Placeholder", r#"type="body" sz="half" idx="2""#),
        ],
    },
    LayoutSpec {
        name: "Title and Vertical Text",
        kind: "vertTx",
        placeholders: &[TITLE, ("Vertical Text Placeholder", r#"type="body" orient="vert" idx="1""#)],
    },
    LayoutSpec {
        name: "Vertical Title and Text",
        kind: "vertTitleAndTx",
        placeholders: &[
            ("Vertical Title", r#"type="title" orient="vert""#),
            ("Vertical Text Placeholder", r#"type="body" orient="vert" idx="1""#),
        ],
    },
];

/// Part name of the n-th (0-based) template layout.
pub fn layout_uri(index: usize) -> String {
    format!("/ppt/slideLayouts/slideLayout{}.xml", index + 1)
}

/// Build the package of an empty presentation.
pub fn default_package() -> Package {
    let mut pkg = Package::new();

    let mut pkg_rels = Relationships::new("/");
    pkg_rels.add(rt::OFFICE_DOCUMENT, PRESENTATION_URI);
    pkg_rels.add(rt::CORE_PROPERTIES, CORE_PROPS_URI);
    pkg.set_rels("/", &pkg_rels);
    pkg.add_part(CORE_PROPS_URI, ct::OPC_CORE_PROPERTIES, CORE_PROPS_XML.as_bytes().to_vec());

    let mut pres_rels = Relationships::new("/ppt");
    let master_r_id = pres_rels.add(rt::SLIDE_MASTER, MASTER_URI);
    pres_rels.add(rt::PRES_PROPS, PRES_PROPS_URI);
    pres_rels.add(rt::VIEW_PROPS, VIEW_PROPS_URI);
    pres_rels.add(rt::THEME, THEME_URI);
    pres_rels.add(rt::TABLE_STYLES, TABLE_STYLES_URI);
    pkg.set_rels(PRESENTATION_URI, &pres_rels);
    pkg.add_part(
        PRESENTATION_URI,
        ct::PML_PRESENTATION_MAIN,
        presentation_xml(&master_r_id).into_bytes(),
    );

    let mut master_rels = Relationships::new("/ppt/slideMasters");
    let layout_r_ids: Vec<String> = (0..LAYOUTS.len())
        .map(|i| master_rels.add(rt::SLIDE_LAYOUT, &layout_uri(i)))
        .collect();
    master_rels.add(rt::THEME, THEME_URI);
    pkg.set_rels(MASTER_URI, &master_rels);
    pkg.add_part(
        MASTER_URI,
        ct::PML_SLIDE_MASTER,
        slide_master_xml(&layout_r_ids).into_bytes(),
    );

    for (i, layout) in LAYOUTS.iter().enumerate() {
        let uri = layout_uri(i);
        let mut layout_rels = Relationships::new("/ppt/slideLayouts");
        layout_rels.add(rt::SLIDE_MASTER, MASTER_URI);
        pkg.set_rels(&uri, &layout_rels);
        pkg.add_part(&uri, ct::PML_SLIDE_LAYOUT, slide_layout_xml(layout).into_bytes());
    }

    pkg.add_part(THEME_URI, ct::OFC_THEME, THEME_XML.as_bytes().to_vec());
    pkg.add_part(PRES_PROPS_URI, ct::PML_PRES_PROPS, pml_root("p:presentationPr").into_bytes());
    pkg.add_part(VIEW_PROPS_URI, ct::PML_VIEW_PROPS, pml_root("p:viewPr").into_bytes());
    pkg.add_part(
        TABLE_STYLES_URI,
        ct::PML_TABLE_STYLES,
        TABLE_STYLES_XML.as_bytes().to_vec(),
    );

    pkg
}

/// Namespace declarations shared by presentationML parts.
pub(crate) fn pml_namespaces() -> String {
    format!(
        r#"xmlns:a="{}" xmlns:r="{}" xmlns:p="{}""#,
        ns::DML,
        ns::OFC_RELATIONSHIPS,
        ns::PML
    )
}

fn pml_root(tag: &str) -> String {
    format!("{}<{} {}/>", XML_DECLARATION, tag, pml_namespaces())
}

fn presentation_xml(master_r_id: &str) -> String {
    format!(
        concat!(
            "{decl}<p:presentation {ns} saveSubsetFonts=\"1\">",
            "<p:sldMasterIdLst><p:sldMasterId id=\"{master_id}\" r:id=\"{r_id}\"/></p:sldMasterIdLst>",
            "<p:sldSz cx=\"{cx}\" cy=\"{cy}\" type=\"screen4x3\"/>",
            "<p:notesSz cx=\"6858000\" cy=\"9144000\"/>",
            "</p:presentation>"
        ),
        decl = XML_DECLARATION,
        ns = pml_namespaces(),
        master_id = FIRST_MASTER_ID,
        r_id = master_r_id,
        cx = DEFAULT_SLIDE_WIDTH,
        cy = DEFAULT_SLIDE_HEIGHT,
    )
}

/// Group-shape header every shape tree starts with.
pub(crate) const SP_TREE_HEADER: &str = concat!(
    "<p:nvGrpSpPr><p:cNvPr id=\"1\" name=\"\"/><p:cNvGrpSpPr/><p:nvPr/></p:nvGrpSpPr>",
    "<p:grpSpPr><a:xfrm><a:off x=\"0\" y=\"0\"/><a:ext cx=\"0\" cy=\"0\"/>",
    "<a:chOff x=\"0\" y=\"0\"/><a:chExt cx=\"0\" cy=\"0\"/></a:xfrm></p:grpSpPr>"
);

fn slide_master_xml(layout_r_ids: &[String]) -> String {
    let mut xml = String::with_capacity(4096);
    xml.push_str(XML_DECLARATION);
    xml.push_str(&format!("<p:sldMaster {}>", pml_namespaces()));
    xml.push_str("<p:cSld><p:bg><p:bgRef idx=\"1001\"><a:schemeClr val=\"bg1\"/></p:bgRef></p:bg>");
    xml.push_str("<p:spTree>");
    xml.push_str(SP_TREE_HEADER);
    xml.push_str(&master_placeholder(
        2,
        "Title Placeholder 1",
        r#"type="title""#,
        (457_200, 274_638, 8_229_600, 1_143_000),
        "Click to edit Master title style",
    ));
    xml.push_str(&master_placeholder(
        3,
        "Text Placeholder 2",
        r#"type="body" idx="1""#,
        (457_200, 1_600_200, 8_229_600, 4_525_963),
        "Click to edit Master text styles",
    ));
    xml.push_str("</p:spTree></p:cSld>");
    xml.push_str(concat!(
        "<p:clrMap bg1=\"lt1\" tx1=\"dk1\" bg2=\"lt2\" tx2=\"dk2\" accent1=\"accent1\" ",
        "accent2=\"accent2\" accent3=\"accent3\" accent4=\"accent4\" accent5=\"accent5\" ",
        "accent6=\"accent6\" hlink=\"hlink\" folHlink=\"folHlink\"/>"
    ));

    xml.push_str("<p:sldLayoutIdLst>");
    for (i, r_id) in layout_r_ids.iter().enumerate() {
        xml.push_str(&format!(
            r#"<p:sldLayoutId id="{}" r:id="{}"/>"#,
            FIRST_MASTER_ID + 1 + i as u32,
            r_id
        ));
    }
    xml.push_str("</p:sldLayoutIdLst>");

    xml.push_str(concat!(
        "<p:txStyles>",
        "<p:titleStyle><a:lvl1pPr algn=\"ctr\"><a:defRPr sz=\"4400\">",
        "<a:solidFill><a:schemeClr val=\"tx1\"/></a:solidFill>",
        "<a:latin typeface=\"+mj-lt\"/></a:defRPr></a:lvl1pPr></p:titleStyle>",
        "<p:bodyStyle><a:lvl1pPr marL=\"342900\" indent=\"-342900\"><a:defRPr sz=\"3200\">",
        "<a:solidFill><a:schemeClr val=\"tx1\"/></a:solidFill>",
        "<a:latin typeface=\"+mn-lt\"/></a:defRPr></a:lvl1pPr></p:bodyStyle>",
        "<p:otherStyle><a:lvl1pPr><a:defRPr><a:solidFill><a:schemeClr val=\"tx1\"/></a:solidFill>",
        "</a:defRPr></a:lvl1pPr></p:otherStyle>",
        "</p:txStyles>"
    ));
    xml.push_str("</p:sldMaster>");
    xml
}

fn master_placeholder(
    id: u32,
    name: &str,
    ph: &str,
    (x, y, cx, cy): (i64, i64, i64, i64),
    prompt: &str,
) -> String {
    format!(
        concat!(
            "<p:sp><p:nvSpPr><p:cNvPr id=\"{id}\" name=\"{name}\"/>",
            "<p:cNvSpPr><a:spLocks noGrp=\"1\"/></p:cNvSpPr><p:nvPr><p:ph {ph}/></p:nvPr></p:nvSpPr>",
            "<p:spPr><a:xfrm><a:off x=\"{x}\" y=\"{y}\"/><a:ext cx=\"{cx}\" cy=\"{cy}\"/></a:xfrm>",
            "<a:prstGeom prst=\"rect\"><a:avLst/></a:prstGeom></p:spPr>",
            "<p:txBody><a:bodyPr/><a:lstStyle/><a:p><a:r><a:rPr lang=\"en-US\"/>",
            "<a:t>{prompt}</a:t></a:r></a:p></p:txBody></p:sp>"
        ),
        id = id,
        name = name,
        ph = ph,
        x = x,
        y = y,
        cx = cx,
        cy = cy,
        prompt = prompt,
    )
}

fn slide_layout_xml(layout: &LayoutSpec) -> String {
    let mut xml = String::with_capacity(1024);
    xml.push_str(XML_DECLARATION);
    xml.push_str(&format!(
        r#"<p:sldLayout {} type="{}" preserve="1">"#,
        pml_namespaces(),
        layout.kind
    ));
    xml.push_str(&format!(r#"<p:cSld name="{}"><p:spTree>"#, layout.name));
    xml.push_str(SP_TREE_HEADER);

    for (i, (name, ph)) in layout.placeholders.iter().enumerate() {
        let id = i + 2;
        xml.push_str(&format!(
            concat!(
                "<p:sp><p:nvSpPr><p:cNvPr id=\"{}\" name=\"{} {}\"/>",
                "<p:cNvSpPr><a:spLocks noGrp=\"1\"/></p:cNvSpPr>",
                "<p:nvPr><p:ph {}/></p:nvPr></p:nvSpPr><p:spPr/></p:sp>"
            ),
            id,
            name,
            id - 1,
            ph
        ));
    }

    xml.push_str("</p:spTree></p:cSld>");
    xml.push_str("<p:clrMapOvr><a:masterClrMapping/></p:clrMapOvr>");
    xml.push_str("</p:sldLayout>");
    xml
}

const CORE_PROPS_XML: &str = concat!(
    r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
    r#"<cp:coreProperties xmlns:cp="http://schemas.openxmlformats.org/package/2006/metadata/core-properties" "#,
    r#"xmlns:dc="http://purl.org/dc/elements/1.1/" xmlns:dcterms="http://purl.org/dc/terms/" "#,
    r#"xmlns:dcmitype="http://purl.org/dc/dcmitype/" xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance">"#,
    "<dc:title>PowerPoint Presentation</dc:title><cp:revision>1</cp:revision>",
    "</cp:coreProperties>"
);

const TABLE_STYLES_XML: &str = concat!(
    r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
    r#"<a:tblStyleLst xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" "#,
    r#"def="{5C22544A-7EE6-4342-B048-85BDC9FD1C3A}"/>"#
);
