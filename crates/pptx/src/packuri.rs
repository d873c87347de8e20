//! Part-name helpers for OPC packages.
//!
//! Part names always begin with `/` and use `/` as separator, e.g.
//! `/ppt/slides/slide1.xml`. Zip member names are the same without the
//! leading slash.

/// Part name of the content-types stream.
pub const CONTENT_TYPES_URI: &str = "/[Content_Types].xml";

/// Relationships part of the package itself.
pub const PACKAGE_RELS_URI: &str = "/_rels/.rels";

/// Directory portion of a part name: `/ppt/slides` for `/ppt/slides/slide1.xml`.
pub fn base_uri(partname: &str) -> &str {
    match partname.rfind('/') {
        Some(0) | None => "/",
        Some(pos) => &partname[..pos],
    }
}

/// File-name portion of a part name.
pub fn filename(partname: &str) -> &str {
    partname.rsplit('/').next().unwrap_or("")
}

/// Extension of a part name without the dot, lower-cased.
pub fn extension(partname: &str) -> String {
    let name = filename(partname);
    name.rfind('.')
        .map(|pos| name[pos + 1..].to_lowercase())
        .unwrap_or_default()
}

/// Numeric index of a tuple part name: 21 for `/ppt/slides/slide21.xml`.
pub fn partname_index(partname: &str) -> Option<u32> {
    let name = filename(partname);
    let stem = name.rfind('.').map(|pos| &name[..pos]).unwrap_or(name);
    let digits_start = stem
        .char_indices()
        .rev()
        .take_while(|(_, c)| c.is_ascii_digit())
        .last()
        .map(|(i, _)| i)?;
    stem[digits_start..].parse().ok()
}

/// Relationships part name for a source part.
///
/// `/ppt/slides/slide1.xml` → `/ppt/slides/_rels/slide1.xml.rels`,
/// and the package pseudo-part `/` → `/_rels/.rels`.
pub fn rels_uri_for(partname: &str) -> String {
    if partname == "/" {
        return PACKAGE_RELS_URI.to_string();
    }
    let base = base_uri(partname);
    let base = if base == "/" { "" } else { base };
    format!("{}/_rels/{}.rels", base, filename(partname))
}

/// Resolve a relationship target against the base URI of its source part.
///
/// Absolute targets (starting with `/`) are returned as-is after
/// normalisation.
pub fn resolve(base_uri: &str, target: &str) -> String {
    let joined = if target.starts_with('/') {
        target.to_string()
    } else if base_uri.ends_with('/') {
        format!("{}{}", base_uri, target)
    } else {
        format!("{}/{}", base_uri, target)
    };

    let mut segments: Vec<&str> = Vec::new();
    for segment in joined.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            other => segments.push(other),
        }
    }
    format!("/{}", segments.join("/"))
}

/// Relative reference from `base_uri` to `partname`, as stored in a `.rels` file.
///
/// `relative_ref("/ppt/slides", "/ppt/slideLayouts/slideLayout7.xml")` gives
/// `../slideLayouts/slideLayout7.xml`.
pub fn relative_ref(base_uri: &str, partname: &str) -> String {
    if base_uri == "/" {
        return partname.trim_start_matches('/').to_string();
    }

    let from: Vec<&str> = base_uri.split('/').filter(|s| !s.is_empty()).collect();
    let to: Vec<&str> = partname.split('/').filter(|s| !s.is_empty()).collect();

    let common = from
        .iter()
        .zip(to.iter())
        .take_while(|(a, b)| a == b)
        .count();

    let mut parts: Vec<&str> = vec![".."; from.len() - common];
    parts.extend_from_slice(&to[common..]);
    parts.join("/")
}

/// Zip member name for a part name.
pub fn member_name(partname: &str) -> &str {
    partname.trim_start_matches('/')
}
