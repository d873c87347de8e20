//! Small quick-xml helpers shared by the part readers and writers.

use imgdeck_core::{Error, Result};
use quick_xml::events::BytesStart;

/// XML declaration written at the top of every generated part.
pub const XML_DECLARATION: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#;

/// Extract the local name from a potentially namespaced XML element name.
pub fn local_name(name: &[u8]) -> &[u8] {
    if let Some(pos) = name.iter().position(|&b| b == b':') {
        &name[pos + 1..]
    } else {
        name
    }
}

/// Unescaped value of the attribute with the given qualified name.
pub fn attr(e: &BytesStart<'_>, key: &[u8]) -> Option<String> {
    e.attributes()
        .flatten()
        .find(|a| a.key.as_ref() == key)
        .and_then(|a| a.unescape_value().ok().map(|v| v.into_owned()))
}

/// Unescaped value of the first attribute whose local name matches.
///
/// Used for `r:id`, whose prefix is chosen by the producing application.
pub fn attr_local(e: &BytesStart<'_>, local: &[u8]) -> Option<String> {
    e.attributes()
        .flatten()
        .find(|a| local_name(a.key.as_ref()) == local)
        .and_then(|a| a.unescape_value().ok().map(|v| v.into_owned()))
}

/// Value of a prefixed `*:id` attribute (the relationship id on `p:sldId` and friends).
pub fn r_id(e: &BytesStart<'_>) -> Option<String> {
    e.attributes()
        .flatten()
        .find(|a| a.key.as_ref().contains(&b':') && local_name(a.key.as_ref()) == b"id")
        .and_then(|a| a.unescape_value().ok().map(|v| v.into_owned()))
}

/// `"p:"` for `p:presentation`, empty for an unprefixed name.
pub fn element_prefix(qname: &[u8]) -> String {
    match qname.iter().position(|&b| b == b':') {
        Some(pos) => format!("{}:", String::from_utf8_lossy(&qname[..pos])),
        None => String::new(),
    }
}

/// Prefix bound to `namespace` by an `xmlns:*` attribute on this element.
pub fn namespace_prefix(e: &BytesStart<'_>, namespace: &str) -> Option<String> {
    e.attributes().flatten().find_map(|a| {
        let prefix = a.key.as_ref().strip_prefix(b"xmlns:")?;
        if a.value.as_ref() == namespace.as_bytes() {
            Some(String::from_utf8_lossy(prefix).into_owned())
        } else {
            None
        }
    })
}

/// Escape text for use in attribute values and element content.
pub fn escape(s: &str) -> String {
    quick_xml::escape::escape(s).into_owned()
}

/// Decode part bytes as UTF-8 XML text.
pub fn part_text<'a>(partname: &str, bytes: &'a [u8]) -> Result<&'a str> {
    let text = std::str::from_utf8(bytes)
        .map_err(|e| Error::XmlError(format!("'{}' is not valid UTF-8: {}", partname, e)))?;
    Ok(text.trim_start_matches('\u{feff}'))
}

/// Map a quick-xml error into our error type with context.
pub fn xml_error(context: &str, e: quick_xml::Error) -> Error {
    Error::XmlError(format!("{}: {}", context, e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_local_name() {
        assert_eq!(local_name(b"p:sp"), b"sp");
        assert_eq!(local_name(b"a:t"), b"t");
        assert_eq!(local_name(b"sp"), b"sp");
    }

    #[test]
    fn test_attr_lookup() {
        let e = BytesStart::from_content(r#"p:sldId id="256" r:id="rId2""#, 7);
        assert_eq!(attr(&e, b"id").as_deref(), Some("256"));
        assert_eq!(attr_local(&e, b"id").as_deref(), Some("256"));
        assert_eq!(attr(&e, b"r:id").as_deref(), Some("rId2"));
        assert_eq!(attr(&e, b"missing"), None);
        assert_eq!(r_id(&e).as_deref(), Some("rId2"));
    }

    #[test]
    fn test_prefixes() {
        assert_eq!(element_prefix(b"p:presentation"), "p:");
        assert_eq!(element_prefix(b"presentation"), "");

        let e = BytesStart::from_content(
            r#"p:sld xmlns:x="http://schemas.openxmlformats.org/drawingml/2006/main""#,
            5,
        );
        assert_eq!(
            namespace_prefix(&e, "http://schemas.openxmlformats.org/drawingml/2006/main").as_deref(),
            Some("x")
        );
        assert_eq!(namespace_prefix(&e, "urn:other"), None);
    }

    #[test]
    fn test_escape() {
        assert_eq!(escape(r#"a<b & "c""#), "a&lt;b &amp; &quot;c&quot;");
    }
}
