use std::borrow::Cow;

use once_cell::sync::Lazy;
use regex::bytes::Regex;
use roxmltree::{Document, Node, ParsingOptions};

use super::types::FeedItem;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";
const UTF16_LE_BOM: &[u8] = b"\xFF\xFE";
const UTF16_BE_BOM: &[u8] = b"\xFE\xFF";

static ENCODING_DECL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"\A<\?xml\s[^>]*?encoding\s*=\s*["']([A-Za-z][A-Za-z0-9._-]*)["']"#)
        .expect("Invalid encoding declaration pattern")
});

#[derive(Debug, thiserror::Error)]
pub enum FeedParseError {
    #[error("feed payload is not valid utf-8: {0}")]
    Encoding(#[from] std::str::Utf8Error),
    #[error("feed payload is not valid {0}")]
    InvalidBytes(&'static str),
    #[error("unsupported feed encoding: {0}")]
    UnsupportedEncoding(String),
    #[error("xml feed parse error: {0}")]
    Xml(#[from] roxmltree::Error),
    #[error("RSS channel not found")]
    MissingChannel,
}

/// Parses an RSS 2.0 document and returns at most `max_items` items of its
/// channel, in document order.
pub fn parse_channel_items(raw: &[u8], max_items: usize) -> Result<Vec<FeedItem>, FeedParseError> {
    let text = decode_payload(raw)?;
    let options = ParsingOptions {
        allow_dtd: true,
        ..ParsingOptions::default()
    };
    let doc = Document::parse_with_options(&text, options)?;

    let channel = doc
        .root_element()
        .children()
        .find(|node| is_element_named(node, "channel"))
        .ok_or(FeedParseError::MissingChannel)?;

    let items: Vec<FeedItem> = channel
        .children()
        .filter(|node| is_element_named(node, "item"))
        .take(max_items)
        .map(|item| FeedItem {
            title: child_text(item, "title"),
            link: child_text(item, "link"),
            description: child_text(item, "description"),
            pub_date: child_text(item, "pubDate"),
        })
        .collect();

    tracing::debug!(items = items.len(), max_items, "channel items selected");
    Ok(items)
}

/// Decodes the payload the way an XML parser picks its encoding: byte order
/// mark first, then the `encoding` of the XML declaration, then UTF-8.
fn decode_payload(raw: &[u8]) -> Result<Cow<'_, str>, FeedParseError> {
    if let Some(body) = raw.strip_prefix(UTF8_BOM) {
        return Ok(Cow::Borrowed(std::str::from_utf8(body)?));
    }
    if let Some(body) = raw.strip_prefix(UTF16_LE_BOM) {
        return decode_utf16(body, u16::from_le_bytes);
    }
    if let Some(body) = raw.strip_prefix(UTF16_BE_BOM) {
        return decode_utf16(body, u16::from_be_bytes);
    }

    let declared = ENCODING_DECL_RE
        .captures(raw)
        .and_then(|captures| captures.get(1))
        .map(|encoding| String::from_utf8_lossy(encoding.as_bytes()).to_ascii_lowercase());
    match declared.as_deref() {
        None | Some("utf-8" | "utf8") => Ok(Cow::Borrowed(std::str::from_utf8(raw)?)),
        Some("iso-8859-1" | "iso8859-1" | "latin-1" | "latin1" | "l1") => {
            Ok(Cow::Owned(raw.iter().map(|&byte| char::from(byte)).collect()))
        }
        Some("us-ascii" | "ascii") => {
            if !raw.is_ascii() {
                return Err(FeedParseError::InvalidBytes("us-ascii"));
            }
            Ok(Cow::Borrowed(std::str::from_utf8(raw)?))
        }
        Some(other) => Err(FeedParseError::UnsupportedEncoding(other.to_string())),
    }
}

fn decode_utf16(body: &[u8], to_unit: fn([u8; 2]) -> u16) -> Result<Cow<'_, str>, FeedParseError> {
    if body.len() % 2 != 0 {
        return Err(FeedParseError::InvalidBytes("utf-16"));
    }
    let units: Vec<u16> = body
        .chunks_exact(2)
        .map(|pair| to_unit([pair[0], pair[1]]))
        .collect();
    String::from_utf16(&units)
        .map(Cow::Owned)
        .map_err(|_| FeedParseError::InvalidBytes("utf-16"))
}

fn is_element_named(node: &Node<'_, '_>, name: &str) -> bool {
    node.is_element() && node.tag_name().namespace().is_none() && node.tag_name().name() == name
}

fn child_text(parent: Node<'_, '_>, name: &str) -> String {
    parent
        .children()
        .find(|node| is_element_named(node, name))
        .map(|node| leading_text(node).trim().to_string())
        .unwrap_or_default()
}

/// Text before the first child element. Comments and processing instructions
/// are skipped, so the text around them is joined.
fn leading_text(node: Node<'_, '_>) -> String {
    node.children()
        .take_while(|child| !child.is_element())
        .filter(|child| child.is_text())
        .filter_map(|child| child.text())
        .collect()
}
