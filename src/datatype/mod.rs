//! Data types

mod qcs;
mod replication_configuration;
mod storage_class;
mod versioning_configuration;

pub use qcs::Qcs;
pub use replication_configuration::{
    ReplicationConfiguration, ReplicationDestination, ReplicationRule, ReplicationRuleStatus,
};
pub use storage_class::StorageClass;
pub use versioning_configuration::{VersioningConfiguration, VersioningStatus};

use quick_xml::events::{BytesText, Event};
use quick_xml::{Reader, Writer};
use serde::de::DeserializeOwned;

use crate::error::{Result, XmlError};

/// Parse a response body of the COS XML api.
pub trait FromXml: Sized {
    fn from_xml(v: String) -> Result<Self>;
}

/// Serialize a request body of the COS XML api.
pub trait ToXml {
    fn to_xml(&self) -> Result<String>;
}

/// Deserialize a COS XML document, keeping the whitespace at both ends of
/// element text. `<Prefix> logs/ </Prefix>` gives `" logs/ "`.
pub(crate) fn from_xml_str<T: DeserializeOwned>(xml: &str) -> Result<T> {
    let xml = escape_text_edges(xml)?;
    Ok(quick_xml::de::from_str(&xml).map_err(XmlError::from)?)
}

/// The deserializer trims raw text, so leading and trailing whitespace of
/// leaf text is rewritten as character references, which it unescapes as is.
fn escape_text_edges(xml: &str) -> std::result::Result<String, XmlError> {
    let mut reader = Reader::from_str(xml);
    let mut events = Vec::new();
    loop {
        match reader.read_event().map_err(|e| XmlError::new(e.to_string()))? {
            Event::Eof => break,
            event => events.push(event),
        }
    }

    let mut writer = Writer::new(Vec::with_capacity(xml.len()));
    for (i, event) in events.iter().enumerate() {
        let leaf = i > 0
            && matches!(events[i - 1], Event::Start(_))
            && matches!(events.get(i + 1), Some(Event::End(_)));
        let written = match event {
            Event::Text(text) if leaf => {
                let raw = std::str::from_utf8(text).map_err(|e| XmlError::new(e.to_string()))?;
                writer.write_event(Event::Text(BytesText::from_escaped(escape_edges(raw))))
            }
            event => writer.write_event(event),
        };
        written.map_err(|e| XmlError::new(e.to_string()))?;
    }
    String::from_utf8(writer.into_inner()).map_err(|e| XmlError::new(e.to_string()))
}

fn escape_edges(raw: &str) -> String {
    let is_space = |c: char| matches!(c, ' ' | '\t' | '\n' | '\r');
    let start = raw.len() - raw.trim_start_matches(is_space).len();
    let end = raw.trim_end_matches(is_space).len().max(start);
    if start == 0 && end == raw.len() {
        return raw.to_owned();
    }
    let mut escaped = String::with_capacity(raw.len() + 8 * (start + raw.len() - end));
    raw[..start].bytes().for_each(|b| escaped.push_str(&format!("&#{b};")));
    escaped.push_str(&raw[start..end]);
    raw[end..].bytes().for_each(|b| escaped.push_str(&format!("&#{b};")));
    escaped
}

#[cfg(test)]
mod tests {
    use super::escape_edges;

    #[test]
    fn test_escape_edges() {
        assert_eq!(escape_edges("logs/"), "logs/");
        assert_eq!(escape_edges(" logs/ "), "&#32;logs/&#32;");
        assert_eq!(escape_edges("\tx"), "&#9;x");
        assert_eq!(escape_edges("a b"), "a b");
        assert_eq!(escape_edges("  "), "&#32;&#32;");
        assert_eq!(escape_edges("a&amp;b "), "a&amp;b&#32;");
    }
}
