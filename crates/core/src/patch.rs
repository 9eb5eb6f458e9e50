//! Rewriting of the embedded font data URI in HTML documents.

use std::ops::Range;

use base64::{Engine, engine::general_purpose::STANDARD};
use regex::Regex;

use crate::{Error, Result, config::DATA_URI_CHARSET};

/// Encodes font bytes as a padded standard base64 data URI payload.
pub fn encode_payload(font: &[u8]) -> String {
    STANDARD.encode(font)
}

/// Locates and replaces the payload of `url(data:<media type>;charset=utf-8;base64,...)`.
#[derive(Debug, Clone)]
pub struct FontPatcher {
    media_type: String,
    pattern: Regex,
}

impl FontPatcher {
    pub fn new(media_type: impl Into<String>) -> Result<Self> {
        let media_type = media_type.into();
        let pattern = format!(
            r"url\(data:{};charset={};base64,(?P<payload>[^)]*)\)",
            regex::escape(&media_type),
            regex::escape(DATA_URI_CHARSET),
        );
        let pattern = Regex::new(&pattern)
            .map_err(|err| Error::Usage(format!("Invalid media type '{media_type}': {err}")))?;
        Ok(Self { media_type, pattern })
    }

    pub fn media_type(&self) -> &str {
        &self.media_type
    }

    /// Finds the payload span of the first embedded font reference.
    pub fn locate(&self, content: String) -> PatchTarget {
        let payload = self
            .pattern
            .captures(&content)
            .and_then(|captures| captures.name("payload"))
            .map(|payload| payload.range());
        PatchTarget { content, payload }
    }

    /// Returns `document` with the first embedded font replaced by `font`.
    ///
    /// A document without an embedded font is returned unchanged.
    pub fn patch(&self, document: &str, font: &[u8]) -> String {
        let mut target = self.locate(document.to_owned());
        target.replace_payload(&encode_payload(font));
        target.into_content()
    }
}

/// A document's text and the span of its embedded font payload, if any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatchTarget {
    content: String,
    payload: Option<Range<usize>>,
}

impl PatchTarget {
    pub fn payload_span(&self) -> Option<Range<usize>> {
        self.payload.clone()
    }

    pub fn has_embedded_font(&self) -> bool {
        self.payload.is_some()
    }

    /// The current base64 payload.
    pub fn payload(&self) -> Option<&str> {
        self.payload.clone().map(|span| &self.content[span])
    }

    /// Swaps the payload for `payload`, keeping every other byte.
    ///
    /// Returns `false` when there is nothing to replace.
    pub fn replace_payload(&mut self, payload: &str) -> bool {
        let Some(span) = self.payload.take() else {
            return false;
        };
        let start = span.start;
        self.content.replace_range(span, payload);
        self.payload = Some(start..start + payload.len());
        true
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn into_content(self) -> String {
        self.content
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WOFF2: &str = "application/font-woff2";

    fn document(payload: &str) -> String {
        format!(
            "<html><head><style>@font-face {{ font-family: F; \
             src: url(data:application/font-woff2;charset=utf-8;base64,{payload}) format('woff2'); }}\
             </style></head><body>Hello</body></html>"
        )
    }

    #[test]
    fn test_encode_payload_is_padded() {
        assert_eq!(encode_payload(b"ab"), "YWI=");
        assert_eq!(encode_payload(b""), "");
    }

    #[test]
    fn test_only_payload_changes() {
        let patcher = FontPatcher::new(WOFF2).unwrap();
        let patched = patcher.patch(&document("T0xE"), b"new font");

        assert_eq!(patched, document(&encode_payload(b"new font")));
    }

    #[test]
    fn test_patch_is_idempotent() {
        let patcher = FontPatcher::new(WOFF2).unwrap();
        let once = patcher.patch(&document("T0xE"), b"font");
        let twice = patcher.patch(&once, b"font");

        assert_eq!(once, twice);
    }

    #[test]
    fn test_no_match_is_unchanged() {
        let patcher = FontPatcher::new(WOFF2).unwrap();
        let plain = "<html><body>No fonts here</body></html>";
        assert_eq!(patcher.patch(plain, b"font"), plain);

        let other_type = "<style>src: url(data:font/ttf;charset=utf-8;base64,AAAA)</style>";
        assert_eq!(patcher.patch(other_type, b"font"), other_type);

        let no_charset = "<style>src: url(data:application/font-woff2;base64,AAAA)</style>";
        assert_eq!(patcher.patch(no_charset, b"font"), no_charset);
    }

    #[test]
    fn test_only_first_match_is_replaced() {
        let patcher = FontPatcher::new(WOFF2).unwrap();
        let uri = |payload: &str| format!("url(data:application/font-woff2;charset=utf-8;base64,{payload})");
        let original = format!("{} {}", uri("AAAA"), uri("BBBB"));

        let patched = patcher.patch(&original, b"ab");

        assert_eq!(patched, format!("{} {}", uri("YWI="), uri("BBBB")));
    }

    #[test]
    fn test_empty_payload_is_replaced() {
        let patcher = FontPatcher::new(WOFF2).unwrap();
        assert_eq!(patcher.patch(&document(""), b"ab"), document("YWI="));
    }

    #[test]
    fn test_locate_reports_span() {
        let patcher = FontPatcher::new(WOFF2).unwrap();
        let mut target = patcher.locate(document("T0xE"));

        assert!(target.has_embedded_font());
        assert_eq!(target.payload(), Some("T0xE"));

        assert!(target.replace_payload("QUJDREVG"));
        assert_eq!(target.payload(), Some("QUJDREVG"));
        assert_eq!(target.content(), document("QUJDREVG"));
    }

    #[test]
    fn test_locate_without_font() {
        let patcher = FontPatcher::new(WOFF2).unwrap();
        let mut target = patcher.locate("<p>plain</p>".to_owned());

        assert!(!target.has_embedded_font());
        assert_eq!(target.payload_span(), None);
        assert!(!target.replace_payload("AAAA"));
        assert_eq!(target.into_content(), "<p>plain</p>");
    }

    #[test]
    fn test_media_type_is_escaped() {
        let patcher = FontPatcher::new("font/woff2+x").unwrap();
        assert_eq!(patcher.media_type(), "font/woff2+x");

        let literal = "url(data:font/woff2+x;charset=utf-8;base64,AAAA)";
        let regex_like = "url(data:font/woff22x;charset=utf-8;base64,AAAA)";
        assert_eq!(patcher.patch(literal, b"ab"), "url(data:font/woff2+x;charset=utf-8;base64,YWI=)");
        assert_eq!(patcher.patch(regex_like, b"ab"), regex_like);
    }
}
