//! Character extraction from HTML documents.

use html5ever::{ParseOpts, parse_document, tendril::TendrilSink, tree_builder::TreeBuilderOpts};
use scraper::{ElementRef, Html, HtmlTreeSink};

use crate::CharacterSet;

/// Returns the distinct characters of a document's body text and inline scripts.
///
/// Body text is every text node under `<body>`, as the DOM's `textContent`
/// reports it, so markup and attribute values are ignored. Script text is
/// taken from every `<script>` element, including those in `<head>`. The
/// parser recovers from malformed markup the way browsers do, so this never
/// fails.
pub fn extract(document: &str) -> CharacterSet {
    let html = parse(document);
    let elements = || html.tree.root().descendants().filter_map(ElementRef::wrap);

    let body_text = elements()
        .find(|element| element.value().name() == "body")
        .into_iter()
        .flat_map(|body| body.text());
    let script_text = elements()
        .filter(|element| element.value().name() == "script")
        .flat_map(|script| script.text());

    body_text.chain(script_text).flat_map(str::chars).collect()
}

/// Parses with scripting disabled, so `<noscript>` content is markup rather than raw text.
fn parse(document: &str) -> Html {
    let opts = ParseOpts {
        tree_builder: TreeBuilderOpts { scripting_enabled: false, ..Default::default() },
        ..Default::default()
    };
    parse_document(HtmlTreeSink::new(Html::new_document()), opts).one(document)
}
