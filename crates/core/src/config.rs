//! Configuration for fonttrim runs.

use std::path::PathBuf;

use fonttrim_font_woff2::FontFormat;

/// Suffix a file name must end with to be treated as an HTML document.
pub const DOCUMENT_EXTENSION: &str = ".html";

/// Charset annotation of the embedded font data URI.
pub const DATA_URI_CHARSET: &str = "utf-8";

/// Settings for one pipeline run: one source font, one output font, many documents.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub input_font: PathBuf,
    pub output_font: PathBuf,
    pub inputs: Vec<PathBuf>,
    pub format: FontFormat,
    pub media_type: Option<String>,
    pub dry_run: bool,
}

impl PipelineConfig {
    /// Creates a configuration whose output format follows the output file
    /// extension, falling back to WOFF2.
    pub fn new(input_font: impl Into<PathBuf>, output_font: impl Into<PathBuf>, inputs: Vec<PathBuf>) -> Self {
        let output_font = output_font.into();
        let format = FontFormat::from_path(&output_font).unwrap_or_default();
        Self {
            input_font: input_font.into(),
            output_font,
            inputs,
            format,
            media_type: None,
            dry_run: false,
        }
    }

    pub fn with_format(mut self, format: FontFormat) -> Self {
        self.format = format;
        self
    }

    /// Overrides the media type matched in document data URIs.
    pub fn with_media_type(mut self, media_type: impl Into<String>) -> Self {
        self.media_type = Some(media_type.into());
        self
    }

    /// Computes everything but writes neither the font nor the documents.
    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Media type of the embedded font reference to replace.
    pub fn media_type(&self) -> &str {
        self.media_type.as_deref().unwrap_or(self.format.media_type())
    }
}
