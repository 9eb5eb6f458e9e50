//! fonttrim core - shrink a font embedded in HTML documents to the characters they render.
//!
//! The pipeline collects documents, extracts the characters of their body
//! text and inline scripts, builds one font subset for the union, and
//! rewrites the base64 font data URI in every document.

pub mod charset;
pub mod collect;
pub mod config;
pub mod error;
pub mod extract;
pub mod io;
pub mod patch;
pub mod pipeline;
pub mod subset;

pub use charset::CharacterSet;
pub use collect::{collect, collect_one, find_documents, is_document};
pub use config::PipelineConfig;
pub use error::{Error, Result};
pub use extract::extract;
pub use fonttrim_font_woff2::FontFormat;
pub use patch::{FontPatcher, PatchTarget, encode_payload};
pub use pipeline::{Pipeline, RunReport, Stage, run};
pub use subset::{FontSubsetter, HarfBuzzSubsetter};
