//! CLI definitions and the run summary.

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use fonttrim_core::{FontFormat, PipelineConfig, RunReport, run};
use log::{info, warn};

const RULE: &str = "═══════════════════════════════════════════════════════════════════════════════";

#[derive(Debug, Parser)]
#[command(name = "fonttrim")]
#[command(about = "Subset the font embedded in HTML documents to the characters they use")]
pub struct Cli {
    /// Source font (TTF, OTF, WOFF or WOFF2)
    pub input_font: PathBuf,

    /// Where to write the subset font; parent directories are created
    pub output_font: PathBuf,

    /// HTML documents or directories to scan and patch
    #[arg(required = true)]
    pub documents: Vec<PathBuf>,

    /// Output container [default: from OUTPUT_FONT extension, else woff2]
    #[arg(short, long)]
    pub format: Option<FontFormat>,

    /// Media type of the data URI to replace [default: the format's media type]
    #[arg(long)]
    pub media_type: Option<String>,

    /// Build the subset without writing the font or any document
    #[arg(long)]
    pub dry_run: bool,

    /// Log per-document details
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Default log filter when `RUST_LOG` is unset.
    pub fn log_filter(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }

    pub fn config(&self) -> PipelineConfig {
        let mut config = PipelineConfig::new(&self.input_font, &self.output_font, self.documents.clone())
            .dry_run(self.dry_run);
        if let Some(format) = self.format {
            config = config.with_format(format);
        }
        if let Some(media_type) = &self.media_type {
            config = config.with_media_type(media_type);
        }
        config
    }

    pub fn run(self) -> Result<()> {
        let config = self.config();

        println!("{RULE}");
        println!("fonttrim: {} → {} ({})", config.input_font.display(), config.output_font.display(), config.format);
        println!("{RULE}");

        info!("Scanning {} input paths", config.inputs.len());
        let report = run(config)?;
        print_summary(&report);

        if !report.unpatched.is_empty() {
            warn!(
                "{} of {} documents left unchanged (no embedded font): {}",
                report.unpatched.len(),
                report.documents.len(),
                report.unpatched.iter().map(|path| path.display().to_string()).collect::<Vec<_>>().join(", ")
            );
        }
        Ok(())
    }
}

fn print_summary(report: &RunReport) {
    println!("\n{RULE}");
    if report.dry_run {
        println!("✨ Dry run complete in {:.2}s (nothing written)", report.elapsed.as_secs_f64());
    } else {
        println!("✨ Subset complete in {:.2}s", report.elapsed.as_secs_f64());
        println!("   Output: {}", report.output_font.display());
    }
    println!("   Documents: {} processed, {} patched", report.documents.len(), report.patched);
    println!(
        "   Characters: {} ({} missing from font)",
        report.characters,
        report.missing.len()
    );
    println!(
        "   Size: {} → {} bytes ({:.1}% smaller)",
        report.input_size,
        report.output_size,
        report.reduction()
    );
    println!("{RULE}");
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_command_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_requires_a_document() {
        let err = Cli::try_parse_from(["fonttrim", "F.woff2", "out/F-subset.woff2"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::MissingRequiredArgument);
    }

    #[test]
    fn test_config_defaults() {
        let cli = Cli::try_parse_from(["fonttrim", "F.woff2", "out/F-subset.woff2", "a.html", "site"]).unwrap();
        let config = cli.config();

        assert_eq!(config.inputs, [PathBuf::from("a.html"), PathBuf::from("site")]);
        assert_eq!(config.format, FontFormat::Woff2);
        assert_eq!(config.media_type(), "application/font-woff2");
        assert!(!config.dry_run);
        assert_eq!(cli.log_filter(), "info");
    }

    #[test]
    fn test_config_overrides() {
        let cli = Cli::try_parse_from([
            "fonttrim",
            "F.ttf",
            "F-subset.bin",
            "a.html",
            "--format",
            "woff",
            "--media-type",
            "font/woff",
            "--dry-run",
            "-v",
        ])
        .unwrap();
        let config = cli.config();

        assert_eq!(config.format, FontFormat::Woff);
        assert_eq!(config.media_type(), "font/woff");
        assert!(config.dry_run);
        assert_eq!(cli.log_filter(), "debug");
    }

    #[test]
    fn test_rejects_unknown_format() {
        assert!(Cli::try_parse_from(["fonttrim", "F.ttf", "F.out", "a.html", "-f", "eot"]).is_err());
    }
}
