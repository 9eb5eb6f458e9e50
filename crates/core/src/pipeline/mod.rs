//! The subset pipeline: collect documents, extract characters, build one
//! subset, patch every document with it.

mod report;

use std::{fmt, path::PathBuf, time::Instant};

use log::{debug, error, info, warn};

pub use report::RunReport;

use crate::{
    CharacterSet, Error, FontPatcher, FontSubsetter, HarfBuzzSubsetter, PipelineConfig, Result,
    collect, encode_payload,
    io::{Document, FontFile},
};

/// Pipeline states, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Init,
    Collecting,
    Extracting,
    Subsetting,
    Patching,
    Done,
}

impl Stage {
    /// Stages that do work; `Done` only marks completion.
    pub const STEPS: [Stage; 5] = [Stage::Init, Stage::Collecting, Stage::Extracting, Stage::Subsetting, Stage::Patching];

    pub fn name(self) -> &'static str {
        match self {
            Self::Init => "init",
            Self::Collecting => "collect-documents",
            Self::Extracting => "extract-characters",
            Self::Subsetting => "subset-font",
            Self::Patching => "patch-documents",
            Self::Done => "done",
        }
    }

    fn number(self) -> usize {
        Self::STEPS.iter().position(|&stage| stage == self).map_or(Self::STEPS.len(), |i| i + 1)
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Run a pipeline stage with timing
fn run_stage<T>(stage: Stage, f: impl FnOnce() -> Result<T>) -> Result<T> {
    println!("\n[{}/{}] {}", stage.number(), Stage::STEPS.len(), stage);
    let start = Instant::now();
    match f() {
        Ok(value) => {
            println!("  ✓ {} ({:.2}s)", stage, start.elapsed().as_secs_f64());
            Ok(value)
        }
        Err(err) => {
            error!("Stage {stage} failed: {err}");
            Err(err)
        }
    }
}

struct Prepared {
    font: Vec<u8>,
    output: FontFile,
    patcher: FontPatcher,
}

/// One source font, one output font, many documents.
#[derive(Debug, Clone)]
pub struct Pipeline<S = HarfBuzzSubsetter> {
    config: PipelineConfig,
    subsetter: S,
}

impl Pipeline<HarfBuzzSubsetter> {
    pub fn new(config: PipelineConfig) -> Self {
        Self::with_subsetter(config, HarfBuzzSubsetter::new())
    }
}

impl<S: FontSubsetter> Pipeline<S> {
    pub fn with_subsetter(config: PipelineConfig, subsetter: S) -> Self {
        Self { config, subsetter }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    pub fn subsetter(&self) -> &S {
        &self.subsetter
    }

    /// Runs every stage in order; the first error aborts the run.
    ///
    /// Nothing is written before the subset font has been built. A failure
    /// while patching leaves already patched documents as they are.
    pub fn run(&self) -> Result<RunReport> {
        let start = Instant::now();
        let config = &self.config;

        let prepared = run_stage(Stage::Init, || self.init())?;
        let documents = run_stage(Stage::Collecting, || {
            let documents = collect(config.inputs.as_slice())?;
            info!("Found {} documents", documents.len());
            Ok(documents)
        })?;
        let characters = run_stage(Stage::Extracting, || extract_all(&documents))?;
        let (subset, missing) = run_stage(Stage::Subsetting, || self.build_subset(&prepared, &characters))?;
        let (patched, unpatched) = run_stage(Stage::Patching, || self.patch_all(&prepared, &documents, &subset))?;

        debug!("Pipeline reached stage {}", Stage::Done);
        Ok(RunReport {
            documents,
            characters: characters.len(),
            missing,
            input_size: prepared.font.len(),
            output_size: subset.len(),
            output_font: prepared.output.path().to_path_buf(),
            patched,
            unpatched,
            dry_run: config.dry_run,
            elapsed: start.elapsed(),
        })
    }

    fn init(&self) -> Result<Prepared> {
        let config = &self.config;
        if config.inputs.is_empty() {
            return Err(Error::Usage("At least one document or directory is required".to_string()));
        }

        let font = FontFile::new(&config.input_font).read()?;
        info!("Read {} ({} bytes)", config.input_font.display(), font.len());

        let patcher = FontPatcher::new(config.media_type())?;
        debug!("Matching data URIs of type {}", patcher.media_type());

        let output = FontFile::new(&config.output_font);
        if !config.dry_run {
            output.ensure_parent_dir()?;
        }

        Ok(Prepared { font, output, patcher })
    }

    fn build_subset(&self, prepared: &Prepared, characters: &CharacterSet) -> Result<(Vec<u8>, Vec<char>)> {
        let format = self.config.format;
        let subset = self.subsetter.subset(&prepared.font, characters, format)?;

        let missing = self.subsetter.missing_characters(&prepared.font, characters).unwrap_or_else(|err| {
            warn!("Could not check glyph coverage: {err}");
            Vec::new()
        });
        for &c in &missing {
            warn!("Font has no glyph for U+{:04X} {c:?}", c as u32);
        }

        if self.config.dry_run {
            info!("Dry run: not writing {}", prepared.output.path().display());
        } else {
            prepared.output.write(&subset)?;
            info!("Wrote {} ({} bytes, {format})", prepared.output.path().display(), subset.len());
        }

        Ok((subset, missing))
    }

    fn patch_all(&self, prepared: &Prepared, documents: &[PathBuf], subset: &[u8]) -> Result<(usize, Vec<PathBuf>)> {
        let payload = encode_payload(subset);
        let mut patched = 0;
        let mut unpatched = Vec::new();

        for path in documents {
            let document = Document::new(path);
            let mut target = prepared.patcher.locate(document.read_for_patch()?);

            if !target.has_embedded_font() {
                warn!("No embedded {} font in {}", prepared.patcher.media_type(), path.display());
                unpatched.push(path.clone());
                continue;
            }

            if !self.config.dry_run {
                target.replace_payload(&payload);
                document.write(target.content())?;
            }
            debug!("Patched {}", path.display());
            patched += 1;
        }

        info!("Patched {patched} of {} documents", documents.len());
        Ok((patched, unpatched))
    }
}

fn extract_all(documents: &[PathBuf]) -> Result<CharacterSet> {
    let mut characters = CharacterSet::new();
    for path in documents {
        let before = characters.len();
        characters.extend_from_document(&Document::new(path).read_for_extraction()?);
        debug!("{}: {} new characters", path.display(), characters.len() - before);
    }
    info!("Collected {} distinct characters", characters.len());
    Ok(characters)
}

/// Runs the pipeline with the HarfBuzz subsetter.
pub fn run(config: PipelineConfig) -> Result<RunReport> {
    Pipeline::new(config).run()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_numbers() {
        assert_eq!(Stage::Init.number(), 1);
        assert_eq!(Stage::Patching.number(), 5);
        assert_eq!(Stage::Subsetting.to_string(), "subset-font");
    }

    #[test]
    fn test_empty_inputs_are_a_usage_error() {
        let config = PipelineConfig::new("F.woff2", "out/F-subset.woff2", vec![]);
        let err = run(config).unwrap_err();
        assert!(matches!(err, Error::Usage(_)));
    }
}
