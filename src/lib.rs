use std::{
    collections::HashMap,
    fs,
    path::{Path, PathBuf},
};

mod error;
pub mod listing;
pub mod mask;
pub mod recognizer;
mod result;
pub mod sanitize;
pub mod util;

use image::DynamicImage;
use tracing::instrument;

pub use error::{Error, Result};
pub use mask::ColorRange;
pub use recognizer::{TesseractOptions, TesseractRecognizer, TextRecognizer};
pub use result::*;

pub struct RenamerBuilder {
    color_range: ColorRange,
    extension: String,
    lang: String,
    psm: i32,
    oem: i32,
    dpi: Option<i32>,
    config_variables: HashMap<String, String>,
    scale_factor: f32,
}

impl RenamerBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn color_range(mut self, range: ColorRange) -> Self {
        self.color_range = range;
        self
    }

    pub fn extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into();
        self
    }

    pub fn lang(mut self, lang: impl Into<String>) -> Self {
        self.lang = lang.into();
        self
    }

    pub fn psm(mut self, psm: i32) -> Self {
        self.psm = psm;
        self
    }

    pub fn oem(mut self, oem: i32) -> Self {
        self.oem = oem;
        self
    }

    pub fn dpi(mut self, dpi: Option<i32>) -> Self {
        self.dpi = dpi;
        self
    }

    pub fn config_variable(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.config_variables.insert(key.into(), value.into());
        self
    }

    /// Upscale the mask before OCR. Tesseract reads small glyphs poorly.
    ///
    /// Clamped to `mask::MIN_SCALE..=mask::MAX_SCALE`; non-finite factors disable scaling.
    pub fn scale_factor(mut self, factor: f32) -> Self {
        self.scale_factor = mask::clamp_scale(factor);
        self
    }

    /// Files a pass over `folder` would visit. Needs no OCR engine.
    pub fn files(&self, folder: &Path) -> Result<Vec<PathBuf>> {
        util::image_files(folder, &self.extension)
    }

    fn tesseract_options(&mut self) -> TesseractOptions {
        TesseractOptions {
            lang: std::mem::take(&mut self.lang),
            psm: self.psm,
            oem: self.oem,
            dpi: self.dpi,
            config_variables: std::mem::take(&mut self.config_variables),
        }
    }

    /// Builds a renamer backed by the system tesseract install.
    #[instrument(skip(self))]
    pub fn build(mut self) -> Result<Renamer<TesseractRecognizer>> {
        let recognizer = TesseractRecognizer::new(self.tesseract_options())?;
        Ok(self.build_with(recognizer))
    }

    /// Builds a renamer around any OCR engine. Tesseract-specific settings are ignored.
    pub fn build_with<R: TextRecognizer>(self, recognizer: R) -> Renamer<R> {
        Renamer {
            recognizer,
            color_range: self.color_range,
            extension: self.extension,
            scale_factor: self.scale_factor,
        }
    }
}

impl Default for RenamerBuilder {
    fn default() -> Self {
        let tesseract = TesseractOptions::default();
        Self {
            color_range: ColorRange::default(),
            extension: "png".to_string(),
            lang: tesseract.lang,
            psm: tesseract.psm,
            oem: tesseract.oem,
            dpi: tesseract.dpi,
            config_variables: tesseract.config_variables,
            scale_factor: 1.0,
        }
    }
}

/// Names screenshots after the colored text they contain.
pub struct Renamer<R> {
    recognizer: R,
    color_range: ColorRange,
    extension: String,
    scale_factor: f32,
}

impl<R: TextRecognizer> Renamer<R> {
    pub fn extension(&self) -> &str {
        &self.extension
    }

    /// Files a pass over `folder` would visit.
    pub fn files(&self, folder: &Path) -> Result<Vec<PathBuf>> {
        util::image_files(folder, &self.extension)
    }

    /// OCRs the pixels of `image` within the color range and sanitizes the result.
    pub fn read_text(&self, image: &DynamicImage) -> Result<Option<String>> {
        let mask = mask::color_mask(image, &self.color_range);
        let selected = mask::coverage(&mask);
        tracing::debug!(selected, total = mask.pixels().len(), "built color mask");
        if selected == 0 {
            return Ok(None);
        }
        let mask = mask::scale_mask(mask, self.scale_factor);
        let raw = self.recognizer.recognize(&DynamicImage::ImageLuma8(mask))?;
        tracing::debug!(?raw, "recognized");
        Ok(sanitize::sanitize(&raw))
    }

    /// Opens the image at `path` and reads its colored text.
    pub fn extract_text(&self, path: &Path) -> Result<Option<String>> {
        let image = image::open(path)?;
        self.read_text(&image)
    }

    /// Extracts the text of one file and renames it, or just plans to in a dry run.
    #[instrument(skip(self, path), fields(file = %path.display()))]
    pub fn process_file(&self, path: &Path, mode: Mode) -> FileOutcome {
        let text = match self.extract_text(path) {
            Ok(Some(text)) => text,
            Ok(None) => return FileOutcome::NoText,
            Err(error) => {
                tracing::warn!(%error, "failed to process image");
                return FileOutcome::ProcessingFailed(error);
            }
        };

        let target = util::target_path(path, &text, &self.extension);
        if target == path {
            return FileOutcome::Unchanged;
        }
        if target.exists() {
            return FileOutcome::Collision { target };
        }

        match mode {
            Mode::DryRun => FileOutcome::WouldRename { to: target },
            Mode::Execute => match fs::rename(path, &target) {
                Ok(()) => FileOutcome::Renamed { to: target },
                Err(error) => {
                    tracing::warn!(%error, target = %target.display(), "rename failed");
                    FileOutcome::RenameFailed { to: target, error }
                }
            },
        }
    }

    /// Processes every file in `files` in order, reporting each outcome to `on_outcome`.
    pub fn process_files<F>(&self, files: &[PathBuf], mode: Mode, mut on_outcome: F) -> RenameSummary
    where
        F: FnMut(&Path, &FileOutcome),
    {
        let mut summary = RenameSummary::new(mode);
        for path in files {
            let outcome = self.process_file(path, mode);
            on_outcome(path, &outcome);
            summary.record(&outcome);
        }
        summary
    }

    /// Runs a full pass over `folder`.
    #[instrument(skip(self, folder, on_outcome), fields(folder = %folder.display()))]
    pub fn rename_all<F>(&self, folder: &Path, mode: Mode, on_outcome: F) -> Result<RenameSummary>
    where
        F: FnMut(&Path, &FileOutcome),
    {
        let files = self.files(folder)?;
        Ok(self.process_files(&files, mode, on_outcome))
    }
}
