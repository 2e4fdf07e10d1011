use std::collections::HashMap;

use image::DynamicImage;
use rusty_tesseract::{Args, Image};
use tracing::instrument;

use crate::{Error, Result};

/// Something that turns an image into text.
pub trait TextRecognizer {
    fn recognize(&self, image: &DynamicImage) -> Result<String>;
}

impl<T: TextRecognizer + ?Sized> TextRecognizer for &T {
    fn recognize(&self, image: &DynamicImage) -> Result<String> {
        (**self).recognize(image)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TesseractOptions {
    pub lang: String,
    /// Page segmentation mode. 6 treats the image as a single uniform block of text.
    pub psm: i32,
    pub oem: i32,
    pub dpi: Option<i32>,
    pub config_variables: HashMap<String, String>,
}

impl Default for TesseractOptions {
    fn default() -> Self {
        Self {
            lang: "eng".to_string(),
            psm: 6,
            oem: 3,
            dpi: None,
            config_variables: HashMap::new(),
        }
    }
}

/// OCR backed by the system `tesseract` binary.
#[derive(Debug, Clone)]
pub struct TesseractRecognizer {
    options: TesseractOptions,
}

impl TesseractRecognizer {
    /// Fails when no `tesseract` executable can be run.
    pub fn new(options: TesseractOptions) -> Result<Self> {
        let version = Self::version()?;
        tracing::debug!(%version, "found tesseract");
        Ok(Self { options })
    }

    pub fn is_available() -> bool {
        Self::version().is_ok()
    }

    fn version() -> Result<String> {
        rusty_tesseract::get_tesseract_version()
            .map_err(|e| Error::TesseractUnavailable(e.to_string()))
    }

    fn args(&self) -> Args {
        Args {
            lang: self.options.lang.clone(),
            config_variables: self.options.config_variables.clone(),
            dpi: self.options.dpi,
            psm: Some(self.options.psm),
            oem: Some(self.options.oem),
        }
    }
}

impl TextRecognizer for TesseractRecognizer {
    #[instrument(level = "debug", skip_all, fields(width = image.width(), height = image.height()))]
    fn recognize(&self, image: &DynamicImage) -> Result<String> {
        let image = Image::from_dynamic_image(image)
            .map_err(|e| Error::Ocr(format!("failed to prepare image: {e}")))?;
        rusty_tesseract::image_to_string(&image, &self.args()).map_err(|e| Error::Ocr(e.to_string()))
    }
}
