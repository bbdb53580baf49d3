//! Images and sound files loaded from the asset directory, with generated
//! stand-ins for anything that cannot be read.

use std::path::{Path, PathBuf};

use image::imageops::{self, FilterType};
use image::{Rgb, RgbImage};
use thiserror::Error;

use crate::game::Court;

pub const BACKGROUND_FILE: &str = "g-img.jpg";
pub const COURT_FILE: &str = "pl-img.jpg";

const BORDER_WIDTH: u32 = 10;
const BORDER_COLOR: Rgb<u8> = Rgb([50, 50, 255]);
const DASH_WIDTH: u32 = 4;
const DASH_LENGTH: u32 = 20;
const DASH_PERIOD: u32 = 40;
const DASH_START: u32 = 30;

#[derive(Debug, Error)]
pub enum AssetError {
    #[error("failed to load image {}", path.display())]
    Image {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    #[cfg(feature = "audio")]
    #[error("failed to read sound {}", path.display())]
    SoundIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[cfg(feature = "audio")]
    #[error("failed to decode sound {}", path.display())]
    SoundDecode {
        path: PathBuf,
        #[source]
        source: rodio::decoder::DecoderError,
    },
    #[cfg(feature = "audio")]
    #[error("no audio output device")]
    NoOutput(#[from] rodio::StreamError),
    #[error("built without the `audio` feature")]
    AudioDisabled,
}

/// A full-screen image plus a copy scaled to the last requested size.
pub struct Backdrop {
    source: RgbImage,
    scaled: Option<RgbImage>,
}

impl Backdrop {
    pub fn new(source: RgbImage) -> Self {
        Self {
            source,
            scaled: None,
        }
    }

    pub fn load(path: &Path) -> Result<Self, AssetError> {
        let image = image::open(path).map_err(|source| AssetError::Image {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::new(image.to_rgb8()))
    }

    /// Loads `path`, or builds `fallback` if that fails.
    pub fn load_or(path: &Path, fallback: impl FnOnce() -> RgbImage) -> Self {
        match Self::load(path) {
            Ok(backdrop) => {
                tracing::info!(path = %path.display(), "loaded image");
                backdrop
            }
            Err(err) => {
                tracing::warn!(error = %err, "using generated image instead");
                Self::new(fallback())
            }
        }
    }

    /// The image resized to `width` x `height`. Area filtering keeps thin
    /// lines visible when shrinking; the result is reused until the size
    /// changes.
    pub fn fit(&mut self, width: u32, height: u32) -> &RgbImage {
        let stale = self
            .scaled
            .as_ref()
            .map_or(true, |img| img.dimensions() != (width, height));
        if stale {
            let scaled = if self.source.dimensions() == (width, height) {
                self.source.clone()
            } else {
                imageops::resize(&self.source, width, height, FilterType::Triangle)
            };
            self.scaled = Some(scaled);
        }
        self.scaled.get_or_insert_with(RgbImage::default)
    }
}

/// Vertical blue gradient used behind the menu.
pub fn gradient(court: &Court) -> RgbImage {
    let (width, height) = court_size(court);
    RgbImage::from_fn(width, height, |_, y| {
        let blue = 100 + 155 * y / height;
        Rgb([50, 50, blue as u8])
    })
}

/// Black court with a blue frame and a dashed white centre line.
pub fn court_lines(court: &Court) -> RgbImage {
    let (width, height) = court_size(court);
    let dash_left = width / 2 - DASH_WIDTH / 2;
    RgbImage::from_fn(width, height, |x, y| {
        let border = x < BORDER_WIDTH
            || y < BORDER_WIDTH
            || x >= width - BORDER_WIDTH
            || y >= height - BORDER_WIDTH;
        if border {
            return BORDER_COLOR;
        }
        if is_dash(x, y, dash_left) {
            return Rgb([255, 255, 255]);
        }
        Rgb([0, 0, 0])
    })
}

fn is_dash(x: u32, y: u32, dash_left: u32) -> bool {
    (dash_left..dash_left + DASH_WIDTH).contains(&x)
        && y >= DASH_START
        && (y - DASH_START) % DASH_PERIOD < DASH_LENGTH
}

fn court_size(court: &Court) -> (u32, u32) {
    (court.width as u32, court.height as u32)
}

pub struct Assets {
    pub background: Backdrop,
    pub court: Backdrop,
}

impl Assets {
    pub fn load(dir: &Path, court: &Court) -> Self {
        Self {
            background: Backdrop::load_or(&dir.join(BACKGROUND_FILE), || gradient(court)),
            court: Backdrop::load_or(&dir.join(COURT_FILE), || court_lines(court)),
        }
    }

    /// Generated images only; nothing is read from disk.
    #[cfg(test)]
    pub fn generated(court: &Court) -> Self {
        Self {
            background: Backdrop::new(gradient(court)),
            court: Backdrop::new(court_lines(court)),
        }
    }
}
