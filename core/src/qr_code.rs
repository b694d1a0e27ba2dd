//! QR codes for the per-session feedback links.

use std::io::Cursor;

use image::{DynamicImage, ImageFormat, Luma};
use qrcode::QrCode;

use crate::config::QrCodeConfig;
use crate::{Error, Result};

/// Renders text as a PNG QR code.
#[derive(Debug, Clone, Copy)]
pub struct QrCodeGenerator {
    width: u32,
    height: u32,
}

impl QrCodeGenerator {
    pub fn new(config: &QrCodeConfig) -> Self {
        QrCodeGenerator {
            width: config.width,
            height: config.height,
        }
    }

    /// The image is at least `width` x `height` pixels, quiet zone included.
    pub fn generate(&self, text: &str) -> Result<Vec<u8>> {
        let code = QrCode::new(text.as_bytes()).map_err(|e| Error::QrCode(e.to_string()))?;
        let image = code
            .render::<Luma<u8>>()
            .min_dimensions(self.width, self.height)
            .build();

        let mut png = Vec::new();
        DynamicImage::ImageLuma8(image)
            .write_to(&mut Cursor::new(&mut png), ImageFormat::Png)
            .map_err(|e| Error::QrCode(e.to_string()))?;
        Ok(png)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::GenericImageView;

    const PNG_MAGIC: &[u8] = b"\x89PNG\r\n\x1a\n";

    #[test]
    fn renders_png_of_requested_size() {
        let generator = QrCodeGenerator::new(&QrCodeConfig {
            width: 300,
            height: 300,
        });

        let png = generator
            .generate("https://openfeedback.io/conf/2019-11-15/42")
            .unwrap();

        assert!(png.starts_with(PNG_MAGIC));
        let image = image::load_from_memory(&png).unwrap();
        let (width, height) = image.dimensions();
        assert!(width >= 300 && height >= 300);
    }
}
