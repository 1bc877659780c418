//! Decoded signature image, ready for placement on the certificate.

use super::GeneratorError;

/// A decoded hand-drawn signature.
///
/// The raster is held as separate RGB and alpha planes because the PDF
/// image XObject carries opacity in a soft mask rather than interleaved
/// with the color samples.
#[derive(Debug, Clone)]
pub struct SignatureImage {
    width: u32,
    height: u32,
    rgb: Vec<u8>,
    alpha: Vec<u8>,
}

impl SignatureImage {
    /// Decode signature bytes (PNG or JPEG) into placement-ready planes.
    pub fn decode(bytes: &[u8]) -> Result<Self, GeneratorError> {
        let img = image::load_from_memory(bytes)
            .map_err(GeneratorError::SignatureDecode)?
            .to_rgba8();
        let (width, height) = img.dimensions();

        let mut rgb = Vec::with_capacity((width * height * 3) as usize);
        let mut alpha = Vec::with_capacity((width * height) as usize);
        for pixel in img.pixels() {
            rgb.push(pixel[0]);
            rgb.push(pixel[1]);
            rgb.push(pixel[2]);
            alpha.push(pixel[3]);
        }

        Ok(Self { width, height, rgb, alpha })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Dimensions after uniform scaling to `target_width` points. The
    /// aspect ratio of the source raster is preserved.
    pub fn scaled_to_width(&self, target_width: f64) -> (f64, f64) {
        let factor = target_width / self.width as f64;
        (target_width, self.height as f64 * factor)
    }

    pub(crate) fn rgb_plane(&self) -> &[u8] {
        &self.rgb
    }

    pub(crate) fn alpha_plane(&self) -> &[u8] {
        &self.alpha
    }
}
