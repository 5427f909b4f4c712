//! # Decoder Module
//!
//! Turns validated upload bytes into capped pixel grids.
//!
//! Uses zune-jpeg for JPEG payloads (1.5-2x faster than image crate),
//! falls back to the image crate for other formats. Images larger than
//! [`MAX_DIMENSION`] on either side are downscaled with SIMD-accelerated
//! resizing before any detector sees them.

use crate::error::DecodeError;
use fast_image_resize::{images::Image, PixelType, ResizeOptions, Resizer};
use image::{DynamicImage, GrayImage, ImageBuffer, Rgb, RgbImage, Rgba};
use zune_core::colorspace::ColorSpace;
use zune_core::options::DecoderOptions;
use zune_jpeg::JpegDecoder;

/// Maximum width/height after decoding; larger images are downscaled
pub const MAX_DIMENSION: u32 = 4096;

/// Hard pixel budget (prevents decompression bombs)
pub const MAX_PIXELS: u64 = 50_000_000;

/// A decoded image ready for analysis.
///
/// Detectors share this read-only: RGB for color/saturation/aberration
/// measurements, luma for everything spatial.
pub struct DecodedImage {
    pub rgb: RgbImage,
    pub luma: GrayImage,
}

impl DecodedImage {
    /// Build from an RGB buffer, deriving the luma plane
    pub fn from_rgb(rgb: RgbImage) -> Self {
        let luma = DynamicImage::ImageRgb8(rgb.clone()).to_luma8();
        Self { rgb, luma }
    }

    pub fn width(&self) -> u32 {
        self.rgb.width()
    }

    pub fn height(&self) -> u32 {
        self.rgb.height()
    }
}

/// Decode image bytes into a capped `DecodedImage`.
///
/// JPEG payloads take the zune-jpeg fast path and fall back to the image
/// crate on failure; everything else goes straight to the image crate.
pub fn decode(bytes: &[u8]) -> Result<DecodedImage, DecodeError> {
    let dynamic = if bytes.starts_with(&[0xFF, 0xD8, 0xFF]) {
        decode_jpeg(bytes).or_else(|_| decode_fallback(bytes))?
    } else {
        decode_fallback(bytes)?
    };

    let (width, height) = (dynamic.width(), dynamic.height());
    if width == 0 || height == 0 {
        return Err(DecodeError::EmptyImage);
    }

    let pixels = width as u64 * height as u64;
    if pixels > MAX_PIXELS {
        return Err(DecodeError::TooManyPixels {
            pixels,
            max: MAX_PIXELS,
        });
    }

    let rgb = if width > MAX_DIMENSION || height > MAX_DIMENSION {
        downscale_to_cap(&dynamic)?
    } else {
        dynamic.to_rgb8()
    };

    Ok(DecodedImage::from_rgb(rgb))
}

/// Fast JPEG decoding using zune-jpeg
fn decode_jpeg(bytes: &[u8]) -> Result<DynamicImage, DecodeError> {
    let options = DecoderOptions::new_fast().jpeg_set_out_colorspace(ColorSpace::RGB);
    let mut decoder = JpegDecoder::new_with_options(bytes, options);

    let pixels = decoder.decode().map_err(|e| DecodeError::Malformed {
        reason: format!("zune-jpeg decode failed: {:?}", e),
    })?;

    let info = decoder.info().ok_or_else(|| DecodeError::Malformed {
        reason: "Failed to get image info".to_string(),
    })?;

    let width = info.width as u32;
    let height = info.height as u32;
    let out_colorspace = decoder.get_output_colorspace().unwrap_or(ColorSpace::RGB);

    match out_colorspace {
        ColorSpace::RGB => {
            let buffer: ImageBuffer<Rgb<u8>, Vec<u8>> =
                ImageBuffer::from_raw(width, height, pixels).ok_or_else(|| {
                    DecodeError::Malformed {
                        reason: "Failed to create RGB buffer".to_string(),
                    }
                })?;
            Ok(DynamicImage::ImageRgb8(buffer))
        }
        ColorSpace::RGBA => {
            let buffer: ImageBuffer<Rgba<u8>, Vec<u8>> =
                ImageBuffer::from_raw(width, height, pixels).ok_or_else(|| {
                    DecodeError::Malformed {
                        reason: "Failed to create RGBA buffer".to_string(),
                    }
                })?;
            Ok(DynamicImage::ImageRgba8(buffer))
        }
        ColorSpace::Luma => {
            let buffer: ImageBuffer<image::Luma<u8>, Vec<u8>> =
                ImageBuffer::from_raw(width, height, pixels).ok_or_else(|| {
                    DecodeError::Malformed {
                        reason: "Failed to create Luma buffer".to_string(),
                    }
                })?;
            Ok(DynamicImage::ImageLuma8(buffer))
        }
        _ => decode_fallback(bytes),
    }
}

/// Generic decoding via the image crate
fn decode_fallback(bytes: &[u8]) -> Result<DynamicImage, DecodeError> {
    image::load_from_memory(bytes).map_err(|e| DecodeError::Malformed {
        reason: e.to_string(),
    })
}

/// Downscale so the longest side equals `MAX_DIMENSION`, preserving aspect
fn downscale_to_cap(image: &DynamicImage) -> Result<RgbImage, DecodeError> {
    let (width, height) = (image.width(), image.height());
    let scale = MAX_DIMENSION as f64 / width.max(height) as f64;
    let new_width = ((width as f64 * scale) as u32).max(1);
    let new_height = ((height as f64 * scale) as u32).max(1);

    let rgb = image.to_rgb8();
    let src = Image::from_vec_u8(width, height, rgb.into_raw(), PixelType::U8x3).map_err(|e| {
        DecodeError::ResizeFailed {
            reason: format!("Failed to create source image: {}", e),
        }
    })?;

    let mut dst = Image::new(new_width, new_height, PixelType::U8x3);
    let options = ResizeOptions::new().resize_alg(fast_image_resize::ResizeAlg::Convolution(
        fast_image_resize::FilterType::Bilinear,
    ));

    Resizer::new()
        .resize(&src, &mut dst, &options)
        .map_err(|e| DecodeError::ResizeFailed {
            reason: format!("Resize failed: {}", e),
        })?;

    ImageBuffer::from_raw(new_width, new_height, dst.into_vec()).ok_or_else(|| {
        DecodeError::ResizeFailed {
            reason: "Failed to create result buffer".to_string(),
        }
    })
}

/// Resize a grayscale grid to exact dimensions (used by spectrum analysis)
pub fn resize_luma(gray: &GrayImage, width: u32, height: u32) -> Result<GrayImage, DecodeError> {
    let src = Image::from_vec_u8(
        gray.width(),
        gray.height(),
        gray.clone().into_raw(),
        PixelType::U8,
    )
    .map_err(|e| DecodeError::ResizeFailed {
        reason: format!("Failed to create source image: {}", e),
    })?;

    let mut dst = Image::new(width, height, PixelType::U8);
    let options = ResizeOptions::new().resize_alg(fast_image_resize::ResizeAlg::Convolution(
        fast_image_resize::FilterType::Bilinear,
    ));

    Resizer::new()
        .resize(&src, &mut dst, &options)
        .map_err(|e| DecodeError::ResizeFailed {
            reason: format!("Resize failed: {}", e),
        })?;

    ImageBuffer::from_raw(width, height, dst.into_vec()).ok_or_else(|| {
        DecodeError::ResizeFailed {
            reason: "Failed to create result buffer".to_string(),
        }
    })
}
