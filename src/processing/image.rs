//! Image conversion via the `image` crate.
//!
//! Decoding sniffs the file content (falling back to the extension), encoding
//! goes through the codec picked by the upper-cased target name.

use std::path::Path;
use image::{DynamicImage, ImageFormat, ImageReader};
use tracing::debug;

use crate::utils::{ConversionError, extract_filename, remove_partial_output};

type Result<T> = std::result::Result<T, ConversionError>;

/// Maps a target format name to the codec's format, the way users spell it
pub fn encoder_format(target: &str) -> Option<ImageFormat> {
    match target.to_uppercase().as_str() {
        "JPG" | "JPEG" => Some(ImageFormat::Jpeg),
        "PNG" => Some(ImageFormat::Png),
        "GIF" => Some(ImageFormat::Gif),
        "BMP" => Some(ImageFormat::Bmp),
        "TIFF" => Some(ImageFormat::Tiff),
        "WEBP" => Some(ImageFormat::WebP),
        _ => None,
    }
}

/// Opens `input` and writes it to `output` encoded as `target`.
pub fn convert_image(input: &Path, output: &Path, target: &str) -> Result<()> {
    let format = encoder_format(target)
        .ok_or_else(|| ConversionError::encode(format!("unsupported image format: {}", target.to_uppercase())))?;

    let image = decode(input)?;
    debug!(
        "Decoded '{}': {}×{} {:?}",
        extract_filename(input),
        image.width(),
        image.height(),
        image.color()
    );

    let image = prepare_for_encoder(image, format);
    if let Err(e) = image.save_with_format(output, format) {
        remove_partial_output(output);
        return Err(ConversionError::encode(e));
    }
    Ok(())
}

fn decode(input: &Path) -> Result<DynamicImage> {
    ImageReader::open(input)
        .map_err(ConversionError::decode)?
        .with_guessed_format()
        .map_err(ConversionError::decode)?
        .decode()
        .map_err(ConversionError::decode)
}

/// Adapts pixel data to what the target encoder accepts.
///
/// JPEG has no alpha channel; GIF, BMP and WebP only take 8-bit samples.
fn prepare_for_encoder(image: DynamicImage, format: ImageFormat) -> DynamicImage {
    let has_alpha = image.color().has_alpha();
    let is_8bit = matches!(
        image,
        DynamicImage::ImageLuma8(_)
            | DynamicImage::ImageLumaA8(_)
            | DynamicImage::ImageRgb8(_)
            | DynamicImage::ImageRgba8(_)
    );

    match format {
        ImageFormat::Jpeg => match image {
            DynamicImage::ImageLuma8(_) | DynamicImage::ImageRgb8(_) => image,
            other => DynamicImage::ImageRgb8(other.to_rgb8()),
        },
        ImageFormat::Gif => DynamicImage::ImageRgba8(image.to_rgba8()),
        ImageFormat::Bmp | ImageFormat::WebP if !is_8bit => {
            if has_alpha {
                DynamicImage::ImageRgba8(image.to_rgba8())
            } else {
                DynamicImage::ImageRgb8(image.to_rgb8())
            }
        }
        _ => image,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage, Rgb, ImageBuffer};
    use tempfile::TempDir;

    fn write_png(path: &Path) {
        let img = RgbaImage::from_fn(8, 6, |x, y| Rgba([x as u8 * 30, y as u8 * 40, 128, 200]));
        img.save_with_format(path, ImageFormat::Png).unwrap();
    }

    #[test]
    fn test_encoder_format_is_case_insensitive() {
        assert_eq!(encoder_format("jpg"), Some(ImageFormat::Jpeg));
        assert_eq!(encoder_format("Jpeg"), Some(ImageFormat::Jpeg));
        assert_eq!(encoder_format("webp"), Some(ImageFormat::WebP));
        assert_eq!(encoder_format("tiff"), Some(ImageFormat::Tiff));
        assert_eq!(encoder_format("mp4"), None);
    }

    #[test]
    fn test_png_to_webp() {
        let temp = TempDir::new().unwrap();
        let input = temp.path().join("photo.png");
        let output = temp.path().join("photo.webp");
        write_png(&input);

        convert_image(&input, &output, "webp").unwrap();

        let decoded = image::open(&output).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (8, 6));
        assert_eq!(ImageFormat::from_path(&output).unwrap(), ImageFormat::WebP);
    }

    #[test]
    fn test_rgba_to_jpeg_drops_alpha() {
        let temp = TempDir::new().unwrap();
        let input = temp.path().join("logo.png");
        let output = temp.path().join("logo.jpg");
        write_png(&input);

        convert_image(&input, &output, "jpg").unwrap();
        let decoded = image::open(&output).unwrap();
        assert!(!decoded.color().has_alpha());
    }

    #[test]
    fn test_every_image_target_encodes() {
        let temp = TempDir::new().unwrap();
        let input = temp.path().join("src.png");
        write_png(&input);

        for target in ["jpg", "jpeg", "gif", "bmp", "tiff", "webp"] {
            let output = temp.path().join(format!("src.{target}"));
            convert_image(&input, &output, target).unwrap_or_else(|e| panic!("{target}: {e}"));
            assert!(image::open(&output).is_ok(), "{target} did not round trip");
        }
    }

    #[test]
    fn test_sixteen_bit_source_to_gif() {
        let temp = TempDir::new().unwrap();
        let input = temp.path().join("deep.png");
        let output = temp.path().join("deep.gif");
        let img: ImageBuffer<Rgb<u16>, Vec<u16>> = ImageBuffer::from_pixel(4, 4, Rgb([1000, 20000, 65535]));
        DynamicImage::ImageRgb16(img).save_with_format(&input, ImageFormat::Png).unwrap();

        convert_image(&input, &output, "gif").unwrap();
        assert!(output.exists());
    }

    #[test]
    fn test_invalid_source_is_decode_error() {
        let temp = TempDir::new().unwrap();
        let input = temp.path().join("broken.png");
        let output = temp.path().join("broken.webp");
        std::fs::write(&input, b"definitely not a png").unwrap();

        let err = convert_image(&input, &output, "webp").unwrap_err();
        assert!(matches!(err, ConversionError::Decode(_)), "{err:?}");
        assert!(!output.exists());
    }

    #[test]
    fn test_missing_source_is_decode_error() {
        let temp = TempDir::new().unwrap();
        let err = convert_image(&temp.path().join("gone.png"), &temp.path().join("gone.gif"), "gif").unwrap_err();
        assert!(matches!(err, ConversionError::Decode(_)));
    }

    #[test]
    fn test_unknown_target_is_encode_error() {
        let temp = TempDir::new().unwrap();
        let input = temp.path().join("photo.png");
        write_png(&input);

        let err = convert_image(&input, &temp.path().join("photo.psd"), "psd").unwrap_err();
        assert!(matches!(err, ConversionError::Encode(_)));
    }
}
