//! 画像の縦結合モジュール
//!
//! バッチの画像を上から順に1枚へ積み上げる。キャンバス幅は最大幅、
//! 高さは合計。各画像は左端に揃え、余白は背景色で埋める。

use crate::cli::OutputFormat;
use crate::convert::{encode_image, ConvertOptions};
use crate::error::{ImageBatchError, Result};
use image::{imageops, DynamicImage, Rgba, RgbaImage};
use std::path::{Path, PathBuf};

/// 画像列を縦に積み上げて1枚にする
pub fn merge_images(images: &[DynamicImage], background: Rgba<u8>) -> Result<DynamicImage> {
    if images.is_empty() {
        return Err(ImageBatchError::NoImagesFound(
            "結合する画像がありません".into(),
        ));
    }

    let width = images.iter().map(|img| img.width()).max().unwrap_or(0);
    let height: u32 = images.iter().map(|img| img.height()).sum();

    let mut canvas = RgbaImage::from_pixel(width, height, background);

    let mut y = 0i64;
    for img in images {
        imageops::overlay(&mut canvas, &img.to_rgba8(), 0, y);
        y += i64::from(img.height());
    }

    Ok(DynamicImage::ImageRgba8(canvas))
}

/// バッチを読み込んで縦に結合し、1ファイルに書き出す
///
/// 1枚でも読み込みに失敗したら結合は中止する。
pub fn run(batch: &[(String, PathBuf)], options: &ConvertOptions, output: &Path) -> Result<()> {
    let mut images = Vec::with_capacity(batch.len());
    for (_, path) in batch {
        let img = image::open(path)
            .map_err(|e| ImageBatchError::ImageLoad(format!("{}: {}", path.display(), e)))?;
        images.push(img);
    }

    // JPEGは透過を持てないので余白を白で埋める。PNG/WebPは透過のまま
    let background = match options.format {
        OutputFormat::Jpeg => Rgba([255, 255, 255, 255]),
        _ => Rgba([0, 0, 0, 0]),
    };

    let merged = merge_images(&images, background)?;
    let data = encode_image(&merged, options)?;
    std::fs::write(output, data)?;

    Ok(())
}
