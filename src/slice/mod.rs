//! 画像の横方向分割モジュール
//!
//! 1枚の画像を指定数の横長ストリップに切り分けてPNGで書き出す。
//! 出力は画像ごとのZIP、またはバッチ全体をまとめた1つのZIP。

use crate::archive::{self, ZipSource};
use crate::error::{ImageBatchError, Result};
use image::DynamicImage;
use std::io::Cursor;
use std::path::{Path, PathBuf};

/// 分割結果の統計
#[derive(Debug, Default)]
pub struct SliceStats {
    /// 分割できた枚数
    pub sliced: usize,
    /// スキップしたファイル（名前と理由）
    pub skipped: Vec<(String, String)>,
}

/// 1枚の画像を上からn分割する
///
/// 各ストリップの高さは均等割りで、端数は最後のストリップが吸収する。
pub fn slice_image(img: &DynamicImage, divisions: u32) -> Result<Vec<DynamicImage>> {
    if divisions == 0 {
        return Err(ImageBatchError::InvalidSliceCount(
            "分割数は1以上を指定してください".into(),
        ));
    }

    let (width, height) = (img.width(), img.height());
    if divisions > height {
        return Err(ImageBatchError::InvalidSliceCount(format!(
            "分割数{}が画像の高さ{}pxを超えています",
            divisions, height
        )));
    }

    let base_height = height / divisions;
    let mut strips = Vec::with_capacity(divisions as usize);

    for i in 0..divisions {
        let y = i * base_height;
        let strip_height = if i == divisions - 1 {
            height - y
        } else {
            base_height
        };
        strips.push(img.crop_imm(0, y, width, strip_height));
    }

    Ok(strips)
}

/// 画像ごとに `<名前>.zip` を作って書き出す
pub fn run(batch: &[(String, PathBuf)], divisions: u32, output_dir: &Path) -> Result<SliceStats> {
    std::fs::create_dir_all(output_dir)?;

    let mut stats = SliceStats::default();

    for (name, path) in batch {
        match slice_to_zip(name, path, divisions, output_dir) {
            Ok(()) => stats.sliced += 1,
            Err(e) => stats.skipped.push((name.clone(), e.to_string())),
        }
    }

    if stats.sliced == 0 && !batch.is_empty() {
        return Err(ImageBatchError::ImageLoad(
            "すべての画像の分割に失敗しました".into(),
        ));
    }

    Ok(stats)
}

/// バッチ全体を1つのZIPにまとめる。中身は `<連番>-<ストリップ番号>.png`
pub fn run_combined(
    batch: &[(String, PathBuf)],
    divisions: u32,
    zip_path: &Path,
) -> Result<SliceStats> {
    let mut entries = Vec::new();
    let mut stats = SliceStats::default();
    let mut counter = 0usize;

    for (name, path) in batch {
        match load_and_slice(path, divisions) {
            Ok(strips) => {
                counter += 1;
                for (i, strip) in strips.iter().enumerate() {
                    entries.push((
                        format!("{}-{}.png", counter, i + 1),
                        ZipSource::Memory(encode_png(strip)?),
                    ));
                }
                stats.sliced += 1;
            }
            Err(e) => stats.skipped.push((name.clone(), e.to_string())),
        }
    }

    if stats.sliced == 0 && !batch.is_empty() {
        return Err(ImageBatchError::ImageLoad(
            "すべての画像の分割に失敗しました".into(),
        ));
    }

    archive::pack_zip(entries, zip_path)?;

    Ok(stats)
}

fn slice_to_zip(name: &str, path: &Path, divisions: u32, output_dir: &Path) -> Result<()> {
    let strips = load_and_slice(path, divisions)?;

    let stem = stem_of(name);
    let mut entries = Vec::with_capacity(strips.len());
    for (i, strip) in strips.iter().enumerate() {
        entries.push((
            format!("{}-{}.png", stem, i + 1),
            ZipSource::Memory(encode_png(strip)?),
        ));
    }

    let zip_path = output_dir.join(format!("{}.zip", stem));
    archive::pack_zip(entries, &zip_path)?;
    Ok(())
}

fn load_and_slice(path: &Path, divisions: u32) -> Result<Vec<DynamicImage>> {
    let img = image::open(path)
        .map_err(|e| ImageBatchError::ImageLoad(format!("{}: {}", path.display(), e)))?;
    slice_image(&img, divisions)
}

/// ストリップはPNG固定で書き出す
fn encode_png(img: &DynamicImage) -> Result<Vec<u8>> {
    let mut buf = Cursor::new(Vec::new());
    img.write_to(&mut buf, image::ImageFormat::Png)
        .map_err(|e| ImageBatchError::ImageEncode(e.to_string()))?;
    Ok(buf.into_inner())
}

fn stem_of(name: &str) -> &str {
    match name.rsplit_once('.') {
        Some((stem, _)) if !stem.is_empty() => stem,
        _ => name,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};

    fn test_image(width: u32, height: u32) -> DynamicImage {
        DynamicImage::ImageRgba8(RgbaImage::from_pixel(width, height, Rgba([10, 20, 30, 255])))
    }

    #[test]
    fn test_slice_even() {
        let strips = slice_image(&test_image(8, 9), 3).unwrap();
        assert_eq!(strips.len(), 3);
        assert!(strips.iter().all(|s| s.width() == 8));
        assert!(strips.iter().all(|s| s.height() == 3));
    }

    #[test]
    fn test_slice_remainder_goes_to_last_strip() {
        let strips = slice_image(&test_image(8, 10), 3).unwrap();
        let heights: Vec<u32> = strips.iter().map(|s| s.height()).collect();
        assert_eq!(heights, vec![3, 3, 4]);
    }

    #[test]
    fn test_slice_single() {
        let strips = slice_image(&test_image(4, 4), 1).unwrap();
        assert_eq!(strips.len(), 1);
        assert_eq!(strips[0].height(), 4);
    }

    #[test]
    fn test_slice_zero_divisions() {
        assert!(slice_image(&test_image(4, 4), 0).is_err());
    }

    #[test]
    fn test_slice_more_divisions_than_height() {
        assert!(slice_image(&test_image(4, 4), 5).is_err());
    }

    #[test]
    fn test_stem_of() {
        assert_eq!(stem_of("photo.png"), "photo");
        assert_eq!(stem_of("a.b.png"), "a.b");
        assert_eq!(stem_of("archivo"), "archivo");
    }
}
