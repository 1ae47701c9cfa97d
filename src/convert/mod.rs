//! 画像形式の一括変換モジュール
//!
//! 画像を読み込み直して指定形式で再エンコードする。
//! バッチは並列で処理し、失敗したファイルはスキップして続行する。

use crate::archive::{self, ZipSource};
use crate::cli::OutputFormat;
use crate::error::{ImageBatchError, Result};
use image::codecs::jpeg::JpegEncoder;
use image::codecs::webp::WebPEncoder;
use image::DynamicImage;
use indicatif::ProgressBar;
use rayon::prelude::*;
use std::io::Cursor;
use std::path::{Path, PathBuf};

/// 変換オプション
#[derive(Debug, Clone)]
pub struct ConvertOptions {
    pub format: OutputFormat,
    /// JPEG品質 (1-100)
    pub jpeg_quality: u8,
}

/// 変換結果の統計
#[derive(Debug, Default)]
pub struct ConvertStats {
    /// 変換できた枚数
    pub converted: usize,
    /// スキップしたファイル（名前と理由）
    pub skipped: Vec<(String, String)>,
}

/// 1枚の画像を指定形式のバイト列にエンコードする
pub fn encode_image(img: &DynamicImage, options: &ConvertOptions) -> Result<Vec<u8>> {
    let mut buf = Cursor::new(Vec::new());

    match options.format {
        OutputFormat::Jpeg => {
            let quality = options.jpeg_quality.clamp(1, 100);
            let encoder = JpegEncoder::new_with_quality(&mut buf, quality);
            // JPEGはアルファを持てないのでRGBに落とす
            img.to_rgb8()
                .write_with_encoder(encoder)
                .map_err(|e| ImageBatchError::ImageEncode(e.to_string()))?;
        }
        OutputFormat::Png => {
            img.write_to(&mut buf, image::ImageFormat::Png)
                .map_err(|e| ImageBatchError::ImageEncode(e.to_string()))?;
        }
        OutputFormat::Webp => {
            // 可逆圧縮のみ。品質指定は使わない
            let encoder = WebPEncoder::new_lossless(&mut buf);
            img.to_rgba8()
                .write_with_encoder(encoder)
                .map_err(|e| ImageBatchError::ImageEncode(e.to_string()))?;
        }
    }

    Ok(buf.into_inner())
}

/// 変換後のファイル名（最後のドット以降だけを差し替える）
pub fn output_name(name: &str, format: OutputFormat) -> String {
    let stem = match name.rsplit_once('.') {
        Some((stem, _)) if !stem.is_empty() => stem,
        _ => name,
    };
    format!("{}.{}", stem, format.extension())
}

/// バッチ変換してフォルダへ書き出す
pub fn run(
    batch: &[(String, PathBuf)],
    options: &ConvertOptions,
    output_dir: &Path,
) -> Result<ConvertStats> {
    std::fs::create_dir_all(output_dir)?;

    let (converted, skipped) = convert_batch(batch, options);

    let mut stats = ConvertStats {
        converted: 0,
        skipped,
    };
    for (name, data) in converted {
        std::fs::write(output_dir.join(&name), data)?;
        stats.converted += 1;
    }

    if stats.converted == 0 && !batch.is_empty() {
        return Err(ImageBatchError::ImageLoad(
            "すべての画像の変換に失敗しました".into(),
        ));
    }

    Ok(stats)
}

/// バッチ変換して1つのZIPにまとめる
pub fn run_zip(
    batch: &[(String, PathBuf)],
    options: &ConvertOptions,
    zip_path: &Path,
) -> Result<ConvertStats> {
    let (converted, skipped) = convert_batch(batch, options);

    if converted.is_empty() && !batch.is_empty() {
        return Err(ImageBatchError::ImageLoad(
            "すべての画像の変換に失敗しました".into(),
        ));
    }

    let entries: Vec<(String, ZipSource)> = converted
        .into_iter()
        .map(|(name, data)| (name, ZipSource::Memory(data)))
        .collect();
    let report = archive::pack_zip(entries, zip_path)?;

    Ok(ConvertStats {
        converted: report.written,
        skipped,
    })
}

/// バッチ全体を並列で変換する。戻り値は(変換済み, スキップ)。
fn convert_batch(
    batch: &[(String, PathBuf)],
    options: &ConvertOptions,
) -> (Vec<(String, Vec<u8>)>, Vec<(String, String)>) {
    let bar = ProgressBar::new(batch.len() as u64);

    let results: Vec<(String, Result<Vec<u8>>)> = batch
        .par_iter()
        .map(|(name, path)| {
            let result = convert_file(path, options);
            bar.inc(1);
            (name.clone(), result)
        })
        .collect();

    bar.finish_and_clear();

    let mut converted = Vec::new();
    let mut skipped = Vec::new();
    for (name, result) in results {
        match result {
            Ok(data) => converted.push((output_name(&name, options.format), data)),
            Err(e) => skipped.push((name, e.to_string())),
        }
    }

    (converted, skipped)
}

fn convert_file(path: &Path, options: &ConvertOptions) -> Result<Vec<u8>> {
    let img = image::open(path)
        .map_err(|e| ImageBatchError::ImageLoad(format!("{}: {}", path.display(), e)))?;
    encode_image(&img, options)
}
