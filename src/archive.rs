//! ZIP出力モジュール
//!
//! エクスポート順のエントリ列を1つのZIPにまとめる。
//! 個別エントリの読み込み失敗はスキップして続行し、件数を報告する。

use crate::error::{ImageBatchError, Result};
use std::fs::File;
use std::io::{BufWriter, Read, Write};
use std::path::{Path, PathBuf};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

/// ZIPに入れるデータの供給元
pub enum ZipSource {
    /// ディスク上のファイル
    File(PathBuf),
    /// メモリ上のエンコード済みデータ
    Memory(Vec<u8>),
}

/// ZIP作成の結果報告
#[derive(Debug, Clone, Default)]
pub struct PackReport {
    /// 書き込んだエントリ数
    pub written: usize,
    /// スキップしたエントリ（名前と理由）
    pub skipped: Vec<(String, String)>,
}

impl PackReport {
    pub fn skipped_count(&self) -> usize {
        self.skipped.len()
    }
}

/// エントリ列をZIPファイルに書き出す
///
/// 読み込めなかったエントリはスキップして続行し、報告に残す。
/// ZIP自体の作成・書き込みに失敗した場合はエラーを返す。
pub fn pack_zip(entries: Vec<(String, ZipSource)>, output: &Path) -> Result<PackReport> {
    let file = File::create(output)
        .map_err(|e| ImageBatchError::Archive(format!("{}: {}", output.display(), e)))?;
    let mut writer = ZipWriter::new(BufWriter::new(file));
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    let mut report = PackReport::default();

    for (name, source) in entries {
        let data = match resolve(source) {
            Ok(data) => data,
            Err(e) => {
                report.skipped.push((name, e.to_string()));
                continue;
            }
        };

        writer
            .start_file(name.as_str(), options)
            .map_err(|e| ImageBatchError::Archive(e.to_string()))?;
        writer
            .write_all(&data)
            .map_err(|e| ImageBatchError::Archive(e.to_string()))?;
        report.written += 1;
    }

    writer
        .finish()
        .map_err(|e| ImageBatchError::Archive(e.to_string()))?;

    Ok(report)
}

fn resolve(source: ZipSource) -> Result<Vec<u8>> {
    match source {
        ZipSource::File(path) => {
            let mut data = Vec::new();
            File::open(&path)?.read_to_end(&mut data)?;
            Ok(data)
        }
        ZipSource::Memory(data) => Ok(data),
    }
}
