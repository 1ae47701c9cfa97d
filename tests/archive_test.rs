//! ZIP出力の統合テスト
//!
//! 書き出したZIPを読み戻して、順序・内容・スキップ報告を検証

use image_batch_rust::archive::{pack_zip, ZipSource};
use image_batch_rust::error::ImageBatchError;
use std::fs::File;
use std::io::Read;
use std::path::PathBuf;
use tempfile::tempdir;
use zip::ZipArchive;

fn read_entries(path: &std::path::Path) -> Vec<(String, Vec<u8>)> {
    let file = File::open(path).expect("Failed to open zip");
    let mut archive = ZipArchive::new(file).expect("Failed to read zip");
    let mut entries = Vec::new();
    for i in 0..archive.len() {
        let mut entry = archive.by_index(i).expect("Failed to read zip entry");
        let mut data = Vec::new();
        entry.read_to_end(&mut data).unwrap();
        entries.push((entry.name().to_string(), data));
    }
    entries
}

/// ファイルとメモリの混在エントリを順序どおりに書き出す
#[test]
fn test_pack_zip_preserves_order_and_content() {
    let dir = tempdir().expect("Failed to create temp dir");
    let file_path = dir.path().join("src.bin");
    std::fs::write(&file_path, b"from disk").unwrap();

    let entries = vec![
        ("01.png".to_string(), ZipSource::Memory(b"first".to_vec())),
        ("02.png".to_string(), ZipSource::File(file_path)),
        ("03.png".to_string(), ZipSource::Memory(b"third".to_vec())),
    ];

    let zip_path = dir.path().join("out.zip");
    let report = pack_zip(entries, &zip_path).unwrap();
    assert_eq!(report.written, 3);
    assert_eq!(report.skipped_count(), 0);

    let read_back = read_entries(&zip_path);
    let names: Vec<&str> = read_back.iter().map(|(n, _)| n.as_str()).collect();
    assert_eq!(names, vec!["01.png", "02.png", "03.png"]);
    assert_eq!(read_back[1].1, b"from disk");
}

/// 読めないエントリはスキップして続行し、報告に残す
#[test]
fn test_pack_zip_skips_unreadable_entries() {
    let dir = tempdir().expect("Failed to create temp dir");
    let good = dir.path().join("good.png");
    std::fs::write(&good, b"ok").unwrap();

    let entries = vec![
        ("a.png".to_string(), ZipSource::File(good)),
        (
            "b.png".to_string(),
            ZipSource::File(PathBuf::from("/nonexistent/missing.png")),
        ),
        ("c.png".to_string(), ZipSource::Memory(b"mem".to_vec())),
    ];

    let zip_path = dir.path().join("out.zip");
    let report = pack_zip(entries, &zip_path).unwrap();

    assert_eq!(report.written, 2);
    assert_eq!(report.skipped_count(), 1);
    assert_eq!(report.skipped[0].0, "b.png");

    let names: Vec<String> = read_entries(&zip_path).into_iter().map(|(n, _)| n).collect();
    assert_eq!(names, vec!["a.png", "c.png"]);
}

/// エントリが空でも有効なZIPができる
#[test]
fn test_pack_zip_empty_entries() {
    let dir = tempdir().expect("Failed to create temp dir");
    let zip_path = dir.path().join("empty.zip");

    let report = pack_zip(Vec::new(), &zip_path).unwrap();
    assert_eq!(report.written, 0);
    assert!(read_entries(&zip_path).is_empty());
}

/// 出力先を作れない場合はArchiveエラーになる
#[test]
fn test_pack_zip_unwritable_output_is_archive_error() {
    let entries = vec![("a.png".to_string(), ZipSource::Memory(b"x".to_vec()))];
    let result = pack_zip(entries, std::path::Path::new("/nonexistent/dir/out.zip"));

    assert!(matches!(result, Err(ImageBatchError::Archive(_))));
}

/// エントリ本体の書き込み失敗もArchiveエラーになる
///
/// /dev/fullへの書き込みは必ず容量不足で失敗する。圧縮で縮まない
/// データを書き込みバッファより大きくして、エントリ書き込み中に
/// 失敗させる。
#[cfg(target_os = "linux")]
#[test]
fn test_pack_zip_entry_write_failure_is_archive_error() {
    let mut noise = Vec::with_capacity(64 * 1024);
    let mut state: u32 = 123456789;
    for _ in 0..64 * 1024 {
        state = state.wrapping_mul(1664525).wrapping_add(1013904223);
        noise.push((state >> 24) as u8);
    }

    let entries = vec![("noise.bin".to_string(), ZipSource::Memory(noise))];
    let result = pack_zip(entries, std::path::Path::new("/dev/full"));

    assert!(matches!(result, Err(ImageBatchError::Archive(_))));
}
