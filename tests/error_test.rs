//! エラーケーステスト
//!
//! 各種エラー条件でのエラーハンドリングを検証

use image_batch_rust::error::ImageBatchError;
use image_batch_rust::scanner;
use std::path::Path;
use tempfile::tempdir;

/// 存在しないフォルダをスキャンした場合
#[test]
fn test_scan_nonexistent_folder() {
    let result = scanner::scan_folder(Path::new("/nonexistent/path/12345"));
    assert!(result.is_err());

    let err = result.unwrap_err();
    assert!(matches!(err, ImageBatchError::FolderNotFound(_)));
}

/// 空のフォルダをスキャンした場合
#[test]
fn test_scan_empty_folder() {
    let dir = tempdir().expect("Failed to create temp dir");
    let result = scanner::scan_folder(dir.path());

    // 空フォルダはエラーではなく空のVecを返す
    assert!(result.is_ok());
    assert!(result.unwrap().is_empty());
}

/// 画像のないフォルダをスキャンした場合
#[test]
fn test_scan_folder_no_images() {
    let dir = tempdir().expect("Failed to create temp dir");

    // テキストファイルのみ作成
    std::fs::write(dir.path().join("test.txt"), "hello").unwrap();
    std::fs::write(dir.path().join("data.json"), "{}").unwrap();

    let result = scanner::scan_folder(dir.path());
    assert!(result.is_ok());
    assert!(result.unwrap().is_empty());
}

/// 存在しないファイルをバッチに指定した場合
#[test]
fn test_collect_inputs_missing_file() {
    let result = scanner::collect_inputs(&[Path::new("/nonexistent/photo.png").to_path_buf()]);
    assert!(result.is_err());

    let err = result.unwrap_err();
    assert!(matches!(err, ImageBatchError::FileNotFound(_)));
}

/// ImageBatchErrorのDisplay実装確認
#[test]
fn test_error_display() {
    let errors = vec![
        ImageBatchError::Config("テスト設定エラー".to_string()),
        ImageBatchError::FileNotFound("test.jpg".to_string()),
        ImageBatchError::FolderNotFound("/path/to/folder".to_string()),
        ImageBatchError::NoImagesFound("フォルダ".to_string()),
        ImageBatchError::InvalidName("空の名前".to_string()),
        ImageBatchError::ImageLoad("読み込み失敗".to_string()),
        ImageBatchError::ImageEncode("エンコード失敗".to_string()),
        ImageBatchError::InvalidSliceCount("0".to_string()),
        ImageBatchError::Archive("書き込み失敗".to_string()),
        ImageBatchError::CliExecution("入力エラー".to_string()),
    ];

    for err in errors {
        let display = format!("{}", err);
        assert!(!display.is_empty(), "エラーメッセージが空: {:?}", err);
    }
}

/// InvalidNameエラーのメッセージ確認
#[test]
fn test_invalid_name_message() {
    let err = ImageBatchError::InvalidName("空の名前は設定できません".to_string());
    let display = format!("{}", err);

    assert!(display.contains("ファイル名"));
    assert!(display.contains("空の名前は設定できません"));
}

/// エラーのDebug実装確認
#[test]
fn test_error_debug() {
    let err = ImageBatchError::Config("テスト".to_string());
    let debug = format!("{:?}", err);

    assert!(debug.contains("Config"));
    assert!(debug.contains("テスト"));
}

/// IOエラーからの変換
#[test]
fn test_io_error_conversion() {
    let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
    let err: ImageBatchError = io_err.into();

    assert!(matches!(err, ImageBatchError::Io(_)));
    let display = format!("{}", err);
    assert!(display.contains("IO"));
}

/// JSONエラーからの変換
#[test]
fn test_json_error_conversion() {
    let json_err = serde_json::from_str::<serde_json::Value>("{ invalid }").unwrap_err();
    let err: ImageBatchError = json_err.into();

    assert!(matches!(err, ImageBatchError::JsonParse(_)));
}
