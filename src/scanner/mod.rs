use crate::error::{ImageBatchError, Result};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

#[derive(Debug, Clone)]
pub struct ImageFile {
    pub name: String,
    pub path: PathBuf,
}

const IMAGE_EXTENSIONS: &[&str] = &[
    "jpg", "jpeg", "png", "gif", "webp", "bmp", "JPG", "JPEG", "PNG", "GIF", "WEBP", "BMP",
];

pub fn scan_folder(folder: &Path) -> Result<Vec<ImageFile>> {
    if !folder.exists() {
        return Err(ImageBatchError::FolderNotFound(folder.display().to_string()));
    }

    let mut images = Vec::new();

    for entry in WalkDir::new(folder)
        .max_depth(1)  // 直下のみ（再帰しない）
        .into_iter()
        .filter_map(|e| e.ok())
    {
        let path = entry.path();

        if !path.is_file() {
            continue;
        }

        if let Some(ext) = path.extension() {
            let ext_str = ext.to_string_lossy();
            if IMAGE_EXTENSIONS.iter().any(|&e| e == ext_str) {
                let name = path
                    .file_name()
                    .map(|n| n.to_string_lossy().to_string())
                    .unwrap_or_default();

                images.push(ImageFile {
                    name,
                    path: path.to_path_buf(),
                });
            }
        }
    }

    // ファイル名でソート（追加順を安定させる。表示順は並び替えコアが決める）
    images.sort_by(|a, b| a.name.cmp(&b.name));

    Ok(images)
}

/// 引数のパス列を画像リストに解決する
///
/// ディレクトリは直下をスキャンし、ファイルは拡張子を確認せずそのまま受け付ける。
pub fn collect_inputs(paths: &[PathBuf]) -> Result<Vec<ImageFile>> {
    let mut images = Vec::new();

    for path in paths {
        if path.is_dir() {
            images.extend(scan_folder(path)?);
        } else if path.is_file() {
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_default();
            images.push(ImageFile {
                name,
                path: path.clone(),
            });
        } else {
            return Err(ImageBatchError::FileNotFound(path.display().to_string()));
        }
    }

    Ok(images)
}

/// Check if a file extension is a supported image format
#[cfg(test)]
fn is_image_extension(ext: &str) -> bool {
    IMAGE_EXTENSIONS.contains(&ext)
}
