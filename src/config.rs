use crate::cli::OutputFormat;
use crate::error::{ImageBatchError, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// 変換の既定の出力形式 (png/jpeg/webp)
    pub default_format: String,
    /// 既定のJPEG品質 (1-100)
    pub jpeg_quality: u8,
    /// 既定の分割数
    pub slice_divisions: u32,
    /// 既定のZIPファイル名
    pub zip_name: String,
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default_config())
        }
    }

    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(&config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| ImageBatchError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("image-batch").join("config.json"))
    }

    fn default_config() -> Self {
        Self {
            default_format: "jpeg".into(),
            jpeg_quality: 80,
            slice_divisions: 3,
            zip_name: "images.zip".into(),
        }
    }

    /// 設定の出力形式をパースして返す
    pub fn output_format(&self) -> Result<OutputFormat> {
        self.default_format
            .parse::<OutputFormat>()
            .map_err(ImageBatchError::Config)
    }
}
