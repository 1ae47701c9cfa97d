use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "image-batch")]
#[command(about = "画像バッチ整理ツール（自然順ソート・リネーム・変換・分割・結合・ZIP出力）", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 対話的に並び替え・リネームしてZIPに書き出す
    Organize {
        /// 画像フォルダまたは画像ファイルのパス
        #[arg(required = true)]
        paths: Vec<PathBuf>,

        /// 書き出すZIPファイル（eコマンドの既定値）
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// 画像を一括で形式変換
    Convert {
        /// 画像フォルダまたは画像ファイルのパス
        #[arg(required = true)]
        paths: Vec<PathBuf>,

        /// 出力形式 (png/jpeg/webp)（デフォルト: 設定の出力形式）
        #[arg(short, long)]
        format: Option<OutputFormat>,

        /// JPEG品質 (1-100)（デフォルト: 設定のJPEG品質）
        #[arg(short, long)]
        quality: Option<u8>,

        /// 出力先（通常: フォルダ、--zip時: ZIPファイル）
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// フォルダに出力せず1つのZIPにまとめる
        #[arg(long)]
        zip: bool,
    },

    /// 画像を横長ストリップに分割
    Slice {
        /// 画像フォルダまたは画像ファイルのパス
        #[arg(required = true)]
        paths: Vec<PathBuf>,

        /// 分割数（デフォルト: 設定の分割数）
        #[arg(short = 'n', long)]
        divisions: Option<u32>,

        /// 出力先（通常: フォルダ、--combined時: ZIPファイル）
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// 画像ごとのZIPではなく全体を1つのZIPにまとめる
        #[arg(long)]
        combined: bool,
    },

    /// 画像を縦に結合して1枚にする
    Merge {
        /// 画像フォルダまたは画像ファイルのパス
        #[arg(required = true)]
        paths: Vec<PathBuf>,

        /// 出力形式 (png/jpeg/webp)
        #[arg(short, long)]
        format: Option<OutputFormat>,

        /// JPEG品質 (1-100)（デフォルト: 設定のJPEG品質）
        #[arg(short, long)]
        quality: Option<u8>,

        /// 出力ファイル（デフォルト: 入力フォルダ/merged.jpg）
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// 自然順に並べて連番リネームしZIPに書き出す
    Renumber {
        /// 画像フォルダまたは画像ファイルのパス
        #[arg(required = true)]
        paths: Vec<PathBuf>,

        /// 書き出すZIPファイル（デフォルト: 設定のZIPファイル名）
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// 設定を表示/編集
    Config {
        /// 既定の出力形式を設定 (png/jpeg/webp)
        #[arg(long)]
        set_format: Option<String>,

        /// 既定のJPEG品質を設定 (1-100)
        #[arg(long)]
        set_quality: Option<u8>,

        /// 既定の分割数を設定
        #[arg(long)]
        set_divisions: Option<u32>,

        /// 既定のZIPファイル名を設定
        #[arg(long)]
        set_zip_name: Option<String>,

        /// 設定を表示
        #[arg(long)]
        show: bool,
    },
}

/// 画像の出力形式
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    Png,
    #[default]
    Jpeg,
    /// 可逆圧縮のみ（品質指定は無視される）
    Webp,
}

impl OutputFormat {
    /// 出力ファイルの拡張子
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Png => "png",
            OutputFormat::Jpeg => "jpg",
            OutputFormat::Webp => "webp",
        }
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "png" => Ok(OutputFormat::Png),
            "jpeg" | "jpg" => Ok(OutputFormat::Jpeg),
            "webp" => Ok(OutputFormat::Webp),
            _ => Err(format!("Unknown format: {}. Use png, jpeg, or webp", s)),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Png => write!(f, "png"),
            OutputFormat::Jpeg => write!(f, "jpeg"),
            OutputFormat::Webp => write!(f, "webp"),
        }
    }
}
