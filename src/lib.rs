//! 画像バッチ整理ツール
//!
//! フォルダ内の画像を自然順（ファイル名の数字を数値として比較する順）に
//! 並べ替え、リネーム・形式変換・分割・結合し、ZIPにまとめて書き出す。

pub mod archive;
pub mod cli;
pub mod config;
pub mod convert;
pub mod error;
pub mod merge;
pub mod order;
pub mod organize;
pub mod scanner;
pub mod slice;

pub use archive::{PackReport, ZipSource};
pub use error::{ImageBatchError, Result};
pub use order::{natural_cmp, Entry, EntryId, OrderedFileSet};
