use clap::Parser;
use image_batch_rust::{archive, cli, config, convert, error, merge, order, organize, scanner, slice};
use archive::ZipSource;
use cli::{Cli, Commands, OutputFormat};
use config::Config;
use convert::ConvertOptions;
use error::Result;
use order::OrderedFileSet;
use std::path::{Path, PathBuf};

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::load()?;

    match cli.command {
        Commands::Organize { paths, output } => {
            println!("🗂 image-batch - 対話整理\n");

            // 1. 画像スキャン
            println!("[1/2] 画像をスキャン中...");
            let images = scanner::collect_inputs(&paths)?;
            println!("✔ {}枚の画像を検出\n", images.len());

            if images.is_empty() {
                return Err(error::ImageBatchError::NoImagesFound(display_paths(&paths)));
            }

            let mut set = OrderedFileSet::new();
            set.add_batch(images.into_iter().map(|i| (i.name, i.path)));

            // 2. 対話セッション
            println!("[2/2] 対話セッションを開始\n");
            let default_zip =
                output.unwrap_or_else(|| default_base(&paths).join(&config.zip_name));
            organize::run_organize(&mut set, &default_zip)?;

            println!("\n✅ 終了");
        }

        Commands::Convert { paths, format, quality, output, zip } => {
            println!("🖼 image-batch - 形式変換\n");

            // 1. 画像スキャン
            println!("[1/2] 画像をスキャン中...");
            let images = scanner::collect_inputs(&paths)?;
            println!("✔ {}枚の画像を検出\n", images.len());

            if images.is_empty() {
                return Err(error::ImageBatchError::NoImagesFound(display_paths(&paths)));
            }

            let format = match format {
                Some(format) => format,
                None => config.output_format()?,
            };
            let options = ConvertOptions {
                format,
                jpeg_quality: quality.unwrap_or(config.jpeg_quality),
            };

            let mut set = OrderedFileSet::new();
            set.add_batch(images.into_iter().map(|i| (i.name, i.path)));
            let batch = set.export_order();

            if cli.verbose {
                print_batch(&batch);
            }

            // 2. 変換
            println!("[2/2] {}形式へ変換中...", format);
            let stats = if zip {
                let zip_path =
                    output.unwrap_or_else(|| default_base(&paths).join(&config.zip_name));
                let stats = convert::run_zip(&batch, &options, &zip_path)?;
                println!("✔ ZIPに書き出しました: {}", zip_path.display());
                stats
            } else {
                let output_dir =
                    output.unwrap_or_else(|| default_base(&paths).join("converted"));
                let stats = convert::run(&batch, &options, &output_dir)?;
                println!("✔ 出力先: {}", output_dir.display());
                stats
            };

            println!("✔ {}枚を変換", stats.converted);
            report_skipped(&stats.skipped);

            println!("\n✅ 変換完了");
        }

        Commands::Slice { paths, divisions, output, combined } => {
            println!("✂ image-batch - 画像分割\n");

            // 1. 画像スキャン
            println!("[1/2] 画像をスキャン中...");
            let images = scanner::collect_inputs(&paths)?;
            println!("✔ {}枚の画像を検出\n", images.len());

            if images.is_empty() {
                return Err(error::ImageBatchError::NoImagesFound(display_paths(&paths)));
            }

            let divisions = divisions.unwrap_or(config.slice_divisions);
            if divisions == 0 {
                return Err(error::ImageBatchError::InvalidSliceCount(
                    "分割数は1以上を指定してください".into(),
                ));
            }

            let mut set = OrderedFileSet::new();
            set.add_batch(images.into_iter().map(|i| (i.name, i.path)));
            let batch = set.export_order();

            if cli.verbose {
                print_batch(&batch);
            }

            // 2. 分割
            println!("[2/2] {}分割中...", divisions);
            let stats = if combined {
                let zip_path =
                    output.unwrap_or_else(|| default_base(&paths).join("sliced.zip"));
                let stats = slice::run_combined(&batch, divisions, &zip_path)?;
                println!("✔ ZIPに書き出しました: {}", zip_path.display());
                stats
            } else {
                let output_dir = output.unwrap_or_else(|| default_base(&paths).join("sliced"));
                let stats = slice::run(&batch, divisions, &output_dir)?;
                println!("✔ 出力先: {}", output_dir.display());
                stats
            };

            println!("✔ {}枚を分割", stats.sliced);
            report_skipped(&stats.skipped);

            println!("\n✅ 分割完了");
        }

        Commands::Merge { paths, format, quality, output } => {
            println!("🧵 image-batch - 縦結合\n");

            // 1. 画像スキャン
            println!("[1/2] 画像をスキャン中...");
            let images = scanner::collect_inputs(&paths)?;
            println!("✔ {}枚の画像を検出\n", images.len());

            if images.is_empty() {
                return Err(error::ImageBatchError::NoImagesFound(display_paths(&paths)));
            }

            let format = format.unwrap_or(OutputFormat::Jpeg);
            let options = ConvertOptions {
                format,
                jpeg_quality: quality.unwrap_or(config.jpeg_quality),
            };

            let mut set = OrderedFileSet::new();
            set.add_batch(images.into_iter().map(|i| (i.name, i.path)));
            let batch = set.export_order();

            if cli.verbose {
                print_batch(&batch);
            }

            // 2. 結合
            println!("[2/2] {}枚を結合中...", batch.len());
            let output_path = output.unwrap_or_else(|| {
                default_base(&paths).join(format!("merged.{}", format.extension()))
            });
            merge::run(&batch, &options, &output_path)?;
            println!("✔ 書き出しました: {}", output_path.display());

            println!("\n✅ 結合完了");
        }

        Commands::Renumber { paths, output } => {
            println!("🔢 image-batch - 連番リネーム\n");

            // 1. 画像スキャン
            println!("[1/2] 画像をスキャン中...");
            let images = scanner::collect_inputs(&paths)?;
            println!("✔ {}枚の画像を検出\n", images.len());

            if images.is_empty() {
                return Err(error::ImageBatchError::NoImagesFound(display_paths(&paths)));
            }

            let mut set = OrderedFileSet::new();
            set.add_batch(images.into_iter().map(|i| (i.name, i.path)));
            set.renumber();

            let entries: Vec<(String, ZipSource)> = set
                .export_order()
                .into_iter()
                .map(|(name, path)| (name, ZipSource::File(path)))
                .collect();

            if cli.verbose {
                for (name, _) in &entries {
                    println!("  - {}", name);
                }
            }

            // 2. ZIP書き出し
            println!("[2/2] ZIPに書き出し中...");
            let zip_path = output.unwrap_or_else(|| default_base(&paths).join(&config.zip_name));
            let report = archive::pack_zip(entries, &zip_path)?;
            println!("✔ {}件を書き出しました: {}", report.written, zip_path.display());
            report_skipped(&report.skipped);

            println!("\n✅ 連番リネーム完了");
        }

        Commands::Config { set_format, set_quality, set_divisions, set_zip_name, show } => {
            let mut config = config;
            let mut changed = false;

            if let Some(format) = set_format {
                format
                    .parse::<OutputFormat>()
                    .map_err(error::ImageBatchError::Config)?;
                config.default_format = format;
                changed = true;
            }

            if let Some(quality) = set_quality {
                config.jpeg_quality = quality.clamp(1, 100);
                changed = true;
            }

            if let Some(divisions) = set_divisions {
                if divisions == 0 {
                    return Err(error::ImageBatchError::InvalidSliceCount(
                        "分割数は1以上を指定してください".into(),
                    ));
                }
                config.slice_divisions = divisions;
                changed = true;
            }

            if let Some(zip_name) = set_zip_name {
                config.zip_name = zip_name;
                changed = true;
            }

            if changed {
                config.save()?;
                println!("✔ 設定を保存しました");
            }

            if show || !changed {
                println!("設定:");
                println!("  出力形式: {}", config.default_format);
                println!("  JPEG品質: {}", config.jpeg_quality);
                println!("  分割数: {}", config.slice_divisions);
                println!("  ZIPファイル名: {}", config.zip_name);
                println!("  設定ファイル: {}", Config::config_path()?.display());
            }
        }
    }

    Ok(())
}

fn default_base(paths: &[PathBuf]) -> PathBuf {
    match paths.first() {
        Some(first) if first.is_dir() => first.clone(),
        Some(first) => first
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from(".")),
        None => PathBuf::from("."),
    }
}

fn display_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

fn print_batch(batch: &[(String, PathBuf)]) {
    for (name, _) in batch {
        println!("  - {}", name);
    }
}

fn report_skipped(skipped: &[(String, String)]) {
    if skipped.is_empty() {
        return;
    }
    println!("⚠ {}枚をスキップ:", skipped.len());
    for (name, reason) in skipped {
        println!("    {}: {}", name, reason);
    }
}
