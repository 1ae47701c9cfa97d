//! 対話式の並び替え・リネームセッション
//!
//! 1つの集合に対して選択移動・絞り込み・リネーム・位置移動・削除・
//! 連番リネーム・ZIP書き出しを繰り返す。操作のたびに現在のビューを表示する。

use crate::archive::{self, ZipSource};
use crate::error::{ImageBatchError, Result};
use crate::order::OrderedFileSet;
use dialoguer::Input;
use std::path::{Path, PathBuf};

/// 対話アクション
enum OrganizeAction {
    /// 次を選択
    Next,
    /// 前を選択
    Prev,
    /// 絞り込みを設定（空で解除）
    Filter(String),
    /// 選択中の項目をリネーム
    Rename(String),
    /// 選択中の項目を指定位置（1始まり）へ移動
    Move(usize),
    /// 選択中の項目を削除
    Remove,
    /// 表示順で連番リネーム
    Renumber,
    /// 一覧を表示
    List,
    /// ZIPに書き出し
    Export(PathBuf),
    /// 終了
    Quit,
    /// 無効な入力
    Unknown,
}

/// 対話セッションを実行する
pub fn run_organize(set: &mut OrderedFileSet<PathBuf>, default_zip: &Path) -> Result<()> {
    println!("操作: [Enter/n]次 [p]前 [f 語]絞り込み [r 名前]リネーム [m 位置]移動 [d]削除 [u]連番 [l]一覧 [e パス]ZIP出力 [q]終了");
    println!("---\n");
    print_view(set);

    loop {
        let input: String = Input::new()
            .with_prompt("操作")
            .allow_empty(true)
            .interact_text()
            .map_err(|e| ImageBatchError::CliExecution(e.to_string()))?;

        match parse_action(&input, default_zip) {
            OrganizeAction::Next => {
                set.select_next();
                print_view(set);
            }
            OrganizeAction::Prev => {
                set.select_prev();
                print_view(set);
            }
            OrganizeAction::Filter(text) => {
                set.set_filter(&text);
                if text.is_empty() {
                    println!("  → 絞り込みを解除\n");
                } else {
                    println!("  → 「{}」で絞り込み: {}件\n", text, set.view_len());
                }
                print_view(set);
            }
            OrganizeAction::Rename(base) => match set.selected() {
                Some(id) => match set.rename(id, &base) {
                    Ok(()) => {
                        if let Some(entry) = set.entry(id) {
                            println!("  → {}\n", entry.display_name());
                        }
                        print_view(set);
                    }
                    Err(e) => println!("✖ {}\n", e),
                },
                None => println!("✖ 選択中の画像がありません\n"),
            },
            OrganizeAction::Move(position) => match set.selected() {
                Some(id) => {
                    set.move_to(id, position.saturating_sub(1));
                    print_view(set);
                }
                None => println!("✖ 選択中の画像がありません\n"),
            },
            OrganizeAction::Remove => match set.selected() {
                Some(id) => {
                    let name = set
                        .entry(id)
                        .map(|e| e.display_name().to_string())
                        .unwrap_or_default();
                    set.remove(id);
                    println!("  → 削除: {}\n", name);
                    print_view(set);
                }
                None => println!("✖ 選択中の画像がありません\n"),
            },
            OrganizeAction::Renumber => {
                set.renumber();
                println!("  → {}件を連番リネーム\n", set.view_len());
                print_view(set);
            }
            OrganizeAction::List => {
                print_view(set);
            }
            OrganizeAction::Export(path) => {
                export_zip(set, &path);
            }
            OrganizeAction::Quit => {
                println!("終了します");
                break;
            }
            OrganizeAction::Unknown => {
                println!("✖ 不明な操作です\n");
            }
        }
    }

    Ok(())
}

fn export_zip(set: &OrderedFileSet<PathBuf>, path: &Path) {
    let entries: Vec<(String, ZipSource)> = set
        .export_order()
        .into_iter()
        .map(|(name, content)| (name, ZipSource::File(content)))
        .collect();

    if entries.is_empty() {
        println!("✖ 書き出す画像がありません\n");
        return;
    }

    match archive::pack_zip(entries, path) {
        Ok(report) => {
            println!("✔ {}件を書き出しました: {}", report.written, path.display());
            if report.skipped_count() > 0 {
                println!("⚠ {}件をスキップしました:", report.skipped_count());
                for (name, reason) in &report.skipped {
                    println!("    {}: {}", name, reason);
                }
            }
            println!();
        }
        Err(e) => println!("✖ {}\n", e),
    }
}

fn print_view(set: &OrderedFileSet<PathBuf>) {
    if !set.filter().is_empty() {
        println!("  絞り込み中: 「{}」", set.filter());
    }
    if set.view_len() == 0 {
        println!("  (表示できる画像がありません)\n");
        return;
    }
    for (i, entry) in set.view().iter().enumerate() {
        let marker = if Some(entry.id()) == set.selected() {
            ">"
        } else {
            " "
        };
        println!("  {} [{:>3}] {}", marker, i + 1, entry.display_name());
    }
    println!();
}

fn parse_action(input: &str, default_zip: &Path) -> OrganizeAction {
    let trimmed = input.trim();
    let (cmd, rest) = match trimmed.split_once(' ') {
        Some((cmd, rest)) => (cmd, rest.trim()),
        None => (trimmed, ""),
    };

    match cmd {
        "" | "n" => OrganizeAction::Next,
        "p" => OrganizeAction::Prev,
        "f" => OrganizeAction::Filter(rest.to_string()),
        "r" => OrganizeAction::Rename(rest.to_string()),
        "m" => match rest.parse::<usize>() {
            Ok(position) if position >= 1 => OrganizeAction::Move(position),
            _ => OrganizeAction::Unknown,
        },
        "d" => OrganizeAction::Remove,
        "u" => OrganizeAction::Renumber,
        "l" => OrganizeAction::List,
        "e" => {
            if rest.is_empty() {
                OrganizeAction::Export(default_zip.to_path_buf())
            } else {
                OrganizeAction::Export(PathBuf::from(rest))
            }
        }
        "q" | "Q" => OrganizeAction::Quit,
        _ => OrganizeAction::Unknown,
    }
}
