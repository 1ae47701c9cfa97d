//! ファイル名の自然順比較
//!
//! 拡張子を除いた名前から数字列をすべて取り出し、出現位置ごとに数値として
//! 比較する。数字を含まない名前は番号付きの名前より後ろに並ぶ。
//! 数値が同じ場合は大文字小文字を無視した文字列比較、それでも同じ場合は
//! 生の文字列比較で順序を確定する。

use lazy_static::lazy_static;
use regex::{Captures, Regex, Replacer};
use std::cmp::Ordering;

lazy_static! {
    static ref DIGIT_RUN_RE: Regex = Regex::new(r"[0-9]+").unwrap();
}

/// ソートキー。ビュー再生成時に1回だけ作り、比較を繰り返す。
#[derive(Debug, Clone)]
pub struct SortKey {
    /// 先頭ゼロを除いた数字列（出現順）
    numbers: Vec<String>,
    /// 数字列をゼロ埋めして小文字化した名前（同値判定用）
    folded: String,
    /// 表示名そのまま
    raw: String,
}

struct ZeroPad;

impl Replacer for ZeroPad {
    fn replace_append(&mut self, caps: &Captures<'_>, dst: &mut String) {
        dst.push_str(&format!("{x:0>30}", x = &caps[0]));
    }
}

/// 表示名からソートキーを生成する
pub fn sort_key(display_name: &str) -> SortKey {
    let base = strip_extension(display_name);
    let numbers = DIGIT_RUN_RE
        .find_iter(base)
        .map(|m| trim_zeros(m.as_str()).to_string())
        .collect();
    let folded = DIGIT_RUN_RE
        .replace_all(display_name, ZeroPad)
        .to_lowercase();

    SortKey {
        numbers,
        folded,
        raw: display_name.to_string(),
    }
}

/// キー同士を比較する
///
/// 数字列を位置ごとに数値比較し、数字が尽きた側（数字なしを含む）は
/// どの数値よりも後ろに置く。数値で決まらなければ文字列比較に落ちる。
pub fn compare_keys(a: &SortKey, b: &SortKey) -> Ordering {
    let positions = a.numbers.len().max(b.numbers.len());
    for i in 0..positions {
        let ord = match (a.numbers.get(i), b.numbers.get(i)) {
            (Some(x), Some(y)) => compare_runs(x, y),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        };
        if ord != Ordering::Equal {
            return ord;
        }
    }

    a.folded.cmp(&b.folded).then_with(|| a.raw.cmp(&b.raw))
}

/// 2つの名前を自然順で比較する
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    compare_keys(&sort_key(a), &sort_key(b))
}

/// 先頭ゼロを除いた数字列同士の数値比較（桁数→辞書順）
///
/// 整数へパースしないため、桁数の多い数字列でも桁あふれしない。
fn compare_runs(a: &str, b: &str) -> Ordering {
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}

fn strip_extension(name: &str) -> &str {
    match name.rfind('.') {
        Some(idx) => &name[..idx],
        None => name,
    }
}

fn trim_zeros(run: &str) -> &str {
    let trimmed = run.trim_start_matches('0');
    if trimmed.is_empty() {
        "0"
    } else {
        trimmed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sorted(names: &[&str]) -> Vec<String> {
        let mut keyed: Vec<SortKey> = names.iter().map(|n| sort_key(n)).collect();
        keyed.sort_by(compare_keys);
        keyed.into_iter().map(|k| k.raw).collect()
    }

    #[test]
    fn test_numeric_order() {
        assert_eq!(
            sorted(&["10.png", "2.png", "1.png"]),
            vec!["1.png", "2.png", "10.png"]
        );
    }

    #[test]
    fn test_multi_digit_run() {
        assert_eq!(
            sorted(&["a10.png", "a9.png"]),
            vec!["a9.png", "a10.png"]
        );
    }

    #[test]
    fn test_positional_runs() {
        assert_eq!(
            sorted(&["cap2-10.png", "cap10-1.png", "cap2-3.png"]),
            vec!["cap2-3.png", "cap2-10.png", "cap10-1.png"]
        );
    }

    #[test]
    fn test_shorter_run_sequence_sorts_last() {
        // 数字が尽きた側は番兵扱いで後ろに並ぶ
        assert_eq!(
            sorted(&["a1.png", "a1b2.png"]),
            vec!["a1b2.png", "a1.png"]
        );
    }

    #[test]
    fn test_no_digits_sort_after_numbered() {
        assert_eq!(
            sorted(&["zebra.png", "99.png", "apple.png"]),
            vec!["99.png", "apple.png", "zebra.png"]
        );
    }

    #[test]
    fn test_leading_zeros_tie_break_by_raw() {
        assert_eq!(sorted(&["00.png", "0.png"]), vec!["0.png", "00.png"]);
        assert_eq!(
            sorted(&["img2.png", "img02.png"]),
            vec!["img02.png", "img2.png"]
        );
    }

    #[test]
    fn test_extension_digits_ignored() {
        // 拡張子内の数字は数値比較には使わない
        assert_eq!(natural_cmp("abc.mp4", "abc.mp4"), Ordering::Equal);
        assert_eq!(
            sorted(&["b.png", "a.mp4"]),
            vec!["a.mp4", "b.png"]
        );
    }

    #[test]
    fn test_case_insensitive_tie_break() {
        assert_eq!(
            sorted(&["Banana.png", "apple.png"]),
            vec!["apple.png", "Banana.png"]
        );
    }

    #[test]
    fn test_huge_numbers() {
        // u64に収まらない桁数でも数値として比較できる
        assert_eq!(
            sorted(&[
                "100000000000000000000000000.png",
                "99999999999999999999999999.png",
            ]),
            vec![
                "99999999999999999999999999.png",
                "100000000000000000000000000.png",
            ]
        );
    }

    #[test]
    fn test_no_extension() {
        assert_eq!(sorted(&["archivo", "2"]), vec!["2", "archivo"]);
    }
}
