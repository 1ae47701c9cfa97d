//! 画像バッチの並び替えコア
//!
//! エントリ一覧と、絞り込み・自然順ソートを適用した表示順（ビュー）を持つ。
//! ビューは操作のたびに作り直す。手動移動だけはビューへの一時的な操作で、
//! 次にビューを作り直す操作が来た時点で自然順に戻る。

pub mod compare;
mod entry;

pub use compare::natural_cmp;
pub use entry::{Entry, EntryId};

use crate::error::{ImageBatchError, Result};
use compare::SortKey;

/// 並び替え・リネーム・絞り込みを担う論理ファイル集合
#[derive(Debug)]
pub struct OrderedFileSet<R> {
    entries: Vec<Entry<R>>,
    view: Vec<EntryId>,
    filter: String,
    selected: Option<EntryId>,
    next_id: u64,
    next_order: u64,
}

impl<R> Default for OrderedFileSet<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R> OrderedFileSet<R> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            view: Vec::new(),
            filter: String::new(),
            selected: None,
            next_id: 0,
            next_order: 0,
        }
    }

    /// ファイル選択1回分のエントリをまとめて追加する
    ///
    /// 既存のエントリには手を付けず末尾に連結する。同名ファイルの重複も
    /// そのまま受け付ける。戻り値は採番したIDの列。
    pub fn add_batch<I>(&mut self, batch: I) -> Vec<EntryId>
    where
        I: IntoIterator<Item = (String, R)>,
    {
        let mut added = Vec::new();
        for (name, content) in batch {
            let id = EntryId(self.next_id);
            self.next_id += 1;
            let order = self.next_order;
            self.next_order += 1;
            self.entries.push(Entry::new(id, name, content, order));
            added.push(id);
        }
        self.regenerate();
        added
    }

    /// 絞り込み文字列を設定する（空文字で解除）
    pub fn set_filter(&mut self, filter: &str) {
        self.filter = filter.to_string();
        self.regenerate();
    }

    pub fn filter(&self) -> &str {
        &self.filter
    }

    /// 表示名を変更する
    ///
    /// 空白だけの名前はエラーにして状態を変えない。新しい表示名は
    /// 入力値に元の拡張子を付け直したもの。IDが存在しなければ何もしない。
    pub fn rename(&mut self, id: EntryId, new_base: &str) -> Result<()> {
        let trimmed = new_base.trim();
        if trimmed.is_empty() {
            return Err(ImageBatchError::InvalidName(
                "空の名前は設定できません".into(),
            ));
        }

        if let Some(entry) = self.entries.iter_mut().find(|e| e.id() == id) {
            let renamed = entry.renamed(trimmed);
            entry.set_display_name(renamed);
            self.regenerate();
        }

        Ok(())
    }

    /// ビュー内でエントリを指定位置へ動かす
    ///
    /// 位置はビューの範囲に丸める。IDがビューにない場合は何もしない。
    /// この移動はビュー限りで、次の再生成で自然順に戻る。
    pub fn move_to(&mut self, id: EntryId, index: usize) {
        let Some(from) = self.view.iter().position(|&v| v == id) else {
            return;
        };
        let to = index.min(self.view.len() - 1);
        let moved = self.view.remove(from);
        self.view.insert(to, moved);
    }

    /// エントリを削除する。存在しないIDは何もしない。
    pub fn remove(&mut self, id: EntryId) {
        let before = self.entries.len();
        self.entries.retain(|e| e.id() != id);
        if self.entries.len() != before {
            self.regenerate();
        }
    }

    /// 全エントリを破棄する
    ///
    /// 追加順カウンタは0に戻す。IDの採番は続きからで、削除済みIDが
    /// 新しいエントリを指すことはない。絞り込みはそのまま残る。
    pub fn clear(&mut self) {
        self.entries.clear();
        self.view.clear();
        self.selected = None;
        self.next_order = 0;
    }

    /// 現在のビュー順で全エントリを連番リネームする
    ///
    /// 1始まりのゼロ埋め連番に元の拡張子を付け直す。
    /// 桁数は件数に合わせ、最低2桁。
    pub fn renumber(&mut self) {
        let width = pad_width(self.view.len());
        let renames: Vec<(EntryId, String)> = self
            .view
            .iter()
            .enumerate()
            .map(|(i, &id)| (id, format!("{:0width$}", i + 1, width = width)))
            .collect();

        for (id, base) in renames {
            if let Some(entry) = self.entries.iter_mut().find(|e| e.id() == id) {
                let renamed = entry.renamed(&base);
                entry.set_display_name(renamed);
            }
        }
        self.regenerate();
    }

    /// ビュー順の(表示名, コンテンツ)列を返す
    ///
    /// 読み取り専用で、間に操作を挟まなければ何度呼んでも同じ結果になる。
    pub fn export_order(&self) -> Vec<(String, R)>
    where
        R: Clone,
    {
        self.view
            .iter()
            .filter_map(|&id| self.entry(id))
            .map(|e| (e.display_name().to_string(), e.content().clone()))
            .collect()
    }

    pub fn entry(&self, id: EntryId) -> Option<&Entry<R>> {
        self.entries.iter().find(|e| e.id() == id)
    }

    /// ビュー順のエントリ参照列
    pub fn view(&self) -> Vec<&Entry<R>> {
        self.view
            .iter()
            .filter_map(|&id| self.entry(id))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn view_len(&self) -> usize {
        self.view.len()
    }

    pub fn selected(&self) -> Option<EntryId> {
        self.selected
    }

    pub fn selected_entry(&self) -> Option<&Entry<R>> {
        self.selected.and_then(|id| self.entry(id))
    }

    /// ビュー内での選択位置（0始まり）
    pub fn selected_position(&self) -> Option<usize> {
        self.selected
            .and_then(|id| self.view.iter().position(|&v| v == id))
    }

    /// ビューにあるエントリを選択する。ビューにないIDは無視する。
    pub fn select(&mut self, id: EntryId) {
        if self.view.contains(&id) {
            self.selected = Some(id);
        }
    }

    pub fn select_next(&mut self) {
        if let Some(pos) = self.selected_position() {
            if pos + 1 < self.view.len() {
                self.selected = Some(self.view[pos + 1]);
            }
        }
    }

    pub fn select_prev(&mut self) {
        if let Some(pos) = self.selected_position() {
            if pos > 0 {
                self.selected = Some(self.view[pos - 1]);
            }
        }
    }

    /// 絞り込みと自然順ソートでビューを作り直し、選択を引き直す
    fn regenerate(&mut self) {
        let filter = self.filter.to_lowercase();
        let mut keyed: Vec<(SortKey, u64, EntryId)> = self
            .entries
            .iter()
            .filter(|e| filter.is_empty() || e.display_name().to_lowercase().contains(&filter))
            .map(|e| (compare::sort_key(e.display_name()), e.insertion_order(), e.id()))
            .collect();

        keyed.sort_by(|a, b| compare::compare_keys(&a.0, &b.0).then_with(|| a.1.cmp(&b.1)));

        self.view = keyed.into_iter().map(|(_, _, id)| id).collect();
        self.fix_selection();
    }

    /// 選択中のエントリがビューから消えたら先頭へ、ビューが空ならなしへ
    fn fix_selection(&mut self) {
        let still_visible = self
            .selected
            .map_or(false, |id| self.view.contains(&id));
        if !still_visible {
            self.selected = self.view.first().copied();
        }
    }
}

fn pad_width(count: usize) -> usize {
    count.max(1).to_string().len().max(2)
}
