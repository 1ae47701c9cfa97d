//! 並び替え対象のエントリ

/// エントリID。追加順に採番し、削除後も再利用しない。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntryId(pub(crate) u64);

/// 1件の論理ファイル
///
/// `content`は外部のバイト供給元を指す不透明なハンドルで、
/// このモジュールは中身を読まない。
#[derive(Debug, Clone)]
pub struct Entry<R> {
    id: EntryId,
    original_name: String,
    display_name: String,
    extension: Option<String>,
    content: R,
    insertion_order: u64,
}

impl<R> Entry<R> {
    pub(crate) fn new(id: EntryId, name: String, content: R, insertion_order: u64) -> Self {
        let extension = extension_of(&name);
        Self {
            id,
            display_name: name.clone(),
            original_name: name,
            extension,
            content,
            insertion_order,
        }
    }

    pub fn id(&self) -> EntryId {
        self.id
    }

    pub fn original_name(&self) -> &str {
        &self.original_name
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    /// 作成時に元の名前から取り込んだ拡張子
    pub fn extension(&self) -> Option<&str> {
        self.extension.as_deref()
    }

    pub fn content(&self) -> &R {
        &self.content
    }

    pub fn insertion_order(&self) -> u64 {
        self.insertion_order
    }

    /// 入力された名前に元の拡張子を付け直した表示名を作る
    ///
    /// リネーム時は常に元の拡張子を使う。入力に拡張子らしき文字列が
    /// 含まれていてもそのまま名前の一部として扱う。
    pub(crate) fn renamed(&self, base: &str) -> String {
        match &self.extension {
            Some(ext) => format!("{}.{}", base, ext),
            None => base.to_string(),
        }
    }

    pub(crate) fn set_display_name(&mut self, name: String) {
        self.display_name = name;
    }
}

/// 最後のドット以降を拡張子として取り出す。ドットがなければNone。
fn extension_of(name: &str) -> Option<String> {
    name.rfind('.').map(|idx| name[idx + 1..].to_string())
}
