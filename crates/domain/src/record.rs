//! # レコード
//!
//! アクセスリクエストの対象となるメタデータレコード。
//! 外部のレコードストアが所有・永続化し、このモジュールでは読み取り専用で扱う。

use derive_more::Display;
use serde::Serialize;
use serde_json::{Map, Value as JsonValue};

/// レコード ID（recid）
///
/// 外部レコードストアが採番する整数識別子。
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Display,
)]
#[display("{_0}")]
#[serde(transparent)]
pub struct RecordId(i64);

impl RecordId {
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

/// メタデータレコード
///
/// `recid` とメタデータ（JSON オブジェクト）を保持する。
/// シリアライズ時はメタデータのキーをトップレベルに展開するため、
/// テンプレートからは `{{ record.title }}` のように参照できる。
/// メタデータ側の `recid` キーは型付きの `recid` と衝突するため保持しない。
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Record {
    recid:    RecordId,
    #[serde(flatten)]
    metadata: Map<String, JsonValue>,
}

impl Record {
    /// JSON 値からレコードを構築する
    ///
    /// オブジェクト以外の値はメタデータなしとして扱う。
    pub fn from_json(recid: RecordId, metadata: JsonValue) -> Self {
        let mut metadata = match metadata {
            JsonValue::Object(map) => map,
            _ => Map::new(),
        };
        metadata.remove("recid");
        Self { recid, metadata }
    }

    pub fn recid(&self) -> RecordId {
        self.recid
    }

    pub fn metadata(&self) -> &Map<String, JsonValue> {
        &self.metadata
    }

    /// メタデータフィールドを取得する
    pub fn get(&self, field: &str) -> Option<&JsonValue> {
        self.metadata.get(field)
    }

    /// タイトルを取得する
    ///
    /// `title` が存在しないか文字列でない場合は `None`。
    pub fn title(&self) -> Option<&str> {
        self.get("title").and_then(JsonValue::as_str)
    }
}
