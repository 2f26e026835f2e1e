//! テスト用ユーティリティ関数
//!
//! 複数のテストモジュールで使用される共通のヘルパー関数を提供します。
#![allow(clippy::unwrap_used)]

use std::sync::Mutex;

use async_trait::async_trait;

use crate::coordinator::{
    PositionStore,
    StoreError,
};
use crate::draft::SubmissionPayload;
use crate::types::{
    LocaleCode,
    OrderedItem,
};

pub(crate) fn locale(code: &str) -> LocaleCode {
    LocaleCode::from(code)
}

/// `title` だけが必須のフィールドリスト
pub(crate) fn title_required() -> Vec<String> {
    vec!["title".to_string()]
}

/// 与えた ID 順に 1 から番号を振った行を作成する
pub(crate) fn numbered(ids: &[u32]) -> Vec<OrderedItem<u32>> {
    (1..).zip(ids).map(|(position, id)| OrderedItem::new(*id, position)).collect()
}

pub(crate) fn ids_and_positions<I: Copy>(items: &[OrderedItem<I>]) -> Vec<(I, u32)> {
    items.iter().map(|item| (item.id, item.position)).collect()
}

/// `(locale, title)` の組に変換する
pub(crate) fn payload_pairs(payload: &SubmissionPayload) -> Vec<(String, Option<String>)> {
    payload
        .iter()
        .map(|row| (row.locale.to_string(), row.record.text("title").map(ToString::to_string)))
        .collect()
}

/// 呼び出しを記録する `PositionStore`
#[derive(Debug, Default)]
pub(crate) struct RecordingPositionStore {
    /// 呼び出し順の `(id, position)`
    calls: Mutex<Vec<(u32, u32)>>,
    /// 書き込みを拒否する ID
    failing: Vec<u32>,
}

impl RecordingPositionStore {
    pub(crate) fn failing_for(ids: &[u32]) -> Self {
        Self { calls: Mutex::new(Vec::new()), failing: ids.to_vec() }
    }

    pub(crate) fn calls(&self) -> Vec<(u32, u32)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl PositionStore<u32> for RecordingPositionStore {
    async fn persist_position(&self, id: &u32, position: u32) -> Result<(), StoreError> {
        self.calls.lock().unwrap().push((*id, position));
        if self.failing.contains(id) {
            return Err(StoreError::Rejected(format!("item {id} is locked")));
        }
        Ok(())
    }
}
