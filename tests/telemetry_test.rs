//! グローバルな tracing subscriber の初期化に関する結合テスト
//!
//! subscriber はプロセスに一つしか登録できないため、このバイナリにはテストを一つだけ置く。

#![allow(clippy::unwrap_used)]
#![allow(missing_docs)]

use draft_reconciler::config::TelemetrySettings;
use draft_reconciler::telemetry::{
    self,
    TelemetryError,
};
use googletest::prelude::*;
use tempfile::TempDir;

#[test]
fn init_writes_to_log_file_and_installs_only_once() {
    let log_dir = TempDir::new().unwrap();
    let settings = TelemetrySettings {
        filter: "info".to_string(),
        log_directory: Some(log_dir.path().to_path_buf()),
    };

    let guard = telemetry::init(&settings).unwrap();
    assert!(guard.is_some());

    tracing::info!(batch = 7, "Position batch settled");
    tracing::debug!("Filtered out below info");
    drop(guard);

    let content = std::fs::read_to_string(log_dir.path().join("draft-reconciler.log")).unwrap();
    assert_that!(content, contains_substring("Position batch settled"));
    assert_that!(content, contains_substring("batch=7"));
    assert_that!(content, not(contains_substring("Filtered out below info")));

    let second = telemetry::init(&TelemetrySettings::default());
    assert!(matches!(second, Err(TelemetryError::Install(_))));
}
