//! 設定ファイルの探索と読み込み

use std::path::{
    Path,
    PathBuf,
};

use super::{
    ConfigError,
    EngineSettings,
};

/// 設定ファイル名
pub(super) const CONFIG_FILE_NAME: &str = ".draft-reconciler.json";

/// `start` から親ディレクトリへ向かって設定ファイルを探す
///
/// 画面ごとのサブディレクトリから起動しても、リポジトリ直下の設定が見つかる。
/// 最も近いファイルを返す。
pub(super) fn find_config_file(start: &Path) -> Option<PathBuf> {
    start.ancestors().map(|dir| dir.join(CONFIG_FILE_NAME)).find(|path| path.is_file())
}

/// 設定ファイルを読み込み、バリデーションまで行う
///
/// # Errors
/// - ファイル読み込みエラー
/// - JSON パースエラー (`maxConcurrentWrites: 0` もここで弾かれる)
/// - バリデーションエラー
pub(super) fn load_from_path(path: &Path) -> Result<EngineSettings, ConfigError> {
    tracing::debug!(path = %path.display(), "Loading configuration");

    let content = std::fs::read_to_string(path)?;
    let settings: EngineSettings = serde_json::from_str(&content)?;
    settings.validate().map_err(ConfigError::ValidationErrors)?;

    Ok(settings)
}
