//! 設定の保持と、コーディネーター向けの値の組み立て

use std::path::{
    Path,
    PathBuf,
};
use std::sync::Arc;

use super::{
    ConfigError,
    EngineSettings,
    ReorderSettings,
    loader,
};
use crate::coordinator::{
    LocaleCatalog,
    StaticLocaleCatalog,
};
use crate::types::LocaleCode;

/// 検証済みの設定と、その読み込み元
///
/// 並び替え画面と多言語フォームはここから設定を受け取る。
#[derive(Default, Debug, Clone)]
pub struct ConfigManager {
    /// 検証済みの設定
    settings: EngineSettings,

    /// 設定ファイルのパス (デフォルト値の場合は `None`)
    source: Option<PathBuf>,
}

impl ConfigManager {
    /// デフォルト設定で作成
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// 手元の設定から作成する
    ///
    /// # Errors
    /// バリデーションエラー
    pub fn from_settings(settings: EngineSettings) -> Result<Self, ConfigError> {
        settings.validate().map_err(ConfigError::ValidationErrors)?;
        Ok(Self { settings, source: None })
    }

    /// `start` から親へ向かって設定ファイルを探して読み込む
    ///
    /// 見つからなければデフォルト値を使う。
    ///
    /// # Errors
    /// 見つかったファイルの読み込み、パース、バリデーションのいずれかに失敗
    pub fn discover(start: &Path) -> Result<Self, ConfigError> {
        let Some(path) = loader::find_config_file(start) else {
            tracing::debug!(start = %start.display(), "No configuration file found, using defaults");
            return Ok(Self::new());
        };

        let settings = loader::load_from_path(&path)?;
        tracing::debug!(path = %path.display(), "Configuration loaded");
        Ok(Self { settings, source: Some(path) })
    }

    /// 読み込み元のファイルを読み直す
    ///
    /// 失敗した場合は現在の設定を保持する。ファイル由来でなければ何もしない。
    ///
    /// # Errors
    /// 読み込み、パース、バリデーションのいずれかに失敗
    pub fn reload(&mut self) -> Result<(), ConfigError> {
        let Some(path) = &self.source else {
            return Ok(());
        };

        match loader::load_from_path(path) {
            Ok(settings) => {
                self.settings = settings;
                tracing::debug!(path = %path.display(), "Configuration reloaded");
                Ok(())
            }
            Err(error) => {
                tracing::warn!(path = %path.display(), %error, "Keeping previous configuration");
                Err(error)
            }
        }
    }

    /// 現在の設定
    #[must_use]
    pub const fn settings(&self) -> &EngineSettings {
        &self.settings
    }

    /// 設定ファイルのパス
    #[must_use]
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    /// 新規フォームを開くロケール
    #[must_use]
    pub fn default_locale(&self) -> LocaleCode {
        LocaleCode::new(self.settings.default_locale.as_str())
    }

    /// `offeredLocales` から作ったロケールカタログ
    #[must_use]
    pub fn locale_catalog(&self) -> Arc<dyn LocaleCatalog> {
        Arc::new(StaticLocaleCatalog::from_settings(&self.settings))
    }

    /// 並び替え画面の設定
    #[must_use]
    pub const fn reorder_settings(&self) -> ReorderSettings {
        self.settings.reorder
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::fs;

    use rstest::rstest;
    use tempfile::TempDir;

    use super::*;
    use crate::config::loader::CONFIG_FILE_NAME;

    /// new: デフォルト設定で、どのロケールも受け付ける
    #[rstest]
    fn test_new_uses_defaults() {
        let manager = ConfigManager::new();

        assert_eq!(manager.default_locale(), LocaleCode::from("en"));
        assert!(manager.source().is_none());
        assert!(manager.locale_catalog().is_offered(&LocaleCode::from("ja")));
    }

    /// from_settings: 無効な設定は拒否する
    #[rstest]
    fn test_from_settings_rejects_invalid() {
        let settings = EngineSettings { required_fields: Vec::new(), ..EngineSettings::default() };

        let result = ConfigManager::from_settings(settings);

        assert!(matches!(result, Err(ConfigError::ValidationErrors(_))));
    }

    /// discover: 設定ファイルから値を組み立てる
    #[rstest]
    fn test_discover_builds_coordinator_values() {
        let temp_dir = TempDir::new().unwrap();
        let config_content = r#"{
            "defaultLocale": "fr",
            "offeredLocales": ["fr", "en"],
            "reorder": {"maxConcurrentWrites": 2}
        }"#;
        fs::write(temp_dir.path().join(CONFIG_FILE_NAME), config_content).unwrap();

        let manager = ConfigManager::discover(temp_dir.path()).unwrap();

        assert_eq!(manager.source(), Some(temp_dir.path().join(CONFIG_FILE_NAME).as_path()));
        assert_eq!(manager.default_locale(), LocaleCode::from("fr"));
        assert_eq!(
            manager.locale_catalog().offered(),
            vec![LocaleCode::from("fr"), LocaleCode::from("en")]
        );
        assert_eq!(
            manager.reorder_settings().max_concurrent_writes.map(std::num::NonZeroUsize::get),
            Some(2)
        );
    }

    /// discover: ファイルがなければデフォルト値
    #[rstest]
    fn test_discover_without_config_file() {
        let temp_dir = TempDir::new().unwrap();

        let manager = ConfigManager::discover(temp_dir.path()).unwrap();

        assert_eq!(manager.settings().required_fields, vec!["title".to_string()]);
    }

    /// reload: 無効な内容に書き換えられても現在の設定を保持する
    #[rstest]
    fn test_reload_keeps_previous_settings_on_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join(CONFIG_FILE_NAME);
        fs::write(&path, r#"{"defaultLocale": "de"}"#).unwrap();
        let mut manager = ConfigManager::discover(temp_dir.path()).unwrap();

        fs::write(&path, r#"{"requiredFields": []}"#).unwrap();
        let result = manager.reload();

        assert!(matches!(result, Err(ConfigError::ValidationErrors(_))));
        assert_eq!(manager.default_locale(), LocaleCode::from("de"));
    }

    /// reload: 書き換え後の値を反映する
    #[rstest]
    fn test_reload_applies_new_settings() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join(CONFIG_FILE_NAME);
        fs::write(&path, r#"{"defaultLocale": "de"}"#).unwrap();
        let mut manager = ConfigManager::discover(temp_dir.path()).unwrap();

        fs::write(&path, r#"{"defaultLocale": "ar"}"#).unwrap();
        manager.reload().unwrap();

        assert_eq!(manager.default_locale(), LocaleCode::from("ar"));
    }
}
