use crate::core::{ConfigProvider, StoreHoursConfig};
use crate::utils::error::{Result, StatusError};
use crate::utils::validation::{
    validate_non_empty_string, validate_path, validate_range, validate_required_field, Validate,
};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub store: StoreConfig,
    pub refresh: Option<RefreshConfig>,
    pub render: RenderConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    pub name: Option<String>,
    #[serde(flatten)]
    pub hours: StoreHoursConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshConfig {
    pub interval_seconds: Option<u64>,
    pub run_once: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderConfig {
    pub output_path: String,
    pub page: Option<String>,
    pub status_json: Option<String>,
    pub console: Option<bool>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(StatusError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        // 處理環境變數替換
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| StatusError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${STORE_SITE_DIR})
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}")?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    /// 驗證配置的合理性
    pub fn validate_config(&self) -> Result<()> {
        self.store.hours.validate()?;

        if let Some(name) = &self.store.name {
            validate_non_empty_string("store.name", name)?;
        }

        if let Some(seconds) = self.refresh.as_ref().and_then(|r| r.interval_seconds) {
            validate_range("refresh.interval_seconds", seconds, 1, 24 * 60 * 60)?;
        }

        validate_path("render.output_path", &self.render.output_path)?;
        if let Some(page) = &self.render.page {
            validate_path("render.page", page)?;
        }
        if let Some(json) = &self.render.status_json {
            validate_path("render.status_json", json)?;
        }

        if !self.console_enabled() && self.render.page.is_none() && self.render.status_json.is_none()
        {
            return Err(StatusError::ConfigValidationError {
                field: "render".to_string(),
                message: "at least one of console, page or status_json must be enabled"
                    .to_string(),
            });
        }

        Ok(())
    }

    /// 取得店名，未設定時回傳預設值
    pub fn store_name(&self) -> &str {
        self.store.name.as_deref().unwrap_or("Store")
    }

    pub fn run_once(&self) -> bool {
        self.refresh.as_ref().and_then(|r| r.run_once).unwrap_or(false)
    }

    pub fn console_enabled(&self) -> bool {
        self.render.console.unwrap_or(true)
    }

    /// 需要更新的 HTML 頁面，未設定時回傳錯誤
    pub fn require_page(&self) -> Result<&String> {
        validate_required_field("render.page", &self.render.page)
    }
}

impl ConfigProvider for TomlConfig {
    fn store_hours(&self) -> Result<StoreHoursConfig> {
        self.store.hours.validate()?;
        Ok(self.store.hours)
    }

    fn refresh_interval(&self) -> Duration {
        let seconds = self
            .refresh
            .as_ref()
            .and_then(|r| r.interval_seconds)
            .unwrap_or(60);
        Duration::from_secs(seconds)
    }

    fn output_path(&self) -> &str {
        &self.render.output_path
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
