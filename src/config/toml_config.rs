use crate::core::ConfigProvider;
use crate::utils::error::{OrderError, Result};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_INPUT: &str = "order.html";
pub const DEFAULT_BASE_URL: &str = "https://www.suruga-ya.com";
pub const DEFAULT_FILE_PREFIX: &str = "Suruga_Order_";
pub const DEFAULT_YEN_ADJUSTMENT: i64 = 900;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OrderConfig {
    pub source: SourceConfig,
    pub selectors: SelectorConfig,
    pub output: OutputConfig,
    pub layout: LayoutConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    pub input: String,
    pub base_url: String,
    pub currency_code: String,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            input: DEFAULT_INPUT.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            currency_code: "JPY".to_string(),
        }
    }
}

/// CSS class names (and one tag name) that locate the order data on the page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectorConfig {
    pub date_heading: String,
    pub date_value: String,
    pub item_table: String,
    pub active_row: String,
    pub name_tag: String,
    pub price_new: String,
    pub price_old: String,
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            date_heading: "title_f25".to_string(),
            date_value: "align-items-center".to_string(),
            item_table: "table-list".to_string(),
            active_row: "table-active".to_string(),
            name_tag: "h5".to_string(),
            price_new: "price-new".to_string(),
            price_old: "price-old".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub directory: String,
    pub file_prefix: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: ".".to_string(),
            file_prefix: DEFAULT_FILE_PREFIX.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Yen subtracted from the total paid before the exchange rate is worked out.
    pub yen_adjustment: i64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            yen_adjustment: DEFAULT_YEN_ADJUSTMENT,
        }
    }
}

impl OrderConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(OrderError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        // 處理環境變數替換
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| OrderError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${SURUGA_BASE_URL})
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| OrderError::ConfigValidationError {
            field: "env_substitution".to_string(),
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    /// 驗證配置的合理性
    pub fn validate_config(&self) -> Result<()> {
        validation::validate_path("source.input", &self.source.input)?;
        validation::validate_file_extension("source.input", &self.source.input, &["html", "htm"])?;
        validation::validate_base_url("source.base_url", &self.source.base_url)?;
        validation::validate_not_blank("source.currency_code", &self.source.currency_code)?;

        let selectors = &self.selectors;
        for (field, value) in [
            ("selectors.date_heading", &selectors.date_heading),
            ("selectors.date_value", &selectors.date_value),
            ("selectors.item_table", &selectors.item_table),
            ("selectors.active_row", &selectors.active_row),
            ("selectors.name_tag", &selectors.name_tag),
            ("selectors.price_new", &selectors.price_new),
            ("selectors.price_old", &selectors.price_old),
        ] {
            validation::validate_not_blank(field, value)?;
        }

        validation::validate_path("output.directory", &self.output.directory)?;
        validation::validate_file_prefix("output.file_prefix", &self.output.file_prefix)?;

        if self.layout.yen_adjustment < 0 {
            return Err(OrderError::InvalidConfigValueError {
                field: "layout.yen_adjustment".to_string(),
                value: self.layout.yen_adjustment.to_string(),
                reason: "Adjustment cannot be negative".to_string(),
            });
        }

        Ok(())
    }
}

impl ConfigProvider for OrderConfig {
    fn input_path(&self) -> &str {
        &self.source.input
    }

    fn output_dir(&self) -> &str {
        &self.output.directory
    }

    fn file_prefix(&self) -> &str {
        &self.output.file_prefix
    }

    fn base_url(&self) -> &str {
        &self.source.base_url
    }

    fn currency_code(&self) -> &str {
        &self.source.currency_code
    }

    fn selectors(&self) -> &SelectorConfig {
        &self.selectors
    }

    fn yen_adjustment(&self) -> i64 {
        self.layout.yen_adjustment
    }
}

impl Validate for OrderConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
