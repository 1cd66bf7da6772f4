use crate::domain::model::{OrderRecord, SheetPlan};
use crate::utils::error::Result;

pub trait Storage {
    fn exists(&self, path: &str) -> bool;
    fn read_file(&self, path: &str) -> Result<Vec<u8>>;
    fn write_file(&self, path: &str, data: &[u8]) -> Result<()>;
}

pub trait ConfigProvider {
    fn input_path(&self) -> &str;
    fn output_dir(&self) -> &str;
    fn file_prefix(&self) -> &str;
    fn base_url(&self) -> &str;
    fn currency_code(&self) -> &str;
    fn selectors(&self) -> &crate::config::toml_config::SelectorConfig;
    fn yen_adjustment(&self) -> i64;
}

pub trait Pipeline {
    /// 訂單頁面的來源路徑
    fn source_path(&self) -> &str;
    /// 讀取並解析訂單頁面
    fn extract(&self) -> Result<OrderRecord>;
    fn transform(&self, order: OrderRecord) -> Result<SheetPlan>;
    /// 寫出試算表，回傳輸出路徑
    fn load(&self, plan: SheetPlan) -> Result<String>;
}
