use crate::core::extractor::OrderExtractor;
use crate::core::layout::SheetLayout;
use crate::core::writer::render_workbook;
use crate::core::{ConfigProvider, OrderInputs, OrderRecord, Pipeline, SheetPlan, Storage};
use crate::utils::error::{OrderError, Result};
use std::path::{Component, Path};

pub struct OrderPipeline<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
    inputs: OrderInputs,
    extractor: OrderExtractor,
}

impl<S: Storage, C: ConfigProvider> OrderPipeline<S, C> {
    pub fn new(storage: S, config: C, inputs: OrderInputs) -> Result<Self> {
        let extractor = OrderExtractor::new(&config)?;
        Ok(Self {
            storage,
            config,
            inputs,
            extractor,
        })
    }

    /// 預設目錄 (".") 時只回傳檔名
    pub fn output_path(&self, file_name: &str) -> String {
        let dir = Path::new(self.config.output_dir());
        if dir.components().all(|c| c == Component::CurDir) {
            return file_name.to_string();
        }
        dir.join(file_name).to_string_lossy().into_owned()
    }
}

impl<S: Storage, C: ConfigProvider> Pipeline for OrderPipeline<S, C> {
    fn source_path(&self) -> &str {
        self.config.input_path()
    }

    fn extract(&self) -> Result<OrderRecord> {
        let input = self.config.input_path();
        if !self.storage.exists(input) {
            return Err(OrderError::MissingInputFile {
                path: input.to_string(),
            });
        }

        let raw = self.storage.read_file(input)?;
        tracing::debug!("Read {} bytes from {}", raw.len(), input);
        let html = String::from_utf8_lossy(&raw);

        Ok(self.extractor.parse_document(&html))
    }

    fn transform(&self, order: OrderRecord) -> Result<SheetPlan> {
        SheetLayout::new(self.config.file_prefix(), self.config.yen_adjustment())
            .build_sheet_plan(&order, &self.inputs)
    }

    fn load(&self, plan: SheetPlan) -> Result<String> {
        let output_path = self.output_path(&plan.file_name);

        let data = render_workbook(&plan)?;
        tracing::debug!("Writing workbook ({} bytes) to storage", data.len());
        self.storage.write_file(&output_path, &data)?;

        Ok(output_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::toml_config::OrderConfig;
    use crate::core::etl::EtlEngine;
    use crate::domain::model::CellValue;
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct MockStorage {
        files: Arc<Mutex<HashMap<String, Vec<u8>>>>,
    }

    impl MockStorage {
        fn with_file(path: &str, data: &str) -> Self {
            let storage = Self::default();
            storage
                .files
                .lock()
                .unwrap()
                .insert(path.to_string(), data.as_bytes().to_vec());
            storage
        }

        fn get_file(&self, path: &str) -> Option<Vec<u8>> {
            self.files.lock().unwrap().get(path).cloned()
        }

        fn file_count(&self) -> usize {
            self.files.lock().unwrap().len()
        }
    }

    impl Storage for MockStorage {
        fn exists(&self, path: &str) -> bool {
            self.files.lock().unwrap().contains_key(path)
        }

        fn read_file(&self, path: &str) -> Result<Vec<u8>> {
            self.get_file(path).ok_or_else(|| {
                OrderError::IoError(std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    format!("File not found: {}", path),
                ))
            })
        }

        fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
            self.files
                .lock()
                .unwrap()
                .insert(path.to_string(), data.to_vec());
            Ok(())
        }
    }

    const ORDER_PAGE: &str = r#"<html><body>
<div class="title_f25">Order</div>
<div class="align-items-center">19 Jan 2026 - 10:00</div>
<table class="table-list"><tbody>
<tr class="table-active"><td></td><td><a href="/item/1"><h5>Widget</h5></a></td>
<td><div class="price-new">JPY 1,000</div></td></tr>
<tr class="table-active"><td></td><td><a href="/item/2"><h5>Gadget</h5></a></td>
<td><div class="price-new">JPY 2,400</div><div class="price-old">JPY 3,000</div></td></tr>
</tbody></table></body></html>"#;

    fn inputs() -> OrderInputs {
        OrderInputs {
            first_line: 875,
            gbp_paid: 25.5,
            yen_paid: 4300.0,
        }
    }

    #[test]
    fn test_extract_reads_from_storage() {
        let storage = MockStorage::with_file("order.html", ORDER_PAGE);
        let pipeline = OrderPipeline::new(storage, OrderConfig::default(), inputs()).unwrap();

        let order = pipeline.extract().unwrap();

        assert_eq!(order.order_date, "19 Jan, 2026");
        assert_eq!(order.items.len(), 2);
        assert_eq!(order.items[1].orig, 3000);
    }

    #[test]
    fn test_extract_missing_file() {
        let pipeline =
            OrderPipeline::new(MockStorage::default(), OrderConfig::default(), inputs()).unwrap();

        let err = pipeline.extract().unwrap_err();
        assert!(matches!(err, OrderError::MissingInputFile { ref path } if path == "order.html"));
    }

    #[test]
    fn test_transform_uses_configured_layout() {
        let mut config = OrderConfig::default();
        config.layout.yen_adjustment = 500;
        let storage = MockStorage::with_file("order.html", ORDER_PAGE);
        let pipeline = OrderPipeline::new(storage, config, inputs()).unwrap();

        let order = pipeline.extract().unwrap();
        let plan = pipeline.transform(order).unwrap();

        assert_eq!(plan.last_row, 876);
        assert_eq!(
            plan.cell(875, 16).unwrap().value,
            CellValue::Formula("=$R$875/($S$875-500+$V$875)".to_string())
        );
    }

    #[test]
    fn test_engine_writes_one_file() {
        let mut config = OrderConfig::default();
        config.output.directory = "sheets".to_string();
        let storage = MockStorage::with_file("order.html", ORDER_PAGE);
        let pipeline = OrderPipeline::new(storage.clone(), config, inputs()).unwrap();

        let summary = EtlEngine::new(pipeline).run().unwrap();

        assert_eq!(summary.item_count, 2);
        assert_eq!(summary.file_name, "Suruga_Order_875.xlsx");
        let expected_path = Path::new("sheets")
            .join("Suruga_Order_875.xlsx")
            .to_string_lossy()
            .into_owned();
        assert_eq!(summary.output_path, expected_path);
        assert!(storage.get_file(&expected_path).is_some());
        assert_eq!(storage.file_count(), 2);
    }

    #[test]
    fn test_default_output_dir_gives_bare_file_name() {
        let storage = MockStorage::with_file("order.html", ORDER_PAGE);
        let pipeline = OrderPipeline::new(storage.clone(), OrderConfig::default(), inputs()).unwrap();
        assert_eq!(pipeline.output_path("Suruga_Order_875.xlsx"), "Suruga_Order_875.xlsx");

        let mut config = OrderConfig::default();
        config.output.directory = "./".to_string();
        let pipeline = OrderPipeline::new(storage.clone(), config, inputs()).unwrap();
        assert_eq!(pipeline.output_path("Suruga_Order_875.xlsx"), "Suruga_Order_875.xlsx");

        let summary = EtlEngine::new(
            OrderPipeline::new(storage.clone(), OrderConfig::default(), inputs()).unwrap(),
        )
        .run()
        .unwrap();
        assert_eq!(summary.output_path, "Suruga_Order_875.xlsx");
        assert!(storage.get_file("Suruga_Order_875.xlsx").is_some());
    }

    #[test]
    fn test_engine_stops_on_empty_item_list() {
        let page = r#"<div class="title_f25"></div><div class="align-items-center">19 Jan 2026</div>
<table class="table-list"><tbody><tr class="cancelled"><td></td><td><a href="/x"><h5>X</h5></a></td>
<td><div class="price-new">1</div></td></tr></tbody></table>"#;
        let storage = MockStorage::with_file("order.html", page);
        let pipeline = OrderPipeline::new(storage.clone(), OrderConfig::default(), inputs()).unwrap();

        let err = EtlEngine::new(pipeline).run().unwrap_err();

        assert!(matches!(err, OrderError::EmptyItemList { .. }));
        // only the input page is present
        assert_eq!(storage.file_count(), 1);
    }
}
