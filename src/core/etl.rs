use crate::core::{OrderRecord, Pipeline, SheetPlan};
use crate::utils::error::{OrderError, Result};

/// What a finished run produced.
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    pub output_path: String,
    pub file_name: String,
    pub item_count: usize,
}

pub struct EtlEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> EtlEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    /// Extract and plan only; nothing is written.
    pub fn plan(&self) -> Result<(OrderRecord, SheetPlan)> {
        let source = self.pipeline.source_path();

        // Extract
        tracing::info!("📄 Extracting order from {}", source);
        let order = self.pipeline.extract()?;
        tracing::info!(
            "Extracted {} items dated {}",
            order.items.len(),
            order.order_date
        );

        // 沒有任何品項時不建立試算表
        if order.items.is_empty() {
            return Err(OrderError::EmptyItemList {
                path: source.to_string(),
            });
        }

        // Transform
        let plan = self.pipeline.transform(order.clone())?;
        tracing::info!(
            "Planned rows {}..={} with footer on row {}",
            plan.first_row,
            plan.last_row,
            plan.footer_row
        );

        Ok((order, plan))
    }

    /// 試跑報告：訂單 JSON 加上預計的版面
    pub fn dry_run_report(&self) -> Result<String> {
        let (order, plan) = self.plan()?;
        let order_json = serde_json::to_string_pretty(&order)?;

        Ok(format!(
            "{}\n\n📋 Planned layout:\n  Item rows: {}..={}\n  Footer row: {}\n  Cells: {}\n  Output file: {}",
            order_json,
            plan.first_row,
            plan.last_row,
            plan.footer_row,
            plan.cells.len(),
            plan.file_name
        ))
    }

    pub fn run(&self) -> Result<RunSummary> {
        tracing::info!("Starting order sheet run...");
        let (_, plan) = self.plan()?;
        let file_name = plan.file_name.clone();
        let item_count = plan.item_count;

        // Load
        let output_path = self.pipeline.load(plan)?;
        tracing::info!("💾 Output saved to: {}", output_path);

        Ok(RunSummary {
            output_path,
            file_name,
            item_count,
        })
    }
}
