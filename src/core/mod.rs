pub mod date;
pub mod etl;
pub mod extractor;
pub mod layout;
pub mod pipeline;
pub mod writer;

pub use crate::domain::model::{Item, OrderInputs, OrderRecord, SheetPlan};
pub use crate::domain::ports::{ConfigProvider, Pipeline, Storage};
pub use crate::utils::error::Result;
