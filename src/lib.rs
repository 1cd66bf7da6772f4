pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use config::{cli::LocalStorage, prompt::Prompter, toml_config::OrderConfig};
pub use core::{etl::EtlEngine, pipeline::OrderPipeline};
pub use domain::model::{Item, OrderInputs, OrderRecord};
pub use utils::error::{OrderError, Result};
