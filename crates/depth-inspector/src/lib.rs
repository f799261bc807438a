pub mod config;
pub mod error;
pub mod report;
pub mod snapshot;

pub use config::{create_example_config, InspectorConfig};
pub use error::{InspectorError, InspectorResult};
pub use report::{inspect_pool, PoolReport, Tradable};
pub use snapshot::PoolSnapshot;
