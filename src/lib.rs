pub mod aggregate;
pub mod config;
pub mod error;
pub mod export;
pub mod filter;
pub mod ingest;
pub mod normalize;
pub mod report;
pub mod schema;

pub use config::{DashboardConfig, OpenPolicy};
pub use error::AppError;
pub use filter::FilterSet;
pub use report::{gerar_dashboard, Dashboard};
