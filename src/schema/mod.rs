pub mod classifier;
pub mod field_map;

pub use classifier::{detectar_modo, ReportMode, COLUNAS_CONSUMER};
pub use field_map::{Concept, FieldMap, ReportSchema};
