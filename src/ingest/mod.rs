pub mod reader;
pub mod table;

pub use reader::{load_auto, load_csv, load_csv_reader, load_xlsx, Codificacao};
pub use table::DataTable;
