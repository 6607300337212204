pub mod csv_export;
pub mod json_export;

pub use csv_export::{export_to_csv, write_csv};
pub use json_export::{export_to_json, to_json_line};
