pub mod crop_csv;

pub use crop_csv::{read_crop_csv, read_crop_csv_with_config, CropCsvConfig};
