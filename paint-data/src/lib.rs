//! File formats for the school paint estimator: the bill-of-quantities
//! CSV export and the CSV pricing sheet.

pub mod boq_export;
pub mod price_sheet;

pub use boq_export::{
    BoqExportError, BoqRow, DEFAULT_FILE_NAME, boq_rows, boq_to_string, export_to_file, read_boq,
    write_boq,
};
pub use price_sheet::{PriceRecord, PriceSheetError, PriceSheetLoader, write_price_sheet};
