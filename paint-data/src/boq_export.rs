//! Bill-of-quantities CSV export.
//!
//! The file opens in spreadsheet programs as-is: it starts with a UTF-8
//! byte-order mark so Thai labels render correctly, uses `,` as the
//! delimiter and `\n` as the line terminator, and quotes only fields that
//! need it.
//!
//! Layout:
//!
//! ```text
//! รายการ (Item),จำนวน (Qty),หน่วย (Unit),ราคาต่อหน่วย (Unit Price),ราคารวม (Total Cost)
//! งานภายใน (Interior),,,,
//! 1. สีรองพื้นปูนเก่า,1,ถัง,2500,2500
//! 2. สีทับหน้า (ภายใน),1,ถัง,2500,2500
//!    รวมค่าวัสดุ,,,,5000
//! 3. ค่าแรงทาสีผนัง,58.2,ตร.ม.,70,4074
//!    รวมค่าแรง,,,,4074
//! ,,,,
//! งบประมาณสุทธิ (Grand Total),,,,9074
//! ```

use std::fs::File;
use std::io::{BufWriter, Read, Write};
use std::path::Path;

use paint_core::models::labels;
use paint_core::{CalculationResult, FullEstimate, MaterialLine, Scope};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

/// File name offered when the user does not choose one.
pub const DEFAULT_FILE_NAME: &str = "school_paint_estimate.csv";

pub const HEADER: [&str; 5] = [
    "รายการ (Item)",
    "จำนวน (Qty)",
    "หน่วย (Unit)",
    "ราคาต่อหน่วย (Unit Price)",
    "ราคารวม (Total Cost)",
];

pub const INTERIOR_TITLE: &str = "งานภายใน (Interior)";
pub const EXTERIOR_TITLE: &str = "งานภายนอก (Exterior)";
pub const MATERIAL_SUBTOTAL: &str = "   รวมค่าวัสดุ";
pub const LABOR_SUBTOTAL: &str = "   รวมค่าแรง";
pub const GRAND_TOTAL: &str = "งบประมาณสุทธิ (Grand Total)";

const BOM: &[u8] = b"\xEF\xBB\xBF";

/// Errors that can occur while writing or reading a BOQ file.
#[derive(Debug, Error)]
pub enum BoqExportError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("export is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

/// One row of the bill of quantities.
///
/// Title, subtotal and separator rows leave the numeric columns empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoqRow {
    pub item: String,
    pub quantity: Option<Decimal>,
    pub unit: String,
    pub unit_price: Option<Decimal>,
    pub total: Option<Decimal>,
}

impl BoqRow {
    fn title(item: &str) -> Self {
        Self {
            item: item.to_string(),
            quantity: None,
            unit: String::new(),
            unit_price: None,
            total: None,
        }
    }

    fn subtotal(
        item: &str,
        total: Decimal,
    ) -> Self {
        Self {
            total: Some(total.normalize()),
            ..Self::title(item)
        }
    }

    fn blank() -> Self {
        Self::title("")
    }

    fn line(
        index: &mut u32,
        name: &str,
        quantity: Decimal,
        unit: &str,
        unit_price: Decimal,
        total: Decimal,
    ) -> Self {
        let row = Self {
            item: format!("{index}. {name}"),
            quantity: Some(quantity.normalize()),
            unit: unit.to_string(),
            unit_price: Some(unit_price.normalize()),
            total: Some(total.normalize()),
        };
        *index += 1;
        row
    }

    fn material(
        index: &mut u32,
        line: &MaterialLine,
    ) -> Self {
        Self::line(
            index,
            &line.name,
            Decimal::from(line.buckets),
            labels::UNIT_BUCKET,
            line.price_per_bucket,
            line.cost,
        )
    }
}

/// Flattens an estimate into BOQ rows, header excluded.
///
/// Each present scope contributes a titled section whose items are numbered
/// from 1; the grand-total row comes last. A ceiling primer with zero coats
/// is left out entirely.
pub fn boq_rows(estimate: &FullEstimate) -> Vec<BoqRow> {
    let mut rows = Vec::new();

    for (scope, result) in estimate.sections() {
        let title = match scope {
            Scope::Exterior => EXTERIOR_TITLE,
            Scope::Interior | Scope::Both => INTERIOR_TITLE,
        };
        push_section(&mut rows, title, result);
    }

    rows.push(BoqRow::subtotal(GRAND_TOTAL, estimate.grand_total));
    rows
}

fn push_section(
    rows: &mut Vec<BoqRow>,
    title: &str,
    result: &CalculationResult,
) {
    let mut index = 1;
    rows.push(BoqRow::title(title));

    rows.push(BoqRow::material(&mut index, &result.primer));
    rows.push(BoqRow::material(&mut index, &result.topcoat));
    if let Some(ceiling) = &result.ceiling {
        if ceiling.primer.coats > 0 {
            rows.push(BoqRow::material(&mut index, &ceiling.primer));
        }
        rows.push(BoqRow::material(&mut index, &ceiling.topcoat));
    }
    rows.push(BoqRow::subtotal(MATERIAL_SUBTOTAL, result.total_material));

    rows.push(BoqRow::line(
        &mut index,
        labels::WALL_LABOR,
        result.net_area,
        labels::UNIT_SQM,
        result.labor.rate,
        result.labor.cost,
    ));
    if let Some(ceiling) = &result.ceiling {
        rows.push(BoqRow::line(
            &mut index,
            labels::CEILING_LABOR,
            ceiling.area,
            labels::UNIT_SQM,
            ceiling.labor_rate,
            ceiling.labor_cost,
        ));
    }
    if let Some(scaffolding) = &result.scaffolding {
        rows.push(BoqRow::line(
            &mut index,
            labels::SCAFFOLDING,
            result.net_area,
            labels::UNIT_SQM,
            scaffolding.rate,
            scaffolding.cost,
        ));
    }
    rows.push(BoqRow::subtotal(LABOR_SUBTOTAL, result.total_labor));

    rows.push(BoqRow::blank());
}

/// Writes the BOQ for `estimate`, byte-order mark first.
pub fn write_boq<W: Write>(
    mut writer: W,
    estimate: &FullEstimate,
) -> Result<(), BoqExportError> {
    writer.write_all(BOM)?;

    let mut csv_writer = csv::WriterBuilder::new()
        .has_headers(false)
        .terminator(csv::Terminator::Any(b'\n'))
        .quote_style(csv::QuoteStyle::Necessary)
        .from_writer(writer);

    csv_writer.write_record(HEADER)?;
    for row in boq_rows(estimate) {
        csv_writer.serialize(row)?;
    }
    csv_writer.flush()?;

    Ok(())
}

/// Renders the BOQ into a string, byte-order mark included.
pub fn boq_to_string(estimate: &FullEstimate) -> Result<String, BoqExportError> {
    let mut buffer = Vec::new();
    write_boq(&mut buffer, estimate)?;
    Ok(String::from_utf8(buffer)?)
}

/// Writes the BOQ to `path`, replacing any existing file.
pub fn export_to_file<P: AsRef<Path>>(
    path: P,
    estimate: &FullEstimate,
) -> Result<(), BoqExportError> {
    let path = path.as_ref();
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    write_boq(&mut writer, estimate)?;
    writer.flush()?;

    info!(path = %path.display(), "exported bill of quantities");
    Ok(())
}

/// Reads a BOQ file produced by [`write_boq`] back into rows, header
/// excluded.
pub fn read_boq<R: Read>(mut reader: R) -> Result<Vec<BoqRow>, BoqExportError> {
    let mut content = String::new();
    reader.read_to_string(&mut content)?;
    let content = content.strip_prefix('\u{feff}').unwrap_or(&content);

    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(content.as_bytes());

    let mut rows = Vec::new();
    for result in csv_reader.records() {
        let record = result?;
        rows.push(record.deserialize(None)?);
    }

    Ok(rows)
}
