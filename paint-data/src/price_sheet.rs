use std::io::{Read, Write};

use paint_core::{PricingError, PricingTable};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

/// Errors that can occur when reading or applying a pricing sheet.
#[derive(Debug, Error)]
pub enum PriceSheetError {
    #[error("CSV parse error: {0}")]
    CsvParse(String),

    #[error("Unknown price item '{item}' on line {line}")]
    UnknownItem { item: String, line: usize },

    #[error("Invalid pricing table: {0}")]
    Invalid(#[from] PricingError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<csv::Error> for PriceSheetError {
    fn from(err: csv::Error) -> Self {
        PriceSheetError::CsvParse(err.to_string())
    }
}

/// A single record from a pricing sheet.
///
/// The CSV has two columns:
/// - `item`: a pricing table key such as `primer_old` or `coverage_per_bucket`
/// - `price`: the new value; thousands separators are accepted (`"2,500"`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceRecord {
    pub item: String,
    #[serde(deserialize_with = "deserialize_price")]
    pub price: Decimal,
}

fn deserialize_price<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    s.trim()
        .replace(',', "")
        .parse::<Decimal>()
        .map_err(serde::de::Error::custom)
}

/// Loader for CSV pricing sheets.
///
/// A sheet lists only the entries it overrides; everything else keeps the
/// value of the base table it is applied to.
pub struct PriceSheetLoader;

impl PriceSheetLoader {
    /// Parse price records from a CSV reader.
    pub fn parse<R: Read>(reader: R) -> Result<Vec<PriceRecord>, PriceSheetError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);
        let mut records = Vec::new();

        for result in csv_reader.deserialize() {
            let record: PriceRecord = result?;
            records.push(record);
        }

        Ok(records)
    }

    /// Apply records on top of `base` and validate the result.
    ///
    /// Later records win when an item appears twice.
    pub fn apply(
        base: &PricingTable,
        records: &[PriceRecord],
    ) -> Result<PricingTable, PriceSheetError> {
        let mut table = base.clone();

        for (idx, record) in records.iter().enumerate() {
            let slot =
                table
                    .entry_mut(&record.item)
                    .ok_or_else(|| PriceSheetError::UnknownItem {
                        item: record.item.clone(),
                        // header is line 1
                        line: idx + 2,
                    })?;
            *slot = record.price;
            debug!(item = %record.item, price = %record.price, "price override applied");
        }

        table.validate()?;
        Ok(table)
    }

    /// Parse a sheet and apply it to the factory defaults.
    pub fn load<R: Read>(reader: R) -> Result<PricingTable, PriceSheetError> {
        let records = Self::parse(reader)?;
        Self::apply(&PricingTable::default(), &records)
    }
}

/// Write every entry of `table` as a pricing sheet.
///
/// The output can be edited and loaded back with [`PriceSheetLoader`].
pub fn write_price_sheet<W: Write>(
    writer: W,
    table: &PricingTable,
) -> Result<(), PriceSheetError> {
    let mut csv_writer = csv::Writer::from_writer(writer);

    for (item, price) in table.entries() {
        csv_writer.serialize(PriceRecord {
            item: item.to_string(),
            price: price.normalize(),
        })?;
    }
    csv_writer.flush()?;

    Ok(())
}
