//! Integration tests for the paint-data file formats.
//!
//! These tests exercise the pricing sheet and BOQ export against files on
//! disk, the way the CLI uses them.

use std::fs::File;
use std::path::PathBuf;

use paint_core::calculations::{EstimateInput, estimate};
use paint_core::{PricingTable, Scope};
use paint_data::{
    BoqRow, DEFAULT_FILE_NAME, PriceSheetError, PriceSheetLoader, boq_rows, export_to_file,
    read_boq, write_price_sheet,
};
use pretty_assertions::assert_eq;
use rust_decimal_macros::dec;

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn load_fixture_prices() -> PricingTable {
    let file = File::open(fixture("prices.csv")).expect("Failed to open fixture");
    PriceSheetLoader::load(file).expect("Failed to load fixture")
}

#[test]
fn test_fixture_sheet_overrides_defaults() {
    let prices = load_fixture_prices();

    assert_eq!(
        prices,
        PricingTable {
            primer_old: dec!(2750),
            topcoat_interior: dec!(2800),
            labor_old_interior: dec!(80),
            scaffolding: dec!(150),
            ..PricingTable::default()
        }
    );
}

#[test]
fn test_fixture_sheet_with_unknown_item_fails() {
    let file = File::open(fixture("unknown_item.csv")).expect("Failed to open fixture");

    let result = PriceSheetLoader::load(file);

    assert!(matches!(
        result,
        Err(PriceSheetError::UnknownItem { ref item, line: 3 }) if item == "gold_leaf"
    ));
}

#[test]
fn test_estimate_with_fixture_prices_exports_and_reads_back() {
    let prices = load_fixture_prices();
    let input = EstimateInput {
        scope: Scope::Interior,
        ..EstimateInput::default()
    };
    let result = estimate(&input, &prices).expect("estimate should succeed");

    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let path = dir.path().join(DEFAULT_FILE_NAME);
    export_to_file(&path, &result).expect("Failed to export");

    let bytes = std::fs::read(&path).expect("Failed to read export");
    assert_eq!(&bytes[..3], b"\xEF\xBB\xBF");

    let rows = read_boq(File::open(&path).expect("Failed to open export")).unwrap();
    assert_eq!(rows, boq_rows(&result));
    assert_eq!(
        rows.last(),
        Some(&BoqRow {
            item: "งบประมาณสุทธิ (Grand Total)".to_string(),
            quantity: None,
            unit: String::new(),
            unit_price: None,
            // 2750 + 2800 + 58.2 × 80
            total: Some(dec!(10206)),
        })
    );
}

#[test]
fn test_export_overwrites_existing_file() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let path = dir.path().join(DEFAULT_FILE_NAME);
    std::fs::write(&path, "stale content that is much longer than nothing").unwrap();

    let empty = estimate(
        &EstimateInput {
            dimensions: paint_core::Dimensions {
                room_count: 0,
                ..Default::default()
            },
            ..EstimateInput::default()
        },
        &PricingTable::default(),
    )
    .unwrap();
    export_to_file(&path, &empty).unwrap();

    let rows = read_boq(File::open(&path).unwrap()).unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].total, Some(dec!(0)));
}

#[test]
fn test_price_sheet_template_round_trips_through_disk() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("prices.csv");
    let prices = load_fixture_prices();

    write_price_sheet(File::create(&path).unwrap(), &prices).unwrap();
    let reloaded = PriceSheetLoader::load(File::open(&path).unwrap()).unwrap();

    assert_eq!(reloaded, prices);
}
