//! Plain-text rendering of the area summary, the estimate and the price
//! table for terminal output.

use std::fmt;

use paint_core::calculations::AreaBreakdown;
use paint_core::calculations::common::format_thousands;
use paint_core::models::labels;
use paint_core::{CalculationResult, FullEstimate, MaterialLine, PricingTable, Scope};
use rust_decimal::Decimal;

const RULE: &str = "------------------------------------------------------------";

pub struct AreaReport<'a> {
    pub areas: &'a AreaBreakdown,
    pub include_ceiling: bool,
}

impl fmt::Display for AreaReport<'_> {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        let a = self.areas;
        writeln!(f, "สรุปพื้นที่ทำงาน (Area Summary)")?;
        writeln!(f, "  พื้นที่ผนังรวม     {:>12} {}", one_decimal(a.gross), labels::UNIT_SQM)?;
        writeln!(f, "  หักช่องเปิด        {:>12} {}", one_decimal(-a.deduction), labels::UNIT_SQM)?;
        writeln!(f, "  พื้นที่ทาสีสุทธิ    {:>12} {}", one_decimal(a.net), labels::UNIT_SQM)?;
        if self.include_ceiling {
            writeln!(f, "  พื้นที่ฝ้าเพดาน     {:>12} {}", one_decimal(a.ceiling), labels::UNIT_SQM)?;
        }
        Ok(())
    }
}

/// Bill of quantities as shown on screen. Material lines carry their coat
/// count; numbering restarts in each section.
pub struct EstimateReport<'a>(pub &'a FullEstimate);

impl fmt::Display for EstimateReport<'_> {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        let estimate = self.0;

        if estimate.is_empty() {
            writeln!(f, "รอข้อมูลการประเมิน: ไม่มีพื้นที่ผนังสำหรับทาสี")?;
        }
        for (scope, result) in estimate.sections() {
            write_section(f, scope, result)?;
        }

        writeln!(f, "{RULE}")?;
        writeln!(
            f,
            "งบประมาณสุทธิ (Grand Total)  ฿{}",
            format_thousands(estimate.grand_total)
        )
    }
}

fn write_section(
    f: &mut fmt::Formatter<'_>,
    scope: Scope,
    result: &CalculationResult,
) -> fmt::Result {
    let title = match scope {
        Scope::Exterior => "งานภายนอก (Exterior)",
        Scope::Interior | Scope::Both => "งานภายใน (Interior)",
    };
    writeln!(f, "{RULE}")?;
    writeln!(f, "{title}")?;
    write!(f, "  พื้นที่ผนัง: {} {}", format_thousands(result.net_area), labels::UNIT_SQM)?;
    if let Some(ceiling) = &result.ceiling {
        write!(f, "  + ฝ้า {} {}", format_thousands(ceiling.area), labels::UNIT_SQM)?;
    }
    writeln!(f)?;

    let mut index = 1;
    material(f, &mut index, &result.primer)?;
    material(f, &mut index, &result.topcoat)?;
    if let Some(ceiling) = &result.ceiling {
        if ceiling.primer.coats > 0 {
            material(f, &mut index, &ceiling.primer)?;
        }
        material(f, &mut index, &ceiling.topcoat)?;
    }
    subtotal(f, "รวมค่าวัสดุ (Materials)", result.total_material)?;

    line(
        f,
        &mut index,
        labels::WALL_LABOR,
        result.net_area,
        labels::UNIT_SQM,
        result.labor.rate,
        result.labor.cost,
    )?;
    if let Some(ceiling) = &result.ceiling {
        line(
            f,
            &mut index,
            labels::CEILING_LABOR,
            ceiling.area,
            labels::UNIT_SQM,
            ceiling.labor_rate,
            ceiling.labor_cost,
        )?;
    }
    if let Some(scaffolding) = &result.scaffolding {
        line(
            f,
            &mut index,
            labels::SCAFFOLDING,
            result.net_area,
            labels::UNIT_SQM,
            scaffolding.rate,
            scaffolding.cost,
        )?;
    }
    subtotal(f, "รวมค่าแรง (Labor)", result.total_labor)
}

fn material(
    f: &mut fmt::Formatter<'_>,
    index: &mut u32,
    line_item: &MaterialLine,
) -> fmt::Result {
    let label = format!("{} ({} เที่ยว)", line_item.name, line_item.coats);
    line(
        f,
        index,
        &label,
        Decimal::from(line_item.buckets),
        labels::UNIT_BUCKET,
        line_item.price_per_bucket,
        line_item.cost,
    )
}

fn line(
    f: &mut fmt::Formatter<'_>,
    index: &mut u32,
    label: &str,
    quantity: Decimal,
    unit: &str,
    unit_price: Decimal,
    total: Decimal,
) -> fmt::Result {
    writeln!(
        f,
        "  {index}. {label}\n       {} {unit} × {} = {}",
        format_thousands(quantity),
        format_thousands(unit_price),
        format_thousands(total)
    )?;
    *index += 1;
    Ok(())
}

fn subtotal(
    f: &mut fmt::Formatter<'_>,
    label: &str,
    total: Decimal,
) -> fmt::Result {
    writeln!(f, "  {label}: {}", format_thousands(total))
}

fn one_decimal(value: Decimal) -> String {
    format_thousands(value.round_dp(1))
}

/// The effective price table, one entry per line with its sheet key.
pub struct PriceReport<'a>(pub &'a PricingTable);

impl fmt::Display for PriceReport<'_> {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        for (key, value) in self.0.entries() {
            writeln!(f, "{key:<22}{:>10}", format_thousands(value))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use paint_core::calculations::{EstimateInput, area_breakdown, estimate};
    use paint_core::{Dimensions, Openings};
    use pretty_assertions::assert_eq;

    use super::*;

    fn run(input: &EstimateInput) -> FullEstimate {
        estimate(input, &PricingTable::default()).unwrap()
    }

    #[test]
    fn area_report_lists_summary() {
        let areas = area_breakdown(&Dimensions::default(), &Openings::default(), Scope::Interior).unwrap();

        let text = AreaReport {
            areas: &areas,
            include_ceiling: false,
        }
        .to_string();

        assert!(text.contains("105 ตร.ม."));
        assert!(text.contains("-46.8 ตร.ม."));
        assert!(text.contains("58.2 ตร.ม."));
        assert!(!text.contains("ฝ้าเพดาน"));
    }

    #[test]
    fn estimate_report_for_default_classroom() {
        let text = EstimateReport(&run(&EstimateInput::default())).to_string();

        assert!(text.contains("งานภายใน (Interior)"));
        assert!(text.contains("1. สีรองพื้นปูนเก่า (1 เที่ยว)\n       1 ถัง × 2,500 = 2,500"));
        assert!(text.contains("3. ค่าแรงทาสีผนัง\n       58.2 ตร.ม. × 70 = 4,074"));
        assert!(text.contains("รวมค่าวัสดุ (Materials): 5,000"));
        assert!(text.ends_with("งบประมาณสุทธิ (Grand Total)  ฿9,074\n"));
    }

    #[test]
    fn estimate_report_shows_ceiling_and_scaffolding() {
        let input = EstimateInput {
            scope: Scope::Both,
            include_ceiling: true,
            dimensions: Dimensions {
                floors: 2,
                ..Dimensions::default()
            },
            ..EstimateInput::default()
        };

        let text = EstimateReport(&run(&input)).to_string();

        assert!(text.contains("+ ฝ้า 54 ตร.ม."));
        assert!(text.contains(labels::CEILING_LABOR));
        assert!(text.contains(labels::SCAFFOLDING));
        assert!(text.contains("งานภายนอก (Exterior)"));
    }

    #[test]
    fn empty_estimate_report_says_so() {
        let text = EstimateReport(&FullEstimate::default()).to_string();

        assert!(text.starts_with("รอข้อมูลการประเมิน"));
        assert!(text.ends_with("฿0\n"));
    }

    #[test]
    fn price_report_has_every_key() {
        let text = PriceReport(&PricingTable::default()).to_string();

        assert_eq!(text.lines().count(), 13);
        assert!(text.lines().next().unwrap().starts_with("primer_old"));
        assert!(text.contains("2,500"));
    }
}
