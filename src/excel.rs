//! Renders an aggregate record back out as a formatted 손익계산서 workbook.
//!
//! The row layout is fixed: revenue section with labeled groups (A)/(B),
//! cost-of-sales section with groups (C)-(F), the deposit banner (H), and a
//! three-line summary block. Percentages are shares of gross sales and read
//! 0 when there are no sales.

use std::path::Path;

use rust_xlsxwriter::{Color, Format, FormatAlign, FormatBorder, Workbook, Worksheet};

use crate::error::Result;
use crate::fields::{FieldKey, FieldMap};
use crate::statement::{ratio, Totals};

const SHEET_NAME: &str = "손익계산서";

const HEADER_FILL: Color = Color::RGB(0xD9E1F2);
const SECTION_FILL: Color = Color::RGB(0xE7E6E6);
const DEPOSIT_FILL: Color = Color::RGB(0x4472C4);
const PROFIT_FILL: Color = Color::RGB(0x70AD47);

const ORDER_ITEMS: [(&str, FieldKey); 2] = [
    ("바로결제주문금액", FieldKey::PrepaidOrderAmount),
    ("만나서결제주문금액", FieldKey::InPersonOrderAmount),
];

const DELIVERY_ITEMS: [(&str, FieldKey); 10] = [
    ("바로결제배달팁", FieldKey::PrepaidDeliveryTip),
    ("만나서결제배달팁", FieldKey::InPersonDeliveryTip),
    ("배민클럽(한집배달) 배달팁 할인", FieldKey::ClubSingleTipDiscount),
    ("배민클럽(한집배달) 배달팁 할인 지원", FieldKey::ClubSingleTipSupport),
    ("배민클럽(알뜰배달) 배달팁 할인", FieldKey::ClubAlddeulTipDiscount),
    ("배민클럽(알뜰배달) 배달팁 할인 지원", FieldKey::ClubAlddeulTipSupport),
    ("배민1 한집배달 배달비", FieldKey::SingleDeliveryFee),
    ("배민1 한집배달 배달비할인", FieldKey::SingleDeliveryFeeDiscount),
    ("알뜰배달 배달비", FieldKey::AlddeulDeliveryFee),
    ("알뜰배달 배달비할인", FieldKey::AlddeulDeliveryFeeDiscount),
];

const COMMISSION_ITEMS: [(&str, FieldKey); 4] = [
    ("배민1중개이용료", FieldKey::Baemin1Commission),
    ("알뜰배달 중개이용료", FieldKey::AlddeulCommission),
    ("오픈리스트중개이용료", FieldKey::OpenListCommission),
    ("배민포장주문중개이용료", FieldKey::TakeoutCommission),
];

const DISCOUNT_ITEMS: [(&str, FieldKey); 2] = [
    ("주문금액 즉시할인", FieldKey::InstantDiscount),
    ("주문금액 즉시할인 지원", FieldKey::InstantDiscountSupport),
];

const SETTLEMENT_ITEMS: [(&str, FieldKey); 4] = [
    ("기본수수료(정률)", FieldKey::BaseCommission),
    ("우대수수료", FieldKey::ReducedCommission),
    ("배민 만나서결제주문금액", FieldKey::InPersonOrderSettlement),
    ("배민 만나서결제배달팁", FieldKey::InPersonTipSettlement),
];

const STORE_CLICK_ITEMS: [(&str, FieldKey); 2] = [
    ("우리가게클릭 이용요금", FieldKey::StoreClickFee),
    ("부가세", FieldKey::StoreClickVat),
];

struct Styles {
    title: Format,
    header: Format,
    section_label: Format,
    section_amount: Format,
    section_ratio: Format,
    section_blank: Format,
    code: Format,
    label: Format,
    amount: Format,
    ratio: Format,
    blank: Format,
    deposit_label: Format,
    deposit_amount: Format,
    deposit_ratio: Format,
    profit_label: Format,
    profit_amount: Format,
    profit_ratio: Format,
}

fn bordered() -> Format {
    Format::new()
        .set_border(FormatBorder::Thin)
        .set_align(FormatAlign::VerticalCenter)
}

impl Styles {
    fn new() -> Self {
        Styles {
            title: Format::new()
                .set_bold()
                .set_font_size(14)
                .set_align(FormatAlign::Center)
                .set_align(FormatAlign::VerticalCenter),
            header: bordered()
                .set_bold()
                .set_align(FormatAlign::Center)
                .set_background_color(HEADER_FILL),
            section_label: bordered().set_bold().set_background_color(SECTION_FILL),
            section_amount: bordered()
                .set_bold()
                .set_background_color(SECTION_FILL)
                .set_align(FormatAlign::Right)
                .set_num_format("#,##0"),
            section_ratio: bordered()
                .set_bold()
                .set_background_color(SECTION_FILL)
                .set_align(FormatAlign::Right)
                .set_num_format("0.0"),
            section_blank: bordered().set_background_color(SECTION_FILL),
            code: bordered(),
            label: bordered(),
            amount: bordered().set_align(FormatAlign::Right).set_num_format("#,##0"),
            ratio: bordered().set_align(FormatAlign::Right).set_num_format("0.0"),
            blank: bordered(),
            deposit_label: bordered()
                .set_bold()
                .set_font_size(12)
                .set_font_color(Color::White)
                .set_background_color(DEPOSIT_FILL)
                .set_align(FormatAlign::Center),
            deposit_amount: bordered()
                .set_bold()
                .set_font_size(12)
                .set_align(FormatAlign::Right)
                .set_num_format("#,##0"),
            deposit_ratio: bordered()
                .set_bold()
                .set_font_size(12)
                .set_align(FormatAlign::Right)
                .set_num_format("0.0"),
            profit_label: bordered()
                .set_bold()
                .set_font_size(12)
                .set_font_color(Color::White)
                .set_background_color(PROFIT_FILL)
                .set_align(FormatAlign::Center),
            profit_amount: bordered()
                .set_bold()
                .set_font_size(12)
                .set_font_color(Color::White)
                .set_background_color(PROFIT_FILL)
                .set_align(FormatAlign::Right)
                .set_num_format("#,##0"),
            profit_ratio: bordered()
                .set_bold()
                .set_font_size(12)
                .set_font_color(Color::White)
                .set_background_color(PROFIT_FILL)
                .set_align(FormatAlign::Right)
                .set_num_format("0.0"),
        }
    }
}

/// A merged section row: label across A:B, bold amount and ratio.
fn section_row(
    ws: &mut Worksheet,
    row: u32,
    label: &str,
    value: f64,
    pct: f64,
    styles: &Styles,
) -> Result<()> {
    ws.merge_range(row, 0, row, 1, label, &styles.section_label)?;
    ws.write_number_with_format(row, 2, value, &styles.section_amount)?;
    ws.write_number_with_format(row, 3, pct, &styles.section_ratio)?;
    Ok(())
}

/// A group row: code in A ("(A)"), group name in B, optional subtotal/ratio.
fn group_row(
    ws: &mut Worksheet,
    row: u32,
    code: &str,
    label: &str,
    value: Option<f64>,
    pct: Option<f64>,
    styles: &Styles,
) -> Result<()> {
    ws.write_string_with_format(row, 0, code, &styles.code)?;
    ws.write_string_with_format(row, 1, label, &styles.label)?;
    match value {
        Some(v) => ws.write_number_with_format(row, 2, v, &styles.amount)?,
        None => ws.write_string_with_format(row, 2, "", &styles.blank)?,
    };
    match pct {
        Some(p) => ws.write_number_with_format(row, 3, p, &styles.ratio)?,
        None => ws.write_string_with_format(row, 3, "", &styles.blank)?,
    };
    Ok(())
}

/// An indented leaf row sourced straight from a field total.
fn item_row(ws: &mut Worksheet, row: u32, label: &str, value: f64, styles: &Styles) -> Result<()> {
    ws.write_string_with_format(row, 0, "", &styles.code)?;
    ws.write_string_with_format(row, 1, &format!("  {label}"), &styles.label)?;
    ws.write_number_with_format(row, 2, value, &styles.amount)?;
    ws.write_string_with_format(row, 3, "", &styles.blank)?;
    Ok(())
}

fn item_block(
    ws: &mut Worksheet,
    row: &mut u32,
    items: &[(&str, FieldKey)],
    fields: &FieldMap,
    styles: &Styles,
) -> Result<()> {
    for (label, key) in items {
        item_row(ws, *row, label, fields.get(*key), styles)?;
        *row += 1;
    }
    Ok(())
}

pub fn write_statement(path: &Path, fields: &FieldMap, totals: &Totals) -> Result<()> {
    let mut workbook = Workbook::new();
    let ws = workbook.add_worksheet();
    ws.set_name(SHEET_NAME)?;
    let styles = Styles::new();
    let gross = totals.gross_sales;

    ws.merge_range(0, 0, 0, 3, SHEET_NAME, &styles.title)?;
    ws.set_row_height(0, 25)?;

    for (col, header) in ["구분", "항목", "금액(원)", "비율(%)"].iter().enumerate() {
        ws.write_string_with_format(2, col as u16, *header, &styles.header)?;
    }

    // Ⅰ. 매출액
    let mut row: u32 = 3;
    section_row(ws, row, "Ⅰ. 매출액", gross, ratio(gross, gross), &styles)?;
    row += 1;

    group_row(
        ws,
        row,
        "(A)",
        "주문중개",
        Some(totals.order_brokerage_total),
        Some(ratio(totals.order_brokerage_total, gross)),
        &styles,
    )?;
    row += 1;
    item_block(ws, &mut row, &ORDER_ITEMS, fields, &styles)?;

    group_row(ws, row, "(B)", "배달비", Some(totals.delivery_fee_total), None, &styles)?;
    row += 1;
    item_block(ws, &mut row, &DELIVERY_ITEMS, fields, &styles)?;
    row += 1;

    // Ⅱ. 매출원가
    ws.merge_range(row, 0, row, 1, "Ⅱ. 매출원가", &styles.section_label)?;
    ws.write_string_with_format(row, 2, "", &styles.section_blank)?;
    ws.write_string_with_format(row, 3, "", &styles.section_blank)?;
    row += 1;

    group_row(ws, row, "", "중개이용료", None, None, &styles)?;
    row += 1;
    item_block(ws, &mut row, &COMMISSION_ITEMS, fields, &styles)?;
    row += 1;

    group_row(ws, row, "", "고객할인", None, None, &styles)?;
    row += 1;
    item_block(ws, &mut row, &DISCOUNT_ITEMS, fields, &styles)?;
    row += 1;

    group_row(ws, row, "(C)", "결제정산수수료", Some(totals.settlement_fee_total), None, &styles)?;
    row += 1;
    item_block(ws, &mut row, &SETTLEMENT_ITEMS, fields, &styles)?;
    row += 1;

    group_row(ws, row, "(D)", "조정금액", Some(fields.get(FieldKey::Adjustment)), None, &styles)?;
    row += 2;

    group_row(ws, row, "(E)", "부가세", Some(fields.get(FieldKey::CommissionVat)), None, &styles)?;
    row += 2;

    group_row(ws, row, "(F)", "우리가게클릭", Some(totals.store_click_total), None, &styles)?;
    row += 1;
    item_block(ws, &mut row, &STORE_CLICK_ITEMS, fields, &styles)?;
    row += 1;

    // (H) 입금금액
    ws.merge_range(row, 0, row, 1, "(H) 입금금액", &styles.deposit_label)?;
    ws.write_number_with_format(row, 2, totals.deposit_total, &styles.deposit_amount)?;
    ws.write_number_with_format(row, 3, ratio(totals.deposit_total, gross), &styles.deposit_ratio)?;
    row += 1;

    ws.set_row_height(row, 5)?;
    row += 1;

    // summary block
    section_row(ws, row, "총매출", gross, ratio(gross, gross), &styles)?;
    row += 1;
    section_row(
        ws,
        row,
        "매출원가",
        totals.cost_of_sales,
        ratio(totals.cost_of_sales, gross),
        &styles,
    )?;
    row += 1;

    ws.merge_range(row, 0, row, 1, "매출총이익", &styles.profit_label)?;
    ws.write_number_with_format(row, 2, totals.gross_profit, &styles.profit_amount)?;
    ws.write_number_with_format(row, 3, ratio(totals.gross_profit, gross), &styles.profit_ratio)?;

    ws.set_column_width(0, 12)?;
    ws.set_column_width(1, 32)?;
    ws.set_column_width(2, 18)?;
    ws.set_column_width(3, 12)?;

    workbook.save(path)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fields::FieldMap;

    #[test]
    fn test_write_statement_creates_workbook() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("statement.xlsx");
        let mut fields = FieldMap::default();
        fields.set(FieldKey::PrepaidOrderAmount, 100000.0);
        fields.set(FieldKey::Baemin1Commission, -6800.0);
        let totals = Totals::from_fields(&fields);
        write_statement(&path, &fields, &totals).unwrap();
        assert!(path.exists());
        assert!(std::fs::metadata(&path).unwrap().len() > 0);
    }

    #[test]
    fn test_write_statement_zero_sales() {
        // all-zero map must render without a division error
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.xlsx");
        let fields = FieldMap::default();
        let totals = Totals::from_fields(&fields);
        write_statement(&path, &fields, &totals).unwrap();
        assert!(path.exists());
    }
}
