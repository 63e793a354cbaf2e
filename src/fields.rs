use std::collections::HashMap;

use crate::error::{PnlError, Result};
use crate::resolver::resolve_column;
use crate::sheet::Table;

// ---------------------------------------------------------------------------
// Field keys
// ---------------------------------------------------------------------------

/// The closed set of semantic fields a settlement report contributes to the
/// P&L statement. Column names drift across report vintages; these keys do
/// not. Each key carries its candidate column names in priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKey {
    /// 바로결제주문금액, prepaid (in-app payment) order amount
    PrepaidOrderAmount,
    /// 만나서결제주문금액, pay-on-delivery order amount
    InPersonOrderAmount,
    /// 배민1중개이용료
    Baemin1Commission,
    /// 알뜰배달 중개이용료
    AlddeulCommission,
    /// 오픈리스트중개이용료
    OpenListCommission,
    /// 배민포장주문중개이용료
    TakeoutCommission,
    /// 주문금액 즉시할인
    InstantDiscount,
    /// 주문금액 즉시할인 지원
    InstantDiscountSupport,
    /// 바로결제배달팁
    PrepaidDeliveryTip,
    /// 만나서결제배달팁
    InPersonDeliveryTip,
    /// 배민클럽(한집배달) 배달팁 할인
    ClubSingleTipDiscount,
    /// 배민클럽(한집배달) 배달팁 할인 지원
    ClubSingleTipSupport,
    /// 배민클럽(알뜰배달) 배달팁 할인
    ClubAlddeulTipDiscount,
    /// 배민클럽(알뜰배달) 배달팁 할인 지원
    ClubAlddeulTipSupport,
    /// 배민1 한집배달 배달비
    SingleDeliveryFee,
    /// 배민1 한집배달 배달비할인
    SingleDeliveryFeeDiscount,
    /// 알뜰배달 배달비
    AlddeulDeliveryFee,
    /// 알뜰배달 배달비할인
    AlddeulDeliveryFeeDiscount,
    /// 기본수수료(정률)
    BaseCommission,
    /// 우대수수료
    ReducedCommission,
    /// 배민 만나서결제주문금액, pay-on-delivery amount settled back
    InPersonOrderSettlement,
    /// 배민 만나서결제배달팁, pay-on-delivery tip settled back
    InPersonTipSettlement,
    /// 보정금액, platform adjustment
    Adjustment,
    /// (E) 부가세, VAT on commissions
    CommissionVat,
    /// 우리가게클릭 이용요금, VAT row follows separately
    StoreClickFee,
    /// 부가세, VAT on ad fees
    StoreClickVat,
}

use FieldKey::*;

impl FieldKey {
    pub const COUNT: usize = 26;

    pub const ALL: [FieldKey; Self::COUNT] = [
        PrepaidOrderAmount,
        InPersonOrderAmount,
        Baemin1Commission,
        AlddeulCommission,
        OpenListCommission,
        TakeoutCommission,
        InstantDiscount,
        InstantDiscountSupport,
        PrepaidDeliveryTip,
        InPersonDeliveryTip,
        ClubSingleTipDiscount,
        ClubSingleTipSupport,
        ClubAlddeulTipDiscount,
        ClubAlddeulTipSupport,
        SingleDeliveryFee,
        SingleDeliveryFeeDiscount,
        AlddeulDeliveryFee,
        AlddeulDeliveryFeeDiscount,
        BaseCommission,
        ReducedCommission,
        InPersonOrderSettlement,
        InPersonTipSettlement,
        Adjustment,
        CommissionVat,
        StoreClickFee,
        StoreClickVat,
    ];

    /// Stable identifier used on the command line (`--map <key>=<column>`).
    pub fn key(&self) -> &'static str {
        match self {
            PrepaidOrderAmount => "prepaid_order_amount",
            InPersonOrderAmount => "in_person_order_amount",
            Baemin1Commission => "baemin1_commission",
            AlddeulCommission => "alddeul_commission",
            OpenListCommission => "open_list_commission",
            TakeoutCommission => "takeout_commission",
            InstantDiscount => "instant_discount",
            InstantDiscountSupport => "instant_discount_support",
            PrepaidDeliveryTip => "prepaid_delivery_tip",
            InPersonDeliveryTip => "in_person_delivery_tip",
            ClubSingleTipDiscount => "club_single_tip_discount",
            ClubSingleTipSupport => "club_single_tip_support",
            ClubAlddeulTipDiscount => "club_alddeul_tip_discount",
            ClubAlddeulTipSupport => "club_alddeul_tip_support",
            SingleDeliveryFee => "single_delivery_fee",
            SingleDeliveryFeeDiscount => "single_delivery_fee_discount",
            AlddeulDeliveryFee => "alddeul_delivery_fee",
            AlddeulDeliveryFeeDiscount => "alddeul_delivery_fee_discount",
            BaseCommission => "base_commission",
            ReducedCommission => "reduced_commission",
            InPersonOrderSettlement => "in_person_order_settlement",
            InPersonTipSettlement => "in_person_tip_settlement",
            Adjustment => "adjustment",
            CommissionVat => "commission_vat",
            StoreClickFee => "store_click_fee",
            StoreClickVat => "store_click_vat",
        }
    }

    pub fn from_key(key: &str) -> Result<FieldKey> {
        Self::ALL
            .iter()
            .find(|k| k.key() == key)
            .copied()
            .ok_or_else(|| PnlError::UnknownField(key.to_string()))
    }

    /// Candidate column names, first match wins.
    pub fn aliases(&self) -> &'static [&'static str] {
        match self {
            PrepaidOrderAmount => &["바로결제주문금액", "바로결제 주문금액", "직접결제주문금액"],
            InPersonOrderAmount => &["만나서결제주문금액", "만나서결제 주문금액", "현장결제주문금액"],
            Baemin1Commission => &["배민1중개이용료", "배민1 중개이용료", "배민 1 중개이용료"],
            AlddeulCommission => &["알뜰배달 중개이용료", "알뜰배달중개이용료"],
            OpenListCommission => &["오픈리스트중개이용료", "오픈리스트 중개이용료"],
            TakeoutCommission => &["배민포장주문중개이용료", "배민포장 주문중개이용료", "포장주문중개이용료"],
            InstantDiscount => &["주문금액 즉시할인", "주문금액즉시할인", "즉시할인"],
            InstantDiscountSupport => &["주문금액 즉시할인 지원", "주문금액즉시할인지원", "즉시할인지원"],
            PrepaidDeliveryTip => &["바로결제배달팁", "바로결제 배달팁", "직접결제배달팁"],
            InPersonDeliveryTip => &["만나서결제배달팁", "만나서결제 배달팁", "현장결제배달팁"],
            ClubSingleTipDiscount => &["배민클럽(한집배달) 배달팁 할인", "배민클럽한집배달배달팁할인"],
            ClubSingleTipSupport => &["배민클럽(한집배달) 배달팁 할인 지원", "배민클럽한집배달배달팁할인지원"],
            ClubAlddeulTipDiscount => &["배민클럽(알뜰배달) 배달팁 할인", "배민클럽알뜰배달배달팁할인"],
            ClubAlddeulTipSupport => &["배민클럽(알뜰배달) 배달팁 할인 지원", "배민클럽알뜰배달배달팁할인지원"],
            SingleDeliveryFee => &["배민1 한집배달 배달비", "배민1한집배달배달비"],
            SingleDeliveryFeeDiscount => &["배민1 한집배달 배달비할인", "배민1한집배달배달비할인"],
            AlddeulDeliveryFee => &["알뜰배달 배달비", "알뜰배달배달비"],
            AlddeulDeliveryFeeDiscount => &["알뜰배달 배달비할인", "알뜰배달배달비할인"],
            BaseCommission => &["기본수수료(정률)", "기본수수료", "정률수수료"],
            ReducedCommission => &["우대수수료", "할인수수료"],
            InPersonOrderSettlement => &["배민 만나서결제주문금액", "배민만나서결제주문금액"],
            InPersonTipSettlement => &["배민 만나서결제배달팁", "배민만나서결제배달팁"],
            Adjustment => &["보정금액", "조정금액"],
            CommissionVat => &["(E) 부가세", "E부가세", "부가세E"],
            StoreClickFee => &["우리가게클릭 이용요금", "우리가게클릭이용요금"],
            StoreClickVat => &["부가세", "부가세F"],
        }
    }
}

// ---------------------------------------------------------------------------
// Field map
// ---------------------------------------------------------------------------

/// Resolved numeric total per field key. Dense: every key is always present,
/// unresolved columns default to 0.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FieldMap {
    totals: [f64; FieldKey::COUNT],
}

impl FieldMap {
    pub fn get(&self, key: FieldKey) -> f64 {
        self.totals[key as usize]
    }

    pub fn set(&mut self, key: FieldKey, total: f64) {
        self.totals[key as usize] = total;
    }
}

// ---------------------------------------------------------------------------
// Per-run column overrides
// ---------------------------------------------------------------------------

/// Explicit column assignments supplied by the operator for a single run,
/// consulted before the alias lists.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    columns: HashMap<FieldKey, String>,
}

impl Overrides {
    pub fn set(&mut self, key: FieldKey, column: String) {
        self.columns.insert(key, column);
    }

    pub fn column_for(&self, key: FieldKey) -> Option<&str> {
        self.columns.get(&key).map(String::as_str)
    }

    /// Parse repeated `<field>=<column>` command-line pairs.
    pub fn parse(pairs: &[String]) -> Result<Overrides> {
        let mut overrides = Overrides::default();
        for pair in pairs {
            let (field, column) = pair.split_once('=').ok_or_else(|| {
                PnlError::Other(format!("invalid --map '{pair}', expected <field>=<column>"))
            })?;
            overrides.set(FieldKey::from_key(field.trim())?, column.trim().to_string());
        }
        Ok(overrides)
    }
}

// ---------------------------------------------------------------------------
// Extraction
// ---------------------------------------------------------------------------

/// Pull every field total out of the table. Total function: a table that
/// matches none of the aliases produces an all-zero map, never an error.
pub fn extract_fields(table: &Table, overrides: &Overrides) -> FieldMap {
    let mut map = FieldMap::default();
    for key in FieldKey::ALL {
        let idx = match overrides.column_for(key) {
            Some(column) => resolve_column(&table.headers, &[column]),
            None => resolve_column(&table.headers, key.aliases()),
        };
        if let Some(idx) = idx {
            map.set(key, table.column_sum(idx));
        }
    }
    map
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sheet::{Cell, Grid, Table, HEADER_ROW};

    fn table(headers: &[&str], rows: &[&[f64]]) -> Table {
        let mut grid_rows = vec![Vec::new(); HEADER_ROW];
        grid_rows.push(headers.iter().map(|h| Cell::Text(h.to_string())).collect());
        for row in rows {
            grid_rows.push(row.iter().map(|v| Cell::Number(*v)).collect());
        }
        Table::from_grid(&Grid { rows: grid_rows })
    }

    #[test]
    fn test_every_key_has_aliases() {
        for key in FieldKey::ALL {
            assert!(!key.aliases().is_empty(), "{key:?} has no aliases");
        }
    }

    #[test]
    fn test_key_roundtrip() {
        for key in FieldKey::ALL {
            assert_eq!(FieldKey::from_key(key.key()).unwrap(), key);
        }
        assert!(FieldKey::from_key("nope").is_err());
    }

    #[test]
    fn test_extract_totality_on_empty_table() {
        let t = table(&["주문번호", "가게명"], &[]);
        let map = extract_fields(&t, &Overrides::default());
        for key in FieldKey::ALL {
            assert_eq!(map.get(key), 0.0, "{key:?} should default to 0");
        }
    }

    #[test]
    fn test_extract_sums_resolved_columns() {
        let t = table(
            &["바로결제주문금액", "만나서결제주문금액"],
            &[&[1000.0, 50.0], &[2000.0, 150.0]],
        );
        let map = extract_fields(&t, &Overrides::default());
        assert_eq!(map.get(FieldKey::PrepaidOrderAmount), 3000.0);
        assert_eq!(map.get(FieldKey::InPersonOrderAmount), 200.0);
        assert_eq!(map.get(FieldKey::Baemin1Commission), 0.0);
    }

    #[test]
    fn test_extract_uses_later_alias_when_first_absent() {
        let t = table(&["직접결제주문금액"], &[&[700.0]]);
        let map = extract_fields(&t, &Overrides::default());
        assert_eq!(map.get(FieldKey::PrepaidOrderAmount), 700.0);
    }

    #[test]
    fn test_extract_fuzzy_header_variant() {
        let t = table(&["배민1 중개이용료"], &[&[-120.0]]);
        let map = extract_fields(&t, &Overrides::default());
        assert_eq!(map.get(FieldKey::Baemin1Commission), -120.0);
    }

    #[test]
    fn test_override_beats_alias_table() {
        let t = table(&["바로결제주문금액", "이상한컬럼"], &[&[500.0, 42.0]]);
        let mut overrides = Overrides::default();
        overrides.set(FieldKey::PrepaidOrderAmount, "이상한컬럼".to_string());
        let map = extract_fields(&t, &overrides);
        assert_eq!(map.get(FieldKey::PrepaidOrderAmount), 42.0);
    }

    #[test]
    fn test_override_miss_degrades_to_zero() {
        let t = table(&["바로결제주문금액"], &[&[500.0]]);
        let mut overrides = Overrides::default();
        overrides.set(FieldKey::PrepaidOrderAmount, "없는컬럼".to_string());
        let map = extract_fields(&t, &overrides);
        assert_eq!(map.get(FieldKey::PrepaidOrderAmount), 0.0);
    }

    #[test]
    fn test_parse_override_pairs() {
        let overrides = Overrides::parse(&[
            "adjustment=수동보정".to_string(),
            "commission_vat = 별도부가세".to_string(),
        ])
        .unwrap();
        assert_eq!(overrides.column_for(FieldKey::Adjustment), Some("수동보정"));
        assert_eq!(overrides.column_for(FieldKey::CommissionVat), Some("별도부가세"));
        assert!(Overrides::parse(&["garbage".to_string()]).is_err());
        assert!(Overrides::parse(&["unknown=col".to_string()]).is_err());
    }
}
