//! The aggregation graph from field totals to P&L subtotals.
//!
//! Cost-side columns (commissions, discounts, delivery-fee discounts,
//! settlement fees, adjustments, VAT, ad fees) arrive from the platform as
//! already-negative amounts, so cost of sales is an algebraic sum and gross
//! profit is `gross_sales + cost_of_sales`. Delivery tips paid by the
//! customer (prepaid / pay-on-delivery) are revenue, not cost, while still
//! counting toward the deposit reconciliation.

use crate::fields::{FieldKey, FieldMap};

/// The derived subtotals of one statement. Pure function of a [`FieldMap`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Totals {
    /// 중개이용료 합계
    pub commission_total: f64,
    /// 고객할인 합계
    pub discount_total: f64,
    /// (A) 주문중개 합계
    pub order_brokerage_total: f64,
    /// (B) 배달비 합계
    pub delivery_fee_total: f64,
    /// (C) 결제정산수수료 합계
    pub settlement_fee_total: f64,
    /// (F) 우리가게클릭 합계
    pub store_click_total: f64,
    /// (H) 입금금액
    pub deposit_total: f64,
    /// 총매출
    pub gross_sales: f64,
    /// 매출원가
    pub cost_of_sales: f64,
    /// 매출총이익
    pub gross_profit: f64,
}

impl Totals {
    pub fn from_fields(fields: &FieldMap) -> Self {
        use FieldKey::*;
        let f = |key: FieldKey| fields.get(key);

        let commission_total =
            f(Baemin1Commission) + f(AlddeulCommission) + f(OpenListCommission) + f(TakeoutCommission);
        let discount_total = f(InstantDiscount) + f(InstantDiscountSupport);
        let order_brokerage_total =
            f(PrepaidOrderAmount) + f(InPersonOrderAmount) + commission_total + discount_total;
        let delivery_fee_total = f(PrepaidDeliveryTip)
            + f(InPersonDeliveryTip)
            + f(ClubSingleTipDiscount)
            + f(ClubSingleTipSupport)
            + f(ClubAlddeulTipDiscount)
            + f(ClubAlddeulTipSupport)
            + f(SingleDeliveryFee)
            + f(SingleDeliveryFeeDiscount)
            + f(AlddeulDeliveryFee)
            + f(AlddeulDeliveryFeeDiscount);
        let settlement_fee_total = f(BaseCommission)
            + f(ReducedCommission)
            + f(InPersonOrderSettlement)
            + f(InPersonTipSettlement);
        let store_click_total = f(StoreClickFee) + f(StoreClickVat);
        let deposit_total = order_brokerage_total
            + delivery_fee_total
            + settlement_fee_total
            + f(Adjustment)
            + f(CommissionVat)
            + store_click_total;

        let gross_sales = f(PrepaidOrderAmount)
            + f(InPersonOrderAmount)
            + f(PrepaidDeliveryTip)
            + f(InPersonDeliveryTip);
        // customer-paid tips are excluded here: they sit in gross sales
        let cost_of_sales = commission_total
            + discount_total
            + f(ClubSingleTipDiscount)
            + f(ClubSingleTipSupport)
            + f(ClubAlddeulTipDiscount)
            + f(ClubAlddeulTipSupport)
            + f(SingleDeliveryFee)
            + f(SingleDeliveryFeeDiscount)
            + f(AlddeulDeliveryFee)
            + f(AlddeulDeliveryFeeDiscount)
            + f(BaseCommission)
            + f(ReducedCommission)
            + f(Adjustment)
            + f(CommissionVat)
            + store_click_total;
        let gross_profit = gross_sales + cost_of_sales;

        Totals {
            commission_total,
            discount_total,
            order_brokerage_total,
            delivery_fee_total,
            settlement_fee_total,
            store_click_total,
            deposit_total,
            gross_sales,
            cost_of_sales,
            gross_profit,
        }
    }
}

/// Percentage share of gross sales. Zero sales means every ratio reads 0
/// rather than dividing by zero.
pub fn ratio(value: f64, gross_sales: f64) -> f64 {
    if gross_sales == 0.0 {
        0.0
    } else {
        value / gross_sales * 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fields::FieldKey::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn test_revenue_only_example() {
        let mut fields = FieldMap::default();
        fields.set(PrepaidOrderAmount, 1000.0);
        fields.set(InPersonOrderAmount, 500.0);
        fields.set(PrepaidDeliveryTip, 100.0);
        fields.set(InPersonDeliveryTip, 50.0);
        let t = Totals::from_fields(&fields);
        assert!((t.gross_sales - 1650.0).abs() < EPS);
        assert!((t.cost_of_sales).abs() < EPS);
        assert!((t.gross_profit - 1650.0).abs() < EPS);
        assert!((t.order_brokerage_total - 1500.0).abs() < EPS);
        assert!((t.delivery_fee_total - 150.0).abs() < EPS);
        assert!((t.deposit_total - 1650.0).abs() < EPS);
    }

    #[test]
    fn test_negative_fee_flows_through() {
        let mut fields = FieldMap::default();
        fields.set(Baemin1Commission, -200.0);
        let t = Totals::from_fields(&fields);
        assert!((t.commission_total - -200.0).abs() < EPS);
        assert!((t.cost_of_sales - -200.0).abs() < EPS);
        assert!(t.gross_sales.abs() < EPS);
        assert!((t.gross_profit - -200.0).abs() < EPS);
    }

    #[test]
    fn test_accounting_identities() {
        // fill every field with a distinct value, signs mixed
        let mut fields = FieldMap::default();
        for (i, key) in FieldKey::ALL.into_iter().enumerate() {
            let v = (i as f64 + 1.0) * 7.3;
            fields.set(key, if i % 3 == 0 { -v } else { v });
        }
        let t = Totals::from_fields(&fields);
        assert!((t.gross_profit - (t.gross_sales + t.cost_of_sales)).abs() < EPS);
        let deposit = t.order_brokerage_total
            + t.delivery_fee_total
            + t.settlement_fee_total
            + fields.get(Adjustment)
            + fields.get(CommissionVat)
            + t.store_click_total;
        assert!((t.deposit_total - deposit).abs() < EPS);
    }

    #[test]
    fn test_tips_count_toward_deposit_but_not_cost() {
        let mut fields = FieldMap::default();
        fields.set(PrepaidDeliveryTip, 3000.0);
        fields.set(InPersonDeliveryTip, 2000.0);
        fields.set(SingleDeliveryFee, -1000.0);
        let t = Totals::from_fields(&fields);
        assert!((t.delivery_fee_total - 4000.0).abs() < EPS);
        assert!((t.deposit_total - 4000.0).abs() < EPS);
        assert!((t.cost_of_sales - -1000.0).abs() < EPS);
        assert!((t.gross_sales - 5000.0).abs() < EPS);
    }

    #[test]
    fn test_ratio_zero_denominator() {
        assert_eq!(ratio(500.0, 0.0), 0.0);
        assert_eq!(ratio(0.0, 0.0), 0.0);
        assert!((ratio(50.0, 200.0) - 25.0).abs() < EPS);
        assert!((ratio(-50.0, 200.0) - -25.0).abs() < EPS);
    }
}
