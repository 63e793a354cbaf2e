use serde::Serialize;

/// One stored conversion run.
#[derive(Debug, Clone, Serialize)]
pub struct StatementRecord {
    pub id: i64,
    pub upload_filename: String,
    pub transaction_period: Option<String>,
    pub input_path: String,
    pub output_path: String,
    pub upload_date: String,
    pub checksum: Option<String>,
    pub total_sales: f64,
    pub total_cost: f64,
    pub gross_profit: f64,
    pub deposit_amount: f64,
}

/// Insert payload for a new conversion; id and upload date are assigned by
/// the store.
#[derive(Debug, Clone)]
pub struct NewStatement {
    pub upload_filename: String,
    pub transaction_period: Option<String>,
    pub input_path: String,
    pub output_path: String,
    pub checksum: Option<String>,
    pub total_sales: f64,
    pub total_cost: f64,
    pub gross_profit: f64,
    pub deposit_amount: f64,
}

/// Aggregated figures for one statement month.
#[derive(Debug, Clone, Default, Serialize)]
pub struct MonthlyStat {
    pub month: String,
    pub count: i64,
    pub total_sales: f64,
    pub total_cost: f64,
    pub gross_profit: f64,
    pub deposit_amount: f64,
}

/// Grand totals across every stored conversion.
#[derive(Debug, Clone, Default, Serialize)]
pub struct StatsSummary {
    pub total_records: i64,
    pub total_sales: f64,
    pub total_cost: f64,
    pub gross_profit: f64,
    pub deposit_amount: f64,
}
