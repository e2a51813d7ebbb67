//! Report export.
//!
//! Serializes titled dashboard datasets to CSV (one file per section) or to
//! a single paginated PDF report. Both renderers share the same tabular row
//! model so the formats cannot drift apart.

pub mod csv;
pub mod pdf;

pub use csv::{render_csv, write_csv};
pub use pdf::write_pdf_report;

use crate::business::{Activity, BusinessData, BusinessMetric, CustomerPoint, RevenuePoint};
use crate::format::format_money;

/// Payload of one exportable section.
#[derive(Debug, Clone)]
pub enum SectionData {
    Revenue(Vec<RevenuePoint>),
    Customers(Vec<CustomerPoint>),
    Activities(Vec<Activity>),
    Metrics(Vec<BusinessMetric>),
}

/// A titled dataset ready for export.
#[derive(Debug, Clone)]
pub struct ExportSection {
    pub title: String,
    pub data: SectionData,
}

impl ExportSection {
    pub fn new(title: impl Into<String>, data: SectionData) -> Self {
        Self {
            title: title.into(),
            data,
        }
    }

    /// Column headers for this section's table.
    pub fn headers(&self) -> Vec<&'static str> {
        match &self.data {
            SectionData::Revenue(_) => {
                vec!["Month", "Revenue", "Expenses", "Profit", "Profit Margin"]
            }
            SectionData::Customers(_) => {
                vec!["Month", "Total Customers", "Churn Rate", "Growth Rate"]
            }
            SectionData::Activities(_) => vec!["User", "Action", "Time", "Type"],
            SectionData::Metrics(_) => vec!["Metric", "Value", "Change"],
        }
    }

    /// Formatted table rows for this section.
    ///
    /// Derived columns are computed here: profit and margin for revenue,
    /// month-over-month growth for customers.
    pub fn rows(&self) -> Vec<Vec<String>> {
        match &self.data {
            SectionData::Revenue(points) => points
                .iter()
                .map(|p| {
                    vec![
                        p.month.clone(),
                        format_money(p.revenue),
                        format_money(p.expenses),
                        format_money(p.profit()),
                        format!("{}%", p.profit_margin_pct()),
                    ]
                })
                .collect(),
            SectionData::Customers(points) => points
                .iter()
                .enumerate()
                .map(|(i, p)| {
                    let growth = if i == 0 {
                        0.0
                    } else {
                        let prev = points[i - 1].customers;
                        if prev == 0 {
                            0.0
                        } else {
                            (p.customers - prev) as f64 / prev as f64 * 100.0
                        }
                    };
                    vec![
                        p.month.clone(),
                        p.customers.to_string(),
                        format!("{}%", p.churn_pct),
                        format!("{:.1}%", growth),
                    ]
                })
                .collect(),
            SectionData::Activities(activities) => activities
                .iter()
                .map(|a| {
                    vec![
                        a.user.clone(),
                        format!("{} {}", a.action, a.detail).trim().to_string(),
                        a.time.clone(),
                        a.kind.clone(),
                    ]
                })
                .collect(),
            SectionData::Metrics(metrics) => metrics
                .iter()
                .map(|m| vec![m.name.clone(), m.value.clone(), m.change.clone()])
                .collect(),
        }
    }
}

/// The four standard dashboard sections, in report order.
pub fn standard_sections(data: &BusinessData) -> Vec<ExportSection> {
    vec![
        ExportSection::new("Revenue Data", SectionData::Revenue(data.revenue.clone())),
        ExportSection::new(
            "Customer Growth",
            SectionData::Customers(data.customers.clone()),
        ),
        ExportSection::new(
            "Recent Activities",
            SectionData::Activities(data.activities.clone()),
        ),
        ExportSection::new("Key Metrics", SectionData::Metrics(data.metrics.clone())),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::business::sample_business_data;

    #[test]
    fn test_standard_sections() {
        let sections = standard_sections(&sample_business_data());
        assert_eq!(sections.len(), 4);
        assert_eq!(sections[0].title, "Revenue Data");
        assert_eq!(sections[0].headers().len(), 5);
    }

    #[test]
    fn test_revenue_rows_derive_profit() {
        let sections = standard_sections(&sample_business_data());
        let rows = sections[0].rows();
        assert_eq!(rows.len(), 6);
        // Jun: 35,000 revenue, 15,000 expenses
        assert_eq!(rows[5][1], "$35,000");
        assert_eq!(rows[5][3], "$20,000");
        assert_eq!(rows[5][4], "57.1%");
    }

    #[test]
    fn test_customer_rows_derive_growth() {
        let sections = standard_sections(&sample_business_data());
        let rows = sections[1].rows();
        // First month has no prior month to grow from
        assert_eq!(rows[0][3], "0.0%");
        // Feb: 120 -> 145
        assert_eq!(rows[1][3], "20.8%");
    }

    #[test]
    fn test_activity_rows_join_action_and_detail() {
        let sections = standard_sections(&sample_business_data());
        let rows = sections[2].rows();
        assert_eq!(rows[1][1], "closed deal worth $15,000");
    }
}
