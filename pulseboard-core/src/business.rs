//! Business metrics fed to the dashboard and the advisor.
//!
//! Monthly revenue/customer series, headline KPI metrics, and a recent
//! activity feed. The bundled [`sample_business_data`] fixture stands in
//! for a live metrics pipeline.

use serde::{Deserialize, Serialize};

use crate::format::round1;

/// One month of revenue and expenses, in whole dollars.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RevenuePoint {
    pub month: String,
    pub revenue: i64,
    pub expenses: i64,
}

impl RevenuePoint {
    pub fn profit(&self) -> i64 {
        self.revenue - self.expenses
    }

    /// Profit as a percentage of revenue, one decimal. Zero-revenue months
    /// report 0 rather than dividing by zero.
    pub fn profit_margin_pct(&self) -> f64 {
        if self.revenue == 0 {
            return 0.0;
        }
        round1(self.profit() as f64 / self.revenue as f64 * 100.0)
    }
}

/// One month of customer totals and churn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomerPoint {
    pub month: String,
    pub customers: i64,
    /// Churn for the month, percent
    pub churn_pct: f64,
}

/// Direction of a KPI movement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Trend {
    Positive,
    Negative,
    Neutral,
}

/// A headline KPI shown on the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BusinessMetric {
    pub name: String,
    /// Pre-formatted display value ("$45,231", "3.2%")
    pub value: String,
    /// Pre-formatted period-over-period change ("+20.1%")
    pub change: String,
    pub trend: Trend,
}

/// An entry in the recent-activity feed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Activity {
    pub user: String,
    pub action: String,
    /// Object of the action (project, deal size, customer, ...)
    pub detail: String,
    /// Relative display time ("2 hours ago")
    pub time: String,
    /// Feed grouping ("success", "revenue", "customer", ...)
    pub kind: String,
}

/// Calendar figures embedded into the advisor context.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalendarSummary {
    pub total_meeting_hours: f64,
    pub focus_time_hours: f64,
    pub meetings_per_day: f64,
    pub efficiency_score: i64,
}

impl From<&crate::types::TimeAnalytics> for CalendarSummary {
    fn from(analytics: &crate::types::TimeAnalytics) -> Self {
        Self {
            total_meeting_hours: analytics.total_meeting_hours,
            focus_time_hours: analytics.focus_time_hours,
            meetings_per_day: analytics.meetings_per_day,
            efficiency_score: analytics.efficiency_score,
        }
    }
}

/// Everything the dashboard and the advisor know about the business.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BusinessData {
    pub revenue: Vec<RevenuePoint>,
    pub customers: Vec<CustomerPoint>,
    pub metrics: Vec<BusinessMetric>,
    pub activities: Vec<Activity>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub calendar: Option<CalendarSummary>,
}

impl BusinessData {
    pub fn latest_revenue(&self) -> Option<&RevenuePoint> {
        self.revenue.last()
    }

    pub fn latest_customers(&self) -> Option<&CustomerPoint> {
        self.customers.last()
    }

    /// Month-over-month revenue growth of the latest month, one decimal.
    /// Returns 0 with fewer than two months of data or a zero prior month.
    pub fn revenue_growth_pct(&self) -> f64 {
        growth_pct(
            self.revenue.iter().rev().nth(1).map(|p| p.revenue),
            self.revenue.last().map(|p| p.revenue),
        )
    }

    /// Month-over-month customer growth of the latest month, one decimal.
    pub fn customer_growth_pct(&self) -> f64 {
        growth_pct(
            self.customers.iter().rev().nth(1).map(|p| p.customers),
            self.customers.last().map(|p| p.customers),
        )
    }
}

fn growth_pct(previous: Option<i64>, latest: Option<i64>) -> f64 {
    match (previous, latest) {
        (Some(prev), Some(latest)) if prev != 0 => {
            round1((latest - prev) as f64 / prev as f64 * 100.0)
        }
        _ => 0.0,
    }
}

/// Six months of sample metrics for development and demos.
pub fn sample_business_data() -> BusinessData {
    let revenue = vec![
        RevenuePoint { month: "Jan".into(), revenue: 12_000, expenses: 8_000 },
        RevenuePoint { month: "Feb".into(), revenue: 15_000, expenses: 9_000 },
        RevenuePoint { month: "Mar".into(), revenue: 18_000, expenses: 10_000 },
        RevenuePoint { month: "Apr".into(), revenue: 22_000, expenses: 11_000 },
        RevenuePoint { month: "May".into(), revenue: 28_000, expenses: 13_000 },
        RevenuePoint { month: "Jun".into(), revenue: 35_000, expenses: 15_000 },
    ];

    let customers = vec![
        CustomerPoint { month: "Jan".into(), customers: 120, churn_pct: 5.0 },
        CustomerPoint { month: "Feb".into(), customers: 145, churn_pct: 8.0 },
        CustomerPoint { month: "Mar".into(), customers: 178, churn_pct: 6.0 },
        CustomerPoint { month: "Apr".into(), customers: 210, churn_pct: 12.0 },
        CustomerPoint { month: "May".into(), customers: 245, churn_pct: 9.0 },
        CustomerPoint { month: "Jun".into(), customers: 289, churn_pct: 7.0 },
    ];

    let metric = |name: &str, value: &str, change: &str, trend: Trend| BusinessMetric {
        name: name.to_string(),
        value: value.to_string(),
        change: change.to_string(),
        trend,
    };

    let metrics = vec![
        metric("Total Revenue", "$45,231", "+20.1%", Trend::Positive),
        metric("Active Customers", "289", "+15.3%", Trend::Positive),
        metric("Growth Rate", "12.5%", "+2.4%", Trend::Positive),
        metric("Conversion Rate", "3.2%", "-0.5%", Trend::Negative),
        metric("Monthly Recurring Revenue", "$28,450", "+18.2%", Trend::Positive),
        metric("Customer Lifetime Value", "$1,250", "+8.7%", Trend::Positive),
        metric("Churn Rate", "2.4%", "-1.2%", Trend::Positive),
    ];

    let activity = |user: &str, action: &str, detail: &str, time: &str, kind: &str| Activity {
        user: user.to_string(),
        action: action.to_string(),
        detail: detail.to_string(),
        time: time.to_string(),
        kind: kind.to_string(),
    };

    let activities = vec![
        activity(
            "Sarah Johnson",
            "completed project milestone",
            "Mobile App Launch",
            "2 hours ago",
            "success",
        ),
        activity("Mike Chen", "closed deal worth", "$15,000", "4 hours ago", "revenue"),
        activity(
            "Emma Davis",
            "onboarded new customer",
            "TechCorp Inc.",
            "6 hours ago",
            "customer",
        ),
        activity(
            "Alex Rodriguez",
            "launched marketing campaign",
            "Q2 Growth Initiative",
            "1 day ago",
            "marketing",
        ),
        activity(
            "Lisa Wang",
            "resolved critical bug",
            "High Priority",
            "2 days ago",
            "technical",
        ),
    ];

    BusinessData {
        revenue,
        customers,
        metrics,
        activities,
        calendar: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_fixture_shape() {
        let data = sample_business_data();
        assert_eq!(data.revenue.len(), 6);
        assert_eq!(data.customers.len(), 6);
        assert_eq!(data.metrics.len(), 7);
        assert_eq!(data.activities.len(), 5);
        assert!(data.calendar.is_none());
    }

    #[test]
    fn test_latest_and_growth() {
        let data = sample_business_data();

        let latest = data.latest_revenue().unwrap();
        assert_eq!(latest.month, "Jun");
        assert_eq!(latest.profit(), 20_000);
        assert_eq!(latest.profit_margin_pct(), 57.1);

        // May 28,000 -> Jun 35,000
        assert_eq!(data.revenue_growth_pct(), 25.0);
        // May 245 -> Jun 289
        assert_eq!(data.customer_growth_pct(), 18.0);
    }

    #[test]
    fn test_growth_guards() {
        let empty = BusinessData {
            revenue: vec![],
            customers: vec![],
            metrics: vec![],
            activities: vec![],
            calendar: None,
        };
        assert_eq!(empty.revenue_growth_pct(), 0.0);
        assert_eq!(empty.customer_growth_pct(), 0.0);

        let one_month = BusinessData {
            revenue: vec![RevenuePoint {
                month: "Jan".into(),
                revenue: 1000,
                expenses: 500,
            }],
            ..empty
        };
        assert_eq!(one_month.revenue_growth_pct(), 0.0);
    }

    #[test]
    fn test_zero_revenue_margin() {
        let point = RevenuePoint {
            month: "Jan".into(),
            revenue: 0,
            expenses: 500,
        };
        assert_eq!(point.profit_margin_pct(), 0.0);
    }
}
