//! System-prompt assembly for the advisor.

use crate::business::BusinessData;
use crate::format::format_money;

/// A canned advisor question offered by the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PredefinedPrompt {
    pub id: &'static str,
    pub title: &'static str,
    pub question: &'static str,
}

/// The stock questions surfaced as one-click insights.
pub const PREDEFINED_PROMPTS: &[PredefinedPrompt] = &[
    PredefinedPrompt {
        id: "revenue-optimization",
        title: "Revenue Optimization",
        question: "How can I optimize my revenue streams and increase profitability?",
    },
    PredefinedPrompt {
        id: "customer-retention",
        title: "Customer Retention",
        question: "What strategies should I implement to reduce churn and improve customer retention?",
    },
    PredefinedPrompt {
        id: "growth-strategy",
        title: "Growth Strategy",
        question: "Based on my current metrics, what's the best growth strategy for the next quarter?",
    },
    PredefinedPrompt {
        id: "cost-management",
        title: "Cost Management",
        question: "How can I optimize my expenses while maintaining growth momentum?",
    },
    PredefinedPrompt {
        id: "market-expansion",
        title: "Market Expansion",
        question: "When and how should I consider expanding to new markets or customer segments?",
    },
];

/// Build the system prompt embedding the current business data.
///
/// The prompt lays out financial and customer figures, the KPI list, the
/// recent trend lines, and (when available) the calendar summary, followed
/// by the user's question and the advisor persona.
pub fn build_system_prompt(data: &BusinessData, user_question: Option<&str>) -> String {
    let mut prompt = String::from(
        "You are an AI business advisor for a startup. Here's the current business data:\n",
    );

    if let Some(latest) = data.latest_revenue() {
        prompt.push_str("\nFINANCIAL METRICS:\n");
        prompt.push_str(&format!(
            "- Latest Monthly Revenue: {}\n",
            format_money(latest.revenue)
        ));
        prompt.push_str(&format!(
            "- Latest Monthly Expenses: {}\n",
            format_money(latest.expenses)
        ));
        prompt.push_str(&format!("- Monthly Profit: {}\n", format_money(latest.profit())));
        prompt.push_str(&format!("- Revenue Growth: {}%\n", data.revenue_growth_pct()));
        prompt.push_str(&format!("- Profit Margin: {}%\n", latest.profit_margin_pct()));
    }

    if let Some(latest) = data.latest_customers() {
        prompt.push_str("\nCUSTOMER METRICS:\n");
        prompt.push_str(&format!("- Total Customers: {}\n", latest.customers));
        prompt.push_str(&format!(
            "- Customer Growth: {}%\n",
            data.customer_growth_pct()
        ));
        prompt.push_str(&format!("- Current Churn Rate: {}%\n", latest.churn_pct));
    }

    if !data.metrics.is_empty() {
        prompt.push_str("\nKEY PERFORMANCE INDICATORS:\n");
        for metric in &data.metrics {
            prompt.push_str(&format!(
                "- {}: {} ({})\n",
                metric.name, metric.value, metric.change
            ));
        }
    }

    if !data.revenue.is_empty() {
        let trend: Vec<String> = data
            .revenue
            .iter()
            .map(|r| format!("{}: {}", r.month, format_money(r.revenue)))
            .collect();
        prompt.push_str(&format!(
            "\nRECENT REVENUE TREND (Last {} months):\n{}\n",
            data.revenue.len(),
            trend.join(", ")
        ));
    }

    if !data.customers.is_empty() {
        let trend: Vec<String> = data
            .customers
            .iter()
            .map(|c| format!("{}: {} customers", c.month, c.customers))
            .collect();
        prompt.push_str(&format!(
            "\nRECENT CUSTOMER TREND (Last {} months):\n{}\n",
            data.customers.len(),
            trend.join(", ")
        ));
    }

    if let Some(calendar) = &data.calendar {
        prompt.push_str("\nCALENDAR & TIME MANAGEMENT:\n");
        prompt.push_str(&format!(
            "- Weekly Meeting Hours: {}h\n",
            calendar.total_meeting_hours
        ));
        prompt.push_str(&format!(
            "- Focus Time Available: {}h\n",
            calendar.focus_time_hours
        ));
        prompt.push_str(&format!(
            "- Average Meetings per Day: {}\n",
            calendar.meetings_per_day
        ));
        prompt.push_str(&format!(
            "- Meeting Efficiency Score: {}/100\n",
            calendar.efficiency_score
        ));
    }

    if let Some(question) = user_question {
        prompt.push_str(&format!("\nUSER QUESTION: {}\n", question));
    }

    prompt.push_str(
        "\nPlease provide actionable insights and recommendations based on this data. Focus on:\n\
         1. Key areas for improvement\n\
         2. Growth opportunities\n\
         3. Risk factors to address\n\
         4. Specific action items\n\
         \n\
         Be concise, data-driven, and practical in your recommendations.\n\
         \n\
         Provide specific, actionable insights based on the business data provided. \
         Always be encouraging but realistic. Format your responses clearly with bullet \
         points or numbered lists when appropriate. If asked about specific metrics, \
         reference the actual data provided.\n",
    );

    prompt
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::business::{sample_business_data, CalendarSummary};

    #[test]
    fn test_prompt_embeds_latest_figures() {
        let prompt = build_system_prompt(&sample_business_data(), None);

        assert!(prompt.contains("- Latest Monthly Revenue: $35,000"));
        assert!(prompt.contains("- Latest Monthly Expenses: $15,000"));
        assert!(prompt.contains("- Monthly Profit: $20,000"));
        assert!(prompt.contains("- Revenue Growth: 25%"));
        assert!(prompt.contains("- Profit Margin: 57.1%"));
        assert!(prompt.contains("- Total Customers: 289"));
        assert!(prompt.contains("- Customer Growth: 18%"));
        assert!(prompt.contains("Jan: $12,000"));
        assert!(prompt.contains("Jun: 289 customers"));
        assert!(prompt.contains("- Total Revenue: $45,231 (+20.1%)"));
    }

    #[test]
    fn test_prompt_includes_calendar_when_present() {
        let mut data = sample_business_data();
        assert!(!build_system_prompt(&data, None).contains("CALENDAR & TIME MANAGEMENT"));

        data.calendar = Some(CalendarSummary {
            total_meeting_hours: 8.0,
            focus_time_hours: 16.0,
            meetings_per_day: 2.3,
            efficiency_score: 85,
        });
        let prompt = build_system_prompt(&data, None);
        assert!(prompt.contains("- Weekly Meeting Hours: 8h"));
        assert!(prompt.contains("- Meeting Efficiency Score: 85/100"));
    }

    #[test]
    fn test_prompt_includes_user_question() {
        let prompt = build_system_prompt(
            &sample_business_data(),
            Some("How do I reduce churn?"),
        );
        assert!(prompt.contains("USER QUESTION: How do I reduce churn?"));
    }

    #[test]
    fn test_prompt_survives_empty_data() {
        let data = crate::business::BusinessData {
            revenue: vec![],
            customers: vec![],
            metrics: vec![],
            activities: vec![],
            calendar: None,
        };
        let prompt = build_system_prompt(&data, None);
        assert!(prompt.contains("business advisor"));
        assert!(!prompt.contains("FINANCIAL METRICS"));
    }

    #[test]
    fn test_predefined_prompts() {
        assert_eq!(PREDEFINED_PROMPTS.len(), 5);
        assert_eq!(PREDEFINED_PROMPTS[0].id, "revenue-optimization");
    }
}
