//! pulseboard - startup metrics dashboard CLI
//!
//! Renders the dashboard summary in the terminal, exports CSV/PDF reports,
//! and streams answers from the AI business advisor.

use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::Local;
use clap::{Parser, Subcommand};

use pulseboard_core::advisor::{AdvisorRelay, ChatMessage, RelayEvent};
use pulseboard_core::business::{sample_business_data, BusinessData, CalendarSummary};
use pulseboard_core::calendar::{
    analyze_time_usage, category_distribution, generate_insights, StaticEventSource,
};
use pulseboard_core::export::csv::export_filename;
use pulseboard_core::export::{standard_sections, write_csv, write_pdf_report};
use pulseboard_core::format::format_money;
use pulseboard_core::types::{CalendarEvent, TimeAnalytics};
use pulseboard_core::Config;

#[derive(Parser, Debug)]
#[command(name = "pulseboard")]
#[command(about = "Startup metrics dashboard")]
#[command(version)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the dashboard summary to the terminal
    Report {
        /// Emit the summary as JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Write dashboard reports to disk
    Export {
        /// Output format: csv or pdf
        #[arg(long, default_value = "csv")]
        format: String,

        /// Output directory (default: from config)
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Ask the AI business advisor a question
    Ask {
        /// The question to ask
        question: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let config = Config::load().context("failed to load configuration")?;
    let _log_guard = pulseboard_core::logging::init(&config.logging).ok();

    let events = StaticEventSource::sample().all_events();
    let analytics = analyze_time_usage(&events).context("failed to analyze calendar")?;

    let mut data = sample_business_data();
    data.calendar = Some(CalendarSummary::from(&analytics));

    match args.command {
        Command::Report { json } => report(&data, &events, &analytics, json)?,
        Command::Export { format, out } => {
            let dir = out.unwrap_or_else(|| config.export.output_dir.clone());
            export(&data, &dir, &format)?;
        }
        Command::Ask { question } => ask(&config, &data, &question).await?,
    }

    Ok(())
}

fn report(
    data: &BusinessData,
    events: &[CalendarEvent],
    analytics: &TimeAnalytics,
    json: bool,
) -> Result<()> {
    let insights = generate_insights(events, analytics);
    let distribution = category_distribution(events);

    if json {
        let summary = serde_json::json!({
            "metrics": data.metrics,
            "revenue": data.revenue,
            "customers": data.customers,
            "calendar": analytics,
            "insights": insights,
            "distribution": distribution,
        });
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    println!();
    println!("PULSEBOARD");
    println!("{}", "=".repeat(60));

    println!();
    println!("KEY METRICS");
    for metric in &data.metrics {
        println!("   {:<28} {:>10}  ({})", metric.name, metric.value, metric.change);
    }

    if let Some(latest) = data.latest_revenue() {
        println!();
        println!("LATEST MONTH ({})", latest.month);
        println!(
            "   Revenue: {:<12} Expenses: {:<12} Profit: {}",
            format_money(latest.revenue),
            format_money(latest.expenses),
            format_money(latest.profit())
        );
        println!(
            "   Revenue growth: {}%   Profit margin: {}%",
            data.revenue_growth_pct(),
            latest.profit_margin_pct()
        );
    }

    println!();
    println!("CALENDAR");
    println!(
        "   Meeting hours: {:<8} Focus hours: {:<8} Meetings/day: {}",
        analytics.total_meeting_hours, analytics.focus_time_hours, analytics.meetings_per_day
    );
    println!(
        "   Efficiency score: {}/100   Quiet hours: {}",
        analytics.efficiency_score,
        analytics.most_productive_hours.join(", ")
    );

    if !distribution.is_empty() {
        println!();
        println!("MEETING MIX");
        for share in &distribution {
            println!(
                "   {:<12} {:>2} ({:>3}%)",
                share.category.as_str(),
                share.count,
                share.percentage
            );
        }
    }

    if !insights.is_empty() {
        println!();
        println!("INSIGHTS");
        for insight in &insights {
            println!(
                "   [{}] {} - {}",
                insight.impact.as_str(),
                insight.title,
                insight.description
            );
            println!("         Est. saved: {}", insight.time_saved);
        }
    }

    println!();
    Ok(())
}

fn export(data: &BusinessData, dir: &PathBuf, format: &str) -> Result<()> {
    let sections = standard_sections(data);
    let today = Local::now().date_naive();

    match format {
        "csv" => {
            for section in &sections {
                let path = write_csv(section, dir, today)
                    .with_context(|| format!("failed to export {}", section.title))?;
                println!("Wrote {}", path.display());
            }
        }
        "pdf" => {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("failed to create {}", dir.display()))?;
            let path = dir.join(export_filename("Pulseboard Dashboard Report", "pdf", today));
            write_pdf_report(&sections, &path, today).context("failed to export PDF report")?;
            println!("Wrote {}", path.display());
        }
        other => anyhow::bail!("Unknown export format: {}. Use 'csv' or 'pdf'", other),
    }

    Ok(())
}

async fn ask(config: &Config, data: &BusinessData, question: &str) -> Result<()> {
    let advisor_config = config
        .advisor
        .clone()
        .context("advisor is not configured; add an [advisor] section to the config file")?;

    let relay = AdvisorRelay::new(advisor_config).context("failed to build advisor relay")?;
    let history = vec![ChatMessage::user(question)];

    let mut rx = relay
        .stream_reply(&history, data)
        .await
        .context("advisor request failed")?;

    let mut stdout = std::io::stdout();
    while let Some(event) = rx.recv().await {
        match event {
            RelayEvent::Started => {}
            RelayEvent::Delta(text) => {
                write!(stdout, "{}", text)?;
                stdout.flush()?;
            }
            RelayEvent::Done => {
                writeln!(stdout)?;
                return Ok(());
            }
            RelayEvent::Failed(message) => {
                anyhow::bail!("advisor stream failed: {}", message);
            }
        }
    }

    anyhow::bail!("advisor stream ended unexpectedly")
}
