//! End-to-end tests over the analytics pipeline and export surfaces.

use chrono::{NaiveDate, TimeZone, Utc};

use pulseboard_core::advisor::build_system_prompt;
use pulseboard_core::business::{sample_business_data, CalendarSummary};
use pulseboard_core::calendar::{
    analyze_gaps, analyze_time_usage, category_distribution, generate_insights, EventSource,
    StaticEventSource,
};
use pulseboard_core::export::{render_csv, standard_sections, write_pdf_report};
use pulseboard_core::{Error, EventCategory};

#[test]
fn full_pipeline_over_the_sample_week() {
    let source = StaticEventSource::sample();
    let from = Utc.with_ymd_and_hms(2024, 6, 10, 0, 0, 0).unwrap();
    let to = Utc.with_ymd_and_hms(2024, 6, 17, 0, 0, 0).unwrap();
    let events = source.events_between(from, to).unwrap();
    assert_eq!(events.len(), 7);

    // Aggregate
    let analytics = analyze_time_usage(&events).unwrap();
    assert_eq!(analytics.total_meeting_hours, 8.0);
    assert_eq!(analytics.meetings_per_day, 2.3);
    assert_eq!(analytics.efficiency_score, 85);

    // Gaps are permutation-invariant
    let mut reversed = events.clone();
    reversed.reverse();
    assert_eq!(analyze_gaps(&events), analyze_gaps(&reversed));

    // Insights fire from the aggregate
    let insights = generate_insights(&events, &analytics);
    assert!(insights.len() <= 4);
    assert_eq!(insights[0].title, "Increase Deep Work Time");

    // Distribution covers every present category exactly once
    let shares = category_distribution(&events);
    assert_eq!(shares.len(), 6);
    assert_eq!(
        shares.iter().map(|s| s.count).sum::<usize>(),
        events.len()
    );
    assert!(shares
        .iter()
        .any(|s| s.category == EventCategory::Meeting && s.count == 2));
}

#[test]
fn empty_event_list_is_an_error_not_a_zero_struct() {
    match analyze_time_usage(&[]) {
        Err(Error::InvalidInput(_)) => {}
        other => panic!("expected InvalidInput, got {:?}", other.map(|_| ())),
    }
}

#[test]
fn calendar_summary_feeds_the_advisor_prompt() {
    let events = StaticEventSource::sample().all_events();
    let analytics = analyze_time_usage(&events).unwrap();

    let mut data = sample_business_data();
    data.calendar = Some(CalendarSummary::from(&analytics));

    let prompt = build_system_prompt(&data, Some("Where is my time going?"));
    assert!(prompt.contains("- Weekly Meeting Hours: 8h"));
    assert!(prompt.contains("- Focus Time Available: 16h"));
    assert!(prompt.contains("- Meeting Efficiency Score: 85/100"));
    assert!(prompt.contains("USER QUESTION: Where is my time going?"));
}

#[test]
fn exports_cover_every_standard_section() {
    let data = sample_business_data();
    let sections = standard_sections(&data);
    let date = NaiveDate::from_ymd_opt(2024, 6, 14).unwrap();

    for section in &sections {
        let csv = render_csv(section, date);
        let mut lines = csv.lines();
        assert_eq!(lines.next(), Some(section.title.as_str()));
        assert_eq!(lines.next(), Some("Generated on: 2024-06-14"));
        // Every data row has as many fields as the header
        let rows = section.rows();
        for row in &rows {
            assert_eq!(row.len(), section.headers().len());
        }
        assert!(!rows.is_empty());
    }

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("dashboard.pdf");
    write_pdf_report(&sections, &path, date).unwrap();
    assert!(std::fs::read(&path).unwrap().starts_with(b"%PDF"));
}
