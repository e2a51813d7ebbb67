//! Event-category distribution.

use crate::types::{CalendarEvent, CategoryShare};

/// Tally event counts and percentage shares per category.
///
/// Categories appear in the order they are first seen in the input; no
/// entry is produced for categories with zero occurrences. Percentages are
/// rounded independently per category and may not sum to exactly 100;
/// accepted, not corrected. An empty input yields an empty list.
pub fn category_distribution(events: &[CalendarEvent]) -> Vec<CategoryShare> {
    let mut tallies: Vec<(crate::types::EventCategory, usize)> = Vec::new();

    for event in events {
        match tallies.iter_mut().find(|(cat, _)| *cat == event.category) {
            Some((_, count)) => *count += 1,
            None => tallies.push((event.category, 1)),
        }
    }

    let total = events.len();
    tallies
        .into_iter()
        .map(|(category, count)| CategoryShare {
            category,
            count,
            percentage: ((count * 100) as f64 / total as f64).round() as u32,
        })
        .collect()
}
