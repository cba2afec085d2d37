//! Fabricated journal history for the calendar screen.
//!
//! Nothing here is stored. Entries are generated on demand for fixed day
//! offsets before `today`; Tuesdays lean towards high cognitive load.

use chrono::{Datelike, Duration, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use crate::analysis::CognitiveLoad;
use crate::random::RandomSource;

/// Days before today that carry an entry.
pub const JOURNAL_OFFSETS: [i64; 15] = [1, 3, 5, 7, 9, 12, 14, 16, 17, 19, 21, 23, 25, 27, 29];

pub const JOURNAL_EMOTIONS: [&str; 6] = ["Calm", "Anxious", "Stressed", "Overwhelmed", "Peaceful", "Tense"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JournalEntry {
    pub date: NaiveDate,
    pub cognitive_load: CognitiveLoad,
    pub emotion: String,
}

/// One cell of the month grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarDay {
    pub day: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entry: Option<JournalEntry>,
}

/// Generate the history, newest first.
pub fn generate_history(today: NaiveDate, rng: &mut dyn RandomSource) -> Vec<JournalEntry> {
    let mut entries: Vec<JournalEntry> = JOURNAL_OFFSETS
        .iter()
        .map(|&offset| {
            let date = today - Duration::days(offset);
            let cognitive_load = if date.weekday() == Weekday::Tue {
                if rng.unit() > 0.3 {
                    CognitiveLoad::High
                } else {
                    CognitiveLoad::Med
                }
            } else {
                CognitiveLoad::ALL[rng.below(CognitiveLoad::ALL.len() as u32) as usize]
            };
            let emotion = JOURNAL_EMOTIONS[rng.below(JOURNAL_EMOTIONS.len() as u32) as usize];
            JournalEntry {
                date,
                cognitive_load,
                emotion: emotion.to_string(),
            }
        })
        .collect();
    entries.sort_by(|a, b| b.date.cmp(&a.date));
    entries
}

/// Lay out `month` of `year` with leading blanks so the first column is
/// Sunday, attaching any entry that falls on each day.
pub fn month_grid(year: i32, month: u32, entries: &[JournalEntry]) -> Vec<Option<CalendarDay>> {
    let Some(first) = NaiveDate::from_ymd_opt(year, month, 1) else {
        return Vec::new();
    };
    let next_month = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    };
    let days_in_month = next_month
        .map(|next| (next - first).num_days() as u32)
        .unwrap_or(31);

    let leading = first.weekday().num_days_from_sunday() as usize;
    let mut grid: Vec<Option<CalendarDay>> = vec![None; leading];
    for day in 1..=days_in_month {
        let entry = first
            .with_day(day)
            .and_then(|date| entries.iter().find(|e| e.date == date).cloned());
        grid.push(Some(CalendarDay { day, entry }));
    }
    grid
}
