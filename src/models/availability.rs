//! Availability model and tally aggregation
//!
//! Availability is a per-user set of weekday tokens for one event. The
//! aggregation turns all submitted sets into a fully populated per-weekday
//! tally plus the two recommended days. Everything here is pure so the math
//! can be tested without a database.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

/// Number of recommended days returned by the aggregation
pub const TOP_DAYS_LIMIT: usize = 2;

/// Weekday tokens in canonical order; this order is the tie-break everywhere
pub const WEEKDAYS: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, sqlx::Type,
)]
#[serde(rename_all = "UPPERCASE")]
#[sqlx(type_name = "weekday", rename_all = "UPPERCASE")]
pub enum Weekday {
    Mon,
    Tue,
    Wed,
    Thu,
    Fri,
    Sat,
    Sun,
}

impl Weekday {
    pub fn as_str(&self) -> &'static str {
        match self {
            Weekday::Mon => "MON",
            Weekday::Tue => "TUE",
            Weekday::Wed => "WED",
            Weekday::Thu => "THU",
            Weekday::Fri => "FRI",
            Weekday::Sat => "SAT",
            Weekday::Sun => "SUN",
        }
    }
}

impl std::fmt::Display for Weekday {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// De-duplicate a day selection into canonical MON..SUN order.
///
/// Duplicate tokens in one submission would otherwise double-count that user
/// in the tallies.
pub fn normalize_days(days: &[Weekday]) -> Vec<Weekday> {
    days.iter().copied().collect::<BTreeSet<_>>().into_iter().collect()
}

/// Per-weekday vote counts with every weekday always present
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeekdayTallies {
    #[serde(rename = "MON")]
    pub mon: u32,
    #[serde(rename = "TUE")]
    pub tue: u32,
    #[serde(rename = "WED")]
    pub wed: u32,
    #[serde(rename = "THU")]
    pub thu: u32,
    #[serde(rename = "FRI")]
    pub fri: u32,
    #[serde(rename = "SAT")]
    pub sat: u32,
    #[serde(rename = "SUN")]
    pub sun: u32,
}

impl WeekdayTallies {
    pub fn bump(&mut self, day: Weekday) {
        match day {
            Weekday::Mon => self.mon += 1,
            Weekday::Tue => self.tue += 1,
            Weekday::Wed => self.wed += 1,
            Weekday::Thu => self.thu += 1,
            Weekday::Fri => self.fri += 1,
            Weekday::Sat => self.sat += 1,
            Weekday::Sun => self.sun += 1,
        }
    }

    pub fn get(&self, day: Weekday) -> u32 {
        match day {
            Weekday::Mon => self.mon,
            Weekday::Tue => self.tue,
            Weekday::Wed => self.wed,
            Weekday::Thu => self.thu,
            Weekday::Fri => self.fri,
            Weekday::Sat => self.sat,
            Weekday::Sun => self.sun,
        }
    }

    /// All entries in canonical weekday order
    pub fn entries(&self) -> [(Weekday, u32); 7] {
        [
            (Weekday::Mon, self.mon),
            (Weekday::Tue, self.tue),
            (Weekday::Wed, self.wed),
            (Weekday::Thu, self.thu),
            (Weekday::Fri, self.fri),
            (Weekday::Sat, self.sat),
            (Weekday::Sun, self.sun),
        ]
    }

    pub fn total(&self) -> u32 {
        self.entries().iter().map(|(_, count)| count).sum()
    }
}

/// One recommended day with its vote count
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayTally {
    pub weekday: Weekday,
    pub count: u32,
}

/// Tally every submitted day-set; each user contributes at most one vote per
/// weekday regardless of duplicates in their submission.
pub fn tally_day_sets(day_sets: &[Vec<Weekday>]) -> WeekdayTallies {
    let mut tallies = WeekdayTallies::default();
    for days in day_sets {
        for day in normalize_days(days) {
            tallies.bump(day);
        }
    }
    tallies
}

/// The two highest-tallied weekdays, count descending, ties broken by
/// canonical weekday order. Zero-count days are eligible when fewer than two
/// days have votes.
pub fn top_days(tallies: &WeekdayTallies) -> Vec<DayTally> {
    let mut entries = tallies.entries();
    entries.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
    entries
        .into_iter()
        .take(TOP_DAYS_LIMIT)
        .map(|(weekday, count)| DayTally { weekday, count })
        .collect()
}

/// Aggregate report over all availability rows of one event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityReport {
    pub tallies: WeekdayTallies,
    pub top_days: Vec<DayTally>,
}

pub fn build_report(day_sets: &[Vec<Weekday>]) -> AvailabilityReport {
    let tallies = tally_day_sets(day_sets);
    let top_days = top_days(&tallies);
    AvailabilityReport { tallies, top_days }
}

/// Persisted availability row for one (event, user) pair
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityPreference {
    pub id: Uuid,
    pub event_id: Uuid,
    pub user_id: Uuid,
    pub days: Vec<Weekday>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SetAvailabilityRequest {
    #[validate(length(min = 1, max = 7))]
    pub days: Vec<Weekday>,
}

/// Response to an availability read
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityView {
    pub event_id: Uuid,
    pub tallies: WeekdayTallies,
    pub top_days: Vec<DayTally>,
    pub my_days: Vec<Weekday>,
}

/// Response to an availability submission
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilitySubmission {
    pub my_days: Vec<Weekday>,
    pub tallies: WeekdayTallies,
    pub top_days: Vec<DayTally>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_two_user_scenario() {
        let day_sets = vec![
            vec![Weekday::Mon, Weekday::Wed],
            vec![Weekday::Mon],
        ];
        let report = build_report(&day_sets);

        assert_eq!(report.tallies.mon, 2);
        assert_eq!(report.tallies.wed, 1);
        assert_eq!(report.tallies.tue, 0);
        assert_eq!(report.tallies.thu, 0);
        assert_eq!(report.tallies.fri, 0);
        assert_eq!(report.tallies.sat, 0);
        assert_eq!(report.tallies.sun, 0);

        assert_eq!(
            report.top_days,
            vec![
                DayTally { weekday: Weekday::Mon, count: 2 },
                DayTally { weekday: Weekday::Wed, count: 1 },
            ]
        );
    }

    #[test]
    fn test_no_rows_yields_zero_filled_report() {
        let report = build_report(&[]);

        assert_eq!(report.tallies, WeekdayTallies::default());
        assert_eq!(report.tallies.total(), 0);
        // zero-count days are still recommended, in canonical order
        assert_eq!(
            report.top_days,
            vec![
                DayTally { weekday: Weekday::Mon, count: 0 },
                DayTally { weekday: Weekday::Tue, count: 0 },
            ]
        );
    }

    #[test]
    fn test_single_vote_pads_with_zero_count_day() {
        let report = build_report(&[vec![Weekday::Sun]]);
        assert_eq!(
            report.top_days,
            vec![
                DayTally { weekday: Weekday::Sun, count: 1 },
                DayTally { weekday: Weekday::Mon, count: 0 },
            ]
        );
    }

    #[test]
    fn test_ties_break_in_weekday_order() {
        let report = build_report(&[vec![Weekday::Thu], vec![Weekday::Tue]]);
        assert_eq!(
            report.top_days,
            vec![
                DayTally { weekday: Weekday::Tue, count: 1 },
                DayTally { weekday: Weekday::Thu, count: 1 },
            ]
        );
    }

    #[test]
    fn test_duplicate_tokens_count_once() {
        let report = build_report(&[vec![Weekday::Tue, Weekday::Tue, Weekday::Tue]]);
        assert_eq!(report.tallies.tue, 1);
        assert_eq!(report.tallies.total(), 1);
    }

    #[test]
    fn test_normalize_days_orders_and_dedups() {
        let days = [Weekday::Wed, Weekday::Mon, Weekday::Wed, Weekday::Sun];
        assert_eq!(
            normalize_days(&days),
            vec![Weekday::Mon, Weekday::Wed, Weekday::Sun]
        );
        assert!(normalize_days(&[]).is_empty());
    }

    #[test]
    fn test_tallies_serialize_with_all_keys() {
        let mut tallies = WeekdayTallies::default();
        tallies.bump(Weekday::Fri);

        let json = serde_json::to_value(tallies).unwrap();
        let object = json.as_object().unwrap();
        assert_eq!(object.len(), 7);
        assert_eq!(object["FRI"], 1);
        assert_eq!(object["MON"], 0);
    }

    #[test]
    fn test_report_serializes_camel_case() {
        let report = build_report(&[vec![Weekday::Sat]]);
        let json = serde_json::to_value(&report).unwrap();
        assert!(json.get("topDays").is_some());
        assert_eq!(json["topDays"][0]["weekday"], "SAT");
    }

    fn weekday_strategy() -> impl Strategy<Value = Weekday> {
        prop::sample::select(WEEKDAYS.to_vec())
    }

    proptest! {
        #[test]
        fn prop_votes_are_conserved(day_sets in prop::collection::vec(
            prop::collection::vec(weekday_strategy(), 0..=7),
            0..10,
        )) {
            let tallies = tally_day_sets(&day_sets);
            let expected: u32 = day_sets
                .iter()
                .map(|days| normalize_days(days).len() as u32)
                .sum();
            prop_assert_eq!(tallies.total(), expected);
        }

        #[test]
        fn prop_top_days_has_two_sorted_entries(day_sets in prop::collection::vec(
            prop::collection::vec(weekday_strategy(), 0..=7),
            0..10,
        )) {
            let report = build_report(&day_sets);
            prop_assert_eq!(report.top_days.len(), TOP_DAYS_LIMIT);

            let first = report.top_days[0];
            let second = report.top_days[1];
            prop_assert!(
                first.count > second.count
                    || (first.count == second.count && first.weekday < second.weekday)
            );
            for entry in [first, second] {
                prop_assert_eq!(entry.count, report.tallies.get(entry.weekday));
            }
            // nothing outside the selection beats what was selected
            for (weekday, count) in report.tallies.entries() {
                if weekday != first.weekday && weekday != second.weekday {
                    prop_assert!(count <= second.count);
                }
            }
        }

        #[test]
        fn prop_aggregation_is_deterministic(day_sets in prop::collection::vec(
            prop::collection::vec(weekday_strategy(), 0..=7),
            0..10,
        )) {
            prop_assert_eq!(build_report(&day_sets), build_report(&day_sets));
        }
    }
}
