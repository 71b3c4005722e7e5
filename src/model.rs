use chrono::{DateTime, Datelike, FixedOffset, TimeZone, Timelike, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::util::day_name;

pub const SCHEMA_VERSION: u32 = 1;

pub const DAYS_PER_WEEK: u8 = 7;
pub const HOURS_PER_DAY: u8 = 24;

/// One historical commit as seen by the aggregator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitRecord {
    pub author_email: String,
    pub author_name: String,
    /// Time of the signature the identity came from, in its recorded offset.
    pub timestamp: DateTime<FixedOffset>,
}

impl CommitRecord {
    pub fn new(
        author_email: impl Into<String>,
        author_name: impl Into<String>,
        timestamp: DateTime<FixedOffset>,
    ) -> Self {
        Self {
            author_email: author_email.into(),
            author_name: author_name.into(),
            timestamp,
        }
    }

    pub fn slot(&self) -> Slot {
        Slot::from_timestamp(&self.timestamp)
    }
}

/// Which signature of a commit identifies its author.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum IdentitySource {
    #[default]
    Author,
    Committer,
}

/// A `(day, hour)` cell of the punch card. Day 0 is Sunday.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Slot {
    day: u8,
    hour: u8,
}

impl Slot {
    pub fn new(day: u8, hour: u8) -> Option<Self> {
        (day < DAYS_PER_WEEK && hour < HOURS_PER_DAY).then_some(Self { day, hour })
    }

    /// Slot of a timestamp in its own offset. Weeks start on Sunday.
    pub fn from_timestamp<Tz: TimeZone>(timestamp: &DateTime<Tz>) -> Self {
        Self {
            day: timestamp.weekday().num_days_from_sunday() as u8,
            hour: timestamp.hour() as u8,
        }
    }

    pub fn day(&self) -> u8 {
        self.day
    }

    pub fn hour(&self) -> u8 {
        self.hour
    }

    pub fn day_name(&self) -> &'static str {
        day_name(self.day)
    }
}

/// Sparse per-author commit counts. Absent slots have zero commits.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrequencyTable {
    counts: BTreeMap<Slot, u32>,
}

impl FrequencyTable {
    pub(crate) fn increment(&mut self, slot: Slot) -> u32 {
        let count = self.counts.entry(slot).or_insert(0);
        *count += 1;
        *count
    }

    pub fn get(&self, slot: Slot) -> u32 {
        self.counts.get(&slot).copied().unwrap_or(0)
    }

    /// Observed slots in day-then-hour order.
    pub fn iter(&self) -> impl Iterator<Item = (Slot, u32)> + '_ {
        self.counts.iter().map(|(slot, count)| (*slot, *count))
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn total(&self) -> u64 {
        self.counts.values().map(|&c| c as u64).sum()
    }

    pub fn max(&self) -> u32 {
        self.counts.values().copied().max().unwrap_or(0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorIdentity {
    pub email: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorSection {
    pub identity: AuthorIdentity,
    pub table: FrequencyTable,
}

/// Input of the renderer: one section per author plus the normalization ceiling.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderModel {
    sections: Vec<AuthorSection>,
    max_count: u32,
}

impl RenderModel {
    pub fn new(sections: Vec<AuthorSection>, max_count: u32) -> Self {
        Self { sections, max_count }
    }

    pub fn sections(&self) -> &[AuthorSection] {
        &self.sections
    }

    pub fn max_count(&self) -> u32 {
        self.max_count
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlotCount {
    pub day: u8,
    pub day_name: String,
    pub hour: u8,
    pub count: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthorReport {
    pub email: String,
    pub name: String,
    pub total_commits: u64,
    pub slots: Vec<SlotCount>,
}

impl AuthorReport {
    pub fn from_section(section: &AuthorSection) -> Self {
        Self {
            email: section.identity.email.clone(),
            name: section.identity.name.clone(),
            total_commits: section.table.total(),
            slots: section
                .table
                .iter()
                .map(|(slot, count)| SlotCount {
                    day: slot.day(),
                    day_name: slot.day_name().to_string(),
                    hour: slot.hour(),
                    count,
                })
                .collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PunchCardOutput {
    pub version: u32,
    pub generated_at: DateTime<Utc>,
    pub repository_path: String,
    pub since: Option<String>,
    pub until: Option<String>,
    pub identity: IdentitySource,
    pub max_count: u32,
    pub total_commits: u64,
    pub authors: Vec<AuthorReport>,
}

#[derive(Debug, Clone)]
pub struct DateRange {
    pub since: Option<DateTime<Utc>>,
    pub until: Option<DateTime<Utc>>,
}

impl DateRange {
    pub fn new() -> Self {
        Self { since: None, until: None }
    }

    pub fn with_since(mut self, since: DateTime<Utc>) -> Self {
        self.since = Some(since);
        self
    }

    pub fn with_until(mut self, until: DateTime<Utc>) -> Self {
        self.until = Some(until);
        self
    }

    pub fn contains(&self, timestamp: &DateTime<Utc>) -> bool {
        if let Some(since) = self.since {
            if timestamp < &since {
                return false;
            }
        }
        if let Some(until) = self.until {
            if timestamp > &until {
                return false;
            }
        }
        true
    }
}

impl Default for DateRange {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slot_rejects_out_of_range() {
        assert!(Slot::new(6, 23).is_some());
        assert!(Slot::new(7, 0).is_none());
        assert!(Slot::new(0, 24).is_none());
    }

    #[test]
    fn slot_uses_sunday_first_numbering() {
        // 2024-01-07 is a Sunday
        let sunday = DateTime::parse_from_rfc3339("2024-01-07T09:30:00+00:00").unwrap();
        let saturday = DateTime::parse_from_rfc3339("2024-01-13T23:59:59+00:00").unwrap();

        assert_eq!(Slot::from_timestamp(&sunday), Slot::new(0, 9).unwrap());
        assert_eq!(Slot::from_timestamp(&saturday), Slot::new(6, 23).unwrap());
    }

    #[test]
    fn slot_keeps_recorded_offset() {
        // Monday 01:00 in +05:00 is still Sunday in UTC
        let local = DateTime::parse_from_rfc3339("2024-01-08T01:00:00+05:00").unwrap();
        assert_eq!(Slot::from_timestamp(&local), Slot::new(1, 1).unwrap());
        assert_eq!(Slot::from_timestamp(&local.with_timezone(&Utc)), Slot::new(0, 20).unwrap());
    }

    #[test]
    fn slots_order_by_day_then_hour() {
        let a = Slot::new(0, 23).unwrap();
        let b = Slot::new(1, 0).unwrap();
        assert!(a < b);
    }

    #[test]
    fn date_range_is_inclusive() {
        let since = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let until = Utc.with_ymd_and_hms(2024, 1, 31, 0, 0, 0).unwrap();
        let range = DateRange::new().with_since(since).with_until(until);

        assert!(range.contains(&since));
        assert!(range.contains(&until));
        assert!(!range.contains(&Utc.with_ymd_and_hms(2024, 2, 1, 0, 0, 0).unwrap()));
        assert!(DateRange::default().contains(&since));
    }
}
