//! Set and interval helpers shared by the specifications.

use std::collections::HashSet;
use std::fmt;

use chrono::NaiveDate;
use serde::Deserialize;

/// String set that stores and compares everything lowercased.
///
/// Skill, employer, and position checks are case-insensitive; folding at
/// construction keeps every membership test a plain hash lookup.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LowercaseSet(HashSet<String>);

impl LowercaseSet {
    pub fn new<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self(items.into_iter().map(|s| s.as_ref().to_lowercase()).collect())
    }

    pub fn contains(&self, item: &str) -> bool {
        self.0.contains(&item.to_lowercase())
    }

    pub fn intersection_count(&self, other: &LowercaseSet) -> usize {
        self.0.intersection(&other.0).count()
    }

    pub fn is_subset_of(&self, other: &LowercaseSet) -> bool {
        self.0.is_subset(&other.0)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Items in arbitrary order, for diagnostics.
    pub fn items(&self) -> Vec<&str> {
        self.0.iter().map(String::as_str).collect()
    }
}

impl fmt::Display for LowercaseSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut items = self.items();
        items.sort_unstable();
        write!(f, "{}", items.join(", "))
    }
}

/// Whether an evaluated set meets the expected one.
///
/// With `number_of_hits` = n the intersection size must equal n exactly;
/// without it the whole expected set must be present.
pub fn meets_expected_set(
    evaluated: &LowercaseSet,
    expected: &LowercaseSet,
    number_of_hits: Option<usize>,
) -> bool {
    match number_of_hits {
        Some(hits) => evaluated.intersection_count(expected) == hits,
        None => expected.is_subset_of(evaluated),
    }
}

/// Comparison operator as written in the criteria config (`">"`, `">="`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum Comparison {
    #[serde(rename = ">")]
    Greater,
    #[serde(rename = ">=")]
    GreaterOrEqual,
    #[serde(rename = "==")]
    Equal,
    #[serde(rename = "<")]
    Less,
    #[serde(rename = "<=")]
    LessOrEqual,
}

impl Comparison {
    pub fn holds(self, left: f64, right: f64) -> bool {
        match self {
            Comparison::Greater => left > right,
            Comparison::GreaterOrEqual => left >= right,
            Comparison::Equal => left == right,
            Comparison::Less => left < right,
            Comparison::LessOrEqual => left <= right,
        }
    }
}

impl fmt::Display for Comparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Comparison::Greater => ">",
            Comparison::GreaterOrEqual => ">=",
            Comparison::Equal => "==",
            Comparison::Less => "<",
            Comparison::LessOrEqual => "<=",
        })
    }
}

/// Merge overlapping date intervals. Input must be sorted by start date.
///
/// Used to count non-overlapping years of experience: parallel positions
/// should not add up twice.
pub fn merge_intervals(intervals: &[(NaiveDate, NaiveDate)]) -> Vec<(NaiveDate, NaiveDate)> {
    let mut merged: Vec<(NaiveDate, NaiveDate)> = Vec::with_capacity(intervals.len());
    for &(start, end) in intervals {
        match merged.last_mut() {
            Some(previous) if start <= previous.1 => {
                previous.1 = previous.1.max(end);
            }
            _ => merged.push((start, end)),
        }
    }
    merged
}

/// Round to one decimal place (years of experience resolution).
pub fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
