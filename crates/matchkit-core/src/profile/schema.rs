//! Candidate profile schema.
//!
//! Profiles arrive as JSON supplied by candidates, so every field is
//! validated by serde and experience dates are normalized before any
//! specification looks at them.

use chrono::NaiveDate;
use serde::Deserialize;

use crate::matching::constants::DAYS_PER_YEAR;
use crate::matching::util::{merge_intervals, round_to_tenth};

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Location {
    pub city: String,
    pub country: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Experience {
    pub company_name: String,
    pub job_title: String,
    pub description: String,
    pub skills: Vec<String>,
    pub starts_at: NaiveDate,
    /// `None` means the position is ongoing; normalization closes it with
    /// today's date.
    pub ends_at: Option<NaiveDate>,
    pub location: Location,
}

impl Experience {
    /// Closed end date. Only meaningful after `Profile::normalize`.
    fn closed_end(&self) -> NaiveDate {
        self.ends_at.unwrap_or(self.starts_at)
    }

    /// Employment length in days (zero before normalization closes the range).
    pub fn duration_days(&self) -> i64 {
        (self.closed_end() - self.starts_at).num_days()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Profile {
    pub first_name: String,
    pub last_name: String,
    pub skills: Vec<String>,
    pub description: String,
    pub location: Location,
    pub experiences: Vec<Experience>,
}

impl Profile {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Normalize experiences in place.
    ///
    /// Ongoing experiences (`ends_at: None`) are closed with `today`. An
    /// experience whose `starts_at` does not precede its `ends_at` is
    /// candidate-supplied garbage and is dropped with a printed notice.
    pub fn normalize(&mut self, today: NaiveDate) {
        let name = self.full_name();
        for experience in &mut self.experiences {
            if experience.ends_at.is_none() {
                experience.ends_at = Some(today);
            }
        }
        self.experiences.retain(|experience| {
            let valid = experience.starts_at < experience.closed_end();
            if !valid {
                println!(
                    "{} - position {} at {} has a starts_at date that does not \
                     precede its ends_at date, the experience will be ignored",
                    name, experience.job_title, experience.company_name
                );
            }
            valid
        });
    }

    /// Up to `n` most recent experiences, newest first (by `ends_at`).
    pub fn last_experiences(&self, n: usize) -> Vec<&Experience> {
        let mut sorted: Vec<&Experience> = self.experiences.iter().collect();
        sorted.sort_by_key(|experience| experience.closed_end());
        sorted.into_iter().rev().take(n).collect()
    }

    /// Total years of experience, rounded to one decimal.
    ///
    /// Overlapping positions are merged unless `count_overlapping` is set,
    /// so two parallel jobs count once by default.
    pub fn years_of_experience(&self, count_overlapping: bool) -> f64 {
        let mut intervals: Vec<(NaiveDate, NaiveDate)> = self
            .experiences
            .iter()
            .map(|experience| (experience.starts_at, experience.closed_end()))
            .collect();
        intervals.sort_by_key(|&(start, _)| start);

        if !count_overlapping {
            intervals = merge_intervals(&intervals);
        }

        let days: i64 = intervals.iter().map(|&(start, end)| (end - start).num_days()).sum();
        round_to_tenth(days as f64 / DAYS_PER_YEAR)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn experience(company: &str, title: &str, starts: NaiveDate, ends: Option<NaiveDate>) -> Experience {
        Experience {
            company_name: company.to_string(),
            job_title: title.to_string(),
            description: String::new(),
            skills: vec![],
            starts_at: starts,
            ends_at: ends,
            location: Location {
                city: "Barcelona".to_string(),
                country: "Spain".to_string(),
            },
        }
    }

    fn profile(experiences: Vec<Experience>) -> Profile {
        Profile {
            first_name: "Sophia".to_string(),
            last_name: "Garcia".to_string(),
            skills: vec!["Figma".to_string()],
            description: String::new(),
            location: Location {
                city: "Barcelona".to_string(),
                country: "Spain".to_string(),
            },
            experiences,
        }
    }

    #[test]
    fn test_deserialize_profile() {
        let json = r#"{
            "first_name": "Sophia",
            "last_name": "Garcia",
            "skills": ["Figma", "UX-research"],
            "description": "Middle UX Designer",
            "location": {"city": "Barcelona", "country": "Spain"},
            "experiences": [{
                "company_name": "BlaBlaCar",
                "job_title": "UX Designer",
                "description": "Prototyped user interfaces",
                "skills": ["Figma"],
                "starts_at": "2019-06-01",
                "ends_at": "2022-04-01",
                "location": {"city": "Barcelona", "country": "Spain"}
            }]
        }"#;
        let profile: Profile = serde_json::from_str(json).unwrap();
        assert_eq!(profile.full_name(), "Sophia Garcia");
        assert_eq!(profile.experiences[0].starts_at, d(2019, 6, 1));
        assert_eq!(profile.experiences[0].ends_at, Some(d(2022, 4, 1)));
    }

    #[test]
    fn test_deserialize_rejects_bad_date() {
        let json = r#"{
            "first_name": "A", "last_name": "B", "skills": [], "description": "",
            "location": {"city": "X", "country": "Y"},
            "experiences": [{
                "company_name": "C", "job_title": "T", "description": "",
                "skills": [], "starts_at": "not-a-date", "ends_at": null,
                "location": {"city": "X", "country": "Y"}
            }]
        }"#;
        assert!(serde_json::from_str::<Profile>(json).is_err());
    }

    #[test]
    fn test_normalize_closes_ongoing_experience() {
        let mut p = profile(vec![experience("Glovo", "Designer", d(2020, 1, 1), None)]);
        p.normalize(d(2023, 1, 1));
        assert_eq!(p.experiences[0].ends_at, Some(d(2023, 1, 1)));
    }

    #[test]
    fn test_normalize_drops_inverted_experience() {
        let mut p = profile(vec![
            experience("Glovo", "Designer", d(2021, 1, 1), Some(d(2020, 1, 1))),
            experience("BlaBlaCar", "Designer", d(2019, 6, 1), Some(d(2022, 4, 1))),
        ]);
        p.normalize(d(2023, 1, 1));
        assert_eq!(p.experiences.len(), 1);
        assert_eq!(p.experiences[0].company_name, "BlaBlaCar");
    }

    #[test]
    fn test_last_experiences_newest_first() {
        let p = profile(vec![
            experience("Glovo", "Product Designer", d(2017, 9, 1), Some(d(2019, 4, 1))),
            experience("BlaBlaCar", "UX Designer", d(2019, 6, 1), Some(d(2022, 4, 1))),
        ]);
        let last = p.last_experiences(1);
        assert_eq!(last.len(), 1);
        assert_eq!(last[0].company_name, "BlaBlaCar");

        // Fewer experiences than requested: all of them come back.
        assert_eq!(p.last_experiences(10).len(), 2);
    }

    #[test]
    fn test_years_of_experience_merges_overlap() {
        // Two fully overlapping years count once unless overlap counting is on.
        let p = profile(vec![
            experience("A", "T", d(2020, 1, 1), Some(d(2021, 1, 1))),
            experience("B", "T", d(2020, 1, 1), Some(d(2021, 1, 1))),
        ]);
        assert_eq!(p.years_of_experience(false), 1.0);
        assert_eq!(p.years_of_experience(true), 2.0);
    }

    #[test]
    fn test_years_of_experience_reference_candidate() {
        let p = profile(vec![
            experience("BlaBlaCar", "UX Designer", d(2019, 6, 1), Some(d(2022, 4, 1))),
            experience("Glovo", "Product Designer", d(2017, 9, 1), Some(d(2019, 4, 1))),
        ]);
        // 1035 + 577 days, no overlap.
        assert_eq!(p.years_of_experience(false), 4.4);
    }
}
