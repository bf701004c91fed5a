//! Specification pattern over candidate profiles.
//!
//! Each target-position criteria maps to one `Specification`; a position's
//! specifications are chained with AND. Failed checks print a one-line
//! explanation so HR can see why a candidate was rejected.

use std::collections::HashSet;

use serde::Deserialize;
use serde_json::Value;

use super::constants::{DAYS_PER_YEAR, EU_COUNTRIES, FAANG};
use super::error::CriteriaError;
use super::util::{meets_expected_set, round_to_tenth, Comparison, LowercaseSet};
use crate::profile::Profile;

/// A single check against a candidate profile.
pub trait Specification {
    fn is_satisfied_by(&self, candidate: &Profile) -> bool;
}

/// Conjunction of two specifications. Short-circuits on the first failure,
/// so only the first unmet criteria prints its explanation.
pub struct AndSpecification {
    first: Box<dyn Specification>,
    second: Box<dyn Specification>,
}

impl AndSpecification {
    pub fn new(first: Box<dyn Specification>, second: Box<dyn Specification>) -> Self {
        Self { first, second }
    }
}

impl Specification for AndSpecification {
    fn is_satisfied_by(&self, candidate: &Profile) -> bool {
        self.first.is_satisfied_by(candidate) && self.second.is_satisfied_by(candidate)
    }
}

/// At least one of the last n experiences was with an expected company.
pub struct EmployerSpecification {
    pub companies_expected: LowercaseSet,
    pub last_experiences_to_check: usize,
}

impl Specification for EmployerSpecification {
    fn is_satisfied_by(&self, candidate: &Profile) -> bool {
        let employers = LowercaseSet::new(
            candidate
                .last_experiences(self.last_experiences_to_check)
                .iter()
                .map(|experience| experience.company_name.as_str()),
        );

        if employers.intersection_count(&self.companies_expected) > 0 {
            return true;
        }

        println!(
            "{} - False, didn't work for any of the following companies: {} during the last {} work experiences",
            candidate.full_name(),
            self.companies_expected,
            self.last_experiences_to_check
        );
        false
    }
}

/// Candidate lives in one of the expected countries or cities.
/// Matching is case-sensitive against the config values.
pub struct LocationSpecification {
    pub expected_locations: HashSet<String>,
}

impl Specification for LocationSpecification {
    fn is_satisfied_by(&self, candidate: &Profile) -> bool {
        if self.expected_locations.contains(&candidate.location.country)
            || self.expected_locations.contains(&candidate.location.city)
        {
            return true;
        }

        println!(
            "{} - False, doesn't live in the specified countries / cities",
            candidate.full_name()
        );
        false
    }
}

/// Total years of experience compared against an expected number.
/// Overlapping experiences can be counted twice as an option.
pub struct TotalExperienceSpecification {
    pub years_expected: f64,
    pub comparison: Comparison,
    pub count_overlapping: bool,
}

impl Specification for TotalExperienceSpecification {
    fn is_satisfied_by(&self, candidate: &Profile) -> bool {
        let years = candidate.years_of_experience(self.count_overlapping);

        if self.comparison.holds(years, self.years_expected) {
            return true;
        }

        println!(
            "{} - False, total experience of {} years is not {} {} years",
            candidate.full_name(),
            years,
            self.comparison,
            self.years_expected
        );
        false
    }
}

/// Candidate's declared skills meet the expected skill set.
pub struct SkillsSpecification {
    pub skills_expected: LowercaseSet,
    pub number_of_hits: Option<usize>,
}

impl Specification for SkillsSpecification {
    fn is_satisfied_by(&self, candidate: &Profile) -> bool {
        let skills = LowercaseSet::new(candidate.skills.iter().map(String::as_str));

        if meets_expected_set(&skills, &self.skills_expected, self.number_of_hits) {
            return true;
        }

        println!(
            "{} - False, doesn't have the required skill set",
            candidate.full_name()
        );
        false
    }
}

/// Skills actually used during the last n experiences meet the expected set.
pub struct SkillsAtWorkSpecification {
    pub skills_expected: LowercaseSet,
    pub last_experiences_to_check: usize,
    pub number_of_hits: Option<usize>,
}

impl Specification for SkillsAtWorkSpecification {
    fn is_satisfied_by(&self, candidate: &Profile) -> bool {
        let skills = LowercaseSet::new(
            candidate
                .last_experiences(self.last_experiences_to_check)
                .iter()
                .flat_map(|experience| experience.skills.iter().map(String::as_str)),
        );

        if meets_expected_set(&skills, &self.skills_expected, self.number_of_hits) {
            return true;
        }

        println!(
            "{} - False, skill set during the last {} work experiences doesn't match the expected skills",
            candidate.full_name(),
            self.last_experiences_to_check
        );
        false
    }
}

/// At least one of the last n job titles is an expected position.
pub struct PositionSpecification {
    pub positions_expected: LowercaseSet,
    pub last_experiences_to_check: usize,
}

impl Specification for PositionSpecification {
    fn is_satisfied_by(&self, candidate: &Profile) -> bool {
        let positions = LowercaseSet::new(
            candidate
                .last_experiences(self.last_experiences_to_check)
                .iter()
                .map(|experience| experience.job_title.as_str()),
        );

        if positions.intersection_count(&self.positions_expected) > 0 {
            return true;
        }

        println!(
            "{} - False, didn't occupy any of the following positions: {} during the last {} work experiences",
            candidate.full_name(),
            self.positions_expected,
            self.last_experiences_to_check
        );
        false
    }
}

/// The longest of the last n experiences compared against an expected
/// number of years. Unsatisfied when the candidate has no experiences.
pub struct EmploymentDurationSpecification {
    pub years_expected: f64,
    pub comparison: Comparison,
    pub last_experiences_to_check: usize,
}

impl Specification for EmploymentDurationSpecification {
    fn is_satisfied_by(&self, candidate: &Profile) -> bool {
        let longest_days = candidate
            .last_experiences(self.last_experiences_to_check)
            .iter()
            .map(|experience| experience.duration_days())
            .max();

        if let Some(days) = longest_days {
            let years = round_to_tenth(days as f64 / DAYS_PER_YEAR);
            if self.comparison.holds(years, self.years_expected) {
                return true;
            }
        }

        println!(
            "{} - False, worked for not {} {} years during the last {} work experiences",
            candidate.full_name(),
            self.comparison,
            self.years_expected,
            self.last_experiences_to_check
        );
        false
    }
}

// ─── Criteria config -> specifications ──────────────────────────────────────

#[derive(Debug, Deserialize)]
struct EmployerCriteria {
    name: String,
    check_last_n_experiences: usize,
}

#[derive(Debug, Deserialize)]
struct LocationCriteria {
    #[serde(default)]
    countries: Vec<String>,
    #[serde(default)]
    cities: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct TotalExperienceCriteria {
    years: f64,
    comparison_operand: Comparison,
    #[serde(default)]
    count_overlapping_experiences: bool,
}

#[derive(Debug, Deserialize)]
struct SkillsCriteria {
    name: Vec<String>,
    #[serde(default)]
    number_of_hits: Option<usize>,
}

#[derive(Debug, Deserialize)]
struct SkillsAtWorkCriteria {
    name: Vec<String>,
    check_last_n_experiences: usize,
    #[serde(default)]
    number_of_hits: Option<usize>,
}

#[derive(Debug, Deserialize)]
struct PositionCriteria {
    name: Vec<String>,
    check_last_n_experiences: usize,
}

#[derive(Debug, Deserialize)]
struct DurationCriteria {
    years: f64,
    comparison_operand: Comparison,
    check_last_n_experiences: usize,
}

fn parse<T: serde::de::DeserializeOwned>(
    criteria_name: &str,
    value: &Value,
) -> Result<T, CriteriaError> {
    serde_json::from_value(value.clone()).map_err(|source| CriteriaError::MalformedCriteria {
        criteria: criteria_name.to_string(),
        source,
    })
}

fn check_window(window: usize) -> Result<usize, CriteriaError> {
    if window < 1 {
        return Err(CriteriaError::InvalidExperienceWindow(window));
    }
    Ok(window)
}

/// Map one criteria entry to a specification.
///
/// Returns `Ok(None)` for criteria names this engine doesn't support; the
/// entry is logged and skipped so an extended config stays usable.
pub fn specification_for(
    criteria_name: &str,
    criteria_value: &Value,
) -> Result<Option<Box<dyn Specification>>, CriteriaError> {
    let specification: Box<dyn Specification> = match criteria_name {
        "employer" => {
            let criteria: EmployerCriteria = parse(criteria_name, criteria_value)?;
            let companies_expected = if criteria.name == "FAANG" {
                LowercaseSet::new(FAANG.iter().copied())
            } else {
                LowercaseSet::new([criteria.name.as_str()])
            };
            Box::new(EmployerSpecification {
                companies_expected,
                last_experiences_to_check: check_window(criteria.check_last_n_experiences)?,
            })
        }
        "location" => {
            let criteria: LocationCriteria = parse(criteria_name, criteria_value)?;
            if criteria.countries.is_empty() && criteria.cities.is_empty() {
                return Err(CriteriaError::EmptyLocation);
            }
            let expected_locations: HashSet<String> = if !criteria.countries.is_empty() {
                // "EU" is shorthand for the full member-state list.
                criteria
                    .countries
                    .into_iter()
                    .flat_map(|country| {
                        if country.eq_ignore_ascii_case("EU") {
                            EU_COUNTRIES.iter().map(|c| c.to_string()).collect()
                        } else {
                            vec![country]
                        }
                    })
                    .collect()
            } else {
                criteria.cities.into_iter().collect()
            };
            Box::new(LocationSpecification { expected_locations })
        }
        "experience_total" => {
            let criteria: TotalExperienceCriteria = parse(criteria_name, criteria_value)?;
            Box::new(TotalExperienceSpecification {
                years_expected: criteria.years,
                comparison: criteria.comparison_operand,
                count_overlapping: criteria.count_overlapping_experiences,
            })
        }
        "skills" => {
            let criteria: SkillsCriteria = parse(criteria_name, criteria_value)?;
            Box::new(SkillsSpecification {
                skills_expected: LowercaseSet::new(criteria.name),
                number_of_hits: criteria.number_of_hits,
            })
        }
        "skills_at_work" => {
            let criteria: SkillsAtWorkCriteria = parse(criteria_name, criteria_value)?;
            Box::new(SkillsAtWorkSpecification {
                skills_expected: LowercaseSet::new(criteria.name),
                last_experiences_to_check: check_window(criteria.check_last_n_experiences)?,
                number_of_hits: criteria.number_of_hits,
            })
        }
        "position" => {
            let criteria: PositionCriteria = parse(criteria_name, criteria_value)?;
            Box::new(PositionSpecification {
                positions_expected: LowercaseSet::new(criteria.name),
                last_experiences_to_check: check_window(criteria.check_last_n_experiences)?,
            })
        }
        "duration_of_employment" => {
            let criteria: DurationCriteria = parse(criteria_name, criteria_value)?;
            Box::new(EmploymentDurationSpecification {
                years_expected: criteria.years,
                comparison: criteria.comparison_operand,
                last_experiences_to_check: check_window(criteria.check_last_n_experiences)?,
            })
        }
        _ => {
            tracing::warn!(
                criteria = criteria_name,
                "criteria name is not supported and will be ignored"
            );
            return Ok(None);
        }
    };
    Ok(Some(specification))
}

/// Chain all criteria of a target position into one AND specification.
pub fn chain_specifications_for_position(
    criteria: &serde_json::Map<String, Value>,
) -> Result<Box<dyn Specification>, CriteriaError> {
    let mut specifications: Vec<Box<dyn Specification>> = Vec::with_capacity(criteria.len());
    for (criteria_name, criteria_value) in criteria {
        if let Some(specification) = specification_for(criteria_name, criteria_value)? {
            specifications.push(specification);
        }
    }

    specifications
        .into_iter()
        .reduce(|first, second| Box::new(AndSpecification::new(first, second)))
        .ok_or(CriteriaError::NoValidCriteria)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn candidate() -> Profile {
        let mut profile: Profile = serde_json::from_value(json!({
            "first_name": "Sophia",
            "last_name": "Garcia",
            "skills": ["Figma", "UX-research"],
            "description": "Middle UX Designer with 3 years of experience",
            "location": {"city": "Barcelona", "country": "Spain"},
            "experiences": [
                {
                    "company_name": "BlaBlaCar",
                    "job_title": "UX Designer",
                    "description": "Designed and prototyped user interfaces",
                    "skills": ["Figma", "UX-research", "Miro"],
                    "starts_at": "2019-06-01",
                    "ends_at": "2022-04-01",
                    "location": {"city": "Barcelona", "country": "Spain"}
                },
                {
                    "company_name": "Glovo",
                    "job_title": "Product Designer",
                    "description": "Launched new features for the mobile app",
                    "skills": ["Sketch", "UX-research"],
                    "starts_at": "2017-09-01",
                    "ends_at": "2019-04-01",
                    "location": {"city": "Barcelona", "country": "Spain"}
                }
            ]
        }))
        .unwrap();
        profile.normalize(chrono::NaiveDate::from_ymd_opt(2023, 4, 20).unwrap());
        profile
    }

    #[test]
    fn test_employer_not_satisfied() {
        let specification = EmployerSpecification {
            companies_expected: LowercaseSet::new(["NASA"]),
            last_experiences_to_check: 15,
        };
        assert!(!specification.is_satisfied_by(&candidate()));
    }

    #[test]
    fn test_employer_satisfied_case_insensitive() {
        let specification = EmployerSpecification {
            companies_expected: LowercaseSet::new(["BLABLACAR"]),
            last_experiences_to_check: 1,
        };
        assert!(specification.is_satisfied_by(&candidate()));
    }

    #[test]
    fn test_location_not_satisfied() {
        let specification = LocationSpecification {
            expected_locations: ["Russian Federation".to_string()].into_iter().collect(),
        };
        assert!(!specification.is_satisfied_by(&candidate()));
    }

    #[test]
    fn test_location_matches_city() {
        let specification = LocationSpecification {
            expected_locations: ["Barcelona".to_string()].into_iter().collect(),
        };
        assert!(specification.is_satisfied_by(&candidate()));
    }

    #[test]
    fn test_skills_hit_count_not_satisfied() {
        let specification = SkillsSpecification {
            skills_expected: LowercaseSet::new(["Unreal Engine 7", "Cooking"]),
            number_of_hits: Some(2),
        };
        assert!(!specification.is_satisfied_by(&candidate()));
    }

    #[test]
    fn test_skills_subset_satisfied() {
        let specification = SkillsSpecification {
            skills_expected: LowercaseSet::new(["figma"]),
            number_of_hits: None,
        };
        assert!(specification.is_satisfied_by(&candidate()));
    }

    #[test]
    fn test_skills_at_work_satisfied() {
        let specification = SkillsAtWorkSpecification {
            skills_expected: LowercaseSet::new(["Miro", "Sketch"]),
            last_experiences_to_check: 10,
            number_of_hits: Some(2),
        };
        assert!(specification.is_satisfied_by(&candidate()));
    }

    #[test]
    fn test_skills_at_work_window_excludes_old_experience() {
        // Sketch was only used at Glovo, outside a window of 1.
        let specification = SkillsAtWorkSpecification {
            skills_expected: LowercaseSet::new(["Sketch"]),
            last_experiences_to_check: 1,
            number_of_hits: None,
        };
        assert!(!specification.is_satisfied_by(&candidate()));
    }

    #[test]
    fn test_position_satisfied() {
        let specification = PositionSpecification {
            positions_expected: LowercaseSet::new(["Product Designer"]),
            last_experiences_to_check: 10,
        };
        assert!(specification.is_satisfied_by(&candidate()));
    }

    #[test]
    fn test_total_experience_satisfied() {
        let specification = TotalExperienceSpecification {
            years_expected: 2.0,
            comparison: Comparison::Greater,
            count_overlapping: false,
        };
        assert!(specification.is_satisfied_by(&candidate()));
    }

    #[test]
    fn test_employment_duration_satisfied() {
        let specification = EmploymentDurationSpecification {
            years_expected: 2.0,
            comparison: Comparison::Greater,
            last_experiences_to_check: 2,
        };
        assert!(specification.is_satisfied_by(&candidate()));
    }

    #[test]
    fn test_employment_duration_without_experiences() {
        let specification = EmploymentDurationSpecification {
            years_expected: 1.0,
            comparison: Comparison::Greater,
            last_experiences_to_check: 3,
        };
        let mut profile = candidate();
        profile.experiences.clear();
        assert!(!specification.is_satisfied_by(&profile));
    }

    #[test]
    fn test_factory_faang_expansion() {
        let value = json!({"name": "FAANG", "check_last_n_experiences": 2});
        let specification = specification_for("employer", &value).unwrap().unwrap();
        // The reference candidate never worked for a FAANG company.
        assert!(!specification.is_satisfied_by(&candidate()));
    }

    #[test]
    fn test_factory_eu_expansion() {
        let value = json!({"countries": ["EU"], "cities": []});
        let specification = specification_for("location", &value).unwrap().unwrap();
        // Spain is a member state, so the expanded set matches.
        assert!(specification.is_satisfied_by(&candidate()));
    }

    #[test]
    fn test_factory_rejects_zero_window() {
        let value = json!({"name": "Glovo", "check_last_n_experiences": 0});
        assert!(matches!(
            specification_for("employer", &value),
            Err(CriteriaError::InvalidExperienceWindow(0))
        ));
    }

    #[test]
    fn test_factory_rejects_empty_location() {
        let value = json!({"countries": [], "cities": []});
        assert!(matches!(
            specification_for("location", &value),
            Err(CriteriaError::EmptyLocation)
        ));
    }

    #[test]
    fn test_factory_ignores_unknown_criteria() {
        let value = json!({"anything": true});
        assert!(specification_for("zodiac_sign", &value).unwrap().is_none());
    }

    #[test]
    fn test_chain_requires_one_valid_criteria() {
        let criteria = json!({"zodiac_sign": {"name": "Leo"}});
        let criteria = criteria.as_object().unwrap();
        assert!(matches!(
            chain_specifications_for_position(criteria),
            Err(CriteriaError::NoValidCriteria)
        ));
    }

    #[test]
    fn test_chain_matches_reference_candidate() {
        let criteria = json!({
            "position": {"name": ["UX Designer", "Product Designer"], "check_last_n_experiences": 3},
            "skills": {"name": ["Figma", "UX-research"]},
            "location": {"countries": ["EU"], "cities": []},
            "experience_total": {"years": 2, "comparison_operand": ">"}
        });
        let criteria = criteria.as_object().unwrap();
        let specification = chain_specifications_for_position(criteria).unwrap();
        assert!(specification.is_satisfied_by(&candidate()));
    }

    #[test]
    fn test_chain_short_circuits_on_failed_criteria() {
        let criteria = json!({
            "employer": {"name": "NASA", "check_last_n_experiences": 5},
            "skills": {"name": ["Figma"]}
        });
        let criteria = criteria.as_object().unwrap();
        let specification = chain_specifications_for_position(criteria).unwrap();
        assert!(!specification.is_satisfied_by(&candidate()));
    }
}
