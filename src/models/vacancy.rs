use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::utils::serde_helpers::deserialize_string_flexible;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum EmploymentType {
    FullTime,
    PartTime,
    Contract,
    Internship,
    Freelance,
    Other(String),
}

impl EmploymentType {
    pub const ALL: [EmploymentType; 5] = [
        EmploymentType::FullTime,
        EmploymentType::PartTime,
        EmploymentType::Contract,
        EmploymentType::Internship,
        EmploymentType::Freelance,
    ];

    pub fn as_str(&self) -> &str {
        match self {
            EmploymentType::FullTime => "Full-time",
            EmploymentType::PartTime => "Part-time",
            EmploymentType::Contract => "Contract",
            EmploymentType::Internship => "Internship",
            EmploymentType::Freelance => "Freelance",
            EmploymentType::Other(raw) => raw,
        }
    }
}

impl From<String> for EmploymentType {
    fn from(value: String) -> Self {
        match value.as_str() {
            "Full-time" => EmploymentType::FullTime,
            "Part-time" => EmploymentType::PartTime,
            "Contract" => EmploymentType::Contract,
            "Internship" => EmploymentType::Internship,
            "Freelance" => EmploymentType::Freelance,
            _ => EmploymentType::Other(value),
        }
    }
}

impl From<EmploymentType> for String {
    fn from(value: EmploymentType) -> Self {
        value.as_str().to_string()
    }
}

impl FromStr for EmploymentType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match EmploymentType::from(s.to_string()) {
            EmploymentType::Other(raw) => Err(Error::BadRequest(format!(
                "Unknown employment type '{}' (expected one of: {})",
                raw,
                EmploymentType::ALL
                    .iter()
                    .map(EmploymentType::as_str)
                    .collect::<Vec<_>>()
                    .join(", ")
            ))),
            known => Ok(known),
        }
    }
}

impl fmt::Display for EmploymentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ExperienceLevel {
    Fresher,
    ZeroToTwo,
    TwoToFive,
    FiveToTen,
    TenPlus,
    Other(String),
}

impl ExperienceLevel {
    pub const ALL: [ExperienceLevel; 5] = [
        ExperienceLevel::Fresher,
        ExperienceLevel::ZeroToTwo,
        ExperienceLevel::TwoToFive,
        ExperienceLevel::FiveToTen,
        ExperienceLevel::TenPlus,
    ];

    pub fn as_str(&self) -> &str {
        match self {
            ExperienceLevel::Fresher => "Fresher",
            ExperienceLevel::ZeroToTwo => "0-2 years",
            ExperienceLevel::TwoToFive => "2-5 years",
            ExperienceLevel::FiveToTen => "5-10 years",
            ExperienceLevel::TenPlus => "10+ years",
            ExperienceLevel::Other(raw) => raw,
        }
    }
}

impl From<String> for ExperienceLevel {
    fn from(value: String) -> Self {
        match value.as_str() {
            "Fresher" => ExperienceLevel::Fresher,
            "0-2 years" => ExperienceLevel::ZeroToTwo,
            "2-5 years" => ExperienceLevel::TwoToFive,
            "5-10 years" => ExperienceLevel::FiveToTen,
            "10+ years" => ExperienceLevel::TenPlus,
            _ => ExperienceLevel::Other(value),
        }
    }
}

impl From<ExperienceLevel> for String {
    fn from(value: ExperienceLevel) -> Self {
        value.as_str().to_string()
    }
}

impl FromStr for ExperienceLevel {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match ExperienceLevel::from(s.to_string()) {
            ExperienceLevel::Other(raw) => Err(Error::BadRequest(format!(
                "Unknown experience level '{}' (expected one of: {})",
                raw,
                ExperienceLevel::ALL
                    .iter()
                    .map(ExperienceLevel::as_str)
                    .collect::<Vec<_>>()
                    .join(", ")
            ))),
            known => Ok(known),
        }
    }
}

impl fmt::Display for ExperienceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndustryRef {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub is_remote: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Salary {
    #[serde(default)]
    pub min: Option<Decimal>,
    #[serde(default)]
    pub max: Option<Decimal>,
    #[serde(default)]
    pub is_negotiable: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vacancy {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default, deserialize_with = "deserialize_string_flexible")]
    pub job_id: String,
    #[serde(default)]
    pub job_title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub qualification: String,
    #[serde(default)]
    pub industry: Option<IndustryRef>,
    #[serde(default)]
    pub location: Option<Location>,
    #[serde(default)]
    pub employment_type: Option<EmploymentType>,
    #[serde(default)]
    pub experience_level: Option<ExperienceLevel>,
    #[serde(default)]
    pub salary: Option<Salary>,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub required_skills: Vec<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub application_deadline: Option<DateTime<Utc>>,
    #[serde(default)]
    pub is_promoted: bool,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_backend_vacancy() {
        let raw = serde_json::json!({
            "_id": "65f1c0ffee",
            "jobId": "42",
            "jobTitle": "Backend Engineer",
            "description": "Build services",
            "qualification": "B.Tech",
            "industry": { "_id": "IND1", "name": "IT" },
            "location": { "city": "Noida", "state": "Uttar Pradesh", "isRemote": true },
            "employmentType": "Full-time",
            "experienceLevel": "2-5 years",
            "salary": { "min": 50000, "max": 80000, "isNegotiable": true },
            "skills": ["Rust", "SQL"],
            "createdAt": "2024-03-01T10:00:00.000Z",
            "applicationDeadline": "2024-04-01T00:00:00.000Z",
            "isPromoted": true
        });

        let vacancy: Vacancy = serde_json::from_value(raw).unwrap();
        assert_eq!(vacancy.job_id, "42");
        assert_eq!(vacancy.employment_type, Some(EmploymentType::FullTime));
        assert_eq!(vacancy.experience_level, Some(ExperienceLevel::TwoToFive));
        let salary = vacancy.salary.unwrap();
        assert_eq!(salary.min, Some(Decimal::from(50000)));
        assert_eq!(salary.max, Some(Decimal::from(80000)));
        assert!(vacancy.location.unwrap().is_remote);
        assert!(vacancy.is_promoted);
        assert!(vacancy.is_active);
        assert!(vacancy.required_skills.is_empty());
    }

    #[test]
    fn unknown_enum_values_are_kept() {
        let raw = serde_json::json!({
            "_id": "x",
            "jobId": "7",
            "jobTitle": "Seasonal Helper",
            "employmentType": "Seasonal",
            "experienceLevel": "15+ years"
        });

        let vacancy: Vacancy = serde_json::from_value(raw).unwrap();
        assert_eq!(
            vacancy.employment_type,
            Some(EmploymentType::Other("Seasonal".into()))
        );
        assert_eq!(vacancy.experience_level.unwrap().as_str(), "15+ years");
    }

    #[test]
    fn parsing_filter_values_rejects_unknown_strings() {
        assert_eq!(
            "Part-time".parse::<EmploymentType>().unwrap(),
            EmploymentType::PartTime
        );
        let err = "part time".parse::<EmploymentType>().unwrap_err();
        assert!(err.to_string().contains("Full-time, Part-time, Contract, Internship, Freelance"));
        let err = "senior".parse::<ExperienceLevel>().unwrap_err();
        assert!(err.to_string().contains("Fresher, 0-2 years"));
        assert_eq!(
            "10+ years".parse::<ExperienceLevel>().unwrap(),
            ExperienceLevel::TenPlus
        );
    }

    #[test]
    fn record_missing_job_number_does_not_fail_the_list() {
        let raw = serde_json::json!([
            { "_id": "a", "jobId": "1", "jobTitle": "A" },
            { "_id": "b", "jobTitle": "B" },
            { "_id": "c", "jobId": 3 }
        ]);

        let vacancies: Vec<Vacancy> = serde_json::from_value(raw).unwrap();
        assert_eq!(vacancies.len(), 3);
        assert_eq!(vacancies[1].job_id, "");
        assert_eq!(vacancies[1].job_title, "B");
        assert_eq!(vacancies[2].job_id, "3");
        assert_eq!(vacancies[2].job_title, "");
    }
}
