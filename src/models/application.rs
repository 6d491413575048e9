use std::fmt;
use std::path::Path;
use std::str::FromStr;

use bytes::Bytes;
use serde::{Deserialize, Serialize};
use tracing::warn;
use validator::Validate;

use crate::error::{Error, Result};

pub const ACCEPTED_RESUME_EXTENSIONS: [&str; 3] = ["pdf", "doc", "docx"];
/// Advisory only; the backend enforces the real limit.
pub const RESUME_SIZE_HINT_BYTES: usize = 5 * 1024 * 1024;

pub const INDIAN_STATES: [&str; 36] = [
    "Andhra Pradesh",
    "Arunachal Pradesh",
    "Assam",
    "Bihar",
    "Chhattisgarh",
    "Goa",
    "Gujarat",
    "Haryana",
    "Himachal Pradesh",
    "Jharkhand",
    "Karnataka",
    "Kerala",
    "Madhya Pradesh",
    "Maharashtra",
    "Manipur",
    "Meghalaya",
    "Mizoram",
    "Nagaland",
    "Odisha",
    "Punjab",
    "Rajasthan",
    "Sikkim",
    "Tamil Nadu",
    "Telangana",
    "Tripura",
    "Uttar Pradesh",
    "Uttarakhand",
    "West Bengal",
    "Delhi",
    "Jammu and Kashmir",
    "Ladakh",
    "Puducherry",
    "Chandigarh",
    "Andaman and Nicobar Islands",
    "Dadra and Nagar Haveli and Daman and Diu",
    "Lakshadweep",
];

/// Resolves a state name case-insensitively against the offered list.
pub fn parse_state(raw: &str) -> Result<&'static str> {
    let wanted = raw.trim();
    INDIAN_STATES
        .iter()
        .copied()
        .find(|s| s.eq_ignore_ascii_case(wanted))
        .ok_or_else(|| Error::BadRequest(format!("Unknown state '{}'", wanted)))
}

/// A 10th/12th score, always within 0..=100.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Percentage(f64);

impl Percentage {
    pub fn new(value: f64) -> Result<Self> {
        if value.is_finite() && (0.0..=100.0).contains(&value) {
            Ok(Self(value))
        } else {
            Err(Error::BadRequest(format!(
                "Percentage must be between 0 and 100, got {}",
                value
            )))
        }
    }

    pub fn value(self) -> f64 {
        self.0
    }
}

impl TryFrom<f64> for Percentage {
    type Error = Error;

    fn try_from(value: f64) -> Result<Self> {
        Percentage::new(value)
    }
}

impl From<Percentage> for f64 {
    fn from(value: Percentage) -> Self {
        value.0
    }
}

impl FromStr for Percentage {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let value: f64 = s
            .trim()
            .parse()
            .map_err(|_| Error::BadRequest(format!("'{}' is not a number", s)))?;
        Percentage::new(value)
    }
}

impl fmt::Display for Percentage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Degree CGPA on a 10-point scale.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Cgpa(f64);

impl Cgpa {
    pub fn new(value: f64) -> Result<Self> {
        if value.is_finite() && (0.0..=10.0).contains(&value) {
            Ok(Self(value))
        } else {
            Err(Error::BadRequest(format!(
                "CGPA must be between 0 and 10, got {}",
                value
            )))
        }
    }

    pub fn value(self) -> f64 {
        self.0
    }
}

impl TryFrom<f64> for Cgpa {
    type Error = Error;

    fn try_from(value: f64) -> Result<Self> {
        Cgpa::new(value)
    }
}

impl From<Cgpa> for f64 {
    fn from(value: Cgpa) -> Self {
        value.0
    }
}

impl FromStr for Cgpa {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let value: f64 = s
            .trim()
            .parse()
            .map_err(|_| Error::BadRequest(format!("'{}' is not a number", s)))?;
        Cgpa::new(value)
    }
}

impl fmt::Display for Cgpa {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Degree {
    #[serde(rename = "B.Tech CSE")]
    BTechCse,
    #[serde(rename = "B.Tech IT")]
    BTechIt,
    #[serde(rename = "B.Tech Other Branches")]
    BTechOther,
    #[serde(rename = "MCA")]
    Mca,
}

impl Degree {
    pub const ALL: [Degree; 4] = [Degree::BTechCse, Degree::BTechIt, Degree::BTechOther, Degree::Mca];

    pub fn as_str(self) -> &'static str {
        match self {
            Degree::BTechCse => "B.Tech CSE",
            Degree::BTechIt => "B.Tech IT",
            Degree::BTechOther => "B.Tech Other Branches",
            Degree::Mca => "MCA",
        }
    }
}

impl FromStr for Degree {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim();
        Degree::ALL
            .into_iter()
            .find(|d| d.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| {
                Error::BadRequest(format!(
                    "Unknown degree '{}' (expected one of: B.Tech CSE, B.Tech IT, B.Tech Other Branches, MCA)",
                    wanted
                ))
            })
    }
}

impl fmt::Display for Degree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResumeFile {
    pub file_name: String,
    pub content_type: String,
    pub data: Bytes,
}

/// Only the file name is exposed when a resume appears in validation output.
impl Serialize for ResumeFile {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.file_name)
    }
}

impl ResumeFile {
    pub fn new(file_name: impl Into<String>, data: impl Into<Bytes>) -> Self {
        let file_name = file_name.into();
        let content_type = content_type_for(&file_name).to_string();
        Self {
            file_name,
            content_type,
            data: data.into(),
        }
    }

    /// Reads a resume from disk, accepting only the picker's declared types.
    pub async fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase())
            .unwrap_or_default();
        if !ACCEPTED_RESUME_EXTENSIONS.contains(&ext.as_str()) {
            return Err(Error::BadRequest(format!(
                "Resume must be a PDF, DOC, or DOCX file, got {}",
                path.display()
            )));
        }

        let data = tokio::fs::read(path).await?;
        if data.len() > RESUME_SIZE_HINT_BYTES {
            warn!(
                size = data.len(),
                "Resume is larger than 5MB; the server may reject it"
            );
        }

        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("resume")
            .to_string();

        Ok(Self::new(file_name, data))
    }
}

fn content_type_for(file_name: &str) -> &'static str {
    let ext = Path::new(file_name)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase());
    match ext.as_deref() {
        Some("pdf") => "application/pdf",
        Some("doc") => "application/msword",
        Some("docx") => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        _ => "application/octet-stream",
    }
}

/// Applicant input collected field by field before submission.
#[derive(Debug, Clone, Default, PartialEq, Validate)]
pub struct ApplicationDraft {
    #[validate(length(min = 1, message = "First name is required"))]
    pub first_name: String,
    #[validate(length(min = 1, message = "Last name is required"))]
    pub last_name: String,
    #[validate(email(message = "A valid email address is required"))]
    pub email: String,
    #[validate(length(min = 1, message = "Address is required"))]
    pub address: String,
    #[validate(length(min = 1, message = "City is required"))]
    pub city: String,
    #[validate(length(min = 1, message = "State is required"))]
    pub state: String,
    #[validate(length(min = 1, message = "Mobile number is required"))]
    pub mobile_no: String,
    pub job_id: String,
    #[validate(required(message = "10th percentage is required"))]
    pub tenth_percentage: Option<Percentage>,
    #[validate(required(message = "12th/Diploma percentage is required"))]
    pub twelfth_percentage: Option<Percentage>,
    #[validate(required(message = "Degree is required"))]
    pub degree: Option<Degree>,
    #[validate(required(message = "Degree CGPA is required"))]
    pub degree_cgpa: Option<Cgpa>,
    #[validate(required(message = "Resume file is required"))]
    pub resume: Option<ResumeFile>,
}

impl ApplicationDraft {
    /// Empty draft pre-filled with the job id handed over by navigation.
    pub fn new(job_id: impl Into<String>) -> Self {
        Self {
            job_id: job_id.into(),
            ..Self::default()
        }
    }
}

/// One typed field change; applying it leaves every other field untouched.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldUpdate {
    FirstName(String),
    LastName(String),
    Email(String),
    Address(String),
    City(String),
    State(String),
    MobileNo(String),
    JobId(String),
    TenthPercentage(Percentage),
    TwelfthPercentage(Percentage),
    Degree(Degree),
    DegreeCgpa(Cgpa),
}

impl ApplicationDraft {
    pub fn apply(&mut self, update: FieldUpdate) {
        match update {
            FieldUpdate::FirstName(v) => self.first_name = v,
            FieldUpdate::LastName(v) => self.last_name = v,
            FieldUpdate::Email(v) => self.email = v,
            FieldUpdate::Address(v) => self.address = v,
            FieldUpdate::City(v) => self.city = v,
            FieldUpdate::State(v) => self.state = v,
            FieldUpdate::MobileNo(v) => self.mobile_no = v,
            FieldUpdate::JobId(v) => self.job_id = v,
            FieldUpdate::TenthPercentage(v) => self.tenth_percentage = Some(v),
            FieldUpdate::TwelfthPercentage(v) => self.twelfth_percentage = Some(v),
            FieldUpdate::Degree(v) => self.degree = Some(v),
            FieldUpdate::DegreeCgpa(v) => self.degree_cgpa = Some(v),
        }
    }
}

/// A complete, validated application ready to be sent as multipart.
#[derive(Debug, Clone, PartialEq)]
pub struct ApplicationSubmission {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub address: String,
    pub mobile_no: String,
    pub job_id: String,
    pub city: String,
    pub state: String,
    pub tenth_percentage: Percentage,
    pub twelfth_percentage: Percentage,
    pub degree: Degree,
    pub degree_cgpa: Cgpa,
    pub resume: ResumeFile,
}

impl ApplicationSubmission {
    /// Text parts in the order the backend form expects them.
    pub fn text_fields(&self) -> Vec<(&'static str, String)> {
        vec![
            ("firstName", self.first_name.clone()),
            ("lastName", self.last_name.clone()),
            ("email", self.email.clone()),
            ("address", self.address.clone()),
            ("mobileNo", self.mobile_no.clone()),
            ("jobId", self.job_id.clone()),
            ("city", self.city.clone()),
            ("state", self.state.clone()),
            ("tenthPercentage", self.tenth_percentage.to_string()),
            ("twelfthPercentage", self.twelfth_percentage.to_string()),
            ("degree", self.degree.as_str().to_string()),
            ("degreeCgpa", self.degree_cgpa.to_string()),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percentage_and_cgpa_reject_out_of_range() {
        assert!(Percentage::new(100.0).is_ok());
        assert!(Percentage::new(100.5).is_err());
        assert!(Percentage::new(-1.0).is_err());
        assert!(Cgpa::new(10.0).is_ok());
        assert!("10.01".parse::<Cgpa>().is_err());
        assert!("abc".parse::<Percentage>().is_err());
    }

    #[test]
    fn field_update_touches_only_its_field() {
        let mut draft = ApplicationDraft::new("42");
        draft.apply(FieldUpdate::FirstName("Asha".into()));
        draft.apply(FieldUpdate::Degree(Degree::Mca));

        assert_eq!(draft.first_name, "Asha");
        assert_eq!(draft.degree, Some(Degree::Mca));
        assert_eq!(draft.job_id, "42");
        assert!(draft.last_name.is_empty());
        assert!(draft.tenth_percentage.is_none());
    }

    #[test]
    fn empty_draft_fails_validation_on_resume() {
        let draft = ApplicationDraft::new("42");
        let errors = draft.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("resume"));
        assert!(errors.field_errors().contains_key("email"));
    }

    #[test]
    fn state_and_degree_parse_case_insensitively() {
        assert_eq!(parse_state("uttar pradesh").unwrap(), "Uttar Pradesh");
        assert!(parse_state("Atlantis").is_err());
        assert_eq!("mca".parse::<Degree>().unwrap(), Degree::Mca);
    }

    #[test]
    fn resume_content_type_follows_extension() {
        let file = ResumeFile::new("cv.DOCX", b"PK".to_vec());
        assert_eq!(
            file.content_type,
            "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
        );
    }

    #[tokio::test]
    async fn resume_from_path_rejects_unaccepted_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cv.txt");
        tokio::fs::write(&path, b"plain text").await.unwrap();

        let err = ResumeFile::from_path(&path).await.unwrap_err();
        assert!(matches!(err, Error::BadRequest(_)));

        let pdf = dir.path().join("cv.pdf");
        tokio::fs::write(&pdf, b"%PDF-1.4").await.unwrap();
        let file = ResumeFile::from_path(&pdf).await.unwrap();
        assert_eq!(file.file_name, "cv.pdf");
        assert_eq!(file.content_type, "application/pdf");
    }

    #[test]
    fn complete_draft_without_resume_reports_only_the_resume() {
        let mut draft = ApplicationDraft::new("42");
        for update in [
            FieldUpdate::FirstName("Asha".into()),
            FieldUpdate::LastName("Verma".into()),
            FieldUpdate::Email("asha@example.com".into()),
            FieldUpdate::Address("12 MG Road".into()),
            FieldUpdate::City("Noida".into()),
            FieldUpdate::State("Uttar Pradesh".into()),
            FieldUpdate::MobileNo("9876543210".into()),
            FieldUpdate::TenthPercentage(Percentage::new(88.5).unwrap()),
            FieldUpdate::TwelfthPercentage(Percentage::new(79.0).unwrap()),
            FieldUpdate::Degree(Degree::BTechCse),
            FieldUpdate::DegreeCgpa(Cgpa::new(8.2).unwrap()),
        ] {
            draft.apply(update);
        }

        let errors = draft.validate().unwrap_err();
        let field_errors = errors.field_errors();
        assert_eq!(field_errors.len(), 1);
        let resume = field_errors.get("resume").expect("resume error");
        assert_eq!(resume[0].message.as_deref(), Some("Resume file is required"));

        draft.resume = Some(ResumeFile::new("cv.pdf", b"%PDF".to_vec()));
        assert!(draft.validate().is_ok());
        assert_eq!(
            serde_json::to_value(draft.resume.as_ref().unwrap()).unwrap(),
            serde_json::json!("cv.pdf")
        );
    }
}
