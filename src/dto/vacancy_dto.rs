use serde::Serialize;

use crate::models::filter::FilterCriteria;
use crate::models::pagination::Pagination;
use crate::models::vacancy::Vacancy;

/// Number of recent vacancies shown when nothing is promoted.
pub const FALLBACK_LIMIT: u32 = 5;

/// Query parameters for `GET /api/vacancy/list`, built from a filter snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VacancyListQuery {
    pub page: u32,
    pub limit: u32,
    pub show_all: bool,
    pub search: Option<String>,
    pub industry: Option<String>,
    pub employment_type: Option<String>,
    pub experience_level: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub is_remote: bool,
}

impl VacancyListQuery {
    /// Recent active vacancies regardless of promotion.
    pub fn recent_fallback() -> Self {
        Self {
            page: 1,
            limit: FALLBACK_LIMIT,
            show_all: true,
            search: None,
            industry: None,
            employment_type: None,
            experience_level: None,
            city: None,
            state: None,
            is_remote: false,
        }
    }

    /// Pairs in wire order; empty filters are omitted and `isRemote` is only
    /// sent when set.
    pub fn to_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![
            ("page", self.page.to_string()),
            ("limit", self.limit.to_string()),
            ("showAll", self.show_all.to_string()),
        ];
        let optional = [
            ("search", &self.search),
            ("industry", &self.industry),
            ("employmentType", &self.employment_type),
            ("experienceLevel", &self.experience_level),
            ("city", &self.city),
            ("state", &self.state),
        ];
        for (key, value) in optional {
            if let Some(value) = value {
                pairs.push((key, value.clone()));
            }
        }
        if self.is_remote {
            pairs.push(("isRemote", "true".to_string()));
        }
        pairs
    }
}

fn non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

impl From<&FilterCriteria> for VacancyListQuery {
    fn from(criteria: &FilterCriteria) -> Self {
        Self {
            page: criteria.page.max(1),
            limit: criteria.page_size,
            show_all: criteria.show_all,
            search: non_empty(&criteria.search),
            industry: criteria.industry.as_deref().and_then(non_empty),
            employment_type: criteria
                .employment_type
                .as_ref()
                .map(|t| t.as_str().to_string()),
            experience_level: criteria
                .experience_level
                .as_ref()
                .map(|l| l.as_str().to_string()),
            city: non_empty(&criteria.city),
            state: non_empty(&criteria.state),
            is_remote: criteria.remote_only,
        }
    }
}

/// One page of vacancies as returned by the list endpoint.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VacancyPage {
    pub vacancies: Vec<Vacancy>,
    pub pagination: Option<Pagination>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CountsRequest<'a> {
    pub job_ids: &'a [String],
}

/// Acknowledgement of an accepted application.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubmissionAck {
    pub message: Option<String>,
}
