use std::collections::HashMap;

use crate::models::filter::ViewMode;
use crate::models::pagination::Pagination;
use crate::models::vacancy::Vacancy;
use crate::utils::format;

pub const NO_RESULTS_MESSAGE: &str = "No vacancies found matching your filters.";

/// Display-ready projection of one vacancy in the listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VacancyCard {
    pub id: String,
    pub job_id: String,
    pub title: String,
    pub industry: Option<String>,
    pub location: Option<String>,
    pub remote: bool,
    pub employment_type: Option<String>,
    pub experience_level: Option<String>,
    pub salary: Option<String>,
    pub negotiable: bool,
    pub skills: Vec<String>,
    pub more_skills: Option<String>,
    pub description: String,
    pub applied_badge: Option<String>,
}

impl VacancyCard {
    pub fn build(vacancy: &Vacancy, counts: &HashMap<String, u64>) -> Self {
        let (skills, more_skills) = format::skill_preview(&vacancy.skills);
        let salary = vacancy.salary.as_ref().and_then(format::salary_range);
        Self {
            id: vacancy.id.clone(),
            job_id: vacancy.job_id.clone(),
            title: vacancy.job_title.clone(),
            industry: vacancy.industry.as_ref().map(|i| i.name.clone()),
            location: vacancy.location.as_ref().and_then(format::location_label),
            remote: vacancy.location.as_ref().is_some_and(|l| l.is_remote),
            employment_type: vacancy.employment_type.as_ref().map(|t| t.to_string()),
            experience_level: vacancy.experience_level.as_ref().map(|l| l.to_string()),
            negotiable: salary.is_some()
                && vacancy.salary.as_ref().is_some_and(|s| s.is_negotiable),
            salary,
            skills,
            more_skills,
            description: format::truncate_description(&vacancy.description),
            applied_badge: format::applied_badge(counts, &vacancy.job_id),
        }
    }
}

/// Previous/next controls; only produced when there is more than one page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pager {
    pub label: String,
    pub previous_enabled: bool,
    pub next_enabled: bool,
}

impl Pager {
    pub fn from_pagination(pagination: &Pagination) -> Option<Self> {
        (pagination.total_pages > 1).then(|| Self {
            label: format!(
                "Page {} of {}",
                pagination.current_page, pagination.total_pages
            ),
            previous_enabled: pagination.has_previous(),
            next_enabled: pagination.has_next(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BrowserView {
    Loading,
    Error(String),
    Empty,
    Listing {
        roles: Option<String>,
        mode: ViewMode,
        cards: Vec<VacancyCard>,
        pager: Option<Pager>,
    },
}

/// Full detail shown above the application form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VacancyDetailView {
    pub title: String,
    pub job_id: String,
    pub industry: Option<String>,
    pub location: Option<String>,
    pub remote: bool,
    pub employment_type: Option<String>,
    pub experience_level: Option<String>,
    pub salary: Option<String>,
    pub negotiable: bool,
    pub skills: Vec<String>,
    pub description: String,
    pub qualification: String,
    pub deadline: Option<String>,
}

impl From<&Vacancy> for VacancyDetailView {
    fn from(vacancy: &Vacancy) -> Self {
        let salary = vacancy.salary.as_ref().and_then(format::salary_range);
        Self {
            title: vacancy.job_title.clone(),
            job_id: vacancy.job_id.clone(),
            industry: vacancy.industry.as_ref().map(|i| i.name.clone()),
            location: vacancy.location.as_ref().and_then(format::location_label),
            remote: vacancy.location.as_ref().is_some_and(|l| l.is_remote),
            employment_type: vacancy.employment_type.as_ref().map(|t| t.to_string()),
            experience_level: vacancy.experience_level.as_ref().map(|l| l.to_string()),
            negotiable: salary.is_some()
                && vacancy.salary.as_ref().is_some_and(|s| s.is_negotiable),
            salary,
            skills: vacancy.skills.clone(),
            description: vacancy.description.clone(),
            qualification: vacancy.qualification.clone(),
            deadline: vacancy.application_deadline.map(format::deadline_label),
        }
    }
}

/// Terminal outcome of a submission attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormMessage {
    Success(String),
    Failure(String),
}

impl FormMessage {
    pub fn is_success(&self) -> bool {
        matches!(self, FormMessage::Success(_))
    }

    pub fn text(&self) -> &str {
        match self {
            FormMessage::Success(text) | FormMessage::Failure(text) => text,
        }
    }
}
