use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::config::DEFAULT_PAGE_SIZE;
use crate::error::Error;
use crate::models::vacancy::{EmploymentType, ExperienceLevel, Vacancy};

/// Filters, paging and the promoted/all toggle for one browser instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterCriteria {
    pub search: String,
    pub industry: Option<String>,
    pub employment_type: Option<EmploymentType>,
    pub experience_level: Option<ExperienceLevel>,
    pub city: String,
    pub state: String,
    pub remote_only: bool,
    pub page: u32,
    pub page_size: u32,
    pub show_all: bool,
}

impl Default for FilterCriteria {
    fn default() -> Self {
        Self::with_page_size(DEFAULT_PAGE_SIZE)
    }
}

impl FilterCriteria {
    pub fn with_page_size(page_size: u32) -> Self {
        Self {
            search: String::new(),
            industry: None,
            employment_type: None,
            experience_level: None,
            city: String::new(),
            state: String::new(),
            remote_only: false,
            page: 1,
            page_size: page_size.max(1),
            show_all: false,
        }
    }

    pub fn has_active_filters(&self) -> bool {
        !self.search.is_empty()
            || self.industry.is_some()
            || self.employment_type.is_some()
            || self.experience_level.is_some()
            || !self.city.is_empty()
            || !self.state.is_empty()
            || self.remote_only
    }

    /// No filters, first page, promoted-only: the shape that gets the
    /// recent-vacancies fallback when nothing is promoted.
    pub fn is_initial_view(&self) -> bool {
        !self.has_active_filters() && self.page == 1 && !self.show_all
    }

    /// Applies one change. Anything other than a page change sends the
    /// browser back to page 1.
    pub fn apply(&mut self, change: FilterChange) {
        match change {
            FilterChange::Page(page) => {
                self.page = page.max(1);
                return;
            }
            FilterChange::Search(v) => self.search = v,
            FilterChange::Industry(v) => self.industry = v.filter(|s| !s.is_empty()),
            FilterChange::EmploymentType(v) => self.employment_type = v,
            FilterChange::ExperienceLevel(v) => self.experience_level = v,
            FilterChange::City(v) => self.city = v,
            FilterChange::State(v) => self.state = v,
            FilterChange::RemoteOnly(v) => self.remote_only = v,
            FilterChange::ShowAll(v) => self.show_all = v,
        }
        self.page = 1;
    }

    /// Clears every filter value; the promoted/all toggle is kept.
    pub fn clear(&mut self) {
        let show_all = self.show_all;
        *self = Self::with_page_size(self.page_size);
        self.show_all = show_all;
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterChange {
    Search(String),
    Industry(Option<String>),
    EmploymentType(Option<EmploymentType>),
    ExperienceLevel(Option<ExperienceLevel>),
    City(String),
    State(String),
    RemoteOnly(bool),
    ShowAll(bool),
    Page(u32),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortKey {
    #[default]
    Newest,
    Oldest,
    Title,
}

impl FromStr for SortKey {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "newest" => Ok(SortKey::Newest),
            "oldest" => Ok(SortKey::Oldest),
            "title" => Ok(SortKey::Title),
            other => Err(Error::BadRequest(format!(
                "Unknown sort key '{}' (expected newest, oldest or title)",
                other
            ))),
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            SortKey::Newest => "Newest First",
            SortKey::Oldest => "Oldest First",
            SortKey::Title => "Title (A-Z)",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ViewMode {
    #[default]
    Grid,
    List,
}

impl FromStr for ViewMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "grid" => Ok(ViewMode::Grid),
            "list" => Ok(ViewMode::List),
            other => Err(Error::BadRequest(format!(
                "Unknown view mode '{}' (expected grid or list)",
                other
            ))),
        }
    }
}

/// Returns the loaded page re-ordered by `key`. Stable, so equal keys keep
/// their server order and repeated sorting is a no-op.
pub fn sort_vacancies(vacancies: &[Vacancy], key: SortKey) -> Vec<Vacancy> {
    let mut sorted = vacancies.to_vec();
    match key {
        SortKey::Newest => sorted.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
        SortKey::Oldest => sorted.sort_by(|a, b| a.created_at.cmp(&b.created_at)),
        SortKey::Title => sorted.sort_by(|a, b| compare_titles(&a.job_title, &b.job_title)),
    }
    sorted
}

fn compare_titles(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}
