use std::collections::HashMap;
use std::sync::Arc;

use tracing::{debug, info, instrument, warn};

use crate::dto::vacancy_dto::{VacancyListQuery, VacancyPage, FALLBACK_LIMIT};
use crate::dto::view_dto::{BrowserView, Pager, VacancyCard};
use crate::error::{Error, Result};
use crate::models::filter::{sort_vacancies, FilterChange, FilterCriteria, SortKey, ViewMode};
use crate::models::industry::Industry;
use crate::models::pagination::Pagination;
use crate::models::vacancy::Vacancy;
use crate::routes::Route;
use crate::services::careers_api::CareersApi;
use crate::utils::format;

const LIST_FAILED: &str = "Failed to fetch vacancies";
const LIST_ERRORED: &str = "Error fetching vacancies";

/// Everything the browser shows, owned in one place.
#[derive(Debug, Clone, Default)]
pub struct BrowserState {
    pub filters: FilterCriteria,
    pub sort: SortKey,
    pub view_mode: ViewMode,
    pub vacancies: Vec<Vacancy>,
    pub pagination: Option<Pagination>,
    pub industries: Vec<Industry>,
    pub counts: HashMap<String, u64>,
    pub loading: bool,
    pub error: Option<String>,
    latest_list_request: u64,
    latest_counts_request: u64,
}

/// A list fetch to run: the filter snapshot it was issued for and its
/// generation id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListRequest {
    pub id: u64,
    pub criteria: FilterCriteria,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountsRequest {
    pub id: u64,
    pub job_ids: Vec<String>,
}

/// Fetches one page for `criteria`. The default promoted-only view falls back
/// to the newest active vacancies when nothing is promoted.
pub async fn load_vacancy_page<A>(api: &A, criteria: &FilterCriteria) -> Result<VacancyPage>
where
    A: CareersApi + ?Sized,
{
    let page = api.list_vacancies(&VacancyListQuery::from(criteria)).await?;
    if !criteria.is_initial_view() || !page.vacancies.is_empty() {
        return Ok(page);
    }

    info!("No promoted vacancies, falling back to the most recent openings");
    let fallback = api
        .list_vacancies(&VacancyListQuery::recent_fallback())
        .await?;
    let active: Vec<Vacancy> = fallback
        .vacancies
        .into_iter()
        .filter(|v| v.is_active)
        .collect();
    let mut recent = sort_vacancies(&active, SortKey::Newest);
    recent.truncate(FALLBACK_LIMIT as usize);

    Ok(VacancyPage {
        pagination: Some(Pagination::single_page(recent.len() as u64, FALLBACK_LIMIT)),
        vacancies: recent,
    })
}

pub struct VacancyBrowser<A: CareersApi> {
    api: Arc<A>,
    state: BrowserState,
}

impl<A: CareersApi> VacancyBrowser<A> {
    pub fn new(api: Arc<A>, page_size: u32) -> Self {
        Self {
            api,
            state: BrowserState {
                filters: FilterCriteria::with_page_size(page_size),
                loading: true,
                ..BrowserState::default()
            },
        }
    }

    pub fn state(&self) -> &BrowserState {
        &self.state
    }

    /// Applies a filter change and returns the fetch it calls for.
    pub fn update_filter(&mut self, change: FilterChange) -> ListRequest {
        self.state.filters.apply(change);
        self.begin_list_load()
    }

    pub fn clear_filters(&mut self) -> ListRequest {
        self.state.filters.clear();
        self.begin_list_load()
    }

    /// Moves to `page` if it exists. Returns `None` for out-of-range pages.
    pub fn go_to_page(&mut self, page: u32) -> Option<ListRequest> {
        let within_bounds = match self.state.pagination {
            Some(p) => page <= p.total_pages.max(1),
            None => true,
        };
        if page == 0 || !within_bounds {
            return None;
        }
        Some(self.update_filter(FilterChange::Page(page)))
    }

    pub fn next_page(&mut self) -> Option<ListRequest> {
        let next = self.state.filters.page.checked_add(1)?;
        self.go_to_page(next)
    }

    pub fn previous_page(&mut self) -> Option<ListRequest> {
        let previous = self.state.filters.page.checked_sub(1)?;
        self.go_to_page(previous)
    }

    pub fn set_sort(&mut self, sort: SortKey) {
        self.state.sort = sort;
    }

    pub fn set_view_mode(&mut self, mode: ViewMode) {
        self.state.view_mode = mode;
    }

    /// Issues a new list request id; any earlier in-flight response becomes stale.
    pub fn begin_list_load(&mut self) -> ListRequest {
        self.state.latest_list_request += 1;
        self.state.loading = true;
        self.state.error = None;
        ListRequest {
            id: self.state.latest_list_request,
            criteria: self.state.filters.clone(),
        }
    }

    /// Applies a list response. Returns the job ids to enrich with counts, or
    /// `None` when the response was stale or failed.
    pub fn apply_list(&mut self, request_id: u64, result: Result<VacancyPage>) -> Option<Vec<String>> {
        if request_id != self.state.latest_list_request {
            debug!(
                request_id,
                latest = self.state.latest_list_request,
                "Discarding stale vacancy list response"
            );
            return None;
        }

        self.state.loading = false;
        match result {
            Ok(page) => {
                self.state.vacancies = page.vacancies;
                self.state.pagination = page.pagination;
                Some(self.state.vacancies.iter().map(|v| v.job_id.clone()).collect())
            }
            Err(err) => {
                warn!(error = %err, "Vacancy list fetch failed");
                self.state.error = Some(list_error_message(&err).to_string());
                None
            }
        }
    }

    pub fn begin_counts(&mut self, job_ids: Vec<String>) -> CountsRequest {
        self.state.latest_counts_request += 1;
        CountsRequest {
            id: self.state.latest_counts_request,
            job_ids,
        }
    }

    pub fn apply_counts(&mut self, request_id: u64, result: Result<HashMap<String, u64>>) {
        if request_id != self.state.latest_counts_request {
            debug!(request_id, "Discarding stale application counts");
            return;
        }
        match result {
            Ok(counts) => self.state.counts.extend(counts),
            Err(err) => warn!(error = %err, "Application counts fetch failed"),
        }
    }

    pub fn apply_industries(&mut self, result: Result<Vec<Industry>>) {
        match result {
            Ok(industries) => self.state.industries = industries,
            Err(err) => warn!(error = %err, "Industry list fetch failed"),
        }
    }

    /// First load: industries and the vacancy list concurrently, then counts.
    #[instrument(skip(self))]
    pub async fn mount(&mut self) {
        let request = self.begin_list_load();
        let api = Arc::clone(&self.api);
        let (industries, page) = tokio::join!(
            api.list_industries(),
            load_vacancy_page(api.as_ref(), &request.criteria)
        );
        self.apply_industries(industries);
        if let Some(job_ids) = self.apply_list(request.id, page) {
            self.refresh_counts(job_ids).await;
        }
    }

    /// Runs a previously issued list request through to counts enrichment.
    pub async fn run(&mut self, request: ListRequest) {
        let page = load_vacancy_page(self.api.as_ref(), &request.criteria).await;
        if let Some(job_ids) = self.apply_list(request.id, page) {
            self.refresh_counts(job_ids).await;
        }
    }

    pub async fn refresh(&mut self) {
        let request = self.begin_list_load();
        self.run(request).await;
    }

    async fn refresh_counts(&mut self, job_ids: Vec<String>) {
        if job_ids.is_empty() {
            return;
        }
        let request = self.begin_counts(job_ids);
        let result = self.api.application_counts(&request.job_ids).await;
        self.apply_counts(request.id, result);
    }

    /// Loaded page in the chosen order; never refetches.
    pub fn sorted_vacancies(&self) -> Vec<Vacancy> {
        sort_vacancies(&self.state.vacancies, self.state.sort)
    }

    /// Route that hands `vacancy` to the application form.
    pub fn apply_route(&self, vacancy: &Vacancy) -> Route {
        Route::Apply {
            job_id: vacancy.id.clone(),
        }
    }

    pub fn view(&self) -> BrowserView {
        if self.state.loading {
            return BrowserView::Loading;
        }
        if let Some(error) = &self.state.error {
            return BrowserView::Error(error.clone());
        }
        if self.state.vacancies.is_empty() {
            return BrowserView::Empty;
        }

        let cards = self
            .sorted_vacancies()
            .iter()
            .map(|v| VacancyCard::build(v, &self.state.counts))
            .collect();

        BrowserView::Listing {
            roles: self
                .state
                .pagination
                .map(|p| format::roles_pill(p.total_items)),
            mode: self.state.view_mode,
            cards,
            pager: self.state.pagination.as_ref().and_then(Pager::from_pagination),
        }
    }
}

fn list_error_message(err: &Error) -> &'static str {
    match err {
        Error::Api { .. } => LIST_FAILED,
        _ => LIST_ERRORED,
    }
}
