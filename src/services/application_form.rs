use std::sync::Arc;

use tracing::{error, info, instrument, warn};

use crate::dto::vacancy_dto::SubmissionAck;
use crate::dto::view_dto::{FormMessage, VacancyDetailView};
use crate::error::{Error, Result};
use crate::models::application::{ApplicationDraft, ApplicationSubmission, FieldUpdate, ResumeFile};
use crate::models::vacancy::Vacancy;
use crate::services::careers_api::CareersApi;
use crate::utils::validation;

pub const SUBMIT_LABEL: &str = "Submit Application";
pub const SUBMITTING_LABEL: &str = "Submitting...";
const SUBMITTED: &str = "Application submitted successfully";
const SUBMIT_FAILED: &str = "Failed to submit application";
const NETWORK_FAILED: &str = "Network error. Please check your connection and try again.";

/// Form field order, used to report missing fields top to bottom.
const FIELD_ORDER: [&str; 12] = [
    "first_name",
    "last_name",
    "email",
    "mobile_no",
    "address",
    "city",
    "state",
    "tenth_percentage",
    "twelfth_percentage",
    "degree",
    "degree_cgpa",
    "resume",
];

pub struct ApplicationForm<A: CareersApi> {
    api: Arc<A>,
    initial_job_id: String,
    draft: ApplicationDraft,
    vacancy: Option<Vacancy>,
    loading: bool,
    submitting: bool,
    message: Option<FormMessage>,
}

impl<A: CareersApi> ApplicationForm<A> {
    /// A form for `job_id` as handed over by navigation (may be empty).
    pub fn new(api: Arc<A>, job_id: impl Into<String>) -> Self {
        let initial_job_id = job_id.into();
        Self {
            api,
            draft: ApplicationDraft::new(initial_job_id.clone()),
            loading: !initial_job_id.is_empty(),
            initial_job_id,
            vacancy: None,
            submitting: false,
            message: None,
        }
    }

    pub fn draft(&self) -> &ApplicationDraft {
        &self.draft
    }

    pub fn vacancy(&self) -> Option<&Vacancy> {
        self.vacancy.as_ref()
    }

    pub fn detail(&self) -> Option<VacancyDetailView> {
        self.vacancy.as_ref().map(VacancyDetailView::from)
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn message(&self) -> Option<&FormMessage> {
        self.message.as_ref()
    }

    pub fn submit_label(&self) -> &'static str {
        if self.submitting {
            SUBMITTING_LABEL
        } else {
            SUBMIT_LABEL
        }
    }

    /// Fetches the vacancy detail once. Failures leave the form usable
    /// without vacancy context.
    #[instrument(skip(self), fields(job_id = %self.initial_job_id))]
    pub async fn load(&mut self) {
        if self.initial_job_id.is_empty() {
            self.loading = false;
            return;
        }

        match self.api.get_vacancy(&self.initial_job_id).await {
            Ok(vacancy) => self.vacancy = Some(vacancy),
            Err(err) => warn!(error = %err, "Could not load vacancy details"),
        }
        self.loading = false;
    }

    pub fn update_field(&mut self, update: FieldUpdate) {
        self.draft.apply(update);
    }

    /// Holds at most one resume; a new selection replaces the previous one.
    pub fn select_resume(&mut self, file: ResumeFile) {
        self.draft.resume = Some(file);
    }

    pub fn clear_resume(&mut self) {
        self.draft.resume = None;
    }

    /// Validates the draft and marks the form busy. Nothing is sent if this
    /// fails; a failure message is recorded instead.
    pub fn begin_submit(&mut self) -> Result<ApplicationSubmission> {
        if self.submitting {
            return Err(Error::BadRequest(
                "An application is already being submitted".to_string(),
            ));
        }

        self.message = None;
        match self.build_submission() {
            Ok(submission) => {
                self.submitting = true;
                Ok(submission)
            }
            Err(err) => {
                self.message = Some(FormMessage::Failure(match &err {
                    Error::Validation(errors) => validation::summarize(errors, &FIELD_ORDER),
                    other => other.to_string(),
                }));
                Err(err)
            }
        }
    }

    fn build_submission(&self) -> Result<ApplicationSubmission> {
        validation::validate(&self.draft)?;

        let job_id = self
            .vacancy
            .as_ref()
            .map(|v| v.job_id.clone())
            .filter(|id| !id.is_empty())
            .unwrap_or_else(|| self.draft.job_id.clone());
        if job_id.trim().is_empty() {
            return Err(Error::BadRequest("Job id is required".to_string()));
        }

        let missing = |field: &str| Error::Internal(format!("{} missing after validation", field));
        let draft = &self.draft;
        Ok(ApplicationSubmission {
            first_name: draft.first_name.clone(),
            last_name: draft.last_name.clone(),
            email: draft.email.clone(),
            address: draft.address.clone(),
            mobile_no: draft.mobile_no.clone(),
            job_id,
            city: draft.city.clone(),
            state: draft.state.clone(),
            tenth_percentage: draft.tenth_percentage.ok_or_else(|| missing("tenth_percentage"))?,
            twelfth_percentage: draft
                .twelfth_percentage
                .ok_or_else(|| missing("twelfth_percentage"))?,
            degree: draft.degree.ok_or_else(|| missing("degree"))?,
            degree_cgpa: draft.degree_cgpa.ok_or_else(|| missing("degree_cgpa"))?,
            resume: draft.resume.clone().ok_or_else(|| missing("resume"))?,
        })
    }

    /// Records the outcome of a submission started with `begin_submit`.
    pub fn finish_submit(&mut self, result: Result<SubmissionAck>) -> &FormMessage {
        self.submitting = false;
        let message = match result {
            Ok(_) => {
                info!(job_id = %self.initial_job_id, "Application submitted");
                self.draft = ApplicationDraft::new(self.initial_job_id.clone());
                FormMessage::Success(SUBMITTED.to_string())
            }
            Err(err) => {
                error!(error = %err, "Application submission failed");
                FormMessage::Failure(submit_error_message(&err))
            }
        };
        self.message.insert(message)
    }

    /// Validates, sends once and records the outcome.
    pub async fn submit(&mut self) -> Option<&FormMessage> {
        let submission = match self.begin_submit() {
            Ok(submission) => submission,
            Err(_) => return self.message.as_ref(),
        };
        let result = self.api.submit_application(&submission).await;
        Some(self.finish_submit(result))
    }
}

fn submit_error_message(err: &Error) -> String {
    match err {
        Error::Api {
            message: Some(message),
            ..
        } => message.clone(),
        Error::Api {
            status: Some(status),
            message: None,
        } => format!("Server error ({})", status),
        Error::Api { .. } => SUBMIT_FAILED.to_string(),
        Error::Transport(_) => NETWORK_FAILED.to_string(),
        other => other.to_string(),
    }
}
