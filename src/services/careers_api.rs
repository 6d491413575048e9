use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde_json::Value as JsonValue;
use tracing::{debug, instrument};
use url::Url;

use crate::dto::envelope::{parse_envelope, Envelope};
use crate::dto::vacancy_dto::{CountsRequest, SubmissionAck, VacancyListQuery, VacancyPage};
use crate::error::{Error, Result};
use crate::models::application::ApplicationSubmission;
use crate::models::industry::Industry;
use crate::models::vacancy::Vacancy;

/// The backend operations the careers components depend on.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CareersApi: Send + Sync {
    async fn list_industries(&self) -> Result<Vec<Industry>>;

    async fn list_vacancies(&self, query: &VacancyListQuery) -> Result<VacancyPage>;

    async fn get_vacancy(&self, job_id: &str) -> Result<Vacancy>;

    /// Applicant counts keyed by job number.
    async fn application_counts(&self, job_ids: &[String]) -> Result<HashMap<String, u64>>;

    async fn submit_application(&self, submission: &ApplicationSubmission) -> Result<SubmissionAck>;
}

#[derive(Clone)]
pub struct CareersClient {
    client: Client,
    base_url: String,
}

impl CareersClient {
    pub fn new(base_url: &Url, client: Client) -> Self {
        Self {
            client,
            base_url: base_url.as_str().trim_end_matches('/').to_string(),
        }
    }

    pub fn with_timeout(base_url: &Url, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self::new(base_url, client))
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn read<T: DeserializeOwned>(response: reqwest::Response) -> Result<Envelope<T>> {
        let status = response.status();
        let body = response.text().await?;
        debug!(status = status.as_u16(), bytes = body.len(), "Backend responded");
        parse_envelope(status.as_u16(), &body)
    }
}

#[async_trait]
impl CareersApi for CareersClient {
    #[instrument(skip(self))]
    async fn list_industries(&self) -> Result<Vec<Industry>> {
        let response = self
            .client
            .get(self.endpoint("/api/industry/list"))
            .send()
            .await?;
        let envelope = Self::read::<Vec<Industry>>(response).await?;
        Ok(envelope.data.unwrap_or_default())
    }

    #[instrument(skip(self), fields(page = query.page, show_all = query.show_all))]
    async fn list_vacancies(&self, query: &VacancyListQuery) -> Result<VacancyPage> {
        let url = Url::parse_with_params(&self.endpoint("/api/vacancy/list"), query.to_pairs())?;
        let response = self.client.get(url).send().await?;
        let envelope = Self::read::<Vec<Vacancy>>(response).await?;
        Ok(VacancyPage {
            vacancies: envelope.data.unwrap_or_default(),
            pagination: envelope.pagination,
        })
    }

    #[instrument(skip(self))]
    async fn get_vacancy(&self, job_id: &str) -> Result<Vacancy> {
        let mut url = Url::parse(&self.endpoint("/api/vacancy/get"))?;
        url.path_segments_mut()
            .map_err(|_| Error::Config("API base URL cannot carry a path".into()))?
            .push(job_id);
        let response = self.client.get(url).send().await?;
        Self::read::<Vacancy>(response).await?.require_data()
    }

    #[instrument(skip(self, job_ids), fields(jobs = job_ids.len()))]
    async fn application_counts(&self, job_ids: &[String]) -> Result<HashMap<String, u64>> {
        let response = self
            .client
            .post(self.endpoint("/api/cv/counts/batch"))
            .json(&CountsRequest { job_ids })
            .send()
            .await?;
        let envelope = Self::read::<JsonValue>(response).await?;
        Ok(envelope.counts.unwrap_or_default())
    }

    #[instrument(skip(self, submission), fields(job_id = %submission.job_id))]
    async fn submit_application(&self, submission: &ApplicationSubmission) -> Result<SubmissionAck> {
        let mut form = Form::new();
        for (name, value) in submission.text_fields() {
            form = form.text(name, value);
        }
        let resume = Part::bytes(submission.resume.data.to_vec())
            .file_name(submission.resume.file_name.clone())
            .mime_str(&submission.resume.content_type)
            .map_err(|e| Error::Internal(format!("Invalid resume content type: {}", e)))?;
        form = form.part("resume", resume);

        let response = self
            .client
            .post(self.endpoint("/api/cv/add"))
            .multipart(form)
            .send()
            .await?;
        let envelope = Self::read::<JsonValue>(response).await?;
        Ok(SubmissionAck {
            message: envelope.message,
        })
    }
}
