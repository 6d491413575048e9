pub mod config;
pub mod dto;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;
pub mod utils;

use std::sync::Arc;
use std::time::Duration;

use crate::config::Config;
use crate::error::Result;
use crate::services::{
    application_form::ApplicationForm, careers_api::CareersClient,
    vacancy_browser::VacancyBrowser,
};

/// Shared handles for the careers pages, built once from configuration.
#[derive(Clone)]
pub struct AppState {
    pub api: Arc<CareersClient>,
    pub page_size: u32,
}

impl AppState {
    pub fn new(config: &Config) -> Result<Self> {
        let api = CareersClient::with_timeout(
            &config.api_url,
            Duration::from_secs(config.http_timeout_secs),
        )?;

        Ok(Self {
            api: Arc::new(api),
            page_size: config.page_size,
        })
    }

    pub fn browser(&self) -> VacancyBrowser<CareersClient> {
        VacancyBrowser::new(Arc::clone(&self.api), self.page_size)
    }

    pub fn application_form(&self, job_id: impl Into<String>) -> ApplicationForm<CareersClient> {
        ApplicationForm::new(Arc::clone(&self.api), job_id)
    }
}
