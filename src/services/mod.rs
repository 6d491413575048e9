pub mod application_form;
pub mod careers_api;
pub mod vacancy_browser;
