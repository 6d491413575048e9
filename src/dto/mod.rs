pub mod envelope;
pub mod vacancy_dto;
pub mod view_dto;
