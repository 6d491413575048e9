pub mod application;
pub mod filter;
pub mod industry;
pub mod pagination;
pub mod vacancy;
