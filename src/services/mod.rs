pub mod cache_service;
pub mod sheet_service;
