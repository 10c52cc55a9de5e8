// Application layer - use cases over the trend domain
pub mod trend_repository;
pub mod trend_service;
