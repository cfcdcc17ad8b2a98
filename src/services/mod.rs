pub mod trending_service;
pub mod trending_service_impl;
pub use trending_service::{RecordOutcome, TrendingError, TrendingService};
pub use trending_service_impl::DefaultTrendingService;

pub mod tracker;
pub use tracker::TrendingTracker;
