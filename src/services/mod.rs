pub mod chart_service;
pub mod classify_service;
pub mod parse_service;
pub mod stats_service;
