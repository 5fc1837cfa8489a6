//! Recommendation service over the live catalog snapshot and its HTTP surface.

pub mod router;
mod service;
mod views;


pub use router::{recommendation_router, ComponentsRequest, ItemsRequest};
pub use service::{RecommendationService, ServiceError};
pub use views::{RecommendationList, RecommendationView, ScoreBand, ScoreTrace};
