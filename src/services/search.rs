use crate::core::geo::Region;
use crate::core::place::Place;
use crate::Result;
use async_trait::async_trait;
use std::sync::Arc;

/// A natural-language place search scoped to a map region
#[derive(Debug, Clone, PartialEq)]
pub struct SearchRequest {
    pub query: String,
    pub region: Region,
}

/// Trait representing anything that can look up places for a query.
#[async_trait]
pub trait PlaceSearchCapability: Send + Sync {
    async fn search(&self, request: &SearchRequest) -> Result<Vec<Place>>;
}

/// Best-effort search: failures and "no match" both come back as an empty list.
#[derive(Clone)]
pub struct PlaceSearchClient {
    capability: Arc<dyn PlaceSearchCapability>,
}

impl PlaceSearchClient {
    pub fn new(capability: Arc<dyn PlaceSearchCapability>) -> Self {
        Self { capability }
    }

    pub async fn search(&self, query: &str, region: Region) -> Vec<Place> {
        let query = query.trim();
        if query.is_empty() {
            return Vec::new();
        }

        let request = SearchRequest {
            query: query.to_string(),
            region,
        };
        match self.capability.search(&request).await {
            Ok(places) => {
                log::debug!("search {:?} returned {} places", query, places.len());
                places
            }
            Err(e) => {
                log::warn!("search {:?} failed: {}", query, e);
                Vec::new()
            }
        }
    }
}
