//! Geo-distance query construction and search response decoding.

use around_shared::{GeoQuery, Post, SearchOutcome};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::errors::StoreError;
use crate::opensearch::index_config::DOCUMENT_TYPE_FIELD;

/// Build the search body for a geo-distance query.
///
/// Both clauses run in filter context: documents of the configured type whose
/// `location` lies within the radius. No scoring or sorting is requested, so
/// hit order is whatever the store returns.
pub fn build_geo_distance_query(query: &GeoQuery, document_type: &str, size: usize) -> Value {
    json!({
        "size": size,
        "query": {
            "bool": {
                "filter": [
                    {
                        "term": {
                            DOCUMENT_TYPE_FIELD: document_type
                        }
                    },
                    {
                        "geo_distance": {
                            "distance": query.distance(),
                            "location": {
                                "lat": query.center.lat,
                                "lon": query.center.lon
                            }
                        }
                    }
                ]
            }
        }
    })
}

#[derive(Debug, Deserialize)]
struct SearchResponseBody {
    #[serde(default)]
    took: u64,
    hits: HitsEnvelope,
}

#[derive(Debug, Deserialize)]
struct HitsEnvelope {
    total: Option<TotalHits>,
    #[serde(default)]
    hits: Vec<Hit>,
}

#[derive(Debug, Deserialize)]
struct TotalHits {
    value: u64,
}

#[derive(Debug, Deserialize)]
struct Hit {
    #[serde(rename = "_source")]
    source: Post,
}

/// Decode a raw search response into posts.
///
/// Every hit's `_source` must decode into a [`Post`]; one that does not fails
/// the whole search rather than being silently dropped.
pub fn decode_search_response(body: &str) -> Result<SearchOutcome, StoreError> {
    let response: SearchResponseBody = serde_json::from_str(body)
        .map_err(|e| StoreError::parse(format!("Invalid search response: {}", e)))?;

    let posts: Vec<Post> = response.hits.hits.into_iter().map(|hit| hit.source).collect();
    let total = response
        .hits
        .total
        .map(|t| t.value)
        .unwrap_or(posts.len() as u64);

    Ok(SearchOutcome::new(posts, total, response.took))
}
