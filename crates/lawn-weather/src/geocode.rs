//! Forward geocoding: turn "Newton, NJ" into candidate places.
//! Uses the Open-Meteo geocoding API - free, no API key required.

use crate::types::{PlaceCandidate, WeatherError};
use crate::USER_AGENT;
use reqwest::Client;
use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;
use tracing::instrument;

#[derive(Debug, Deserialize)]
struct SearchResponse {
    // Absent entirely when nothing matches
    #[serde(default)]
    results: Vec<SearchResult>,
}

#[derive(Debug, Deserialize)]
struct SearchResult {
    name: String,
    latitude: f64,
    longitude: f64,
    admin1: Option<String>,
    country_code: Option<String>,
    country: Option<String>,
}

/// Open-Meteo rejects larger `count` values
const MAX_SEARCH_ROWS: u8 = 100;

const US_STATES: &[(&str, &str)] = &[
    ("AL", "Alabama"),
    ("AK", "Alaska"),
    ("AZ", "Arizona"),
    ("AR", "Arkansas"),
    ("CA", "California"),
    ("CO", "Colorado"),
    ("CT", "Connecticut"),
    ("DE", "Delaware"),
    ("DC", "District of Columbia"),
    ("FL", "Florida"),
    ("GA", "Georgia"),
    ("HI", "Hawaii"),
    ("ID", "Idaho"),
    ("IL", "Illinois"),
    ("IN", "Indiana"),
    ("IA", "Iowa"),
    ("KS", "Kansas"),
    ("KY", "Kentucky"),
    ("LA", "Louisiana"),
    ("ME", "Maine"),
    ("MD", "Maryland"),
    ("MA", "Massachusetts"),
    ("MI", "Michigan"),
    ("MN", "Minnesota"),
    ("MS", "Mississippi"),
    ("MO", "Missouri"),
    ("MT", "Montana"),
    ("NE", "Nebraska"),
    ("NV", "Nevada"),
    ("NH", "New Hampshire"),
    ("NJ", "New Jersey"),
    ("NM", "New Mexico"),
    ("NY", "New York"),
    ("NC", "North Carolina"),
    ("ND", "North Dakota"),
    ("OH", "Ohio"),
    ("OK", "Oklahoma"),
    ("OR", "Oregon"),
    ("PA", "Pennsylvania"),
    ("RI", "Rhode Island"),
    ("SC", "South Carolina"),
    ("SD", "South Dakota"),
    ("TN", "Tennessee"),
    ("TX", "Texas"),
    ("UT", "Utah"),
    ("VT", "Vermont"),
    ("VA", "Virginia"),
    ("WA", "Washington"),
    ("WV", "West Virginia"),
    ("WI", "Wisconsin"),
    ("WY", "Wyoming"),
];

/// Split "City, Region" into the name the API searches on and an optional
/// qualifier used to rank results.
pub fn split_query(query: &str) -> (&str, Option<&str>) {
    match query.split_once(',') {
        Some((name, qualifier)) => {
            let qualifier = qualifier.trim();
            (name.trim(), (!qualifier.is_empty()).then_some(qualifier))
        }
        None => (query.trim(), None),
    }
}

/// Whether a candidate matches a qualifier like "NJ", "New Jersey" or "US".
fn matches_qualifier(candidate: &SearchResult, qualifier: &str) -> bool {
    let q = qualifier.to_lowercase();
    let expanded = US_STATES
        .iter()
        .find(|(abbr, _)| abbr.eq_ignore_ascii_case(qualifier))
        .map(|(_, full)| full.to_lowercase());

    let fields = [
        candidate.admin1.as_deref(),
        candidate.country_code.as_deref(),
        candidate.country.as_deref(),
    ];

    fields.into_iter().flatten().any(|field| {
        let field = field.to_lowercase();
        field == q || field.starts_with(&q) || expanded.as_deref() == Some(field.as_str())
    })
}

#[derive(Debug, Clone)]
pub struct Geocoder {
    client: Arc<Client>,
    base_url: String,
}

impl Geocoder {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, WeatherError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self::with_client(Arc::new(client), base_url))
    }

    pub fn with_client(client: Arc<Client>, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Search for places matching `query`.
    ///
    /// Zero matches is `Ok(vec![])`. When the query carries a qualifier
    /// ("Newton, NJ") matching candidates are moved to the front, keeping
    /// the provider's order otherwise.
    #[instrument(skip(self), level = "info")]
    pub async fn search(
        &self,
        query: &str,
        count: u8,
    ) -> Result<Vec<PlaceCandidate>, WeatherError> {
        let (name, qualifier) = split_query(query);
        if name.is_empty() {
            return Err(WeatherError::InvalidQuery(query.to_string()));
        }

        // Ask for extra rows when we need to filter by region
        let requested = if qualifier.is_some() {
            count.saturating_mul(4).max(10)
        } else {
            count.max(1)
        }
        .min(MAX_SEARCH_ROWS);

        let url = format!(
            "{}/v1/search?name={}&count={}&language=en&format=json",
            self.base_url,
            urlencoding::encode(name),
            requested
        );

        let response = self.client.get(&url).send().await?;
        let body: SearchResponse = crate::handle_response(response).await?;

        let mut results = body.results;
        if let Some(qualifier) = qualifier {
            // Stable sort: matches first
            results.sort_by_key(|r| !matches_qualifier(r, qualifier));
        }

        let candidates: Vec<PlaceCandidate> = results
            .into_iter()
            .take(usize::from(count.max(1)))
            .map(|r| PlaceCandidate {
                name: r.name,
                admin1: r.admin1,
                country_code: r.country_code,
                latitude: r.latitude,
                longitude: r.longitude,
            })
            .collect();

        tracing::debug!("Geocoder returned {} candidates for {:?}", candidates.len(), query);
        Ok(candidates)
    }

    /// Resolve `query` to its best candidate.
    pub async fn resolve_first(&self, query: &str) -> Result<PlaceCandidate, WeatherError> {
        self.search(query, 1)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| WeatherError::LocationNotFound(query.trim().to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(name: &str, admin1: &str, cc: &str) -> SearchResult {
        SearchResult {
            name: name.into(),
            latitude: 0.0,
            longitude: 0.0,
            admin1: Some(admin1.into()),
            country_code: Some(cc.into()),
            country: None,
        }
    }

    #[test]
    fn test_split_query() {
        assert_eq!(split_query("Newton, NJ"), ("Newton", Some("NJ")));
        assert_eq!(split_query("  Newton  "), ("Newton", None));
        assert_eq!(split_query("Newton,  "), ("Newton", None));
        assert_eq!(split_query("Paris, Ile-de-France, FR"), ("Paris", Some("Ile-de-France, FR")));
    }

    #[test]
    fn test_state_abbreviation_matches() {
        let nj = result("Newton", "New Jersey", "US");
        let ma = result("Newton", "Massachusetts", "US");
        assert!(matches_qualifier(&nj, "NJ"));
        assert!(matches_qualifier(&nj, "nj"));
        assert!(!matches_qualifier(&ma, "NJ"));
    }

    #[test]
    fn test_full_region_and_country_match() {
        let ma = result("Newton", "Massachusetts", "US");
        assert!(matches_qualifier(&ma, "Massachusetts"));
        assert!(matches_qualifier(&ma, "us"));
        assert!(!matches_qualifier(&ma, "CA"));
    }

    #[tokio::test]
    async fn test_empty_query_rejected_without_request() {
        let geocoder = Geocoder::new("http://127.0.0.1:9", Duration::from_secs(1)).unwrap();
        let err = geocoder.search("  , NJ", 5).await.unwrap_err();
        assert!(matches!(err, WeatherError::InvalidQuery(_)));
    }
}
