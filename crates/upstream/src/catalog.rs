//! Route dispatch: logical catalog operations to upstream calls.

use std::sync::Arc;

use cinedex_core::pagination::{PageRequest, paginate};
use cinedex_core::types::Envelope;
use serde::Serialize;
use tracing::debug;

use crate::CatalogError;
use crate::provider::Upstream;
use crate::shape::normalize;

const TITLE_PATH_PREFIX: &str = "/api/imdb/";

/// Paginated catalog listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Operation {
    MostPopularMovies,
    MostPopularTv,
    Top250Movies,
    Top250Tv,
    UpcomingReleases,
    Genres,
    Countries,
    Search,
}

impl Operation {
    pub const ALL: [Operation; 8] = [
        Self::MostPopularMovies,
        Self::MostPopularTv,
        Self::Top250Movies,
        Self::Top250Tv,
        Self::UpcomingReleases,
        Self::Genres,
        Self::Countries,
        Self::Search,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::MostPopularMovies => "most-popular-movies",
            Self::MostPopularTv => "most-popular-tv",
            Self::Top250Movies => "top250-movies",
            Self::Top250Tv => "top250-tv",
            Self::UpcomingReleases => "upcoming-releases",
            Self::Genres => "genres",
            Self::Countries => "countries",
            Self::Search => "search",
        }
    }

    pub fn upstream_path(self) -> &'static str {
        match self {
            Self::MostPopularMovies => "/api/imdb/most-popular-movies",
            Self::MostPopularTv => "/api/imdb/most-popular-tv",
            Self::Top250Movies => "/api/imdb/top250-movies",
            Self::Top250Tv => "/api/imdb/top250-tv",
            Self::UpcomingReleases => "/api/imdb/upcoming-releases",
            Self::Genres => "/api/imdb/genres",
            Self::Countries => "/api/imdb/countries",
            Self::Search => "/api/imdb/search",
        }
    }
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Upstream path for a single-title lookup.
pub fn title_path(id: &str) -> Result<String, CatalogError> {
    if id.is_empty() || id.contains(['/', '?', '#']) {
        return Err(CatalogError::InvalidIdentifier(id.to_string()));
    }
    Ok(format!("{TITLE_PATH_PREFIX}{id}"))
}

/// Catalog front door shared by all handlers.
#[derive(Clone)]
pub struct Catalog {
    upstream: Arc<dyn Upstream>,
}

impl Catalog {
    pub fn new(upstream: Arc<dyn Upstream>) -> Self {
        Self { upstream }
    }

    /// Run a paginated listing.
    ///
    /// `limit`/`offset` are consumed here; every other pair is forwarded untouched.
    /// Validation happens before any network call.
    pub async fn list(
        &self,
        op: Operation,
        query: Vec<(String, String)>,
    ) -> Result<Envelope, CatalogError> {
        let (page, filters) = PageRequest::split_query(query)?;
        debug!(
            operation = %op,
            upstream = self.upstream.name(),
            limit = page.limit,
            offset = page.offset,
            filters = filters.len(),
            "catalog listing"
        );

        let raw = self.upstream.fetch(op.upstream_path(), &filters).await?;
        Ok(paginate(normalize(&raw), page))
    }

    /// Look up one title and return the provider body as-is.
    pub async fn title(&self, id: &str) -> Result<serde_json::Value, CatalogError> {
        let path = title_path(id)?;
        debug!(id, upstream = self.upstream.name(), "catalog title lookup");
        Ok(self.upstream.fetch(&path, &[]).await?)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use std::sync::Mutex;

    use cinedex_core::pagination::PageError;
    use cinedex_core::types::PageField;
    use serde_json::{Value, json};

    use super::*;
    use crate::TransportError;

    /// Serves one canned response and records every call.
    struct FakeUpstream {
        response: Result<Value, TransportError>,
        calls: Mutex<Vec<(String, Vec<(String, String)>)>>,
    }

    impl FakeUpstream {
        fn ok(body: Value) -> Arc<Self> {
            Arc::new(Self {
                response: Ok(body),
                calls: Mutex::new(Vec::new()),
            })
        }

        fn failing(err: TransportError) -> Arc<Self> {
            Arc::new(Self {
                response: Err(err),
                calls: Mutex::new(Vec::new()),
            })
        }

        fn calls(&self) -> Vec<(String, Vec<(String, String)>)> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait::async_trait]
    impl Upstream for FakeUpstream {
        fn name(&self) -> &str {
            "fake"
        }

        async fn fetch(
            &self,
            path: &str,
            query: &[(String, String)],
        ) -> Result<Value, TransportError> {
            self.calls
                .lock()
                .unwrap()
                .push((path.to_string(), query.to_vec()));
            self.response.clone()
        }
    }

    fn pairs(items: &[(&str, &str)]) -> Vec<(String, String)> {
        items
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn upstream_paths_are_distinct() {
        let paths: HashSet<_> = Operation::ALL.iter().map(|op| op.upstream_path()).collect();
        assert_eq!(paths.len(), Operation::ALL.len());
        for op in Operation::ALL {
            assert!(op.upstream_path().ends_with(op.as_str()), "{op}");
        }
    }

    #[test]
    fn operation_serializes_as_route_name() {
        assert_eq!(
            serde_json::to_value(Operation::UpcomingReleases).unwrap(),
            json!("upcoming-releases")
        );
        assert_eq!(
            serde_json::to_value(Operation::Top250Tv).unwrap(),
            json!(Operation::Top250Tv.as_str())
        );
    }

    #[test]
    fn title_path_appends_identifier() {
        assert_eq!(title_path("tt1234567").unwrap(), "/api/imdb/tt1234567");
    }

    #[test]
    fn title_path_rejects_escaping_identifiers() {
        for bad in ["", "../genres", "tt1?x=1", "tt1#frag"] {
            assert_eq!(
                title_path(bad),
                Err(CatalogError::InvalidIdentifier(bad.to_string()))
            );
        }
    }

    #[tokio::test]
    async fn list_windows_results_payload() {
        let fake = FakeUpstream::ok(json!({"results": ["A", "B", "C", "D", "E"]}));
        let catalog = Catalog::new(fake.clone());

        let env = catalog
            .list(Operation::Top250Movies, pairs(&[("limit", "2"), ("offset", "1")]))
            .await
            .unwrap();

        assert_eq!(env.total, 5);
        assert_eq!(env.offset, 1);
        assert_eq!(env.limit, 2);
        assert_eq!(env.data, vec![json!("B"), json!("C")]);
        assert_eq!(
            fake.calls(),
            vec![("/api/imdb/top250-movies".to_string(), Vec::<(String, String)>::new())]
        );
    }

    #[tokio::test]
    async fn list_forwards_filters_without_page_keys() {
        let fake = FakeUpstream::ok(json!([]));
        let catalog = Catalog::new(fake.clone());

        catalog
            .list(
                Operation::Search,
                pairs(&[
                    ("type", "movie"),
                    ("limit", "5"),
                    ("genre", "Drama"),
                    ("rows", "25"),
                    ("sortField", "id"),
                    ("sortOrder", "ASC"),
                ]),
            )
            .await
            .unwrap();

        let calls = fake.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0, "/api/imdb/search");
        assert_eq!(
            calls[0].1,
            pairs(&[
                ("type", "movie"),
                ("genre", "Drama"),
                ("rows", "25"),
                ("sortField", "id"),
                ("sortOrder", "ASC"),
            ])
        );
    }

    #[tokio::test]
    async fn list_uses_defaults() {
        let items: Vec<Value> = (0..15).map(|i| json!({"id": i})).collect();
        let fake = FakeUpstream::ok(json!({"titles": items}));
        let catalog = Catalog::new(fake);

        let env = catalog.list(Operation::Genres, Vec::new()).await.unwrap();
        assert_eq!(env.total, 15);
        assert_eq!(env.limit, 10);
        assert_eq!(env.offset, 0);
        assert_eq!(env.data.len(), 10);
        assert_eq!(env.data[0]["id"], 0);
    }

    #[tokio::test]
    async fn list_unrecognized_shape_is_empty_envelope() {
        let fake = FakeUpstream::ok(json!("unexpected"));
        let env = Catalog::new(fake)
            .list(Operation::Countries, Vec::new())
            .await
            .unwrap();
        assert_eq!(env.total, 0);
        assert!(env.data.is_empty());
    }

    #[tokio::test]
    async fn invalid_page_rejected_before_fetch() {
        let fake = FakeUpstream::ok(json!([]));
        let catalog = Catalog::new(fake.clone());

        let err = catalog
            .list(Operation::MostPopularTv, pairs(&[("offset", "-3")]))
            .await
            .unwrap_err();

        assert_eq!(
            err,
            CatalogError::Validation(PageError::Negative {
                field: PageField::Offset,
                value: "-3".into()
            })
        );
        assert!(fake.calls().is_empty());
    }

    #[tokio::test]
    async fn transport_failure_propagates() {
        let fake = FakeUpstream::failing(TransportError::Status(500));
        let err = Catalog::new(fake)
            .list(Operation::MostPopularMovies, Vec::new())
            .await
            .unwrap_err();
        assert_eq!(err, CatalogError::Transport(TransportError::Status(500)));
    }

    #[tokio::test]
    async fn title_passes_body_through() {
        let body = json!({
            "id": "tt1234567",
            "results": ["not", "a", "list", "to", "page"],
            "primaryTitle": "Example"
        });
        let fake = FakeUpstream::ok(body.clone());
        let catalog = Catalog::new(fake.clone());

        let out = catalog.title("tt1234567").await.unwrap();
        assert_eq!(out, body);
        assert_eq!(
            fake.calls(),
            vec![("/api/imdb/tt1234567".to_string(), Vec::<(String, String)>::new())]
        );
    }

    #[tokio::test]
    async fn title_transport_failure_propagates() {
        let fake = FakeUpstream::failing(TransportError::Timeout);
        let err = Catalog::new(fake).title("tt1").await.unwrap_err();
        assert_eq!(err, CatalogError::Transport(TransportError::Timeout));
    }
}
