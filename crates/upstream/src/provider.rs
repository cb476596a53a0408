use crate::TransportError;

/// Raw access to the metadata provider.
///
/// One call is one outbound GET. Implementations never retry.
#[async_trait::async_trait]
pub trait Upstream: Send + Sync {
    fn name(&self) -> &str;

    /// Fetch `path` with `query` appended and return the decoded JSON body.
    async fn fetch(
        &self,
        path: &str,
        query: &[(String, String)],
    ) -> Result<serde_json::Value, TransportError>;
}
