use crate::document::*;
use crate::error::*;
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::fmt;
use tokio::sync::Mutex;

/// Opaque bearer credential issued by the authentication service.
///
/// The token is attached to every store call as-is; it is never parsed, and its `Debug` output is
/// redacted.
#[derive(Clone, PartialEq, Eq)]
pub struct AuthToken(String);

impl AuthToken {
    #[inline]
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for AuthToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AuthToken(***)")
    }
}

/// Persistence boundary for range documents.
///
/// Calls are awaited to completion; implementations do not retry.
#[async_trait]
pub trait RangeStore: Send + Sync {
    /// Stores a new document and returns the identity assigned to it.
    async fn create(&self, token: &AuthToken, document: &RangeDocument) -> RangeResult<String>;

    /// Lists the documents visible to the token's owner.
    async fn list(&self, token: &AuthToken) -> RangeResult<Vec<RangeSummary>>;

    /// Fetches one document by identity.
    async fn fetch(&self, token: &AuthToken, id: &str) -> RangeResult<StoredRange>;
}

/// In-process [`RangeStore`] keeping documents in memory.
///
/// Identities are sequential 24-digit hexadecimal strings. Every call requires a non-empty token.
#[derive(Default)]
pub struct MemoryRangeStore {
    inner: Mutex<MemoryInner>,
}

#[derive(Default)]
struct MemoryInner {
    next_id: u64,
    documents: BTreeMap<String, RangeDocument>,
}

impl MemoryRangeStore {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of stored documents.
    pub async fn len(&self) -> usize {
        self.inner.lock().await.documents.len()
    }

    /// Returns whether the store holds no documents.
    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    /// Inserts a document under a caller-chosen identity, replacing any previous one.
    pub async fn insert(&self, id: impl Into<String>, document: RangeDocument) {
        self.inner.lock().await.documents.insert(id.into(), document);
    }
}

#[inline]
fn authorize(token: &AuthToken) -> RangeResult<()> {
    if token.is_empty() {
        Err(RangeError::Network("401 Unauthorized".to_string()))
    } else {
        Ok(())
    }
}

#[async_trait]
impl RangeStore for MemoryRangeStore {
    async fn create(&self, token: &AuthToken, document: &RangeDocument) -> RangeResult<String> {
        authorize(token)?;
        let mut inner = self.inner.lock().await;
        inner.next_id += 1;
        let id = format!("{:024x}", inner.next_id);
        inner.documents.insert(id.clone(), document.clone());
        Ok(id)
    }

    async fn list(&self, token: &AuthToken) -> RangeResult<Vec<RangeSummary>> {
        authorize(token)?;
        let inner = self.inner.lock().await;
        Ok(inner
            .documents
            .iter()
            .map(|(id, document)| document.summary(id.as_str()))
            .collect())
    }

    async fn fetch(&self, token: &AuthToken, id: &str) -> RangeResult<StoredRange> {
        authorize(token)?;
        let inner = self.inner.lock().await;
        inner
            .documents
            .get(id)
            .map(|document| StoredRange {
                id: id.to_string(),
                document: document.clone(),
            })
            .ok_or_else(|| RangeError::NotFound(id.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::*;

    fn document(name: &str) -> RangeDocument {
        RangeDocument::assemble(
            name,
            Position::Utg,
            100,
            ActionSequence::default(),
            RangeChart::new(),
        )
        .unwrap()
    }

    #[test]
    fn test_token_debug_is_redacted() {
        let token = AuthToken::new("secret.jwt.value");
        assert_eq!(format!("{token:?}"), "AuthToken(***)");
        assert_eq!(token.as_str(), "secret.jwt.value");
    }

    #[tokio::test]
    async fn test_memory_store() {
        let store = MemoryRangeStore::new();
        let token = AuthToken::new("t");

        let first = store.create(&token, &document("first")).await.unwrap();
        let second = store.create(&token, &document("second")).await.unwrap();
        assert_ne!(first, second);
        assert_eq!(first.len(), 24);

        let names = store
            .list(&token)
            .await
            .unwrap()
            .into_iter()
            .map(|s| s.name)
            .collect::<Vec<_>>();
        assert_eq!(names, vec!["first", "second"]);

        let stored = store.fetch(&token, &second).await.unwrap();
        assert_eq!(stored.id, second);
        assert_eq!(stored.document.name, "second");

        assert!(matches!(
            store.fetch(&token, "missing").await,
            Err(RangeError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_memory_store_requires_token() {
        let store = MemoryRangeStore::new();
        let token = AuthToken::new("");

        assert!(matches!(
            store.create(&token, &document("x")).await,
            Err(RangeError::Network(_))
        ));
        assert!(store.list(&token).await.is_err());
        assert!(store.is_empty().await);
    }
}
