//! Consumed persistence boundary.
//!
//! The record store lives outside this crate. The pipeline hands over one
//! finished document after a successful run and looks up the source document
//! for tailoring; it never assigns storage identifiers.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::ResumeDocument;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    Private,
    Public,
}

impl Default for Visibility {
    fn default() -> Self {
        Visibility::Private
    }
}

/// Record metadata supplied alongside the document content.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordMetadata {
    pub title: String,
    pub slug: String,
    pub visibility: Visibility,
}

/// A stored record as the store reports it back. The `id` is assigned by the
/// store, never by the pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredResume {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub title: String,
    pub slug: String,
    pub visibility: Visibility,
    pub document: ResumeDocument,
    pub created_at: DateTime<Utc>,
}

/// The record store boundary. Implemented by the embedding server.
#[async_trait]
pub trait ResumeStore: Send + Sync {
    async fn create_record(
        &self,
        owner_id: Uuid,
        document: ResumeDocument,
        metadata: RecordMetadata,
    ) -> anyhow::Result<StoredResume>;

    /// Document lookup scoped to the owner: a record another user owns is
    /// reported as absent, not as forbidden.
    async fn find_document(
        &self,
        owner_id: Uuid,
        id: Uuid,
    ) -> anyhow::Result<Option<ResumeDocument>>;
}
