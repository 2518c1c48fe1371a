//! Orchestrator — sequences extraction, transformation, and merge into one
//! finished document per invocation.
//!
//! Flow: Pending → Extracting → Transforming → Merging → Done, with Failed
//! terminal from any working stage. No retries across stages: a failure
//! aborts the whole invocation and the caller may re-invoke from scratch
//! (always safe — each run assigns fresh item identifiers and touches no
//! shared state).
//!
//! Within Extracting, independent calls run concurrently; the first failure
//! cancels the in-flight siblings (`try_join!` drops their futures). The
//! document is handed to the store only after Done — no partial writes.

use std::sync::Arc;

use serde::Deserialize;
use tracing::{debug, error, info};
use uuid::Uuid;

use crate::errors::PipelineError;
use crate::extraction::{self, MediaKind};
use crate::import;
use crate::import::linkedin::ProfilePayload;
use crate::llm_client::LlmClient;
use crate::merge::{self, MergePatch};
use crate::models::ResumeDocument;
use crate::tailor;

pub mod names;
pub mod store;

pub use store::{RecordMetadata, ResumeStore, StoredResume, Visibility};

// ────────────────────────────────────────────────────────────────────────────
// Stage machine
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Pending,
    Extracting,
    Transforming,
    Merging,
    Done,
    Failed,
}

impl Stage {
    /// Legal forward transitions. `Failed` is entered through
    /// [`PipelineRun::fail`], not through `advance`.
    pub fn can_advance_to(self, next: Stage) -> bool {
        matches!(
            (self, next),
            (Stage::Pending, Stage::Extracting)
                | (Stage::Extracting, Stage::Transforming)
                | (Stage::Transforming, Stage::Merging)
                | (Stage::Merging, Stage::Done)
        )
    }
}

/// Tracks one invocation through the stage machine, logging transitions.
struct PipelineRun {
    pipeline: &'static str,
    stage: Stage,
}

impl PipelineRun {
    fn new(pipeline: &'static str) -> Self {
        debug!("{pipeline}: pipeline invoked");
        PipelineRun {
            pipeline,
            stage: Stage::Pending,
        }
    }

    fn advance(&mut self, next: Stage) -> Result<(), PipelineError> {
        if !self.stage.can_advance_to(next) {
            return Err(PipelineError::Internal(anyhow::anyhow!(
                "{}: illegal stage transition {:?} -> {:?}",
                self.pipeline,
                self.stage,
                next
            )));
        }
        debug!("{}: {:?} -> {:?}", self.pipeline, self.stage, next);
        self.stage = next;
        Ok(())
    }

    fn fail(&mut self, err: &PipelineError) {
        error!(
            "{}: failed in stage {:?} [{}]: {err}",
            self.pipeline,
            self.stage,
            err.code()
        );
        self.stage = Stage::Failed;
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Request types
// ────────────────────────────────────────────────────────────────────────────

/// An uploaded source file: base64 content plus its declared media tag
/// (one of pdf, png, jpg, jpeg).
#[derive(Debug, Clone, Deserialize)]
pub struct FileImportRequest {
    pub data_base64: String,
    pub media_tag: String,
}

/// Tailor an existing resume against a job description. Which document id is
/// passed decides the baseline — re-tailoring an already tailored resume is
/// the caller's choice, not a pipeline concern.
#[derive(Debug, Clone, Deserialize)]
pub struct TailorRequest {
    pub existing_resume_id: Uuid,
    pub job_description: String,
    pub title: String,
    #[serde(default)]
    pub visibility: Visibility,
    #[serde(default)]
    pub slug: Option<String>,
}

/// Create an empty resume seeded with the caller's identity. No extraction.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateBlankRequest {
    pub title: String,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub picture_url: Option<String>,
    #[serde(default)]
    pub visibility: Visibility,
    #[serde(default)]
    pub slug: Option<String>,
}

// ────────────────────────────────────────────────────────────────────────────
// Pipeline
// ────────────────────────────────────────────────────────────────────────────

/// The import & tailoring pipeline. One instance serves all invocations;
/// each invocation owns its own run state and document.
#[derive(Clone)]
pub struct ImportPipeline {
    llm: LlmClient,
    store: Arc<dyn ResumeStore>,
}

impl ImportPipeline {
    pub fn new(llm: LlmClient, store: Arc<dyn ResumeStore>) -> Self {
        ImportPipeline { llm, store }
    }

    /// File import: binary source → draft → four slices → one document.
    pub async fn import_file(
        &self,
        owner_id: Uuid,
        request: FileImportRequest,
    ) -> Result<StoredResume, PipelineError> {
        // Cheap rejection before any provider call.
        let media = MediaKind::parse(&request.media_tag)?;

        let mut run = PipelineRun::new("file-import");
        let result = self.run_file_import(owner_id, &request, media, &mut run).await;
        if let Err(err) = &result {
            run.fail(err);
        }
        result
    }

    async fn run_file_import(
        &self,
        owner_id: Uuid,
        request: &FileImportRequest,
        media: MediaKind,
        run: &mut PipelineRun,
    ) -> Result<StoredResume, PipelineError> {
        run.advance(Stage::Extracting)?;
        let draft = extraction::draft_from_file(&self.llm, &request.data_base64, media).await?;
        let slices = extraction::extract_slices(&self.llm, &draft).await?;

        run.advance(Stage::Transforming)?;
        let patch = import::file::slices_to_patch(slices)?;

        let document = self.merge_into_default(run, patch)?;
        run.advance(Stage::Done)?;

        let title = format!("{} (File)", names::generate_random_name());
        self.persist(owner_id, document, title, Visibility::Private, None)
            .await
    }

    /// Profile import: the payload arrives pre-extracted from the enrichment
    /// service, so Extracting issues no provider call.
    pub async fn import_profile(
        &self,
        owner_id: Uuid,
        payload: ProfilePayload,
    ) -> Result<StoredResume, PipelineError> {
        let mut run = PipelineRun::new("profile-import");
        let result = self.run_profile_import(owner_id, &payload, &mut run).await;
        if let Err(err) = &result {
            run.fail(err);
        }
        result
    }

    async fn run_profile_import(
        &self,
        owner_id: Uuid,
        payload: &ProfilePayload,
        run: &mut PipelineRun,
    ) -> Result<StoredResume, PipelineError> {
        run.advance(Stage::Extracting)?;

        run.advance(Stage::Transforming)?;
        let patch = import::linkedin::profile_to_patch(payload)?;

        let document = self.merge_into_default(run, patch)?;
        run.advance(Stage::Done)?;

        let title = format!("{} (LinkedIn)", names::generate_random_name());
        self.persist(owner_id, document, title, Visibility::Private, None)
            .await
    }

    /// AI tailoring: five concurrent rewrites of an existing resume, merged
    /// back into that same document.
    pub async fn tailor(
        &self,
        owner_id: Uuid,
        request: TailorRequest,
    ) -> Result<StoredResume, PipelineError> {
        let mut run = PipelineRun::new("tailor");
        let result = self.run_tailor(owner_id, &request, &mut run).await;
        if let Err(err) = &result {
            run.fail(err);
        }
        result
    }

    async fn run_tailor(
        &self,
        owner_id: Uuid,
        request: &TailorRequest,
        run: &mut PipelineRun,
    ) -> Result<StoredResume, PipelineError> {
        // Source lookup happens before any extraction call is issued.
        let existing = self
            .store
            .find_document(owner_id, request.existing_resume_id)
            .await
            .map_err(PipelineError::Internal)?
            .ok_or_else(|| {
                PipelineError::SourceNotFound(request.existing_resume_id.to_string())
            })?;

        run.advance(Stage::Extracting)?;
        let outputs =
            tailor::run_extractions(&self.llm, &existing, &request.job_description).await?;

        run.advance(Stage::Transforming)?;
        let patch = tailor::assemble_patch(&existing, outputs)?;

        run.advance(Stage::Merging)?;
        let document = merge::apply(&existing, patch)?;
        run.advance(Stage::Done)?;

        let title = format!("{} (AI)", request.title);
        let slug = request
            .slug
            .clone()
            .unwrap_or_else(|| names::kebab_case(&request.title));
        self.persist(owner_id, document, title, request.visibility, Some(slug))
            .await
    }

    /// Blank resume seeded with the caller's identity — exercises the merge
    /// engine with a hand-built patch, no extraction.
    pub async fn create_blank(
        &self,
        owner_id: Uuid,
        request: CreateBlankRequest,
    ) -> Result<StoredResume, PipelineError> {
        let mut run = PipelineRun::new("create-blank");
        let result = self.run_create_blank(owner_id, &request, &mut run).await;
        if let Err(err) = &result {
            run.fail(err);
        }
        result
    }

    async fn run_create_blank(
        &self,
        owner_id: Uuid,
        request: &CreateBlankRequest,
        run: &mut PipelineRun,
    ) -> Result<StoredResume, PipelineError> {
        run.advance(Stage::Extracting)?;
        run.advance(Stage::Transforming)?;
        let patch = MergePatch::new(serde_json::json!({
            "basics": {
                "name": request.name,
                "email": request.email,
                "picture": { "url": request.picture_url.clone().unwrap_or_default() },
            }
        }))?;

        let document = self.merge_into_default(run, patch)?;
        run.advance(Stage::Done)?;

        self.persist(
            owner_id,
            document,
            request.title.clone(),
            request.visibility,
            request.slug.clone(),
        )
        .await
    }

    fn merge_into_default(
        &self,
        run: &mut PipelineRun,
        patch: MergePatch,
    ) -> Result<ResumeDocument, PipelineError> {
        run.advance(Stage::Merging)?;
        merge::apply(&ResumeDocument::default(), patch)
    }

    async fn persist(
        &self,
        owner_id: Uuid,
        document: ResumeDocument,
        title: String,
        visibility: Visibility,
        slug: Option<String>,
    ) -> Result<StoredResume, PipelineError> {
        let slug = slug.unwrap_or_else(|| names::kebab_case(&title));
        let stored = self
            .store
            .create_record(
                owner_id,
                document,
                RecordMetadata {
                    title: title.clone(),
                    slug,
                    visibility,
                },
            )
            .await
            .map_err(PipelineError::Internal)?;

        info!("Stored resume {} ({title}) for owner {owner_id}", stored.id);
        Ok(stored)
    }
}
