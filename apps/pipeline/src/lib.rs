//! Resume import & tailoring pipeline.
//!
//! Turns unstructured career data — a PDF/image upload, a scraped LinkedIn
//! profile, or an existing resume plus a job description — into one canonical,
//! fully-populated [`models::ResumeDocument`].
//!
//! Flow: extraction (LLM fan-out) → source transformer → deep merge into the
//! canonical default (or the existing document) → hand-off to the store.
//! The HTTP, persistence, and rendering layers live outside this crate and
//! plug in through [`pipeline::ResumeStore`] and the request types on
//! [`pipeline::ImportPipeline`].

pub mod config;
pub mod errors;
pub mod extraction;
pub mod import;
pub mod llm_client;
pub mod merge;
pub mod models;
pub mod pipeline;
pub mod tailor;
pub mod telemetry;
