// Allow some clippy lints that are too pedantic for this project
#![allow(clippy::too_many_arguments)]
#![allow(clippy::match_like_matches_macro)]

//! # signfield
//!
//! The field-mapping and submission-assembly engine behind a PDF
//! signing-template editor: a user overlays interactive fields (text,
//! signature, date, checkbox, radio, select, stamp, attached-file,
//! doc-number, e-seal) onto rendered pages, assigns each to a step of a
//! multi-party approval workflow, and submits the result to the e-stamp /
//! e-contract backend.
//!
//! This crate is the part between "what the user drew" and "what gets
//! sent":
//!
//! - **Style resolution** ([`style`]): fold a chain of partial overrides,
//!   computed snapshots and per-kind defaults into one complete style —
//!   total, never failing.
//! - **Composite dates** ([`composite`]): one date field projects into
//!   three positioned day/month/year sub-inputs with derived identifiers.
//! - **Wire conversion** ([`style::wire`]): numeric values become unit-free
//!   numeric strings, keys are renamed to the backend contract, gaps fall
//!   back to defaults.
//! - **Aggregation** ([`mapping`]): every placed field lands in exactly one
//!   of nine category buckets, fanned out per workflow step.
//! - **Validation** ([`workflow`]): workflow invariants checked before any
//!   payload exists, surfaced as stable (code, message) pairs.
//! - **Assembly** ([`submission`]): the final payload, with the source
//!   document base64-embedded — the crate's single async operation.
//!
//! PDF rendering, drag/resize input, state containers and the transport
//! layer are external collaborators; this crate is pure data
//! transformation plus that one document read.
//!
//! ## Quick Start
//!
//! ```no_run
//! use signfield::field::{FieldElement, FieldKind};
//! use signfield::geometry::Rect;
//! use signfield::mapping::build_mappings;
//! use signfield::submission::{assemble, SourceDocument};
//! use signfield::workflow::{
//!     validate, ContractVariant, SectionCode, StepAction, ValidationPolicy, WorkflowStep,
//! };
//!
//! # async fn submit() -> signfield::Result<()> {
//! let fields = vec![
//!     FieldElement::new("sig_1", FieldKind::Signature, 0, Rect::new(80.0, 600.0, 140.0, 60.0))
//!         .with_step("0"),
//! ];
//! let steps = vec![WorkflowStep::new("0", SectionCode::StampDuty, StepAction::Signer)];
//!
//! let mappings = build_mappings(&fields, false, &[]);
//! let proof = validate(&mappings, &steps, ContractVariant::B2c, &ValidationPolicy::default())?;
//! let doc = SourceDocument::from_path("lease.pdf");
//! let payload = assemble(
//!     &doc, "doc-type-9", mappings, &steps, ContractVariant::B2c, None, "internal", proof,
//! )
//! .await?;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

// Error handling
pub mod error;

// Primitives
pub mod geometry;

// Field model and per-kind defaults
pub mod field;
pub mod registry;

// Style resolution and transport encoding
pub mod style;

// Composite date fields
pub mod composite;

// Aggregation, validation, assembly
pub mod mapping;
pub mod submission;
pub mod workflow;

// Re-exports
pub use error::{Error, Result, ValidationCode};
pub use field::{FieldElement, FieldKind, FieldValue, StepAssignment};
pub use mapping::{build_mappings, MappingSet};
pub use style::{dynamic_size, resolve, ResolvedStyle, StyleLayer};
pub use submission::{assemble, SourceDocument, SubmissionPayload};
pub use workflow::{validate, ContractVariant, ValidationPolicy, WorkflowStep};

// Version info
/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
