//! Workflow definitions and mapping validation.
//!
//! The workflow collaborator supplies an ordered list of [`WorkflowStep`]s;
//! [`validate`] checks the aggregated [`MappingSet`] against them before any
//! payload is built. Validation is a pure function of its inputs, applies
//! its rules in order, and stops at the first violation.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result, ValidationCode};
use crate::mapping::MappingSet;

/// Revenue-code section governing one workflow step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SectionCode {
    /// Section 9 — e-stamp duty
    #[serde(rename = "9")]
    StampDuty,
    /// Sections 26 and 28 — contract execution
    #[serde(rename = "26,28")]
    ContractExecution,
}

impl SectionCode {
    /// The stable wire form of this section code.
    pub fn as_str(&self) -> &'static str {
        match self {
            SectionCode::StampDuty => "9",
            SectionCode::ContractExecution => "26,28",
        }
    }
}

/// What a participant does at one workflow step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StepAction {
    /// Signs the document
    Signer,
    /// Approves without signing
    Approver,
}

/// The contract variant of a submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContractVariant {
    /// Business to business
    B2b,
    /// Business to consumer
    B2c,
}

/// One party acting at a workflow step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Participant {
    /// Display name
    pub name: String,
    /// Contact email, if known
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Tax identifier, if known
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tax_id: Option<String>,
}

/// One approval/signing stage of the workflow. Consumed read-only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkflowStep {
    /// Ordered step index, as the backend's string form
    #[serde(rename = "flow_index")]
    pub index: String,
    /// Governing section code
    pub section: SectionCode,
    /// Step action
    pub action: StepAction,
    /// Participating entities
    pub participants: Vec<Participant>,
}

impl WorkflowStep {
    /// Create a step with no participants.
    pub fn new(index: impl Into<String>, section: SectionCode, action: StepAction) -> Self {
        Self {
            index: index.into(),
            section,
            action,
            participants: Vec::new(),
        }
    }

    /// Add a named participant.
    pub fn with_participant(mut self, name: impl Into<String>) -> Self {
        self.participants.push(Participant {
            name: name.into(),
            email: None,
            tax_id: None,
        });
        self
    }
}

/// Toggles for rules that are defined but not enforced by default.
///
/// The per-step e-seal presence check exists in the backend contract but is
/// not enforced by the reference behavior; it is surfaced here as an
/// explicit policy rather than silently dropped or silently enabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ValidationPolicy {
    /// Require an e-seal mapping on every stamp-duty signer step.
    pub require_eseal_per_step: bool,
}

/// Proof that a mapping set passed validation.
///
/// [`crate::submission::assemble`] demands one, so assembly cannot run
/// before — or without — a successful [`validate`] call.
#[derive(Debug)]
pub struct Validated(pub(crate) ());

/// Validate the aggregated mappings against the workflow definition.
///
/// Rules, first failure wins:
/// 1. every contract-execution signer step needs at least one signature
///    entry bound to its index;
/// 2. for B2C, the first step needs at least one entry of any category;
/// 3. (policy-gated) every stamp-duty signer step needs an e-seal entry.
pub fn validate(
    mappings: &MappingSet,
    steps: &[WorkflowStep],
    variant: ContractVariant,
    policy: &ValidationPolicy,
) -> Result<Validated> {
    for step in steps {
        if step.section == SectionCode::ContractExecution
            && step.action == StepAction::Signer
            && !mappings.has_signature_for_step(&step.index)
        {
            return Err(Error::validation(
                ValidationCode::FlowDataMissingSignature,
                format!("signing step {} has no signature field assigned", step.index),
            ));
        }
    }

    if variant == ContractVariant::B2c {
        if let Some(first) = steps.first() {
            if !mappings.has_any_for_step(&first.index) {
                return Err(Error::validation(
                    ValidationCode::FlowDataMissingSignature,
                    format!("first step {} has no field assigned", first.index),
                ));
            }
        }
    }

    if policy.require_eseal_per_step {
        for step in steps {
            if step.section == SectionCode::StampDuty
                && step.action == StepAction::Signer
                && !mappings.has_eseal_for_step(&step.index)
            {
                return Err(Error::validation(
                    ValidationCode::FlowDataMissingEseal,
                    format!("stamp-duty step {} has no e-seal field assigned", step.index),
                ));
            }
        }
    }

    Ok(Validated(()))
}
