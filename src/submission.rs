//! Submission payload assembly.
//!
//! [`assemble`] is the last stage of the pipeline and the crate's only
//! asynchronous operation: reading and base64-encoding the source document.
//! It demands a [`Validated`] token, so it cannot run unless [`validate`]
//! succeeded on the same inputs, and the returned payload is never mutated
//! after construction — abandoning a submission means discarding the result,
//! not interrupting the encode.
//!
//! [`validate`]: crate::workflow::validate

use std::path::PathBuf;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::mapping::MappingSet;
use crate::workflow::{ContractVariant, Validated, WorkflowStep};

/// Payment channel of an e-stamp submission, wire-encoded as "1"/"2"/"3".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentChannel {
    /// Paid through the platform
    #[serde(rename = "1")]
    Internal,
    /// Paid through an external channel
    #[serde(rename = "2")]
    External,
    /// No payment involved
    #[serde(rename = "3")]
    NonPayment,
}

impl PaymentChannel {
    /// Derive the channel from a free-text label.
    ///
    /// Labels are matched case-insensitively on "internal"/"external";
    /// anything else, including an empty label, is non-payment.
    pub fn from_label(label: &str) -> Self {
        let lowered = label.trim().to_lowercase();
        if lowered.contains("internal") {
            PaymentChannel::Internal
        } else if lowered.contains("external") {
            PaymentChannel::External
        } else {
            PaymentChannel::NonPayment
        }
    }
}

/// Counterparty identity for B2B submissions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PartyDetails {
    /// Counterparty tax identifier
    pub counterparty_tax_id: String,
    /// Operator acting on behalf of the submitting party
    pub operator: String,
}

/// The source PDF to embed into the submission.
#[derive(Debug, Clone, PartialEq)]
pub enum SourceDocument {
    /// Read from disk at assembly time
    Path {
        /// File name reported to the backend
        name: String,
        /// Location on disk
        path: PathBuf,
    },
    /// Already in memory
    Bytes {
        /// File name reported to the backend
        name: String,
        /// Raw PDF bytes
        bytes: Vec<u8>,
    },
}

impl SourceDocument {
    /// Reference a document on disk. The reported name is the file name.
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "document.pdf".to_string());
        SourceDocument::Path { name, path }
    }

    /// Wrap in-memory document bytes.
    pub fn from_bytes(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        SourceDocument::Bytes {
            name: name.into(),
            bytes,
        }
    }

    /// The file name reported to the backend.
    pub fn name(&self) -> &str {
        match self {
            SourceDocument::Path { name, .. } | SourceDocument::Bytes { name, .. } => name,
        }
    }

    /// Load the raw bytes. The single suspension point of the pipeline.
    async fn read(&self) -> Result<Vec<u8>> {
        match self {
            SourceDocument::Path { path, .. } => Ok(tokio::fs::read(path).await?),
            SourceDocument::Bytes { bytes, .. } => Ok(bytes.clone()),
        }
    }
}

/// The finished structure handed to the transport layer.
///
/// Field names are the backend's stable wire contract; `mapping_stamp` is
/// always emitted empty while aggregated e-seal entries travel in
/// `mapping_eseal`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmissionPayload {
    /// Template document type identifier
    pub doc_type_id: String,
    /// Base64-encoded source document
    pub pdf_base64: String,
    /// Source document file name
    pub pdf_name: String,
    /// Contract variant
    pub contract_type: ContractVariant,
    /// Payment channel
    pub estamp_payment: PaymentChannel,
    /// The nine category mapping arrays
    #[serde(flatten)]
    pub mappings: MappingSet,
    /// Ordered workflow steps
    pub flow_data: Vec<WorkflowStep>,
    /// Counterparty tax identifier (B2B only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub counterparty_tax_id: Option<String>,
    /// Operator identity (B2B only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub operator: Option<String>,
}

/// Build the submission payload. Only callable with a [`Validated`] token.
///
/// The source document is read and encoded exactly once; an unreadable or
/// empty document rejects the whole assembly with no partial payload.
#[allow(clippy::too_many_arguments)]
pub async fn assemble(
    document: &SourceDocument,
    doc_type_id: &str,
    mut mappings: MappingSet,
    steps: &[WorkflowStep],
    variant: ContractVariant,
    party: Option<&PartyDetails>,
    payment_label: &str,
    _proof: Validated,
) -> Result<SubmissionPayload> {
    let party = match variant {
        ContractVariant::B2b => Some(party.ok_or(Error::MissingPartyDetails)?),
        ContractVariant::B2c => None,
    };

    let bytes = document.read().await?;
    if bytes.is_empty() {
        return Err(Error::EmptyDocument(document.name().to_string()));
    }
    debug!(
        "assembling {} submission: {} bytes, {} mapping entries, {} steps",
        match variant {
            ContractVariant::B2b => "b2b",
            ContractVariant::B2c => "b2c",
        },
        bytes.len(),
        mappings.len(),
        steps.len()
    );

    // the editor's stamp category has no backend slot; aggregated e-seal
    // entries travel in mapping_eseal instead
    mappings.stamp.clear();

    Ok(SubmissionPayload {
        doc_type_id: doc_type_id.to_string(),
        pdf_base64: BASE64.encode(&bytes),
        pdf_name: document.name().to_string(),
        contract_type: variant,
        estamp_payment: PaymentChannel::from_label(payment_label),
        mappings,
        flow_data: steps.to_vec(),
        counterparty_tax_id: party.map(|p| p.counterparty_tax_id.clone()),
        operator: party.map(|p| p.operator.clone()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::{FieldElement, FieldKind};
    use crate::geometry::Rect;
    use crate::mapping::build_mappings;
    use crate::workflow::{validate, SectionCode, StepAction, ValidationPolicy};

    fn sample_steps() -> Vec<WorkflowStep> {
        vec![WorkflowStep::new("0", SectionCode::StampDuty, StepAction::Signer)
            .with_participant("Acme Ltd")]
    }

    fn validated_mappings(steps: &[WorkflowStep]) -> (MappingSet, Validated) {
        let fields = vec![
            FieldElement::new("s1", FieldKind::Signature, 0, Rect::default()).with_step("0"),
        ];
        let mappings = build_mappings(&fields, false, &[]);
        let proof = validate(&mappings, steps, ContractVariant::B2c, &ValidationPolicy::default())
            .unwrap();
        (mappings, proof)
    }

    #[test]
    fn test_payment_channel_from_label() {
        assert_eq!(PaymentChannel::from_label("Internal wallet"), PaymentChannel::Internal);
        assert_eq!(PaymentChannel::from_label("EXTERNAL bank"), PaymentChannel::External);
        assert_eq!(PaymentChannel::from_label("cash"), PaymentChannel::NonPayment);
        assert_eq!(PaymentChannel::from_label(""), PaymentChannel::NonPayment);
    }

    #[test]
    fn test_payment_channel_wire_encoding() {
        assert_eq!(serde_json::to_value(PaymentChannel::Internal).unwrap(), "1");
        assert_eq!(serde_json::to_value(PaymentChannel::External).unwrap(), "2");
        assert_eq!(serde_json::to_value(PaymentChannel::NonPayment).unwrap(), "3");
    }

    #[tokio::test]
    async fn test_assemble_b2c_from_bytes() {
        let steps = sample_steps();
        let (mappings, proof) = validated_mappings(&steps);
        let doc = SourceDocument::from_bytes("contract.pdf", b"%PDF-1.7 fake".to_vec());

        let payload = assemble(
            &doc,
            "dt-1",
            mappings,
            &steps,
            ContractVariant::B2c,
            None,
            "internal",
            proof,
        )
        .await
        .unwrap();

        assert_eq!(payload.pdf_name, "contract.pdf");
        assert_eq!(payload.pdf_base64, BASE64.encode(b"%PDF-1.7 fake"));
        assert_eq!(payload.contract_type, ContractVariant::B2c);
        assert_eq!(payload.estamp_payment, PaymentChannel::Internal);
        assert!(payload.counterparty_tax_id.is_none());
        assert!(payload.operator.is_none());
        assert_eq!(payload.mappings.signature.len(), 1);
    }

    #[tokio::test]
    async fn test_assemble_b2b_requires_party_details() {
        let steps = sample_steps();
        let (mappings, proof) = validated_mappings(&steps);
        let doc = SourceDocument::from_bytes("contract.pdf", b"%PDF".to_vec());

        let err = assemble(
            &doc,
            "dt-1",
            mappings,
            &steps,
            ContractVariant::B2b,
            None,
            "internal",
            proof,
        )
        .await
        .unwrap_err();
        assert!(matches!(err, Error::MissingPartyDetails));
    }

    #[tokio::test]
    async fn test_assemble_b2b_embeds_party_details() {
        let steps = sample_steps();
        let (mappings, proof) = validated_mappings(&steps);
        let doc = SourceDocument::from_bytes("contract.pdf", b"%PDF".to_vec());
        let party = PartyDetails {
            counterparty_tax_id: "0105551234567".to_string(),
            operator: "somchai@acme.co.th".to_string(),
        };

        let payload = assemble(
            &doc,
            "dt-1",
            mappings,
            &steps,
            ContractVariant::B2b,
            Some(&party),
            "external",
            proof,
        )
        .await
        .unwrap();
        assert_eq!(payload.counterparty_tax_id.as_deref(), Some("0105551234567"));
        assert_eq!(payload.operator.as_deref(), Some("somchai@acme.co.th"));
        assert_eq!(payload.estamp_payment, PaymentChannel::External);
    }

    #[tokio::test]
    async fn test_assemble_rejects_empty_document() {
        let steps = sample_steps();
        let (mappings, proof) = validated_mappings(&steps);
        let doc = SourceDocument::from_bytes("empty.pdf", Vec::new());

        let err = assemble(
            &doc,
            "dt-1",
            mappings,
            &steps,
            ContractVariant::B2c,
            None,
            "",
            proof,
        )
        .await
        .unwrap_err();
        assert!(matches!(err, Error::EmptyDocument(name) if name == "empty.pdf"));
    }

    #[tokio::test]
    async fn test_stamp_bucket_always_emitted_empty() {
        let steps = sample_steps();
        let fields = vec![
            FieldElement::new("s1", FieldKind::Signature, 0, Rect::default()).with_step("0"),
            FieldElement::new("st1", FieldKind::Stamp, 0, Rect::default()).with_step("0"),
            FieldElement::new("e1", FieldKind::Eseal, 0, Rect::default()).with_step("0"),
        ];
        let mappings = build_mappings(&fields, false, &[]);
        assert_eq!(mappings.stamp.len(), 1);
        let proof = validate(&mappings, &steps, ContractVariant::B2c, &ValidationPolicy::default())
            .unwrap();

        let doc = SourceDocument::from_bytes("contract.pdf", b"%PDF".to_vec());
        let payload = assemble(
            &doc,
            "dt-1",
            mappings,
            &steps,
            ContractVariant::B2c,
            None,
            "",
            proof,
        )
        .await
        .unwrap();
        assert!(payload.mappings.stamp.is_empty());
        assert_eq!(payload.mappings.eseal.len(), 1);
    }

    #[tokio::test]
    async fn test_payload_wire_keys() {
        let steps = sample_steps();
        let (mappings, proof) = validated_mappings(&steps);
        let doc = SourceDocument::from_bytes("contract.pdf", b"%PDF".to_vec());
        let payload = assemble(
            &doc,
            "dt-9",
            mappings,
            &steps,
            ContractVariant::B2c,
            None,
            "",
            proof,
        )
        .await
        .unwrap();

        let json = serde_json::to_value(&payload).unwrap();
        for key in [
            "doc_type_id",
            "pdf_base64",
            "pdf_name",
            "contract_type",
            "estamp_payment",
            "flow_data",
            "mapping_text",
            "mapping_signature",
            "mapping_eseal",
        ] {
            assert!(json.get(key).is_some(), "missing wire key {key}");
        }
        assert_eq!(json["contract_type"], "b2c");
        assert_eq!(json["flow_data"][0]["flow_index"], "0");
        assert_eq!(json["flow_data"][0]["section"], "9");
        assert_eq!(json["flow_data"][0]["action"], "signer");
        // b2c payloads omit the b2b-only keys entirely
        assert!(json.get("counterparty_tax_id").is_none());
    }

    #[test]
    fn test_source_document_name_from_path() {
        let doc = SourceDocument::from_path("/tmp/deals/contract-final.pdf");
        assert_eq!(doc.name(), "contract-final.pdf");
    }
}
