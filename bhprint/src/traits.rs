// Copyright (C) 2020-2026  The Blockhouse Technology Limited (TBTL).
//
// This program is free software: you can redistribute it and/or modify it
// under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or (at your
// option) any later version.
//
// This program is distributed in the hope that it will be useful, but
// WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU Affero General Public
// License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

//! Seams for the external collaborators of the card generation pipeline.
//!
//! The pipeline owns none of the heavy machinery: record retrieval, schema
//! storage, template processing, PDF rendering, QR encoding, biometric
//! decoding and audit delivery all live behind the traits in this module.
//! [`crate::http`] ships HTTP implementations for the two transport seams;
//! everything else is deployment specific.
//!
//! The traits are object safe so that a [`PrintPipeline`] can hold them as
//! trait objects; their methods therefore return [`bherror::ErrorDyn`]
//! instead of an associated error type.  The pipeline performs a single
//! synchronous call chain per request, so all methods are blocking -- a
//! caller wishing to bound latency must impose it inside the collaborator.
//!
//! [`PrintPipeline`]: crate::pipeline::PrintPipeline

use crate::{
    audit::AuditEvent,
    models::{AttributeSet, IdentityResponse},
};

/// Result type returned by collaborator seams.
pub type CollaboratorResult<T> = std::result::Result<T, bherror::ErrorDyn>;

/// Resolves registration identifiers to unique identification numbers.
pub trait RegistrationStatusStore: Send + Sync {
    /// Returns the UIN the given RID resolves to, or [`None`] if the RID is
    /// unknown.
    fn uin_for_rid(&self, rid: &str) -> CollaboratorResult<Option<String>>;
}

/// Retrieves the authoritative identity record for a subject.
pub trait IdentityRepository: Send + Sync {
    /// Fetches the full identity record (demographics and documents) for the
    /// given UIN.
    ///
    /// Lookup misses are modelled by an [`IdentityResponse`] with an empty
    /// payload, which the pipeline reports as
    /// [`UpstreamEmptyResponse`][crate::PrintError::UpstreamEmptyResponse].
    fn fetch_identity(&self, uin: &str) -> CollaboratorResult<IdentityResponse>;
}

/// Serves the deployment-specific mapping schema configuration.
pub trait MappingSchemaSource: Send + Sync {
    /// Returns the raw mapping schema JSON document.
    fn fetch_schema(&self) -> CollaboratorResult<String>;
}

/// Renders a named card template against an attribute set.
pub trait TemplateRenderer: Send + Sync {
    /// Renders `template_name` with the given attributes in the given
    /// language, returning the rendered artifact or [`None`] if the engine
    /// has nothing for that template.
    fn render(
        &self,
        template_name: &str,
        attributes: &AttributeSet,
        language: &str,
    ) -> CollaboratorResult<Option<Vec<u8>>>;
}

/// Output format of the final card document.
#[derive(strum_macros::Display, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardFormat {
    /// Portable Document Format.
    #[strum(to_string = "PDF")]
    Pdf,
}

/// Turns a rendered template into the final page-description document.
pub trait CardRenderer: Send + Sync {
    /// Renders the template bytes into a document of the requested `format`.
    fn render_card(&self, template: &[u8], format: CardFormat) -> CollaboratorResult<Vec<u8>>;
}

/// Density/version level at which QR codes are encoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QrVersion {
    /// Version 30, the fixed level used for card data payloads.
    V30,
}

/// Encodes text into a QR code image.
pub trait QrEncoder: Send + Sync {
    /// Encodes `text` at the given `version`, returning the image bytes or
    /// [`None`] if the encoder yields nothing.
    fn encode(&self, text: &str, version: QrVersion) -> CollaboratorResult<Option<Vec<u8>>>;
}

/// Biometric modality requested from a container.
#[derive(strum_macros::Display, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Modality {
    /// Face image.
    #[strum(to_string = "Face")]
    Face,
    /// Fingerprint image.
    #[strum(to_string = "Finger")]
    Finger,
    /// Iris image.
    #[strum(to_string = "Iris")]
    Iris,
}

/// Decodes biometric samples out of a standardized biometric container.
pub trait FaceBiometricExtractor: Send + Sync {
    /// Extracts the image of the given `modality` from a base64-encoded
    /// biometric container, or [`None`] if the container carries no such
    /// sample.
    fn extract_image(
        &self,
        container_b64: &str,
        modality: Modality,
    ) -> CollaboratorResult<Option<Vec<u8>>>;
}

/// Fire-and-forget sink for audit events.
pub trait AuditSink: Send + Sync {
    /// Records one audit event.  Delivery failures are the sink's own
    /// concern; the pipeline never fails a run over audit delivery.
    fn record(&self, event: AuditEvent);
}
