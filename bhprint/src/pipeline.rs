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

//! The card generation pipeline tying the generation steps together.
//!
//! [`PrintPipeline::generate`] runs a single synchronous call chain per
//! request: resolve the subject UIN, fetch the identity record, extract the
//! photo, derive the attribute set, build the data file and QR payload,
//! render the card, and report the outcome.  All intermediate state is
//! request-scoped; the pipeline itself holds only configuration and the
//! collaborator seams, so concurrent invocations share nothing mutable.

use bherror::{traits::PropagateError, Error};
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::{
    audit::AuditEvent,
    error::{PrintError, Result},
    mapper::map_attributes,
    models::{
        CardArtifacts, IdentityRecord, MappingSchema, SubjectId, APPLICANT_PHOTO, QR_CODE, UIN,
    },
    payload::{build_data_file, encode_qr},
    photo::extract_photo,
    traits::{
        AuditSink, CardFormat, CardRenderer, FaceBiometricExtractor, IdentityRepository,
        MappingSchemaSource, QrEncoder, RegistrationStatusStore, TemplateRenderer,
    },
};

/// Name of the card template handed to the template engine.
pub const UIN_CARD_TEMPLATE: &str = "RPR_UIN_CARD_TEMPLATE";

/// Default root path of the mapping object within the schema configuration
/// document.
pub const DEFAULT_SCHEMA_ROOT: &str = "identity";

/// Configuration of a [`PrintPipeline`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrintConfig {
    /// Primary language of the deployment, e.g. `eng`.
    pub primary_language: String,
    /// Secondary language of the deployment, e.g. `ara`.
    pub secondary_language: String,
    /// Card template name; defaults to [`UIN_CARD_TEMPLATE`].
    #[serde(default = "default_template_name")]
    pub template_name: String,
    /// Root path of the mapping object within the schema configuration;
    /// defaults to [`DEFAULT_SCHEMA_ROOT`].
    #[serde(default = "default_schema_root")]
    pub schema_root: String,
}

fn default_template_name() -> String {
    UIN_CARD_TEMPLATE.to_owned()
}

fn default_schema_root() -> String {
    DEFAULT_SCHEMA_ROOT.to_owned()
}

impl PrintConfig {
    /// Creates a configuration with the given languages and the default
    /// template name and schema root.
    pub fn new(primary_language: impl Into<String>, secondary_language: impl Into<String>) -> Self {
        Self {
            primary_language: primary_language.into(),
            secondary_language: secondary_language.into(),
            template_name: default_template_name(),
            schema_root: default_schema_root(),
        }
    }
}

/// The external collaborators a [`PrintPipeline`] is wired with.
pub struct Collaborators {
    /// RID-to-UIN resolution.
    pub registration_status: Box<dyn RegistrationStatusStore>,
    /// Identity record retrieval.
    pub identity_repository: Box<dyn IdentityRepository>,
    /// Mapping schema configuration store.
    pub schema_source: Box<dyn MappingSchemaSource>,
    /// Card template engine.
    pub template_renderer: Box<dyn TemplateRenderer>,
    /// Final page-description renderer.
    pub card_renderer: Box<dyn CardRenderer>,
    /// QR code encoder.
    pub qr_encoder: Box<dyn QrEncoder>,
    /// Biometric container decoder.
    pub face_extractor: Box<dyn FaceBiometricExtractor>,
    /// Audit event sink.
    pub audit: Box<dyn AuditSink>,
}

/// Assembles the printable card artifact set for one subject per
/// [`generate`][Self::generate] call.
pub struct PrintPipeline {
    config: PrintConfig,
    collaborators: Collaborators,
}

impl PrintPipeline {
    /// Creates a pipeline from its configuration and collaborators.
    pub fn new(config: PrintConfig, collaborators: Collaborators) -> Self {
        Self {
            config,
            collaborators,
        }
    }

    /// Generates the card artifacts for the given subject.
    ///
    /// Exactly one audit event is recorded per call, success or failure.
    /// Every fatal failure is surfaced as
    /// [`PrintError::DocumentGeneration`] with the original cause preserved
    /// as the error source; no partial artifacts are ever returned.  The
    /// photo and QR steps degrade instead of failing when their
    /// collaborators yield nothing.
    pub fn generate(&self, subject: &SubjectId) -> Result<CardArtifacts> {
        let mut resolved_uin = None;
        let result = self.run(subject, &mut resolved_uin);

        self.collaborators
            .audit
            .record(AuditEvent::outcome(result.is_ok(), resolved_uin.as_deref()));

        match result {
            Err(err) if !matches!(err.error, PrintError::DocumentGeneration) => {
                Err(err).with_err(|| PrintError::DocumentGeneration)
            }
            other => other,
        }
    }

    fn run(
        &self,
        subject: &SubjectId,
        resolved_uin: &mut Option<String>,
    ) -> Result<CardArtifacts> {
        let uin = self.resolve_uin(subject)?;
        *resolved_uin = Some(uin.clone());

        let record = self.fetch_identity(&uin)?;

        let photo = extract_photo(
            &record.documents,
            self.collaborators.face_extractor.as_ref(),
        )?;
        if photo.is_none() {
            log::debug!("uin={uin}: {}", PrintError::PhotoExtract);
        }

        let schema = self.fetch_schema()?;
        let mut attributes = map_attributes(&record.identity, &schema)?;
        if let Some(photo) = photo {
            attributes.set(APPLICANT_PHOTO, photo);
        }
        // The resolved identifier always wins over a mapped attribute.
        attributes.set(UIN, uin.clone());

        let text_file = build_data_file(
            &attributes,
            &self.config.primary_language,
            &self.config.secondary_language,
            Utc::now(),
        )?;

        match encode_qr(&text_file, self.collaborators.qr_encoder.as_ref())? {
            Some(qr_code) => {
                attributes.set(QR_CODE, qr_code);
            }
            None => log::debug!("uin={uin}: {}", PrintError::CodeEncode),
        }

        let template = self
            .collaborators
            .template_renderer
            .render(
                &self.config.template_name,
                &attributes,
                &self.config.primary_language,
            )
            .with_err(|| PrintError::TemplateRender(self.config.template_name.clone()))?
            .ok_or_else(|| {
                Error::root(PrintError::TemplateRender(self.config.template_name.clone()))
            })?;

        let card_pdf = self
            .collaborators
            .card_renderer
            .render_card(&template, CardFormat::Pdf)
            .with_err(|| PrintError::DocumentGeneration)?;

        Ok(CardArtifacts {
            text_file,
            card_pdf,
            uin: uin.into_bytes(),
        })
    }

    fn resolve_uin(&self, subject: &SubjectId) -> Result<String> {
        match subject {
            SubjectId::Uin(uin) => Ok(uin.clone()),
            SubjectId::Rid(rid) => self
                .collaborators
                .registration_status
                .uin_for_rid(rid)
                .with_err(|| PrintError::DocumentGeneration)?
                .ok_or_else(|| Error::root(PrintError::UinNotFound)),
        }
    }

    fn fetch_identity(&self, uin: &str) -> Result<IdentityRecord> {
        self.collaborators
            .identity_repository
            .fetch_identity(uin)
            .with_err(|| PrintError::DocumentGeneration)?
            .response
            .ok_or_else(|| Error::root(PrintError::UpstreamEmptyResponse))
    }

    fn fetch_schema(&self) -> Result<MappingSchema> {
        let raw = self
            .collaborators
            .schema_source
            .fetch_schema()
            .with_err(|| PrintError::DocumentGeneration)?;

        MappingSchema::from_json(&raw, &self.config.schema_root)
    }
}
