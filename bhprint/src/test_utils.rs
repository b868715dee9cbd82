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

//! Stub collaborators shared by the unit tests.

use std::sync::{Arc, Mutex};

use bherror::Error;

use crate::{
    audit::AuditEvent,
    models::{AttributeSet, IdentityResponse},
    traits::{
        AuditSink, CardFormat, CardRenderer, CollaboratorResult, FaceBiometricExtractor,
        IdentityRepository, MappingSchemaSource, Modality, QrEncoder, QrVersion,
        RegistrationStatusStore, TemplateRenderer,
    },
};

/// Error type produced by the deliberately failing stubs.
#[derive(Debug)]
pub(crate) struct StubFailure;

impl std::fmt::Display for StubFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "stub collaborator failure")
    }
}

impl bherror::BhError for StubFailure {}

fn stub_failure() -> bherror::ErrorDyn {
    Error::root(StubFailure).erased()
}

pub(crate) struct StubStatusStore(Option<String>);

impl StubStatusStore {
    pub(crate) fn resolving(uin: &str) -> Self {
        Self(Some(uin.to_owned()))
    }

    pub(crate) fn unknown() -> Self {
        Self(None)
    }
}

impl RegistrationStatusStore for StubStatusStore {
    fn uin_for_rid(&self, _rid: &str) -> CollaboratorResult<Option<String>> {
        Ok(self.0.clone())
    }
}

pub(crate) struct ErroringStatusStore;

impl RegistrationStatusStore for ErroringStatusStore {
    fn uin_for_rid(&self, _rid: &str) -> CollaboratorResult<Option<String>> {
        Err(stub_failure())
    }
}

pub(crate) struct StubIdentityRepository(IdentityResponse);

impl StubIdentityRepository {
    pub(crate) fn new(response: IdentityResponse) -> Self {
        Self(response)
    }

    pub(crate) fn empty() -> Self {
        Self(IdentityResponse { response: None })
    }
}

impl IdentityRepository for StubIdentityRepository {
    fn fetch_identity(&self, _uin: &str) -> CollaboratorResult<IdentityResponse> {
        Ok(self.0.clone())
    }
}

pub(crate) struct StubSchemaSource(String);

impl StubSchemaSource {
    pub(crate) fn new(schema_json: String) -> Self {
        Self(schema_json)
    }
}

impl MappingSchemaSource for StubSchemaSource {
    fn fetch_schema(&self) -> CollaboratorResult<String> {
        Ok(self.0.clone())
    }
}

/// Template renderer stub which also captures the attribute set it was last
/// rendered with, so tests can assert on what the pipeline produced.
#[derive(Clone)]
pub(crate) struct StubTemplateRenderer {
    output: Option<Vec<u8>>,
    last_attributes: Arc<Mutex<Option<AttributeSet>>>,
}

impl StubTemplateRenderer {
    pub(crate) fn rendering(output: Vec<u8>) -> Self {
        Self {
            output: Some(output),
            last_attributes: Arc::default(),
        }
    }

    pub(crate) fn missing() -> Self {
        Self {
            output: None,
            last_attributes: Arc::default(),
        }
    }

    pub(crate) fn last_attributes(&self) -> Option<AttributeSet> {
        self.last_attributes.lock().unwrap().clone()
    }
}

impl TemplateRenderer for StubTemplateRenderer {
    fn render(
        &self,
        _template_name: &str,
        attributes: &AttributeSet,
        _language: &str,
    ) -> CollaboratorResult<Option<Vec<u8>>> {
        *self.last_attributes.lock().unwrap() = Some(attributes.clone());
        Ok(self.output.clone())
    }
}

pub(crate) struct StubCardRenderer(Vec<u8>);

impl StubCardRenderer {
    pub(crate) fn new(pdf: Vec<u8>) -> Self {
        Self(pdf)
    }
}

impl CardRenderer for StubCardRenderer {
    fn render_card(&self, _template: &[u8], _format: CardFormat) -> CollaboratorResult<Vec<u8>> {
        Ok(self.0.clone())
    }
}

#[derive(Clone)]
pub(crate) struct StubQrEncoder {
    image: Option<Vec<u8>>,
    last_text: Arc<Mutex<Option<String>>>,
}

impl StubQrEncoder {
    pub(crate) fn with_image(image: Vec<u8>) -> Self {
        Self {
            image: Some(image),
            last_text: Arc::default(),
        }
    }

    pub(crate) fn empty() -> Self {
        Self {
            image: None,
            last_text: Arc::default(),
        }
    }

    pub(crate) fn last_text(&self) -> Option<String> {
        self.last_text.lock().unwrap().clone()
    }
}

impl QrEncoder for StubQrEncoder {
    fn encode(&self, text: &str, _version: QrVersion) -> CollaboratorResult<Option<Vec<u8>>> {
        *self.last_text.lock().unwrap() = Some(text.to_owned());
        Ok(self.image.clone())
    }
}

#[derive(Clone)]
pub(crate) struct StubFaceExtractor {
    image: Option<Vec<u8>>,
    last_container: Arc<Mutex<Option<String>>>,
}

impl StubFaceExtractor {
    pub(crate) fn with_image(image: Vec<u8>) -> Self {
        Self {
            image: Some(image),
            last_container: Arc::default(),
        }
    }

    pub(crate) fn empty() -> Self {
        Self {
            image: None,
            last_container: Arc::default(),
        }
    }

    pub(crate) fn last_container(&self) -> Option<String> {
        self.last_container.lock().unwrap().clone()
    }
}

impl FaceBiometricExtractor for StubFaceExtractor {
    fn extract_image(
        &self,
        container_b64: &str,
        _modality: Modality,
    ) -> CollaboratorResult<Option<Vec<u8>>> {
        *self.last_container.lock().unwrap() = Some(container_b64.to_owned());
        Ok(self.image.clone())
    }
}

pub(crate) struct ErroringFaceExtractor;

impl FaceBiometricExtractor for ErroringFaceExtractor {
    fn extract_image(
        &self,
        _container_b64: &str,
        _modality: Modality,
    ) -> CollaboratorResult<Option<Vec<u8>>> {
        Err(stub_failure())
    }
}

/// Audit sink recording every event it receives; clones share the record.
#[derive(Clone, Default)]
pub(crate) struct RecordingAuditSink(Arc<Mutex<Vec<AuditEvent>>>);

impl RecordingAuditSink {
    pub(crate) fn events(&self) -> Vec<AuditEvent> {
        self.0.lock().unwrap().clone()
    }
}

impl AuditSink for RecordingAuditSink {
    fn record(&self, event: AuditEvent) {
        self.0.lock().unwrap().push(event);
    }
}
