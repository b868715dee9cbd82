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

//! Data model of the card generation pipeline.
//!
//! The types here are either wire shapes of the external collaborators
//! ([`IdentityResponse`], [`Document`]) or request-scoped values constructed
//! and destroyed within a single pipeline invocation ([`AttributeSet`],
//! [`CardArtifacts`]).

use std::collections::HashMap;

use bherror::{traits::ForeignError, Error};
use serde::{Deserialize, Serialize};
pub use serde_json::{Map, Value};

use crate::{
    error::{PrintError, Result},
    utils::json::resolve_path,
};

/// A JSON object, i.e. a mapping from [`String`] to [`Value`].
pub type JsonObject = Map<String, Value>;

/// Helper macro with the same syntax as [`serde_json::json`] specialized for
/// constructing JSON objects.
///
/// It will construct a more specific type ([`serde_json::Map<String,Value>`])
/// than just [`serde_json::Value`] when constructing an object, and panic if
/// the syntax is valid JSON but not an object.
#[macro_export]
macro_rules! json_object {
    ($stuff:tt) => {
        match ::serde_json::json!($stuff) {
            ::serde_json::Value::Object(o) => o,
            _ => unreachable!("JSON literal wasn't an object"),
        }
    };
}

/// Attribute key under which the pipeline registers the applicant photo.
pub const APPLICANT_PHOTO: &str = "ApplicantPhoto";

/// Attribute key under which the pipeline registers the QR code image.
pub const QR_CODE: &str = "QrCode";

/// Attribute key of the subject identifier; also the artifact-map key of the
/// identifier bytes.
pub const UIN: &str = "UIN";

/// Artifact-map key of the canonical card data file.
pub const TEXT_FILE: &str = "textFile";

/// Artifact-map key of the rendered card PDF.
pub const UIN_CARD_PDF: &str = "uinPdf";

/// Document category carrying the subject's biometric container.
pub const INDIVIDUAL_BIOMETRICS: &str = "individualBiometrics";

/// Identifier of the subject whose card artifacts are requested.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubjectId {
    /// The unique identification number itself.
    Uin(String),
    /// A registration identifier, resolved to a UIN via the
    /// [`RegistrationStatusStore`][crate::traits::RegistrationStatusStore].
    Rid(String),
}

/// Wire shape of the identity repository response, i.e. of
/// `GET /identity/{uin}?type=all`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdentityResponse {
    /// The response payload; absent on lookup misses.
    #[serde(default)]
    pub response: Option<IdentityRecord>,
}

/// The authoritative record for one subject.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdentityRecord {
    /// Nested demographic structure of arbitrary depth, keyed by field name.
    #[serde(default)]
    pub identity: Value,
    /// Documents attached to the record.
    #[serde(default)]
    pub documents: Vec<Document>,
}

/// A document attached to an identity record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    /// Document category, e.g. [`INDIVIDUAL_BIOMETRICS`].
    pub category: String,
    /// Base64-encoded document blob.
    pub value: String,
}

/// One element of a multi-language demographic field.
///
/// Deliberately a plain typed record so that the mapper decodes it directly
/// from JSON instead of discovering fields at runtime.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguageValue {
    /// Language tag of this element, e.g. `eng`.
    pub language: String,
    /// Value of the field in that language.
    pub value: String,
}

/// One entry of a [`MappingSchema`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MappingField {
    /// Name under which the resolved value is emitted into the
    /// [`AttributeSet`].
    pub target: String,
    /// Dot-separated path resolved against the demographic structure.
    pub source_path: String,
}

/// Deployment-specific definition of which demographic fields become card
/// attributes and under what name.
///
/// Loaded from external configuration as JSON of the shape
/// `{ <root>: { "<target>": { "value": "<sourcePath>" }, ... } }`.  Entry
/// order is preserved, but carries no semantics beyond diagnostics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MappingSchema {
    fields: Vec<MappingField>,
}

impl MappingSchema {
    /// Parses a mapping schema from its configuration JSON, locating the
    /// mapping object under the given dot-separated `root_path`.
    ///
    /// Fails with [`PrintError::MappingParse`] if the document is not valid
    /// JSON, the root path does not lead to an object, or an entry does not
    /// carry a string `value` field.
    pub fn from_json(raw: &str, root_path: &str) -> Result<Self> {
        let document: Value = serde_json::from_str(raw)
            .foreign_err(|| PrintError::MappingParse("mapping schema is not valid JSON".into()))?;

        let root = resolve_path(&document, root_path)
            .and_then(Value::as_object)
            .ok_or_else(|| {
                Error::root(PrintError::MappingParse(format!(
                    "mapping schema has no object under \"{root_path}\""
                )))
            })?;

        let fields = root
            .iter()
            .map(|(target, entry)| {
                let source_path = entry.get("value").and_then(Value::as_str).ok_or_else(|| {
                    Error::root(PrintError::MappingParse(format!(
                        "mapping schema entry \"{target}\" has no string \"value\" field"
                    )))
                })?;
                Ok(MappingField {
                    target: target.clone(),
                    source_path: source_path.to_owned(),
                })
            })
            .collect::<Result<_>>()?;

        Ok(Self { fields })
    }

    /// The schema entries, in the order they appear in the configuration.
    pub fn fields(&self) -> &[MappingField] {
        &self.fields
    }
}

/// Flat, language-aware attribute set derived from one identity record.
///
/// Multi-language demographic fields appear as `key_<language>` entries.
/// The set is request-scoped: it is built fresh per pipeline invocation and
/// never shared across requests.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AttributeSet(JsonObject);

impl AttributeSet {
    /// Creates an empty attribute set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets an attribute, overwriting and returning any earlier value under
    /// the same key.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.0.insert(key.into(), value.into())
    }

    /// Returns the attribute under `key`, if present.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Returns the attribute under `key` as a string.
    ///
    /// Returns [`None`] both for missing attributes and for attributes which
    /// are not JSON strings (including explicit nulls).
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(Value::as_str)
    }

    /// Returns the `key_<language>` attribute as a string.
    pub fn localized(&self, key: &str, language: &str) -> Option<&str> {
        self.get_str(&format!("{key}_{language}"))
    }

    /// Number of attributes in the set.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the set contains no attributes.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The underlying JSON object, e.g. for handing the full set to a
    /// template engine.
    pub fn as_object(&self) -> &JsonObject {
        &self.0
    }
}

/// Final output of a successful pipeline invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardArtifacts {
    /// The canonical card data file (serialized scannable payload).
    pub text_file: Vec<u8>,
    /// The rendered card document.
    pub card_pdf: Vec<u8>,
    /// The resolved subject identifier as bytes.
    pub uin: Vec<u8>,
}

impl CardArtifacts {
    /// Converts the artifacts into the named byte map handed to callers:
    /// [`TEXT_FILE`], [`UIN_CARD_PDF`] and [`UIN`].
    pub fn into_map(self) -> HashMap<String, Vec<u8>> {
        HashMap::from([
            (TEXT_FILE.to_owned(), self.text_file),
            (UIN_CARD_PDF.to_owned(), self.card_pdf),
            (UIN.to_owned(), self.uin),
        ])
    }
}
