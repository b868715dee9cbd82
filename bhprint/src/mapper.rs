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

//! Schema-driven derivation of the card attribute set from an identity
//! record.
//!
//! This is where the deployment-specific fan-out lives: which demographic
//! fields become attributes, and under what names, is decided entirely by
//! the [`MappingSchema`] so that identity schemas can vary per deployment
//! without code change.

use bherror::{traits::ForeignError, Error};
use serde::Deserialize;
use serde_json::Value;

use crate::{
    error::{PrintError, Result},
    models::{AttributeSet, LanguageValue, MappingSchema},
    utils::json::resolve_path,
};

/// The shapes a schema-resolved demographic value can take.
///
/// Decoded explicitly as a sum type; the variant order matters, since
/// [`serde_json`] tries untagged variants first to last and `Scalar`
/// accepts anything.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum MappedField {
    /// A sequence of `{language, value}` pairs.
    MultiLanguage(Vec<LanguageValue>),
    /// A single nested object carrying a `value` field.
    Nested(NestedField),
    /// Anything else, emitted verbatim.
    Scalar(Value),
}

#[derive(Debug, Deserialize)]
struct NestedField {
    value: Value,
}

/// Derives the flat attribute set for one identity record.
///
/// For each schema entry, the entry's source path is resolved against the
/// demographic structure and decoded as a [`MappedField`]:
///
///   * a multi-language sequence emits one `target_<language>` attribute per
///     element, in order -- a repeated language overwrites the earlier value;
///   * a nested object carrying `value` emits `target -> value`;
///   * anything else is emitted verbatim, with absent paths emitted as
///     `null` attributes rather than errors.
///
/// Fails with [`PrintError::IdentityNotFound`] when the demographic payload
/// is empty, and with [`PrintError::MappingParse`] when it is not a JSON
/// object.
pub fn map_attributes(identity: &Value, schema: &MappingSchema) -> Result<AttributeSet> {
    if identity.is_null() {
        return Err(Error::root(PrintError::IdentityNotFound));
    }
    let demographics = identity.as_object().ok_or_else(|| {
        Error::root(PrintError::MappingParse(
            "demographic payload is not a JSON object".into(),
        ))
    })?;
    if demographics.is_empty() {
        return Err(Error::root(PrintError::IdentityNotFound));
    }

    let mut attributes = AttributeSet::new();
    for field in schema.fields() {
        let resolved = resolve_path(identity, &field.source_path)
            .cloned()
            .unwrap_or(Value::Null);

        let decoded: MappedField = serde_json::from_value(resolved).foreign_err(|| {
            PrintError::MappingParse(format!(
                "failed to decode the value resolved for \"{}\"",
                field.target
            ))
        })?;

        match decoded {
            MappedField::MultiLanguage(elements) => {
                for element in elements {
                    attributes.set(
                        format!("{}_{}", field.target, element.language),
                        element.value,
                    );
                }
            }
            MappedField::Nested(nested) => {
                attributes.set(field.target.clone(), nested.value);
            }
            MappedField::Scalar(value) => {
                attributes.set(field.target.clone(), value);
            }
        }
    }

    Ok(attributes)
}
