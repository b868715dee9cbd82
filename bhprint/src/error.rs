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

//! This module defines the error values returned by the crate API.

/// Error type used across the crate API.
///
/// The variants mirror the failure taxonomy of the card generation pipeline.
/// [`PrintError::CodeEncode`] and [`PrintError::PhotoExtract`] describe
/// degradable steps: when the respective collaborator merely yields nothing,
/// the pipeline logs the condition and continues without the QR code or the
/// photo.  Every fatal failure is surfaced to the caller as
/// [`PrintError::DocumentGeneration`] with the original error preserved as
/// the [`bherror`] source chain.
#[derive(strum_macros::Display, Debug, PartialEq, Clone)]
pub enum PrintError {
    /// Error when an RID does not resolve to a UIN.
    #[strum(to_string = "UIN not found for the provided RID")]
    UinNotFound,
    /// Error when the identity repository response or its payload is empty.
    #[strum(to_string = "Identity repository returned an empty response")]
    UpstreamEmptyResponse,
    /// Error when the demographic payload of the identity record is empty.
    #[strum(to_string = "Identity record contains no demographic data")]
    IdentityNotFound,
    /// Error when the identity record or the mapping schema fails structured
    /// decode.
    #[strum(to_string = "Malformed identity or mapping schema data: {0}")]
    MappingParse(String),
    /// Error when the template engine yields no artifact.
    #[strum(to_string = "Template engine produced no artifact for template {0}")]
    TemplateRender(String),
    /// Error in the QR code encoding step.
    #[strum(to_string = "QR code was not generated for the card data file")]
    CodeEncode,
    /// Error in the applicant photo extraction step.
    #[strum(to_string = "Applicant photo was not extracted from the biometric container")]
    PhotoExtract,
    /// Uniform wrapper for any failure of a card generation run, carrying
    /// the original cause as its source.
    #[strum(to_string = "Failed to generate the identity card artifacts")]
    DocumentGeneration,
}

impl bherror::BhError for PrintError {}

/// Type alias for [`bherror::Result`] types returned by the crate's API.
pub type Result<T> = bherror::Result<T, PrintError>;
