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

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! This crate assembles the printable identity-card artifact set for one
//! subject of a national identity registration platform.
//!
//! Given a subject identifier (a UIN, or an RID resolvable to one), the
//! [`PrintPipeline`] retrieves the authoritative identity record, derives a
//! flat, language-aware attribute set from a deployment-specific mapping
//! schema, extracts the applicant photo from the record's biometric
//! container, embeds a scannable QR payload derived from the record, renders
//! the card document and reports the outcome for audit.
//!
//! # Details
//!
//! The crate defines multiple modules, which can be roughly divided as
//! follows.
//!
//!   * The high-level [`pipeline`] module tying the generation steps
//!     together.
//!   * The generation steps themselves -- [`mapper`], [`photo`] and
//!     [`payload`].
//!   * The [`traits`] module with the seams for the external collaborators
//!     (identity repository, template engine, PDF renderer, QR encoder,
//!     biometric extractor, audit sink), and the [`http`] module with
//!     ready-made HTTP implementations of the transport seams.
//!   * The [`error`] module describing the error values, and the low-level
//!     data model -- [`models`].
//!
//! A typical user of this crate wires its own collaborator implementations
//! into a [`PrintPipeline`] and calls [`PrintPipeline::generate`] per
//! request.
//!
//! # Examples
//!
//! ```no_run
//! use bhprint::{Collaborators, PrintConfig, PrintPipeline, SubjectId};
//!
//! # fn collaborators() -> Collaborators { unimplemented!() }
//! // Implementations of the collaborator seams are deployment specific;
//! // see the `traits` module, and `http` for the shipped transports.
//! let pipeline = PrintPipeline::new(
//!     PrintConfig::new("eng", "ara"),
//!     collaborators(),
//! );
//!
//! let artifacts = pipeline
//!     .generate(&SubjectId::Uin("123456789".to_owned()))
//!     .unwrap();
//! let byte_map = artifacts.into_map();
//! ```

pub mod audit;
pub mod error;
pub mod http;
pub mod mapper;
pub mod models;
pub mod payload;
pub mod photo;
pub mod pipeline;
#[cfg(test)]
pub(crate) mod test_utils;
pub mod traits;
mod utils;

pub use audit::AuditEvent;
pub use error::{PrintError, Result};
pub use models::{
    AttributeSet, CardArtifacts, Document, IdentityRecord, IdentityResponse, JsonObject,
    LanguageValue, MappingField, MappingSchema, SubjectId,
};
pub use pipeline::{Collaborators, PrintConfig, PrintPipeline};
pub use traits::{
    AuditSink, CardFormat, CardRenderer, CollaboratorResult, FaceBiometricExtractor,
    IdentityRepository, MappingSchemaSource, Modality, QrEncoder, QrVersion,
    RegistrationStatusStore, TemplateRenderer,
};
