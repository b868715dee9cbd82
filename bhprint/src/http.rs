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

//! HTTP implementations of the transport collaborator seams.
//!
//! * [`HttpIdentityRepository`] fetching identity records via
//!   `GET /identity/{uin}?type=all`.
//! * [`HttpMappingSchemaSource`] fetching the mapping schema configuration
//!   document.
//!
//! Both use a blocking client; the pipeline is a single synchronous call
//! chain per request, and latency bounds belong to the collaborator (set
//! them on the [`ClientBuilder`][reqwest::blocking::ClientBuilder]).

use bherror::{traits::ForeignError, Error, ErrorDyn};
use reqwest::blocking::Client;

use crate::{
    models::IdentityResponse,
    traits::{CollaboratorResult, IdentityRepository, MappingSchemaSource},
};

/// Error type of the HTTP collaborator implementations.
#[derive(strum_macros::Display, Debug, PartialEq, Clone)]
pub enum TransportError {
    /// Error when the HTTP client cannot be constructed.
    #[strum(to_string = "Failed to build the HTTP client")]
    Client,
    /// Error when a request fails or returns a non-success status.
    #[strum(to_string = "Request to {0} failed")]
    Request(String),
    /// Error when a response body cannot be decoded.
    #[strum(to_string = "Failed to decode the response from {0}")]
    Decode(String),
}

impl bherror::BhError for TransportError {}

/// [`IdentityRepository`] implementation backed by the identity repository
/// HTTP service.
pub struct HttpIdentityRepository {
    client: Client,
    base_url: String,
}

impl HttpIdentityRepository {
    /// Creates a repository client for the service at `base_url`.
    pub fn new(base_url: impl Into<String>) -> Result<Self, ErrorDyn> {
        let client = Client::builder()
            .build()
            .foreign_err(|| TransportError::Client)
            .map_err(Error::erased)?;

        Ok(Self {
            client,
            base_url: trim_trailing_slash(base_url.into()),
        })
    }

    /// Creates a repository client reusing an existing blocking `client`,
    /// e.g. one configured with timeouts.
    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: trim_trailing_slash(base_url.into()),
        }
    }
}

impl IdentityRepository for HttpIdentityRepository {
    fn fetch_identity(&self, uin: &str) -> CollaboratorResult<IdentityResponse> {
        let url = format!("{}/identity/{}", self.base_url, uin);

        let response = self
            .client
            .get(&url)
            .query(&[("type", "all")])
            .send()
            .and_then(reqwest::blocking::Response::error_for_status)
            .foreign_err(|| TransportError::Request(url.clone()))
            .map_err(Error::erased)?;

        response
            .json()
            .foreign_err(|| TransportError::Decode(url))
            .map_err(Error::erased)
    }
}

/// [`MappingSchemaSource`] implementation fetching the schema configuration
/// document from a configuration server URL.
pub struct HttpMappingSchemaSource {
    client: Client,
    url: String,
}

impl HttpMappingSchemaSource {
    /// Creates a schema source for the configuration document at `url`.
    pub fn new(url: impl Into<String>) -> Result<Self, ErrorDyn> {
        let client = Client::builder()
            .build()
            .foreign_err(|| TransportError::Client)
            .map_err(Error::erased)?;

        Ok(Self {
            client,
            url: url.into(),
        })
    }
}

impl MappingSchemaSource for HttpMappingSchemaSource {
    fn fetch_schema(&self) -> CollaboratorResult<String> {
        let response = self
            .client
            .get(&self.url)
            .send()
            .and_then(reqwest::blocking::Response::error_for_status)
            .foreign_err(|| TransportError::Request(self.url.clone()))
            .map_err(Error::erased)?;

        response
            .text()
            .foreign_err(|| TransportError::Decode(self.url.clone()))
            .map_err(Error::erased)
    }
}

fn trim_trailing_slash(mut url: String) -> String {
    while url.ends_with('/') {
        url.pop();
    }
    url
}
