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

//! Construction of the canonical card data file and the scannable QR
//! payload derived from it.

use bherror::traits::{ForeignError, PropagateError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    error::{PrintError, Result},
    models::AttributeSet,
    traits::{QrEncoder, QrVersion},
    utils::base64::png_data_uri,
};

/// Fixed identifier of the card data file record.
pub const DATA_FILE_ID: &str = "mosip.registration.print.send";

/// Fixed version of the card data file record.
pub const DATA_FILE_VERSION: &str = "1.0";

/// UTC timestamp format of the data file, `yyyy-MM-dd'T'HH:mm:ss.SSS'Z'`.
const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3fZ";

// Attribute keys the data file is populated from.  These are the canonical
// target keys every deployment's mapping schema is expected to provide.
const NAME: &str = "name";
const ADDRESS_LINE1: &str = "addressLine1";
const ADDRESS_LINE2: &str = "addressLine2";
const ADDRESS_LINE3: &str = "addressLine3";
const REGION: &str = "region";
const PROVINCE: &str = "province";
const CITY: &str = "city";
const POSTAL_CODE: &str = "postalCode";
const PHONE: &str = "phone";

/// The canonical card data file: a fixed-shape record serialized
/// deterministically so that repeated runs over identical inputs (with the
/// timestamp injected) are byte-identical.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardDataFile {
    /// Always [`DATA_FILE_ID`].
    pub id: String,
    /// Always [`DATA_FILE_VERSION`].
    pub version: String,
    /// UTC timestamp of the build.
    pub request_time: String,
    /// The subject data carried by the file.
    pub request: CardDataRequest,
}

/// Subject data of the card data file, duplicated per configured language
/// where the source field is multi-language.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardDataRequest {
    /// Name in the primary language.
    pub name_lang1: Option<String>,
    /// First address line in the primary language.
    pub address_line1_lang1: Option<String>,
    /// Second address line in the primary language.
    pub address_line2_lang1: Option<String>,
    /// Third address line in the primary language.
    pub address_line3_lang1: Option<String>,
    /// Region in the primary language.
    pub region_lang1: Option<String>,
    /// Province in the primary language.
    pub province_lang1: Option<String>,
    /// City in the primary language.
    pub city_lang1: Option<String>,
    /// Name in the secondary language.
    pub name_lang2: Option<String>,
    /// First address line in the secondary language.
    pub address_line1_lang2: Option<String>,
    /// Second address line in the secondary language.
    pub address_line2_lang2: Option<String>,
    /// Third address line in the secondary language.
    pub address_line3_lang2: Option<String>,
    /// Region in the secondary language.
    pub region_lang2: Option<String>,
    /// Province in the secondary language.
    pub province_lang2: Option<String>,
    /// City in the secondary language.
    pub city_lang2: Option<String>,
    /// Postal code (not language dependent).
    pub postal_code: Option<String>,
    /// Phone number (not language dependent).
    pub phone_number: Option<String>,
}

impl CardDataRequest {
    fn from_attributes(attributes: &AttributeSet, primary: &str, secondary: &str) -> Self {
        let localized = |key: &str, language: &str| {
            attributes.localized(key, language).map(str::to_owned)
        };

        Self {
            name_lang1: localized(NAME, primary),
            address_line1_lang1: localized(ADDRESS_LINE1, primary),
            address_line2_lang1: localized(ADDRESS_LINE2, primary),
            address_line3_lang1: localized(ADDRESS_LINE3, primary),
            region_lang1: localized(REGION, primary),
            province_lang1: localized(PROVINCE, primary),
            city_lang1: localized(CITY, primary),
            name_lang2: localized(NAME, secondary),
            address_line1_lang2: localized(ADDRESS_LINE1, secondary),
            address_line2_lang2: localized(ADDRESS_LINE2, secondary),
            address_line3_lang2: localized(ADDRESS_LINE3, secondary),
            region_lang2: localized(REGION, secondary),
            province_lang2: localized(PROVINCE, secondary),
            city_lang2: localized(CITY, secondary),
            postal_code: attributes.get_str(POSTAL_CODE).map(str::to_owned),
            phone_number: attributes.get_str(PHONE).map(str::to_owned),
        }
    }
}

/// Builds the canonical card data file bytes from the attribute set.
///
/// The timestamp is injected by the caller so that output is
/// byte-reproducible across runs for identical inputs.  The file is
/// pretty-printed JSON with a fixed field order.
pub fn build_data_file(
    attributes: &AttributeSet,
    primary_language: &str,
    secondary_language: &str,
    timestamp: DateTime<Utc>,
) -> Result<Vec<u8>> {
    let data_file = CardDataFile {
        id: DATA_FILE_ID.to_owned(),
        version: DATA_FILE_VERSION.to_owned(),
        request_time: timestamp.format(TIMESTAMP_FORMAT).to_string(),
        request: CardDataRequest::from_attributes(attributes, primary_language, secondary_language),
    };

    serde_json::to_vec_pretty(&data_file).foreign_err(|| PrintError::DocumentGeneration)
}

/// Encodes the card data file into a scannable QR code image.
///
/// The data file bytes are handed to the encoder collaborator as UTF-8 text
/// at the fixed [`QrVersion::V30`] level.  An encoder yielding nothing is
/// `Ok(None)`; the pipeline logs it and renders the card without the QR
/// code.  On success returns the image wrapped as a base64 data URI, ready
/// to be registered under the [`QrCode`][crate::models::QR_CODE] attribute.
pub fn encode_qr(data_file: &[u8], encoder: &dyn QrEncoder) -> Result<Option<String>> {
    let text = std::str::from_utf8(data_file).foreign_err(|| PrintError::CodeEncode)?;

    let image = encoder
        .encode(text, QrVersion::V30)
        .with_err(|| PrintError::CodeEncode)?;

    Ok(image.map(png_data_uri))
}
