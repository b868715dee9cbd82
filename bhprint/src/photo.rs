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

//! Extraction of the applicant photo from an identity record's documents.

use bherror::traits::PropagateError;

use crate::{
    error::{PrintError, Result},
    models::{Document, INDIVIDUAL_BIOMETRICS},
    traits::{FaceBiometricExtractor, Modality},
    utils::base64::png_data_uri,
};

/// Extracts the applicant's face photo from the record's document list.
///
/// Only the first document with category [`INDIVIDUAL_BIOMETRICS`] is used;
/// later matches are ignored.  A missing document, or an extractor yielding
/// no face sample, is `Ok(None)` rather than an error -- the card is simply
/// rendered without a photo.  On success returns the image wrapped as a
/// base64 data URI, ready to be registered under the
/// [`ApplicantPhoto`][crate::models::APPLICANT_PHOTO] attribute.
pub fn extract_photo(
    documents: &[Document],
    extractor: &dyn FaceBiometricExtractor,
) -> Result<Option<String>> {
    let Some(document) = documents
        .iter()
        .find(|document| document.category == INDIVIDUAL_BIOMETRICS)
    else {
        return Ok(None);
    };

    let image = extractor
        .extract_image(&document.value, Modality::Face)
        .with_err(|| PrintError::PhotoExtract)?;

    Ok(image.map(png_data_uri))
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;
    use crate::test_utils::{ErroringFaceExtractor, StubFaceExtractor};

    fn biometrics_document(value: &str) -> Document {
        Document {
            category: INDIVIDUAL_BIOMETRICS.to_owned(),
            value: value.to_owned(),
        }
    }

    #[test]
    fn test_no_biometrics_document() {
        let documents = [Document {
            category: "proofOfAddress".to_owned(),
            value: "AAAA".to_owned(),
        }];
        let extractor = StubFaceExtractor::with_image(b"face".to_vec());

        let photo = extract_photo(&documents, &extractor).unwrap();

        assert!(photo.is_none());
        assert!(extractor.last_container().is_none());
    }

    #[test]
    fn test_photo_wrapped_as_data_uri() {
        let documents = [biometrics_document("Y29udGFpbmVy")];
        let extractor = StubFaceExtractor::with_image(vec![0xDE, 0xAD, 0xBE, 0xEF]);

        let photo = extract_photo(&documents, &extractor).unwrap().unwrap();

        assert_eq!(photo, "data:image/png;base64,3q2+7w==");
        assert_eq!(extractor.last_container().as_deref(), Some("Y29udGFpbmVy"));
    }

    #[test]
    fn test_extractor_yields_nothing() {
        let documents = [biometrics_document("Y29udGFpbmVy")];
        let extractor = StubFaceExtractor::empty();

        let photo = extract_photo(&documents, &extractor).unwrap();

        assert!(photo.is_none());
    }

    #[test]
    fn test_only_first_matching_document_is_used() {
        let documents = [
            biometrics_document("Zmlyc3Q="),
            biometrics_document("c2Vjb25k"),
        ];
        let extractor = StubFaceExtractor::with_image(b"face".to_vec());

        extract_photo(&documents, &extractor).unwrap();

        assert_eq!(extractor.last_container().as_deref(), Some("Zmlyc3Q="));
    }

    #[test]
    fn test_extractor_error_propagates() {
        let documents = [biometrics_document("Y29udGFpbmVy")];

        let err = extract_photo(&documents, &ErroringFaceExtractor).unwrap_err();

        assert_matches!(err.error, PrintError::PhotoExtract);
    }
}
