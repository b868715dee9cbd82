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

use base64::{engine::general_purpose::STANDARD, Engine as _};

/// Returns the standard `base64`-encoded string of the given `payload`.
pub fn base64_encode<T: AsRef<[u8]>>(payload: T) -> String {
    STANDARD.encode(payload)
}

/// Wraps the given image bytes into a `data:image/png;base64,` URI, the form
/// in which images are embedded into the card template attributes.
pub fn png_data_uri<T: AsRef<[u8]>>(image: T) -> String {
    format!("data:image/png;base64,{}", base64_encode(image))
}
