// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use thiserror::Error;

/// Result type for scene parsing operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while reading a Radiance scene description
#[derive(Error, Debug)]
pub enum Error {
    #[error("Syntax error at offset {offset}: {message}")]
    Syntax { offset: usize, message: String },

    #[error("Malformed {kind} primitive '{identifier}': {message}")]
    MalformedPrimitive {
        kind: String,
        identifier: String,
        message: String,
    },
}
