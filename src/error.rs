// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::path::PathBuf;

use crate::usvg;

/// List of all errors.
#[derive(Debug)]
pub enum Error {
    /// Failed to read the source file.
    ReadFailed(PathBuf, std::io::Error),

    /// Only UTF-8 content is supported.
    NotAnUtf8Str,

    /// The source is malformed or not supported by the renderer.
    ParsingFailed(usvg::Error),

    /// The raster backend failed to allocate or encode a probe canvas.
    NoCanvas,

    /// An icon size is zero or bigger than [`MAX_SIZE`](crate::MAX_SIZE).
    InvalidSize(u32),

    /// The same icon size was requested more than once.
    ///
    /// Output file names are derived from the size, so duplicates would
    /// overwrite each other.
    DuplicateSize(u32),

    /// Failed to encode a rendered icon as PNG.
    EncodingFailed(u32, png::EncodingError),

    /// Failed to write an icon file.
    WriteFailed(PathBuf, std::io::Error),
}

impl Error {
    /// Checks that the error means the rendering capability is absent.
    ///
    /// Such errors are raised by [`Rasterizer::prepare`](crate::Rasterizer::prepare)
    /// before any icon is written.
    pub fn is_capability_missing(&self) -> bool {
        matches!(
            self,
            Error::ReadFailed(..) | Error::NotAnUtf8Str | Error::ParsingFailed(_) | Error::NoCanvas
        )
    }
}

impl From<usvg::Error> for Error {
    fn from(e: usvg::Error) -> Self {
        match e {
            usvg::Error::NotAnUtf8Str => Error::NotAnUtf8Str,
            e => Error::ParsingFailed(e),
        }
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match *self {
            Error::ReadFailed(ref path, ref e) => {
                write!(f, "failed to read '{}' cause {}", path.display(), e)
            }
            Error::NotAnUtf8Str => {
                write!(f, "provided data has not an UTF-8 encoding")
            }
            Error::ParsingFailed(ref e) => {
                // `usvg::Error` already describes the failed stage.
                write!(f, "{}", e)
            }
            Error::NoCanvas => {
                write!(f, "the raster canvas creation failed")
            }
            Error::InvalidSize(size) => {
                write!(f, "{}x{} is not a valid icon size", size, size)
            }
            Error::DuplicateSize(size) => {
                write!(f, "icon size {} is set more than once", size)
            }
            Error::EncodingFailed(size, ref e) => {
                write!(f, "failed to encode a {}x{} icon cause {}", size, size, e)
            }
            Error::WriteFailed(ref path, ref e) => {
                write!(f, "failed to write '{}' cause {}", path.display(), e)
            }
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match *self {
            Error::ReadFailed(_, ref e) | Error::WriteFailed(_, ref e) => Some(e),
            Error::ParsingFailed(ref e) => Some(e),
            Error::EncodingFailed(_, ref e) => Some(e),
            _ => None,
        }
    }
}
