// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::path::{Path, PathBuf};

use crate::usvg::fontdb;
use crate::Error;

/// Icon sizes generated by default, in pixels.
pub const DEFAULT_SIZES: &[u32] = &[72, 96, 120, 128, 144, 152, 167, 180, 192, 384, 512];

/// The biggest supported icon size, in pixels.
///
/// A canvas of this size takes 256MiB.
pub const MAX_SIZE: u32 = 8192;

/// The default source image path.
pub const DEFAULT_SOURCE: &str = "icons/logo.svg";

/// The default output directory.
pub const DEFAULT_OUT_DIR: &str = "icons";

/// Icon set generation options.
#[derive(Clone, Debug)]
pub struct Options {
    /// Path to the source SVG.
    ///
    /// Default: `icons/logo.svg`
    pub source: PathBuf,

    /// A directory the icons will be written to.
    ///
    /// Must already exist.
    ///
    /// Default: `icons`
    pub out_dir: PathBuf,

    /// Icon sizes, in the order they will be generated.
    ///
    /// Each icon is a `size x size` square.
    pub sizes: Vec<u32>,

    /// An icon background color.
    ///
    /// `None` equals to transparent.
    pub background: Option<svgtypes::Color>,

    /// Directories to load additional fonts from.
    pub font_dirs: Vec<PathBuf>,

    /// Disables system fonts loading.
    pub skip_system_fonts: bool,
}

impl Default for Options {
    fn default() -> Options {
        Options {
            source: PathBuf::from(DEFAULT_SOURCE),
            out_dir: PathBuf::from(DEFAULT_OUT_DIR),
            sizes: DEFAULT_SIZES.to_vec(),
            background: None,
            font_dirs: Vec::new(),
            skip_system_fonts: false,
        }
    }
}

impl Options {
    /// Returns an output path for the specified icon size.
    pub fn output_path(&self, size: u32) -> PathBuf {
        self.out_dir.join(icon_file_name(size))
    }

    /// Checks that every size is in `1..=MAX_SIZE` and unique.
    pub fn validate_sizes(&self) -> Result<(), Error> {
        for (i, &size) in self.sizes.iter().enumerate() {
            if size == 0 || size > MAX_SIZE {
                return Err(Error::InvalidSize(size));
            }

            if self.sizes[..i].contains(&size) {
                return Err(Error::DuplicateSize(size));
            }
        }

        Ok(())
    }

    /// Builds a font database according to the font options.
    pub fn load_fonts(&self) -> fontdb::Database {
        let mut fontdb = fontdb::Database::new();
        if !self.skip_system_fonts {
            fontdb.load_system_fonts();
        }

        for path in &self.font_dirs {
            fontdb.load_fonts_dir(path);
        }

        fontdb
    }

    pub(crate) fn usvg_options(&self) -> crate::usvg::Options {
        let mut opt = crate::usvg::Options::default();
        opt.resources_dir = resources_dir(&self.source);
        opt
    }
}

/// Returns an icon file name for the specified size.
///
/// The name depends only on the size, e.g. `icon-72x72.png`.
pub fn icon_file_name(size: u32) -> String {
    format!("icon-{}x{}.png", size, size)
}

fn resources_dir(source: &Path) -> Option<PathBuf> {
    // Get input file absolute directory.
    std::fs::canonicalize(source)
        .ok()
        .and_then(|p| p.parent().map(|p| p.to_path_buf()))
}
