// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::path::{Path, PathBuf};

use crate::{tiny_skia, usvg, Error, Options, MAX_SIZE};

/// A source SVG image.
///
/// Read once and never modified.
#[derive(Clone, Debug)]
pub struct SourceImage {
    path: PathBuf,
    text: String,
}

impl SourceImage {
    /// Reads a source image from a file.
    ///
    /// SVGZ files are decompressed.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let path = path.as_ref();
        let mut data = std::fs::read(path).map_err(|e| Error::ReadFailed(path.to_owned(), e))?;

        if data.starts_with(&[0x1f, 0x8b]) {
            data = usvg::decompress_svgz(&data)?;
        }

        let text = String::from_utf8(data).map_err(|_| Error::NotAnUtf8Str)?;
        Ok(SourceImage {
            path: path.to_owned(),
            text,
        })
    }

    /// Creates a source image from an SVG string.
    ///
    /// `path` is used only for reporting.
    pub fn from_text<P: Into<PathBuf>>(path: P, text: &str) -> Self {
        SourceImage {
            path: path.into(),
            text: text.to_string(),
        }
    }

    /// Returns the path the image was loaded from.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the SVG markup.
    pub fn text(&self) -> &str {
        &self.text
    }
}

/// A rasterizer that is ready to render icons.
///
/// Can be created only via [`Rasterizer::prepare`], which makes sure that
/// the source can be rendered at all.
pub struct Rasterizer {
    tree: usvg::Tree,
    background: Option<tiny_skia::Color>,
}

impl Rasterizer {
    /// Checks the rendering capability for the provided source.
    ///
    /// Parses the source and probes the raster backend with a 1x1 render.
    /// Any error returned here is a capability error.
    pub fn prepare(source: &SourceImage, opt: &Options) -> Result<Self, Error> {
        let fontdb = opt.load_fonts();
        let tree = usvg::Tree::from_str(source.text(), &opt.usvg_options(), &fontdb)?;

        let size = tree.size();
        let mut probe = tiny_skia::Pixmap::new(1, 1).ok_or(Error::NoCanvas)?;
        resvg::render(&tree, fit_to_square(size, 1), &mut probe.as_mut());
        probe.encode_png().map_err(|_| Error::NoCanvas)?;

        if size.width() != size.height() {
            log::warn!(
                "'{}' is not square ({}x{}). Icons will be letterboxed.",
                source.path().display(),
                size.width(),
                size.height()
            );
        }

        Ok(Rasterizer {
            tree,
            background: opt.background.map(svg_to_skia_color),
        })
    }

    /// Renders the source as a `size x size` PNG.
    ///
    /// `size` must be in `1..=MAX_SIZE`.
    pub fn render(&self, size: u32) -> Result<RasterOutput, Error> {
        if size > MAX_SIZE {
            return Err(Error::InvalidSize(size));
        }

        let mut pixmap = tiny_skia::Pixmap::new(size, size).ok_or(Error::InvalidSize(size))?;

        if let Some(background) = self.background {
            pixmap.fill(background);
        }

        let ts = fit_to_square(self.tree.size(), size);
        log::debug!("Rendering {}x{} with {:?}.", size, size, ts);
        resvg::render(&self.tree, ts, &mut pixmap.as_mut());

        let data = pixmap
            .encode_png()
            .map_err(|e| Error::EncodingFailed(size, e))?;

        Ok(RasterOutput { size, data })
    }
}

/// A rendered icon.
pub struct RasterOutput {
    size: u32,
    data: Vec<u8>,
}

impl RasterOutput {
    /// Returns the icon width and height.
    pub fn size(&self) -> u32 {
        self.size
    }

    /// Returns PNG encoded data.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Writes the icon to a file.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), Error> {
        let path = path.as_ref();
        std::fs::write(path, &self.data).map_err(|e| Error::WriteFailed(path.to_owned(), e))
    }
}

/// Returns a transform that fits `size` into a `target x target` square,
/// keeping the aspect ratio and centering the content.
fn fit_to_square(size: usvg::Size, target: u32) -> tiny_skia::Transform {
    let target = target as f32;
    let scale = (target / size.width()).min(target / size.height());
    let dx = (target - size.width() * scale) / 2.0;
    let dy = (target - size.height() * scale) / 2.0;
    tiny_skia::Transform::from_row(scale, 0.0, 0.0, scale, dx, dy)
}

fn svg_to_skia_color(color: svgtypes::Color) -> tiny_skia::Color {
    tiny_skia::Color::from_rgba8(color.red, color.green, color.blue, color.alpha)
}
