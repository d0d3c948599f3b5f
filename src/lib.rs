// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

/*!
`icon-rasterizer` renders a single SVG logo into a set of square PNG icons.

```no_run
let opt = icon_rasterizer::Options::default();
let count = icon_rasterizer::generate(&opt, |path, _| {
    println!("{}", icon_rasterizer::generated_message(path))
})?;
println!("{}", icon_rasterizer::summary_message(count));
# Ok::<(), icon_rasterizer::Error>(())
```
*/

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![allow(clippy::field_reassign_with_default)]
#![allow(clippy::uninlined_format_args)]

pub use resvg::tiny_skia;
pub use resvg::usvg;

mod error;
mod options;
mod render;

pub use error::Error;
pub use options::{
    icon_file_name, Options, DEFAULT_OUT_DIR, DEFAULT_SIZES, DEFAULT_SOURCE, MAX_SIZE,
};
pub use render::{RasterOutput, Rasterizer, SourceImage};

/// The online converter suggested when rendering is not possible.
pub const FALLBACK_CONVERTER_URL: &str = "https://www.pwabuilder.com/imageGenerator";

/// Generates the whole icon set.
///
/// Sizes are validated and the rendering capability is checked once before
/// anything is written. After that, icons are rendered and written one by
/// one, in order. The first error aborts the batch.
///
/// `on_written` is called after each written icon.
///
/// Returns the number of generated icons.
pub fn generate<F>(opt: &Options, mut on_written: F) -> Result<usize, Error>
where
    F: FnMut(&std::path::Path, u32),
{
    opt.validate_sizes()?;

    let source = SourceImage::load(&opt.source)?;
    let rasterizer = Rasterizer::prepare(&source, opt)?;

    for &size in &opt.sizes {
        let icon = rasterizer.render(size)?;
        let path = opt.output_path(size);
        icon.save(&path)?;
        on_written(&path, size);
    }

    Ok(opt.sizes.len())
}

/// Returns a line reported after an icon has been written.
pub fn generated_message(path: &std::path::Path) -> String {
    format!("Generated {}", path.display())
}

/// Returns a line reported after the whole set has been generated.
pub fn summary_message(count: usize) -> String {
    format!("Successfully generated {} icon sizes.", count)
}

/// Returns manual conversion instructions.
///
/// Should be shown when [`Error::is_capability_missing`] is `true`.
pub fn fallback_instructions(opt: &Options) -> String {
    format!(
        "Or use an online converter:\n\
         1. Visit {}\n\
         2. Upload {}\n\
         3. Download generated icons\n\
         4. Place in {}/ directory",
        FALLBACK_CONVERTER_URL,
        opt.source.display(),
        opt.out_dir.display(),
    )
}
