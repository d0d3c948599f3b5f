// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

#![allow(clippy::uninlined_format_args)]

use std::path;

use icon_rasterizer::{Error, Options};

fn main() {
    if let Err(e) = process() {
        eprintln!("Error: {}.", e);
        std::process::exit(1);
    }
}

/// Runs `f` and prints its duration to stderr when `perf` is set.
fn timed<F, T>(perf: bool, name: &str, f: F) -> T
where
    F: FnOnce() -> T,
{
    let now = std::time::Instant::now();
    let result = f();
    if perf {
        let elapsed = now.elapsed().as_micros() as f64 / 1000.0;
        eprintln!("{}: {:.2}ms", name, elapsed);
    }

    result
}

fn process() -> Result<(), String> {
    let args = match parse_args() {
        Ok(args) => args,
        Err(e) => {
            println!("{}", HELP);
            return Err(e);
        }
    };

    if let Ok(()) = log::set_logger(&LOGGER) {
        log::set_max_level(args.log_level);
    }

    let opt = &args.opt;
    let result = timed(args.perf, "Generating", || {
        icon_rasterizer::generate(opt, |path, _| {
            println!("{}", icon_rasterizer::generated_message(path))
        })
    });

    match result {
        Ok(count) => {
            println!();
            println!("{}", icon_rasterizer::summary_message(count));
            Ok(())
        }
        Err(e) if e.is_capability_missing() => unavailable(opt, e),
        Err(e) => Err(e.to_string()),
    }
}

/// Reports that icons cannot be rendered at all and exits.
fn unavailable(opt: &Options, e: Error) -> ! {
    eprintln!("Error: {}.", e);
    println!();
    println!("{}", icon_rasterizer::fallback_instructions(opt));
    std::process::exit(1);
}

const HELP: &str = "\
icon-rasterizer renders an SVG logo into a set of square PNG icons.

USAGE:
  icon-rasterizer [OPTIONS] [in-svg]

  icon-rasterizer
  icon-rasterizer -s 72,512 logo.svg
  icon-rasterizer --out-dir public/icons --background white logo.svg

OPTIONS:
      --help                    Prints this help
  -V, --version                 Prints version

  -o, --out-dir DIR             Sets the output directory. Must exist
                                [default: icons]
  -s, --sizes LIST              Sets a comma-separated list of icon sizes
                                [default: 72,96,120,128,144,152,167,180,192,384,512]
  --background COLOR            Sets the background color
                                Examples: red, #fff, #fff000

  --use-fonts-dir PATH          Loads all fonts from the specified directory
                                into the fonts database.
                                This option can be set multiple times
  --skip-system-fonts           Disables system fonts loading

  --perf                        Prints the generation time
  --quiet                       Disables warnings
  --verbose                     Prints debug messages

ARGS:
  [in-svg]                      Input file [default: icons/logo.svg]
";

#[derive(Debug)]
struct CliArgs {
    out_dir: Option<path::PathBuf>,
    sizes: Option<Vec<u32>>,
    background: Option<svgtypes::Color>,

    font_dirs: Vec<path::PathBuf>,
    skip_system_fonts: bool,

    perf: bool,
    quiet: bool,
    verbose: bool,

    input: Option<path::PathBuf>,
}

fn collect_args() -> Result<CliArgs, pico_args::Error> {
    let mut input = pico_args::Arguments::from_env();

    if input.contains("--help") {
        print!("{}", HELP);
        std::process::exit(0);
    }

    if input.contains(["-V", "--version"]) {
        println!("{}", env!("CARGO_PKG_VERSION"));
        std::process::exit(0);
    }

    Ok(CliArgs {
        out_dir: input.opt_value_from_str(["-o", "--out-dir"])?,
        sizes: input.opt_value_from_fn(["-s", "--sizes"], parse_sizes)?,
        background: input.opt_value_from_str("--background")?,

        font_dirs: input.values_from_str("--use-fonts-dir")?,
        skip_system_fonts: input.contains("--skip-system-fonts"),

        perf: input.contains("--perf"),
        quiet: input.contains("--quiet"),
        verbose: input.contains("--verbose"),

        input: input.opt_free_from_str()?,
    })
}

fn parse_sizes(s: &str) -> Result<Vec<u32>, String> {
    let mut sizes = Vec::new();
    for size in s.split(',') {
        let size = size.trim();
        if size.is_empty() {
            continue;
        }

        let n: u32 = size.parse().map_err(|_| format!("invalid size '{}'", size))?;
        if n == 0 {
            return Err("SIZE cannot be zero".to_string());
        }

        if n > icon_rasterizer::MAX_SIZE {
            return Err(format!("SIZE cannot be bigger than {}", icon_rasterizer::MAX_SIZE));
        }

        if sizes.contains(&n) {
            return Err(format!("size {} is set more than once", n));
        }

        sizes.push(n);
    }

    if sizes.is_empty() {
        return Err("sizes list cannot be empty".to_string());
    }

    Ok(sizes)
}

struct Args {
    perf: bool,
    log_level: log::LevelFilter,
    opt: Options,
}

fn parse_args() -> Result<Args, String> {
    let args = collect_args().map_err(|e| e.to_string())?;

    let mut opt = Options::default();
    if let Some(input) = args.input {
        opt.source = input;
    }

    if let Some(out_dir) = args.out_dir {
        opt.out_dir = out_dir;
    }

    if let Some(sizes) = args.sizes {
        opt.sizes = sizes;
    }

    opt.background = args.background;
    opt.font_dirs = args.font_dirs;
    opt.skip_system_fonts = args.skip_system_fonts;

    let log_level = if args.quiet {
        log::LevelFilter::Off
    } else if args.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Warn
    };

    Ok(Args {
        perf: args.perf,
        log_level,
        opt,
    })
}

/// A stderr logger.
///
/// Filtering is done by `log::set_max_level`.
static LOGGER: StderrLogger = StderrLogger;
struct StderrLogger;
impl log::Log for StderrLogger {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &log::Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let label = match record.level() {
            log::Level::Error => "Error",
            log::Level::Warn => "Warning",
            log::Level::Info => "Info",
            log::Level::Debug | log::Level::Trace => "Debug",
        };

        // Renderer messages keep their origin.
        if record.target().starts_with(env!("CARGO_CRATE_NAME")) {
            eprintln!("{}: {}", label, record.args());
        } else {
            eprintln!("{} (in {}): {}", label, record.target(), record.args());
        }
    }

    fn flush(&self) {}
}
