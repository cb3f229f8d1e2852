// SPDX-License-Identifier: MPL-2.0
use fitlens::app::{self, Flags};
use fitlens::media::{extensions, Dimensions};
use std::ffi::OsStr;
use std::path::PathBuf;
use std::str::FromStr;
use tracing_subscriber::EnvFilter;

const HELP: &str = "\
fitlens

USAGE:
  fitlens [OPTIONS] [IMAGE]

OPTIONS:
  --config <PATH>     Settings file to use instead of the per-user one
  --data-dir <PATH>   Directory the configured asset is installed into
  --target <W>x<H>    Bounding box used to pick the decode sample size
  --screen <W>x<H>    Output size instead of the window size
  -h, --help          Print this help

ARGS:
  IMAGE               Image to show in place of the configured asset
";

/// `<width>x<height>` with both sides non-zero.
#[derive(Debug, Clone, Copy)]
struct SizeArg(Dimensions);

impl FromStr for SizeArg {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (width, height) = s
            .split_once(['x', 'X'])
            .ok_or_else(|| format!("expected <W>x<H>, got '{s}'"))?;
        let width: u32 = width.trim().parse().map_err(|e| format!("width: {e}"))?;
        let height: u32 = height.trim().parse().map_err(|e| format!("height: {e}"))?;
        if width == 0 || height == 0 {
            return Err(format!("size must be non-zero, got '{s}'"));
        }
        Ok(Self(Dimensions::new(width, height)))
    }
}

fn parse_flags() -> Result<Option<Flags>, pico_args::Error> {
    let mut args = pico_args::Arguments::from_env();
    if args.contains(["-h", "--help"]) {
        print!("{HELP}");
        return Ok(None);
    }

    let config_path: Option<PathBuf> = args.opt_value_from_os_str("--config", parse_path)?;
    let data_dir: Option<PathBuf> = args.opt_value_from_os_str("--data-dir", parse_path)?;
    let target: Option<SizeArg> = args.opt_value_from_str("--target")?;
    let screen: Option<SizeArg> = args.opt_value_from_str("--screen")?;
    let image_path = args.finish().into_iter().next().map(PathBuf::from);

    Ok(Some(Flags {
        config_path,
        image_path,
        target: target.map(|s| s.0),
        screen: screen.map(|s| s.0),
        data_dir,
    }))
}

fn parse_path(s: &OsStr) -> Result<PathBuf, &'static str> {
    Ok(PathBuf::from(s))
}

fn main() -> iced::Result {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("fitlens=info")),
        )
        .init();

    let flags = match parse_flags() {
        Ok(Some(flags)) => flags,
        Ok(None) => return Ok(()),
        Err(err) => {
            eprintln!("Error: {err}\n\n{HELP}");
            std::process::exit(2);
        }
    };

    if let Some(path) = &flags.image_path {
        if !extensions::is_supported_image(path) {
            tracing::warn!(path = %path.display(), "Unrecognised image extension");
        }
    }

    app::run(flags)
}
