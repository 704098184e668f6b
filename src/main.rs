// SPDX-License-Identifier: MPL-2.0
use image_enhancer::app::{self, paths, Flags};
use image_enhancer::media::first_candidate;
use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::EnvFilter;

const HELP: &str = "\
Usage: image_enhancer [OPTIONS] [IMAGE]

Options:
  --lang <ID>         UI language (e.g. en-US, fr)
  --config-dir <DIR>  Directory holding settings.toml
  -h, --help          Print this help

IMAGE may be a file path or a base64 `data:` URL.
";

fn init_tracing() {
    let filter = EnvFilter::builder()
        .with_default_directive(Level::INFO.into())
        .from_env_lossy();
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn main() -> iced::Result {
    init_tracing();

    let mut args = pico_args::Arguments::from_env();
    if args.contains(["-h", "--help"]) {
        print!("{HELP}");
        return Ok(());
    }

    let lang: Option<String> = args.opt_value_from_str("--lang").unwrap_or_else(|err| {
        tracing::warn!(%err, "ignoring invalid --lang");
        None
    });
    let config_dir: Option<String> = args.opt_value_from_str("--config-dir").unwrap_or_else(|err| {
        tracing::warn!(%err, "ignoring invalid --config-dir");
        None
    });
    let free: Vec<PathBuf> = args.finish().into_iter().map(PathBuf::from).collect();
    if free.len() > 1 {
        tracing::warn!(count = free.len(), "only the first image argument is used");
    }
    let file_path = first_candidate(&free).and_then(|p| p.to_str().map(str::to_owned));

    paths::init_cli_overrides(config_dir);

    app::run(Flags { lang, file_path })
}
