use std::path::PathBuf;

use anyhow::{bail, Context as _};
use clap::{command, Arg};
use context::Context;
use migrator::migrate;
use renderer::generate_renderer;

mod context;
mod error;
mod metadata;
mod migrator;
mod normalizer;
mod parser;
mod renderer;

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let matches = command!()
        .about("Converts Octopress posts into Nikola posts")
        .args(&[
            Arg::new("source_dir")
                .help("Directory of Octopress posts (YYYY-MM-DD-<slug>.<ext>)")
                .required(true)
                .value_parser(clap::value_parser!(PathBuf)),
            Arg::new("dest_dir")
                .help("Directory of output. Posts are written to <year>/<month>/<slug>.md")
                .required(true)
                .value_parser(clap::value_parser!(PathBuf)),
        ])
        .get_matches();

    let source_dir: &PathBuf = matches
        .get_one("source_dir")
        .context("source_dir is required")?;
    if !source_dir.is_dir() {
        bail!("source_dir must be a directory.");
    }
    let dest_dir: &PathBuf = matches
        .get_one("dest_dir")
        .context("dest_dir is required")?;
    if dest_dir.exists() && !dest_dir.is_dir() {
        bail!("if dest_dir exists, it must be a directory.");
    }

    let ctx = Context::new(
        source_dir.to_owned(),
        dest_dir.to_owned(),
        generate_renderer()?,
    );
    migrate(&ctx)?;

    Ok(())
}
