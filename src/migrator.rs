use std::{
    collections::HashSet,
    fs::OpenOptions,
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use log::{error, info, warn};

use crate::{context::Context, error::PostError, parser::parse, renderer::POST_TEMPLATE_NAME};

use data::PostPageData;
use utils::{destination, list_posts};

mod data;
mod utils;

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub(crate) struct Summary {
    pub converted: usize,
    pub skipped: usize,
    /// Posts that replaced the output of an earlier post in the same run.
    pub overwritten: usize,
}

/// Migrates every post in the source directory.
///
/// A post that fails is logged and skipped; only a source directory that
/// can't be listed aborts the run.
pub(crate) fn migrate(ctx: &Context) -> anyhow::Result<Summary> {
    let posts = list_posts(&ctx.source_dir)
        .with_context(|| format!("while listing {:?}", ctx.source_dir))?;

    let mut summary = Summary::default();
    let mut written = HashSet::new();
    for post in posts {
        info!("parsing {post:?}");
        match migrate_post(ctx, &post) {
            Ok(out_path) => {
                info!(" - writing {out_path:?}");
                if !written.insert(out_path.clone()) {
                    warn!("{post:?} overwrote {out_path:?}, written earlier in this run");
                    summary.overwritten += 1;
                }
                summary.converted += 1;
            }
            Err(e) => {
                error!("skipping {post:?}: {e}");
                summary.skipped += 1;
            }
        }
    }

    info!(
        "{} post(s) converted, {} skipped, {} overwritten",
        summary.converted, summary.skipped, summary.overwritten
    );
    Ok(summary)
}

fn migrate_post(ctx: &Context, path: &Path) -> Result<PathBuf, PostError> {
    let raw = std::fs::read_to_string(path).map_err(|source| PostError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let post = parse(path, &raw)?;

    let (out_path, slug) = destination(&ctx.dest_dir, path, &post.meta);
    if let Some(parent) = out_path.parent() {
        fs_extra::dir::create_all(parent, false).map_err(|source| PostError::CreateDir {
            path: parent.to_path_buf(),
            source,
        })?;
    }

    let write_error = |source: std::io::Error| PostError::Write {
        path: out_path.clone(),
        source,
    };
    let fd = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(&out_path)
        .map_err(write_error)?;
    let mut writer = BufWriter::new(fd);

    let data = PostPageData::new(&post, slug);
    ctx.handlebars
        .render_to_write(POST_TEMPLATE_NAME, &data, &mut writer)
        .map_err(|source| PostError::Render {
            path: out_path.clone(),
            source,
        })?;
    writer.flush().map_err(write_error)?;

    Ok(out_path)
}
