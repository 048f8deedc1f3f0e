use std::path::{Path, PathBuf};

use log::warn;

use crate::metadata::Metadata;

/// Where a post ends up, and the slug it is written under.
///
/// Dated posts go to `<dest>/<year>/<month>/<slug>.md`. Anything else lands
/// in `<dest>` under its file stem so its content is not lost.
pub(super) fn destination(dest_dir: &Path, source: &Path, meta: &Metadata) -> (PathBuf, String) {
    match (meta.get("year"), meta.get("month"), meta.get("slug")) {
        (Some(year), Some(month), Some(slug)) => {
            let slug = slug.display();
            let path = dest_dir
                .join(year.display())
                .join(month.display())
                .join(format!("{slug}.md"));
            (path, slug)
        }
        _ => {
            let stem = source
                .file_stem()
                .map(|s| s.to_string_lossy().to_string())
                .unwrap_or_default();
            warn!("no date in the name of {source:?}, writing it as {stem}.md");
            (dest_dir.join(format!("{stem}.md")), stem)
        }
    }
}

/// Regular, non-hidden files directly inside `dir`, sorted by name.
pub(super) fn list_posts(dir: &Path) -> std::io::Result<Vec<PathBuf>> {
    let mut posts = vec![];
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        if !entry.metadata()?.is_file() {
            continue;
        }
        if entry.file_name().to_string_lossy().starts_with('.') {
            continue;
        }
        posts.push(entry.path());
    }
    posts.sort();
    Ok(posts)
}
