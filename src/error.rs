use std::{io, path::PathBuf};

use thiserror::Error;

/// Everything that can go wrong while migrating a single post.
///
/// None of these abort the batch: the driver logs them and moves on.
#[derive(Error, Debug)]
pub(crate) enum PostError {
    #[error("failed to read {path:?}: {source}")]
    Read { path: PathBuf, source: io::Error },

    /// The file name does not look like `YYYY-MM-DD-<slug>.<ext>`.
    #[error("can't get slug from {path:?}")]
    FilenamePatternMismatch { path: PathBuf },

    /// Fewer than two front matter delimiters were found.
    #[error("{path:?} has {found} front matter delimiter(s), expected 2")]
    MalformedPost { path: PathBuf, found: usize },

    #[error("invalid front matter in {path:?}: {reason}")]
    FrontMatter { path: PathBuf, reason: String },

    #[error("invalid date {value:?} in {path:?}")]
    InvalidDate { path: PathBuf, value: String },

    #[error("failed to create directory {path:?}: {source}")]
    CreateDir {
        path: PathBuf,
        source: fs_extra::error::Error,
    },

    #[error("failed to write {path:?}: {source}")]
    Write { path: PathBuf, source: io::Error },

    #[error("failed to render {path:?}: {source}")]
    Render {
        path: PathBuf,
        source: handlebars::RenderError,
    },
}
