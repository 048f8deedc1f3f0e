use std::{path::Path, sync::LazyLock};

use log::{debug, warn};
use regex::Regex;

use crate::{
    error::PostError,
    metadata::{FilenameParts, Metadata},
    normalizer::{normalize, reconcile_date},
};

use classify::{classify, Line};

mod classify;

const FENCE: &str = "```";

static DELIMITER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\s*-+\s*$").unwrap());

/// The block an Octopress tag opened and that governs the following lines.
#[derive(Debug, Clone, PartialEq, Eq)]
enum BlockMode {
    None,
    Blockquote,
    Codeblock,
    /// Any other named block; its lines pass through untouched.
    Other(String),
}

impl BlockMode {
    fn from_name(name: &str) -> Self {
        match name {
            "blockquote" => BlockMode::Blockquote,
            "codeblock" => BlockMode::Codeblock,
            other => BlockMode::Other(other.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct ParsedPost {
    pub meta: Metadata,
    pub body: String,
}

/// Parses an Octopress post into normalized metadata and a Nikola body.
///
/// A missing front matter block is not fatal: the whole file becomes body.
/// Only unreadable front matter and unparseable dates fail the post.
pub(crate) fn parse(path: &Path, raw: &str) -> Result<ParsedPost, PostError> {
    let (front_matter, body_lines) = match split(path, raw) {
        Ok(split) => split,
        Err(e) => {
            warn!("{e}; treating the whole file as body");
            (String::new(), raw.split_inclusive('\n').collect())
        }
    };

    let mut meta = Metadata::from_yaml(&front_matter).map_err(|reason| PostError::FrontMatter {
        path: path.to_path_buf(),
        reason,
    })?;
    debug!("got meta: {meta:?}");
    if !meta.contains("title") {
        warn!("{path:?} has no title");
    }

    let parts = FilenameParts::from_path(path);
    if parts.is_none() {
        warn!(
            "{}",
            PostError::FilenamePatternMismatch {
                path: path.to_path_buf()
            }
        );
    }

    reconcile_date(&mut meta, parts.as_ref()).map_err(|value| PostError::InvalidDate {
        path: path.to_path_buf(),
        value,
    })?;
    let meta = normalize(meta, parts.as_ref());

    Ok(ParsedPost {
        meta,
        body: transcode(path, &body_lines),
    })
}

/// Separates the front matter text from the body lines.
///
/// The first two delimiter lines are consumed; everything before the second
/// one is front matter.
fn split<'a>(path: &Path, raw: &'a str) -> Result<(String, Vec<&'a str>), PostError> {
    let mut delimiters = 0;
    let mut front_matter = String::new();
    let mut body = vec![];

    for line in raw.split_inclusive('\n') {
        if delimiters >= 2 {
            body.push(line);
        } else if DELIMITER.is_match(line) {
            delimiters += 1;
        } else {
            front_matter.push_str(line);
        }
    }

    if delimiters < 2 {
        return Err(PostError::MalformedPost {
            path: path.to_path_buf(),
            found: delimiters,
        });
    }
    Ok((front_matter, body))
}

/// Rewrites Octopress image, blockquote and codeblock tags in a single pass.
fn transcode(path: &Path, lines: &[&str]) -> String {
    let mut mode = BlockMode::None;
    let mut body = String::new();

    for &line in lines {
        match classify(line) {
            Line::Image(img) => {
                body.push_str(&img.to_html());
                body.push('\n');
            }
            Line::BlockEnd => {
                if mode == BlockMode::Codeblock {
                    push_fence(&mut body, None);
                }
                mode = BlockMode::None;
            }
            Line::BlockStart { name, lang } => {
                mode = BlockMode::from_name(&name);
                if mode == BlockMode::Codeblock {
                    push_fence(&mut body, lang.as_deref().filter(|&l| l != "text"));
                }
            }
            Line::Text(text) => {
                if mode == BlockMode::Blockquote {
                    body.push_str("> ");
                }
                body.push_str(text);
            }
        }
    }

    if mode == BlockMode::Codeblock {
        warn!("{path:?} ends inside a codeblock, closing it");
        push_fence(&mut body, None);
    }
    body
}

fn push_fence(body: &mut String, lang: Option<&str>) {
    if !body.is_empty() && !body.ends_with('\n') {
        body.push('\n');
    }
    body.push_str(FENCE);
    body.push_str(lang.unwrap_or_default());
    body.push('\n');
}
