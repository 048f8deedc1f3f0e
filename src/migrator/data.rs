use serde::Serialize;

use crate::parser::ParsedPost;

#[derive(Serialize, Debug)]
pub(super) struct PostPageData<'a> {
    pub title: String,
    pub date: String,
    pub slug: String,
    pub link: String,
    pub description: String,
    pub tags: String,
    pub body: &'a str,
}

impl<'a> PostPageData<'a> {
    pub fn new(post: &'a ParsedPost, slug: String) -> Self {
        let meta = &post.meta;
        Self {
            title: one_line(&meta.display("title")),
            date: one_line(&meta.display("date")),
            slug: one_line(&slug),
            link: one_line(&meta.display("link")),
            description: one_line(&meta.display("description")),
            tags: one_line(&meta.display("tags")),
            body: &post.body,
        }
    }
}

/// Header values must fit on their `.. key: value` line; YAML block scalars
/// are joined with single spaces.
fn one_line(value: &str) -> String {
    value
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse;
    use std::path::Path;

    #[test]
    fn block_scalars_fit_on_one_line() {
        let post = parse(
            Path::new("2012-09-15-money.markdown"),
            "---\ntitle: |\n  multi\n  line\ndescription: >\n  folded\n\n  paragraphs\n---\nbody\n",
        )
        .unwrap();
        let data = PostPageData::new(&post, "money".to_string());
        assert_eq!(data.title, "multi line");
        assert_eq!(data.description, "folded paragraphs");
        assert_eq!(data.body, "body\n");
    }

    #[test]
    fn single_line_values_are_untouched() {
        assert_eq!(one_line("How  to make money"), "How  to make money");
        assert_eq!(one_line(""), "");
    }
}
