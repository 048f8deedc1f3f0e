use std::{fmt::Write as _, sync::LazyLock};

use regex::{Captures, Regex};

// {% img right /images/GiveUpSmall.jpg 180 240 some alt %}
static IMAGE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*\{\s*%\s*img\s*(right)?\s*(\S*)\s*(\d+)?\s*(\d+)?\s*(.*?)\s*%\s*\}").unwrap()
});
static BLOCK_END: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*\{\s*%\s*end(\w+)\s*(?:lang:)?(\w+)?\s*%").unwrap());
static BLOCK_START: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*\{\s*%\s*(\w+)\s*(?:lang:)?(\w+)?\s*%").unwrap());

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Image {
    pub src: String,
    pub right: bool,
    pub width: Option<String>,
    pub height: Option<String>,
    pub alt: Option<String>,
}

impl Image {
    pub fn to_html(&self) -> String {
        let mut tag = format!("<img src='{}'", self.src);
        if self.right {
            tag.push_str(" align='right'");
        }
        if let Some(width) = &self.width {
            let _ = write!(tag, " width='{width}'");
        }
        if let Some(height) = &self.height {
            let _ = write!(tag, " height='{height}'");
        }
        if let Some(alt) = &self.alt {
            let _ = write!(tag, " title='{alt}' alt='{alt}'");
        }
        tag.push_str("/>");
        tag
    }
}

/// What a body line turned out to be.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Line<'a> {
    Image(Image),
    BlockEnd,
    BlockStart {
        name: String,
        lang: Option<String>,
    },
    Text(&'a str),
}

type Classifier = for<'a> fn(&'a str) -> Option<Line<'a>>;

/// Tried in order, first hit wins. Block ends must come before block starts
/// or `{% endcodeblock %}` would open a block named `endcodeblock`.
const CLASSIFIERS: &[Classifier] = &[image, block_end, block_start];

pub(crate) fn classify(line: &str) -> Line<'_> {
    CLASSIFIERS
        .iter()
        .find_map(|c| c(line))
        .unwrap_or(Line::Text(line))
}

fn group(caps: &Captures, i: usize) -> Option<String> {
    caps.get(i)
        .map(|m| m.as_str())
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

fn image(line: &str) -> Option<Line<'_>> {
    let caps = IMAGE.captures(line)?;
    Some(Line::Image(Image {
        src: caps.get(2).map_or("", |m| m.as_str()).to_string(),
        right: caps.get(1).is_some(),
        width: group(&caps, 3),
        height: group(&caps, 4),
        alt: group(&caps, 5),
    }))
}

fn block_end(line: &str) -> Option<Line<'_>> {
    BLOCK_END.is_match(line).then_some(Line::BlockEnd)
}

fn block_start(line: &str) -> Option<Line<'_>> {
    let caps = BLOCK_START.captures(line)?;
    Some(Line::BlockStart {
        name: caps[1].to_string(),
        lang: group(&caps, 2),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn image_html(line: &str) -> String {
        match classify(line) {
            Line::Image(img) => img.to_html(),
            other => panic!("not an image: {other:?}"),
        }
    }

    #[test]
    fn full_image_tag() {
        assert_eq!(
            image_html("{% img right /images/x.jpg 180 240 some alt %}\n"),
            "<img src='/images/x.jpg' align='right' width='180' height='240' title='some alt' alt='some alt'/>"
        );
    }

    #[test]
    fn minimal_image_tag() {
        assert_eq!(image_html("{%img /a.png%}"), "<img src='/a.png'/>");
        assert_eq!(
            image_html("  {  %  img   /a.png   320  %  }"),
            "<img src='/a.png' width='320'/>"
        );
    }

    #[test]
    fn block_markers() {
        assert_eq!(
            classify("{% codeblock lang:python %}\n"),
            Line::BlockStart {
                name: "codeblock".into(),
                lang: Some("python".into())
            }
        );
        assert_eq!(
            classify("{%blockquote%}"),
            Line::BlockStart {
                name: "blockquote".into(),
                lang: None
            }
        );
        assert_eq!(classify("{% endcodeblock %}\n"), Line::BlockEnd);
        assert_eq!(classify("  {  %  endblockquote  %  }"), Line::BlockEnd);
    }

    #[test]
    fn bare_end_is_a_block_name() {
        assert_eq!(
            classify("{% end %}"),
            Line::BlockStart {
                name: "end".into(),
                lang: None
            }
        );
    }

    #[test]
    fn plain_lines_are_text() {
        assert_eq!(classify("Hello {{ world }}\n"), Line::Text("Hello {{ world }}\n"));
        assert_eq!(classify("{% include_code foo.py %}"), Line::Text("{% include_code foo.py %}"));
    }
}
