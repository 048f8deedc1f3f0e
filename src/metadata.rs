use std::{collections::BTreeMap, path::Path, sync::LazyLock};

use chrono::NaiveDateTime;
use regex::Regex;
use serde_yaml::Value;

pub(crate) const DATE_FORMAT: &str = "%Y/%m/%d %H:%M";

static FILENAME_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d{4})-(\d{2})-(\d{2})-(.*?)\.").unwrap());

/// A single front matter value.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum MetaValue {
    Null,
    Scalar(String),
    List(Vec<String>),
    Date(NaiveDateTime),
}

impl MetaValue {
    /// Coerces into a list: scalars become one element, null becomes empty.
    pub fn to_list(&self) -> Vec<String> {
        match self {
            MetaValue::Null => vec![],
            MetaValue::Scalar(s) => vec![s.clone()],
            MetaValue::List(items) => items.clone(),
            MetaValue::Date(d) => vec![d.format(DATE_FORMAT).to_string()],
        }
    }

    /// Renders the value as it appears in a Nikola header line.
    pub fn display(&self) -> String {
        match self {
            MetaValue::Null => String::new(),
            MetaValue::Scalar(s) => s.clone(),
            MetaValue::List(items) => items.join(", "),
            MetaValue::Date(d) => d.format(DATE_FORMAT).to_string(),
        }
    }
}

impl From<Value> for MetaValue {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => MetaValue::Null,
            Value::Sequence(items) => MetaValue::List(
                items
                    .into_iter()
                    .filter(|v| !v.is_null())
                    .map(scalar_to_string)
                    .collect(),
            ),
            v => MetaValue::Scalar(scalar_to_string(v)),
        }
    }
}

fn scalar_to_string(value: Value) -> String {
    match value {
        Value::String(s) => s,
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::Null => String::new(),
        Value::Tagged(tagged) => scalar_to_string(tagged.value),
        // nested structures are kept as their YAML text
        v => serde_yaml::to_string(&v)
            .map(|s| s.trim_end().to_string())
            .unwrap_or_default(),
    }
}

/// Parsed front matter. Keys are not fixed; unknown ones pass through.
#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct Metadata {
    entries: BTreeMap<String, MetaValue>,
}

impl Metadata {
    /// Parses a YAML front matter document. An empty document is an empty
    /// mapping; any other non-mapping document is rejected.
    pub fn from_yaml(source: &str) -> Result<Self, String> {
        if source.trim().is_empty() {
            return Ok(Self::default());
        }
        let value: Value = serde_yaml::from_str(source).map_err(|e| e.to_string())?;
        match value {
            Value::Null => Ok(Self::default()),
            Value::Mapping(mapping) => {
                let mut meta = Self::default();
                for (key, value) in mapping {
                    meta.insert(scalar_to_string(key), value.into());
                }
                Ok(meta)
            }
            _ => Err("front matter is not a mapping".to_string()),
        }
    }

    pub fn get(&self, key: &str) -> Option<&MetaValue> {
        self.entries.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: MetaValue) {
        self.entries.insert(key.into(), value);
    }

    pub fn remove(&mut self, key: &str) -> Option<MetaValue> {
        self.entries.remove(key)
    }

    /// The displayed value of `key`, or an empty string when absent.
    pub fn display(&self, key: &str) -> String {
        self.get(key).map(MetaValue::display).unwrap_or_default()
    }
}

/// Components captured from a `YYYY-MM-DD-<slug>.<ext>` file name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct FilenameParts {
    pub year: String,
    pub month: String,
    pub day: String,
    pub slug: String,
}

impl FilenameParts {
    pub fn from_path(path: &Path) -> Option<Self> {
        let file_name = path.file_name()?.to_str()?;
        let caps = FILENAME_PATTERN.captures(file_name)?;
        Some(Self {
            year: caps[1].to_string(),
            month: caps[2].to_string(),
            day: caps[3].to_string(),
            slug: caps[4].to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filename_parts_from_octopress_name() {
        let parts =
            FilenameParts::from_path(Path::new("source/_posts/2012-09-15-how-to-make-money.markdown"))
                .unwrap();
        assert_eq!(parts.year, "2012");
        assert_eq!(parts.month, "09");
        assert_eq!(parts.day, "15");
        assert_eq!(parts.slug, "how-to-make-money");
    }

    #[test]
    fn slug_stops_at_first_dot() {
        let parts = FilenameParts::from_path(Path::new("2012-09-15-foo.markdown.bak")).unwrap();
        assert_eq!(parts.slug, "foo");
    }

    #[test]
    fn date_may_follow_a_prefix() {
        let parts = FilenameParts::from_path(Path::new("draft-2012-09-15-foo.markdown")).unwrap();
        assert_eq!((parts.year.as_str(), parts.month.as_str()), ("2012", "09"));
        assert_eq!(parts.slug, "foo");
    }

    #[test]
    fn filename_without_date_does_not_match() {
        assert_eq!(FilenameParts::from_path(Path::new("about.markdown")), None);
        assert_eq!(FilenameParts::from_path(Path::new("2012-09-15-no-extension")), None);
    }

    #[test]
    fn yaml_values_become_tagged_values() {
        let meta = Metadata::from_yaml(
            "title: \"Hello\"\ncomments: true\ncategories: [rust, blog]\ntags: one\nlink:\n",
        )
        .unwrap();
        assert_eq!(meta.get("title"), Some(&MetaValue::Scalar("Hello".into())));
        assert_eq!(meta.get("comments"), Some(&MetaValue::Scalar("true".into())));
        assert_eq!(
            meta.get("categories"),
            Some(&MetaValue::List(vec!["rust".into(), "blog".into()]))
        );
        assert_eq!(meta.get("tags").unwrap().to_list(), vec!["one".to_string()]);
        assert_eq!(meta.get("link"), Some(&MetaValue::Null));
        assert_eq!(meta.display("link"), "");
        assert_eq!(meta.display("missing"), "");
    }

    #[test]
    fn empty_front_matter_is_empty_mapping() {
        assert_eq!(Metadata::from_yaml("").unwrap(), Metadata::default());
    }

    #[test]
    fn non_mapping_front_matter_is_rejected() {
        assert!(Metadata::from_yaml("- a\n- b\n").is_err());
        assert!(Metadata::from_yaml("title: [unclosed\n").is_err());
    }
}
