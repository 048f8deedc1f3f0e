use chrono::{DateTime, NaiveDate, NaiveDateTime};

use crate::metadata::{FilenameParts, MetaValue, Metadata};

/// Time of day used when a post only carries a date in its file name.
const PLACEHOLDER_TIME: &str = "13:37";

const OFFSET_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S %z",
    "%Y-%m-%d %H:%M %z",
    "%Y-%m-%d %H:%M:%S%z",
    "%Y-%m-%dT%H:%M:%S%z",
];

const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%Y/%m/%d %H:%M",
];

const DATE_ONLY_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d"];

/// Merges categories and tags into `tags` and stamps the file name parts.
///
/// Categories come first, every entry is trimmed, order is kept. `slug`,
/// `year` and `month` are always taken from the file name when it matched,
/// whatever the front matter said. Every other key is left alone.
pub(crate) fn normalize(mut meta: Metadata, parts: Option<&FilenameParts>) -> Metadata {
    let categories = meta
        .remove("categories")
        .map(|v| v.to_list())
        .unwrap_or_default();
    let tags = meta.get("tags").map(MetaValue::to_list).unwrap_or_default();
    let merged = categories
        .iter()
        .chain(tags.iter())
        .map(|t| t.trim().to_string())
        .collect();
    meta.insert("tags", MetaValue::List(merged));

    if let Some(parts) = parts {
        meta.insert("slug", MetaValue::Scalar(parts.slug.clone()));
        meta.insert("year", MetaValue::Scalar(parts.year.clone()));
        meta.insert("month", MetaValue::Scalar(parts.month.clone()));
    }

    meta
}

/// Fills in or normalizes `date`.
///
/// Without a `date` key the file name date is used at a fixed time of day.
/// An existing value is parsed when it is a string. Returns the offending
/// text when it cannot be understood.
pub(crate) fn reconcile_date(
    meta: &mut Metadata,
    parts: Option<&FilenameParts>,
) -> Result<(), String> {
    let date = match meta.get("date") {
        None | Some(MetaValue::Null) => match parts {
            Some(p) => MetaValue::Scalar(format!(
                "{}/{}/{} {}",
                p.year, p.month, p.day, PLACEHOLDER_TIME
            )),
            None => return Ok(()),
        },
        Some(MetaValue::Date(d)) => MetaValue::Date(*d),
        Some(MetaValue::Scalar(s)) => MetaValue::Date(parse_date(s).ok_or_else(|| s.clone())?),
        Some(other) => return Err(other.display()),
    };
    meta.insert("date", date);
    Ok(())
}

/// Parses the date spellings commonly found in Octopress front matter.
/// Offsets are dropped; the wall clock time is kept as written.
pub(crate) fn parse_date(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.naive_local());
    }
    OFFSET_FORMATS
        .iter()
        .find_map(|f| DateTime::parse_from_str(value, f).ok())
        .map(|dt| dt.naive_local())
        .or_else(|| {
            NAIVE_FORMATS
                .iter()
                .find_map(|f| NaiveDateTime::parse_from_str(value, f).ok())
        })
        .or_else(|| {
            DATE_ONLY_FORMATS
                .iter()
                .find_map(|f| NaiveDate::parse_from_str(value, f).ok())
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
}
