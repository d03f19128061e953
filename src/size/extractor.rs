//! Component size extraction from bundle analyzer records
//!
//! Only ES module entry points (`es/<Component>/index.js`) count as
//! components. Their stylesheet, when present, is looked up among all records
//! and reported as the component's CSS share.

use super::{ComponentReport, SizeEntry};
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashMap;
use std::sync::OnceLock;

/// Compiled component entry pattern (cached)
static COMPONENT_ENTRY_RE: OnceLock<Regex> = OnceLock::new();

fn component_entry_re() -> &'static Regex {
    COMPONENT_ENTRY_RE.get_or_init(|| {
        // SAFETY: constant pattern, validated by the tests below.
        Regex::new(r"^es/([^/]+)/index\.js$").expect("component entry regex is valid")
    })
}

/// One entry of the bundle analyzer's stats output
///
/// Unknown fields (`source`, chunk metadata, ...) are ignored. Size fields
/// tolerate `null`, negative and fractional values.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsRecord {
    /// Output file path relative to the bundle root
    #[serde(default)]
    pub filename: String,
    /// Minified size in bytes
    #[serde(default, deserialize_with = "lenient_size")]
    pub parsed_size: Option<u64>,
    /// Gzipped size in bytes
    #[serde(
        default,
        deserialize_with = "lenient_size",
        skip_serializing_if = "Option::is_none"
    )]
    pub gzip_size: Option<u64>,
    /// Brotli size in bytes
    #[serde(
        default,
        deserialize_with = "lenient_size",
        skip_serializing_if = "Option::is_none"
    )]
    pub brotli_size: Option<u64>,
}

impl StatsRecord {
    /// Record with just a filename and parsed size
    pub fn new(filename: impl Into<String>, parsed_size: u64) -> Self {
        Self {
            filename: filename.into(),
            parsed_size: Some(parsed_size),
            ..Self::default()
        }
    }

    fn parsed_bytes(&self) -> u64 {
        self.parsed_size.unwrap_or(0)
    }
}

fn lenient_size<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<u64>, D::Error> {
    let number = Option::<serde_json::Number>::deserialize(deserializer)?;
    Ok(number.and_then(|n| {
        n.as_u64().or_else(|| {
            n.as_f64()
                .filter(|f| f.is_finite() && *f > 0.0)
                .map(|f| f.ceil() as u64)
        })
    }))
}

/// Convert bytes to kilobytes, rounding up
///
/// ```
/// use component_size_report::size::bytes_to_kb;
///
/// assert_eq!(bytes_to_kb(0), 0);
/// assert_eq!(bytes_to_kb(1), 1);
/// assert_eq!(bytes_to_kb(1024), 1);
/// assert_eq!(bytes_to_kb(1025), 2);
/// ```
pub fn bytes_to_kb(bytes: u64) -> u64 {
    bytes.div_ceil(1024)
}

/// Build a component report from analyzer records
///
/// Records that are not `es/<Name>/index.js` are skipped. When the same
/// entry appears twice the last one wins.
pub fn extract(records: &[StatsRecord]) -> ComponentReport {
    let stylesheets = StylesheetIndex::new(records);
    let mut report = ComponentReport::new();

    for record in records {
        let Some(captures) = component_entry_re().captures(&record.filename) else {
            continue;
        };
        let name = &captures[1];

        let js_bytes = record.parsed_bytes();
        let css_bytes = stylesheets
            .find(name)
            .map(StatsRecord::parsed_bytes)
            .unwrap_or(0);

        log::debug!("{name}: js {js_bytes} B, css {css_bytes} B");
        report.insert(name, SizeEntry::from_bytes(js_bytes, css_bytes));
    }

    report
}

/// Records keyed by lowercased filename; the first record wins on collisions
struct StylesheetIndex<'a> {
    by_filename: HashMap<String, &'a StatsRecord>,
}

impl<'a> StylesheetIndex<'a> {
    fn new(records: &'a [StatsRecord]) -> Self {
        let mut by_filename = HashMap::with_capacity(records.len());
        for record in records {
            by_filename
                .entry(record.filename.to_lowercase())
                .or_insert(record);
        }
        Self { by_filename }
    }

    /// Stylesheet for a component, case-insensitively matching either
    /// `es/<name lowercased>/<name lowercased>.css` or `es/<name>/<name lowercased>.css`
    fn find(&self, name: &str) -> Option<&'a StatsRecord> {
        let lower = name.to_lowercase();
        let lowercase_dir = format!("es/{lower}/{lower}.css");
        let original_dir = format!("es/{name}/{lower}.css");

        self.by_filename
            .get(&lowercase_dir)
            .or_else(|| self.by_filename.get(&original_dir))
            .copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_without_stylesheet_rounds_js_up() {
        let report = extract(&[StatsRecord::new("es/Banner/index.js", 1025)]);
        assert_eq!(report.get("Banner"), Some(&SizeEntry::new(2, 0, 2)));
    }

    #[test]
    fn test_non_entry_records_are_skipped() {
        let records = vec![
            StatsRecord::new("es/Banner/Banner.chunk.js", 999),
            StatsRecord::new("es/Banner/nested/index.js", 999),
            StatsRecord::new("cjs/Banner/index.js", 999),
            StatsRecord::new("es/index.js", 999),
            StatsRecord::new("es/Banner/index.jsx", 999),
        ];
        assert!(extract(&records).is_empty());
    }

    #[test]
    fn test_empty_input_yields_empty_report() {
        assert!(extract(&[]).is_empty());
    }

    #[test]
    fn test_lowercase_directory_stylesheet_is_found() {
        let records = vec![
            StatsRecord::new("es/Banner/index.js", 2048),
            StatsRecord::new("es/banner/banner.css", 1),
        ];
        assert_eq!(extract(&records).get("Banner"), Some(&SizeEntry::new(2, 1, 3)));
    }

    #[test]
    fn test_stylesheet_filename_matches_case_insensitively() {
        let records = vec![
            StatsRecord::new("es/Tooltip/index.js", 100),
            StatsRecord::new("es/Tooltip/tooltip.css", 3000),
        ];
        assert_eq!(extract(&records).get("Tooltip"), Some(&SizeEntry::new(1, 3, 4)));
    }

    #[test]
    fn test_lowercase_component_name_matches_own_stylesheet() {
        let records = vec![
            StatsRecord::new("es/icon/icon.css", 10),
            StatsRecord::new("es/icon/index.js", 10),
        ];
        assert_eq!(extract(&records).get("icon"), Some(&SizeEntry::new(1, 1, 2)));
    }

    #[test]
    fn test_other_component_stylesheets_are_not_attributed() {
        let records = vec![
            StatsRecord::new("es/Banner/index.js", 1024),
            StatsRecord::new("es/button/button.css", 4096),
        ];
        assert_eq!(extract(&records).get("Banner"), Some(&SizeEntry::new(1, 0, 1)));
    }

    #[test]
    fn test_duplicate_entries_last_one_wins() {
        let records = vec![
            StatsRecord::new("es/Banner/index.js", 1024),
            StatsRecord::new("es/Button/index.js", 1024),
            StatsRecord::new("es/Banner/index.js", 4096),
        ];
        let report = extract(&records);
        assert_eq!(report.get("Banner"), Some(&SizeEntry::new(4, 0, 4)));
        assert_eq!(report.names().collect::<Vec<_>>(), vec!["Banner", "Button"]);
    }

    #[test]
    fn test_missing_parsed_size_counts_as_zero() {
        let record = StatsRecord {
            filename: "es/Banner/index.js".to_string(),
            ..StatsRecord::default()
        };
        assert_eq!(extract(&[record]).get("Banner"), Some(&SizeEntry::new(0, 0, 0)));
    }

    #[test]
    fn test_record_deserializes_with_lenient_sizes() {
        let records: Vec<StatsRecord> = serde_json::from_str(
            r#"[
                {"filename": "es/A/index.js", "parsedSize": 10, "gzipSize": 4, "source": []},
                {"filename": "es/B/index.js", "parsedSize": null},
                {"filename": "es/C/index.js", "parsedSize": 1.5},
                {"filename": "es/D/index.js", "parsedSize": -3},
                {"filename": "es/E/index.js"}
            ]"#,
        )
        .unwrap();

        assert_eq!(records[0].parsed_size, Some(10));
        assert_eq!(records[0].gzip_size, Some(4));
        assert_eq!(records[1].parsed_size, None);
        assert_eq!(records[2].parsed_size, Some(2));
        assert_eq!(records[3].parsed_size, None);
        assert_eq!(records[4].parsed_size, None);
    }

    #[test]
    fn test_component_entry_regex_compiles() {
        let re = component_entry_re();
        assert_eq!(&re.captures("es/Date Picker/index.js").unwrap()[1], "Date Picker");
    }
}
