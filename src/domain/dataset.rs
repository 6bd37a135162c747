// Dataset storage names
use serde::Serialize;
use std::fmt;
use std::path::Path;

/// Validated storage key of one uploaded dataset.
///
/// A name is a single path component: it can never address anything outside
/// the store's root. Names starting with `.` (including `.` and `..`) are
/// reserved for in-flight writes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct DatasetName(String);

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid dataset name: {0:?}")]
pub struct InvalidDatasetName(pub String);

impl DatasetName {
    pub fn parse(name: impl Into<String>) -> Result<Self, InvalidDatasetName> {
        let name = name.into();
        let invalid = name.is_empty()
            || name.starts_with('.')
            || name.contains(['/', '\\', '\0']);
        if invalid {
            return Err(InvalidDatasetName(name));
        }
        Ok(Self(name))
    }

    /// Build `"{millis}-{base}"`, or `"{millis}-{attempt}-{base}"` after a
    /// collision. `base` is reduced to its final path component first.
    pub fn stamped(millis: i64, base: &str, attempt: u32) -> Result<Self, InvalidDatasetName> {
        let base = Self::base_name(base);
        if base.is_empty() || base == "." || base == ".." {
            return Err(InvalidDatasetName(base.to_string()));
        }
        if attempt == 0 {
            Self::parse(format!("{millis}-{base}"))
        } else {
            Self::parse(format!("{millis}-{attempt}-{base}"))
        }
    }

    /// Final path component of a client-supplied filename.
    fn base_name(original: &str) -> &str {
        let last = original.rsplit(['/', '\\']).next().unwrap_or(original);
        Path::new(last)
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or(last)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DatasetName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<Path> for DatasetName {
    fn as_ref(&self) -> &Path {
        Path::new(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_accepts_plain_names() {
        let name = DatasetName::parse("1717171717171-truck 12.json").unwrap();
        assert_eq!(name.as_str(), "1717171717171-truck 12.json");
    }

    #[test]
    fn test_parse_accepts_dots_inside_a_component() {
        assert!(DatasetName::parse("7-trip..v2.json").is_ok());
        assert!(DatasetName::parse("7-..").is_ok());
    }

    #[test]
    fn test_parse_rejects_escaping_names() {
        for bad in ["", ".", "..", "../secret", "a/b.json", "a\\b.json", ".tmp-upload", "nul\0"] {
            assert!(DatasetName::parse(bad).is_err(), "{bad:?} should be rejected");
        }
    }

    #[test]
    fn test_stamped() {
        assert_eq!(
            DatasetName::stamped(1700000000000, "trip.json", 0).unwrap().as_str(),
            "1700000000000-trip.json"
        );
        assert_eq!(
            DatasetName::stamped(1700000000000, "trip.json", 2).unwrap().as_str(),
            "1700000000000-2-trip.json"
        );
    }

    #[test]
    fn test_stamped_keeps_double_dots_in_filename() {
        assert_eq!(
            DatasetName::stamped(5, "trip..v2.json", 0).unwrap().as_str(),
            "5-trip..v2.json"
        );
    }

    #[test]
    fn test_stamped_strips_client_directories() {
        assert_eq!(
            DatasetName::stamped(5, "../../etc/trip.json", 0).unwrap().as_str(),
            "5-trip.json"
        );
        assert_eq!(
            DatasetName::stamped(5, "C:\\Users\\fleet\\trip.json", 0).unwrap().as_str(),
            "5-trip.json"
        );
    }

    #[test]
    fn test_stamped_rejects_degenerate_base() {
        assert!(DatasetName::stamped(5, "..", 0).is_err());
        assert!(DatasetName::stamped(5, ".", 0).is_err());
        assert!(DatasetName::stamped(5, "dir/", 0).is_err());
        assert!(DatasetName::stamped(5, "", 0).is_err());
    }
}
