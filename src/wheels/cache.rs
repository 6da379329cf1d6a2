//! Wheel cache queries
//!
//! Stateless filesystem lookups over the wheel directory. Cached wheels
//! follow the `{normalized_name}-{version}-{tags}.whl` naming convention,
//! so lookups are filename-prefix matches and need no metadata parsing.

use std::fs;
use std::path::{Path, PathBuf};

/// Canonical package identity: lowercase, separators folded to `_`.
///
/// `My-Pkg`, `my.pkg` and `my_pkg` all share one cache identity.
pub fn normalize_name(name: &str) -> String {
    name.to_ascii_lowercase().replace(['-', '.'], "_")
}

/// Find cached wheels for a package.
///
/// `version` of `Some(v)` matches that exact version; `None` matches any
/// version and build tag. Returns a sorted list, empty when nothing
/// matches or the cache directory is unreadable. Pure query: no side
/// effects, safe to call repeatedly.
pub fn locate(wheel_dir: &Path, package: &str, version: Option<&str>) -> Vec<PathBuf> {
    let prefix = match version {
        Some(v) => format!("{}-{}-", normalize_name(package), v),
        None => format!("{}-", normalize_name(package)),
    };

    let Ok(entries) = fs::read_dir(wheel_dir) else {
        return Vec::new();
    };

    let mut wheels: Vec<PathBuf> = entries
        .flatten()
        .map(|entry| entry.path())
        .filter(|path| {
            path.file_name()
                .and_then(|f| f.to_str())
                .is_some_and(|f| f.ends_with(".whl") && f.starts_with(&prefix))
        })
        .collect();
    wheels.sort();
    wheels
}

/// A cached wheel, decomposed from its filename
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WheelFile {
    /// Normalized package name
    pub name: String,
    /// Version segment
    pub version: String,
    /// Remaining platform/build tags
    pub tags: String,
    /// Path of the cached file
    pub path: PathBuf,
}

impl WheelFile {
    /// Parse a cached wheel path; `None` for files that do not follow the
    /// wheel naming convention
    pub fn parse(path: &Path) -> Option<Self> {
        let file_name = path.file_name()?.to_str()?;
        let stem = file_name.strip_suffix(".whl")?;

        let mut parts = stem.splitn(3, '-');
        let name = parts.next()?;
        let version = parts.next()?;
        let tags = parts.next()?;
        if name.is_empty() || version.is_empty() || tags.is_empty() {
            return None;
        }

        Some(Self {
            name: name.to_string(),
            version: version.to_string(),
            tags: tags.to_string(),
            path: path.to_path_buf(),
        })
    }
}

/// All parseable wheels in the cache directory, sorted by filename
pub fn list(wheel_dir: &Path) -> Vec<WheelFile> {
    let Ok(entries) = fs::read_dir(wheel_dir) else {
        return Vec::new();
    };

    let mut wheels: Vec<WheelFile> = entries
        .flatten()
        .filter_map(|entry| WheelFile::parse(&entry.path()))
        .collect();
    wheels.sort_by(|a, b| a.path.cmp(&b.path));
    wheels
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn touch(dir: &Path, name: &str) {
        fs::write(dir.join(name), b"").unwrap();
    }

    #[test]
    fn normalize_folds_separators() {
        assert_eq!(normalize_name("My-Pkg"), "my_pkg");
        assert_eq!(normalize_name("my.pkg"), "my_pkg");
        assert_eq!(normalize_name("my_pkg"), "my_pkg");
    }

    #[test]
    fn locate_exact_version() {
        let temp = TempDir::new().unwrap();
        touch(temp.path(), "flask-1.0.2-py2.py3-none-any.whl");
        touch(temp.path(), "flask-0.12-py2.py3-none-any.whl");
        touch(temp.path(), "six-1.10.0-py2.py3-none-any.whl");

        let found = locate(temp.path(), "Flask", Some("1.0.2"));
        assert_eq!(found.len(), 1);
        assert!(found[0].ends_with("flask-1.0.2-py2.py3-none-any.whl"));
    }

    #[test]
    fn locate_any_version() {
        let temp = TempDir::new().unwrap();
        touch(temp.path(), "flask-1.0.2-py2.py3-none-any.whl");
        touch(temp.path(), "flask-0.12-py2.py3-none-any.whl");
        touch(temp.path(), "six-1.10.0-py2.py3-none-any.whl");

        let found = locate(temp.path(), "flask", None);
        assert_eq!(found.len(), 2);
    }

    #[test]
    fn locate_is_separator_insensitive() {
        let temp = TempDir::new().unwrap();
        touch(temp.path(), "my_pkg-2.1-py3-none-any.whl");

        assert_eq!(locate(temp.path(), "My-Pkg", Some("2.1")).len(), 1);
        assert_eq!(locate(temp.path(), "my.pkg", None).len(), 1);
    }

    #[test]
    fn locate_does_not_cross_name_boundaries() {
        let temp = TempDir::new().unwrap();
        touch(temp.path(), "foo_bar-1.0-py3-none-any.whl");

        // `foo` must not match `foo_bar`'s wheels
        assert!(locate(temp.path(), "foo", None).is_empty());
    }

    #[test]
    fn locate_ignores_non_wheel_files() {
        let temp = TempDir::new().unwrap();
        touch(temp.path(), "flask-1.0.2.tar.gz");
        touch(temp.path(), "flask-1.0.2-py3-none-any.whl.partial");

        assert!(locate(temp.path(), "flask", None).is_empty());
    }

    #[test]
    fn locate_missing_directory_is_empty() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("nope");
        assert!(locate(&missing, "flask", None).is_empty());
    }

    #[test]
    fn wheel_file_parses_name_version_tags() {
        let parsed = WheelFile::parse(Path::new("flask-1.0.2-py2.py3-none-any.whl")).unwrap();
        assert_eq!(parsed.name, "flask");
        assert_eq!(parsed.version, "1.0.2");
        assert_eq!(parsed.tags, "py2.py3-none-any");
    }

    #[test]
    fn wheel_file_rejects_malformed_names() {
        assert!(WheelFile::parse(Path::new("flask-1.0.2.whl")).is_none());
        assert!(WheelFile::parse(Path::new("flask.whl")).is_none());
        assert!(WheelFile::parse(Path::new("flask-1.0.2-py3.tar.gz")).is_none());
    }

    #[test]
    fn list_returns_parseable_wheels_sorted() {
        let temp = TempDir::new().unwrap();
        touch(temp.path(), "six-1.10.0-py2.py3-none-any.whl");
        touch(temp.path(), "flask-1.0.2-py3-none-any.whl");
        touch(temp.path(), "README.txt");

        let wheels = list(temp.path());
        assert_eq!(wheels.len(), 2);
        assert_eq!(wheels[0].name, "flask");
        assert_eq!(wheels[1].name, "six");
    }
}
