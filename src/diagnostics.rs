//! Structured diagnostics for resolution failures
//!
//! Rendering is a pure function of the stored fields so the report can be
//! built at the failure site and formatted later at the command boundary.
//! No I/O happens here.

use crate::config::IndexConfig;
use std::cmp::Ordering;
use std::fmt;

/// A concrete version of a package considered during resolution.
///
/// Ordering is ascending by version. The prerelease flag comes from the
/// resolution backend; it is not re-derived from the version string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    /// Version string as reported by the index, e.g. `1.0` or `2.0rc1`
    pub version: String,
    /// Whether the backend flagged this version as a prerelease
    pub prerelease: bool,
}

impl Candidate {
    pub fn new(version: impl Into<String>, prerelease: bool) -> Self {
        Self {
            version: version.into(),
            prerelease,
        }
    }
}

impl PartialOrd for Candidate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Candidate {
    fn cmp(&self, other: &Self) -> Ordering {
        compare_versions(&self.version, &other.version)
            .then_with(|| self.version.cmp(&other.version))
            .then_with(|| self.prerelease.cmp(&other.prerelease))
    }
}

/// One chunk of a version string: a number or an alphabetic tag
#[derive(Debug, PartialEq, Eq)]
enum Chunk {
    Num(u64),
    Alpha(String),
}

fn version_chunks(version: &str) -> Vec<Chunk> {
    fn flush(buf: &mut String, numeric: bool, chunks: &mut Vec<Chunk>) {
        if buf.is_empty() {
            return;
        }
        if numeric {
            // Version components fit in u64 in practice; saturate otherwise
            chunks.push(Chunk::Num(buf.parse().unwrap_or(u64::MAX)));
        } else {
            chunks.push(Chunk::Alpha(buf.to_ascii_lowercase()));
        }
        buf.clear();
    }

    let mut chunks = Vec::new();
    let mut current = String::new();
    let mut numeric = false;

    for ch in version.chars() {
        if ch.is_ascii_digit() {
            if !current.is_empty() && !numeric {
                flush(&mut current, false, &mut chunks);
            }
            numeric = true;
            current.push(ch);
        } else if ch.is_ascii_alphanumeric() {
            if !current.is_empty() && numeric {
                flush(&mut current, true, &mut chunks);
            }
            numeric = false;
            current.push(ch);
        } else {
            // Separator: '.', '-', '_', '+', anything else
            flush(&mut current, numeric, &mut chunks);
        }
    }
    flush(&mut current, numeric, &mut chunks);

    chunks
}

/// Compare two dotted version strings.
///
/// Numeric components compare numerically, alphabetic tags lexically, and
/// an alphabetic tag ranks below a numeric component at the same position.
/// A version extended by an alphabetic tag sorts before its base version
/// (`1.0rc1` < `1.0`), while one extended by a numeric component sorts
/// after it (`1.0.1` > `1.0`).
pub fn compare_versions(a: &str, b: &str) -> Ordering {
    let left = version_chunks(a);
    let right = version_chunks(b);

    let mut i = 0;
    loop {
        match (left.get(i), right.get(i)) {
            (Some(l), Some(r)) => {
                let ord = match (l, r) {
                    (Chunk::Num(x), Chunk::Num(y)) => x.cmp(y),
                    (Chunk::Alpha(x), Chunk::Alpha(y)) => x.cmp(y),
                    (Chunk::Num(_), Chunk::Alpha(_)) => Ordering::Greater,
                    (Chunk::Alpha(_), Chunk::Num(_)) => Ordering::Less,
                };
                if ord != Ordering::Equal {
                    return ord;
                }
            }
            (Some(l), None) => {
                return match l {
                    Chunk::Alpha(_) => Ordering::Less,
                    Chunk::Num(_) => Ordering::Greater,
                };
            }
            (None, Some(r)) => {
                return match r {
                    Chunk::Alpha(_) => Ordering::Greater,
                    Chunk::Num(_) => Ordering::Less,
                };
            }
            (None, None) => return Ordering::Equal,
        }
        i += 1;
    }
}

/// Everything needed to explain why no installable version was found.
///
/// Carried inside `DomainError::NoCandidateFound`; the `Display` impl does
/// the candidate partitioning and the singular/plural reachability phrasing.
#[derive(Debug, Clone)]
pub struct NoCandidateReport {
    /// Requirement identity, e.g. `flask==1.0.2`
    pub requirement: String,
    /// Every candidate the resolver looked at, in no particular order
    pub candidates: Vec<Candidate>,
    /// Index URLs that were configured for the run
    pub index_urls: Vec<String>,
    /// Whether the index configuration admits prerelease versions
    pub allow_prereleases: bool,
}

impl NoCandidateReport {
    pub fn new(
        requirement: impl Into<String>,
        candidates: Vec<Candidate>,
        index: &IndexConfig,
    ) -> Self {
        Self {
            requirement: requirement.into(),
            candidates,
            index_urls: index.urls(),
            allow_prereleases: index.prereleases,
        }
    }
}

impl fmt::Display for NoCandidateReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut stable: Vec<&Candidate> = Vec::new();
        let mut pre: Vec<&Candidate> = Vec::new();
        for candidate in &self.candidates {
            if candidate.prerelease {
                pre.push(candidate);
            } else {
                stable.push(candidate);
            }
        }
        stable.sort();
        pre.sort();

        let mut lines = vec![format!(
            "Could not find a version that matches {}",
            self.requirement
        )];

        if !stable.is_empty() {
            let versions: Vec<&str> = stable.iter().map(|c| c.version.as_str()).collect();
            lines.push(format!("Tried: {}", versions.join(", ")));
        }

        if !pre.is_empty() {
            let verb = if self.allow_prereleases {
                "Tried"
            } else {
                "Skipped"
            };
            let versions: Vec<&str> = pre.iter().map(|c| c.version.as_str()).collect();
            lines.push(format!("{} pre-versions: {}", verb, versions.join(", ")));
        }

        if !stable.is_empty() || !pre.is_empty() {
            lines.push("There are incompatible versions in the resolved dependencies.".to_string());
        } else {
            lines.push("No versions found".to_string());
            let verb = if self.index_urls.len() > 1 {
                "Were"
            } else {
                "Was"
            };
            lines.push(format!(
                "{} {} reachable?",
                verb,
                self.index_urls.join(" or ")
            ));
        }

        write!(f, "{}", lines.join("\n"))
    }
}
