//! Locations and their navigational group.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Navigational group a screen belongs to.
///
/// The routing layer tags every location exactly once when it resolves a
/// path, so redirect rules compare tags instead of matching strings.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LocationGroup {
    /// Sign-in flow screens (login, forced password change).
    Auth,
    /// The signed-in application.
    Main,
    /// Screens outside both groups that still require a signed-in user.
    Standalone,
    /// Anything else. Never redirected.
    Public,
}

impl LocationGroup {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Auth => "auth",
            Self::Main => "main",
            Self::Standalone => "standalone",
            Self::Public => "public",
        }
    }
}

impl fmt::Display for LocationGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The currently displayed screen.
///
/// Holds the normalized path, its segments and the group tag assigned by
/// the route table.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Location {
    path: String,
    segments: Vec<String>,
    group: LocationGroup,
}

impl Location {
    /// Build a location from a raw path and an already known group.
    ///
    /// ```rust
    /// use sessiongate::routing::{Location, LocationGroup};
    ///
    /// let location = Location::new("subjects/42/?tab=grades", LocationGroup::Main);
    /// assert_eq!(location.path(), "/subjects/42");
    /// assert_eq!(location.segments().to_vec(), vec!["subjects", "42"]);
    /// ```
    pub fn new(raw: &str, group: LocationGroup) -> Self {
        let segments = split_segments(raw);
        Self {
            path: join_segments(&segments),
            segments,
            group,
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    pub fn first_segment(&self) -> Option<&str> {
        self.segments.first().map(String::as_str)
    }

    pub fn group(&self) -> LocationGroup {
        self.group
    }

    /// Whether this location is the screen at `path` (after normalization).
    pub fn is(&self, path: &str) -> bool {
        self.segments
            .iter()
            .map(String::as_str)
            .eq(segment_iter(path))
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.path, self.group)
    }
}

/// Normalize a raw path: leading `/`, no trailing `/`, no empty segments,
/// query string and fragment removed.
///
/// ```rust
/// use sessiongate::routing::normalize_path;
///
/// assert_eq!(normalize_path("//home/"), "/home");
/// assert_eq!(normalize_path("login#top"), "/login");
/// assert_eq!(normalize_path(""), "/");
/// ```
pub fn normalize_path(raw: &str) -> String {
    join_segments(&split_segments(raw))
}

fn segment_iter(raw: &str) -> impl Iterator<Item = &str> {
    let end = raw.find(|c: char| c == '?' || c == '#').unwrap_or(raw.len());
    raw[..end].split('/').filter(|s| !s.is_empty())
}

fn split_segments(raw: &str) -> Vec<String> {
    segment_iter(raw).map(str::to_string).collect()
}

fn join_segments(segments: &[String]) -> String {
    format!("/{}", segments.join("/"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_slashes_and_suffixes() {
        assert_eq!(normalize_path("/home"), "/home");
        assert_eq!(normalize_path("home/"), "/home");
        assert_eq!(normalize_path("///subjects//7"), "/subjects/7");
        assert_eq!(normalize_path("/report?format=pdf"), "/report");
        assert_eq!(normalize_path("/"), "/");
        assert_eq!(normalize_path("?x=1"), "/");
    }

    #[test]
    fn root_has_no_segments() {
        let root = Location::new("/", LocationGroup::Public);
        assert!(root.segments().is_empty());
        assert_eq!(root.first_segment(), None);
        assert_eq!(root.path(), "/");
    }

    #[test]
    fn is_compares_normalized_paths() {
        let location = Location::new("/force-change-password", LocationGroup::Auth);
        assert!(location.is("force-change-password/"));
        assert!(location.is("/force-change-password?reason=expired"));
        assert!(!location.is("/force-change-password/extra"));
        assert!(!location.is("/login"));
    }

    #[test]
    fn display_includes_group() {
        let location = Location::new("/home", LocationGroup::Main);
        assert_eq!(location.to_string(), "/home (main)");
    }

    #[test]
    fn group_serializes_lowercase() {
        let json = serde_json::to_string(&LocationGroup::Standalone).unwrap();
        assert_eq!(json, "\"standalone\"");
    }
}
