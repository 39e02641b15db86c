//! Route table: maps top-level route identifiers to location groups.

use super::location::{Location, LocationGroup};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Table of top-level routes and the group each belongs to.
///
/// Routes are keyed by their first path segment (`"home"` for `/home` and
/// `/home/anything`). Paths whose first segment is not registered resolve to
/// [`LocationGroup::Public`]; the bare root `/` resolves to the table's root
/// group.
///
/// ```rust
/// use sessiongate::routing::{LocationGroup, RouteTable};
///
/// let table = RouteTable::new()
///     .with_route("login", LocationGroup::Auth)
///     .with_route("home", LocationGroup::Main);
///
/// assert_eq!(table.resolve("/home/today").group(), LocationGroup::Main);
/// assert_eq!(table.resolve("/about").group(), LocationGroup::Public);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RouteTable {
    #[serde(default)]
    routes: BTreeMap<String, LocationGroup>,
    #[serde(default = "default_root_group")]
    root: LocationGroup,
}

fn default_root_group() -> LocationGroup {
    LocationGroup::Public
}

impl RouteTable {
    /// Empty table; everything resolves to `Public`.
    pub fn new() -> Self {
        Self {
            routes: BTreeMap::new(),
            root: default_root_group(),
        }
    }

    /// Routing table of the student performance app.
    pub fn student_app() -> Self {
        Self::new()
            .with_route("login", LocationGroup::Auth)
            .with_route("forgot-password", LocationGroup::Auth)
            .with_route("force-change-password", LocationGroup::Auth)
            .with_route("home", LocationGroup::Main)
            .with_route("subjects", LocationGroup::Main)
            .with_route("performance", LocationGroup::Main)
            .with_route("profile", LocationGroup::Main)
            .with_route("subject-detail", LocationGroup::Standalone)
            .with_route("chart-viewer", LocationGroup::Standalone)
            .with_route("report-export", LocationGroup::Standalone)
    }

    pub fn with_route(mut self, name: impl Into<String>, group: LocationGroup) -> Self {
        self.insert(name, group);
        self
    }

    pub fn with_root(mut self, group: LocationGroup) -> Self {
        self.root = group;
        self
    }

    /// Register a route, returning the group it previously had.
    pub fn insert(&mut self, name: impl Into<String>, group: LocationGroup) -> Option<LocationGroup> {
        self.routes.insert(name.into(), group)
    }

    /// Group of a top-level route identifier.
    pub fn group_of(&self, name: &str) -> Option<LocationGroup> {
        self.routes.get(name).copied()
    }

    /// Resolve a raw path into a tagged location.
    pub fn resolve(&self, path: &str) -> Location {
        let untagged = Location::new(path, LocationGroup::Public);
        let group = match untagged.first_segment() {
            None => self.root,
            Some(first) => self.group_of(first).unwrap_or(LocationGroup::Public),
        };
        Location::new(untagged.path(), group)
    }

    /// Registered routes in identifier order.
    pub fn routes(&self) -> impl Iterator<Item = (&str, LocationGroup)> {
        self.routes.iter().map(|(name, group)| (name.as_str(), *group))
    }

    pub fn root(&self) -> LocationGroup {
        self.root
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

impl Default for RouteTable {
    fn default() -> Self {
        Self::student_app()
    }
}

/// Whether `name` is a canonical route identifier: a lowercase path
/// segment made of ASCII letters, digits and inner hyphens.
///
/// Screen names such as `SubjectDetail` are not route identifiers and never
/// match a resolved location.
///
/// ```rust
/// use sessiongate::routing::is_route_identifier;
///
/// assert!(is_route_identifier("subject-detail"));
/// assert!(!is_route_identifier("SubjectDetail"));
/// ```
pub fn is_route_identifier(name: &str) -> bool {
    !name.is_empty()
        && !name.starts_with('-')
        && !name.ends_with('-')
        && name
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn student_app_tags_every_group() {
        let table = RouteTable::student_app();

        assert_eq!(table.resolve("/login").group(), LocationGroup::Auth);
        assert_eq!(
            table.resolve("/force-change-password").group(),
            LocationGroup::Auth
        );
        assert_eq!(table.resolve("/home").group(), LocationGroup::Main);
        assert_eq!(table.resolve("/subjects/12").group(), LocationGroup::Main);
        assert_eq!(
            table.resolve("/subject-detail?id=3").group(),
            LocationGroup::Standalone
        );
        assert_eq!(table.resolve("/privacy").group(), LocationGroup::Public);
    }

    #[test]
    fn root_uses_configured_group() {
        let table = RouteTable::new();
        assert_eq!(table.resolve("/").group(), LocationGroup::Public);

        let table = table.with_root(LocationGroup::Main);
        assert_eq!(table.resolve("").group(), LocationGroup::Main);
    }

    #[test]
    fn lookup_is_by_exact_segment() {
        let table = RouteTable::student_app();
        assert_eq!(table.resolve("/Home").group(), LocationGroup::Public);
        assert_eq!(table.resolve("/homework").group(), LocationGroup::Public);
    }

    #[test]
    fn insert_reports_previous_group() {
        let mut table = RouteTable::new();
        assert_eq!(table.insert("chart-viewer", LocationGroup::Main), None);
        assert_eq!(
            table.insert("chart-viewer", LocationGroup::Standalone),
            Some(LocationGroup::Main)
        );
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn route_identifiers() {
        assert!(is_route_identifier("home"));
        assert!(is_route_identifier("report-export"));
        assert!(is_route_identifier("term2"));
        assert!(!is_route_identifier(""));
        assert!(!is_route_identifier("ChartViewer"));
        assert!(!is_route_identifier("-home"));
        assert!(!is_route_identifier("home/"));
        assert!(!is_route_identifier("report_export"));
    }

    #[test]
    fn table_deserializes_with_defaults() {
        let table: RouteTable =
            serde_json::from_str(r#"{ "routes": { "home": "main" } }"#).unwrap();
        assert_eq!(table.root(), LocationGroup::Public);
        assert_eq!(table.group_of("home"), Some(LocationGroup::Main));
    }
}
