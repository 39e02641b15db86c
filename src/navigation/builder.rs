//! Validating builder for [`NavigationGuard`].

use super::guard::NavigationGuard;
use super::rules::RoutePaths;
use crate::config::ConfigError;
use crate::routing::{is_route_identifier, LocationGroup, RouteTable};
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;
use thiserror::Error;

/// A problem with navigation configuration.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigViolation {
    #[error("Route identifier '{0}' is not a lowercase path segment")]
    InvalidRouteIdentifier(String),

    #[error("The {role} path '{path}' resolves to the {actual} group, expected {expected}")]
    MisplacedPath {
        role: &'static str,
        path: String,
        expected: LocationGroup,
        actual: LocationGroup,
    },

    #[error("The {first} and {second} paths are both '{path}'")]
    DuplicatePath {
        first: &'static str,
        second: &'static str,
        path: String,
    },
}

type ConfigCheck = Validation<(), NonEmptyVec<ConfigViolation>>;

/// Builder for a navigation guard whose paths are checked against its
/// route table.
///
/// ```rust
/// use sessiongate::navigation::NavigationGuard;
/// use sessiongate::routing::{LocationGroup, RouteTable};
///
/// let guard = NavigationGuard::builder()
///     .routes(
///         RouteTable::new()
///             .with_route("sign-in", LocationGroup::Auth)
///             .with_route("reset", LocationGroup::Auth)
///             .with_route("dashboard", LocationGroup::Main),
///     )
///     .login_path("/sign-in")
///     .force_change_password_path("/reset")
///     .home_path("/dashboard")
///     .build()
///     .unwrap();
///
/// assert_eq!(guard.paths().home, "/dashboard");
/// ```
#[derive(Clone, Debug, Default)]
pub struct NavigationGuardBuilder {
    paths: RoutePaths,
    routes: RouteTable,
}

impl NavigationGuardBuilder {
    /// Builder seeded with the default paths and route table.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn paths(mut self, paths: RoutePaths) -> Self {
        self.paths = paths;
        self
    }

    pub fn login_path(mut self, path: impl Into<String>) -> Self {
        self.paths.login = path.into();
        self
    }

    pub fn home_path(mut self, path: impl Into<String>) -> Self {
        self.paths.home = path.into();
        self
    }

    pub fn force_change_password_path(mut self, path: impl Into<String>) -> Self {
        self.paths.force_change_password = path.into();
        self
    }

    /// Replace the route table.
    pub fn routes(mut self, routes: RouteTable) -> Self {
        self.routes = routes;
        self
    }

    /// Add or retag a single route.
    pub fn route(mut self, name: impl Into<String>, group: LocationGroup) -> Self {
        self.routes.insert(name, group);
        self
    }

    /// Check the configuration, reporting every violation.
    pub fn validate(&self) -> ConfigCheck {
        let paths = self.paths.normalized();
        let mut checks: Vec<ConfigCheck> = self
            .routes
            .routes()
            .filter(|(name, _)| !is_route_identifier(name))
            .map(|(name, _)| {
                Validation::fail(ConfigViolation::InvalidRouteIdentifier(name.to_string()))
            })
            .collect();

        let roles = [
            ("login", &paths.login, LocationGroup::Auth),
            (
                "force-change-password",
                &paths.force_change_password,
                LocationGroup::Auth,
            ),
            ("home", &paths.home, LocationGroup::Main),
        ];

        for (role, path, expected) in roles {
            let actual = self.routes.resolve(path).group();
            checks.push(if actual == expected {
                Validation::success(())
            } else {
                Validation::fail(ConfigViolation::MisplacedPath {
                    role,
                    path: path.clone(),
                    expected,
                    actual,
                })
            });
        }

        for (i, (first, first_path, _)) in roles.iter().enumerate() {
            for (second, second_path, _) in &roles[i + 1..] {
                if first_path == second_path {
                    checks.push(Validation::fail(ConfigViolation::DuplicatePath {
                        first: *first,
                        second: *second,
                        path: first_path.to_string(),
                    }));
                }
            }
        }

        Validation::all_vec(checks).map(|_| ())
    }

    /// Validate and build the guard.
    pub fn build(self) -> Result<NavigationGuard, ConfigError> {
        match self.validate() {
            Validation::Success(_) => Ok(NavigationGuard::from_parts(self.paths, self.routes)),
            Validation::Failure(violations) => Err(ConfigError::Invalid(
                violations.iter().cloned().collect(),
            )),
        }
    }
}
