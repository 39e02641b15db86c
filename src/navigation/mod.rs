//! Session-gated navigation.
//!
//! [`NavigationGuard::decide`] is the pure core: an ordered list of redirect
//! rules over the session and the current location. [`Navigator`] is the
//! thin observer that re-runs it whenever either input changes.

mod builder;
mod decision;
mod guard;
mod navigator;
mod rules;

pub use builder::{ConfigViolation, NavigationGuardBuilder};
pub use decision::RedirectDecision;
pub use guard::NavigationGuard;
pub use navigator::{connect, Navigator, RenderingSurface, SharedNavigator};
pub use rules::{standard_rules, NavigationContext, RedirectRule, RoutePaths};
