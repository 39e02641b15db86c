//! The navigation guard.

use super::builder::NavigationGuardBuilder;
use super::decision::RedirectDecision;
use super::rules::{standard_rules, NavigationContext, RedirectRule, RoutePaths};
use crate::routing::{Location, RouteTable};
use crate::session::Session;
use tracing::debug;

/// Maps a session and the current location to at most one redirect.
///
/// `decide` never mutates anything; identical inputs always produce the
/// same decision.
///
/// ```rust
/// use sessiongate::navigation::{NavigationGuard, RedirectDecision};
/// use sessiongate::session::Session;
///
/// let guard = NavigationGuard::standard();
/// let home = guard.resolve("/home");
///
/// assert_eq!(
///     guard.decide(&Session::signed_out(), &home),
///     RedirectDecision::go_to("/login")
/// );
/// assert_eq!(guard.decide(&Session::initial(), &home), RedirectDecision::None);
/// ```
#[derive(Debug)]
pub struct NavigationGuard {
    paths: RoutePaths,
    routes: RouteTable,
    rules: Vec<RedirectRule>,
}

impl NavigationGuard {
    /// Guard over the student app's route table and default paths.
    pub fn standard() -> Self {
        Self::from_parts(RoutePaths::default(), RouteTable::default())
    }

    pub fn builder() -> NavigationGuardBuilder {
        NavigationGuardBuilder::new()
    }

    /// Assemble without validation. The builder validates first.
    pub(crate) fn from_parts(paths: RoutePaths, routes: RouteTable) -> Self {
        let paths = paths.normalized();
        let rules = standard_rules(&paths);
        Self {
            paths,
            routes,
            rules,
        }
    }

    /// Decide whether `location` must be left given `session`.
    pub fn decide(&self, session: &Session, location: &Location) -> RedirectDecision {
        let context = NavigationContext {
            session: *session,
            location: location.clone(),
        };

        match self.rules.iter().find(|rule| rule.applies(&context)) {
            Some(rule) => {
                debug!(
                    rule = rule.name(),
                    path = location.path(),
                    group = %location.group(),
                    phase = ?session.phase(),
                    decision = %rule.decision(),
                    "navigation rule matched"
                );
                rule.decision().clone()
            }
            None => RedirectDecision::None,
        }
    }

    /// Resolve `path` through the route table, then decide.
    pub fn decide_path(&self, session: &Session, path: &str) -> RedirectDecision {
        self.decide(session, &self.resolve(path))
    }

    /// Tag a raw path with its location group.
    pub fn resolve(&self, path: &str) -> Location {
        self.routes.resolve(path)
    }

    pub fn paths(&self) -> &RoutePaths {
        &self.paths
    }

    pub fn routes(&self) -> &RouteTable {
        &self.routes
    }

    /// Rule names in evaluation order.
    pub fn rule_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.rules.iter().map(RedirectRule::name)
    }
}

impl Default for NavigationGuard {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn go(path: &str) -> RedirectDecision {
        RedirectDecision::go_to(path)
    }

    #[test]
    fn scenario_a_forced_change_from_home() {
        let guard = NavigationGuard::standard();
        assert_eq!(
            guard.decide_path(&Session::signed_in(true), "/home"),
            go("/force-change-password")
        );
    }

    #[test]
    fn scenario_b_change_done_leaves_force_screen() {
        let guard = NavigationGuard::standard();
        assert_eq!(
            guard.decide_path(&Session::signed_in(false), "/force-change-password"),
            go("/home")
        );
    }

    #[test]
    fn scenario_c_signed_out_in_main() {
        let guard = NavigationGuard::standard();
        assert_eq!(guard.decide_path(&Session::signed_out(), "/home"), go("/login"));
    }

    #[test]
    fn scenario_d_signed_in_at_home_stays() {
        let guard = NavigationGuard::standard();
        assert_eq!(
            guard.decide_path(&Session::signed_in(false), "/home"),
            RedirectDecision::None
        );
    }

    #[test]
    fn loading_suspends_every_redirect() {
        let guard = NavigationGuard::standard();
        let loading = Session::from_flags(true, true, true);
        for path in ["/home", "/login", "/force-change-password", "/chart-viewer", "/"] {
            assert_eq!(guard.decide_path(&loading, path), RedirectDecision::None);
            assert_eq!(
                guard.decide_path(&Session::initial(), path),
                RedirectDecision::None
            );
        }
    }

    #[test]
    fn forced_change_stays_on_force_screen() {
        let guard = NavigationGuard::standard();
        assert_eq!(
            guard.decide_path(&Session::signed_in(true), "/force-change-password"),
            RedirectDecision::None
        );
    }

    #[test]
    fn forced_change_beats_auth_group_rule() {
        let guard = NavigationGuard::standard();
        assert_eq!(
            guard.decide_path(&Session::signed_in(true), "/login"),
            go("/force-change-password")
        );
    }

    #[test]
    fn signed_in_user_is_sent_home_from_auth_screens() {
        let guard = NavigationGuard::standard();
        assert_eq!(
            guard.decide_path(&Session::signed_in(false), "/login"),
            go("/home")
        );
        assert_eq!(
            guard.decide_path(&Session::signed_in(false), "/forgot-password"),
            go("/home")
        );
    }

    #[test]
    fn signed_out_user_is_sent_to_login_from_standalone_screens() {
        let guard = NavigationGuard::standard();
        for path in ["/subject-detail?id=4", "/chart-viewer", "/report-export"] {
            assert_eq!(guard.decide_path(&Session::signed_out(), path), go("/login"));
        }
    }

    #[test]
    fn signed_out_user_may_use_auth_and_public_screens() {
        let guard = NavigationGuard::standard();
        for path in ["/login", "/forgot-password", "/force-change-password", "/privacy", "/"] {
            assert_eq!(
                guard.decide_path(&Session::signed_out(), path),
                RedirectDecision::None
            );
        }
    }

    #[test]
    fn signed_in_user_may_use_standalone_and_public_screens() {
        let guard = NavigationGuard::standard();
        for path in ["/chart-viewer", "/subjects/3", "/privacy"] {
            assert_eq!(
                guard.decide_path(&Session::signed_in(false), path),
                RedirectDecision::None
            );
        }
    }

    #[test]
    fn decide_is_idempotent() {
        let guard = NavigationGuard::standard();
        let location = guard.resolve("/home");
        let session = Session::signed_in(true);
        assert_eq!(
            guard.decide(&session, &location),
            guard.decide(&session, &location)
        );
    }

    #[test]
    fn redirect_targets_are_stable() {
        let guard = NavigationGuard::standard();
        let sessions = [
            Session::signed_out(),
            Session::signed_in(false),
            Session::signed_in(true),
        ];
        for session in sessions {
            for path in ["/home", "/login", "/force-change-password", "/chart-viewer"] {
                if let Some(target) = guard.decide_path(&session, path).target() {
                    assert_eq!(
                        guard.decide_path(&session, target),
                        RedirectDecision::None,
                        "redirect from {path} to {target} is not stable"
                    );
                }
            }
        }
    }

    #[test]
    fn exposes_rule_names() {
        let guard = NavigationGuard::standard();
        assert_eq!(guard.rule_names().count(), 6);
        assert_eq!(guard.rule_names().next(), Some("session-loading"));
    }
}
