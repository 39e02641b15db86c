//! Redirect rules.
//!
//! A rule pairs a guard over the (session, location) context with the
//! decision to return when the guard holds. Rules are evaluated in order and
//! the first one that applies wins, so the order below is part of the
//! observable behavior.

use super::decision::RedirectDecision;
use crate::core::Guard;
use crate::routing::{normalize_path, Location, LocationGroup};
use crate::session::Session;
use serde::{Deserialize, Serialize};

/// Inputs of a navigation decision.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NavigationContext {
    pub session: Session,
    pub location: Location,
}

/// Well-known screens the guard redirects to.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoutePaths {
    pub login: String,
    pub home: String,
    pub force_change_password: String,
}

impl Default for RoutePaths {
    fn default() -> Self {
        Self {
            login: "/login".to_string(),
            home: "/home".to_string(),
            force_change_password: "/force-change-password".to_string(),
        }
    }
}

impl RoutePaths {
    /// Copy with every path normalized.
    pub fn normalized(&self) -> Self {
        Self {
            login: normalize_path(&self.login),
            home: normalize_path(&self.home),
            force_change_password: normalize_path(&self.force_change_password),
        }
    }
}

/// One named entry of the ordered rule list.
pub struct RedirectRule {
    name: &'static str,
    guard: Guard<NavigationContext>,
    decision: RedirectDecision,
}

impl RedirectRule {
    pub fn new(name: &'static str, guard: Guard<NavigationContext>, decision: RedirectDecision) -> Self {
        Self {
            name,
            guard,
            decision,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn applies(&self, context: &NavigationContext) -> bool {
        self.guard.check(context)
    }

    pub fn decision(&self) -> &RedirectDecision {
        &self.decision
    }
}

impl std::fmt::Debug for RedirectRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedirectRule")
            .field("name", &self.name)
            .field("decision", &self.decision)
            .finish()
    }
}

fn signed_in() -> Guard<NavigationContext> {
    Guard::new(|c: &NavigationContext| c.session.is_authenticated())
}

fn signed_out() -> Guard<NavigationContext> {
    signed_in().negate()
}

fn must_change_password() -> Guard<NavigationContext> {
    Guard::new(|c: &NavigationContext| c.session.must_change_password())
}

fn at(path: &str) -> Guard<NavigationContext> {
    let path = path.to_string();
    Guard::new(move |c: &NavigationContext| c.location.is(&path))
}

fn in_group(group: LocationGroup) -> Guard<NavigationContext> {
    Guard::new(move |c: &NavigationContext| c.location.group() == group)
}

/// The session-gated rule list, in evaluation order.
pub fn standard_rules(paths: &RoutePaths) -> Vec<RedirectRule> {
    let paths = paths.normalized();
    let force = paths.force_change_password.as_str();

    vec![
        RedirectRule::new(
            "session-loading",
            Guard::new(|c: &NavigationContext| c.session.is_loading()),
            RedirectDecision::None,
        ),
        RedirectRule::new(
            "password-change-required",
            signed_in()
                .and(must_change_password())
                .and(at(force).negate()),
            RedirectDecision::go_to(force),
        ),
        RedirectRule::new(
            "password-change-done",
            signed_in()
                .and(must_change_password().negate())
                .and(at(force)),
            RedirectDecision::go_to(&paths.home),
        ),
        RedirectRule::new(
            "signed-in-on-auth-screen",
            signed_in()
                .and(in_group(LocationGroup::Auth))
                .and(at(force).negate()),
            RedirectDecision::go_to(&paths.home),
        ),
        RedirectRule::new(
            "signed-out-in-main",
            signed_out().and(in_group(LocationGroup::Main)),
            RedirectDecision::go_to(&paths.login),
        ),
        RedirectRule::new(
            "signed-out-on-standalone-screen",
            signed_out().and(in_group(LocationGroup::Standalone)),
            RedirectDecision::go_to(&paths.login),
        ),
    ]
}
