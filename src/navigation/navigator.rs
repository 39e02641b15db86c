//! Observer wiring between the session provider and the rendering surface.

use super::decision::RedirectDecision;
use super::guard::NavigationGuard;
use crate::routing::Location;
use crate::session::{Session, SessionProvider, SubscriptionId};
use std::sync::{Arc, Mutex};
use tracing::{debug, warn};

/// Whatever performs the actual screen transition.
pub trait RenderingSurface {
    fn navigate(&mut self, path: &str);
}

/// Navigator shared between its owner and a provider subscription.
pub type SharedNavigator = Arc<Mutex<Navigator>>;

/// Re-runs the guard whenever the session or the location changes.
///
/// Holds a single pending navigation. Every evaluation overwrites it, so
/// the last decision wins and a `None` decision cancels an undelivered
/// redirect.
#[derive(Debug)]
pub struct Navigator {
    guard: NavigationGuard,
    session: Session,
    location: Location,
    pending: Option<String>,
}

impl Navigator {
    /// Navigator starting at `start_path` with a session still loading.
    pub fn new(guard: NavigationGuard, start_path: &str) -> Self {
        let location = guard.resolve(start_path);
        Self {
            guard,
            session: Session::initial(),
            location,
            pending: None,
        }
    }

    /// Wrap into a [`SharedNavigator`].
    pub fn shared(self) -> SharedNavigator {
        Arc::new(Mutex::new(self))
    }

    pub fn session(&self) -> Session {
        self.session
    }

    pub fn location(&self) -> &Location {
        &self.location
    }

    pub fn guard(&self) -> &NavigationGuard {
        &self.guard
    }

    /// Redirect decided but not yet handed to the surface.
    pub fn pending(&self) -> Option<&str> {
        self.pending.as_deref()
    }

    pub fn on_session_changed(&mut self, session: Session) -> RedirectDecision {
        self.session = session;
        self.evaluate()
    }

    /// The surface moved to `path` on its own (user tap, deep link).
    pub fn on_location_changed(&mut self, path: &str) -> RedirectDecision {
        self.location = self.guard.resolve(path);
        self.evaluate()
    }

    /// Hand the pending redirect to `surface` and move there.
    ///
    /// Returns the path navigated to, or `None` when nothing was pending.
    pub fn dispatch<R: RenderingSurface + ?Sized>(&mut self, surface: &mut R) -> Option<String> {
        let target = self.pending.take()?;
        debug!(from = self.location.path(), to = %target, "dispatching redirect");
        surface.navigate(&target);
        self.location = self.guard.resolve(&target);
        self.evaluate();
        Some(target)
    }

    fn evaluate(&mut self) -> RedirectDecision {
        let decision = self.guard.decide(&self.session, &self.location);
        let next = decision.target().map(str::to_string);
        if let Some(previous) = &self.pending {
            if next.as_deref() != Some(previous.as_str()) {
                debug!(superseded = %previous, decision = %decision, "pending redirect replaced");
            }
        }
        self.pending = next;
        decision
    }
}

/// Subscribe `navigator` to `provider`.
///
/// The navigator is first synchronized with the provider's current session.
/// Do not hold the navigator's lock while calling into the provider: the
/// subscription locks it on every session change.
pub fn connect(provider: &mut SessionProvider, navigator: &SharedNavigator) -> SubscriptionId {
    match navigator.lock() {
        Ok(mut nav) => {
            nav.on_session_changed(provider.session());
        }
        Err(_) => warn!("navigator lock poisoned, skipping initial sync"),
    }

    let shared = Arc::clone(navigator);
    provider.subscribe(move |session| match shared.lock() {
        Ok(mut nav) => {
            nav.on_session_changed(*session);
        }
        Err(_) => warn!("navigator lock poisoned, session change dropped"),
    })
}
