//! Sessiongate: session-gated navigation for the student performance app.
//!
//! The crate follows a "pure core, imperative shell" split. The navigation
//! guard is a pure function of the session and the current location; the
//! session provider is the shell that talks to the auth backend and the
//! credential store and publishes every change to its observers.
//!
//! # Core Concepts
//!
//! - **Session**: authentication and password-change status
//! - **Location**: the current screen, tagged with its navigational group
//! - **Navigation guard**: ordered redirect rules, first match wins
//! - **Navigator**: re-runs the guard when the session or location changes
//!
//! # Example
//!
//! ```rust
//! use sessiongate::navigation::{connect, NavigationGuard, Navigator, RenderingSurface};
//! use sessiongate::session::{
//!     Credentials, Environment, InMemoryAuthBackend, SessionProvider, UserProfile,
//! };
//! use sessiongate::store::InMemoryCredentialStore;
//!
//! struct Screen(Vec<String>);
//!
//! impl RenderingSurface for Screen {
//!     fn navigate(&mut self, path: &str) {
//!         self.0.push(path.to_string());
//!     }
//! }
//!
//! # tokio_test_block(async {
//! let env = Environment::new(
//!     InMemoryAuthBackend::new().with_account("ana", "temp-pass1", UserProfile::new("s-1", "Ana"), true),
//!     InMemoryCredentialStore::new(),
//! );
//!
//! let mut provider = SessionProvider::new();
//! let navigator = Navigator::new(NavigationGuard::standard(), "/home").shared();
//! connect(&mut provider, &navigator);
//!
//! provider.initialize(&env).await;
//! assert_eq!(navigator.lock().unwrap().pending(), Some("/login"));
//!
//! provider.login(&env, Credentials::new("ana", "temp-pass1")).await.unwrap();
//! let mut screen = Screen(Vec::new());
//! navigator.lock().unwrap().dispatch(&mut screen);
//! assert_eq!(screen.0, vec!["/force-change-password"]);
//! # });
//! # fn tokio_test_block<F: std::future::Future>(f: F) -> F::Output {
//! #     tokio::runtime::Runtime::new().unwrap().block_on(f)
//! # }
//! ```

pub mod config;
pub mod core;
pub mod navigation;
pub mod routing;
pub mod session;
pub mod store;
pub mod telemetry;

// Re-export commonly used types
pub use config::{AppConfig, ConfigError};
pub use navigation::{NavigationGuard, Navigator, RedirectDecision};
pub use routing::{Location, LocationGroup, RouteTable};
pub use session::{AuthError, Session, SessionProvider};
