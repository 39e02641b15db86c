//! Walks a first-time student through login, the forced password change
//! and logout, printing every redirect the navigator hands to the screen.
//!
//! Run with `cargo run --example session_walkthrough`. Set `RUST_LOG=debug`
//! to see rule evaluation.

use sessiongate::navigation::{connect, Navigator, RenderingSurface, SharedNavigator};
use sessiongate::session::{
    Credentials, Environment, InMemoryAuthBackend, PasswordChange, UserProfile,
};
use sessiongate::store::InMemoryCredentialStore;
use sessiongate::{telemetry, AppConfig};

struct Console;

impl RenderingSurface for Console {
    fn navigate(&mut self, path: &str) {
        println!("  -> navigate to {path}");
    }
}

fn show(step: &str, navigator: &SharedNavigator) {
    println!("{step}");
    if let Ok(mut nav) = navigator.lock() {
        if nav.dispatch(&mut Console).is_none() {
            println!("  (stay on {})", nav.location().path());
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    telemetry::init();

    let config = AppConfig::default();
    let guard = config.navigation.build_guard()?;
    let navigator = Navigator::new(guard, &config.navigation.start_path).shared();

    let env = Environment::new(
        InMemoryAuthBackend::new().with_account(
            "ana@school.test",
            "welcome1",
            UserProfile::new("s-1", "Ana").with_email("ana@school.test"),
            true,
        ),
        InMemoryCredentialStore::new(),
    );

    let mut provider = config.session.provider();
    connect(&mut provider, &navigator);
    show("app started, session loading", &navigator);

    provider.initialize(&env).await;
    show("no stored credentials", &navigator);

    if let Err(err) = provider
        .login(&env, Credentials::new("ana@school.test", "wrong-pass1"))
        .await
    {
        println!("login refused: {err}");
    }

    provider
        .login(&env, Credentials::new("ana@school.test", "welcome1"))
        .await?;
    show("signed in with a temporary password", &navigator);

    if let Ok(mut nav) = navigator.lock() {
        nav.on_location_changed("/subjects");
    }
    show("tried to open subjects", &navigator);

    provider
        .change_password(
            &env,
            PasswordChange::new("welcome1", "grades2024", "grades2024"),
        )
        .await?;
    show("password changed", &navigator);

    if let Ok(mut nav) = navigator.lock() {
        nav.on_location_changed("/chart-viewer");
    }
    show("opened the chart viewer", &navigator);

    provider.logout(&env).await;
    show("signed out", &navigator);

    println!("\nsession history:");
    for transition in provider.history().transitions() {
        println!(
            "  {:?} -> {:?} ({:?})",
            transition.from, transition.to, transition.event
        );
    }

    Ok(())
}
