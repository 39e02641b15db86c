use crate::routing::normalize_path;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Output of the navigation guard.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RedirectDecision {
    /// Stay where you are.
    None,
    /// Replace the current screen with the one at this path.
    GoTo(String),
}

impl RedirectDecision {
    /// Redirect to a normalized path.
    pub fn go_to(path: &str) -> Self {
        Self::GoTo(normalize_path(path))
    }

    pub fn target(&self) -> Option<&str> {
        match self {
            Self::None => None,
            Self::GoTo(path) => Some(path),
        }
    }

    pub fn is_redirect(&self) -> bool {
        matches!(self, Self::GoTo(_))
    }
}

impl fmt::Display for RedirectDecision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => f.write_str("stay"),
            Self::GoTo(path) => write!(f, "go to {path}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn go_to_normalizes() {
        assert_eq!(
            RedirectDecision::go_to("home/"),
            RedirectDecision::GoTo("/home".to_string())
        );
    }

    #[test]
    fn target_and_display() {
        let stay = RedirectDecision::None;
        assert_eq!(stay.target(), None);
        assert!(!stay.is_redirect());
        assert_eq!(stay.to_string(), "stay");

        let go = RedirectDecision::go_to("/login");
        assert_eq!(go.target(), Some("/login"));
        assert!(go.is_redirect());
        assert_eq!(go.to_string(), "go to /login");
    }
}
