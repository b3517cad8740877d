//! UI effect seams — navigation and user notices.
//!
//! The pipeline never touches a router or a toast system directly; it is
//! handed these capabilities as trait objects so tests can observe every
//! redirect and notice.

/// Application routes the pipeline can redirect to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Login,
    Profile,
    Home,
}

impl std::fmt::Display for Route {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Login => "/login",
            Self::Profile => "/profile",
            Self::Home => "/",
        };
        write!(f, "{s}")
    }
}

/// Navigation capability (the router's `push`).
pub trait Navigator: Send + Sync {
    fn push(&self, route: Route);
}

/// User-facing notices (the toast system). Only one notice is visible at
/// a time: each call replaces whatever was shown before.
pub trait Notifier: Send + Sync {
    fn success(&self, message: &str);
    fn error(&self, message: &str);
}

/// Navigator for the CLI binary — prints where the app would go.
pub struct ConsoleNavigator;

impl Navigator for ConsoleNavigator {
    fn push(&self, route: Route) {
        eprintln!("→ navigating to {route}");
    }
}

/// Notifier for the CLI binary.
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn success(&self, message: &str) {
        eprintln!("✅ {message}");
    }

    fn error(&self, message: &str) {
        eprintln!("❌ {message}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn route_display() {
        assert_eq!(Route::Login.to_string(), "/login");
        assert_eq!(Route::Profile.to_string(), "/profile");
        assert_eq!(Route::Home.to_string(), "/");
    }
}
