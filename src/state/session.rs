//! Who is logged in, as far as the browser can tell.

use log::{debug, info, warn};

use crate::api::FinanceApi;
use crate::error::AppError;

pub const LOGIN_PATH: &str = "/login";

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AuthStatus {
    Checking,
    Authenticated {
        username: Option<String>,
        /// Guessed from the current path because the status check was
        /// unavailable.
        inferred: bool,
    },
    Unauthenticated,
}

impl AuthStatus {
    pub fn is_authenticated(&self) -> bool {
        matches!(self, AuthStatus::Authenticated { .. })
    }

    pub fn label(&self) -> Option<String> {
        match self {
            AuthStatus::Authenticated {
                username: Some(name),
                ..
            } => Some(format!("Logged in as {}.", name)),
            AuthStatus::Authenticated { .. } => Some("Logged in.".to_string()),
            _ => None,
        }
    }
}

/// Path-based guess: anywhere but the login page counts as logged in.
/// A mistyped path therefore reads as an active session.
pub fn infer_from_path(path: &str) -> AuthStatus {
    if path.trim_end_matches('/') == LOGIN_PATH {
        AuthStatus::Unauthenticated
    } else {
        AuthStatus::Authenticated {
            username: None,
            inferred: true,
        }
    }
}

/// Asks the backend for the session. 401 and 403 mean logged out; any other
/// failure falls back to [`infer_from_path`].
pub async fn check<A: FinanceApi + ?Sized>(api: &A, path: &str) -> AuthStatus {
    match api.session_status().await {
        Ok(info) => {
            debug!("session active for {:?}", info.username);
            AuthStatus::Authenticated {
                username: info.username,
                inferred: false,
            }
        }
        Err(AppError::Http { status: 401 | 403, .. }) => AuthStatus::Unauthenticated,
        Err(err) => {
            let status = infer_from_path(path);
            warn!(
                "session status unavailable ({}); inferring {} from path {:?}",
                err,
                if status.is_authenticated() { "logged in" } else { "logged out" },
                path
            );
            status
        }
    }
}

/// Message for the login form when it fails.
pub async fn login<A: FinanceApi + ?Sized>(api: &A, username: &str, password: &str) -> Result<(), String> {
    match api.login(username, password).await {
        Ok(()) => {
            info!("logged in as {}", username);
            Ok(())
        }
        Err(AppError::Http { detail, status, .. }) => {
            warn!("login rejected with {}", status);
            Err(detail.unwrap_or_else(|| "Login failed.".to_string()))
        }
        Err(err) => {
            warn!("login request failed: {}", err);
            Err("An error occurred during login.".to_string())
        }
    }
}

pub async fn logout<A: FinanceApi + ?Sized>(api: &A) -> Result<(), String> {
    match api.logout().await {
        Ok(()) => {
            info!("logged out");
            Ok(())
        }
        Err(AppError::Http { detail, .. }) => Err(format!(
            "Logout failed: {}",
            detail.unwrap_or_else(|| "Please try again.".to_string())
        )),
        Err(err) => {
            warn!("logout request failed: {}", err);
            Err("An error occurred during logout.".to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::endpoints;
    use crate::api::fake::FakeApi;
    use crate::api::SessionInfo;
    use futures::executor::block_on;
    use serde_json::json;

    fn with_status(result: Result<SessionInfo, AppError>) -> FakeApi {
        let api = FakeApi::new();
        *api.session.borrow_mut() = Some(result);
        api
    }

    #[test]
    fn status_endpoint_wins() {
        let api = with_status(Ok(SessionInfo {
            username: Some("demo_user".into()),
        }));
        let status = block_on(check(&api, "/login"));
        assert_eq!(status.label().as_deref(), Some("Logged in as demo_user."));
    }

    #[test]
    fn unauthorized_means_logged_out() {
        let api = with_status(Err(AppError::http(401, "Unauthorized", None)));
        assert_eq!(block_on(check(&api, "/")), AuthStatus::Unauthenticated);
    }

    #[test]
    fn missing_endpoint_falls_back_to_the_path() {
        let api = with_status(Err(AppError::http(404, "Not Found", None)));
        assert_eq!(
            block_on(check(&api, "/data-management")),
            AuthStatus::Authenticated {
                username: None,
                inferred: true
            }
        );
        let api = with_status(Err(AppError::Network("offline".into())));
        assert_eq!(block_on(check(&api, "/login")), AuthStatus::Unauthenticated);
    }

    #[test]
    fn login_messages() {
        let api = FakeApi::new();
        assert_eq!(block_on(login(&api, "demo", "pw")), Ok(()));

        api.fail(
            endpoints::LOGIN_TOKEN,
            AppError::http(401, "Unauthorized", Some(&json!({"detail": "Incorrect username or password"}))),
        );
        assert_eq!(
            block_on(login(&api, "demo", "bad")),
            Err("Incorrect username or password".to_string())
        );

        api.fail(endpoints::LOGIN_TOKEN, AppError::http(500, "Internal Server Error", None));
        assert_eq!(block_on(login(&api, "demo", "pw")), Err("Login failed.".to_string()));

        api.fail(endpoints::LOGIN_TOKEN, AppError::Network("offline".into()));
        assert_eq!(
            block_on(login(&api, "demo", "pw")),
            Err("An error occurred during login.".to_string())
        );
    }

    #[test]
    fn logout_messages() {
        let api = FakeApi::new();
        assert_eq!(block_on(logout(&api)), Ok(()));
        api.fail(endpoints::LOGOUT, AppError::http(500, "Internal Server Error", None));
        assert_eq!(
            block_on(logout(&api)),
            Err("Logout failed: Please try again.".to_string())
        );
    }
}
