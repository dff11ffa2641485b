//! Refresh-token cookie builders.

use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use time::Duration;

use crate::token::REFRESH_TOKEN_EXP;

/// Cookie name for the refresh token.
pub const REFRESH_TOKEN_COOKIE: &str = "refreshToken";

/// The cookie is only sent to the auth routes (refresh and logout).
pub const REFRESH_TOKEN_PATH: &str = "/api/auth";

/// Deployment-dependent cookie attributes.
#[derive(Debug, Clone, Default)]
pub struct CookieSettings {
    pub domain: Option<String>,
    /// Send only over HTTPS. Enable in production.
    pub secure: bool,
}

fn build(value: String, max_age: Duration, settings: &CookieSettings) -> Cookie<'static> {
    let mut builder = Cookie::build((REFRESH_TOKEN_COOKIE, value))
        .path(REFRESH_TOKEN_PATH)
        .max_age(max_age)
        .http_only(true)
        .secure(settings.secure)
        .same_site(SameSite::Strict);
    if let Some(domain) = &settings.domain {
        builder = builder.domain(domain.clone());
    }
    builder.build()
}

/// Set the refresh-token cookie on the jar.
///
/// ```
/// use axum_extra::extract::cookie::{CookieJar, SameSite};
/// use fleetpulse_auth_types::cookie::{set_refresh_token_cookie, CookieSettings, REFRESH_TOKEN_COOKIE};
///
/// let jar = set_refresh_token_cookie(CookieJar::new(), "refresh".to_string(), &CookieSettings::default());
/// let cookie = jar.get(REFRESH_TOKEN_COOKIE).unwrap();
/// assert_eq!(cookie.path(), Some("/api/auth"));
/// assert_eq!(cookie.max_age(), Some(time::Duration::seconds(604800)));
/// assert_eq!(cookie.same_site(), Some(SameSite::Strict));
/// assert!(cookie.http_only().unwrap_or(false));
/// ```
pub fn set_refresh_token_cookie(
    jar: CookieJar,
    value: String,
    settings: &CookieSettings,
) -> CookieJar {
    jar.add(build(
        value,
        Duration::seconds(REFRESH_TOKEN_EXP as i64),
        settings,
    ))
}

/// Clear the refresh-token cookie by setting Max-Age to 0.
pub fn clear_refresh_token_cookie(jar: CookieJar, settings: &CookieSettings) -> CookieJar {
    jar.add(build(String::new(), Duration::ZERO, settings))
}

/// Read the refresh token sent by the browser, if any.
pub fn refresh_token_from(jar: &CookieJar) -> Option<String> {
    jar.get(REFRESH_TOKEN_COOKIE)
        .map(|c| c.value().to_owned())
        .filter(|v| !v.is_empty())
}
