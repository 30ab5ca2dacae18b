//! Cookie jar that refuses cookies scoped to a public suffix.
use reqwest::Url;
use reqwest::cookie::{CookieStore, Jar};
use reqwest::header::HeaderValue;
use tracing::warn;

/// reqwest's [`Jar`] behind a public-suffix check on the `Domain` attribute.
///
/// A cookie whose domain is itself a public suffix (`co.uk`, `com`, ...) is
/// only kept when the setting host is exactly that name, in which case it
/// stays host-only.
#[derive(Default)]
pub struct PublicSuffixJar {
    inner: Jar,
}

impl PublicSuffixJar {
    fn accepts(header: &HeaderValue, url: &Url) -> bool {
        let Ok(raw) = header.to_str() else {
            return true;
        };
        let Ok(cookie) = cookie::Cookie::parse(raw) else {
            return true;
        };
        let Some(domain) = cookie.domain() else {
            return true;
        };

        let domain = domain.trim_start_matches('.').to_ascii_lowercase();
        if psl::suffix_str(&domain) != Some(domain.as_str()) {
            return true;
        }

        let same_host = url
            .host_str()
            .is_some_and(|host| host.eq_ignore_ascii_case(&domain));
        if !same_host {
            warn!(cookie = %cookie.name(), %domain, %url, "rejected cookie scoped to a public suffix");
        }
        same_host
    }
}

impl CookieStore for PublicSuffixJar {
    fn set_cookies(&self, cookie_headers: &mut dyn Iterator<Item = &HeaderValue>, url: &Url) {
        let mut accepted = cookie_headers.filter(|header| Self::accepts(header, url));
        self.inner.set_cookies(&mut accepted, url);
    }

    fn cookies(&self, url: &Url) -> Option<HeaderValue> {
        self.inner.cookies(url)
    }
}
