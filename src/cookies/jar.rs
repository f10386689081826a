//! In-memory cookie jar keyed by domain, then by cookie name.

use crate::base::neterror::NetError;
use crate::cookies::canonical_cookie::CanonicalCookie;
use crate::cookies::error::CookieParseError;
use crate::cookies::flags::JarFlags;
use crate::cookies::matching::candidate_domains;
use crate::cookies::persistence::{self, CookieRecord};
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::path::{Path, PathBuf};
use url::Url;

/// Called with the offending text when a `Set-Cookie` value fails to parse.
///
/// The jar is mutably borrowed while the callback runs, so it cannot be touched
/// from inside the callback.
pub type ParseErrorCallback = Box<dyn Fn(&str, &CookieParseError) + Send + Sync>;

/// What [`CookieJar::add_cookie`] accepts.
#[derive(Debug, Clone)]
pub enum CookieInput<'a> {
    /// A `Set-Cookie` value and the URL of the response that carried it.
    Raw { line: &'a str, url: &'a Url },
    /// A cookie that has already been parsed or restored.
    Parsed(CanonicalCookie),
}

impl<'a> CookieInput<'a> {
    pub fn raw(line: &'a str, url: &'a Url) -> Self {
        CookieInput::Raw { line, url }
    }
}

impl From<CanonicalCookie> for CookieInput<'_> {
    fn from(cookie: CanonicalCookie) -> Self {
        CookieInput::Parsed(cookie)
    }
}

type DomainCookies = HashMap<String, CanonicalCookie>;

/// A collection of cookies indexed by domain, then by name.
///
/// Every enumeration method returns a lazy iterator that borrows the jar, so the
/// jar cannot be modified until the iterator is dropped.
pub struct CookieJar {
    file: Option<PathBuf>,
    flags: JarFlags,
    cookies: HashMap<String, DomainCookies>,
    on_parse_error: Option<ParseErrorCallback>,
}

impl Default for CookieJar {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for CookieJar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CookieJar")
            .field("file", &self.file)
            .field("flags", &self.flags)
            .field("cookies", &self.cookies)
            .field("on_parse_error", &self.on_parse_error.is_some())
            .finish()
    }
}

impl CookieJar {
    /// An empty read/write jar with no backing file.
    pub fn new() -> Self {
        Self {
            file: None,
            flags: JarFlags::default(),
            cookies: HashMap::new(),
            on_parse_error: None,
        }
    }

    pub fn builder() -> CookieJarBuilder {
        CookieJarBuilder::default()
    }

    pub fn flags(&self) -> JarFlags {
        self.flags
    }

    /// Default location used by [`load`](Self::load) and [`save`](Self::save).
    pub fn file(&self) -> Option<&Path> {
        self.file.as_deref()
    }

    pub fn set_parse_error_callback<F>(&mut self, callback: F)
    where
        F: Fn(&str, &CookieParseError) + Send + Sync + 'static,
    {
        self.on_parse_error = Some(Box::new(callback));
    }

    /// Insert a cookie, replacing any cookie with the same name and domain.
    ///
    /// Raw text is parsed against its URL first. If parsing fails and a parse error
    /// callback is configured, the callback receives the text and `Ok(false)` is
    /// returned; without a callback the parse error is returned. Argument errors are
    /// always returned.
    pub fn add_cookie<'a>(&mut self, input: impl Into<CookieInput<'a>>) -> Result<bool, NetError> {
        let cookie = match input.into() {
            CookieInput::Parsed(cookie) => cookie,
            CookieInput::Raw { line, url } => match CanonicalCookie::parse_for_url(line, url) {
                Ok(cookie) => cookie,
                Err(NetError::CookieParse(err)) => return self.reject(line, err),
                Err(e) => return Err(e),
            },
        };

        self.insert(cookie);
        Ok(true)
    }

    /// Hand a malformed cookie to the parse error callback, or fail without one.
    pub(crate) fn reject(&self, line: &str, err: CookieParseError) -> Result<bool, NetError> {
        match &self.on_parse_error {
            Some(callback) => {
                tracing::debug!(error = %err, "ignoring malformed cookie");
                callback(line, &err);
                Ok(false)
            }
            None => Err(err.into()),
        }
    }

    fn insert(&mut self, cookie: CanonicalCookie) {
        tracing::trace!(name = cookie.name(), domain = cookie.domain(), "storing cookie");
        self.cookies
            .entry(cookie.domain().to_string())
            .or_default()
            .insert(cookie.name().to_string(), cookie);
    }

    pub fn get(&self, domain: &str, name: &str) -> Option<&CanonicalCookie> {
        self.cookies.get(domain).and_then(|d| d.get(name))
    }

    /// Domain keys currently present, in no particular order.
    pub fn domains(&self) -> impl Iterator<Item = &str> + '_ {
        self.cookies.keys().map(String::as_str)
    }

    /// Cookies stored under exactly `domain`.
    pub fn cookies_domain<'a>(
        &'a self,
        domain: &str,
    ) -> impl Iterator<Item = &'a CanonicalCookie> + 'a {
        self.cookies
            .get(domain)
            .into_iter()
            .flat_map(|cookies| cookies.values())
    }

    pub fn cookies_all(&self) -> impl Iterator<Item = &CanonicalCookie> + '_ {
        self.cookies.values().flat_map(|cookies| cookies.values())
    }

    /// Cookies that have not expired. Session cookies are included only when
    /// `include_session` is set.
    pub fn cookies_valid(
        &self,
        include_session: bool,
    ) -> impl Iterator<Item = &CanonicalCookie> + '_ {
        self.cookies_all()
            .filter(move |c| !c.has_expired(!include_session))
    }

    /// Cookies to send with a request to `url`, at most one per name.
    ///
    /// Domain keys are visited from the full host outwards, so a cookie stored
    /// under `sub.example.com` hides a same-named cookie under `example.com`.
    pub fn cookies_valid_for_request<'a>(
        &'a self,
        url: &'a Url,
    ) -> impl Iterator<Item = &'a CanonicalCookie> + 'a {
        let mut seen = HashSet::new();
        candidate_domains(url.host_str().unwrap_or_default())
            .into_iter()
            .filter_map(move |domain| self.cookies.get(&domain))
            .flat_map(|cookies| cookies.values())
            .filter(move |c| c.is_valid_for_request(url) && seen.insert(c.name().to_string()))
    }

    /// Drop expired cookies. With `session_ended`, session cookies go too.
    pub fn delete_expired(&mut self, session_ended: bool) {
        let mut kept: HashMap<String, DomainCookies> = HashMap::new();
        for cookie in self.cookies_valid(!session_ended) {
            kept.entry(cookie.domain().to_string())
                .or_default()
                .insert(cookie.name().to_string(), cookie.clone());
        }

        let removed = self.len() - kept.values().map(HashMap::len).sum::<usize>();
        tracing::debug!(removed, session_ended, "deleted expired cookies");
        self.cookies = kept;
    }

    /// Total cookie count.
    pub fn len(&self) -> usize {
        self.cookies.values().map(HashMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&mut self) {
        self.cookies.clear();
    }

    /// Add every cookie stored in `file`, or in the jar's own file if `None`.
    /// Returns the number of cookies read.
    ///
    /// The whole file is decoded before anything is inserted, so a failed load
    /// leaves the jar untouched.
    pub async fn load(&mut self, file: Option<&Path>) -> Result<usize, NetError> {
        let path = self.resolve_file(file)?;
        let cookies: Vec<CanonicalCookie> = persistence::read_records(&path)
            .await?
            .into_iter()
            .map(CanonicalCookie::from_record)
            .collect();

        let count = cookies.len();
        for cookie in cookies {
            self.insert(cookie);
        }

        tracing::debug!(path = %path.display(), count, "loaded cookies");
        Ok(count)
    }

    /// Write all unexpired persistent cookies to `file`, or to the jar's own file
    /// if `None`. Session cookies are never written.
    pub async fn save(&self, file: Option<&Path>) -> Result<(), NetError> {
        let path = self.resolve_file(file)?;
        let records: Vec<CookieRecord> = self
            .cookies_valid(false)
            .map(CanonicalCookie::to_record)
            .collect();

        persistence::write_records(&path, &records).await?;
        tracing::debug!(path = %path.display(), count = records.len(), "saved cookies");
        Ok(())
    }

    fn resolve_file(&self, file: Option<&Path>) -> Result<PathBuf, NetError> {
        file.map(Path::to_path_buf)
            .or_else(|| self.file.clone())
            .ok_or(NetError::NoCookieFile)
    }
}

/// Builder for creating a [`CookieJar`].
///
/// A configured file is not read at build time; call [`CookieJar::load`].
#[derive(Default)]
pub struct CookieJarBuilder {
    file: Option<PathBuf>,
    flags: Option<String>,
    cookies: Vec<CanonicalCookie>,
    on_parse_error: Option<ParseErrorCallback>,
}

impl CookieJarBuilder {
    /// Set the default storage file.
    pub fn file(mut self, path: impl Into<PathBuf>) -> Self {
        self.file = Some(path.into());
        self
    }

    /// Set permission flags, any combination of `r` and `w`. Defaults to `"rw"`.
    pub fn flags(mut self, flags: impl Into<String>) -> Self {
        self.flags = Some(flags.into());
        self
    }

    /// Seed the jar with a cookie.
    pub fn cookie(mut self, cookie: CanonicalCookie) -> Self {
        self.cookies.push(cookie);
        self
    }

    /// Seed the jar with several cookies.
    pub fn cookies(mut self, cookies: impl IntoIterator<Item = CanonicalCookie>) -> Self {
        self.cookies.extend(cookies);
        self
    }

    /// Route parse errors of raw cookie text to `callback` instead of failing.
    pub fn on_parse_error<F>(mut self, callback: F) -> Self
    where
        F: Fn(&str, &CookieParseError) + Send + Sync + 'static,
    {
        self.on_parse_error = Some(Box::new(callback));
        self
    }

    /// Build the jar. Fails with an argument error on unknown flags.
    pub fn build(self) -> Result<CookieJar, NetError> {
        let flags = match self.flags {
            Some(flags) => flags.parse()?,
            None => JarFlags::default(),
        };

        let mut jar = CookieJar {
            file: self.file,
            flags,
            cookies: HashMap::new(),
            on_parse_error: self.on_parse_error,
        };
        for cookie in self.cookies {
            jar.add_cookie(cookie)?;
        }
        Ok(jar)
    }
}
