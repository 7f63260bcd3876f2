/// Classification of a locator's host part.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HostKind {
    /// An `http://` or `https://` location.
    Http,
    /// The configured sentinel that denotes the document being resolved.
    SelfDocument,
    /// Anything else.
    Other,
}

/// A reference string split into the host to fetch and the fragment path to
/// navigate inside the fetched content.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Locator<'a> {
    pub host: &'a str,
    pub fragment: &'a str,
}

impl<'a> Locator<'a> {
    /// Splits `reference` on `#`.
    ///
    /// Only a split into exactly two non-empty parts is a locator; anything
    /// else (no `#`, several `#`, an empty side) yields `None`.
    pub fn parse(reference: &'a str) -> Option<Self> {
        let mut parts = reference.split('#');
        let host = parts.next()?;
        let fragment = parts.next()?;
        if parts.next().is_some() || host.is_empty() || fragment.is_empty() {
            return None;
        }
        Some(Self { host, fragment })
    }

    pub fn host_kind(&self, self_host: &str) -> HostKind {
        if is_http(self.host) {
            HostKind::Http
        } else if self.host == self_host {
            HostKind::SelfDocument
        } else {
            HostKind::Other
        }
    }

    /// Non-empty `/`-separated segments of the fragment path.
    pub fn segments(&self) -> impl Iterator<Item = &'a str> {
        self.fragment.split('/').filter(|s| !s.is_empty())
    }
}

fn is_http(host: &str) -> bool {
    ["http://", "https://"].iter().any(|scheme| {
        host.get(..scheme.len())
            .is_some_and(|prefix| prefix.eq_ignore_ascii_case(scheme))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scheme_is_case_insensitive() {
        assert!(is_http("HTTP://example.com"));
        assert!(is_http("https://example.com"));
        assert!(!is_http("http"));
        assert!(!is_http("ftp://example.com"));
    }
}
