//! Response metadata.
//!
//! Every HTTP round trip produces one [`Response`] holding its header
//! fields. The `Link` header is parsed on first access to [`Response::links`].

use std::collections::{BTreeMap, HashMap};
use std::hash::{Hash, Hasher};
use std::sync::OnceLock;

use reqwest::header::HeaderMap;
use url::Url;

/// Header metadata of a single API response.
///
/// Header names are stored lowercased. Equality and hashing are based on
/// the header map alone.
#[derive(Debug, Clone, Default)]
pub struct Response {
    headers: BTreeMap<String, String>,
    links: OnceLock<HashMap<String, Url>>,
}

impl Response {
    /// Create metadata from header name/value pairs.
    pub fn new<K, V>(headers: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: AsRef<str>,
        V: Into<String>,
    {
        let headers = headers
            .into_iter()
            .map(|(name, value)| (name.as_ref().to_ascii_lowercase(), value.into()))
            .collect();
        Self {
            headers,
            links: OnceLock::new(),
        }
    }

    /// Create metadata from a transport header map.
    ///
    /// Repeated headers are joined with `", "`; values that are not valid
    /// visible ASCII are skipped.
    pub fn from_header_map(map: &HeaderMap) -> Self {
        let mut headers: BTreeMap<String, String> = BTreeMap::new();
        for (name, value) in map {
            let Ok(value) = value.to_str() else {
                continue;
            };
            headers
                .entry(name.as_str().to_string())
                .and_modify(|existing| {
                    existing.push_str(", ");
                    existing.push_str(value);
                })
                .or_insert_with(|| value.to_string());
        }
        Self {
            headers,
            links: OnceLock::new(),
        }
    }

    /// All header fields, keyed by lowercased name.
    pub fn headers(&self) -> &BTreeMap<String, String> {
        &self.headers
    }

    /// Look up a header value by name (case-insensitive).
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }

    /// Link relations (e.g. `"next"`) parsed from the `Link` header.
    pub fn links(&self) -> &HashMap<String, Url> {
        self.links
            .get_or_init(|| self.header("link").map(parse_link_header).unwrap_or_default())
    }

    /// Whether the response advertises a following page.
    pub fn has_next_page(&self) -> bool {
        self.links().contains_key("next")
    }
}

impl PartialEq for Response {
    fn eq(&self, other: &Self) -> bool {
        self.headers == other.headers
    }
}

impl Eq for Response {}

impl Hash for Response {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.headers.hash(state);
    }
}

/// Parse an RFC 8288 `Link` header into a relation → URL map.
///
/// The first URL wins when a relation appears more than once. Entries whose
/// URL does not parse are ignored.
fn parse_link_header(header: &str) -> HashMap<String, Url> {
    let mut links = HashMap::new();
    let mut rest = header;

    while let Some(start) = rest.find('<') {
        let Some(len) = rest[start..].find('>') else {
            break;
        };
        let target = &rest[start + 1..start + len];
        let after = &rest[start + len + 1..];
        let params_end = after.find('<').unwrap_or(after.len());

        if let Ok(url) = Url::parse(target) {
            for param in after[..params_end].split(';') {
                let param = param.trim().trim_end_matches(',').trim();
                let Some((key, value)) = param.split_once('=') else {
                    continue;
                };
                if !key.trim().eq_ignore_ascii_case("rel") {
                    continue;
                }
                for rel in value.trim().trim_matches('"').split_whitespace() {
                    links
                        .entry(rel.to_ascii_lowercase())
                        .or_insert_with(|| url.clone());
                }
            }
        }

        rest = &after[params_end..];
    }

    links
}
