use once_cell::sync::Lazy;
use regex::Regex;

static SOURCE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#""source"\s*:\s*"([^"]+)""#).unwrap());
static SUBTITLE_BLOCK_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#""subtitle"\s*:\s*\{([^}]*)\}"#).unwrap());
static SUBTITLE_PAIR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#""([^"]+)"\s*:\s*"([^"]*)""#).unwrap());

/// Fields scraped from a decrypted manifest fragment.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ManifestFields {
    /// Primary stream URL, possibly relative to the payload origin.
    pub source: Option<String>,
    /// (language code, subtitle path) entries, paths possibly relative.
    pub subtitles: Vec<(String, String)>,
}

/// Scrape the stream source and subtitle entries out of manifest text.
///
/// The upstream assembles this fragment by hand and it is not reliably valid
/// JSON, so fields are located by scoped pattern matching instead of a strict
/// parse. Source and subtitle extraction are independent: a missing `source`
/// never blocks subtitle entries, and vice versa.
pub fn parse(text: &str) -> ManifestFields {
    ManifestFields {
        source: extract_source(text),
        subtitles: extract_subtitles(text),
    }
}

fn extract_source(text: &str) -> Option<String> {
    SOURCE_RE
        .captures(text)
        .map(|cap| unescape_slashes(&cap[1]))
}

fn extract_subtitles(text: &str) -> Vec<(String, String)> {
    let Some(block) = SUBTITLE_BLOCK_RE.captures(text) else {
        return Vec::new();
    };

    SUBTITLE_PAIR_RE
        .captures_iter(&block[1])
        .filter_map(|cap| {
            let path = unescape_slashes(strip_fragment(&cap[2]));
            if path.is_empty() {
                None
            } else {
                Some((cap[1].to_string(), path))
            }
        })
        .collect()
}

/// Drop everything from the first `#` on; the upstream appends version
/// markers there.
fn strip_fragment(path: &str) -> &str {
    match path.find('#') {
        Some(idx) => &path[..idx],
        None => path,
    }
}

fn unescape_slashes(s: &str) -> String {
    s.replace("\\/", "/")
}
