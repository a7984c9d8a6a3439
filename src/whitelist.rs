use regex::Regex;

use crate::error::{HandshakeError, HandshakeResult};

/// Set of redirect URL patterns compiled at handshake construction.
///
/// `*` matches within a single path segment; a pattern ending in `/*` also
/// matches the bare prefix and any sub-path beneath it. Everything else
/// matches literally.
#[derive(Debug, Clone, Default)]
pub struct RedirectWhitelist {
    patterns: Vec<CompiledPattern>,
}

#[derive(Debug, Clone)]
struct CompiledPattern {
    source: String,
    matcher: Regex,
}

impl RedirectWhitelist {
    pub fn compile<I, S>(patterns: I) -> HandshakeResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut compiled = Vec::new();
        for pattern in patterns {
            let source = pattern.as_ref().to_owned();
            let matcher = Regex::new(&glob_to_regex(&source)).map_err(|err| {
                HandshakeError::Config(format!("invalid whitelist pattern '{source}': {err}"))
            })?;
            compiled.push(CompiledPattern { source, matcher });
        }
        Ok(Self { patterns: compiled })
    }

    /// True when the URL matches at least one pattern.
    pub fn is_match(&self, url: &str) -> bool {
        self.patterns
            .iter()
            .any(|pattern| pattern.matcher.is_match(url))
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    /// Pattern strings as supplied at construction.
    pub fn sources(&self) -> impl Iterator<Item = &str> {
        self.patterns.iter().map(|pattern| pattern.source.as_str())
    }
}

fn glob_to_regex(pattern: &str) -> String {
    // A trailing "/*" admits the bare prefix as well as any sub-path.
    let (body, tail) = match pattern.strip_suffix("/*") {
        Some(body) => (body, "(?:/.*)?"),
        None => (pattern, ""),
    };

    let mut regex = String::with_capacity(body.len() + 16);
    regex.push('^');
    for (index, literal) in body.split('*').enumerate() {
        if index > 0 {
            regex.push_str("[^/]*");
        }
        regex.push_str(&regex::escape(literal));
    }
    regex.push_str(tail);
    regex.push('$');
    regex
}
