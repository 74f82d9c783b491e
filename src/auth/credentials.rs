//! Static long-term credential table.
//!
//! The table is parsed once from the `USERS` string and never mutated
//! afterwards, so it can be shared behind an `Arc` without locking.

use std::collections::HashMap;
use std::fmt;

/// Credentials used when `USERS` is unset. Development only.
pub const DEFAULT_USERS: &str = "com=webrtcdemo";

/// Immutable username → password mapping.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct CredentialTable {
    entries: HashMap<String, String>,
}

impl CredentialTable {
    /// Look up the password for `username`.
    pub fn get(&self, username: &str) -> Option<&str> {
        self.entries.get(username).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Usernames in sorted order, for logging.
    pub fn usernames(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.entries.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl<K, V> FromIterator<(K, V)> for CredentialTable
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

// Passwords stay out of logs.
impl fmt::Debug for CredentialTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CredentialTable")
            .field("usernames", &self.usernames())
            .finish()
    }
}

/// Parse a `USERS` string into a credential table.
///
/// Every non-overlapping `word=word` run is taken as a `username=password`
/// pair, where a word is one or more ASCII alphanumerics or underscores.
/// Anything else acts as a separator, and fragments that do not form a full
/// pair are skipped. A later pair for the same username replaces the earlier
/// one. An empty input falls back to [`DEFAULT_USERS`].
pub fn parse_credentials(raw: &str) -> CredentialTable {
    let raw = if raw.is_empty() { DEFAULT_USERS } else { raw };
    PairScanner::new(raw).collect()
}

fn is_word(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

/// Yields `(name, password)` slices in input order.
struct PairScanner<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> PairScanner<'a> {
    fn new(input: &'a str) -> Self {
        Self { input, pos: 0 }
    }

    /// End of the word run starting at `start` (exclusive).
    fn word_end(&self, start: usize) -> usize {
        let bytes = self.input.as_bytes();
        let mut end = start;
        while end < bytes.len() && is_word(bytes[end]) {
            end += 1;
        }
        end
    }
}

impl<'a> Iterator for PairScanner<'a> {
    type Item = (&'a str, &'a str);

    fn next(&mut self) -> Option<Self::Item> {
        let bytes = self.input.as_bytes();
        while self.pos < bytes.len() {
            if !is_word(bytes[self.pos]) {
                self.pos += 1;
                continue;
            }

            let name_start = self.pos;
            let name_end = self.word_end(name_start);
            self.pos = name_end;

            if bytes.get(name_end) != Some(&b'=') {
                continue;
            }
            let pass_start = name_end + 1;
            let pass_end = self.word_end(pass_start);
            if pass_end == pass_start {
                continue;
            }

            self.pos = pass_end;
            return Some((
                &self.input[name_start..name_end],
                &self.input[pass_start..pass_end],
            ));
        }
        None
    }
}
