use modelgen_core::CharacterSet;

use crate::errors::GenerationError;
use crate::random::RandomEngine;

const URI_SCHEMES: [&str; 3] = ["http", "ssh", "ftp"];
const URI_DOMAINS: [&str; 7] = [".com", ".org", ".net", ".int", ".edu", ".gov", ".mil"];

/// Constrained value generation on top of a [`RandomEngine`]: bounded
/// strings, composite words, integer compositions, and URIs.
///
/// List-aware draws live on the session, which injects the list resolver;
/// this type never touches lists.
pub struct ValueGenerator<'a> {
    engine: &'a mut RandomEngine,
}

impl<'a> ValueGenerator<'a> {
    pub fn new(engine: &'a mut RandomEngine) -> Self {
        Self { engine }
    }

    /// `length` independent uniform draws from the character set.
    pub fn string(
        &mut self,
        charset: CharacterSet,
        length: usize,
    ) -> Result<String, GenerationError> {
        let members = charset.members();
        let mut out = String::with_capacity(length);
        for _ in 0..length {
            let index = self.engine.int_between(0, members.len() as i64 - 1)?;
            out.push(members[index as usize] as char);
        }
        Ok(out)
    }

    /// Random LETTER string of length 4 to 10.
    pub fn word(&mut self) -> Result<String, GenerationError> {
        let length = self.engine.int_between(4, 10)?;
        self.string(CharacterSet::Letter, length as usize)
    }

    pub fn letters(&mut self, length: usize) -> Result<String, GenerationError> {
        self.string(CharacterSet::Letter, length)
    }

    /// A word with the first character upper-cased and the rest lowered.
    /// Only defined for alphabetic character sets.
    pub fn capitalized_word(
        &mut self,
        charset: CharacterSet,
        length: usize,
    ) -> Result<String, GenerationError> {
        if !charset.is_alpha() {
            return Err(GenerationError::NotAlphaCharset(charset.name().to_string()));
        }
        let word = self.string(charset, length)?;
        Ok(capitalize(&word))
    }

    /// An ordered sequence of `n` positive integers summing to `m`.
    ///
    /// Cut points are drawn without replacement from `[1, m)`, so every
    /// part is at least 1; infeasible arguments (`m < n`) surface as
    /// `InvalidRange` from the underlying permutation draw.
    pub fn composition(&mut self, n: usize, m: i64) -> Result<Vec<i64>, GenerationError> {
        if n == 0 {
            return Err(GenerationError::InvalidRange(
                "composition needs at least one part".to_string(),
            ));
        }
        if m <= 0 {
            return Err(GenerationError::InvalidRange(format!(
                "composition target must be positive, got {m}"
            )));
        }
        if n == 1 {
            return Ok(vec![m]);
        }
        let cuts = self.engine.permutation((m - 1) as usize, n - 1)?;
        let mut points: Vec<i64> = cuts.into_iter().map(|cut| cut as i64 + 1).collect();
        points.push(0);
        points.push(m);
        points.sort_unstable();
        Ok(points.windows(2).map(|pair| pair[1] - pair[0]).collect())
    }

    /// A CamelCase string of exactly `length` characters whose words are
    /// each at least `min_word_length` long.
    pub fn camel_case_words(
        &mut self,
        charset: CharacterSet,
        length: usize,
        min_word_length: usize,
    ) -> Result<String, GenerationError> {
        if min_word_length == 0 {
            return Err(GenerationError::InvalidLength(
                "minimum word length must be positive".to_string(),
            ));
        }
        if min_word_length > length {
            return Err(GenerationError::InvalidLength(format!(
                "minimum word length {min_word_length} exceeds total length {length}"
            )));
        }
        if !charset.is_alpha() {
            return Err(GenerationError::NotAlphaCharset(charset.name().to_string()));
        }

        let max_words = (length / min_word_length) as i64;
        let num_words = self.engine.int_between(1, max_words)? as usize;
        let free = (length - num_words * min_word_length) as i64;

        let extra = match self.composition(num_words, free) {
            Ok(parts) => parts,
            Err(GenerationError::InvalidRange(_)) => {
                // Too little slack to cut into words; give it all to the
                // first word.
                let mut parts = vec![0_i64; num_words];
                parts[0] = free;
                parts
            }
            Err(err) => return Err(err),
        };

        let mut out = String::with_capacity(length);
        for part in extra {
            let word_length = part as usize + min_word_length;
            let word = self.string(charset, word_length)?;
            out.push_str(&capitalize(&word));
        }
        Ok(out)
    }

    /// Random URI with port, path, query, and fragment each included at
    /// random.
    pub fn uri(&mut self) -> Result<String, GenerationError> {
        let add_port = self.engine.next_bool();
        let add_path = self.engine.next_bool();
        let add_query = self.engine.next_bool();
        let add_fragment = self.engine.next_bool();
        self.uri_with(add_port, add_path, add_query, add_fragment)
    }

    /// Random URI of the form
    /// `scheme://[user[:password]@]host[:port]/[path][?query][#fragment]`.
    /// The scheme is drawn from http, ssh, and ftp; credentials only
    /// appear for non-http schemes.
    pub fn uri_with(
        &mut self,
        add_port: bool,
        add_path: bool,
        add_query: bool,
        add_fragment: bool,
    ) -> Result<String, GenerationError> {
        let scheme_index = self.engine.int_below(URI_SCHEMES.len() as i64)? as usize;
        let scheme = URI_SCHEMES[scheme_index];
        let mut out = String::new();
        out.push_str(scheme);
        out.push_str("://");
        if scheme != "http" && self.engine.next_bool() {
            let user_length = self.engine.int_between(6, 10)? as usize;
            out.push_str(&self.string(CharacterSet::LetterLower, user_length)?);
            if self.engine.next_bool() {
                out.push(':');
                let password_length = self.engine.int_between(6, 10)? as usize;
                out.push_str(&self.string(CharacterSet::HexLower, password_length)?);
            }
            out.push('@');
        }
        self.push_uri_tail(&mut out, add_port, add_path, add_query, add_fragment)?;
        Ok(out)
    }

    /// Random URI with a fixed `http` scheme and no credentials.
    pub fn http_uri(
        &mut self,
        add_port: bool,
        add_path: bool,
        add_query: bool,
        add_fragment: bool,
    ) -> Result<String, GenerationError> {
        let mut out = String::from("http://");
        self.push_uri_tail(&mut out, add_port, add_path, add_query, add_fragment)?;
        Ok(out)
    }

    fn push_uri_tail(
        &mut self,
        out: &mut String,
        add_port: bool,
        add_path: bool,
        add_query: bool,
        add_fragment: bool,
    ) -> Result<(), GenerationError> {
        out.push_str("www.");
        let host_length = self.engine.int_between(6, 10)? as usize;
        out.push_str(&self.string(CharacterSet::Letter, host_length)?);
        let domain_index = self.engine.int_below(URI_DOMAINS.len() as i64)? as usize;
        out.push_str(URI_DOMAINS[domain_index]);
        if add_port {
            out.push(':');
            out.push_str(&self.engine.int_below(9999)?.to_string());
        }
        out.push('/');
        if add_path {
            let segments = self.engine.int_between(1, 4)?;
            for _ in 0..segments {
                let segment_length = self.engine.int_between(3, 6)? as usize;
                out.push_str(&self.string(CharacterSet::LetterLower, segment_length)?);
                out.push('/');
            }
        }
        if add_query {
            let mut separator = '?';
            let params = self.engine.int_between(1, 4)?;
            for _ in 0..params {
                out.push(separator);
                let key_length = self.engine.int_between(3, 5)? as usize;
                out.push_str(&self.string(CharacterSet::LetterLower, key_length)?);
                out.push('=');
                let value_length = self.engine.int_between(5, 8)? as usize;
                out.push_str(&self.string(CharacterSet::Numeric, value_length)?);
                separator = '&';
            }
        }
        if add_fragment {
            out.push('#');
            let fragment_length = self.engine.int_between(1, 15)? as usize;
            let raw = self.string(CharacterSet::IdSymbol, fragment_length)?;
            out.push_str(&encode_fragment(&raw));
        }
        Ok(())
    }

    /// Version-4-format UUID built from engine bytes, so it is
    /// reproducible under a fixed seed.
    pub fn uuid(&mut self) -> String {
        let mut bytes = [0_u8; 16];
        bytes.copy_from_slice(&self.engine.next_bytes(16));
        bytes[6] = (bytes[6] & 0x0f) | 0x40;
        bytes[8] = (bytes[8] & 0x3f) | 0x80;
        uuid::Uuid::from_bytes(bytes).to_string()
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    let Some(first) = chars.next() else {
        return String::new();
    };
    let capital = if first.is_ascii_uppercase() {
        first
    } else if first.is_ascii_alphabetic() {
        first.to_ascii_uppercase()
    } else {
        'A'
    };
    let mut out = String::with_capacity(word.len());
    out.push(capital);
    out.extend(chars.map(|c| c.to_ascii_lowercase()));
    out
}

/// Percent-encodes the characters RFC 3986 does not allow in a fragment.
fn encode_fragment(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for byte in raw.bytes() {
        if is_fragment_byte(byte) {
            out.push(byte as char);
        } else {
            out.push_str(&format!("%{byte:02X}"));
        }
    }
    out
}

fn is_fragment_byte(byte: u8) -> bool {
    byte.is_ascii_alphanumeric()
        || matches!(
            byte,
            b'-' | b'.'
                | b'_'
                | b'~'
                | b'!'
                | b'$'
                | b'&'
                | b'\''
                | b'('
                | b')'
                | b'*'
                | b'+'
                | b','
                | b';'
                | b'='
                | b':'
                | b'@'
                | b'/'
                | b'?'
        )
}
