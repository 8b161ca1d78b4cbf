//! Array keys and key normalization.

use std::fmt;

/// Key addresses a position in an [`Array`](super::Array).
///
/// Integer keys and string keys may coexist within one array. Strings that
/// spell a canonical decimal integer are always stored as [`Key::Int`], so
/// `"3"` and `3` address the same entry while `"03"` and `"3.0"` do not.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Key {
    Int(i64),
    Str(String),
}

impl Key {
    /// Normalizes a float key.
    ///
    /// Integral floats collapse onto the integer key with the same value;
    /// every other finite float is keyed by its shortest decimal rendering.
    /// Non-finite floats use the spellings `NAN`, `INF` and `-INF`.
    pub fn from_f64(f: f64) -> Self {
        if f.is_nan() {
            Key::Str("NAN".to_string())
        } else if f.is_infinite() {
            Key::Str(if f > 0.0 { "INF" } else { "-INF" }.to_string())
        } else if f.fract() == 0.0 && f >= i64::MIN as f64 && f < i64::MAX as f64 {
            Key::Int(f as i64)
        } else {
            Key::from(format!("{}", f))
        }
    }

    /// Returns true if this is an integer key.
    pub fn is_int(&self) -> bool {
        matches!(self, Key::Int(_))
    }

    /// Returns the integer if this is an integer key.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Key::Int(i) => Some(*i),
            Key::Str(_) => None,
        }
    }

    /// Returns the string if this is a string key.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Key::Str(s) => Some(s),
            Key::Int(_) => None,
        }
    }

    /// Compares the string forms of two keys, ignoring ASCII case.
    pub fn eq_ignore_ascii_case(&self, other: &Key) -> bool {
        match (self, other) {
            (Key::Int(a), Key::Int(b)) => a == b,
            (Key::Str(a), Key::Str(b)) => a.eq_ignore_ascii_case(b),
            // A string key never spells a canonical integer, so mixed pairs differ.
            _ => false,
        }
    }
}

/// Parses a canonical decimal integer: no sign other than a leading `-`,
/// no leading zeros, no `-0`.
fn parse_canonical_int(s: &str) -> Option<i64> {
    let digits = s.strip_prefix('-').unwrap_or(s);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    if digits.len() > 1 && digits.starts_with('0') {
        return None;
    }
    if s == "-0" {
        return None;
    }
    s.parse::<i64>().ok()
}

impl From<i64> for Key {
    fn from(i: i64) -> Self {
        Key::Int(i)
    }
}

impl From<i32> for Key {
    fn from(i: i32) -> Self {
        Key::Int(i64::from(i))
    }
}

impl From<usize> for Key {
    fn from(i: usize) -> Self {
        match i64::try_from(i) {
            Ok(i) => Key::Int(i),
            Err(_) => Key::Str(i.to_string()),
        }
    }
}

impl From<f64> for Key {
    fn from(f: f64) -> Self {
        Key::from_f64(f)
    }
}

impl From<bool> for Key {
    fn from(b: bool) -> Self {
        Key::Int(i64::from(b))
    }
}

impl From<String> for Key {
    fn from(s: String) -> Self {
        match parse_canonical_int(&s) {
            Some(i) => Key::Int(i),
            None => Key::Str(s),
        }
    }
}

impl From<&str> for Key {
    fn from(s: &str) -> Self {
        match parse_canonical_int(s) {
            Some(i) => Key::Int(i),
            None => Key::Str(s.to_string()),
        }
    }
}

impl From<&String> for Key {
    fn from(s: &String) -> Self {
        Key::from(s.as_str())
    }
}

impl From<&Key> for Key {
    fn from(k: &Key) -> Self {
        k.clone()
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Int(i) => write!(f, "{}", i),
            Key::Str(s) => write!(f, "{}", s),
        }
    }
}
