//! Configuration sources
//!
//! The host framework owns configuration storage; the controller only needs
//! to look options up by key. [`KeyValueConfig`] is a small text source for
//! boards that embed their configuration at build time.
//!
//! Supported `KeyValueConfig` syntax:
//! - `key = value` pairs, one per line
//! - Booleans (`true` / `false`), integers, quoted or bare strings
//! - Comments (`# ...`) on their own line or after a value
//!
//! NOT supported:
//! - Section headers, arrays, inline tables
//! - Escapes inside quoted strings

/// A raw configuration value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigValue<'a> {
    Bool(bool),
    Int(i64),
    Str(&'a str),
}

/// Key/value lookup supplied by the host framework
pub trait ConfigSource {
    /// Look up the raw value of `key`, or `None` if it is not set
    fn lookup(&self, key: &str) -> Option<ConfigValue<'_>>;
}

/// Configuration held as `key = value` text
#[derive(Debug, Clone, Copy)]
pub struct KeyValueConfig<'a> {
    text: &'a str,
}

impl<'a> KeyValueConfig<'a> {
    /// Wrap configuration text
    pub const fn new(text: &'a str) -> Self {
        Self { text }
    }

    /// Iterate over all `(key, value)` pairs in file order
    ///
    /// Lines that are not `key = value` pairs are skipped.
    pub fn entries(&self) -> impl Iterator<Item = (&'a str, ConfigValue<'a>)> {
        self.text.lines().filter_map(parse_line)
    }
}

impl ConfigSource for KeyValueConfig<'_> {
    fn lookup(&self, key: &str) -> Option<ConfigValue<'_>> {
        // Last assignment wins, like repeated keys in most INI dialects
        self.entries().filter(|(k, _)| *k == key).map(|(_, v)| v).last()
    }
}

/// Parse one `key = value` line
fn parse_line(line: &str) -> Option<(&str, ConfigValue<'_>)> {
    let line = line.trim();

    // Skip empty lines and comments
    if line.is_empty() || line.starts_with('#') {
        return None;
    }

    let (key, value) = line.split_once('=')?;
    let key = key.trim();
    if key.is_empty() {
        return None;
    }

    Some((key, parse_value(value.trim())?))
}

/// Parse a value, stripping a trailing comment
fn parse_value(raw: &str) -> Option<ConfigValue<'_>> {
    if let Some(rest) = raw.strip_prefix('"') {
        let end = rest.find('"')?;
        return Some(ConfigValue::Str(&rest[..end]));
    }

    let value = match raw.find('#') {
        Some(pos) => raw[..pos].trim_end(),
        None => raw,
    };

    if value.is_empty() {
        return None;
    }

    Some(match value {
        "true" => ConfigValue::Bool(true),
        "false" => ConfigValue::Bool(false),
        _ => match value.parse::<i64>() {
            Ok(n) => ConfigValue::Int(n),
            Err(_) => ConfigValue::Str(value),
        },
    })
}
