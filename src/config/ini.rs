//! Sectioned key/value document
//!
//! Parses the classic INI dialect used by the script configuration files:
//! `[section]` headers, `key = value` or `key: value` options, `#`/`;`
//! comment lines, indented continuation lines and a `DEFAULT` section whose
//! values are visible from every other section.

use crate::error::ConfigError;
use std::collections::BTreeMap;

/// Name of the section supplying fallback values for all sections
pub const DEFAULT_SECTION: &str = "DEFAULT";

type Options = BTreeMap<String, String>;

/// A parsed (or merged) configuration document
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IniDocument {
    defaults: Options,
    sections: BTreeMap<String, Options>,
}

impl IniDocument {
    /// Create an empty document
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse document text. `origin` names the source in error messages.
    pub fn parse(text: &str, origin: &str) -> Result<Self, ConfigError> {
        let mut doc = Self::new();
        let mut section: Option<String> = None;
        let mut last_key: Option<String> = None;

        for (idx, line) in text.lines().enumerate() {
            let line_no = idx + 1;
            let trimmed = line.trim();

            if trimmed.is_empty() || line.starts_with('#') || line.starts_with(';') {
                continue;
            }

            // Continuation of the previous option's value
            if line.starts_with(char::is_whitespace) {
                if let (Some(name), Some(key)) = (section.as_deref(), last_key.as_deref()) {
                    if let Some(value) = doc.options_mut(name).get_mut(key) {
                        value.push('\n');
                        value.push_str(trimmed);
                        continue;
                    }
                }
            }

            if let Some(rest) = trimmed.strip_prefix('[') {
                let name = match rest.find(']') {
                    Some(end) if end > 0 => &rest[..end],
                    _ => {
                        return Err(parse_error(origin, line_no, "malformed section header"));
                    }
                };
                doc.options_mut(name);
                section = Some(name.to_string());
                last_key = None;
                continue;
            }

            let Some(name) = section.as_deref() else {
                return Err(parse_error(
                    origin,
                    line_no,
                    "option found before any [section] header",
                ));
            };

            let (key, value) = split_option(trimmed)
                .ok_or_else(|| parse_error(origin, line_no, "expected 'key = value'"))?;

            doc.options_mut(name).insert(key.clone(), value);
            last_key = Some(key);
        }

        Ok(doc)
    }

    /// Overlay another document on top of this one; its values win
    pub fn overlay(&mut self, other: IniDocument) {
        self.defaults.extend(other.defaults);
        for (name, options) in other.sections {
            self.sections.entry(name).or_default().extend(options);
        }
    }

    /// Look up a raw option value, falling back to the `DEFAULT` section.
    ///
    /// Returns `None` when the section itself is missing, even if `DEFAULT`
    /// carries the key.
    pub fn get(&self, section: &str, key: &str) -> Option<&str> {
        let key = key.to_lowercase();
        if section == DEFAULT_SECTION {
            return self.defaults.get(&key).map(String::as_str);
        }
        let options = self.sections.get(section)?;
        options
            .get(&key)
            .or_else(|| self.defaults.get(&key))
            .map(String::as_str)
    }

    /// Keys defined directly in a section (not inherited from `DEFAULT`)
    pub fn keys<'a>(&'a self, section: &str) -> impl Iterator<Item = &'a str> + 'a {
        self.sections
            .get(section)
            .into_iter()
            .flat_map(|options| options.keys().map(String::as_str))
    }

    /// True if the document carries no options at all
    pub fn is_empty(&self) -> bool {
        self.defaults.is_empty() && self.sections.values().all(BTreeMap::is_empty)
    }

    fn options_mut(&mut self, section: &str) -> &mut Options {
        if section == DEFAULT_SECTION {
            &mut self.defaults
        } else {
            self.sections.entry(section.to_string()).or_default()
        }
    }
}

/// Split `key = value` / `key: value`, applying inline comment and `""` rules
fn split_option(line: &str) -> Option<(String, String)> {
    let sep = line.find(['=', ':'])?;
    let key = line[..sep].trim();
    if key.is_empty() {
        return None;
    }

    let mut value = &line[sep + 1..];
    if let Some(pos) = inline_comment_start(value) {
        value = &value[..pos];
    }
    let value = value.trim();
    let value = if value == "\"\"" { "" } else { value };

    Some((key.to_lowercase(), value.to_string()))
}

/// Position of a `;` comment that is preceded by whitespace
fn inline_comment_start(value: &str) -> Option<usize> {
    value
        .char_indices()
        .filter(|&(_, c)| c == ';')
        .map(|(pos, _)| pos)
        .find(|&pos| pos > 0 && value[..pos].ends_with(char::is_whitespace))
}

fn parse_error(origin: &str, line: usize, message: &str) -> ConfigError {
    ConfigError::ParseError {
        path: origin.to_string(),
        line,
        message: message.to_string(),
    }
}
