//! Raw value coercion
//!
//! Converts option text into booleans and string lists, and expands
//! `%(name)s` references. List values are read with a small literal parser;
//! nothing from a configuration file is ever evaluated.

/// Maximum nesting of `%(name)s` references
pub const MAX_INTERPOLATION_DEPTH: usize = 10;

/// Parse a boolean literal (`1/yes/true/on`, `0/no/false/off`, any case)
pub fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "yes" | "true" | "on" => Some(true),
        "0" | "no" | "false" | "off" => Some(false),
        _ => None,
    }
}

/// Parse a literal list of strings.
///
/// Accepts `[a, b]`, `(a, b)` or a bare `a, b`. Items are quoted strings
/// (`'x'`, `"x"`, optionally `u`-prefixed) or bare tokens such as numbers
/// and addresses. A trailing comma is allowed.
pub fn parse_list(raw: &str) -> Result<Vec<String>, String> {
    let text = raw.trim();
    let inner = match (text.chars().next(), text.chars().last()) {
        (Some('['), Some(']')) | (Some('('), Some(')')) if text.len() >= 2 => {
            &text[1..text.len() - 1]
        }
        (Some('[' | '('), _) => return Err("unbalanced brackets".to_string()),
        _ => text,
    };

    ListParser::new(inner).items()
}

struct ListParser {
    chars: Vec<char>,
    pos: usize,
}

impl ListParser {
    fn new(text: &str) -> Self {
        Self {
            chars: text.chars().collect(),
            pos: 0,
        }
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn peek_at(&self, offset: usize) -> Option<char> {
        self.chars.get(self.pos + offset).copied()
    }

    fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(char::is_whitespace) {
            self.pos += 1;
        }
    }

    fn items(mut self) -> Result<Vec<String>, String> {
        let mut items = Vec::new();

        loop {
            self.skip_whitespace();
            let Some(c) = self.peek() else {
                break;
            };

            let item = match c {
                '\'' | '"' => self.quoted()?,
                'u' | 'U' if matches!(self.peek_at(1), Some('\'' | '"')) => {
                    self.pos += 1;
                    self.quoted()?
                }
                _ => self.bare()?,
            };
            items.push(item);

            self.skip_whitespace();
            match self.peek() {
                None => break,
                Some(',') => self.pos += 1,
                Some(other) => return Err(format!("expected ',' but found '{}'", other)),
            }
        }

        Ok(items)
    }

    fn quoted(&mut self) -> Result<String, String> {
        let Some(quote) = self.peek() else {
            return Err("expected a quoted string".to_string());
        };
        self.pos += 1;

        let mut out = String::new();
        while let Some(c) = self.peek() {
            self.pos += 1;
            match c {
                '\\' => {
                    let escaped = self
                        .peek()
                        .ok_or_else(|| "unterminated string".to_string())?;
                    self.pos += 1;
                    out.push(match escaped {
                        'n' => '\n',
                        't' => '\t',
                        other => other,
                    });
                }
                c if c == quote => return Ok(out),
                c => out.push(c),
            }
        }

        Err("unterminated string".to_string())
    }

    fn bare(&mut self) -> Result<String, String> {
        let start = self.pos;
        while let Some(c) = self.peek() {
            if c.is_whitespace() || is_delimiter(c) {
                break;
            }
            self.pos += 1;
        }

        if self.pos == start {
            return match self.peek() {
                Some('[' | '(') => Err("nested lists are not supported".to_string()),
                Some(c) => Err(format!("unexpected '{}'", c)),
                None => Err("expected a list item".to_string()),
            };
        }

        Ok(self.chars[start..self.pos].iter().collect())
    }
}

fn is_delimiter(c: char) -> bool {
    matches!(c, ',' | '[' | ']' | '(' | ')' | '\'' | '"')
}

/// Expand `%(name)s` references and `%%` escapes.
///
/// A value without any `%(` is returned as written, stray `%` and `%%`
/// included. `lookup` receives lowercased names. Substituted values are expanded
/// recursively up to [`MAX_INTERPOLATION_DEPTH`] levels.
pub fn interpolate<F>(raw: &str, lookup: &F) -> Result<String, String>
where
    F: Fn(&str) -> Option<String>,
{
    interpolate_at(raw, lookup, 0)
}

fn interpolate_at<F>(raw: &str, lookup: &F, depth: usize) -> Result<String, String>
where
    F: Fn(&str) -> Option<String>,
{
    if !raw.contains("%(") {
        return Ok(raw.to_string());
    }
    if depth > MAX_INTERPOLATION_DEPTH {
        return Err(format!(
            "references nested deeper than {} levels",
            MAX_INTERPOLATION_DEPTH
        ));
    }

    let mut out = String::with_capacity(raw.len());
    let mut rest = raw;

    while let Some(pos) = rest.find('%') {
        out.push_str(&rest[..pos]);
        let tail = &rest[pos + 1..];

        if let Some(after) = tail.strip_prefix('%') {
            out.push('%');
            rest = after;
        } else if let Some(after) = tail.strip_prefix('(') {
            let close = after
                .find(")s")
                .ok_or_else(|| format!("bad reference '%{}'", tail))?;
            let name = after[..close].to_lowercase();
            let value = lookup(&name).ok_or_else(|| format!("no value for '%({})s'", name))?;
            out.push_str(&interpolate_at(&value, lookup, depth + 1)?);
            rest = &after[close + 2..];
        } else {
            return Err(format!("'%' must be followed by '%' or '(', found '%{}'", tail));
        }
    }

    out.push_str(rest);
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn no_vars(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn test_parse_bool_spellings() {
        for raw in ["1", "yes", "true", "on", "True", "YES", " On "] {
            assert_eq!(parse_bool(raw), Some(true), "{raw}");
        }
        for raw in ["0", "no", "false", "off", "False", "NO"] {
            assert_eq!(parse_bool(raw), Some(false), "{raw}");
        }
        for raw in ["", "2", "y", "enabled", "truee"] {
            assert_eq!(parse_bool(raw), None, "{raw}");
        }
    }

    #[test]
    fn test_parse_list_numbers() {
        assert_eq!(parse_list("[1, 2, 3]").unwrap(), vec!["1", "2", "3"]);
        assert_eq!(parse_list("(10,20,)").unwrap(), vec!["10", "20"]);
        assert_eq!(parse_list("7, 8").unwrap(), vec!["7", "8"]);
    }

    #[test]
    fn test_parse_list_strings() {
        let list = parse_list("[u'ops@example.com', \"dev@example.com\", 'it''s']");
        assert!(list.is_err());

        let list = parse_list(r#"[u'ops@example.com', "dev@example.com", 'a\'b']"#).unwrap();
        assert_eq!(list, vec!["ops@example.com", "dev@example.com", "a'b"]);
    }

    #[test]
    fn test_parse_list_empty() {
        assert!(parse_list("[]").unwrap().is_empty());
        assert!(parse_list("  ").unwrap().is_empty());
        assert!(parse_list("()").unwrap().is_empty());
    }

    #[test]
    fn test_parse_list_multiline() {
        let list = parse_list("['a@example.com',\n'b@example.com']").unwrap();
        assert_eq!(list, vec!["a@example.com", "b@example.com"]);
    }

    #[test]
    fn test_parse_list_rejects_expressions() {
        assert!(parse_list("[1, 2").is_err());
        assert!(parse_list("[1, 2)").is_err());
        assert!(parse_list("[[1], 2]").is_err());
        assert!(parse_list("[1,,2]").is_err());
        assert!(parse_list("['open]").is_err());
        assert!(parse_list("[1 2]").is_err());
        assert!(parse_list("__import__('os').system('true')").is_err());
        assert!(parse_list("range(3)").is_err());
    }

    #[test]
    fn test_interpolate_fqdn() {
        let lookup = |name: &str| (name == "fqdn").then(|| "mon.example.org".to_string());
        assert_eq!(
            interpolate("zabbix@%(fqdn)s", &lookup).unwrap(),
            "zabbix@mon.example.org"
        );
        assert_eq!(
            interpolate("zabbix@%(FQDN)s", &lookup).unwrap(),
            "zabbix@mon.example.org"
        );
    }

    #[test]
    fn test_interpolate_escapes_and_plain() {
        assert_eq!(interpolate("plain", &no_vars).unwrap(), "plain");
        // without a reference the value is taken as written
        assert_eq!(interpolate("abc%123", &no_vars).unwrap(), "abc%123");
        assert_eq!(interpolate("Disk 90% full", &no_vars).unwrap(), "Disk 90% full");
        assert_eq!(interpolate("100%% done", &no_vars).unwrap(), "100%% done");

        let lookup = |name: &str| (name == "n").then(|| "90".to_string());
        assert_eq!(interpolate("%(n)s%% done", &lookup).unwrap(), "90% done");
    }

    #[test]
    fn test_interpolate_nested() {
        let lookup = |name: &str| match name {
            "base" => Some("https://%(host)s".to_string()),
            "host" => Some("example.org".to_string()),
            _ => None,
        };
        assert_eq!(
            interpolate("%(base)s/zabbix", &lookup).unwrap(),
            "https://example.org/zabbix"
        );
    }

    #[test]
    fn test_interpolate_errors() {
        assert!(interpolate("%(missing)s", &no_vars).is_err());
        assert!(interpolate("%(missing)s at 50%", &no_vars).is_err());
        assert!(interpolate("%(open", &no_vars).is_err());

        let looping = |_: &str| Some("%(self)s".to_string());
        let err = interpolate("%(self)s", &looping).unwrap_err();
        assert!(err.contains("nested"));
    }
}
