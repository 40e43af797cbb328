//! Full-match regular expressions.
//!
//! Rule patterns must match an attribute in its entirety, so an enabled
//! empty pattern only ever matches the empty string.

use std::fmt;

use regex::{Captures, Regex};

use rearranger_foundation::{Error, Result};

/// A compiled pattern that only accepts whole-string matches.
#[derive(Clone)]
pub struct CompiledPattern {
    source: String,
    regex: Regex,
}

impl CompiledPattern {
    /// Compiles `pattern` for the named attribute.
    ///
    /// # Errors
    /// Returns an `InvalidPattern` error if the pattern does not compile.
    pub fn compile(attribute: &str, pattern: &str) -> Result<Self> {
        // The bare pattern must compile on its own: wrapping balances `a)|(b`.
        Regex::new(pattern)
            .map_err(|e| Error::invalid_pattern(attribute, pattern, e.to_string()))?;
        let regex = Regex::new(&format!("^(?:{pattern})$"))
            .map_err(|e| Error::invalid_pattern(attribute, pattern, e.to_string()))?;
        Ok(Self {
            source: pattern.to_string(),
            regex,
        })
    }

    /// Returns true if the whole text matches.
    #[must_use]
    pub fn is_match(&self, text: &str) -> bool {
        self.regex.is_match(text)
    }

    /// Returns the capture groups of a whole-text match.
    #[must_use]
    pub fn captures<'t>(&self, text: &'t str) -> Option<Captures<'t>> {
        self.regex.captures(text)
    }

    /// Rewrites a replacement template so every group reference is braced.
    ///
    /// A numbered reference ends at its last digit, so `$1Helper` refers to
    /// group 1 followed by `Helper`. Named references keep the longest run
    /// of word characters. A `$` that starts no reference stays literal.
    ///
    /// # Errors
    /// Returns an `InvalidConfiguration` error if the template refers to a
    /// group this pattern does not have.
    pub fn normalize_template(&self, template: &str) -> Result<String> {
        let mut out = String::with_capacity(template.len() + 4);
        let mut rest = template;
        while let Some(at) = rest.find('$') {
            out.push_str(&rest[..at]);
            let after = &rest[at + 1..];
            let (reference, consumed) = if let Some(braced) = after.strip_prefix('{') {
                match braced.find('}') {
                    Some(end) => (Some(&braced[..end]), end + 2),
                    None => (None, 0),
                }
            } else if after.starts_with('$') {
                out.push_str("$$");
                rest = &after[1..];
                continue;
            } else {
                let digits = after.chars().take_while(char::is_ascii_digit).count();
                let len = if digits > 0 {
                    digits
                } else {
                    after
                        .chars()
                        .take_while(|c| c.is_ascii_alphanumeric() || *c == '_')
                        .count()
                };
                ((len > 0).then(|| &after[..len]), len)
            };

            match reference {
                Some(group) => {
                    if !self.has_group(group) {
                        return Err(Error::invalid_configuration(format!(
                            "template '{template}' refers to group '{group}' \
                             missing from pattern '{}'",
                            self.source
                        )));
                    }
                    out.push_str("${");
                    out.push_str(group);
                    out.push('}');
                }
                None => out.push_str("$$"),
            }
            rest = &after[consumed..];
        }
        out.push_str(rest);
        Ok(out)
    }

    fn has_group(&self, group: &str) -> bool {
        match group.parse::<usize>() {
            Ok(index) => index < self.regex.captures_len(),
            Err(_) => self.regex.capture_names().flatten().any(|n| n == group),
        }
    }

    /// Returns the pattern as configured.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.source
    }
}

impl fmt::Debug for CompiledPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("CompiledPattern").field(&self.source).finish()
    }
}
