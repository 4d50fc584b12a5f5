//! `{placeholder}` URI templates for resource templates.
//!
//! Only simple variables are supported: a variable matches one non-empty
//! path segment and stops at the next literal.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TemplateError {
    #[error("unbalanced braces in URI template '{0}'")]
    Unbalanced(String),

    #[error("invalid variable name '{name}' in URI template '{template}'")]
    InvalidVariable { template: String, name: String },

    #[error("variables '{first}' and '{second}' are adjacent in URI template '{template}'")]
    AdjacentVariables {
        template: String,
        first: String,
        second: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Part {
    Literal(String),
    Variable(String),
}

/// A parsed URI template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UriTemplate {
    source: String,
    parts: Vec<Part>,
}

impl UriTemplate {
    pub fn parse(template: &str) -> Result<Self, TemplateError> {
        let mut parts = Vec::new();
        let mut rest = template;

        while !rest.is_empty() {
            match rest.find(['{', '}']) {
                None => {
                    parts.push(Part::Literal(rest.to_string()));
                    break;
                }
                Some(i) if rest[i..].starts_with('}') => {
                    return Err(TemplateError::Unbalanced(template.to_string()));
                }
                Some(i) => {
                    if i > 0 {
                        parts.push(Part::Literal(rest[..i].to_string()));
                    }
                    let after = &rest[i + 1..];
                    let close = after
                        .find('}')
                        .ok_or_else(|| TemplateError::Unbalanced(template.to_string()))?;
                    let name = &after[..close];

                    let valid = !name.is_empty()
                        && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_');
                    if !valid {
                        return Err(TemplateError::InvalidVariable {
                            template: template.to_string(),
                            name: name.to_string(),
                        });
                    }
                    if let Some(Part::Variable(previous)) = parts.last() {
                        return Err(TemplateError::AdjacentVariables {
                            template: template.to_string(),
                            first: previous.clone(),
                            second: name.to_string(),
                        });
                    }

                    parts.push(Part::Variable(name.to_string()));
                    rest = &after[close + 1..];
                }
            }
        }

        Ok(Self {
            source: template.to_string(),
            parts,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Variable names in template order.
    pub fn variables(&self) -> impl Iterator<Item = &str> {
        self.parts.iter().filter_map(|part| match part {
            Part::Variable(name) => Some(name.as_str()),
            Part::Literal(_) => None,
        })
    }

    /// Match a concrete URI, returning the captured variables in order.
    pub fn matches<'a>(&'a self, uri: &'a str) -> Option<Vec<(&'a str, &'a str)>> {
        let mut rest = uri;
        let mut captured = Vec::new();
        let mut parts = self.parts.iter().peekable();

        while let Some(part) = parts.next() {
            match part {
                Part::Literal(literal) => rest = rest.strip_prefix(literal.as_str())?,
                Part::Variable(name) => {
                    let end = match parts.peek() {
                        Some(Part::Literal(next)) => rest.find(next.as_str())?,
                        _ => rest.len(),
                    };
                    let value = &rest[..end];
                    if value.is_empty() || value.contains('/') {
                        return None;
                    }
                    captured.push((name.as_str(), value));
                    rest = &rest[end..];
                }
            }
        }

        rest.is_empty().then_some(captured)
    }
}
