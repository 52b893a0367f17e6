//! Compound CSS selectors (`li`, `.toggle`, `input.edit`, `#main.todo`)

use crate::error::DomError;
use std::fmt;
use std::str::FromStr;

/// A single compound selector: an optional tag, an optional id and any
/// number of classes. Combinators are not supported.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Selector {
    tag: Option<String>,
    id: Option<String>,
    classes: Vec<String>,
}

impl Selector {
    pub fn parse(source: &str) -> Result<Self, DomError> {
        let invalid = |reason: &str| DomError::InvalidSelector {
            selector: source.to_string(),
            reason: reason.to_string(),
        };

        let input = source.trim();
        if input.is_empty() {
            return Err(invalid("empty selector"));
        }

        let mut selector = Selector {
            tag: None,
            id: None,
            classes: Vec::new(),
        };
        let mut chars = input.chars().peekable();

        // Leading tag name or universal selector
        if chars.peek() == Some(&'*') {
            chars.next();
        } else {
            let tag: String = std::iter::from_fn(|| chars.next_if(|c| is_name_char(*c))).collect();
            if !tag.is_empty() {
                selector.tag = Some(tag.to_ascii_lowercase());
            }
        }

        while let Some(prefix) = chars.next() {
            let name: String = std::iter::from_fn(|| chars.next_if(|c| is_name_char(*c))).collect();
            match prefix {
                '.' | '#' if name.is_empty() => {
                    return Err(invalid(&format!("`{prefix}` must be followed by a name")));
                }
                '.' => selector.classes.push(name),
                '#' if selector.id.is_some() => return Err(invalid("more than one id")),
                '#' => selector.id = Some(name),
                c if c.is_whitespace() || matches!(c, '>' | '+' | '~' | ',') => {
                    return Err(invalid("combinators are not supported"));
                }
                c => return Err(invalid(&format!("unexpected character `{c}`"))),
            }
        }

        Ok(selector)
    }

    pub fn tag(&self) -> Option<&str> {
        self.tag.as_deref()
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    /// Check the selector against an element's tag, id and classes
    pub fn matches_parts(&self, tag: &str, id: Option<&str>, classes: &[String]) -> bool {
        if let Some(expected) = &self.tag {
            if !expected.eq_ignore_ascii_case(tag) {
                return false;
            }
        }
        if let Some(expected) = &self.id {
            if id != Some(expected.as_str()) {
                return false;
            }
        }
        self.classes.iter().all(|class| classes.contains(class))
    }
}

fn is_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-' || c == '_'
}

impl FromStr for Selector {
    type Err = DomError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Selector::parse(s)
    }
}

impl TryFrom<&str> for Selector {
    type Error = DomError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        Selector::parse(s)
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.tag {
            Some(tag) => f.write_str(tag)?,
            None if self.id.is_none() && self.classes.is_empty() => f.write_str("*")?,
            None => {}
        }
        if let Some(id) = &self.id {
            write!(f, "#{id}")?;
        }
        for class in &self.classes {
            write!(f, ".{class}")?;
        }
        Ok(())
    }
}
