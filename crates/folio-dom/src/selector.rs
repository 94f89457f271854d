//! Selector matching
//!
//! Compound selectors only (`tag`, `*`, `.class`, `#id`, `[attr]`,
//! `[attr=value]`) joined into comma lists. That covers every selector the
//! enhancement layer queries; combinators are rejected.

use std::iter::Peekable;
use std::str::CharIndices;

use crate::ElementData;

/// Selector parse errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SelectorError {
    #[error("empty selector")]
    Empty,

    #[error("unexpected character {found:?} at {offset} in {input:?}")]
    Unexpected { input: String, offset: usize, found: char },

    #[error("unterminated attribute selector in {0:?}")]
    UnterminatedAttribute(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Component {
    Class(String),
    Id(String),
    HasAttr(String),
    AttrEquals(String, String),
}

/// One compound selector, e.g. `button[type="submit"].wide`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selector {
    tag: Option<String>,
    components: Vec<Component>,
}

impl Selector {
    pub fn matches(&self, el: &ElementData) -> bool {
        if let Some(tag) = &self.tag {
            if !el.is(tag) {
                return false;
            }
        }
        self.components.iter().all(|c| match c {
            Component::Class(class) => el.has_class(class),
            Component::Id(id) => el.get_attr("id") == Some(id.as_str()),
            Component::HasAttr(name) => el.has_attr(name),
            Component::AttrEquals(name, value) => el.get_attr(name) == Some(value.as_str()),
        })
    }
}

/// Comma-separated selector group
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectorList {
    selectors: Vec<Selector>,
}

impl SelectorList {
    pub fn parse(input: &str) -> Result<Self, SelectorError> {
        let selectors = input
            .split(',')
            .map(|part| parse_compound(part.trim(), input))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { selectors })
    }

    pub fn matches(&self, el: &ElementData) -> bool {
        self.selectors.iter().any(|s| s.matches(el))
    }
}

impl std::str::FromStr for SelectorList {
    type Err = SelectorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

fn is_ident_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-' || c == '_'
}

fn take_ident(chars: &mut Peekable<CharIndices<'_>>) -> String {
    let mut ident = String::new();
    while let Some(&(_, c)) = chars.peek() {
        if !is_ident_char(c) {
            break;
        }
        ident.push(c);
        chars.next();
    }
    ident
}

fn parse_compound(part: &str, input: &str) -> Result<Selector, SelectorError> {
    if part.is_empty() {
        return Err(SelectorError::Empty);
    }
    let unexpected = |offset: usize, found: char| SelectorError::Unexpected {
        input: input.to_string(),
        offset,
        found,
    };

    let mut chars = part.char_indices().peekable();

    let mut selector = Selector { tag: None, components: Vec::new() };

    match chars.peek() {
        Some(&(_, '*')) => {
            chars.next();
        }
        Some(&(_, c)) if is_ident_char(c) => {
            selector.tag = Some(take_ident(&mut chars).to_ascii_lowercase());
        }
        _ => {}
    }

    while let Some((offset, c)) = chars.next() {
        match c {
            '.' | '#' => {
                let ident = take_ident(&mut chars);
                if ident.is_empty() {
                    return Err(unexpected(offset, c));
                }
                selector.components.push(if c == '.' {
                    Component::Class(ident)
                } else {
                    Component::Id(ident)
                });
            }
            '[' => {
                let close = part[offset..]
                    .find(']')
                    .map(|i| offset + i)
                    .ok_or_else(|| SelectorError::UnterminatedAttribute(input.to_string()))?;
                selector.components.push(parse_attribute(&part[offset + 1..close], input, offset)?);
                while chars.peek().is_some_and(|&(i, _)| i <= close) {
                    chars.next();
                }
            }
            _ => return Err(unexpected(offset, c)),
        }
    }

    Ok(selector)
}

fn parse_attribute(body: &str, input: &str, offset: usize) -> Result<Component, SelectorError> {
    let Some((name, value)) = body.split_once('=') else {
        let name = body.trim();
        if name.is_empty() || !name.chars().all(is_ident_char) {
            return Err(SelectorError::Unexpected { input: input.to_string(), offset, found: '[' });
        }
        return Ok(Component::HasAttr(name.to_ascii_lowercase()));
    };

    let name = name.trim();
    if name.is_empty() || !name.chars().all(is_ident_char) {
        return Err(SelectorError::Unexpected { input: input.to_string(), offset, found: '[' });
    }
    let value = value.trim();
    let value = value
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
        .or_else(|| value.strip_prefix('\'').and_then(|v| v.strip_suffix('\'')))
        .unwrap_or(value);
    Ok(Component::AttrEquals(name.to_ascii_lowercase(), value.to_string()))
}
