// Copyright 2026 Paul Adamson
// Licensed under the Apache License, Version 2.0
//
// Locator descriptors - compact `strategy:-:value` strings resolved to Playwright selectors
//
// Page objects keep their element locators as short descriptor strings such as
// `name:-:email` or `xpath:-://div[@role="option"]`. The three-character `:-:`
// separator was chosen so it does not collide with CSS pseudo-selectors or XPath
// axes, both of which use plain colons.
//
// Resolution is pure: parsing and dispatch produce a selector string, and nothing
// touches the browser until an action is performed on the resulting query.
//
// Selector engines used for the semantic strategies mirror Playwright's own
// getByText/getByLabel/getByPlaceholder/getByAltText/getByTitle/getByTestId.
// See: https://playwright.dev/docs/other-locators

use crate::error::{Error, Result};
use std::fmt;
use std::str::FromStr;

/// Separator between strategy and value in a descriptor string.
pub const SEPARATOR: &str = ":-:";

/// Attribute queried by the `testid` strategy (Playwright's default).
pub const TEST_ID_ATTRIBUTE: &str = "data-testid";

/// Query kind used to locate an element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Strategy {
    /// `id` attribute, matched exactly
    Id,
    /// `name` attribute
    Name,
    /// One entry of the `class` attribute
    Class,
    /// Visible text, substring and case-insensitive
    Text,
    /// Form control associated with a label
    Label,
    /// Input placeholder text
    Placeholder,
    /// Image alt text
    AltText,
    /// `title` attribute
    Title,
    /// `data-testid` attribute
    TestId,
    /// Raw CSS selector
    Css,
    /// Raw XPath expression
    XPath,
}

impl Strategy {
    /// Every supported strategy, in descriptor-token order.
    pub const ALL: [Strategy; 11] = [
        Strategy::Id,
        Strategy::Name,
        Strategy::Class,
        Strategy::Text,
        Strategy::Label,
        Strategy::Placeholder,
        Strategy::AltText,
        Strategy::Title,
        Strategy::TestId,
        Strategy::Css,
        Strategy::XPath,
    ];

    /// Returns the lowercase descriptor token for this strategy.
    pub fn as_str(&self) -> &'static str {
        match self {
            Strategy::Id => "id",
            Strategy::Name => "name",
            Strategy::Class => "class",
            Strategy::Text => "text",
            Strategy::Label => "label",
            Strategy::Placeholder => "placeholder",
            Strategy::AltText => "alttext",
            Strategy::Title => "title",
            Strategy::TestId => "testid",
            Strategy::Css => "css",
            Strategy::XPath => "xpath",
        }
    }

    /// Builds the Playwright selector for `value` under this strategy.
    pub fn selector_for(&self, value: &str) -> String {
        match self {
            Strategy::Id => format!("[id={}]", quote_attribute_value(value)),
            Strategy::Name => format!("[name='{}']", escape_single_quoted(value)),
            Strategy::Class => format!("[class~={}]", quote_attribute_value(value)),
            Strategy::Text => format!("internal:text={}", escape_for_text_selector(value, false)),
            Strategy::Label => format!("internal:label={}", escape_for_text_selector(value, false)),
            Strategy::Placeholder => format!(
                "internal:attr=[placeholder={}]",
                escape_for_attribute_selector(value, false)
            ),
            Strategy::AltText => format!(
                "internal:attr=[alt={}]",
                escape_for_attribute_selector(value, false)
            ),
            Strategy::Title => format!(
                "internal:attr=[title={}]",
                escape_for_attribute_selector(value, false)
            ),
            Strategy::TestId => format!(
                "internal:testid=[{}={}]",
                TEST_ID_ATTRIBUTE,
                escape_for_attribute_selector(value, true)
            ),
            Strategy::Css => value.to_string(),
            Strategy::XPath => format!("xpath={}", value),
        }
    }
}

impl FromStr for Strategy {
    type Err = Error;

    /// Parses a strategy token, ignoring ASCII case. Surrounding whitespace is
    /// not stripped, so a padded token is unsupported.
    fn from_str(token: &str) -> Result<Self> {
        let normalized = token.to_ascii_lowercase();
        Strategy::ALL
            .into_iter()
            .find(|strategy| strategy.as_str() == normalized)
            .ok_or(Error::UnsupportedStrategy(normalized))
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A parsed `strategy:-:value` pair identifying a UI element.
///
/// Descriptors are immutable values. Parsing happens once, so an unknown
/// strategy is reported where the descriptor is built rather than at each use.
///
/// # Example
///
/// ```ignore
/// use healthteam_harness::{LocatorDescriptor, Strategy};
///
/// let email = LocatorDescriptor::parse("NAME:-:email")?;
/// assert_eq!(email.strategy(), Strategy::Name);
/// assert_eq!(email.resolve().selector(), "[name='email']");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LocatorDescriptor {
    strategy: Strategy,
    value: String,
}

impl LocatorDescriptor {
    /// Creates a descriptor from an already-known strategy.
    pub fn new(strategy: Strategy, value: impl Into<String>) -> Result<Self> {
        let value = value.into();
        if value.is_empty() {
            return Err(Error::EmptyLocatorValue(strategy.as_str().to_string()));
        }
        Ok(Self { strategy, value })
    }

    /// Parses a descriptor string.
    ///
    /// Only the first `:-:` splits strategy from value; any later occurrence is
    /// kept verbatim in the value.
    pub fn parse(descriptor: &str) -> Result<Self> {
        let (token, value) = descriptor
            .split_once(SEPARATOR)
            .ok_or_else(|| Error::MalformedDescriptor(descriptor.to_string()))?;
        let strategy: Strategy = token.parse()?;
        Self::new(strategy, value)
    }

    /// Returns the strategy.
    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    /// Returns the value after the separator.
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Resolves the descriptor into a lazy query.
    pub fn resolve(&self) -> Query {
        Query {
            selector: self.strategy.selector_for(&self.value),
            descriptor: self.to_string(),
        }
    }
}

impl FromStr for LocatorDescriptor {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        LocatorDescriptor::parse(s)
    }
}

impl fmt::Display for LocatorDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.strategy, SEPARATOR, self.value)
    }
}

/// Parses and resolves a descriptor string in one step.
pub fn resolve(descriptor: &str) -> Result<Query> {
    Ok(LocatorDescriptor::parse(descriptor)?.resolve())
}

/// A resolved, lazy element query.
///
/// Holds the Playwright selector and the descriptor it came from (for error
/// messages). Matches zero or more elements of the current document; nothing
/// is checked until an action runs.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Query {
    selector: String,
    descriptor: String,
}

impl Query {
    /// Wraps a raw Playwright selector.
    pub fn from_selector(selector: impl Into<String>) -> Self {
        let selector = selector.into();
        Self {
            descriptor: selector.clone(),
            selector,
        }
    }

    /// Returns the Playwright selector string.
    pub fn selector(&self) -> &str {
        &self.selector
    }

    /// Returns the descriptor this query was resolved from.
    pub fn descriptor(&self) -> &str {
        &self.descriptor
    }

    /// Narrows the query to the nth match (0-indexed).
    pub fn nth(&self, index: usize) -> Query {
        Query {
            selector: format!("{} >> nth={}", self.selector, index),
            descriptor: format!("{} >> nth={}", self.descriptor, index),
        }
    }

    /// Chains a sub-selector scoped to this query's matches.
    pub fn locator(&self, selector: &str) -> Query {
        Query {
            selector: format!("{} >> {}", self.selector, selector),
            descriptor: format!("{} >> {}", self.descriptor, selector),
        }
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.descriptor)
    }
}

/// Anything that can be turned into a [`Query`]: descriptor strings, parsed
/// descriptors and already-resolved queries.
pub trait ToQuery {
    fn to_query(&self) -> Result<Query>;
}

impl ToQuery for str {
    fn to_query(&self) -> Result<Query> {
        resolve(self)
    }
}

impl ToQuery for String {
    fn to_query(&self) -> Result<Query> {
        resolve(self)
    }
}

impl ToQuery for LocatorDescriptor {
    fn to_query(&self) -> Result<Query> {
        Ok(self.resolve())
    }
}

impl ToQuery for Query {
    fn to_query(&self) -> Result<Query> {
        Ok(self.clone())
    }
}

impl<T: ToQuery + ?Sized> ToQuery for &T {
    fn to_query(&self) -> Result<Query> {
        (**self).to_query()
    }
}

// Playwright quotes text-engine values as JSON strings with an `i` (substring,
// case-insensitive) or `s` (exact) suffix.
fn escape_for_text_selector(text: &str, exact: bool) -> String {
    let quoted = serde_json::Value::String(text.to_string()).to_string();
    format!("{}{}", quoted, if exact { 's' } else { 'i' })
}

// Attribute-engine values only escape backslashes and double quotes.
fn escape_for_attribute_selector(value: &str, exact: bool) -> String {
    format!("{}{}", quote_attribute_value(value), if exact { 's' } else { 'i' })
}

// Double-quoted CSS attribute value. Ids and classes go through attribute
// selectors so colons, dots, slashes and leading digits stay literal.
fn quote_attribute_value(value: &str) -> String {
    let escaped = value.replace('\\', "\\\\").replace('"', "\\\"");
    format!("\"{}\"", escaped)
}

fn escape_single_quoted(value: &str) -> String {
    value.replace('\\', "\\\\").replace('\'', "\\'")
}
