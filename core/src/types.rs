//! Option and argument definitions.
//!
//! Each definition carries both its declaration (names, value name, default,
//! description) and its parse state (`is_set`, values). The parser mutates the
//! state in place and accessors read it back by name, so no parallel map of
//! parsed values exists.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::{DeclarationError, Result};

/// Definition and parse state of an option.
///
/// An option without a value name is a flag: its presence alone sets it. An
/// option with a value name consumes the token that follows it.
///
/// # Examples
///
/// ```
/// use program_core::OptionDef;
///
/// let verbose = OptionDef::flag(Some('v'), Some("verbose"))
///     .with_description("print more messages");
/// assert!(verbose.is_flag());
/// assert_eq!(verbose.sort_key(), "v");
///
/// let output = OptionDef::with_value(None, Some("output"), "path")
///     .with_default("out.txt");
/// assert!(!output.is_flag());
/// assert_eq!(output.effective_value(), "out.txt");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionDef {
    /// Single-character name used as `-x`.
    pub short_name: Option<char>,
    /// Word used as `--name`.
    pub long_name: Option<String>,
    /// Placeholder shown in usage text; `None` for flags.
    pub value_name: Option<String>,
    /// Value reported when the option is not set.
    pub default_value: Option<String>,
    pub description: String,
    /// Whether the option appeared on the command line.
    #[serde(default)]
    pub is_set: bool,
    /// Value given on the command line, for valued options.
    #[serde(default)]
    pub value: Option<String>,
}

impl OptionDef {
    /// Creates a flag.
    pub fn flag(short_name: Option<char>, long_name: Option<&str>) -> Self {
        Self {
            short_name,
            long_name: long_name.map(String::from),
            ..Default::default()
        }
    }

    /// Creates an option taking one value, shown as `<value_name>`.
    pub fn with_value(short_name: Option<char>, long_name: Option<&str>, value_name: &str) -> Self {
        Self {
            short_name,
            long_name: long_name.map(String::from),
            value_name: Some(value_name.to_string()),
            ..Default::default()
        }
    }

    /// Sets the default value. An empty default is treated as none.
    pub fn with_default(mut self, default_value: &str) -> Self {
        self.default_value = Some(default_value.to_string()).filter(|v| !v.is_empty());
        self
    }

    /// Adds a description.
    pub fn with_description(mut self, description: &str) -> Self {
        self.description = description.to_string();
        self
    }

    /// Returns true when the option takes no value.
    pub fn is_flag(&self) -> bool {
        self.value_name.is_none()
    }

    /// Value given on the command line, falling back to the default and then
    /// to an empty string.
    pub fn effective_value(&self) -> &str {
        match (&self.value, self.is_set) {
            (Some(value), true) => value.as_str(),
            _ => self.default_value.as_deref().unwrap_or(""),
        }
    }

    /// Key used to order options in usage text: short name, else long name.
    pub fn sort_key(&self) -> String {
        match (&self.short_name, &self.long_name) {
            (Some(short), _) => short.to_string(),
            (None, Some(long)) => long.clone(),
            (None, None) => String::new(),
        }
    }

    /// Lookup keys of this option: short name then long name.
    pub fn keys(&self) -> Vec<String> {
        self.short_name
            .map(|c| c.to_string())
            .into_iter()
            .chain(self.long_name.clone())
            .collect()
    }

    fn validate(&self) -> Result<()> {
        if self.short_name.is_none() && self.long_name.is_none() {
            return Err(DeclarationError::MissingOptionName);
        }

        if let Some(short) = self.short_name {
            if short == '-' || short.is_whitespace() {
                return Err(DeclarationError::InvalidShortName(short));
            }
        }

        if let Some(long) = &self.long_name {
            if long.chars().count() < 2
                || long.starts_with('-')
                || long.chars().any(char::is_whitespace)
            {
                return Err(DeclarationError::InvalidLongName(long.clone()));
            }
        }

        Ok(())
    }
}

/// Options of one scope, addressable by short and long name.
#[derive(Debug, Clone, Default)]
pub struct OptionSet {
    options: Vec<OptionDef>,
    keys: HashMap<String, usize>,
}

impl OptionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an option, rejecting names already used in this set or in
    /// `globals`.
    pub(crate) fn insert(&mut self, option: OptionDef, globals: Option<&OptionSet>) -> Result<()> {
        option.validate()?;

        let keys = option.keys();
        for key in &keys {
            let taken = self.keys.contains_key(key)
                || globals.is_some_and(|globals| globals.keys.contains_key(key));
            if taken {
                return Err(DeclarationError::DuplicateOption(key.clone()));
            }
        }

        let index = self.options.len();
        self.options.push(option);
        for key in keys {
            self.keys.insert(key, index);
        }

        Ok(())
    }

    pub fn get(&self, key: &str) -> Option<&OptionDef> {
        self.keys.get(key).map(|&index| &self.options[index])
    }

    pub(crate) fn get_mut(&mut self, key: &str) -> Option<&mut OptionDef> {
        let index = *self.keys.get(key)?;
        self.options.get_mut(index)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.keys.contains_key(key)
    }

    /// Options in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &OptionDef> {
        self.options.iter()
    }

    /// Options ordered by [`OptionDef::sort_key`].
    pub fn sorted(&self) -> Vec<&OptionDef> {
        let mut options: Vec<&OptionDef> = self.options.iter().collect();
        options.sort_by_key(|option| option.sort_key());
        options
    }

    pub fn len(&self) -> usize {
        self.options.len()
    }

    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }
}

/// Arity class of a positional argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ArgumentKind {
    /// Exactly one value, always required.
    Mandatory,
    /// At most one value.
    Optional,
    /// Every remaining value, possibly none.
    Trailing,
}

/// Definition and parse state of a positional argument.
///
/// # Examples
///
/// ```
/// use program_core::{ArgumentDef, ArgumentKind};
///
/// let files = ArgumentDef::trailing("file").with_description("files to read");
/// assert_eq!(files.kind, ArgumentKind::Trailing);
/// assert_eq!(files.placeholder(), "[<file>...]");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArgumentDef {
    /// Lookup key and usage label.
    pub name: String,
    pub description: String,
    pub kind: ArgumentKind,
    #[serde(default)]
    pub is_set: bool,
    /// Bound value for mandatory and optional arguments.
    #[serde(default)]
    pub value: Option<String>,
    /// Bound values for the trailing argument.
    #[serde(default)]
    pub trailing_values: Vec<String>,
}

impl ArgumentDef {
    fn new(name: &str, kind: ArgumentKind) -> Self {
        Self {
            name: name.to_string(),
            description: String::new(),
            kind,
            is_set: false,
            value: None,
            trailing_values: Vec::new(),
        }
    }

    pub fn mandatory(name: &str) -> Self {
        Self::new(name, ArgumentKind::Mandatory)
    }

    pub fn optional(name: &str) -> Self {
        Self::new(name, ArgumentKind::Optional)
    }

    pub fn trailing(name: &str) -> Self {
        Self::new(name, ArgumentKind::Trailing)
    }

    /// Adds a description.
    pub fn with_description(mut self, description: &str) -> Self {
        self.description = description.to_string();
        self
    }

    /// Usage-line placeholder: `<name>`, `[<name>]` or `[<name>...]`.
    pub fn placeholder(&self) -> String {
        match self.kind {
            ArgumentKind::Mandatory => format!("<{}>", self.name),
            ArgumentKind::Optional => format!("[<{}>]", self.name),
            ArgumentKind::Trailing => format!("[<{}>...]", self.name),
        }
    }

    pub(crate) fn bind(&mut self, value: &str) {
        self.is_set = true;
        self.value = Some(value.to_string());
    }

    pub(crate) fn bind_trailing(&mut self, values: &[String]) {
        self.is_set = true;
        self.trailing_values = values.to_vec();
    }
}

/// Ordered positional arguments of one scope.
///
/// Keeps the declaration order mandatory, then optional, then at most one
/// trailing argument.
#[derive(Debug, Clone, Default)]
pub struct ArgumentList {
    arguments: Vec<ArgumentDef>,
}

impl ArgumentList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an argument after checking the ordering rules.
    ///
    /// # Examples
    ///
    /// ```
    /// use program_core::{ArgumentDef, ArgumentList, DeclarationError};
    ///
    /// let mut list = ArgumentList::new();
    /// list.push(ArgumentDef::optional("name")).unwrap();
    /// assert_eq!(
    ///     list.push(ArgumentDef::mandatory("path")),
    ///     Err(DeclarationError::MandatoryAfterOptional)
    /// );
    /// ```
    pub fn push(&mut self, argument: ArgumentDef) -> Result<()> {
        if argument.name.trim().is_empty() {
            return Err(DeclarationError::EmptyArgumentName);
        }

        if self.get(&argument.name).is_some() {
            return Err(DeclarationError::DuplicateArgument(argument.name));
        }

        if let Some(last) = self.arguments.last() {
            match (last.kind, argument.kind) {
                (ArgumentKind::Trailing, ArgumentKind::Trailing) => {
                    return Err(DeclarationError::MultipleTrailingArguments);
                }
                (ArgumentKind::Trailing, _) => {
                    return Err(DeclarationError::ArgumentAfterTrailing);
                }
                (ArgumentKind::Optional, ArgumentKind::Mandatory) => {
                    return Err(DeclarationError::MandatoryAfterOptional);
                }
                _ => {}
            }
        }

        self.arguments.push(argument);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&ArgumentDef> {
        self.arguments.iter().find(|argument| argument.name == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ArgumentDef> {
        self.arguments.iter()
    }

    pub fn as_slice(&self) -> &[ArgumentDef] {
        &self.arguments
    }

    pub(crate) fn as_mut_slice(&mut self) -> &mut [ArgumentDef] {
        &mut self.arguments
    }

    pub fn len(&self) -> usize {
        self.arguments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arguments.is_empty()
    }
}
