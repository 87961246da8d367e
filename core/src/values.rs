//! Typed views of raw option and argument values.

use std::fmt::Display;
use std::str::FromStr;

use crate::error::{ValueError, ValueSource};
use crate::program::Program;

impl Program {
    /// Value of an option read as a boolean, `true` or `false` in any case.
    ///
    /// # Panics
    ///
    /// Panics if no option of the active scope is named `name`.
    pub fn boolean_option_value(&self, name: &str) -> Result<bool, ValueError> {
        parse_boolean(ValueSource::Option, name, self.option_value(name))
    }

    /// Value of an argument read as a boolean, `true` or `false` in any case.
    ///
    /// # Panics
    ///
    /// Panics if no argument of the active scope is named `name`.
    pub fn boolean_argument_value(&self, name: &str) -> Result<bool, ValueError> {
        parse_boolean(ValueSource::Argument, name, self.argument_value(name))
    }

    /// Value of an option converted with [`FromStr`].
    ///
    /// # Examples
    ///
    /// ```
    /// use program_core::{OptionDef, Program};
    ///
    /// let mut p = Program::new("server", "");
    /// p.add_option(OptionDef::with_value(Some('p'), Some("port"), "port").with_default("8080"))
    ///     .unwrap();
    /// p.parse(Vec::<String>::new()).unwrap();
    ///
    /// assert_eq!(p.parse_option_value::<u16>("port").unwrap(), 8080);
    /// ```
    ///
    /// # Panics
    ///
    /// Panics if no option of the active scope is named `name`.
    pub fn parse_option_value<T>(&self, name: &str) -> Result<T, ValueError>
    where
        T: FromStr,
        T::Err: Display,
    {
        parse_value(ValueSource::Option, name, self.option_value(name))
    }

    /// Value of an argument converted with [`FromStr`].
    ///
    /// # Panics
    ///
    /// Panics if no argument of the active scope is named `name`.
    pub fn parse_argument_value<T>(&self, name: &str) -> Result<T, ValueError>
    where
        T: FromStr,
        T::Err: Display,
    {
        parse_value(ValueSource::Argument, name, self.argument_value(name))
    }
}

fn parse_boolean(origin: ValueSource, name: &str, value: &str) -> Result<bool, ValueError> {
    if value.eq_ignore_ascii_case("true") {
        Ok(true)
    } else if value.eq_ignore_ascii_case("false") {
        Ok(false)
    } else {
        Err(value_error(
            origin,
            name,
            value,
            "must be either \"true\" or \"false\"".to_string(),
        ))
    }
}

fn parse_value<T>(origin: ValueSource, name: &str, value: &str) -> Result<T, ValueError>
where
    T: FromStr,
    T::Err: Display,
{
    value
        .parse()
        .map_err(|err: T::Err| value_error(origin, name, value, err.to_string()))
}

fn value_error(origin: ValueSource, name: &str, value: &str, reason: String) -> ValueError {
    ValueError {
        origin,
        name: name.to_string(),
        value: value.to_string(),
        reason,
    }
}
