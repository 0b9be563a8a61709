//! Field checks and the validator that runs them.

use std::convert::Infallible;

use super::{FieldError, Fields, ValidationErrors};

/// Custom rule: `Ok(None)` passes, `Ok(Some(msg))` fails with `msg`,
/// `Err(e)` aborts the whole run.
type CustomRule<'a, I, E> = Box<dyn Fn(&str, &I) -> Result<Option<String>, E> + 'a>;

enum Rule<'a, I, E> {
    NotEmpty,
    Custom(CustomRule<'a, I, E>),
}

/// Rules attached to one input field.
pub struct Check<'a, I, E = Infallible> {
    field: &'static str,
    message: String,
    rules: Vec<Rule<'a, I, E>>,
}

/// Start a check on `field`; `message` is reported by presence rules.
pub fn check<'a, I, E>(field: &'static str, message: impl Into<String>) -> Check<'a, I, E> {
    Check {
        field,
        message: message.into(),
        rules: Vec::new(),
    }
}

impl<'a, I, E> Check<'a, I, E> {
    /// The field must be present and not the empty string.
    pub fn not_empty(mut self) -> Self {
        self.rules.push(Rule::NotEmpty);
        self
    }

    /// Add a rule computed from the field value and the whole input.
    pub fn custom<F>(mut self, rule: F) -> Self
    where
        F: Fn(&str, &I) -> Result<Option<String>, E> + 'a,
    {
        self.rules.push(Rule::Custom(Box::new(rule)));
        self
    }

    fn run(&self, input: &I, errors: &mut ValidationErrors) -> Result<(), E>
    where
        I: Fields,
    {
        let value = input.field(self.field).unwrap_or_default();

        for rule in &self.rules {
            let failure = match rule {
                Rule::NotEmpty => value.is_empty().then(|| self.message.clone()),
                Rule::Custom(f) => f(value, input)?,
            };
            if let Some(message) = failure {
                errors.push(FieldError::new(self.field, message, value));
            }
        }
        Ok(())
    }
}

/// Ordered list of field checks.
pub struct Validator<'a, I, E = Infallible> {
    checks: Vec<Check<'a, I, E>>,
}

impl<'a, I, E> Default for Validator<'a, I, E> {
    fn default() -> Self {
        Self { checks: Vec::new() }
    }
}

impl<'a, I: Fields, E> Validator<'a, I, E> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a check. Returns `self` for chaining.
    pub fn check(mut self, check: Check<'a, I, E>) -> Self {
        self.checks.push(check);
        self
    }

    /// Run every check against `input`, collecting all failures.
    ///
    /// Returns `Err` only when a custom rule reports a collaborator failure.
    pub fn run(&self, input: &I) -> Result<ValidationErrors, E> {
        let mut errors = ValidationErrors::new();
        for check in &self.checks {
            check.run(input, &mut errors)?;
        }
        Ok(errors)
    }
}
