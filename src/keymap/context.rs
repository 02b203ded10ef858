//! Context system for conditional keybindings
//!
//! Bindings may carry a `when` condition. Whether it holds is decided by a
//! [`ConditionEvaluator`] against a [`ContextState`] that the pipeline's owner
//! passes in explicitly; there is no process-wide context store.

use std::collections::HashMap;

use super::binding::BindingEntry;
use super::error::KeymapError;

/// A value published under a context key
#[derive(Debug, Clone, PartialEq)]
pub enum ContextValue {
    Bool(bool),
    String(String),
    Number(f64),
}

impl ContextValue {
    /// Truthiness used by flag conditions: `false`, `""` and `0` are false
    pub fn is_truthy(&self) -> bool {
        match self {
            ContextValue::Bool(b) => *b,
            ContextValue::String(s) => !s.is_empty(),
            ContextValue::Number(n) => *n != 0.0,
        }
    }
}

impl From<bool> for ContextValue {
    fn from(value: bool) -> Self {
        ContextValue::Bool(value)
    }
}

impl From<&str> for ContextValue {
    fn from(value: &str) -> Self {
        ContextValue::String(value.to_string())
    }
}

impl From<String> for ContextValue {
    fn from(value: String) -> Self {
        ContextValue::String(value)
    }
}

impl From<f64> for ContextValue {
    fn from(value: f64) -> Self {
        ContextValue::Number(value)
    }
}

/// The type a declared context key is expected to hold
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContextType {
    Bool,
    String,
    Number,
}

/// Declaration of a context key, for validation and configuration UIs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContextSchema {
    pub value_type: ContextType,
    pub description: Option<String>,
    /// Allowed values for string keys
    pub allowed: Option<Vec<String>>,
}

impl ContextSchema {
    pub fn new(value_type: ContextType) -> Self {
        Self {
            value_type,
            description: None,
            allowed: None,
        }
    }

    pub fn describe(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Restrict a string key to the given values
    pub fn allow<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.allowed = Some(values.into_iter().map(Into::into).collect());
        self
    }

    /// Check a value against the declared type and allowed values
    pub fn check(&self, value: &ContextValue) -> Result<(), String> {
        if !matches_type(value, self.value_type) {
            return Err(format!("expected {:?}, got {:?}", self.value_type, value));
        }
        if let (Some(allowed), ContextValue::String(s)) = (&self.allowed, value) {
            if !allowed.iter().any(|a| a == s) {
                return Err(format!("{:?} is not one of {:?}", s, allowed));
            }
        }
        Ok(())
    }
}

/// Ambient state that conditions are evaluated against
#[derive(Debug, Clone, Default)]
pub struct ContextState {
    values: HashMap<String, ContextValue>,
    declarations: HashMap<String, ContextSchema>,
}

impl ContextState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Update a context value
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<ContextValue>) {
        let key = key.into();
        let value = value.into();
        if let Err(e) = self.check(&key, &value) {
            tracing::warn!("{}", e);
        }
        self.values.insert(key, value);
    }

    pub fn get(&self, key: &str) -> Option<&ContextValue> {
        self.values.get(key)
    }

    /// Whether `key` is set to a truthy value
    pub fn is_set(&self, key: &str) -> bool {
        self.values.get(key).is_some_and(ContextValue::is_truthy)
    }

    pub fn remove(&mut self, key: &str) -> Option<ContextValue> {
        self.values.remove(key)
    }

    /// Copy of every context value
    pub fn snapshot(&self) -> HashMap<String, ContextValue> {
        self.values.clone()
    }

    /// Register a context key with its schema
    pub fn declare(&mut self, key: impl Into<String>, schema: ContextSchema) {
        self.declarations.insert(key.into(), schema);
    }

    pub fn undeclare(&mut self, key: &str) -> Option<ContextSchema> {
        self.declarations.remove(key)
    }

    pub fn declaration(&self, key: &str) -> Option<&ContextSchema> {
        self.declarations.get(key)
    }

    /// Validate `value` against the declaration of `key`, if any
    ///
    /// `set` stores mismatching values anyway and only logs the error.
    pub fn check(&self, key: &str, value: &ContextValue) -> Result<(), KeymapError> {
        match self.declarations.get(key) {
            Some(schema) => schema
                .check(value)
                .map_err(|e| KeymapError::Condition(format!("Context key {}: {}", key, e))),
            None => Ok(()),
        }
    }
}

fn matches_type(value: &ContextValue, value_type: ContextType) -> bool {
    matches!(
        (value, value_type),
        (ContextValue::Bool(_), ContextType::Bool)
            | (ContextValue::String(_), ContextType::String)
            | (ContextValue::Number(_), ContextType::Number)
    )
}

/// Decides which bindings apply in the current context
///
/// Entries without a condition must always be kept. An `Err` aborts the
/// match; the input handler logs it and resets to idle.
pub trait ConditionEvaluator {
    fn filter_applicable<'a>(
        &self,
        candidates: &'a [BindingEntry],
        context: &ContextState,
    ) -> Result<Vec<&'a BindingEntry>, KeymapError>;
}

/// Keeps every candidate, conditions included
#[derive(Debug, Clone, Copy, Default)]
pub struct AlwaysApplicable;

impl ConditionEvaluator for AlwaysApplicable {
    fn filter_applicable<'a>(
        &self,
        candidates: &'a [BindingEntry],
        _context: &ContextState,
    ) -> Result<Vec<&'a BindingEntry>, KeymapError> {
        Ok(candidates.iter().collect())
    }
}

/// Treats a condition as `&&`-joined context flags, each optionally negated
///
/// `"editorFocused && !lastActionWasYank"` holds when `editorFocused` is truthy
/// and `lastActionWasYank` is not. Conditions using anything else are never
/// applicable.
#[derive(Debug, Clone, Copy, Default)]
pub struct FlagConditions;

impl FlagConditions {
    /// Evaluate a single condition, `None` when it is not a flag conjunction
    pub fn evaluate(condition: &str, context: &ContextState) -> Option<bool> {
        let mut result = true;
        for term in condition.split("&&") {
            let term = term.trim();
            let (negated, key) = match term.strip_prefix('!') {
                Some(rest) => (true, rest.trim()),
                None => (false, term),
            };
            if key.is_empty() || !key.chars().all(is_flag_char) {
                return None;
            }
            result &= context.is_set(key) != negated;
        }
        Some(result)
    }
}

fn is_flag_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | ':' | '-')
}

impl ConditionEvaluator for FlagConditions {
    fn filter_applicable<'a>(
        &self,
        candidates: &'a [BindingEntry],
        context: &ContextState,
    ) -> Result<Vec<&'a BindingEntry>, KeymapError> {
        let applicable = candidates
            .iter()
            .filter(|entry| match entry.when.as_deref() {
                None => true,
                Some(condition) => match FlagConditions::evaluate(condition, context) {
                    Some(holds) => holds,
                    None => {
                        tracing::warn!(
                            "Unsupported condition {:?} on {}; binding skipped",
                            condition,
                            entry.command
                        );
                        false
                    }
                },
            })
            .collect();
        Ok(applicable)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keymap::types::{KeyPress, Modifiers};

    fn entry(command: &str, when: Option<&str>) -> BindingEntry {
        let binding = BindingEntry::new(KeyPress::char_with_mods('y', Modifiers::META), command);
        match when {
            Some(w) => binding.when(w),
            None => binding,
        }
    }

    #[test]
    fn test_default_context() {
        let ctx = ContextState::default();
        assert!(ctx.get("editorFocused").is_none());
        assert!(!ctx.is_set("editorFocused"));
    }

    #[test]
    fn test_truthiness() {
        let mut ctx = ContextState::new();
        ctx.set("flag", true);
        ctx.set("mode", "");
        ctx.set("count", 0.0);
        assert!(ctx.is_set("flag"));
        assert!(!ctx.is_set("mode"));
        assert!(!ctx.is_set("count"));

        ctx.set("mode", "insert");
        assert!(ctx.is_set("mode"));
        assert_eq!(ctx.remove("mode"), Some(ContextValue::from("insert")));
    }

    #[test]
    fn test_snapshot_is_a_copy() {
        let mut ctx = ContextState::new();
        ctx.set("flag", true);
        let mut snapshot = ctx.snapshot();
        snapshot.insert("other".to_string(), ContextValue::Bool(true));
        assert!(ctx.get("other").is_none());
    }

    #[test]
    fn test_declarations() {
        let mut ctx = ContextState::new();
        ctx.declare(
            "lastActionWasYank",
            ContextSchema::new(ContextType::Bool).describe("Previous command was a yank"),
        );
        assert_eq!(
            ctx.declaration("lastActionWasYank").map(|s| s.value_type),
            Some(ContextType::Bool)
        );
        assert!(ctx.check("lastActionWasYank", &ContextValue::Bool(false)).is_ok());
        assert!(matches!(
            ctx.check("lastActionWasYank", &ContextValue::from("yes")),
            Err(KeymapError::Condition(_))
        ));
        assert!(ctx.undeclare("lastActionWasYank").is_some());
        assert!(ctx.declaration("lastActionWasYank").is_none());
    }

    #[test]
    fn test_allowed_values() {
        let mut ctx = ContextState::new();
        ctx.declare(
            "editorMode",
            ContextSchema::new(ContextType::String).allow(["normal", "insert"]),
        );

        assert!(ctx.check("editorMode", &ContextValue::from("insert")).is_ok());
        assert!(ctx.check("editorMode", &ContextValue::from("visual")).is_err());
        assert!(ctx.check("undeclared", &ContextValue::from("visual")).is_ok());

        // Rejected values are still stored
        ctx.set("editorMode", "visual");
        assert_eq!(ctx.get("editorMode"), Some(&ContextValue::from("visual")));
    }

    #[test]
    fn test_always_applicable_keeps_everything() {
        let candidates = vec![entry("a", None), entry("b", Some("neverTrue"))];
        let kept = AlwaysApplicable
            .filter_applicable(&candidates, &ContextState::new())
            .unwrap();
        assert_eq!(kept.len(), 2);
    }

    #[test]
    fn test_flag_conditions_and_logic() {
        let mut ctx = ContextState::new();
        ctx.set("editorFocused", true);

        assert_eq!(FlagConditions::evaluate("editorFocused", &ctx), Some(true));
        assert_eq!(
            FlagConditions::evaluate("editorFocused && !lastActionWasYank", &ctx),
            Some(true)
        );

        ctx.set("lastActionWasYank", true);
        assert_eq!(
            FlagConditions::evaluate("editorFocused && !lastActionWasYank", &ctx),
            Some(false)
        );
        assert_eq!(FlagConditions::evaluate("a || b", &ctx), None);
        assert_eq!(FlagConditions::evaluate("", &ctx), None);
    }

    #[test]
    fn test_flag_conditions_filter() {
        let mut ctx = ContextState::new();
        ctx.set("lastActionWasYank", true);
        let candidates = vec![
            entry("unconditional", None),
            entry("yank-pop", Some("lastActionWasYank")),
            entry("other", Some("!lastActionWasYank")),
            entry("unsupported", Some("a == b")),
        ];

        let kept: Vec<_> = FlagConditions
            .filter_applicable(&candidates, &ctx)
            .unwrap()
            .into_iter()
            .map(|e| e.command.as_str())
            .collect();
        assert_eq!(kept, vec!["unconditional", "yank-pop"]);
    }
}
