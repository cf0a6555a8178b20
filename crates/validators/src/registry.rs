//! Defines the registry of named validators and the built-in table.
use crate::error::ValidatorError;
use crate::validator::{Validator, ValidatorSpec};
use regex::Regex;
use std::collections::HashMap;

/// Builds a validator from its (optional) argument text. An `Err` carries the
/// reason the argument was rejected.
pub type ValidatorFactory = fn(argument: Option<&str>) -> Result<Validator, String>;

/// The table of marker names a matcher understands.
///
/// Built once and then shared read-only; pass it to every comparison instead of
/// reaching for a global.
#[derive(Clone)]
pub struct ValidatorRegistry {
    validators: HashMap<String, ValidatorFactory>,
}

impl ValidatorRegistry {
    /// Creates a new, empty registry.
    pub fn new() -> Self {
        Self {
            validators: HashMap::new(),
        }
    }

    /// Registers a validator under `name` (case-sensitive, as markers are).
    pub fn register(&mut self, name: &str, factory: ValidatorFactory) {
        self.validators.insert(name.to_string(), factory);
    }

    pub fn get(&self, name: &str) -> Option<&ValidatorFactory> {
        self.validators.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.validators.contains_key(name)
    }

    /// Compiles a spec. Returns `Ok(None)` when the name is not registered, in
    /// which case the marker text is an ordinary string.
    pub fn compile(&self, spec: &ValidatorSpec) -> Result<Option<Validator>, ValidatorError> {
        let Some(factory) = self.get(&spec.name) else {
            return Ok(None);
        };
        factory(spec.argument.as_deref())
            .map(Some)
            .map_err(|message| ValidatorError::invalid(format!("#{}", spec.name), message))
    }
}

// --- Built-in Validator Factories ---

fn no_argument(argument: Option<&str>, validator: Validator) -> Result<Validator, String> {
    match argument {
        None => Ok(validator),
        Some(arg) => Err(format!("unexpected argument '{}'", arg)),
    }
}

fn ignore(arg: Option<&str>) -> Result<Validator, String> {
    no_argument(arg, Validator::Ignore)
}

fn present(arg: Option<&str>) -> Result<Validator, String> {
    no_argument(arg, Validator::Present)
}

fn notpresent(arg: Option<&str>) -> Result<Validator, String> {
    no_argument(arg, Validator::NotPresent)
}

fn null(arg: Option<&str>) -> Result<Validator, String> {
    no_argument(arg, Validator::Null)
}

fn notnull(arg: Option<&str>) -> Result<Validator, String> {
    no_argument(arg, Validator::NotNull)
}

fn uuid(arg: Option<&str>) -> Result<Validator, String> {
    no_argument(arg, Validator::Uuid)
}

fn string(arg: Option<&str>) -> Result<Validator, String> {
    no_argument(arg, Validator::String)
}

fn number(arg: Option<&str>) -> Result<Validator, String> {
    no_argument(arg, Validator::Number)
}

fn boolean(arg: Option<&str>) -> Result<Validator, String> {
    no_argument(arg, Validator::Boolean)
}

fn array(arg: Option<&str>) -> Result<Validator, String> {
    no_argument(arg, Validator::Array)
}

fn object(arg: Option<&str>) -> Result<Validator, String> {
    no_argument(arg, Validator::Object)
}

fn regex(arg: Option<&str>) -> Result<Validator, String> {
    let pattern = arg.map(str::trim).unwrap_or("");
    if pattern.is_empty() {
        return Err("a pattern is required".to_string());
    }
    // The bare pattern must compile on its own before it is anchored.
    Regex::new(pattern).map_err(|e| e.to_string())?;
    Regex::new(&format!("^(?:{})$", pattern))
        .map(Validator::Regex)
        .map_err(|e| e.to_string())
}

impl Default for ValidatorRegistry {
    /// Creates a new registry populated with all built-in validators.
    fn default() -> Self {
        let mut registry = Self::new();
        registry.register("ignore", ignore);
        registry.register("present", present);
        registry.register("notpresent", notpresent);
        registry.register("null", null);
        registry.register("notnull", notnull);
        registry.register("uuid", uuid);
        registry.register("string", string);
        registry.register("number", number);
        registry.register("boolean", boolean);
        registry.register("array", array);
        registry.register("object", object);
        registry.register("regex", regex);
        registry
    }
}

impl std::fmt::Debug for ValidatorRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut names: Vec<&String> = self.validators.keys().collect();
        names.sort();
        f.debug_struct("ValidatorRegistry")
            .field("validators", &names)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fuzzmatch_types::Value;

    #[test]
    fn test_compile_known_and_unknown() {
        let registry = ValidatorRegistry::default();
        let spec = ValidatorSpec::new("string", None);
        assert!(matches!(registry.compile(&spec), Ok(Some(Validator::String))));
        let spec = ValidatorSpec::new("bob", None);
        assert!(matches!(registry.compile(&spec), Ok(None)));
    }

    #[test]
    fn test_regex_is_anchored_and_trimmed() {
        let registry = ValidatorRegistry::default();
        let spec = ValidatorSpec::new("regex", Some("  [a-z]+ "));
        let validator = registry.compile(&spec).unwrap().unwrap();
        assert!(validator.check(&Value::from("abc")).is_ok());
        assert_eq!(validator.check(&Value::from("abc1")), Err("regex match failed"));
        assert_eq!(validator.check(&Value::from("1abc")), Err("regex match failed"));
        assert_eq!(validator.to_string(), "#regex [a-z]+");
    }

    #[test]
    fn test_invalid_regex_is_a_configuration_error() {
        let registry = ValidatorRegistry::default();
        let spec = ValidatorSpec::new("regex", Some("[unclosed"));
        let err = registry.compile(&spec).unwrap_err();
        assert!(matches!(err, ValidatorError::InvalidArgument { ref marker, .. } if marker == "#regex"));
    }

    #[test]
    fn test_unbalanced_group_cannot_escape_anchors() {
        let registry = ValidatorRegistry::default();
        for pattern in ["a)|(b", "x)(?:y"] {
            let spec = ValidatorSpec::new("regex", Some(pattern));
            let err = registry.compile(&spec).unwrap_err();
            assert!(matches!(err, ValidatorError::InvalidArgument { .. }), "{}", pattern);
        }
    }

    #[test]
    fn test_unexpected_argument_is_rejected() {
        let registry = ValidatorRegistry::default();
        let spec = ValidatorSpec::new("number", Some("5"));
        assert!(registry.compile(&spec).is_err());
    }

    #[test]
    fn test_custom_registration() {
        fn digits(_: Option<&str>) -> Result<Validator, String> {
            Regex::new("^[0-9]+$").map(Validator::Regex).map_err(|e| e.to_string())
        }
        let mut registry = ValidatorRegistry::default();
        registry.register("digits", digits);
        let validator = registry
            .compile(&ValidatorSpec::new("digits", None))
            .unwrap()
            .unwrap();
        assert!(validator.check(&Value::from("123")).is_ok());
    }
}
