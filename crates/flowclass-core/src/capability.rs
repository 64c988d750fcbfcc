//! Names of the capabilities rules can call.
//!
//! The compiler declares them in its schemas and the runtime environments
//! dispatch on them, so both sides share these constants.

/// Suffix identifying a classify-by-pattern capability
pub const REGEX_SUFFIX: &str = "Regex";

/// Number of arguments of a classify-by-pattern capability (subject, pattern, template)
pub const REGEX_ARITY: usize = 3;

// Exporter schema
pub const CLASSIFY: &str = "classify";
pub const CLASSIFY_REGEX: &str = "classifyRegex";

// Interface schema
pub const CLASSIFY_CONNECTIVITY: &str = "classifyConnectivity";
pub const CLASSIFY_CONNECTIVITY_REGEX: &str = "classifyConnectivityRegex";
pub const CLASSIFY_PROVIDER: &str = "classifyProvider";
pub const CLASSIFY_PROVIDER_REGEX: &str = "classifyProviderRegex";
pub const CLASSIFY_EXTERNAL: &str = "classifyExternal";
pub const CLASSIFY_INTERNAL: &str = "classifyInternal";

/// Returns true if `name` follows the classify-by-pattern naming convention
pub fn is_regex_capability(name: &str) -> bool {
    name.ends_with(REGEX_SUFFIX)
}
