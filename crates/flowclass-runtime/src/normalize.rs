//! Canonical form of free-form connectivity and provider labels

/// Lower-case `input` and drop every character outside `[a-z0-9.+-]`,
/// so that `"Hurricane Electric"` and `"HurricaneElectric"` collapse to one token.
pub fn normalize(input: &str) -> String {
    input
        .to_lowercase()
        .chars()
        .filter(|c| matches!(c, 'a'..='z' | '0'..='9' | '.' | '+' | '-'))
        .collect()
}
