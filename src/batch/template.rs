//! Branch template resolution

/// Token replaced by the release version in branch templates
pub const VERSION_PLACEHOLDER: &str = "{version}";

/// Replace every [`VERSION_PLACEHOLDER`] in `template` with `version`.
///
/// Substitution is a single pass: placeholders produced by the substitution
/// itself are left alone. Templates without a placeholder come back unchanged.
pub fn resolve(template: &str, version: &str) -> String {
    template.replace(VERSION_PLACEHOLDER, version)
}
