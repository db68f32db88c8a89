use crate::builders::importer::{BUILTIN_IGNORES, IgnoreRuleSet, RuleOrigin};

/// The `RuleValidator` trait defines how an assembled rule set is checked for
/// rules that can never take effect.
///
/// Findings are warnings only; they never stop an update.
pub trait RuleValidator {
    /// Returns a human-readable description of every problem found.
    fn validate_rules(&self, rules: &IgnoreRuleSet) -> Vec<String>;
}

/// The default set of checks.
pub struct StandardValidator;

impl StandardValidator {
    pub fn new() -> Self {
        Self
    }

    /// Strips the negation, anchoring and directory markers to get the bare
    /// name a rule talks about.
    fn bare_name(text: &str) -> &str {
        let text = text.trim();
        let text = text.strip_prefix('!').unwrap_or(text);
        text.trim_matches('/')
    }
}

impl Default for StandardValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl RuleValidator for StandardValidator {
    fn validate_rules(&self, rules: &IgnoreRuleSet) -> Vec<String> {
        let mut issues = Vec::new();

        for rule in rules.lines() {
            if rule.origin == RuleOrigin::BuiltIn {
                continue;
            }
            let text = rule.text.trim();
            if text.is_empty() || text.starts_with('#') {
                continue;
            }

            let name = Self::bare_name(text);
            if name.is_empty() {
                issues.push(format!(
                    "{}: rule '{}' matches nothing",
                    rule.location(),
                    rule.text
                ));
                continue;
            }

            // Built-ins come last, so no earlier negation can win against them.
            if text.starts_with('!') && BUILTIN_IGNORES.iter().any(|builtin| *builtin == name) {
                issues.push(format!(
                    "{}: '{}' cannot re-include built-in entry '{}'",
                    rule.location(),
                    rule.text,
                    name
                ));
            }
        }
        issues
    }
}
