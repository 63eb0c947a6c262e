//! Snapshot rendering helpers.
//!
//! Functions for converting parsed stylesheets into plain-text strings
//! suitable for snapshot testing and assertions.

use crate::css::model::{AtRule, Property, RuleSet, StyleSheet};
use crate::css::token::Token;

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Render a stylesheet as an indented outline.
///
/// At-rules come first, then rule sets, each in source order. Blocks are
/// written one property per line, indented by two spaces. Tokens in a value
/// or at-rule prelude are separated by single spaces. The final line does not
/// have a trailing newline.
///
/// # Examples
///
/// ```
/// use toolkit_css::parse_css;
/// use toolkit_css::testing::stylesheet_to_string;
///
/// let sheet = parse_css("a, b { color: red }");
/// assert_eq!(stylesheet_to_string(&sheet), "a, b {\n  color: red\n}");
/// ```
pub fn stylesheet_to_string(sheet: &StyleSheet) -> String {
    let mut lines = Vec::new();

    for rule in &sheet.at_rules {
        at_rule_lines(rule, &mut lines);
    }
    for rule in &sheet.rulesets {
        ruleset_lines(rule, &mut lines);
    }

    lines.join("\n")
}

/// Join tokens with single spaces, in CSS source form.
pub fn tokens_to_string(tokens: &[Token]) -> String {
    tokens
        .iter()
        .map(|token| token.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

// ---------------------------------------------------------------------------
// Internals
// ---------------------------------------------------------------------------

fn at_rule_lines(rule: &AtRule, lines: &mut Vec<String>) {
    let mut head = format!("@{}", rule.keyword);
    if !rule.content.is_empty() {
        head.push(' ');
        head.push_str(&tokens_to_string(&rule.content));
    }

    if rule.properties.is_empty() {
        lines.push(head);
        return;
    }

    lines.push(format!("{head} {{"));
    block_lines(&rule.properties, lines);
}

fn ruleset_lines(rule: &RuleSet, lines: &mut Vec<String>) {
    let selectors = rule
        .selectors
        .iter()
        .map(|selector| selector.to_string())
        .collect::<Vec<_>>()
        .join(", ");

    if selectors.is_empty() {
        lines.push("{".to_string());
    } else {
        lines.push(format!("{selectors} {{"));
    }
    block_lines(&rule.properties, lines);
}

fn block_lines(properties: &[Property], lines: &mut Vec<String>) {
    for property in properties {
        lines.push(format!(
            "  {}: {}",
            property.name,
            tokens_to_string(&property.value)
        ));
    }
    lines.push("}".to_string());
}
