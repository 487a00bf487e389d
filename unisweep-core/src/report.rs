//! report.rs - Statistics and per-rule removal summaries for a sanitization run.
//!
//! Reports carry counts and code point labels only. The removed text itself
//! is never retained.
//!
//! License: MIT OR APACHE 2.0

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::classifiers::{code_point_label, counts_as_invisible};

/// The rules that can remove a code point, in pipeline order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RemovalRule {
    CcControl,
    Bom,
    CfFormat,
    InvisibleSeparator,
    SoftHyphen,
    TagCharacter,
    VariationSelector,
    Noncharacter,
    PrivateUse,
    CsSurrogate,
    BidiControl,
    IsolatedCombiningMark,
}

impl RemovalRule {
    pub const ALL: [RemovalRule; 12] = [
        RemovalRule::CcControl,
        RemovalRule::Bom,
        RemovalRule::CfFormat,
        RemovalRule::InvisibleSeparator,
        RemovalRule::SoftHyphen,
        RemovalRule::TagCharacter,
        RemovalRule::VariationSelector,
        RemovalRule::Noncharacter,
        RemovalRule::PrivateUse,
        RemovalRule::CsSurrogate,
        RemovalRule::BidiControl,
        RemovalRule::IsolatedCombiningMark,
    ];

    pub fn name(self) -> &'static str {
        match self {
            RemovalRule::CcControl => "cc_control",
            RemovalRule::Bom => "bom",
            RemovalRule::CfFormat => "cf_format",
            RemovalRule::InvisibleSeparator => "invisible_separator",
            RemovalRule::SoftHyphen => "soft_hyphen",
            RemovalRule::TagCharacter => "tag_character",
            RemovalRule::VariationSelector => "variation_selector",
            RemovalRule::Noncharacter => "noncharacter",
            RemovalRule::PrivateUse => "private_use",
            RemovalRule::CsSurrogate => "cs_surrogate",
            RemovalRule::BidiControl => "bidi_control",
            RemovalRule::IsolatedCombiningMark => "isolated_combining_mark",
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

/// All removals credited to one rule during a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemovalSummaryItem {
    pub rule_name: String,
    pub occurrences: usize,
    /// Distinct removed code points as `U+XXXX` labels, ascending.
    pub code_points: Vec<String>,
}

/// Accumulates rule credits while the pipeline runs.
#[derive(Debug, Default)]
pub struct RemovalTally {
    counts: [usize; 12],
    seen: [BTreeSet<u32>; 12],
}

impl RemovalTally {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn credit(&mut self, rule: RemovalRule, c: char) {
        self.credit_raw(rule, c as u32);
    }

    /// Credits a value that is not a scalar value, such as a lone surrogate unit.
    pub fn credit_raw(&mut self, rule: RemovalRule, value: u32) {
        let i = rule.index();
        self.counts[i] += 1;
        self.seen[i].insert(value);
    }

    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }

    /// One entry per rule that fired, in pipeline order.
    pub fn into_summary(self) -> Vec<RemovalSummaryItem> {
        RemovalRule::ALL
            .iter()
            .filter(|rule| self.counts[rule.index()] > 0)
            .map(|rule| RemovalSummaryItem {
                rule_name: rule.name().to_string(),
                occurrences: self.counts[rule.index()],
                code_points: self.seen[rule.index()]
                    .iter()
                    .map(|&v| match char::from_u32(v) {
                        Some(c) => code_point_label(c),
                        None => format!("U+{:04X}", v),
                    })
                    .collect(),
            })
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SanitizeStats {
    pub original_chars: usize,
    pub cleaned_chars: usize,
    pub removed_chars: usize,
    pub reduction_percent: f64,
    pub invisible_chars: usize,
}

impl SanitizeStats {
    /// Character counts are in Unicode scalar values.
    pub fn compute(original: &str, cleaned: &str) -> Self {
        let original_chars = original.chars().count();
        let invisible_chars = original.chars().filter(|&c| counts_as_invisible(c)).count();
        Self::from_counts(original_chars, cleaned.chars().count(), invisible_chars)
    }

    pub fn from_counts(original_chars: usize, cleaned_chars: usize, invisible_chars: usize) -> Self {
        let removed_chars = original_chars.saturating_sub(cleaned_chars);
        let reduction_percent = if original_chars == 0 {
            0.0
        } else {
            removed_chars as f64 * 100.0 / original_chars as f64
        };
        Self { original_chars, cleaned_chars, removed_chars, reduction_percent, invisible_chars }
    }
}

/// The cleaned text together with what was done to produce it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SanitizeReport {
    pub text: String,
    pub stats: SanitizeStats,
    pub removals: Vec<RemovalSummaryItem>,
}

impl SanitizeReport {
    /// Total code points removed by pipeline rules. Markup stripping,
    /// normalization and whitespace collapsing are not rules and are not counted.
    pub fn total_removed_by_rules(&self) -> usize {
        self.removals.iter().map(|r| r.occurrences).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tally_orders_by_pipeline() {
        let mut tally = RemovalTally::new();
        tally.credit(RemovalRule::BidiControl, '\u{202E}');
        tally.credit(RemovalRule::CcControl, '\u{0007}');
        tally.credit(RemovalRule::CcControl, '\u{0007}');
        tally.credit(RemovalRule::CcControl, '\u{0000}');
        tally.credit_raw(RemovalRule::CsSurrogate, 0xD800);

        assert_eq!(tally.total(), 5);
        let summary = tally.into_summary();
        let names: Vec<&str> = summary.iter().map(|s| s.rule_name.as_str()).collect();
        assert_eq!(names, ["cc_control", "cs_surrogate", "bidi_control"]);
        assert_eq!(summary[0].occurrences, 3);
        assert_eq!(summary[0].code_points, ["U+0000", "U+0007"]);
        assert_eq!(summary[1].code_points, ["U+D800"]);
    }

    #[test]
    fn test_rule_names_match_serde() {
        for rule in RemovalRule::ALL {
            let json = serde_json::to_string(&rule).unwrap();
            assert_eq!(json, format!("\"{}\"", rule.name()));
        }
    }

    #[test]
    fn test_stats_compute() {
        let stats = SanitizeStats::compute("a\u{200B}b\u{FE0F}", "ab");
        assert_eq!(stats.original_chars, 4);
        assert_eq!(stats.cleaned_chars, 2);
        assert_eq!(stats.removed_chars, 2);
        assert_eq!(stats.reduction_percent, 50.0);
        assert_eq!(stats.invisible_chars, 2);
    }

    #[test]
    fn test_stats_empty_and_growth() {
        let empty = SanitizeStats::compute("", "");
        assert_eq!(empty.reduction_percent, 0.0);
        // NFKC can lengthen text; removed count saturates at zero.
        let grown = SanitizeStats::compute("\u{FB01}", "fi");
        assert_eq!(grown.removed_chars, 0);
        assert_eq!(grown.reduction_percent, 0.0);
    }
}
