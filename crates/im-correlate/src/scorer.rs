//! Five-pass weighted matching of one local-part against one name
//!
//! Passes run in a fixed order against a shrinking working copy of the
//! sanitized local-part. The first three remove what they match so later
//! passes cannot score the same characters twice.

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::config::{ConsumptionMode, CorrelationConfig};
use crate::features::NameFeatures;

/// The matching passes, in evaluation order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Pass {
    FullWord,
    Reversed,
    PrefixCombination,
    OrderedInitials,
    UnorderedInitials,
}

impl Pass {
    pub fn as_str(&self) -> &'static str {
        match self {
            Pass::FullWord => "full_word",
            Pass::Reversed => "reversed",
            Pass::PrefixCombination => "prefix_combination",
            Pass::OrderedInitials => "ordered_initials",
            Pass::UnorderedInitials => "unordered_initials",
        }
    }
}

/// What a single pass found and what it added to the total
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PassOutcome {
    pub pass: Pass,
    /// Working copy the pass searched
    pub searched: String,
    /// Matched substrings, as they appear in the local-part
    pub matches: Vec<String>,
    /// Matched characters, or distinct initials for the unordered pass
    pub count: usize,
    /// `count` times the pass multiplier
    pub contribution: f64,
    /// Whether the contribution was added to the total
    pub counted: bool,
}

/// Full scoring trace for one (local-part, name) pair
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub local_part: String,
    pub name: String,
    pub passes: Vec<PassOutcome>,
    pub total: f64,
}

impl ScoreBreakdown {
    pub fn pass(&self, pass: Pass) -> Option<&PassOutcome> {
        self.passes.iter().find(|outcome| outcome.pass == pass)
    }

    /// True when the total clears `threshold`
    pub fn accepted(&self, threshold: f64) -> bool {
        self.total > threshold
    }
}

/// Owned local-part buffer that matched probes are removed from
#[derive(Debug, Clone)]
pub struct WorkingCopy {
    buf: String,
    mode: ConsumptionMode,
}

impl WorkingCopy {
    pub fn new(local_part: &str, mode: ConsumptionMode) -> Self {
        Self {
            buf: local_part.to_string(),
            mode,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.buf
    }

    /// Find every match of `probe` and remove it from the buffer
    pub fn consume(&mut self, probe: &Regex) -> Vec<String> {
        let spans: Vec<(usize, usize)> = probe
            .find_iter(&self.buf)
            .map(|m| (m.start(), m.end()))
            .collect();
        let matches: Vec<String> = spans
            .iter()
            .map(|&(start, end)| self.buf[start..end].to_string())
            .collect();

        match self.mode {
            ConsumptionMode::Global => {
                for matched in &matches {
                    self.buf = self.buf.replace(matched.as_str(), "");
                }
            }
            ConsumptionMode::SpanLocal => {
                let mut kept = String::with_capacity(self.buf.len());
                let mut cursor = 0;
                for &(start, end) in &spans {
                    kept.push_str(&self.buf[cursor..start]);
                    cursor = end;
                }
                kept.push_str(&self.buf[cursor..]);
                self.buf = kept;
            }
        }

        matches
    }

    /// First match of `probe`, without removal
    pub fn find_first(&self, probe: &Regex) -> Option<String> {
        probe.find(&self.buf).map(|m| m.as_str().to_string())
    }

    /// Distinct matches of `probe` in order of appearance, without removal
    pub fn find_distinct(&self, probe: &Regex) -> Vec<String> {
        let mut found: Vec<String> = Vec::new();
        for m in probe.find_iter(&self.buf) {
            if !found.iter().any(|f| f == m.as_str()) {
                found.push(m.as_str().to_string());
            }
        }
        found
    }
}

/// Score a sanitized local-part against one name's probe families
pub fn score_pair(
    local_part: &str,
    features: &NameFeatures,
    config: &CorrelationConfig,
) -> ScoreBreakdown {
    let weights = &config.weights;
    let probes = features.probes();
    let local_len = local_part.chars().count();

    let mut copy = WorkingCopy::new(local_part, config.consumption);
    let mut passes = Vec::with_capacity(5);
    let mut total = 0.0;

    let consuming = [
        (Pass::FullWord, probes.full_word.as_ref(), weights.full_word),
        (Pass::Reversed, probes.reversed.as_ref(), weights.reversed),
        (
            Pass::PrefixCombination,
            probes.prefix_combination.as_ref(),
            weights.prefix_combination,
        ),
    ];

    let mut letters_matched = false;
    for (pass, probe, weight) in consuming {
        let searched = copy.as_str().to_string();
        let matches = probe.map(|p| copy.consume(p)).unwrap_or_default();
        let count: usize = matches.iter().map(|m| m.chars().count()).sum();
        let contribution = count as f64 * weight;
        total += contribution;
        letters_matched |= count > 0;
        passes.push(PassOutcome {
            pass,
            searched,
            matches,
            count,
            contribution,
            counted: true,
        });
    }

    // Ordered initials: trusted when they make up the whole local-part, or
    // when nothing else matched.
    let ordered = probes
        .ordered_initials
        .as_ref()
        .and_then(|p| copy.find_first(p));
    let count = ordered.as_ref().map_or(0, |m| m.chars().count());
    let counted = count > 0 && (local_len == count || !letters_matched);
    let contribution = count as f64 * weights.ordered_initials;
    if counted {
        total += contribution;
    }
    passes.push(PassOutcome {
        pass: Pass::OrderedInitials,
        searched: copy.as_str().to_string(),
        matches: ordered.into_iter().collect(),
        count,
        contribution,
        counted,
    });

    // Unordered initials only corroborate an existing signal, unless the
    // local-part is nothing but initials.
    let distinct = probes
        .unordered_initials
        .as_ref()
        .map(|p| copy.find_distinct(p))
        .unwrap_or_default();
    let count = distinct.len();
    let counted = count > 0 && (local_len == count || letters_matched);
    let contribution = count as f64 * weights.unordered_initials;
    if counted {
        total += contribution;
    }
    passes.push(PassOutcome {
        pass: Pass::UnorderedInitials,
        searched: copy.as_str().to_string(),
        matches: distinct,
        count,
        contribution,
        counted,
    });

    ScoreBreakdown {
        local_part: local_part.to_string(),
        name: features.original().to_string(),
        passes,
        total,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use regex::RegexBuilder;

    fn score(local: &str, name: &str) -> ScoreBreakdown {
        let config = CorrelationConfig::default();
        let features = NameFeatures::extract(name, &config).unwrap();
        score_pair(local, &features, &config)
    }

    fn probe(pattern: &str) -> Regex {
        RegexBuilder::new(pattern)
            .case_insensitive(true)
            .build()
            .unwrap()
    }

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_full_word_pass() {
        let breakdown = score("thirano", "Takashi HIRANO");
        let full = breakdown.pass(Pass::FullWord).unwrap();
        assert_eq!(full.matches, vec!["hirano"]);
        assert!(approx(full.contribution, 7.2));
        // "t" is left over; initials "TH" are no longer contiguous
        let ordered = breakdown.pass(Pass::OrderedInitials).unwrap();
        assert_eq!(ordered.searched, "t");
        assert!(!ordered.counted);
        // "t" corroborates the full-word match
        let unordered = breakdown.pass(Pass::UnorderedInitials).unwrap();
        assert_eq!(unordered.matches, vec!["t"]);
        assert!(unordered.counted);
        assert!(approx(breakdown.total, 8.0));
    }

    #[test]
    fn test_ordered_initials_ignored_after_letter_match() {
        let breakdown = score("hiranoth", "Takashi HIRANO");
        let ordered = breakdown.pass(Pass::OrderedInitials).unwrap();
        assert_eq!(ordered.searched, "th");
        assert_eq!(ordered.matches, vec!["th"]);
        assert_eq!(ordered.count, 2);
        assert!(!ordered.counted);
        let unordered = breakdown.pass(Pass::UnorderedInitials).unwrap();
        assert!(unordered.counted);
        // 7.2 for "hirano" plus 1.6 for "t" and "h"
        assert!(approx(breakdown.total, 8.8));
    }

    #[test]
    fn test_reversed_pass() {
        let breakdown = score("dradenoy", "Kazuhiro Yoneda");
        assert_eq!(breakdown.pass(Pass::FullWord).unwrap().count, 0);
        let reversed = breakdown.pass(Pass::Reversed).unwrap();
        assert_eq!(reversed.matches, vec!["adenoy"]);
        assert_eq!(reversed.searched, "dradenoy");
        assert!(approx(breakdown.total, 7.2));
    }

    #[test]
    fn test_prefix_combination_pass() {
        let breakdown = score("kaya", "Yasuhiro KAWAI");
        let combos = breakdown.pass(Pass::PrefixCombination).unwrap();
        assert_eq!(combos.matches, vec!["kaya"]);
        assert!(approx(combos.contribution, 4.0));
        assert!(approx(breakdown.total, 4.0));
    }

    #[test]
    fn test_initials_only_local_part() {
        let breakdown = score("tb", "Taniya Bardhan");
        let ordered = breakdown.pass(Pass::OrderedInitials).unwrap();
        assert!(ordered.counted);
        assert!(approx(ordered.contribution, 1.7));
        let unordered = breakdown.pass(Pass::UnorderedInitials).unwrap();
        assert!(unordered.counted);
        assert!(approx(unordered.contribution, 1.6));
        assert!(approx(breakdown.total, 3.3));
    }

    #[test]
    fn test_unordered_initials_need_corroboration() {
        let breakdown = score("bb", "Taniya Bardhan");
        let unordered = breakdown.pass(Pass::UnorderedInitials).unwrap();
        assert_eq!(unordered.count, 1);
        assert!(!unordered.counted);
        assert_eq!(breakdown.total, 0.0);
    }

    #[test]
    fn test_ordered_initials_rescue_without_letters() {
        // No letter overlap, but the initials appear in name order
        let breakdown = score("rqkspine", "Reginald Q Knight");
        let ordered = breakdown.pass(Pass::OrderedInitials).unwrap();
        assert_eq!(ordered.matches, vec!["rqk"]);
        assert!(ordered.counted);
        assert!(approx(breakdown.total, 0.85 * 3.0));
    }

    #[test]
    fn test_no_overlap_scores_zero() {
        let breakdown = score("poda", "Tetsuo KUNIEDA");
        assert_eq!(breakdown.total, 0.0);
        assert!(!breakdown.accepted(0.8));
    }

    #[test]
    fn test_empty_name_scores_zero() {
        let breakdown = score("anything", "平野");
        assert_eq!(breakdown.total, 0.0);
        assert_eq!(breakdown.passes.len(), 5);
    }

    #[test]
    fn test_global_consumption_removes_every_occurrence() {
        let mut copy = WorkingCopy::new("anbanan", ConsumptionMode::Global);
        let matches = copy.consume(&probe("ban"));
        assert_eq!(matches, vec!["ban"]);
        // "an" elsewhere survives; only exact "ban" occurrences go
        assert_eq!(copy.as_str(), "anan");

        let mut copy = WorkingCopy::new("anxan", ConsumptionMode::Global);
        let matches = copy.consume(&probe("an"));
        assert_eq!(matches, vec!["an", "an"]);
        assert_eq!(copy.as_str(), "x");
    }

    #[test]
    fn test_global_consumption_cuts_later_matches() {
        // Removing every "an" also cuts into "kazuan", which then no longer
        // exists in the buffer to be removed.
        let mut copy = WorkingCopy::new("ankazuan", ConsumptionMode::Global);
        let matches = copy.consume(&probe("kazuan|an"));
        assert_eq!(matches, vec!["an", "kazuan"]);
        assert_eq!(copy.as_str(), "kazu");
    }

    #[test]
    fn test_span_local_consumption() {
        let mut copy = WorkingCopy::new("ankazuan", ConsumptionMode::SpanLocal);
        let matches = copy.consume(&probe("kazuan|an"));
        assert_eq!(matches, vec!["an", "kazuan"]);
        assert_eq!(copy.as_str(), "");

        let mut copy = WorkingCopy::new("hirano-hira", ConsumptionMode::SpanLocal);
        let matches = copy.consume(&probe("hirano|hira"));
        assert_eq!(matches, vec!["hirano", "hira"]);
        assert_eq!(copy.as_str(), "-");
    }

    #[test]
    fn test_find_distinct_is_case_sensitive() {
        let copy = WorkingCopy::new("tTt", ConsumptionMode::Global);
        assert_eq!(copy.find_distinct(&probe("t")), vec!["t", "T"]);
    }

    #[test]
    fn test_custom_weights() {
        let mut config = CorrelationConfig::default();
        config.weights.full_word = 1.0;
        let features = NameFeatures::extract("Takashi HIRANO", &config).unwrap();
        let breakdown = score_pair("hirano", &features, &config);
        assert!(approx(breakdown.pass(Pass::FullWord).unwrap().contribution, 6.0));
    }
}
