//! Probe families derived from a candidate name
//!
//! A name is folded to ASCII, split into words, and turned into five families
//! of probe strings that the scorer searches for in an email local-part:
//!
//! 1. full words and their left-anchored truncations
//! 2. the same strings reversed
//! 3. concatenations of 2-3 letter word prefixes, in any order
//! 4. the initials in name order, as one string
//! 5. the initials individually
//!
//! Families are computed once per name and compiled into case-insensitive
//! regexes, so a [`NameFeatures`] can be shared across every email.

use std::collections::BTreeSet;

use regex::{Regex, RegexBuilder};

use crate::config::CorrelationConfig;
use crate::error::{CorrelateError, Result};
use crate::normalize::{fold_to_ascii, split_words};

/// Compiled size ceiling for a single probe regex. The prefix family of a
/// five-word name expands to a few thousand alternatives.
const PROBE_SIZE_LIMIT: usize = 64 * (1 << 20);

/// Short prefix lengths tried for the combination family, longest first.
const SHORT_PREFIX_LENGTHS: [usize; 2] = [3, 2];

/// Probe material for one candidate name
#[derive(Debug, Clone)]
pub struct NameFeatures {
    original: String,
    folded: String,
    full_words: Vec<String>,
    reversed: Vec<String>,
    prefix_combinations: Vec<String>,
    ordered_initials: String,
    initials: Vec<String>,
    probes: Probes,
}

/// Compiled regexes, one per family. `None` when the family is empty.
#[derive(Debug, Clone, Default)]
pub(crate) struct Probes {
    pub(crate) full_word: Option<Regex>,
    pub(crate) reversed: Option<Regex>,
    pub(crate) prefix_combination: Option<Regex>,
    pub(crate) ordered_initials: Option<Regex>,
    pub(crate) unordered_initials: Option<Regex>,
}

impl NameFeatures {
    /// Build every probe family for `name`
    pub fn extract(name: &str, config: &CorrelationConfig) -> Result<Self> {
        let folded = fold_to_ascii(name);
        let words = split_words(&folded);

        let full_words = full_word_family(&words, config.min_truncation);
        let reversed: Vec<String> = full_words
            .iter()
            .map(|feature| feature.chars().rev().collect())
            .collect();
        let prefix_combinations =
            prefix_combination_family(&words, &full_words, config.max_prefix_words);
        let ordered_initials = ordered_initials(&words);
        let initials = unordered_initials(&ordered_initials);

        let probes = Probes {
            full_word: alternation(name, &full_words)?,
            reversed: alternation(name, &reversed)?,
            prefix_combination: alternation(name, &prefix_combinations)?,
            ordered_initials: literal(name, &ordered_initials)?,
            unordered_initials: alternation(name, &initials)?,
        };

        Ok(Self {
            original: name.to_string(),
            folded,
            full_words,
            reversed,
            prefix_combinations,
            ordered_initials,
            initials,
            probes,
        })
    }

    /// The name as supplied by the caller
    pub fn original(&self) -> &str {
        &self.original
    }

    /// The ASCII-folded name
    pub fn folded(&self) -> &str {
        &self.folded
    }

    /// Full words and truncations, longest first
    pub fn full_words(&self) -> &[String] {
        &self.full_words
    }

    /// Reversed full words and truncations
    pub fn reversed(&self) -> &[String] {
        &self.reversed
    }

    /// Short-prefix concatenations, longest first
    pub fn prefix_combinations(&self) -> &[String] {
        &self.prefix_combinations
    }

    /// Initials in name order
    pub fn ordered_initials(&self) -> &str {
        &self.ordered_initials
    }

    /// Distinct initials in order of first appearance
    pub fn initials(&self) -> &[String] {
        &self.initials
    }

    /// True when no family can ever match
    pub fn is_empty(&self) -> bool {
        self.full_words.is_empty()
            && self.prefix_combinations.is_empty()
            && self.ordered_initials.is_empty()
    }

    pub(crate) fn probes(&self) -> &Probes {
        &self.probes
    }
}

/// Words longer than one character, then their truncations from the longest
/// word length down to `min_truncation`, sorted longest first.
fn full_word_family(words: &[String], min_truncation: usize) -> Vec<String> {
    let mut features: Vec<String> = Vec::new();
    for word in words.iter().filter(|w| w.len() > 1) {
        if !features.contains(word) {
            features.push(word.clone());
        }
    }

    let upper = words.iter().map(String::len).max().unwrap_or(0);
    for limit in (min_truncation..=upper).rev() {
        for word in words.iter().filter(|w| w.len() >= limit) {
            let truncation = &word[..limit];
            if !features.iter().any(|f| f == truncation) {
                features.push(truncation.to_string());
            }
        }
    }

    // Stable, so equal lengths keep insertion order.
    features.sort_by(|a, b| b.len().cmp(&a.len()));
    features
}

/// Permutations of 2-3 letter word prefixes.
///
/// Each word contributes its first 3 and first 2 characters unless they are
/// already full-word features. Names with more than `max_words` contributing
/// words produce nothing.
fn prefix_combination_family(
    words: &[String],
    full_words: &[String],
    max_words: usize,
) -> Vec<String> {
    let rows: Vec<Vec<&str>> = words
        .iter()
        .map(|word| {
            SHORT_PREFIX_LENGTHS
                .iter()
                .filter(|&&len| word.len() >= len)
                .map(|&len| &word[..len])
                .filter(|prefix| !full_words.iter().any(|f| f == prefix))
                .collect::<Vec<&str>>()
        })
        .filter(|row| !row.is_empty())
        .collect();

    if rows.len() < 2 || rows.len() > max_words {
        return Vec::new();
    }

    let mut combinations = BTreeSet::new();
    for path in cartesian_product(&rows) {
        for count in 2..=path.len() {
            push_permutations(&path, count, &mut combinations);
        }
    }

    let mut combinations: Vec<String> = combinations.into_iter().collect();
    combinations.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
    combinations
}

/// Every path picking one entry from each row, in row order
fn cartesian_product<'a>(rows: &[Vec<&'a str>]) -> Vec<Vec<&'a str>> {
    let mut paths: Vec<Vec<&'a str>> = vec![Vec::new()];
    for row in rows {
        paths = paths
            .iter()
            .flat_map(|path| {
                row.iter().map(move |item| {
                    let mut next = path.clone();
                    next.push(*item);
                    next
                })
            })
            .collect();
    }
    paths
}

/// Join every ordered selection of `count` distinct items into `out`
fn push_permutations(items: &[&str], count: usize, out: &mut BTreeSet<String>) {
    let mut stack: Vec<Vec<usize>> = vec![Vec::new()];
    while let Some(chosen) = stack.pop() {
        if chosen.len() == count {
            out.insert(chosen.iter().map(|&i| items[i]).collect());
            continue;
        }
        for i in (0..items.len()).filter(|i| !chosen.contains(i)) {
            let mut next = chosen.clone();
            next.push(i);
            stack.push(next);
        }
    }
}

fn ordered_initials(words: &[String]) -> String {
    words.iter().filter_map(|word| word.chars().next()).collect()
}

fn unordered_initials(ordered: &str) -> Vec<String> {
    let mut initials: Vec<String> = Vec::new();
    for initial in ordered.chars().map(String::from) {
        if !initials.contains(&initial) {
            initials.push(initial);
        }
    }
    initials
}

fn alternation(name: &str, probes: &[String]) -> Result<Option<Regex>> {
    if probes.is_empty() {
        return Ok(None);
    }
    let pattern = probes
        .iter()
        .map(|probe| regex::escape(probe))
        .collect::<Vec<_>>()
        .join("|");
    compile(name, &pattern).map(Some)
}

fn literal(name: &str, probe: &str) -> Result<Option<Regex>> {
    if probe.is_empty() {
        return Ok(None);
    }
    compile(name, &regex::escape(probe)).map(Some)
}

fn compile(name: &str, pattern: &str) -> Result<Regex> {
    RegexBuilder::new(pattern)
        .case_insensitive(true)
        .size_limit(PROBE_SIZE_LIMIT)
        .build()
        .map_err(|source| CorrelateError::Probe {
            name: name.to_string(),
            source,
        })
}
