//! Email to name correlation
//!
//! Filters the inputs, builds every candidate's probe families once, scores
//! each email against each candidate, and keeps the best-weighted name per
//! email.
//!
//! # Parallel Processing
//!
//! With the `parallel` feature, emails are scored on rayon's pool. Acceptances
//! are applied to the registry in input order afterwards, so the report is
//! identical to a sequential run.

use std::collections::BTreeMap;

#[cfg(feature = "parallel")]
use rayon::prelude::*;
use serde::Serialize;
use tracing::{debug, info};

use crate::config::CorrelationConfig;
use crate::error::Result;
use crate::features::NameFeatures;
use crate::normalize::{local_part, sanitize_local_part};
use crate::owner::OwnerRegistry;
use crate::scorer::{score_pair, ScoreBreakdown};

/// Caller-facing switches for [`correlate`]
#[derive(Debug, Clone, Default)]
pub struct CorrelateOptions {
    /// Report names as supplied instead of ASCII-folded
    pub keep_original: bool,
    /// Emit a debug record for every scored pass
    pub verbose: bool,
    pub config: CorrelationConfig,
}

impl CorrelateOptions {
    pub fn with_config(config: CorrelationConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }
}

/// Outcome of a correlation run
#[derive(Debug, Clone, Default, Serialize)]
pub struct CorrelationReport {
    pub owners: OwnerRegistry,
    /// Emails dropped for lacking an `@`
    pub skipped_emails: usize,
    /// Names dropped for being blank
    pub skipped_names: usize,
}

impl CorrelationReport {
    /// Email to best name, for emails that have one
    pub fn names(&self) -> BTreeMap<String, String> {
        self.owners.named()
    }

    pub fn name_for(&self, email: &str) -> Option<&str> {
        self.owners.name_for(email)
    }

    pub fn weight_for(&self, email: &str) -> Option<f64> {
        self.owners.get(email).map(|owner| owner.weight)
    }
}

/// One accepted candidate for one email, in acceptance order
#[derive(Debug, Clone)]
struct Acceptance {
    name: String,
    weight: f64,
}

/// Infer the most probable name behind each email address
pub fn correlate<E, N>(
    emails: &[E],
    names: &[N],
    options: &CorrelateOptions,
) -> Result<CorrelationReport>
where
    E: AsRef<str>,
    N: AsRef<str>,
{
    let config = &options.config;
    config.validate()?;

    let valid_emails: Vec<&str> = emails
        .iter()
        .map(AsRef::as_ref)
        .filter(|email| email.contains('@'))
        .collect();
    let candidates: Vec<NameFeatures> = names
        .iter()
        .map(AsRef::as_ref)
        .filter(|name| !name.trim().is_empty())
        .map(|name| NameFeatures::extract(name, config))
        .collect::<Result<_>>()?;

    let skipped_emails = emails.len() - valid_emails.len();
    let skipped_names = names.len() - candidates.len();
    debug!(
        emails = valid_emails.len(),
        candidates = candidates.len(),
        skipped_emails,
        skipped_names,
        "correlating"
    );

    #[cfg(feature = "parallel")]
    let accepted: Vec<Vec<Acceptance>> = valid_emails
        .par_iter()
        .map(|email| accept_candidates(email, &candidates, options))
        .collect();

    #[cfg(not(feature = "parallel"))]
    let accepted: Vec<Vec<Acceptance>> = valid_emails
        .iter()
        .map(|email| accept_candidates(email, &candidates, options))
        .collect();

    let mut owners = OwnerRegistry::new();
    for (email, acceptances) in valid_emails.iter().zip(accepted) {
        for acceptance in acceptances {
            owners.update(email, Some(acceptance.name), acceptance.weight);
        }
    }

    Ok(CorrelationReport {
        owners,
        skipped_emails,
        skipped_names,
    })
}

/// [`correlate`] with default options, returning only email to name
pub fn correlate_names<E, N>(emails: &[E], names: &[N]) -> Result<BTreeMap<String, String>>
where
    E: AsRef<str>,
    N: AsRef<str>,
{
    Ok(correlate(emails, names, &CorrelateOptions::default())?.names())
}

/// Score a single (email, name) pair
///
/// Returns `None` when the email has no `@` or the name is blank, since
/// neither would be considered by [`correlate`].
pub fn explain(
    email: &str,
    name: &str,
    config: &CorrelationConfig,
) -> Result<Option<ScoreBreakdown>> {
    config.validate()?;
    let Some(local) = local_part(email) else {
        return Ok(None);
    };
    if name.trim().is_empty() {
        return Ok(None);
    }
    let features = NameFeatures::extract(name, config)?;
    let local = sanitize_local_part(local, config.strictness);
    Ok(Some(score_pair(&local, &features, config)))
}

/// Walk every candidate for one email, returning each one that raised the
/// running best weight.
fn accept_candidates(
    email: &str,
    candidates: &[NameFeatures],
    options: &CorrelateOptions,
) -> Vec<Acceptance> {
    let config = &options.config;
    let Some(local) = local_part(email) else {
        return Vec::new();
    };
    let local = sanitize_local_part(local, config.strictness);

    let mut best_weight = 0.0;
    let mut accepted = Vec::new();
    for features in candidates.iter().filter(|features| !features.is_empty()) {
        let breakdown = score_pair(&local, features, config);
        if options.verbose {
            trace_breakdown(email, &breakdown);
        }

        let weight = breakdown.total;
        if !breakdown.accepted(config.acceptance_threshold) {
            continue;
        }
        if weight != 0.0 && weight > best_weight {
            let name = if options.keep_original {
                features.original()
            } else {
                features.folded()
            };
            info!(
                email,
                name,
                weight,
                "{} owner",
                if accepted.is_empty() { "found" } else { "updated" }
            );
            accepted.push(Acceptance {
                name: name.to_string(),
                weight,
            });
            best_weight = weight;
        }
    }
    accepted
}

fn trace_breakdown(email: &str, breakdown: &ScoreBreakdown) {
    for outcome in &breakdown.passes {
        debug!(
            email,
            name = %breakdown.name,
            pass = outcome.pass.as_str(),
            searched = %outcome.searched,
            matches = ?outcome.matches,
            contribution = outcome.contribution,
            counted = outcome.counted,
            "pass scored"
        );
    }
    debug!(email, name = %breakdown.name, total = breakdown.total, "pair scored");
}
