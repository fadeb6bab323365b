//! Best-name-so-far records, one per email

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// The name currently believed to own an email address
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Owner {
    pub name: Option<String>,
    pub weight: f64,
}

impl Owner {
    /// Offer a name. A `None` name is ignored; otherwise the name replaces
    /// the stored one when nothing is stored yet or `weight` is strictly
    /// greater. Returns whether the record changed.
    pub fn offer(&mut self, name: Option<String>, weight: f64) -> bool {
        let Some(name) = name else {
            return false;
        };
        if self.name.is_none() || weight > self.weight {
            self.name = Some(name);
            self.weight = weight;
            true
        } else {
            false
        }
    }
}

/// Owner records keyed by email address
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OwnerRegistry {
    owners: BTreeMap<String, Owner>,
}

impl OwnerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `name` for `email`, creating the record on first sight
    pub fn update(&mut self, email: &str, name: Option<String>, weight: f64) -> bool {
        self.owners
            .entry(email.to_string())
            .or_default()
            .offer(name, weight)
    }

    pub fn get(&self, email: &str) -> Option<&Owner> {
        self.owners.get(email)
    }

    /// Name recorded for `email`, if any
    pub fn name_for(&self, email: &str) -> Option<&str> {
        self.owners.get(email).and_then(|owner| owner.name.as_deref())
    }

    /// Email to name, including records that never received a name
    pub fn email_owners(&self) -> BTreeMap<String, Option<String>> {
        self.owners
            .iter()
            .map(|(email, owner)| (email.clone(), owner.name.clone()))
            .collect()
    }

    /// Email to name, only for records that have one
    pub fn named(&self) -> BTreeMap<String, String> {
        self.owners
            .iter()
            .filter_map(|(email, owner)| Some((email.clone(), owner.name.clone()?)))
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Owner)> {
        self.owners.iter()
    }

    pub fn len(&self) -> usize {
        self.owners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.owners.is_empty()
    }
}
