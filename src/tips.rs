//! Personalized tip selection.
//!
//! Tips come from a static catalog keyed by category. Each weak (or
//! notably strong) component pulls up to a few tips from its category;
//! the gathered list is deduplicated and cut to the user's tier limit.

use std::collections::HashSet;
use std::path::Path;
use std::sync::{Arc, RwLock};

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::catalog;
use crate::error::Result;
use crate::mesh::Region;
use crate::scoring::ComponentScores;
use crate::shape::FaceShape;

/// Most tips returned to a free user.
pub const FREE_TIP_LIMIT: usize = 5;
/// Most tips returned to a premium user.
pub const PREMIUM_TIP_LIMIT: usize = 8;

const JAWLINE_LOW: f64 = 75.0;
const JAWLINE_HIGH: f64 = 90.0;
const FEATURE_LOW: f64 = 70.0;

/// Words marking a tip as positively framed, for users with a strong jaw.
const POSITIVE_MARKERS: [&str; 2] = ["strong", "asset"];

/// Access tier of a catalog tip. Any tier label other than `premium` reads as free.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum TipTier {
    Free,
    Premium,
}

impl From<String> for TipTier {
    fn from(label: String) -> Self {
        if label == "premium" {
            TipTier::Premium
        } else {
            TipTier::Free
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TipCatalogEntry {
    pub id: String,
    pub category: String,
    pub tier: TipTier,
    pub text: String,
}

/// Read-only tip reference data.
#[derive(Debug, Clone, Default)]
pub struct TipCatalog {
    entries: Vec<TipCatalogEntry>,
}

impl TipCatalog {
    pub fn new(entries: Vec<TipCatalogEntry>) -> Self {
        Self { entries }
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        Ok(Self::new(catalog::load_entries(path)?))
    }

    pub fn load_or_empty<P: AsRef<Path>>(path: P) -> Self {
        Self::new(catalog::load_or_empty("tips", path))
    }

    pub fn entries(&self) -> &[TipCatalogEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// A tip selected for one user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tip {
    pub id: String,
    pub text: String,
}

/// Personalization inputs. The default is a free user with no history.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserProfile {
    pub is_premium: bool,
    pub shown_tip_ids: HashSet<String>,
}

impl UserProfile {
    pub fn premium() -> Self {
        Self {
            is_premium: true,
            ..Self::default()
        }
    }

    pub fn with_shown<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.shown_tip_ids.extend(ids.into_iter().map(Into::into));
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TipLimits {
    pub free_limit: usize,
    pub premium_limit: usize,
    pub per_category: usize,
    /// The general category is consulted while fewer tips than this are gathered.
    pub general_fallback_below: usize,
}

impl Default for TipLimits {
    fn default() -> Self {
        Self {
            free_limit: FREE_TIP_LIMIT,
            premium_limit: PREMIUM_TIP_LIMIT,
            per_category: 2,
            general_fallback_below: 3,
        }
    }
}

#[derive(Debug)]
pub struct TipsEngine {
    catalog: RwLock<Arc<TipCatalog>>,
    limits: TipLimits,
}

impl TipsEngine {
    pub fn new(catalog: Arc<TipCatalog>, limits: TipLimits) -> Self {
        Self {
            catalog: RwLock::new(catalog),
            limits,
        }
    }

    /// Snapshot of the current catalog.
    pub fn catalog(&self) -> Arc<TipCatalog> {
        self.catalog
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    /// Replace the catalog for subsequent calls.
    pub fn reload(&self, catalog: Arc<TipCatalog>) {
        info!(entries = catalog.len(), "tip catalog reloaded");
        *self
            .catalog
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = catalog;
    }

    pub fn generate_tips<R: Rng + ?Sized>(
        &self,
        components: &ComponentScores,
        primary_shape: FaceShape,
        asymmetry_zones: &[Region],
        profile: &UserProfile,
        rng: &mut R,
    ) -> Vec<Tip> {
        let catalog = self.catalog();
        let query = CategoryQuery {
            catalog: &catalog,
            profile,
            per_category: self.limits.per_category,
        };

        let mut gathered = Vec::new();
        if components.jawline < JAWLINE_LOW {
            gathered.extend(query.pick("jawline", false, rng));
        } else if components.jawline > JAWLINE_HIGH {
            gathered.extend(query.pick("jawline", true, rng));
        }

        let shape_category = format!("shape_{}", primary_shape.name().to_lowercase());
        gathered.extend(query.pick(&shape_category, false, rng));

        if components.eyes < FEATURE_LOW {
            gathered.extend(query.pick("eyes", false, rng));
        }
        if components.nose < FEATURE_LOW {
            gathered.extend(query.pick("nose", false, rng));
        }
        if components.lips < FEATURE_LOW {
            gathered.extend(query.pick("lips", false, rng));
        }
        if !asymmetry_zones.is_empty() {
            gathered.extend(query.pick("symmetry", false, rng));
        }
        if gathered.len() < self.limits.general_fallback_below {
            gathered.extend(query.pick("general", false, rng));
        }

        let mut seen = HashSet::new();
        gathered.retain(|tip| seen.insert(tip.id.clone()));

        let limit = if profile.is_premium {
            self.limits.premium_limit
        } else {
            self.limits.free_limit
        };
        gathered.truncate(limit);

        debug!(count = gathered.len(), premium = profile.is_premium, "tips selected");
        gathered
    }
}

struct CategoryQuery<'a> {
    catalog: &'a TipCatalog,
    profile: &'a UserProfile,
    per_category: usize,
}

impl CategoryQuery<'_> {
    /// Eligible tips whose category starts with `prefix`, shuffled and capped.
    fn pick<R: Rng + ?Sized>(&self, prefix: &str, positive_only: bool, rng: &mut R) -> Vec<Tip> {
        let mut matching: Vec<Tip> = self
            .catalog
            .entries()
            .iter()
            .filter(|tip| !self.profile.shown_tip_ids.contains(&tip.id))
            .filter(|tip| tip.category.starts_with(prefix))
            .filter(|tip| tip.tier == TipTier::Free || self.profile.is_premium)
            .filter(|tip| !positive_only || is_positive(&tip.text))
            .map(|tip| Tip {
                id: tip.id.clone(),
                text: tip.text.clone(),
            })
            .collect();

        matching.shuffle(rng);
        matching.truncate(self.per_category);
        matching
    }
}

fn is_positive(text: &str) -> bool {
    let lower = text.to_lowercase();
    POSITIVE_MARKERS.iter().any(|&marker| lower.contains(marker))
}
