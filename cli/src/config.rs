use std::num::NonZeroUsize;

use serde::{Deserialize, Serialize};
use sintonia_catalog::CatalogConfig;
use sintonia_config::{ConfigBackend, ConfigError};
use sintonia_core::TasteError;
use sintonia_core::domain::GenreTerm;
use sintonia_core::taste::{
  DEFAULT_AVOIDED_TERMS, DEFAULT_PREFERRED_TERMS, GenreMatcher, PresenterClassifier, PresenterFilter, TasteProfile,
  TierThresholds,
};
use sintonia_feed::FeedConfig;
use sintonia_storage::StorageConfig;

/// `[taste]`: what counts as a preferred or avoided genre, and the tier cut-offs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TasteSection {
  pub preferred_terms: Vec<String>,
  pub avoided_terms: Vec<String>,
  pub preferred_above: f64,
  pub avoided_below: f64,
}

impl Default for TasteSection {
  fn default() -> Self {
    Self {
      preferred_terms: DEFAULT_PREFERRED_TERMS.iter().map(|t| t.to_string()).collect(),
      avoided_terms: DEFAULT_AVOIDED_TERMS.iter().map(|t| t.to_string()).collect(),
      preferred_above: TierThresholds::DEFAULT_PREFERRED_ABOVE,
      avoided_below: TierThresholds::DEFAULT_AVOIDED_BELOW,
    }
  }
}

impl TasteSection {
  pub fn profile(&self) -> Result<TasteProfile, TasteError> {
    TasteProfile::from_raw(&self.preferred_terms, &self.avoided_terms)
  }

  pub fn classifier(&self) -> Result<PresenterClassifier, TasteError> {
    Ok(PresenterClassifier::new(TierThresholds::new(self.preferred_above, self.avoided_below)?))
  }
}

/// `[filter]`: defaults for `build`. Command-line flags win.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterSection {
  pub exclude_genres: Vec<String>,
  pub filter_presenters: bool,
  pub include_neutral: bool,
  pub top_n: Option<NonZeroUsize>,
}

impl FilterSection {
  pub fn validate(&self) -> Result<(), ConfigError> {
    if self.include_neutral && self.top_n.is_some() {
      return Err(ConfigError::Section {
        section: "filter".to_string(),
        reason: "`include_neutral` and `top_n` are mutually exclusive".to_string(),
      });
    }
    Ok(())
  }

  pub fn exclusions(&self) -> GenreMatcher {
    matcher(&self.exclude_genres)
  }

  pub fn presenter_filter(&self) -> Option<PresenterFilter> {
    if !self.filter_presenters && !self.include_neutral && self.top_n.is_none() {
      return None;
    }
    Some(match self.top_n {
      Some(n) => PresenterFilter::TopN(n),
      None => PresenterFilter::Tiers { include_neutral: self.include_neutral },
    })
  }
}

/// Blank terms are dropped rather than rejected.
pub fn matcher<S: AsRef<str>>(terms: &[S]) -> GenreMatcher {
  GenreMatcher::new(terms.iter().filter_map(|t| GenreTerm::normalize(t.as_ref())))
}

/// Every section of sintonia.toml.
#[derive(Debug, Clone)]
pub struct Settings {
  pub taste: TasteSection,
  pub filter: FilterSection,
  pub feed: FeedConfig,
  pub storage: StorageConfig,
  pub catalog: CatalogConfig,
}

impl Settings {
  /// Absent sections are written back with their defaults.
  pub fn load<B: ConfigBackend>(backend: &B) -> Result<Self, ConfigError> {
    let filter: FilterSection = backend.load_or_init("filter")?;
    filter.validate()?;

    Ok(Self {
      taste: backend.load_or_init("taste")?,
      filter,
      feed: FeedConfig::load_from(backend)?,
      storage: StorageConfig::load_from(backend)?,
      catalog: CatalogConfig::load_from(backend)?,
    })
  }
}
