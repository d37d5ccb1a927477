//! Label → route resolution.
//!
//! Activating a label navigates to `/<category>/<slug>`. Slugs are assigned
//! in rank order so two labels that slug identically always get the same
//! suffixes.

use std::collections::HashMap;
use std::fmt;

use url::Url;

use crate::error::Result;
use crate::model::LabelSet;

/// Slug used when a label has no alphanumeric characters at all.
const FALLBACK_SLUG: &str = "item";

/// Lowercase `label` and collapse every run of non-alphanumeric characters
/// into a single `-`, trimming hyphens at both ends.
pub fn slugify(label: &str) -> String {
    let mut slug = String::with_capacity(label.len());
    let mut pending_dash = false;

    for ch in label.chars() {
        if ch.is_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.extend(ch.to_lowercase());
        } else {
            pending_dash = true;
        }
    }

    if slug.is_empty() {
        FALLBACK_SLUG.to_string()
    } else {
        slug
    }
}

/// Hands out unique slugs: the second `a` becomes `a-1`, the third `a-2`.
#[derive(Debug, Default)]
pub struct Slugger {
    occurrences: HashMap<String, usize>,
}

impl Slugger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn slug(&mut self, label: &str) -> String {
        let base = slugify(label);
        let mut slug = base.clone();
        while self.occurrences.contains_key(&slug) {
            let count = self.occurrences.entry(base.clone()).or_insert(0);
            *count += 1;
            slug = format!("{}-{}", base, count);
        }
        self.occurrences.insert(slug.clone(), 0);
        slug
    }

    pub fn reset(&mut self) {
        self.occurrences.clear();
    }
}

/// Navigation target of one label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    pub category: String,
    pub slug: String,
}

impl Route {
    pub fn path(&self) -> String {
        format!("/{}/{}", self.category, self.slug)
    }

    /// Join onto a site URL, e.g. `https://example.com/` →
    /// `https://example.com/tags/rust`.
    pub fn absolute(&self, site: &Url) -> Result<Url> {
        Ok(site.join(&self.path())?)
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "/{}/{}", self.category, self.slug)
    }
}

/// Precomputed routes for one label set.
#[derive(Debug, Clone, Default)]
pub struct Router {
    category: String,
    slugs: HashMap<String, String>,
}

impl Router {
    pub fn new(category: impl Into<String>, set: &LabelSet) -> Self {
        let mut slugger = Slugger::new();
        let slugs = set
            .iter()
            .map(|entry| (entry.label.clone(), slugger.slug(&entry.label)))
            .collect();
        Self {
            category: category.into(),
            slugs,
        }
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn route_for(&self, label: &str) -> Option<Route> {
        self.slugs.get(label).map(|slug| Route {
            category: self.category.clone(),
            slug: slug.clone(),
        })
    }
}
