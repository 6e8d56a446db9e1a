//! # Tracker List Module
//!
//! Typed view of Disconnect's `disconnect-plaintext.json` and the flattening of one
//! category into a plain list of domains.
//!
//! The document looks like this (key order is significant and preserved):
//!
//! ```json
//! { "categories": { "Content": [ { "33Across": { "http://33across.com/": ["33across.com"] } } ] } }
//! ```
//!
//! Each element of a category is a [`SiteEntry`]: provider name → properties. A property
//! whose value is an array of strings is a *domain group*. Other properties (flags such
//! as `"dnt": "eff"`) are not domains and are never emitted.

use crate::error::{ DisconnectError, Result };
use serde::Deserialize;
use serde_json::{ Map, Value };
use tracing::{ debug, warn };

/// Which domain groups of a site entry end up in the output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum GroupSelection {
    /// First provider, first property. Assumes one provider with one group per site;
    /// anything beyond that is dropped with a warning.
    #[default]
    FirstGroup,
    /// Every string-array property of every provider, in document order. Non-array
    /// properties are flags and skipped; an array holding anything but strings, or a
    /// provider that is not an object, makes the site invalid.
    AllGroups,
}

/// The remote document. Only `categories` is read; other top-level keys are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct TrackerList {
    categories: Map<String, Value>,
}

/// One element of a category: provider name → provider properties.
#[derive(Debug, Clone, Deserialize)]
#[serde(transparent)]
pub struct SiteEntry {
    providers: Map<String, Value>,
}

/// A domain group found inside a site entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomainGroup<'a> {
    pub provider: &'a str,
    pub name: &'a str,
    pub domains: Vec<&'a str>,
}

impl TrackerList {
    /// Decodes a raw response body.
    pub fn from_slice(body: &[u8]) -> Result<Self> {
        Ok(serde_json::from_slice(body)?)
    }

    /// Category names in document order.
    pub fn category_names(&self) -> impl Iterator<Item = &str> {
        self.categories.keys().map(String::as_str)
    }

    /// Decodes the site entries of `category`.
    ///
    /// A missing category is an error rather than an empty list.
    pub fn sites(&self, category: &str) -> Result<Vec<SiteEntry>> {
        let value = self.categories
            .get(category)
            .ok_or_else(|| DisconnectError::MissingCategory(category.to_string()))?;

        Ok(Vec::<SiteEntry>::deserialize(value)?)
    }

    /// Flattens every site of `category` into one ordered list of domains.
    /// Duplicates are kept.
    pub fn category_domains(&self, category: &str, selection: GroupSelection) -> Result<Vec<String>> {
        let sites = self.sites(category)?;
        debug!(category, sites = sites.len(), ?selection, "flattening category");

        let mut domains = Vec::new();
        for (index, site) in sites.iter().enumerate() {
            domains.extend(site.domains(index, selection)?);
        }
        Ok(domains)
    }
}

impl SiteEntry {
    /// Provider names in document order.
    pub fn provider_names(&self) -> impl Iterator<Item = &str> {
        self.providers.keys().map(String::as_str)
    }

    /// Every domain group of this site, in document order. Providers that are not
    /// objects and properties that are not string arrays are skipped.
    pub fn domain_groups(&self) -> impl Iterator<Item = DomainGroup<'_>> {
        self.providers
            .iter()
            .filter_map(|(provider, value)| value.as_object().map(|props| (provider, props)))
            .flat_map(|(provider, props)| {
                props.iter().filter_map(move |(name, value)| {
                    domain_list(value).map(|domains| DomainGroup {
                        provider: provider.as_str(),
                        name: name.as_str(),
                        domains,
                    })
                })
            })
    }

    /// Domains this site contributes under `selection`. `index` is the site's position
    /// in its category and only used for diagnostics.
    pub fn domains(&self, index: usize, selection: GroupSelection) -> Result<Vec<String>> {
        match selection {
            GroupSelection::FirstGroup => self.first_group(index),
            GroupSelection::AllGroups => self.all_groups(index),
        }
    }

    /// Every array-valued property as `provider/group`, in document order, whether or
    /// not all of its elements are strings.
    fn array_properties(&self) -> impl Iterator<Item = String> + '_ {
        self.providers
            .iter()
            .filter_map(|(provider, value)| value.as_object().map(|props| (provider, props)))
            .flat_map(|(provider, props)| {
                props
                    .iter()
                    .filter(|(_, value)| value.is_array())
                    .map(move |(name, _)| format!("{}/{}", provider, name))
            })
    }

    fn all_groups(&self, index: usize) -> Result<Vec<String>> {
        let mut found = false;
        let mut domains = Vec::new();

        for (provider, value) in &self.providers {
            let properties = value
                .as_object()
                .ok_or_else(|| invalid_site(index, format!("provider {provider:?} is not an object")))?;

            for (group, value) in properties {
                if !value.is_array() {
                    continue;
                }
                let list = domain_list(value).ok_or_else(||
                    invalid_site(
                        index,
                        format!("group {group:?} of provider {provider:?} is not a list of domains")
                    )
                )?;
                found = true;
                domains.extend(list.into_iter().map(String::from));
            }
        }

        if !found {
            return Err(invalid_site(index, "site has no domain group"));
        }
        Ok(domains)
    }

    fn first_group(&self, index: usize) -> Result<Vec<String>> {
        let (provider, value) = self.providers
            .iter()
            .next()
            .ok_or_else(|| invalid_site(index, "site has no provider"))?;

        let properties = value
            .as_object()
            .ok_or_else(|| invalid_site(index, format!("provider {provider:?} is not an object")))?;

        let (group, value) = properties
            .iter()
            .next()
            .ok_or_else(|| invalid_site(index, format!("provider {provider:?} has no domain group")))?;

        let domains = domain_list(value).ok_or_else(||
            invalid_site(
                index,
                format!("group {group:?} of provider {provider:?} is not a list of domains")
            )
        )?;

        // The first group is always the first item yielded by array_properties().
        let dropped: Vec<String> = self.array_properties().skip(1).collect();
        if !dropped.is_empty() {
            warn!(
                site = index,
                provider = %provider,
                ?dropped,
                "site has more than one domain group, only the first is used"
            );
        }

        Ok(domains.into_iter().map(String::from).collect())
    }
}

fn domain_list(value: &Value) -> Option<Vec<&str>> {
    value.as_array()?.iter().map(Value::as_str).collect()
}

fn invalid_site(index: usize, reason: impl Into<String>) -> DisconnectError {
    DisconnectError::InvalidSite { index, reason: reason.into() }
}
