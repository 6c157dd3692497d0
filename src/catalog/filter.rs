//! Boundary filters over the catalog.
//!
//! Filters never mutate the catalog; they produce a new list of borrowed
//! descriptors in catalog order.

use super::descriptor::{Platform, ToolDescriptor};
use super::registry::Catalog;
use crate::error::{ArsenalError, Result};

/// Which tools a run should cover.
#[derive(Debug, Clone, Default)]
pub struct ToolFilter {
    /// Only critical tools.
    pub critical_only: bool,
    /// Case-insensitive substring match on the category label.
    pub category: Option<String>,
}

impl ToolFilter {
    /// Apply the filter to a catalog.
    ///
    /// # Errors
    ///
    /// Returns `UnknownCategory` (listing the available categories) when the
    /// category filter matches no tool in the catalog.
    pub fn apply<'a>(&self, catalog: &'a Catalog) -> Result<Vec<&'a ToolDescriptor>> {
        if let Some(category) = &self.category {
            if !catalog.tools().iter().any(|t| category_matches(t, category)) {
                return Err(ArsenalError::UnknownCategory {
                    category: category.clone(),
                    available: catalog.categories().into_iter().map(String::from).collect(),
                });
            }
        }

        Ok(catalog
            .tools()
            .iter()
            .filter(|t| !self.critical_only || t.critical)
            .filter(|t| {
                self.category
                    .as_deref()
                    .is_none_or(|category| category_matches(t, category))
            })
            .collect())
    }
}

fn category_matches(tool: &ToolDescriptor, needle: &str) -> bool {
    tool.category
        .to_lowercase()
        .contains(&needle.to_lowercase())
}

/// Critical tools that apply to the given platform.
pub fn essential_tools(catalog: &Catalog, platform: Platform) -> Vec<&ToolDescriptor> {
    catalog
        .tools()
        .iter()
        .filter(|t| t.critical && t.supports(platform))
        .collect()
}
