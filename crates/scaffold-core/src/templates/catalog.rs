//! Framework and variant catalog

use anyhow::{Context, Result};
use colored::{Color, ColoredString, Colorize};
use serde::{Deserialize, Serialize};

/// A sub-choice of a framework, e.g. a TypeScript flavour of the same template family
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Variant {
    /// Template identifier
    pub name: String,

    /// Human readable label shown next to the name
    #[serde(default)]
    pub display: Option<String>,

    /// Presentation hint, any color name understood by `colored`
    #[serde(default)]
    pub color: Option<String>,
}

/// A top-level template family presented to the user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Framework {
    /// Template identifier when the framework has no variants
    pub name: String,

    /// Presentation hint, any color name understood by `colored`
    #[serde(default)]
    pub color: Option<String>,

    /// Variants the user must pick from once this framework is selected
    #[serde(default)]
    pub variants: Option<Vec<Variant>>,
}

impl Framework {
    /// Variants declared by this framework, empty if none
    pub fn variants(&self) -> &[Variant] {
        self.variants.as_deref().unwrap_or_default()
    }

    pub fn has_variants(&self) -> bool {
        !self.variants().is_empty()
    }

    pub fn label(&self) -> ColoredString {
        paint(&self.name, self.color.as_deref())
    }
}

impl Variant {
    pub fn label(&self) -> ColoredString {
        paint(&self.name, self.color.as_deref())
    }
}

fn paint(text: &str, color: Option<&str>) -> ColoredString {
    match color.and_then(|c| c.parse::<Color>().ok()) {
        Some(color) => text.color(color),
        None => text.normal(),
    }
}

/// Immutable list of frameworks available to a binary
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    frameworks: Vec<Framework>,
}

impl Catalog {
    pub fn new(frameworks: Vec<Framework>) -> Self {
        Self { frameworks }
    }

    /// Parse a catalog from a JSON array of framework records
    pub fn from_json(json: &str) -> Result<Self> {
        let frameworks: Vec<Framework> =
            serde_json::from_str(json).context("Failed to parse template catalog")?;
        Ok(Self::new(frameworks))
    }

    pub fn frameworks(&self) -> &[Framework] {
        &self.frameworks
    }

    /// Look up a framework by name
    pub fn find(&self, name: &str) -> Option<&Framework> {
        self.frameworks.iter().find(|f| f.name == name)
    }

    /// All selectable template identifiers, in catalog order
    ///
    /// A framework with variants contributes its variant names; otherwise it
    /// contributes its own name.
    pub fn template_ids(&self) -> Vec<&str> {
        self.frameworks
            .iter()
            .flat_map(|f| {
                if f.has_variants() {
                    f.variants().iter().map(|v| v.name.as_str()).collect::<Vec<_>>()
                } else {
                    vec![f.name.as_str()]
                }
            })
            .collect()
    }

    /// Whether `id` names a known template
    pub fn contains(&self, id: &str) -> bool {
        self.template_ids().contains(&id)
    }
}
