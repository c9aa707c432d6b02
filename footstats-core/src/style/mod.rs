//! The utility-CSS scan declaration.
//!
//! Pure data handed to the Tailwind generator: which files to scan for class
//! names, theme overrides and plugins. Nothing here is validated; bad globs
//! or missing plugin packages are reported by the generator.

mod render;

pub use render::render_tailwind_config;

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Breakpoints a container padding can be overridden at, ordered by width.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Breakpoint {
    #[serde(rename = "sm")]
    Sm,
    #[serde(rename = "md")]
    Md,
    #[serde(rename = "lg")]
    Lg,
    #[serde(rename = "xl")]
    Xl,
    #[serde(rename = "2xl")]
    Xxl,
}

impl Breakpoint {
    pub fn key(&self) -> &'static str {
        match self {
            Breakpoint::Sm => "sm",
            Breakpoint::Md => "md",
            Breakpoint::Lg => "lg",
            Breakpoint::Xl => "xl",
            Breakpoint::Xxl => "2xl",
        }
    }
}

impl fmt::Display for Breakpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}

/// Container padding: a default plus per-breakpoint overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContainerPadding {
    #[serde(rename = "DEFAULT")]
    pub default: String,
    #[serde(flatten)]
    pub breakpoints: BTreeMap<Breakpoint, String>,
}

impl ContainerPadding {
    pub fn new(default: impl Into<String>) -> Self {
        Self {
            default: default.into(),
            breakpoints: BTreeMap::new(),
        }
    }

    pub fn at(mut self, breakpoint: Breakpoint, value: impl Into<String>) -> Self {
        self.breakpoints.insert(breakpoint, value.into());
        self
    }

    pub fn get(&self, breakpoint: Breakpoint) -> Option<&str> {
        self.breakpoints.get(&breakpoint).map(String::as_str)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Container {
    pub center: bool,
    pub padding: ContainerPadding,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Theme {
    /// Merged over the generator's default theme. Empty for now.
    #[serde(default)]
    pub extend: BTreeMap<String, serde_json::Value>,
    pub container: Container,
}

/// A plugin package, loaded by the generator with `require`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Plugin(pub String);

impl Plugin {
    pub fn new(package: impl Into<String>) -> Self {
        Self(package.into())
    }

    pub fn package(&self) -> &str {
        &self.0
    }
}

/// Configuration consumed by the Tailwind CLI.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScanConfig {
    /// Globs scanned for class names, in order.
    pub content: Vec<String>,
    pub theme: Theme,
    #[serde(default)]
    pub plugins: Vec<Plugin>,
}

impl ScanConfig {
    /// The footstats front-end: Jinja templates, static scripts and the
    /// flowbite component package.
    pub fn footstats() -> Self {
        Self {
            content: vec![
                "./templates/**/*.html".to_string(),
                "./static/**/**/*.js".to_string(),
                "./node_modules/flowbite/**/*.js".to_string(),
            ],
            theme: Theme {
                extend: BTreeMap::new(),
                container: Container {
                    center: true,
                    padding: ContainerPadding::new("1rem")
                        .at(Breakpoint::Sm, "1.5rem")
                        .at(Breakpoint::Lg, "2rem"),
                },
            },
            plugins: vec![Plugin::new("flowbite/plugin")],
        }
    }
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self::footstats()
    }
}
