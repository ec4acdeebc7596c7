use std::{collections::HashMap, fs, path::Path};

use eyre::{Context as _, Error};
use serde::Deserialize;

pub const UNKNOWN_REGION: &str = "Unknown";

const HEALTH_CARE_DISTRICTS: [&str; 21] = [
    "Ahvenanmaa",
    "Varsinais-Suomi",
    "Satakunta",
    "Kanta-Häme",
    "Pirkanmaa",
    "Päijät-Häme",
    "Kymenlaakso",
    "Etelä-Karjala",
    "Etelä-Savo",
    "Itä-Savo",
    "Pohjois-Karjala",
    "Pohjois-Savo",
    "Keski-Suomi",
    "Etelä-Pohjanmaa",
    "Vaasa",
    "Keski-Pohjanmaa",
    "Pohjois-Pohjanmaa",
    "Kainuu",
    "Länsi-Pohja",
    "Lappi",
    "HUS",
];

/// Table driven region naming.
///
/// `canonical` maps lowercased spellings to the canonical district name,
/// `display` maps a canonical name to a shorter label used in tables.
#[derive(Debug, Clone)]
pub struct RegionTable {
    pub canonical: HashMap<String, String>,
    pub display: HashMap<String, String>,
    pub unknown: String,
}

/// Region table file. Entries are laid over the built-in table.
#[derive(Debug, Default, Deserialize)]
struct RegionOverrides {
    #[serde(default)]
    canonical: HashMap<String, String>,
    #[serde(default)]
    display: HashMap<String, String>,
    unknown: Option<String>,
}

fn unknown_region() -> String {
    UNKNOWN_REGION.to_string()
}

impl Default for RegionTable {
    fn default() -> Self {
        let mut canonical: HashMap<String, String> = HEALTH_CARE_DISTRICTS
            .iter()
            .map(|name| (name.to_lowercase(), name.to_string()))
            .collect();
        canonical.insert("helsinki".to_string(), "HUS".to_string());
        canonical.insert("uusimaa".to_string(), "HUS".to_string());

        let mut display = HashMap::new();
        display.insert("Pohjois-Pohjanmaa".to_string(), "P-Pohjanmaa".to_string());

        RegionTable {
            canonical,
            display,
            unknown: unknown_region(),
        }
    }
}

impl RegionTable {
    pub fn from_json(raw: &str) -> Result<Self, Error> {
        let overrides: RegionOverrides =
            serde_json::from_str(raw).context("Failed to parse region table")?;
        let mut table = RegionTable::default();
        table.apply(overrides);
        Ok(table)
    }

    fn apply(&mut self, overrides: RegionOverrides) {
        self.canonical.extend(
            overrides
                .canonical
                .into_iter()
                .map(|(spelling, name)| (spelling.trim().to_lowercase(), name)),
        );
        self.display.extend(overrides.display);
        if let Some(unknown) = overrides.unknown {
            self.unknown = unknown;
        }
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, Error> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path)
            .with_context(|| format!("Failed to read region table {}", path.display()))?;
        Self::from_json(&raw)
    }

    /// Canonical name of a stored region. Missing or blank names become `unknown`,
    /// names absent from the table are kept as written.
    pub fn canonical(&self, raw: Option<&str>) -> String {
        match raw.map(str::trim) {
            None | Some("") => self.unknown.clone(),
            Some(name) => self
                .canonical
                .get(&name.to_lowercase())
                .cloned()
                .unwrap_or_else(|| name.to_string()),
        }
    }

    pub fn display_name(&self, canonical: &str) -> String {
        self.display
            .get(canonical)
            .cloned()
            .unwrap_or_else(|| canonical.to_string())
    }

    /// Region as shown in report tables.
    pub fn normalize(&self, raw: Option<&str>) -> String {
        self.display_name(&self.canonical(raw))
    }

    /// Resolves a user typed region. Display aliases are accepted too.
    pub fn resolve(&self, arg: &str) -> Option<String> {
        let key = arg.trim().to_lowercase();
        if key.is_empty() {
            return None;
        }
        if let Some(name) = self.canonical.get(&key) {
            return Some(name.clone());
        }
        self.display
            .iter()
            .find(|(_, alias)| alias.to_lowercase() == key)
            .map(|(name, _)| name.clone())
    }
}
