// Copyright 2024 The rust-absa Authors
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//     http://www.apache.org/licenses/LICENSE-2.0
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! # English → Polish aspect alias table
//! Maps English aspect surface forms to a closed set of Polish display categories. Several
//! English forms usually share one category:
//!
//! ```
//! use rust_absa::pipelines::aliases::AliasTable;
//!
//! let aliases = AliasTable::restaurant();
//! assert_eq!(aliases.get("Waiter"), Some("obsługa"));
//! assert_eq!(aliases.get("staff"), Some("obsługa"));
//! assert_eq!(aliases.get("spaceship"), None);
//! ```
//!
//! Lookups are exact matches on the lower-cased phrase. The table is built once and never
//! mutated. A custom table can be loaded from a CSV file with an `english,polish` header.

use crate::common::error::AbsaError;
use serde::Deserialize;
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::path::Path;

/// Embedded restaurant-domain aliases (English form, Polish category)
pub const RESTAURANT_ALIASES: &[(&str, &str)] = &[
    ("food", "jedzenie"),
    ("meal", "jedzenie"),
    ("meals", "jedzenie"),
    ("dish", "jedzenie"),
    ("dishes", "jedzenie"),
    ("pizza", "jedzenie"),
    ("pasta", "jedzenie"),
    ("soup", "jedzenie"),
    ("dessert", "jedzenie"),
    ("desserts", "jedzenie"),
    ("portions", "jedzenie"),
    ("portion", "jedzenie"),
    ("taste", "jedzenie"),
    ("service", "obsługa"),
    ("waiter", "obsługa"),
    ("waiters", "obsługa"),
    ("waitress", "obsługa"),
    ("staff", "obsługa"),
    ("manager", "obsługa"),
    ("host", "obsługa"),
    ("hostess", "obsługa"),
    ("bartender", "obsługa"),
    ("price", "cena"),
    ("prices", "cena"),
    ("bill", "cena"),
    ("value", "cena"),
    ("cost", "cena"),
    ("atmosphere", "atmosfera"),
    ("ambience", "atmosfera"),
    ("ambiance", "atmosfera"),
    ("music", "atmosfera"),
    ("decor", "wystrój"),
    ("interior", "wystrój"),
    ("location", "lokalizacja"),
    ("place", "lokal"),
    ("restaurant", "lokal"),
    ("drinks", "napoje"),
    ("drink", "napoje"),
    ("wine", "napoje"),
    ("beer", "napoje"),
    ("coffee", "napoje"),
    ("menu", "menu"),
    ("wait", "czas oczekiwania"),
    ("waiting time", "czas oczekiwania"),
    ("location", "lokalizacja"),
];

#[derive(Debug, Deserialize)]
struct AliasRecord {
    english: String,
    polish: String,
}

/// # Immutable English → Polish alias mapping
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AliasTable {
    aliases: HashMap<String, String>,
}

impl AliasTable {
    /// Builds a table from (English, Polish) pairs. English keys are lower-cased. A key repeated
    /// with the same category is merged, a key repeated with a different category is rejected.
    pub fn from_pairs<I, E, P>(pairs: I) -> Result<AliasTable, AbsaError>
    where
        I: IntoIterator<Item = (E, P)>,
        E: AsRef<str>,
        P: Into<String>,
    {
        let mut aliases = HashMap::new();
        for (english, polish) in pairs {
            let polish = polish.into();
            match aliases.entry(english.as_ref().trim().to_lowercase()) {
                Entry::Vacant(entry) => {
                    entry.insert(polish);
                }
                Entry::Occupied(entry) => {
                    if entry.get() != &polish {
                        return Err(AbsaError::InvalidConfigurationError(format!(
                            "conflicting aliases for \"{}\": \"{}\" and \"{}\"",
                            entry.key(),
                            entry.get(),
                            polish
                        )));
                    }
                }
            }
        }
        Ok(AliasTable { aliases })
    }

    /// The embedded restaurant-domain table.
    pub fn restaurant() -> AliasTable {
        AliasTable {
            aliases: RESTAURANT_ALIASES
                .iter()
                .map(|(english, polish)| (english.to_string(), polish.to_string()))
                .collect(),
        }
    }

    /// Loads a table from a CSV file with an `english,polish` header.
    pub fn from_csv<P: AsRef<Path>>(path: P) -> Result<AliasTable, AbsaError> {
        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_path(path.as_ref())?;
        let records = reader
            .deserialize::<AliasRecord>()
            .collect::<Result<Vec<_>, _>>()?;
        Self::from_pairs(
            records
                .into_iter()
                .map(|record| (record.english, record.polish)),
        )
    }

    /// Looks up the Polish category of an English aspect (case-insensitive, exact match).
    pub fn get(&self, aspect: &str) -> Option<&str> {
        self.aliases
            .get(aspect.to_lowercase().as_str())
            .map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.aliases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.aliases.is_empty()
    }
}
