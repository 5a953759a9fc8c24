//! # Feature Identifiers
//!
//! A feature is addressed by the feature set that defines it, the version of that feature set
//! and its own name. Two textual grammars are in use:
//!
//! * [`IdGrammar::Batch`]: `driver:1:city`
//! * [`IdGrammar::Online`]: `driver:1.city`
//!
//! Identifiers are grouped per `(feature set, version)` into a [`FeatureSetRequests`], which
//! keeps groups and feature names in the order they were first seen.
use super::MarshalError;
use std::collections::HashMap;
use std::fmt;

const SET_DELIMITER: char = ':';
const FEATURE_DELIMITER: char = '.';

/// Which delimiter separates the version from the feature name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdGrammar {
    /// `name:version:feature`
    Batch,
    /// `name:version.feature`
    Online,
}

/// A parsed `(feature set, version, feature)` triple.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FeatureId {
    pub feature_set: String,
    pub version: i32,
    pub feature: String,
}

impl FeatureId {
    pub fn parse(id: &str, grammar: IdGrammar) -> Result<Self, MarshalError> {
        let malformed = |reason| MarshalError::MalformedFeatureIdentifier {
            id: id.to_string(),
            reason,
        };

        let (feature_set, version, feature) = match grammar {
            IdGrammar::Batch => {
                let mut parts = id.split(SET_DELIMITER);
                match (parts.next(), parts.next(), parts.next(), parts.next()) {
                    (Some(set), Some(version), Some(feature), None) => (set, version, feature),
                    _ => return Err(malformed("expected 'feature_set:version:feature'")),
                }
            }
            IdGrammar::Online => {
                let (set_ref, feature) = id
                    .split_once(FEATURE_DELIMITER)
                    .ok_or_else(|| malformed("expected 'feature_set:version.feature'"))?;
                let (set, version) = set_ref
                    .split_once(SET_DELIMITER)
                    .ok_or_else(|| malformed("expected 'feature_set:version.feature'"))?;
                (set, version, feature)
            }
        };

        for part in [feature_set, feature] {
            if part.is_empty() {
                return Err(malformed("names must not be empty"));
            }
            if part.contains([SET_DELIMITER, FEATURE_DELIMITER]) {
                return Err(malformed("names must not contain ':' or '.'"));
            }
        }

        if version.is_empty() || !version.bytes().all(|b| b.is_ascii_digit()) {
            return Err(malformed("version must be a non-negative integer"));
        }
        let version = version
            .parse::<i32>()
            .map_err(|_| malformed("version is out of range"))?;

        Ok(Self {
            feature_set: feature_set.to_string(),
            version,
            feature: feature.to_string(),
        })
    }

    /// The `name:version` key of the feature set this feature belongs to.
    pub fn feature_set_ref(&self) -> String {
        format!("{}{SET_DELIMITER}{}", self.feature_set, self.version)
    }
}

impl fmt::Display for FeatureId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{SET_DELIMITER}{}{SET_DELIMITER}{}",
            self.feature_set, self.version, self.feature
        )
    }
}

/// The features requested from one version of one feature set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeatureSetGroup {
    pub name: String,
    pub version: i32,
    pub feature_names: Vec<String>,
}

/// Feature identifiers grouped per feature set, in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeatureSetRequests {
    groups: Vec<FeatureSetGroup>,
    index: HashMap<String, usize>,
}

impl FeatureSetRequests {
    /// Parses and groups every identifier. A single malformed identifier fails the whole batch.
    pub fn parse<I, S>(ids: I, grammar: IdGrammar) -> Result<Self, MarshalError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let parsed = ids
            .into_iter()
            .map(|id| FeatureId::parse(id.as_ref(), grammar))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(parsed.into_iter().collect())
    }

    pub fn push(&mut self, id: FeatureId) {
        let key = id.feature_set_ref();

        let position = match self.index.get(&key) {
            Some(position) => *position,
            None => {
                self.groups.push(FeatureSetGroup {
                    name: id.feature_set,
                    version: id.version,
                    feature_names: Vec::new(),
                });
                self.index.insert(key, self.groups.len() - 1);
                self.groups.len() - 1
            }
        };

        let feature_names = &mut self.groups[position].feature_names;
        if !feature_names.contains(&id.feature) {
            feature_names.push(id.feature);
        }
    }

    /// Looks a group up by its `name:version` key.
    pub fn get(&self, feature_set_ref: &str) -> Option<&FeatureSetGroup> {
        self.index.get(feature_set_ref).map(|i| &self.groups[*i])
    }

    pub fn groups(&self) -> &[FeatureSetGroup] {
        &self.groups
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

impl FromIterator<FeatureId> for FeatureSetRequests {
    fn from_iter<T: IntoIterator<Item = FeatureId>>(iter: T) -> Self {
        let mut requests = Self::default();
        for id in iter {
            requests.push(id);
        }
        requests
    }
}
