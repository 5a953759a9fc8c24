//! # Feature Sets
//!
//! The registration model sent to Feast Core. A [`FeatureSet`] groups features that share the
//! same entities and is identified by its name and version.
//!
//! Feature sets deserialize from JSON, so definitions can be kept in files:
//!
//! ```json
//! {
//!   "name": "driver",
//!   "version": 1,
//!   "entities": [{ "name": "driver_id", "dtype": "int64" }],
//!   "features": [{ "name": "city", "dtype": "string" }],
//!   "max_age_seconds": 3600
//! }
//! ```
use crate::marshal::Dtype;
use crate::proto::ValueType;
use crate::proto::feast::core::{EntitySpec, FeatureSetSpec, FeatureSpec};
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FeatureSetError {
    #[error("Field '{field}' of feature set '{feature_set}' has type {dtype}, which Feast cannot store")]
    UnsupportedDtype {
        feature_set: String,
        field: String,
        dtype: Dtype,
    },
    #[error("Field '{field}' of feature set '{feature_set}' has unknown value type {value_type}")]
    UnknownValueType {
        feature_set: String,
        field: String,
        value_type: i32,
    },
    #[error("Max age of feature set '{0}' is negative")]
    NegativeMaxAge(String),
}

/// An entity or feature column of a feature set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSpec {
    pub name: String,
    pub dtype: Dtype,
}

impl FieldSpec {
    pub fn new(name: impl Into<String>, dtype: Dtype) -> Self {
        Self {
            name: name.into(),
            dtype,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureSet {
    pub name: String,
    pub version: i32,
    #[serde(default)]
    pub entities: Vec<FieldSpec>,
    #[serde(default)]
    pub features: Vec<FieldSpec>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_age_seconds: Option<u64>,
}

impl FeatureSet {
    pub fn new(name: impl Into<String>, version: i32) -> Self {
        Self {
            name: name.into(),
            version,
            entities: Vec::new(),
            features: Vec::new(),
            max_age_seconds: None,
        }
    }

    pub fn with_entity(mut self, name: impl Into<String>, dtype: Dtype) -> Self {
        self.entities.push(FieldSpec::new(name, dtype));
        self
    }

    pub fn with_feature(mut self, name: impl Into<String>, dtype: Dtype) -> Self {
        self.features.push(FieldSpec::new(name, dtype));
        self
    }

    pub fn with_max_age(mut self, max_age: Duration) -> Self {
        self.max_age_seconds = Some(max_age.as_secs());
        self
    }

    pub fn max_age(&self) -> Option<Duration> {
        self.max_age_seconds.map(Duration::from_secs)
    }

    /// The `name:version` reference used in feature identifiers.
    pub fn reference(&self) -> String {
        format!("{}:{}", self.name, self.version)
    }

    pub fn to_proto(&self) -> Result<FeatureSetSpec, FeatureSetError> {
        let entities = self
            .entities
            .iter()
            .map(|field| {
                Ok(EntitySpec {
                    name: field.name.clone(),
                    value_type: self.value_type(field)? as i32,
                })
            })
            .collect::<Result<Vec<_>, FeatureSetError>>()?;

        let features = self
            .features
            .iter()
            .map(|field| {
                Ok(FeatureSpec {
                    name: field.name.clone(),
                    value_type: self.value_type(field)? as i32,
                })
            })
            .collect::<Result<Vec<_>, FeatureSetError>>()?;

        Ok(FeatureSetSpec {
            name: self.name.clone(),
            version: self.version,
            entities,
            features,
            max_age: self
                .max_age()
                .map(crate::marshal::request::to_proto_duration),
        })
    }

    pub fn from_proto(spec: FeatureSetSpec) -> Result<Self, FeatureSetError> {
        let field = |name: String, value_type: i32| {
            dtype_of(value_type)
                .map(|dtype| FieldSpec {
                    name: name.clone(),
                    dtype,
                })
                .ok_or_else(|| FeatureSetError::UnknownValueType {
                    feature_set: spec.name.clone(),
                    field: name,
                    value_type,
                })
        };

        let entities = spec
            .entities
            .iter()
            .map(|e| field(e.name.clone(), e.value_type))
            .collect::<Result<Vec<_>, _>>()?;
        let features = spec
            .features
            .iter()
            .map(|f| field(f.name.clone(), f.value_type))
            .collect::<Result<Vec<_>, _>>()?;

        let max_age_seconds = match &spec.max_age {
            None => None,
            Some(d) if d.seconds < 0 => return Err(FeatureSetError::NegativeMaxAge(spec.name)),
            Some(d) => Some(d.seconds as u64),
        };

        Ok(Self {
            name: spec.name,
            version: spec.version,
            entities,
            features,
            max_age_seconds,
        })
    }

    fn value_type(&self, field: &FieldSpec) -> Result<ValueType, FeatureSetError> {
        match field.dtype {
            Dtype::Bytes => Ok(ValueType::Bytes),
            Dtype::String => Ok(ValueType::String),
            Dtype::Int32 => Ok(ValueType::Int32),
            Dtype::Int64 => Ok(ValueType::Int64),
            Dtype::Float64 => Ok(ValueType::Double),
            dtype @ (Dtype::Bool | Dtype::Timestamp) => Err(FeatureSetError::UnsupportedDtype {
                feature_set: self.name.clone(),
                field: field.name.clone(),
                dtype,
            }),
        }
    }
}

impl TryFrom<FeatureSetSpec> for FeatureSet {
    type Error = FeatureSetError;

    fn try_from(spec: FeatureSetSpec) -> Result<Self, Self::Error> {
        Self::from_proto(spec)
    }
}

fn dtype_of(value_type: i32) -> Option<Dtype> {
    match ValueType::try_from(value_type).ok()? {
        ValueType::Bytes => Some(Dtype::Bytes),
        ValueType::String => Some(Dtype::String),
        ValueType::Int32 => Some(Dtype::Int32),
        ValueType::Int64 => Some(Dtype::Int64),
        ValueType::Double => Some(Dtype::Float64),
        ValueType::Invalid => None,
    }
}
