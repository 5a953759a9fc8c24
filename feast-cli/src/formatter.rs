use colored::*;
use feast_sdk::client::{ClientError, ServiceVersion, VersionInfo};
use feast_sdk::feature_set::{FeatureSet, FieldSpec};
use feast_sdk::job::JobHandle;
use std::fmt::Display;

/// A wrapper struct for a formatted, colored string.
///
/// Implements `Display` so it can be printed directly.
pub struct FormattedString(pub String);

pub struct FeatureSetList(pub Vec<FeatureSet>);

pub struct GenericError<T: Display>(pub &'static str, pub T);

impl std::fmt::Display for FormattedString {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f)?;
        writeln!(f, "{}", self.0)?;
        Ok(())
    }
}

impl From<serde_json::Value> for FormattedString {
    fn from(value: serde_json::Value) -> Self {
        FormattedString(serde_json::to_string_pretty(&value).unwrap_or_else(|_| value.to_string()))
    }
}

impl From<ClientError> for FormattedString {
    fn from(err: ClientError) -> Self {
        let title = match &err {
            ClientError::Marshal(_) => "Invalid Data:",
            ClientError::Transport(_) => "Request Failed:",
            ClientError::InvalidFeatureSet(_) => "Invalid Feature Set:",
            ClientError::AmbiguousResourceLookup { .. } => "Lookup Failed:",
            ClientError::ApplyFailed(_) => "Apply Failed:",
        };
        FormattedString(format!("{}\n\n'{}'", title.red().bold(), err))
    }
}

impl From<std::io::Error> for FormattedString {
    fn from(err: std::io::Error) -> Self {
        FormattedString(format!(
            "{}\n\n'{}'",
            "Failed to read file:".red().bold(),
            err
        ))
    }
}

impl<T: Display> From<GenericError<T>> for FormattedString {
    fn from(GenericError(msg, err): GenericError<T>) -> Self {
        FormattedString(format!("{}:\n\n'{}'", msg.red().bold(), err))
    }
}

impl From<VersionInfo> for FormattedString {
    fn from(info: VersionInfo) -> Self {
        FormattedString(format!(
            "{}\n{}",
            service_line("Core", &info.core),
            service_line("Serving", &info.serving)
        ))
    }
}

fn service_line(label: &str, service: &ServiceVersion) -> String {
    let url = service.url.as_deref().unwrap_or("-");
    let version = if service.is_connected() {
        service.version.green()
    } else {
        service.version.yellow()
    };
    format!("{} {} {}", format!("{label:<8}").cyan(), url, version)
}

impl From<FeatureSetList> for FormattedString {
    fn from(FeatureSetList(feature_sets): FeatureSetList) -> Self {
        if feature_sets.is_empty() {
            return FormattedString("No feature sets found.".yellow().to_string());
        }

        let mut out = String::new();
        out.push_str("Feature Sets:\n");
        for feature_set in feature_sets {
            out.push_str(&format!("  - {}\n", feature_set.reference().green()));
        }
        FormattedString(out.trim_end().to_string())
    }
}

impl From<FeatureSet> for FormattedString {
    fn from(feature_set: FeatureSet) -> Self {
        let mut out = String::new();
        out.push_str(&format!(
            "{} {} {{\n",
            "feature_set".cyan(),
            feature_set.reference().green()
        ));

        for entity in &feature_set.entities {
            out.push_str(&field_line("entity", entity));
        }
        for feature in &feature_set.features {
            out.push_str(&field_line("feature", feature));
        }
        if let Some(max_age) = feature_set.max_age_seconds {
            out.push_str(&format!(
                "  {} {}s;\n",
                "max_age".cyan(),
                max_age.to_string().purple()
            ));
        }

        out.push('}');
        FormattedString(out)
    }
}

fn field_line(kind: &str, field: &FieldSpec) -> String {
    format!(
        "  {} {} {};\n",
        kind.cyan(),
        field.dtype.to_string().yellow(),
        field.name
    )
}

impl From<JobHandle> for FormattedString {
    fn from(job: JobHandle) -> Self {
        let mut out = format!(
            "{} {}\n  type: {}\n  status: {}",
            "Batch Job".cyan(),
            job.id().green(),
            job.job_type().as_str_name(),
            job.status().as_str_name().yellow()
        );
        if let Some(error) = job.error() {
            out.push_str(&format!("\n  error: {}", error.red()));
        }
        for uri in job.file_uris() {
            out.push_str(&format!("\n  file: {uri}"));
        }
        FormattedString(out)
    }
}
