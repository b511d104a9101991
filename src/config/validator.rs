//! Configuration validation rules.
//!
//! - `installer_version` must be a semantic version
//! - patcher arguments may only reference known variables
//! - the package name must end in `.pck`
//! - the API base URL must be http(s)

use crate::config::interpolation::extract_variables;
use crate::config::schema::Settings;
use crate::error::{Result, SetupError};

/// Variables a patcher argument may reference besides environment ones.
const JOB_VARIABLES: &[&str] = &["source", "assets", "output", "setup_version", "os"];

/// Validation error with context.
#[derive(Debug, Clone)]
pub struct ValidationError {
    /// Rule identifier
    pub rule: String,
    /// Human-readable error message
    pub message: String,
}

impl ValidationError {
    fn new(rule: &str, message: String) -> Self {
        Self {
            rule: rule.to_string(),
            message,
        }
    }
}

/// Validate settings and return all errors.
pub fn validate_config(settings: &Settings) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if crate::updates::parse_version(&settings.installer_version).is_none() {
        errors.push(ValidationError::new(
            "invalid-version",
            format!(
                "installer_version '{}' is not a semantic version",
                settings.installer_version
            ),
        ));
    }

    let is_pck = std::path::Path::new(&settings.pck_name)
        .extension()
        .map(|ext| ext.eq_ignore_ascii_case("pck"))
        .unwrap_or(false);
    if !is_pck {
        errors.push(ValidationError::new(
            "invalid-pck-name",
            format!("pck_name '{}' must end in .pck", settings.pck_name),
        ));
    }

    if !(settings.api_base_url.starts_with("http://")
        || settings.api_base_url.starts_with("https://"))
    {
        errors.push(ValidationError::new(
            "invalid-api-url",
            format!("api_base_url '{}' must be an http(s) URL", settings.api_base_url),
        ));
    }

    if settings.release_repo_id.is_none() {
        match settings.release_repo.as_deref() {
            Some(repo) if repo.split('/').filter(|s| !s.is_empty()).count() == 2 => {}
            Some(repo) => errors.push(ValidationError::new(
                "invalid-release-repo",
                format!("release_repo '{}' must look like owner/name", repo),
            )),
            None => errors.push(ValidationError::new(
                "missing-release-repo",
                "either release_repo_id or release_repo must be set".to_string(),
            )),
        }
    }

    let mut uses_output = false;
    for arg in &settings.patcher_args {
        for var in extract_variables(arg) {
            if var == "output" {
                uses_output = true;
            }
            if !JOB_VARIABLES.contains(&var.as_str()) && std::env::var_os(&var).is_none() {
                errors.push(ValidationError::new(
                    "unknown-variable",
                    format!("patcher_args references unknown variable ${{{}}}", var),
                ));
            }
        }
    }
    if !uses_output {
        errors.push(ValidationError::new(
            "missing-output",
            "patcher_args must pass ${output} to the patcher".to_string(),
        ));
    }

    errors
}

/// Validate and return Result (for convenience).
///
/// # Errors
///
/// Returns `ConfigValidationError` if any validation rules fail.
pub fn validate(settings: &Settings) -> Result<()> {
    let errors = validate_config(settings);

    if errors.is_empty() {
        Ok(())
    } else {
        let messages: Vec<_> = errors.iter().map(|e| e.message.clone()).collect();
        Err(SetupError::ConfigValidationError {
            message: messages.join("; "),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rules(settings: &Settings) -> Vec<String> {
        validate_config(settings).into_iter().map(|e| e.rule).collect()
    }

    #[test]
    fn defaults_are_valid() {
        assert!(validate(&Settings::default()).is_ok());
    }

    #[test]
    fn rejects_non_semver_version() {
        let settings = Settings {
            installer_version: "one point two".into(),
            ..Default::default()
        };
        assert!(rules(&settings).contains(&"invalid-version".to_string()));
    }

    #[test]
    fn accepts_v_prefixed_version() {
        let settings = Settings {
            installer_version: "v1.2.0".into(),
            ..Default::default()
        };
        assert!(rules(&settings).is_empty());
    }

    #[test]
    fn rejects_wrong_package_name() {
        let settings = Settings {
            pck_name: "UntilThen.exe".into(),
            ..Default::default()
        };
        assert!(rules(&settings).contains(&"invalid-pck-name".to_string()));
    }

    #[test]
    fn rejects_non_http_api_url() {
        let settings = Settings {
            api_base_url: "ftp://example.com".into(),
            ..Default::default()
        };
        assert!(rules(&settings).contains(&"invalid-api-url".to_string()));
    }

    #[test]
    fn requires_some_release_repo() {
        let settings = Settings {
            release_repo_id: None,
            release_repo: None,
            ..Default::default()
        };
        assert!(rules(&settings).contains(&"missing-release-repo".to_string()));

        let settings = Settings {
            release_repo_id: None,
            release_repo: Some("justaname".into()),
            ..Default::default()
        };
        assert!(rules(&settings).contains(&"invalid-release-repo".to_string()));

        let settings = Settings {
            release_repo_id: None,
            release_repo: Some("owner/name".into()),
            ..Default::default()
        };
        assert!(rules(&settings).is_empty());
    }

    #[test]
    fn rejects_unknown_template_variable() {
        let mut settings = Settings::default();
        settings
            .patcher_args
            .push("${UT_SETUP_SURELY_UNSET_VARIABLE}".into());
        assert!(rules(&settings).contains(&"unknown-variable".to_string()));
    }

    #[test]
    fn requires_output_argument() {
        let settings = Settings {
            patcher_args: vec!["${source}".into()],
            ..Default::default()
        };
        assert!(rules(&settings).contains(&"missing-output".to_string()));
    }

    #[test]
    fn validate_joins_messages() {
        let settings = Settings {
            pck_name: "x.zip".into(),
            api_base_url: "nope".into(),
            ..Default::default()
        };
        let err = validate(&settings).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("pck_name"));
        assert!(msg.contains("api_base_url"));
    }
}
