//! Configuration validation.

use crate::schema::Config;

/// Validation result.
#[derive(Debug, Default)]
pub struct ValidationResult {
    pub errors: Vec<ValidationError>,
    pub warnings: Vec<ValidationWarning>,
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn add_error(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    pub fn add_warning(&mut self, warning: ValidationWarning) {
        self.warnings.push(warning);
    }
}

/// A validation error.
#[derive(Debug)]
pub struct ValidationError {
    pub path: String,
    pub message: String,
}

impl ValidationError {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.path, self.message)
    }
}

/// A validation warning.
#[derive(Debug)]
pub struct ValidationWarning {
    pub path: String,
    pub message: String,
}

impl ValidationWarning {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ValidationWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.path, self.message)
    }
}

/// Configuration validator.
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate the configuration.
    pub fn validate(config: &Config) -> ValidationResult {
        let mut result = ValidationResult::default();

        Self::validate_server(config, &mut result);
        Self::validate_azure(config, &mut result);
        Self::validate_auth(config, &mut result);
        Self::validate_reviewer(config, &mut result);

        result
    }

    fn validate_server(config: &Config, result: &mut ValidationResult) {
        if config.server.port == 0 {
            result.add_error(ValidationError::new("server.port", "Port cannot be 0"));
        }

        if config.server.host.is_empty() {
            result.add_error(ValidationError::new("server.host", "Host cannot be empty"));
        }
    }

    fn validate_azure(config: &Config, result: &mut ValidationResult) {
        let azure = &config.azure;

        match azure.endpoint {
            Some(ref url) if !url.starts_with("http://") && !url.starts_with("https://") => {
                result.add_error(ValidationError::new(
                    "azure.endpoint",
                    "endpoint must start with http:// or https://",
                ));
            }
            Some(_) => {}
            None => result.add_warning(ValidationWarning::new(
                "azure.endpoint",
                "endpoint is not set, every review will fail until it is",
            )),
        }

        if azure.api_key.is_none() {
            result.add_warning(ValidationWarning::new(
                "azure.api_key",
                "API key is not set, every review will fail until it is",
            ));
        }

        if azure.deployment.is_none() {
            result.add_warning(ValidationWarning::new(
                "azure.deployment",
                "no default deployment, requests must send the assistant_id header",
            ));
        }

        if azure.api_version.trim().is_empty() {
            result.add_error(ValidationError::new(
                "azure.api_version",
                "api_version cannot be empty",
            ));
        }

        if azure.timeout_seconds == 0 {
            result.add_error(ValidationError::new(
                "azure.timeout_seconds",
                "timeout_seconds must be greater than 0",
            ));
        }

        if azure.connect_timeout_seconds == 0 {
            result.add_error(ValidationError::new(
                "azure.connect_timeout_seconds",
                "connect_timeout_seconds must be greater than 0",
            ));
        }
    }

    fn validate_auth(config: &Config, result: &mut ValidationResult) {
        if config.auth.token_id.is_none() {
            result.add_warning(ValidationWarning::new(
                "auth.token_id",
                "token is not set, every /revisor request will be rejected",
            ));
        }
    }

    fn validate_reviewer(config: &Config, result: &mut ValidationResult) {
        if config.reviewer.system_prompt.trim().is_empty() {
            result.add_error(ValidationError::new(
                "reviewer.system_prompt",
                "system_prompt cannot be empty",
            ));
        }

        if let Some(temperature) = config.reviewer.temperature {
            if !(0.0..=2.0).contains(&temperature) {
                result.add_error(ValidationError::new(
                    "reviewer.temperature",
                    "temperature must be between 0.0 and 2.0",
                ));
            }
        }

        if config.reviewer.max_tokens == Some(0) {
            result.add_error(ValidationError::new(
                "reviewer.max_tokens",
                "max_tokens must be greater than 0",
            ));
        }
    }
}

#[cfg(test)]
#[path = "validator_tests.rs"]
mod tests;
