//! Resolve run configuration use case.

use qvars_domain::RunConfiguration;

use crate::error::ApplicationResult;
use crate::variable_resolver::parser::{TOKEN_PATTERN, Token};
use crate::variable_resolver::scanner::scan_with_keys;
use crate::variable_resolver::{Resolution, VariableResolver};

/// Output from resolving a run configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolveRunConfigurationOutput {
    /// The resolved configuration, or `Cancelled`.
    pub resolution: Resolution<RunConfiguration>,
    /// Placeholders left untouched because their scope is unknown.
    pub unknown_placeholders: Vec<String>,
}

/// Substitutes every placeholder in a run configuration.
///
/// All string fields, including environment variable names, are resolved in
/// one pass; each referenced command runs once for the whole configuration.
pub struct ResolveRunConfiguration {
    resolver: VariableResolver,
}

impl ResolveRunConfiguration {
    /// Creates a new `ResolveRunConfiguration` use case.
    #[must_use]
    pub const fn new(resolver: VariableResolver) -> Self {
        Self { resolver }
    }

    /// Resolves `configuration` and validates the result.
    ///
    /// # Errors
    /// - Returns `ApplicationError::Resolve` if any placeholder fails
    /// - Returns `ApplicationError::Domain` if the resolved configuration is invalid
    /// - Returns `ApplicationError::Serialization` if the configuration cannot be converted
    pub async fn execute(
        &self,
        configuration: &RunConfiguration,
    ) -> ApplicationResult<ResolveRunConfigurationOutput> {
        let raw = serde_json::to_value(configuration)?;
        let unknown_placeholders = self.unknown_placeholders(&raw);

        let resolution = match self.resolver.resolve_value(&raw).await? {
            Resolution::Resolved(value) => {
                let resolved: RunConfiguration = serde_json::from_value(value)?;
                resolved.validate()?;
                tracing::debug!(name = %resolved.name, "run configuration resolved");
                Resolution::Resolved(resolved)
            }
            Resolution::Cancelled => {
                tracing::info!(name = %configuration.name, "run configuration cancelled");
                Resolution::Cancelled
            }
        };

        Ok(ResolveRunConfigurationOutput {
            resolution,
            unknown_placeholders,
        })
    }

    fn unknown_placeholders(&self, raw: &serde_json::Value) -> Vec<String> {
        let mut inner = Vec::new();
        scan_with_keys(&TOKEN_PATTERN, raw, &mut inner);

        inner
            .iter()
            .map(|text| Token::from_inner(text, 0..0))
            .filter(|token| !self.resolver.scopes().is_known(&token.scope))
            .map(|token| token.match_text)
            .collect()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use super::*;
    use crate::error::{ApplicationError, ResolveError};
    use crate::ports::{CommandProvider, CommandProviderError};
    use crate::variable_resolver::ResolutionContext;
    use async_trait::async_trait;
    use pretty_assertions::assert_eq;
    use qvars_domain::{ActiveFile, Platform, WorkspaceFolder};
    use serde_json::{Value, json};
    use std::sync::{Arc, Mutex};

    struct MockProvider {
        calls: Mutex<Vec<String>>,
    }

    impl MockProvider {
        fn new() -> Self {
            Self {
                calls: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl CommandProvider for MockProvider {
        async fn execute(
            &self,
            command_id: &str,
            _context: &Value,
        ) -> Result<Option<Value>, CommandProviderError> {
            self.calls.lock().unwrap().push(command_id.to_string());
            match command_id {
                "pickPython" => Ok(Some(json!("/opt/py/bin/python"))),
                "pickProgram" => Ok(Some(json!(""))),
                "abort" => Ok(Some(Value::Null)),
                "first" => Ok(Some(json!("1"))),
                "second" => Ok(Some(json!("2"))),
                other => Err(CommandProviderError::NotFound(other.to_string())),
            }
        }
    }

    fn create_test_context() -> ResolutionContext {
        ResolutionContext::new(Platform::Posix)
            .with_environment([("HOME", "/home/bob")])
            .with_workspace_folder(WorkspaceFolder::new("ghz", "/work/ghz"))
            .with_active_file(ActiveFile::new("/work/ghz/circuits/ghz.py"))
    }

    fn create_use_case() -> ResolveRunConfiguration {
        ResolveRunConfiguration::new(
            VariableResolver::new(create_test_context()).with_provider(MockProvider::new()),
        )
    }

    #[tokio::test]
    async fn test_resolves_all_fields() {
        let configuration = RunConfiguration::new("ghz", "${command:pickPython}")
            .with_arg("${file}")
            .with_arg("--out=${workspaceFolder}/out")
            .with_arg("${custom:thing}")
            .with_cwd("${fileDirname}")
            .with_env("QVARS_${fileBasenameNoExtension}", "${env:HOME}/.cache");

        let output = create_use_case().execute(&configuration).await.unwrap();

        let expected = RunConfiguration::new("ghz", "/opt/py/bin/python")
            .with_arg("/work/ghz/circuits/ghz.py")
            .with_arg("--out=/work/ghz/out")
            .with_arg("${custom:thing}")
            .with_cwd("/work/ghz/circuits")
            .with_env("QVARS_ghz", "/home/bob/.cache");
        assert_eq!(output.resolution, Resolution::Resolved(expected));
        assert_eq!(output.unknown_placeholders, vec!["${custom:thing}"]);
    }

    #[tokio::test]
    async fn test_cancelled() {
        let configuration = RunConfiguration::new("ghz", "python").with_arg("${command:abort}");
        let output = create_use_case().execute(&configuration).await.unwrap();
        assert!(output.resolution.is_cancelled());
    }

    #[tokio::test]
    async fn test_blank_program_after_resolution_is_invalid() {
        let configuration = RunConfiguration::new("ghz", "${command:pickProgram}");
        let err = create_use_case().execute(&configuration).await.unwrap_err();
        assert!(matches!(err, ApplicationError::Domain(_)));
    }

    #[tokio::test]
    async fn test_resolution_failure() {
        let configuration = RunConfiguration::new("ghz", "python").with_arg("${lineNumber}");
        let err = create_use_case().execute(&configuration).await.unwrap_err();
        match err {
            ApplicationError::Resolve(ResolveError::CanNotResolveLineNumber { token }) => {
                assert_eq!(token, "${lineNumber}");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn test_env_commands_run_in_file_order() {
        let configuration: RunConfiguration = serde_json::from_value(json!({
            "name": "ghz",
            "program": "python",
            "env": {"ZED": "${command:first}", "ALPHA": "${command:second}"}
        }))
        .unwrap();
        let provider = Arc::new(MockProvider::new());
        let use_case = ResolveRunConfiguration::new(
            VariableResolver::new(create_test_context()).with_shared_provider(provider.clone()),
        );

        let output = use_case.execute(&configuration).await.unwrap();

        assert_eq!(*provider.calls.lock().unwrap(), vec!["first", "second"]);
        let resolved = output.resolution.into_option().unwrap();
        let env: Vec<(&str, &str)> = resolved
            .env
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_str()))
            .collect();
        assert_eq!(env, vec![("ZED", "1"), ("ALPHA", "2")]);
    }

    #[tokio::test]
    async fn test_colliding_env_names_fail() {
        let configuration = RunConfiguration::new("ghz", "python")
            .with_env("OUT_${fileBasenameNoExtension}", "a")
            .with_env("OUT_ghz", "b");
        let err = create_use_case().execute(&configuration).await.unwrap_err();
        assert!(matches!(
            err,
            ApplicationError::Resolve(ResolveError::DuplicateKey { .. })
        ));
    }
}
