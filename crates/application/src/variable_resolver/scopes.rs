//! Scope resolvers
//!
//! One strategy per scope name, looked up in a [`ScopeRegistry`]. Resolvers
//! are synchronous: command values are computed beforehand and handed in
//! through [`ScopeInput`].

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use qvars_domain::{ConfigValue, WorkspaceFolder};

use super::commands::CommandValueMap;
use super::context::ResolutionContext;
use super::parser::Token;
use crate::error::{ResolveError, ResolveResult};

/// What a resolver gets to look at.
#[derive(Debug, Clone, Copy)]
pub struct ScopeInput<'a> {
    /// The session snapshot.
    pub context: &'a ResolutionContext,

    /// Command values, if the command pass produced any.
    pub commands: Option<&'a CommandValueMap>,
}

/// Resolves tokens of one scope to their substitution text.
pub trait ScopeResolver: Send + Sync {
    /// Returns the replacement text for `token`.
    ///
    /// # Errors
    /// Returns a `ResolveError` if the token cannot be resolved; the whole
    /// resolution is abandoned.
    fn resolve(&self, token: &Token, input: &ScopeInput<'_>) -> ResolveResult<String>;
}

impl<F> ScopeResolver for F
where
    F: Fn(&Token, &ScopeInput<'_>) -> ResolveResult<String> + Send + Sync,
{
    fn resolve(&self, token: &Token, input: &ScopeInput<'_>) -> ResolveResult<String> {
        self(token, input)
    }
}

/// Maps scope names to resolvers.
#[derive(Clone, Default)]
pub struct ScopeRegistry {
    resolvers: HashMap<String, Arc<dyn ScopeResolver>>,
}

impl ScopeRegistry {
    /// Creates a registry with no scopes.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Creates a registry with every built-in scope.
    #[must_use]
    pub fn standard() -> Self {
        let mut registry = Self::empty();
        registry.register("env", resolve_env);
        registry.register("config", resolve_config);
        registry.register("command", resolve_command);
        registry.register("input", not_implemented);
        registry.register("execPath", not_implemented);
        registry.register("workspaceRoot", resolve_workspace_folder);
        registry.register("workspaceFolder", resolve_workspace_folder);
        registry.register("workspaceRootFolderName", resolve_workspace_folder_basename);
        registry.register("workspaceFolderBasename", resolve_workspace_folder_basename);
        registry.register("cwd", resolve_cwd);
        registry.register("file", resolve_file);
        registry.register("relativeFile", resolve_relative_file);
        registry.register("fileDirname", resolve_file_dirname);
        registry.register("fileExtname", resolve_file_extname);
        registry.register("fileBasename", resolve_file_basename);
        registry.register("fileBasenameNoExtension", resolve_file_basename_no_extension);
        registry.register("lineNumber", resolve_line_number);
        registry.register("selectedText", resolve_selected_text);
        registry
    }

    /// Registers `resolver` under `scope`, replacing any previous one.
    pub fn register(&mut self, scope: impl Into<String>, resolver: impl ScopeResolver + 'static) {
        self.resolvers.insert(scope.into(), Arc::new(resolver));
    }

    /// Builder form of [`register`](Self::register).
    #[must_use]
    pub fn with(mut self, scope: impl Into<String>, resolver: impl ScopeResolver + 'static) -> Self {
        self.register(scope, resolver);
        self
    }

    /// Returns the resolver for `scope`.
    #[must_use]
    pub fn get(&self, scope: &str) -> Option<&dyn ScopeResolver> {
        self.resolvers.get(scope).map(Arc::as_ref)
    }

    /// Whether a resolver is registered for `scope`.
    #[must_use]
    pub fn is_known(&self, scope: &str) -> bool {
        self.resolvers.contains_key(scope)
    }

    /// Registered scope names, sorted.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.resolvers.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl fmt::Debug for ScopeRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScopeRegistry")
            .field("scopes", &self.names())
            .finish()
    }
}

fn resolve_env(token: &Token, input: &ScopeInput<'_>) -> ResolveResult<String> {
    let Some(name) = token.non_empty_argument() else {
        return Err(ResolveError::MissingEnvVarName {
            token: token.match_text.clone(),
        });
    };
    // Unset variables expand to nothing, like in a shell.
    Ok(input
        .context
        .environment()
        .get(name)
        .unwrap_or_default()
        .to_string())
}

fn resolve_config(token: &Token, input: &ScopeInput<'_>) -> ResolveResult<String> {
    let Some(key) = token.non_empty_argument() else {
        return Err(ResolveError::MissingConfigName {
            token: token.match_text.clone(),
        });
    };
    // An empty string counts as unset.
    let value = input
        .context
        .config_value(key)
        .filter(|value| !matches!(value, ConfigValue::String(s) if s.is_empty()))
        .ok_or_else(|| ResolveError::ConfigNotFound {
            token: token.match_text.clone(),
            key: key.to_string(),
        })?;
    value.as_scalar_text().ok_or_else(|| ResolveError::ConfigNotString {
        token: token.match_text.clone(),
        key: key.to_string(),
    })
}

fn resolve_command(token: &Token, input: &ScopeInput<'_>) -> ResolveResult<String> {
    let Some(commands) = input.commands else {
        return Err(ResolveError::CommandNoMapping {
            token: token.match_text.clone(),
        });
    };
    let Some(command_id) = token.argument.as_deref() else {
        return Ok(token.match_text.clone());
    };
    commands
        .get(command_id)
        .map(str::to_string)
        .ok_or_else(|| ResolveError::NoValueForCommand {
            token: token.match_text.clone(),
        })
}

fn not_implemented(token: &Token, _input: &ScopeInput<'_>) -> ResolveResult<String> {
    Err(ResolveError::NotImplemented {
        token: token.match_text.clone(),
    })
}

/// Picks the folder a folder-relative token refers to.
///
/// A named folder wins if it exists; otherwise the only open folder is used.
fn select_folder<'a>(token: &Token, context: &'a ResolutionContext) -> ResolveResult<&'a WorkspaceFolder> {
    let folders = context.workspace_folders();

    if let Some(name) = token.non_empty_argument() {
        if folders.is_empty() {
            return Err(ResolveError::CanNotFindFolder {
                token: token.match_text.clone(),
                folder: name.to_string(),
            });
        }
        if let Some(folder) = folders.iter().rev().find(|f| f.name == name) {
            return Ok(folder);
        }
    }

    match folders {
        [only] => Ok(only),
        _ => Err(ResolveError::CanNotResolveWorkspace {
            token: token.match_text.clone(),
        }),
    }
}

fn resolve_workspace_folder(token: &Token, input: &ScopeInput<'_>) -> ResolveResult<String> {
    let folder = select_folder(token, input.context)?;
    Ok(input.context.platform().normalize_drive_letter(&folder.root_path))
}

fn resolve_workspace_folder_basename(token: &Token, input: &ScopeInput<'_>) -> ResolveResult<String> {
    let folder = select_folder(token, input.context)?;
    Ok(input.context.platform().basename(&folder.root_path))
}

fn resolve_cwd(token: &Token, input: &ScopeInput<'_>) -> ResolveResult<String> {
    let platform = input.context.platform();
    let path = select_folder(token, input.context)
        .map_or_else(|_| input.context.cwd(), |folder| folder.root_path.as_str());
    Ok(platform.normalize_drive_letter(path))
}

fn active_path<'a>(input: &ScopeInput<'a>) -> Option<&'a str> {
    input.context.active_file().map(|file| file.path.as_str())
}

fn resolve_file(_token: &Token, input: &ScopeInput<'_>) -> ResolveResult<String> {
    Ok(active_path(input).unwrap_or_default().to_string())
}

fn resolve_relative_file(token: &Token, input: &ScopeInput<'_>) -> ResolveResult<String> {
    let folder = select_folder(token, input.context)?;
    Ok(active_path(input)
        .map(|path| input.context.platform().relative(&folder.root_path, path))
        .unwrap_or_default())
}

fn resolve_file_dirname(_token: &Token, input: &ScopeInput<'_>) -> ResolveResult<String> {
    Ok(active_path(input)
        .map(|path| input.context.platform().dirname(path))
        .unwrap_or_default())
}

fn resolve_file_extname(_token: &Token, input: &ScopeInput<'_>) -> ResolveResult<String> {
    Ok(active_path(input)
        .map(|path| input.context.platform().extname(path))
        .unwrap_or_default())
}

fn resolve_file_basename(_token: &Token, input: &ScopeInput<'_>) -> ResolveResult<String> {
    Ok(active_path(input)
        .map(|path| input.context.platform().basename(path))
        .unwrap_or_default())
}

fn resolve_file_basename_no_extension(_token: &Token, input: &ScopeInput<'_>) -> ResolveResult<String> {
    Ok(active_path(input)
        .map(|path| input.context.platform().basename_no_extension(path))
        .unwrap_or_default())
}

fn resolve_line_number(token: &Token, input: &ScopeInput<'_>) -> ResolveResult<String> {
    input
        .context
        .active_file()
        .and_then(|file| file.selection.as_ref())
        .map(|selection| selection.line.to_string())
        .ok_or_else(|| ResolveError::CanNotResolveLineNumber {
            token: token.match_text.clone(),
        })
}

fn resolve_selected_text(token: &Token, input: &ScopeInput<'_>) -> ResolveResult<String> {
    input
        .context
        .active_file()
        .and_then(|file| file.selected_text())
        .map(str::to_string)
        .ok_or_else(|| ResolveError::CanNotResolveSelectedText {
            token: token.match_text.clone(),
        })
}
