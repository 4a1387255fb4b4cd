//! `headergen.toml` configuration
//!
//! Paths in the file are relative to the directory containing it. Only
//! `[inputs]`, `[outputs]` and `[layout]` are required; every other section
//! falls back to the DuckDB defaults.

use crate::error::ConfigError;
use crate::template::TemplateMarks;
use cabi_render::{BootstrapMacros, DeprecationGuard, DocPolicy, RenderConfig};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Input locations
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct InputsConfig {
    /// Directory scanned recursively for `*.json` definition files
    pub definitions: PathBuf,

    /// Version manifest file
    pub manifest: PathBuf,

    /// Optional header template
    #[serde(default)]
    pub template: Option<PathBuf>,
}

/// Output locations
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct OutputsConfig {
    /// Public header
    pub header: PathBuf,

    /// Extension header
    pub extension_header: PathBuf,
}

/// Names used in the generated C code
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct NamingConfig {
    /// Project title shown in the file banner
    pub project: String,
    /// Prefix of public declarations
    pub api_prefix: String,
    /// Function-pointer table type
    pub struct_name: String,
    /// Global table pointer
    pub pointer_name: String,
    /// Default-instance constructor
    pub create_fn: String,
    /// Macro defining the table pointer
    pub main_macro: String,
    /// Macro loading the table pointer
    pub load_macro: String,
    /// Macro declaring the table pointer extern
    pub extern_macro: String,
}

impl Default for NamingConfig {
    fn default() -> Self {
        let render = RenderConfig::default();
        Self {
            project: "DuckDB".to_string(),
            api_prefix: render.api_prefix,
            struct_name: render.struct_name,
            pointer_name: render.pointer_name,
            create_fn: render.create_fn,
            main_macro: render.bootstrap.main,
            load_macro: render.bootstrap.load_api,
            extern_macro: render.bootstrap.extern_decl,
        }
    }
}

/// Documentation policy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DocsConfig {
    /// Skip undocumented parameters instead of failing
    pub allow_uncommented_params: bool,
}

impl Default for DocsConfig {
    fn default() -> Self {
        Self {
            allow_uncommented_params: true,
        }
    }
}

/// Header layout
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LayoutConfig {
    /// Canonical group order of the public header
    pub group_order: Vec<String>,
}

/// Complete generator configuration
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GeneratorConfig {
    /// Input locations
    pub inputs: InputsConfig,

    /// Output locations
    pub outputs: OutputsConfig,

    /// C names
    #[serde(default)]
    pub naming: NamingConfig,

    /// Deprecation guard markers
    #[serde(default)]
    pub guards: DeprecationGuard,

    /// Template marks
    #[serde(default)]
    pub markers: TemplateMarks,

    /// Documentation policy
    #[serde(default)]
    pub docs: DocsConfig,

    /// Header layout
    pub layout: LayoutConfig,

    /// Directory relative paths resolve against
    #[serde(skip)]
    base_dir: PathBuf,
}

impl GeneratorConfig {
    /// Load and validate a config file
    ///
    /// # Errors
    /// Returns [`ConfigError`] if the file cannot be read, is not valid
    /// TOML, or fails validation.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let mut config: Self = toml::from_str(&content).map_err(|source| ConfigError::Toml {
            path: path.to_path_buf(),
            source,
        })?;
        config.base_dir = path.parent().map(Path::to_path_buf).unwrap_or_default();
        config.validate()?;

        tracing::debug!(config = %path.display(), groups = config.layout.group_order.len(), "loaded config");
        Ok(config)
    }

    /// Parse config from a string with an explicit base directory
    ///
    /// # Errors
    /// - [`ConfigError::Toml`] if `content` is not a valid config document
    /// - [`ConfigError::Invalid`] if a required value is empty
    pub fn from_toml_str(content: &str, base_dir: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        let mut config: Self = toml::from_str(content).map_err(|source| ConfigError::Toml {
            path: PathBuf::from("<inline>"),
            source,
        })?;
        config.base_dir = base_dir.into();
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.layout.group_order.is_empty() {
            return Err(ConfigError::Invalid("layout.group_order is empty".to_string()));
        }
        for (key, value) in [
            ("naming.struct_name", &self.naming.struct_name),
            ("naming.pointer_name", &self.naming.pointer_name),
            ("naming.create_fn", &self.naming.create_fn),
            ("guards.start", &self.guards.start),
            ("guards.end", &self.guards.end),
        ] {
            if value.trim().is_empty() {
                return Err(ConfigError::Invalid(format!("{key} is empty")));
            }
        }
        Ok(())
    }

    /// Resolve a path against the config directory
    #[must_use]
    pub fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.base_dir.join(path)
        }
    }

    /// Definition directory
    #[must_use]
    pub fn definitions_dir(&self) -> PathBuf {
        self.resolve(&self.inputs.definitions)
    }

    /// Version manifest path
    #[must_use]
    pub fn manifest_path(&self) -> PathBuf {
        self.resolve(&self.inputs.manifest)
    }

    /// Template path, if configured
    #[must_use]
    pub fn template_path(&self) -> Option<PathBuf> {
        self.inputs.template.as_deref().map(|p| self.resolve(p))
    }

    /// Public header output path
    #[must_use]
    pub fn header_path(&self) -> PathBuf {
        self.resolve(&self.outputs.header)
    }

    /// Extension header output path
    #[must_use]
    pub fn extension_header_path(&self) -> PathBuf {
        self.resolve(&self.outputs.extension_header)
    }

    /// Force the strict documentation policy
    #[must_use]
    pub fn with_strict_docs(mut self) -> Self {
        self.docs.allow_uncommented_params = false;
        self
    }

    /// Override the public header output
    #[must_use]
    pub fn with_header_output(mut self, path: impl Into<PathBuf>) -> Self {
        self.outputs.header = path.into();
        self
    }

    /// Override the extension header output
    #[must_use]
    pub fn with_extension_header_output(mut self, path: impl Into<PathBuf>) -> Self {
        self.outputs.extension_header = path.into();
        self
    }

    /// Renderer settings derived from this config
    #[must_use]
    pub fn render_config(&self) -> RenderConfig {
        RenderConfig {
            api_prefix: self.naming.api_prefix.clone(),
            struct_name: self.naming.struct_name.clone(),
            pointer_name: self.naming.pointer_name.clone(),
            create_fn: self.naming.create_fn.clone(),
            guard: self.guards.clone(),
            doc_policy: DocPolicy::from_allow_uncommented(self.docs.allow_uncommented_params),
            bootstrap: BootstrapMacros {
                main: self.naming.main_macro.clone(),
                load_api: self.naming.load_macro.clone(),
                extern_decl: self.naming.extern_macro.clone(),
            },
        }
    }
}
