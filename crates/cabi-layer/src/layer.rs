//! Generator Layer implementation
//!
//! Three stages, each usable on its own:
//! - [`GeneratorLayer::ingress`] reads definitions, manifest and template
//! - [`GeneratorLayer::assemble`] validates and renders both headers in memory
//! - [`GeneratorLayer::egress`] writes both headers
//!
//! Nothing is written unless both headers assembled without error.

use crate::config::GeneratorConfig;
use crate::error::{GeneratorResult, ParseError, WriteError};
use crate::parsers::{discover_files, GroupParser, ManifestParser, SourceParser};
use crate::template::{file_banner, HeaderTemplate};
use cabi_render::{ExtensionHeaderAssembler, HeaderAssembler};
use cabi_symbol::{AbiLayout, ApiManifest, ConsistencyValidator, DefinitionRepository};
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::{debug, info};

/// Everything read from disk for one run
#[derive(Debug, Clone)]
pub struct LoadedApi {
    /// Loaded function groups
    pub repository: DefinitionRepository,

    /// Version manifest
    pub manifest: ApiManifest,

    /// Header template
    pub template: HeaderTemplate,
}

impl LoadedApi {
    /// Bundle already loaded inputs with a passthrough template
    #[inline]
    #[must_use]
    pub fn new(repository: DefinitionRepository, manifest: ApiManifest) -> Self {
        Self {
            repository,
            manifest,
            template: HeaderTemplate::passthrough(),
        }
    }

    /// Replace the template
    #[must_use]
    pub fn with_template(mut self, template: HeaderTemplate) -> Self {
        self.template = template;
        self
    }
}

/// Both headers, fully rendered
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedHeaders {
    /// Public header text
    pub header: String,

    /// Extension header text
    pub extension_header: String,

    /// Struct layout both headers were rendered from
    pub layout: AbiLayout,
}

/// The generator pipeline over one configuration
#[derive(Debug, Clone)]
pub struct GeneratorLayer {
    config: GeneratorConfig,
    validator: ConsistencyValidator,
}

impl GeneratorLayer {
    /// Create layer from a loaded config
    #[inline]
    #[must_use]
    pub fn new(config: GeneratorConfig) -> Self {
        Self {
            config,
            validator: ConsistencyValidator::new(),
        }
    }

    /// Load config from `path` and create the layer
    ///
    /// # Errors
    /// Any [`crate::ConfigError`] from loading.
    pub fn from_config_file(path: impl AsRef<Path>) -> GeneratorResult<Self> {
        Ok(Self::new(GeneratorConfig::load(path)?))
    }

    /// Active configuration
    #[inline]
    #[must_use]
    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Read definitions, manifest and template
    ///
    /// # Errors
    /// - [`ParseError`] for unreadable or malformed inputs
    /// - [`cabi_symbol::RepositoryError`] for duplicate groups or functions
    /// - [`crate::TemplateError`] for a template without its marks
    pub fn ingress(&self) -> GeneratorResult<LoadedApi> {
        let root = self.config.definitions_dir();
        let group_parser = GroupParser::new();
        let files = discover_files(&root, &group_parser)?;
        if files.is_empty() {
            return Err(ParseError::NoDefinitions(root).into());
        }

        let sources = files
            .iter()
            .map(|path| group_parser.parse_file(path))
            .collect::<Result<Vec<_>, _>>()?;
        let repository = DefinitionRepository::load(sources)?;

        let manifest = ManifestParser::new().parse_file(&self.config.manifest_path())?;

        let template = match self.config.template_path() {
            Some(path) => {
                let content = std::fs::read_to_string(&path)
                    .map_err(|e| ParseError::io_error(&path, e))?;
                HeaderTemplate::parse(&path, &content, &self.config.markers)?
            }
            None => HeaderTemplate::passthrough(),
        };

        info!(
            files = files.len(),
            groups = repository.groups().len(),
            functions = repository.len(),
            versions = manifest.version_entries.len(),
            "loaded API definitions"
        );
        Ok(LoadedApi {
            repository,
            manifest,
            template,
        })
    }

    /// Validate and render both headers in memory
    ///
    /// # Errors
    /// - [`cabi_symbol::ValidationError`] for inconsistent definitions
    /// - [`cabi_render::RenderError`] for rendering failures
    pub fn assemble(&self, api: &LoadedApi) -> GeneratorResult<GeneratedHeaders> {
        let groups = api.repository.groups();
        let order = &self.config.layout.group_order;
        let versions = &api.manifest.version_entries;

        let layout = self
            .validator
            .validate(groups, order, versions, &api.repository)?;

        let render_config = self.config.render_config();
        let header_body =
            HeaderAssembler::new(&render_config).assemble(groups, order, versions, &api.repository)?;
        let extension_body = ExtensionHeaderAssembler::new(&render_config).assemble(
            groups,
            versions,
            &api.repository,
        )?;

        let project = &self.config.naming.project;
        let header = api.template.render(
            &file_banner(project, &self.config.header_path()),
            &header_body,
        );
        let extension_header = api.template.render(
            &file_banner(project, &self.config.extension_header_path()),
            &extension_body,
        );

        debug!(
            fields = layout.len(),
            header_bytes = header.len(),
            extension_bytes = extension_header.len(),
            "assembled headers"
        );
        Ok(GeneratedHeaders {
            header,
            extension_header,
            layout,
        })
    }

    /// Write both headers
    ///
    /// Each header is first staged in a temporary file next to its target;
    /// targets are replaced only once both are staged.
    ///
    /// # Errors
    /// [`WriteError`] if staging or the final rename fails.
    pub fn egress(&self, headers: &GeneratedHeaders) -> GeneratorResult<()> {
        let targets = [
            (self.config.header_path(), headers.header.as_str()),
            (self.config.extension_header_path(), headers.extension_header.as_str()),
        ];

        let staged = targets
            .iter()
            .map(|(path, content)| stage(path, content).map(|file| (file, path)))
            .collect::<Result<Vec<_>, _>>()?;

        for (file, path) in staged {
            file.persist(path)
                .map_err(|e| WriteError::io_error(path, e.error))?;
            info!(path = %path.display(), "wrote header");
        }
        Ok(())
    }

    /// Ingress and assembly without writing
    ///
    /// # Errors
    /// Any error from [`Self::ingress`] or [`Self::assemble`].
    pub fn check(&self) -> GeneratorResult<GeneratedHeaders> {
        let api = self.ingress()?;
        self.assemble(&api)
    }

    /// Full pipeline: ingress, assembly, egress
    ///
    /// # Errors
    /// The first error of any stage; on error no output is touched.
    pub fn run(&self) -> GeneratorResult<GeneratedHeaders> {
        let headers = self.check()?;
        self.egress(&headers)?;
        Ok(headers)
    }
}

fn stage(path: &Path, content: &str) -> Result<NamedTempFile, WriteError> {
    let dir = output_dir(path);
    std::fs::create_dir_all(&dir).map_err(|e| WriteError::io_error(&dir, e))?;

    let mut builder = tempfile::Builder::new();
    builder.prefix(".cabi-gen");
    // new headers get the same umask-filtered mode as a plain create
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        builder.permissions(std::fs::Permissions::from_mode(0o666));
    }

    let mut file = builder
        .tempfile_in(&dir)
        .map_err(|e| WriteError::io_error(&dir, e))?;

    // regenerated headers keep the mode of the file they replace
    if let Ok(existing) = std::fs::metadata(path) {
        file.as_file()
            .set_permissions(existing.permissions())
            .map_err(|e| WriteError::io_error(path, e))?;
    }

    file.write_all(content.as_bytes())
        .and_then(|()| file.flush())
        .map_err(|e| WriteError::io_error(path, e))?;
    Ok(file)
}

fn output_dir(path: &Path) -> PathBuf {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cabi_test_utils::{sample_manifest, sample_repository};

    fn layer(base: &Path) -> GeneratorLayer {
        let config = GeneratorConfig::from_toml_str(
            r#"
[inputs]
definitions = "functions"
manifest = "api.json"

[outputs]
header = "out/duckdb.h"
extension_header = "out/duckdb_extension.h"

[layout]
group_order = ["open_connect", "helpers", "streaming_result_interface"]
"#,
            base,
        )
        .unwrap();
        GeneratorLayer::new(config)
    }

    #[test]
    fn assemble_in_memory() {
        let layer = layer(Path::new("/unused"));
        let api = LoadedApi::new(sample_repository(), sample_manifest());

        let headers = layer.assemble(&api).unwrap();
        assert!(headers.header.starts_with("//===---"));
        assert!(headers.header.contains("// duckdb.h\n"));
        assert!(headers.extension_header.contains("// duckdb_extension.h\n"));
        assert_eq!(headers.layout.len(), 5);
    }

    #[test]
    fn egress_creates_output_directory() {
        let dir = tempfile::tempdir().unwrap();
        let layer = layer(dir.path());
        let headers = GeneratedHeaders {
            header: "H".to_string(),
            extension_header: "E".to_string(),
            layout: AbiLayout::default(),
        };

        layer.egress(&headers).unwrap();
        assert_eq!(std::fs::read_to_string(dir.path().join("out/duckdb.h")).unwrap(), "H");
        assert_eq!(
            std::fs::read_to_string(dir.path().join("out/duckdb_extension.h")).unwrap(),
            "E"
        );
    }

    #[test]
    fn egress_leaves_no_temporary_files() {
        let dir = tempfile::tempdir().unwrap();
        let layer = layer(dir.path());
        let headers = GeneratedHeaders {
            header: String::new(),
            extension_header: String::new(),
            layout: AbiLayout::default(),
        };

        layer.egress(&headers).unwrap();
        let mut names: Vec<_> = std::fs::read_dir(dir.path().join("out"))
            .unwrap()
            .map(|e| e.unwrap().file_name().into_string().unwrap())
            .collect();
        names.sort();
        assert_eq!(names, ["duckdb.h", "duckdb_extension.h"]);
    }

    #[test]
    fn output_dir_of_bare_file_name() {
        assert_eq!(output_dir(Path::new("duckdb.h")), PathBuf::from("."));
        assert_eq!(output_dir(Path::new("out/duckdb.h")), PathBuf::from("out"));
    }
}
