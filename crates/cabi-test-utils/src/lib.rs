//! Testing utilities for the C API generator workspace
//!
//! Shared definitions, a sample manifest and an on-disk fixture tree.

#![allow(missing_docs)]

use cabi_symbol::{
    ApiManifest, DefinitionRepository, DefinitionSource, FunctionComment, FunctionDef,
    FunctionGroup, VersionEntry,
};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

pub fn function(name: &str, return_type: &str) -> FunctionDef {
    FunctionDef::new(name, return_type)
}

pub fn group(key: &str, names: &[&str]) -> FunctionGroup {
    names
        .iter()
        .fold(FunctionGroup::new(key), |g, name| g.with_entry(function(name, "void")))
}

pub fn open_connect_group() -> FunctionGroup {
    FunctionGroup::new("open_connect")
        .with_entry(
            function("duckdb_open", "duckdb_state")
                .with_param("const char *", "path")
                .with_param("duckdb_database *", "out_database")
                .with_comment(
                    FunctionComment::new("Creates a new database or opens an existing database file stored at the given path.\n")
                        .with_param("path", "Path to the database file on disk, or `nullptr` or `:memory:` to open an in-memory database.")
                        .with_param("out_database", "The result database object.")
                        .with_return("`DuckDBSuccess` on success or `DuckDBError` on failure."),
                ),
        )
        .with_entry(
            function("duckdb_close", "void")
                .with_param("duckdb_database *", "database")
                .with_comment(
                    FunctionComment::new("Closes the specified database and de-allocates all memory allocated for that database.\n")
                        .with_param("database", "The database object to shut down."),
                ),
        )
}

pub fn helpers_group() -> FunctionGroup {
    FunctionGroup::new("helpers")
        .with_entry(function("duckdb_library_version", "const char *"))
        .with_entry(
            function("duckdb_free", "void")
                .with_param("void *", "ptr")
                .deprecated(),
        )
}

pub fn streaming_group() -> FunctionGroup {
    FunctionGroup::new("streaming_result_interface")
        .with_description("// Streaming results are deprecated in favour of chunked fetching.")
        .with_entry(
            function("duckdb_stream_fetch_chunk", "duckdb_data_chunk")
                .with_param("duckdb_result", "result")
                .deprecated(),
        )
        .deprecated()
}

/// Groups in load order, deliberately different from [`sample_order`].
pub fn sample_groups() -> Vec<FunctionGroup> {
    vec![helpers_group(), streaming_group(), open_connect_group()]
}

pub fn sample_order() -> Vec<String> {
    ["open_connect", "helpers", "streaming_result_interface"]
        .into_iter()
        .map(String::from)
        .collect()
}

pub fn sample_manifest() -> ApiManifest {
    ApiManifest::new(vec![
        VersionEntry::new(
            "v0.0.1",
            ["duckdb_open", "duckdb_close", "duckdb_library_version"],
        ),
        VersionEntry::new("v0.0.2", ["duckdb_free", "duckdb_stream_fetch_chunk"]),
    ])
}

pub fn sample_sources() -> Vec<DefinitionSource> {
    sample_groups()
        .into_iter()
        .map(|g| DefinitionSource::new(format!("functions/{}.json", g.group), g))
        .collect()
}

pub fn sample_repository() -> DefinitionRepository {
    DefinitionRepository::load(sample_sources()).unwrap()
}

pub const TEMPLATE: &str = "\
// Template preamble that is trimmed away
// DUCKDB_START_OF_HEADER
#pragma once

#ifdef __cplusplus
extern \"C\" {
#endif

// DUCKDB_FUNCTIONS_ARE_GENERATED_HERE

#ifdef __cplusplus
}
#endif
";

/// Paths inside a fixture tree written by [`write_fixture_tree`].
#[derive(Debug, Clone)]
pub struct FixtureTree {
    pub root: PathBuf,
    pub config: PathBuf,
    pub header: PathBuf,
    pub extension_header: PathBuf,
}

/// Write definition files, manifest, template and `headergen.toml` under `root`.
pub fn write_fixture_tree(root: &Path) -> io::Result<FixtureTree> {
    write_fixture_tree_with(root, &sample_groups(), &sample_manifest())
}

pub fn write_fixture_tree_with(
    root: &Path,
    groups: &[FunctionGroup],
    manifest: &ApiManifest,
) -> io::Result<FixtureTree> {
    let functions = root.join("functions");
    fs::create_dir_all(functions.join("nested"))?;
    fs::create_dir_all(root.join("apis"))?;

    for (i, group) in groups.iter().enumerate() {
        // alternate between the top level and a nested directory
        let dir = if i % 2 == 0 { functions.clone() } else { functions.join("nested") };
        write_json(&dir.join(format!("{}.json", group.group)), group)?;
    }
    write_json(&root.join("apis/extension_api_v0.json"), manifest)?;
    fs::write(root.join("header_base.hpp"), TEMPLATE)?;

    let order = sample_order()
        .iter()
        .map(|k| format!("\"{k}\""))
        .collect::<Vec<_>>()
        .join(", ");
    let config = root.join("headergen.toml");
    fs::write(
        &config,
        format!(
            "[inputs]\n\
             definitions = \"functions\"\n\
             manifest = \"apis/extension_api_v0.json\"\n\
             template = \"header_base.hpp\"\n\
             \n\
             [outputs]\n\
             header = \"out/duckdb.h\"\n\
             extension_header = \"out/duckdb_extension.h\"\n\
             \n\
             [layout]\n\
             group_order = [{order}]\n"
        ),
    )?;

    Ok(FixtureTree {
        root: root.to_path_buf(),
        config,
        header: root.join("out/duckdb.h"),
        extension_header: root.join("out/duckdb_extension.h"),
    })
}

fn write_json<T: serde::Serialize>(path: &Path, value: &T) -> io::Result<()> {
    let json = serde_json::to_string_pretty(value).map_err(io::Error::other)?;
    fs::write(path, json)
}
