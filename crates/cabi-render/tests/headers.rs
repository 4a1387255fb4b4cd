//! End-to-end rendering of the sample API into both headers.
//!
//! These tests compare whole artifacts byte for byte: any change in spacing,
//! guard placement or struct order shows up as a readable diff.

use cabi_render::{
    AbiStructBuilder, DeclarationRenderer, DeprecationGuard, ExtensionHeaderAssembler,
    HeaderAssembler, RenderConfig,
};
use cabi_symbol::{AbiLayout, FunctionDef, FunctionGroup};
use cabi_test_utils::{sample_manifest, sample_order, sample_repository};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

const STRUCT: &str = "\
typedef struct {
    // Version v0.0.1
    duckdb_state (*duckdb_open)(const char *path, duckdb_database *out_database);
    void (*duckdb_close)(duckdb_database *database);
    const char * (*duckdb_library_version)();
    // Version v0.0.2
    void (*duckdb_free)(void *ptr);
    duckdb_data_chunk (*duckdb_stream_fetch_chunk)(duckdb_result result);
} duckdb_ext_api_v0;

";

const DECLARATIONS: &str = "\
//===--------------------------------------------------------------------===//
// Open Connect
//===--------------------------------------------------------------------===//

/*!
Creates a new database or opens an existing database file stored at the given path.
* path: Path to the database file on disk, or `nullptr` or `:memory:` to open an in-memory database.
* out_database: The result database object.
* returns: `DuckDBSuccess` on success or `DuckDBError` on failure.
*/
DUCKDB_API duckdb_state duckdb_open(const char *path, duckdb_database *out_database);

/*!
Closes the specified database and de-allocates all memory allocated for that database.
* database: The database object to shut down.
*/
DUCKDB_API void duckdb_close(duckdb_database *database);

//===--------------------------------------------------------------------===//
// Helpers
//===--------------------------------------------------------------------===//

DUCKDB_API const char *duckdb_library_version();

#ifndef DUCKDB_API_NO_DEPRECATED
DUCKDB_API void duckdb_free(void *ptr);
#endif

//===--------------------------------------------------------------------===//
// Streaming Result Interface
//===--------------------------------------------------------------------===//

// Streaming results are deprecated in favour of chunked fetching.
#ifndef DUCKDB_API_NO_DEPRECATED
#ifndef DUCKDB_API_NO_DEPRECATED
DUCKDB_API duckdb_data_chunk duckdb_stream_fetch_chunk(duckdb_result result);
#endif

#endif
";

const REDIRECTS: &str = "\
//! helpers
#define duckdb_library_version duckdb_ext_api->duckdb_library_version
#ifndef DUCKDB_API_NO_DEPRECATED
#define duckdb_free duckdb_ext_api->duckdb_free
#endif

//! streaming_result_interface
#ifndef DUCKDB_API_NO_DEPRECATED
#ifndef DUCKDB_API_NO_DEPRECATED
#define duckdb_stream_fetch_chunk duckdb_ext_api->duckdb_stream_fetch_chunk
#endif
#endif

//! open_connect
#define duckdb_open duckdb_ext_api->duckdb_open
#define duckdb_close duckdb_ext_api->duckdb_close

";

const BOOTSTRAP: &str = "\
// Place in global scope of C/C++ file that contains the `init` function
#define DUCKDB_EXTENSION_MAIN const duckdb_ext_api_v0 *duckdb_ext_api = 0;
// First line in the `init` function should load the api struct using this function
#define DUCKDB_EXTENSION_LOAD_API(v) duckdb_ext_api = v;
// Place in global scope of any C/C++ file that needs to access the extension API
#define DUCKDB_EXTENSION_EXTERN extern const duckdb_ext_api_v0 *duckdb_ext_api;
";

const CONSTRUCTOR: &str = "\
inline duckdb_ext_api_v0 CreateApi() {
    return {
        duckdb_open,
        duckdb_close,
        duckdb_library_version,
        duckdb_free,
        duckdb_stream_fetch_chunk,
    };
}

";

#[test]
fn public_header_matches_expected_text() {
    let config = RenderConfig::new();
    let repo = sample_repository();
    let manifest = sample_manifest();

    let out = HeaderAssembler::new(&config)
        .assemble(repo.groups(), &sample_order(), &manifest.version_entries, &repo)
        .unwrap();

    assert_eq!(out, format!("{DECLARATIONS}\n\n{STRUCT}{CONSTRUCTOR}"));
}

#[test]
fn extension_header_matches_expected_text() {
    let config = RenderConfig::new();
    let repo = sample_repository();
    let manifest = sample_manifest();

    let out = ExtensionHeaderAssembler::new(&config)
        .assemble(repo.groups(), &manifest.version_entries, &repo)
        .unwrap();

    assert_eq!(out, format!("{STRUCT}\n\n{REDIRECTS}{BOOTSTRAP}"));
}

#[test]
fn both_headers_share_one_struct_layout() {
    let config = RenderConfig::new();
    let repo = sample_repository();
    let manifest = sample_manifest();

    let public = HeaderAssembler::new(&config)
        .assemble(repo.groups(), &sample_order(), &manifest.version_entries, &repo)
        .unwrap();
    let extension = ExtensionHeaderAssembler::new(&config)
        .assemble(repo.groups(), &manifest.version_entries, &repo)
        .unwrap();
    let table = AbiStructBuilder::new(&config)
        .build_struct(&manifest.version_entries, &repo)
        .unwrap();

    assert!(public.contains(&table));
    assert!(extension.starts_with(&table));
}

#[test]
fn canonical_order_drives_banner_sequence() {
    let config = RenderConfig::new();
    let repo = sample_repository();

    let out = HeaderAssembler::new(&config)
        .assemble_declarations(repo.groups(), &sample_order())
        .unwrap();

    let banners: Vec<_> = out
        .lines()
        .filter(|l| l.starts_with("// ") && !l.starts_with("//="))
        .filter(|l| !l.starts_with("// Streaming results"))
        .collect();
    assert_eq!(
        banners,
        ["// Open Connect", "// Helpers", "// Streaming Result Interface"]
    );
}

fn guard_pairs(group_deprecated: bool, function_deprecated: bool) -> usize {
    let config = RenderConfig::new()
        .with_api_prefix("")
        .with_guard(DeprecationGuard::new("#ifndef NO_DEPRECATED", "#endif"));
    let mut function = FunctionDef::new("f", "void");
    function.deprecated = function_deprecated;
    let mut group = FunctionGroup::new("g").with_entry(function);
    group.deprecated = group_deprecated;

    let out = HeaderAssembler::new(&config)
        .assemble_declarations(&[group], &["g"])
        .unwrap();
    let starts = out.matches("#ifndef NO_DEPRECATED\n").count();
    let ends = out.matches("#endif\n").count();
    assert_eq!(starts, ends, "unbalanced guards in:\n{out}");
    starts
}

#[test]
fn deprecation_guards_nest_independently() {
    assert_eq!(guard_pairs(false, false), 0);
    assert_eq!(guard_pairs(true, false), 1);
    assert_eq!(guard_pairs(false, true), 1);
    assert_eq!(guard_pairs(true, true), 2);
}

#[test]
fn nested_guards_wrap_entry_inside_group() {
    let config = RenderConfig::new().with_api_prefix("");
    let group = FunctionGroup::new("g")
        .with_entry(FunctionDef::new("f", "void").deprecated())
        .deprecated();

    let out = HeaderAssembler::new(&config)
        .assemble_declarations(&[group], &["g"])
        .unwrap();
    assert!(out.ends_with(
        "#ifndef DUCKDB_API_NO_DEPRECATED\n\
         #ifndef DUCKDB_API_NO_DEPRECATED\n\
         void f();\n\
         #endif\n\
         \n\
         #endif\n"
    ));
}

#[test]
fn default_instance_matches_struct_field_order() {
    let config = RenderConfig::new();
    let manifest = sample_manifest();
    let layout = AbiLayout::from_versions(&manifest.version_entries).unwrap();

    let ctor = AbiStructBuilder::new(&config).build_default_instance(&layout);
    assert_eq!(ctor, CONSTRUCTOR);
}

fn c_ident() -> impl Strategy<Value = String> {
    "[a-z_][a-z0-9_]{0,12}"
}

fn c_type() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("int".to_string()),
        Just("const char *".to_string()),
        Just("duckdb_database *".to_string()),
        Just("idx_t".to_string()),
        Just("void *".to_string()),
    ]
}

fn function_def() -> impl Strategy<Value = FunctionDef> {
    (
        c_ident(),
        c_type(),
        proptest::collection::vec((c_type(), c_ident()), 0..5),
        any::<bool>(),
    )
        .prop_map(|(name, ret, params, deprecated)| {
            let mut f = params
                .into_iter()
                .fold(FunctionDef::new(name, ret), |f, (ty, n)| f.with_param(ty, n));
            f.deprecated = deprecated;
            f
        })
}

proptest! {
    #[test]
    fn prop_rendering_is_deterministic(function in function_def()) {
        let config = RenderConfig::new();
        let a = DeclarationRenderer::new(&config);
        let b = DeclarationRenderer::new(&config);

        prop_assert_eq!(a.declaration(&function), b.declaration(&function));
        prop_assert_eq!(a.struct_member(&function), b.struct_member(&function));
        prop_assert_eq!(a.redirect_macro(&function), b.redirect_macro(&function));
        prop_assert_eq!(a.doc(&function).unwrap(), b.doc(&function).unwrap());
    }

    #[test]
    fn prop_declaration_never_doubles_spaces(function in function_def()) {
        let config = RenderConfig::new().with_api_prefix("");
        let declaration = DeclarationRenderer::new(&config).declaration(&function);

        prop_assert!(!declaration.contains("  "));
        prop_assert!(!declaration.contains("* "), "pointer marker followed by space: {}", declaration);
        prop_assert!(declaration.ends_with(");"));
    }
}
