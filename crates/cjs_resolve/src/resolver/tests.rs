use super::*;
use crate::{MemoryFileSystem, SearchOrder};
use cjs_builtins::NameList;
use pretty_assertions::assert_eq;

struct Fixture {
    builtins: NameList,
    fs: MemoryFileSystem,
    config: ResolverConfig,
}

impl Fixture {
    fn new<'f>(files: impl IntoIterator<Item = (&'f str, &'f str)>) -> Self {
        Fixture {
            builtins: NameList::new(["fs", "path", "module"]),
            fs: MemoryFileSystem::with_files(files),
            config: ResolverConfig::default(),
        }
    }

    fn resolver(&self) -> Resolver<'_> {
        Resolver::new(&self.builtins, &self.fs, &self.config)
    }

    fn resolve(&self, request: &str, base: &str) -> Result<Resolved, ModuleNotFound> {
        self.resolver().resolve(request, Path::new(base))
    }

    fn resolve_path(&self, request: &str, base: &str) -> PathBuf {
        match self.resolve(request, base).unwrap() {
            Resolved::File(path) => path,
            Resolved::Builtin(name) => panic!("expected a file, got builtin {name}"),
        }
    }
}

// Builtins

#[test]
fn test_builtin_resolves_to_itself() {
    let fixture = Fixture::new([]);
    for name in ["fs", "path", "module"] {
        assert_eq!(
            fixture.resolve(name, "/anywhere").unwrap(),
            Resolved::Builtin(name.to_string())
        );
        let prefixed = format!("node:{name}");
        assert_eq!(
            fixture.resolve(&prefixed, "/anywhere").unwrap(),
            Resolved::Builtin(prefixed.clone())
        );
    }
}

#[test]
fn test_builtin_needs_no_filesystem() {
    let fixture = Fixture::new([("/project/node_modules/fs/index.js", "")]);
    let resolved = fixture.resolve("node:fs", "/project").unwrap();
    assert_eq!(resolved.to_string(), "node:fs");
    assert!(resolved.is_builtin());
    assert_eq!(fixture.fs.access_count(), 0);
}

#[test]
fn test_builtin_shadows_installed_package() {
    let fixture = Fixture::new([("/project/node_modules/path/index.js", "")]);
    assert!(fixture.resolve("path", "/project").unwrap().is_builtin());
}

#[test]
fn test_unknown_prefixed_name_is_searched_literally() {
    let fixture = Fixture::new([("/project/node_modules/node:left-pad.js", "")]);
    assert_eq!(
        fixture.resolve_path("node:left-pad", "/project"),
        PathBuf::from("/project/node_modules/node:left-pad.js")
    );
}

// File probing

#[test]
fn test_exact_file() {
    let fixture = Fixture::new([("/project/a.js", "")]);
    assert_eq!(fixture.resolve_path("./a.js", "/project"), PathBuf::from("/project/a.js"));
    assert_eq!(fixture.resolve_path("./a", "/project"), PathBuf::from("/project/a.js"));
}

#[test]
fn test_suffix_precedence() {
    let all = Fixture::new([("/p/x", ""), ("/p/x.js", ""), ("/p/x.json", ""), ("/p/x.node", "")]);
    assert_eq!(all.resolve_path("./x", "/p"), PathBuf::from("/p/x"));

    let no_exact = Fixture::new([("/p/x.js", ""), ("/p/x.json", ""), ("/p/x.node", "")]);
    assert_eq!(no_exact.resolve_path("./x", "/p"), PathBuf::from("/p/x.js"));

    let json_and_node = Fixture::new([("/p/x.json", ""), ("/p/x.node", "")]);
    assert_eq!(json_and_node.resolve_path("./x", "/p"), PathBuf::from("/p/x.json"));

    let node_only = Fixture::new([("/p/x.node", "")]);
    assert_eq!(node_only.resolve_path("./x", "/p"), PathBuf::from("/p/x.node"));
}

#[test]
fn test_parent_and_absolute_requests() {
    let fixture = Fixture::new([("/project/lib/util.js", ""), ("/elsewhere/tool.js", "")]);
    assert_eq!(
        fixture.resolve_path("../lib/util", "/project/src"),
        PathBuf::from("/project/lib/util.js")
    );
    assert_eq!(
        fixture.resolve_path("/elsewhere/tool", "/project/src"),
        PathBuf::from("/elsewhere/tool.js")
    );
}

#[test]
fn test_relative_base_dir_is_absolutized() {
    let fixture = Fixture::new([]);
    let err = fixture.resolve("./missing", "relative/dir").unwrap_err();
    assert_eq!(err.request(), "./missing");
}

// Directory resolution

#[test]
fn test_directory_with_main() {
    let fixture = Fixture::new([
        ("/base/dir/package.json", r#"{"main": "lib/foo.js"}"#),
        ("/base/dir/lib/foo.js", ""),
        ("/base/dir/index.js", ""),
    ]);
    assert_eq!(fixture.resolve_path("./dir", "/base"), PathBuf::from("/base/dir/lib/foo.js"));
}

#[test]
fn test_main_without_suffix_is_probed() {
    let fixture = Fixture::new([
        ("/base/dir/package.json", r#"{"main": "./lib/foo"}"#),
        ("/base/dir/lib/foo.json", ""),
    ]);
    assert_eq!(fixture.resolve_path("./dir", "/base"), PathBuf::from("/base/dir/lib/foo.json"));
}

#[test]
fn test_main_directory_uses_its_index() {
    let fixture = Fixture::new([
        ("/base/dir/package.json", r#"{"main": "lib"}"#),
        ("/base/dir/lib/index.js", ""),
    ]);
    assert_eq!(fixture.resolve_path("./dir", "/base"), PathBuf::from("/base/dir/lib/index.js"));
}

#[test]
fn test_unresolvable_main_does_not_fall_back_to_index() {
    let fixture = Fixture::new([
        ("/base/dir/package.json", r#"{"main": "missing.js"}"#),
        ("/base/dir/index.js", ""),
    ]);
    let err = fixture.resolve("./dir", "/base").unwrap_err();
    assert_eq!(err.to_string(), "Cannot find module './dir'");
}

#[test]
fn test_directory_without_manifest_uses_index() {
    let fixture = Fixture::new([("/base/dir/index.json", ""), ("/base/dir/index.node", "")]);
    assert_eq!(fixture.resolve_path("./dir", "/base"), PathBuf::from("/base/dir/index.json"));
}

#[test]
fn test_malformed_manifest_falls_back_to_index() {
    let fixture = Fixture::new([
        ("/base/dir/package.json", "{ this is not json"),
        ("/base/dir/index.js", ""),
    ]);
    assert_eq!(fixture.resolve_path("./dir", "/base"), PathBuf::from("/base/dir/index.js"));
}

#[test]
fn test_non_string_main_falls_back_to_index() {
    let fixture = Fixture::new([
        ("/base/dir/package.json", r#"{"main": 42}"#),
        ("/base/dir/index.js", ""),
    ]);
    assert_eq!(fixture.resolve_path("./dir", "/base"), PathBuf::from("/base/dir/index.js"));
}

#[test]
fn test_file_beats_directory() {
    let fixture = Fixture::new([("/base/dir.js", ""), ("/base/dir/index.js", "")]);
    assert_eq!(fixture.resolve_path("./dir", "/base"), PathBuf::from("/base/dir.js"));
}

#[test]
fn test_missing_path_request_fails_without_package_search() {
    let fixture = Fixture::new([("/base/node_modules/missing.js", "")]);
    let err = fixture.resolve("./missing", "/base").unwrap_err();
    assert_eq!(err.request(), "./missing");
}

// Installed packages

#[test]
fn test_installed_package_index() {
    let fixture = Fixture::new([("/project/node_modules/left-pad/index.js", "")]);
    assert_eq!(
        fixture.resolve_path("left-pad", "/project"),
        PathBuf::from("/project/node_modules/left-pad/index.js")
    );
}

#[test]
fn test_installed_package_file() {
    let fixture = Fixture::new([("/project/node_modules/tiny.js", "")]);
    assert_eq!(
        fixture.resolve_path("tiny", "/project/src/deep"),
        PathBuf::from("/project/node_modules/tiny.js")
    );
}

#[test]
fn test_installed_package_main_and_subpath() {
    let fixture = Fixture::new([
        ("/project/node_modules/fs-extra/package.json", r#"{"main": "./lib/index.js"}"#),
        ("/project/node_modules/fs-extra/lib/index.js", ""),
        ("/project/node_modules/fs-extra/lib/copy.js", ""),
    ]);
    assert_eq!(
        fixture.resolve_path("fs-extra", "/project"),
        PathBuf::from("/project/node_modules/fs-extra/lib/index.js")
    );
    assert_eq!(
        fixture.resolve_path("fs-extra/lib/copy", "/project"),
        PathBuf::from("/project/node_modules/fs-extra/lib/copy.js")
    );
}

#[test]
fn test_scoped_package() {
    let fixture = Fixture::new([("/project/node_modules/@scope/pkg/index.js", "")]);
    assert_eq!(
        fixture.resolve_path("@scope/pkg", "/project/src"),
        PathBuf::from("/project/node_modules/@scope/pkg/index.js")
    );
}

#[test]
fn test_search_order_decides_between_duplicates() {
    let files = [
        ("/project/node_modules/dup/index.js", ""),
        ("/project/app/node_modules/dup/index.js", ""),
    ];

    let nearest = Fixture::new(files);
    assert_eq!(
        nearest.resolve_path("dup", "/project/app"),
        PathBuf::from("/project/app/node_modules/dup/index.js")
    );

    let mut root = Fixture::new(files);
    root.config = ResolverConfig::default().with_search_order(SearchOrder::RootFirst);
    assert_eq!(
        root.resolve_path("dup", "/project/app"),
        PathBuf::from("/project/node_modules/dup/index.js")
    );
}

#[test]
fn test_missing_package() {
    let fixture = Fixture::new([("/project/a.js", "")]);
    let err = fixture.resolve("totally-missing-pkg", "/project").unwrap_err();
    assert_eq!(err.code().as_str(), "MODULE_NOT_FOUND");
    assert_eq!(err.to_string(), "Cannot find module 'totally-missing-pkg'");
    assert!(err.to_string().contains("totally-missing-pkg"));
}

#[test]
fn test_empty_request() {
    let fixture = Fixture::new([("/project/node_modules.js", "")]);
    assert!(fixture.resolve("", "/project").is_err());
}

#[test]
fn test_custom_extensions() {
    let mut fixture = Fixture::new([("/p/x.json", ""), ("/p/x.mjs", "")]);
    fixture.config = ResolverConfig::default().with_extensions([".mjs", ".json"]);
    assert_eq!(fixture.resolve_path("./x", "/p"), PathBuf::from("/p/x.mjs"));
}

// End-to-end examples

#[test]
fn test_project_examples() {
    let fixture = Fixture::new([
        ("/project/a.js", ""),
        ("/project/pkg/package.json", r#"{"main":"index.js"}"#),
        ("/project/pkg/index.js", ""),
        ("/project/node_modules/left-pad/index.js", ""),
    ]);

    assert_eq!(fixture.resolve("./a", "/project").unwrap().to_string(), "/project/a.js");
    assert_eq!(
        fixture.resolve("./pkg", "/project").unwrap().to_string(),
        "/project/pkg/index.js"
    );
    assert_eq!(
        fixture.resolve("left-pad", "/project").unwrap().to_string(),
        "/project/node_modules/left-pad/index.js"
    );

    fixture.fs.reset_access_count();
    assert_eq!(fixture.resolve("node:fs", "/project").unwrap().to_string(), "node:fs");
    assert_eq!(fixture.fs.access_count(), 0);

    let err = fixture.resolve("totally-missing-pkg", "/project").unwrap_err();
    assert_eq!(err.code().as_str(), "MODULE_NOT_FOUND");
    assert_eq!(err.to_string(), "Cannot find module 'totally-missing-pkg'");
}
