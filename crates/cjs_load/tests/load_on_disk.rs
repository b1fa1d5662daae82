// Test code uses unwrap/expect for clarity - panics provide good test failure messages
#![allow(clippy::unwrap_used, clippy::expect_used)]

//! Loading modules from a real directory tree.

use std::fs;
use std::path::Path;
use std::sync::Arc;

use cjs_load::testing::{js, registry, LineEngine, ScriptError};
use cjs_load::{CyclePolicy, HostBindings, LoadError, Loader, LoaderConfig};
use cjs_resolve::OsFileSystem;
use serde_json::json;
use tempfile::TempDir;

fn write(root: &Path, rel: &str, contents: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, contents).unwrap();
}

#[test]
fn loads_package_graph() {
    let dir = TempDir::new().unwrap();
    let root = dir.path();
    write(root, "app/main.js", "exports.util = require(\"./util\")\nexports.pad = require(\"left-pad\")");
    write(root, "app/util.js", "exports.dir = __dirname");
    write(root, "node_modules/left-pad/package.json", r#"{"main": "lib/pad.js"}"#);
    write(root, "node_modules/left-pad/lib/pad.js", "exports = require(\"fs\")");

    let engine = LineEngine::new();
    let builtins = registry([("fs", js(json!("the fs module")))]);
    let host = HostBindings::new();
    let config = LoaderConfig::default();
    let loader = Loader::new(&engine, &builtins, &OsFileSystem, &host, &config);

    let exports = loader.load("./app/main", root).unwrap();
    let app_dir = root.join("app").to_string_lossy().into_owned();
    assert_eq!(*exports, json!({ "util": { "dir": app_dir }, "pad": "the fs module" }));
    assert_eq!(engine.executions(), 3);
}

#[test]
fn edits_between_loads_are_observed() {
    let dir = TempDir::new().unwrap();
    let root = dir.path();
    write(root, "config.js", "exports = 1");

    let engine = LineEngine::new();
    let builtins = registry([]);
    let host = HostBindings::new();
    let config = LoaderConfig::default();
    let loader = Loader::new(&engine, &builtins, &OsFileSystem, &host, &config);

    assert_eq!(*loader.load("./config", root).unwrap(), json!(1));
    write(root, "config.js", "exports = 2");
    assert_eq!(*loader.load("./config", root).unwrap(), json!(2));
}

#[test]
fn builtin_value_is_shared() {
    let dir = TempDir::new().unwrap();
    let engine = LineEngine::new();
    let builtins = registry([("path", js(json!({})))]);
    let host = HostBindings::new();
    let config = LoaderConfig::default();
    let loader = Loader::new(&engine, &builtins, &OsFileSystem, &host, &config);

    let a = loader.load("path", dir.path()).unwrap();
    let b = loader.load("node:path", dir.path()).unwrap();
    assert!(Arc::ptr_eq(&a, &b));
}

#[test]
fn cycle_policy_comes_from_config() {
    let dir = TempDir::new().unwrap();
    let root = dir.path();
    write(root, "a.js", "exports = require(\"./b\")");
    write(root, "b.js", "exports = require(\"./a\")");

    let engine = LineEngine::new();
    let builtins = registry([]);
    let host = HostBindings::new();
    let config = LoaderConfig::default().with_cycle_policy(CyclePolicy::Reject);
    let loader = Loader::new(&engine, &builtins, &OsFileSystem, &host, &config);

    match loader.load("./a", root) {
        Err(ScriptError::Load(LoadError::Cycle { chain })) => {
            assert_eq!(chain.len(), 3);
            assert_eq!(chain.first(), chain.last());
        }
        other => panic!("unexpected result: {other:?}"),
    }
}
