//! A line-oriented script engine.
//!
//! One statement per line; blank lines and `#` comments are skipped.
//!
//! ```text
//! let NAME = EXPR          bind a module-local variable
//! NAME += INT              increment a local
//! exports = EXPR           replace the exports slot
//! module.exports = EXPR    (same slot)
//! exports.KEY = EXPR       set a property on the exported object
//! module.exports.KEY = EXPR
//! require("REQ")           load for side effects only
//! throw MESSAGE            raise ScriptError::Thrown(MESSAGE)
//! ```
//!
//! Expressions: a JSON literal, a local name, `exports`, `module.exports`,
//! `__dirname`, `__filename`, `require("REQ")`, `require.resolve("REQ")`,
//! `host("NAME")` (null when unbound).

use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use rustc_hash::FxHashMap;
use serde_json::{Map, Value as Json};

use crate::{ExecutionScope, LoadError, ScriptEngine};

/// Values are shared JSON documents; cloning keeps identity.
pub type JsValue = Arc<Json>;

/// Errors raised by [`LineEngine`] scripts.
#[derive(Debug, thiserror::Error)]
pub enum ScriptError {
    #[error(transparent)]
    Load(#[from] LoadError),

    #[error("Uncaught {0}")]
    Thrown(String),

    #[error("{}:{line}: cannot run `{text}`", .file.display())]
    Syntax {
        file: PathBuf,
        line: usize,
        text: String,
    },
}

impl ScriptError {
    /// The loader failure, if this error is one.
    pub fn as_load(&self) -> Option<&LoadError> {
        match self {
            ScriptError::Load(err) => Some(err),
            _ => None,
        }
    }
}

/// Counts executions so tests can observe re-execution.
#[derive(Debug, Default)]
pub struct LineEngine {
    executions: AtomicUsize,
}

impl LineEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of module executions started so far.
    pub fn executions(&self) -> usize {
        self.executions.load(Ordering::SeqCst)
    }
}

impl ScriptEngine for LineEngine {
    type Value = JsValue;
    type Error = ScriptError;

    fn empty_exports(&self) -> JsValue {
        Arc::new(Json::Object(Map::new()))
    }

    fn execute(&self, source: &str, scope: &ExecutionScope<'_, Self>) -> Result<(), ScriptError> {
        self.executions.fetch_add(1, Ordering::SeqCst);
        let mut run = Run {
            scope,
            locals: FxHashMap::default(),
            line: 0,
            text: "",
        };
        for (index, raw) in source.lines().enumerate() {
            let text = raw.trim();
            if text.is_empty() || text.starts_with('#') {
                continue;
            }
            run.line = index + 1;
            run.text = text;
            run.statement(text)?;
        }
        Ok(())
    }
}

/// State of one execution.
struct Run<'r, 'l> {
    scope: &'r ExecutionScope<'l, LineEngine>,
    locals: FxHashMap<String, JsValue>,
    line: usize,
    text: &'r str,
}

impl<'r> Run<'r, '_> {
    fn statement(&mut self, text: &'r str) -> Result<(), ScriptError> {
        if let Some(message) = text.strip_prefix("throw ") {
            return Err(ScriptError::Thrown(message.trim().to_owned()));
        }
        if text.starts_with("require(") {
            self.eval(text)?;
            return Ok(());
        }
        if let Some(rest) = text.strip_prefix("let ") {
            let (name, expr) = rest.split_once('=').ok_or_else(|| self.syntax())?;
            let value = self.eval(expr.trim())?;
            self.locals.insert(name.trim().to_owned(), value);
            return Ok(());
        }

        let (target, expr) = text.split_once('=').ok_or_else(|| self.syntax())?;
        if let Some(name) = target.strip_suffix('+') {
            return self.increment(name.trim(), expr.trim());
        }
        let value = self.eval(expr.trim())?;
        match target.trim() {
            "exports" | "module.exports" => {
                self.scope.module().exports().set(value);
                Ok(())
            }
            target => {
                let key = target
                    .strip_prefix("module.exports.")
                    .or_else(|| target.strip_prefix("exports."))
                    .ok_or_else(|| self.syntax())?;
                self.set_property(key, &value)
            }
        }
    }

    fn increment(&mut self, name: &str, amount: &str) -> Result<(), ScriptError> {
        let amount: i64 = amount.parse().map_err(|_| self.syntax())?;
        let current = self
            .locals
            .get(name)
            .and_then(|value| value.as_i64())
            .ok_or_else(|| self.syntax())?;
        self.locals
            .insert(name.to_owned(), Arc::new(Json::from(current + amount)));
        Ok(())
    }

    fn set_property(&self, key: &str, value: &JsValue) -> Result<(), ScriptError> {
        self.scope.exports().update(|exports| match Arc::make_mut(exports) {
            Json::Object(map) => {
                map.insert(key.to_owned(), Json::clone(value));
                Ok(())
            }
            _ => Err(ScriptError::Thrown(format!(
                "TypeError: Cannot set property '{key}' of a non-object"
            ))),
        })
    }

    fn eval(&self, expr: &str) -> Result<JsValue, ScriptError> {
        match expr {
            "__dirname" => return Ok(path_value(self.scope.dirname())),
            "__filename" => return Ok(path_value(self.scope.filename())),
            "exports" | "module.exports" => return Ok(self.scope.exports().get()),
            _ => {}
        }
        if let Some(arg) = call_argument(expr, "require.resolve") {
            let request = self.string_argument(arg)?;
            let resolved = self.scope.resolve(&request)?;
            return Ok(Arc::new(Json::String(resolved.to_string())));
        }
        if let Some(arg) = call_argument(expr, "require") {
            let request = self.string_argument(arg)?;
            return self.scope.require(&request);
        }
        if let Some(arg) = call_argument(expr, "host") {
            let name = self.string_argument(arg)?;
            return Ok(self
                .scope
                .host(&name)
                .cloned()
                .unwrap_or_else(|| Arc::new(Json::Null)));
        }
        if let Some(value) = self.locals.get(expr) {
            return Ok(Arc::clone(value));
        }
        serde_json::from_str(expr)
            .map(Arc::new)
            .map_err(|_| self.syntax())
    }

    fn string_argument(&self, arg: &str) -> Result<String, ScriptError> {
        serde_json::from_str(arg.trim()).map_err(|_| self.syntax())
    }

    fn syntax(&self) -> ScriptError {
        ScriptError::Syntax {
            file: self.scope.filename().to_path_buf(),
            line: self.line,
            text: self.text.to_owned(),
        }
    }
}

fn call_argument<'e>(expr: &'e str, callee: &str) -> Option<&'e str> {
    expr.strip_prefix(callee)?
        .strip_prefix('(')?
        .strip_suffix(')')
}

fn path_value(path: &std::path::Path) -> JsValue {
    Arc::new(Json::String(path.to_string_lossy().into_owned()))
}
