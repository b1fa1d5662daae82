//! `package.json` reading.
//!
//! Only the top-level `main` field matters. A manifest is reparsed on every
//! resolution; nothing is cached.

use serde::Deserialize;
use serde_json::Value;

/// The parts of a package manifest that resolution consults.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PackageManifest {
    main: Option<String>,
}

#[derive(Deserialize)]
struct RawManifest {
    #[serde(default)]
    main: Value,
}

impl PackageManifest {
    /// Parse manifest text.
    ///
    /// A `main` that is not a string is treated as absent. Text that does
    /// not parse as a manifest object is an error.
    pub fn parse(text: &str) -> Result<Self, serde_json::Error> {
        let raw: RawManifest = serde_json::from_str(text)?;
        Ok(PackageManifest {
            main: match raw.main {
                Value::String(main) => Some(main),
                _ => None,
            },
        })
    }

    /// The entry file named by `main`, if it is a string.
    pub fn main(&self) -> Option<&str> {
        self.main.as_deref()
    }
}
