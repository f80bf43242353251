use std::collections::BTreeMap;
use std::env;
use std::path::{Path, PathBuf};
use std::sync::{PoisonError, RwLock};
use std::time::SystemTime;

use toml_edit::{Document, Item, Table};

/// Locate an accessible [`syn::Path`] for a workspace crate as seen from
/// the caller's `Cargo.toml`.
///
/// Proc-macros emit absolute paths, which must be valid from the crate
/// invoking the macro, not from the crate defining it.
///
/// # Example
///
/// ```rust
/// # use vc_macro_utils::Manifest;
/// let p: syn::Path = Manifest::shared(|m| m.get_crate_path("vc_transcode"));
/// ```
///
/// # Resolution rules
///
/// 1. If the requested crate is a dependency, return `::key`, where `key`
///    is the dependency key (a renamed dependency uses its new name).
/// 2. If the requested crate name begins with `vc_` and the caller depends
///    on the facade crate `vc_graph`, return `::key::short_name`
///    (e.g. `vc_transcode` -> `::vc_graph::transcode`).
/// 3. Repeat steps 1-2 in `dev-dependencies`.
/// 4. Otherwise, fall back to `::crate_name`.
///
/// ## Note
///
/// A crate naming itself needs `extern crate self as crate_name;` at its
/// root, so that the fallback path also resolves in its unit tests.
#[derive(Debug)]
pub struct Manifest {
    manifest: Document<Box<str>>,
    modified_time: SystemTime,
}

const FACADE_NAME: &str = "vc_graph";
const CRATE_PREFIX: &str = "vc_";

/// Find the key under which `package` is declared in `deps`.
///
/// Matches both `name = ".."` and `alias = { package = "name", .. }`.
fn dependency_key<'t>(deps: &'t Table, package: &str) -> Option<&'t str> {
    deps.iter().find_map(|(key, item)| {
        let renamed = item
            .as_table_like()
            .and_then(|table| table.get("package"))
            .and_then(Item::as_str);
        match renamed {
            Some(name) => (name == package).then_some(key),
            None => (key == package).then_some(key),
        }
    })
}

impl Manifest {
    #[inline(never)]
    fn manifest_path() -> PathBuf {
        let dir = env::var_os("CARGO_MANIFEST_DIR")
            .expect("CARGO_MANIFEST_DIR should be defined by cargo.");
        let path = PathBuf::from(dir).join("Cargo.toml");
        assert!(
            path.exists(),
            "Cargo manifest does not exist at path {}",
            path.display(),
        );
        path
    }

    #[inline(never)]
    fn modified_time(path: &Path) -> Result<SystemTime, std::io::Error> {
        std::fs::metadata(path).and_then(|metadata| metadata.modified())
    }

    #[inline(never)]
    fn read(path: &Path) -> Document<Box<str>> {
        let text = std::fs::read_to_string(path)
            .unwrap_or_else(|_| panic!("Unable to read cargo manifest: {}", path.display()))
            .into_boxed_str();
        Document::parse(text)
            .unwrap_or_else(|_| panic!("Failed to parse cargo manifest: {}", path.display()))
    }

    fn join(root: &str, module: Option<&str>) -> syn::Path {
        let text = match module {
            Some(module) => format!("::{root}::{module}"),
            None => format!("::{root}"),
        };
        syn::parse_str(&text).unwrap_or_else(|_| panic!("`{text}` is not a valid path"))
    }

    fn find_in_deps(deps: &Table, name: &str) -> Option<syn::Path> {
        if let Some(key) = dependency_key(deps, name) {
            return Some(Self::join(key, None));
        }
        let module = name.strip_prefix(CRATE_PREFIX)?;
        let facade = dependency_key(deps, FACADE_NAME)?;
        Some(Self::join(facade, Some(module)))
    }

    /// Return a [`syn::Path`] for the package named `name` as resolved from
    /// the caller's `Cargo.toml`. See the type documentation for the rules.
    #[inline(never)]
    pub fn get_crate_path(&self, name: &str) -> syn::Path {
        ["dependencies", "dev-dependencies"]
            .into_iter()
            .filter_map(|section| match self.manifest.get(section) {
                Some(Item::Table(deps)) => Some(deps),
                _ => None,
            })
            .find_map(|deps| Self::find_in_deps(deps, name))
            .unwrap_or_else(|| Self::join(name, None))
    }

    /// Obtain the [`Manifest`] of the caller's `Cargo.toml`.
    ///
    /// Manifests are cached per path and re-read when the file changes.
    /// Callers should still resolve paths once per macro invocation.
    pub fn shared<R>(func: impl FnOnce(&Self) -> R) -> R {
        static MANIFESTS: RwLock<BTreeMap<PathBuf, Manifest>> = RwLock::new(BTreeMap::new());

        let path = Self::manifest_path();
        let modified_time =
            Self::modified_time(&path).expect("The Cargo.toml should have a modified time.");

        let manifests = MANIFESTS.read().unwrap_or_else(PoisonError::into_inner);
        if let Some(manifest) = manifests.get(&path)
            && manifest.modified_time == modified_time
        {
            return func(manifest);
        }
        drop(manifests);

        let manifest = Manifest {
            manifest: Self::read(&path),
            modified_time,
        };
        let result = func(&manifest);

        MANIFESTS
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(path, manifest);

        result
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use super::dependency_key;
    use toml_edit::{Document, Item};

    fn deps(text: &str) -> Document<String> {
        Document::parse(String::from(text)).unwrap()
    }

    #[test]
    fn plain_and_renamed_dependencies() {
        let doc = deps(
            r#"
            [dependencies]
            vc_transcode = { path = "../vc_transcode" }
            graph = { package = "vc_graph", version = "0.0.1" }
            "#,
        );
        let Some(Item::Table(table)) = doc.get("dependencies") else {
            panic!("missing table");
        };
        assert_eq!(dependency_key(table, "vc_transcode"), Some("vc_transcode"));
        assert_eq!(dependency_key(table, "vc_graph"), Some("graph"));
        assert_eq!(dependency_key(table, "graph"), None);
    }
}
