//! Variation loading and language-scoped resolution.
//!
//! A variation file is any well-formed JSON document holding localized or
//! page-specific data. Files live under
//! `<server_path>/<variationsRelativePath>/`, with an optional language
//! subdirectory per locale:
//!
//! ```text
//! variations/common.json          root scope (fallback)
//! variations/fr/common.json       language scope (overrides)
//! ```
//!
//! [`Variations::common`] and [`Variations::specific`] load the
//! language-scoped file, then the root-scoped fallback, and fold the two
//! with [`deep_merge`](crate::merge::deep_merge): every key present in
//! either scope survives, and on conflict the language scope wins at
//! every depth. The result is attached to a caller-owned [`Locals`] bag
//! under `"common"` / `"specific"` and handed on to view rendering.
//!
//! Loading is deliberately synchronous and uncached — each resolution
//! reads fresh from disk, so edits to variation files show up on the next
//! request. Load failures degrade instead of failing: they are reported
//! through the [`DiagnosticSink`] and the affected field resolves to an
//! empty object.

use std::path::{Path, PathBuf};

use serde_json::{Map, Value};

use crate::config::Webconfig;
use crate::diag::{DiagnosticSink, LogSink};
use crate::error::VariataError;
use crate::merge::deep_merge;

/// The data bag handed to view rendering. Resolvers attach documents to
/// it under named fields and pass ownership back to the caller.
pub type Locals = Map<String, Value>;

/// Field under which [`Variations::common`] stores its document.
pub const COMMON_FIELD: &str = "common";
/// Field under which [`Variations::specific`] stores its document.
pub const SPECIFIC_FIELD: &str = "specific";

/// What loading a single variation file produced.
///
/// Distinguishes "no file there" from "file there but broken" so callers
/// can decide per case; the resolvers treat both as an empty document.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadOutcome {
    /// The decoded document.
    Document(Value),
    /// No file at the computed path.
    Absent,
    /// A file was read but is not valid JSON.
    Malformed,
}

impl LoadOutcome {
    /// The decoded document, if loading produced one.
    pub fn into_document(self) -> Option<Value> {
        match self {
            LoadOutcome::Document(doc) => Some(doc),
            LoadOutcome::Absent | LoadOutcome::Malformed => None,
        }
    }

    /// The decoded document, or an empty object when there is none.
    pub fn or_empty(self) -> Value {
        self.into_document()
            .unwrap_or_else(|| Value::Object(Map::new()))
    }
}

/// Loader and resolver for variation files.
///
/// Carries the server path and [`Webconfig`] explicitly — there is no
/// process-wide state, so independent instances (tests, embedded servers)
/// cannot interfere with each other.
pub struct Variations {
    server_path: PathBuf,
    config: Webconfig,
    sink: Box<dyn DiagnosticSink>,
}

impl Variations {
    /// Create a resolver reporting diagnostics through the `log` facade.
    pub fn new(server_path: impl Into<PathBuf>, config: Webconfig) -> Self {
        Self::with_sink(server_path, config, Box::new(LogSink))
    }

    /// Create a resolver with an explicit diagnostic sink.
    pub fn with_sink(
        server_path: impl Into<PathBuf>,
        config: Webconfig,
        sink: Box<dyn DiagnosticSink>,
    ) -> Self {
        Self {
            server_path: server_path.into(),
            config,
            sink,
        }
    }

    /// The directory a variation file is looked up in for `language`.
    fn variations_dir(&self, language: Option<&str>) -> PathBuf {
        let base = self
            .server_path
            .join(&self.config.variations_relative_path);
        match language {
            Some(code) => base.join(code),
            None => base,
        }
    }

    /// Read and parse one variation file.
    ///
    /// `name == None` means no file was requested and yields an empty
    /// document — a valid no-op, distinct from a missing file.
    ///
    /// Diagnostics: a missing root-scoped file is reported unless `quiet`;
    /// a missing language-scoped file is always silent (those files are
    /// optional by design, the root fallback covers them); malformed JSON
    /// is always reported with the file path and the raw parser message;
    /// any other I/O failure is reported as-is. All failure paths return
    /// without a document — nothing here is fatal.
    pub fn open_variation(
        &self,
        name: Option<&str>,
        language: Option<&str>,
        quiet: bool,
    ) -> LoadOutcome {
        let Some(name) = name else {
            return LoadOutcome::Document(Value::Object(Map::new()));
        };
        let path = self.variations_dir(language).join(name);

        let text = match std::fs::read_to_string(&path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                if language.is_none() && !quiet {
                    self.report(VariataError::VariationNotFound { path });
                }
                return LoadOutcome::Absent;
            }
            Err(source) => {
                self.report(VariataError::Io { path, source });
                return LoadOutcome::Absent;
            }
        };

        match serde_json::from_str(&text) {
            Ok(doc) => LoadOutcome::Document(doc),
            Err(source) => {
                self.report(VariataError::Syntax { path, source });
                LoadOutcome::Malformed
            }
        }
    }

    /// Resolve the site-wide common variation into `locals.common`.
    ///
    /// The file name comes from the webconfig's `variation` setting; if it
    /// is unset the field resolves to an empty document.
    pub fn common(&self, language: Option<&str>, locals: Locals) -> Locals {
        let name = self.config.variation.clone();
        self.resolve_into(COMMON_FIELD, name.as_deref(), language, locals)
    }

    /// Resolve a page's variation file into `locals.specific`.
    pub fn specific(&self, name: &str, language: Option<&str>, locals: Locals) -> Locals {
        self.resolve_into(SPECIFIC_FIELD, Some(name), language, locals)
    }

    /// Load, fold, and attach one variation document under `field`.
    ///
    /// Without a language the root document is stored as-is. With one,
    /// the root fallback is loaded quietly and the language document is
    /// folded over it; a failed load on either side participates as an
    /// empty object so the other side survives intact.
    fn resolve_into(
        &self,
        field: &str,
        name: Option<&str>,
        language: Option<&str>,
        mut locals: Locals,
    ) -> Locals {
        let scoped = self.open_variation(name, language, false);
        let resolved = match language {
            None => scoped.or_empty(),
            Some(_) => {
                let root = self.open_variation(name, None, true);
                fold_scopes(root, scoped)
            }
        };
        locals.insert(field.to_string(), resolved);
        locals
    }

    fn report(&self, error: VariataError) {
        self.sink.report(&error.to_string());
    }

    /// The server path this resolver reads under.
    pub fn server_path(&self) -> &Path {
        &self.server_path
    }

    /// The webconfig this resolver was built with.
    pub fn config(&self) -> &Webconfig {
        &self.config
    }
}

/// Fold a language-scoped document over its root-scoped fallback.
///
/// Object over object deep-merges with the language scope winning; any
/// non-object language document wins wholesale; a missing side yields the
/// other; two misses yield an empty object.
fn fold_scopes(root: LoadOutcome, scoped: LoadOutcome) -> Value {
    match (root.into_document(), scoped.into_document()) {
        (Some(Value::Object(root_obj)), Some(Value::Object(scoped_obj))) => {
            Value::Object(deep_merge(root_obj, scoped_obj))
        }
        (_, Some(scoped_doc)) => scoped_doc,
        (Some(root_doc), None) => root_doc,
        (None, None) => Value::Object(Map::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diag::test::Recorder;
    use serde_json::json;
    use std::fs;
    use tempfile::TempDir;

    /// A server layout with a variations directory and recording sink.
    struct Fixture {
        dir: TempDir,
        recorder: Recorder,
    }

    impl Fixture {
        fn new() -> Self {
            let dir = TempDir::new().unwrap();
            fs::create_dir(dir.path().join("variations")).unwrap();
            Self {
                dir,
                recorder: Recorder::new(),
            }
        }

        fn write_root(&self, name: &str, content: &str) {
            fs::write(self.dir.path().join("variations").join(name), content).unwrap();
        }

        fn write_lang(&self, language: &str, name: &str, content: &str) {
            let lang_dir = self.dir.path().join("variations").join(language);
            fs::create_dir_all(&lang_dir).unwrap();
            fs::write(lang_dir.join(name), content).unwrap();
        }

        fn variations(&self, config: Webconfig) -> Variations {
            Variations::with_sink(self.dir.path(), config, Box::new(self.recorder.clone()))
        }
    }

    fn common_config() -> Webconfig {
        Webconfig {
            variation: Some("common.json".to_string()),
            ..Webconfig::default()
        }
    }

    // --- open_variation ---

    #[test]
    fn unset_name_yields_empty_document() {
        let fx = Fixture::new();
        let v = fx.variations(Webconfig::default());
        for language in [None, Some("fr")] {
            let outcome = v.open_variation(None, language, false);
            assert_eq!(outcome, LoadOutcome::Document(json!({})));
        }
        assert_eq!(fx.recorder.count(), 0);
    }

    #[test]
    fn open_reads_root_scope() {
        let fx = Fixture::new();
        fx.write_root("page.json", r#"{"title": "Home"}"#);
        let v = fx.variations(Webconfig::default());
        let outcome = v.open_variation(Some("page.json"), None, false);
        assert_eq!(outcome, LoadOutcome::Document(json!({"title": "Home"})));
    }

    #[test]
    fn open_reads_language_scope() {
        let fx = Fixture::new();
        fx.write_lang("fr", "page.json", r#"{"title": "Accueil"}"#);
        let v = fx.variations(Webconfig::default());
        let outcome = v.open_variation(Some("page.json"), Some("fr"), false);
        assert_eq!(outcome, LoadOutcome::Document(json!({"title": "Accueil"})));
    }

    #[test]
    fn missing_root_file_is_reported() {
        let fx = Fixture::new();
        let v = fx.variations(Webconfig::default());
        let outcome = v.open_variation(Some("page.json"), None, false);
        assert_eq!(outcome, LoadOutcome::Absent);
        assert_eq!(fx.recorder.count(), 1);
        assert!(fx.recorder.messages()[0].contains("not found"));
    }

    #[test]
    fn missing_root_file_quiet_is_silent() {
        let fx = Fixture::new();
        let v = fx.variations(Webconfig::default());
        let outcome = v.open_variation(Some("page.json"), None, true);
        assert_eq!(outcome, LoadOutcome::Absent);
        assert_eq!(fx.recorder.count(), 0);
    }

    #[test]
    fn missing_language_file_is_silent() {
        let fx = Fixture::new();
        let v = fx.variations(Webconfig::default());
        let outcome = v.open_variation(Some("page.json"), Some("fr"), false);
        assert_eq!(outcome, LoadOutcome::Absent);
        assert_eq!(fx.recorder.count(), 0);
    }

    #[test]
    fn malformed_json_is_reported_with_path_and_parser_message() {
        let fx = Fixture::new();
        fx.write_root("page.json", "{broken");
        let v = fx.variations(Webconfig::default());
        let outcome = v.open_variation(Some("page.json"), None, false);
        assert_eq!(outcome, LoadOutcome::Malformed);
        assert_eq!(fx.recorder.count(), 1);
        let message = &fx.recorder.messages()[0];
        assert!(message.contains("page.json"));
        assert!(message.contains("Syntax"));
    }

    #[test]
    fn malformed_json_reported_even_when_quiet() {
        let fx = Fixture::new();
        fx.write_lang("fr", "page.json", "[1, 2,");
        let v = fx.variations(Webconfig::default());
        let outcome = v.open_variation(Some("page.json"), Some("fr"), true);
        assert_eq!(outcome, LoadOutcome::Malformed);
        assert_eq!(fx.recorder.count(), 1);
    }

    // --- common ---

    #[test]
    fn common_without_language_is_root_document() {
        let fx = Fixture::new();
        fx.write_root("common.json", r#"{"a": 1}"#);
        let v = fx.variations(common_config());
        let locals = v.common(None, Locals::new());
        assert_eq!(locals["common"], json!({"a": 1}));
    }

    #[test]
    fn common_folds_language_over_root() {
        let fx = Fixture::new();
        fx.write_root("common.json", r#"{"a": 1, "b": {"x": 1}}"#);
        fx.write_lang("fr", "common.json", r#"{"b": {"y": 2}, "c": 3}"#);
        let v = fx.variations(common_config());
        let locals = v.common(Some("fr"), Locals::new());
        assert_eq!(locals["common"], json!({"a": 1, "b": {"x": 1, "y": 2}, "c": 3}));
    }

    #[test]
    fn common_language_scope_wins_on_conflict() {
        let fx = Fixture::new();
        fx.write_root("common.json", r#"{"title": "Home", "nav": {"home": "Home"}}"#);
        fx.write_lang(
            "fr",
            "common.json",
            r#"{"title": "Accueil", "nav": {"home": "Accueil"}}"#,
        );
        let v = fx.variations(common_config());
        let locals = v.common(Some("fr"), Locals::new());
        assert_eq!(locals["common"]["title"], json!("Accueil"));
        assert_eq!(locals["common"]["nav"]["home"], json!("Accueil"));
    }

    #[test]
    fn common_missing_language_file_falls_back_silently() {
        let fx = Fixture::new();
        fx.write_root("common.json", r#"{"a": 1}"#);
        let v = fx.variations(common_config());
        let locals = v.common(Some("fr"), Locals::new());
        assert_eq!(locals["common"], json!({"a": 1}));
        assert_eq!(fx.recorder.count(), 0);
    }

    #[test]
    fn common_malformed_root_resolves_empty_with_one_diagnostic() {
        let fx = Fixture::new();
        fx.write_root("common.json", "{invalid json");
        let v = fx.variations(common_config());
        let locals = v.common(None, Locals::new());
        assert_eq!(locals["common"], json!({}));
        assert_eq!(fx.recorder.count(), 1);
    }

    #[test]
    fn common_unset_variation_name_resolves_empty() {
        let fx = Fixture::new();
        let v = fx.variations(Webconfig::default());
        let locals = v.common(None, Locals::new());
        assert_eq!(locals["common"], json!({}));
        assert_eq!(fx.recorder.count(), 0);
    }

    #[test]
    fn common_preserves_existing_locals_fields() {
        let fx = Fixture::new();
        fx.write_root("common.json", r#"{"a": 1}"#);
        let v = fx.variations(common_config());
        let mut locals = Locals::new();
        locals.insert("routeParameters".to_string(), json!({"view": "index"}));
        let locals = v.common(None, locals);
        assert_eq!(locals["routeParameters"]["view"], json!("index"));
        assert_eq!(locals["common"], json!({"a": 1}));
    }

    // --- specific ---

    #[test]
    fn specific_folds_language_over_root() {
        let fx = Fixture::new();
        fx.write_root("about.json", r#"{"title": "About", "year": 2016}"#);
        fx.write_lang("fr", "about.json", r#"{"title": "À propos"}"#);
        let v = fx.variations(Webconfig::default());
        let locals = v.specific("about.json", Some("fr"), Locals::new());
        assert_eq!(
            locals["specific"],
            json!({"title": "À propos", "year": 2016})
        );
    }

    #[test]
    fn specific_without_language_is_root_document() {
        let fx = Fixture::new();
        fx.write_root("about.json", r#"{"title": "About"}"#);
        let v = fx.variations(Webconfig::default());
        let locals = v.specific("about.json", None, Locals::new());
        assert_eq!(locals["specific"], json!({"title": "About"}));
    }

    #[test]
    fn specific_missing_everywhere_resolves_empty() {
        let fx = Fixture::new();
        let v = fx.variations(Webconfig::default());
        let locals = v.specific("ghost.json", Some("fr"), Locals::new());
        assert_eq!(locals["specific"], json!({}));
        // Language miss is silent; the quiet root fallback miss is too.
        assert_eq!(fx.recorder.count(), 0);
    }

    #[test]
    fn specific_and_common_share_one_bag() {
        let fx = Fixture::new();
        fx.write_root("common.json", r#"{"site": "Demo"}"#);
        fx.write_root("index.json", r#"{"title": "Home"}"#);
        let v = fx.variations(common_config());
        let locals = v.common(None, Locals::new());
        let locals = v.specific("index.json", None, locals);
        assert_eq!(locals["common"]["site"], json!("Demo"));
        assert_eq!(locals["specific"]["title"], json!("Home"));
    }

    #[test]
    fn non_object_language_document_wins_wholesale() {
        let fx = Fixture::new();
        fx.write_root("flags.json", r#"{"a": 1}"#);
        fx.write_lang("fr", "flags.json", r#"["fr-only"]"#);
        let v = fx.variations(Webconfig::default());
        let locals = v.specific("flags.json", Some("fr"), Locals::new());
        assert_eq!(locals["specific"], json!(["fr-only"]));
    }

    #[test]
    fn custom_variations_directory_is_respected() {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join("data")).unwrap();
        fs::write(dir.path().join("data").join("page.json"), r#"{"a": 1}"#).unwrap();

        let config = Webconfig {
            variations_relative_path: "data".to_string(),
            ..Webconfig::default()
        };
        let v = Variations::new(dir.path(), config);
        let outcome = v.open_variation(Some("page.json"), None, false);
        assert_eq!(outcome, LoadOutcome::Document(json!({"a": 1})));
    }
}
