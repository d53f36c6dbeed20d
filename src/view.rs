//! View template loading and the rendering seam.
//!
//! Views live under `<server_path>/<viewsRelativePath>/`. This module
//! reads them and hands the text plus a resolved [`Locals`] bag to a
//! caller-supplied [`RenderEngine`] — the engine itself (EJS-alike, Pug-
//! alike, anything) is plugged in, never assumed. A missing view is
//! reported through the diagnostic sink and returned as an error; unlike
//! variation data, a page without its template cannot degrade gracefully.

use std::path::{Path, PathBuf};

use crate::config::Webconfig;
use crate::diag::{DiagnosticSink, LogSink};
use crate::error::VariataError;
use crate::variation::Locals;

/// A pluggable template engine.
///
/// Receives the raw template text and the locals bag produced by the
/// variation resolvers; returns the rendered page or a message describing
/// what went wrong inside the engine.
pub trait RenderEngine {
    fn render(&self, template: &str, locals: &Locals) -> Result<String, String>;
}

/// Loader for view templates.
pub struct Views {
    server_path: PathBuf,
    views_dir: String,
    sink: Box<dyn DiagnosticSink>,
}

impl Views {
    /// Create a view loader reporting diagnostics through the `log` facade.
    pub fn new(server_path: impl Into<PathBuf>, config: &Webconfig) -> Self {
        Self::with_sink(server_path, config, Box::new(LogSink))
    }

    /// Create a view loader with an explicit diagnostic sink.
    pub fn with_sink(
        server_path: impl Into<PathBuf>,
        config: &Webconfig,
        sink: Box<dyn DiagnosticSink>,
    ) -> Self {
        Self {
            server_path: server_path.into(),
            views_dir: config.views_relative_path.clone(),
            sink,
        }
    }

    fn view_path(&self, view: &str) -> PathBuf {
        self.server_path.join(&self.views_dir).join(view)
    }

    /// Read a view template to a string.
    ///
    /// `None` means the route never named a view; that and a missing file
    /// are both reported and returned as errors.
    pub fn open_view(&self, view: Option<&str>) -> Result<String, VariataError> {
        let Some(view) = view else {
            let err = VariataError::ViewNotSet;
            self.sink.report(&err.to_string());
            return Err(err);
        };
        let path = self.view_path(view);
        match std::fs::read_to_string(&path) {
            Ok(text) => Ok(text),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                let err = VariataError::ViewNotFound { path };
                self.sink.report(&err.to_string());
                Err(err)
            }
            Err(source) => Err(VariataError::Io { path, source }),
        }
    }

    /// Load a view and render it through `engine` with `locals`.
    pub fn render<E: RenderEngine>(
        &self,
        engine: &E,
        view: &str,
        locals: &Locals,
    ) -> Result<String, VariataError> {
        let template = self.open_view(Some(view))?;
        engine
            .render(&template, locals)
            .map_err(|message| VariataError::RenderFailed {
                path: self.view_path(view),
                message,
            })
    }

    /// The server path this loader reads under.
    pub fn server_path(&self) -> &Path {
        &self.server_path
    }
}
