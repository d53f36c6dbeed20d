//! Language-layered JSON variation resolution for file-convention web
//! servers. Point at a server directory, name a locale, and get a merged
//! data bag for rendering.
//!
//! A file-convention server keeps its localized and page-specific data in
//! JSON "variation" files under a single directory, with one subdirectory
//! per language:
//!
//! ```text
//! variations/common.json          site-wide data, root scope
//! variations/index.json           page data, root scope
//! variations/fr/common.json       French overrides
//! variations/fr/index.json        French overrides
//! ```
//!
//! Variata loads these files and folds each language-scoped document over
//! its root-scoped fallback with a recursive deep merge, producing the
//! `locals` bag that view rendering consumes:
//!
//! ```ignore
//! let config = Webconfig::open(server_path)?;
//! let variations = Variations::new(server_path, config);
//!
//! let locals = variations.common(Some("fr"), Locals::new());
//! let locals = variations.specific("index.json", Some("fr"), locals);
//! // locals["common"] / locals["specific"] are ready for the template
//! ```
//!
//! # Scope precedence
//!
//! ```text
//! Root scope        variations/<file>        fallback, every key present
//!      ↑ overridden by
//! Language scope    variations/<lang>/<file> sparse overrides, wins per key
//! ```
//!
//! The language layer is **sparse**: a locale file only carries the keys
//! it translates, and everything else falls through to the root document.
//! Nested objects fold key-by-key at every depth; scalars and arrays
//! overwrite whole. Without a language code the root document is used
//! as-is. The merge is deterministic, idempotent, and lossless for keys
//! unique to either side — see [`merge::deep_merge`].
//!
//! # Degradation over failure
//!
//! Variation data is presentation data: a missing or malformed file
//! should cost a page some strings, not a request an error. Loads
//! therefore never panic and resolvers never fail. [`LoadOutcome`]
//! distinguishes a decoded document from an absent or malformed file;
//! the resolvers map both failure cases to an empty object, and the
//! problem is reported through a [`DiagnosticSink`] (by default the
//! [`log`] facade). Language-scoped files are optional by design, so a
//! missing one is not even reported — the root fallback is the normal
//! path.
//!
//! The one deliberately strict surface is [`Webconfig::open`]: a broken
//! `webconfig.json` is a server-setup bug, and it returns an error for
//! the caller to handle.
//!
//! # Reading model
//!
//! All reads are synchronous and uncached. Each resolution call reads
//! fresh from disk, so edits show up on the next request; the price is
//! per-call filesystem latency, which makes the resolvers suitable for
//! once-per-request use. Nothing is shared between calls — every call
//! works on freshly decoded documents and a caller-owned [`Locals`] bag,
//! so concurrent use needs no locking.
//!
//! # Value primitives
//!
//! The building blocks are exposed for callers with their own data to
//! walk: [`iter::for_each`] iterates arrays and objects behind one
//! callback contract, [`clone::deep_clone`] copies a document
//! structurally, and [`merge::extend`] folds any number of optional
//! source documents into a destination in place.

pub mod clone;
pub mod config;
pub mod error;
pub mod iter;
pub mod merge;
pub mod variation;
pub mod view;

mod diag;

pub use clone::deep_clone;
pub use config::{WEBCONFIG_FILE, Webconfig};
pub use diag::{DiagnosticSink, LogSink};
pub use error::VariataError;
pub use iter::{Entry, for_each};
pub use merge::{Document, deep_merge, extend};
pub use variation::{COMMON_FIELD, LoadOutcome, Locals, SPECIFIC_FIELD, Variations};
pub use view::{RenderEngine, Views};
