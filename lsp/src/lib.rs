//! Editor features for welle on top of `welle-core`.
//!
//! Handlers are plain functions over a [`Workspace`] and a text snapshot;
//! transport and capability negotiation live in the embedding server.

pub mod config;
pub mod diagnostics;
pub mod features;
pub mod logging;
pub mod position;
pub mod semantic_tokens;
pub mod store;
pub mod symbols;
pub mod uri;
pub mod workspace;
pub mod workspace_index;

pub use diagnostics::diagnostics;
pub use features::{completion_items, definition_at, hover_at, references, rename, signature_help_at};
pub use semantic_tokens::semantic_tokens;
pub use symbols::document_symbols;
pub use workspace::Workspace;
pub use workspace_index::{build_workspace_index, Occurrence, OccurrenceRole, SymbolKey, WorkspaceIndex};
