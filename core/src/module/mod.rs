//! Per-file module facts: what a file declares, exports and imports, and
//! how import specifiers map to files on disk.

mod index;
mod info;
mod resolver;


pub use index::{ModuleIndex, ModuleSymbol, SymbolKind};
pub use info::{ModuleExport, ModuleInfo};
pub use resolver::{Resolver, SOURCE_EXT, normalize_path};
