// declex — Declaration exporter
//
// Library root. Load a declaration-tree dump (ast, srcloc), canonicalize
// qualified names (name), export per-declaration facts (export).

pub mod ast;
pub mod emit;
pub mod export;
pub mod fnv;
pub mod id;
pub mod name;
pub mod render;
pub mod srcloc;
