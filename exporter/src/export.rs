// export.rs — Per-declaration fact export
//
// Walks a loaded declaration tree and emits one fact record per named
// declaration, keyed by canonical qualified name. Records follow arena
// order, which the frontend allocates in source order, so repeated runs
// over the same dump produce identical JSON.
//
// Preconditions: `ast` and `sm` come from the same dump.
// Postconditions: one record per named declaration; context-only nodes
//                 (translation unit, blocks) are skipped.
// Failure modes: none.
// Side effects: none.

use serde_json::{json, Value};

use crate::ast::Ast;
use crate::emit::JsonSink;
use crate::name::{print_decl_name, qualified_name_components};
use crate::srcloc::SourceMap;

/// Emit one fact record per named declaration: the component array, a
/// `::`-joined key, the kind label, and the resolved location when valid.
pub fn export_facts(ast: &Ast, sm: &SourceMap) -> Value {
    let mut records = Vec::new();
    for (id, decl) in ast.iter() {
        if !decl.kind.is_named_decl() {
            continue;
        }
        let components = qualified_name_components(ast, sm, id);
        let key = components.join("::");
        let mut record = json!({
            "key": key,
            "qualified_name": components,
            "kind": decl.kind.kind_name(),
        });
        if let Some(p) = sm.presumed(decl.loc) {
            record["location"] = json!(format!("{}:{}:{}", p.file, p.line, p.col));
        }
        records.push(record);
    }
    Value::Array(records)
}

/// Emit just the qualified-name arrays, one per named declaration.
pub fn export_names(ast: &Ast, sm: &SourceMap) -> Value {
    let mut names = Vec::new();
    for (id, decl) in ast.iter() {
        if !decl.kind.is_named_decl() {
            continue;
        }
        let mut sink = JsonSink::new();
        print_decl_name(ast, sm, id, &mut sink);
        names.push(sink.into_value());
    }
    Value::Array(names)
}

// ── Tests ──
