// name.rs — Qualified-name canonicalization
//
// Computes a stable, human-legible qualified name for a declaration: walks
// the enclosing-scope chain, renders one component per scope level, and
// emits the components outermost-first through a `NameSink`.
//
// Anonymous namespaces and tags get synthesized labels tied to their
// presumed source location, so distinct anonymous entities stay
// distinguishable across a codebase while output stays stable across runs.
// Template-argument lists longer than `TEMPLATE_LENGTH_THRESHOLD` are
// replaced by a fixed-width FNV-1a token to keep names bounded.
//
// Preconditions: `id` is valid in `ast`; parent links are acyclic (enforced
//                at load time by `Ast::from_decls`).
// Postconditions: exactly one array of non-empty strings is emitted.
// Failure modes: none. Unresolvable locations degrade to placeholders;
//                nameless declarations fall through the anonymous ladder.
// Side effects: writes to `sink` only.

use std::fmt::Write;

use crate::ast::{Ast, Decl, DeclKind, TagKind, TemplateArg};
use crate::emit::{NameSink, VecSink};
use crate::fnv::fnv64;
use crate::id::DeclId;
use crate::render::{render_template_args, RenderPolicy};
use crate::srcloc::SourceMap;

/// Rendered template-argument fragments longer than this many bytes are
/// replaced by a hash token. Hashed tokens appear in exported keys, so the
/// threshold is part of the stable output contract.
pub const TEMPLATE_LENGTH_THRESHOLD: usize = 40;

/// Emit the qualified name of `id` as an array of scope components,
/// outermost scope first.
pub fn print_decl_name(ast: &Ast, sm: &SourceMap, id: DeclId, sink: &mut dyn NameSink) {
    let target = ast.decl(id);
    let mut chain = vec![id];

    // Locals declared inside a function/method/block body carry no
    // qualifier. A tag declared there keeps its enclosing function: two
    // functions may each declare a type with the same local name.
    let mut ctx = target.parent;
    if let Some(pid) = ctx {
        if ast.decl(pid).kind.is_function_or_method_or_block() && !target.kind.is_tag() {
            ctx = None;
        }
    }

    while let Some(pid) = ctx {
        let parent = ast.decl(pid);
        if !parent.kind.is_named_decl() {
            break;
        }
        chain.push(pid);
        ctx = parent.parent;
    }

    sink.begin_array(chain.len());
    for &entry in chain.iter().rev() {
        sink.emit_string(&render_component(ast, sm, entry));
    }
    sink.end_array();
}

/// Convenience wrapper: collect the components into a plain vector.
pub fn qualified_name_components(ast: &Ast, sm: &SourceMap, id: DeclId) -> Vec<String> {
    let mut sink = VecSink::new();
    print_decl_name(ast, sm, id, &mut sink);
    sink.into_components()
}

// ── Per-kind renderers ──────────────────────────────────────────────────────

fn render_component(ast: &Ast, sm: &SourceMap, id: DeclId) -> String {
    let decl = ast.decl(id);
    match &decl.kind {
        DeclKind::Namespace => render_namespace(sm, decl),
        DeclKind::Tag {
            tag,
            typedef_name,
            lambda,
            template_args,
        } => render_tag(
            sm,
            decl,
            *tag,
            typedef_name.as_deref(),
            *lambda,
            template_args.as_deref(),
        ),
        DeclKind::Function { template_args, .. } => {
            render_function(decl, template_args.as_deref())
        }
        _ => render_named(decl),
    }
}

/// Default renderer: the plain name, or a synthesized anonymous label so
/// that every emitted component is non-empty.
fn render_named(decl: &Decl) -> String {
    match decl.name.as_deref() {
        Some(name) if !name.is_empty() => name.to_string(),
        _ => format!("anonymous_{}", decl.kind.kind_name()),
    }
}

/// Anonymous namespaces are labeled by the file that declares them, so the
/// label is shared within a file but distinct across files.
fn render_namespace(sm: &SourceMap, decl: &Decl) -> String {
    if decl.name.as_deref().is_some_and(|n| !n.is_empty()) {
        return render_named(decl);
    }
    let file = match sm.presumed(decl.loc) {
        Some(p) => p.file,
        None => "invalid_loc".to_string(),
    };
    format!("anonymous_namespace_{file}")
}

fn render_tag(
    sm: &SourceMap,
    decl: &Decl,
    tag: TagKind,
    typedef_name: Option<&str>,
    lambda: bool,
    template_args: Option<&[TemplateArg]>,
) -> String {
    let mut out = String::new();
    if let Some(name) = decl.name.as_deref().filter(|n| !n.is_empty()) {
        out.push_str(name);
    } else if let Some(typedef) = typedef_name.filter(|n| !n.is_empty()) {
        // The `typedef struct {...} Name;` pattern.
        out.push_str(typedef);
    } else {
        if lambda {
            out.push_str("lambda");
        } else {
            out.push_str("anonymous_");
            out.push_str(tag.kind_name());
        }
        // Disambiguate anonymous tags of the same kind by position. When
        // the location does not resolve, the bare label stands (accepted
        // collision).
        if let Some(p) = sm.presumed(decl.loc) {
            write!(out, "_{}:{}:{}", p.file, p.line, p.col).unwrap();
        }
    }
    if let Some(args) = template_args {
        out.push_str(&render_spec_fragment(args));
    }
    out
}

fn render_function(decl: &Decl, template_args: Option<&[TemplateArg]>) -> String {
    let mut out = render_named(decl);
    // Instantiated template arguments are appended for readability; the
    // enclosing qualification comes from the scope-chain walk.
    if let Some(args) = template_args {
        out.push_str(&render_spec_fragment(args));
    }
    out
}

/// Render a template-argument fragment, swapping it for a fixed-width
/// FNV-1a token once the literal text exceeds the threshold.
fn render_spec_fragment(args: &[TemplateArg]) -> String {
    let text = render_template_args(args, RenderPolicy::for_name_printing());
    if text.len() > TEMPLATE_LENGTH_THRESHOLD {
        format!("<{:016x}>", fnv64(text.as_bytes()))
    } else {
        text
    }
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::TypeRepr;
    use crate::id::FileId;
    use crate::srcloc::Loc;

    // ── Fixtures ──

    struct Fx {
        ast: Ast,
        sm: SourceMap,
        tu: DeclId,
        file: FileId,
    }

    impl Fx {
        fn new() -> Fx {
            let mut sm = SourceMap::new();
            let file = sm.add_file("main.cpp");
            let mut ast = Ast::new();
            let tu = ast.add(Fx::node(DeclKind::TranslationUnit, None, None, Loc::invalid()));
            Fx { ast, sm, tu, file }
        }

        fn node(
            kind: DeclKind,
            name: Option<&str>,
            parent: Option<DeclId>,
            loc: Loc,
        ) -> Decl {
            Decl {
                kind,
                name: name.map(str::to_string),
                parent,
                loc,
            }
        }

        fn add(
            &mut self,
            kind: DeclKind,
            name: Option<&str>,
            parent: DeclId,
            loc: Loc,
        ) -> DeclId {
            self.ast.add(Fx::node(kind, name, Some(parent), loc))
        }

        fn loc(&self, line: u32, col: u32) -> Loc {
            Loc::new(self.file, line, col)
        }

        fn name(&self, id: DeclId) -> Vec<String> {
            qualified_name_components(&self.ast, &self.sm, id)
        }
    }

    fn plain_tag(tag: TagKind) -> DeclKind {
        DeclKind::Tag {
            tag,
            typedef_name: None,
            lambda: false,
            template_args: None,
        }
    }

    fn function() -> DeclKind {
        DeclKind::Function {
            method: false,
            template_args: None,
        }
    }

    fn type_arg(name: &str) -> TemplateArg {
        TemplateArg::Type(TypeRepr::named(name))
    }

    // ── Scope chain ──

    #[test]
    fn function_in_namespace() {
        let mut fx = Fx::new();
        let ns = fx.add(DeclKind::Namespace, Some("ns"), fx.tu, Loc::invalid());
        let foo = fx.add(function(), Some("foo"), ns, fx.loc(3, 1));
        assert_eq!(fx.name(foo), vec!["ns", "foo"]);
    }

    #[test]
    fn nested_namespaces_print_outermost_first() {
        let mut fx = Fx::new();
        let outer = fx.add(DeclKind::Namespace, Some("outer"), fx.tu, Loc::invalid());
        let inner = fx.add(DeclKind::Namespace, Some("inner"), outer, Loc::invalid());
        let v = fx.add(DeclKind::Var, Some("v"), inner, fx.loc(9, 1));
        assert_eq!(fx.name(v), vec!["outer", "inner", "v"]);
    }

    #[test]
    fn local_var_drops_function_qualifier() {
        let mut fx = Fx::new();
        let bar = fx.add(function(), Some("bar"), fx.tu, fx.loc(1, 1));
        let x = fx.add(DeclKind::Var, Some("x"), bar, fx.loc(2, 5));
        assert_eq!(fx.name(x), vec!["x"]);
    }

    #[test]
    fn var_in_nested_block_drops_qualifier() {
        let mut fx = Fx::new();
        let bar = fx.add(function(), Some("bar"), fx.tu, fx.loc(1, 1));
        let block = fx.add(DeclKind::Block, None, bar, fx.loc(2, 1));
        let x = fx.add(DeclKind::Var, Some("x"), block, fx.loc(3, 9));
        assert_eq!(fx.name(x), vec!["x"]);
    }

    #[test]
    fn local_struct_keeps_function_qualifier() {
        let mut fx = Fx::new();
        let bar = fx.add(function(), Some("bar"), fx.tu, fx.loc(1, 1));
        let s = fx.add(plain_tag(TagKind::Struct), Some("S"), bar, fx.loc(2, 5));
        assert_eq!(fx.name(s), vec!["bar", "S"]);
    }

    #[test]
    fn method_in_class() {
        let mut fx = Fx::new();
        let c = fx.add(plain_tag(TagKind::Class), Some("Widget"), fx.tu, fx.loc(1, 1));
        let m = fx.add(
            DeclKind::Function {
                method: true,
                template_args: None,
            },
            Some("draw"),
            c,
            fx.loc(2, 3),
        );
        assert_eq!(fx.name(m), vec!["Widget", "draw"]);
    }

    // ── Anonymous namespaces ──

    #[test]
    fn anonymous_namespace_labeled_by_file() {
        let mut fx = Fx::new();
        let ns = fx.add(DeclKind::Namespace, None, fx.tu, fx.loc(1, 1));
        assert_eq!(fx.name(ns), vec!["anonymous_namespace_main.cpp"]);
    }

    #[test]
    fn anonymous_namespaces_differ_across_files() {
        let mut fx = Fx::new();
        let other_file = fx.sm.add_file("other.cpp");
        let a = fx.add(DeclKind::Namespace, None, fx.tu, fx.loc(1, 1));
        let b = fx.add(
            DeclKind::Namespace,
            None,
            fx.tu,
            Loc::new(other_file, 1, 1),
        );
        assert_eq!(fx.name(a), vec!["anonymous_namespace_main.cpp"]);
        assert_eq!(fx.name(b), vec!["anonymous_namespace_other.cpp"]);
    }

    #[test]
    fn anonymous_namespaces_collide_within_a_file() {
        // Accepted limitation: same file, same label.
        let mut fx = Fx::new();
        let a = fx.add(DeclKind::Namespace, None, fx.tu, fx.loc(1, 1));
        let b = fx.add(DeclKind::Namespace, None, fx.tu, fx.loc(50, 1));
        assert_eq!(fx.name(a), fx.name(b));
    }

    #[test]
    fn anonymous_namespace_without_location() {
        let mut fx = Fx::new();
        let ns = fx.add(DeclKind::Namespace, None, fx.tu, Loc::invalid());
        assert_eq!(fx.name(ns), vec!["anonymous_namespace_invalid_loc"]);
    }

    // ── Anonymous tags ──

    #[test]
    fn anonymous_structs_disambiguated_by_position() {
        let mut fx = Fx::new();
        let a = fx.add(plain_tag(TagKind::Struct), None, fx.tu, fx.loc(3, 1));
        let b = fx.add(plain_tag(TagKind::Struct), None, fx.tu, fx.loc(7, 1));
        assert_eq!(fx.name(a), vec!["anonymous_struct_main.cpp:3:1"]);
        assert_eq!(fx.name(b), vec!["anonymous_struct_main.cpp:7:1"]);
    }

    #[test]
    fn anonymous_tag_without_location_keeps_bare_label() {
        let mut fx = Fx::new();
        let u = fx.add(plain_tag(TagKind::Union), None, fx.tu, Loc::invalid());
        assert_eq!(fx.name(u), vec!["anonymous_union"]);
    }

    #[test]
    fn typedef_name_stands_in_for_anonymous_tag() {
        let mut fx = Fx::new();
        let t = fx.add(
            DeclKind::Tag {
                tag: TagKind::Struct,
                typedef_name: Some("Point".to_string()),
                lambda: false,
                template_args: None,
            },
            None,
            fx.tu,
            fx.loc(4, 1),
        );
        assert_eq!(fx.name(t), vec!["Point"]);
    }

    #[test]
    fn lambda_inside_function() {
        let mut fx = Fx::new();
        let bar = fx.add(function(), Some("bar"), fx.tu, fx.loc(1, 1));
        let lam = fx.add(
            DeclKind::Tag {
                tag: TagKind::Class,
                typedef_name: None,
                lambda: true,
                template_args: None,
            },
            None,
            bar,
            fx.loc(2, 14),
        );
        assert_eq!(fx.name(lam), vec!["bar", "lambda_main.cpp:2:14"]);
    }

    #[test]
    fn lambda_without_location() {
        let mut fx = Fx::new();
        let bar = fx.add(function(), Some("bar"), fx.tu, fx.loc(1, 1));
        let lam = fx.add(
            DeclKind::Tag {
                tag: TagKind::Class,
                typedef_name: None,
                lambda: true,
                template_args: None,
            },
            None,
            bar,
            Loc::invalid(),
        );
        assert_eq!(fx.name(lam), vec!["bar", "lambda"]);
    }

    // ── Template specializations ──

    #[test]
    fn short_argument_list_prints_literally() {
        let mut fx = Fx::new();
        let v = fx.add(
            DeclKind::Tag {
                tag: TagKind::Class,
                typedef_name: None,
                lambda: false,
                template_args: Some(vec![type_arg("int")]),
            },
            Some("Vec"),
            fx.tu,
            fx.loc(1, 1),
        );
        assert_eq!(fx.name(v), vec!["Vec<int>"]);
    }

    #[test]
    fn function_instantiation_appends_arguments() {
        let mut fx = Fx::new();
        let f = fx.add(
            DeclKind::Function {
                method: false,
                template_args: Some(vec![type_arg("float")]),
            },
            Some("max"),
            fx.tu,
            fx.loc(1, 1),
        );
        assert_eq!(fx.name(f), vec!["max<float>"]);
    }

    #[test]
    fn fragment_at_threshold_stays_literal() {
        // "<" + 38 bytes + ">" is exactly 40 bytes.
        let mut fx = Fx::new();
        let long_name = "a".repeat(38);
        let v = fx.add(
            DeclKind::Tag {
                tag: TagKind::Class,
                typedef_name: None,
                lambda: false,
                template_args: Some(vec![type_arg(&long_name)]),
            },
            Some("Vec"),
            fx.tu,
            fx.loc(1, 1),
        );
        assert_eq!(fx.name(v), vec![format!("Vec<{long_name}>")]);
    }

    #[test]
    fn fragment_past_threshold_is_hashed() {
        // "<" + 39 bytes + ">" is 41 bytes: one past the threshold.
        let mut fx = Fx::new();
        let long_name = "a".repeat(39);
        let v = fx.add(
            DeclKind::Tag {
                tag: TagKind::Class,
                typedef_name: None,
                lambda: false,
                template_args: Some(vec![type_arg(&long_name)]),
            },
            Some("Vec"),
            fx.tu,
            fx.loc(1, 1),
        );
        let expected = format!("Vec<{:016x}>", fnv64(format!("<{long_name}>").as_bytes()));
        let got = fx.name(v);
        assert_eq!(got, vec![expected]);

        // The token is "<" + 16 lowercase hex digits + ">".
        let component = &got[0];
        let token = &component["Vec".len()..];
        assert_eq!(token.len(), 18);
        assert!(token.starts_with('<') && token.ends_with('>'));
        assert!(token[1..17]
            .chars()
            .all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    #[test]
    fn hashed_fragment_is_deterministic() {
        let mut fx = Fx::new();
        let args = Some(vec![type_arg(&"x".repeat(60))]);
        let v = fx.add(
            DeclKind::Tag {
                tag: TagKind::Class,
                typedef_name: None,
                lambda: false,
                template_args: args,
            },
            Some("Map"),
            fx.tu,
            fx.loc(1, 1),
        );
        assert_eq!(fx.name(v), fx.name(v));
    }

    // ── Unnamed generic declarations ──

    #[test]
    fn unnamed_generic_decl_gets_anonymous_label() {
        let mut fx = Fx::new();
        let p = fx.add(DeclKind::Var, None, fx.tu, fx.loc(1, 1));
        assert_eq!(fx.name(p), vec!["anonymous_var"]);
    }

    // ── Determinism ──

    #[test]
    fn repeated_calls_are_byte_identical() {
        let mut fx = Fx::new();
        let ns = fx.add(DeclKind::Namespace, None, fx.tu, fx.loc(1, 1));
        let s = fx.add(plain_tag(TagKind::Struct), None, ns, fx.loc(2, 3));
        let first = fx.name(s);
        let second = fx.name(s);
        assert_eq!(first, second);
        assert_eq!(
            first,
            vec!["anonymous_namespace_main.cpp", "anonymous_struct_main.cpp:2:3"]
        );
    }
}
