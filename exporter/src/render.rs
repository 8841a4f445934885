// render.rs — Compact textual rendering of template-argument lists
//
// Prints just enough of a type to identify a specialization. Scope
// qualifiers and tag keywords are suppressed during name printing because
// the enclosing scope chain already carries that information; re-adding
// them would duplicate it and bloat the generated names.
//
// Preconditions: none.
// Postconditions: returns the literal fragment, angle brackets included.
// Failure modes: none (pure string formatting).
// Side effects: none.

use std::fmt::Write;

use crate::ast::{TemplateArg, TypeRepr};

/// What to include when printing a template argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderPolicy {
    /// Drop `outer::` qualifiers on argument types.
    pub suppress_scope: bool,
    /// Drop `struct` / `union` / ... keywords on argument types.
    pub suppress_tag_keyword: bool,
}

impl RenderPolicy {
    /// The policy used inside generated names: qualification comes from the
    /// scope-chain walk, so arguments print bare.
    pub fn for_name_printing() -> RenderPolicy {
        RenderPolicy {
            suppress_scope: true,
            suppress_tag_keyword: true,
        }
    }
}

/// Render a full argument list as `<a, b, ...>`.
pub fn render_template_args(args: &[TemplateArg], policy: RenderPolicy) -> String {
    let mut out = String::from("<");
    push_args(&mut out, args, policy);
    out.push('>');
    out
}

fn push_args(out: &mut String, args: &[TemplateArg], policy: RenderPolicy) {
    for (i, arg) in args.iter().enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        push_arg(out, arg, policy);
    }
}

fn push_arg(out: &mut String, arg: &TemplateArg, policy: RenderPolicy) {
    match arg {
        TemplateArg::Type(ty) => push_type(out, ty, policy),
        TemplateArg::Integral(v) => {
            write!(out, "{v}").unwrap();
        }
        TemplateArg::NullPtr => out.push_str("nullptr"),
        // Packs print expanded, as if spliced into the surrounding list.
        TemplateArg::Pack(inner) => push_args(out, inner, policy),
    }
}

fn push_type(out: &mut String, ty: &TypeRepr, policy: RenderPolicy) {
    if !policy.suppress_tag_keyword {
        if let Some(kw) = &ty.tag_keyword {
            out.push_str(kw);
            out.push(' ');
        }
    }
    if !policy.suppress_scope {
        for scope in &ty.scope {
            out.push_str(scope);
            out.push_str("::");
        }
    }
    out.push_str(&ty.name);
    if !ty.args.is_empty() {
        out.push('<');
        push_args(out, &ty.args, policy);
        out.push('>');
    }
}

// ── Tests ──
