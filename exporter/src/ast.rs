// ast.rs — Declaration-tree data model
//
// Mirrors the declaration/context shape handed over by the external
// frontend plugin: a flat arena of nodes with parent links, loadable from a
// JSON dump. The exporter never mutates a loaded tree; every pass takes
// `&Ast` and holds ids, not node references.
//
// Preconditions: arenas come from `Ast::from_decls` (validated) or `add`.
// Postconditions: parent links always point at lower indices, so any parent
//                 walk terminates.
// Failure modes: `from_decls` rejects forward or self parent links.
// Side effects: none.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::id::DeclId;
use crate::srcloc::{Loc, LineOverride, SourceMap};

// ── Template arguments ──────────────────────────────────────────────────────

/// One argument of a template specialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TemplateArg {
    Type(TypeRepr),
    Integral(i64),
    NullPtr,
    /// An expanded parameter pack; prints as its elements, comma-separated.
    Pack(Vec<TemplateArg>),
}

/// Just enough of a type to print a template argument: an optional tag
/// keyword, scope qualifiers, the base name, and nested arguments. Not a
/// general-purpose type representation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeRepr {
    #[serde(default)]
    pub tag_keyword: Option<String>,
    #[serde(default)]
    pub scope: Vec<String>,
    pub name: String,
    #[serde(default)]
    pub args: Vec<TemplateArg>,
}

impl TypeRepr {
    /// A bare type name with no qualifiers or arguments.
    pub fn named(name: impl Into<String>) -> TypeRepr {
        TypeRepr {
            tag_keyword: None,
            scope: Vec::new(),
            name: name.into(),
            args: Vec::new(),
        }
    }
}

// ── Declaration kinds ───────────────────────────────────────────────────────

/// Tag flavor of a record-like declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TagKind {
    Struct,
    Class,
    Union,
    Enum,
}

impl TagKind {
    pub fn kind_name(self) -> &'static str {
        match self {
            TagKind::Struct => "struct",
            TagKind::Class => "class",
            TagKind::Union => "union",
            TagKind::Enum => "enum",
        }
    }
}

/// Declaration node kind. A flat variant set: the name canonicalizer
/// dispatches on this with a single `match`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeclKind {
    /// Root context. Not a named declaration; scope walks stop here.
    TranslationUnit,
    /// Executable block context (compound statement body). Not a named
    /// declaration.
    Block,
    Namespace,
    Tag {
        tag: TagKind,
        /// Name supplied by `typedef struct {...} Name;` for anonymous tags.
        #[serde(default)]
        typedef_name: Option<String>,
        /// Closure record of a lambda expression.
        #[serde(default)]
        lambda: bool,
        /// Present iff this tag is a template specialization.
        #[serde(default)]
        template_args: Option<Vec<TemplateArg>>,
    },
    Function {
        #[serde(default)]
        method: bool,
        /// Present iff this function is a template instantiation.
        #[serde(default)]
        template_args: Option<Vec<TemplateArg>>,
    },
    Var,
    Field,
    EnumConstant,
    Typedef,
}

impl DeclKind {
    /// Kind label used in anonymous-name synthesis and fact records.
    pub fn kind_name(&self) -> &'static str {
        match self {
            DeclKind::TranslationUnit => "translation_unit",
            DeclKind::Block => "block",
            DeclKind::Namespace => "namespace",
            DeclKind::Tag { tag, .. } => tag.kind_name(),
            DeclKind::Function { method: false, .. } => "function",
            DeclKind::Function { method: true, .. } => "method",
            DeclKind::Var => "var",
            DeclKind::Field => "field",
            DeclKind::EnumConstant => "enum_constant",
            DeclKind::Typedef => "typedef",
        }
    }

    /// Whether a node of this kind is a named declaration. Scope-chain
    /// walks stop at the first enclosing context that is not.
    pub fn is_named_decl(&self) -> bool {
        !matches!(self, DeclKind::TranslationUnit | DeclKind::Block)
    }

    /// Whether this node opens a function, method, or block scope.
    pub fn is_function_or_method_or_block(&self) -> bool {
        matches!(self, DeclKind::Function { .. } | DeclKind::Block)
    }

    pub fn is_tag(&self) -> bool {
        matches!(self, DeclKind::Tag { .. })
    }
}

// ── Declarations and the arena ──────────────────────────────────────────────

/// One declaration (or context-only) node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Decl {
    pub kind: DeclKind,
    #[serde(default)]
    pub name: Option<String>,
    /// Enclosing context; `None` only for the root.
    #[serde(default)]
    pub parent: Option<DeclId>,
    #[serde(default = "Loc::invalid")]
    pub loc: Loc,
}

/// Flat declaration arena. Parent links reference strictly earlier entries,
/// which makes the tree acyclic by construction.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct Ast {
    decls: Vec<Decl>,
}

impl Ast {
    pub fn new() -> Ast {
        Ast::default()
    }

    /// Validate dump data and build an arena. Parent links must reference
    /// strictly earlier declarations.
    pub fn from_decls(decls: Vec<Decl>) -> Result<Ast, DumpError> {
        for (i, decl) in decls.iter().enumerate() {
            if let Some(parent) = decl.parent {
                if parent.index() >= i {
                    return Err(DumpError::BadParentLink {
                        decl: DeclId(i as u32),
                        parent,
                    });
                }
            }
        }
        Ok(Ast { decls })
    }

    /// Append a node whose parent (if any) is already in the arena.
    pub fn add(&mut self, decl: Decl) -> DeclId {
        debug_assert!(decl
            .parent
            .map_or(true, |p| p.index() < self.decls.len()));
        let id = DeclId(self.decls.len() as u32);
        self.decls.push(decl);
        id
    }

    pub fn decl(&self, id: DeclId) -> &Decl {
        &self.decls[id.index()]
    }

    pub fn get(&self, id: DeclId) -> Option<&Decl> {
        self.decls.get(id.index())
    }

    pub fn len(&self) -> usize {
        self.decls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.decls.is_empty()
    }

    /// Iterate all nodes in arena (source) order.
    pub fn iter(&self) -> impl Iterator<Item = (DeclId, &Decl)> {
        self.decls
            .iter()
            .enumerate()
            .map(|(i, d)| (DeclId(i as u32), d))
    }
}

// ── Dump loading ────────────────────────────────────────────────────────────

/// On-disk AST dump shape consumed by the driver: the file table, optional
/// presumed-line overrides, and the declaration arena.
#[derive(Debug, Serialize, Deserialize)]
pub struct AstDump {
    pub files: Vec<String>,
    #[serde(default)]
    pub line_overrides: Vec<LineOverride>,
    pub decls: Vec<Decl>,
}

impl AstDump {
    /// Validate and split into the arena and the source map.
    pub fn into_parts(self) -> Result<(Ast, SourceMap), DumpError> {
        let sm = SourceMap::from_parts(self.files, self.line_overrides);
        let ast = Ast::from_decls(self.decls)?;
        Ok((ast, sm))
    }
}

/// Errors that can occur while loading a dump.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DumpError {
    /// A declaration's parent link points at itself or a later entry.
    BadParentLink { decl: DeclId, parent: DeclId },
}

impl fmt::Display for DumpError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DumpError::BadParentLink { decl, parent } => write!(
                f,
                "declaration {} has forward or self parent link {}",
                decl.0, parent.0
            ),
        }
    }
}

impl std::error::Error for DumpError {}

// ── Tests ──
