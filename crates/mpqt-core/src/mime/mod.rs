//! Content-type classification.
//!
//! [`ClassificationGraph`] is a read-only table of content types keyed by
//! name. Every type may declare parent types and an alias target; together
//! these edges form a DAG that icon resolution walks when a type has no
//! themed icon of its own. The graph is assumed acyclic and is not checked.

mod registry;

use std::collections::{HashMap, HashSet};
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::path;
use registry::{DEFAULT_ICON, DEFAULT_TYPE, DIRECTORY_TYPE, EXTENSIONS, TYPES};

/// Answers whether an icon theme provides an icon name.
///
/// The engine never loads icons itself; the presentation layer decides what
/// counts as themed.
pub trait IconTheme {
    fn has_icon(&self, name: &str) -> bool;
}

impl IconTheme for HashSet<String> {
    fn has_icon(&self, name: &str) -> bool {
        self.contains(name)
    }
}

impl IconTheme for [&str] {
    fn has_icon(&self, name: &str) -> bool {
        self.iter().any(|icon| *icon == name)
    }
}

/// A content type description, as registered at startup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MimeTypeDef {
    pub name: String,
    #[serde(default)]
    pub comment: String,
    #[serde(default)]
    pub generic_icon: Option<String>,
    #[serde(default)]
    pub parents: Vec<String>,
    #[serde(default)]
    pub alias_of: Option<String>,
    /// Extensions mapped to this type, with or without the leading dot.
    #[serde(default)]
    pub extensions: Vec<String>,
}

/// Opaque handle to a type inside one [`ClassificationGraph`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MimeId(usize);

#[derive(Debug, Clone)]
struct MimeNode {
    name: String,
    comment: String,
    generic_icon: Option<String>,
    parents: Vec<String>,
    alias_of: Option<String>,
}

/// The process-wide content-type table.
///
/// Built once (see [`ClassificationGraph::builtin`]), optionally extended
/// with [`ClassificationGraph::register`], then shared read-only.
#[derive(Debug, Clone)]
pub struct ClassificationGraph {
    nodes: Vec<MimeNode>,
    by_name: HashMap<String, usize>,
    extensions: HashMap<String, String>,
    default: usize,
    directory: usize,
}

impl ClassificationGraph {
    /// Creates the graph from the compiled table.
    pub fn builtin() -> Self {
        let mut graph = Self {
            nodes: Vec::with_capacity(TYPES.len()),
            by_name: HashMap::with_capacity(TYPES.len()),
            extensions: HashMap::with_capacity(EXTENSIONS.len()),
            default: 0,
            directory: 0,
        };

        for t in TYPES {
            graph.insert_node(MimeNode {
                name: t.name.to_owned(),
                comment: t.comment.to_owned(),
                generic_icon: non_empty(t.generic_icon),
                parents: non_empty(t.parent).into_iter().collect(),
                alias_of: non_empty(t.alias_of),
            });
        }
        for (ext, name) in EXTENSIONS {
            graph.extensions.insert((*ext).to_owned(), (*name).to_owned());
        }

        graph.default = graph.by_name[DEFAULT_TYPE];
        graph.directory = graph.by_name[DIRECTORY_TYPE];
        graph
    }

    /// Adds a type, replacing any type of the same name, and maps its
    /// extensions to it.
    pub fn register(&mut self, def: MimeTypeDef) {
        for ext in &def.extensions {
            self.register_extension(ext, &def.name);
        }
        self.insert_node(MimeNode {
            name: def.name,
            comment: def.comment,
            generic_icon: def.generic_icon.filter(|icon| !icon.is_empty()),
            parents: def.parents,
            alias_of: def.alias_of.filter(|alias| !alias.is_empty()),
        });
    }

    /// Maps `extension` (with or without its dot) to the type `name`.
    pub fn register_extension(&mut self, extension: &str, name: &str) {
        let ext = if extension.starts_with('.') {
            extension.to_owned()
        } else {
            format!(".{extension}")
        };
        self.extensions.insert(ext, name.to_owned());
    }

    fn insert_node(&mut self, node: MimeNode) {
        match self.by_name.get(&node.name) {
            Some(&index) => self.nodes[index] = node,
            None => {
                self.by_name.insert(node.name.clone(), self.nodes.len());
                self.nodes.push(node);
            }
        }
    }

    /// Looks up a type by name.
    pub fn lookup(&self, name: &str) -> Option<TypeNode<'_>> {
        self.by_name.get(name).map(|&index| self.node(index))
    }

    /// Looks up a type by name, falling back to the default type.
    pub fn get(&self, name: &str) -> TypeNode<'_> {
        self.lookup(name).unwrap_or_else(|| self.default_type())
    }

    /// Returns the type for a previously resolved id.
    pub fn by_id(&self, id: MimeId) -> TypeNode<'_> {
        if id.0 < self.nodes.len() {
            self.node(id.0)
        } else {
            self.default_type()
        }
    }

    /// Classifies a file by its extension.
    ///
    /// The extension is matched case-sensitively first, then lowercased.
    /// Unknown extensions resolve to `application/octet-stream`.
    pub fn resolve(&self, file_name: &str) -> TypeNode<'_> {
        let ext = path::extension(file_name);
        let name = self
            .extensions
            .get(ext)
            .or_else(|| self.extensions.get(&ext.to_lowercase()));
        match name {
            Some(name) => self.get(name),
            None => self.default_type(),
        }
    }

    /// The `application/octet-stream` fallback type.
    pub fn default_type(&self) -> TypeNode<'_> {
        self.node(self.default)
    }

    /// The fixed type of synthetic directories.
    pub fn directory_type(&self) -> TypeNode<'_> {
        self.node(self.directory)
    }

    /// Number of registered types.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always `false`: the default and directory types are always present.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    fn node(&self, index: usize) -> TypeNode<'_> {
        TypeNode { graph: self, index }
    }
}

impl Default for ClassificationGraph {
    fn default() -> Self {
        Self::builtin()
    }
}

fn non_empty(s: &str) -> Option<String> {
    (!s.is_empty()).then(|| s.to_owned())
}

/// A content type borrowed from its graph.
#[derive(Clone, Copy)]
pub struct TypeNode<'g> {
    graph: &'g ClassificationGraph,
    index: usize,
}

impl<'g> TypeNode<'g> {
    fn data(&self) -> &'g MimeNode {
        &self.graph.nodes[self.index]
    }

    pub fn id(&self) -> MimeId {
        MimeId(self.index)
    }

    /// The type name, e.g. `image/vnd.bliz-blp`.
    pub fn name(&self) -> &'g str {
        &self.data().name
    }

    /// Human-readable description shown in the Type column.
    ///
    /// An alias without its own comment borrows its target's; a type with
    /// no comment at all shows its name.
    pub fn comment(&self) -> &'g str {
        let data = self.data();
        if !data.comment.is_empty() {
            return &data.comment;
        }
        match self.alias_target() {
            Some(target) => target.comment(),
            None => &data.name,
        }
    }

    pub fn generic_icon(&self) -> Option<&'g str> {
        self.data().generic_icon.as_deref()
    }

    /// The type's own icon name: its name with `/` replaced by `-`.
    pub fn icon(&self) -> String {
        self.data().name.replace('/', "-")
    }

    pub fn alias_target(&self) -> Option<TypeNode<'g>> {
        self.data()
            .alias_of
            .as_deref()
            .and_then(|name| self.graph.lookup(name))
    }

    /// Declared parents in declaration order. Unknown names are skipped.
    pub fn parents(&self) -> Vec<TypeNode<'g>> {
        self.data()
            .parents
            .iter()
            .filter_map(|name| self.graph.lookup(name))
            .collect()
    }

    pub fn is_default(&self) -> bool {
        self.index == self.graph.default
    }

    pub fn is_directory(&self) -> bool {
        self.index == self.graph.directory
    }

    /// Picks the icon to display for this type.
    ///
    /// Tries, in order: the type's own icon; the alias target's chain, or
    /// when there is no alias each parent's chain in declaration order; the
    /// generic icon. Every step must be present in `theme`. Falls back to
    /// `application-octet-stream`.
    pub fn icon_for<T: IconTheme + ?Sized>(&self, theme: &T) -> String {
        self.themed_icon(theme)
            .unwrap_or_else(|| DEFAULT_ICON.to_owned())
    }

    fn themed_icon<T: IconTheme + ?Sized>(&self, theme: &T) -> Option<String> {
        let own = self.icon();
        if theme.has_icon(&own) {
            return Some(own);
        }

        let inherited = match self.alias_target() {
            Some(target) => target.themed_icon(theme),
            None => self
                .parents()
                .iter()
                .find_map(|parent| parent.themed_icon(theme)),
        };
        if inherited.is_some() {
            return inherited;
        }

        self.generic_icon()
            .filter(|icon| theme.has_icon(icon))
            .map(str::to_owned)
    }
}

impl PartialEq for TypeNode<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.graph, other.graph) && self.index == other.index
    }
}

impl Eq for TypeNode<'_> {}

impl fmt::Debug for TypeNode<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("TypeNode").field(&self.name()).finish()
    }
}

impl fmt::Display for TypeNode<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
