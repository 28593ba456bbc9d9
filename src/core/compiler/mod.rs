//! Markup to hash-tree compiler
//!
//! Compiles the restricted tag markup into a tree of `{type, props, children}`
//! nodes:
//!
//! ```text
//! <table><tr><td>id</td></tr></table>
//!     -> table {} [ tr {} [ td {} "id" ] ]
//! ```
//!
//! Tags are matched one nesting level at a time and converted innermost
//! first, so a node's children exist before the node itself is built. Tag
//! names outside the compiler's vocabulary are matched and then dropped,
//! together with everything inside them.
//!
//! Node construction goes through a [`ConvertContext`]. The default
//! [`HashContext`] builds plain nodes; callers may supply their own context to
//! customize or observe node construction. The compiled tree is cached per
//! context instance.
//!
//! # Example
//!
//! ```
//! use ticketml::core::compiler::{Children, TreeCompiler};
//!
//! let compiler = TreeCompiler::new("<table><tr><td>id</td></tr></table>").unwrap();
//! let tree = compiler.run();
//! assert_eq!(tree[0].node_type, "table");
//! let cell = &tree[0].children.nodes()[0].children.nodes()[0];
//! assert_eq!(cell.children, Children::Text("id".to_string()));
//! ```

mod node;
mod parser;


use fxhash::FxHashSet;
use std::cell::RefCell;
use std::rc::Rc;

use crate::data::constants::DEFAULT_NODE_TYPES;
use crate::utils::error::{RenderError, RenderResult};

// Re-export public API
pub use node::{props, Children, HashNode, HashTree, Props};
pub use parser::{TagMatch, TagParser};

/// Builds hash-tree nodes for the compiler.
///
/// Returning `None` means "no node produced"; the compiler then leaves the
/// node out of its parent's children.
pub trait ConvertContext {
    fn convert(&self, node_type: &str, props: Props, children: Children) -> Option<HashNode>;
}

/// Default context: builds plain [`HashNode`]s
#[derive(Debug, Clone, Copy, Default)]
pub struct HashContext;

impl ConvertContext for HashContext {
    fn convert(&self, node_type: &str, props: Props, children: Children) -> Option<HashNode> {
        if node_type.is_empty() {
            return None;
        }
        Some(HashNode::new(node_type, props, children))
    }
}

struct CachedTree {
    context: Rc<dyn ConvertContext>,
    tree: Rc<HashTree>,
}

/// Compiler for one markup string
pub struct TreeCompiler {
    markup: String,
    parser: TagParser,
    default_context: Rc<dyn ConvertContext>,
    cache: RefCell<Option<CachedTree>>,
}

impl TreeCompiler {
    /// Create a compiler recognizing the default `table`/`tr`/`td` vocabulary
    pub fn new(markup: &str) -> RenderResult<Self> {
        Self::with_vocabulary(markup, DEFAULT_NODE_TYPES.iter().copied())
    }

    /// Create a compiler recognizing exactly the given tag names
    pub fn with_vocabulary<I, S>(markup: &str, vocabulary: I) -> RenderResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let vocabulary: FxHashSet<String> = vocabulary.into_iter().map(Into::into).collect();
        if vocabulary.is_empty() {
            return Err(RenderError::EmptyVocabulary);
        }

        Ok(Self {
            markup: markup.trim().to_string(),
            parser: TagParser::new(vocabulary),
            default_context: Rc::new(HashContext),
            cache: RefCell::new(None),
        })
    }

    /// Create a compiler from raw bytes, which must be UTF-8 text
    pub fn from_bytes(markup: &[u8]) -> RenderResult<Self> {
        let markup = std::str::from_utf8(markup)
            .map_err(|e| RenderError::invalid(format!("markup is not UTF-8 text: {}", e)))?;
        Self::new(markup)
    }

    /// The trimmed markup this compiler was built for
    pub fn markup(&self) -> &str {
        &self.markup
    }

    pub fn parser(&self) -> &TagParser {
        &self.parser
    }

    /// Compile with the default [`HashContext`]
    pub fn run(&self) -> Rc<HashTree> {
        let context = Rc::clone(&self.default_context);
        self.run_with(&context)
    }

    /// Compile with `context`.
    ///
    /// Calling again with the same context instance returns the cached tree;
    /// a different instance recompiles and replaces the cache.
    pub fn run_with(&self, context: &Rc<dyn ConvertContext>) -> Rc<HashTree> {
        if let Some(cached) = self.cache.borrow().as_ref() {
            if std::ptr::addr_eq(Rc::as_ptr(&cached.context), Rc::as_ptr(context)) {
                log::debug!("hash-tree cache hit");
                return Rc::clone(&cached.tree);
            }
        }

        log::debug!("compiling {} bytes of markup", self.markup.len());
        let tree = Rc::new(self.build(&self.markup, context.as_ref()));
        *self.cache.borrow_mut() = Some(CachedTree {
            context: Rc::clone(context),
            tree: Rc::clone(&tree),
        });
        tree
    }

    fn build(&self, content: &str, context: &dyn ConvertContext) -> Vec<HashNode> {
        TagParser::match_tags(content.trim())
            .into_iter()
            .filter_map(|tag| {
                if !self.parser.recognizes(tag.name) {
                    log::trace!("dropping unrecognized tag <{}>", tag.name);
                    return None;
                }
                let children = if TagParser::contains_tag(tag.inner) {
                    Children::Nodes(self.build(tag.inner, context))
                } else {
                    Children::Text(tag.inner.to_string())
                };
                context.convert(tag.name, TagParser::parse_props(tag.attrs), children)
            })
            .collect()
    }
}
