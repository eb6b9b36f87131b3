//! Per-request page chrome: the top toolbar and extra head markup.
//!
//! Middleware contributes to the chrome through request extensions; the
//! layouts render whatever ends up in it.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use maud::Markup;

/// Which layout a page is rendered with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Area {
    Public,
    Admin,
}

/// One entry of the top toolbar
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolbarNode {
    pub id: String,
    pub title: String,
    pub href: String,
    pub class: Option<String>,
}

impl ToolbarNode {
    /// DOM id of the rendered list item
    pub fn dom_id(&self) -> String {
        format!("wp-admin-bar-{}", self.id)
    }
}

#[derive(Debug, Clone, Default)]
pub struct Toolbar {
    nodes: Vec<ToolbarNode>,
}

impl Toolbar {
    /// Insert a node; a node with the same id replaces the earlier one
    pub fn add_node(&mut self, node: ToolbarNode) {
        match self.nodes.iter_mut().find(|n| n.id == node.id) {
            Some(existing) => *existing = node,
            None => self.nodes.push(node),
        }
    }

    pub fn nodes(&self) -> &[ToolbarNode] {
        &self.nodes
    }
}

#[derive(Debug, Clone, Default)]
pub struct PageChrome {
    pub toolbar: Toolbar,
    head: Vec<Markup>,
}

impl PageChrome {
    pub fn push_head(&mut self, markup: Markup) {
        self.head.push(markup);
    }

    pub fn head(&self) -> &[Markup] {
        &self.head
    }
}

#[axum::async_trait]
impl<S> FromRequestParts<S> for PageChrome
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(parts.extensions.get::<PageChrome>().cloned().unwrap_or_default())
    }
}
