use crate::error::{AppError, Result};
use crate::markup::Renderer;
use crate::resource::node::Node;

/// A blob with a renderer bound at construction.
pub struct Document<'r> {
    node: Node<'r>,
    renderer: Renderer,
}

impl<'r> Document<'r> {
    pub(crate) fn new(node: Node<'r>, renderer: Renderer) -> Self {
        Self { node, renderer }
    }

    /// Same document, rendered by `renderer` instead.
    pub fn with_renderer(self, renderer: Renderer) -> Self {
        Self { renderer, ..self }
    }

    pub fn node(&self) -> &Node<'r> {
        &self.node
    }

    pub fn renderer(&self) -> Renderer {
        self.renderer
    }

    pub fn text(&self) -> Result<&str> {
        let data = self.node.object()?.data();
        std::str::from_utf8(data).map_err(|source| AppError::Encoding {
            path: self.node.path().git_path(),
            source,
        })
    }

    pub fn render(&self) -> Result<String> {
        Ok(self.renderer.render(self.text()?))
    }
}

/// A blob served as-is.
pub struct OpaqueFile<'r> {
    node: Node<'r>,
}

impl<'r> OpaqueFile<'r> {
    pub(crate) fn new(node: Node<'r>) -> Self {
        Self { node }
    }

    pub fn node(&self) -> &Node<'r> {
        &self.node
    }

    pub fn data(&self) -> Result<&[u8]> {
        Ok(self.node.object()?.data())
    }

    pub fn size(&self) -> Result<usize> {
        Ok(self.data()?.len())
    }
}
