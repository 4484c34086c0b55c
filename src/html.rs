use crate::error::{Error, Result};

/// Ordered `key="value"` pairs rendered on the opening tag.
pub type Attributes = Vec<(String, String)>;

/// A node in the generated HTML tree.
///
/// Use [`HtmlNode::text`], [`HtmlNode::leaf`] and [`HtmlNode::parent`] to
/// build well-formed nodes. The variants are public so callers can also build
/// nodes that [`HtmlNode::to_html`] will reject.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HtmlNode {
    /// A node holding a value. Without a tag it renders as the bare value.
    Leaf {
        tag: Option<String>,
        value: String,
        attrs: Attributes,
    },
    /// A tagged node owning an ordered list of children.
    Parent {
        tag: Option<String>,
        children: Option<Vec<HtmlNode>>,
        attrs: Attributes,
    },
}

impl HtmlNode {
    /// Untagged text.
    pub fn text(value: impl Into<String>) -> Self {
        HtmlNode::Leaf {
            tag: None,
            value: value.into(),
            attrs: Attributes::new(),
        }
    }

    pub fn leaf(tag: &str, value: impl Into<String>) -> Self {
        HtmlNode::Leaf {
            tag: Some(tag.to_string()),
            value: value.into(),
            attrs: Attributes::new(),
        }
    }

    pub fn parent(tag: &str, children: Vec<HtmlNode>) -> Self {
        HtmlNode::Parent {
            tag: Some(tag.to_string()),
            children: Some(children),
            attrs: Attributes::new(),
        }
    }

    /// Append an attribute, keeping insertion order.
    pub fn with_attr(mut self, key: &str, value: impl Into<String>) -> Self {
        match &mut self {
            HtmlNode::Leaf { attrs, .. } | HtmlNode::Parent { attrs, .. } => {
                attrs.push((key.to_string(), value.into()));
            }
        }
        self
    }

    pub fn tag(&self) -> Option<&str> {
        match self {
            HtmlNode::Leaf { tag, .. } | HtmlNode::Parent { tag, .. } => tag.as_deref(),
        }
    }

    pub fn children(&self) -> &[HtmlNode] {
        match self {
            HtmlNode::Parent {
                children: Some(children),
                ..
            } => children,
            _ => &[],
        }
    }

    /// Serialize the node and its subtree to markup.
    ///
    /// Values and attribute values are written as-is, without escaping.
    pub fn to_html(&self) -> Result<String> {
        let mut out = String::new();
        self.write_html(&mut out)?;
        Ok(out)
    }

    fn write_html(&self, out: &mut String) -> Result<()> {
        match self {
            HtmlNode::Leaf {
                tag: None, value, ..
            } => {
                out.push_str(value);
            }
            HtmlNode::Leaf {
                tag: Some(tag),
                value,
                attrs,
            } => {
                open_tag(tag, attrs, out);
                out.push_str(value);
                close_tag(tag, out);
            }
            HtmlNode::Parent { tag: None, .. } => return Err(Error::MissingTag),
            HtmlNode::Parent {
                tag: Some(tag),
                children: None,
                ..
            } => {
                return Err(Error::MissingChildren { tag: tag.clone() });
            }
            HtmlNode::Parent {
                tag: Some(tag),
                children: Some(children),
                attrs,
            } => {
                open_tag(tag, attrs, out);
                for child in children {
                    child.write_html(out)?;
                }
                close_tag(tag, out);
            }
        }
        Ok(())
    }
}

fn open_tag(tag: &str, attrs: &Attributes, out: &mut String) {
    out.push('<');
    out.push_str(tag);
    for (key, value) in attrs {
        out.push(' ');
        out.push_str(key);
        out.push_str("=\"");
        out.push_str(value);
        out.push('"');
    }
    out.push('>');
}

fn close_tag(tag: &str, out: &mut String) {
    out.push_str("</");
    out.push_str(tag);
    out.push('>');
}
