/// Style of an inline text span
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpanKind {
    Normal,
    Bold,
    Italic,
    Code,
    Link,
    Image,
}

/// A run of inline text with a single style.
///
/// `target` holds the URL for links and images and is `None` otherwise.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    pub kind: SpanKind,
    pub text: String,
    pub target: Option<String>,
}

impl Span {
    pub fn new(kind: SpanKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
            target: None,
        }
    }

    pub fn normal(text: impl Into<String>) -> Self {
        Self::new(SpanKind::Normal, text)
    }

    pub fn link(text: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            kind: SpanKind::Link,
            text: text.into(),
            target: Some(url.into()),
        }
    }

    pub fn image(alt: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            kind: SpanKind::Image,
            text: alt.into(),
            target: Some(url.into()),
        }
    }
}

/// Block-level element types a line group can be classified as
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockType {
    /// Heading with its level (1-6)
    Heading(u8),
    Code,
    Quote,
    UnorderedList,
    OrderedList,
    Paragraph,
}

impl BlockType {
    pub fn name(self) -> &'static str {
        match self {
            BlockType::Heading(_) => "heading",
            BlockType::Code => "code",
            BlockType::Quote => "quote",
            BlockType::UnorderedList => "unordered_list",
            BlockType::OrderedList => "ordered_list",
            BlockType::Paragraph => "paragraph",
        }
    }
}
