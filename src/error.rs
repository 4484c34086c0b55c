/// Errors raised while converting markdown or serializing the HTML tree.
///
/// Every variant aborts the whole document; no partial output is returned.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// A bold, italic or code delimiter was opened but never closed.
    #[error("matching `{delimiter}` delimiter not found in {text:?}")]
    MalformedDelimiter { delimiter: String, text: String },

    /// Image or link syntax was matched but could not be split out of the text.
    #[error("invalid markdown, {kind} `{markdown}` not closed properly")]
    MalformedLinkOrImage { kind: &'static str, markdown: String },

    /// The document has no level-1 heading.
    #[error("no level-1 heading found in document")]
    MissingTitle,

    /// A parent node without a tag.
    #[error("parent node is missing its tag")]
    MissingTag,

    /// A parent node without a children list.
    #[error("parent node <{tag}> is missing its children")]
    MissingChildren { tag: String },

    /// A block whose text does not have the shape of its block type.
    #[error("block does not match its {kind} classification: {block:?}")]
    UnclassifiedBlock { kind: &'static str, block: String },
}

pub type Result<T> = std::result::Result<T, Error>;
