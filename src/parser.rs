use crate::block::BlockType;
use crate::error::{Error, Result};
use crate::html::HtmlNode;
use crate::inline::inline_to_html;

const FENCE: &str = "```";

/// Split a document into blocks of consecutive non-blank lines.
///
/// Lines are right-trimmed and joined with `\n`. Blank lines only separate
/// blocks, so leading and trailing blank lines never produce empty blocks.
pub fn split_blocks(markdown: &str) -> Vec<String> {
    let mut blocks = Vec::new();
    let mut current: Vec<&str> = Vec::new();

    for line in markdown.lines() {
        let line = line.trim_end();
        if line.is_empty() {
            if !current.is_empty() {
                blocks.push(current.join("\n"));
                current.clear();
            }
        } else {
            current.push(line);
        }
    }
    if !current.is_empty() {
        blocks.push(current.join("\n"));
    }

    blocks
}

/// Classify a block. Rules are tried in precedence order and paragraph is the fallback.
pub fn classify(block: &str) -> BlockType {
    if let Some(level) = heading_level(block) {
        return BlockType::Heading(level);
    }

    if block.lines().all(|line| line.starts_with('>')) {
        return BlockType::Quote;
    }

    if block.lines().all(|line| line.starts_with("- ")) {
        return BlockType::UnorderedList;
    }

    if block
        .lines()
        .enumerate()
        .all(|(i, line)| line.starts_with(&ordered_marker(i)))
    {
        return BlockType::OrderedList;
    }

    if is_fenced(block) {
        return BlockType::Code;
    }

    BlockType::Paragraph
}

/// Level of a `#`..`######` heading marker followed by a space.
fn heading_level(block: &str) -> Option<u8> {
    let hashes = block.bytes().take_while(|&b| b == b'#').count();
    if (1..=6).contains(&hashes) && block[hashes..].starts_with(' ') {
        Some(hashes as u8)
    } else {
        None
    }
}

fn ordered_marker(index: usize) -> String {
    format!("{}. ", index + 1)
}

fn is_fenced(block: &str) -> bool {
    block.len() >= 2 * FENCE.len() && block.starts_with(FENCE) && block.ends_with(FENCE)
}

/// Render one classified block to its HTML element.
///
/// Fails with [`Error::UnclassifiedBlock`] if the text does not have the
/// shape `kind` requires.
pub fn render_block(block: &str, kind: BlockType) -> Result<HtmlNode> {
    let mismatch = || Error::UnclassifiedBlock {
        kind: kind.name(),
        block: block.to_string(),
    };

    match kind {
        BlockType::Heading(level) => {
            if heading_level(block) != Some(level) {
                return Err(mismatch());
            }
            let text = &block[usize::from(level) + 1..];
            Ok(HtmlNode::parent(&format!("h{level}"), inline_to_html(text)?))
        }
        BlockType::Code => {
            if !is_fenced(block) {
                return Err(mismatch());
            }
            let lines: Vec<&str> = block.split('\n').collect();
            let mut code = if lines.len() > 2 {
                lines[1..lines.len() - 1].join("\n")
            } else {
                String::new()
            };
            code.push('\n');
            Ok(HtmlNode::parent(
                "pre",
                vec![HtmlNode::parent("code", vec![HtmlNode::text(code)])],
            ))
        }
        BlockType::Quote => {
            let mut lines = Vec::new();
            for line in block.lines() {
                if !line.starts_with('>') {
                    return Err(mismatch());
                }
                lines.push(line.trim_start_matches('>').trim());
            }
            let text = lines.join(" ").replace("  ", " ");
            Ok(HtmlNode::parent("blockquote", inline_to_html(&text)?))
        }
        BlockType::UnorderedList => {
            let mut items = Vec::new();
            for line in block.lines() {
                let text = line.strip_prefix("- ").ok_or_else(mismatch)?;
                items.push(HtmlNode::parent("li", inline_to_html(text)?));
            }
            Ok(HtmlNode::parent("ul", items))
        }
        BlockType::OrderedList => {
            let mut items = Vec::new();
            for (i, line) in block.lines().enumerate() {
                let text = line
                    .strip_prefix(ordered_marker(i).as_str())
                    .ok_or_else(mismatch)?;
                items.push(HtmlNode::parent("li", inline_to_html(text)?));
            }
            Ok(HtmlNode::parent("ol", items))
        }
        BlockType::Paragraph => {
            let text = block.lines().collect::<Vec<_>>().join(" ");
            Ok(HtmlNode::parent("p", inline_to_html(&text)?))
        }
    }
}

/// Parse a whole document into a `div` holding one element per block.
pub fn parse_document(markdown: &str) -> Result<HtmlNode> {
    let blocks = split_blocks(markdown);
    tracing::debug!(block_count = blocks.len(), "Split document into blocks");

    let children = blocks
        .iter()
        .map(|block| render_block(block, classify(block)))
        .collect::<Result<Vec<_>>>()?;

    Ok(HtmlNode::parent("div", children))
}

/// Text of the first level-1 heading in the document.
pub fn extract_title(markdown: &str) -> Result<String> {
    split_blocks(markdown)
        .iter()
        .find(|block| classify(block) == BlockType::Heading(1))
        .map(|block| block.trim_start_matches('#').trim().to_string())
        .ok_or(Error::MissingTitle)
}
