//! Best-effort XML indenter.
//!
//! This is not a parser: it splits markup into tags and text runs and
//! re-indents them. Anything it cannot balance is returned unchanged.

const INDENT: &str = "  ";

#[derive(Debug, PartialEq, Eq)]
enum Token<'a> {
    /// Declarations, comments, CDATA and doctype
    Special(&'a str),
    Open(&'a str),
    Close(&'a str),
    SelfClosing(&'a str),
    Text(&'a str),
}

fn tokenize(content: &str) -> Option<Vec<Token<'_>>> {
    let mut tokens = Vec::new();
    let mut rest = content;

    while !rest.is_empty() {
        if rest.starts_with('<') {
            let end = if rest.starts_with("<!--") {
                rest.find("-->").map(|i| i + 3)
            } else if rest.starts_with("<![CDATA[") {
                rest.find("]]>").map(|i| i + 3)
            } else {
                rest.find('>').map(|i| i + 1)
            };
            let end = end?;
            let tag = &rest[..end];
            tokens.push(if tag.starts_with("<?") || tag.starts_with("<!") {
                Token::Special(tag)
            } else if tag.starts_with("</") {
                Token::Close(tag)
            } else if tag.ends_with("/>") {
                Token::SelfClosing(tag)
            } else {
                Token::Open(tag)
            });
            rest = &rest[end..];
        } else {
            let end = rest.find('<').unwrap_or(rest.len());
            let text = rest[..end].trim();
            if !text.is_empty() {
                tokens.push(Token::Text(text));
            }
            rest = &rest[end..];
        }
    }
    Some(tokens)
}

fn render(tokens: &[Token<'_>]) -> Option<String> {
    let mut lines: Vec<String> = Vec::with_capacity(tokens.len());
    let mut depth: usize = 0;
    let mut i = 0;

    while i < tokens.len() {
        let pad = INDENT.repeat(depth);
        match tokens[i] {
            Token::Open(open) => {
                // <a>text</a> stays on one line
                if let (Some(Token::Text(text)), Some(Token::Close(close))) =
                    (tokens.get(i + 1), tokens.get(i + 2))
                {
                    lines.push(format!("{pad}{open}{text}{close}"));
                    i += 3;
                    continue;
                }
                lines.push(format!("{pad}{open}"));
                depth += 1;
            }
            Token::Close(close) => {
                depth = depth.checked_sub(1)?;
                lines.push(format!("{}{close}", INDENT.repeat(depth)));
            }
            Token::SelfClosing(tag) | Token::Special(tag) | Token::Text(tag) => {
                lines.push(format!("{pad}{tag}"));
            }
        }
        i += 1;
    }

    (depth == 0).then(|| lines.join("\n"))
}

/// Re-indents XML text with 2 spaces per level.
///
/// Returns the input unchanged when it does not look like balanced markup.
#[must_use]
pub fn pretty(content: &str) -> String {
    let trimmed = content.trim();
    if !trimmed.starts_with('<') {
        return content.to_string();
    }
    tokenize(trimmed)
        .and_then(|tokens| render(&tokens))
        .unwrap_or_else(|| {
            tracing::debug!("XML body left unformatted");
            content.to_string()
        })
}
