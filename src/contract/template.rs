use std::collections::BTreeMap;

/// Flat key to stringified value map fed into a template.
pub type TemplateData = BTreeMap<String, String>;

const OPEN: &str = "{{";
const CLOSE: &str = "}}";

#[derive(Debug, PartialEq, Eq)]
enum Token<'a> {
    Literal(&'a str),
    Placeholder(&'a str),
}

/// Splits a template into literal and `{{KEY}}` placeholder segments. An
/// opening marker without a matching close swallows nothing: the rest of the
/// template stays literal. A stray opening marker before a well-formed
/// placeholder is literal too; the placeholder is anchored at the last open
/// marker preceding its close.
fn tokenize(template: &str) -> Vec<Token<'_>> {
    let mut tokens = Vec::new();
    let mut rest = template;

    while let Some(open) = rest.find(OPEN) {
        let after_open = &rest[open + OPEN.len()..];
        match after_open.find(CLOSE) {
            Some(close) => {
                let span = &after_open[..close];
                let (literal_end, key) = match span.rfind(OPEN) {
                    Some(inner) => (open + OPEN.len() + inner, &span[inner + OPEN.len()..]),
                    None => (open, span),
                };
                if literal_end > 0 {
                    tokens.push(Token::Literal(&rest[..literal_end]));
                }
                tokens.push(Token::Placeholder(key));
                rest = &after_open[close + CLOSE.len()..];
            }
            None => break,
        }
    }

    if !rest.is_empty() {
        tokens.push(Token::Literal(rest));
    }

    tokens
}

/// Replaces every `{{KEY}}` placeholder with its value from `data`.
///
/// Substitution runs in a single pass over the tokenized template, so a value
/// that happens to contain a placeholder marker is never re-substituted.
/// Placeholders without a matching key stay in the output as literal text.
pub fn fill_template(template: &str, data: &TemplateData) -> String {
    let mut output = String::with_capacity(template.len());

    for token in tokenize(template) {
        match token {
            Token::Literal(text) => output.push_str(text),
            Token::Placeholder(key) => match data.get(key) {
                Some(value) => output.push_str(value),
                None => {
                    output.push_str(OPEN);
                    output.push_str(key);
                    output.push_str(CLOSE);
                }
            },
        }
    }

    output
}
