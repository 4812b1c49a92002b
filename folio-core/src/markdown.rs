//! Splits assistant replies into prose and fenced code blocks.

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    Text(String),
    Code {
        language: Option<String>,
        code: String,
    },
}

/// Splits on ```` ``` ```` fences. Code keeps its inner text minus the final
/// newline; an unterminated fence runs to the end of the input. Blank prose
/// between blocks is dropped.
pub fn split_blocks(input: &str) -> Vec<Block> {
    let mut blocks = Vec::new();
    let mut text = String::new();
    let mut fence: Option<(Option<String>, String)> = None;

    for line in input.split_inclusive('\n') {
        let trimmed = line.trim_start();

        match fence.as_mut() {
            None => match trimmed.strip_prefix("```") {
                Some(info) => {
                    push_text(&mut blocks, &mut text);
                    let language = info.trim();
                    let language = (!language.is_empty()).then(|| language.to_string());
                    fence = Some((language, String::new()));
                }
                None => text.push_str(line),
            },
            Some((_, code)) => {
                if trimmed.trim_end() == "```" {
                    if let Some((language, code)) = fence.take() {
                        blocks.push(code_block(language, code));
                    }
                } else {
                    code.push_str(line);
                }
            }
        }
    }

    if let Some((language, code)) = fence {
        blocks.push(code_block(language, code));
    }
    push_text(&mut blocks, &mut text);

    blocks
}

fn push_text(blocks: &mut Vec<Block>, text: &mut String) {
    let taken = std::mem::take(text);
    let trimmed = taken.trim_matches('\n');
    if !trimmed.trim().is_empty() {
        blocks.push(Block::Text(trimmed.to_string()));
    }
}

fn code_block(language: Option<String>, mut code: String) -> Block {
    if code.ends_with('\n') {
        code.pop();
        if code.ends_with('\r') {
            code.pop();
        }
    }
    Block::Code { language, code }
}
