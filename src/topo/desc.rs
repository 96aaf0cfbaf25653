//! 行格式拓扑描述
//!
//! 每行一条记录，以单个字母开头：
//!
//! ```text
//! h <host>
//! s <switch>
//! l <nodeA> <nodeB> <rate_bps>
//! t <from> <to> <message...>
//! ```
//!
//! 记录可以任意顺序出现；空行与 `#` 开头的行被忽略。
//! 传输消息是第二个字段之后的全部内容（保留内部空格）。

use super::scenario::{LinkSpec, LoadError, ScenarioSpec, TransferSpec};

pub fn parse_description(text: &str) -> Result<ScenarioSpec, LoadError> {
    let mut spec = ScenarioSpec::default();

    for (i, raw) in text.lines().enumerate() {
        let line = i + 1;
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        let err = |reason: &str| LoadError::Parse {
            line,
            reason: reason.to_string(),
        };

        let (tag, rest) = split_token(trimmed);
        match tag {
            "h" => spec.hosts.push(node_name(rest).ok_or_else(|| err("expected `h <name>`"))?),
            "s" => spec
                .switches
                .push(node_name(rest).ok_or_else(|| err("expected `s <name>`"))?),
            "l" => {
                let mut fields = rest.split_whitespace();
                let (Some(a), Some(b), Some(rate), None) =
                    (fields.next(), fields.next(), fields.next(), fields.next())
                else {
                    return Err(err("expected `l <nodeA> <nodeB> <rate_bps>`"));
                };
                let rate_bps = rate
                    .parse::<u64>()
                    .map_err(|_| err(&format!("invalid data rate `{rate}`")))?;
                spec.links.push(LinkSpec {
                    a: a.to_string(),
                    b: b.to_string(),
                    rate_bps,
                    loss: None,
                    delay_ms: None,
                });
            }
            "t" => {
                let (from, rest) = split_token(rest);
                let (to, message) = split_token(rest);
                if from.is_empty() || to.is_empty() {
                    return Err(err("expected `t <from> <to> <message>`"));
                }
                spec.transfers.push(TransferSpec {
                    from: from.to_string(),
                    to: to.to_string(),
                    message: message.to_string(),
                });
            }
            other => return Err(err(&format!("unknown record type `{other}`"))),
        }
    }

    Ok(spec)
}

/// 切出第一个空白分隔的字段，返回 (字段, 去掉前导空白的剩余部分)
fn split_token(s: &str) -> (&str, &str) {
    let s = s.trim_start();
    match s.split_once(char::is_whitespace) {
        Some((head, tail)) => (head, tail.trim_start()),
        None => (s, ""),
    }
}

fn node_name(rest: &str) -> Option<String> {
    let (name, tail) = split_token(rest);
    (!name.is_empty() && tail.is_empty()).then(|| name.to_string())
}
