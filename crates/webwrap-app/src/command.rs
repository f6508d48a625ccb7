// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Line commands accepted by the headless host.

/// One host event, as typed on stdin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Raw string posted by the content.
    Msg(String),
    Online,
    Offline,
    Retry,
    Fail {
        code: Option<i64>,
        description: String,
    },
    Load,
    Loaded,
    Back,
    Nav(String),
    Notify(String),
    Quit,
}

impl Command {
    pub fn parse(line: &str) -> Result<Self, String> {
        let line = line.trim_start();
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line.trim_end(), ""),
        };

        let command = match word {
            "msg" => Command::Msg(required(word, rest)?.to_string()),
            "online" => Command::Online,
            "offline" => Command::Offline,
            "retry" => Command::Retry,
            "fail" => {
                let rest = required(word, rest)?;
                match rest.split_once(char::is_whitespace) {
                    Some((code, description)) if code.parse::<i64>().is_ok() => Command::Fail {
                        code: code.parse().ok(),
                        description: description.trim().to_string(),
                    },
                    _ => match rest.parse::<i64>() {
                        Ok(code) => Command::Fail {
                            code: Some(code),
                            description: String::new(),
                        },
                        Err(_) => Command::Fail {
                            code: None,
                            description: rest.to_string(),
                        },
                    },
                }
            }
            "load" => Command::Load,
            "loaded" => Command::Loaded,
            "back" => Command::Back,
            "nav" => Command::Nav(required(word, rest)?.to_string()),
            "notify" => Command::Notify(required(word, rest)?.to_string()),
            "quit" | "exit" => Command::Quit,
            "" => return Err("empty line".into()),
            other => return Err(format!("unknown command {other:?}")),
        };
        Ok(command)
    }
}

fn required<'a>(word: &str, rest: &'a str) -> Result<&'a str, String> {
    if rest.is_empty() {
        Err(format!("{word} needs an argument"))
    } else {
        Ok(rest)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn simple_words() {
        assert_eq!(Command::parse("online"), Ok(Command::Online));
        assert_eq!(Command::parse("  offline  "), Ok(Command::Offline));
        assert_eq!(Command::parse("quit"), Ok(Command::Quit));
        assert_eq!(Command::parse("loaded"), Ok(Command::Loaded));
    }

    #[test]
    fn msg_keeps_the_raw_payload() {
        assert_eq!(
            Command::parse(r#"msg {"type":"share","data":{"text":"a b"}}"#),
            Ok(Command::Msg(r#"{"type":"share","data":{"text":"a b"}}"#.into()))
        );
        assert_eq!(Command::parse("msg reload"), Ok(Command::Msg("reload".into())));
        assert!(Command::parse("msg").is_err());
    }

    #[test]
    fn fail_with_and_without_code() {
        assert_eq!(
            Command::parse("fail -2 net::ERR_INTERNET_DISCONNECTED"),
            Ok(Command::Fail {
                code: Some(-2),
                description: "net::ERR_INTERNET_DISCONNECTED".into()
            })
        );
        assert_eq!(
            Command::parse("fail SSL handshake failed"),
            Ok(Command::Fail {
                code: None,
                description: "SSL handshake failed".into()
            })
        );
        assert_eq!(
            Command::parse("fail 404"),
            Ok(Command::Fail {
                code: Some(404),
                description: String::new()
            })
        );
    }

    #[test]
    fn unknown_and_empty_lines_are_errors() {
        assert!(Command::parse("").is_err());
        assert!(Command::parse("dance").is_err());
        assert!(Command::parse("nav").is_err());
    }
}
