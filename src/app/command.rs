//! コマンド解析

use crate::narration::SpeechEngine;
use std::ops::Range;
use std::path::PathBuf;

/// 対話コマンド
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Open(PathBuf),
    /// 最近開いたファイルを番号（1-based）で開く
    Reopen(usize),
    Find(String),
    Next,
    Previous,
    Clear,
    Show,
    Read(Option<Range<usize>>),
    Stop,
    Recent,
    Rate(u32),
    Voice(Option<String>),
    Engine(SpeechEngine),
    Status,
    Help,
    Quit,
}

/// ヘルプ表示
pub const HELP_TEXT: &str = "\
commands:
  open <path>         load a PDF or text file
  reopen <n>          open entry <n> from the recent list
  find <text>         search (case-insensitive)
  next | prev         move between matches
  clear               clear the search
  show                print the document with matches marked
  read [start end]    read the document or a character range aloud
  stop                stop reading
  recent              list recently opened files
  rate <wpm>          set speech rate
  voice [name]        set or reset the voice
  engine <name>       espeak-ng | espeak | say
  status              show document and search state
  help                show this help
  quit                exit";

impl Command {
    /// 1行を解析（空行は `None`）
    pub fn parse(line: &str) -> Option<Result<Command, String>> {
        let line = line.trim_end_matches(['\r', '\n']);
        let trimmed = line.trim_start();
        if trimmed.is_empty() {
            return None;
        }

        let (name, rest) = match trimmed.split_once(char::is_whitespace) {
            Some((name, rest)) => (name, rest),
            None => (trimmed, ""),
        };
        let arg = rest.trim();

        let command = match name.to_ascii_lowercase().as_str() {
            "open" | "o" => {
                if arg.is_empty() {
                    Err("open needs a file path".to_string())
                } else {
                    Ok(Command::Open(PathBuf::from(arg)))
                }
            }
            "reopen" => arg
                .parse::<usize>()
                .ok()
                .filter(|&n| n > 0)
                .map(Command::Reopen)
                .ok_or_else(|| "reopen needs an entry number".to_string()),
            // 検索語は前後の空白も含めてそのまま使う
            "find" | "f" | "/" => Ok(Command::Find(rest.to_string())),
            "next" | "n" => Ok(Command::Next),
            "prev" | "p" => Ok(Command::Previous),
            "clear" => Ok(Command::Clear),
            "show" => Ok(Command::Show),
            "read" | "r" => parse_range(arg).map(Command::Read),
            "stop" | "s" => Ok(Command::Stop),
            "recent" => Ok(Command::Recent),
            "rate" => arg
                .parse::<u32>()
                .map(Command::Rate)
                .map_err(|_| "rate needs a number of words per minute".to_string()),
            "voice" => Ok(Command::Voice(if arg.is_empty() {
                None
            } else {
                Some(arg.to_string())
            })),
            "engine" => SpeechEngine::from_name(arg)
                .map(Command::Engine)
                .ok_or_else(|| format!("unknown engine: {}", arg)),
            "status" => Ok(Command::Status),
            "help" | "?" => Ok(Command::Help),
            "quit" | "q" | "exit" => Ok(Command::Quit),
            other => Err(format!("Unknown command: {} (type 'help')", other)),
        };
        Some(command)
    }
}

fn parse_range(arg: &str) -> Result<Option<Range<usize>>, String> {
    if arg.is_empty() {
        return Ok(None);
    }

    let parts: Vec<&str> = arg.split_whitespace().collect();
    let [start, end] = parts.as_slice() else {
        return Err("read takes no arguments or <start> <end>".to_string());
    };
    let start = start
        .parse::<usize>()
        .map_err(|_| format!("invalid start offset: {}", start))?;
    let end = end
        .parse::<usize>()
        .map_err(|_| format!("invalid end offset: {}", end))?;
    if start >= end {
        return Err("selection end must be after its start".to_string());
    }
    Ok(Some(start..end))
}
