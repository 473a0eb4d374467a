//! メインアプリケーション構造体
//!
//! 行単位のコマンドを読み取り、セッションを操作して結果を書き出す。

mod command;
mod render;

pub use command::{Command, HELP_TEXT};
pub use render::{excerpt, render_highlighted};

use crate::error::{ErrorDisplay, ErrorLevel, NarratorError, Result};
use crate::narration::NarrationConfig;
use crate::options::RunOptions;
use crate::search::SearchStatus;
use crate::session::ReaderSession;
use std::io::{BufRead, Write};
use std::path::Path;

/// 現在マッチの前後に表示する文字数
const EXCERPT_CONTEXT: usize = 30;

/// メインアプリケーション構造体
pub struct App {
    session: ReaderSession,
    running: bool,
}

impl App {
    /// オプションからアプリケーションを作成
    pub fn new(options: &RunOptions) -> Self {
        Self::with_session(ReaderSession::new(options.resolve_settings_path()))
    }

    /// セッションを指定して作成
    pub fn with_session(session: ReaderSession) -> Self {
        Self {
            session,
            running: true,
        }
    }

    pub fn session(&self) -> &ReaderSession {
        &self.session
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// アプリケーションを終了状態にする
    pub fn shutdown(&mut self) {
        self.running = false;
        if let Err(e) = self.session.stop_reading() {
            log::warn!("failed to stop narration on shutdown: {}", e);
        }
    }

    /// 入力が尽きるか quit まで対話ループを実行
    pub fn run<R: BufRead, W: Write>(&mut self, mut input: R, output: &mut W) -> Result<()> {
        let mut line = String::new();
        while self.running {
            write!(output, "> ")?;
            output.flush()?;

            line.clear();
            if input.read_line(&mut line)? == 0 {
                break;
            }
            self.execute_line(&line, output)?;
        }
        self.shutdown();
        Ok(())
    }

    /// 1行分のコマンドを実行
    pub fn execute_line<W: Write>(&mut self, line: &str, output: &mut W) -> Result<()> {
        match Command::parse(line) {
            None => Ok(()),
            Some(Err(message)) => {
                writeln!(output, "{}", message)?;
                Ok(())
            }
            Some(Ok(command)) => self.execute(command, output),
        }
    }

    /// 起動時に指定されたファイルを開く
    pub fn open_initial<W: Write>(&mut self, path: &Path, output: &mut W) -> Result<()> {
        self.open(path, output)
    }

    pub fn execute<W: Write>(&mut self, command: Command, output: &mut W) -> Result<()> {
        match command {
            Command::Open(path) => self.open(&path, output)?,
            Command::Reopen(number) => {
                let recent = self.session.recent_files();
                let path = number
                    .checked_sub(1)
                    .and_then(|idx| recent.get(idx))
                    .map(Path::to_path_buf);
                match path {
                    Some(path) => self.open(&path, output)?,
                    None => writeln!(output, "No recent file #{}", number)?,
                }
            }
            Command::Find(query) => {
                if query.is_empty() {
                    writeln!(output, "Enter a search term")?;
                } else {
                    let status = self.session.search(&query);
                    self.report_search(status, output)?;
                }
            }
            Command::Next => {
                self.session.find_next();
                self.report_current(output)?;
            }
            Command::Previous => {
                self.session.find_previous();
                self.report_current(output)?;
            }
            Command::Clear => {
                self.session.clear_search();
                writeln!(output, "Search cleared")?;
            }
            Command::Show => {
                let document = self.session.document();
                if document.is_empty() {
                    writeln!(output, "No document loaded")?;
                } else {
                    let rendered =
                        render_highlighted(document.text(), &self.session.highlights());
                    writeln!(output, "{}", rendered)?;
                }
            }
            Command::Read(selection) => match self.session.read_aloud(selection) {
                Ok(()) => writeln!(output, "Reading aloud")?,
                Err(e) => report_error(&e, output)?,
            },
            Command::Stop => match self.session.stop_reading() {
                Ok(()) => writeln!(output, "Stopped")?,
                Err(e) => report_error(&e, output)?,
            },
            Command::Recent => {
                let recent = self.session.recent_files();
                if recent.is_empty() {
                    writeln!(output, "No recent files")?;
                }
                for (idx, path) in recent.iter().enumerate() {
                    writeln!(output, "{}. {}", idx + 1, path.display())?;
                }
            }
            Command::Rate(rate) => {
                self.update_narration(output, |config| config.rate = rate)?;
            }
            Command::Voice(voice) => {
                self.update_narration(output, |config| config.voice = voice)?;
            }
            Command::Engine(engine) => {
                self.update_narration(output, |config| config.engine = engine)?;
            }
            Command::Status => self.report_status(output)?,
            Command::Help => writeln!(output, "{}", HELP_TEXT)?,
            Command::Quit => self.shutdown(),
        }
        Ok(())
    }

    fn open<W: Write>(&mut self, path: &Path, output: &mut W) -> Result<()> {
        match self.session.open(path) {
            Ok(document) => {
                writeln!(
                    output,
                    "Opened {} ({} characters)",
                    path.display(),
                    document.char_count()
                )?;
                if !document.has_readable_text() {
                    writeln!(output, "Warning: no text could be extracted")?;
                }
            }
            Err(e) => report_error(&e, output)?,
        }
        Ok(())
    }

    fn report_search<W: Write>(&self, status: SearchStatus, output: &mut W) -> Result<()> {
        if let Some(message) = status.message() {
            writeln!(output, "{}", message)?;
        }
        if matches!(status, SearchStatus::Found(_)) {
            self.report_current(output)?;
        }
        Ok(())
    }

    fn report_current<W: Write>(&self, output: &mut W) -> Result<()> {
        let Some(current) = self.session.current_match() else {
            writeln!(output, "No matches")?;
            return Ok(());
        };

        let result = self.session.search_result();
        let index = result.current_index().map_or(0, |idx| idx + 1);
        let text = self.session.document().text();
        writeln!(
            output,
            "Match {}/{} at {}: {}",
            index,
            result.len(),
            current.start,
            excerpt(text, &self.session.highlights(), current, EXCERPT_CONTEXT)
        )?;
        Ok(())
    }

    fn report_status<W: Write>(&mut self, output: &mut W) -> Result<()> {
        let reading = self.session.is_reading();
        let document = self.session.document();
        let name = document
            .path()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "(none)".to_string());
        writeln!(output, "Document: {} ({} characters)", name, document.char_count())?;

        let query = self.session.query();
        if !query.is_empty() {
            let result = self.session.search_result();
            writeln!(
                output,
                "Search: {:?} {}/{}",
                query,
                result.current_index().map_or(0, |idx| idx + 1),
                result.len()
            )?;
        }

        let config = self.session.narration_config();
        writeln!(
            output,
            "Narration: {} at {} wpm{}{}",
            config.engine.program(),
            config.rate,
            config
                .voice
                .as_deref()
                .map(|v| format!(", voice {}", v))
                .unwrap_or_default(),
            if reading { " (reading)" } else { "" }
        )?;
        Ok(())
    }

    fn update_narration<W, F>(&mut self, output: &mut W, change: F) -> Result<()>
    where
        W: Write,
        F: FnOnce(&mut NarrationConfig),
    {
        let mut config = self.session.narration_config().clone();
        change(&mut config);
        self.session.set_narration(config);
        let config = self.session.narration_config();
        writeln!(
            output,
            "Narration: {} at {} wpm",
            config.engine.program(),
            config.rate
        )?;
        Ok(())
    }
}

fn report_error<W: Write>(error: &NarratorError, output: &mut W) -> Result<()> {
    let display = ErrorDisplay::new(error);
    match display.level {
        ErrorLevel::Warning => log::warn!("{}", error),
        ErrorLevel::Error => log::error!("{}", error),
    }
    writeln!(output, "{}", display.message)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::PlainTextExtractor;
    use crate::narration::CommandNarrator;
    use crate::settings::Settings;

    fn app_with_text(text: &str) -> App {
        let mut session = ReaderSession::with_parts(
            Settings::default(),
            None,
            Box::new(PlainTextExtractor::new()),
            Box::new(CommandNarrator::new()),
        );
        session.load_text(text);
        App::with_session(session)
    }

    fn run_lines(app: &mut App, lines: &[&str]) -> String {
        let mut out = Vec::new();
        for line in lines {
            app.execute_line(line, &mut out).unwrap();
        }
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn find_next_clear_workflow() {
        let mut app = app_with_text("the cat sat on the mat");
        let out = run_lines(&mut app, &["find at", "next", "clear"]);
        let lines: Vec<&str> = out.lines().collect();

        assert_eq!(lines[0], "Found 3 matches");
        assert!(lines[1].starts_with("Match 1/3 at 5: "));
        assert!(lines[2].starts_with("Match 2/3 at 9: "));
        assert_eq!(lines[3], "Search cleared");
        assert!(app.session().search_result().is_empty());
    }

    #[test]
    fn not_found_and_empty_query() {
        let mut app = app_with_text("hello");
        let out = run_lines(&mut app, &["find xyz", "find"]);
        assert_eq!(out, "No matches found\nEnter a search term\n");
    }

    #[test]
    fn show_marks_matches() {
        let mut app = app_with_text("Hello hello");
        let out = run_lines(&mut app, &["find HELLO", "show"]);
        assert!(out.ends_with(">>Hello<< [hello]\n"));
    }

    #[test]
    fn quit_stops_the_loop() {
        let mut app = app_with_text("x");
        let mut out = Vec::new();
        app.run("quit\nfind x\n".as_bytes(), &mut out).unwrap();
        assert!(!app.is_running());
        assert_eq!(String::from_utf8(out).unwrap(), "> ");
    }
}
