// ============================================================
// Layer 1 — Interactive Session (REPL)
// ============================================================
// The front-end: one line per command, read from any BufRead.
//
//   :mode upload|passage   choose where the context comes from
//   :upload <path>         extract a document (pdf, docx, txt)
//   :passage <text>        type a passage (":passage" alone
//                          reads lines until a lone ".")
//   :question <text>       set the question
//   :answer                "Get Answer"
//   :generate              "Generate Questions"
//   :show                  current mode, question, context
//   :help / :quit
//
// Every failure is printed and the loop carries on: a broken
// upload or a failed model call ends that request, never the
// session. Only I/O errors on the terminal itself stop it.

use anyhow::Result;
use std::io::{BufRead, Write};
use std::path::PathBuf;

use crate::application::session::{InputMode, Session};
use crate::cli::render;
use crate::domain::traits::TextExtractor;

const HELP: &str = "\
Commands:
  :mode upload|passage   choose the input type
  :upload <path>         upload a document (.pdf, .docx, .txt)
  :passage <text>        enter a passage (alone: read lines until '.')
  :question <text>       set the question
  :answer                get an answer to the question
  :generate              generate questions from the context
  :show                  show the current input
  :help                  show this help
  :quit, :q              leave the session";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplCommand {
    Mode(String),
    Upload(PathBuf),
    Passage(Option<String>),
    Question(String),
    Answer,
    Generate,
    Show,
    Help,
    Quit,
    Empty,
    Unknown(String),
}

impl ReplCommand {
    pub fn parse(line: &str) -> Self {
        let line = line.trim();
        if line.is_empty() {
            return Self::Empty;
        }

        let (head, rest) = match line.split_once(char::is_whitespace) {
            Some((h, r)) => (h, r.trim()),
            None         => (line, ""),
        };

        match head {
            ":mode"              => Self::Mode(rest.to_string()),
            ":upload"            => Self::Upload(PathBuf::from(rest)),
            ":passage"           => Self::Passage((!rest.is_empty()).then(|| rest.to_string())),
            ":question"          => Self::Question(rest.to_string()),
            ":answer"            => Self::Answer,
            ":generate"          => Self::Generate,
            ":show"              => Self::Show,
            ":help" | ":h"       => Self::Help,
            ":quit" | ":q"
            | ":exit"            => Self::Quit,
            _                    => Self::Unknown(line.to_string()),
        }
    }
}

pub struct Repl<E: TextExtractor, R: BufRead, W: Write> {
    session: Session<E>,
    input:   R,
    output:  W,
    verbose: bool,
}

impl<E: TextExtractor, R: BufRead, W: Write> Repl<E, R, W> {
    pub fn new(session: Session<E>, input: R, output: W, verbose: bool) -> Self {
        Self { session, input, output, verbose }
    }

    /// Read commands until :quit or end of input.
    pub fn run(&mut self) -> Result<()> {
        writeln!(self.output, "Passage/document question answering. Type :help for commands.")?;

        loop {
            write!(self.output, "[{}]> ", self.session.mode())?;
            self.output.flush()?;

            let Some(line) = self.read_line()? else { break };
            match ReplCommand::parse(&line) {
                ReplCommand::Quit => break,
                command           => self.handle(command)?,
            }
        }

        writeln!(self.output, "Bye.")?;
        Ok(())
    }

    fn read_line(&mut self) -> Result<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }

    /// Lines up to a lone "." (or end of input), joined with newlines.
    fn read_block(&mut self) -> Result<String> {
        writeln!(self.output, "Enter the passage; finish with a line containing only '.'")?;
        let mut lines = Vec::new();
        while let Some(line) = self.read_line()? {
            if line.trim() == "." {
                break;
            }
            lines.push(line);
        }
        Ok(lines.join("\n"))
    }

    fn handle(&mut self, command: ReplCommand) -> Result<()> {
        match command {
            ReplCommand::Empty => {}

            ReplCommand::Help => writeln!(self.output, "{HELP}")?,

            ReplCommand::Mode(arg) => match arg.parse::<InputMode>() {
                Ok(mode) => {
                    self.session.set_mode(mode);
                    writeln!(self.output, "Input mode: {mode}")?;
                }
                Err(msg) => writeln!(self.output, "Warning: {msg}")?,
            },

            ReplCommand::Upload(path) => {
                if path.as_os_str().is_empty() {
                    writeln!(self.output, "Warning: usage is ':upload <path>'")?;
                    return Ok(());
                }
                match self.session.upload_file(&path) {
                    Ok(summary) => render::write_upload(&mut self.output, &summary)?,
                    Err(e)      => render::write_failure(&mut self.output, &e)?,
                }
            }

            ReplCommand::Passage(text) => {
                let text = match text {
                    Some(t) => t,
                    None    => self.read_block()?,
                };
                self.session.set_passage(text);
                writeln!(
                    self.output,
                    "Passage set ({} characters).",
                    self.session.context().chars().count()
                )?;
            }

            ReplCommand::Question(q) => {
                self.session.set_question(q);
            }

            ReplCommand::Answer => {
                writeln!(self.output, "Thinking...")?;
                match self.session.get_answer() {
                    Ok(answer) => render::write_answer(&mut self.output, &answer, self.verbose)?,
                    Err(e)     => render::write_failure(&mut self.output, &e)?,
                }
            }

            ReplCommand::Generate => {
                writeln!(self.output, "Generating questions...")?;
                match self.session.generate_questions() {
                    Ok(set) => render::write_questions(&mut self.output, &set)?,
                    Err(e)  => render::write_failure(&mut self.output, &e)?,
                }
            }

            ReplCommand::Show => {
                writeln!(self.output, "Input mode: {}", self.session.mode())?;
                if let Some(name) = self.session.upload_name() {
                    writeln!(self.output, "Uploaded:   {name}")?;
                }
                writeln!(self.output, "Question:   {}", self.session.question())?;
                let preview = self.session.context_preview();
                if preview.is_empty() {
                    writeln!(self.output, "Context:    (empty)")?;
                } else {
                    writeln!(self.output, "Context:\n{preview}")?;
                }
            }

            ReplCommand::Unknown(line) => {
                writeln!(self.output, "Unknown command '{line}'. Type :help for commands.")?;
            }

            ReplCommand::Quit => {}
        }
        Ok(())
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::session::tests::session;
    use crate::data::extractor::tests::pdf_with_pages;
    use crate::test_support::StubModels;
    use std::io::Cursor;
    use std::sync::Arc;

    fn run_script(models: Arc<StubModels>, script: &str) -> String {
        let mut out = Vec::new();
        {
            let mut repl = Repl::new(session(models), Cursor::new(script.to_string()), &mut out, false);
            repl.run().unwrap();
        }
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_parse_commands() {
        assert_eq!(ReplCommand::parse("  "), ReplCommand::Empty);
        assert_eq!(ReplCommand::parse(":answer"), ReplCommand::Answer);
        assert_eq!(ReplCommand::parse(":passage"), ReplCommand::Passage(None));
        assert_eq!(
            ReplCommand::parse(":question  What is it? "),
            ReplCommand::Question("What is it?".into())
        );
        assert_eq!(ReplCommand::parse(":upload a b.pdf"), ReplCommand::Upload(PathBuf::from("a b.pdf")));
        assert_eq!(ReplCommand::parse("hello"), ReplCommand::Unknown("hello".into()));
        assert_eq!(ReplCommand::parse(":q"), ReplCommand::Quit);
    }

    #[test]
    fn test_answer_flow() {
        let out = run_script(
            Arc::new(StubModels::new()),
            ":passage Paris is the capital of France.\n\
             :question What is the capital of France?\n\
             :answer\n:quit\n",
        );
        assert!(out.contains("Answer: Paris"));
        assert!(out.ends_with("Bye.\n"));
    }

    #[test]
    fn test_empty_context_warns_and_calls_nothing() {
        let models = Arc::new(StubModels::new());
        let out    = run_script(models.clone(), ":question anything\n:answer\n:generate\n");

        assert_eq!(out.matches("Warning:").count(), 2);
        assert!(!out.contains("Answer:"));
        assert_eq!(models.answer_calls(), 0);
        assert_eq!(models.generate_calls(), 0);
    }

    #[test]
    fn test_malformed_upload_does_not_end_session() {
        let dir  = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.pdf");
        std::fs::write(&path, b"definitely not a pdf").unwrap();

        let script = format!(
            ":upload {}\n:passage Paris is the capital of France.\n:generate\n:quit\n",
            path.display()
        );
        let out = run_script(Arc::new(StubModels::new()), &script);

        assert!(out.contains("Error: could not read pdf document 'broken.pdf'"));
        assert!(out.contains("  5. Question number 5?"));
    }

    #[test]
    fn test_missing_file_replaces_previous_upload() {
        let dir = tempfile::tempdir().unwrap();
        let old = dir.path().join("old.txt");
        std::fs::write(&old, "Paris is the capital of France.").unwrap();
        let missing = dir.path().join("missing.pdf");

        let models = Arc::new(StubModels::new());
        let script = format!(
            ":upload {}\n:upload {}\n:question What is the capital of France?\n:answer\n:show\n",
            old.display(),
            missing.display()
        );
        let out = run_script(models.clone(), &script);

        assert!(out.contains("Error: cannot read '"));
        assert!(out.contains("missing.pdf"));
        assert!(!out.contains("Answer: Paris"));
        assert!(!out.contains("Uploaded:   old.txt"));
        assert!(out.contains("Warning: Please provide a passage or upload a document."));
        assert_eq!(models.answer_calls(), 0);
    }

    #[test]
    fn test_upload_shows_preview() {
        let dir  = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.txt");
        std::fs::write(&path, "Paris   is the capital of France.").unwrap();

        let out = run_script(Arc::new(StubModels::new()), &format!(":upload {}\n:show\n", path.display()));
        assert!(out.contains("Extracted 33 characters from 'notes.txt'."));
        assert!(out.contains("Paris is the capital of France."));
        assert!(out.contains("Uploaded:   notes.txt"));
    }

    #[test]
    fn test_pdf_upload_then_answer() {
        let dir  = tempfile::tempdir().unwrap();
        let path = dir.path().join("capitals.pdf");
        std::fs::write(&path, pdf_with_pages(&["Paris is the capital of France."])).unwrap();

        let models = Arc::new(StubModels::new());
        let script = format!(
            ":upload {}\n:question What is the capital of France?\n:answer\n",
            path.display()
        );
        let out = run_script(models.clone(), &script);

        assert!(out.contains("from 'capitals.pdf'"));
        assert!(out.contains("Answer: Paris"));
        assert_eq!(models.answer_calls(), 1);
    }

    #[test]
    fn test_multiline_passage_block() {
        let models = Arc::new(StubModels::new());
        let out    = run_script(
            models,
            ":passage\nParis is the capital\nof France.\n.\n:question What is the capital of France?\n:answer\n",
        );
        assert!(out.contains("Passage set (31 characters)."));
        assert!(out.contains("Answer: Paris"));
    }

    #[test]
    fn test_unknown_mode_is_a_warning() {
        let out = run_script(Arc::new(StubModels::new()), ":mode video\n:mode passage\n");
        assert!(out.contains("Warning: unknown input mode 'video'"));
        assert!(out.contains("Input mode: passage"));
    }
}
