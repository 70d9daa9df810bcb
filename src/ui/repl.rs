use crate::clock::Clock;
use crate::input::{handle_line, Flow, Prompter};
use crate::tracker::Tracker;
use anyhow::{Context, Result};
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

/// Line editor that also answers follow-up prompts
pub struct LinePrompter {
    editor: DefaultEditor,
}

impl LinePrompter {
    pub fn new() -> Result<Self> {
        let editor = DefaultEditor::new().context("Failed to initialize line editor")?;
        Ok(Self { editor })
    }
}

impl Prompter for LinePrompter {
    fn ask(&mut self, label: &str) -> Option<String> {
        match self.editor.readline(label) {
            Ok(answer) => Some(answer),
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => None,
            Err(e) => {
                log::warn!("Failed to read answer: {}", e);
                None
            }
        }
    }
}

/// Interactive session: one command per line until exit, EOF or Ctrl-C
pub fn run<C: Clock>(tracker: &mut Tracker<C>) -> Result<()> {
    let mut prompter = LinePrompter::new()?;
    super::print_banner();

    loop {
        let line = match prompter.editor.readline(">> ") {
            Ok(line) => line,
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => {
                println!();
                break;
            }
            Err(e) => return Err(e).context("Failed to read command"),
        };

        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if let Err(e) = prompter.editor.add_history_entry(line) {
            log::debug!("Could not record history entry: {}", e);
        }

        match handle_line(tracker, line, &mut prompter) {
            Ok(Flow::Continue) => {}
            Ok(Flow::Exit) => break,
            Err(e) => {
                // Storage failed for this command; the session stays usable
                log::error!("Command '{}' failed: {}", line, e);
                super::print_error(&format!("Error: {}", e));
            }
        }
    }

    super::print_goodbye();
    Ok(())
}
