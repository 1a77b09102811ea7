//! # Terminal Wizard
//!
//! Line-oriented front end for the registration wizard.
//!
//! ## Commands
//!
//! - `set <field> <value>` - Change a field (`set city` clears it)
//! - `next` / `prev` - Move between steps
//! - `submit` - Send the registration (last step only)
//! - `show` - Redraw the current step
//! - `help` - List commands
//! - `quit` - Leave without registering

use crate::handler::{RegistrationTransport, SubmissionHandler, SubmitOutcome};
use quickbill_core::{AdvanceOutcome, Field, Notification, Wizard};
use std::io::{self, BufRead, Write};
use std::str::FromStr;

const PROGRESS_WIDTH: usize = 30;

const HELP: &str = "\
Commands:
  set <field> <value>   change a field (e.g. set zipCode 62701)
  next                  validate this step and continue
  prev                  go back one step
  submit                send the registration (last step)
  show                  redraw the current step
  help                  show this help
  quit                  leave without registering";

// =============================================================================
// COMMAND PARSING
// =============================================================================

/// One line of user input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Set { field: Field, value: String },
    Next,
    Prev,
    Submit,
    Show,
    Help,
    Quit,
}

impl FromStr for Command {
    type Err = String;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim_start();
        let (word, rest) = line
            .split_once(char::is_whitespace)
            .unwrap_or((line.trim_end(), ""));

        match word.to_ascii_lowercase().as_str() {
            "set" => {
                let rest = rest.trim_start();
                let (name, value) = rest
                    .split_once(char::is_whitespace)
                    .unwrap_or((rest.trim_end(), ""));
                if name.is_empty() {
                    return Err("Usage: set <field> <value>".to_string());
                }
                let field = Field::from_str(name).map_err(|e| e.to_string())?;
                Ok(Command::Set {
                    field,
                    value: value.trim_end_matches(['\r', '\n']).to_string(),
                })
            }
            "next" | "n" => Ok(Command::Next),
            "prev" | "back" | "p" => Ok(Command::Prev),
            "submit" => Ok(Command::Submit),
            "show" | "" => Ok(Command::Show),
            "help" | "?" => Ok(Command::Help),
            "quit" | "exit" | "q" => Ok(Command::Quit),
            other => Err(format!("Unknown command '{}'. Type 'help'.", other)),
        }
    }
}

// =============================================================================
// RENDERING
// =============================================================================

/// `[#########---------------------] 33%`
#[must_use]
pub fn progress_bar(percent: u8) -> String {
    let percent = usize::from(percent.min(100));
    let filled = percent * PROGRESS_WIDTH / 100;
    format!(
        "[{}{}] {}%",
        "#".repeat(filled),
        "-".repeat(PROGRESS_WIDTH - filled),
        percent
    )
}

fn display_value(field: Field, value: &str) -> String {
    if field.is_secret() {
        "*".repeat(value.chars().count())
    } else {
        value.to_string()
    }
}

// =============================================================================
// PROMPT LOOP
// =============================================================================

/// Reads commands from `input` and draws the wizard to `output`.
pub struct Prompt<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompt<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Give back the output sink.
    pub fn into_output(self) -> W {
        self.output
    }

    /// Run until the user registers, quits, or input ends.
    ///
    /// Returns the success notification when an account was created.
    pub async fn run<T: RegistrationTransport>(
        &mut self,
        wizard: &mut Wizard,
        handler: &SubmissionHandler<T>,
    ) -> io::Result<Option<Notification>> {
        writeln!(self.output, "QuickBill registration. Type 'help' for commands.")?;
        self.render(wizard)?;

        let mut line = String::new();
        loop {
            write!(self.output, "> ")?;
            self.output.flush()?;

            line.clear();
            if self.input.read_line(&mut line)? == 0 {
                writeln!(self.output)?;
                return Ok(None);
            }

            let command = match line.trim_end_matches(['\r', '\n']).parse::<Command>() {
                Ok(command) => command,
                Err(message) => {
                    writeln!(self.output, "{}", message)?;
                    continue;
                }
            };

            match command {
                Command::Set { field, value } => {
                    wizard.set_value(field, value);
                    if let Some(message) = wizard.errors().get(field) {
                        writeln!(self.output, "  ! {}", message)?;
                    }
                }
                Command::Next => self.advance(wizard)?,
                Command::Prev => {
                    if wizard.back().is_none() {
                        writeln!(self.output, "Already on the first step.")?;
                    }
                    self.render(wizard)?;
                }
                Command::Submit => {
                    if let Some(note) = self.submit(wizard, handler).await? {
                        return Ok(Some(note));
                    }
                }
                Command::Show => self.render(wizard)?,
                Command::Help => writeln!(self.output, "{}", HELP)?,
                Command::Quit => return Ok(None),
            }
        }
    }

    fn advance(&mut self, wizard: &mut Wizard) -> io::Result<()> {
        match wizard.advance() {
            AdvanceOutcome::Advanced { .. } => {}
            AdvanceOutcome::Blocked { landed_on } => {
                writeln!(
                    self.output,
                    "Please fix the errors on step {} before continuing.",
                    landed_on.number()
                )?;
            }
            AdvanceOutcome::AtFinalStep => {
                writeln!(self.output, "This is the last step. Use 'submit'.")?;
            }
        }
        self.render(wizard)
    }

    async fn submit<T: RegistrationTransport>(
        &mut self,
        wizard: &mut Wizard,
        handler: &SubmissionHandler<T>,
    ) -> io::Result<Option<Notification>> {
        match handler.submit(wizard).await {
            SubmitOutcome::NotFinalStep => {
                writeln!(self.output, "Submit is only available on the last step.")?;
                Ok(None)
            }
            SubmitOutcome::Invalid(_) => {
                self.render(wizard)?;
                Ok(None)
            }
            SubmitOutcome::Resolved(note) if note.is_success() => {
                writeln!(self.output, "OK: {}", note.message)?;
                if let Some(route) = note.navigate_to {
                    writeln!(self.output, "Continue at {}", route)?;
                }
                Ok(Some(note))
            }
            SubmitOutcome::Resolved(note) => {
                writeln!(self.output, "Error: {}", note.message)?;
                Ok(None)
            }
        }
    }

    /// Draw the active step: title, progress, fields and their errors.
    pub fn render(&mut self, wizard: &Wizard) -> io::Result<()> {
        let step = wizard.step();
        writeln!(self.output)?;
        writeln!(self.output, "{}", step)?;
        writeln!(self.output, "{}", progress_bar(wizard.progress_percent()))?;

        for field in step.fields() {
            let value = display_value(*field, wizard.value(*field));
            match wizard.errors().get(*field) {
                Some(message) => writeln!(
                    self.output,
                    "  {:<16} {:<24} ! {}",
                    field.label(),
                    value,
                    message
                )?,
                None => writeln!(self.output, "  {:<16} {}", field.label(), value)?,
            }
        }

        if step.is_final() && !wizard.errors().is_empty() {
            writeln!(self.output, "Please fix the following:")?;
            for message in wizard.error_summary() {
                writeln!(self.output, "  - {}", message)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn progress_bar_fills_proportionally() {
        assert_eq!(progress_bar(0), format!("[{}] 0%", "-".repeat(30)));
        assert_eq!(
            progress_bar(33),
            format!("[{}{}] 33%", "#".repeat(9), "-".repeat(21))
        );
        assert_eq!(progress_bar(100), format!("[{}] 100%", "#".repeat(30)));
    }

    #[test]
    fn parse_set_keeps_spaces_in_value() {
        let command: Command = "set street 1 Main St".parse().expect("parse");
        assert_eq!(
            command,
            Command::Set {
                field: Field::Street,
                value: "1 Main St".into()
            }
        );
    }

    #[test]
    fn parse_set_accepts_tabs() {
        let command: Command = "set\tcity\tPune".parse().expect("parse");
        assert_eq!(
            command,
            Command::Set {
                field: Field::City,
                value: "Pune".into()
            }
        );
        assert_eq!("next\t".parse::<Command>(), Ok(Command::Next));
    }

    #[test]
    fn parse_set_without_value_clears() {
        let command: Command = "set zip_code".parse().expect("parse");
        assert_eq!(
            command,
            Command::Set {
                field: Field::ZipCode,
                value: String::new()
            }
        );
    }

    #[test]
    fn parse_rejects_unknown_input() {
        assert!("set nickname x".parse::<Command>().is_err());
        assert!("jump 3".parse::<Command>().is_err());
        assert!("set".parse::<Command>().is_err());
    }

    #[test]
    fn parse_aliases() {
        assert_eq!("n".parse::<Command>(), Ok(Command::Next));
        assert_eq!("BACK".parse::<Command>(), Ok(Command::Prev));
        assert_eq!("".parse::<Command>(), Ok(Command::Show));
        assert_eq!("q".parse::<Command>(), Ok(Command::Quit));
    }

    #[test]
    fn secrets_are_masked() {
        let mut wizard = Wizard::new();
        wizard.set_value(Field::Password, "hunter22");
        assert_eq!(display_value(Field::Password, wizard.value(Field::Password)), "********");
        assert_eq!(display_value(Field::City, "Pune"), "Pune");
    }
}
