//! Interactive answers to the engine's decision points

use firelancer_codegen_core::{
    Result,
    command::{Choice, Decisions},
};
use std::cell::RefCell;
use std::io::{self, BufRead, Write};

/// Asks on a terminal. End of input or an empty answer where no default
/// exists cancels.
pub struct TerminalDecisions<R, W> {
    input: RefCell<R>,
    output: RefCell<W>,
}

impl TerminalDecisions<io::StdinLock<'static>, io::Stderr> {
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stderr())
    }
}

impl<R: BufRead, W: Write> TerminalDecisions<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self {
            input: RefCell::new(input),
            output: RefCell::new(output),
        }
    }

    fn read_line(&self) -> Result<Option<String>> {
        let mut line = String::new();
        let read = self.input.borrow_mut().read_line(&mut line)?;
        if read == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }
}

impl<R: BufRead, W: Write> Decisions for TerminalDecisions<R, W> {
    fn choose(&self, prompt: &str, options: &[String], allow_other: bool) -> Result<Choice<usize>> {
        {
            let mut out = self.output.borrow_mut();
            writeln!(out, "❓ {prompt}")?;
            for (index, option) in options.iter().enumerate() {
                writeln!(out, "  {}) {option}", index + 1)?;
            }
            if allow_other {
                writeln!(out, "  o) Other (enter a value)")?;
            }
            write!(out, "Select an option (empty to cancel): ")?;
            out.flush()?;
        }

        loop {
            let Some(answer) = self.read_line()? else {
                return Ok(Choice::Cancelled);
            };
            if answer.is_empty() {
                return Ok(Choice::Cancelled);
            }
            if allow_other && answer.eq_ignore_ascii_case("o") {
                return match self.input("Enter a value", None)? {
                    Choice::Selected(value) | Choice::Other(value) => Ok(Choice::Other(value)),
                    Choice::Cancelled => Ok(Choice::Cancelled),
                };
            }
            match answer.parse::<usize>() {
                Ok(n) if (1..=options.len()).contains(&n) => return Ok(Choice::Selected(n - 1)),
                _ => {
                    let mut out = self.output.borrow_mut();
                    write!(out, "Please enter a number between 1 and {}: ", options.len())?;
                    out.flush()?;
                }
            }
        }
    }

    fn input(&self, prompt: &str, default: Option<&str>) -> Result<Choice<String>> {
        {
            let mut out = self.output.borrow_mut();
            match default {
                Some(default) => write!(out, "❓ {prompt} [{default}]: ")?,
                None => write!(out, "❓ {prompt}: ")?,
            }
            out.flush()?;
        }

        Ok(match (self.read_line()?, default) {
            (None, _) => Choice::Cancelled,
            (Some(answer), Some(default)) if answer.is_empty() => {
                Choice::Selected(default.to_string())
            }
            (Some(answer), None) if answer.is_empty() => Choice::Cancelled,
            (Some(answer), _) => Choice::Selected(answer),
        })
    }
}
