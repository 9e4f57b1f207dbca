use crate::console::Terminal;
use crate::errors::Result;

/// The answer to a yes/no/quit question.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confirmation {
    /// Go ahead with the change.
    Proceed,
    /// Leave this file alone and continue.
    Skip,
    /// Stop the whole run.
    AbortProcess,
}

impl Confirmation {
    /// Interprets a typed answer. Unrecognised input yields `None`.
    pub fn parse(answer: &str) -> Option<Self> {
        match answer.trim().to_lowercase().as_str() {
            "y" | "yes" => Some(Confirmation::Proceed),
            "n" | "no" => Some(Confirmation::Skip),
            "q" | "quit" => Some(Confirmation::AbortProcess),
            _ => None,
        }
    }
}

/// Asks `question` until a recognised answer is given.
///
/// Closed input counts as [`Confirmation::AbortProcess`].
pub fn ask(term: &mut dyn Terminal, question: &str) -> Result<Confirmation> {
    loop {
        let Some(answer) = term.prompt(question)? else {
            log::debug!("input closed while waiting for an answer");
            return Ok(Confirmation::AbortProcess);
        };

        match Confirmation::parse(&answer) {
            Some(choice) => return Ok(choice),
            None => term.warn(&format!(
                "Invalid choice '{answer}'. Please enter y, n, or q."
            ))?,
        }
    }
}
