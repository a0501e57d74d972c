use anyhow::Result;
use client::{ChatTransport, Client};
use std::io::{BufRead, Write};
use tracing::debug;

pub const IDEA_PROMPT: &str = "Enter a lyric idea prompt: ";
pub const STYLE_PROMPT: &str = "Describe the song's style, tempo, mood, etc.: ";
pub const CONTINUE_PROMPT: &str = "Would you like to enter another prompt? (yes/y or no/n): ";
pub const INVALID_ANSWER: &str = "Invalid response. Please enter 'yes', 'y', 'no', or 'n'.";
pub const GOODBYE: &str = "Goodbye!";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum State {
    Prompting,
    ContinueQuery,
    Done,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Answer {
    Yes,
    No,
}

impl Answer {
    /// Case-insensitive `yes`/`y`/`no`/`n`; anything else is `None`.
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim().to_lowercase().as_str() {
            "yes" | "y" => Some(Answer::Yes),
            "no" | "n" => Some(Answer::No),
            _ => None,
        }
    }
}

pub fn compose_prompt(idea: &str, style: &str) -> String {
    format!("Main idea: {idea}\nStyle details: {style}")
}

/// One interactive songwriting session over arbitrary console streams.
pub struct Session<'a, T, R, W> {
    client: &'a Client<T>,
    input: R,
    output: W,
}

impl<'a, T, R, W> Session<'a, T, R, W>
where
    T: ChatTransport,
    R: BufRead,
    W: Write,
{
    pub fn new(client: &'a Client<T>, input: R, output: W) -> Self {
        Self {
            client,
            input,
            output,
        }
    }

    /// Runs turns until the user declines to continue or input ends.
    pub async fn run(mut self) -> Result<()> {
        let mut state = State::Prompting;

        loop {
            debug!("Session state: {:?}", state);
            state = match state {
                State::Prompting => self.prompt().await?,
                State::ContinueQuery => self.continue_query()?,
                State::Done => return Ok(()),
            };
        }
    }

    async fn prompt(&mut self) -> Result<State> {
        let Some(idea) = self.ask(IDEA_PROMPT)? else {
            return self.finish();
        };
        let Some(style) = self.ask(STYLE_PROMPT)? else {
            return self.finish();
        };

        let reply = self.client.complete(&compose_prompt(&idea, &style)).await?;
        writeln!(self.output, "AI Response: {}", reply.unwrap_or_default())?;

        Ok(State::ContinueQuery)
    }

    fn continue_query(&mut self) -> Result<State> {
        let Some(line) = self.ask(CONTINUE_PROMPT)? else {
            return self.finish();
        };

        match Answer::parse(&line) {
            Some(Answer::Yes) => Ok(State::Prompting),
            Some(Answer::No) => self.finish(),
            None => {
                writeln!(self.output, "{INVALID_ANSWER}")?;
                Ok(State::ContinueQuery)
            }
        }
    }

    fn finish(&mut self) -> Result<State> {
        writeln!(self.output, "{GOODBYE}")?;
        self.output.flush()?;
        Ok(State::Done)
    }

    /// Writes `prompt` and reads one line; `None` at end of input.
    fn ask(&mut self, prompt: &str) -> Result<Option<String>> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            writeln!(self.output)?;
            return Ok(None);
        }

        let trimmed = line.trim_end_matches(['\n', '\r']).len();
        line.truncate(trimmed);

        Ok(Some(line))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn answer_parse_is_case_insensitive() {
        assert_eq!(Answer::parse("YES"), Some(Answer::Yes));
        assert_eq!(Answer::parse("y"), Some(Answer::Yes));
        assert_eq!(Answer::parse("No"), Some(Answer::No));
        assert_eq!(Answer::parse("N"), Some(Answer::No));
    }

    #[test]
    fn answer_parse_rejects_other_input() {
        assert_eq!(Answer::parse(""), None);
        assert_eq!(Answer::parse("maybe"), None);
        assert_eq!(Answer::parse("yess"), None);
    }

    #[test]
    fn compose_prompt_joins_idea_and_style() {
        assert_eq!(
            compose_prompt("lost love", "acoustic, slow"),
            "Main idea: lost love\nStyle details: acoustic, slow"
        );
    }
}
