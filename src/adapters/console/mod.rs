//! Console Adapter
//!
//! Line-oriented front-end that drives an inference session. It asks the best
//! next question and reads the answer. Going back and restarting work both
//! mid-questionnaire and from the results screen.

use std::io::{self, BufRead, Write};

use crate::config::SessionConfig;
use crate::domain::catalog::QuestionCatalog;
use crate::domain::foundation::DomainError;
use crate::domain::inference::InferenceSession;

/// Command typed at the prompt
#[derive(Debug, Clone, PartialEq, Eq)]
enum Command {
    Answer(usize),
    Back,
    Restart,
    Quit,
    Invalid,
}

impl Command {
    fn parse(line: &str, choice_count: usize) -> Self {
        match line.trim().to_ascii_lowercase().as_str() {
            "b" | "back" => Command::Back,
            "r" | "restart" => Command::Restart,
            "q" | "quit" => Command::Quit,
            other => match other.parse::<usize>() {
                Ok(n) if (1..=choice_count).contains(&n) => Command::Answer(n - 1),
                _ => Command::Invalid,
            },
        }
    }
}

/// Interactive console over any line reader and writer
pub struct Console<'a, R, W> {
    session: InferenceSession,
    catalog: &'a QuestionCatalog,
    limits: SessionConfig,
    input: R,
    output: W,
}

impl<'a, R: BufRead, W: Write> Console<'a, R, W> {
    pub fn new(
        session: InferenceSession,
        catalog: &'a QuestionCatalog,
        limits: SessionConfig,
        input: R,
        output: W,
    ) -> Self {
        Self {
            session,
            catalog,
            limits,
            input,
            output,
        }
    }

    /// Runs until the user quits or input ends.
    ///
    /// When the session is done the ranking is shown, after which the user
    /// may still go back or restart. Returns the session in its final state.
    pub fn run(mut self) -> io::Result<InferenceSession> {
        let mut showing_results;
        loop {
            let next = if self.session.is_done(self.limits.max_questions) {
                None
            } else {
                self.session.select_best_question().map(str::to_string)
            };

            let choices = match &next {
                Some(question) => {
                    let choices = self.session.possible_answers(question);
                    self.prompt(question, &choices)?;
                    choices
                }
                None => {
                    self.print_results()?;
                    self.print_menu()?;
                    Vec::new()
                }
            };
            showing_results = next.is_none();

            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                break;
            }

            match Command::parse(&line, choices.len()) {
                Command::Answer(index) => {
                    let Some(question) = next.as_deref() else {
                        continue;
                    };
                    if let Err(err) = self.session.answer_question(question, &choices[index]) {
                        writeln!(self.output, "{}", DomainError::from(err))?;
                        continue;
                    }
                    self.print_leader()?;
                }
                Command::Back => match self.session.undo_last_answer() {
                    Some(restored) => {
                        let text = self.question_text(&restored);
                        writeln!(self.output, "Went back: {}", text)?;
                    }
                    None => writeln!(self.output, "Nothing to go back to.")?,
                },
                Command::Restart => {
                    self.session.reset();
                    writeln!(self.output, "Starting over.")?;
                }
                Command::Quit => break,
                Command::Invalid if choices.is_empty() => {
                    writeln!(self.output, "Please choose b, r or q.")?
                }
                Command::Invalid => {
                    writeln!(self.output, "Please choose 1-{}, b, r or q.", choices.len())?
                }
            }
        }

        if !showing_results {
            self.print_results()?;
        }
        Ok(self.session)
    }

    fn question_text(&self, question: &str) -> String {
        self.catalog
            .get(question)
            .map(|q| q.text.clone())
            .unwrap_or_else(|| question.to_string())
    }

    fn prompt(&mut self, question: &str, choices: &[String]) -> io::Result<()> {
        let number = self.session.history().len() + 1;
        let text = self.question_text(question);
        writeln!(self.output, "\nQuestion {}: {}", number, text)?;
        for (i, choice) in choices.iter().enumerate() {
            writeln!(self.output, "  {}) {}", i + 1, choice)?;
        }
        self.print_menu()
    }

    fn print_menu(&mut self) -> io::Result<()> {
        if !self.session.history().is_empty() {
            writeln!(self.output, "  b) go back")?;
        }
        writeln!(self.output, "  r) restart")?;
        writeln!(self.output, "  q) quit")?;
        write!(self.output, "> ")?;
        self.output.flush()
    }

    fn print_leader(&mut self) -> io::Result<()> {
        let remaining = self.session.scores().len();
        match self.session.top_diseases(1).first() {
            Some(top) => writeln!(
                self.output,
                "Leading: {} ({:.1}), {} candidate(s) remain",
                top.candidate, top.score, remaining
            ),
            None => writeln!(self.output, "No candidates remain"),
        }
    }

    fn print_results(&mut self) -> io::Result<()> {
        let top = self.session.top_diseases(self.limits.top_n);
        writeln!(self.output, "\nMost likely diagnoses:")?;
        if top.is_empty() {
            writeln!(self.output, "  none")?;
        }
        for (rank, entry) in top.iter().enumerate() {
            writeln!(self.output, "  {}. {} ({:.1})", rank + 1, entry.candidate, entry.score)?;
        }
        Ok(())
    }
}
