//! The command interpreter.
//!
//! `Interpreter` owns all session state: the scrollback, the file table, the
//! busy flag and the optional conversation memory. It performs no I/O of its
//! own. Synchronous commands complete inside `submit`; `/ask` comes back as a
//! `PendingAsk` the caller runs against a `CompletionBackend` and feeds to
//! `finish_ask`.

pub mod ask;
pub mod builtins;
pub mod busy;

pub use ask::{AskOutcome, PendingAsk};
pub use busy::{BusyFlag, BusyGuard};

use crate::config::{Config, NavigationConfig};
use crate::input::{Builtin, CommandInvocation};
use crate::model::file_table::FileTable;
use crate::model::profile::Profile;
use crate::model::scrollback::Scrollback;
use crate::services::ai::{prompt, CompletionBackend, Exchange};
use crate::services::time_source::SharedTimeSource;
use builtins::{Action, ShellContext};
use std::collections::VecDeque;
use std::time::Duration;

/// Something the presentation layer should do later.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Leave the terminal for the given route.
    Navigate(String),
    /// Start a fresh session.
    Reset,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduledEffect {
    pub after: Duration,
    pub effect: Effect,
}

/// Result of submitting one line.
#[derive(Debug)]
pub enum Dispatch {
    /// The command finished; its output is already in the scrollback.
    Done(Option<ScheduledEffect>),
    /// An AI question is outstanding.
    Ask(PendingAsk),
    /// Rejected because a query is in flight. Nothing was recorded.
    Busy,
}

pub struct Interpreter {
    profile: Profile,
    files: FileTable,
    scrollback: Scrollback,
    busy: BusyFlag,
    time: SharedTimeSource,
    user: String,
    host: String,
    navigation: NavigationConfig,
    history_turns: usize,
    conversation: VecDeque<Exchange>,
}

impl Interpreter {
    pub fn new(profile: Profile, config: &Config, time: SharedTimeSource) -> Self {
        let files = FileTable::from_profile(&profile);
        let user = profile.user_identity();
        Self {
            profile,
            files,
            scrollback: Scrollback::new(),
            busy: BusyFlag::new(),
            time,
            user,
            host: config.prompt.host.clone(),
            navigation: config.navigation.clone(),
            history_turns: config.ai.history_turns,
            conversation: VecDeque::new(),
        }
    }

    /// `user@host:~`
    pub fn prompt(&self) -> String {
        format!("{}@{}:~", self.user, self.host)
    }

    pub fn user(&self) -> &str {
        &self.user
    }

    pub fn profile(&self) -> &Profile {
        &self.profile
    }

    pub fn files(&self) -> &FileTable {
        &self.files
    }

    pub fn scrollback(&self) -> &Scrollback {
        &self.scrollback
    }

    pub fn is_busy(&self) -> bool {
        self.busy.is_busy()
    }

    /// A handle observers can poll while a `PendingAsk` runs elsewhere.
    pub fn busy_flag(&self) -> BusyFlag {
        self.busy.clone()
    }

    /// Record and run one line of input.
    pub fn submit(&mut self, line: &str) -> Dispatch {
        let line = line.trim_end_matches(['\r', '\n']);
        if self.is_busy() {
            tracing::warn!("Rejected input while an AI query is in flight: {:?}", line);
            return Dispatch::Busy;
        }

        let history = self.scrollback.commands();
        let prompt = self.prompt();
        self.scrollback.push_input(&prompt, line);

        let inv = CommandInvocation::parse(line);
        if inv.is_blank() {
            self.scrollback.push_blank();
            return Dispatch::Done(None);
        }

        let Some(builtin) = Builtin::lookup(&inv.name) else {
            tracing::debug!("Unknown command: {}", inv.name);
            self.scrollback.push_output(&format!(
                "command not found: {}. Type 'help' to see available commands.",
                inv.name
            ));
            self.scrollback.push_blank();
            return Dispatch::Done(None);
        };

        tracing::debug!("Dispatching {:?} with {} args", builtin, inv.args.len());
        let outcome = {
            let ctx = ShellContext {
                profile: &self.profile,
                files: &self.files,
                user: &self.user,
                history: &history,
                clock: self.time.as_ref(),
                navigation: &self.navigation,
            };
            builtins::run(builtin, &inv, &ctx)
        };

        for text in &outcome.lines {
            self.scrollback.push_output(text);
        }

        match outcome.action {
            Action::None => {
                self.scrollback.push_blank();
                Dispatch::Done(None)
            }
            Action::Clear => {
                self.scrollback.clear();
                self.scrollback.push_input(&prompt, line);
                self.scrollback.push_blank();
                Dispatch::Done(None)
            }
            Action::Schedule(effect) => {
                self.scrollback.push_blank();
                Dispatch::Done(Some(effect))
            }
            Action::Ask(question) => self.start_ask(question),
        }
    }

    fn start_ask(&mut self, question: String) -> Dispatch {
        let Some(guard) = self.busy.try_acquire() else {
            // Checked at the top of submit; only reachable through a cloned flag.
            tracing::warn!("Busy flag taken before the question could be sent");
            self.scrollback
                .push_output("Error: Failed to get AI response: another query is in progress");
            self.scrollback.push_blank();
            return Dispatch::Done(None);
        };

        let history: Vec<Exchange> = self.conversation.iter().cloned().collect();
        let request = prompt::build_request(&self.profile, &history, &question);
        tracing::info!(
            "Sending AI question ({} chars, {} prior turns)",
            question.len(),
            history.len()
        );
        Dispatch::Ask(PendingAsk::new(
            question,
            request,
            guard,
            self.time.clone(),
        ))
    }

    /// Append a finished query's output and release the busy flag.
    pub fn finish_ask(&mut self, outcome: AskOutcome) {
        for line in outcome.render() {
            self.scrollback.push_output(&line);
        }
        self.scrollback.push_blank();

        let (question, result) = outcome.into_parts();
        if self.history_turns == 0 {
            return;
        }
        if let Ok(answer) = result {
            self.conversation.push_back(Exchange {
                question,
                answer: answer.answer,
            });
            while self.conversation.len() > self.history_turns {
                self.conversation.pop_front();
            }
        }
    }

    /// Submit a line and, for `/ask`, await the backend before returning.
    pub async fn execute(
        &mut self,
        line: &str,
        backend: &dyn CompletionBackend,
    ) -> Option<ScheduledEffect> {
        match self.submit(line) {
            Dispatch::Done(effect) => effect,
            Dispatch::Ask(pending) => {
                let outcome = pending.run(backend).await;
                self.finish_ask(outcome);
                None
            }
            Dispatch::Busy => None,
        }
    }

    /// Start over with an empty scrollback and no conversation memory.
    pub fn reset(&mut self) {
        tracing::info!("Session reset");
        self.scrollback.clear();
        self.conversation.clear();
    }

    /// Prior exchanges replayed with the next question.
    pub fn conversation(&self) -> impl Iterator<Item = &Exchange> {
        self.conversation.iter()
    }
}
