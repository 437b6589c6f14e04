//! Console stand-in for the chat platform
//!
//! Renders ballots and questions as plain text and translates stdin lines
//! into the typed events the application layer consumes. One background
//! pump owns stdin; each rendered phase registers the channel its events
//! should be routed to. Line formats:
//!
//! ```text
//! <voter> topic <label>     # voting phase
//! <voter> count <n>
//! <voter> cancel
//! <voter> <answer | index>  # question phase
//! ```

use async_trait::async_trait;
use quizcord_application::{
    BallotClose, BallotMenu, EventStream, MessageHandle, QuestionView, QuizUi, UiError,
};
use quizcord_domain::{AnswerEvent, BallotEvent, ChannelId, Question, Standing, UserId};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// Where parsed stdin lines currently go
enum InputRoute {
    Idle,
    Ballots(mpsc::Sender<BallotEvent>),
    Answers {
        sender: mpsc::Sender<AnswerEvent>,
        labels: Vec<String>,
    },
}

/// Terminal implementation of [`QuizUi`]
pub struct ConsoleQuizUi {
    next_handle: AtomicU64,
    route: Mutex<InputRoute>,
}

impl ConsoleQuizUi {
    pub fn new() -> Self {
        Self {
            next_handle: AtomicU64::new(1),
            route: Mutex::new(InputRoute::Idle),
        }
    }

    /// Start the stdin pump; lines are routed to the active phase
    pub fn spawn_input_pump(self: &Arc<Self>, shutdown: CancellationToken) -> JoinHandle<()> {
        let ui = Arc::clone(self);
        tokio::spawn(async move {
            let mut lines = BufReader::new(tokio::io::stdin()).lines();
            loop {
                tokio::select! {
                    _ = shutdown.cancelled() => break,
                    line = lines.next_line() => match line {
                        Ok(Some(line)) => ui.route_line(&line).await,
                        Ok(None) => break,
                        Err(e) => {
                            debug!("stdin read failed: {e}");
                            break;
                        }
                    }
                }
            }
        })
    }

    async fn route_line(&self, line: &str) {
        // Clone the sender out so the lock is not held across the send
        enum Parsed {
            Ballot(mpsc::Sender<BallotEvent>, BallotEvent),
            Answer(mpsc::Sender<AnswerEvent>, AnswerEvent),
            None,
        }

        let parsed = {
            let route = self.route.lock().unwrap_or_else(|e| e.into_inner());
            match &*route {
                InputRoute::Idle => Parsed::None,
                InputRoute::Ballots(sender) => match parse_ballot_line(line) {
                    Some(event) => Parsed::Ballot(sender.clone(), event),
                    None => Parsed::None,
                },
                InputRoute::Answers { sender, labels } => {
                    match parse_answer_line(line, labels) {
                        Some(event) => Parsed::Answer(sender.clone(), event),
                        None => Parsed::None,
                    }
                }
            }
        };

        match parsed {
            Parsed::Ballot(sender, event) => {
                if sender.send(event).await.is_err() {
                    debug!("ballot window already closed, input dropped");
                }
            }
            Parsed::Answer(sender, event) => {
                if sender.send(event).await.is_err() {
                    debug!("answer window already closed, input dropped");
                }
            }
            Parsed::None => debug!("unparsed input line: {line}"),
        }
    }

    fn set_route(&self, route: InputRoute) {
        *self.route.lock().unwrap_or_else(|e| e.into_inner()) = route;
    }

    fn new_handle(&self) -> MessageHandle {
        MessageHandle(self.next_handle.fetch_add(1, Ordering::SeqCst))
    }
}

impl Default for ConsoleQuizUi {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl QuizUi for ConsoleQuizUi {
    async fn render_ballots(
        &self,
        channel: ChannelId,
        menu: &BallotMenu,
    ) -> Result<(MessageHandle, EventStream<BallotEvent>), UiError> {
        println!("=== Quiz vote in channel {channel} ({}s) ===", menu.seconds);
        println!("Topics: {}", menu.topic_labels.join(" | "));
        let counts: Vec<String> = menu.count_options.iter().map(|n| n.to_string()).collect();
        println!("Question counts: {}", counts.join(" | "));
        println!("Vote with: <voter> topic <label> | <voter> count <n> | <voter> cancel");

        let (tx, rx) = mpsc::channel(64);
        self.set_route(InputRoute::Ballots(tx));
        Ok((self.new_handle(), EventStream::new(rx)))
    }

    async fn render_question(
        &self,
        _channel: ChannelId,
        view: &QuestionView,
    ) -> Result<(MessageHandle, EventStream<AnswerEvent>), UiError> {
        println!();
        println!("{}) {} ({}s)", view.index, view.prompt, view.seconds);
        for (i, label) in view.answer_labels.iter().enumerate() {
            println!("  {}. {label}", i + 1);
        }
        println!("Answer with: <voter> <answer text or number>");

        let (tx, rx) = mpsc::channel(64);
        self.set_route(InputRoute::Answers {
            sender: tx,
            labels: view.answer_labels.clone(),
        });
        Ok((self.new_handle(), EventStream::new(rx)))
    }

    async fn update_countdown(
        &self,
        _handle: &MessageHandle,
        seconds_left: u64,
        status: &str,
    ) -> Result<(), UiError> {
        // Chatty if printed every second
        if seconds_left > 0 && (seconds_left % 5 == 0 || seconds_left <= 3) {
            if status.is_empty() {
                println!("  ... {seconds_left}s left");
            } else {
                println!("  ... {seconds_left}s left | {status}");
            }
        }
        Ok(())
    }

    async fn finish_ballots(
        &self,
        _handle: &MessageHandle,
        close: &BallotClose,
    ) -> Result<(), UiError> {
        self.set_route(InputRoute::Idle);
        match close {
            BallotClose::Cancelled => println!("Vote cancelled by majority."),
            BallotClose::Resolved {
                winning_topic_label,
                question_count,
            } => println!(
                "Started {question_count} questions on the topic: {winning_topic_label}"
            ),
        }
        Ok(())
    }

    async fn reveal_answer(
        &self,
        _handle: &MessageHandle,
        question: &Question,
        learn_more_url: Option<&str>,
    ) -> Result<(), UiError> {
        self.set_route(InputRoute::Idle);
        println!("Correct answer: {}", question.correct_answer);
        if let Some(url) = learn_more_url {
            println!("Learn more: {url}");
        }
        Ok(())
    }

    async fn post_standings(
        &self,
        _channel: ChannelId,
        standings: &[Standing],
    ) -> Result<(), UiError> {
        println!();
        if standings.is_empty() {
            println!("No participants.");
            return Ok(());
        }
        println!("Top participants:");
        for (rank, standing) in standings.iter().enumerate() {
            println!(
                "  {}. user {} - {} points",
                rank + 1,
                standing.user,
                standing.score
            );
        }
        Ok(())
    }
}

/// Parse a voting-phase input line
fn parse_ballot_line(line: &str) -> Option<BallotEvent> {
    let mut tokens = line.split_whitespace();
    let voter = UserId(tokens.next()?.parse().ok()?);
    match tokens.next()? {
        "topic" => {
            let label = tokens.collect::<Vec<_>>().join(" ");
            (!label.is_empty()).then_some(BallotEvent::Topic {
                voter,
                choice: label,
            })
        }
        "count" => Some(BallotEvent::Count {
            voter,
            choice: tokens.next()?.parse().ok()?,
        }),
        "cancel" => Some(BallotEvent::CancelToggle { voter }),
        _ => None,
    }
}

/// Parse a question-phase input line; numbers index into the labels
fn parse_answer_line(line: &str, labels: &[String]) -> Option<AnswerEvent> {
    let (voter_token, rest) = line.trim().split_once(char::is_whitespace)?;
    let voter = UserId(voter_token.parse().ok()?);
    let rest = rest.trim();

    let label = match rest.parse::<usize>() {
        Ok(n) if n >= 1 => labels.get(n - 1)?.clone(),
        Ok(_) => return None,
        Err(_) => rest.to_string(),
    };
    Some(AnswerEvent { voter, label })
}
