//! Mock port implementations shared by the use case tests

use crate::config::SessionParams;
use crate::ports::content_provider::{ContentError, ContentProvider, SessionToken};
use crate::ports::quiz_ui::{
    BallotClose, BallotMenu, EventStream, MessageHandle, QuestionView, QuizUi, UiError,
};
use crate::ports::score_ledger::{LedgerError, ScoreLedger};
use async_trait::async_trait;
use quizcord_domain::{
    AnswerEvent, BallotEvent, CategoryId, ChannelId, GuildId, Question, QuestionKind, Standing,
    Topic, UserId,
};
use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::time::Duration;
use tokio::sync::mpsc;

/// Short windows so paused-clock tests stay snappy
pub fn short_params() -> SessionParams {
    SessionParams {
        voting_time: Duration::from_secs(3),
        ..SessionParams::default()
    }
}

fn preloaded_stream<E>(events: Vec<E>) -> EventStream<E> {
    let (tx, rx) = mpsc::channel(events.len().max(1));
    for event in events {
        // Capacity covers the whole script
        tx.try_send(event).ok();
    }
    // Sender dropped here: the stream yields the script, then closes
    EventStream::new(rx)
}

/// UI mock that replays scripted events and records what was rendered
#[derive(Default)]
pub struct RecordingUi {
    next_handle: AtomicU64,
    ballot_events: Mutex<Vec<BallotEvent>>,
    answer_rounds: Mutex<VecDeque<Vec<AnswerEvent>>>,
    ballots_closed: Mutex<Option<BallotClose>>,
    standings: Mutex<Option<Vec<Standing>>>,
    questions_rendered: AtomicUsize,
    pub fail_reveal: bool,
    pub fail_render: bool,
}

impl RecordingUi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_reveal() -> Self {
        Self {
            fail_reveal: true,
            ..Self::default()
        }
    }

    pub fn failing_render() -> Self {
        Self {
            fail_render: true,
            ..Self::default()
        }
    }

    pub fn queue_ballot_events(&self, events: Vec<BallotEvent>) {
        *self.ballot_events.lock().unwrap() = events;
    }

    pub fn queue_answer_rounds(&self, rounds: Vec<Vec<AnswerEvent>>) {
        *self.answer_rounds.lock().unwrap() = rounds.into();
    }

    pub fn ballots_closed(&self) -> bool {
        self.ballots_closed.lock().unwrap().is_some()
    }

    pub fn posted_standings(&self) -> Option<Vec<Standing>> {
        self.standings.lock().unwrap().clone()
    }

    pub fn questions_rendered(&self) -> usize {
        self.questions_rendered.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl QuizUi for RecordingUi {
    async fn render_ballots(
        &self,
        _channel: ChannelId,
        _menu: &BallotMenu,
    ) -> Result<(MessageHandle, EventStream<BallotEvent>), UiError> {
        if self.fail_render {
            return Err(UiError::RenderFailed("channel gone".to_string()));
        }
        let handle = MessageHandle(self.next_handle.fetch_add(1, Ordering::SeqCst));
        let events = std::mem::take(&mut *self.ballot_events.lock().unwrap());
        Ok((handle, preloaded_stream(events)))
    }

    async fn render_question(
        &self,
        _channel: ChannelId,
        _view: &QuestionView,
    ) -> Result<(MessageHandle, EventStream<AnswerEvent>), UiError> {
        if self.fail_render {
            return Err(UiError::RenderFailed("channel gone".to_string()));
        }
        self.questions_rendered.fetch_add(1, Ordering::SeqCst);
        let handle = MessageHandle(self.next_handle.fetch_add(1, Ordering::SeqCst));
        let events = self
            .answer_rounds
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_default();
        Ok((handle, preloaded_stream(events)))
    }

    async fn update_countdown(
        &self,
        _handle: &MessageHandle,
        _seconds_left: u64,
        _status: &str,
    ) -> Result<(), UiError> {
        Ok(())
    }

    async fn finish_ballots(
        &self,
        _handle: &MessageHandle,
        close: &BallotClose,
    ) -> Result<(), UiError> {
        *self.ballots_closed.lock().unwrap() = Some(close.clone());
        Ok(())
    }

    async fn reveal_answer(
        &self,
        _handle: &MessageHandle,
        _question: &Question,
        _learn_more_url: Option<&str>,
    ) -> Result<(), UiError> {
        if self.fail_reveal {
            return Err(UiError::EditFailed("message deleted".to_string()));
        }
        Ok(())
    }

    async fn post_standings(
        &self,
        _channel: ChannelId,
        standings: &[Standing],
    ) -> Result<(), UiError> {
        *self.standings.lock().unwrap() = Some(standings.to_vec());
        Ok(())
    }
}

/// Gold-question template every mock fetch returns
pub fn gold_question() -> Question {
    Question {
        index: 0,
        prompt: "What is the chemical symbol for gold?".to_string(),
        correct_answer: "Au".to_string(),
        incorrect_answers: vec!["Ag".to_string(), "Fe".to_string(), "Pb".to_string()],
        kind: QuestionKind::Multiple,
        topic_id: CategoryId(17),
    }
}

/// Content provider mock serving the gold-question template
pub struct StubProvider {
    catalog: Vec<Topic>,
    fetch_calls: AtomicUsize,
    /// 1-based call number that should fail, if any
    fail_on_call: Option<usize>,
}

impl StubProvider {
    pub fn new(catalog: Vec<Topic>) -> Self {
        Self {
            catalog,
            fetch_calls: AtomicUsize::new(0),
            fail_on_call: None,
        }
    }

    pub fn failing_on_call(catalog: Vec<Topic>, call: usize) -> Self {
        Self {
            fail_on_call: Some(call),
            ..Self::new(catalog)
        }
    }

    pub fn fetch_calls(&self) -> usize {
        self.fetch_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ContentProvider for StubProvider {
    async fn request_token(&self) -> Result<SessionToken, ContentError> {
        Ok(SessionToken("stub-token".to_string()))
    }

    async fn fetch_questions(
        &self,
        _token: &SessionToken,
        category: CategoryId,
        amount: u32,
    ) -> Result<Vec<Question>, ContentError> {
        let call = self.fetch_calls.fetch_add(1, Ordering::SeqCst) + 1;
        if self.fail_on_call == Some(call) {
            return Err(ContentError::RequestFailed("boom".to_string()));
        }
        let mut question = gold_question();
        question.topic_id = category;
        Ok(vec![question; amount as usize])
    }

    async fn topic_catalog(&self) -> Result<Vec<Topic>, ContentError> {
        Ok(self.catalog.clone())
    }
}

/// In-memory ledger mock
#[derive(Default)]
pub struct MemoryLedger {
    scores: Mutex<HashMap<(UserId, GuildId), u32>>,
    active: Mutex<HashSet<ChannelId>>,
    activations: AtomicUsize,
    /// Fail score writes only; the active flag keeps working
    fail_score_writes: bool,
}

impl MemoryLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_score_writes() -> Self {
        Self {
            fail_score_writes: true,
            ..Self::default()
        }
    }

    pub fn with_score(self, user: UserId, guild: GuildId, score: u32) -> Self {
        self.scores.lock().unwrap().insert((user, guild), score);
        self
    }

    pub fn score(&self, user: UserId, guild: GuildId) -> u32 {
        self.scores
            .lock()
            .unwrap()
            .get(&(user, guild))
            .copied()
            .unwrap_or(0)
    }

    pub fn active(&self, channel: ChannelId) -> bool {
        self.active.lock().unwrap().contains(&channel)
    }

    pub fn activations(&self) -> usize {
        self.activations.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ScoreLedger for MemoryLedger {
    async fn get_score(&self, user: UserId, guild: GuildId) -> Result<u32, LedgerError> {
        Ok(self.score(user, guild))
    }

    async fn set_score(
        &self,
        user: UserId,
        guild: GuildId,
        score: u32,
    ) -> Result<(), LedgerError> {
        if self.fail_score_writes {
            return Err(LedgerError::WriteFailed("disk full".to_string()));
        }
        self.scores.lock().unwrap().insert((user, guild), score);
        Ok(())
    }

    async fn is_channel_active(&self, channel: ChannelId) -> Result<bool, LedgerError> {
        Ok(self.active(channel))
    }

    async fn set_channel_active(&self, channel: ChannelId) -> Result<(), LedgerError> {
        self.activations.fetch_add(1, Ordering::SeqCst);
        self.active.lock().unwrap().insert(channel);
        Ok(())
    }

    async fn set_channel_inactive(&self, channel: ChannelId) -> Result<(), LedgerError> {
        self.active.lock().unwrap().remove(&channel);
        Ok(())
    }
}
