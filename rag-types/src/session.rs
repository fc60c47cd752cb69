//! Session state for one page load of the chat console.
//!
//! The UI feeds [`SessionEvent`]s into [`SessionState::apply`]. The reducer
//! updates the state and may hand back a [`Command`] for the caller to run
//! (a network round-trip or a blocking alert). Responses come back in as
//! further events.

use tracing::debug;

use crate::defaults::{
    default_urls_text, EMPTY_URLS_MESSAGE, INITIALIZE_ERROR_FALLBACK, INITIALIZE_LABEL_BUSY,
    INITIALIZE_LABEL_IDLE, INITIALIZE_SUCCESS_MESSAGE, QUERY_ERROR_FALLBACK,
};
use crate::steps::{StepBoard, StepStatus};
use crate::wire::{
    Acknowledgement, ChatMessage, PipelineStatus, PipelineStep, QueryAnswer, Reply, Role,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnRole {
    User,
    Assistant,
    Error,
}

impl TurnRole {
    pub fn label(self) -> &'static str {
        match self {
            TurnRole::User => "You",
            TurnRole::Assistant => "Assistant",
            TurnRole::Error => "Error",
        }
    }
}

impl From<Role> for TurnRole {
    fn from(role: Role) -> Self {
        match role {
            Role::User => TurnRole::User,
            Role::Assistant => TurnRole::Assistant,
        }
    }
}

/// A rendered line of the chat pane.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranscriptEntry {
    pub role: TurnRole,
    pub content: String,
}

impl TranscriptEntry {
    pub fn new(role: TurnRole, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }
}

impl From<ChatMessage> for TranscriptEntry {
    fn from(message: ChatMessage) -> Self {
        Self::new(message.role.into(), message.content)
    }
}

#[derive(Debug, Clone)]
pub enum SessionEvent {
    DraftEdited(String),
    QuerySubmitted,
    QueryAnswered { request_id: u64, answer: QueryAnswer },
    QueryFailed { request_id: u64, message: String },
    HistoryLoaded(Vec<ChatMessage>),
    HistoryCleared,
    StatusReceived(PipelineStatus),
    UrlsEdited(String),
    InitializeRequested,
    InitializeSucceeded,
    InitializeFailed { message: String },
    DebugToggled,
    SettingsOpened,
    SettingsClosed,
}

impl SessionEvent {
    pub fn from_query_reply(request_id: u64, reply: Reply<QueryAnswer>) -> Self {
        match reply {
            Reply::Success(answer) => SessionEvent::QueryAnswered { request_id, answer },
            failure => SessionEvent::QueryFailed {
                request_id,
                message: failure
                    .failure_message(QUERY_ERROR_FALLBACK)
                    .unwrap_or_default(),
            },
        }
    }

    /// A refused clear produces no event: the console stays as it was.
    pub fn from_clear_reply(reply: Reply<Acknowledgement>) -> Option<Self> {
        match reply {
            Reply::Success(_) => Some(SessionEvent::HistoryCleared),
            Reply::Failure { .. } => None,
        }
    }

    pub fn from_initialize_reply(reply: Reply<Acknowledgement>) -> Self {
        match reply {
            Reply::Success(_) => SessionEvent::InitializeSucceeded,
            failure => SessionEvent::InitializeFailed {
                message: failure
                    .failure_message(INITIALIZE_ERROR_FALLBACK)
                    .unwrap_or_default(),
            },
        }
    }
}

/// Work the reducer asks the caller to perform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    SendQuery { request_id: u64, query: String },
    Initialize { urls: Vec<String> },
    Alert(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionState {
    pub initialized: bool,
    /// Drives the typing indicator.
    pub processing: bool,
    pub current_step: Option<String>,
    pub debug_visible: bool,

    pub transcript: Vec<TranscriptEntry>,
    pub debug_log: Vec<PipelineStep>,
    pub steps: StepBoard,

    pub draft: String,
    pub urls_draft: String,
    /// Send control disabled while a query is outstanding.
    pub sending: bool,
    pub settings_open: bool,
    pub initializing: bool,

    next_request_id: u64,
    /// Request id of the outstanding query. A clear leaves it in place.
    in_flight: Option<u64>,
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            initialized: false,
            processing: false,
            current_step: None,
            debug_visible: false,
            transcript: Vec::new(),
            debug_log: Vec::new(),
            steps: StepBoard::default(),
            draft: String::new(),
            urls_draft: default_urls_text(),
            sending: false,
            settings_open: false,
            initializing: false,
            next_request_id: 1,
            in_flight: None,
        }
    }
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pipeline_label(&self) -> &'static str {
        if self.initialized {
            "Initialized"
        } else {
            "Not Initialized"
        }
    }

    pub fn initialize_label(&self) -> &'static str {
        if self.initializing {
            INITIALIZE_LABEL_BUSY
        } else {
            INITIALIZE_LABEL_IDLE
        }
    }

    pub fn apply(&mut self, event: SessionEvent) -> Option<Command> {
        match event {
            SessionEvent::DraftEdited(text) => {
                self.draft = text;
                None
            }
            SessionEvent::QuerySubmitted => self.submit_query(),
            SessionEvent::QueryAnswered { request_id, answer } => {
                if self.settle_query(request_id) {
                    self.transcript
                        .push(TranscriptEntry::new(TurnRole::Assistant, answer.answer));
                    if !answer.steps.is_empty() {
                        self.steps.apply_trace(&answer.steps);
                        self.debug_log = answer.steps;
                    }
                }
                None
            }
            SessionEvent::QueryFailed {
                request_id,
                message,
            } => {
                if self.settle_query(request_id) {
                    self.transcript
                        .push(TranscriptEntry::new(TurnRole::Error, message));
                }
                None
            }
            SessionEvent::HistoryLoaded(history) => {
                if !history.is_empty() {
                    self.transcript = history.into_iter().map(TranscriptEntry::from).collect();
                }
                None
            }
            SessionEvent::HistoryCleared => {
                self.transcript.clear();
                self.debug_log.clear();
                self.steps.reset();
                None
            }
            SessionEvent::StatusReceived(status) => {
                self.initialized = status.initialized;
                self.processing = status.processing;
                self.current_step = status.current_step.filter(|step| !step.is_empty());
                if let Some(step) = &self.current_step {
                    self.steps.update(step, StepStatus::Active);
                }
                None
            }
            SessionEvent::UrlsEdited(text) => {
                self.urls_draft = text;
                None
            }
            SessionEvent::InitializeRequested => self.request_initialize(),
            SessionEvent::InitializeSucceeded => {
                self.initializing = false;
                self.settings_open = false;
                self.initialized = true;
                Some(Command::Alert(INITIALIZE_SUCCESS_MESSAGE.to_string()))
            }
            SessionEvent::InitializeFailed { message } => {
                self.initializing = false;
                Some(Command::Alert(message))
            }
            SessionEvent::DebugToggled => {
                self.debug_visible = !self.debug_visible;
                None
            }
            SessionEvent::SettingsOpened => {
                self.settings_open = true;
                None
            }
            SessionEvent::SettingsClosed => {
                self.settings_open = false;
                None
            }
        }
    }

    fn submit_query(&mut self) -> Option<Command> {
        if self.sending {
            debug!("query submitted while another is outstanding; ignoring");
            return None;
        }

        let query = self.draft.trim().to_string();
        if query.is_empty() {
            return None;
        }

        self.draft.clear();
        self.sending = true;
        self.processing = true;
        self.transcript
            .push(TranscriptEntry::new(TurnRole::User, query.clone()));
        self.steps.reset();

        let request_id = self.next_request_id;
        self.next_request_id += 1;
        self.in_flight = Some(request_id);

        Some(Command::SendQuery { request_id, query })
    }

    /// Close out the in-flight query. Returns whether its result should be
    /// rendered.
    fn settle_query(&mut self, request_id: u64) -> bool {
        match self.in_flight {
            Some(current) if current == request_id => {
                self.in_flight = None;
                self.sending = false;
                self.processing = false;
                true
            }
            _ => {
                debug!(request_id, "dropping response for superseded query");
                false
            }
        }
    }

    fn request_initialize(&mut self) -> Option<Command> {
        if self.initializing {
            return None;
        }

        let urls = parse_urls(&self.urls_draft);
        if urls.is_empty() {
            return Some(Command::Alert(EMPTY_URLS_MESSAGE.to_string()));
        }

        self.initializing = true;
        Some(Command::Initialize { urls })
    }
}

/// One URL per non-blank line, surrounding whitespace removed.
pub fn parse_urls(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn submit(state: &mut SessionState, text: &str) -> Option<Command> {
        state.apply(SessionEvent::DraftEdited(text.to_string()));
        state.apply(SessionEvent::QuerySubmitted)
    }

    fn sent_request_id(command: Option<Command>) -> u64 {
        match command {
            Some(Command::SendQuery { request_id, .. }) => request_id,
            other => panic!("expected SendQuery, got {other:?}"),
        }
    }

    fn answer(text: &str, steps: &[&str]) -> QueryAnswer {
        QueryAnswer {
            answer: text.to_string(),
            steps: steps
                .iter()
                .map(|s| PipelineStep::new(*s, format!("{s} output")))
                .collect(),
        }
    }

    #[test]
    fn blank_query_is_a_no_op() {
        let mut state = SessionState::new();
        state.transcript.push(TranscriptEntry::new(TurnRole::User, "earlier"));
        let before = state.clone();

        assert_eq!(submit(&mut state, "   \n\t "), None);
        state.draft = before.draft.clone();
        assert_eq!(state, before);
    }

    #[test]
    fn submit_prepares_ui_and_emits_request() {
        let mut state = SessionState::new();
        state.steps.update("agent", StepStatus::Completed);

        let command = submit(&mut state, "  What is X?  ");

        assert_eq!(
            command,
            Some(Command::SendQuery {
                request_id: 1,
                query: "What is X?".to_string()
            })
        );
        assert!(state.draft.is_empty());
        assert!(state.sending);
        assert!(state.processing);
        assert_eq!(
            state.transcript,
            vec![TranscriptEntry::new(TurnRole::User, "What is X?")]
        );
        assert_eq!(state.steps, StepBoard::default());
    }

    #[test]
    fn second_submit_while_sending_is_ignored() {
        let mut state = SessionState::new();
        sent_request_id(submit(&mut state, "first"));
        assert_eq!(submit(&mut state, "second"), None);
        assert_eq!(state.transcript.len(), 1);
    }

    #[test]
    fn successful_answer_renders_turns_trace_and_badges() {
        let mut state = SessionState::new();
        let id = sent_request_id(submit(&mut state, "What is X?"));

        state.apply(SessionEvent::QueryAnswered {
            request_id: id,
            answer: answer("X is Y", &["retrieve", "generate"]),
        });

        assert_eq!(
            state.transcript,
            vec![
                TranscriptEntry::new(TurnRole::User, "What is X?"),
                TranscriptEntry::new(TurnRole::Assistant, "X is Y"),
            ]
        );
        assert_eq!(state.debug_log.len(), 2);
        assert_eq!(state.debug_log[0].step, "retrieve");
        assert_eq!(state.debug_log[1].step, "generate");
        assert_eq!(state.steps.status_of("retrieve"), Some(StepStatus::Completed));
        assert_eq!(state.steps.status_of("generate"), Some(StepStatus::Active));
        assert!(!state.sending);
        assert!(!state.processing);
    }

    #[test]
    fn n_steps_leave_one_active_and_the_rest_completed() {
        let mut state = SessionState::new();
        let id = sent_request_id(submit(&mut state, "q"));
        let names = ["agent", "retrieve", "grade_documents", "rewrite", "generate"];

        state.apply(SessionEvent::QueryAnswered {
            request_id: id,
            answer: answer("a", &names),
        });

        let badges = state.steps.badges();
        let active = badges.iter().filter(|b| b.status == StepStatus::Active).count();
        let completed = badges
            .iter()
            .filter(|b| b.status == StepStatus::Completed)
            .count();
        assert_eq!(active, 1);
        assert_eq!(completed, names.len() - 1);
        assert_eq!(state.steps.active().map(|b| b.key), Some("generate"));
        assert_eq!(state.debug_log.len(), names.len());
    }

    #[test]
    fn empty_step_list_keeps_previous_trace() {
        let mut state = SessionState::new();
        state.debug_log = vec![PipelineStep::new("agent", "old")];
        let id = sent_request_id(submit(&mut state, "q"));

        state.apply(SessionEvent::QueryAnswered {
            request_id: id,
            answer: answer("a", &[]),
        });

        assert_eq!(state.debug_log, vec![PipelineStep::new("agent", "old")]);
    }

    #[test]
    fn failure_reply_uses_server_message_or_fallback() {
        let event = SessionEvent::from_query_reply(
            3,
            Reply::Failure {
                message: Some("Failed to initialize pipeline".to_string()),
            },
        );
        assert!(matches!(
            event,
            SessionEvent::QueryFailed { request_id: 3, ref message }
                if message == "Failed to initialize pipeline"
        ));

        let event = SessionEvent::from_query_reply(3, Reply::Failure { message: None });
        assert!(matches!(
            event,
            SessionEvent::QueryFailed { ref message, .. } if message == QUERY_ERROR_FALLBACK
        ));
    }

    #[test]
    fn failed_query_appends_error_turn_and_restores_controls() {
        let mut state = SessionState::new();
        let id = sent_request_id(submit(&mut state, "q"));

        state.apply(SessionEvent::QueryFailed {
            request_id: id,
            message: "Failed to process query".to_string(),
        });

        assert_eq!(
            state.transcript.last(),
            Some(&TranscriptEntry::new(TurnRole::Error, "Failed to process query"))
        );
        assert!(!state.sending);
        assert!(!state.processing);
    }

    #[test]
    fn clear_wipes_panes_but_pending_answer_still_renders() {
        let mut state = SessionState::new();
        let first = sent_request_id(submit(&mut state, "one"));
        state.apply(SessionEvent::QueryAnswered {
            request_id: first,
            answer: answer("uno", &["agent", "generate"]),
        });
        let second = sent_request_id(submit(&mut state, "two"));

        state.apply(SessionEvent::HistoryCleared);
        assert!(state.transcript.is_empty());
        assert!(state.debug_log.is_empty());
        assert_eq!(state.steps, StepBoard::default());
        assert!(state.sending);

        state.apply(SessionEvent::QueryAnswered {
            request_id: second,
            answer: answer("dos", &["generate"]),
        });
        assert_eq!(
            state.transcript,
            vec![TranscriptEntry::new(TurnRole::Assistant, "dos")]
        );
        assert_eq!(state.debug_log.len(), 1);
        assert_eq!(state.steps.status_of("generate"), Some(StepStatus::Active));
        assert!(!state.sending);
        assert!(!state.processing);
    }

    #[test]
    fn failure_after_clear_still_renders_error_turn() {
        let mut state = SessionState::new();
        let id = sent_request_id(submit(&mut state, "q"));
        state.apply(SessionEvent::HistoryCleared);

        state.apply(SessionEvent::QueryFailed {
            request_id: id,
            message: "boom".to_string(),
        });
        assert_eq!(
            state.transcript,
            vec![TranscriptEntry::new(TurnRole::Error, "boom")]
        );
    }

    #[test]
    fn clear_reply_maps_success_to_event_and_failure_to_nothing() {
        let ok = SessionEvent::from_clear_reply(Reply::Success(Acknowledgement {
            message: Some("History cleared".to_string()),
        }));
        assert!(matches!(ok, Some(SessionEvent::HistoryCleared)));

        let refused = SessionEvent::from_clear_reply(Reply::Failure {
            message: Some("nope".to_string()),
        });
        assert!(refused.is_none());
    }

    #[test]
    fn refused_clear_leaves_console_untouched() {
        let mut state = SessionState::new();
        let id = sent_request_id(submit(&mut state, "q"));
        state.apply(SessionEvent::QueryAnswered {
            request_id: id,
            answer: answer("a", &["agent", "generate"]),
        });
        let before = state.clone();

        if let Some(event) = SessionEvent::from_clear_reply(Reply::Failure { message: None }) {
            state.apply(event);
        }
        assert_eq!(state, before);

        if let Some(event) =
            SessionEvent::from_clear_reply(Reply::Success(Acknowledgement::default()))
        {
            state.apply(event);
        }
        assert!(state.transcript.is_empty());
        assert!(state.debug_log.is_empty());
    }

    #[test]
    fn response_for_unknown_request_is_dropped() {
        let mut state = SessionState::new();
        let id = sent_request_id(submit(&mut state, "q"));

        state.apply(SessionEvent::QueryAnswered {
            request_id: id + 10,
            answer: answer("ghost", &["generate"]),
        });

        assert_eq!(state.transcript.len(), 1);
        assert!(state.sending);
    }

    #[test]
    fn history_replaces_transcript_in_order() {
        let mut state = SessionState::new();
        state.transcript.push(TranscriptEntry::new(TurnRole::Error, "stale"));

        state.apply(SessionEvent::HistoryLoaded(vec![
            ChatMessage {
                role: Role::User,
                content: "hi".to_string(),
            },
            ChatMessage {
                role: Role::Assistant,
                content: "hello".to_string(),
            },
        ]));

        assert_eq!(
            state.transcript,
            vec![
                TranscriptEntry::new(TurnRole::User, "hi"),
                TranscriptEntry::new(TurnRole::Assistant, "hello"),
            ]
        );
    }

    #[test]
    fn page_load_results_apply_in_either_order() {
        let history = vec![
            ChatMessage {
                role: Role::User,
                content: "hi".to_string(),
            },
            ChatMessage {
                role: Role::Assistant,
                content: "hello".to_string(),
            },
        ];
        let status = PipelineStatus {
            initialized: true,
            processing: true,
            current_step: Some("retrieve".to_string()),
        };

        let mut status_first = SessionState::new();
        status_first.apply(SessionEvent::StatusReceived(status.clone()));
        status_first.apply(SessionEvent::HistoryLoaded(history.clone()));

        let mut history_first = SessionState::new();
        history_first.apply(SessionEvent::HistoryLoaded(history));
        history_first.apply(SessionEvent::StatusReceived(status));

        assert_eq!(status_first, history_first);
        assert_eq!(history_first.transcript.len(), 2);
        assert_eq!(history_first.steps.active().map(|b| b.key), Some("retrieve"));
    }

    #[test]
    fn history_with_unknown_role_renders_as_assistant_turn() {
        let mut state = SessionState::new();
        let history = crate::wire::decode_history(
            r#"{"history": [{"role": "system", "content": "setup"}]}"#,
        )
        .unwrap();

        state.apply(SessionEvent::HistoryLoaded(history));
        assert_eq!(
            state.transcript,
            vec![TranscriptEntry::new(TurnRole::Assistant, "setup")]
        );
        assert_eq!(state.transcript[0].role.label(), "Assistant");
    }

    #[test]
    fn empty_history_leaves_transcript_alone() {
        let mut state = SessionState::new();
        state.transcript.push(TranscriptEntry::new(TurnRole::User, "keep me"));

        state.apply(SessionEvent::HistoryLoaded(Vec::new()));

        assert_eq!(state.transcript.len(), 1);
    }

    #[test]
    fn status_updates_badge_and_indicator() {
        let mut state = SessionState::new();
        state.steps.update("agent", StepStatus::Active);

        state.apply(SessionEvent::StatusReceived(PipelineStatus {
            initialized: true,
            processing: true,
            current_step: Some("grade_documents".to_string()),
        }));

        assert!(state.initialized);
        assert!(state.processing);
        assert_eq!(state.pipeline_label(), "Initialized");
        assert_eq!(state.current_step.as_deref(), Some("grade_documents"));
        assert_eq!(state.steps.active().map(|b| b.key), Some("grade"));
        assert_eq!(state.steps.status_of("agent"), Some(StepStatus::Active));

        state.apply(SessionEvent::StatusReceived(PipelineStatus::default()));
        assert!(!state.processing);
        assert_eq!(state.pipeline_label(), "Not Initialized");
        assert_eq!(state.steps.active().map(|b| b.key), Some("grade"));
    }

    #[test]
    fn blank_url_list_alerts_without_request() {
        let mut state = SessionState::new();
        state.apply(SessionEvent::UrlsEdited(" \n   \n".to_string()));

        assert_eq!(
            state.apply(SessionEvent::InitializeRequested),
            Some(Command::Alert(EMPTY_URLS_MESSAGE.to_string()))
        );
        assert!(!state.initializing);
    }

    #[test]
    fn initialize_round_trip() {
        let mut state = SessionState::new();
        state.apply(SessionEvent::SettingsOpened);
        state.apply(SessionEvent::UrlsEdited(
            " https://a.example/one \n\nhttps://b.example/two\n".to_string(),
        ));

        let command = state.apply(SessionEvent::InitializeRequested);
        assert_eq!(
            command,
            Some(Command::Initialize {
                urls: vec![
                    "https://a.example/one".to_string(),
                    "https://b.example/two".to_string(),
                ]
            })
        );
        assert!(state.initializing);
        assert_eq!(state.initialize_label(), INITIALIZE_LABEL_BUSY);
        assert_eq!(state.apply(SessionEvent::InitializeRequested), None);

        let command = state.apply(SessionEvent::from_initialize_reply(Reply::Success(
            Acknowledgement::default(),
        )));
        assert_eq!(
            command,
            Some(Command::Alert(INITIALIZE_SUCCESS_MESSAGE.to_string()))
        );
        assert!(state.initialized);
        assert!(!state.settings_open);
        assert_eq!(state.initialize_label(), INITIALIZE_LABEL_IDLE);
    }

    #[test]
    fn initialize_failure_alerts_and_keeps_modal_open() {
        let mut state = SessionState::new();
        state.apply(SessionEvent::SettingsOpened);
        state.apply(SessionEvent::InitializeRequested);

        let command =
            state.apply(SessionEvent::from_initialize_reply(Reply::Failure { message: None }));

        assert_eq!(
            command,
            Some(Command::Alert(INITIALIZE_ERROR_FALLBACK.to_string()))
        );
        assert!(state.settings_open);
        assert!(!state.initialized);
        assert!(!state.initializing);
    }

    #[test]
    fn settings_textarea_starts_with_default_urls() {
        let state = SessionState::new();
        assert_eq!(parse_urls(&state.urls_draft).len(), 3);
    }

    #[test]
    fn debug_toggle_flips_visibility() {
        let mut state = SessionState::new();
        state.apply(SessionEvent::DebugToggled);
        assert!(state.debug_visible);
        state.apply(SessionEvent::DebugToggled);
        assert!(!state.debug_visible);
    }
}
