//! Glue between the session reducer and the outside world.
//!
//! `dispatch` feeds an event into the state signal and runs whatever
//! [`Command`] the reducer returns. Network results come back through
//! `dispatch` as new events.

use dioxus::prelude::*;
use dioxus_logger::tracing::{error, info, warn};
use gloo_timers::future::TimeoutFuture;
use rag_types::defaults::{
    CLEAR_CONFIRMATION, INITIALIZE_ERROR_FALLBACK, QUERY_ERROR_FALLBACK,
    QUERY_TRANSPORT_FALLBACK, STATUS_POLL_INTERVAL_MS,
};
use rag_types::{Command, SessionEvent, SessionState};

use crate::api;
use crate::interop;

pub fn dispatch(mut session: Signal<SessionState>, event: SessionEvent) {
    let command = session.write().apply(event);
    if let Some(command) = command {
        run_command(session, command);
    }
}

fn run_command(session: Signal<SessionState>, command: Command) {
    match command {
        Command::SendQuery { request_id, query } => {
            spawn(send_query(session, request_id, query));
        }
        Command::Initialize { urls } => {
            spawn(initialize(session, urls));
        }
        Command::Alert(message) => interop::alert(&message),
    }
}

async fn send_query(session: Signal<SessionState>, request_id: u64, query: String) {
    let event = match api::submit_query(&query).await {
        Ok(reply) => {
            if let Some(message) = reply.failure_message(QUERY_ERROR_FALLBACK) {
                warn!("Query rejected by pipeline: {}", message);
            }
            SessionEvent::from_query_reply(request_id, reply)
        }
        Err(e) => {
            error!("Failed to process query: {}", e);
            SessionEvent::QueryFailed {
                request_id,
                message: QUERY_TRANSPORT_FALLBACK.to_string(),
            }
        }
    };
    dispatch(session, event);
}

async fn initialize(session: Signal<SessionState>, urls: Vec<String>) {
    info!("Initializing pipeline with {} URLs", urls.len());
    let event = match api::initialize_pipeline(&urls).await {
        Ok(reply) => SessionEvent::from_initialize_reply(reply),
        Err(e) => {
            error!("Failed to initialize pipeline: {}", e);
            SessionEvent::InitializeFailed {
                message: INITIALIZE_ERROR_FALLBACK.to_string(),
            }
        }
    };
    dispatch(session, event);
}

/// Ask for confirmation, then clear history on the server and locally.
/// Declines and failures leave the console untouched.
pub fn request_clear(session: Signal<SessionState>) {
    if !interop::confirm(CLEAR_CONFIRMATION) {
        return;
    }

    spawn(async move {
        match api::clear_history().await {
            Ok(reply) => {
                if let Some(message) = reply.failure_message("unknown error") {
                    warn!("Server refused to clear history: {}", message);
                }
                if let Some(event) = SessionEvent::from_clear_reply(reply) {
                    dispatch(session, event);
                }
            }
            Err(e) => error!("Failed to clear history: {}", e),
        }
    });
}

pub async fn refresh_status(session: Signal<SessionState>) {
    match api::fetch_status().await {
        Ok(status) => dispatch(session, SessionEvent::StatusReceived(status)),
        Err(e) => error!("Error checking pipeline status: {}", e),
    }
}

pub async fn load_history(session: Signal<SessionState>) {
    match api::fetch_history().await {
        Ok(history) => dispatch(session, SessionEvent::HistoryLoaded(history)),
        Err(e) => error!("Error fetching history: {}", e),
    }
}

/// Poll `/status` forever at a fixed interval.
pub async fn poll_status(session: Signal<SessionState>, interval_ms: u32) {
    loop {
        TimeoutFuture::new(interval_ms).await;
        refresh_status(session).await;
    }
}

/// Page-load work. The first status check, the history load and the status
/// poll are separate tasks; none waits on another.
pub fn bootstrap(session: Signal<SessionState>) {
    spawn(refresh_status(session));
    spawn(load_history(session));
    spawn(poll_status(session, STATUS_POLL_INTERVAL_MS));
}
