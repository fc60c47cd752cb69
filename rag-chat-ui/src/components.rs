use dioxus::prelude::*;
use rag_types::{SessionEvent, SessionState, TranscriptEntry, TurnRole};

use crate::controller::{self, dispatch};
use crate::interop::scroll_to_bottom;
use crate::panels::{SettingsModal, StepPanel};

pub const CHAT_HISTORY_ID: &str = "chat-history";
pub const DEBUG_LOGS_ID: &str = "debug-logs";

#[component]
pub fn ChatConsole() -> Element {
    let session = use_signal(SessionState::new);

    // Status check, history fetch and the status poll, side by side
    use_effect(move || controller::bootstrap(session));

    // Keep the newest turn and the newest trace entry in view
    use_effect(move || {
        let _ = session.read().transcript.len();
        scroll_to_bottom(CHAT_HISTORY_ID);
    });
    use_effect(move || {
        let _ = session.read().debug_log.len();
        scroll_to_bottom(DEBUG_LOGS_ID);
    });

    let onsubmit = use_callback(move |e: FormEvent| {
        e.prevent_default();
        dispatch(session, SessionEvent::QuerySubmitted);
    });

    let oninput = use_callback(move |e: FormEvent| {
        dispatch(session, SessionEvent::DraftEdited(e.value()));
    });

    let state = session.read();
    let pipeline_class = if state.initialized {
        "pipeline-badge ready"
    } else {
        "pipeline-badge idle"
    };

    rsx! {
        style { {CONSOLE_STYLES} }

        div {
            class: "console",

            div {
                class: "console-header",
                div {
                    class: "console-title",
                    span { class: "console-icon", "🔎" }
                    span { "Agentic RAG" }
                }
                div {
                    class: "console-actions",
                    span { id: "pipelineStatus", class: pipeline_class, "{state.pipeline_label()}" }
                    button {
                        class: "icon-button",
                        title: "Settings",
                        onclick: move |_| dispatch(session, SessionEvent::SettingsOpened),
                        "⚙"
                    }
                    button {
                        class: "icon-button",
                        title: "Clear history",
                        onclick: move |_| controller::request_clear(session),
                        "🗑"
                    }
                }
            }

            div {
                class: "console-body",

                div {
                    class: "chat-column",
                    div {
                        id: CHAT_HISTORY_ID,
                        class: "messages-scroll-area",
                        div {
                            class: "messages-list",
                            if state.transcript.is_empty() {
                                div {
                                    class: "empty-state",
                                    div { class: "empty-icon", "💬" }
                                    p { "Ask the pipeline a question" }
                                    span { "Answers are grounded in the indexed documents" }
                                }
                            } else {
                                for (i, entry) in state.transcript.iter().enumerate() {
                                    MessageBubble { key: "{i}", entry: entry.clone() }
                                }
                            }
                            if state.processing {
                                TypingIndicator {}
                            }
                        }
                    }

                    form {
                        class: "chat-input-area",
                        onsubmit,
                        input {
                            class: "chat-input",
                            r#type: "text",
                            placeholder: "Ask a question...",
                            value: "{state.draft}",
                            oninput,
                        }
                        button {
                            class: "send-button",
                            r#type: "submit",
                            disabled: state.sending,
                            if state.sending {
                                span { class: "spinner", "◐" }
                            } else {
                                span { "➤" }
                            }
                        }
                    }
                }

                StepPanel {
                    badges: state.steps.badges().to_vec(),
                    debug_log: state.debug_log.clone(),
                    debug_visible: state.debug_visible,
                    on_toggle_debug: move |_| dispatch(session, SessionEvent::DebugToggled),
                }
            }

            if state.settings_open {
                SettingsModal {
                    urls: state.urls_draft.clone(),
                    busy: state.initializing,
                    save_label: state.initialize_label().to_string(),
                    on_input: move |text: String| dispatch(session, SessionEvent::UrlsEdited(text)),
                    on_close: move |_| dispatch(session, SessionEvent::SettingsClosed),
                    on_save: move |_| dispatch(session, SessionEvent::InitializeRequested),
                }
            }
        }
    }
}

/// Row, avatar and bubble classes for a turn.
pub fn turn_classes(role: TurnRole) -> (&'static str, &'static str, &'static str) {
    match role {
        TurnRole::User => (
            "message-row user-row",
            "avatar user-avatar",
            "message-bubble user-bubble",
        ),
        TurnRole::Assistant => (
            "message-row assistant-row",
            "avatar assistant-avatar",
            "message-bubble assistant-bubble",
        ),
        TurnRole::Error => ("message-row error-row", "", "error-banner"),
    }
}

#[component]
pub fn MessageBubble(entry: TranscriptEntry) -> Element {
    let (row_class, avatar_class, bubble_class) = turn_classes(entry.role);

    if entry.role == TurnRole::Error {
        return rsx! {
            div {
                class: row_class,
                div {
                    class: bubble_class,
                    span { class: "error-icon", "⚠" }
                    "{entry.content}"
                }
            }
        };
    }

    let initial = if entry.role == TurnRole::User { "Y" } else { "A" };

    rsx! {
        div {
            class: "{row_class} fade-in",
            div { class: avatar_class, "{initial}" }
            div {
                class: "message-content",
                div {
                    class: "message-header",
                    span { class: "sender-name", "{entry.role.label()}" }
                }
                div { class: bubble_class, "{entry.content}" }
            }
        }
    }
}

#[component]
pub fn TypingIndicator() -> Element {
    rsx! {
        div {
            id: "typingIndicator",
            class: "message-row assistant-row",
            div { class: "avatar assistant-avatar", "A" }
            div {
                class: "message-content",
                div {
                    class: "message-header",
                    span { class: "sender-name", "Assistant" }
                }
                div {
                    class: "typing-indicator",
                    span {}
                    span {}
                    span {}
                }
            }
        }
    }
}

const CONSOLE_STYLES: &str = r#"
.console {
    display: flex;
    flex-direction: column;
    height: 100vh;
    background: var(--chat-bg, #0f172a);
    color: var(--text-primary, #f8fafc);
    overflow: hidden;
}

.console-header {
    display: flex;
    align-items: center;
    justify-content: space-between;
    padding: 0.75rem 1rem;
    background: var(--chat-header-bg, #1e293b);
    border-bottom: 1px solid var(--border-color, #334155);
    flex-shrink: 0;
}

.console-title {
    display: flex;
    align-items: center;
    gap: 0.5rem;
    font-weight: 600;
}

.console-icon {
    font-size: 1.25rem;
}

.console-actions {
    display: flex;
    align-items: center;
    gap: 0.5rem;
}

.pipeline-badge {
    padding: 0.25rem 0.75rem;
    border-radius: 9999px;
    font-size: 0.75rem;
    font-weight: 500;
}

.pipeline-badge.idle {
    background: var(--border-color, #334155);
    color: var(--text-secondary, #94a3b8);
}

.pipeline-badge.ready {
    background: rgba(16, 185, 129, 0.15);
    color: #34d399;
}

.icon-button {
    background: transparent;
    border: 1px solid var(--border-color, #334155);
    color: var(--text-secondary, #94a3b8);
    border-radius: 0.5rem;
    padding: 0.25rem 0.5rem;
    cursor: pointer;
}

.icon-button:hover {
    color: var(--text-primary, #f8fafc);
}

.console-body {
    display: flex;
    flex: 1;
    min-height: 0;
}

.chat-column {
    display: flex;
    flex-direction: column;
    flex: 1;
    min-width: 0;
}

.messages-scroll-area {
    flex: 1;
    overflow-y: auto;
    overflow-x: hidden;
    padding: 1rem;
    scroll-behavior: smooth;
}

.messages-list {
    display: flex;
    flex-direction: column;
    gap: 1rem;
}

.empty-state {
    display: flex;
    flex-direction: column;
    align-items: center;
    padding: 3rem 1rem;
    color: var(--text-muted, #64748b);
    text-align: center;
}

.empty-icon {
    font-size: 3rem;
    margin-bottom: 1rem;
    opacity: 0.5;
}

.empty-state p {
    font-weight: 500;
    color: var(--text-secondary, #94a3b8);
    margin: 0 0 0.25rem 0;
}

.message-row {
    display: flex;
    gap: 0.75rem;
}

.user-row {
    flex-direction: row-reverse;
}

.avatar {
    width: 2rem;
    height: 2rem;
    border-radius: 50%;
    display: flex;
    align-items: center;
    justify-content: center;
    font-size: 0.75rem;
    font-weight: 600;
    flex-shrink: 0;
}

.user-avatar {
    background: var(--accent-bg, #3b82f6);
    color: white;
}

.assistant-avatar {
    background: #10b981;
    color: white;
}

.message-content {
    display: flex;
    flex-direction: column;
    gap: 0.25rem;
    max-width: calc(100% - 3rem);
}

.user-row .message-content {
    align-items: flex-end;
}

.message-header {
    font-size: 0.75rem;
}

.sender-name {
    font-weight: 500;
    color: var(--text-secondary, #94a3b8);
}

.message-bubble {
    padding: 0.75rem 1rem;
    border-radius: 1rem;
    line-height: 1.5;
    white-space: pre-wrap;
    word-wrap: break-word;
}

.user-bubble {
    background: var(--accent-bg, #3b82f6);
    color: white;
    border-bottom-right-radius: 0.25rem;
}

.assistant-bubble {
    background: var(--bg-secondary, #1e293b);
    border: 1px solid var(--border-color, #334155);
    border-bottom-left-radius: 0.25rem;
}

.error-banner {
    width: 100%;
    padding: 0.75rem;
    border-radius: 0.5rem;
    background: rgba(239, 68, 68, 0.15);
    color: #fca5a5;
}

.error-icon {
    margin-right: 0.5rem;
}

.fade-in {
    animation: fade-in 0.3s ease-in;
}

@keyframes fade-in {
    from { opacity: 0; transform: translateY(4px); }
    to { opacity: 1; transform: translateY(0); }
}

.typing-indicator {
    display: flex;
    gap: 0.25rem;
    padding: 1rem;
    background: var(--bg-secondary, #1e293b);
    border: 1px solid var(--border-color, #334155);
    border-radius: 1rem;
    width: fit-content;
}

.typing-indicator span {
    width: 0.5rem;
    height: 0.5rem;
    background: var(--text-muted, #64748b);
    border-radius: 50%;
    animation: typing-bounce 1.4s infinite ease-in-out both;
}

.typing-indicator span:nth-child(1) { animation-delay: -0.32s; }
.typing-indicator span:nth-child(2) { animation-delay: -0.16s; }

@keyframes typing-bounce {
    0%, 80%, 100% { transform: scale(0); }
    40% { transform: scale(1); }
}

.chat-input-area {
    display: flex;
    gap: 0.5rem;
    padding: 0.75rem 1rem;
    background: var(--chat-header-bg, #1e293b);
    border-top: 1px solid var(--border-color, #334155);
}

.chat-input {
    flex: 1;
    padding: 0.75rem 1rem;
    background: var(--input-bg, #0f172a);
    color: var(--text-primary, #f8fafc);
    border: 1px solid var(--border-color, #334155);
    border-radius: 1.5rem;
    outline: none;
}

.chat-input:focus {
    border-color: var(--accent-bg, #3b82f6);
}

.send-button {
    width: 2.75rem;
    height: 2.75rem;
    background: var(--accent-bg, #3b82f6);
    color: white;
    border: none;
    border-radius: 50%;
    cursor: pointer;
    font-size: 1.25rem;
}

.send-button:disabled {
    opacity: 0.5;
    cursor: not-allowed;
}

.send-button .spinner {
    display: inline-block;
    animation: spin 1s linear infinite;
}

@keyframes spin {
    from { transform: rotate(0deg); }
    to { transform: rotate(360deg); }
}
"#;
