//! Side panel (pipeline steps + debug trace) and the settings modal.

use dioxus::prelude::*;
use rag_types::{PipelineStep, StepBadge};

use crate::components::DEBUG_LOGS_ID;

/// Text shown for a step in the debug trace.
pub fn step_content(step: &PipelineStep) -> &str {
    if step.content.is_empty() {
        "No content"
    } else {
        &step.content
    }
}

pub fn debug_chevron(visible: bool) -> &'static str {
    if visible {
        "▲"
    } else {
        "▼"
    }
}

#[component]
pub fn StepPanel(
    badges: Vec<StepBadge>,
    debug_log: Vec<PipelineStep>,
    debug_visible: bool,
    on_toggle_debug: Callback<()>,
) -> Element {
    rsx! {
        style { {PANEL_STYLES} }

        aside {
            class: "step-panel",

            h3 { class: "panel-heading", "Pipeline Steps" }
            div {
                class: "step-list",
                for badge in badges {
                    StepCard { key: "{badge.key}", badge: badge.clone() }
                }
            }

            div {
                class: "debug-header",
                h3 { class: "panel-heading", "Debug Logs" }
                button {
                    class: "icon-button",
                    onclick: move |_| on_toggle_debug.call(()),
                    "{debug_chevron(debug_visible)}"
                }
            }
            div {
                id: DEBUG_LOGS_ID,
                class: if debug_visible { "debug-logs" } else { "debug-logs hidden" },
                for (i, step) in debug_log.iter().enumerate() {
                    div {
                        key: "{i}",
                        class: "debug-entry",
                        div { class: "debug-step", "{step.step}" }
                        pre { class: "debug-content", "{step_content(step)}" }
                    }
                }
            }
        }
    }
}

/// Card class follows the board's highlight, not the status label.
pub fn card_class(badge: &StepBadge) -> &'static str {
    if badge.highlighted {
        "step-card active"
    } else {
        "step-card"
    }
}

#[component]
pub fn StepCard(badge: StepBadge) -> Element {
    rsx! {
        div {
            class: card_class(&badge),
            "data-step": badge.key,
            span { class: "step-title", "{badge.title}" }
            span { class: badge.status.css_class(), "{badge.status.label()}" }
        }
    }
}

#[component]
pub fn SettingsModal(
    urls: String,
    busy: bool,
    save_label: String,
    on_input: Callback<String>,
    on_close: Callback<()>,
    on_save: Callback<()>,
) -> Element {
    rsx! {
        div {
            class: "modal-backdrop",
            div {
                class: "modal",
                div {
                    class: "modal-header",
                    h3 { "Pipeline Settings" }
                    button {
                        class: "icon-button",
                        onclick: move |_| on_close.call(()),
                        "✕"
                    }
                }
                label { class: "modal-label", "Document URLs (one per line)" }
                textarea {
                    class: "modal-textarea",
                    rows: "6",
                    value: "{urls}",
                    oninput: move |e: FormEvent| on_input.call(e.value()),
                }
                div {
                    class: "modal-footer",
                    button {
                        class: "primary-button",
                        disabled: busy,
                        onclick: move |_| on_save.call(()),
                        "{save_label}"
                    }
                }
            }
        }
    }
}

const PANEL_STYLES: &str = r#"
.step-panel {
    width: 20rem;
    flex-shrink: 0;
    display: flex;
    flex-direction: column;
    gap: 0.75rem;
    padding: 1rem;
    background: var(--bg-secondary, #1e293b);
    border-left: 1px solid var(--border-color, #334155);
    overflow: hidden;
}

.panel-heading {
    margin: 0;
    font-size: 0.875rem;
    font-weight: 600;
    color: var(--text-secondary, #94a3b8);
}

.step-list {
    display: flex;
    flex-direction: column;
    gap: 0.5rem;
}

.step-card {
    display: flex;
    align-items: center;
    justify-content: space-between;
    padding: 0.5rem 0.75rem;
    border: 1px solid var(--border-color, #334155);
    border-radius: 0.5rem;
    transition: border-color 0.2s, box-shadow 0.2s;
}

.step-card.active {
    border-color: var(--accent-bg, #3b82f6);
    box-shadow: 0 0 0 2px rgba(59, 130, 246, 0.2);
}

.step-title {
    font-size: 0.875rem;
}

.step-status {
    padding: 0.125rem 0.5rem;
    border-radius: 9999px;
    font-size: 0.75rem;
    font-weight: 500;
}

.step-status.pending {
    background: var(--border-color, #334155);
    color: var(--text-secondary, #94a3b8);
}

.step-status.active {
    background: rgba(59, 130, 246, 0.15);
    color: #93c5fd;
}

.step-status.completed {
    background: rgba(16, 185, 129, 0.15);
    color: #34d399;
}

.step-status.error {
    background: rgba(239, 68, 68, 0.15);
    color: #fca5a5;
}

.debug-header {
    display: flex;
    align-items: center;
    justify-content: space-between;
}

.debug-logs {
    flex: 1;
    overflow-y: auto;
    font-size: 0.75rem;
}

.debug-logs.hidden {
    display: none;
}

.debug-entry {
    margin-bottom: 0.5rem;
    padding-bottom: 0.5rem;
    border-bottom: 1px solid var(--border-color, #334155);
}

.debug-step {
    font-weight: 700;
    color: #60a5fa;
    margin-bottom: 0.25rem;
}

.debug-content {
    margin: 0;
    white-space: pre-wrap;
    word-break: break-word;
}

.modal-backdrop {
    position: fixed;
    inset: 0;
    display: flex;
    align-items: center;
    justify-content: center;
    background: rgba(0, 0, 0, 0.6);
}

.modal {
    width: min(32rem, 90vw);
    display: flex;
    flex-direction: column;
    gap: 0.75rem;
    padding: 1.25rem;
    background: var(--chat-header-bg, #1e293b);
    border: 1px solid var(--border-color, #334155);
    border-radius: 0.75rem;
}

.modal-header {
    display: flex;
    align-items: center;
    justify-content: space-between;
}

.modal-header h3 {
    margin: 0;
}

.modal-label {
    font-size: 0.875rem;
    color: var(--text-secondary, #94a3b8);
}

.modal-textarea {
    padding: 0.75rem;
    background: var(--input-bg, #0f172a);
    color: var(--text-primary, #f8fafc);
    border: 1px solid var(--border-color, #334155);
    border-radius: 0.5rem;
    font-family: monospace;
    resize: vertical;
}

.modal-footer {
    display: flex;
    justify-content: flex-end;
}

.primary-button {
    padding: 0.5rem 1rem;
    background: var(--accent-bg, #3b82f6);
    color: white;
    border: none;
    border-radius: 0.5rem;
    cursor: pointer;
}

.primary-button:disabled {
    opacity: 0.5;
    cursor: not-allowed;
}
"#;
