//! MisBot conversation page

use leptos::html::Div;
use leptos::*;
use misai_core::adapters::ChatAdapter;
use misai_core::machine::execute;
use misai_core::model::Sender;
use misai_core::render::Render;
use misai_core::{ChatSession, Completion, ConversationMessage, HttpBackend, SubmitError};

use crate::components::FactCheckView;

#[component]
pub fn MisBotPage() -> impl IntoView {
    let session = create_rw_signal(ChatSession::new());
    let backend = expect_context::<HttpBackend>();
    let transcript = create_node_ref::<Div>();

    let sending = move || session.with(|s| s.is_sending());
    let draft = move || session.with(|s| s.draft().to_string());
    let messages = move || session.with(|s| s.log().messages().to_vec());

    // keep the newest message in view
    create_effect(move |_| {
        session.with(|_| ());
        if let Some(el) = transcript.get() {
            el.set_scroll_top(el.scroll_height());
        }
    });

    let send = move || {
        let Some(submitted) = session.try_update(|s| s.submit()) else {
            return;
        };
        let ticket = match submitted {
            Ok(ticket) => ticket,
            Err(SubmitError::Invalid(_)) | Err(SubmitError::InFlight) => return,
        };

        let backend = backend.clone();
        spawn_local(async move {
            let outcome = execute(&ChatAdapter, &backend, ticket.request()).await;
            match session.try_update(|s| s.complete(ticket.generation(), outcome)) {
                Some(Completion::Applied) => {}
                Some(Completion::Stale) | None => {
                    tracing::debug!("Dropped MisBot reply {}", ticket.generation());
                }
            }
        });
    };

    view! {
        <div class="max-w-3xl mx-auto flex flex-col h-[75vh] bg-white rounded-lg shadow">
            <div class="p-4 border-b">
                <h1 class="text-2xl font-bold text-gray-900">"MisBot"</h1>
                <p class="text-sm text-gray-500">"Ask about any claim you have seen online."</p>
            </div>

            <div node_ref=transcript class="flex-1 overflow-y-auto p-4 space-y-4">
                <For
                    each=messages
                    key=|message| message.id
                    children=|message| view! { <MessageBubble message=message/> }
                />
                <Show when=sending>
                    <div class="typing-indicator flex space-x-1 p-3" aria-label="MisBot is typing">
                        <span class="dot"></span>
                        <span class="dot"></span>
                        <span class="dot"></span>
                    </div>
                </Show>
            </div>

            <form
                class="p-4 border-t flex space-x-2"
                on:submit=move |ev: ev::SubmitEvent| {
                    ev.prevent_default();
                    send();
                }
            >
                <input
                    type="text"
                    class="flex-1 px-4 py-2 border rounded-lg"
                    placeholder="Type your message..."
                    prop:value=draft
                    prop:disabled=sending
                    on:input=move |ev| {
                        let text = event_target_value(&ev);
                        session.update(|s| {
                            let _ = s.set_draft(text);
                        });
                    }
                />
                <button
                    type="submit"
                    class="bg-blue-600 text-white px-4 py-2 rounded-lg hover:bg-blue-700 disabled:opacity-50"
                    prop:disabled=move || !session.with(|s| s.can_send())
                >
                    "Send"
                </button>
            </form>
        </div>
    }
}

#[component]
fn MessageBubble(message: ConversationMessage) -> impl IntoView {
    let from_user = message.sender == Sender::User;
    let row = if from_user { "flex justify-end" } else { "flex justify-start" };
    let bubble = match (from_user, message.is_error) {
        (true, _) => "bg-blue-600 text-white",
        (false, true) => "bg-red-50 text-red-700 border border-red-200",
        (false, false) => "bg-gray-100 text-gray-900",
    };
    let time = message.local_time();
    let card = message.fact_check.as_ref().map(|fc| fc.render());

    view! {
        <div class=row>
            <div class=format!("max-w-[80%] rounded-lg px-4 py-2 {}", bubble)>
                <p class="whitespace-pre-wrap">{message.text}</p>
                {card.map(|card| view! { <FactCheckView card=card/> })}
                <span class="block text-xs opacity-70 mt-1">{time}</span>
            </div>
        </div>
    }
}
