//! AI hallucination test page

use leptos::*;
use misai_core::adapters::{TextAdapter, TextInput};
use misai_core::render::{render_state, Panel};
use misai_core::{AiModel, HttpBackend, SubmissionMachine};

use crate::components::{FailureBanner, TextReportView};
use crate::submit::launch;

#[component]
pub fn TestAiPage() -> impl IntoView {
    let machine = create_rw_signal(SubmissionMachine::new(TextAdapter));
    let backend = expect_context::<HttpBackend>();
    let (notice, set_notice) = create_signal(None::<String>);

    let submitting = move || machine.with(|m| m.is_submitting());
    let selected = move || {
        machine.with(|m| m.input().model.map(|model| model.as_str()).unwrap_or_default())
    };
    let text = move || machine.with(|m| m.input().text.clone());

    let edit = move |f: Box<dyn FnOnce(&mut TextInput)>| {
        machine.update(|m| {
            if let Err(e) = m.edit_input(f) {
                tracing::debug!("Ignored edit: {}", e);
            }
        });
    };

    let on_submit = move |ev: ev::SubmitEvent| {
        ev.prevent_default();
        launch(machine, backend.clone(), set_notice);
    };

    view! {
        <div class="space-y-6">
            <h1 class="text-3xl font-bold text-gray-900">"Test AI"</h1>

            <form class="bg-white rounded-lg shadow p-6 space-y-4" on:submit=on_submit>
                <label class="block">
                    <span class="text-gray-700">"Model"</span>
                    <select
                        class="mt-1 w-full px-4 py-2 border rounded-lg"
                        prop:value=selected
                        prop:disabled=submitting
                        on:change=move |ev| {
                            let model = event_target_value(&ev).parse::<AiModel>().ok();
                            edit(Box::new(move |input| input.model = model));
                        }
                    >
                        <option value="">"Select a model"</option>
                        {AiModel::ALL.iter().map(|model| view! {
                            <option value=model.as_str()>{model.as_str()}</option>
                        }).collect_view()}
                    </select>
                </label>

                <label class="block">
                    <span class="text-gray-700">"Statement"</span>
                    <textarea
                        class="mt-1 w-full px-4 py-2 border rounded-lg"
                        rows="5"
                        placeholder="Enter a statement to test..."
                        prop:value=text
                        prop:disabled=submitting
                        on:input=move |ev| {
                            let value = event_target_value(&ev);
                            edit(Box::new(move |input| input.text = value));
                        }
                    ></textarea>
                </label>

                {move || notice.get().map(|message| view! {
                    <p class="text-sm text-red-600">{message}</p>
                })}

                <button
                    type="submit"
                    class="bg-blue-600 text-white px-4 py-2 rounded-lg hover:bg-blue-700 disabled:opacity-50"
                    prop:disabled=submitting
                >
                    {move || if submitting() { "Testing..." } else { "Test AI" }}
                </button>
            </form>

            {move || match machine.with(|m| render_state(m.state())) {
                Panel::Result(report) => view! { <TextReportView report=report/> }.into_view(),
                Panel::Failure(banner) => view! {
                    <FailureBanner
                        banner=banner
                        on_dismiss=move |_| machine.update(|m| {
                            if let Err(e) = m.reset() {
                                tracing::debug!("Ignored dismiss: {}", e);
                            }
                        })
                    />
                }.into_view(),
                Panel::Pending | Panel::Hidden => ().into_view(),
            }}
        </div>
    }
}
