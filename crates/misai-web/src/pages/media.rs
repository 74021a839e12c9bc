//! Shared layout of the image and video check pages

use leptos::*;
use misai_core::model::MediaUpload;
use misai_core::preview::PreviewSlot;
use misai_core::render::{render_state, MediaReport, Panel, Render};
use misai_core::{HttpBackend, ModalityAdapter, SubmissionMachine};

use crate::components::{FailureBanner, MediaReportView};
use crate::preview::{read_file, BlobUrl};
use crate::submit::launch;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreviewKind {
    Image,
    Video,
}

/// Page-specific wording
#[derive(Debug, Clone, Copy)]
pub struct MediaLabels {
    pub title: &'static str,
    pub accept: &'static str,
    pub submit: &'static str,
    /// Shown in the result area while the request is in flight
    pub pending: &'static str,
    pub change: &'static str,
    pub findings_title: &'static str,
    pub preview: PreviewKind,
}

pub fn media_check<A>(adapter: A, labels: MediaLabels) -> impl IntoView
where
    A: ModalityAdapter<Input = Option<MediaUpload>> + Clone + 'static,
    A::Output: Render<Report = MediaReport> + 'static,
{
    let machine = create_rw_signal(SubmissionMachine::new(adapter));
    let backend = expect_context::<HttpBackend>();
    let (notice, set_notice) = create_signal(None::<String>);
    let (preview_url, set_preview_url) = create_signal(None::<String>);
    let slot = store_value(PreviewSlot::<BlobUrl>::new());
    // latest selection wins when reads finish out of order
    let selection = store_value(0u64);

    on_cleanup(move || {
        slot.try_update_value(|s| s.clear());
    });

    let submitting = move || machine.with(|m| m.is_submitting());
    let file_name = move || {
        machine.with(|m| m.input().as_ref().map(|upload| upload.file_name.clone()))
    };

    let on_change = move |ev: ev::Event| {
        let input = event_target::<web_sys::HtmlInputElement>(&ev);
        let Some(file) = input.files().and_then(|files| files.get(0)) else {
            return;
        };

        match BlobUrl::create(&file) {
            Some(url) => slot.update_value(|s| s.replace(url)),
            None => slot.update_value(|s| s.clear()),
        }
        set_preview_url.set(slot.with_value(|s| s.url().map(str::to_string)));

        let current = selection.with_value(|n| n + 1);
        selection.set_value(current);

        spawn_local(async move {
            let loaded = read_file(&file).await;
            if selection.try_with_value(|n| *n) != Some(current) {
                return;
            }
            match loaded {
                Ok(upload) => {
                    tracing::debug!("Loaded {} ({} bytes)", upload.file_name, upload.len());
                    set_notice.try_set(None);
                    machine.try_update(|m| {
                        if let Err(e) = m.replace_input(Some(upload)) {
                            tracing::debug!("Ignored file selection: {}", e);
                        }
                    });
                }
                Err(err) => {
                    // the preview must not show a file that will not be sent
                    tracing::warn!("{}", err);
                    slot.try_update_value(|s| s.clear());
                    set_preview_url.try_set(None);
                    set_notice.try_set(Some(err));
                    machine.try_update(|m| {
                        if let Err(e) = m.replace_input(None) {
                            tracing::debug!("Kept previous file: {}", e);
                        }
                    });
                }
            }
        });
    };

    // drops the file, its preview and any result
    let on_change_file = move |_| {
        selection.update_value(|n| *n += 1);
        slot.update_value(|s| s.clear());
        set_preview_url.set(None);
        set_notice.set(None);
        machine.update(|m| {
            if let Err(e) = m.replace_input(None) {
                tracing::debug!("Ignored file reset: {}", e);
            }
        });
    };

    let on_submit = move |ev: ev::SubmitEvent| {
        ev.prevent_default();
        launch(machine, backend.clone(), set_notice);
    };

    view! {
        <div class="space-y-6">
            <h1 class="text-3xl font-bold text-gray-900">{labels.title}</h1>

            <form class="bg-white rounded-lg shadow p-6 space-y-4" on:submit=on_submit>
                <input
                    type="file"
                    accept=labels.accept
                    class="block w-full text-sm text-gray-600"
                    prop:disabled=submitting
                    on:change=on_change
                />

                {move || file_name().map(|name| view! {
                    <p class="text-sm text-gray-500">{name}</p>
                })}

                {move || preview_url.get().map(|url| match labels.preview {
                    PreviewKind::Image => view! {
                        <img src=url alt="Selected image" class="max-h-80 rounded-lg"/>
                    }.into_view(),
                    PreviewKind::Video => view! {
                        <video src=url controls=true class="max-h-80 rounded-lg"></video>
                    }.into_view(),
                })}

                {move || notice.get().map(|message| view! {
                    <p class="text-sm text-red-600">{message}</p>
                })}

                <div class="flex space-x-2">
                    <button
                        type="submit"
                        class="bg-blue-600 text-white px-4 py-2 rounded-lg hover:bg-blue-700 disabled:opacity-50"
                        prop:disabled=submitting
                    >
                        {move || if submitting() { "Verifying..." } else { labels.submit }}
                    </button>
                    <Show when=move || file_name().is_some() && !submitting()>
                        <button
                            type="button"
                            class="bg-gray-200 text-gray-800 px-4 py-2 rounded-lg"
                            on:click=on_change_file
                        >
                            {labels.change}
                        </button>
                    </Show>
                </div>
            </form>

            {move || match machine.with(|m| render_state(m.state())) {
                Panel::Result(report) => view! {
                    <MediaReportView report=report findings_title=labels.findings_title/>
                }.into_view(),
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
                Panel::Pending => view! {
                    <p class="text-gray-500 animate-pulse">{labels.pending}</p>
                }.into_view(),
                Panel::Hidden => ().into_view(),
            }}
        </div>
    }
}
