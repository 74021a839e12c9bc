//! Dismissable failure banner

use leptos::*;
use misai_core::render::ErrorBanner;

#[component]
pub fn FailureBanner(
    banner: ErrorBanner,
    #[prop(into)] on_dismiss: Callback<()>,
) -> impl IntoView {
    view! {
        <div class="bg-red-50 border border-red-200 text-red-700 rounded-lg p-4 flex justify-between items-start" role="alert">
            <span>{banner.message}</span>
            <button
                class="ml-4 text-red-500 hover:text-red-700"
                aria-label="Dismiss"
                on:click=move |_| on_dismiss.call(())
            >
                "×"
            </button>
        </div>
    }
}
