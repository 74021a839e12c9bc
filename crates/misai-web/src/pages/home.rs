use leptos::*;
use leptos_router::*;

#[component]
pub fn HomePage() -> impl IntoView {
    let tools = [
        ("/testai", "Test AI", "Measure how often a language model hallucinates on a statement."),
        ("/testimage", "Image Check", "Detect face swaps, edited backgrounds and relit images."),
        ("/testvideo", "Video Check", "Find deepfaked faces, synthetic audio and spliced frames."),
        ("/misbot", "MisBot", "Ask a fact-checking assistant about any claim."),
    ];

    view! {
        <div class="space-y-10">
            <section class="text-center py-12">
                <h1 class="text-4xl font-bold text-gray-900">"MISAI"</h1>
                <p class="mt-4 text-lg text-gray-600">
                    "Verify AI output and media before you trust it."
                </p>
            </section>

            <section class="grid grid-cols-1 md:grid-cols-2 gap-6">
                {tools.into_iter().map(|(href, title, blurb)| view! {
                    <A href=href class="block bg-white rounded-lg shadow p-6 hover:shadow-md transition-shadow">
                        <h2 class="text-xl font-semibold text-gray-900">{title}</h2>
                        <p class="mt-2 text-gray-600">{blurb}</p>
                    </A>
                }).collect_view()}
            </section>
        </div>
    }
}
