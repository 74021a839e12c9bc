use leptos::*;

#[component]
pub fn Footer() -> impl IntoView {
    view! {
        <footer class="border-t mt-12 py-6 text-center text-sm text-gray-500">
            "MISAI · Misinformation detection for text, images and video"
        </footer>
    }
}
