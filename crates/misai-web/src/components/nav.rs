//! Navigation component

use leptos::*;
use leptos_router::*;

#[component]
pub fn Nav() -> impl IntoView {
    let links = [
        ("/testai", "Test AI"),
        ("/testimage", "Image Check"),
        ("/testvideo", "Video Check"),
        ("/misbot", "MisBot"),
    ];

    view! {
        <nav class="bg-white shadow">
            <div class="container mx-auto px-4">
                <div class="flex justify-between h-16">
                    <div class="flex items-center">
                        <A href="/" class="text-xl font-bold text-gray-900">
                            "MISAI"
                        </A>
                        <div class="hidden md:flex ml-10 space-x-4">
                            {links.into_iter().map(|(href, label)| view! {
                                <A href=href active_class="text-blue-600" class="text-gray-600 hover:text-gray-900 px-3 py-2">
                                    {label}
                                </A>
                            }).collect_view()}
                        </div>
                    </div>
                </div>
            </div>
        </nav>
    }
}
