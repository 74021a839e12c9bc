//! Percentage bar colored by severity

use leptos::*;
use misai_core::render::ScoreBar;

#[component]
pub fn ScoreMeter(
    #[prop(into)] title: String,
    bar: ScoreBar,
) -> impl IntoView {
    let fill = format!("width: {}; background-color: {};", bar.width(), bar.color());

    view! {
        <div class="score-meter">
            <div class="flex justify-between text-sm mb-1">
                <span class="text-gray-600">{title}</span>
                <span class="font-semibold" style=format!("color: {}", bar.color())>
                    {bar.label.clone()}
                </span>
            </div>
            <div class="w-full bg-gray-200 rounded-full h-3">
                <div class=format!("h-3 rounded-full severity-{}", bar.severity) style=fill></div>
            </div>
        </div>
    }
}
