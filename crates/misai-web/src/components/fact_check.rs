use leptos::*;
use misai_core::render::FactCheckCard;

use super::ScoreMeter;

#[component]
pub fn FactCheckView(card: FactCheckCard) -> impl IntoView {
    let class = format!("fact-check mt-2 rounded border p-3 text-sm {}", card.status_class());
    let color = format!("color: {}", card.severity.color());

    view! {
        <div class=class>
            <div class="font-semibold" style=color>
                {card.status}
            </div>
            {card.confidence.map(|bar| view! {
                <ScoreMeter title="Confidence" bar=bar/>
            })}
            {(!card.sources.is_empty()).then(|| view! {
                <ul class="mt-2 list-disc list-inside">
                    {card.sources.into_iter().map(|source| view! {
                        <li>
                            <a href=source.href target="_blank" rel="noopener noreferrer" class="text-blue-600 hover:underline">
                                {source.label}
                            </a>
                        </li>
                    }).collect_view()}
                </ul>
            })}
        </div>
    }
}
