use leptos::*;
use misai_core::render::TextReport;

use super::ScoreMeter;

#[component]
pub fn TextReportView(report: TextReport) -> impl IntoView {
    let TextReport {
        hallucination,
        metrics,
        analysis,
    } = report;

    view! {
        <div class="bg-white rounded-lg shadow p-6 space-y-6">
            <h2 class="text-xl font-semibold">"Results"</h2>
            <ScoreMeter title="Hallucination Score" bar=hallucination/>

            {(!metrics.is_empty()).then(|| view! {
                <div class="grid grid-cols-2 md:grid-cols-4 gap-4">
                    {metrics.into_iter().map(|card| view! {
                        <div class="bg-gray-50 rounded-lg p-3">
                            <div class="text-xs text-gray-500 uppercase">{card.label}</div>
                            <div class="text-lg font-semibold">{card.value}</div>
                        </div>
                    }).collect_view()}
                </div>
            })}

            {analysis.map(|text| view! {
                <div>
                    <h3 class="font-medium mb-2">"Analysis"</h3>
                    <p class="text-gray-700">{text}</p>
                </div>
            })}
        </div>
    }
}
