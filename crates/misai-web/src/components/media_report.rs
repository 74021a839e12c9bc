//! Image and video authenticity report

use leptos::*;
use misai_core::render::MediaReport;

use super::ScoreMeter;

#[component]
pub fn MediaReportView(
    report: MediaReport,
    /// Heading of the findings table, e.g. "Manipulated Regions"
    #[prop(into)] findings_title: String,
) -> impl IntoView {
    let MediaReport {
        banner,
        confidence,
        analysis,
        findings,
    } = report;
    let has_ranges = findings.iter().any(|f| f.time_range.is_some());
    let tone = banner.tone();

    view! {
        <div class="bg-white rounded-lg shadow overflow-hidden">
            <div class=format!("p-6 text-white {}", tone)>
                <h2 class="text-2xl font-bold">{banner.title}</h2>
            </div>
            <div class="p-6 space-y-6">
                <ScoreMeter title="Confidence" bar=confidence/>

                {analysis.map(|text| view! {
                    <p class="text-gray-700">{text}</p>
                })}

                {(!findings.is_empty()).then(|| view! {
                    <div>
                        <h3 class="font-medium mb-2">{findings_title}</h3>
                        <table class="min-w-full divide-y divide-gray-200">
                            <thead>
                                <tr>
                                    <th class="px-4 py-2 text-left text-xs font-medium text-gray-500 uppercase">"Type"</th>
                                    {has_ranges.then(|| view! {
                                        <th class="px-4 py-2 text-left text-xs font-medium text-gray-500 uppercase">"Time"</th>
                                    })}
                                    <th class="px-4 py-2 text-left text-xs font-medium text-gray-500 uppercase">"Confidence"</th>
                                </tr>
                            </thead>
                            <tbody class="divide-y divide-gray-200">
                                {findings.into_iter().map(|row| view! {
                                    <tr>
                                        <td class="px-4 py-2 font-medium">{row.kind}</td>
                                        {row.time_range.map(|range| view! {
                                            <td class="px-4 py-2">{range}</td>
                                        })}
                                        <td class="px-4 py-2">{row.confidence}</td>
                                    </tr>
                                }).collect_view()}
                            </tbody>
                        </table>
                    </div>
                })}
            </div>
        </div>
    }
}
