use leptos::*;
use misai_core::VideoAdapter;

use super::media::{media_check, MediaLabels, PreviewKind};

#[component]
pub fn TestVideoPage() -> impl IntoView {
    media_check(
        VideoAdapter,
        MediaLabels {
            title: "Video Authenticity Check",
            accept: "video/*",
            submit: "Verify Video",
            pending: "Analyzing video...",
            change: "Change Video",
            findings_title: "Manipulated Segments",
            preview: PreviewKind::Video,
        },
    )
}
