use leptos::*;
use misai_core::ImageAdapter;

use super::media::{media_check, MediaLabels, PreviewKind};

#[component]
pub fn TestImagePage() -> impl IntoView {
    media_check(
        ImageAdapter,
        MediaLabels {
            title: "Image Authenticity Check",
            accept: "image/*",
            submit: "Verify Image",
            pending: "Analyzing image...",
            change: "Change Image",
            findings_title: "Manipulated Regions",
            preview: PreviewKind::Image,
        },
    )
}
