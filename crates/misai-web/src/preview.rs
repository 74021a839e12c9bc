//! Object URLs for selected files

use misai_core::model::MediaUpload;
use misai_core::preview::PreviewResource;
use wasm_bindgen_futures::JsFuture;

/// `blob:` URL created for a selected file
#[derive(Debug)]
pub struct BlobUrl {
    url: String,
}

impl BlobUrl {
    pub fn create(file: &web_sys::File) -> Option<Self> {
        web_sys::Url::create_object_url_with_blob(file)
            .ok()
            .map(|url| Self { url })
    }
}

impl PreviewResource for BlobUrl {
    fn url(&self) -> &str {
        &self.url
    }

    fn release(self) {
        if web_sys::Url::revoke_object_url(&self.url).is_err() {
            tracing::warn!("Failed to revoke preview URL {}", self.url);
        }
    }
}

/// Read a selected file into memory
pub async fn read_file(file: &web_sys::File) -> Result<MediaUpload, String> {
    let buffer = JsFuture::from(file.array_buffer())
        .await
        .map_err(|e| format!("could not read {}: {:?}", file.name(), e))?;
    let data = js_sys::Uint8Array::new(&buffer).to_vec();
    let content_type = Some(file.type_()).filter(|t| !t.is_empty());

    Ok(MediaUpload::new(file.name(), content_type, data))
}
