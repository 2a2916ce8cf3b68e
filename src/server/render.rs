//! Server-side HTML for the upload page.
//!
//! The result images are not proxied: each `<img>` points straight at the
//! processing backend, so the browser's own image loader fetches them.

use crate::core::image::{ImageVariant, ProcessedImage};
use crate::core::state::ProcessorStatus;
use chrono::Local;
use maud::{DOCTYPE, Markup, PreEscaped, html};

const STYLE: &str = r#"
body { font-family: system-ui, sans-serif; margin: 0; background: #fafafa; color: #111; }
.container { max-width: 72rem; margin: 0 auto; padding: 1.5rem; }
.card { background: #fff; border: 1px solid #e5e7eb; border-radius: 0.5rem; margin-bottom: 2rem; }
.upload-card { border: 2px dashed #e5e7eb; padding: 1.5rem; }
.upload-button { display: flex; flex-direction: column; align-items: center; gap: 1rem; height: 10rem; justify-content: center; cursor: pointer; }
.upload-button.disabled { cursor: wait; opacity: 0.8; }
.muted { color: #6b7280; font-size: 0.875rem; }
.group-header { padding: 1rem 1.5rem 0; }
.group-images { display: grid; grid-template-columns: 1fr auto 1fr auto 1fr; gap: 1rem; align-items: center; padding: 1.5rem; }
.separator { font-size: 1.5rem; color: #6b7280; }
.image-card h3 { text-align: center; font-weight: 500; }
.image-frame { border: 1px solid #e5e7eb; border-radius: 0.5rem; overflow: hidden; }
.image-frame img { width: 100%; height: 12rem; object-fit: cover; display: block; }
progress { width: 100%; max-width: 20rem; }
"#;

// The page only reloads once `/status` reports the attempt settled, so the
// idle card is what comes back. A page served mid-upload keeps watching too.
const SCRIPT: &str = r#"
const input = document.getElementById('upload');
const bar = document.getElementById('upload-progress');
const button = document.getElementById('upload-button');

function watchStatus(canReload) {
  const poll = setInterval(async () => {
    let status;
    try {
      status = await (await fetch('/status')).json();
    } catch (e) {
      return;
    }
    bar.value = status.progress;
    if (!status.loading && canReload()) {
      clearInterval(poll);
      window.location.reload();
    }
  }, 250);
}

function showBusy() {
  document.getElementById('upload-idle').hidden = true;
  document.getElementById('upload-busy').hidden = false;
  button.classList.add('disabled');
  input.disabled = true;
}

if (document.body.dataset.loading === 'true') {
  watchStatus(() => true);
}

input.addEventListener('change', async () => {
  const file = input.files && input.files[0];
  if (!file) return;
  const body = new FormData();
  body.append('file', file);
  showBusy();
  let answered = false;
  watchStatus(() => answered);
  try {
    const response = await fetch('/upload', { method: 'POST', body });
    if (!response.ok) console.error('Upload failed:', await response.text());
  } catch (error) {
    console.error('Upload failed:', error);
  } finally {
    answered = true;
  }
});
"#;

pub fn render_page(status: &ProcessorStatus, images: &[ProcessedImage]) -> String {
    let page = html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { "Image Processor" }
                style { (PreEscaped(STYLE)) }
            }
            body data-loading=(status.loading) {
                div.container {
                    (render_upload_card(status))
                    div.groups {
                        @for image in images {
                            (render_image_group(image))
                        }
                    }
                }
                script { (PreEscaped(SCRIPT)) }
            }
        }
    };
    page.into_string()
}

/// Both the idle prompt and the busy bar are always present; only one is
/// visible, so the upload script can switch without a round trip.
pub fn render_upload_card(status: &ProcessorStatus) -> Markup {
    html! {
        div.card.upload-card {
            input #upload type="file" accept="image/*" hidden disabled[status.loading];
            label #upload-button .upload-button .disabled[status.loading] for="upload" {
                div #upload-idle hidden[status.loading] {
                    span aria-hidden="true" { "⇧" }
                    p { "Drop your image here or click to browse" }
                    p.muted { "Supports: JPG, PNG up to 10MB" }
                }
                div #upload-busy hidden[!status.loading] {
                    span.spinner aria-hidden="true" { "↻" }
                    progress #upload-progress max="100" value=(status.progress) {}
                    span.muted { "Processing image..." }
                }
            }
        }
    }
}

pub fn render_image_group(image: &ProcessedImage) -> Markup {
    let captured = image
        .timestamp
        .with_timezone(&Local)
        .format("%Y-%m-%d %H:%M:%S")
        .to_string();

    html! {
        div.card.image-group data-id=(image.id) {
            div.group-header {
                h2.muted { "Processed " (captured) }
            }
            div.group-images {
                @for (i, variant) in ImageVariant::ALL.iter().enumerate() {
                    @if i > 0 {
                        span.separator aria-hidden="true" { "→" }
                    }
                    (render_image_card(variant.title(), image.urls.get(*variant)))
                }
            }
        }
    }
}

// The hint is rendered unconditionally; it is not an error fallback.
pub fn render_image_card(title: &str, src: &str) -> Markup {
    html! {
        div.image-card {
            h3 { (title) }
            div.image-frame {
                img src=(src) alt=(title) loading="lazy";
                div.image-hint { "Go here if does not render " (src) }
            }
        }
    }
}
