use crate::core::backend::{ImageUpload, ProcessingBackend};
use crate::core::image::ProcessedImage;
use crate::core::processor::UploadInProgress;
use crate::core::state::ProcessorStatus;
use crate::server::render::render_page;
use crate::server::types::{AppState, ClearResponse, UploadResponse};
use crate::utils::constants::UPLOAD_FIELD_NAME;
use anyhow::Error;
use axum::{
    Json,
    extract::{Multipart, State},
    http::StatusCode,
    response::{Html, IntoResponse},
};
use serde_json::{Value, json};
use std::sync::Arc;

// server status handler
pub async fn server_status_handler() -> Json<Value> {
    Json(json!({"status": "running"}))
}

pub async fn index_handler<B: ProcessingBackend>(
    State(state): State<Arc<AppState<B>>>,
) -> Html<String> {
    let (status, images) = state.processor.snapshot().await;
    Html(render_page(&status, &images))
}

pub async fn processor_status_handler<B: ProcessingBackend>(
    State(state): State<Arc<AppState<B>>>,
) -> Json<ProcessorStatus> {
    Json(state.processor.status().await)
}

pub async fn list_images_handler<B: ProcessingBackend>(
    State(state): State<Arc<AppState<B>>>,
) -> Json<Vec<ProcessedImage>> {
    Json(state.processor.images().await)
}

pub async fn clear_images_handler<B: ProcessingBackend>(
    State(state): State<Arc<AppState<B>>>,
) -> Json<ClearResponse> {
    let removed = state.processor.clear().await;
    Json(ClearResponse { removed })
}

pub async fn upload_handler<B: ProcessingBackend>(
    State(state): State<Arc<AppState<B>>>,
    multipart: Multipart,
) -> impl IntoResponse {
    let upload = match read_upload(multipart).await {
        Ok(Some(upload)) => upload,
        Ok(None) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(UploadResponse::failed("No image provided")),
            );
        }
        Err(e) => {
            tracing::warn!("unreadable upload body: {:?}", e);
            return (
                StatusCode::BAD_REQUEST,
                Json(UploadResponse::failed(format!("Invalid upload: {}", e))),
            );
        }
    };

    // detached so a dropped connection cannot strand the processor in `loading`
    let processor = state.processor.clone();
    let outcome = tokio::spawn(async move { processor.upload(upload).await }).await;

    match outcome {
        Ok(Ok(image)) => (
            StatusCode::OK,
            Json(UploadResponse {
                success: true,
                message: format!("Upload successful. Identifier: {}", image.id),
                image: Some(image),
            }),
        ),
        Ok(Err(e)) if e.is::<UploadInProgress>() => (
            StatusCode::CONFLICT,
            Json(UploadResponse::failed(e.to_string())),
        ),
        Ok(Err(e)) => (
            StatusCode::BAD_GATEWAY,
            Json(UploadResponse::failed(format!("Upload failed: {}", e))),
        ),
        Err(e) => {
            tracing::error!("upload task aborted: {:?}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(UploadResponse::failed("Upload failed: internal error")),
            )
        }
    }
}

/// Pulls the `file` field out of the form. An absent field, or the empty
/// part a browser sends when nothing was picked, yields `None`.
async fn read_upload(mut multipart: Multipart) -> Result<Option<ImageUpload>, Error> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(UPLOAD_FIELD_NAME) {
            continue;
        }

        let file_name = field.file_name().unwrap_or_default().to_string();
        let content_type = field.content_type().map(String::from);
        let data = field.bytes().await?;

        if data.is_empty() && file_name.is_empty() {
            return Ok(None);
        }

        tracing::info!(
            "received {:?} ({} bytes, {:?})",
            file_name,
            data.len(),
            content_type
        );
        let file_name = if file_name.is_empty() {
            "upload".to_string()
        } else {
            file_name
        };

        return Ok(Some(ImageUpload {
            file_name,
            content_type,
            data,
        }));
    }

    Ok(None)
}

#[cfg(test)]
mod handlers_tests {
    use crate::core::backend::ProcessingBackend;
    use crate::core::image::ProcessedImage;
    use crate::core::processor::ImageProcessor;
    use crate::core::state::ProcessorStatus;
    use crate::core::testing::{FailingBackend, StaticBackend, sample_upload};
    use crate::server::router;
    use crate::server::types::{AppState, ClearResponse, UploadResponse};
    use axum::Router;
    use axum::body::{Body, to_bytes};
    use axum::http::{Request, StatusCode, header};
    use serde::de::DeserializeOwned;
    use std::sync::Arc;
    use std::time::Duration;
    use tower::ServiceExt;

    const BASE: &str = "http://15.207.111.49:8080";
    const BOUNDARY: &str = "recoveryviewerboundary";

    fn app<B: ProcessingBackend>(backend: B) -> (Router, Arc<AppState<B>>) {
        let state = Arc::new(AppState::new(ImageProcessor::new(backend, BASE)));
        (router(state.clone()), state)
    }

    fn multipart_request(field: &str, file_name: &str, data: &str) -> Request<Body> {
        let body = format!(
            "--{b}\r\nContent-Disposition: form-data; name=\"{field}\"; filename=\"{file_name}\"\r\n\
             Content-Type: image/png\r\n\r\n{data}\r\n--{b}--\r\n",
            b = BOUNDARY
        );
        Request::builder()
            .method("POST")
            .uri("/upload")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={}", BOUNDARY),
            )
            .body(Body::from(body))
            .unwrap()
    }

    async fn read_json<T: DeserializeOwned>(response: axum::response::Response) -> T {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    #[tokio::test]
    async fn upload_returns_record_with_derived_urls() {
        let (router, state) = app(StaticBackend::new("abc"));

        let response = router
            .oneshot(multipart_request("file", "cat.png", "PNGDATA"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body: UploadResponse = read_json(response).await;
        assert!(body.success);
        let image = body.image.unwrap();
        assert_eq!(image.id, "abc-1");
        assert_eq!(
            image.urls.corrupted,
            format!("{}/images/corrupted_image-abc-1.png", BASE)
        );
        assert_eq!(state.processor.images().await, vec![image]);
    }

    #[tokio::test]
    async fn upload_without_file_is_rejected() {
        let (router, state) = app(StaticBackend::new("abc"));

        let response = router
            .clone()
            .oneshot(multipart_request("other", "cat.png", "PNGDATA"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = router
            .oneshot(multipart_request("file", "", ""))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body: UploadResponse = read_json(response).await;
        assert_eq!(body.message, "No image provided");

        assert_eq!(state.processor.backend().calls(), 0);
        assert!(!state.processor.status().await.loading);
    }

    #[tokio::test]
    async fn backend_failure_maps_to_bad_gateway() {
        let (router, state) = app(FailingBackend);

        let response = router
            .oneshot(multipart_request("file", "cat.png", "PNGDATA"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);

        let body: UploadResponse = read_json(response).await;
        assert!(!body.success);
        assert!(body.image.is_none());

        let status = state.processor.status().await;
        assert!(!status.loading);
        assert_eq!(status.progress, 0);
        assert!(state.processor.images().await.is_empty());
    }

    #[tokio::test]
    async fn second_upload_while_loading_conflicts() {
        let (router, state) = app(StaticBackend::new("abc"));
        // first upload has completed but not yet settled
        state.processor.upload(sample_upload()).await.unwrap();

        let response = router
            .oneshot(multipart_request("file", "cat.png", "PNGDATA"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CONFLICT);
        assert_eq!(state.processor.images().await.len(), 1);
    }

    #[tokio::test]
    async fn status_list_and_clear() {
        let (router, state) = app(StaticBackend::new("abc"));
        state.processor.upload(sample_upload()).await.unwrap();

        let response = router.clone().oneshot(get("/status")).await.unwrap();
        let status: ProcessorStatus = read_json(response).await;
        assert_eq!(status.image_count, 1);
        assert!(status.progress <= 100);

        let response = router.clone().oneshot(get("/images")).await.unwrap();
        let images: Vec<ProcessedImage> = read_json(response).await;
        assert_eq!(images[0].id, "abc-1");

        let request = Request::builder()
            .method("DELETE")
            .uri("/images")
            .body(Body::empty())
            .unwrap();
        let response = router.oneshot(request).await.unwrap();
        let cleared: ClearResponse = read_json(response).await;
        assert_eq!(cleared.removed, 1);
        assert!(state.processor.images().await.is_empty());
    }

    async fn page(router: Router) -> String {
        let response = router.oneshot(get("/")).await.unwrap();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test(start_paused = true)]
    async fn page_returns_to_idle_after_settle() {
        let (router, _state) = app(StaticBackend::new("abc"));

        let response = router
            .clone()
            .oneshot(multipart_request("file", "cat.png", "PNGDATA"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        // served between the upload answer and the settle: it polls for itself
        let html = page(router.clone()).await;
        assert!(html.contains("data-loading=\"true\""));
        assert!(html.contains("<div id=\"upload-busy\">"));

        tokio::time::sleep(Duration::from_millis(600)).await;

        let html = page(router).await;
        assert!(html.contains("data-loading=\"false\""));
        assert!(html.contains("<div id=\"upload-idle\">"));
        assert!(html.contains("<input id=\"upload\" type=\"file\" accept=\"image/*\" hidden>"));
        assert!(html.contains("grayscale-abc-1.jpg"));
    }

    #[tokio::test]
    async fn index_renders_page() {
        let (router, state) = app(StaticBackend::new("abc"));
        state.processor.upload(sample_upload()).await.unwrap();

        let response = router.clone().oneshot(get("/")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let html = String::from_utf8(bytes.to_vec()).unwrap();
        assert!(html.contains("grayscale-abc-1.jpg"));

        let response = router.oneshot(get("/health")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }
}
