// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

#[cfg(test)]
mod tests {
    use axum::{http::StatusCode, routing::post, Json, Router};
    use rivalwatch::domain::services::llm_service::{
        GenerationRequest, LLMService, NarrationError, TextGenerator,
    };
    use serde_json::{json, Value};
    use std::time::Duration;
    use tokio::net::TcpListener;

    async fn serve(status: StatusCode, reply: Value) -> String {
        let app = Router::new().route(
            "/chat/completions",
            post(move |Json(body): Json<Value>| {
                let reply = reply.clone();
                async move {
                    assert_eq!(body["model"], "test-model");
                    assert_eq!(body["messages"][0]["role"], "system");
                    (status, Json(reply))
                }
            }),
        );
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{}/", addr)
    }

    fn service(base_url: &str, api_key: Option<&str>) -> LLMService {
        LLMService::new(
            api_key.map(str::to_string),
            "test-model".to_string(),
            base_url.to_string(),
            Duration::from_secs(5),
        )
        .unwrap()
    }

    fn request() -> GenerationRequest {
        GenerationRequest {
            system: "You are a retail analyst.".to_string(),
            prompt: "Summarize.".to_string(),
            temperature: 0.6,
        }
    }

    #[tokio::test]
    async fn test_generate_returns_trimmed_content() {
        let base = serve(
            StatusCode::OK,
            json!({ "choices": [{ "message": { "content": "  Prices dropped.\n" } }] }),
        )
        .await;

        let text = service(&base, Some("key")).generate(&request()).await.unwrap();
        assert_eq!(text, "Prices dropped.");
    }

    #[tokio::test]
    async fn test_generate_maps_error_status() {
        let base = serve(StatusCode::TOO_MANY_REQUESTS, json!({ "error": "slow down" })).await;

        let err = service(&base, Some("key"))
            .generate(&request())
            .await
            .unwrap_err();
        match err {
            NarrationError::Api { status, body } => {
                assert_eq!(status, 429);
                assert!(body.contains("slow down"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_generate_rejects_missing_content() {
        let base = serve(StatusCode::OK, json!({ "choices": [] })).await;

        let err = service(&base, Some("key"))
            .generate(&request())
            .await
            .unwrap_err();
        assert!(matches!(err, NarrationError::MalformedResponse(_)));
    }

    #[tokio::test]
    async fn test_generate_without_api_key() {
        let svc = service("http://127.0.0.1:9", Some("   "));
        let err = svc.generate(&request()).await.unwrap_err();
        assert!(matches!(err, NarrationError::MissingApiKey));
        assert_eq!(svc.model(), "test-model");
    }
}
