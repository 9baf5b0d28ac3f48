use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use tower::ServiceExt;

use symtriage::{
    router, AppState, ArtifactFile, ClassifierArtifact, ModelSlot, PredictorBuilder, ScalerParams,
};

fn names(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn fixed_output_artifact(tag: ModelSlot, classes: &[&str], probs: &[f32]) -> ClassifierArtifact {
    ClassifierArtifact::from_file(ArtifactFile {
        tag,
        features: names(&["fever", "cough"]),
        classes: names(classes),
        scaler: ScalerParams {
            mean: vec![0.0, 0.0],
            scale: vec![1.0, 1.0],
        },
        coefficients: vec![vec![0.0, 0.0]; classes.len()],
        intercepts: probs.iter().map(|p| p.ln()).collect(),
    })
    .unwrap()
}

fn test_app() -> axum::Router {
    let predictor = PredictorBuilder::new()
        .with_artifact(fixed_output_artifact(
            ModelSlot::Acute,
            &["flu", "cold", "dengue"],
            &[0.6, 0.2, 0.2],
        ))
        .unwrap()
        .with_artifact(fixed_output_artifact(
            ModelSlot::Chronic,
            &["asthma", "hypothyroidism"],
            &[0.05, 0.95],
        ))
        .unwrap()
        .with_confidence_floor(0.01)
        .unwrap()
        .build();

    router(AppState {
        predictor: Arc::new(predictor),
    })
}

fn predict_request(body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/predict")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn predict_returns_ranked_conditions() {
    let response = test_app()
        .oneshot(predict_request(
            r#"{"symptoms": {"fever": 3, "cough": 2}, "type": "not_sure"}"#,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;

    let predictions = json["predictions"].as_array().unwrap();
    assert_eq!(predictions.len(), 5);
    assert_eq!(predictions[0]["condition"], "hypothyroidism");
    assert_eq!(predictions[0]["model"], "chronic");
    assert_eq!(predictions[1]["condition"], "flu");
    assert_eq!(predictions[1]["model"], "acute");
    assert_eq!(json["message"], "");
}

#[tokio::test]
async fn predict_rejects_out_of_range_severity() {
    let response = test_app()
        .oneshot(predict_request(
            r#"{"symptoms": {"fever": 9}, "type": "acute"}"#,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert!(json["error"].as_str().unwrap().contains("fever"));
}

#[tokio::test]
async fn predict_rejects_empty_symptoms() {
    let response = test_app()
        .oneshot(predict_request(r#"{"symptoms": {}, "type": "acute"}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert!(json["error"].as_str().unwrap().contains("empty"));
}

#[tokio::test]
async fn predict_rejects_unknown_mode() {
    let response = test_app()
        .oneshot(predict_request(
            r#"{"symptoms": {"fever": 2}, "type": "urgent"}"#,
        ))
        .await
        .unwrap();

    assert!(response.status().is_client_error());
}

#[tokio::test]
async fn predict_without_any_model_is_service_unavailable() {
    let app = router(AppState {
        predictor: Arc::new(PredictorBuilder::new().build()),
    });

    let response = app
        .oneshot(predict_request(
            r#"{"symptoms": {"fever": 2}, "type": "acute"}"#,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn health_reflects_loaded_slots() {
    let response = test_app()
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["ok"], true);
    assert_eq!(json["acute"], true);
    assert_eq!(json["chronic"], true);
}

#[tokio::test]
async fn health_reports_not_ready_when_empty() {
    let app = router(AppState {
        predictor: Arc::new(PredictorBuilder::new().build()),
    });

    let response = app
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    let json = body_json(response).await;
    assert_eq!(json["ok"], false);
    assert_eq!(json["acute"], false);
    assert_eq!(json["chronic"], false);
}

#[tokio::test]
async fn degraded_service_still_answers_for_the_loaded_slot() {
    let app = router(AppState {
        predictor: Arc::new(
            PredictorBuilder::new()
                .with_artifact(fixed_output_artifact(
                    ModelSlot::Chronic,
                    &["asthma", "copd"],
                    &[0.6, 0.4],
                ))
                .unwrap()
                .with_confidence_floor(0.01)
                .unwrap()
                .build(),
        ),
    });

    // acute requested, only chronic loaded: empty but well-formed response
    let response = app
        .clone()
        .oneshot(predict_request(
            r#"{"symptoms": {"fever": 2}, "type": "acute"}"#,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["predictions"].as_array().unwrap().len(), 0);
    assert!(json["message"].as_str().unwrap().contains("do not match"));

    let response = app
        .oneshot(predict_request(
            r#"{"symptoms": {"fever": 2}, "type": "not_sure"}"#,
        ))
        .await
        .unwrap();
    let json = body_json(response).await;
    assert_eq!(json["predictions"].as_array().unwrap().len(), 2);
}
