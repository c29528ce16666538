use axum::Json;

pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "hookfeed",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

pub async fn service_info() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "service": "Repository Webhook Feed",
        "endpoints": {
            "receiver": "/webhook/receiver",
            "page": "/webhook/",
            "events": "/webhook/events",
            "debug": "/webhook/debug/events",
            "health": "/health",
            "info": "/"
        },
        "supported_events": [
            "push",
            "pull_request"
        ]
    }))
}
