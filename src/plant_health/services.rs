use std::time::Duration;

use rand::seq::SliceRandom;
use serde::Serialize;
use tracing::info;

use crate::error::{AppError, AppResult};
use crate::guard::RequestGuard;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Warning,
    Danger,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HealthReport {
    pub status: HealthStatus,
    pub health: &'static str,
    /// percent
    pub confidence: u8,
    pub issues: &'static str,
    pub recommendations: &'static str,
}

pub const SCENARIOS: [HealthReport; 3] = [
    HealthReport {
        status: HealthStatus::Healthy,
        health: "Healthy",
        confidence: 92,
        issues: "No significant issues detected",
        recommendations: "Continue current care routine. Maintain proper watering schedule.",
    },
    HealthReport {
        status: HealthStatus::Warning,
        health: "Mild Concern",
        confidence: 78,
        issues: "Possible nutrient deficiency detected",
        recommendations: "Consider adding nitrogen-rich fertilizer. Monitor soil pH levels.",
    },
    HealthReport {
        status: HealthStatus::Danger,
        health: "Needs Attention",
        confidence: 85,
        issues: "Signs of pest damage and leaf spot disease",
        recommendations: "Apply appropriate pesticide and fungicide. Improve air circulation.",
    },
];

fn ext_from_mime(ct: &str) -> Option<&'static str> {
    match ct {
        "image/jpeg" | "image/jpg" => Some("jpg"),
        "image/png" => Some("png"),
        "image/webp" => Some("webp"),
        "image/heic" => Some("heic"),
        _ => None,
    }
}

/// Fake analysis: the image is only checked for presence and type.
pub async fn analyze(
    guard: &RequestGuard,
    image: &[u8],
    content_type: Option<&str>,
    delay: Duration,
) -> AppResult<HealthReport> {
    if image.is_empty() {
        return Err(AppError::BadRequest("Please select an image to analyze.".into()));
    }
    let ext = match content_type {
        Some(ct) => ext_from_mime(ct)
            .ok_or_else(|| AppError::BadRequest(format!("Unsupported image type: {ct}")))?,
        None => "bin",
    };
    let _pending = guard.try_begin()?;

    tokio::time::sleep(delay).await;
    let report = SCENARIOS
        .choose(&mut rand::thread_rng())
        .cloned()
        .unwrap_or_else(|| SCENARIOS[0].clone());
    info!(bytes = image.len(), ext, status = ?report.status, "plant health simulated");
    Ok(report)
}

#[cfg(test)]
mod plant_health_tests {
    use super::*;

    #[test]
    fn test_ext_from_mime() {
        assert_eq!(ext_from_mime("image/jpeg"), Some("jpg"));
        assert_eq!(ext_from_mime("image/jpg"), Some("jpg"));
        assert_eq!(ext_from_mime("image/png"), Some("png"));
        assert_eq!(ext_from_mime("image/webp"), Some("webp"));
        assert_eq!(ext_from_mime("image/heic"), Some("heic"));
        assert_eq!(ext_from_mime("application/octet-stream"), None);
    }

    #[tokio::test]
    async fn empty_image_is_rejected() {
        let guard = RequestGuard::new();
        let err = analyze(&guard, &[], None, Duration::ZERO).await.unwrap_err();
        assert_eq!(err.to_string(), "Please select an image to analyze.");
    }

    #[tokio::test]
    async fn unsupported_type_is_rejected() {
        let guard = RequestGuard::new();
        let err = analyze(&guard, b"GIF89a", Some("image/gif"), Duration::ZERO)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));
    }

    #[tokio::test]
    async fn returns_one_of_the_known_scenarios() {
        let guard = RequestGuard::new();
        let report = analyze(&guard, b"\x89PNG", Some("image/png"), Duration::ZERO)
            .await
            .expect("analyze");
        assert!(SCENARIOS.contains(&report));
    }
}
