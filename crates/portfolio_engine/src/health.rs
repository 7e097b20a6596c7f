use engine_logging::{engine_info, engine_warn};
use portfolio_core::Msg;

use crate::ChatBackend;

/// Startup probe: ask the backend which context sections it answers from.
///
/// Never fails; a failed probe becomes [`Msg::HealthFailed`] carrying the reason.
pub async fn probe(backend: &dyn ChatBackend) -> Msg {
    match backend.health().await {
        Ok(report) => {
            engine_info!(
                "backend healthy: ok={} model={:?} sections={} rag={:?}",
                report.ok,
                report.model,
                report.sections.len(),
                report.rag
            );
            Msg::HealthLoaded {
                sections: report.sections,
            }
        }
        Err(err) => {
            engine_warn!("health probe failed: {}", err);
            Msg::HealthFailed {
                reason: err.to_string(),
            }
        }
    }
}
