//! Recognizer degradation tracking: component, failure mode, fallback used,
//! timestamp, recovery status.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use comply_core::tracing_setup::events;

/// One switch to a fallback.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DegradationEvent {
    pub component: String,
    pub failure: String,
    pub fallback_used: String,
    /// Document being processed when the failure was observed.
    pub filepath: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecoveryStatus {
    /// Still in degraded mode.
    Active,
    /// Recovered to normal operation.
    Recovered,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackedDegradation {
    pub event: DegradationEvent,
    pub recovery_status: RecoveryStatus,
    pub recovered_at: Option<DateTime<Utc>>,
}

/// Degradations seen over the lifetime of a pipeline.
#[derive(Debug, Clone, Default)]
pub struct DegradationTracker {
    events: Vec<TrackedDegradation>,
}

impl DegradationTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a degradation. `confidence_cap` is only logged.
    pub fn record(&mut self, event: DegradationEvent, confidence_cap: f64) {
        events::recognizer_degraded(&event.component, &event.failure, confidence_cap);
        self.events.push(TrackedDegradation {
            event,
            recovery_status: RecoveryStatus::Active,
            recovered_at: None,
        });
    }

    /// Mark every active degradation of `component` as recovered. Returns
    /// true if anything changed.
    pub fn mark_recovered(&mut self, component: &str) -> bool {
        let now = Utc::now();
        let mut changed = false;
        for tracked in self.events.iter_mut() {
            if tracked.event.component == component
                && tracked.recovery_status == RecoveryStatus::Active
            {
                tracked.recovery_status = RecoveryStatus::Recovered;
                tracked.recovered_at = Some(now);
                changed = true;
            }
        }
        if changed {
            tracing::info!(component = %component, "component recovered");
        }
        changed
    }

    pub fn events(&self) -> &[TrackedDegradation] {
        &self.events
    }

    pub fn active_degradations(&self) -> Vec<&TrackedDegradation> {
        self.events
            .iter()
            .filter(|t| t.recovery_status == RecoveryStatus::Active)
            .collect()
    }

    pub fn is_degraded(&self, component: &str) -> bool {
        self.events
            .iter()
            .any(|t| t.event.component == component && t.recovery_status == RecoveryStatus::Active)
    }

    /// Duration a component has been continuously degraded, or None if not degraded.
    pub fn degraded_duration(&self, component: &str) -> Option<chrono::Duration> {
        let earliest = self
            .events
            .iter()
            .filter(|t| {
                t.event.component == component && t.recovery_status == RecoveryStatus::Active
            })
            .map(|t| t.event.timestamp)
            .min()?;
        Some(Utc::now() - earliest)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(component: &str) -> DegradationEvent {
        DegradationEvent {
            component: component.to_string(),
            failure: "model not loaded".to_string(),
            fallback_used: "tier1_only".to_string(),
            filepath: "cv.pdf".to_string(),
            timestamp: Utc::now(),
        }
    }

    #[test]
    fn record_then_recover() {
        let mut tracker = DegradationTracker::new();
        tracker.record(event("recognizer"), 0.5);
        tracker.record(event("recognizer"), 0.5);
        assert!(tracker.is_degraded("recognizer"));
        assert_eq!(tracker.active_degradations().len(), 2);
        assert!(tracker.degraded_duration("recognizer").is_some());

        assert!(tracker.mark_recovered("recognizer"));
        assert!(!tracker.is_degraded("recognizer"));
        assert!(tracker.degraded_duration("recognizer").is_none());
        assert_eq!(tracker.events().len(), 2);
        assert!(tracker.events().iter().all(|t| t.recovered_at.is_some()));
    }

    #[test]
    fn recovering_unknown_component_is_noop() {
        let mut tracker = DegradationTracker::new();
        tracker.record(event("recognizer"), 0.5);
        assert!(!tracker.mark_recovered("analyzer"));
        assert!(tracker.is_degraded("recognizer"));
    }
}
