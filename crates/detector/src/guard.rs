//! Guard presence monitoring
//!
//! Timeout/escalation state machine keyed on wall-clock time since the last
//! detected face: QUIET → ALERTING → ESCALATED, reversed whenever presence
//! returns. Escalation is edge-triggered; the alerting level itself holds
//! frame after frame.

use crate::assessment::GuardAssessment;
use crate::config::DetectorConfig;
use crate::state::{GuardState, MonitorState};
use std::time::Instant;
use tracing::debug;

/// Record a detected face. Refreshes `last_face_seen` and ends any absence
/// alert episode; returns true exactly once per episode.
pub fn on_presence(state: &mut MonitorState, now: Instant) -> bool {
    state.last_face_seen = now;
    let cleared = state.guard.is_alerting();
    if cleared {
        debug!("absence alert cleared: face re-detected");
        state.guard = GuardState::Quiet;
    }
    cleared
}

/// Advance the monitor on a no-face frame.
pub fn on_absence(
    state: &mut MonitorState,
    config: &DetectorConfig,
    now: Instant,
) -> GuardAssessment {
    let seconds_since_face = now.duration_since(state.last_face_seen).as_secs_f64();

    if seconds_since_face < config.no_face_timeout_seconds {
        let cleared = state.guard.is_alerting();
        if cleared {
            debug!("absence alert cleared inside timeout window");
            state.guard = GuardState::Quiet;
        }
        return GuardAssessment {
            seconds_since_face,
            state: GuardState::Quiet,
            cleared,
            escalated_edge: false,
        };
    }

    let escalate_at = config.no_face_timeout_seconds + config.escalation_seconds;
    if seconds_since_face >= escalate_at {
        let escalated_edge = state.guard != GuardState::Escalated;
        if escalated_edge {
            debug!(seconds_since_face, "absence alert escalated");
        }
        state.guard = GuardState::Escalated;
        GuardAssessment {
            seconds_since_face,
            state: GuardState::Escalated,
            cleared: false,
            escalated_edge,
        }
    } else {
        state.guard = GuardState::Alerting;
        GuardAssessment {
            seconds_since_face,
            state: GuardState::Alerting,
            cleared: false,
            escalated_edge: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn setup() -> (MonitorState, DetectorConfig, Instant) {
        let t0 = Instant::now();
        (MonitorState::new(t0), DetectorConfig::default(), t0)
    }

    fn after(t0: Instant, seconds: f64) -> Instant {
        t0 + Duration::from_secs_f64(seconds)
    }

    #[test]
    fn test_quiet_below_timeout() {
        let (mut state, config, t0) = setup();

        let a = on_absence(&mut state, &config, after(t0, 9.9));
        assert_eq!(a.state, GuardState::Quiet);
        assert!(!a.alerting());
        assert!(!a.cleared);
    }

    #[test]
    fn test_alert_begins_at_timeout() {
        let (mut state, config, t0) = setup();

        let a = on_absence(&mut state, &config, after(t0, 10.0));
        assert_eq!(a.state, GuardState::Alerting);
        assert!(a.alerting());
        assert!(!a.escalated_edge);
    }

    #[test]
    fn test_alert_holds_every_frame() {
        let (mut state, config, t0) = setup();

        for i in 0..50 {
            let a = on_absence(&mut state, &config, after(t0, 10.0 + i as f64 * 0.033));
            assert!(a.alerting(), "frame {i} lost the alert level");
        }
    }

    #[test]
    fn test_escalation_edge_fires_exactly_once() {
        let (mut state, config, t0) = setup();

        let a = on_absence(&mut state, &config, after(t0, 69.9));
        assert_eq!(a.state, GuardState::Alerting);

        let a = on_absence(&mut state, &config, after(t0, 70.0));
        assert_eq!(a.state, GuardState::Escalated);
        assert!(a.escalated_edge);

        // Escalation holds, but the edge never re-fires
        for i in 1..100 {
            let a = on_absence(&mut state, &config, after(t0, 70.0 + i as f64 * 0.033));
            assert_eq!(a.state, GuardState::Escalated);
            assert!(!a.escalated_edge, "frame {i} re-fired the escalation edge");
        }
    }

    #[test]
    fn test_presence_clears_alert_once() {
        let (mut state, config, t0) = setup();

        on_absence(&mut state, &config, after(t0, 15.0));
        assert_eq!(state.guard, GuardState::Alerting);

        assert!(on_presence(&mut state, after(t0, 15.1)));
        assert_eq!(state.guard, GuardState::Quiet);
        assert_eq!(state.last_face_seen, after(t0, 15.1));

        // Second face frame in the same episode reports nothing
        assert!(!on_presence(&mut state, after(t0, 15.2)));
    }

    #[test]
    fn test_presence_clears_escalated_state() {
        let (mut state, config, t0) = setup();

        on_absence(&mut state, &config, after(t0, 80.0));
        assert_eq!(state.guard, GuardState::Escalated);

        assert!(on_presence(&mut state, after(t0, 80.1)));
        assert_eq!(state.guard, GuardState::Quiet);
    }

    #[test]
    fn test_new_episode_escalates_again() {
        let (mut state, config, t0) = setup();

        on_absence(&mut state, &config, after(t0, 75.0));
        on_presence(&mut state, after(t0, 76.0));

        // Fresh absence episode, measured from the new last_face_seen
        let a = on_absence(&mut state, &config, after(t0, 80.0));
        assert_eq!(a.state, GuardState::Quiet);

        let a = on_absence(&mut state, &config, after(t0, 146.0));
        assert!(a.escalated_edge);
    }

    #[test]
    fn test_quiet_frame_without_prior_alert_reports_no_clear() {
        let (mut state, config, t0) = setup();

        let a = on_absence(&mut state, &config, after(t0, 1.0));
        assert!(!a.cleared);
        let a = on_absence(&mut state, &config, after(t0, 2.0));
        assert!(!a.cleared);
    }
}
