//! Per-frame dispatch
//!
//! Wires the detector state machine to the audio controller, event log, and
//! overlay renderer. Owns dispatch and label formatting only; every temporal
//! decision lives in the detector and the alert controller.

use crate::config::MonitorConfig;
use crate::render::{Label, OverlayRenderer};
use crate::source::{FrameObservation, FrameSource};
use crate::MonitorError;
use alerting::{AlertController, AudioSink};
use detector::{Detector, GuardState};
use event_log::{EventKind, EventLogger};
use eye_metrics::{average_ear, EyePair};
use std::time::Instant;
use tracing::{info, warn};

/// Frame orchestrator: one instance per run, driven frame by frame by a
/// single thread.
pub struct FrameMonitor {
    guard_mode: bool,
    detector: Detector,
    audio: AlertController,
    events: EventLogger,
    frames: u64,
}

impl FrameMonitor {
    pub fn new(config: &MonitorConfig, sink: Box<dyn AudioSink>, now: Instant) -> Self {
        let events = match &config.log_path {
            Some(path) => EventLogger::new(path),
            None => EventLogger::disabled(),
        };
        Self {
            guard_mode: config.guard_mode,
            detector: Detector::new(config.detector.clone(), now),
            audio: AlertController::new(config.audio.clone(), sink),
            events,
            frames: 0,
        }
    }

    /// Process one observation frame.
    pub fn process(
        &mut self,
        observation: &FrameObservation,
        now: Instant,
        renderer: &mut dyn OverlayRenderer,
    ) {
        self.frames += 1;
        match &observation.eyes {
            Some(eyes) => self.process_face(eyes, now, renderer),
            None => self.process_absence(now, renderer),
        }
    }

    fn process_face(&mut self, eyes: &EyePair, now: Instant, renderer: &mut dyn OverlayRenderer) {
        if self.detector.mark_presence(now) {
            self.events.record(EventKind::AlertCleared);
            info!("absence alert cleared: face re-detected");
        }

        // Degenerate landmarks: presence counts, openness is unusable
        let Some(ear) = average_ear(eyes) else {
            warn!("degenerate eye contour, skipping fatigue update");
            return;
        };

        let assessment = self.detector.score_fatigue(ear);
        self.audio.update(assessment.alert, false, now);
        if assessment.alert {
            self.events.record(EventKind::FatigueAlert);
            renderer.draw_label(&Label::new("Fatigue ALERT!", 10, 50, true));
        }
        renderer.draw_label(&Label::new(
            format!("EAR (Eye Aspect Ratio): {:.2}", assessment.ear),
            10,
            100,
            false,
        ));
        renderer.draw_label(&Label::new(
            format!("Fatigue score: {:.0}", assessment.score),
            10,
            140,
            false,
        ));
    }

    fn process_absence(&mut self, now: Instant, renderer: &mut dyn OverlayRenderer) {
        if !self.guard_mode {
            // A fatigue alert must not latch across a disappearance
            self.audio.update(false, false, now);
            return;
        }

        let assessment = self.detector.observe_absence(now);
        if assessment.alerting() {
            let escalated = assessment.state == GuardState::Escalated;
            self.audio.update(true, escalated, now);
            self.events.record(EventKind::NoFaceAlert);
            if assessment.escalated_edge {
                self.events.record(EventKind::AlertEscalated);
                warn!(
                    seconds_since_face = assessment.seconds_since_face,
                    "absence alert escalated"
                );
            }
            renderer.draw_label(&Label::new("No Face ALERT!", 10, 50, true));
        } else {
            if assessment.cleared {
                self.events.record(EventKind::AlertCleared);
                info!("absence alert cleared");
            }
            self.audio.update(false, false, now);
        }
    }

    /// Drive the loop to completion over an observation source. In-flight
    /// audio is stopped on any exit path.
    pub fn run(
        &mut self,
        source: &mut dyn FrameSource,
        renderer: &mut dyn OverlayRenderer,
    ) -> Result<(), MonitorError> {
        info!(guard_mode = self.guard_mode, "monitor loop started");
        let result = self.run_frames(source, renderer);
        self.shutdown();
        result
    }

    fn run_frames(
        &mut self,
        source: &mut dyn FrameSource,
        renderer: &mut dyn OverlayRenderer,
    ) -> Result<(), MonitorError> {
        while let Some(observation) = source.next()? {
            self.process(&observation, Instant::now(), renderer);
        }
        Ok(())
    }

    /// Stop in-flight audio and report run counters
    pub fn shutdown(&mut self) {
        self.audio.shutdown();
        info!(
            frames = self.frames,
            dropped_log_rows = self.events.dropped(),
            "monitor loop finished"
        );
    }

    /// Frames processed so far
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Current detector state (overlay/diagnostics)
    pub fn detector(&self) -> &Detector {
        &self.detector
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alerting::Tone;
    use eye_metrics::Point;
    use std::cell::RefCell;
    use std::fs;
    use std::path::PathBuf;
    use std::rc::Rc;
    use std::time::Duration;

    const OPEN: f32 = 12.0;
    const CLOSED: f32 = 1.5;

    fn contour(lid_gap: f32) -> [Point; 6] {
        [
            Point::new(0.0, 0.0),
            Point::new(9.0, -lid_gap / 2.0),
            Point::new(21.0, -lid_gap / 2.0),
            Point::new(30.0, 0.0),
            Point::new(21.0, lid_gap / 2.0),
            Point::new(9.0, lid_gap / 2.0),
        ]
    }

    fn face(lid_gap: f32) -> FrameObservation {
        FrameObservation::face(EyePair {
            left: contour(lid_gap),
            right: contour(lid_gap),
        })
    }

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Call {
        Play(Tone),
        Stop,
    }

    #[derive(Default)]
    struct RecordingSink {
        calls: Rc<RefCell<Vec<Call>>>,
    }

    impl AudioSink for RecordingSink {
        fn play(&mut self, tone: Tone) {
            self.calls.borrow_mut().push(Call::Play(tone));
        }
        fn stop(&mut self) {
            self.calls.borrow_mut().push(Call::Stop);
        }
    }

    #[derive(Default)]
    struct RecordingRenderer {
        labels: Vec<Label>,
    }

    impl OverlayRenderer for RecordingRenderer {
        fn draw_label(&mut self, label: &Label) {
            self.labels.push(label.clone());
        }
    }

    struct Harness {
        monitor: FrameMonitor,
        renderer: RecordingRenderer,
        calls: Rc<RefCell<Vec<Call>>>,
        log_path: PathBuf,
        _dir: tempfile::TempDir,
        t0: Instant,
    }

    impl Harness {
        fn new(guard_mode: bool) -> Self {
            let dir = tempfile::tempdir().unwrap();
            let log_path = dir.path().join("events.csv");
            let sink = RecordingSink::default();
            let calls = sink.calls.clone();
            let config = MonitorConfig {
                guard_mode,
                log_path: Some(log_path.clone()),
                ..Default::default()
            };
            let t0 = Instant::now();
            Self {
                monitor: FrameMonitor::new(&config, Box::new(sink), t0),
                renderer: RecordingRenderer::default(),
                calls,
                log_path,
                _dir: dir,
                t0,
            }
        }

        fn frame(&mut self, observation: FrameObservation, seconds: f64) {
            let now = self.t0 + Duration::from_secs_f64(seconds);
            self.monitor.process(&observation, now, &mut self.renderer);
        }

        fn events(&self) -> Vec<String> {
            let Ok(contents) = fs::read_to_string(&self.log_path) else {
                return Vec::new();
            };
            contents
                .lines()
                .skip(1)
                .map(|row| row.split(',').nth(1).unwrap().to_string())
                .collect()
        }

        fn count(&self, event: &str) -> usize {
            self.events().iter().filter(|e| *e == event).count()
        }
    }

    #[test]
    fn test_open_eyes_stay_quiet() {
        let mut h = Harness::new(false);

        for i in 0..50 {
            h.frame(face(OPEN), i as f64 * 0.033);
        }

        assert!(h.calls.borrow().is_empty());
        assert!(h.events().is_empty());
        assert!(h.renderer.labels.iter().all(|l| !l.alert));
    }

    #[test]
    fn test_sustained_closure_alerts_and_logs_per_frame() {
        let mut h = Harness::new(false);

        for i in 0..30 {
            h.frame(face(CLOSED), i as f64 * 0.033);
        }

        // Debounce is 20 frames; frames 20..=30 all alert and all log
        assert_eq!(h.count("FATIGUE_ALERT"), 11);
        assert!(h
            .renderer
            .labels
            .iter()
            .any(|l| l.text == "Fatigue ALERT!" && l.alert));
        assert!(h
            .calls
            .borrow()
            .contains(&Call::Play(Tone::Normal)));
    }

    #[test]
    fn test_recovery_stops_audio_once() {
        let mut h = Harness::new(false);

        for i in 0..25 {
            h.frame(face(CLOSED), i as f64 * 0.033);
        }
        // Eyes open: score decays below threshold immediately via the
        // debounce path reset, audio gets exactly one stop
        for i in 25..30 {
            h.frame(face(OPEN), i as f64 * 0.033);
        }

        let stops = h
            .calls
            .borrow()
            .iter()
            .filter(|c| **c == Call::Stop)
            .count();
        assert_eq!(stops, 1);
    }

    #[test]
    fn test_overlay_text_formatting() {
        let mut h = Harness::new(false);
        h.frame(face(OPEN), 0.0);

        let texts: Vec<&str> = h.renderer.labels.iter().map(|l| l.text.as_str()).collect();
        assert_eq!(
            texts,
            vec!["EAR (Eye Aspect Ratio): 0.40", "Fatigue score: 0"]
        );
        assert_eq!(h.renderer.labels[0].x, 10);
        assert_eq!(h.renderer.labels[0].y, 100);
    }

    #[test]
    fn test_guard_episode_full_lifecycle() {
        let mut h = Harness::new(true);

        // Presence, then absence short of the timeout
        h.frame(face(OPEN), 0.0);
        h.frame(FrameObservation::absent(), 9.9);
        assert_eq!(h.count("NO_FACE_ALERT"), 0);

        // Alert begins at the timeout, logs every qualifying frame
        h.frame(FrameObservation::absent(), 10.0);
        h.frame(FrameObservation::absent(), 10.5);
        h.frame(FrameObservation::absent(), 11.0);
        assert_eq!(h.count("NO_FACE_ALERT"), 3);
        assert!(h
            .renderer
            .labels
            .iter()
            .any(|l| l.text == "No Face ALERT!" && l.alert));

        // Escalation edge exactly once at timeout + escalation window
        h.frame(FrameObservation::absent(), 70.0);
        h.frame(FrameObservation::absent(), 70.5);
        h.frame(FrameObservation::absent(), 71.0);
        assert_eq!(h.count("ALERT_ESCALATED"), 1);
        assert!(h.calls.borrow().contains(&Call::Play(Tone::Escalation)));

        // Face returns: one ALERT_CLEARED for the episode
        h.frame(face(OPEN), 72.0);
        h.frame(face(OPEN), 72.1);
        assert_eq!(h.count("ALERT_CLEARED"), 1);
    }

    #[test]
    fn test_guard_mode_off_ignores_absence() {
        let mut h = Harness::new(false);

        h.frame(face(OPEN), 0.0);
        for i in 0..20 {
            h.frame(FrameObservation::absent(), 15.0 + i as f64);
        }

        assert!(h.events().is_empty());
        assert!(h.calls.borrow().is_empty());
    }

    #[test]
    fn test_absence_releases_latched_fatigue_alert() {
        let mut h = Harness::new(false);

        for i in 0..25 {
            h.frame(face(CLOSED), i as f64 * 0.033);
        }
        assert!(h.monitor.detector().state().closed_eye_frames >= 20);

        h.frame(FrameObservation::absent(), 2.0);
        assert_eq!(
            h.calls.borrow().last(),
            Some(&Call::Stop)
        );
    }

    #[test]
    fn test_degenerate_landmarks_refresh_presence_only() {
        let mut h = Harness::new(true);

        let mut eyes = EyePair {
            left: contour(OPEN),
            right: contour(OPEN),
        };
        eyes.right[3] = eyes.right[0];

        // Guard alert in progress; the degenerate face frame still clears it
        h.frame(FrameObservation::absent(), 12.0);
        assert_eq!(h.count("NO_FACE_ALERT"), 1);
        h.frame(FrameObservation::face(eyes), 13.0);
        assert_eq!(h.count("ALERT_CLEARED"), 1);

        // But no fatigue update happened and no fatigue labels were drawn
        assert_eq!(h.monitor.detector().state().fatigue_score, 0.0);
        assert!(h
            .renderer
            .labels
            .iter()
            .all(|l| !l.text.starts_with("Fatigue")));
    }

    #[test]
    fn test_escalated_guard_clears_on_scripted_run() {
        let mut h = Harness::new(true);

        h.frame(face(OPEN), 0.0);
        h.frame(FrameObservation::absent(), 75.0);
        assert_eq!(h.count("ALERT_ESCALATED"), 1);

        h.frame(face(OPEN), 76.0);
        assert_eq!(h.count("ALERT_CLEARED"), 1);

        // A fresh episode escalates again
        h.frame(FrameObservation::absent(), 150.0);
        assert_eq!(h.count("ALERT_ESCALATED"), 2);
    }
}
