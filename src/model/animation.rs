//! Keyframe curves for the character face and wing animations.
//!
//! Tracks are sampled on the CPU and the host applies the value to whatever
//! property the track names (the presets all drive `scaling.y`).

/// Frame rate used by the built-in presets
pub const DEFAULT_FRAME_RATE: f32 = 30.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Keyframe {
    pub frame: f32,
    pub value: f32,
}

impl Keyframe {
    pub const fn new(frame: f32, value: f32) -> Self {
        Self { frame, value }
    }
}

/// What happens once playback runs past the last key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopMode {
    /// Wrap back to frame 0
    Cycle,
    /// Hold the last value
    Constant,
}

#[derive(Debug, Clone)]
pub struct KeyframeTrack {
    pub name: String,
    pub target_property: String,
    pub frame_rate: f32,
    /// Playback speed multiplier; 1.0 plays at `frame_rate`
    pub speed_ratio: f32,
    pub loop_mode: LoopMode,
    keys: Vec<Keyframe>,
}

impl KeyframeTrack {
    pub fn new(
        name: impl Into<String>,
        target_property: impl Into<String>,
        frame_rate: f32,
        loop_mode: LoopMode,
        mut keys: Vec<Keyframe>,
    ) -> Self {
        keys.sort_by(|a, b| a.frame.total_cmp(&b.frame));
        Self {
            name: name.into(),
            target_property: target_property.into(),
            frame_rate,
            speed_ratio: 1.0,
            loop_mode,
            keys,
        }
    }

    pub fn with_speed_ratio(mut self, speed_ratio: f32) -> Self {
        self.speed_ratio = speed_ratio;
        self
    }

    pub fn keys(&self) -> &[Keyframe] {
        &self.keys
    }

    /// Length of one pass in seconds, including the speed ratio
    pub fn duration(&self) -> f32 {
        let rate = self.frame_rate * self.speed_ratio;
        match self.keys.last() {
            Some(last) if rate > 0.0 => last.frame / rate,
            _ => 0.0,
        }
    }

    /// Sample the curve at `seconds` since playback started.
    /// An empty track, or a non-finite time, yields `default`.
    pub fn sample(&self, seconds: f32, default: f32) -> f32 {
        let (first, last) = match (self.keys.first(), self.keys.last()) {
            (Some(first), Some(last)) => (*first, *last),
            _ => return default,
        };

        let mut frame = seconds * self.frame_rate * self.speed_ratio;
        if !frame.is_finite() {
            return default;
        }
        if self.loop_mode == LoopMode::Cycle && last.frame > 0.0 {
            frame = frame.rem_euclid(last.frame);
        }

        if frame <= first.frame {
            return first.value;
        }
        if frame >= last.frame {
            return last.value;
        }

        // keys are sorted, so the first key past `frame` closes the span
        let i = self
            .keys
            .iter()
            .position(|k| k.frame > frame)
            .unwrap_or(self.keys.len() - 1)
            .max(1);
        let k0 = self.keys[i - 1];
        let k1 = self.keys[i];
        let span = k1.frame - k0.frame;
        if span <= 0.0 {
            return k1.value;
        }
        let f = (frame - k0.frame) / span;
        k0.value + (k1.value - k0.value) * f
    }
}

/// Speed the eye blink is played at
pub const FLAP_EYES_SPEED: f32 = 0.7;
/// Speed the mouth flap is played at
pub const FLAP_MOUTH_SPEED: f32 = 0.8;

/// Eye blink: open for most of the loop, then a quick double blink
pub fn flap_eyes() -> KeyframeTrack {
    KeyframeTrack::new(
        "flapEyes",
        "scaling.y",
        DEFAULT_FRAME_RATE,
        LoopMode::Cycle,
        vec![
            Keyframe::new(0.0, 1.0),
            Keyframe::new(25.0, 1.0),
            Keyframe::new(30.0, 0.0),
            Keyframe::new(35.0, 1.0),
            Keyframe::new(40.0, 0.0),
            Keyframe::new(45.0, 1.0),
            Keyframe::new(60.0, 1.0),
        ],
    )
    .with_speed_ratio(FLAP_EYES_SPEED)
}

/// Mouth open/close at a steady beat
pub fn flap_mouth() -> KeyframeTrack {
    KeyframeTrack::new(
        "flapMouth",
        "scaling.y",
        DEFAULT_FRAME_RATE,
        LoopMode::Cycle,
        vec![
            Keyframe::new(0.0, 0.0),
            Keyframe::new(10.0, 1.0),
            Keyframe::new(20.0, 0.0),
            Keyframe::new(30.0, 1.0),
            Keyframe::new(40.0, 0.0),
            Keyframe::new(50.0, 1.0),
            Keyframe::new(60.0, 0.0),
        ],
    )
    .with_speed_ratio(FLAP_MOUTH_SPEED)
}

/// Wing rotation around X in radians for a wall-clock time in milliseconds
pub fn wing_flap_angle(elapsed_ms: f64) -> f32 {
    ((elapsed_ms * 0.008).sin() * 0.5) as f32
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-4
    }

    /// Seconds of playback at which `track` reaches `frame`
    fn at_frame(track: &KeyframeTrack, frame: f32) -> f32 {
        frame / (track.frame_rate * track.speed_ratio)
    }

    #[test]
    fn test_sample_hits_keys() {
        let eyes = flap_eyes();
        assert!(approx(eyes.sample(0.0, 1.0), 1.0));
        assert!(approx(eyes.sample(at_frame(&eyes, 30.0), 1.0), 0.0), "eyes closed at frame 30");
        assert!(approx(eyes.sample(at_frame(&eyes, 35.0), 1.0), 1.0));
    }

    #[test]
    fn test_sample_interpolates() {
        let eyes = flap_eyes();
        let half_closed = eyes.sample(at_frame(&eyes, 27.5), 1.0);
        assert!(approx(half_closed, 0.5), "got {half_closed}");

        let mouth = flap_mouth();
        assert!(approx(mouth.sample(at_frame(&mouth, 5.0), 0.0), 0.5));
    }

    #[test]
    fn test_presets_play_slowed_down() {
        let eyes = flap_eyes();
        assert_eq!(eyes.speed_ratio, FLAP_EYES_SPEED);
        assert!(approx(eyes.duration(), 2.0 / 0.7));
        // at full speed 1s would be frame 30 (closed); at 0.7 it is frame 21 (open)
        assert!(approx(eyes.sample(1.0, 1.0), 1.0));

        let mouth = flap_mouth();
        assert_eq!(mouth.speed_ratio, FLAP_MOUTH_SPEED);
        // 0.5s at 30fps * 0.8 = frame 12
        assert!(approx(mouth.sample(0.5, 0.0), 0.8));
    }

    #[test]
    fn test_cycle_wraps() {
        let eyes = flap_eyes().with_speed_ratio(1.0);
        assert!(approx(eyes.duration(), 2.0));
        // frame 90 wraps to frame 30
        assert!(approx(eyes.sample(3.0, 1.0), 0.0));
    }

    #[test]
    fn test_constant_holds_last_value() {
        let mut mouth = flap_mouth();
        mouth.loop_mode = LoopMode::Constant;
        assert!(approx(mouth.sample(10.0, 1.0), 0.0));
        assert!(approx(mouth.sample(-1.0, 1.0), 0.0), "before start holds first key");
    }

    #[test]
    fn test_empty_track_uses_default() {
        let track = KeyframeTrack::new("none", "scaling.y", 30.0, LoopMode::Cycle, Vec::new());
        assert_eq!(track.sample(1.0, 0.75), 0.75);
        assert_eq!(track.duration(), 0.0);
    }

    #[test]
    fn test_non_finite_time_uses_default() {
        let single = KeyframeTrack::new(
            "single",
            "scaling.y",
            30.0,
            LoopMode::Cycle,
            vec![Keyframe::new(0.0, 2.0)],
        );
        assert_eq!(single.sample(f32::NAN, 0.25), 0.25);
        assert_eq!(single.sample(f32::INFINITY, 0.25), 0.25);
        assert_eq!(single.sample(1.0, 0.25), 2.0);

        let eyes = flap_eyes();
        assert_eq!(eyes.sample(f32::NAN, 1.0), 1.0);
        assert_eq!(eyes.sample(f32::NEG_INFINITY, 0.5), 0.5);
    }

    #[test]
    fn test_keys_sorted_on_construction() {
        let track = KeyframeTrack::new(
            "unsorted",
            "scaling.y",
            10.0,
            LoopMode::Constant,
            vec![Keyframe::new(10.0, 2.0), Keyframe::new(0.0, 0.0)],
        );
        assert_eq!(track.keys()[0].frame, 0.0);
        assert!(approx(track.sample(0.5, 0.0), 1.0));
    }

    #[test]
    fn test_wing_flap_bounded() {
        for ms in [0.0, 100.0, 196.35, 1234.5, 99_999.0] {
            let a = wing_flap_angle(ms);
            assert!(a.abs() <= 0.5 + 1e-6);
        }
        assert_eq!(wing_flap_angle(0.0), 0.0);
    }
}
