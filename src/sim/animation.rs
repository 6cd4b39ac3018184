//! Timed finite-state animation control
//!
//! One generic controller drives every actor class. Each class supplies a
//! frame table (state -> frame count, per-frame delay, playback mode, frame
//! dimensions); the actor arbitrates which state is active from its own
//! flags and reacts when a one-shot sequence completes. Frames are indices
//! into sprite sheets owned by the render shell; the sim never touches
//! images.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Playback {
    /// Cycle frame index modulo the sequence length forever
    Loop,
    /// Advance to the final frame, then signal completion and hold
    OneShot,
}

/// Sprite-facing direction; the render shell picks the mirrored frame set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Facing {
    Left,
    Right,
}

impl Facing {
    /// Face the sign of a horizontal delta, keeping the current facing when
    /// the delta is zero.
    pub fn from_delta(dx: f32, current: Facing) -> Facing {
        if dx < 0.0 {
            Facing::Left
        } else if dx > 0.0 {
            Facing::Right
        } else {
            current
        }
    }
}

/// One animation sequence: frame count, time gate, playback mode, and the
/// source frame dimensions (render rects are sized from these).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameSeq {
    pub frames: u32,
    pub frame_ms: u64,
    pub playback: Playback,
    pub width: f32,
    pub height: f32,
}

impl FrameSeq {
    pub const fn looping(frames: u32, frame_ms: u64, width: f32, height: f32) -> Self {
        Self {
            frames,
            frame_ms,
            playback: Playback::Loop,
            width,
            height,
        }
    }

    pub const fn one_shot(frames: u32, frame_ms: u64, width: f32, height: f32) -> Self {
        Self {
            frames,
            frame_ms,
            playback: Playback::OneShot,
            width,
            height,
        }
    }
}

/// Per-actor-class frame table.
pub trait FrameTable: Copy + Eq {
    fn seq(self) -> FrameSeq;
}

/// Timed frame-state machine for one actor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Animator<S> {
    state: S,
    frame: u32,
    last_advance_ms: u64,
}

impl<S: FrameTable> Animator<S> {
    pub fn new(initial: S) -> Self {
        Self {
            state: initial,
            frame: 0,
            last_advance_ms: 0,
        }
    }

    pub fn state(&self) -> S {
        self.state
    }

    /// Current frame index; combined with the state this is the frame
    /// handle the render shell looks up.
    pub fn frame(&self) -> u32 {
        self.frame
    }

    pub fn frame_size(&self) -> (f32, f32) {
        let seq = self.state.seq();
        (seq.width, seq.height)
    }

    /// Switch state; entering a different state restarts at frame 0.
    /// Re-requesting the active state is a no-op, so loops keep cycling and
    /// in-flight one-shots are not restarted.
    pub fn set(&mut self, next: S) {
        if next != self.state {
            self.state = next;
            self.frame = 0;
        }
    }

    /// Advance the frame if this state's delay has elapsed. Returns true
    /// when a one-shot sequence is sitting on its final frame.
    pub fn advance(&mut self, now_ms: u64) -> bool {
        let seq = self.state.seq();
        if seq.frames == 0 {
            return false;
        }
        if now_ms.saturating_sub(self.last_advance_ms) > seq.frame_ms {
            self.last_advance_ms = now_ms;
            match seq.playback {
                Playback::Loop => self.frame = (self.frame + 1) % seq.frames,
                Playback::OneShot => {
                    if self.frame + 1 < seq.frames {
                        self.frame += 1;
                    }
                }
            }
        }
        seq.playback == Playback::OneShot && self.frame >= seq.frames - 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum TestAnim {
        Cycle,
        Once,
        Hold,
    }

    impl FrameTable for TestAnim {
        fn seq(self) -> FrameSeq {
            match self {
                TestAnim::Cycle => FrameSeq::looping(3, 100, 16.0, 16.0),
                TestAnim::Once => FrameSeq::one_shot(2, 50, 16.0, 16.0),
                TestAnim::Hold => FrameSeq::looping(1, 100, 16.0, 16.0),
            }
        }
    }

    #[test]
    fn test_loop_wraps() {
        let mut anim = Animator::new(TestAnim::Cycle);
        let mut now = 0;
        for expected in [1, 2, 0, 1] {
            now += 101;
            assert!(!anim.advance(now));
            assert_eq!(anim.frame(), expected);
        }
    }

    #[test]
    fn test_time_gate() {
        let mut anim = Animator::new(TestAnim::Cycle);
        // Under the 100ms gate: no advance
        assert!(!anim.advance(100));
        assert_eq!(anim.frame(), 0);
        assert!(!anim.advance(101));
        assert_eq!(anim.frame(), 1);
    }

    #[test]
    fn test_one_shot_completes_and_holds() {
        let mut anim = Animator::new(TestAnim::Once);
        assert!(!anim.advance(51));
        // Reached final frame
        assert!(anim.advance(102));
        assert_eq!(anim.frame(), 1);
        // Holds on the final frame
        assert!(anim.advance(200));
        assert_eq!(anim.frame(), 1);
    }

    #[test]
    fn test_set_restarts_only_on_change() {
        let mut anim = Animator::new(TestAnim::Cycle);
        anim.advance(101);
        assert_eq!(anim.frame(), 1);
        anim.set(TestAnim::Cycle);
        assert_eq!(anim.frame(), 1);
        anim.set(TestAnim::Once);
        assert_eq!(anim.frame(), 0);
    }

    #[test]
    fn test_single_frame_loop_never_completes() {
        let mut anim = Animator::new(TestAnim::Hold);
        assert!(!anim.advance(500));
        assert_eq!(anim.frame(), 0);
    }

    #[test]
    fn test_facing_from_delta() {
        assert_eq!(Facing::from_delta(-3.0, Facing::Right), Facing::Left);
        assert_eq!(Facing::from_delta(2.0, Facing::Left), Facing::Right);
        assert_eq!(Facing::from_delta(0.0, Facing::Left), Facing::Left);
    }
}
