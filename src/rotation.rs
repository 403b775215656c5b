//! Timed rotation: a wrapping carousel index and a looping sprite animation.
//!
//! Both are driven by the caller's clock. Nothing here holds a timer.

/// Wrapping index over `len` items.
///
/// ```
/// use coverwarp::rotation::Carousel;
///
/// let mut scenes = Carousel::new(2);
/// assert_eq!(scenes.prev(), Some(1));
/// assert_eq!(scenes.next(), Some(0));
/// assert_eq!(scenes.set(-3), Some(1));
/// ```
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Carousel {
    len: usize,
    index: usize,
}

impl Carousel {
    /// Carousel over `len` items, starting at the first.
    pub fn new(len: usize) -> Self {
        Self { len, index: 0 }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Current index, or `None` for an empty carousel.
    pub fn current(&self) -> Option<usize> {
        (self.len > 0).then_some(self.index)
    }

    /// Step forward, wrapping past the last item.
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> Option<usize> {
        self.step(1)
    }

    /// Step back, wrapping before the first item.
    pub fn prev(&mut self) -> Option<usize> {
        self.step(-1)
    }

    /// Jump to `index`, wrapped into range. Negative indices count from the
    /// end.
    pub fn set(&mut self, index: isize) -> Option<usize> {
        if self.len == 0 {
            return None;
        }
        let len = self.len as isize;
        self.index = index.rem_euclid(len) as usize;
        Some(self.index)
    }

    fn step(&mut self, delta: isize) -> Option<usize> {
        if self.len == 0 {
            return None;
        }
        let len = self.len as isize;
        self.index = (self.index as isize + delta.rem_euclid(len)).rem_euclid(len) as usize;
        Some(self.index)
    }
}

/// A set of frame sequences that take turns on a fixed period.
///
/// Every `toggle_every_ms` the next sequence starts from its first frame,
/// plays once at `fps`, then hides until the following toggle.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct SpriteLoop {
    pub fps: u32,
    pub frame_count: u32,
    pub toggle_every_ms: u64,
    pub sequences: u32,
}

impl Default for SpriteLoop {
    fn default() -> Self {
        Self {
            fps: 20,
            frame_count: 15,
            toggle_every_ms: 6000,
            sequences: 2,
        }
    }
}

/// The frame to show at some instant.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct SpriteFrame {
    /// Which sequence is playing, `0..sequences`.
    pub sequence: u32,
    /// 0-based frame within the sequence.
    pub frame: u32,
}

impl SpriteLoop {
    /// How long one sequence stays visible.
    pub fn play_ms(&self) -> u64 {
        if self.fps == 0 {
            return 0;
        }
        (u64::from(self.frame_count) * 1000).div_ceil(u64::from(self.fps))
    }

    /// Frame visible `elapsed_ms` after the loop started, or `None` while
    /// hidden between plays or when the loop cannot play at all.
    ///
    /// ```
    /// use coverwarp::rotation::{SpriteFrame, SpriteLoop};
    ///
    /// let wind = SpriteLoop::default();
    /// assert_eq!(wind.frame_at(0), Some(SpriteFrame { sequence: 0, frame: 0 }));
    /// assert_eq!(wind.frame_at(6050), Some(SpriteFrame { sequence: 1, frame: 1 }));
    /// assert_eq!(wind.frame_at(1000), None);
    /// ```
    pub fn frame_at(&self, elapsed_ms: u64) -> Option<SpriteFrame> {
        if self.fps == 0 || self.frame_count == 0 || self.sequences == 0 || self.toggle_every_ms == 0
        {
            return None;
        }
        let period = elapsed_ms / self.toggle_every_ms;
        let within = elapsed_ms % self.toggle_every_ms;
        let frame = within.saturating_mul(u64::from(self.fps)) / 1000;
        if frame >= u64::from(self.frame_count) {
            return None;
        }
        Some(SpriteFrame {
            sequence: (period % u64::from(self.sequences)) as u32,
            frame: frame as u32,
        })
    }
}

#[cfg(feature = "alloc")]
impl SpriteFrame {
    /// File name of this frame, e.g. `frame_000001.png` for the first one.
    pub fn file_name(&self, ext: &str) -> alloc::string::String {
        frame_file_name(self.frame + 1, ext)
    }
}

/// File name for 1-based frame `number`: six zero-padded digits.
#[cfg(feature = "alloc")]
pub fn frame_file_name(number: u32, ext: &str) -> alloc::string::String {
    alloc::format!("frame_{number:06}.{ext}")
}

#[cfg(test)]
mod tests {
    use super::*;
    #[cfg(not(feature = "std"))]
    use alloc::vec::Vec;

    #[test]
    fn carousel_wraps_both_ways() {
        let mut c = Carousel::new(3);
        assert_eq!(c.current(), Some(0));
        assert_eq!(c.next(), Some(1));
        assert_eq!(c.next(), Some(2));
        assert_eq!(c.next(), Some(0));
        assert_eq!(c.prev(), Some(2));
        assert_eq!(c.current(), Some(2));
    }

    #[test]
    fn carousel_set_wraps() {
        let mut c = Carousel::new(4);
        assert_eq!(c.set(5), Some(1));
        assert_eq!(c.set(-1), Some(3));
        assert_eq!(c.set(-9), Some(3));
        assert_eq!(c.set(isize::MIN), Some(0));
    }

    #[test]
    fn empty_carousel_has_no_current() {
        let mut c = Carousel::new(0);
        assert!(c.is_empty());
        assert_eq!(c.current(), None);
        assert_eq!(c.next(), None);
        assert_eq!(c.prev(), None);
        assert_eq!(c.set(3), None);
    }

    #[test]
    fn single_item_carousel_stays_put() {
        let mut c = Carousel::new(1);
        assert_eq!(c.next(), Some(0));
        assert_eq!(c.prev(), Some(0));
    }

    #[test]
    fn sprite_plays_once_per_toggle() {
        let s = SpriteLoop::default();
        assert_eq!(s.play_ms(), 750);
        assert_eq!(s.frame_at(49).unwrap().frame, 0);
        assert_eq!(s.frame_at(50).unwrap().frame, 1);
        assert_eq!(s.frame_at(749).unwrap().frame, 14);
        assert_eq!(s.frame_at(750), None);
        assert_eq!(s.frame_at(5999), None);
    }

    #[test]
    fn sprite_sequences_alternate() {
        let s = SpriteLoop::default();
        let seqs: Vec<u32> = (0..5).map(|k| s.frame_at(k * 6000).unwrap().sequence).collect();
        assert_eq!(seqs, [0, 1, 0, 1, 0]);
    }

    #[test]
    fn degenerate_sprite_never_shows() {
        let base = SpriteLoop::default();
        for s in [
            SpriteLoop { fps: 0, ..base },
            SpriteLoop { frame_count: 0, ..base },
            SpriteLoop { toggle_every_ms: 0, ..base },
            SpriteLoop { sequences: 0, ..base },
        ] {
            assert_eq!(s.frame_at(0), None, "{s:?}");
        }
    }

    #[test]
    fn playback_longer_than_toggle_restarts() {
        let s = SpriteLoop {
            fps: 1,
            frame_count: 10,
            toggle_every_ms: 3000,
            sequences: 2,
        };
        assert_eq!(s.frame_at(2999), Some(SpriteFrame { sequence: 0, frame: 2 }));
        assert_eq!(s.frame_at(3000), Some(SpriteFrame { sequence: 1, frame: 0 }));
    }

    #[test]
    fn frame_file_names() {
        assert_eq!(frame_file_name(1, "png"), "frame_000001.png");
        assert_eq!(frame_file_name(15, "webp"), "frame_000015.webp");
        let f = SpriteLoop::default().frame_at(0).unwrap();
        assert_eq!(f.file_name("png"), "frame_000001.png");
    }
}
