use std::time::Duration;

use log::{debug, info};

use crate::compose::PhysicalDisplay;
use crate::display::VirtualDisplay;
use crate::driver::LightDriver;
use crate::error::Result;
use crate::layout::PixelMapper;

/// Default delay between frames.
pub const DEFAULT_INTERVAL: Duration = Duration::from_millis(100);

/// The render loop: compose, emit, sleep, tick.
///
/// Each cycle shows the current anchors before advancing them, so the first
/// frame shows every sprite at its starting position.
pub struct View<D: LightDriver> {
    display: VirtualDisplay,
    mapper: PixelMapper,
    driver: D,
    interval: Duration,
    frame: u64,
}

impl<D: LightDriver> View<D> {
    pub fn new(display: VirtualDisplay, mapper: PixelMapper, driver: D) -> Self {
        Self {
            display,
            mapper,
            driver,
            interval: DEFAULT_INTERVAL,
            frame: 0,
        }
    }

    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    pub fn display(&self) -> &VirtualDisplay {
        &self.display
    }

    pub fn driver(&self) -> &D {
        &self.driver
    }

    /// Frames emitted so far.
    pub fn frames(&self) -> u64 {
        self.frame
    }

    /// Run one full cycle. A driver failure aborts before the sleep and tick.
    pub fn step(&mut self) -> Result<()> {
        // Fresh frame from the current anchors
        let mut frame =
            PhysicalDisplay::new(self.mapper.width(), self.mapper.height(), &self.mapper)?;
        frame.compose(&self.display.project());
        debug!("frame {}: {} lights", self.frame, frame.len());

        // Blocks until the driver is done with this frame
        self.driver.emit(&frame)?;
        self.frame += 1;

        if !self.interval.is_zero() {
            std::thread::sleep(self.interval);
        }

        // Advance for the next cycle
        self.display.tick();
        Ok(())
    }

    /// Loop until the driver fails. Never returns `Ok`.
    pub fn run(&mut self) -> Result<()> {
        info!(
            "animating {} sprites on {} ({}x{}) every {:?}",
            self.display.sprites().len(),
            self.mapper.model(),
            self.mapper.width(),
            self.mapper.height(),
            self.interval
        );
        loop {
            self.step()?;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::geometry::{Colour, Point};
    use crate::layout::Key;
    use crate::sprite::{AnimatedSprite, Direction, Pixel, Sprite};

    #[derive(Default)]
    struct Recorder {
        frames: Vec<String>,
        fail_after: Option<usize>,
    }

    impl LightDriver for Recorder {
        fn emit(&mut self, frame: &PhysicalDisplay<'_>) -> Result<()> {
            if self.fail_after == Some(self.frames.len()) {
                return Err(Error::ExternalDriverFailure {
                    program: "recorder".to_string(),
                    reason: "exited with exit status: 1".to_string(),
                });
            }
            self.frames.push(frame.serialize());
            Ok(())
        }
    }

    fn row_mapper() -> PixelMapper {
        PixelMapper::from_entries(
            3,
            1,
            [
                (Point::new(0, 0), Key::key("a")),
                (Point::new(1, 0), Key::key("b")),
                (Point::new(2, 0), Key::key("c")),
            ],
        )
        .unwrap()
    }

    fn drifting_dot(drift: Direction) -> VirtualDisplay {
        let mut display = VirtualDisplay::new(drift);
        let sprite = Sprite::new(vec![Pixel::new(Point::new(0, 0), Colour::new(0xff, 0, 0))]);
        display.add_sprite(AnimatedSprite::new(sprite, Point::new(0, 0)));
        display
    }

    #[test]
    fn first_frame_shows_initial_anchor() {
        let mut view = View::new(drifting_dot(Direction::Left), row_mapper(), Recorder::default())
            .with_interval(Duration::ZERO);

        // Four cycles: the dot starts on "a" and wraps off the left edge
        for _ in 0..4 {
            view.step().unwrap();
        }
        assert_eq!(
            view.driver().frames,
            vec![
                "a 000000\nk a ff0000\nc\n",
                "a 000000\nk c ff0000\nc\n",
                "a 000000\nk b ff0000\nc\n",
                "a 000000\nk a ff0000\nc\n",
            ]
        );
        assert_eq!(view.frames(), 4);
        assert_eq!(view.display().sprites()[0].anchor(), Point::new(-4, 0));
    }

    #[test]
    fn driver_failure_stops_the_loop() {
        let recorder = Recorder {
            fail_after: Some(2),
            ..Recorder::default()
        };
        let mut view = View::new(drifting_dot(Direction::Right), row_mapper(), recorder)
            .with_interval(Duration::ZERO);
        let err = view.run().unwrap_err();
        assert!(matches!(err, Error::ExternalDriverFailure { .. }));
        assert_eq!(view.frames(), 2);
        // the failed frame does not advance the animation
        assert_eq!(view.display().sprites()[0].anchor(), Point::new(2, 0));
    }
}
