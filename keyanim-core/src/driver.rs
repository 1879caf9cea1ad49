use std::io::Write;
use std::process::{Command, Stdio};

use log::{debug, trace};

use crate::compose::PhysicalDisplay;
use crate::error::{Error, Result};

/// Default lighting driver executable.
pub const DEFAULT_PROGRAM: &str = "g810-led";

/// Receives one composed frame at a time. Emission is blocking.
pub trait LightDriver {
    fn emit(&mut self, frame: &PhysicalDisplay<'_>) -> Result<()>;
}

impl<D: LightDriver + ?Sized> LightDriver for Box<D> {
    fn emit(&mut self, frame: &PhysicalDisplay<'_>) -> Result<()> {
        (**self).emit(frame)
    }
}

/// Pipes each frame into a fresh `<program> -pp` process and waits for it to exit.
pub struct CommandDriver {
    program: String,
    args: Vec<String>,
}

impl CommandDriver {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: vec!["-pp".to_string()],
        }
    }

    /// Replace the arguments passed to the driver.
    pub fn with_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args = args.into_iter().map(Into::into).collect();
        self
    }

    fn failure(&self, reason: impl Into<String>) -> Error {
        Error::ExternalDriverFailure {
            program: self.program.clone(),
            reason: reason.into(),
        }
    }
}

impl Default for CommandDriver {
    fn default() -> Self {
        Self::new(DEFAULT_PROGRAM)
    }
}

impl LightDriver for CommandDriver {
    fn emit(&mut self, frame: &PhysicalDisplay<'_>) -> Result<()> {
        let text = frame.serialize();
        trace!("{} <- {:?}", self.program, text);

        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .spawn()
            .map_err(|e| self.failure(format!("spawn: {e}")))?;

        // Feed the frame, then close stdin so the driver sees end of input
        let written = match child.stdin.take() {
            Some(mut stdin) => stdin.write_all(text.as_bytes()),
            None => Err(std::io::Error::other("stdin not captured")),
        };

        // Always reap the child, even when it stopped reading early
        let status = child
            .wait()
            .map_err(|e| self.failure(format!("wait: {e}")))?;
        if !status.success() {
            return Err(self.failure(format!("exited with {status}")));
        }
        written.map_err(|e| self.failure(format!("write: {e}")))?;
        debug!("emitted {} lights via {}", frame.len(), self.program);
        Ok(())
    }
}

/// Writes the protocol text of each frame to a writer, for dry runs.
pub struct WriterDriver<W: Write> {
    writer: W,
}

impl<W: Write> WriterDriver<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> LightDriver for WriterDriver<W> {
    fn emit(&mut self, frame: &PhysicalDisplay<'_>) -> Result<()> {
        self.writer.write_all(frame.serialize().as_bytes())?;
        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Colour;
    use crate::layout::{Key, PixelMapper};

    fn one_key_frame(mapper: &PixelMapper) -> PhysicalDisplay<'_> {
        let mut frame = PhysicalDisplay::for_mapper(mapper);
        frame.light(Key::key("escape"), Colour::new(0xff, 0xbb, 0x99));
        frame
    }

    #[test]
    fn writer_driver_emits_protocol_text() {
        let mapper = PixelMapper::from_entries(1, 1, []).unwrap();
        let mut driver = WriterDriver::new(Vec::new());
        driver.emit(&one_key_frame(&mapper)).unwrap();
        driver.emit(&PhysicalDisplay::for_mapper(&mapper)).unwrap();
        let out = String::from_utf8(driver.into_inner()).unwrap();
        assert_eq!(out, "a 000000\nk escape ffbb99\nc\na 000000\nc\n");
    }

    #[test]
    fn missing_program_is_a_driver_failure() {
        let mapper = PixelMapper::from_entries(1, 1, []).unwrap();
        let mut driver = CommandDriver::new("keyanim-no-such-driver");
        let err = driver.emit(&one_key_frame(&mapper)).unwrap_err();
        assert!(matches!(
            err,
            Error::ExternalDriverFailure { ref program, .. } if program == "keyanim-no-such-driver"
        ));
    }

    #[cfg(unix)]
    #[test]
    fn non_zero_exit_is_a_driver_failure() {
        let mapper = PixelMapper::from_entries(1, 1, []).unwrap();
        let mut driver = CommandDriver::new("sh").with_args(["-c", "cat >/dev/null; exit 3"]);
        let err = driver.emit(&one_key_frame(&mapper)).unwrap_err();
        assert!(matches!(err, Error::ExternalDriverFailure { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn early_exit_reports_status_not_broken_pipe() {
        let mapper = PixelMapper::from_entries(1, 1, []).unwrap();
        // Big enough to overflow the pipe buffer of a driver that never reads
        let mut frame = PhysicalDisplay::for_mapper(&mapper);
        for i in 0..20_000 {
            frame.light(Key::key(format!("key_{i}")), Colour::new(0xff, 0, 0));
        }

        let mut driver = CommandDriver::new("sh").with_args(["-c", "exit 3"]);
        let err = driver.emit(&frame).unwrap_err();
        match err {
            Error::ExternalDriverFailure { reason, .. } => {
                assert!(reason.starts_with("exited with"), "unexpected reason: {reason}");
                assert!(reason.contains('3'), "unexpected reason: {reason}");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[cfg(unix)]
    #[test]
    fn driver_receives_frame_on_stdin() {
        let mapper = PixelMapper::from_entries(1, 1, []).unwrap();
        let mut driver = CommandDriver::new("sh")
            .with_args(["-c", "test \"$(cat)\" = \"$(printf 'a 000000\\nk escape ffbb99\\nc')\""]);
        driver.emit(&one_key_frame(&mapper)).unwrap();
    }
}
