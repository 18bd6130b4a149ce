//! `lsys draw`: run a paced session and stream segments as JSON lines.

use std::io::Write;
use std::path::PathBuf;

use clap::Args;
use lsys_catalog::Registry;
use lsys_core::{RenderSink, Segment, Session};
use serde::Serialize;

use crate::config::DrawConfig;
use crate::error::{CliError, Result};

#[derive(Debug, Clone, Args)]
pub struct DrawArgs {
    /// Fractal slug (see `lsys list`).
    pub slug: String,

    #[arg(long)]
    pub depth: Option<u32>,

    #[arg(long)]
    pub width: Option<f64>,

    /// Drawing steps per tick.
    #[arg(long)]
    pub batch: Option<u64>,

    #[arg(long = "hue-start")]
    pub hue_start: Option<f64>,

    #[arg(long = "hue-end")]
    pub hue_end: Option<f64>,

    /// JSON file with defaults for the options above.
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl DrawArgs {
    /// Config file (or defaults) with flags applied on top.
    pub fn resolve(&self) -> Result<DrawConfig> {
        let mut config = match &self.config {
            Some(path) => DrawConfig::from_path(path)?,
            None => DrawConfig::default(),
        };
        if let Some(depth) = self.depth {
            config.depth = Some(depth);
        }
        if let Some(width) = self.width {
            config.width = width;
        }
        if let Some(batch) = self.batch {
            config.batch = batch;
        }
        if let Some(start) = self.hue_start {
            config.hue.start = start;
        }
        if let Some(end) = self.hue_end {
            config.hue.end = end;
        }
        config.validate()?;
        Ok(config)
    }
}

/// One line of `lsys draw` output.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SegmentRecord {
    pub index: u64,
    pub x0: f64,
    pub y0: f64,
    pub x1: f64,
    pub y1: f64,
    pub hue: f64,
    pub color: String,
}

impl SegmentRecord {
    #[must_use]
    pub fn new(segment: &Segment, saturation: f64, value: f64) -> Self {
        Self {
            index: segment.index,
            x0: segment.start.x,
            y0: segment.start.y,
            x1: segment.end.x,
            y1: segment.end.y,
            hue: segment.hue.degrees(),
            color: segment.hue.to_rgba(saturation, value).to_hex(),
        }
    }
}

/// Writes each segment as one JSON object per line.
///
/// [`RenderSink::segment`] cannot fail, so the first write error is held
/// until [`JsonLinesSink::check`] and later segments are dropped.
pub struct JsonLinesSink<W: Write> {
    out: W,
    saturation: f64,
    value: f64,
    error: Option<CliError>,
}

impl<W: Write> JsonLinesSink<W> {
    pub fn new(out: W, saturation: f64, value: f64) -> Self {
        Self {
            out,
            saturation,
            value,
            error: None,
        }
    }

    fn write(&mut self, segment: &Segment) -> Result<()> {
        serde_json::to_writer(&mut self.out, &SegmentRecord::new(segment, self.saturation, self.value))?;
        self.out.write_all(b"\n")?;
        Ok(())
    }

    /// Flush and surface any error held since the last check.
    pub fn check(&mut self) -> Result<()> {
        if let Some(err) = self.error.take() {
            return Err(err);
        }
        self.out.flush()?;
        Ok(())
    }
}

impl<W: Write> RenderSink for JsonLinesSink<W> {
    fn segment(&mut self, segment: &Segment) {
        if self.error.is_some() {
            return;
        }
        if let Err(err) = self.write(segment) {
            self.error = Some(err);
        }
    }
}

pub fn run_draw(args: &DrawArgs, out: &mut dyn Write) -> Result<()> {
    let config = args.resolve()?;
    let def = Registry::builtin().get(&args.slug)?;
    let depth = config.depth.unwrap_or(def.default_depth);
    let grammar = def.grammar(depth)?;
    let session_config = def
        .session_config(depth, config.width)
        .with_hue_range(config.hue);
    let mut session = Session::new(&grammar, session_config)?;

    tracing::info!(
        message = "lsys.draw.start",
        slug = def.slug,
        depth,
        total = %session.total_steps(),
        batch = config.batch,
    );

    let mut sink = JsonLinesSink::new(out, config.saturation, config.value);
    let mut ticks: u64 = 0;
    loop {
        let outcome = session.step(config.batch, &mut sink)?;
        sink.check()?;
        ticks += 1;
        tracing::debug!(
            message = "lsys.draw.tick",
            tick = ticks,
            steps = outcome.steps,
            segments = outcome.segments,
            progress = session.progress(),
        );
        if outcome.exhausted {
            break;
        }
    }

    tracing::info!(
        message = "lsys.draw.done",
        slug = def.slug,
        ticks,
        steps = session.steps_taken(),
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use lsys_core::{Hue, Point};

    fn args(slug: &str) -> DrawArgs {
        DrawArgs {
            slug: slug.to_string(),
            depth: None,
            width: None,
            batch: None,
            hue_start: None,
            hue_end: None,
            config: None,
        }
    }

    #[test]
    fn flags_override_defaults() {
        let mut a = args("koch");
        a.depth = Some(2);
        a.batch = Some(5);
        a.hue_end = Some(90.0);
        let config = a.resolve().unwrap();
        assert_eq!(config.depth, Some(2));
        assert_eq!(config.batch, 5);
        assert_eq!(config.hue.start, 0.0);
        assert_eq!(config.hue.end, 90.0);
        assert_eq!(config.width, 800.0);
    }

    #[test]
    fn zero_batch_rejected() {
        let mut a = args("koch");
        a.batch = Some(0);
        assert_eq!(a.resolve().unwrap_err().exit_code(), 2);
    }

    #[test]
    fn record_carries_color() {
        let segment = Segment {
            start: Point::new(0.0, 0.0),
            end: Point::new(1.0, 2.0),
            hue: Hue::new(120.0),
            index: 7,
        };
        let record = SegmentRecord::new(&segment, 1.0, 1.0);
        assert_eq!(record.index, 7);
        assert_eq!(record.y1, 2.0);
        assert_eq!(record.color, "#00ff00");
    }

    #[test]
    fn sink_holds_first_write_error() {
        struct Closed;
        impl Write for Closed {
            fn write(&mut self, _: &[u8]) -> std::io::Result<usize> {
                Err(std::io::Error::new(std::io::ErrorKind::BrokenPipe, "closed"))
            }
            fn flush(&mut self) -> std::io::Result<()> {
                Ok(())
            }
        }
        let segment = Segment {
            start: Point::default(),
            end: Point::new(1.0, 0.0),
            hue: Hue::RED,
            index: 0,
        };
        let mut sink = JsonLinesSink::new(Closed, 1.0, 1.0);
        sink.segment(&segment);
        sink.segment(&segment);
        assert!(sink.check().is_err());
        assert!(sink.check().is_ok());
    }
}
