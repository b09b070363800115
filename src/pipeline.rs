//! One read → transform → write run.
//!
//! A [`Pipeline`] moves through [`Stage`]s strictly in order and is consumed
//! by the run. A failure stops it where it is; nothing is written after a
//! failed stage, and [`Pipeline::run`] leaves no output file behind.

use core::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use enough::{Stop, Unstoppable};
use log::{debug, info};

use crate::buffer::PixelBuffer;
use crate::error::PnmError;
use crate::limits::Limits;
use crate::pixel::{Encoding, MagicNumber};
use crate::pnm;
use crate::transform::Operation;

/// Pipeline states, in the only order they can be visited.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Stage {
    Idle,
    HeaderRead,
    BodyRead,
    Transformed,
    Written,
    Done,
}

impl Stage {
    /// The state that follows this one, if any.
    pub fn next(self) -> Option<Stage> {
        match self {
            Stage::Idle => Some(Stage::HeaderRead),
            Stage::HeaderRead => Some(Stage::BodyRead),
            Stage::BodyRead => Some(Stage::Transformed),
            Stage::Transformed => Some(Stage::Written),
            Stage::Written => Some(Stage::Done),
            Stage::Done => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Stage::Idle => "idle",
            Stage::HeaderRead => "header",
            Stage::BodyRead => "body",
            Stage::Transformed => "transform",
            Stage::Written => "write",
            Stage::Done => "done",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A failed run: the stage that could not be completed and why.
#[derive(Debug, thiserror::Error)]
#[error("{stage} stage failed: {source}")]
pub struct PipelineError {
    pub stage: Stage,
    #[source]
    pub source: PnmError,
}

impl PipelineError {
    /// Process exit status for this failure. Every failure is fatal.
    pub fn exit_code(&self) -> i32 {
        1
    }
}

/// File extension for an output with `channels` channels.
pub fn output_extension(channels: usize) -> &'static str {
    if channels == 1 { "pgm" } else { "ppm" }
}

/// `base` with `.pgm` or `.ppm` appended (not substituted).
pub fn output_path(base: &Path, channels: usize) -> PathBuf {
    let mut path = base.as_os_str().to_owned();
    path.push(".");
    path.push(output_extension(channels));
    PathBuf::from(path)
}

/// Inputs a caller has already validated.
#[derive(Clone, Debug)]
pub struct Request {
    pub operation: Operation,
    pub encoding: Encoding,
    pub input: PathBuf,
    /// Output path without extension; the extension follows the result's
    /// channel count.
    pub output_base: PathBuf,
    pub limits: Option<Limits>,
    pub strict_maxval: bool,
}

impl Request {
    pub fn new(
        operation: Operation,
        encoding: Encoding,
        input: impl Into<PathBuf>,
        output_base: impl Into<PathBuf>,
    ) -> Self {
        Self {
            operation,
            encoding,
            input: input.into(),
            output_base: output_base.into(),
            limits: None,
            strict_maxval: false,
        }
    }
}

/// Result of a successful run.
#[derive(Clone, Debug)]
pub struct PipelineOutput {
    /// Complete encoded file.
    pub bytes: Vec<u8>,
    /// Tag written to the header.
    pub magic: MagicNumber,
    /// Where the bytes were written, for file runs.
    pub path: Option<PathBuf>,
}

impl PipelineOutput {
    pub fn channels(&self) -> usize {
        self.magic.channels()
    }

    pub fn extension(&self) -> &'static str {
        output_extension(self.channels())
    }
}

/// Single-use read → transform → write state machine.
#[derive(Debug)]
pub struct Pipeline<S = Unstoppable> {
    stage: Stage,
    limits: Option<Limits>,
    strict_maxval: bool,
    stop: S,
}

impl Pipeline<Unstoppable> {
    pub fn new() -> Self {
        Self::with_stop(Unstoppable)
    }
}

impl Default for Pipeline<Unstoppable> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: Stop> Pipeline<S> {
    /// Pipeline that checks `stop` between stages and inside codec loops.
    pub fn with_stop(stop: S) -> Self {
        Self {
            stage: Stage::Idle,
            limits: None,
            strict_maxval: false,
            stop,
        }
    }

    pub fn with_limits(mut self, limits: Limits) -> Self {
        self.limits = Some(limits);
        self
    }

    pub fn strict_maxval(mut self, strict: bool) -> Self {
        self.strict_maxval = strict;
        self
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    fn fail(&self, source: PnmError) -> PipelineError {
        let stage = self.stage.next().unwrap_or(Stage::Done);
        PipelineError { stage, source }
    }

    fn advance(&mut self, next: Stage) {
        debug_assert_eq!(self.stage.next(), Some(next));
        info!("pipeline: {} -> {}", self.stage, next);
        self.stage = next;
    }

    fn check_stop(&self) -> Result<(), PipelineError> {
        self.stop.check().map_err(|r| self.fail(r.into()))
    }

    /// Run on in-memory bytes. The encoded result is returned, not written.
    pub fn run_bytes(
        self,
        data: &[u8],
        operation: &Operation,
        encoding: Encoding,
    ) -> Result<PipelineOutput, PipelineError> {
        self.execute(data, operation, encoding, |_, _| Ok(None))
    }

    /// Read `request.input`, run, and write `output_base` plus extension.
    pub fn run(mut self, request: &Request) -> Result<PipelineOutput, PipelineError> {
        if let Some(limits) = &request.limits {
            self.limits = Some(limits.clone());
        }
        self.strict_maxval |= request.strict_maxval;

        let data = fs::read(&request.input).map_err(|e| self.fail(e.into()))?;
        let base = request.output_base.clone();
        self.execute(&data, &request.operation, request.encoding, move |bytes, channels| {
            let path = output_path(&base, channels);
            if let Err(e) = fs::write(&path, bytes) {
                let _ = fs::remove_file(&path);
                return Err(e.into());
            }
            debug!("wrote {} bytes to {}", bytes.len(), path.display());
            Ok(Some(path))
        })
    }

    fn execute(
        mut self,
        data: &[u8],
        operation: &Operation,
        encoding: Encoding,
        sink: impl FnOnce(&[u8], usize) -> Result<Option<PathBuf>, PnmError>,
    ) -> Result<PipelineOutput, PipelineError> {
        self.check_stop()?;
        let header = pnm::read_header(data, self.limits.as_ref(), self.strict_maxval)
            .map_err(|e| self.fail(e))?;
        self.advance(Stage::HeaderRead);

        let mut buffer: PixelBuffer =
            pnm::read_body(data, &header, &self.stop).map_err(|e| self.fail(e))?;
        self.advance(Stage::BodyRead);

        self.check_stop()?;
        operation.apply(&mut buffer).map_err(|e| self.fail(e))?;
        self.advance(Stage::Transformed);

        self.check_stop()?;
        let channels = buffer.channels();
        let magic = MagicNumber::from_parts(encoding, channels)
            .ok_or_else(|| self.fail(PnmError::UnsupportedChannels(channels)))?;
        let bytes =
            pnm::encode(&buffer, encoding, channels, &self.stop).map_err(|e| self.fail(e))?;
        let path = sink(&bytes, channels).map_err(|e| self.fail(e))?;
        self.advance(Stage::Written);

        self.advance(Stage::Done);
        Ok(PipelineOutput { bytes, magic, path })
    }
}

/// Run `request` with default cancellation.
pub fn run(request: &Request) -> Result<PipelineOutput, PipelineError> {
    Pipeline::new().run(request)
}
