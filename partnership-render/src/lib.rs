use partnership_core::amount::round_cents;
use partnership_core::*;
use std::{io, io::Write};
use thiserror::Error;


#[derive(Copy, Clone, Eq, PartialEq, Hash, Default, Debug)]
pub struct BasicRenderer {}

impl BasicRenderer {
    pub fn new() -> Self {
        Self::default()
    }
}

pub fn render<W: Write>(w: &mut W, journal: &Journal<'_>) -> Result<(), BasicRendererError> {
    BasicRenderer::default().render(journal, w)
}

/// Writes one error line per source naming the transactions without a `tag` annotation.
pub fn render_unannotated<W: Write>(
    w: &mut W,
    tag: &str,
    unannotated: &[Unannotated<'_>],
) -> Result<(), BasicRendererError> {
    let renderer = BasicRenderer::default();
    for source in unannotated {
        renderer.render(&UnannotatedReport { tag, source }, w)?;
    }
    Ok(())
}

#[derive(Error, Debug)]
pub enum BasicRendererError {
    #[error("an io error occurred")]
    Io(#[from] io::Error),
}

pub trait Renderer<T, W: Write> {
    type Error;
    fn render(&self, renderable: T, write: &mut W) -> Result<(), Self::Error>;
}

/// The transactions of one source lacking an annotation, as reported to the user.
#[derive(Copy, Clone, Debug)]
pub struct UnannotatedReport<'r, 'a> {
    /// Lowercase tag name, e.g. `partnership`.
    pub tag: &'r str,
    pub source: &'r Unannotated<'a>,
}

impl<'a, W: Write> Renderer<&'a Journal<'_>, W> for BasicRenderer {
    type Error = BasicRendererError;
    fn render(&self, journal: &'a Journal<'_>, write: &mut W) -> Result<(), Self::Error> {
        for line in &journal.lines {
            self.render(line, write)?;
        }
        Ok(())
    }
}

impl<'a, W: Write> Renderer<&'a JournalLine<'_>, W> for BasicRenderer {
    type Error = BasicRendererError;
    fn render(&self, line: &'a JournalLine<'_>, write: &mut W) -> Result<(), Self::Error> {
        match line {
            JournalLine::Original(text) => writeln!(write, "{}", text)?,
            JournalLine::Virtual(posting) => self.render(posting, write)?,
        }
        Ok(())
    }
}

impl<'a, W: Write> Renderer<&'a VirtualPosting<'_>, W> for BasicRenderer {
    type Error = BasicRendererError;
    fn render(&self, posting: &'a VirtualPosting<'_>, w: &mut W) -> Result<(), Self::Error> {
        writeln!(
            w,
            "    [{}]  $ {}",
            posting.partner_account(),
            round_cents(posting.value)
        )?;
        Ok(())
    }
}

impl<'a, W: Write> Renderer<&'a UnannotatedReport<'_, '_>, W> for BasicRenderer {
    type Error = BasicRendererError;
    fn render(&self, report: &'a UnannotatedReport<'_, '_>, w: &mut W) -> Result<(), Self::Error> {
        let lines = report
            .source
            .lines
            .iter()
            .map(|line| line.to_string())
            .collect::<Vec<_>>();
        writeln!(
            w,
            "Error: Found {} transactions in {} that do not have {} tags; see lines: {}",
            lines.len(),
            report.source.source,
            report.tag,
            lines.join(", ")
        )?;
        Ok(())
    }
}
