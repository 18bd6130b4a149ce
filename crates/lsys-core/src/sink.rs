#![forbid(unsafe_code)]

//! Render sinks: where emitted segments go.

use crate::turtle::Segment;

/// Receives segments as they are drawn.
pub trait RenderSink {
    fn segment(&mut self, segment: &Segment);
}

impl RenderSink for Vec<Segment> {
    fn segment(&mut self, segment: &Segment) {
        self.push(*segment);
    }
}

impl<S: RenderSink + ?Sized> RenderSink for &mut S {
    fn segment(&mut self, segment: &Segment) {
        (**self).segment(segment);
    }
}

/// Adapts a closure into a [`RenderSink`].
#[derive(Debug, Clone, Copy)]
pub struct FnSink<F>(pub F);

impl<F: FnMut(&Segment)> RenderSink for FnSink<F> {
    fn segment(&mut self, segment: &Segment) {
        (self.0)(segment);
    }
}

/// Discards segments; useful when only the turtle state matters.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl RenderSink for NullSink {
    fn segment(&mut self, _segment: &Segment) {}
}
