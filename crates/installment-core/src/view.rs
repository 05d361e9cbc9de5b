//! View-layer scroll preservation.

use std::future::Future;

/// A scrollable list view.
pub trait Viewport: Send + Sync {
    fn scroll_offset(&self) -> usize;

    fn restore_scroll(&self, offset: usize);
}

/// A view that does not scroll.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedViewport;

impl Viewport for FixedViewport {
    fn scroll_offset(&self) -> usize {
        0
    }

    fn restore_scroll(&self, _offset: usize) {}
}

/// Runs `operation` and puts the viewport back where it was before.
///
/// The offset is captured before the operation starts and restored after it
/// completes, i.e. after the operation has written its rows.
pub async fn preserve_scroll<V, F>(viewport: &V, operation: F) -> F::Output
where
    V: Viewport + ?Sized,
    F: Future,
{
    let offset = viewport.scroll_offset();
    let output = operation.await;
    viewport.restore_scroll(offset);
    output
}
