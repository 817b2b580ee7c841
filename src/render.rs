//! Per-pass timing for render functions.

use std::time::Instant;

/// Wrap a render function so each render pass is timed and logged.
///
/// Returns an instrumented render function: every call records the start,
/// runs the render synchronously, records the end, emits a debug event with
/// the component name and timing, and returns the output unchanged.
///
/// Render timings are log-only and never enter a [`MetricStore`]; named
/// start/end measurements are retained for later inspection, render passes
/// are ephemeral.
///
/// [`MetricStore`]: crate::MetricStore
///
/// # Example
///
/// ```rust
/// use perfmon::with_render_timing;
///
/// let mut render = with_render_timing("StatusBar", |text: &str| {
///     format!("<div>{}</div>", text)
/// });
/// let html = render("ready");
/// assert_eq!(html, "<div>ready</div>");
/// ```
pub fn with_render_timing<F, I, O>(
    component: impl Into<String>,
    mut render: F,
) -> impl FnMut(I) -> O
where
    F: FnMut(I) -> O,
{
    let component = component.into();
    let epoch = Instant::now();

    move |input: I| {
        let start_ms = epoch.elapsed().as_secs_f64() * 1000.0;
        let output = render(input);
        let end_ms = epoch.elapsed().as_secs_f64() * 1000.0;
        let duration_ms = end_ms - start_ms;

        tracing::debug!(
            target: "perfmon::render",
            component = %component,
            duration_ms,
            start_ms,
            end_ms,
            "render pass completed"
        );

        output
    }
}
