#![forbid(unsafe_code)]

//! Decorative canvas: measurement and `DrawOp` replay.

use folio_core::Event;
use folio_site::DrawOp;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, Element, HtmlCanvasElement};

const SELECTOR: &str = "canvas[data-fx=\"rain\"]";

/// The 2D context of the currently mounted rain canvas, if any.
#[derive(Default)]
pub(crate) struct Surface {
    context: Option<CanvasRenderingContext2d>,
}

impl Surface {
    /// Size the canvas backing store to its layout box and grab a context.
    ///
    /// Answers with `SurfaceLost` when there is no canvas under `root` or the
    /// browser refuses a 2D context.
    pub(crate) fn measure(&mut self, root: &Element) -> Event {
        self.context = None;
        let canvas = root
            .query_selector(SELECTOR)
            .ok()
            .flatten()
            .and_then(|el| el.dyn_into::<HtmlCanvasElement>().ok());
        let Some(canvas) = canvas else {
            tracing::debug!("no rain canvas mounted");
            return Event::SurfaceLost;
        };

        let width = f64::from(canvas.client_width().max(0));
        let height = f64::from(canvas.client_height().max(0));
        canvas.set_width(width as u32);
        canvas.set_height(height as u32);

        let context = canvas
            .get_context("2d")
            .ok()
            .flatten()
            .and_then(|ctx| ctx.dyn_into::<CanvasRenderingContext2d>().ok());
        match context {
            Some(context) => {
                self.context = Some(context);
                Event::SurfaceMeasured { width, height }
            }
            None => {
                tracing::warn!("2d context unavailable; background disabled");
                Event::SurfaceLost
            }
        }
    }

    pub(crate) fn paint(&self, ops: &[DrawOp]) {
        let Some(ctx) = &self.context else {
            return;
        };
        for op in ops {
            match *op {
                DrawOp::Fade {
                    width,
                    height,
                    alpha,
                } => {
                    ctx.set_fill_style_str(&format!("rgba(0, 0, 0, {alpha})"));
                    ctx.fill_rect(0.0, 0.0, width, height);
                }
                DrawOp::Glyph {
                    glyph,
                    x,
                    y,
                    size,
                    alpha,
                } => {
                    ctx.set_fill_style_str(&format!("rgba(0, 255, 0, {alpha})"));
                    ctx.set_font(&format!("{size}px monospace"));
                    let mut buf = [0u8; 4];
                    let _ = ctx.fill_text(glyph.encode_utf8(&mut buf), x, y);
                }
            }
        }
    }
}
