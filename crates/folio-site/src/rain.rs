#![forbid(unsafe_code)]

//! Falling-glyph background effect.
//!
//! The effect is split in two:
//!
//! - [`RainState`]: pure animation state. One cursor per column, advanced by
//!   [`RainState::tick`], which returns the [`DrawOp`]s for that frame.
//! - [`Rain`]: the mountable component. It owns a `RainState`, tracks the
//!   drawing surface the host reported and declares its interval timer and
//!   resize listener only while the surface is usable.
//!
//! # Frame
//!
//! Each tick paints a translucent dark rectangle over the whole surface
//! (leaving fading trails instead of clearing), then for every column draws
//! one random glyph at the cursor with random brightness, advances the
//! cursor by a random step and, once the cursor is past the bottom edge,
//! respawns it above the top with a fixed probability. The probabilistic
//! respawn staggers the columns instead of resetting them in lockstep.
//!
//! # Failure Modes
//!
//! | Scenario | Behavior |
//! |----------|----------|
//! | Zero or non-finite surface size | Zero columns, ticks paint nothing |
//! | Resize shrinks the surface | Cursors beyond the new column count are dropped |
//! | Resize grows the surface | New columns spawn above the top |
//! | Host cannot acquire a 2D context | Empty panel, no timer, no listener |

use core::time::Duration;

use folio_core::geometry::Size;
use folio_core::rng::Lcg;
use folio_core::view::Element;
use folio_core::{Event, SubId};
use folio_runtime::{Cmd, Listener, Sub, SubIds};
use serde::{Deserialize, Serialize};

use crate::app::{AppCmd, AppEffect};

/// Glyphs drawn by the effect.
pub const GLYPHS: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789@#$%^&*(){}[]<>/+=~`|\\";

/// Smallest glyph cell a configuration may ask for, in CSS pixels.
pub const MIN_CELL_SIZE: f64 = 4.0;

/// Upper bound on live columns regardless of surface width or cell size.
pub const MAX_COLUMNS: usize = 4096;

/// Tuning for the effect. Distances are in glyph cells unless noted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RainConfig {
    /// Glyph cell edge in CSS pixels; also the font size.
    pub cell_size: f64,
    /// Milliseconds between frames.
    pub tick_ms: u64,
    /// Opacity of the per-frame fade rectangle.
    pub fade_alpha: f64,
    pub min_alpha: f64,
    pub max_alpha: f64,
    /// Smallest per-frame cursor advance.
    pub min_step: f64,
    /// Largest per-frame cursor advance.
    pub max_step: f64,
    /// Per-frame probability that a cursor past the bottom respawns.
    pub respawn_chance: f64,
    /// How far above the top a cursor may spawn.
    pub spawn_depth: f64,
    /// Fixed seed. When absent the host supplies one.
    pub seed: Option<u64>,
}

impl Default for RainConfig {
    fn default() -> Self {
        Self {
            cell_size: 14.0,
            tick_ms: 35,
            fade_alpha: 0.04,
            min_alpha: 0.2,
            max_alpha: 1.0,
            min_step: 0.8,
            max_step: 1.2,
            respawn_chance: 0.025,
            spawn_depth: 24.0,
            seed: None,
        }
    }
}

impl RainConfig {
    /// Interval between frames.
    pub fn tick(&self) -> Duration {
        Duration::from_millis(self.tick_ms.max(1))
    }
}

/// One canvas drawing operation. Coordinates are CSS pixels.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    /// Fill the whole surface with black at `alpha`.
    Fade {
        width: f64,
        height: f64,
        alpha: f64,
    },
    /// Draw `glyph` in green at `alpha`, baseline at `(x, y)`, `size` px font.
    Glyph {
        glyph: char,
        x: f64,
        y: f64,
        size: f64,
        alpha: f64,
    },
}

/// Number of whole glyph columns that fit in `width`.
///
/// Zero for empty, negative or non-finite inputs.
pub fn column_count(width: f64, cell_size: f64) -> usize {
    if !(width.is_finite() && cell_size.is_finite()) || width <= 0.0 || cell_size <= 0.0 {
        return 0;
    }
    (width / cell_size).floor() as usize
}

/// Animation state: one cursor per column, in cells from the top.
#[derive(Debug, Clone)]
pub struct RainState {
    config: RainConfig,
    rng: Lcg,
    size: Size,
    drops: Vec<f64>,
    frame: u64,
}

impl RainState {
    /// Create an empty state. Columns appear on the first [`resize`](Self::resize).
    pub fn new(config: RainConfig, seed: u64) -> Self {
        Self {
            config,
            rng: Lcg::new(seed),
            size: Size::ZERO,
            drops: Vec::new(),
            frame: 0,
        }
    }

    /// Adopt a new surface size.
    ///
    /// Surviving columns keep their cursors; extra cursors are dropped and
    /// new columns spawn above the top. At most [`MAX_COLUMNS`] are kept.
    pub fn resize(&mut self, size: Size) {
        self.size = size;
        let columns = if size.is_empty() {
            0
        } else {
            column_count(size.width, self.config.cell_size).min(MAX_COLUMNS)
        };
        if columns < self.drops.len() {
            self.drops.truncate(columns);
        } else {
            while self.drops.len() < columns {
                let offset = self.spawn_offset();
                self.drops.push(offset);
            }
        }
        tracing::trace!(width = size.width, height = size.height, columns, "rain resized");
    }

    /// Advance one frame and return what to paint.
    pub fn tick(&mut self) -> Vec<DrawOp> {
        if self.size.is_empty() {
            return Vec::new();
        }
        self.frame = self.frame.wrapping_add(1);
        let cell = self.config.cell_size;
        let height = self.size.height;

        let mut ops = Vec::with_capacity(self.drops.len() + 1);
        ops.push(DrawOp::Fade {
            width: self.size.width,
            height,
            alpha: self.config.fade_alpha,
        });

        for i in 0..self.drops.len() {
            let glyph = char::from(GLYPHS[self.rng.index(GLYPHS.len())]);
            let alpha = self
                .rng
                .range_f64(self.config.min_alpha, self.config.max_alpha);
            ops.push(DrawOp::Glyph {
                glyph,
                x: i as f64 * cell,
                y: self.drops[i] * cell,
                size: cell,
                alpha,
            });

            self.drops[i] += self.rng.range_f64(self.config.min_step, self.config.max_step);
            if self.drops[i] * cell > height && self.rng.chance(self.config.respawn_chance) {
                self.drops[i] = self.spawn_offset();
            }
        }
        ops
    }

    fn spawn_offset(&mut self) -> f64 {
        -self.rng.range_f64(0.0, self.config.spawn_depth)
    }

    /// Current surface size.
    pub fn size(&self) -> Size {
        self.size
    }

    /// Per-column cursors, in cells from the top.
    pub fn drops(&self) -> &[f64] {
        &self.drops
    }

    /// Number of columns.
    pub fn columns(&self) -> usize {
        self.drops.len()
    }

    /// Frames ticked so far.
    pub fn frame(&self) -> u64 {
        self.frame
    }
}

/// What the component knows about its drawing surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Surface {
    /// Mounted, waiting for the host to measure the canvas.
    Pending,
    /// The host has a 2D context and reported the size.
    Active,
    /// The host could not acquire a 2D context.
    Lost,
}

/// Mountable background component.
#[derive(Debug)]
pub struct Rain {
    state: RainState,
    surface: Surface,
    timer: SubId,
    resize: SubId,
    tick: Duration,
}

impl Rain {
    /// Create the component and ask the host to measure its surface.
    pub fn mount(config: &RainConfig, seed: u64, ids: &mut SubIds) -> (Self, AppCmd) {
        let rain = Self {
            state: RainState::new(config.clone(), seed),
            surface: Surface::Pending,
            timer: ids.next_id(),
            resize: ids.next_id(),
            tick: config.tick(),
        };
        tracing::debug!(timer = rain.timer, resize = rain.resize, "rain mounted");
        (rain, Cmd::effect(AppEffect::MeasureSurface))
    }

    /// React to a host event. Events that are not for this component are
    /// ignored.
    pub fn handle(&mut self, event: &Event) -> AppCmd {
        match event {
            Event::SurfaceMeasured { width, height } if self.surface != Surface::Lost => {
                self.surface = Surface::Active;
                self.state.resize(Size::new(*width, *height));
                Cmd::none()
            }
            Event::SurfaceLost => {
                if self.surface != Surface::Lost {
                    tracing::debug!("rain surface unavailable; rendering empty panel");
                }
                self.surface = Surface::Lost;
                Cmd::none()
            }
            Event::Resize { .. } if self.surface == Surface::Active => {
                Cmd::effect(AppEffect::MeasureSurface)
            }
            Event::Timer(id) if *id == self.timer && self.surface == Surface::Active => {
                let ops = self.state.tick();
                if ops.is_empty() {
                    Cmd::none()
                } else {
                    Cmd::effect(AppEffect::Paint(ops))
                }
            }
            _ => Cmd::none(),
        }
    }

    /// Timer and resize listener, only while the surface is active.
    pub fn subscriptions(&self) -> Vec<Sub> {
        if self.surface != Surface::Active {
            return Vec::new();
        }
        vec![
            Sub::every(self.timer, self.tick),
            Sub::listen(self.resize, Listener::Resize),
        ]
    }

    /// Canvas panel, or an empty panel once the surface is lost.
    pub fn view(&self) -> Element {
        let panel = Element::new("div").class(match self.surface {
            Surface::Lost => "rain-panel rain-panel--empty",
            _ => "rain-panel",
        });
        match self.surface {
            Surface::Lost => panel,
            _ => panel.child(
                Element::new("canvas")
                    .attr("data-fx", "rain")
                    .attr("aria-hidden", "true"),
            ),
        }
    }

    pub fn surface(&self) -> Surface {
        self.surface
    }

    pub fn state(&self) -> &RainState {
        &self.state
    }

    /// Id of the frame timer.
    pub fn timer_id(&self) -> SubId {
        self.timer
    }
}
