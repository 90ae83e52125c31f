//! Campus map with a whole-map tab and a pan/zoom detail tab.
//!
//! The detail image is transformed around its centre: a viewport `{x, y, scale}` draws the
//! point `p` (measured from the image centre, unscaled) at `(x, y) + scale * p`.

pub const MIN_SCALE: f64 = 1.0;
pub const MAX_SCALE: f64 = 2.0;

pub const TITLE_KEY: &str = "map.title";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum MapTab {
    #[default]
    All,
    Detail,
}

impl MapTab {
    /// Translation key for the tab's toggle button.
    pub fn label_key(&self) -> &'static str {
        match self {
            MapTab::All => "map.complete",
            MapTab::Detail => "map.detail",
        }
    }
}

/// On-screen bounds of the detail image.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    // non-finite coordinates become 0 and sizes are never negative
    fn sanitized(self) -> Self {
        let finite = |v: f64| if v.is_finite() { v } else { 0.0 };
        Self {
            x: finite(self.x),
            y: finite(self.y),
            width: finite(self.width).max(0.0),
            height: finite(self.height).max(0.0),
        }
    }

    fn center(&self) -> (f64, f64) {
        (self.x + self.width / 2.0, self.y + self.height / 2.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub x: f64,
    pub y: f64,
    pub scale: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            scale: MIN_SCALE,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct PinchAnchor {
    start: Viewport,
    // pinch origin relative to the image centre
    dx: f64,
    dy: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct MapView {
    tab: MapTab,
    bounds: Rect,
    viewport: Viewport,
    pinch: Option<PinchAnchor>,
}

impl MapView {
    pub fn new(bounds: Rect) -> Self {
        Self {
            tab: MapTab::default(),
            bounds: bounds.sanitized(),
            viewport: Viewport::default(),
            pinch: None,
        }
    }

    pub fn tab(&self) -> MapTab {
        self.tab
    }

    pub fn select_tab(&mut self, tab: MapTab) {
        self.tab = tab;
        self.pinch = None;
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn resize(&mut self, bounds: Rect) {
        self.bounds = bounds.sanitized();
        self.viewport = self.clamped(self.viewport);
    }

    /// Largest pan in each direction that keeps the zoomed image covering its box.
    /// Never negative, even for degenerate bounds.
    pub fn pan_limits(&self, scale: f64) -> (f64, f64) {
        let extra = (scale - 1.0).max(0.0) / 2.0;
        (
            (self.bounds.width * extra).max(0.0),
            (self.bounds.height * extra).max(0.0),
        )
    }

    fn clamped(&self, viewport: Viewport) -> Viewport {
        let scale = viewport.scale.clamp(MIN_SCALE, MAX_SCALE);
        let (max_x, max_y) = self.pan_limits(scale);
        Viewport {
            x: viewport.x.clamp(-max_x, max_x),
            y: viewport.y.clamp(-max_y, max_y),
            scale,
        }
    }

    /// Moves the image to the dragged offset, clamped to the zoomed bounds.
    pub fn drag_to(&mut self, x: f64, y: f64) {
        if self.tab != MapTab::Detail || self.pinch.is_some() || !(x.is_finite() && y.is_finite())
        {
            return;
        }
        self.viewport = self.clamped(Viewport {
            x,
            y,
            scale: self.viewport.scale,
        });
    }

    pub fn pinch_start(&mut self, origin_x: f64, origin_y: f64) {
        if self.tab != MapTab::Detail || !(origin_x.is_finite() && origin_y.is_finite()) {
            return;
        }
        let (cx, cy) = self.bounds.center();
        self.pinch = Some(PinchAnchor {
            start: self.viewport,
            dx: origin_x - cx,
            dy: origin_y - cy,
        });
    }

    /// `movement` is the scale factor since the pinch started. The point under the pinch
    /// origin stays put, unless the pan has to be clamped.
    pub fn pinch_update(&mut self, movement: f64) {
        let Some(anchor) = self.pinch else {
            return;
        };
        if !movement.is_finite() || movement <= 0.0 {
            return;
        }
        let start = anchor.start;
        let scale = (start.scale * movement).clamp(MIN_SCALE, MAX_SCALE);
        let ratio = scale / start.scale;
        self.viewport = self.clamped(Viewport {
            x: anchor.dx - ratio * (anchor.dx - start.x),
            y: anchor.dy - ratio * (anchor.dy - start.y),
            scale,
        });
    }

    pub fn pinch_end(&mut self) {
        self.pinch = None;
    }
}
