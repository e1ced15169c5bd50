//! Renderable artists: the shared `Artist` contract, its two concrete kinds
//! and the closed `AnyArtist` variant used by the orchestration layer.

mod config;
mod events;
mod histogram2d;
mod scatter;

pub use config::{Histogram2DConfig, MarkerSize, ScatterConfig};
pub use events::{ArtistCallback, ArtistEvent, ArtistEventKind, EventBus, SubscriptionId};
pub use histogram2d::Histogram2D;
pub use scatter::Scatter;

use crate::core::{ColorIndexUpdate, ColorIndices, ColorWarning, DataPoint};
use crate::error::PlotResult;

/// Capability contract shared by every artist.
pub trait Artist {
    /// Current point set; empty until the first non-empty `set_data`.
    fn data(&self) -> &[DataPoint];

    /// Replaces the point set and recomputes derived state.
    ///
    /// An empty input is ignored so transient empty updates from collaborators
    /// leave the plot untouched.
    fn set_data(&mut self, points: Vec<DataPoint>) -> PlotResult<()>;

    fn visible(&self) -> bool;

    /// Shows or hides the artist without discarding any state.
    fn set_visible(&mut self, visible: bool) -> PlotResult<()>;

    /// Per-point tags, always as long as `data()`.
    fn color_indices(&self) -> &ColorIndices;

    /// Replaces the tags (scalar broadcast or per-point array) and recolors.
    fn set_color_indices(&mut self, update: ColorIndexUpdate) -> PlotResult<()>;

    /// Requests a repaint. Never mutates artist state.
    fn draw(&mut self);

    fn subscribe(&mut self, kind: ArtistEventKind, callback: ArtistCallback) -> SubscriptionId;

    fn unsubscribe(&mut self, id: SubscriptionId) -> bool;

    /// Warnings raised by the most recent coloring pass.
    fn last_warnings(&self) -> &[ColorWarning];
}

/// Closed set of artist kinds.
#[derive(Debug)]
pub enum AnyArtist {
    Scatter(Scatter),
    Histogram2D(Histogram2D),
}

impl AnyArtist {
    #[must_use]
    pub fn as_scatter(&self) -> Option<&Scatter> {
        match self {
            Self::Scatter(scatter) => Some(scatter),
            Self::Histogram2D(_) => None,
        }
    }

    #[must_use]
    pub fn as_scatter_mut(&mut self) -> Option<&mut Scatter> {
        match self {
            Self::Scatter(scatter) => Some(scatter),
            Self::Histogram2D(_) => None,
        }
    }

    #[must_use]
    pub fn as_histogram(&self) -> Option<&Histogram2D> {
        match self {
            Self::Histogram2D(histogram) => Some(histogram),
            Self::Scatter(_) => None,
        }
    }

    #[must_use]
    pub fn as_histogram_mut(&mut self) -> Option<&mut Histogram2D> {
        match self {
            Self::Histogram2D(histogram) => Some(histogram),
            Self::Scatter(_) => None,
        }
    }

    fn inner(&self) -> &dyn Artist {
        match self {
            Self::Scatter(scatter) => scatter,
            Self::Histogram2D(histogram) => histogram,
        }
    }

    fn inner_mut(&mut self) -> &mut dyn Artist {
        match self {
            Self::Scatter(scatter) => scatter,
            Self::Histogram2D(histogram) => histogram,
        }
    }
}

impl From<Scatter> for AnyArtist {
    fn from(scatter: Scatter) -> Self {
        Self::Scatter(scatter)
    }
}

impl From<Histogram2D> for AnyArtist {
    fn from(histogram: Histogram2D) -> Self {
        Self::Histogram2D(histogram)
    }
}

impl Artist for AnyArtist {
    fn data(&self) -> &[DataPoint] {
        self.inner().data()
    }

    fn set_data(&mut self, points: Vec<DataPoint>) -> PlotResult<()> {
        self.inner_mut().set_data(points)
    }

    fn visible(&self) -> bool {
        self.inner().visible()
    }

    fn set_visible(&mut self, visible: bool) -> PlotResult<()> {
        self.inner_mut().set_visible(visible)
    }

    fn color_indices(&self) -> &ColorIndices {
        self.inner().color_indices()
    }

    fn set_color_indices(&mut self, update: ColorIndexUpdate) -> PlotResult<()> {
        self.inner_mut().set_color_indices(update)
    }

    fn draw(&mut self) {
        self.inner_mut().draw();
    }

    fn subscribe(&mut self, kind: ArtistEventKind, callback: ArtistCallback) -> SubscriptionId {
        self.inner_mut().subscribe(kind, callback)
    }

    fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.inner_mut().unsubscribe(id)
    }

    fn last_warnings(&self) -> &[ColorWarning] {
        self.inner().last_warnings()
    }
}
