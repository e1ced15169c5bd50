use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::artists::{AnyArtist, Histogram2D, Scatter};
use crate::core::ColorMapping;
use crate::error::PlotResult;
use crate::render::SharedCanvas;
use crate::selectors::{SelectorType, ShapeSelector};

use super::widget_config::validate_class;
use super::{CanvasWidgetConfig, SharedSelector};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArtistType {
    Histogram2D,
    Scatter,
}

impl ArtistType {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Histogram2D => "histogram2d",
            Self::Scatter => "scatter",
        }
    }
}

impl fmt::Display for ArtistType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub type ArtistChangedCallback = Box<dyn FnMut(ArtistType)>;

/// Owns the artists of one plot, exactly one of them active, plus the
/// selection tools that follow their data.
///
/// Every artist's data-changed notification is forwarded to every selector.
/// A finished selection can be written back into the active artist's color
/// indices as the current class.
pub struct CanvasWidget {
    pub(super) canvas: SharedCanvas,
    pub(super) artists: IndexMap<ArtistType, AnyArtist>,
    pub(super) active_artist: Option<ArtistType>,
    pub(super) selectors: IndexMap<SelectorType, SharedSelector>,
    pub(super) class_colormap: ColorMapping,
    pub(super) current_class: i64,
    pub(super) artist_changed: Vec<ArtistChangedCallback>,
}

impl CanvasWidget {
    /// Builds the default setup: a scatter and a 2D histogram on `canvas`
    /// (histogram active) and lasso, ellipse and rectangle selectors.
    pub fn new(canvas: SharedCanvas, config: CanvasWidgetConfig) -> PlotResult<Self> {
        config.validate()?;
        let class_colormap = ColorMapping::try_from(&config.class_colormap)?;
        let mut widget = Self {
            canvas: Rc::clone(&canvas),
            artists: IndexMap::new(),
            active_artist: None,
            selectors: IndexMap::new(),
            class_colormap,
            current_class: config.initial_class,
            artist_changed: Vec::new(),
        };

        let scatter = Scatter::new(Rc::clone(&canvas), config.scatter)?;
        let histogram = Histogram2D::new(canvas, config.histogram)?;
        widget.add_artist(ArtistType::Scatter, scatter, false)?;
        widget.add_artist(ArtistType::Histogram2D, histogram, false)?;
        widget.set_active_artist(ArtistType::Histogram2D)?;

        for kind in SelectorType::ALL {
            widget.add_selector(kind, Rc::new(RefCell::new(ShapeSelector::new(kind))))?;
        }
        Ok(widget)
    }

    #[must_use]
    pub fn canvas(&self) -> &SharedCanvas {
        &self.canvas
    }

    #[must_use]
    pub fn class_colormap(&self) -> &ColorMapping {
        &self.class_colormap
    }

    /// Class written by `apply_selection`.
    #[must_use]
    pub fn current_class(&self) -> i64 {
        self.current_class
    }

    pub fn set_current_class(&mut self, class: i64) -> PlotResult<()> {
        validate_class(class, &self.class_colormap)?;
        self.current_class = class;
        Ok(())
    }

    /// Registers an observer of active-artist switches.
    pub fn on_artist_changed(&mut self, callback: ArtistChangedCallback) {
        self.artist_changed.push(callback);
    }
}

impl fmt::Debug for CanvasWidget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CanvasWidget")
            .field("artists", &self.artists)
            .field("active_artist", &self.active_artist)
            .field("selectors", &self.selectors.keys().collect::<Vec<_>>())
            .field("class_colormap", &self.class_colormap.name())
            .field("current_class", &self.current_class)
            .finish_non_exhaustive()
    }
}
