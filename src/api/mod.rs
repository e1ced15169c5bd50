//! Orchestration of one plot: artist registry with a single active artist,
//! selector registry, and class assignment from selections.

mod artist_registry;
mod canvas_widget;
mod selector_registry;
mod widget_config;

use std::cell::RefCell;
use std::rc::Rc;

pub use canvas_widget::{ArtistChangedCallback, ArtistType, CanvasWidget};
pub use widget_config::CanvasWidgetConfig;

pub use crate::selectors::SelectorType;

use crate::selectors::Selector;

/// Selector shared between the widget and the artist callbacks feeding it.
pub type SharedSelector = Rc<RefCell<dyn Selector>>;
