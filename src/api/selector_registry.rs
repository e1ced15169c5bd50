use tracing::debug;

use crate::artists::Artist;
use crate::core::{ColorIndexUpdate, ColorValue};
use crate::error::{PlotError, PlotResult};
use crate::selectors::{SelectionShape, SelectorType};

use super::artist_registry::forward_data_changes;
use super::{CanvasWidget, SharedSelector};

impl CanvasWidget {
    /// Registers a selector under a unique type, wires every artist's
    /// data-changed notification to it and syncs it with the active data.
    pub fn add_selector(&mut self, kind: SelectorType, selector: SharedSelector) -> PlotResult<()> {
        if self.selectors.contains_key(&kind) {
            return Err(PlotError::InvalidData(format!(
                "selector `{kind}` already exists"
            )));
        }
        let actual = selector.borrow().kind();
        if actual != kind {
            return Err(PlotError::InvalidData(format!(
                "{actual} selector registered as `{kind}`"
            )));
        }
        for artist in self.artists.values_mut() {
            forward_data_changes(artist, &selector);
        }
        if let Some(artist) = self.active_artist() {
            selector.borrow_mut().update_data(artist.data());
        }
        self.selectors.insert(kind, selector);
        Ok(())
    }

    #[must_use]
    pub fn selector(&self, kind: SelectorType) -> Option<&SharedSelector> {
        self.selectors.get(&kind)
    }

    #[must_use]
    pub fn selector_count(&self) -> usize {
        self.selectors.len()
    }

    /// The selector currently enabled, if any.
    #[must_use]
    pub fn active_selector(&self) -> Option<SelectorType> {
        self.selectors
            .iter()
            .find(|(_, selector)| selector.borrow().is_enabled())
            .map(|(kind, _)| *kind)
    }

    /// Enables `kind` and disables every other selector, clearing all
    /// selections.
    pub fn enable_selector(&mut self, kind: SelectorType) -> PlotResult<()> {
        if !self.selectors.contains_key(&kind) {
            return Err(PlotError::InvalidData(format!(
                "selector `{kind}` is not registered"
            )));
        }
        for (entry, selector) in &self.selectors {
            let mut selector = selector.borrow_mut();
            selector.set_enabled(false);
            if *entry == kind {
                selector.set_enabled(true);
            }
        }
        debug!(selector = %kind, "selector enabled");
        Ok(())
    }

    /// Disables `kind` and clears its selection.
    pub fn disable_selector(&mut self, kind: SelectorType) -> PlotResult<()> {
        let selector = self.selectors.get(&kind).ok_or_else(|| {
            PlotError::InvalidData(format!("selector `{kind}` is not registered"))
        })?;
        selector.borrow_mut().set_enabled(false);
        Ok(())
    }

    /// Feeds a finished shape to the selector of the same kind.
    pub fn select(&mut self, shape: SelectionShape) -> PlotResult<Vec<usize>> {
        let kind = shape.selector_type();
        let selector = self.selectors.get(&kind).ok_or_else(|| {
            PlotError::InvalidData(format!("selector `{kind}` is not registered"))
        })?;
        let mut selector = selector.borrow_mut();
        Ok(selector.select(shape)?.to_vec())
    }

    /// Tags the points selected by the enabled selector with the current
    /// class on the active artist. Returns how many points were tagged.
    pub fn apply_selection(&mut self) -> PlotResult<usize> {
        let Some(kind) = self.active_selector() else {
            return Ok(0);
        };
        let selected = match self.selectors.get(&kind) {
            Some(selector) => selector.borrow().selected_indices().to_vec(),
            None => return Ok(0),
        };
        if selected.is_empty() {
            return Ok(0);
        }
        let class = ColorValue::Integer(self.current_class);
        let artist = self.active_artist_mut().ok_or_else(|| {
            PlotError::InvalidData("no active artist to apply the selection to".to_owned())
        })?;
        let indices = artist.color_indices().with_value_at(&selected, class)?;
        artist.set_color_indices(ColorIndexUpdate::PerPoint(indices))?;
        Ok(selected.len())
    }
}
