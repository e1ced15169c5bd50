use std::rc::Rc;

use tracing::debug;

use crate::artists::{AnyArtist, Artist, ArtistEvent, ArtistEventKind};
use crate::error::{PlotError, PlotResult};

use super::{ArtistType, CanvasWidget, SharedSelector};

impl CanvasWidget {
    /// Registers an artist under a unique type and wires its data-changed
    /// notification to every registered selector.
    pub fn add_artist(
        &mut self,
        kind: ArtistType,
        artist: impl Into<AnyArtist>,
        visible: bool,
    ) -> PlotResult<()> {
        if self.artists.contains_key(&kind) {
            return Err(PlotError::InvalidData(format!(
                "artist `{kind}` already exists"
            )));
        }
        let mut artist = artist.into();
        artist.set_visible(visible)?;
        for selector in self.selectors.values() {
            forward_data_changes(&mut artist, selector);
        }
        self.artists.insert(kind, artist);
        Ok(())
    }

    #[must_use]
    pub fn artist(&self, kind: ArtistType) -> Option<&AnyArtist> {
        self.artists.get(&kind)
    }

    #[must_use]
    pub fn artist_mut(&mut self, kind: ArtistType) -> Option<&mut AnyArtist> {
        self.artists.get_mut(&kind)
    }

    #[must_use]
    pub fn artist_count(&self) -> usize {
        self.artists.len()
    }

    #[must_use]
    pub fn active_artist_type(&self) -> Option<ArtistType> {
        self.active_artist
    }

    #[must_use]
    pub fn active_artist(&self) -> Option<&AnyArtist> {
        self.active_artist.and_then(|kind| self.artists.get(&kind))
    }

    #[must_use]
    pub fn active_artist_mut(&mut self) -> Option<&mut AnyArtist> {
        let kind = self.active_artist?;
        self.artists.get_mut(&kind)
    }

    /// Makes `kind` the only visible artist and notifies observers.
    pub fn set_active_artist(&mut self, kind: ArtistType) -> PlotResult<()> {
        if !self.artists.contains_key(&kind) {
            return Err(PlotError::InvalidData(format!(
                "artist `{kind}` is not registered"
            )));
        }
        for (entry, artist) in &mut self.artists {
            artist.set_visible(*entry == kind)?;
        }
        self.active_artist = Some(kind);
        debug!(artist = %kind, "active artist changed");
        for callback in &mut self.artist_changed {
            callback(kind);
        }
        Ok(())
    }
}

pub(super) fn forward_data_changes(artist: &mut AnyArtist, selector: &SharedSelector) {
    let selector = Rc::clone(selector);
    artist.subscribe(
        ArtistEventKind::DataChanged,
        Box::new(move |event: &ArtistEvent<'_>| {
            if let ArtistEvent::DataChanged(points) = event {
                selector.borrow_mut().update_data(points);
            }
        }),
    );
}
