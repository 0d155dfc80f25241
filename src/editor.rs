use uuid::Uuid;

use crate::api::PlaceStore;
use crate::entities::{Coordinates, Place};
use crate::error::{invalid_state_error, Error};

/// Staging area for one place's editable fields during a screen visit. An
/// editor either carries the id of a previously saved place or stages a brand
/// new one.
#[derive(Clone, Debug, Default)]
pub struct PlaceEditor {
    id: Option<Uuid>,
    title: String,
    subtitle: String,
    staged: Option<Coordinates>,
}

impl PlaceEditor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copies a saved place's fields into the staging area and binds the
    /// editor to its id.
    pub fn load_existing(&mut self, place: &Place) {
        self.id = Some(place.id);
        self.title = place.title.clone();
        self.subtitle = place.subtitle.clone();
        self.staged = Some(place.coordinates);
    }

    /// Records a chosen coordinate pair. Overwrites any previously staged
    /// coordinate.
    pub fn stage_location(&mut self, coordinates: Coordinates) {
        self.staged = Some(coordinates);
    }

    pub fn set_fields(&mut self, title: &str, subtitle: &str) {
        self.title = title.into();
        self.subtitle = subtitle.into();
    }

    pub fn is_existing(&self) -> bool {
        self.id.is_some()
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn subtitle(&self) -> &str {
        &self.subtitle
    }

    pub fn staged_location(&self) -> Option<Coordinates> {
        self.staged
    }

    /// Commits the staged fields. With an id the stored record is updated in
    /// place; without one a freshly-identified record is inserted. Committing
    /// with no staged coordinate is an invalid state.
    #[tracing::instrument(skip_all)]
    pub async fn commit(&self, store: &dyn PlaceStore) -> Result<Place, Error> {
        let coordinates = self.staged.ok_or_else(invalid_state_error)?;

        match self.id {
            Some(id) => {
                let place = Place {
                    id,
                    title: self.title.clone(),
                    subtitle: self.subtitle.clone(),
                    coordinates,
                };
                store.update_place(&place).await?;
                Ok(place)
            }
            None => {
                let place = Place::new(self.title.clone(), self.subtitle.clone(), coordinates);
                store.insert_place(&place).await?;
                Ok(place)
            }
        }
    }
}
