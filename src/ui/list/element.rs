use std::cmp::Ordering;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

use crate::api::Photo;
use crate::media::Image;

pub type ElementId = u64;

/// One photo's row in the list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Element {
    pub id: ElementId,
    pub title: String,
    pub photo_url: String,
    pub thumbnail_url: String,
    pub is_favourite: bool,
    pub album_id: u64,
}

impl From<Photo> for Element {
    fn from(photo: Photo) -> Self {
        Self {
            id: photo.id,
            title: photo.title,
            photo_url: photo.url,
            thumbnail_url: photo.thumbnail_url,
            is_favourite: false,
            album_id: photo.album_id,
        }
    }
}

/// Favourites first, then ascending id within each group.
pub fn favourite_order(a: &Element, b: &Element) -> Ordering {
    b.is_favourite
        .cmp(&a.is_favourite)
        .then_with(|| a.id.cmp(&b.id))
}

pub fn sort_by_favourites(elements: &mut [Element]) {
    elements.sort_by(favourite_order);
}

/// Thumbnail cache entry for one element.
///
/// Equality and hashing look at `id` only: a thumbnail is derived data
/// keyed by its element, not an entity of its own.
#[derive(Debug, Clone)]
pub struct Thumbnail {
    pub id: ElementId,
    /// `None` when loading failed and the placeholder should be shown.
    pub image: Option<Image>,
    pub size: Option<(u32, u32)>,
}

impl Thumbnail {
    pub fn new(id: ElementId, image: Option<Image>) -> Self {
        let size = image.as_ref().map(Image::size);
        Self { id, image, size }
    }
}

impl PartialEq for Thumbnail {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Thumbnail {}

impl Hash for Thumbnail {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}
