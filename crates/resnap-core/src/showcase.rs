//! Rotating "featured items" strip shown next to the search form.

use serde::Serialize;

/// Number of cards shown at once; one more peeks in from the edge.
pub const VISIBLE_COUNT: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FeaturedItem {
    pub title: String,
    pub image: String,
    /// Price range text without the currency symbol, e.g. `"20-35"`.
    pub price: String,
    pub currency: String,
}

impl FeaturedItem {
    fn new(title: &str, image: &str, price: &str) -> Self {
        Self {
            title: title.to_owned(),
            image: image.to_owned(),
            price: price.to_owned(),
            currency: "USD".to_owned(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Showcase {
    items: Vec<FeaturedItem>,
    position: usize,
}

impl Showcase {
    #[must_use]
    pub fn new(items: Vec<FeaturedItem>) -> Self {
        Self { items, position: 0 }
    }

    /// Whether there are enough items to need rotating at all.
    #[must_use]
    pub fn rotates(&self) -> bool {
        self.items.len() > VISIBLE_COUNT
    }

    /// Moves one position forward, wrapping around. No-op when the whole
    /// list already fits on screen.
    pub fn advance(&mut self) {
        if self.rotates() {
            self.position = (self.position + 1) % self.items.len();
        }
    }

    #[must_use]
    pub fn position(&self) -> usize {
        self.position
    }

    #[must_use]
    pub fn current(&self) -> Option<&FeaturedItem> {
        self.items.get(self.position)
    }

    /// Cards currently on screen, including the one peeking in.
    #[must_use]
    pub fn visible(&self) -> Vec<&FeaturedItem> {
        let count = (VISIBLE_COUNT + 1).min(self.items.len());
        (0..count)
            .map(|i| &self.items[(self.position + i) % self.items.len()])
            .collect()
    }
}

impl Default for Showcase {
    fn default() -> Self {
        Self::new(vec![
            FeaturedItem::new(
                "Xbox One Wireless Controller",
                "./Images/Controller.webp",
                "20-35",
            ),
            FeaturedItem::new("Jansport Backpack (Used)", "./Images/Jansport.jpg", "15-35"),
            FeaturedItem::new(
                "Sony DualShock 4 Controller (Used)",
                "./Images/DS4.jpg",
                "20-35",
            ),
            FeaturedItem::new("IPhone SE (Used)", "./Images/IPhoneSE.jpg", "54.99-174.99"),
            FeaturedItem::new(
                "Sony Dualsense Cosmic Red Controller",
                "./Images/DS5.jpg",
                "40-55",
            ),
            FeaturedItem::new(
                "HP Color LaserJet CP 2025 Printer (Used)",
                "./Images/Printer.jpg",
                "150-250",
            ),
        ])
    }
}
