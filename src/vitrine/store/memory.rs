use super::CatalogSource;
use crate::error::Result;
use crate::model::Item;

/// In-memory catalog for testing and embedding.
#[derive(Default)]
pub struct InMemoryCatalog {
    items: Vec<Item>,
}

impl InMemoryCatalog {
    pub fn new(items: Vec<Item>) -> Self {
        Self { items }
    }
}

impl CatalogSource for InMemoryCatalog {
    fn items(&self) -> Result<Vec<Item>> {
        Ok(self.items.clone())
    }
}

// --- Test Fixtures ---

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use crate::model::{AttrValue, Item};
    use chrono::{Duration, Utc};

    /// Fluent item builder for tests. Defaults to an in-stock electronics
    /// item so most tests only set the fields they care about.
    pub struct ItemFixture {
        item: Item,
    }

    impl ItemFixture {
        pub fn named(name: &str) -> Self {
            let mut item = Item::new(
                name.to_string(),
                "Electronics".to_string(),
                "Acme".to_string(),
                500,
            );
            item.stock = 10;
            item.rating = 4.0;
            Self { item }
        }

        pub fn category(mut self, category: &str) -> Self {
            self.item.category = category.to_string();
            self
        }

        pub fn subcategory(mut self, subcategory: &str) -> Self {
            self.item.subcategory = subcategory.to_string();
            self
        }

        pub fn brand(mut self, brand: &str) -> Self {
            self.item.brand = brand.to_string();
            self
        }

        pub fn color(mut self, color: &str) -> Self {
            self.item.color = color.to_string();
            self
        }

        pub fn storage(mut self, storage: &str) -> Self {
            self.item.storage = Some(storage.to_string());
            self
        }

        pub fn price(mut self, price: u32) -> Self {
            self.item.our_price = price;
            self.item.mrp = price;
            self
        }

        pub fn rating(mut self, rating: f32) -> Self {
            self.item.rating = rating;
            self
        }

        pub fn stock(mut self, stock: u32) -> Self {
            self.item.stock = stock;
            self
        }

        pub fn description(mut self, description: &str) -> Self {
            self.item.description = description.to_string();
            self
        }

        pub fn tag(mut self, tag: &str) -> Self {
            self.item.tags.push(tag.to_string());
            self
        }

        pub fn attr(mut self, key: &str, value: &str) -> Self {
            self.item
                .attributes
                .insert(key.to_string(), AttrValue::Text(value.to_string()));
            self
        }

        pub fn attr_number(mut self, key: &str, value: f64) -> Self {
            self.item
                .attributes
                .insert(key.to_string(), AttrValue::Number(value));
            self
        }

        /// Shift creation time into the past, for `newest` sort tests.
        pub fn days_old(mut self, days: i64) -> Self {
            self.item.created_at = Utc::now() - Duration::days(days);
            self
        }

        pub fn build(self) -> Item {
            self.item
        }
    }
}
