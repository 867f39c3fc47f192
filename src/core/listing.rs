/// A single marketplace listing.
///
/// The presenters only care whether a result set is empty; the fields are for display.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Listing {
    pub id: String,
    pub title: String,
    pub category_id: String,
    pub price_display: Option<String>,
    pub region: Option<String>,
}

impl Listing {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            ..Default::default()
        }
    }

    /// One-line summary used by list renderers: title, then price and region when known.
    pub fn summary(&self) -> String {
        let mut line = self.title.clone();
        if let Some(price) = &self.price_display {
            line.push_str(" · ");
            line.push_str(price);
        }
        if let Some(region) = &self.region {
            line.push_str(" · ");
            line.push_str(region);
        }
        line
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_title_only() {
        let listing = Listing::new("1", "Toaster");
        assert_eq!(listing.summary(), "Toaster");
    }

    #[test]
    fn test_summary_with_price_and_region() {
        let listing = Listing {
            price_display: Some("$20.00".into()),
            region: Some("Wellington".into()),
            ..Listing::new("1", "Toaster")
        };
        assert_eq!(listing.summary(), "Toaster · $20.00 · Wellington");
    }
}
