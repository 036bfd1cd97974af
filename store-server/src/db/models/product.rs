//! Product Model

use super::serde_thing;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use surrealdb::sql::Thing;

pub type ProductId = Thing;

/// Garment size
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Size {
    #[serde(rename = "XS")]
    Xs,
    #[serde(rename = "S")]
    S,
    #[serde(rename = "M")]
    M,
    #[serde(rename = "L")]
    L,
    #[serde(rename = "XL")]
    Xl,
    #[serde(rename = "XXL")]
    Xxl,
}

impl Size {
    /// All sizes in display order
    pub const ALL: [Size; 6] = [Size::Xs, Size::S, Size::M, Size::L, Size::Xl, Size::Xxl];

    /// Wire label, e.g. "XL"
    pub fn label(&self) -> &'static str {
        match self {
            Size::Xs => "XS",
            Size::S => "S",
            Size::M => "M",
            Size::L => "L",
            Size::Xl => "XL",
            Size::Xxl => "XXL",
        }
    }

    /// Field name inside `size_stock`, e.g. "xl"
    ///
    /// Static strings only: these are interpolated into query text for the
    /// conditional stock decrement, so they must never carry user input.
    pub fn field(&self) -> &'static str {
        match self {
            Size::Xs => "xs",
            Size::S => "s",
            Size::M => "m",
            Size::L => "l",
            Size::Xl => "xl",
            Size::Xxl => "xxl",
        }
    }
}

impl FromStr for Size {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "XS" => Ok(Size::Xs),
            "S" => Ok(Size::S),
            "M" => Ok(Size::M),
            "L" => Ok(Size::L),
            "XL" => Ok(Size::Xl),
            "XXL" => Ok(Size::Xxl),
            _ => Err(()),
        }
    }
}

impl fmt::Display for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Per-size stock counts
///
/// Counts never go negative: the order path uses a conditional decrement
/// that fails instead of underflowing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SizeStock {
    #[serde(default)]
    pub xs: i64,
    #[serde(default)]
    pub s: i64,
    #[serde(default)]
    pub m: i64,
    #[serde(default)]
    pub l: i64,
    #[serde(default)]
    pub xl: i64,
    #[serde(default)]
    pub xxl: i64,
}

impl SizeStock {
    /// Stock count for one size
    pub fn get(&self, size: Size) -> i64 {
        match size {
            Size::Xs => self.xs,
            Size::S => self.s,
            Size::M => self.m,
            Size::L => self.l,
            Size::Xl => self.xl,
            Size::Xxl => self.xxl,
        }
    }

    /// Total units across all sizes
    pub fn total(&self) -> i64 {
        Size::ALL.iter().map(|s| self.get(*s)).sum()
    }
}

/// Product image reference
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductImage {
    pub url: String,
    #[serde(default)]
    pub is_primary: bool,
    #[serde(default)]
    pub position: i32,
}

/// Product entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "serde_thing::option"
    )]
    pub id: Option<ProductId>,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Selling price in whole currency units
    pub price: i64,
    /// Maximum retail price (strike-through display)
    pub mrp: i64,
    /// Category reference ("category:<id>")
    pub category: String,
    /// Product type reference ("product_type:<id>")
    #[serde(default)]
    pub product_type: Option<String>,
    #[serde(default)]
    pub size_stock: SizeStock,
    #[serde(default)]
    pub images: Vec<ProductImage>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub custom_tags: Vec<String>,
    /// "men" | "women" | "unisex"
    #[serde(default = "default_gender")]
    pub gender: String,
    /// Size chart reference ("size_chart:<id>")
    #[serde(default)]
    pub size_chart: Option<String>,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub created_at: i64,
    #[serde(default)]
    pub updated_at: i64,
}

fn default_true() -> bool {
    true
}

fn default_gender() -> String {
    "unisex".to_string()
}

/// Keep at most one primary image, preferring the first one flagged
pub fn normalize_primary_image(images: &mut [ProductImage]) {
    let mut seen_primary = false;
    for image in images.iter_mut() {
        if image.is_primary {
            if seen_primary {
                image.is_primary = false;
            }
            seen_primary = true;
        }
    }
}

/// Create product payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductCreate {
    pub name: String,
    pub description: Option<String>,
    pub price: i64,
    pub mrp: Option<i64>,
    pub category: String,
    pub product_type: Option<String>,
    pub size_stock: Option<SizeStock>,
    pub images: Option<Vec<ProductImage>>,
    pub tags: Option<Vec<String>>,
    pub custom_tags: Option<Vec<String>>,
    pub gender: Option<String>,
    pub size_chart: Option<String>,
}

/// Update product payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<i64>,
    pub mrp: Option<i64>,
    pub category: Option<String>,
    pub product_type: Option<String>,
    pub size_stock: Option<SizeStock>,
    pub images: Option<Vec<ProductImage>>,
    pub tags: Option<Vec<String>>,
    pub custom_tags: Option<Vec<String>>,
    pub gender: Option<String>,
    pub size_chart: Option<String>,
    pub is_active: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_size_parse_and_label() {
        assert_eq!("xl".parse::<Size>(), Ok(Size::Xl));
        assert_eq!("XXL".parse::<Size>(), Ok(Size::Xxl));
        assert!("XXXL".parse::<Size>().is_err());
        assert_eq!(Size::M.label(), "M");
        assert_eq!(Size::Xxl.field(), "xxl");
    }

    #[test]
    fn test_size_stock_lookup() {
        let stock = SizeStock {
            m: 4,
            xl: 2,
            ..Default::default()
        };
        assert_eq!(stock.get(Size::M), 4);
        assert_eq!(stock.get(Size::Xl), 2);
        assert_eq!(stock.get(Size::S), 0);
        assert_eq!(stock.total(), 6);
    }

    #[test]
    fn test_normalize_primary_keeps_first() {
        let mut images = vec![
            ProductImage {
                url: "a.jpg".into(),
                is_primary: true,
                position: 0,
            },
            ProductImage {
                url: "b.jpg".into(),
                is_primary: true,
                position: 1,
            },
        ];
        normalize_primary_image(&mut images);
        assert!(images[0].is_primary);
        assert!(!images[1].is_primary);
    }
}
