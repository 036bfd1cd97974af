//! Database models
//!
//! Entities follow the `Entity` / `EntityCreate` / `EntityUpdate` convention.
//! Record ids serialize to the wire as `"table:id"` strings; references to
//! other records are stored as those strings.

pub mod serde_thing;

mod cart;
mod category;
mod coupon;
mod order;
mod product;
mod review;
mod settings;
mod size_chart;
mod user;
mod wishlist;

pub use cart::{CartItem, CartItemCreate, CartItemUpdate, CartMergeRequest};
pub use category::{
    Category, CategoryCreate, CategoryUpdate, ProductType, ProductTypeCreate, ProductTypeUpdate,
};
pub use coupon::{Coupon, CouponCreate, CouponUpdate, CouponValidateRequest, DiscountType};
pub use order::{
    Address, Order, OrderItem, OrderStatus, OrderStatusUpdate, PaymentMethod, ShippingInfo,
};
pub use product::{
    Product, ProductCreate, ProductId, ProductImage, ProductUpdate, Size, SizeStock,
    normalize_primary_image,
};
pub use review::{Review, ReviewCreate, ReviewUpdate};
pub use settings::{StoreSettings, StoreSettingsUpdate};
pub use size_chart::{SizeChart, SizeChartCreate, SizeChartUpdate};
pub use user::{AuthResponse, LoginRequest, RegisterRequest, Role, User, UserPublic};
pub use wishlist::WishlistItem;
