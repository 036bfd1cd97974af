//! Unified error codes for the storefront
//!
//! This module defines all error codes used across the store server and its
//! API consumers. Error codes are organized by category:
//! - 0xxx: General errors
//! - 1xxx: Authentication errors
//! - 2xxx: Permission errors
//! - 3xxx: Cart and stock errors
//! - 4xxx: Order errors
//! - 5xxx: Payment errors
//! - 6xxx: Catalog errors
//! - 7xxx: Coupon errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// All error codes are represented as u16 values for efficient serialization
/// and cross-language compatibility (Rust, TypeScript, etc.)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Operation completed successfully
    Success = 0,
    /// Unknown error
    Unknown = 1,
    /// Validation failed
    ValidationFailed = 2,
    /// Resource not found
    NotFound = 3,
    /// Resource already exists
    AlreadyExists = 4,
    /// Invalid request
    InvalidRequest = 5,
    /// Invalid format
    InvalidFormat = 6,
    /// Required field missing
    RequiredField = 7,
    /// Value out of range
    ValueOutOfRange = 8,

    // ==================== 1xxx: Auth ====================
    /// User is not authenticated
    NotAuthenticated = 1001,
    /// Invalid credentials (email/password)
    InvalidCredentials = 1002,
    /// Token has expired
    TokenExpired = 1003,
    /// Token is invalid
    TokenInvalid = 1004,
    /// Account is disabled
    AccountDisabled = 1005,
    /// Email is already registered
    EmailExists = 1006,
    /// Password does not meet minimum requirements
    PasswordTooShort = 1007,

    // ==================== 2xxx: Permission ====================
    /// Permission denied
    PermissionDenied = 2001,
    /// Admin role required
    AdminRequired = 2002,

    // ==================== 3xxx: Cart / Stock ====================
    /// Cart item not found
    CartItemNotFound = 3001,
    /// Not enough stock for the requested quantity
    InsufficientStock = 3002,
    /// Requested size is not stocked for this product
    SizeUnavailable = 3003,
    /// Cart is empty
    CartEmpty = 3004,

    // ==================== 4xxx: Order ====================
    /// Order not found
    OrderNotFound = 4001,
    /// Order has already been paid
    OrderAlreadyPaid = 4002,
    /// Order is not awaiting payment
    OrderNotPayable = 4003,
    /// Status transition is not allowed
    InvalidStatusTransition = 4004,
    /// Guest order rate limit exceeded
    GuestRateLimited = 4005,
    /// Order already has a shipping label
    OrderAlreadyShipped = 4006,

    // ==================== 5xxx: Payment ====================
    /// Payment processing failed
    PaymentFailed = 5001,
    /// Payment signature verification failed
    SignatureMismatch = 5002,
    /// Payment gateway request failed
    GatewayError = 5003,
    /// Payment not found at the gateway
    PaymentNotFound = 5004,
    /// Reward point balance does not cover the requested redemption
    PointsInsufficient = 5005,
    /// Reward points are not available for guest checkout
    PointsUnavailable = 5006,

    // ==================== 6xxx: Catalog ====================
    /// Product not found
    ProductNotFound = 6001,
    /// Product is inactive
    ProductInactive = 6002,
    /// Category not found
    CategoryNotFound = 6101,
    /// Category name already exists
    CategoryNameExists = 6102,
    /// Category has associated products
    CategoryHasProducts = 6103,
    /// Product type not found
    ProductTypeNotFound = 6201,
    /// Product type name already exists
    ProductTypeNameExists = 6202,
    /// Size chart not found
    SizeChartNotFound = 6301,
    /// Review not found
    ReviewNotFound = 6401,
    /// User has already reviewed this product
    ReviewExists = 6402,
    /// Product is not in the wishlist
    WishlistItemNotFound = 6501,

    // ==================== 7xxx: Coupon ====================
    /// Coupon not found
    CouponNotFound = 7001,
    /// Coupon is inactive
    CouponInactive = 7002,
    /// Coupon has expired
    CouponExpired = 7003,
    /// Cart subtotal is below the coupon minimum purchase
    CouponBelowMinimum = 7004,
    /// Coupon code already exists
    CouponCodeExists = 7005,

    // ==================== 9xxx: System ====================
    /// Internal server error
    InternalError = 9001,
    /// Database error
    DatabaseError = 9002,
    /// Network error
    NetworkError = 9003,
    /// Configuration error
    ConfigError = 9004,
    /// Server is shutting down
    ShuttingDown = 9005,
    /// Shipping partner request failed
    ShippingPartnerError = 9006,
}

impl ErrorCode {
    /// Get the numeric code value
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Check if this is a success code
    #[inline]
    pub const fn is_success(&self) -> bool {
        matches!(self, ErrorCode::Success)
    }

    /// Get the developer-facing English message for this error code
    pub const fn message(&self) -> &'static str {
        match self {
            // General
            ErrorCode::Success => "Operation completed successfully",
            ErrorCode::Unknown => "An unknown error occurred",
            ErrorCode::ValidationFailed => "Validation failed",
            ErrorCode::NotFound => "Resource not found",
            ErrorCode::AlreadyExists => "Resource already exists",
            ErrorCode::InvalidRequest => "Invalid request",
            ErrorCode::InvalidFormat => "Invalid format",
            ErrorCode::RequiredField => "Required field is missing",
            ErrorCode::ValueOutOfRange => "Value is out of range",

            // Auth
            ErrorCode::NotAuthenticated => "User is not authenticated",
            ErrorCode::InvalidCredentials => "Invalid email or password",
            ErrorCode::TokenExpired => "Authentication token has expired",
            ErrorCode::TokenInvalid => "Authentication token is invalid",
            ErrorCode::AccountDisabled => "Account is disabled",
            ErrorCode::EmailExists => "Email is already registered",
            ErrorCode::PasswordTooShort => "Password must be at least 8 characters",

            // Permission
            ErrorCode::PermissionDenied => "Permission denied",
            ErrorCode::AdminRequired => "Administrator role is required",

            // Cart / Stock
            ErrorCode::CartItemNotFound => "Cart item not found",
            ErrorCode::InsufficientStock => "Not enough stock for the requested quantity",
            ErrorCode::SizeUnavailable => "Requested size is not available for this product",
            ErrorCode::CartEmpty => "Cart is empty",

            // Order
            ErrorCode::OrderNotFound => "Order not found",
            ErrorCode::OrderAlreadyPaid => "Order has already been paid",
            ErrorCode::OrderNotPayable => "Order is not awaiting payment",
            ErrorCode::InvalidStatusTransition => "Status transition is not allowed",
            ErrorCode::GuestRateLimited => "Too many guest orders, please try again later",
            ErrorCode::OrderAlreadyShipped => "Order already has a shipping label",

            // Payment
            ErrorCode::PaymentFailed => "Payment processing failed",
            ErrorCode::SignatureMismatch => "Payment signature verification failed",
            ErrorCode::GatewayError => "Payment gateway request failed",
            ErrorCode::PaymentNotFound => "Payment not found",
            ErrorCode::PointsInsufficient => "Reward point balance is insufficient",
            ErrorCode::PointsUnavailable => "Reward points are not available for guest checkout",

            // Catalog
            ErrorCode::ProductNotFound => "Product not found",
            ErrorCode::ProductInactive => "Product is no longer available",
            ErrorCode::CategoryNotFound => "Category not found",
            ErrorCode::CategoryNameExists => "Category name already exists",
            ErrorCode::CategoryHasProducts => "Category has associated products",
            ErrorCode::ProductTypeNotFound => "Product type not found",
            ErrorCode::ProductTypeNameExists => "Product type name already exists",
            ErrorCode::SizeChartNotFound => "Size chart not found",
            ErrorCode::ReviewNotFound => "Review not found",
            ErrorCode::ReviewExists => "You have already reviewed this product",
            ErrorCode::WishlistItemNotFound => "Product is not in the wishlist",

            // Coupon
            ErrorCode::CouponNotFound => "Coupon not found",
            ErrorCode::CouponInactive => "Coupon is inactive",
            ErrorCode::CouponExpired => "Coupon has expired",
            ErrorCode::CouponBelowMinimum => "Cart subtotal is below the coupon minimum purchase",
            ErrorCode::CouponCodeExists => "Coupon code already exists",

            // System
            ErrorCode::InternalError => "Internal server error",
            ErrorCode::DatabaseError => "Database error",
            ErrorCode::NetworkError => "Network error",
            ErrorCode::ConfigError => "Configuration error",
            ErrorCode::ShuttingDown => "Server is shutting down",
            ErrorCode::ShippingPartnerError => "Shipping partner request failed",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.code(), self.message())
    }
}

impl From<ErrorCode> for u16 {
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error returned when converting an unknown u16 into an [`ErrorCode`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        let code = match value {
            0 => Self::Success,
            1 => Self::Unknown,
            2 => Self::ValidationFailed,
            3 => Self::NotFound,
            4 => Self::AlreadyExists,
            5 => Self::InvalidRequest,
            6 => Self::InvalidFormat,
            7 => Self::RequiredField,
            8 => Self::ValueOutOfRange,

            1001 => Self::NotAuthenticated,
            1002 => Self::InvalidCredentials,
            1003 => Self::TokenExpired,
            1004 => Self::TokenInvalid,
            1005 => Self::AccountDisabled,
            1006 => Self::EmailExists,
            1007 => Self::PasswordTooShort,

            2001 => Self::PermissionDenied,
            2002 => Self::AdminRequired,

            3001 => Self::CartItemNotFound,
            3002 => Self::InsufficientStock,
            3003 => Self::SizeUnavailable,
            3004 => Self::CartEmpty,

            4001 => Self::OrderNotFound,
            4002 => Self::OrderAlreadyPaid,
            4003 => Self::OrderNotPayable,
            4004 => Self::InvalidStatusTransition,
            4005 => Self::GuestRateLimited,
            4006 => Self::OrderAlreadyShipped,

            5001 => Self::PaymentFailed,
            5002 => Self::SignatureMismatch,
            5003 => Self::GatewayError,
            5004 => Self::PaymentNotFound,
            5005 => Self::PointsInsufficient,
            5006 => Self::PointsUnavailable,

            6001 => Self::ProductNotFound,
            6002 => Self::ProductInactive,
            6101 => Self::CategoryNotFound,
            6102 => Self::CategoryNameExists,
            6103 => Self::CategoryHasProducts,
            6201 => Self::ProductTypeNotFound,
            6202 => Self::ProductTypeNameExists,
            6301 => Self::SizeChartNotFound,
            6401 => Self::ReviewNotFound,
            6402 => Self::ReviewExists,
            6501 => Self::WishlistItemNotFound,

            7001 => Self::CouponNotFound,
            7002 => Self::CouponInactive,
            7003 => Self::CouponExpired,
            7004 => Self::CouponBelowMinimum,
            7005 => Self::CouponCodeExists,

            9001 => Self::InternalError,
            9002 => Self::DatabaseError,
            9003 => Self::NetworkError,
            9004 => Self::ConfigError,
            9005 => Self::ShuttingDown,
            9006 => Self::ShippingPartnerError,

            other => return Err(InvalidErrorCode(other)),
        };
        Ok(code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_values() {
        assert_eq!(ErrorCode::Success.code(), 0);
        assert_eq!(ErrorCode::NotAuthenticated.code(), 1001);
        assert_eq!(ErrorCode::InsufficientStock.code(), 3002);
        assert_eq!(ErrorCode::SignatureMismatch.code(), 5002);
        assert_eq!(ErrorCode::CouponExpired.code(), 7003);
        assert_eq!(ErrorCode::InternalError.code(), 9001);
    }

    #[test]
    fn test_roundtrip_u16() {
        for code in [
            ErrorCode::Success,
            ErrorCode::ValidationFailed,
            ErrorCode::EmailExists,
            ErrorCode::GuestRateLimited,
            ErrorCode::ProductNotFound,
            ErrorCode::CouponBelowMinimum,
            ErrorCode::ShuttingDown,
        ] {
            let value: u16 = code.into();
            assert_eq!(ErrorCode::try_from(value), Ok(code));
        }
    }

    #[test]
    fn test_unknown_code_rejected() {
        assert_eq!(ErrorCode::try_from(4242), Err(InvalidErrorCode(4242)));
    }

    #[test]
    fn test_serialize_as_number() {
        let json = serde_json::to_string(&ErrorCode::OrderNotFound).unwrap();
        assert_eq!(json, "4001");

        let code: ErrorCode = serde_json::from_str("6001").unwrap();
        assert_eq!(code, ErrorCode::ProductNotFound);
    }
}
