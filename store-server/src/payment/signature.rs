//! Gateway signature verification
//!
//! Razorpay signs `"{order_id}|{payment_id}"` with HMAC-SHA256 over the key
//! secret and sends the hex digest back with the payment. The comparison is
//! plain string equality, mirroring the gateway's own documented
//! verification.

use ring::hmac;

/// Hex HMAC-SHA256 of `message` under `secret`
fn mac_hex(secret: &str, message: &str) -> String {
    let key = hmac::Key::new(hmac::HMAC_SHA256, secret.as_bytes());
    let tag = hmac::sign(&key, message.as_bytes());
    hex::encode(tag.as_ref())
}

/// Compute the expected signature for an (order, payment) pair
pub fn sign_order_payment(secret: &str, order_id: &str, payment_id: &str) -> String {
    mac_hex(secret, &format!("{order_id}|{payment_id}"))
}

/// Check a client-supplied signature against the expected one
pub fn verify_order_payment(
    secret: &str,
    order_id: &str,
    payment_id: &str,
    signature: &str,
) -> bool {
    sign_order_payment(secret, order_id, payment_id) == signature
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rfc4231_reference_vector() {
        // RFC 4231 test case 2 pins the HMAC-SHA256 implementation
        assert_eq!(
            mac_hex("Jefe", "what do ya want for nothing?"),
            "5bdcc146bf60754e6a042426089575c75a003f089d2739839dec58b964ec3843"
        );
    }

    #[test]
    fn test_round_trip_verifies() {
        let sig = sign_order_payment("secret", "order_abc", "pay_123");
        assert_eq!(sig.len(), 64);
        assert!(verify_order_payment("secret", "order_abc", "pay_123", &sig));
    }

    #[test]
    fn test_mutated_payment_id_fails() {
        let sig = sign_order_payment("secret", "order_abc", "pay_123");
        assert!(!verify_order_payment("secret", "order_abc", "pay_124", &sig));
        assert!(!verify_order_payment("secret", "order_abd", "pay_123", &sig));
        assert!(!verify_order_payment("wrong", "order_abc", "pay_123", &sig));
    }

    #[test]
    fn test_signature_is_deterministic() {
        assert_eq!(
            sign_order_payment("s", "o", "p"),
            sign_order_payment("s", "o", "p")
        );
    }
}
