use crate::model::ShippingInfo;
use crate::order_actor::OrderError;

const PHONE_LEN: std::ops::RangeInclusive<usize> = 9..=15;

/// Trims and checks shipping details.
///
/// Name and address must be non-empty. The phone is 9 to 15 characters: digits with an
/// optional leading `+`.
pub fn validate_shipping(shipping: ShippingInfo) -> Result<ShippingInfo, OrderError> {
    let name = shipping.name.trim();
    let address = shipping.address.trim();
    let phone = shipping.phone.trim();

    if name.is_empty() {
        return Err(OrderError::InvalidShipping("name must not be empty".into()));
    }
    if address.is_empty() {
        return Err(OrderError::InvalidShipping(
            "address must not be empty".into(),
        ));
    }
    let digits = phone.strip_prefix('+').unwrap_or(phone);
    let well_formed = !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit());
    if !well_formed || !PHONE_LEN.contains(&phone.len()) {
        return Err(OrderError::InvalidShipping(format!(
            "phone must be 9-15 digits with an optional leading '+', got {phone:?}"
        )));
    }

    Ok(ShippingInfo {
        name: name.to_string(),
        phone: phone.to_string(),
        address: address.to_string(),
    })
}
