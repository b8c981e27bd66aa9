//! Name component validation and classification.

use soroban_sdk::String;

use crate::errors::RegistryError;
use crate::pricing::LabelCategory;

/// Longest component accepted, in bytes of UTF-8.
pub const MAX_COMPONENT_BYTES: u32 = 64;

/// Validates a name component and returns its character count.
///
/// Components must be non-empty, at most [`MAX_COMPONENT_BYTES`] bytes, and
/// free of ASCII control characters and spaces. Multi-byte sequences
/// (emoji included) are counted as single characters.
pub fn validate_component(component: &String) -> Result<u32, RegistryError> {
    let len = component.len();
    if len == 0 {
        return Err(RegistryError::InvalidLabel);
    }
    if len > MAX_COMPONENT_BYTES {
        return Err(RegistryError::LabelTooLong);
    }

    let mut buf = [0u8; MAX_COMPONENT_BYTES as usize];
    component.copy_into_slice(&mut buf[..len as usize]);

    let mut chars: u32 = 0;
    for b in &buf[..len as usize] {
        if *b < 0x21 || *b == 0x7F {
            // Control characters, space, DEL.
            return Err(RegistryError::InvalidLabel);
        }
        // UTF-8 continuation bytes are 0b10xx_xxxx; everything else starts
        // a character.
        if *b & 0xC0 != 0x80 {
            chars += 1;
        }
    }
    Ok(chars)
}

/// Pricing bucket for a component of `chars` characters.
pub fn categorize(chars: u32) -> LabelCategory {
    match chars {
        0 | 1 => LabelCategory::Single,
        2 | 3 => LabelCategory::Short,
        _ => LabelCategory::Standard,
    }
}
