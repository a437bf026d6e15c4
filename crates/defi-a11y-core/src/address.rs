//! Address formatting for display and for screen readers.

use alloy::primitives::Address;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AddressError {
    #[error("address must be 0x followed by 40 hex characters, got {0:?}")]
    Malformed(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddressValidation {
    /// Mixed case matching EIP-55.
    Checksummed,
    /// All lower or all upper case; carries no checksum.
    NoChecksum,
    ChecksumMismatch,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddressDisplay {
    pub address: Address,
    pub checksummed: String,
    pub short: String,
    pub aria_label: String,
    pub validation: AddressValidation,
}

impl AddressDisplay {
    pub fn parse(input: &str, prefix_chars: usize, suffix_chars: usize) -> Result<Self, AddressError> {
        let trimmed = input.trim();
        let hex = trimmed
            .strip_prefix("0x")
            .filter(|hex| hex.len() == 40)
            .ok_or_else(|| AddressError::Malformed(trimmed.to_owned()))?;
        let address: Address = trimmed
            .parse()
            .map_err(|_| AddressError::Malformed(trimmed.to_owned()))?;

        let lower = hex.chars().all(|c| !c.is_ascii_uppercase());
        let upper = hex.chars().all(|c| !c.is_ascii_lowercase());
        let validation = if lower || upper {
            AddressValidation::NoChecksum
        } else if Address::parse_checksummed(trimmed, None).is_ok() {
            AddressValidation::Checksummed
        } else {
            AddressValidation::ChecksumMismatch
        };

        Ok(Self::build(address, validation, prefix_chars, suffix_chars))
    }

    pub fn from_address(address: Address, prefix_chars: usize, suffix_chars: usize) -> Self {
        Self::build(address, AddressValidation::Checksummed, prefix_chars, suffix_chars)
    }

    fn build(
        address: Address,
        validation: AddressValidation,
        prefix_chars: usize,
        suffix_chars: usize,
    ) -> Self {
        let checksummed = address.to_checksum(None);
        let short = shorten(&checksummed, prefix_chars, suffix_chars);
        let aria_label = spoken_label(&checksummed, prefix_chars, suffix_chars);
        Self {
            address,
            checksummed,
            short,
            aria_label,
            validation,
        }
    }
}

/// `0x1234…abcd` style shortening. Returns the input unchanged when there is
/// nothing to elide.
pub fn shorten(address: &str, prefix_chars: usize, suffix_chars: usize) -> String {
    let hex = address.strip_prefix("0x").unwrap_or(address);
    if prefix_chars.saturating_add(suffix_chars) >= hex.len() {
        return address.to_owned();
    }
    format!(
        "0x{}…{}",
        &hex[..prefix_chars],
        &hex[hex.len() - suffix_chars..]
    )
}

fn spell(chars: &str) -> String {
    chars
        .chars()
        .map(|c| c.to_ascii_uppercase().to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Reads the visible characters one at a time so screen readers do not try
/// to pronounce hex as words.
fn spoken_label(checksummed: &str, prefix_chars: usize, suffix_chars: usize) -> String {
    let hex = checksummed.strip_prefix("0x").unwrap_or(checksummed);
    if prefix_chars.saturating_add(suffix_chars) >= hex.len() {
        return format!("Address {}", spell(hex));
    }
    format!(
        "Address starting {}, ending {}",
        spell(&hex[..prefix_chars]),
        spell(&hex[hex.len() - suffix_chars..])
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    const VITALIK: &str = "0xd8dA6BF26964aF9D7eEd9e03E53415D37aA96045";

    #[test]
    fn shortens_checksummed_address() {
        let display = AddressDisplay::parse(VITALIK, 4, 4).expect("valid address");
        assert_eq!(display.short, "0xd8dA…6045");
        assert_eq!(display.checksummed, VITALIK);
        assert_eq!(display.validation, AddressValidation::Checksummed);
        assert_eq!(display.aria_label, "Address starting D 8 D A, ending 6 0 4 5");
    }

    #[test]
    fn lowercase_input_has_no_checksum() {
        let display =
            AddressDisplay::parse(&VITALIK.to_lowercase(), 6, 4).expect("valid address");
        assert_eq!(display.validation, AddressValidation::NoChecksum);
        assert_eq!(display.checksummed, VITALIK);
    }

    #[test]
    fn flipped_case_is_a_checksum_mismatch() {
        let broken = VITALIK.replacen("d8dA", "d8DA", 1);
        let display = AddressDisplay::parse(&broken, 4, 4).expect("parses");
        assert_eq!(display.validation, AddressValidation::ChecksumMismatch);
    }

    #[test]
    fn huge_window_shows_the_whole_address() {
        let display = AddressDisplay::parse(VITALIK, usize::MAX, 1).expect("valid address");
        assert_eq!(display.short, VITALIK);
        assert!(display.aria_label.starts_with("Address D 8 D A"));
        assert_eq!(shorten(VITALIK, 1, usize::MAX), VITALIK);
    }

    #[test]
    fn rejects_malformed_input() {
        assert!(AddressDisplay::parse("0x1234", 4, 4).is_err());
        assert!(AddressDisplay::parse("d8dA6BF26964aF9D7eEd9e03E53415D37aA96045", 4, 4).is_err());
        assert!(AddressDisplay::parse("0xzz", 4, 4).is_err());
    }

    #[test]
    fn shorten_keeps_short_input() {
        assert_eq!(shorten("0xabcd", 4, 4), "0xabcd");
    }
}
