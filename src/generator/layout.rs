//! Fixed layout table for the certificate template.
//!
//! Every printed field maps to one slot on the single template page. The
//! coordinates are hand-tuned to the official certificate asset and live
//! here, in one auditable table, rather than scattered through the
//! composing code. PDF coordinates: origin bottom-left, y increasing
//! upward, units in points.

/// Default size for profile text fields.
pub const TEXT_SIZE: f64 = 11.0;

/// Size of the "x" glyph marking the selected reason checkbox.
pub const MARK_SIZE: f64 = 25.0;

/// Target width of the embedded signature image, in points.
pub const SIGNATURE_WIDTH: f64 = 100.0;

/// Horizontal inset of the signature from the page's right edge, in
/// addition to the scaled signature width.
pub const SIGNATURE_RIGHT_INSET: f64 = 130.0;

/// Vertical offset of the signature from the page's bottom edge.
pub const SIGNATURE_BOTTOM_OFFSET: f64 = 100.0;

/// A single text slot on the template page.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldSlot {
    pub x: f64,
    pub y: f64,
    pub size: f64,
}

/// The printed fields of the certificate.
///
/// `SignedOnDate`, `SignedAtHour`, `SignedAtSeparator` and
/// `SignedAtMinute` together form the timestamp block; they are only
/// drawn when a reason is selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    FullName,
    Birthday,
    Birthplace,
    AddressLine,
    SigningPlace,
    SignedOnDate,
    SignedAtHour,
    SignedAtSeparator,
    SignedAtMinute,
}

impl Field {
    /// Slot for this field. No wrapping or truncation is applied anywhere;
    /// values are expected to fit the template's printed boxes.
    pub fn slot(&self) -> FieldSlot {
        match self {
            Field::FullName => FieldSlot { x: 385.0, y: 635.0, size: TEXT_SIZE },
            Field::Birthday => FieldSlot { x: 400.0, y: 613.0, size: TEXT_SIZE },
            Field::Birthplace => FieldSlot { x: 427.0, y: 590.0, size: TEXT_SIZE },
            Field::AddressLine => FieldSlot { x: 241.0, y: 568.0, size: TEXT_SIZE },
            Field::SigningPlace => FieldSlot { x: 400.0, y: 200.0, size: TEXT_SIZE },
            Field::SignedOnDate => FieldSlot { x: 451.0, y: 178.0, size: TEXT_SIZE },
            Field::SignedAtHour => FieldSlot { x: 370.0, y: 178.0, size: TEXT_SIZE },
            Field::SignedAtSeparator => FieldSlot { x: 382.0, y: 178.0, size: TEXT_SIZE },
            Field::SignedAtMinute => FieldSlot { x: 385.0, y: 178.0, size: TEXT_SIZE },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_fields_use_default_size() {
        for field in [
            Field::FullName,
            Field::Birthday,
            Field::Birthplace,
            Field::AddressLine,
            Field::SigningPlace,
        ] {
            assert_eq!(field.slot().size, TEXT_SIZE);
        }
    }

    #[test]
    fn test_timestamp_block_sits_on_one_line() {
        let y = Field::SignedOnDate.slot().y;
        assert_eq!(Field::SignedAtHour.slot().y, y);
        assert_eq!(Field::SignedAtSeparator.slot().y, y);
        assert_eq!(Field::SignedAtMinute.slot().y, y);
    }
}
