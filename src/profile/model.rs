use serde::{Deserialize, Serialize};

/// Store keys the profile fields are persisted under.
pub mod keys {
    pub const NAME: &str = "name";
    pub const BIRTHDAY: &str = "birthday";
    pub const BIRTHPLACE: &str = "birthplace";
    pub const ADDRESS: &str = "address";
    pub const ZIPCODE: &str = "zipcode";
    pub const TOWN: &str = "town";
    pub const DONE_AT: &str = "done-at";
    pub const SIGNATURE: &str = "signature";
    pub const LAST_REASON: &str = "last-reason";
}

/// The persisted personal-data record a certificate is generated from.
///
/// `name`, `birthday`, `address`, `zipcode`, `town` and `signature` are
/// required at profile-creation time and always present afterwards;
/// `birthplace` and `done_at` may be absent and degrade to defined
/// defaults when rendered.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Profile {
    pub name: String,
    /// Birth date, already formatted `DD/MM/YYYY`.
    pub birthday: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub birthplace: Option<String>,
    pub address: String,
    pub zipcode: String,
    pub town: String,
    /// Place of signing, when different from `town`.
    #[serde(default, rename = "done-at", skip_serializing_if = "Option::is_none")]
    pub done_at: Option<String>,
    /// Reference to the hand-drawn signature raster: a `data:` URI, an
    /// http(s) URL or a filesystem path.
    pub signature: String,
}

impl Profile {
    /// The combined address line printed on the certificate, with single
    /// spaces between address, zipcode and town.
    pub fn address_line(&self) -> String {
        format!("{} {} {}", self.address, self.zipcode, self.town)
    }

    /// Place of signing: `done_at`, or the town when unset.
    pub fn signing_place(&self) -> &str {
        self.done_at.as_deref().unwrap_or(&self.town)
    }

    /// Birthplace, rendered as the empty string when absent.
    pub fn birthplace_or_empty(&self) -> &str {
        self.birthplace.as_deref().unwrap_or("")
    }
}

/// Convert an ISO `YYYY-MM-DD` date (the form a date input produces) into
/// the `DD/MM/YYYY` form the profile stores.
pub fn birthday_from_iso(iso: &str) -> String {
    iso.split('-').rev().collect::<Vec<_>>().join("/")
}
