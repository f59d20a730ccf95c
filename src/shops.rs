//! Shops

use serde::{Deserialize, Serialize};

use crate::products::ShopId;

/// A vendor shop as supplied by the shop directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shop {
    /// Directory identifier.
    pub id: ShopId,

    /// Display name, used in the checkout greeting.
    pub name: String,

    /// WhatsApp contact handle. Absent or empty means checkout is
    /// unavailable for this shop.
    pub whatsapp: Option<String>,
}

impl Shop {
    /// The shop's contact handle, if it has a usable one.
    ///
    /// Whitespace-only handles count as absent.
    #[must_use]
    pub fn contact(&self) -> Option<&str> {
        self.whatsapp
            .as_deref()
            .map(str::trim)
            .filter(|handle| !handle.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shop(whatsapp: Option<&str>) -> Shop {
        Shop {
            id: ShopId::new("verdura"),
            name: "Verdura Fresh Produce".to_string(),
            whatsapp: whatsapp.map(str::to_string),
        }
    }

    #[test]
    fn contact_returns_trimmed_handle() {
        assert_eq!(shop(Some(" 2348012345678 ")).contact(), Some("2348012345678"));
    }

    #[test]
    fn contact_treats_missing_handle_as_none() {
        assert_eq!(shop(None).contact(), None);
    }

    #[test]
    fn contact_treats_blank_handle_as_none() {
        assert_eq!(shop(Some("   ")).contact(), None);
        assert_eq!(shop(Some("")).contact(), None);
    }
}
