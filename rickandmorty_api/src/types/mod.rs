mod character;
pub use self::character::{Character, LifeStatus, Place};

mod listing;
pub use self::listing::{CharacterListing, Info};
