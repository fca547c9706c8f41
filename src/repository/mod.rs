mod preferences;

pub use preferences::{PreferenceStore, SOUND_ENABLED_KEY};
