//! Project manifest adapters.

pub mod pbxproj;
pub mod plist;

pub use pbxproj::{PBXPROJ_FILE, PbxprojLoader, PbxprojManifest};
