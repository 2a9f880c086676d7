//! Calibration profile management
//!
//! Load, save, and list calibration profiles. A profile is one YAML file;
//! saving replaces the whole file, so curve updates gated by the
//! validator are all-or-nothing on disk as well as in memory.

pub mod defaults;

use crate::models::Profile;
use std::path::Path;

/// Validate a profile name to prevent path traversal attacks.
/// Rejects names containing path separators, "..", or other dangerous patterns.
pub fn validate_profile_name(name: &str) -> Result<(), String> {
    if name.is_empty() {
        return Err("Profile name cannot be empty".to_string());
    }

    // Reject path separators
    if name.contains('/') || name.contains('\\') {
        return Err("Profile name cannot contain path separators".to_string());
    }

    // Reject parent directory references
    if name.contains("..") {
        return Err("Profile name cannot contain '..'".to_string());
    }

    // Reject names that start with a dot (hidden files)
    if name.starts_with('.') {
        return Err("Profile name cannot start with '.'".to_string());
    }

    // Reject null bytes
    if name.contains('\0') {
        return Err("Profile name cannot contain null bytes".to_string());
    }

    Ok(())
}

/// Load a calibration profile from a YAML file
pub fn load_profile<P: AsRef<Path>>(path: P) -> Result<Profile, String> {
    let path = path.as_ref();
    let contents =
        std::fs::read_to_string(path).map_err(|e| format!("Failed to read profile file: {}", e))?;

    serde_yaml::from_str(&contents).map_err(|e| format!("Failed to parse profile YAML: {}", e))
}

/// Save a calibration profile to a YAML file
pub fn save_profile<P: AsRef<Path>>(profile: &Profile, path: P) -> Result<(), String> {
    let path = path.as_ref();
    let yaml =
        serde_yaml::to_string(profile).map_err(|e| format!("Failed to serialize profile: {}", e))?;

    std::fs::write(path, yaml).map_err(|e| format!("Failed to write profile file: {}", e))
}

/// List all available profiles in a directory
pub fn list_profiles<P: AsRef<Path>>(dir: P) -> Result<Vec<String>, String> {
    let dir = dir.as_ref();
    let mut profiles = Vec::new();

    let entries =
        std::fs::read_dir(dir).map_err(|e| format!("Failed to read profiles directory: {}", e))?;

    for entry in entries {
        let entry = entry.map_err(|e| format!("Failed to read directory entry: {}", e))?;
        let path = entry.path();

        if path.extension().and_then(|e| e.to_str()) == Some("yml")
            || path.extension().and_then(|e| e.to_str()) == Some("yaml")
        {
            if let Some(name) = path.file_stem().and_then(|n| n.to_str()) {
                profiles.push(name.to_string());
            }
        }
    }

    Ok(profiles)
}

/// Get the default profiles directory
pub fn get_profiles_dir() -> Result<std::path::PathBuf, String> {
    let home_dir =
        dirs::home_dir().ok_or_else(|| "Could not determine home directory".to_string())?;

    let profiles_dir = home_dir.join("striplab").join("profiles");

    // Create directory if it doesn't exist
    if !profiles_dir.exists() {
        std::fs::create_dir_all(&profiles_dir)
            .map_err(|e| format!("Failed to create profiles directory: {}", e))?;
    }

    Ok(profiles_dir)
}
