use serde::Serialize;

use crate::domain::UserId;

/// What other users may see about someone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PublicUser {
    pub id: UserId,
    pub display_name: String,
    pub avatar_ref: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PublicProfile {
    pub id: UserId,
    pub member_number: i32,
    pub display_name: String,
    pub avatar_ref: Option<String>,
    pub xp: u64,
    pub level: u32,
    /// XP total at which the next level is reached, absent at the top of a
    /// threshold curve.
    pub next_level_xp: Option<u64>,
    pub joined_at: String,
}

const DISPLAY_NAME_MAX: usize = 64;

/// Trims a display name and checks its length.
pub fn normalize_display_name(display_name: &str) -> Result<String, String> {
    let trimmed = display_name.trim();
    if trimmed.is_empty() {
        return Err("Display name cannot be empty".to_string());
    }
    if trimmed.chars().count() > DISPLAY_NAME_MAX {
        return Err(format!(
            "Display name must be {DISPLAY_NAME_MAX} characters or less"
        ));
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_name_is_trimmed() {
        assert_eq!(normalize_display_name("  Fern ").unwrap(), "Fern");
        assert!(normalize_display_name("   ").is_err());
        assert!(normalize_display_name(&"x".repeat(65)).is_err());
    }
}
