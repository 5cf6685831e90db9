use serde::{Deserialize, Serialize};

/// A household member: identity plus per-profile movie references.
///
/// `my_list` and `likes` hold ids of movies that exist in the library;
/// catalog deletion strips dangling references in the same operation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profile {
    pub id: String,
    pub name: String,
    pub avatar_url: String,
    #[serde(default)]
    pub my_list: Vec<String>,
    #[serde(default)]
    pub likes: Vec<String>,
}

impl Profile {
    /// New profile with an avatar derived deterministically from the name.
    pub fn new(id: String, name: &str) -> Self {
        Self {
            id,
            name: name.to_string(),
            avatar_url: avatar_for(name),
            my_list: Vec::new(),
            likes: Vec::new(),
        }
    }
}

/// Deterministic avatar reference for a display name.
pub fn avatar_for(name: &str) -> String {
    format!("https://api.dicebear.com/7.x/avataaars/svg?seed={name}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_profile_is_empty_with_derived_avatar() {
        let profile = Profile::new("p-1".into(), "Kids");
        assert!(profile.my_list.is_empty());
        assert!(profile.likes.is_empty());
        assert!(profile.avatar_url.contains("Kids"));
    }

    #[test]
    fn test_avatar_is_deterministic() {
        assert_eq!(avatar_for("Ana"), avatar_for("Ana"));
    }
}
