//! Package-manager install command formatting.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A package manager identifier.
///
/// The well-known managers get their proper install verb; anything else
/// falls back to `{id} install {package}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PackageManager {
    Npm,
    Yarn,
    Pnpm,
    Composer,
    Pip,
    Gem,
    /// Any other manager id, kept verbatim
    #[serde(untagged)]
    Other(String),
}

impl PackageManager {
    /// Map a raw identifier to a manager; unknown ids are kept verbatim.
    pub fn from_id(id: &str) -> Self {
        match id {
            "npm" => Self::Npm,
            "yarn" => Self::Yarn,
            "pnpm" => Self::Pnpm,
            "composer" => Self::Composer,
            "pip" => Self::Pip,
            "gem" => Self::Gem,
            other => Self::Other(other.to_string()),
        }
    }

    /// The identifier as the user typed it.
    pub fn id(&self) -> &str {
        match self {
            Self::Npm => "npm",
            Self::Yarn => "yarn",
            Self::Pnpm => "pnpm",
            Self::Composer => "composer",
            Self::Pip => "pip",
            Self::Gem => "gem",
            Self::Other(id) => id,
        }
    }
}

impl FromStr for PackageManager {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(Self::from_id(s))
    }
}

impl fmt::Display for PackageManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// Format the install command shown in the card's install bar.
pub fn install_command(manager: &PackageManager, package: &str) -> String {
    match manager {
        PackageManager::Npm => format!("npm install {}", package),
        PackageManager::Yarn => format!("yarn add {}", package),
        PackageManager::Pnpm => format!("pnpm add {}", package),
        PackageManager::Composer => format!("composer require {}", package),
        PackageManager::Pip => format!("pip install {}", package),
        PackageManager::Gem => format!("gem install {}", package),
        PackageManager::Other(id) => format!("{} install {}", id, package),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_managers_use_their_verb() {
        let cases = [
            ("npm", "npm install foo"),
            ("yarn", "yarn add foo"),
            ("pnpm", "pnpm add foo"),
            ("composer", "composer require foo"),
            ("pip", "pip install foo"),
            ("gem", "gem install foo"),
        ];
        for (id, expected) in cases {
            let mgr: PackageManager = id.parse().unwrap();
            assert_eq!(install_command(&mgr, "foo"), expected);
        }
    }

    #[test]
    fn unknown_manager_falls_back_to_install() {
        let mgr: PackageManager = "unknownmgr".parse().unwrap();
        assert_eq!(install_command(&mgr, "foo"), "unknownmgr install foo");
    }

    #[test]
    fn id_round_trips_through_serde() {
        let mgr: PackageManager = serde_json::from_str("\"cargo\"").unwrap();
        assert_eq!(mgr, PackageManager::Other("cargo".to_string()));
        assert_eq!(serde_json::to_string(&PackageManager::Npm).unwrap(), "\"npm\"");
    }
}
