use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Functional group a sub-mesh belongs to for rigging purposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PartClass {
    Hood,
    DoorLeft,
    DoorRight,
    Excluded,
    Unclassified,
}

impl PartClass {
    /// Convert a manifest tag to a class. Unknown tags fall through to
    /// unclassified so a typo in content authoring cannot animate a panel by
    /// accident.
    pub fn from_string(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "hood" => Self::Hood,
            "door_left" => Self::DoorLeft,
            "door_right" => Self::DoorRight,
            "excluded" => Self::Excluded,
            _ => Self::Unclassified,
        }
    }
}

/// Authored classification table shipped alongside the model. Maps exact
/// node names to stable class tags; a manifest entry always beats the
/// substring heuristics below.
#[derive(Asset, TypePath, Debug, Clone, Default, Serialize, Deserialize)]
pub struct PartManifest {
    pub parts: Vec<PartRule>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PartRule {
    pub node: String,
    pub class: String,
}

impl PartManifest {
    pub fn class_for(&self, node_name: &str) -> Option<PartClass> {
        self.parts
            .iter()
            .find(|rule| rule.node == node_name)
            .map(|rule| PartClass::from_string(&rule.class))
    }
}

/// Substrings that force exclusion even when an inclusion pattern matches.
/// Naming heuristics are ambiguous; badges, lights and glass must never
/// swing with a door.
const EXCLUSION_PATTERNS: &[&str] = &[
    "rear", "quarter", "lamp", "light", "glass", "window", "bumper", "grille", "spoiler",
    "badge", "emblem", "mirror",
];

const HOOD_PATTERNS: &[&str] = &["hood", "bonnet"];
const DOOR_PATTERNS: &[&str] = &["door"];
const LEFT_PATTERNS: &[&str] = &["left", "_l", ".l", "lh", "driver"];
const RIGHT_PATTERNS: &[&str] = &["right", "_r", ".r", "rh", "passenger"];

/// Classify one mesh node. The authored manifest wins outright; otherwise
/// name and parent-name substring heuristics apply, with the exclusion list
/// overriding any inclusion match. Unmatchable names are silently
/// unclassified, never an error.
pub fn classify(name: &str, parent_name: Option<&str>, manifest: Option<&PartManifest>) -> PartClass {
    if let Some(manifest) = manifest {
        if let Some(class) = manifest.class_for(name) {
            return class;
        }
    }

    let name = name.to_lowercase();
    let parent = parent_name.map(|p| p.to_lowercase()).unwrap_or_default();
    let matches = |patterns: &[&str]| {
        patterns
            .iter()
            .any(|p| name.contains(p) || parent.contains(p))
    };

    if matches(EXCLUSION_PATTERNS) {
        return PartClass::Excluded;
    }

    if matches(HOOD_PATTERNS) {
        return PartClass::Hood;
    }

    if matches(DOOR_PATTERNS) {
        if matches(LEFT_PATTERNS) {
            return PartClass::DoorLeft;
        }
        if matches(RIGHT_PATTERNS) {
            return PartClass::DoorRight;
        }
    }

    PartClass::Unclassified
}
