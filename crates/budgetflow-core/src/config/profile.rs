use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

/// The screens that host a budget flow diagram. Each one is a set of overrides over the
/// built-in layout/viewport defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ScreenProfile {
    /// Compact preview at the end of the planner wizard. Static, no zoom.
    Planner,
    /// Saved budget detail view.
    #[default]
    SavedBudget,
    /// Full-screen diagram with a wider zoom range.
    Fullscreen,
}

impl ScreenProfile {
    pub fn as_str(self) -> &'static str {
        match self {
            ScreenProfile::Planner => "planner",
            ScreenProfile::SavedBudget => "savedBudget",
            ScreenProfile::Fullscreen => "fullscreen",
        }
    }

    pub fn preset(self) -> Value {
        match self {
            ScreenProfile::Planner => json!({
                "layout": {
                    "canvasWidth": 340.0,
                    "canvasHeight": 360.0,
                    "labelMaxChars": 12,
                    "minSideMargin": 64.0
                },
                "viewport": {
                    "zoomEnabled": false
                }
            }),
            ScreenProfile::SavedBudget => json!({
                "layout": {},
                "viewport": {
                    "zoomEnabled": true
                }
            }),
            ScreenProfile::Fullscreen => json!({
                "layout": {
                    "canvasWidth": 720.0,
                    "canvasHeight": 640.0,
                    "nodeWidth": 18.0,
                    "labelMaxChars": 18,
                    "minNodeSpacing": 40.0,
                    "minSideMargin": 96.0
                },
                "viewport": {
                    "zoomEnabled": true,
                    "minScale": 0.4,
                    "maxScale": 4.0
                }
            }),
        }
    }
}

impl std::str::FromStr for ScreenProfile {
    type Err = crate::Error;

    fn from_str(s: &str) -> crate::Result<Self> {
        match s.trim() {
            "planner" => Ok(ScreenProfile::Planner),
            "savedBudget" | "saved-budget" | "saved" => Ok(ScreenProfile::SavedBudget),
            "fullscreen" | "full-screen" => Ok(ScreenProfile::Fullscreen),
            other => Err(crate::Error::Config {
                section: "profile".to_string(),
                message: format!("unknown screen profile: {other}"),
            }),
        }
    }
}
