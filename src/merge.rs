// Merge of a per-user progress record with the game's achievement schema.
// Output is the user-facing summary: counts plus the not-yet-attained
// achievements in schema order, with icons reduced to stable keys.

use std::collections::HashSet;

use serde::Serialize;
use url::Url;

use crate::steam::models::{PlayerProgress, SchemaAchievement};

/// Per-game summary as it appears in the `game_data` array.
#[derive(Debug, Serialize)]
pub struct GameSummary {
    pub app_id: u32,
    pub title: String,
    #[serde(rename = "a_count")]
    pub achievements_total: u32,
    #[serde(rename = "a_done")]
    pub achievements_done: u32,
    #[serde(rename = "a_info")]
    pub pending: Vec<PendingAchievement>,
}

/// Schema descriptor stripped to what the consumer needs: display text and
/// icon keys. The internal `name`, `hidden` and `defaultvalue` fields never
/// leave this module.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PendingAchievement {
    #[serde(rename = "displayName")]
    pub display_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub icon: String,
    pub icongray: String,
}

/// Combine one game's progress with its schema.
///
/// Matching is exact equality between the progress `apiname` and the schema
/// `name`; Steam emits both from the same source so variants do not occur in
/// practice. Schema order is preserved in the output.
pub fn merge(progress: &PlayerProgress, schema: &[SchemaAchievement]) -> GameSummary {
    let achievements_done = progress
        .achievements
        .iter()
        .filter(|a| a.achieved == 1)
        .count() as u32;
    let achievements_total = progress.achievements.len() as u32;

    let not_attained: HashSet<&str> = progress
        .achievements
        .iter()
        .filter(|a| a.achieved == 0)
        .map(|a| a.apiname.as_str())
        .collect();

    let pending = schema
        .iter()
        .filter(|s| not_attained.contains(s.name.as_str()))
        .map(|s| PendingAchievement {
            display_name: s.display_name.clone(),
            description: s.description.clone(),
            icon: icon_key(&s.icon),
            icongray: icon_key(&s.icongray),
        })
        .collect();

    GameSummary {
        app_id: progress.app_id,
        title: progress.title.clone(),
        achievements_total,
        achievements_done,
        pending,
    }
}

/// Reduce an icon URL to its filename stem, e.g.
/// `https://cdn.steamstatic.com/.../icon123.jpg` -> `icon123`.
///
/// Pure and idempotent: applying it to its own output returns the same key.
/// Input that is not a URL degrades to the stem of the raw string.
pub fn icon_key(raw: &str) -> String {
    let path = match Url::parse(raw) {
        Ok(url) => url.path().to_string(),
        Err(_) => raw.to_string(),
    };
    let base = path.rsplit('/').next().unwrap_or("");
    match base.rsplit_once('.') {
        Some((stem, _)) if !stem.is_empty() => stem.to_string(),
        _ => base.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::steam::models::PlayerAchievement;

    fn progress(entries: &[(&str, u8)]) -> PlayerProgress {
        PlayerProgress {
            app_id: 440,
            title: "Team Fortress 2".to_string(),
            achievements: entries
                .iter()
                .map(|(name, achieved)| PlayerAchievement {
                    apiname: name.to_string(),
                    achieved: *achieved,
                })
                .collect(),
        }
    }

    fn schema_entry(name: &str) -> SchemaAchievement {
        SchemaAchievement {
            name: name.to_string(),
            display_name: format!("{name} display"),
            description: Some(format!("{name} description")),
            icon: format!("https://cdn.example.com/apps/440/{name}_icon.jpg"),
            icongray: format!("https://cdn.example.com/apps/440/{name}_gray.jpg"),
        }
    }

    #[test]
    fn done_never_exceeds_total() {
        let p = progress(&[("A", 1), ("B", 0), ("C", 1)]);
        let schema: Vec<_> = ["A", "B", "C"].iter().map(|n| schema_entry(n)).collect();
        let summary = merge(&p, &schema);
        assert_eq!(summary.achievements_total, 3);
        assert_eq!(summary.achievements_done, 2);
        assert!(summary.achievements_done <= summary.achievements_total);
    }

    #[test]
    fn pending_excludes_attained() {
        let p = progress(&[("A", 1), ("B", 0), ("C", 0)]);
        let schema: Vec<_> = ["A", "B", "C"].iter().map(|n| schema_entry(n)).collect();
        let summary = merge(&p, &schema);
        let names: Vec<_> = summary.pending.iter().map(|a| a.display_name.as_str()).collect();
        assert_eq!(names, vec!["B display", "C display"]);
    }

    #[test]
    fn pending_follows_schema_order() {
        let p = progress(&[("C", 0), ("A", 0), ("B", 1)]);
        let schema: Vec<_> = ["A", "B", "C"].iter().map(|n| schema_entry(n)).collect();
        let summary = merge(&p, &schema);
        let names: Vec<_> = summary.pending.iter().map(|a| a.display_name.as_str()).collect();
        assert_eq!(names, vec!["A display", "C display"]);
    }

    #[test]
    fn schema_entries_without_progress_are_ignored() {
        // The schema can define achievements the progress record never
        // mentions (e.g. DLC the user lacks); those are not pending.
        let p = progress(&[("A", 0)]);
        let schema: Vec<_> = ["A", "Z"].iter().map(|n| schema_entry(n)).collect();
        let summary = merge(&p, &schema);
        assert_eq!(summary.pending.len(), 1);
        assert_eq!(summary.achievements_total, 1);
    }

    #[test]
    fn matching_is_case_sensitive() {
        let p = progress(&[("tf_play_game_everymap", 0)]);
        let schema = vec![schema_entry("TF_PLAY_GAME_EVERYMAP")];
        let summary = merge(&p, &schema);
        assert!(summary.pending.is_empty());
    }

    #[test]
    fn strips_internal_fields_from_output() {
        let p = progress(&[("A", 0)]);
        let summary = merge(&p, &[schema_entry("A")]);
        let body = serde_json::to_value(&summary).unwrap();
        let entry = &body["a_info"][0];
        assert!(entry.get("name").is_none());
        assert!(entry.get("hidden").is_none());
        assert!(entry.get("defaultvalue").is_none());
        assert_eq!(entry["displayName"], "A display");
        assert_eq!(entry["icon"], "A_icon");
    }

    #[test]
    fn description_omitted_when_absent() {
        let p = progress(&[("A", 0)]);
        let mut entry = schema_entry("A");
        entry.description = None;
        let summary = merge(&p, &[entry]);
        let body = serde_json::to_value(&summary).unwrap();
        assert!(body["a_info"][0].get("description").is_none());
    }

    #[test]
    fn icon_key_strips_url_to_stem() {
        assert_eq!(icon_key("https://x/a/b/icon123.jpg"), "icon123");
        assert_eq!(
            icon_key("http://media.steampowered.com/steamcommunity/public/images/apps/440/abc0123456789.jpg"),
            "abc0123456789"
        );
    }

    #[test]
    fn icon_key_is_idempotent() {
        let once = icon_key("https://x/a/b/icon123.jpg");
        assert_eq!(icon_key(&once), once);
    }

    #[test]
    fn icon_key_handles_non_url_input() {
        assert_eq!(icon_key("icon123.jpg"), "icon123");
        assert_eq!(icon_key("icon123"), "icon123");
        assert_eq!(icon_key(""), "");
    }
}
