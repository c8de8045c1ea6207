use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TreeConfig {
    pub node_width: f32,
    pub node_height: f32,
    pub sibling_gap: f32,
    pub partner_gap: f32,
    pub level_height: f32,
    pub row_origin_x: f32,
    pub sibling_run_gap: f32,
    pub ancestor_pair_gap: f32,
    pub ancestor_pair_half_width: f32,
    pub min_canvas_width: f32,
    pub wing_padding: f32,
    pub bottom_margin: f32,
    pub past_union_gap: f32,
    pub past_drop_offset: f32,
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self {
            node_width: 140.0,
            node_height: 100.0,
            sibling_gap: 40.0,
            partner_gap: 60.0,
            level_height: 180.0,
            row_origin_x: 50.0,
            sibling_run_gap: 20.0,
            ancestor_pair_gap: 40.0,
            ancestor_pair_half_width: 175.0,
            min_canvas_width: 1000.0,
            wing_padding: 50.0,
            bottom_margin: 50.0,
            past_union_gap: 60.0,
            past_drop_offset: 15.0,
        }
    }
}

impl TreeConfig {
    /// Baseline y of a generation row. Level 0 is the anchor row; with the
    /// default row height the six rows land on 90, 270, 450, 630, 810, 990.
    pub fn row_y(&self, level: i32) -> f32 {
        (level as f32 + 2.5) * self.level_height
    }
}

#[derive(Debug, Clone, Default)]
pub struct Config {
    pub tree: TreeConfig,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TreeConfigFile {
    node_width: Option<f32>,
    node_height: Option<f32>,
    sibling_gap: Option<f32>,
    partner_gap: Option<f32>,
    level_height: Option<f32>,
    row_origin_x: Option<f32>,
    sibling_run_gap: Option<f32>,
    ancestor_pair_gap: Option<f32>,
    ancestor_pair_half_width: Option<f32>,
    min_canvas_width: Option<f32>,
    wing_padding: Option<f32>,
    bottom_margin: Option<f32>,
    past_union_gap: Option<f32>,
    past_drop_offset: Option<f32>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ConfigFile {
    tree: Option<TreeConfigFile>,
}

pub fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    let mut config = Config::default();
    let Some(path) = path else {
        return Ok(config);
    };

    let contents = std::fs::read_to_string(path)?;
    let parsed: ConfigFile = serde_json::from_str(&contents)?;

    if let Some(tree) = parsed.tree {
        if let Some(v) = tree.node_width {
            config.tree.node_width = v;
        }
        if let Some(v) = tree.node_height {
            config.tree.node_height = v;
        }
        if let Some(v) = tree.sibling_gap {
            config.tree.sibling_gap = v;
        }
        if let Some(v) = tree.partner_gap {
            config.tree.partner_gap = v;
        }
        if let Some(v) = tree.level_height {
            config.tree.level_height = v;
        }
        if let Some(v) = tree.row_origin_x {
            config.tree.row_origin_x = v;
        }
        if let Some(v) = tree.sibling_run_gap {
            config.tree.sibling_run_gap = v;
        }
        if let Some(v) = tree.ancestor_pair_gap {
            config.tree.ancestor_pair_gap = v;
        }
        if let Some(v) = tree.ancestor_pair_half_width {
            config.tree.ancestor_pair_half_width = v;
        }
        if let Some(v) = tree.min_canvas_width {
            config.tree.min_canvas_width = v;
        }
        if let Some(v) = tree.wing_padding {
            config.tree.wing_padding = v;
        }
        if let Some(v) = tree.bottom_margin {
            config.tree.bottom_margin = v;
        }
        if let Some(v) = tree.past_union_gap {
            config.tree.past_union_gap = v;
        }
        if let Some(v) = tree.past_drop_offset {
            config.tree.past_drop_offset = v;
        }
    }

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generation_rows_sit_on_the_grid() {
        let config = TreeConfig::default();
        assert_eq!(config.row_y(-2), 90.0);
        assert_eq!(config.row_y(-1), 270.0);
        assert_eq!(config.row_y(0), 450.0);
        assert_eq!(config.row_y(1), 630.0);
        assert_eq!(config.row_y(2), 810.0);
        assert_eq!(config.row_y(3), 990.0);
    }

    #[test]
    fn missing_config_path_yields_defaults() {
        let config = load_config(None).unwrap();
        assert_eq!(config.tree.node_width, 140.0);
        assert_eq!(config.tree.partner_gap, 60.0);
    }
}
