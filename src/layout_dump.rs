use crate::config::TreeConfig;
use crate::layout::{FamilyLayouts, TreeLayout};
use crate::member::{HealthStatus, Region};
use serde::Serialize;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

#[derive(Debug, Serialize)]
pub struct LayoutDump {
    pub main: TreeDump,
    pub self_past: Option<TreeDump>,
    pub spouse_past: Option<TreeDump>,
}

#[derive(Debug, Serialize)]
pub struct TreeDump {
    pub width: f32,
    pub height: f32,
    pub nodes: Vec<NodeDump>,
    pub edges: Vec<EdgeDump>,
}

#[derive(Debug, Serialize)]
pub struct NodeDump {
    pub id: String,
    pub name: String,
    pub relation: String,
    pub label: String,
    pub age: u32,
    pub nationality: Region,
    pub health: HealthStatus,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub ghost: bool,
}

#[derive(Debug, Serialize)]
pub struct EdgeDump {
    pub id: String,
    pub kind: String,
    pub x1: f32,
    pub y1: f32,
    pub x2: f32,
    pub y2: f32,
    pub glyph: Option<String>,
    pub glyph_size: Option<String>,
}

impl LayoutDump {
    pub fn from_layouts(layouts: &FamilyLayouts, config: &TreeConfig) -> Self {
        LayoutDump {
            main: dump_tree(&layouts.main, config),
            self_past: layouts.self_past.as_ref().map(|t| dump_tree(t, config)),
            spouse_past: layouts.spouse_past.as_ref().map(|t| dump_tree(t, config)),
        }
    }
}

fn dump_tree(layout: &TreeLayout, config: &TreeConfig) -> TreeDump {
    let nodes = layout
        .nodes
        .iter()
        .map(|node| NodeDump {
            id: node.member.id.clone(),
            name: node.member.name.clone(),
            relation: node.member.relation.wire_name().to_string(),
            label: node.member.relation.label().to_string(),
            age: node.member.age,
            nationality: node.member.nationality,
            health: node.member.health_status,
            x: node.x,
            y: node.y,
            width: config.node_width,
            height: config.node_height,
            ghost: node.ghost,
        })
        .collect();

    let edges = layout
        .edges
        .iter()
        .map(|edge| EdgeDump {
            id: edge.id.clone(),
            kind: format!("{:?}", edge.kind),
            x1: edge.x1,
            y1: edge.y1,
            x2: edge.x2,
            y2: edge.y2,
            glyph: edge.glyph.map(|g| format!("{g:?}")),
            glyph_size: edge.glyph_size.map(|s| format!("{s:?}")),
        })
        .collect();

    TreeDump {
        width: layout.width,
        height: layout.height,
        nodes,
        edges,
    }
}

pub fn write_layout_dump(
    path: &Path,
    layouts: &FamilyLayouts,
    config: &TreeConfig,
) -> anyhow::Result<()> {
    let file = File::create(path)?;
    let writer = BufWriter::new(file);
    let dump = LayoutDump::from_layouts(layouts, config);
    serde_json::to_writer_pretty(writer, &dump)?;
    Ok(())
}
